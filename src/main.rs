// Example runner for the `framewatch` library: feeds a short synthetic
// sequence (a bright square sliding over a black background) through a
// FrameBuffer and prints the motion score of every pixel.

use framewatch::{
    quantize_filter, Frame, FrameBuffer, FrameError, QuantizeOptions, Rgb, BLACK, WHITE,
};

fn main() -> Result<(), FrameError> {
    env_logger::init();

    let (width, height) = (16u32, 16u32);
    let capacity = 4usize;
    let mut buffer = FrameBuffer::new(width, height, capacity);

    // Snap every frame to a two-color palette before analysis, the way an
    // export pipeline would posterize for display.
    let posterize = quantize_filter(QuantizeOptions {
        palette: vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)],
        threshold: None,
    });

    for step in 0..capacity as u32 {
        let frame = Frame::filled(width, height, BLACK).apply_filter(|x, y, rgba| {
            let in_square = x >= step && x < step + 4 && (6..10).contains(&y);
            if in_square { WHITE } else { rgba }
        });
        buffer.add_frame(frame.apply_filter(&posterize))?;
    }

    println!("motion scores over {} frames:", buffer.len());
    for y in 0..height {
        let mut row = String::new();
        for x in 0..width {
            let score = buffer.detect_motion(x, y, 10.0)?;
            row.push_str(&format!("{score:>4}"));
        }
        println!("{row}");
    }

    Ok(())
}
