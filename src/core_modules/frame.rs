// THEORY:
// A `Frame` is one decoded image: immutable dimensions plus an owned, mutable
// byte buffer of exactly `width * height * 4` bytes, row-major, interleaved
// R,G,B,A. It is the unit the rest of the engine moves around — the
// `FrameBuffer` stores Frames, filters produce Frames.
//
// Key architectural principles:
// 1.  **Bounds Discipline**: Every pixel read and write checks its coordinates
//     and reports `OutOfBounds`, on reads as well as writes. The buffer-length
//     invariant itself is validated once, at construction.
// 2.  **Color Spaces on Demand**: HSL(A) accessors compose the RGB(A) read with
//     the color module's conversion on every call; nothing is cached.
// 3.  **Independent Copies**: `Clone` deep-copies the pixel buffer, so a clone
//     never shares storage with its source. `apply_filter` relies on this to
//     produce a new Frame without touching the receiver.

use crate::core_modules::color::color::{Hsl, Hsla, Rgb, Rgba};
use crate::core_modules::error::FrameError;

/// One decoded image's pixel buffer plus dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// A blank frame of the given dimensions, every pixel transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// A frame of the given dimensions with every pixel set to `fill`.
    pub fn filled(width: u32, height: u32, fill: Rgba) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width as usize * height as usize {
            data.extend_from_slice(&[fill.red, fill.green, fill.blue, fill.alpha]);
        }
        Self { width, height, data }
    }

    /// Wrap a raw RGBA byte buffer. The buffer must hold exactly
    /// `width * height * 4` bytes.
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32) -> Result<Self, FrameError> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(FrameError::InvalidBufferLength {
                length: data.len(),
                width,
                height,
            });
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw pixel bytes, row-major interleaved R,G,B,A.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The RGB value at pixel position (x, y).
    pub fn rgb_pixel(&self, x: u32, y: u32) -> Result<Rgb, FrameError> {
        self.check_bounds(x, y)?;
        let idx = self.byte_index(x, y);
        Ok(Rgb::new(self.data[idx], self.data[idx + 1], self.data[idx + 2]))
    }

    /// The RGBA value at pixel position (x, y).
    pub fn rgba_pixel(&self, x: u32, y: u32) -> Result<Rgba, FrameError> {
        self.check_bounds(x, y)?;
        let idx = self.byte_index(x, y);
        Ok(Rgba::new(
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ))
    }

    /// The HSL value at pixel position (x, y), converted on every call.
    pub fn hsl_pixel(&self, x: u32, y: u32) -> Result<Hsl, FrameError> {
        Ok(self.rgb_pixel(x, y)?.to_hsl())
    }

    /// The HSLA value at pixel position (x, y), converted on every call.
    pub fn hsla_pixel(&self, x: u32, y: u32) -> Result<Hsla, FrameError> {
        Ok(self.rgba_pixel(x, y)?.to_hsla())
    }

    /// Write the color channels at (x, y); the alpha byte is left untouched.
    pub fn set_rgb_pixel(&mut self, x: u32, y: u32, rgb: Rgb) -> Result<(), FrameError> {
        self.check_bounds(x, y)?;
        let idx = self.byte_index(x, y);
        self.data[idx] = rgb.red;
        self.data[idx + 1] = rgb.green;
        self.data[idx + 2] = rgb.blue;
        Ok(())
    }

    /// Write all four channels at (x, y).
    pub fn set_rgba_pixel(&mut self, x: u32, y: u32, rgba: Rgba) -> Result<(), FrameError> {
        self.check_bounds(x, y)?;
        let idx = self.byte_index(x, y);
        self.data[idx] = rgba.red;
        self.data[idx + 1] = rgba.green;
        self.data[idx + 2] = rgba.blue;
        self.data[idx + 3] = rgba.alpha;
        Ok(())
    }

    /// Convert to RGB and write the color channels at (x, y); alpha untouched.
    pub fn set_hsl_pixel(&mut self, x: u32, y: u32, hsl: Hsl) -> Result<(), FrameError> {
        self.set_rgb_pixel(x, y, hsl.to_rgb())
    }

    /// Convert to RGBA and write all four channels at (x, y). Unlike
    /// `set_hsl_pixel`, the HSLA's own alpha is what gets written.
    pub fn set_hsla_pixel(&mut self, x: u32, y: u32, hsla: Hsla) -> Result<(), FrameError> {
        self.set_rgba_pixel(x, y, hsla.to_rgba())
    }

    /// Apply a pixel filter to the frame and return the result as a new Frame.
    ///
    /// The filter sees `(x, y, rgba)` for every pixel of the receiver in
    /// row-major order and its return value is written into a clone; the
    /// receiver is never mutated.
    pub fn apply_filter<F>(&self, filter: F) -> Frame
    where
        F: Fn(u32, u32, Rgba) -> Rgba,
    {
        let mut out = self.clone();
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.byte_index(x, y);
                let current = Rgba::new(
                    self.data[idx],
                    self.data[idx + 1],
                    self.data[idx + 2],
                    self.data[idx + 3],
                );
                let next = filter(x, y, current);
                out.data[idx] = next.red;
                out.data[idx + 1] = next.green;
                out.data[idx + 2] = next.blue;
                out.data[idx + 3] = next.alpha;
            }
        }
        out
    }

    fn byte_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<(), FrameError> {
        if x >= self.width || y >= self.height {
            return Err(FrameError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// The ingest boundary: a decoded RGBA image becomes a Frame, taking ownership
/// of its pixel buffer.
impl From<image::RgbaImage> for Frame {
    fn from(image: image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }
}
