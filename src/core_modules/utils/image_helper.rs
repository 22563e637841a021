pub mod image_helper {
    use crate::core_modules::frame::Frame;
    use image::ImageEncoder;
    use std::path::Path;

    /// Write a frame's RGBA pixels to `path` as a PNG.
    pub fn save<P: AsRef<Path>>(path: P, frame: &Frame) -> Result<(), image::error::ImageError> {
        let output = std::fs::File::create(path)?;
        let encoder = image::codecs::png::PngEncoder::new(output);

        encoder.write_image(
            frame.data(),
            frame.width(),
            frame.height(),
            image::ExtendedColorType::Rgba8,
        )?;

        Ok(())
    }
}
