// THEORY:
// This file is the main entry point for the `framewatch` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the public
// API that will be exposed to external consumers (a camera loop, a video player,
// an export tool).
//
// The engine is three tightly coupled units, leaves first: the `color` module's
// pure value types and conversions, the `Frame` wrapping one decoded image's
// pixels, and the `FrameBuffer` ring that accumulates frames and answers
// temporal queries like `detect_motion`. The re-exports below are that whole
// surface; the module paths underneath stay available for callers that prefer
// them.

pub mod core_modules;

pub use core_modules::color::color::{
    color_distance, quantize_filter, Hsl, Hsla, QuantizeOptions, Rgb, Rgba, BLACK, BLUE, CYAN,
    GRAY, GREEN, MAGENTA, RED, WHITE, YELLOW,
};
pub use core_modules::error::FrameError;
pub use core_modules::frame::Frame;
pub use core_modules::frame_buffer::FrameBuffer;
pub use core_modules::utils::image_helper::image_helper;
