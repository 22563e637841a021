pub mod color;
pub mod error;
pub mod frame;
pub mod frame_buffer;
pub mod utils;
