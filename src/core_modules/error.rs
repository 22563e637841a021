// THEORY:
// Every failure in the engine is a caller-contract violation: a pixel coordinate
// outside a frame, a frame pushed into a buffer of different dimensions, a frame
// index past the current length, or a raw byte buffer whose length disagrees
// with its claimed dimensions. None of these are transient, none are retried or
// recovered internally; each operation validates before mutating and surfaces
// the violation to the caller.
//
// The kinds are a tagged enum rather than a generic error with a string code so
// callers can match exhaustively on what went wrong. Each variant carries the
// offending values, and the message renders them for humans.

use thiserror::Error;

/// The contract violations the engine can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// A pixel coordinate outside the frame's dimensions.
    #[error("pixel coordinates ({x}, {y}) out of bounds for frame size {width}x{height}")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    /// A frame whose dimensions differ from the buffer it was pushed into.
    #[error("frame size mismatch: expected {expected_width}x{expected_height}, got {width}x{height}")]
    FrameSizeMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    /// A logical frame index at or past the buffer's current length.
    #[error("frame index {index} out of bounds (length={length})")]
    IndexOutOfRange { index: usize, length: usize },

    /// A raw pixel buffer whose length is not `width * height * 4`.
    #[error("pixel buffer length {length} does not match {width}x{height}x4")]
    InvalidBufferLength { length: usize, width: u32, height: u32 },
}
