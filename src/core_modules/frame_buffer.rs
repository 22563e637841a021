// THEORY:
// The `FrameBuffer` is the temporal layer of the engine: a fixed-capacity,
// dimension-homogeneous circular FIFO of Frames. A caller decodes images one at
// a time, pushes them in, and queries the buffered history — individual frames
// by logical age, single pixels across time, or the motion score that summarizes
// how often a pixel changed over the window.
//
// Key architectural principles:
// 1.  **Fixed Ring**: Capacity is set at construction and never changes. The
//     slots are `Option<Frame>` and two cursors (`first`, `length`) describe the
//     occupied ring; once full, each insert overwrites the logically oldest slot.
// 2.  **Dimension Homogeneity**: Every stored Frame has the buffer's width and
//     height. `add_frame` validates before any mutation, so a rejected frame
//     leaves the buffer exactly as it was.
// 3.  **Logical Indexing**: Index 0 is always the oldest frame, `len() - 1` the
//     newest, regardless of where the ring's physical cursor sits.
// 4.  **Transition Counting**: `detect_motion` scores by the *number* of
//     consecutive-frame transitions that cross the threshold, not by their
//     magnitude — a pixel that flickers every frame scores 100 whether it moved
//     by the threshold or by the whole gamut.

use crate::core_modules::color::color::{color_distance, Distance, Hsl, Hsla, Rgb, Rgba};
use crate::core_modules::error::FrameError;
use crate::core_modules::frame::Frame;
use log::{debug, trace};

/// Cyclic FIFO buffer of same-sized Frames with temporal pixel-history queries.
pub struct FrameBuffer {
    width: u32,
    height: u32,
    capacity: usize,
    slots: Vec<Option<Frame>>,
    /// Physical index of the oldest occupied slot.
    first: usize,
    /// Number of frames currently in the buffer (0..=capacity).
    length: usize,
}

impl FrameBuffer {
    /// An empty buffer holding up to `capacity` frames of `width` x `height`.
    ///
    /// # Panics
    /// Panics if `capacity` is zero; the capacity is a construction-time
    /// invariant, not a runtime condition.
    pub fn new(width: u32, height: u32, capacity: usize) -> Self {
        assert!(capacity > 0, "frame buffer capacity must be non-zero");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            width,
            height,
            capacity,
            slots,
            first: 0,
            length: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of frames currently buffered.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// True once the buffer has accumulated a full window of history.
    pub fn is_ready(&self) -> bool {
        self.length == self.capacity
    }

    /// Push a frame, taking ownership; once capacity is reached, the logically
    /// oldest frame is dropped to make room. Fails without mutating the buffer
    /// if the frame's dimensions differ from the buffer's.
    pub fn add_frame(&mut self, frame: Frame) -> Result<(), FrameError> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(FrameError::FrameSizeMismatch {
                expected_width: self.width,
                expected_height: self.height,
                width: frame.width(),
                height: frame.height(),
            });
        }

        let slot = (self.first + self.length) % self.capacity;
        self.slots[slot] = Some(frame);
        if self.length < self.capacity {
            self.length += 1;
        } else {
            // The slot we just wrote held the oldest frame; advance past it.
            trace!("frame buffer full, evicted oldest frame at slot {slot}");
            self.first = (self.first + 1) % self.capacity;
        }
        Ok(())
    }

    /// Push frames in order. Stops at the first invalid frame; frames already
    /// pushed stay in the buffer (no rollback).
    pub fn add_frames<I>(&mut self, frames: I) -> Result<(), FrameError>
    where
        I: IntoIterator<Item = Frame>,
    {
        for frame in frames {
            self.add_frame(frame)?;
        }
        Ok(())
    }

    /// The frame at logical index `index`: 0 is the oldest, `len() - 1` the
    /// newest.
    pub fn frame(&self, index: usize) -> Result<&Frame, FrameError> {
        if index >= self.length {
            return Err(FrameError::IndexOutOfRange {
                index,
                length: self.length,
            });
        }
        let physical = (self.first + index) % self.capacity;
        self.slots[physical]
            .as_ref()
            .ok_or(FrameError::IndexOutOfRange {
                index,
                length: self.length,
            })
    }

    /// Drop every stored frame and reset to the empty state. The pixel storage
    /// of dropped frames is released immediately.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.first = 0;
        self.length = 0;
        debug!("frame buffer cleared");
    }

    /// The RGB value at pixel (x, y) of the frame at logical index `z`.
    pub fn rgb_pixel(&self, x: u32, y: u32, z: usize) -> Result<Rgb, FrameError> {
        self.frame(z)?.rgb_pixel(x, y)
    }

    /// The RGBA value at pixel (x, y) of the frame at logical index `z`.
    pub fn rgba_pixel(&self, x: u32, y: u32, z: usize) -> Result<Rgba, FrameError> {
        self.frame(z)?.rgba_pixel(x, y)
    }

    /// The HSL value at pixel (x, y) of the frame at logical index `z`.
    pub fn hsl_pixel(&self, x: u32, y: u32, z: usize) -> Result<Hsl, FrameError> {
        self.frame(z)?.hsl_pixel(x, y)
    }

    /// The HSLA value at pixel (x, y) of the frame at logical index `z`.
    pub fn hsla_pixel(&self, x: u32, y: u32, z: usize) -> Result<Hsla, FrameError> {
        self.frame(z)?.hsla_pixel(x, y)
    }

    /// Iterate the buffered frames from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        (0..self.length).filter_map(move |i| self.slots[(self.first + i) % self.capacity].as_ref())
    }

    /// Visit every buffered frame with its logical index, oldest first.
    pub fn for_each<F>(&self, mut callback: F)
    where
        F: FnMut(&Frame, usize),
    {
        for (index, frame) in self.iter().enumerate() {
            callback(frame, index);
        }
    }

    /// Score how often the pixel at (x, y) changed across the buffered history.
    ///
    /// Walks the frames oldest to newest and counts the consecutive-frame
    /// transitions whose `color_distance` meets or exceeds `threshold`; each
    /// counted transition contributes `100 / (len() - 1)` to the score, so a
    /// pixel that never changes scores 0 and one that changes on every pair
    /// scores 100. The comparison baseline advances to the current frame
    /// whether or not the change was counted. With fewer than 2 frames there
    /// is no history to compare and the score is 0.
    pub fn detect_motion(&self, x: u32, y: u32, threshold: Distance) -> Result<u8, FrameError> {
        if self.length < 2 {
            return Ok(0);
        }
        let step = 100.0 / (self.length - 1) as f64;
        let mut score = 0.0;
        let mut prev = self.rgb_pixel(x, y, 0)?;
        for z in 1..self.length {
            let curr = self.rgb_pixel(x, y, z)?;
            if color_distance(prev, curr) >= threshold {
                score += step;
            }
            prev = curr;
        }
        Ok(score.round() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::color::color::{
        BLACK, BLUE, CYAN, GRAY, GREEN, RED, WHITE, YELLOW,
    };

    const W: u32 = 8;
    const H: u32 = 8;
    const X: u32 = 4;
    const Y: u32 = 4;

    fn solid(fill: Rgba) -> Frame {
        Frame::filled(W, H, fill)
    }

    #[test]
    fn starts_empty_and_not_ready() {
        let buf = FrameBuffer::new(W, H, 3);
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert!(!buf.is_ready());
    }

    #[test]
    #[should_panic(expected = "capacity must be non-zero")]
    fn zero_capacity_is_rejected() {
        FrameBuffer::new(W, H, 0);
    }

    #[test]
    fn add_frame_evicts_oldest_once_full() {
        let mut buf = FrameBuffer::new(W, H, 3);

        buf.add_frame(solid(RED)).unwrap();
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.rgba_pixel(X, Y, 0).unwrap(), RED);

        buf.add_frame(solid(GREEN)).unwrap();
        buf.add_frame(solid(BLUE)).unwrap();
        assert_eq!(buf.len(), 3);
        assert!(buf.is_ready());
        assert_eq!(buf.rgba_pixel(X, Y, 0).unwrap(), RED);
        assert_eq!(buf.rgba_pixel(X, Y, 1).unwrap(), GREEN);
        assert_eq!(buf.rgba_pixel(X, Y, 2).unwrap(), BLUE);

        // A fourth frame overwrites the oldest (red).
        buf.add_frame(solid(WHITE)).unwrap();
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.rgba_pixel(X, Y, 0).unwrap(), GREEN);
        assert_eq!(buf.rgba_pixel(X, Y, 1).unwrap(), BLUE);
        assert_eq!(buf.rgba_pixel(X, Y, 2).unwrap(), WHITE);
    }

    #[test]
    fn add_frame_rejects_mismatched_dimensions_without_mutation() {
        let mut buf = FrameBuffer::new(W, H, 3);
        let result = buf.add_frame(Frame::filled(W + 1, H, BLACK));
        assert_eq!(
            result,
            Err(FrameError::FrameSizeMismatch {
                expected_width: W,
                expected_height: H,
                width: W + 1,
                height: H,
            })
        );
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn frame_rejects_out_of_range_index() {
        let mut buf = FrameBuffer::new(W, H, 3);
        buf.add_frame(solid(BLACK)).unwrap();
        assert!(buf.frame(0).is_ok());
        assert_eq!(
            buf.frame(1).unwrap_err(),
            FrameError::IndexOutOfRange { index: 1, length: 1 }
        );
    }

    #[test]
    fn add_frames_pushes_in_order() {
        let mut buf = FrameBuffer::new(W, H, 3);
        buf.add_frames([solid(RED), solid(GREEN), solid(BLUE)]).unwrap();
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.rgba_pixel(X, Y, 0).unwrap(), RED);
        assert_eq!(buf.rgba_pixel(X, Y, 1).unwrap(), GREEN);
        assert_eq!(buf.rgba_pixel(X, Y, 2).unwrap(), BLUE);
    }

    #[test]
    fn add_frames_keeps_frames_pushed_before_a_failure() {
        let mut buf = FrameBuffer::new(W, H, 3);
        let result = buf.add_frames([
            solid(RED),
            Frame::filled(W, H + 2, GREEN),
            solid(BLUE),
        ]);
        assert!(matches!(result, Err(FrameError::FrameSizeMismatch { .. })));
        // The first frame landed; the failing one stopped the batch.
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.rgba_pixel(X, Y, 0).unwrap(), RED);
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut buf = FrameBuffer::new(W, H, 3);
        buf.add_frames([solid(RED), solid(GREEN), solid(BLUE)]).unwrap();
        buf.clear();
        assert_eq!(buf.len(), 0);
        assert!(!buf.is_ready());
        assert!(matches!(
            buf.frame(0),
            Err(FrameError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn pixel_accessors_reach_every_frame() {
        let mut buf = FrameBuffer::new(W, H, 3);
        buf.add_frames([solid(RED), solid(GREEN)]).unwrap();

        assert_eq!(buf.rgb_pixel(X, Y, 0).unwrap(), Rgb::new(255, 0, 0));
        assert_eq!(buf.rgb_pixel(X, Y, 1).unwrap(), Rgb::new(0, 255, 0));
        assert_eq!(buf.rgba_pixel(X, Y, 1).unwrap(), GREEN);
        assert_eq!(buf.hsl_pixel(X, Y, 0).unwrap().hue, 0);
        assert_eq!(buf.hsl_pixel(X, Y, 1).unwrap().hue, 120);
        assert_eq!(buf.hsla_pixel(X, Y, 1).unwrap().alpha, 255);
    }

    #[test]
    fn pixel_accessors_propagate_both_error_kinds() {
        let mut buf = FrameBuffer::new(W, H, 3);
        buf.add_frame(solid(RED)).unwrap();
        assert!(matches!(
            buf.rgb_pixel(X, Y, 5),
            Err(FrameError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            buf.rgb_pixel(W, Y, 0),
            Err(FrameError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn iteration_visits_oldest_to_newest() {
        let mut buf = FrameBuffer::new(W, H, 3);
        let colors = [GRAY, YELLOW, CYAN];
        for color in colors {
            buf.add_frame(solid(color)).unwrap();
        }

        let mut seen = Vec::new();
        buf.for_each(|frame, index| {
            seen.push((index, frame.rgba_pixel(X, Y).unwrap()));
        });
        assert_eq!(seen, vec![(0, GRAY), (1, YELLOW), (2, CYAN)]);

        // After eviction the logical order still starts at the oldest survivor.
        buf.add_frame(solid(RED)).unwrap();
        let seen: Vec<Rgba> = buf
            .iter()
            .map(|frame| frame.rgba_pixel(X, Y).unwrap())
            .collect();
        assert_eq!(seen, vec![YELLOW, CYAN, RED]);
    }

    #[test]
    fn detect_motion_counts_threshold_crossings() {
        let mut buf = FrameBuffer::new(W, H, 3);

        buf.add_frames([solid(BLACK), solid(BLACK), solid(WHITE)]).unwrap();
        // One of two transitions changes.
        assert_eq!(buf.detect_motion(X, Y, 10.0).unwrap(), 50);

        buf.clear();
        buf.add_frames([solid(BLACK), solid(WHITE), solid(GRAY)]).unwrap();
        assert_eq!(buf.detect_motion(X, Y, 10.0).unwrap(), 100);

        buf.clear();
        buf.add_frames([solid(BLACK), solid(BLACK), solid(BLACK)]).unwrap();
        assert_eq!(buf.detect_motion(X, Y, 10.0).unwrap(), 0);
    }

    #[test]
    fn detect_motion_needs_at_least_two_frames() {
        let mut buf = FrameBuffer::new(1, 1, 3);
        buf.add_frame(Frame::filled(1, 1, BLACK)).unwrap();
        assert_eq!(buf.detect_motion(0, 0, 10.0).unwrap(), 0);
    }

    #[test]
    fn detect_motion_propagates_pixel_bounds_errors() {
        let mut buf = FrameBuffer::new(W, H, 3);
        buf.add_frames([solid(BLACK), solid(WHITE)]).unwrap();
        assert!(matches!(
            buf.detect_motion(W, 0, 10.0),
            Err(FrameError::OutOfBounds { .. })
        ));
    }
}
