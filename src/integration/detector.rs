//! Trait for object detection backends.

use std::collections::VecDeque;
use std::convert::Infallible;

use crate::tracker::BoundingBox;

/// Source of per-frame detections.
///
/// Implement this to connect a camera and detector (cascade classifier,
/// neural network, a recording) to the tracking pipeline.
///
/// # Example
///
/// ```ignore
/// use autotrack_rs::{BoundingBox, DetectionSource};
///
/// struct MyCamera {
///     // Capture device and detector here
/// }
///
/// impl DetectionSource for MyCamera {
///     type Error = std::io::Error;
///
///     fn next_detections(&mut self) -> Result<Option<Vec<BoundingBox>>, Self::Error> {
///         // Grab a frame, run detection, return the boxes
///         Ok(Some(vec![]))
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for acquisition failures.
    type Error: std::fmt::Display;

    /// Detections for the next frame.
    ///
    /// # Returns
    /// `Ok(Some(boxes))` for a frame (possibly with no boxes), `Ok(None)`
    /// once the source has no more frames, or an acquisition error.
    fn next_detections(&mut self) -> Result<Option<Vec<BoundingBox>>, Self::Error>;
}

/// Fixed sequence of frames, for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    frames: VecDeque<Vec<BoundingBox>>,
}

impl ScriptedSource {
    pub fn new(frames: impl IntoIterator<Item = Vec<BoundingBox>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Frames not yet handed out.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl DetectionSource for ScriptedSource {
    type Error = Infallible;

    fn next_detections(&mut self) -> Result<Option<Vec<BoundingBox>>, Self::Error> {
        Ok(self.frames.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_source_drains_in_order() {
        let a = BoundingBox::new(0, 0, 10, 10);
        let mut source = ScriptedSource::new([vec![a], vec![]]);
        assert_eq!(source.next_detections().unwrap(), Some(vec![a]));
        assert_eq!(source.next_detections().unwrap(), Some(vec![]));
        assert_eq!(source.next_detections().unwrap(), None);
        assert_eq!(source.remaining(), 0);
    }
}
