//! Replays recorded detections from a JSON-lines file.
//!
//! Each line is one frame: a JSON array of `[x, y, width, height]` boxes in
//! pixel coordinates. Blank lines are frames with nothing detected.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use super::{BoxBuilder, DetectionSource};
use crate::tracker::BoundingBox;

/// Error type for replay failures.
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Failed to read replay: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid frame on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// `DetectionSource` backed by a recording.
pub struct ReplaySource<R: BufRead> {
    reader: R,
    line: usize,
    frame_interval: Option<Duration>,
    last_frame: Option<Instant>,
}

impl ReplaySource<BufReader<File>> {
    /// Open a recording on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReplayError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            frame_interval: None,
            last_frame: None,
        }
    }

    /// Pace frames like a live camera running at `fps`.
    pub fn with_fps(mut self, fps: f64) -> Self {
        self.frame_interval = (fps.is_finite() && fps > 0.0)
            .then(|| Duration::from_secs_f64(1.0 / fps));
        self
    }

    fn pace(&mut self) {
        if let (Some(interval), Some(last)) = (self.frame_interval, self.last_frame) {
            let due = last + interval;
            let now = Instant::now();
            if due > now {
                thread::sleep(due - now);
            }
        }
        self.last_frame = Some(Instant::now());
    }
}

/// Parse one recorded frame.
pub fn parse_frame(text: &str) -> Result<Vec<BoundingBox>, serde_json::Error> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let raw: Vec<[f64; 4]> = serde_json::from_str(text)?;
    Ok(raw
        .into_iter()
        .map(|[x, y, w, h]| BoxBuilder::new().tlwh(x, y, w, h).build())
        .collect())
}

impl<R: BufRead> DetectionSource for ReplaySource<R> {
    type Error = ReplayError;

    fn next_detections(&mut self) -> Result<Option<Vec<BoundingBox>>, Self::Error> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;

        let boxes = parse_frame(&buf).map_err(|e| ReplayError::Parse {
            line: self.line,
            reason: e.to_string(),
        })?;
        self.pace();
        Ok(Some(boxes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_replay_frames() {
        let data = "[[500, 100, 60, 60]]\n\n[[0, 0, 10, 10], [380.2, 100, 60, 60]]\n";
        let mut source = ReplaySource::from_reader(Cursor::new(data));

        assert_eq!(
            source.next_detections().unwrap(),
            Some(vec![BoundingBox::new(500, 100, 60, 60)])
        );
        assert_eq!(source.next_detections().unwrap(), Some(vec![]));
        assert_eq!(
            source.next_detections().unwrap(),
            Some(vec![
                BoundingBox::new(0, 0, 10, 10),
                BoundingBox::new(380, 100, 60, 60)
            ])
        );
        assert_eq!(source.next_detections().unwrap(), None);
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let data = "[]\n[[1, 2, 3]]\n";
        let mut source = ReplaySource::from_reader(Cursor::new(data));
        assert_eq!(source.next_detections().unwrap(), Some(vec![]));
        let err = source.next_detections().unwrap_err();
        assert!(matches!(err, ReplayError::Parse { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_fps_pacing() {
        let data = "[]\n[]\n[]\n";
        let mut source = ReplaySource::from_reader(Cursor::new(data)).with_fps(100.0);
        let start = Instant::now();
        while source.next_detections().unwrap().is_some() {}
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_invalid_fps_disables_pacing() {
        let source = ReplaySource::from_reader(Cursor::new("")).with_fps(0.0);
        assert!(source.frame_interval.is_none());
    }
}
