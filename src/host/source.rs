use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ShadowError, ShadowResult};
use crate::record::model::FrameLayers;

/// Host-side access to per-frame drawable records.
pub trait FrameSource {
    /// Total number of frames in the animation.
    fn frame_count(&self) -> u64;

    /// Per-layer records of `frame` (1-based).
    fn frame_layers(&self, frame: FrameIndex) -> ShadowResult<FrameLayers>;
}

/// Frames held in memory, frame 1 first.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct InMemoryFrames {
    /// `frames[i]` is frame `i + 1`.
    pub frames: Vec<FrameLayers>,
}

impl InMemoryFrames {
    /// Wrap already-tweened frames.
    pub fn new(frames: Vec<FrameLayers>) -> Self {
        Self { frames }
    }

    /// Parse frames from a JSON reader (an array of frames, each an array of layers).
    pub fn from_reader<R: std::io::Read>(r: R) -> ShadowResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ShadowError::serde(format!("parse frames JSON: {e}")))
    }

    /// Parse frames from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ShadowResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ShadowError::frame_source(format!(
                "open frames JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

impl FrameSource for InMemoryFrames {
    fn frame_count(&self) -> u64 {
        self.frames.len() as u64
    }

    fn frame_layers(&self, frame: FrameIndex) -> ShadowResult<FrameLayers> {
        if !frame.in_range(self.frame_count()) {
            return Err(ShadowError::frame_source(format!(
                "frame {} is out of bounds (1..={})",
                frame.0,
                self.frame_count()
            )));
        }
        Ok(self.frames[(frame.0 - 1) as usize].clone())
    }
}
