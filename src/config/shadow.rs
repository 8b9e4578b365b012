use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{ShadowError, ShadowResult};
use crate::shadow::none::NullShadow;
use crate::shadow::strategy::Shadow;
use crate::shadow::tail::{TailParams, TailShadow};
use crate::shadow::wake::{WakeParams, WakeShadow};

/// JSON-facing shadow configuration, tagged by `"kind"`.
///
/// ```json
/// { "kind": "wake", "wake_length": 0.1, "falloff": "cubic-in", "wrap": false }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShadowConfig {
    /// No shadow.
    None,
    /// Unattenuated trail.
    Tail(TailParams),
    /// Fading wake.
    Wake(WakeParams),
}

impl ShadowConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ShadowResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ShadowError::config(format!("parse shadow config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ShadowResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ShadowError::config(format!("open shadow config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> ShadowResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Resolve this configuration for an animation with `nframes` frames.
    pub fn setup(&self, nframes: u64) -> ShadowResult<Shadow> {
        Ok(match self {
            Self::None => NullShadow.into(),
            Self::Tail(p) => TailShadow::setup(nframes, p.clone())?.into(),
            Self::Wake(p) => WakeShadow::setup(nframes, p.clone())?.into(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/shadow.rs"]
mod tests;
