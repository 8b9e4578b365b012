use std::collections::BTreeSet;

use crate::foundation::core::{FrameIndex, fraction_to_frames, validate_frame_count};
use crate::foundation::error::{ShadowError, ShadowResult};
use crate::record::model::{FrameLayers, RecordSet, ShadowBuffer, ShadowLayer};
use crate::shadow::strategy::{ShadowStrategy, concat_weighted, merge_layers};

/// Parameters of a trailing shadow.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TailParams {
    /// Spacing between trail samples as a fraction of the total frame count.
    #[serde(default = "default_distance")]
    pub distance: f64,
    /// Keep at most this many trail samples (newest win).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_frames: Option<usize>,
    /// Layers (0-based) that never get a trail.
    #[serde(default)]
    pub exclude_layer: BTreeSet<usize>,
}

fn default_distance() -> f64 {
    0.05
}

impl Default for TailParams {
    fn default() -> Self {
        Self {
            distance: default_distance(),
            max_frames: None,
            exclude_layer: BTreeSet::new(),
        }
    }
}

/// Unattenuated trail of earlier frames, sampled every `distance` frames.
#[derive(Clone, Debug)]
pub struct TailShadow {
    params: TailParams,
    nframes: u64,
    distance_frames: u64,
}

impl TailShadow {
    /// Resolve `params` for an animation with `nframes` frames.
    #[tracing::instrument(skip(params))]
    pub fn setup(nframes: u64, params: TailParams) -> ShadowResult<Self> {
        let nframes = validate_frame_count(nframes)?;
        if params.max_frames == Some(0) {
            return Err(ShadowError::validation("tail max_frames must be > 0"));
        }
        let distance_frames = fraction_to_frames(params.distance, nframes).max(1);
        tracing::debug!(distance_frames, "resolved tail");
        Ok(Self {
            params,
            nframes,
            distance_frames,
        })
    }

    /// Spacing between trail samples in whole frames.
    pub fn distance_frames(&self) -> u64 {
        self.distance_frames
    }
}

impl ShadowStrategy for TailShadow {
    fn select_frames(&self, current: FrameIndex) -> Vec<FrameIndex> {
        let cap = self.params.max_frames.unwrap_or(usize::MAX);
        let mut frames: Vec<FrameIndex> = (1..)
            .map_while(|k: u64| current.back(k.checked_mul(self.distance_frames)?))
            .filter(|f| f.in_range(self.nframes))
            .take(cap)
            .collect();
        frames.reverse();
        frames
    }

    fn attenuate(&self, shadow: &ShadowBuffer) -> Vec<ShadowLayer> {
        shadow
            .layers
            .iter()
            .map(|sets| concat_weighted(sets, |_| 1.0))
            .collect()
    }

    fn merge_frame(&self, current: &FrameLayers, shadow: &[ShadowLayer]) -> FrameLayers {
        merge_layers(
            current,
            shadow,
            |i| self.params.exclude_layer.contains(&i),
            |set, s| {
                let rows = s.records.rows.iter().chain(&set.rows).cloned().collect();
                RecordSet::new(rows)
            },
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shadow/tail.rs"]
mod tests;
