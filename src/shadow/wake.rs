use std::collections::{BTreeSet, HashSet};

use crate::animation::ease::Ease;
use crate::foundation::core::{FrameIndex, fraction_to_frames, validate_frame_count};
use crate::foundation::error::ShadowResult;
use crate::record::color::Color;
use crate::record::model::{
    Channel, DrawRecord, ElementId, FrameLayers, Phase, RecordSet, ShadowBuffer, ShadowLayer,
};
use crate::shadow::strategy::{
    ShadowStrategy, concat_weighted, group_by_first_occurrence, merge_layers,
};

/// Parameters of a wake shadow, as supplied by the host before setup.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WakeParams {
    /// Wake length as a fraction of the total frame count.
    pub wake_length: f64,
    /// Shrink size-like channels by the falloff.
    #[serde(default = "yes")]
    pub size: bool,
    /// Fade opacity by the falloff.
    #[serde(default = "yes")]
    pub alpha: bool,
    /// Easing that shapes the falloff.
    #[serde(default = "default_falloff")]
    pub falloff: Ease,
    /// Let the wake run past frame 1 into the end of the animation.
    #[serde(default = "yes")]
    pub wrap: bool,
    /// Layers (0-based) that never get a wake.
    #[serde(default)]
    pub exclude_layer: BTreeSet<usize>,
    /// Phases whose elements get no wake in the current frame.
    #[serde(default = "default_exclude_phase")]
    pub exclude_phase: BTreeSet<Phase>,
    /// Stroke colour forced onto wake rows that carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour: Option<Color>,
    /// Fill colour forced onto wake rows that carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
}

fn yes() -> bool {
    true
}

fn default_falloff() -> Ease {
    Ease::InCubic
}

fn default_exclude_phase() -> BTreeSet<Phase> {
    BTreeSet::from([Phase::Enter, Phase::Exit])
}

impl WakeParams {
    /// Default parameters for a wake spanning `wake_length` of the animation.
    pub fn new(wake_length: f64) -> Self {
        Self {
            wake_length,
            size: true,
            alpha: true,
            falloff: default_falloff(),
            wrap: true,
            exclude_layer: BTreeSet::new(),
            exclude_phase: default_exclude_phase(),
            colour: None,
            fill: None,
        }
    }
}

/// A wake resolved against the animation's frame count.
#[derive(Clone, Debug)]
pub struct WakeShadow {
    params: WakeParams,
    nframes: u64,
    wake_length_frames: u64,
    falloff: Vec<f64>,
}

impl WakeShadow {
    /// Resolve `params` for an animation with `nframes` frames.
    #[tracing::instrument(skip(params), fields(falloff = %params.falloff))]
    pub fn setup(nframes: u64, params: WakeParams) -> ShadowResult<Self> {
        let nframes = validate_frame_count(nframes)?;
        let wake_length_frames = fraction_to_frames(params.wake_length, nframes);
        let falloff = falloff_curve(params.falloff, wake_length_frames as usize);
        tracing::debug!(wake_length_frames, "resolved wake");
        Ok(Self {
            params,
            nframes,
            wake_length_frames,
            falloff,
        })
    }

    /// Parameters this wake was set up with.
    pub fn params(&self) -> &WakeParams {
        &self.params
    }

    /// Total frame count of the animation.
    pub fn nframes(&self) -> u64 {
        self.nframes
    }

    /// Wake length in whole frames.
    pub fn wake_length_frames(&self) -> u64 {
        self.wake_length_frames
    }

    /// Falloff weights, nearest frame first: `falloff()[k - 1]` weights the frame `k` back.
    pub fn falloff(&self) -> &[f64] {
        &self.falloff
    }

    /// Weight for the record set `recency` frames back (`recency >= 1`).
    ///
    /// History deeper than the wake reuses the farthest weight.
    pub fn weight_for_recency(&self, recency: usize) -> f64 {
        let idx = recency.saturating_sub(1).min(self.falloff.len().saturating_sub(1));
        self.falloff.get(idx).copied().unwrap_or(1.0)
    }

    fn attenuate_layer(&self, sets: &[RecordSet]) -> ShadowLayer {
        let ShadowLayer {
            mut records,
            weights,
        } = concat_weighted(sets, |k| self.weight_for_recency(k));

        self.apply_overrides(&mut records);
        if self.params.alpha {
            fade(&mut records, &weights);
        }
        if self.params.size {
            for (r, &w) in records.rows.iter_mut().zip(&weights) {
                shrink(r, w);
            }
        }
        ShadowLayer { records, weights }
    }

    fn apply_overrides(&self, records: &mut RecordSet) {
        for r in &mut records.rows {
            if let (Some(c), Some(over)) = (r.colour.as_mut(), self.params.colour) {
                *c = over;
            }
            if let (Some(f), Some(over)) = (r.fill.as_mut(), self.params.fill) {
                *f = over;
            }
        }
    }

    fn merge_layer(&self, current: &RecordSet, shadow: &ShadowLayer) -> RecordSet {
        let eligible: HashSet<ElementId> = current
            .rows
            .iter()
            .filter(|r| !self.params.exclude_phase.contains(&r.phase))
            .map(|r| r.id)
            .collect();

        let rows: Vec<DrawRecord> = shadow
            .records
            .rows
            .iter()
            .filter(|r| eligible.contains(&r.id))
            .chain(&current.rows)
            .cloned()
            .collect();
        RecordSet::new(group_by_first_occurrence(rows))
    }
}

impl ShadowStrategy for WakeShadow {
    fn select_frames(&self, current: FrameIndex) -> Vec<FrameIndex> {
        let frames: Vec<FrameIndex> = (1..=self.wake_length_frames)
            .rev()
            .filter_map(|back| {
                if self.params.wrap {
                    Some(current.back_wrapping(back, self.nframes))
                } else {
                    current.back(back).filter(|f| f.in_range(self.nframes))
                }
            })
            .collect();
        tracing::trace!(current = current.0, selected = frames.len(), "wake frames");
        frames
    }

    fn attenuate(&self, shadow: &ShadowBuffer) -> Vec<ShadowLayer> {
        shadow
            .layers
            .iter()
            .map(|sets| self.attenuate_layer(sets))
            .collect()
    }

    fn merge_frame(&self, current: &FrameLayers, shadow: &[ShadowLayer]) -> FrameLayers {
        merge_layers(
            current,
            shadow,
            |i| self.params.exclude_layer.contains(&i),
            |set, s| self.merge_layer(set, s),
        )
    }
}

/// Sample `ease` at `n + 2` evenly spaced points of `[0, 1]`, drop both endpoints, and order the
/// remaining `n` weights nearest frame first.
///
/// Every weight lies in `(0, 1]`.
pub fn falloff_curve(ease: Ease, n: usize) -> Vec<f64> {
    let steps = (n + 1) as f64;
    (1..=n)
        .rev()
        .map(|i| ease.apply(i as f64 / steps).clamp(f64::MIN_POSITIVE, 1.0))
        .collect()
}

fn fade(records: &mut RecordSet, weights: &[f64]) {
    if records.has_channel(Channel::EdgeAlpha) {
        for (r, &w) in records.rows.iter_mut().zip(weights) {
            if let Some(a) = r.edge_alpha.as_mut() {
                *a *= w;
            }
        }
    } else if records.has_channel(Channel::Alpha) {
        for (r, &w) in records.rows.iter_mut().zip(weights) {
            if let Some(a) = r.alpha.as_mut() {
                *a *= w;
            }
        }
    } else {
        for (r, &w) in records.rows.iter_mut().zip(weights) {
            for c in [
                &mut r.colour,
                &mut r.fill,
                &mut r.edge_colour,
                &mut r.edge_fill,
            ] {
                if let Some(c) = c.as_mut() {
                    *c = c.with_opacity_scaled(w);
                }
            }
        }
    }
}

fn shrink(r: &mut DrawRecord, w: f64) {
    for v in [
        &mut r.size,
        &mut r.edge_size,
        &mut r.edge_width,
        &mut r.stroke,
    ]
    .into_iter()
    .flatten()
    {
        *v *= w;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shadow/wake.rs"]
mod tests;
