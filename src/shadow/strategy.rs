use std::collections::HashMap;

use crate::foundation::core::FrameIndex;
use crate::record::model::{
    DrawRecord, ElementId, FrameLayers, RecordSet, ShadowBuffer, ShadowLayer,
};
use crate::shadow::none::NullShadow;
use crate::shadow::tail::TailShadow;
use crate::shadow::wake::WakeShadow;

/// The operations a host pipeline invokes on a shadow for every rendered frame.
///
/// Setup is each implementation's constructor: it resolves parameters against the total frame
/// count once, and the resolved value is then reused for every frame.
pub trait ShadowStrategy {
    /// Frames to borrow history from when rendering `current`, oldest first.
    fn select_frames(&self, current: FrameIndex) -> Vec<FrameIndex>;

    /// Attenuate the historical records fetched for [`Self::select_frames`], one layer each.
    fn attenuate(&self, shadow: &ShadowBuffer) -> Vec<ShadowLayer>;

    /// Merge attenuated history into the current frame's records.
    fn merge_frame(&self, current: &FrameLayers, shadow: &[ShadowLayer]) -> FrameLayers;
}

/// Statically configured shadow variant.
#[derive(Clone, Debug)]
pub enum Shadow {
    /// No shadow.
    None(NullShadow),
    /// Unattenuated trail of earlier frames.
    Tail(TailShadow),
    /// Fading, shrinking wake of the preceding frames.
    Wake(WakeShadow),
}

impl ShadowStrategy for Shadow {
    fn select_frames(&self, current: FrameIndex) -> Vec<FrameIndex> {
        match self {
            Self::None(s) => s.select_frames(current),
            Self::Tail(s) => s.select_frames(current),
            Self::Wake(s) => s.select_frames(current),
        }
    }

    fn attenuate(&self, shadow: &ShadowBuffer) -> Vec<ShadowLayer> {
        match self {
            Self::None(s) => s.attenuate(shadow),
            Self::Tail(s) => s.attenuate(shadow),
            Self::Wake(s) => s.attenuate(shadow),
        }
    }

    fn merge_frame(&self, current: &FrameLayers, shadow: &[ShadowLayer]) -> FrameLayers {
        match self {
            Self::None(s) => s.merge_frame(current, shadow),
            Self::Tail(s) => s.merge_frame(current, shadow),
            Self::Wake(s) => s.merge_frame(current, shadow),
        }
    }
}

impl From<NullShadow> for Shadow {
    fn from(value: NullShadow) -> Self {
        Self::None(value)
    }
}

impl From<TailShadow> for Shadow {
    fn from(value: TailShadow) -> Self {
        Self::Tail(value)
    }
}

impl From<WakeShadow> for Shadow {
    fn from(value: WakeShadow) -> Self {
        Self::Wake(value)
    }
}

/// Concatenate a layer's buffered sets, weighting each set by its recency.
///
/// `sets` is oldest first, so the last set is 1 frame back.
pub(crate) fn concat_weighted(
    sets: &[RecordSet],
    weight_for_recency: impl Fn(usize) -> f64,
) -> ShadowLayer {
    let total = sets.iter().map(RecordSet::len).sum();
    let mut rows = Vec::with_capacity(total);
    let mut weights = Vec::with_capacity(total);
    for (j, set) in sets.iter().enumerate() {
        let w = weight_for_recency(sets.len() - j);
        rows.extend(set.rows.iter().cloned());
        weights.extend(std::iter::repeat_n(w, set.len()));
    }
    ShadowLayer {
        records: RecordSet::new(rows),
        weights,
    }
}

/// Merge every layer of `current`, passing excluded layers through untouched.
///
/// Layers with no shadow counterpart merge against an empty shadow.
pub(crate) fn merge_layers(
    current: &FrameLayers,
    shadow: &[ShadowLayer],
    is_excluded: impl Fn(usize) -> bool,
    merge: impl Fn(&RecordSet, &ShadowLayer) -> RecordSet,
) -> FrameLayers {
    let empty = ShadowLayer::default();
    let layers = current
        .layers
        .iter()
        .enumerate()
        .map(|(i, set)| {
            if is_excluded(i) {
                return set.clone();
            }
            merge(set, shadow.get(i).unwrap_or(&empty))
        })
        .collect();
    FrameLayers::new(layers)
}

/// Stable-group rows by identity, groups ordered by first occurrence.
pub(crate) fn group_by_first_occurrence(rows: Vec<DrawRecord>) -> Vec<DrawRecord> {
    let mut first_seen: HashMap<ElementId, usize> = HashMap::new();
    for r in &rows {
        let next = first_seen.len();
        first_seen.entry(r.id).or_insert(next);
    }
    let mut keyed: Vec<(usize, DrawRecord)> = rows
        .into_iter()
        .map(|r| (first_seen[&r.id], r))
        .collect();
    keyed.sort_by_key(|(k, _)| *k);
    keyed.into_iter().map(|(_, r)| r).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/shadow/strategy.rs"]
mod tests;
