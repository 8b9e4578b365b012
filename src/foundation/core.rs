use crate::foundation::error::{ShadowError, ShadowResult};

pub use kurbo::Point;

/// 1-based frame index as enumerated by the host animation pipeline.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Whether this index addresses a frame of an animation with `nframes` frames.
    pub fn in_range(self, nframes: u64) -> bool {
        self.0 >= 1 && self.0 <= nframes
    }

    /// Step `by` frames back, wrapping past frame 1 to the end of the animation.
    ///
    /// `nframes` must be > 0.
    pub fn back_wrapping(self, by: u64, nframes: u64) -> Self {
        let zero_based = i128::from(self.0) - 1 - i128::from(by);
        let wrapped = zero_based.rem_euclid(i128::from(nframes));
        Self(wrapped as u64 + 1)
    }

    /// Step `by` frames back, or `None` when that lands before frame 1.
    pub fn back(self, by: u64) -> Option<Self> {
        match self.0.checked_sub(by) {
            Some(f) if f >= 1 => Some(Self(f)),
            _ => None,
        }
    }
}

/// Validate a host-supplied total frame count.
pub fn validate_frame_count(nframes: u64) -> ShadowResult<u64> {
    if nframes == 0 {
        return Err(ShadowError::validation("frame count must be >= 1"));
    }
    Ok(nframes)
}

/// Convert a fraction of the animation length into whole frames.
///
/// Ties round to even, matching how the host rounds frame budgets. Negative or non-finite
/// fractions resolve to zero frames.
pub fn fraction_to_frames(fraction: f64, nframes: u64) -> u64 {
    let frames = (fraction * nframes as f64).round_ties_even();
    if frames.is_finite() && frames > 0.0 {
        frames as u64
    } else {
        0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
