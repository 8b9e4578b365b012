use crate::foundation::core::FrameIndex;
use crate::record::model::{FrameLayers, ShadowBuffer, ShadowLayer};
use crate::shadow::strategy::ShadowStrategy;

/// Shadow that borrows nothing; every frame renders as-is.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullShadow;

impl ShadowStrategy for NullShadow {
    fn select_frames(&self, _current: FrameIndex) -> Vec<FrameIndex> {
        Vec::new()
    }

    fn attenuate(&self, _shadow: &ShadowBuffer) -> Vec<ShadowLayer> {
        Vec::new()
    }

    fn merge_frame(&self, current: &FrameLayers, _shadow: &[ShadowLayer]) -> FrameLayers {
        current.clone()
    }
}
