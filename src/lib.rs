//! Wavyte shadows: echoes of earlier animation frames drawn behind the current one.
//!
//! A host animation pipeline owns frame enumeration, tweening and rendering. For every frame it
//! renders, it asks a shadow strategy three things:
//!
//! 1. **Select**: which earlier frames to borrow records from ([`ShadowStrategy::select_frames`])
//! 2. **Attenuate**: how to weaken the borrowed records ([`ShadowStrategy::attenuate`])
//! 3. **Merge**: how to combine them with the current frame ([`ShadowStrategy::merge_frame`])
//!
//! Setup happens once per animation through each strategy's constructor, typically via
//! [`ShadowConfig::setup`]. [`render_frame`] runs the three steps against a [`FrameSource`].
//!
//! All three steps are pure: inputs are never mutated and no state survives between frames.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod config;
mod foundation;
mod host;
mod record;
mod shadow;

pub use crate::animation::ease::Ease;
pub use crate::config::shadow::ShadowConfig;
pub use crate::foundation::core::{FrameIndex, Point, fraction_to_frames};
pub use crate::foundation::error::{ShadowError, ShadowResult};
pub use crate::host::pipeline::{render_all, render_frame};
pub use crate::host::source::{FrameSource, InMemoryFrames};
pub use crate::record::color::Color;
pub use crate::record::model::{
    Channel, DrawRecord, ElementId, FrameLayers, Phase, RecordSet, ShadowBuffer, ShadowLayer,
};
pub use crate::shadow::none::NullShadow;
pub use crate::shadow::strategy::{Shadow, ShadowStrategy};
pub use crate::shadow::tail::{TailParams, TailShadow};
pub use crate::shadow::wake::{WakeParams, WakeShadow, falloff_curve};
