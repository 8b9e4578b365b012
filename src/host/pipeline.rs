use crate::foundation::core::FrameIndex;
use crate::foundation::error::ShadowResult;
use crate::host::source::FrameSource;
use crate::record::model::{FrameLayers, ShadowBuffer};
use crate::shadow::strategy::ShadowStrategy;

/// Render one frame with its shadow: select history, fetch it, attenuate it, merge it.
#[tracing::instrument(skip(strategy, source), fields(frame = current.0))]
pub fn render_frame<S, F>(
    strategy: &S,
    source: &F,
    current: FrameIndex,
) -> ShadowResult<FrameLayers>
where
    S: ShadowStrategy + ?Sized,
    F: FrameSource + ?Sized,
{
    let now = source.frame_layers(current)?;

    let history = strategy
        .select_frames(current)
        .into_iter()
        .map(|f| source.frame_layers(f))
        .collect::<ShadowResult<Vec<_>>>()?;
    let buffer = ShadowBuffer::from_frames(history);

    let shadow = strategy.attenuate(&buffer);
    let merged = strategy.merge_frame(&now, &shadow);
    tracing::debug!(
        history_frames = buffer.depth(),
        current_rows = now.row_count(),
        merged_rows = merged.row_count(),
        "merged shadow"
    );
    Ok(merged)
}

/// Render every frame of `source`, frame 1 first.
pub fn render_all<S, F>(strategy: &S, source: &F) -> ShadowResult<Vec<FrameLayers>>
where
    S: ShadowStrategy + ?Sized,
    F: FrameSource + ?Sized,
{
    (1..=source.frame_count())
        .map(|f| render_frame(strategy, source, FrameIndex(f)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/host/pipeline.rs"]
mod tests;
