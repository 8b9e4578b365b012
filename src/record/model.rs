use std::collections::BTreeMap;

use crate::foundation::core::Point;
use crate::record::color::Color;

/// Lifecycle classification of an element at a given frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Element is appearing.
    Enter,
    /// Element is disappearing.
    Exit,
    /// Element persists unchanged between states.
    Static,
    /// Element is moving between states.
    Transition,
    /// Element data was not tweened.
    Raw,
}

/// Stable key grouping rows of the same logical element across frames.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub u64);

/// One drawable row of a layer at a specific frame.
///
/// Every visual channel is optional; a shadow only touches the channels a row carries.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DrawRecord {
    /// Element identity.
    pub id: ElementId,
    /// Lifecycle phase at this frame.
    pub phase: Phase,
    /// Position in data space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    /// Stroke colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour: Option<Color>,
    /// Fill colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    /// Edge stroke colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_colour: Option<Color>,
    /// Edge fill colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_fill: Option<Color>,
    /// Mark translucency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    /// Edge translucency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_alpha: Option<f64>,
    /// Mark size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Edge size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_size: Option<f64>,
    /// Edge width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_width: Option<f64>,
    /// Stroke width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<f64>,
    /// Host columns the shadow carries through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl DrawRecord {
    /// A row with identity and phase only.
    pub fn new(id: ElementId, phase: Phase) -> Self {
        Self {
            id,
            phase,
            position: None,
            colour: None,
            fill: None,
            edge_colour: None,
            edge_fill: None,
            alpha: None,
            edge_alpha: None,
            size: None,
            edge_size: None,
            edge_width: None,
            stroke: None,
            extra: BTreeMap::new(),
        }
    }
}

/// Visual channels whose presence decides how a shadow attenuates a record set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// [`DrawRecord::edge_alpha`].
    EdgeAlpha,
    /// [`DrawRecord::alpha`].
    Alpha,
}

/// Ordered rows of one layer at one frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    /// Rows in draw order.
    pub rows: Vec<DrawRecord>,
}

impl RecordSet {
    /// Wrap rows into a set.
    pub fn new(rows: Vec<DrawRecord>) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the set has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A channel is present when at least one row carries it.
    pub fn has_channel(&self, channel: Channel) -> bool {
        self.rows.iter().any(|r| match channel {
            Channel::EdgeAlpha => r.edge_alpha.is_some(),
            Channel::Alpha => r.alpha.is_some(),
        })
    }
}

/// Per-layer record sets of one frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FrameLayers {
    /// Record sets indexed by layer.
    pub layers: Vec<RecordSet>,
}

impl FrameLayers {
    /// Wrap per-layer sets.
    pub fn new(layers: Vec<RecordSet>) -> Self {
        Self { layers }
    }

    /// Total number of rows across layers.
    pub fn row_count(&self) -> usize {
        self.layers.iter().map(RecordSet::len).sum()
    }
}

/// Historical record sets per layer, ordered oldest first like the selected frames.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShadowBuffer {
    /// `layers[layer][j]` is the layer's record set at the `j`-th selected frame.
    pub layers: Vec<Vec<RecordSet>>,
}

impl ShadowBuffer {
    /// Transpose fetched frames (oldest first) into a per-layer buffer.
    ///
    /// Layers missing from a frame contribute an empty set at that position.
    pub fn from_frames(frames: Vec<FrameLayers>) -> Self {
        let nlayers = frames.iter().map(|f| f.layers.len()).max().unwrap_or(0);
        let mut layers: Vec<Vec<RecordSet>> = (0..nlayers)
            .map(|_| Vec::with_capacity(frames.len()))
            .collect();
        for frame in frames {
            let mut sets = frame.layers.into_iter();
            for layer in &mut layers {
                layer.push(sets.next().unwrap_or_default());
            }
        }
        Self { layers }
    }

    /// Number of frames buffered per layer.
    pub fn depth(&self) -> usize {
        self.layers.first().map_or(0, Vec::len)
    }
}

/// One layer's shadow rows after attenuation, with the weight applied to each row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShadowLayer {
    /// Concatenated rows, oldest frame first.
    pub records: RecordSet,
    /// `weights[i]` was applied to `records.rows[i]`.
    pub weights: Vec<f64>,
}

impl ShadowLayer {
    /// Whether the layer contributes no shadow rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/record/model.rs"]
mod tests;
