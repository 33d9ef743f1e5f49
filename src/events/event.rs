use serde::{Deserialize, Serialize};

use crate::{Step, StepKind};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadGraphChanged {
    pub nodes: usize,
    pub edges: usize,
    /// History cursor after the change.
    pub cursor: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadSelectionChanged {
    pub node: Option<String>,
    pub edge: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadStepApplied {
    pub kind: StepKind,
    pub node: Option<String>,
    pub edge: Option<String>,
}

impl From<&Step> for PayloadStepApplied {
    fn from(step: &Step) -> Self {
        Self {
            kind: step.kind,
            node: step.node_id.clone(),
            edge: step.edge_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadHistoryMoved {
    pub cursor: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadPlaybackFinished {
    pub total_cost: Option<f64>,
}

/// Notification published by [`crate::Store`] after a dispatch changed something
/// observers care about.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    GraphChanged(PayloadGraphChanged),
    SelectionChanged(PayloadSelectionChanged),
    StepApplied(PayloadStepApplied),
    HistoryMoved(PayloadHistoryMoved),
    PlaybackFinished(PayloadPlaybackFinished),
}
