use egui::Pos2;
use serde::{Deserialize, Serialize};

use super::NodeStatus;

/// Stores properties of a vertex.
///
/// Serialized flat as `{id, x, y, label, status}`, the shape persisted by storage
/// collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: String,

    /// Canvas position, owned by placement and editing.
    #[serde(flatten)]
    location: Pos2,

    label: String,

    #[serde(default)]
    status: NodeStatus,
}

impl Node {
    pub fn new(id: impl Into<String>, location: Pos2, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location,
            label: label.into(),
            status: NodeStatus::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn location(&self) -> Pos2 {
        self.location
    }

    pub fn set_location(&mut self, loc: Pos2) {
        self.location = loc;
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn status(&self) -> NodeStatus {
        self.status
    }

    pub fn set_status(&mut self, status: NodeStatus) {
        self.status = status;
    }

    pub fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = status;
        self
    }

    /// Numeric value of the label, if the label is a plain number.
    pub(crate) fn numeric_label(&self) -> Option<u64> {
        self.label.trim().parse().ok()
    }
}
