use serde::{Deserialize, Serialize};

/// What a [`Step`] highlights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKind {
    /// Informational announcement, never terminal.
    Start,
    VisitNode,
    ProcessNode,
    CompleteNode,
    VisitEdge,
    CurrentEdge,
    SkipEdge,
    TraverseEdge,
    #[serde(rename = "addToMST")]
    AddToMst,
    /// Last step of every producer.
    Done,
}

/// One unit of algorithm progress.
///
/// Carries enough to recolor at most one node and one edge and to extend the
/// narrative path log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub kind: StepKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_id: Option<String>,

    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_note: Option<String>,

    /// Only set on [`StepKind::Done`] of the MST producers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
}

impl Step {
    pub fn new(kind: StepKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            node_id: None,
            edge_id: None,
            message: message.into(),
            path_note: None,
            total_cost: None,
        }
    }

    pub fn done(message: impl Into<String>) -> Self {
        Self::new(StepKind::Done, message)
    }

    pub fn with_node(mut self, id: impl Into<String>) -> Self {
        self.node_id = Some(id.into());
        self
    }

    pub fn with_edge(mut self, id: impl Into<String>) -> Self {
        self.edge_id = Some(id.into());
        self
    }

    /// Sets the edge id if there is one.
    pub fn with_edge_opt(mut self, id: Option<&str>) -> Self {
        self.edge_id = id.map(str::to_string);
        self
    }

    pub fn with_path_note(mut self, note: impl Into<String>) -> Self {
        self.path_note = Some(note.into());
        self
    }

    pub fn with_total_cost(mut self, cost: f64) -> Self {
        self.total_cost = Some(cost);
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == StepKind::Done
    }
}
