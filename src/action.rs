use egui::Pos2;

use crate::{Algorithm, Graph, Step};

/// Every transition understood by [`crate::reduce`].
///
/// Structural edits (adding, deleting, reweighting, clearing, loading and
/// finishing a move) record a history snapshot. All other actions leave the
/// history untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Adds a node at `location`. Without a label the next free number is used.
    AddNode {
        location: Pos2,
        label: Option<String>,
    },
    /// Removes a node and every edge touching it.
    DeleteNode { id: String },
    SelectNode { id: Option<String> },
    /// Updates a node position while it is being dragged.
    MoveNode { id: String, location: Pos2 },
    /// Records the position reached by a drag in the history.
    EndMoveNode { id: String },

    /// Connects two distinct nodes. Ignored if they are already connected.
    AddEdge {
        from: String,
        to: String,
        weight: Option<f64>,
    },
    DeleteEdge { id: String },
    SelectEdge { id: Option<String> },
    /// Ignored unless `weight` is finite and positive.
    UpdateEdgeWeight { id: String, weight: f64 },

    SetAlgorithm(Option<Algorithm>),
    SetRunning(bool),
    SetSpeed(u64),
    /// Applies an algorithm step, `None` clears the coloring.
    ApplyStep(Option<Step>),
    ResetStatus,
    SetStartNode(Option<String>),
    AppendPathNote(String),
    ClearPath,

    ClearGraph,
    LoadGraph(Graph),
    Undo,
    Redo,
}

impl Action {
    /// Whether a successful application of the action records a history snapshot.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Action::AddNode { .. }
                | Action::DeleteNode { .. }
                | Action::EndMoveNode { .. }
                | Action::AddEdge { .. }
                | Action::DeleteEdge { .. }
                | Action::UpdateEdgeWeight { .. }
                | Action::ClearGraph
                | Action::LoadGraph(_)
        )
    }
}
