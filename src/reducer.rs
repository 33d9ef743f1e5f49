use egui::Pos2;
use log::{debug, trace};

use crate::elements::{Edge, EdgeStatus, Node, NodeStatus, DEFAULT_WEIGHT};
use crate::graph::is_valid_weight;
use crate::{Action, AppState, Graph, SettingsHistory, SettingsPlayback, Step, StepKind};

/// Computes the state following `action`.
///
/// The state is taken by value and handed back untouched when the action is a
/// no-op: duplicate edges, unknown ids and invalid weights never fail.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::AddNode { location, label } => state.add_node(location, label),
        Action::DeleteNode { id } => state.delete_node(&id),
        Action::SelectNode { id } => {
            state.selected_node = id;
            state.selected_edge = None;
        }
        Action::MoveNode { id, location } => match state.graph.node_mut(&id) {
            Some(node) => node.set_location(location),
            None => debug!("move of unknown node {id} ignored"),
        },
        Action::EndMoveNode { id } => state.end_move(&id),

        Action::AddEdge { from, to, weight } => state.add_edge(from, to, weight),
        Action::DeleteEdge { id } => {
            if state.graph.remove_edge(&id).is_some() {
                state.selected_edge = None;
                state.commit();
            } else {
                debug!("delete of unknown edge {id} ignored");
            }
        }
        Action::SelectEdge { id } => {
            state.selected_edge = id;
            state.selected_node = None;
        }
        Action::UpdateEdgeWeight { id, weight } => state.update_weight(&id, weight),

        Action::SetAlgorithm(algorithm) => {
            state.algorithm = algorithm;
            state.total_cost = None;
            state.path.clear();
            state.visited.clear();
            state.completed.clear();
        }
        Action::SetRunning(running) => state.running = running,
        Action::SetSpeed(speed_ms) => state.speed_ms = speed_ms,
        Action::ApplyStep(Some(step)) => state.apply_step(step),
        Action::ApplyStep(None) => {
            state.graph.reset_statuses();
            state.current_step = None;
        }
        Action::ResetStatus => {
            state.graph.reset_statuses();
            state.clear_run();
        }
        Action::SetStartNode(id) => state.set_start(id),
        Action::AppendPathNote(note) => state.path.push(note),
        Action::ClearPath => state.path.clear(),

        Action::ClearGraph => state = state.cleared(),
        Action::LoadGraph(graph) => state.load(graph),
        Action::Undo => {
            if let Some(g) = state.history.undo() {
                state.graph = g.clone();
                state.selected_node = None;
                state.selected_edge = None;
                debug!("undo to snapshot {}", state.history.cursor());
            }
        }
        Action::Redo => {
            if let Some(g) = state.history.redo() {
                state.graph = g.clone();
                state.selected_node = None;
                state.selected_edge = None;
                debug!("redo to snapshot {}", state.history.cursor());
            }
        }
    }
    state
}

impl AppState {
    /// Same as [`reduce`], as a method.
    pub fn reduce(self, action: Action) -> Self {
        reduce(self, action)
    }

    fn add_node(&mut self, location: Pos2, label: Option<String>) {
        let label = label
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| self.graph.next_label());
        let id = self.fresh_id("node");

        self.graph.add_node(Node::new(id.clone(), location, label));
        debug!("added node {id}");

        self.selected_node = Some(id);
        self.selected_edge = None;
        self.commit();
    }

    fn delete_node(&mut self, id: &str) {
        let incident = self.graph.incident_edges(id).count();
        if self.graph.remove_node(id).is_none() {
            debug!("delete of unknown node {id} ignored");
            return;
        }
        debug!("deleted node {id} with {incident} edges");

        if self.start_node.as_deref() == Some(id) {
            self.start_node = None;
        }
        if self
            .selected_edge
            .as_deref()
            .is_some_and(|e| !self.graph.contains_edge(e))
        {
            self.selected_edge = None;
        }
        self.selected_node = None;
        self.commit();
    }

    fn end_move(&mut self, id: &str) {
        let Some(node) = self.graph.node(id) else {
            return;
        };
        let recorded = self
            .history
            .current()
            .and_then(|g| g.node(id))
            .map(Node::location);
        if recorded != Some(node.location()) {
            self.commit();
        }
    }

    fn add_edge(&mut self, from: String, to: String, weight: Option<f64>) {
        let weight = weight.unwrap_or(DEFAULT_WEIGHT);
        if !is_valid_weight(weight) {
            debug!("edge {from} - {to} with weight {weight} ignored");
            return;
        }
        if from == to || !self.graph.contains_node(&from) || !self.graph.contains_node(&to) {
            debug!("edge {from} - {to} ignored: endpoints must be distinct existing nodes");
            return;
        }
        if self.graph.has_edge_between(&from, &to) {
            debug!("edge {from} - {to} already exists");
            return;
        }

        let id = self.fresh_id("edge");
        self.graph.add_edge(Edge::new(id.clone(), from, to, weight));
        debug!("added edge {id}");

        self.selected_edge = Some(id);
        self.selected_node = None;
        self.commit();
    }

    fn update_weight(&mut self, id: &str, weight: f64) {
        if !is_valid_weight(weight) {
            debug!("weight {weight} for edge {id} rejected");
            return;
        }
        match self.graph.edge_mut(id) {
            Some(edge) => edge.set_weight(weight),
            None => {
                debug!("weight update of unknown edge {id} ignored");
                return;
            }
        }
        self.commit();
    }

    fn set_start(&mut self, id: Option<String>) {
        for node in self.graph.nodes_mut() {
            let status = if Some(node.id()) == id.as_deref() {
                NodeStatus::Start
            } else {
                NodeStatus::Default
            };
            node.set_status(status);
        }
        for edge in self.graph.edges_mut() {
            edge.set_status(EdgeStatus::Default);
        }
        self.start_node = id;
        self.visited.clear();
        self.completed.clear();
    }

    /// Records the step in the derived sets, then recolors every node by
    /// priority `start > completed > current > visited > default` and the named
    /// edge by step kind.
    fn apply_step(&mut self, step: Step) {
        trace!("apply step {:?} {}", step.kind, step.message);

        if let Some(id) = &step.node_id {
            match step.kind {
                StepKind::VisitNode | StepKind::ProcessNode => {
                    self.visited.insert(id.clone());
                }
                StepKind::CompleteNode | StepKind::AddToMst => {
                    self.completed.insert(id.clone());
                }
                _ => {}
            }
        }

        let focus = match step.kind {
            StepKind::ProcessNode | StepKind::AddToMst => step.node_id.as_deref(),
            _ => None,
        };
        let start = self.start_node.as_deref();

        for node in self.graph.nodes_mut() {
            let id = node.id();
            let status = if Some(id) == start {
                NodeStatus::Start
            } else if self.completed.contains(id) {
                NodeStatus::Completed
            } else if Some(id) == focus {
                NodeStatus::Current
            } else if self.visited.contains(id) {
                NodeStatus::Visited
            } else {
                NodeStatus::Default
            };
            node.set_status(status);
        }

        if let Some(edge) = step.edge_id.as_deref().and_then(|id| self.graph.edge_mut(id)) {
            let status = match step.kind {
                StepKind::VisitEdge | StepKind::CurrentEdge => EdgeStatus::Current,
                StepKind::AddToMst | StepKind::TraverseEdge => EdgeStatus::Visited,
                _ => EdgeStatus::Default,
            };
            edge.set_status(status);

            if step.kind == StepKind::AddToMst {
                self.total_cost = Some(self.total_cost.unwrap_or(0.) + edge.weight());
            }
        }

        if let Some(cost) = step.total_cost {
            self.total_cost = Some(cost);
        }

        self.current_step = Some(step);
    }

    /// Fresh state over an empty graph keeping speed, history and the id counter.
    fn cleared(self) -> Self {
        let mut next = AppState::new(
            SettingsPlayback {
                speed_ms: self.speed_ms,
            },
            SettingsHistory {
                capacity: self.history.capacity(),
            },
        );
        next.history = self.history;
        next.next_id = self.next_id;
        next.commit();
        debug!("graph cleared");
        next
    }

    fn load(&mut self, mut graph: Graph) {
        let (nodes, edges) = graph.repair();
        if nodes + edges > 0 {
            debug!("dropped {nodes} duplicate nodes and {edges} invalid edges from loaded graph");
        }
        debug!(
            "loaded graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        self.graph = graph;
        self.algorithm = None;
        self.running = false;
        self.start_node = None;
        self.selected_node = None;
        self.selected_edge = None;
        self.clear_run();
        self.commit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_node(state: AppState) -> AppState {
        reduce(
            state,
            Action::AddNode {
                location: Pos2::new(1., 2.),
                label: None,
            },
        )
    }

    fn add_edge(state: AppState, from: &str, to: &str, weight: f64) -> AppState {
        reduce(
            state,
            Action::AddEdge {
                from: from.to_string(),
                to: to.to_string(),
                weight: Some(weight),
            },
        )
    }

    /// Three nodes `node-1..node-3` joined by `edge-4` (1-2) and `edge-5` (2-3).
    fn path_state() -> AppState {
        let mut state = AppState::default();
        for _ in 0..3 {
            state = add_node(state);
        }
        state = add_edge(state, "node-1", "node-2", 2.);
        add_edge(state, "node-2", "node-3", 5.)
    }

    fn node_status(state: &AppState, id: &str) -> Option<NodeStatus> {
        state.graph().node(id).map(Node::status)
    }

    fn edge_status(state: &AppState, id: &str) -> Option<EdgeStatus> {
        state.graph().edge(id).map(Edge::status)
    }

    #[test]
    fn test_add_node_labels_and_selects() {
        let mut state = AppState::default();
        state = reduce(state, Action::SelectEdge { id: Some("x".into()) });
        state = add_node(state);

        let node = &state.graph().nodes()[0];
        assert_eq!(node.id(), "node-1");
        assert_eq!(node.label(), "1");
        assert_eq!(node.location(), Pos2::new(1., 2.));
        assert_eq!(state.selected_node(), Some("node-1"));
        assert_eq!(state.selected_edge(), None);
        assert_eq!(state.history().len(), 2);
    }

    #[test]
    fn test_add_node_label_skips_non_numeric() {
        let mut state = AppState::default();
        state = reduce(
            state,
            Action::AddNode {
                location: Pos2::ZERO,
                label: Some("7".into()),
            },
        );
        state = reduce(
            state,
            Action::AddNode {
                location: Pos2::ZERO,
                label: Some("hub".into()),
            },
        );
        state = add_node(state);
        assert_eq!(state.graph().nodes()[2].label(), "8");
    }

    #[test]
    fn test_add_node_after_largest_label() {
        let mut state = reduce(
            AppState::default(),
            Action::AddNode {
                location: Pos2::ZERO,
                label: Some(u64::MAX.to_string()),
            },
        );
        state = add_node(state);
        assert_eq!(state.graph().node_count(), 2);
        assert_eq!(state.graph().nodes()[1].label(), u64::MAX.to_string());
    }

    #[test]
    fn test_delete_node_cascades() {
        let mut state = path_state();
        state = reduce(state, Action::SetStartNode(Some("node-2".into())));
        state = reduce(state, Action::SelectEdge { id: Some("edge-4".into()) });
        state = reduce(state, Action::DeleteNode { id: "node-2".into() });

        assert_eq!(state.graph().node_count(), 2);
        assert_eq!(state.graph().edge_count(), 0);
        assert_eq!(state.start_node(), None);
        assert_eq!(state.selected_node(), None);
        assert_eq!(state.selected_edge(), None);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let state = path_state();
        let next = reduce(state.clone(), Action::DeleteNode { id: "nope".into() });
        assert_eq!(next, state);
        let next = reduce(state.clone(), Action::DeleteEdge { id: "nope".into() });
        assert_eq!(next, state);
    }

    #[test]
    fn test_select_is_exclusive() {
        let mut state = path_state();
        state = reduce(state, Action::SelectNode { id: Some("node-1".into()) });
        state = reduce(state, Action::SelectEdge { id: Some("edge-4".into()) });
        assert_eq!(state.selected_node(), None);
        assert_eq!(state.selected_edge(), Some("edge-4"));

        let len = state.history().len();
        state = reduce(state, Action::SelectNode { id: Some("node-3".into()) });
        assert_eq!(state.selected_edge(), None);
        assert_eq!(state.history().len(), len);
    }

    #[test]
    fn test_move_then_end_move() {
        let mut state = path_state();
        let len = state.history().len();

        state = reduce(
            state,
            Action::MoveNode {
                id: "node-1".into(),
                location: Pos2::new(50., 60.),
            },
        );
        assert_eq!(state.history().len(), len);

        state = reduce(state, Action::EndMoveNode { id: "node-1".into() });
        assert_eq!(state.history().len(), len + 1);

        // nothing moved since the last snapshot
        let again = reduce(state.clone(), Action::EndMoveNode { id: "node-1".into() });
        assert_eq!(again, state);
    }

    #[test]
    fn test_duplicate_edge_is_noop() {
        let state = path_state();
        let next = add_edge(state.clone(), "node-2", "node-1", 9.);
        assert_eq!(next, state);
    }

    #[test]
    fn test_add_edge_rejects_bad_input() {
        let state = path_state();
        assert_eq!(add_edge(state.clone(), "node-1", "node-1", 1.), state);
        assert_eq!(add_edge(state.clone(), "node-1", "ghost", 1.), state);
        assert_eq!(add_edge(state.clone(), "node-1", "node-3", 0.), state);
        assert_eq!(add_edge(state.clone(), "node-1", "node-3", f64::NAN), state);
    }

    #[test]
    fn test_add_edge_default_weight_selects() {
        let mut state = path_state();
        state = reduce(state, Action::SelectNode { id: Some("node-1".into()) });
        state = reduce(
            state,
            Action::AddEdge {
                from: "node-1".into(),
                to: "node-3".into(),
                weight: None,
            },
        );
        let id = state.selected_edge().map(str::to_string);
        assert_eq!(id.as_deref(), Some("edge-6"));
        assert_eq!(state.graph().edge("edge-6").map(Edge::weight), Some(DEFAULT_WEIGHT));
        assert_eq!(state.selected_node(), None);
    }

    #[test]
    fn test_update_weight() {
        let mut state = path_state();
        let len = state.history().len();
        state = reduce(
            state,
            Action::UpdateEdgeWeight {
                id: "edge-4".into(),
                weight: 2.5,
            },
        );
        assert_eq!(state.graph().edge("edge-4").map(Edge::weight), Some(2.5));
        assert_eq!(state.history().len(), len + 1);

        let rejected = reduce(
            state.clone(),
            Action::UpdateEdgeWeight {
                id: "edge-4".into(),
                weight: -1.,
            },
        );
        assert_eq!(rejected, state);
    }

    #[test]
    fn test_set_algorithm_resets_run() {
        let mut state = path_state();
        state = reduce(state, Action::AppendPathNote("a".into()));
        state = reduce(
            state,
            Action::ApplyStep(Some(
                Step::new(StepKind::AddToMst, "x")
                    .with_edge("edge-4")
                    .with_node("node-2"),
            )),
        );
        assert_eq!(state.total_cost(), Some(2.));

        state = reduce(state, Action::SetAlgorithm(Some(crate::Algorithm::Prim)));
        assert_eq!(state.algorithm(), Some(crate::Algorithm::Prim));
        assert_eq!(state.total_cost(), None);
        assert!(state.path().is_empty());
        assert!(state.completed().is_empty());
    }

    #[test]
    fn test_running_and_speed() {
        let mut state = AppState::default();
        assert_eq!(state.speed_ms(), 1000);
        state = reduce(state, Action::SetRunning(true));
        state = reduce(state, Action::SetSpeed(250));
        assert!(state.running());
        assert_eq!(state.speed_ms(), 250);
    }

    #[test]
    fn test_status_priority() {
        let mut state = path_state();
        state = reduce(state, Action::SetStartNode(Some("node-1".into())));
        assert_eq!(node_status(&state, "node-1"), Some(NodeStatus::Start));

        state = reduce(
            state,
            Action::ApplyStep(Some(Step::new(StepKind::VisitNode, "v").with_node("node-2"))),
        );
        assert_eq!(node_status(&state, "node-2"), Some(NodeStatus::Visited));

        state = reduce(
            state,
            Action::ApplyStep(Some(Step::new(StepKind::ProcessNode, "p").with_node("node-3"))),
        );
        assert_eq!(node_status(&state, "node-3"), Some(NodeStatus::Current));
        assert_eq!(node_status(&state, "node-2"), Some(NodeStatus::Visited));

        state = reduce(
            state,
            Action::ApplyStep(Some(Step::new(StepKind::CompleteNode, "c").with_node("node-3"))),
        );
        assert_eq!(node_status(&state, "node-3"), Some(NodeStatus::Completed));

        // focus moved away, completed and start stay
        state = reduce(
            state,
            Action::ApplyStep(Some(Step::new(StepKind::ProcessNode, "p").with_node("node-1"))),
        );
        assert_eq!(node_status(&state, "node-1"), Some(NodeStatus::Start));
        assert_eq!(node_status(&state, "node-3"), Some(NodeStatus::Completed));
    }

    #[test]
    fn test_edge_coloring() {
        let mut state = path_state();
        let apply = |state, kind| {
            reduce(state, Action::ApplyStep(Some(Step::new(kind, "e").with_edge("edge-4"))))
        };

        state = apply(state, StepKind::VisitEdge);
        assert_eq!(edge_status(&state, "edge-4"), Some(EdgeStatus::Current));
        state = apply(state, StepKind::TraverseEdge);
        assert_eq!(edge_status(&state, "edge-4"), Some(EdgeStatus::Visited));
        state = apply(state, StepKind::SkipEdge);
        assert_eq!(edge_status(&state, "edge-4"), Some(EdgeStatus::Default));
        state = apply(state, StepKind::CurrentEdge);
        assert_eq!(edge_status(&state, "edge-4"), Some(EdgeStatus::Current));
        // other edges are left alone
        assert_eq!(edge_status(&state, "edge-5"), Some(EdgeStatus::Default));
    }

    #[test]
    fn test_apply_none_clears_coloring() {
        let mut state = path_state();
        state = reduce(
            state,
            Action::ApplyStep(Some(Step::new(StepKind::VisitEdge, "e").with_edge("edge-5"))),
        );
        state = reduce(state, Action::ApplyStep(None));
        assert_eq!(state.current_step(), None);
        assert_eq!(edge_status(&state, "edge-5"), Some(EdgeStatus::Default));
    }

    #[test]
    fn test_done_cost_overrides_running_cost() {
        let mut state = path_state();
        state = reduce(
            state,
            Action::ApplyStep(Some(Step::done("fin").with_total_cost(11.))),
        );
        assert_eq!(state.total_cost(), Some(11.));
    }

    #[test]
    fn test_reset_status() {
        let mut state = path_state();
        state = reduce(state, Action::AppendPathNote("a".into()));
        state = reduce(
            state,
            Action::ApplyStep(Some(Step::new(StepKind::VisitNode, "v").with_node("node-2"))),
        );
        state = reduce(state, Action::ResetStatus);

        assert_eq!(node_status(&state, "node-2"), Some(NodeStatus::Default));
        assert_eq!(state.current_step(), None);
        assert!(state.path().is_empty());
        assert!(state.visited().is_empty());
    }

    #[test]
    fn test_set_start_recolors() {
        let mut state = path_state();
        state = reduce(
            state,
            Action::ApplyStep(Some(Step::new(StepKind::TraverseEdge, "t").with_edge("edge-5"))),
        );
        state = reduce(state, Action::SetStartNode(Some("node-3".into())));
        assert_eq!(node_status(&state, "node-3"), Some(NodeStatus::Start));
        assert_eq!(edge_status(&state, "edge-5"), Some(EdgeStatus::Default));

        state = reduce(state, Action::SetStartNode(None));
        assert_eq!(state.start_node(), None);
        assert_eq!(node_status(&state, "node-3"), Some(NodeStatus::Default));
    }

    #[test]
    fn test_path_log() {
        let mut state = AppState::default();
        state = reduce(state, Action::AppendPathNote("one".into()));
        state = reduce(state, Action::AppendPathNote("two".into()));
        assert_eq!(state.path(), ["one".to_string(), "two".to_string()]);
        state = reduce(state, Action::ClearPath);
        assert!(state.path().is_empty());
    }

    #[test]
    fn test_clear_graph_keeps_speed() {
        let mut state = path_state();
        state = reduce(state, Action::SetSpeed(200));
        state = reduce(state, Action::SetAlgorithm(Some(crate::Algorithm::Kruskal)));
        state = reduce(state, Action::ClearGraph);

        assert!(state.graph().is_empty());
        assert_eq!(state.speed_ms(), 200);
        assert_eq!(state.algorithm(), None);

        // clearing is undoable
        state = reduce(state, Action::Undo);
        assert_eq!(state.graph().node_count(), 3);

        // ids keep counting after a clear
        state = reduce(state, Action::Redo);
        state = add_node(state);
        assert_eq!(state.graph().nodes()[0].id(), "node-6");
    }

    #[test]
    fn test_load_graph() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("a", Pos2::ZERO, "A").with_status(NodeStatus::Visited));
        graph.add_node(Node::new("b", Pos2::ZERO, "B"));
        graph.add_edge(Edge::new("ab", "a", "b", 4.));

        let mut state = path_state();
        state = reduce(state, Action::SetAlgorithm(Some(crate::Algorithm::Bfs)));
        state = reduce(state, Action::SetStartNode(Some("node-1".into())));
        state = reduce(state, Action::LoadGraph(graph.clone()));

        assert_eq!(state.graph(), &graph);
        assert_eq!(node_status(&state, "a"), Some(NodeStatus::Visited));
        assert_eq!(state.algorithm(), None);
        assert_eq!(state.start_node(), None);
        assert_eq!(state.history().current(), Some(&graph));
    }

    #[test]
    fn test_undo_redo_clear_selection() {
        let mut state = path_state();
        state = reduce(state, Action::SelectNode { id: Some("node-1".into()) });
        state = reduce(state, Action::Undo);

        assert_eq!(state.graph().edge_count(), 1);
        assert_eq!(state.selected_node(), None);
        assert!(state.can_redo());

        state = reduce(state, Action::Redo);
        assert_eq!(state.graph().edge_count(), 2);
        assert!(!state.can_redo());

        let same = reduce(state.clone(), Action::Redo);
        assert_eq!(same, state);
    }

    #[test]
    fn test_undo_keeps_run_fields() {
        let mut state = path_state();
        state = reduce(state, Action::SetAlgorithm(Some(crate::Algorithm::Dfs)));
        state = reduce(state, Action::SetRunning(true));
        state = reduce(state, Action::Undo);
        assert_eq!(state.algorithm(), Some(crate::Algorithm::Dfs));
        assert!(state.running());
    }

    #[test]
    fn test_history_snapshots_are_independent() {
        let mut state = path_state();
        let snapshot = state.history().current().cloned();
        state = reduce(
            state,
            Action::MoveNode {
                id: "node-1".into(),
                location: Pos2::new(99., 99.),
            },
        );
        assert_eq!(state.history().current().cloned(), snapshot);
    }
}
