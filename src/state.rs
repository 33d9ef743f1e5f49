use std::collections::BTreeSet;

use crate::{Algorithm, Graph, History, SettingsHistory, SettingsPlayback, Step};

/// Application state owned by the reducer.
///
/// Read through the getters; change only through [`crate::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub(crate) graph: Graph,

    /// Mutually exclusive with `selected_edge`.
    pub(crate) selected_node: Option<String>,
    pub(crate) selected_edge: Option<String>,

    pub(crate) algorithm: Option<Algorithm>,
    pub(crate) running: bool,
    pub(crate) speed_ms: u64,
    pub(crate) current_step: Option<Step>,
    pub(crate) start_node: Option<String>,
    pub(crate) total_cost: Option<f64>,
    pub(crate) path: Vec<String>,

    pub(crate) history: History,

    /// Nodes named by visit/process steps, drives coloring priority only.
    pub(crate) visited: BTreeSet<String>,
    /// Nodes named by complete/add-to-MST steps, drives coloring priority only.
    pub(crate) completed: BTreeSet<String>,

    /// Counter behind generated node and edge ids.
    pub(crate) next_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SettingsPlayback::default(), SettingsHistory::default())
    }
}

impl AppState {
    pub fn new(playback: SettingsPlayback, history: SettingsHistory) -> Self {
        Self {
            graph: Graph::default(),
            selected_node: None,
            selected_edge: None,
            algorithm: None,
            running: false,
            speed_ms: playback.speed_ms,
            current_step: None,
            start_node: None,
            total_cost: None,
            path: Vec::new(),
            history: History::new(Graph::default(), history.capacity),
            visited: BTreeSet::new(),
            completed: BTreeSet::new(),
            next_id: 0,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn selected_node(&self) -> Option<&str> {
        self.selected_node.as_deref()
    }

    pub fn selected_edge(&self) -> Option<&str> {
        self.selected_edge.as_deref()
    }

    pub fn algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.current_step.as_ref()
    }

    pub fn start_node(&self) -> Option<&str> {
        self.start_node.as_deref()
    }

    pub fn total_cost(&self) -> Option<f64> {
        self.total_cost
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn visited(&self) -> &BTreeSet<String> {
        &self.visited
    }

    pub fn completed(&self) -> &BTreeSet<String> {
        &self.completed
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Generates an id of the form `{prefix}-{n}` not used by the live graph.
    pub(crate) fn fresh_id(&mut self, prefix: &str) -> String {
        loop {
            self.next_id += 1;
            let id = format!("{prefix}-{}", self.next_id);
            if !self.graph.contains_node(&id) && !self.graph.contains_edge(&id) {
                return id;
            }
        }
    }

    /// Records the live graph as a new history snapshot.
    pub(crate) fn commit(&mut self) {
        self.history.push(self.graph.clone());
    }

    pub(crate) fn clear_run(&mut self) {
        self.current_step = None;
        self.total_cost = None;
        self.path.clear();
        self.visited.clear();
        self.completed.clear();
    }
}
