use std::collections::{HashMap, HashSet};

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use crate::elements::{Edge, EdgeStatus, Node, NodeStatus};
use crate::error::GraphError;

/// Neighbor entry of an adjacency list.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub id: String,
    pub weight: f64,
}

/// Per-node list of `(neighbor, weight)` pairs in edge insertion order.
pub type Adjacency = HashMap<String, Vec<Neighbor>>;

/// Undirected weighted graph: the pair of nodes and edges.
///
/// Nodes and edges are kept in insertion order, which is the order algorithms
/// iterate them in. Every edge endpoint references an existing node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub(crate) fn edges_mut(&mut self) -> impl Iterator<Item = &mut Edge> {
        self.edges.iter_mut()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id() == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id() == id)
    }

    pub fn edge_mut(&mut self, id: &str) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|e| e.id() == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn contains_edge(&self, id: &str) -> bool {
        self.edge(id).is_some()
    }

    /// Label of the node with the given id, falling back to the id itself.
    pub fn label_of<'a>(&'a self, id: &'a str) -> &'a str {
        self.node(id).map_or(id, Node::label)
    }

    /// Appends a node. Returns `false` and leaves the graph untouched if the id is taken.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.contains_node(node.id()) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    /// Appends an edge between two distinct existing nodes.
    ///
    /// Returns `false` without changes if an endpoint is missing, the edge is a
    /// self-loop, the id is taken or the pair is already connected.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if edge.from() == edge.to()
            || !self.contains_node(edge.from())
            || !self.contains_node(edge.to())
            || self.contains_edge(edge.id())
            || self.has_edge_between(edge.from(), edge.to())
        {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// Removes node by id together with all edges touching it. Returns the removed node.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let idx = self.nodes.iter().position(|n| n.id() == id)?;
        self.edges.retain(|e| !e.is_incident(id));
        Some(self.nodes.remove(idx))
    }

    /// Removes edge by id. Returns the removed edge.
    pub fn remove_edge(&mut self, id: &str) -> Option<Edge> {
        let idx = self.edges.iter().position(|e| e.id() == id)?;
        Some(self.edges.remove(idx))
    }

    /// Finds the edge joining `a` and `b` regardless of stored direction.
    pub fn find_edge(&self, a: &str, b: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.connects(a, b))
    }

    pub fn has_edge_between(&self, a: &str, b: &str) -> bool {
        self.find_edge(a, b).is_some()
    }

    pub fn incident_edges<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.is_incident(id))
    }

    /// Builds the adjacency list in one pass over the edges, inserting both directions.
    ///
    /// Every node has an entry, isolated nodes map to an empty list.
    pub fn adjacency(&self) -> Adjacency {
        let mut adj: Adjacency = self
            .nodes
            .iter()
            .map(|n| (n.id().to_string(), Vec::new()))
            .collect();

        for e in &self.edges {
            adj.entry(e.from().to_string()).or_default().push(Neighbor {
                id: e.to().to_string(),
                weight: e.weight(),
            });
            adj.entry(e.to().to_string()).or_default().push(Neighbor {
                id: e.from().to_string(),
                weight: e.weight(),
            });
        }

        adj
    }

    /// Smallest label greater than every numeric label in use, as text.
    /// Non-numeric labels are ignored.
    pub fn next_label(&self) -> String {
        let max = self
            .nodes
            .iter()
            .filter_map(Node::numeric_label)
            .max()
            .unwrap_or(0);
        max.saturating_add(1).to_string()
    }

    /// Resets every node and edge status to default.
    pub fn reset_statuses(&mut self) {
        self.nodes_mut()
            .for_each(|n| n.set_status(NodeStatus::Default));
        self.edges_mut()
            .for_each(|e| e.set_status(EdgeStatus::Default));
    }

    /// Brings a graph that came from outside in line with the invariants the
    /// editing operations keep: later duplicates of a node id are dropped, then
    /// edges that dangle, loop or repeat an already connected pair. Returns the
    /// number of removed nodes and edges.
    pub(crate) fn repair(&mut self) -> (usize, usize) {
        let (nodes_before, edges_before) = (self.nodes.len(), self.edges.len());

        let mut seen = HashSet::new();
        self.nodes.retain(|n| seen.insert(n.id().to_string()));

        let ids: HashSet<&str> = self.nodes.iter().map(Node::id).collect();
        let mut edge_ids = HashSet::new();
        let mut pairs = HashSet::new();
        self.edges.retain(|e| {
            ids.contains(e.from())
                && ids.contains(e.to())
                && e.from() != e.to()
                && edge_ids.insert(e.id().to_string())
                && pairs.insert(unordered_pair(e))
        });

        (
            nodes_before - self.nodes.len(),
            edges_before - self.edges.len(),
        )
    }

    /// Checks structural invariants of a graph that came from outside.
    ///
    /// # Errors
    ///
    /// Returns the first violation found: duplicate ids, an edge pointing to a
    /// missing node, a self-loop, a second edge between the same pair of nodes,
    /// or a non-positive or non-finite weight.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut node_ids = HashSet::with_capacity(self.nodes.len());
        for n in &self.nodes {
            if !node_ids.insert(n.id()) {
                return Err(GraphError::DuplicateNode(n.id().to_string()));
            }
        }

        let mut edge_ids = HashSet::with_capacity(self.edges.len());
        let mut pairs = HashMap::with_capacity(self.edges.len());
        for e in &self.edges {
            if !edge_ids.insert(e.id()) {
                return Err(GraphError::DuplicateEdge(e.id().to_string()));
            }
            for end in [e.from(), e.to()] {
                if !node_ids.contains(end) {
                    return Err(GraphError::DanglingEdge {
                        edge: e.id().to_string(),
                        node: end.to_string(),
                    });
                }
            }
            if e.from() == e.to() {
                return Err(GraphError::SelfLoop(e.id().to_string()));
            }
            if let Some(first) = pairs.insert(unordered_pair(e), e.id()) {
                return Err(GraphError::ParallelEdge {
                    edge: e.id().to_string(),
                    existing: first.to_string(),
                });
            }
            if !is_valid_weight(e.weight()) {
                return Err(GraphError::InvalidWeight {
                    edge: e.id().to_string(),
                    weight: e.weight(),
                });
            }
        }

        Ok(())
    }

    /// Decodes the persisted `{nodes, edges}` payload. Statuses are kept as stored.
    ///
    /// # Errors
    ///
    /// Fails on malformed json or when [`Graph::validate`] fails.
    pub fn from_json(text: &str) -> Result<Self, GraphError> {
        let g: Self = serde_json::from_str(text)?;
        g.validate()?;
        Ok(g)
    }

    /// Encodes the graph as the persisted `{nodes, edges}` payload.
    ///
    /// # Errors
    ///
    /// Fails if a weight or coordinate cannot be represented in json.
    pub fn to_json(&self) -> Result<String, GraphError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Same as [`Graph::to_json`] but indented.
    ///
    /// # Errors
    ///
    /// Fails if a weight or coordinate cannot be represented in json.
    pub fn to_json_pretty(&self) -> Result<String, GraphError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Converts to a petgraph undirected graph. Node weights are node ids, edge
    /// weights are edge weights. Node indices follow node order.
    pub fn to_ungraph(&self) -> UnGraph<String, f64> {
        let mut g = UnGraph::with_capacity(self.nodes.len(), self.edges.len());
        let idx: HashMap<&str, NodeIndex> = self
            .nodes
            .iter()
            .map(|n| (n.id(), g.add_node(n.id().to_string())))
            .collect();

        for e in &self.edges {
            if let (Some(a), Some(b)) = (idx.get(e.from()), idx.get(e.to())) {
                g.add_edge(*a, *b, e.weight());
            }
        }

        g
    }
}

/// Endpoint ids of `edge` in sorted order, equal for both directions.
fn unordered_pair(edge: &Edge) -> (String, String) {
    let (a, b) = (edge.from(), edge.to());
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Edge weights must be finite and strictly positive.
pub fn is_valid_weight(weight: f64) -> bool {
    weight.is_finite() && weight > 0.
}
