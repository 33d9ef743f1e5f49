use std::collections::HashSet;

use super::{
    describe_pair, describe_path, missing_start, next_phased, valid_start, Algorithm, Pending,
    Phased, Step, StepKind,
};
use crate::{Adjacency, Graph};

/// Node on the explicit recursion stack with the index of its next neighbor.
#[derive(Debug, Clone)]
struct Frame {
    node: String,
    next: usize,
}

/// Depth-first traversal as a lazy step sequence.
///
/// The recursion is kept on an explicit stack: a phase either inspects the
/// next neighbor of the top frame, descending into it when unvisited, or pops
/// the frame once its neighbors are exhausted. Completion is therefore
/// reported in post-order.
#[derive(Debug, Clone)]
pub struct Dfs {
    graph: Graph,
    adj: Adjacency,

    visited: HashSet<String>,
    /// Pre-order of first entry.
    order: Vec<String>,
    stack: Vec<Frame>,

    pending: Pending,
}

impl Dfs {
    pub fn new(graph: &Graph, start: Option<&str>) -> Self {
        let mut dfs = Self {
            graph: graph.clone(),
            adj: graph.adjacency(),
            visited: HashSet::new(),
            order: Vec::new(),
            stack: Vec::new(),
            pending: Pending::default(),
        };

        match valid_start(graph, start) {
            Some(start) => dfs.enter(start, None),
            None => dfs.pending.finish(missing_start(Algorithm::Dfs)),
        }

        dfs
    }

    fn enter(&mut self, node: &str, parent: Option<&str>) {
        self.visited.insert(node.to_string());
        self.order.push(node.to_string());
        self.stack.push(Frame {
            node: node.to_string(),
            next: 0,
        });

        let label = self.graph.label_of(node);
        let (message, note) = match parent {
            Some(parent) => (
                format!("Visiting node {label}"),
                format!("{} → {label}", self.graph.label_of(parent)),
            ),
            None => (
                format!("Starting DFS at node {label}"),
                format!("Start at {label}"),
            ),
        };

        self.pending.push(
            Step::new(StepKind::VisitNode, message)
                .with_node(node)
                .with_path_note(note),
        );
    }
}

impl Phased for Dfs {
    fn pending(&mut self) -> &mut Pending {
        &mut self.pending
    }

    fn advance(&mut self) {
        let Some(frame) = self.stack.last_mut() else {
            let step = Step::done(format!("DFS complete: visited {} nodes", self.order.len()))
                .with_path_note(format!(
                    "DFS order: {}",
                    describe_path(&self.graph, &self.order)
                ));
            self.pending.finish(step);
            return;
        };

        let current = frame.node.clone();
        let neighbor = self
            .adj
            .get(&current)
            .and_then(|ns| ns.get(frame.next))
            .map(|n| n.id.clone());

        let Some(neighbor) = neighbor else {
            self.stack.pop();
            self.pending.push(
                Step::new(
                    StepKind::CompleteNode,
                    format!(
                        "All neighbors of node {} explored, backtracking",
                        self.graph.label_of(&current)
                    ),
                )
                .with_node(current),
            );
            return;
        };
        frame.next += 1;

        let edge = self
            .graph
            .find_edge(&current, &neighbor)
            .map(|e| e.id().to_string());
        let pair = describe_pair(&self.graph, &current, &neighbor);

        self.pending.push(
            Step::new(StepKind::CurrentEdge, format!("Checking edge {pair}"))
                .with_edge_opt(edge.as_deref()),
        );

        if self.visited.contains(&neighbor) {
            self.pending.push(
                Step::new(
                    StepKind::SkipEdge,
                    format!(
                        "Node {} was already visited",
                        self.graph.label_of(&neighbor)
                    ),
                )
                .with_edge_opt(edge.as_deref()),
            );
            return;
        }

        self.pending.push(
            Step::new(StepKind::TraverseEdge, format!("Going deeper along {pair}"))
                .with_edge_opt(edge.as_deref())
                .with_node(neighbor.clone()),
        );
        self.enter(&neighbor, Some(&current));
    }
}

impl Iterator for Dfs {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        next_phased(self)
    }
}
