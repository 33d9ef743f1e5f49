use std::collections::HashMap;

use petgraph::unionfind::UnionFind;

use super::{describe_pair, next_phased, Pending, Phased, Step, StepKind};
use crate::Graph;

/// Kruskal's minimum spanning tree as a lazy step sequence.
///
/// Edges are considered in ascending weight order, equal weights keep their
/// original order. Cycle detection uses union-find with path compression and
/// union by rank.
#[derive(Debug, Clone)]
pub struct Kruskal {
    graph: Graph,

    /// Edge positions in `graph.edges()`, sorted by weight.
    sorted: Vec<usize>,
    cursor: usize,

    node_index: HashMap<String, usize>,
    sets: UnionFind<usize>,

    /// `node_count - 1`, the number of edges of a spanning tree.
    target: usize,
    accepted: Vec<String>,
    total_cost: f64,

    pending: Pending,
}

impl Kruskal {
    pub fn new(graph: &Graph) -> Self {
        let node_index: HashMap<String, usize> = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id().to_string(), i))
            .collect();

        let edges = graph.edges();
        let mut sorted: Vec<usize> = (0..edges.len()).collect();
        // stable: ties keep input order
        sorted.sort_by(|a, b| edges[*a].weight().total_cmp(&edges[*b].weight()));

        let mut pending = Pending::default();
        pending.push(Step::new(
            StepKind::Start,
            format!(
                "Sorted {} edges by weight, building MST over {} nodes",
                edges.len(),
                graph.node_count()
            ),
        ));

        Self {
            graph: graph.clone(),
            sorted,
            cursor: 0,
            sets: UnionFind::new(node_index.len()),
            node_index,
            target: graph.node_count().saturating_sub(1),
            accepted: Vec::new(),
            total_cost: 0.,
            pending,
        }
    }

    fn finish(&mut self) {
        let summary = format!(
            "MST edges: {}; total cost {}",
            if self.accepted.is_empty() {
                "none".to_string()
            } else {
                self.accepted.join(", ")
            },
            self.total_cost
        );

        let message = if self.accepted.len() < self.target {
            format!(
                "Graph is disconnected: MST incomplete with {} of {} edges, partial cost {}",
                self.accepted.len(),
                self.target,
                self.total_cost
            )
        } else {
            format!(
                "MST complete: {} edges, total cost {}",
                self.accepted.len(),
                self.total_cost
            )
        };

        self.pending.finish(
            Step::done(message)
                .with_total_cost(self.total_cost)
                .with_path_note(summary),
        );
    }
}

impl Phased for Kruskal {
    fn pending(&mut self) -> &mut Pending {
        &mut self.pending
    }

    fn advance(&mut self) {
        if self.accepted.len() >= self.target || self.cursor >= self.sorted.len() {
            self.finish();
            return;
        }

        let edge = &self.graph.edges()[self.sorted[self.cursor]];
        self.cursor += 1;

        let pair = describe_pair(&self.graph, edge.from(), edge.to());
        let weight = edge.weight();

        self.pending.push(
            Step::new(
                StepKind::VisitEdge,
                format!("Considering edge {pair} (weight {weight})"),
            )
            .with_edge(edge.id()),
        );

        let ends = (
            self.node_index.get(edge.from()),
            self.node_index.get(edge.to()),
        );
        let joined = match ends {
            (Some(a), Some(b)) => self.sets.union(*a, *b),
            _ => false,
        };

        if joined {
            self.total_cost += weight;
            self.accepted.push(format!("{pair} ({weight})"));
            self.pending.push(
                Step::new(
                    StepKind::AddToMst,
                    format!("Adding edge {pair} (weight {weight}) to the MST"),
                )
                .with_edge(edge.id())
                .with_path_note(format!(
                    "Added {pair} (weight {weight}), total cost {}",
                    self.total_cost
                )),
            );
        } else {
            self.pending.push(
                Step::new(
                    StepKind::SkipEdge,
                    format!("Skipping edge {pair}: it would form a cycle"),
                )
                .with_edge(edge.id()),
            );
        }
    }
}

impl Iterator for Kruskal {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        next_phased(self)
    }
}
