use std::collections::HashSet;

use super::{
    describe_pair, missing_start, next_phased, valid_start, Algorithm, Pending, Phased, Step,
    StepKind,
};
use crate::{Adjacency, Graph};

/// Prim's minimum spanning tree as a lazy step sequence.
///
/// Every phase scans all edges leading from the tree to the rest of the graph,
/// in tree insertion order and adjacency order within a node, and grows the
/// tree by the lightest one. On equal weights the first candidate met wins.
#[derive(Debug, Clone)]
pub struct Prim {
    graph: Graph,
    adj: Adjacency,

    visited: HashSet<String>,
    /// Tree nodes in the order they joined.
    order: Vec<String>,

    total_cost: f64,
    mst_edges: Vec<String>,

    pending: Pending,
}

/// Lightest crossing edge found so far in a scan.
struct Candidate {
    edge: String,
    from: String,
    to: String,
    weight: f64,
}

impl Prim {
    pub fn new(graph: &Graph, start: Option<&str>) -> Self {
        let mut prim = Self {
            graph: graph.clone(),
            adj: graph.adjacency(),
            visited: HashSet::new(),
            order: Vec::new(),
            total_cost: 0.,
            mst_edges: Vec::new(),
            pending: Pending::default(),
        };

        match valid_start(graph, start) {
            Some(start) => {
                prim.visited.insert(start.to_string());
                prim.order.push(start.to_string());
            }
            None => prim.pending.finish(missing_start(Algorithm::Prim)),
        }

        prim
    }

    fn summary(&self) -> String {
        format!(
            "MST edges: {}; total cost {}",
            if self.mst_edges.is_empty() {
                "none".to_string()
            } else {
                self.mst_edges.join(", ")
            },
            self.total_cost
        )
    }

    fn finish_complete(&mut self) {
        let step = Step::done(format!(
            "MST complete: {} edges, total cost {}",
            self.mst_edges.len(),
            self.total_cost
        ))
        .with_total_cost(self.total_cost)
        .with_path_note(self.summary());
        self.pending.finish(step);
    }

    fn finish_disconnected(&mut self) {
        let step = Step::done(format!(
            "Graph is disconnected: MST incomplete with {} of {} nodes reached, partial cost {}",
            self.order.len(),
            self.graph.node_count(),
            self.total_cost
        ))
        .with_total_cost(self.total_cost)
        .with_path_note(self.summary());
        self.pending.finish(step);
    }
}

impl Phased for Prim {
    fn pending(&mut self) -> &mut Pending {
        &mut self.pending
    }

    fn advance(&mut self) {
        if self.order.len() >= self.graph.node_count() {
            self.finish_complete();
            return;
        }

        let mut min = f64::INFINITY;
        let mut best: Option<Candidate> = None;

        for from in &self.order {
            let Some(neighbors) = self.adj.get(from) else {
                continue;
            };
            for n in neighbors {
                if self.visited.contains(&n.id) {
                    continue;
                }
                let Some(edge) = self.graph.find_edge(from, &n.id) else {
                    continue;
                };
                let pair = describe_pair(&self.graph, from, &n.id);

                self.pending.push(
                    Step::new(
                        StepKind::VisitEdge,
                        format!("Checking edge {pair} (weight {})", n.weight),
                    )
                    .with_edge(edge.id()),
                );

                if n.weight < min {
                    min = n.weight;
                    best = Some(Candidate {
                        edge: edge.id().to_string(),
                        from: from.clone(),
                        to: n.id.clone(),
                        weight: n.weight,
                    });
                    self.pending.push(
                        Step::new(
                            StepKind::ProcessNode,
                            format!("New minimum candidate: {pair} (weight {})", n.weight),
                        )
                        .with_node(n.id.clone()),
                    );
                } else {
                    self.pending.push(
                        Step::new(
                            StepKind::SkipEdge,
                            format!(
                                "Skipping {pair} (weight {}): not lighter than {min}",
                                n.weight
                            ),
                        )
                        .with_edge(edge.id()),
                    );
                }
            }
        }

        let Some(chosen) = best else {
            self.finish_disconnected();
            return;
        };

        self.visited.insert(chosen.to.clone());
        self.order.push(chosen.to.clone());
        self.total_cost += chosen.weight;

        let pair = describe_pair(&self.graph, &chosen.from, &chosen.to);
        self.mst_edges.push(format!("{pair} ({})", chosen.weight));

        let step = Step::new(
            StepKind::AddToMst,
            format!(
                "Adding edge {pair} (weight {}) and node {} to the MST",
                chosen.weight,
                self.graph.label_of(&chosen.to)
            ),
        )
        .with_edge(chosen.edge)
        .with_node(chosen.to)
        .with_path_note(format!(
            "Added {pair} (weight {}), total cost {}",
            chosen.weight, self.total_cost
        ));
        self.pending.push(step);
    }
}

impl Iterator for Prim {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        next_phased(self)
    }
}
