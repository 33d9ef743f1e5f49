use std::collections::{HashMap, HashSet, VecDeque};

use super::{
    describe_pair, describe_path, missing_start, next_phased, valid_start, Algorithm, Pending,
    Phased, Step, StepKind,
};
use crate::{Adjacency, Graph};

/// Breadth-first traversal as a lazy step sequence. One phase processes one
/// dequeued node.
#[derive(Debug, Clone)]
pub struct Bfs {
    graph: Graph,
    adj: Adjacency,

    visited: HashSet<String>,
    /// Discovery order.
    order: Vec<String>,
    /// Discovery parent of every visited node except the start.
    parent: HashMap<String, String>,
    queue: VecDeque<String>,

    pending: Pending,
}

impl Bfs {
    pub fn new(graph: &Graph, start: Option<&str>) -> Self {
        let mut bfs = Self {
            graph: graph.clone(),
            adj: graph.adjacency(),
            visited: HashSet::new(),
            order: Vec::new(),
            parent: HashMap::new(),
            queue: VecDeque::new(),
            pending: Pending::default(),
        };

        let Some(start) = valid_start(graph, start) else {
            bfs.pending.finish(missing_start(Algorithm::Bfs));
            return bfs;
        };

        bfs.visited.insert(start.to_string());
        bfs.order.push(start.to_string());
        bfs.queue.push_back(start.to_string());

        let label = graph.label_of(start);
        bfs.pending.push(
            Step::new(StepKind::VisitNode, format!("Starting BFS at node {label}"))
                .with_node(start)
                .with_path_note(format!("Start at {label}")),
        );

        bfs
    }

    /// Labels from the start node down to `id` following discovery parents.
    fn path_to(&self, id: &str) -> String {
        let mut path = vec![id.to_string()];
        let mut cur = id;
        while let Some(p) = self.parent.get(cur) {
            path.push(p.clone());
            cur = p.as_str();
        }
        path.reverse();
        describe_path(&self.graph, &path)
    }
}

impl Phased for Bfs {
    fn pending(&mut self) -> &mut Pending {
        &mut self.pending
    }

    fn advance(&mut self) {
        let Some(current) = self.queue.pop_front() else {
            let step = Step::done(format!("BFS complete: visited {} nodes", self.order.len()))
                .with_path_note(format!(
                    "BFS order: {}",
                    describe_path(&self.graph, &self.order)
                ));
            self.pending.finish(step);
            return;
        };

        let label = self.graph.label_of(&current).to_string();
        self.pending.push(
            Step::new(StepKind::ProcessNode, format!("Processing node {label}"))
                .with_node(current.clone()),
        );

        let neighbors = self.adj.get(&current).cloned().unwrap_or_default();
        for n in neighbors {
            let edge = self.graph.find_edge(&current, &n.id).map(|e| e.id().to_string());
            let pair = describe_pair(&self.graph, &current, &n.id);

            if let Some(edge) = &edge {
                self.pending.push(
                    Step::new(StepKind::VisitEdge, format!("Checking edge {pair}"))
                        .with_edge(edge.clone()),
                );
            }

            if self.visited.insert(n.id.clone()) {
                self.order.push(n.id.clone());
                self.parent.insert(n.id.clone(), current.clone());
                self.queue.push_back(n.id.clone());

                let step = Step::new(
                    StepKind::TraverseEdge,
                    format!(
                        "Discovered node {} from {label}",
                        self.graph.label_of(&n.id)
                    ),
                )
                .with_edge_opt(edge.as_deref())
                .with_node(n.id.clone())
                .with_path_note(format!("Reached {}", self.path_to(&n.id)));
                self.pending.push(step);
            } else {
                self.pending.push(
                    Step::new(
                        StepKind::SkipEdge,
                        format!(
                            "Node {} was already visited",
                            self.graph.label_of(&n.id)
                        ),
                    )
                    .with_edge_opt(edge.as_deref()),
                );
            }
        }

        self.pending.push(
            Step::new(
                StepKind::CompleteNode,
                format!("All neighbors of node {label} explored"),
            )
            .with_node(current),
        );
    }
}

impl Iterator for Bfs {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        next_phased(self)
    }
}
