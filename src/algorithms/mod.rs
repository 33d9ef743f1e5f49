//! Graph algorithms expressed as lazy step producers.
//!
//! Every producer owns a snapshot of the graph it was created over and yields
//! [`Step`]s on demand through [`Iterator::next`]. Producers hold no external
//! resources: to cancel one, stop calling `next` and drop it. The last step of
//! every producer is [`StepKind::Done`].

mod bfs;
mod dfs;
mod kruskal;
mod prim;
mod step;

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Graph;

pub use self::bfs::Bfs;
pub use self::dfs::Dfs;
pub use self::kruskal::Kruskal;
pub use self::prim::Prim;
pub use self::step::{Step, StepKind};

/// Algorithms that can be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Prim,
    Kruskal,
    Bfs,
    Dfs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Prim,
        Algorithm::Kruskal,
        Algorithm::Bfs,
        Algorithm::Dfs,
    ];

    /// Whether the algorithm starts from a designated node.
    pub fn requires_start(self) -> bool {
        !matches!(self, Algorithm::Kruskal)
    }

    /// Whether the algorithm produces a total cost.
    pub fn is_mst(self) -> bool {
        matches!(self, Algorithm::Prim | Algorithm::Kruskal)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Prim => "prim",
            Algorithm::Kruskal => "kruskal",
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
        };
        f.write_str(name)
    }
}

/// Creates Prim's MST producer starting at `start`.
pub fn prim(graph: &Graph, start: Option<&str>) -> Prim {
    Prim::new(graph, start)
}

/// Creates Kruskal's MST producer.
pub fn kruskal(graph: &Graph) -> Kruskal {
    Kruskal::new(graph)
}

/// Creates a breadth-first traversal producer starting at `start`.
pub fn bfs(graph: &Graph, start: Option<&str>) -> Bfs {
    Bfs::new(graph, start)
}

/// Creates a depth-first traversal producer starting at `start`.
pub fn dfs(graph: &Graph, start: Option<&str>) -> Dfs {
    Dfs::new(graph, start)
}

/// Any of the four producers behind one type.
#[derive(Debug, Clone)]
pub enum StepProducer {
    Prim(Prim),
    Kruskal(Kruskal),
    Bfs(Bfs),
    Dfs(Dfs),
}

impl StepProducer {
    /// Instantiates the producer for `algorithm`. `start` is ignored by Kruskal.
    pub fn new(algorithm: Algorithm, graph: &Graph, start: Option<&str>) -> Self {
        match algorithm {
            Algorithm::Prim => Self::Prim(prim(graph, start)),
            Algorithm::Kruskal => Self::Kruskal(kruskal(graph)),
            Algorithm::Bfs => Self::Bfs(bfs(graph, start)),
            Algorithm::Dfs => Self::Dfs(dfs(graph, start)),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Prim(_) => Algorithm::Prim,
            Self::Kruskal(_) => Algorithm::Kruskal,
            Self::Bfs(_) => Algorithm::Bfs,
            Self::Dfs(_) => Algorithm::Dfs,
        }
    }
}

impl Iterator for StepProducer {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        match self {
            Self::Prim(p) => p.next(),
            Self::Kruskal(p) => p.next(),
            Self::Bfs(p) => p.next(),
            Self::Dfs(p) => p.next(),
        }
    }
}

/// Steps of the current phase plus a flag telling whether more phases follow.
///
/// Producers advance one phase at a time and drain the buffer between phases,
/// so suspension happens after every single step.
#[derive(Debug, Clone, Default)]
pub(crate) struct Pending {
    steps: VecDeque<Step>,
    finished: bool,
}

impl Pending {
    pub(crate) fn push(&mut self, step: Step) {
        self.steps.push_back(step);
    }

    pub(crate) fn finish(&mut self, step: Step) {
        self.steps.push_back(step);
        self.finished = true;
    }

    pub(crate) fn pop(&mut self) -> Option<Step> {
        self.steps.pop_front()
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Producer that advances one phase at a time into a [`Pending`] buffer.
pub(crate) trait Phased {
    fn pending(&mut self) -> &mut Pending;

    /// Pushes the steps of the next phase. Must push at least one step or finish.
    fn advance(&mut self);
}

/// Drains buffered steps, advancing the producer whenever the buffer runs dry.
pub(crate) fn next_phased<P: Phased>(producer: &mut P) -> Option<Step> {
    loop {
        if let Some(step) = producer.pending().pop() {
            return Some(step);
        }
        if producer.pending().is_finished() {
            return None;
        }
        producer.advance();
    }
}

/// Step emitted when an algorithm needing a start node has none.
pub(crate) fn missing_start(algorithm: Algorithm) -> Step {
    Step::done(format!("{algorithm}: no valid start node selected"))
}

/// Returns the start id if it names an existing node.
pub(crate) fn valid_start<'a>(graph: &Graph, start: Option<&'a str>) -> Option<&'a str> {
    start.filter(|id| graph.contains_node(id))
}

/// `"A – B"` using node labels.
pub(crate) fn describe_pair(graph: &Graph, a: &str, b: &str) -> String {
    format!("{} – {}", graph.label_of(a), graph.label_of(b))
}

/// Labels of `ids` joined by arrows.
pub(crate) fn describe_path<'a>(graph: &Graph, ids: impl IntoIterator<Item = &'a String>) -> String {
    ids.into_iter()
        .map(|id| graph.label_of(id))
        .collect::<Vec<_>>()
        .join(" → ")
}
