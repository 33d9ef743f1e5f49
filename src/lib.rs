mod action;
mod algorithms;
mod elements;
mod error;
mod graph;
mod history;
mod playback;
mod reducer;
mod settings;
mod state;
mod store;

pub mod events;

pub use self::action::Action;
pub use self::algorithms::{
    bfs, dfs, kruskal, prim, Algorithm, Bfs, Dfs, Kruskal, Prim, Step, StepKind, StepProducer,
};
pub use self::elements::{Edge, EdgeStatus, Node, NodeStatus, DEFAULT_WEIGHT};
pub use self::error::{GraphError, PlaybackError};
pub use self::graph::{is_valid_weight, Adjacency, Graph, Neighbor};
pub use self::history::History;
pub use self::playback::{Playback, Tick};
pub use self::reducer::reduce;
pub use self::settings::{SettingsHistory, SettingsPlayback};
pub use self::state::AppState;
pub use self::store::Store;
