use serde::{Deserialize, Serialize};

/// Visual and semantic classification of a [`super::Node`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeStatus {
    #[default]
    Default,
    Selected,
    Visited,
    Current,
    Start,
    Completed,
}

/// Visual and semantic classification of an [`super::Edge`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeStatus {
    #[default]
    Default,
    Selected,
    Mst,
    Visited,
    Current,
}
