use serde::{Deserialize, Serialize};

use super::EdgeStatus;

pub const DEFAULT_WEIGHT: f64 = 1.;

/// Stores properties of an undirected weighted edge.
///
/// `from` and `to` carry no direction: `(a, b)` and `(b, a)` denote the same edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    id: String,
    from: String,
    to: String,

    #[serde(default = "default_weight")]
    weight: f64,

    #[serde(default)]
    status: EdgeStatus,
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            weight,
            status: EdgeStatus::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    pub fn status(&self) -> EdgeStatus {
        self.status
    }

    pub fn set_status(&mut self, status: EdgeStatus) {
        self.status = status;
    }

    pub fn with_status(mut self, status: EdgeStatus) -> Self {
        self.status = status;
        self
    }

    /// Checks whether the edge touches `node`.
    pub fn is_incident(&self, node: &str) -> bool {
        self.from == node || self.to == node
    }

    /// Checks whether the edge joins `a` and `b` in either endpoint order.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// Returns the endpoint opposite to `node`, or `None` if `node` is not an endpoint.
    pub fn opposite(&self, node: &str) -> Option<&str> {
        if self.from == node {
            Some(&self.to)
        } else if self.to == node {
            Some(&self.from)
        } else {
            None
        }
    }
}
