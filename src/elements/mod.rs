mod edge;
mod node;
mod status;

pub use self::edge::{Edge, DEFAULT_WEIGHT};
pub use self::node::Node;
pub use self::status::{EdgeStatus, NodeStatus};
