//! 画布图模型 - 不可变快照与前向可达遍历

mod snapshot;
mod traversal;
mod types;

pub use snapshot::{GraphSnapshot, NodeIndexMap};
pub use traversal::{descendants, descendants_from_edges};
pub use types::{Edge, EdgeData, Node, NodeKind};
