use std::collections::{HashMap, HashSet, VecDeque};

use super::snapshot::GraphSnapshot;
use super::types::Edge;

/// 前向可达节点集（含起点自身）
///
/// 广度优先遍历出边，visited 集合去重，图含环也能终止。
/// 起点不在快照中时仍返回 `{start}`。
pub fn descendants(snapshot: &GraphSnapshot, start: &str) -> HashSet<String> {
    descendants_from_edges(start, snapshot.edges())
}

/// 仅持有原始边列表时的前向可达计算（重试路径使用）
pub fn descendants_from_edges(start: &str, edges: &[Edge]) -> HashSet<String> {
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        adjacency
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    visited.insert(start.to_string());
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if let Some(targets) = adjacency.get(current) {
            for &target in targets {
                if visited.insert(target.to_string()) {
                    queue.push_back(target);
                }
            }
        }
    }

    visited
}
