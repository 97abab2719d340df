use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use crate::error::GraphError;

use super::types::{Edge, Node, NodeKind};

/// 节点 ID 到 petgraph NodeIndex 的映射
pub type NodeIndexMap = HashMap<String, NodeIndex>;

/// 画布快照 - 每次编辑后重建的不可变图视图
///
/// 端点缺失的边是宿主图存储的结构性问题，这里防御性跳过而不报错，
/// 派生视图照常计算。
#[derive(Debug)]
pub struct GraphSnapshot {
    graph: StableDiGraph<Node, Edge>,
    node_index_map: NodeIndexMap,
    /// 声明顺序的边列表（仅含端点齐全的边）
    edges: Vec<Edge>,
}

impl GraphSnapshot {
    /// 从节点/边列表构建快照
    pub fn new(nodes: &[Node], edges: &[Edge]) -> Self {
        let mut graph = StableDiGraph::<Node, Edge>::new();
        let mut node_index_map: NodeIndexMap = HashMap::new();

        for node in nodes {
            if node_index_map.contains_key(&node.id) {
                tracing::warn!(node_id = %node.id, "duplicate node id in snapshot, keeping first");
                continue;
            }
            let idx = graph.add_node(node.clone());
            node_index_map.insert(node.id.clone(), idx);
        }

        let mut kept_edges = Vec::with_capacity(edges.len());
        for edge in edges {
            let (source_idx, target_idx) = match (
                node_index_map.get(&edge.source),
                node_index_map.get(&edge.target),
            ) {
                (Some(s), Some(t)) => (*s, *t),
                _ => {
                    tracing::warn!(edge_id = %edge.id, "edge references missing node, skipping");
                    continue;
                }
            };
            graph.add_edge(source_idx, target_idx, edge.clone());
            kept_edges.push(edge.clone());
        }

        GraphSnapshot {
            graph,
            node_index_map,
            edges: kept_edges,
        }
    }

    /// 根据 ID 查节点
    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.node_index_map
            .get(node_id)
            .and_then(|idx| self.graph.node_weight(*idx))
    }

    /// 节点类型查询
    pub fn kind_of(&self, node_id: &str) -> Option<NodeKind> {
        self.node(node_id).map(|n| n.kind)
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.node_index_map.contains_key(node_id)
    }

    /// 所有节点（插入顺序）
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// 所有保留的边（声明顺序）
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// 指向 node_id 的边，声明顺序
    pub fn incoming_edges(&self, node_id: &str) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.target == node_id).collect()
    }

    /// 从 node_id 出发的边，声明顺序
    pub fn outgoing_edges(&self, node_id: &str) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.source == node_id).collect()
    }

    /// 节点的所有后继 ID
    pub fn successors(&self, node_id: &str) -> Vec<String> {
        let Some(idx) = self.node_index_map.get(node_id) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(*idx, petgraph::Direction::Outgoing)
            .filter_map(|n| self.graph.node_weight(n).map(|node| node.id.clone()))
            .collect()
    }

    /// 检查是否存在环，返回环上某个节点的 ID
    ///
    /// 遍历本身是环安全的；此检查仅作为可选的结构校验暴露给宿主。
    pub fn find_cycle(&self) -> Option<String> {
        match petgraph::algo::toposort(&self.graph, None) {
            Ok(_) => None,
            Err(cycle) => self
                .graph
                .node_weight(cycle.node_id())
                .map(|n| n.id.clone()),
        }
    }

    /// 环检查的带类型版本
    pub fn ensure_acyclic(&self) -> Result<(), GraphError> {
        match self.find_cycle() {
            None => Ok(()),
            Some(node_id) => Err(GraphError::Cycle(node_id)),
        }
    }
}
