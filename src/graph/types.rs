use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 节点类型
///
/// 未识别的类型反序列化为 [`NodeKind::Unknown`]，所有按类型查表的函数
/// 对 Unknown 返回安全默认值，绝不 panic。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Input,
    Llm,
    RagRetriever,
    HttpRequest,
    Condition,
    CodeExecutor,
    Output,
    #[serde(other)]
    Unknown,
}

impl NodeKind {
    /// 类型的展示标签
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Input => "input",
            NodeKind::Llm => "llm",
            NodeKind::RagRetriever => "rag_retriever",
            NodeKind::HttpRequest => "http_request",
            NodeKind::Condition => "condition",
            NodeKind::CodeExecutor => "code_executor",
            NodeKind::Output => "output",
            NodeKind::Unknown => "unknown",
        }
    }
}

/// 画布节点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// 节点 ID（画布内唯一）
    pub id: String,

    /// 节点类型
    pub kind: NodeKind,

    /// 节点名称（展示用，可为空）
    #[serde(default)]
    pub name: String,

    /// 节点描述
    #[serde(default)]
    pub description: String,

    /// 节点配置 - 形状由 kind 决定，校验时按类型解析
    #[serde(default)]
    pub config: Value,
}

impl Node {
    /// 展示名 - 名称为空时回退到 ID
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// 边上携带的数据通道声明
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdgeData {
    /// 源节点输出字段名（缺省解析为 "output"）
    #[serde(default)]
    pub source_output: Option<String>,

    /// 目标节点输入字段名（空或 "input" 前缀归一化为 "input"）
    #[serde(default)]
    pub target_input: Option<String>,

    /// 条件表达式（condition 节点使用，由外部执行服务求值）
    #[serde(default)]
    pub condition: Option<String>,
}

/// 画布边 - 单值有向数据通道
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub data: EdgeData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_snake_case_roundtrip() {
        let kind: NodeKind = serde_json::from_value(json!("rag_retriever")).unwrap();
        assert_eq!(kind, NodeKind::RagRetriever);
        assert_eq!(serde_json::to_value(kind).unwrap(), json!("rag_retriever"));
    }

    #[test]
    fn test_unknown_kind_tolerated() {
        let kind: NodeKind = serde_json::from_value(json!("teleport")).unwrap();
        assert_eq!(kind, NodeKind::Unknown);
    }

    #[test]
    fn test_display_name_fallback() {
        let node = Node {
            id: "n1".into(),
            kind: NodeKind::Llm,
            name: String::new(),
            description: String::new(),
            config: json!({}),
        };
        assert_eq!(node.display_name(), "n1");

        let named = Node {
            name: "Summarize".into(),
            ..node
        };
        assert_eq!(named.display_name(), "Summarize");
    }

    #[test]
    fn test_edge_data_defaults() {
        let edge: Edge =
            serde_json::from_value(json!({"id": "e1", "source": "a", "target": "b"})).unwrap();
        assert!(edge.data.source_output.is_none());
        assert!(edge.data.target_input.is_none());
        assert!(edge.data.condition.is_none());
    }
}
