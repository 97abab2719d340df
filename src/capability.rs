//! Kind capability table.
//!
//! Static, total lookups for the declared input/output field sets of each
//! node kind, and the recommended default mapping for a (source, target)
//! kind pair. Every other derivation consults these tables; they return a
//! safe default for [`NodeKind::Unknown`] and never panic.

use crate::graph::NodeKind;

/// Declared output field names for a node kind.
pub fn outputs_for(kind: NodeKind) -> &'static [&'static str] {
    match kind {
        NodeKind::Input => &["input", "prompt", "query", "text"],
        NodeKind::Llm => &["content", "metadata"],
        NodeKind::RagRetriever => &["documents", "query", "total_results"],
        NodeKind::HttpRequest => &["response_data", "status_code", "headers"],
        NodeKind::Condition => &["result", "matched", "value"],
        NodeKind::CodeExecutor => &["result", "stdout"],
        NodeKind::Output => &[],
        NodeKind::Unknown => &["output"],
    }
}

/// Declared input field names for a node kind. `Input` is source-only.
pub fn inputs_for(kind: NodeKind) -> &'static [&'static str] {
    match kind {
        NodeKind::Input => &[],
        NodeKind::Llm => &["input", "prompt", "context"],
        NodeKind::RagRetriever => &["query", "input"],
        NodeKind::HttpRequest => &["input", "params", "body"],
        NodeKind::Condition => &["input", "value"],
        NodeKind::CodeExecutor => &["input", "data"],
        NodeKind::Output => &["input", "data"],
        NodeKind::Unknown => &["input"],
    }
}

/// The single best output field to expose when an edge names none.
pub fn recommended_output(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Input => "input",
        NodeKind::Llm => "content",
        NodeKind::RagRetriever => "documents",
        NodeKind::HttpRequest => "response_data",
        NodeKind::Condition => "result",
        NodeKind::CodeExecutor => "result",
        NodeKind::Output | NodeKind::Unknown => "output",
    }
}

/// Preference order when picking a default target input, mirroring the
/// executor's alias-resolution priority.
const TARGET_INPUT_PRIORITY: &[&str] = &["input", "data", "prompt", "text", "query"];

/// Recommended `(source_output, target_input)` pair for a new edge between
/// two kinds.
pub fn recommended_mapping(source_kind: NodeKind, target_kind: NodeKind) -> (&'static str, &'static str) {
    let source_output = recommended_output(source_kind);
    let inputs = inputs_for(target_kind);
    let target_input = TARGET_INPUT_PRIORITY
        .iter()
        .find(|p| inputs.contains(*p))
        .copied()
        .or_else(|| inputs.first().copied())
        .unwrap_or("input");
    (source_output, target_input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_total() {
        let kinds = [
            NodeKind::Input,
            NodeKind::Llm,
            NodeKind::RagRetriever,
            NodeKind::HttpRequest,
            NodeKind::Condition,
            NodeKind::CodeExecutor,
            NodeKind::Output,
            NodeKind::Unknown,
        ];
        for kind in kinds {
            let _ = outputs_for(kind);
            let _ = inputs_for(kind);
            assert!(!recommended_output(kind).is_empty());
        }
    }

    #[test]
    fn test_declared_outputs() {
        assert_eq!(outputs_for(NodeKind::Llm), &["content", "metadata"]);
        assert_eq!(
            outputs_for(NodeKind::RagRetriever),
            &["documents", "query", "total_results"]
        );
        assert!(outputs_for(NodeKind::Output).is_empty());
    }

    #[test]
    fn test_input_is_source_only() {
        assert!(inputs_for(NodeKind::Input).is_empty());
    }

    #[test]
    fn test_recommended_output() {
        assert_eq!(recommended_output(NodeKind::Llm), "content");
        assert_eq!(recommended_output(NodeKind::RagRetriever), "documents");
        assert_eq!(recommended_output(NodeKind::Unknown), "output");
    }

    #[test]
    fn test_recommended_mapping_pairs() {
        assert_eq!(
            recommended_mapping(NodeKind::Llm, NodeKind::Output),
            ("content", "input")
        );
        assert_eq!(
            recommended_mapping(NodeKind::RagRetriever, NodeKind::Llm),
            ("documents", "input")
        );
        // Unknown kinds still yield a usable pair.
        assert_eq!(
            recommended_mapping(NodeKind::Unknown, NodeKind::Unknown),
            ("output", "input")
        );
    }
}
