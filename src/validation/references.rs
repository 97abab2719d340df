//! Undeclared-reference scanner.
//!
//! Collects every `{{expr}}` occurrence across a node's template-bearing
//! config fields (per the kind schema) and its `overrides` values, and
//! classifies each root identifier against the reserved runtime globals and
//! the node's resolved incoming target keys.

use regex::Regex;
use serde_json::Value;

use crate::graph::Node;
use crate::mapping::Mapping;
use crate::session::{FieldDescriptor, FieldType};

/// Runtime globals that are always resolvable, connection or not.
pub const RESERVED_ROOTS: &[&str] = &[
    "input",
    "prompt",
    "query",
    "text",
    "data",
    "tenant_id",
    "user_id",
];

/// One template reference whose root no known variable supplies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub expr: String,
    pub root: String,
    /// Config field the expression was found in.
    pub field: String,
}

/// Extract every `{{expr}}` payload from a text, trimmed.
pub fn extract_exprs(text: &str) -> Vec<String> {
    let re = Regex::new(r"\{\{([^{}]+)\}\}").unwrap();
    re.captures_iter(text)
        .map(|cap| cap[1].trim().to_string())
        .filter(|expr| !expr.is_empty())
        .collect()
}

/// Root identifier of an expression: the segment before the first `.`, `[`,
/// or whitespace.
pub fn expr_root(expr: &str) -> &str {
    let trimmed = expr.trim();
    trimmed
        .split(|c: char| c == '.' || c == '[' || c.is_whitespace())
        .next()
        .unwrap_or(trimmed)
}

fn is_template_bearing(field: &FieldDescriptor) -> bool {
    field.field_type == FieldType::Template
}

/// Scan a node's template-bearing fields and overrides for references whose
/// root is neither a reserved global nor an incoming target key.
pub fn scan_node(
    node: &Node,
    mappings: &[Mapping],
    fields: &[FieldDescriptor],
) -> Vec<UnresolvedReference> {
    let mut texts: Vec<(String, String)> = Vec::new();

    if let Some(config) = node.config.as_object() {
        for field in fields.iter().filter(|f| is_template_bearing(f)) {
            if let Some(Value::String(text)) = config.get(&field.key) {
                texts.push((field.key.clone(), text.clone()));
            }
        }

        if let Some(Value::Object(overrides)) = config.get("overrides") {
            for (key, value) in overrides {
                if let Value::String(text) = value {
                    texts.push((format!("overrides.{}", key), text.clone()));
                }
            }
        }
    }

    let mut unresolved = Vec::new();
    for (field, text) in texts {
        for expr in extract_exprs(&text) {
            let root = expr_root(&expr).to_string();
            let reserved = RESERVED_ROOTS.contains(&root.as_str());
            let mapped = mappings.iter().any(|m| m.target_key == root);
            if !reserved && !mapped {
                unresolved.push(UnresolvedReference {
                    expr,
                    root,
                    field: field.clone(),
                });
            }
        }
    }
    unresolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;
    use crate::session::{DefaultKindSchema, KindSchemaProvider};
    use serde_json::json;

    fn llm_node(config: Value) -> Node {
        Node {
            id: "llm1".into(),
            kind: NodeKind::Llm,
            name: "Answer".into(),
            description: String::new(),
            config,
        }
    }

    fn mapping(target_key: &str) -> Mapping {
        Mapping {
            edge_id: "e1".into(),
            source_id: "rag1".into(),
            source_name: "Retriever".into(),
            source_kind: NodeKind::RagRetriever,
            source_output: "documents".into(),
            target_key: target_key.into(),
        }
    }

    #[test]
    fn test_extract_exprs() {
        let exprs = extract_exprs("Hi {{documents}} and {{ data.x }}, not {single}");
        assert_eq!(exprs, vec!["documents", "data.x"]);
    }

    #[test]
    fn test_expr_root() {
        assert_eq!(expr_root("documents[0].text"), "documents");
        assert_eq!(expr_root("data.x"), "data");
        assert_eq!(expr_root("meta usage"), "meta");
        assert_eq!(expr_root("plain"), "plain");
    }

    #[test]
    fn test_unknown_root_flagged_without_mapping() {
        let node = llm_node(json!({"system_prompt": "Hi {{documents}}"}));
        let fields = DefaultKindSchema.fields(NodeKind::Llm);
        let unresolved = scan_node(&node, &[], &fields);
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].root, "documents");
        assert_eq!(unresolved[0].field, "system_prompt");
    }

    #[test]
    fn test_mapped_root_not_flagged() {
        let node = llm_node(json!({"system_prompt": "Hi {{documents}}"}));
        let fields = DefaultKindSchema.fields(NodeKind::Llm);
        let unresolved = scan_node(&node, &[mapping("documents")], &fields);
        assert!(unresolved.is_empty());
    }

    #[test]
    fn test_reserved_roots_not_flagged() {
        let node = llm_node(json!({
            "system_prompt": "{{input}} {{query}} {{data.documents}} {{tenant_id}}"
        }));
        let fields = DefaultKindSchema.fields(NodeKind::Llm);
        assert!(scan_node(&node, &[], &fields).is_empty());
    }

    #[test]
    fn test_overrides_values_scanned() {
        let node = llm_node(json!({"overrides": {"context": "{{mystery}}"}}));
        let fields = DefaultKindSchema.fields(NodeKind::Llm);
        let unresolved = scan_node(&node, &[], &fields);
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].field, "overrides.context");
    }

    #[test]
    fn test_non_template_fields_ignored() {
        // field_path is a textarea, not a template field
        let node = Node {
            id: "c1".into(),
            kind: NodeKind::Condition,
            name: "Branch".into(),
            description: String::new(),
            config: json!({"field_path": "{{nope}}"}),
        };
        let fields = DefaultKindSchema.fields(NodeKind::Condition);
        assert!(scan_node(&node, &[], &fields).is_empty());
    }
}
