//! Editor session context.
//!
//! All host-supplied state the derivations need — the kind schema provider,
//! available knowledge bases and chat models, and the optional clipboard
//! sink — rides in an explicit [`EditorSession`] passed to the engine, never
//! in ambient globals.

use serde::{Deserialize, Serialize};

use crate::graph::NodeKind;

/// Field widget type as declared by the kind schema provider. The engine
/// only inspects keys and types (template-bearing detection); it renders
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Select,
    Number,
    Textarea,
    Template,
    JsonObject,
    Code,
}

/// One config-field descriptor of a node kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub key: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub group: Option<String>,
}

impl FieldDescriptor {
    pub fn new(key: &str, field_type: FieldType) -> Self {
        FieldDescriptor {
            key: key.into(),
            field_type,
            group: None,
        }
    }
}

/// Maps a node kind to its ordered config-field descriptors.
pub trait KindSchemaProvider: Send + Sync {
    fn fields(&self, kind: NodeKind) -> Vec<FieldDescriptor>;
}

/// Best-effort clipboard hook for suggestion acceptance.
pub trait ClipboardSink: Send + Sync {
    fn copy(&self, text: &str) -> Result<(), String>;
}

/// Built-in schema for the seven canvas node kinds.
#[derive(Debug, Default)]
pub struct DefaultKindSchema;

impl KindSchemaProvider for DefaultKindSchema {
    fn fields(&self, kind: NodeKind) -> Vec<FieldDescriptor> {
        use FieldType::*;
        match kind {
            NodeKind::Input => vec![],
            NodeKind::Llm => vec![
                FieldDescriptor::new("model", Select),
                FieldDescriptor::new("system_prompt", Template),
                FieldDescriptor::new("temperature", Number),
                FieldDescriptor::new("max_tokens", Number),
                FieldDescriptor::new("overrides", JsonObject),
            ],
            NodeKind::RagRetriever => vec![
                FieldDescriptor::new("knowledge_base", Select),
                FieldDescriptor::new("top_k", Number),
            ],
            NodeKind::HttpRequest => vec![
                FieldDescriptor::new("url", Template),
                FieldDescriptor::new("method", Select),
                FieldDescriptor::new("timeout", Number),
                FieldDescriptor::new("headers", JsonObject),
                FieldDescriptor::new("params", JsonObject),
            ],
            NodeKind::Condition => vec![
                FieldDescriptor::new("field_path", Textarea),
                FieldDescriptor::new("condition_type", Select),
                FieldDescriptor::new("condition_value", Textarea),
            ],
            NodeKind::CodeExecutor => vec![
                FieldDescriptor::new("code", Code),
                FieldDescriptor::new("timeout_sec", Number),
                FieldDescriptor::new("max_memory_mb", Number),
                FieldDescriptor::new("max_stdout_chars", Number),
                FieldDescriptor::new("max_input_bytes", Number),
                FieldDescriptor::new("max_result_bytes", Number),
            ],
            NodeKind::Output => vec![
                FieldDescriptor::new("format", Select),
                FieldDescriptor::new("select_path", Textarea),
                FieldDescriptor::new("template", Template),
            ],
            NodeKind::Unknown => vec![],
        }
    }
}

/// Explicit editor context threaded through the derivations.
pub struct EditorSession {
    pub workflow_id: Option<String>,
    /// Available knowledge bases (select options + rag validation).
    pub knowledge_bases: Vec<String>,
    /// Available chat models (select options only).
    pub chat_models: Vec<String>,
    kind_schema: Box<dyn KindSchemaProvider>,
    clipboard: Option<Box<dyn ClipboardSink>>,
}

impl EditorSession {
    pub fn new() -> Self {
        EditorSession {
            workflow_id: None,
            knowledge_bases: Vec::new(),
            chat_models: Vec::new(),
            kind_schema: Box::new(DefaultKindSchema),
            clipboard: None,
        }
    }

    pub fn with_kind_schema(mut self, provider: Box<dyn KindSchemaProvider>) -> Self {
        self.kind_schema = provider;
        self
    }

    pub fn with_knowledge_bases(mut self, bases: Vec<String>) -> Self {
        self.knowledge_bases = bases;
        self
    }

    pub fn with_chat_models(mut self, models: Vec<String>) -> Self {
        self.chat_models = models;
        self
    }

    pub fn with_clipboard(mut self, sink: Box<dyn ClipboardSink>) -> Self {
        self.clipboard = Some(sink);
        self
    }

    pub fn fields_for(&self, kind: NodeKind) -> Vec<FieldDescriptor> {
        self.kind_schema.fields(kind)
    }

    /// Best-effort clipboard copy; failures are swallowed.
    pub fn copy_token(&self, token: &str) {
        if let Some(sink) = &self.clipboard {
            if let Err(err) = sink.copy(token) {
                tracing::debug!(%err, "clipboard copy failed");
            }
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_default_schema_template_fields() {
        let schema = DefaultKindSchema;
        let llm = schema.fields(NodeKind::Llm);
        assert!(llm
            .iter()
            .any(|f| f.key == "system_prompt" && f.field_type == FieldType::Template));

        let http = schema.fields(NodeKind::HttpRequest);
        assert!(http
            .iter()
            .any(|f| f.key == "url" && f.field_type == FieldType::Template));

        assert!(schema.fields(NodeKind::Input).is_empty());
        assert!(schema.fields(NodeKind::Unknown).is_empty());
    }

    struct RecordingSink(Arc<Mutex<Vec<String>>>);

    impl ClipboardSink for RecordingSink {
        fn copy(&self, text: &str) -> Result<(), String> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct FailingSink;

    impl ClipboardSink for FailingSink {
        fn copy(&self, _text: &str) -> Result<(), String> {
            Err("denied".into())
        }
    }

    #[test]
    fn test_copy_token_best_effort() {
        let copied = Arc::new(Mutex::new(Vec::new()));
        let session =
            EditorSession::new().with_clipboard(Box::new(RecordingSink(copied.clone())));
        session.copy_token("{{documents}}");
        assert_eq!(copied.lock().unwrap().as_slice(), ["{{documents}}"]);

        // Failure is swallowed; no session without a sink panics either.
        let failing = EditorSession::new().with_clipboard(Box::new(FailingSink));
        failing.copy_token("{{x}}");
        EditorSession::new().copy_token("{{x}}");
    }
}
