//! Typed per-kind config views.
//!
//! Node configs are stored as untyped JSON (the canvas mutates them
//! field-by-field); validation parses them into these structs so every rule
//! pattern-matches on typed fields instead of poking at `Value`s. All fields
//! are optional so partial configs parse; a config that is not an object at
//! all is a parse failure the rules report as a diagnostic.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub max_tokens: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RagRetrieverConfig {
    #[serde(default)]
    pub knowledge_base: Option<String>,
    #[serde(default)]
    pub top_k: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionConfig {
    #[serde(default)]
    pub field_path: Option<String>,
    #[serde(default)]
    pub condition_type: Option<String>,
    #[serde(default)]
    pub condition_value: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodeExecutorConfig {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub timeout_sec: Option<f64>,
    #[serde(default)]
    pub max_memory_mb: Option<f64>,
    #[serde(default)]
    pub max_stdout_chars: Option<f64>,
    #[serde(default)]
    pub max_input_bytes: Option<f64>,
    #[serde(default)]
    pub max_result_bytes: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpRequestConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub timeout: Option<f64>,
    #[serde(default)]
    pub headers: Option<Value>,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub select_path: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
}

/// Parse a node config into a typed view. Null/absent configs parse to the
/// default (everything unset); a malformed config yields the serde error.
pub fn parse_config<T: DeserializeOwned + Default>(config: &Value) -> Result<T, serde_json::Error> {
    if config.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(config.clone())
}
