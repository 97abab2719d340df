//! Per-kind validation rules.
//!
//! Every rule accumulates diagnostics; none of them panics or aborts the
//! pass. A config that fails to parse into its typed view is itself a
//! diagnostic, mirroring how unparseable configs halt execution but never
//! editing.

use regex::Regex;
use serde_json::Value;

use crate::graph::{Node, NodeKind};
use crate::mapping::Mapping;
use crate::session::EditorSession;

use super::configs::{
    parse_config, CodeExecutorConfig, ConditionConfig, HttpRequestConfig, LlmConfig, OutputConfig,
    RagRetrieverConfig,
};
use super::types::Diagnostic;

const ALLOWED_HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE"];
const ALLOWED_OUTPUT_FORMATS: &[&str] = &["json", "text", "markdown"];

fn error(code: &str, message: String, node: &Node, field: Option<&str>) -> Diagnostic {
    Diagnostic::error(code, message, Some(node.id.clone()), field.map(String::from))
}

fn warn(code: &str, message: String, node: &Node, field: Option<&str>) -> Diagnostic {
    Diagnostic::warn(code, message, Some(node.id.clone()), field.map(String::from))
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

fn parse_failure(node: &Node, diags: &mut Vec<Diagnostic>) {
    diags.push(error(
        "E216",
        format!("Failed to parse {} node config", node.kind.as_str()),
        node,
        Some("config"),
    ));
}

/// Apply the universal and kind-specific rules for one node.
pub fn apply(node: &Node, mappings: &[Mapping], session: &EditorSession, diags: &mut Vec<Diagnostic>) {
    if node.name.trim().is_empty() {
        diags.push(error("E201", "Node name is required".into(), node, Some("name")));
    }

    validate_overrides(node, diags);

    match node.kind {
        NodeKind::Input | NodeKind::Unknown => {}
        NodeKind::Llm => validate_llm(node, mappings, diags),
        NodeKind::RagRetriever => validate_rag(node, session, diags),
        NodeKind::Condition => validate_condition(node, diags),
        NodeKind::CodeExecutor => validate_code(node, diags),
        NodeKind::HttpRequest => validate_http(node, diags),
        NodeKind::Output => validate_output(node, diags),
    }
}

fn validate_overrides(node: &Node, diags: &mut Vec<Diagnostic>) {
    if let Some(overrides) = node.config.get("overrides") {
        if !overrides.is_null() && !overrides.is_object() {
            diags.push(error(
                "E215",
                "overrides must be a key-value object".into(),
                node,
                Some("overrides"),
            ));
        }
    }
}

fn validate_llm(node: &Node, mappings: &[Mapping], diags: &mut Vec<Diagnostic>) {
    let config: LlmConfig = match parse_config(&node.config) {
        Ok(config) => config,
        Err(_) => return parse_failure(node, diags),
    };

    if let Some(temperature) = config.temperature {
        if !temperature.is_finite() || !(0.0..=2.0).contains(&temperature) {
            diags.push(error(
                "E202",
                format!("temperature must be in [0, 2], got {}", temperature),
                node,
                Some("temperature"),
            ));
        }
    }

    if let Some(max_tokens) = config.max_tokens {
        if !max_tokens.is_finite() || max_tokens.fract() != 0.0 || max_tokens < 1.0 {
            diags.push(error(
                "E203",
                format!("max_tokens must be an integer >= 1, got {}", max_tokens),
                node,
                Some("max_tokens"),
            ));
        }
    }

    if is_blank(&config.system_prompt) && mappings.is_empty() {
        diags.push(warn(
            "W201",
            "system_prompt is empty and no incoming edges supply input; the prompt may be empty at run time".into(),
            node,
            Some("system_prompt"),
        ));
    }
}

fn validate_rag(node: &Node, session: &EditorSession, diags: &mut Vec<Diagnostic>) {
    let config: RagRetrieverConfig = match parse_config(&node.config) {
        Ok(config) => config,
        Err(_) => return parse_failure(node, diags),
    };

    match config.knowledge_base.as_deref() {
        None | Some("") => diags.push(error(
            "E204",
            "knowledge_base is required".into(),
            node,
            Some("knowledge_base"),
        )),
        Some(base) => {
            if !session.knowledge_bases.is_empty()
                && !session.knowledge_bases.iter().any(|b| b == base)
            {
                diags.push(warn(
                    "W202",
                    format!("Unknown knowledge base: {}", base),
                    node,
                    Some("knowledge_base"),
                ));
            }
        }
    }

    if let Some(top_k) = config.top_k {
        if !top_k.is_finite() || top_k.fract() != 0.0 || !(1.0..=50.0).contains(&top_k) {
            diags.push(error(
                "E205",
                format!("top_k must be an integer in [1, 50], got {}", top_k),
                node,
                Some("top_k"),
            ));
        }
    }
}

fn validate_condition(node: &Node, diags: &mut Vec<Diagnostic>) {
    let config: ConditionConfig = match parse_config(&node.config) {
        Ok(config) => config,
        Err(_) => return parse_failure(node, diags),
    };

    if is_blank(&config.field_path) {
        diags.push(error(
            "E206",
            "field_path is required".into(),
            node,
            Some("field_path"),
        ));
    }

    match config.condition_type.as_deref() {
        None | Some("") => diags.push(error(
            "E207",
            "condition_type is required".into(),
            node,
            Some("condition_type"),
        )),
        // truthy is the only type allowed to omit a comparison value
        Some(condition_type) if condition_type != "truthy" => {
            let blank = match &config.condition_value {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            };
            if blank {
                diags.push(warn(
                    "W203",
                    format!("condition_value is blank for condition_type {}", condition_type),
                    node,
                    Some("condition_value"),
                ));
            }
        }
        Some(_) => {}
    }
}

struct NumericLimit {
    field: &'static str,
    min: f64,
    max: f64,
}

const SANDBOX_LIMITS: &[NumericLimit] = &[
    NumericLimit { field: "timeout_sec", min: 0.1, max: 30.0 },
    NumericLimit { field: "max_memory_mb", min: 16.0, max: 4096.0 },
    NumericLimit { field: "max_stdout_chars", min: 1000.0, max: 200_000.0 },
    NumericLimit { field: "max_input_bytes", min: 10_000.0, max: 50_000_000.0 },
    NumericLimit { field: "max_result_bytes", min: 10_000.0, max: 50_000_000.0 },
];

fn validate_code(node: &Node, diags: &mut Vec<Diagnostic>) {
    let config: CodeExecutorConfig = match parse_config(&node.config) {
        Ok(config) => config,
        Err(_) => return parse_failure(node, diags),
    };

    match config.code.as_deref() {
        None | Some("") => diags.push(error("E208", "code is empty".into(), node, Some("code"))),
        Some(code) => {
            let assigns_result = Regex::new(r"\bresult\s*=($|[^=])").unwrap();
            if !assigns_result.is_match(code) {
                diags.push(warn(
                    "W204",
                    "code never assigns a variable named result".into(),
                    node,
                    Some("code"),
                ));
            }
            if Regex::new(r"\bimport\b").unwrap().is_match(code) {
                diags.push(warn(
                    "W205",
                    "import statements are forbidden in the sandbox".into(),
                    node,
                    Some("code"),
                ));
            }
            if Regex::new(r"__\w+__").unwrap().is_match(code) {
                diags.push(warn(
                    "W206",
                    "dunder attribute access is forbidden in the sandbox".into(),
                    node,
                    Some("code"),
                ));
            }
        }
    }

    let values = [
        config.timeout_sec,
        config.max_memory_mb,
        config.max_stdout_chars,
        config.max_input_bytes,
        config.max_result_bytes,
    ];
    for (limit, value) in SANDBOX_LIMITS.iter().zip(values) {
        if let Some(v) = value {
            if !v.is_finite() || v < limit.min || v > limit.max {
                diags.push(error(
                    "E209",
                    format!(
                        "{} must be in [{}, {}], got {}",
                        limit.field, limit.min, limit.max, v
                    ),
                    node,
                    Some(limit.field),
                ));
            }
        }
    }
}

fn validate_http(node: &Node, diags: &mut Vec<Diagnostic>) {
    let config: HttpRequestConfig = match parse_config(&node.config) {
        Ok(config) => config,
        Err(_) => return parse_failure(node, diags),
    };

    if is_blank(&config.url) {
        diags.push(error("E210", "url is empty".into(), node, Some("url")));
    }

    if let Some(method) = config.method.as_deref() {
        let normalized = method.to_ascii_uppercase();
        if !ALLOWED_HTTP_METHODS.contains(&normalized.as_str()) {
            diags.push(error(
                "E211",
                format!("Unsupported HTTP method: {}", method),
                node,
                Some("method"),
            ));
        }
    }

    if let Some(timeout) = config.timeout {
        if !timeout.is_finite() || timeout <= 0.0 {
            diags.push(error(
                "E212",
                format!("timeout must be a positive number, got {}", timeout),
                node,
                Some("timeout"),
            ));
        }
    }

    for (field, value) in [("headers", &config.headers), ("params", &config.params)] {
        if let Some(v) = value {
            if !v.is_null() && !v.is_object() {
                diags.push(error(
                    "E213",
                    format!("{} must be a key-value object", field),
                    node,
                    Some(field),
                ));
            }
        }
    }
}

fn validate_output(node: &Node, diags: &mut Vec<Diagnostic>) {
    let config: OutputConfig = match parse_config(&node.config) {
        Ok(config) => config,
        Err(_) => return parse_failure(node, diags),
    };

    if let Some(format) = config.format.as_deref() {
        if !ALLOWED_OUTPUT_FORMATS.contains(&format) {
            diags.push(error(
                "E214",
                format!("Unsupported output format: {}", format),
                node,
                Some("format"),
            ));
        }
    }

    let has_template = config.template.as_deref().map_or(false, |t| !t.is_empty());
    let template_blank = config
        .template
        .as_deref()
        .map_or(false, |t| !t.is_empty() && t.trim().is_empty());

    if !is_blank(&config.select_path) && has_template && !template_blank {
        diags.push(warn(
            "W207",
            "template takes precedence over select_path".into(),
            node,
            Some("template"),
        ));
    }

    if template_blank {
        diags.push(warn(
            "W208",
            "template is only whitespace and yields empty output".into(),
            node,
            Some("template"),
        ));
    } else if let Some(template) = config.template.as_deref() {
        if !template.is_empty() && !template.contains('{') {
            diags.push(warn(
                "W209",
                "template has no {{ }} or { } markers; raw input_data will be emitted unmodified"
                    .into(),
                node,
                Some("template"),
            ));
        }
    }
}
