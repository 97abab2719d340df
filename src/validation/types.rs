//! Validation diagnostic types.

use serde::{Deserialize, Serialize};

/// Severity level of a validation diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub code: String,
    pub message: String,
    pub node_id: Option<String>,
    pub field_path: Option<String>,
}

impl Diagnostic {
    pub fn error(code: &str, message: String, node_id: Option<String>, field_path: Option<String>) -> Self {
        Diagnostic {
            level: DiagnosticLevel::Error,
            code: code.to_string(),
            message,
            node_id,
            field_path,
        }
    }

    pub fn warn(code: &str, message: String, node_id: Option<String>, field_path: Option<String>) -> Self {
        Diagnostic {
            level: DiagnosticLevel::Warning,
            code: code.to_string(),
            message,
            node_id,
            field_path,
        }
    }
}

/// Per-node validation result. Errors gate a "run" action at the host's
/// discretion; they never remove the node from the graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl NodeReport {
    /// Return only the error-level diagnostics.
    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Error)
            .collect()
    }

    /// Return only the warning-level diagnostics.
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.diagnostics
            .iter()
            .all(|d| d.level != DiagnosticLevel::Error)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_partitions_levels() {
        let report = NodeReport {
            diagnostics: vec![
                Diagnostic::error("E201", "name required".into(), Some("n1".into()), None),
                Diagnostic::warn("W204", "no result".into(), Some("n1".into()), Some("code".into())),
            ],
        };
        assert_eq!(report.errors().len(), 1);
        assert_eq!(report.warnings().len(), 1);
        assert!(!report.is_valid());
        assert!(report.has_code("W204"));
        assert!(!report.has_code("E999"));
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let report = NodeReport {
            diagnostics: vec![Diagnostic::warn("W201", "maybe empty".into(), None, None)],
        };
        assert!(report.is_valid());
    }

    #[test]
    fn test_serde_roundtrip() {
        let diag = Diagnostic::error("E202", "out of range".into(), Some("n1".into()), Some("temperature".into()));
        let json = serde_json::to_string(&diag).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back.code, "E202");
        assert_eq!(back.level, DiagnosticLevel::Error);
    }
}
