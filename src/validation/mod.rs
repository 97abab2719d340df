//! Node validation engine.
//!
//! Per-kind blocking errors and advisory warnings, plus a cross-cutting
//! scanner for template references no upstream edge or runtime global
//! supplies. Validation never fails: an invalid node accumulates diagnostics
//! and stays on the canvas — errors gate execution, not editing.

mod configs;
mod references;
mod rules;
mod types;

pub use references::{expr_root, extract_exprs, scan_node, UnresolvedReference, RESERVED_ROOTS};
pub use types::{Diagnostic, DiagnosticLevel, NodeReport};

use crate::graph::{GraphSnapshot, Node};
use crate::mapping::Mapping;
use crate::session::EditorSession;

/// Validate one node against its resolved incoming mappings.
pub fn validate_node(node: &Node, mappings: &[Mapping], session: &EditorSession) -> NodeReport {
    let mut diagnostics = Vec::new();

    rules::apply(node, mappings, session, &mut diagnostics);

    let fields = session.fields_for(node.kind);
    for reference in references::scan_node(node, mappings, &fields) {
        diagnostics.push(Diagnostic::warn(
            "W301",
            format!("Referenced variable may not exist: {{{{{}}}}}", reference.expr),
            Some(node.id.clone()),
            Some(reference.field),
        ));
    }

    NodeReport { diagnostics }
}

/// Graph-level structural diagnostics (currently: cycle detection).
pub fn validate_graph(snapshot: &GraphSnapshot) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    if let Some(node_id) = snapshot.find_cycle() {
        diagnostics.push(Diagnostic::error(
            "E101",
            format!("Cycle detected in graph at node: {}", node_id),
            Some(node_id),
            None,
        ));
    }
    diagnostics
}
