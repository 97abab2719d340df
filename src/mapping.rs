//! Edge mapping resolver.
//!
//! Turns raw edges into normalized, display-ready [`Mapping`] records: the
//! contract "the value the source calls `source_output` arrives at the target
//! under `target_key`". The resolver never mutates edges; the recommended
//! mapping is exposed as a [`MappingPatch`] proposal the host applies through
//! its own edge store.

use serde::{Deserialize, Serialize};

use crate::capability;
use crate::graph::{GraphSnapshot, NodeKind};

/// Fallback source output when an edge names none.
const DEFAULT_SOURCE_OUTPUT: &str = "output";

/// Resolved view of one incoming edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub edge_id: String,
    pub source_id: String,
    /// Source display name, falling back to the node id when unnamed.
    pub source_name: String,
    pub source_kind: NodeKind,
    /// Resolved output field on the producer, `"output"` when unspecified.
    pub source_output: String,
    /// Normalized input key on the consumer.
    pub target_key: String,
}

/// Resolved view of one outgoing edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMapping {
    pub edge_id: String,
    pub target_id: String,
    pub target_name: String,
    pub target_kind: NodeKind,
    pub source_output: String,
    pub condition: Option<String>,
}

/// Proposed edge-data patch; the host owns the edge store and applies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingPatch {
    pub source_output: String,
    pub target_input: String,
}

/// Collapse legacy/alternate target-input names to the canonical `"input"`.
///
/// Empty values and anything `"input"`-prefixed (`"input"`, `"input_x"`,
/// `"input-0"`) normalize to `"input"`; everything else passes through.
pub fn normalize_target_key(raw: Option<&str>) -> String {
    match raw {
        Some(key) if !key.is_empty() && !key.starts_with("input") => key.to_string(),
        _ => "input".to_string(),
    }
}

fn resolve_source_output(raw: Option<&str>) -> String {
    match raw {
        Some(output) if !output.is_empty() => output.to_string(),
        _ => DEFAULT_SOURCE_OUTPUT.to_string(),
    }
}

/// Incoming mappings for a node, in edge declaration order.
///
/// A node with no incoming edges yields an empty list — "no
/// connection-sourced variables", not an error.
pub fn incoming_mappings(snapshot: &GraphSnapshot, node_id: &str) -> Vec<Mapping> {
    snapshot
        .incoming_edges(node_id)
        .into_iter()
        .filter_map(|edge| {
            let source = snapshot.node(&edge.source)?;
            Some(Mapping {
                edge_id: edge.id.clone(),
                source_id: source.id.clone(),
                source_name: source.display_name().to_string(),
                source_kind: source.kind,
                source_output: resolve_source_output(edge.data.source_output.as_deref()),
                target_key: normalize_target_key(edge.data.target_input.as_deref()),
            })
        })
        .collect()
}

/// Outgoing mappings for a node, in edge declaration order.
pub fn outgoing_mappings(snapshot: &GraphSnapshot, node_id: &str) -> Vec<OutgoingMapping> {
    snapshot
        .outgoing_edges(node_id)
        .into_iter()
        .filter_map(|edge| {
            let target = snapshot.node(&edge.target)?;
            Some(OutgoingMapping {
                edge_id: edge.id.clone(),
                target_id: target.id.clone(),
                target_name: target.display_name().to_string(),
                target_kind: target.kind,
                source_output: resolve_source_output(edge.data.source_output.as_deref()),
                condition: edge.data.condition.clone(),
            })
        })
        .collect()
}

/// Compute the recommended mapping for an edge as a patch proposal.
///
/// Returns `None` when the edge or either endpoint is missing from the
/// snapshot.
pub fn recommended_patch(snapshot: &GraphSnapshot, edge_id: &str) -> Option<MappingPatch> {
    let edge = snapshot.edges().iter().find(|e| e.id == edge_id)?;
    let source_kind = snapshot.kind_of(&edge.source)?;
    let target_kind = snapshot.kind_of(&edge.target)?;
    let (source_output, target_input) = capability::recommended_mapping(source_kind, target_kind);
    Some(MappingPatch {
        source_output: source_output.to_string(),
        target_input: target_input.to_string(),
    })
}
