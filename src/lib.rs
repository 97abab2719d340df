//! # Canvasflow — Workflow Graph Data-Flow & Validation Engine
//!
//! `canvasflow` is the headless core behind a visual workflow editor: a set of
//! pure, synchronous derivations over an immutable graph snapshot, plus the
//! asynchronous replay tracker used for selective re-execution.
//!
//! - **Graph model**: node/edge snapshot with incoming/outgoing queries and
//!   forward-reachability ("descendant") traversal.
//! - **Capability table**: total per-kind input/output field tables and
//!   recommended default mappings.
//! - **Mapping resolver**: normalizes raw edges into display-ready
//!   source-output → target-input contracts.
//! - **Template suggestions**: cursor-aware `{{…}}` token detection, candidate
//!   ranking, and byte-exact insertion.
//! - **Validation**: per-kind blocking errors and advisory warnings with rich
//!   diagnostics, including an unresolved-reference scanner.
//! - **Execution replay**: descendant-based invalidation and sequential
//!   replay of affected steps, locally simulated or backend-delegated.
//!
//! All derivations are pure over a [`GraphSnapshot`]; nothing here performs
//! I/O except the replay path, which streams [`ExecutionEvent`]s over a tokio
//! channel. The host UI owns the canonical graph and the step list.
//!
//! # Quick Start
//!
//! ```rust
//! use canvasflow::{EditorSession, GraphSnapshot, incoming_mappings, validate_node};
//!
//! let nodes = vec![];
//! let edges = vec![];
//! let snapshot = GraphSnapshot::new(&nodes, &edges);
//! let session = EditorSession::new();
//! for node in snapshot.nodes() {
//!     let mappings = incoming_mappings(&snapshot, &node.id);
//!     let report = validate_node(node, &mappings, &session);
//!     assert!(report.is_valid());
//! }
//! ```

pub mod capability;
pub mod error;
pub mod execution;
pub mod graph;
pub mod mapping;
pub mod session;
pub mod suggest;
pub mod validation;

pub use crate::capability::{inputs_for, outputs_for, recommended_mapping, recommended_output};
pub use crate::error::{EngineResult, GraphError};
pub use crate::execution::{
    affected_steps, apply_backend_steps, create_event_channel, reset_affected, retry_via_backend,
    steps_for_run, EventReceiver, EventSender, ExecutionEvent, ExecutionStep, LocalReplay,
    ReplayBackend, SimulatedRunner, StepRunner, StepStatus,
};
pub use crate::graph::{
    descendants, descendants_from_edges, Edge, EdgeData, GraphSnapshot, Node, NodeKind,
};
pub use crate::mapping::{
    incoming_mappings, normalize_target_key, outgoing_mappings, recommended_patch, Mapping,
    MappingPatch, OutgoingMapping,
};
pub use crate::session::{
    ClipboardSink, DefaultKindSchema, EditorSession, FieldDescriptor, FieldType,
    KindSchemaProvider,
};
pub use crate::suggest::{
    apply_suggestion, candidate_pool, insert_token, picker_groups, rank_candidates, suggestions,
    token_context, Candidate, Insertion, PickerGroup, PickerItem, TokenContext, MAX_SUGGESTIONS,
};
pub use crate::validation::{
    validate_graph, validate_node, Diagnostic, DiagnosticLevel, NodeReport,
};
