//! Cause-effect graph
//!
//! Triggers (causes) lead to state mutations, which lead to view updates.
//! The graph is built by the parsers and read by the detectors, the source
//! correlator and the report assembler.

pub mod classify;
pub mod store;
pub mod store_models;
pub mod traversal;

pub use classify::{classify, classify_label, is_generic_object_label, is_timer_label};
pub use store::CauseEffectGraph;
pub use store_models::{Edge, Node, NodeKind};
pub use traversal::{longest_simple_path, reachable_from};
