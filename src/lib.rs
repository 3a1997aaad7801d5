//! swiftuice - SwiftUI cause-and-effect trace analysis
//!
//! Turns Instruments SwiftUI exports into a causal graph
//! (trigger -> state change -> view update), detects rendering
//! anti-patterns, correlates them with Swift sources and renders
//! reports for humans and AI agents.

pub mod cli;
pub mod config;
pub mod correlation;
pub mod detectors;
pub mod fixes;
pub mod graph;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod report;
pub mod reporters;
pub mod scoring;
pub mod xctrace;
