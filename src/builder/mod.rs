//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder that registers states, wires
//! transitions by name, optionally validates the graph, and starts the
//! machine in one expression.

pub mod error;
pub mod machine;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
