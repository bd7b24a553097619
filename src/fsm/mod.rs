//! The state machine and its registry.
//!
//! # Key Concepts
//!
//! - **Nodes**: one per state name, holding the state and its local transitions
//! - **Any-state transitions**: global interrupts checked before local ones
//! - **Phases**: the graph is wired first, then sealed by `start`
//!
//! Everything here is single-threaded and frame-driven: the owning controller
//! calls `update` once per frame, `fixed_update` once per fixed tick, and
//! `dispatch_event` from its timeline callbacks.

mod config;
mod error;
mod machine;
mod node;
mod transition;

pub use config::{ConfigError, MachineConfig};
pub use error::MachineError;
pub use machine::{StateMachine, StepResult};
pub use node::{NodeId, StateNode};
pub use transition::Transition;
