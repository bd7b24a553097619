//! Core building blocks shared by every machine.
//!
//! This module contains the pieces a machine is generic over or records:
//! - The `State` capability and the `Event` payload routed to it
//! - `Guard` predicates gating transitions
//! - Bounded transition history
//! - A state-owned `Timer` for deferred behavior
//!
//! Nothing in here knows about nodes, registries or the update algorithm.

mod event;
mod guard;
mod history;
mod state;
mod timer;

pub use event::Event;
pub use guard::Guard;
pub use history::{StateHistory, StateTransition, TransitionKind, DEFAULT_HISTORY_CAPACITY};
pub use state::State;
pub use timer::Timer;
