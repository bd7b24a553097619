//! Harrow: a frame-driven finite state machine core
//!
//! Harrow drives player controllers and creature AI from an external game
//! loop. A controller registers its states, wires guarded transitions, and
//! then calls into the machine once per frame, once per fixed tick, and
//! whenever its animation timeline emits a marker.
//!
//! # Core Concepts
//!
//! - **State**: a named behavior with enter/exit/update/fixed-update/event hooks
//! - **Guards**: zero-argument predicates gating transitions
//! - **Any-state transitions**: global interrupts (death, stun) that pre-empt
//!   the current state's local transitions
//! - **History**: a bounded record of state changes
//!
//! # Example
//!
//! ```rust
//! use harrow::{Guard, State, StateMachine};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! struct Idle;
//! struct Moving;
//! struct Dead;
//!
//! impl State for Idle {
//!     fn name(&self) -> &str { "Idle" }
//! }
//! impl State for Moving {
//!     fn name(&self) -> &str { "Moving" }
//! }
//! impl State for Dead {
//!     fn name(&self) -> &str { "Dead" }
//! }
//!
//! let has_input = Rc::new(Cell::new(false));
//! let alive = Rc::new(Cell::new(true));
//!
//! let (input, no_input, dead) = (has_input.clone(), has_input.clone(), alive.clone());
//! let mut machine = StateMachine::builder()
//!     .state(Idle)
//!     .state(Moving)
//!     .state(Dead)
//!     .transition("Idle", "Moving", Guard::new(move || input.get()))
//!     .transition("Moving", "Idle", Guard::new(move || !no_input.get()))
//!     .any_transition("Dead", Guard::new(move || !dead.get()))
//!     .initial("Idle")
//!     .build()
//!     .unwrap();
//!
//! has_input.set(true);
//! machine.update().unwrap();
//! assert!(machine.is_in_state("Moving"));
//!
//! alive.set(false);
//! machine.update().unwrap();
//! assert!(machine.is_in_state("Dead"));
//!
//! machine.update().unwrap();
//! assert!(machine.is_in_state("Dead"));
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod fsm;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use crate::core::{Event, Guard, State, StateHistory, StateTransition, Timer, TransitionKind};
pub use fsm::{MachineConfig, MachineError, NodeId, StateMachine, StepResult};
