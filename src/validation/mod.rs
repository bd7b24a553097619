//! Structural validation of transition graphs.
//!
//! Rules run against a [`GraphView`] and use Stillwater's `Validation` type
//! to accumulate ALL violations instead of stopping at the first one, so a
//! miswired controller reports every problem in one pass.
//!
//! # Example
//!
//! ```rust
//! use harrow::validation::{GraphView, ValidationBuilder, ViolationStrategy};
//!
//! let rules = ValidationBuilder::new()
//!     .require_reachable()
//!     .forbid_self_transitions()
//!     .require_exits(["Dead"])
//!     .on_violation(ViolationStrategy::Abort)
//!     .build();
//!
//! let graph = GraphView::from_edges(
//!     &["Idle", "Moving", "Dead"],
//!     &[("Idle", "Moving"), ("Moving", "Idle")],
//!     &["Dead"],
//! )
//! .unwrap();
//!
//! assert!(rules.validate(&graph, "Idle").is_success());
//! ```

pub mod builder;
pub mod rules;
pub mod view;
pub mod violations;

// Re-export commonly used types
pub use builder::ValidationBuilder;
pub use rules::GraphRules;
pub use view::GraphView;
pub use violations::{GraphViolation, ViolationStrategy};
