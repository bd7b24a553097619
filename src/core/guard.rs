//! Guard predicates for controlling state transitions.
//!
//! Guards are zero-argument boolean conditions evaluated on demand. They
//! usually close over flags owned by the controller ("is attacking",
//! "is alive") and must not mutate machine state.

use std::fmt;
use std::rc::Rc;

/// Predicate that decides whether a transition fires this frame.
///
/// Cloning a guard shares the underlying closure, and clones compare equal
/// under [`Guard::ptr_eq`]. Two guards built from separate closures are always
/// distinct, even when their logic is identical.
///
/// # Example
///
/// ```rust
/// use harrow::core::Guard;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let alive = Rc::new(Cell::new(true));
/// let flag = Rc::clone(&alive);
/// let is_dead = Guard::new(move || !flag.get());
///
/// assert!(!is_dead.check());
/// alive.set(false);
/// assert!(is_dead.check());
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Rc<dyn Fn() -> bool>,
}

impl Guard {
    /// Create a guard from a predicate closure.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Guard {
            predicate: Rc::new(predicate),
        }
    }

    /// A guard that always passes.
    pub fn always() -> Self {
        Guard::new(|| true)
    }

    /// A guard that never passes.
    pub fn never() -> Self {
        Guard::new(|| false)
    }

    /// Evaluate the predicate against the current world state.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }

    /// Negate this guard.
    ///
    /// ```rust
    /// use harrow::core::Guard;
    ///
    /// assert!(Guard::never().not().check());
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Guard::new(move || !self.check())
    }

    /// Pass only when both guards pass. `other` is not evaluated when `self`
    /// fails.
    pub fn and(self, other: Guard) -> Self {
        Guard::new(move || self.check() && other.check())
    }

    /// Pass when either guard passes. `other` is not evaluated when `self`
    /// passes.
    pub fn or(self, other: Guard) -> Self {
        Guard::new(move || self.check() || other.check())
    }

    /// Whether both guards share the same underlying predicate.
    pub fn ptr_eq(&self, other: &Guard) -> bool {
        Rc::ptr_eq(&self.predicate, &other.predicate)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("predicate", &Rc::as_ptr(&self.predicate).cast::<()>())
            .finish()
    }
}
