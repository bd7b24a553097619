//! The State capability implemented by every concrete behavior.
//!
//! A machine never depends on concrete states. It only drives them through
//! the lifecycle hooks below, so a controller can mix unrelated state types
//! in one machine.

use super::event::Event;

/// A named unit of behavior that is active while it is current in a machine.
///
/// Identity is the name, not the instance: the machine registry keys nodes by
/// [`State::name`], so two instances reporting the same name are the same
/// logical state.
///
/// Lifecycle, as driven by the machine:
///
/// 1. `on_enter` once when the state becomes current
/// 2. `on_update` once per variable-rate frame, `on_fixed_update` once per
///    fixed tick, `on_event` for every dispatched event
/// 3. `on_exit` once when the state stops being current
///
/// Anything started in `on_enter` (timers, sounds, animations) must be
/// released in `on_exit`; the machine guarantees `on_exit` runs before the
/// state is abandoned.
///
/// # Example
///
/// ```rust
/// use harrow::core::{Event, State};
///
/// struct Watering {
///     strokes: u32,
///     finished: bool,
/// }
///
/// impl State for Watering {
///     fn name(&self) -> &str {
///         "Watering"
///     }
///
///     fn on_enter(&mut self) {
///         self.strokes = 0;
///         self.finished = false;
///     }
///
///     fn on_update(&mut self) {
///         self.strokes += 1;
///     }
///
///     fn on_event(&mut self, event: &Event) {
///         if event.is("StopWatering") {
///             self.finished = true;
///         }
///     }
/// }
/// ```
pub trait State {
    /// Stable, non-empty identifier used as the registry key.
    fn name(&self) -> &str;

    /// Called once when this state becomes current.
    fn on_enter(&mut self) {}

    /// Called once when this state stops being current.
    fn on_exit(&mut self) {}

    /// Called once per variable-rate frame while current.
    fn on_update(&mut self) {}

    /// Called once per fixed-rate tick while current.
    fn on_fixed_update(&mut self) {}

    /// Called when the timeline collaborator signals an event while current.
    fn on_event(&mut self, _event: &Event) {}
}

impl<T: State + ?Sized> State for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_enter(&mut self) {
        (**self).on_enter()
    }

    fn on_exit(&mut self) {
        (**self).on_exit()
    }

    fn on_update(&mut self) {
        (**self).on_update()
    }

    fn on_fixed_update(&mut self) {
        (**self).on_fixed_update()
    }

    fn on_event(&mut self, event: &Event) {
        (**self).on_event(event)
    }
}
