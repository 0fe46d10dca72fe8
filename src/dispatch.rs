//! Change notification to external listeners.
//!
//! Three channels, each optional:
//!
//! - **change**: called synchronously for every accepted change
//! - **change complete**: trailing-edge debounced, only the last change of a
//!   burst is delivered once the quiescence window passes
//! - **swatch hover**: called synchronously for previews, never committed
//!
//! An absent listener is simply skipped.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::debounce::Debouncer;
use crate::state::ColorState;

/// Callback signature shared by all channels.
///
/// The event is `None` for changes that did not come from an input event
/// (undo and redo).
pub type Listener<E> = Box<dyn FnMut(&ColorState, Option<&E>)>;

/// The caller's listeners, each optional.
pub struct Listeners<E> {
    on_change: Option<Listener<E>>,
    on_change_complete: Option<Listener<E>>,
    on_swatch_hover: Option<Listener<E>>,
}

impl<E> Listeners<E> {
    /// No listeners at all.
    #[must_use]
    pub fn new() -> Self {
        Self {
            on_change: None,
            on_change_complete: None,
            on_swatch_hover: None,
        }
    }

    /// Sets the immediate change listener.
    #[must_use]
    pub fn on_change(mut self, f: impl FnMut(&ColorState, Option<&E>) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Sets the debounced change-complete listener.
    #[must_use]
    pub fn on_change_complete(mut self, f: impl FnMut(&ColorState, Option<&E>) + 'static) -> Self {
        self.on_change_complete = Some(Box::new(f));
        self
    }

    /// Sets the swatch hover listener. Hover handling is only enabled when set.
    #[must_use]
    pub fn on_swatch_hover(mut self, f: impl FnMut(&ColorState, Option<&E>) + 'static) -> Self {
        self.on_swatch_hover = Some(Box::new(f));
        self
    }

    /// True if a swatch hover listener was supplied.
    pub fn has_swatch_hover(&self) -> bool {
        self.on_swatch_hover.is_some()
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("on_change", &self.on_change.is_some())
            .field("on_change_complete", &self.on_change_complete.is_some())
            .field("on_swatch_hover", &self.on_swatch_hover.is_some())
            .finish()
    }
}

/// Routes accepted changes to the listeners.
///
/// Owns the single pending completed-change slot. Dropping the dispatcher
/// releases it without delivery.
pub struct ChangeDispatcher<E> {
    listeners: Listeners<E>,
    completed: Debouncer<(ColorState, Option<E>)>,
}

impl<E> ChangeDispatcher<E> {
    /// Creates a dispatcher with the given completed-change window.
    #[must_use]
    pub fn new(listeners: Listeners<E>, window: Duration) -> Self {
        Self {
            listeners,
            completed: Debouncer::new(window),
        }
    }

    /// Delivers an accepted change: immediately to the change listener, and
    /// (re)arms the completed-change timer.
    ///
    /// A pending completed change whose window has already elapsed is
    /// delivered first rather than superseded.
    pub fn changed(&mut self, state: &ColorState, event: Option<E>, now: Instant) {
        self.poll(now);
        if let Some(on_change) = self.listeners.on_change.as_mut() {
            on_change(state, event.as_ref());
        }
        if self.listeners.on_change_complete.is_some() {
            self.completed.arm((*state, event), now);
        }
    }

    /// Delivers a hover preview. Returns `false` if no hover listener exists.
    pub fn hovered(&mut self, state: &ColorState, event: Option<&E>) -> bool {
        match self.listeners.on_swatch_hover.as_mut() {
            Some(on_swatch_hover) => {
                on_swatch_hover(state, event);
                true
            }
            None => false,
        }
    }

    /// Delivers the pending completed change if its window has elapsed.
    ///
    /// Returns `true` if a delivery happened.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some((state, event)) = self.completed.poll(now) else {
            return false;
        };
        match self.listeners.on_change_complete.as_mut() {
            Some(on_change_complete) => {
                trace!(hue = state.hue(), "delivering completed change");
                on_change_complete(&state, event.as_ref());
                true
            }
            None => false,
        }
    }

    /// Drops the pending completed change without delivering it.
    pub fn release(&mut self) -> bool {
        self.completed.release()
    }

    /// When the pending completed change becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.completed.deadline()
    }

    /// The completed-change quiescence window.
    pub fn window(&self) -> Duration {
        self.completed.window()
    }

    /// True if hover previews have somewhere to go.
    pub fn has_swatch_hover(&self) -> bool {
        self.listeners.has_swatch_hover()
    }
}

impl<E> Drop for ChangeDispatcher<E> {
    fn drop(&mut self) {
        if self.release() {
            debug!("pending completed change released on teardown");
        }
    }
}

impl<E> fmt::Debug for ChangeDispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeDispatcher")
            .field("listeners", &self.listeners)
            .field("window", &self.completed.window())
            .field("deadline", &self.completed.deadline())
            .finish()
    }
}
