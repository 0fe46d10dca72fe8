//! The picker shell: composition root for live state, history and listeners.
//!
//! Data flow for an edit:
//!
//! ```text
//! edit ─▶ validity gate ─▶ derive state ─▶ history push ─▶ dispatch
//!            │ reject                                       ├─ change (now)
//!            ▼                                              └─ change complete (debounced)
//!          no-op
//! ```
//!
//! The shell is single-threaded and event-driven. Its only suspension point
//! is the completed-change timer, which the caller's event loop drives
//! through [`ColorShell::poll`] and [`ColorShell::next_deadline`].
//!
//! # Example
//!
//! ```rust
//! use color_wrap::prelude::*;
//!
//! let clock = ManualClock::new();
//! let mut shell = ColorShell::<()>::builder()
//!     .clock(clock.clone())
//!     .build()
//!     .expect("default configuration is valid");
//!
//! assert!(shell.handle_change(&ColorDescription::hex("#ff0000"), ()));
//! assert!(!shell.handle_change(&ColorDescription::hex("#nope"), ()));
//! assert_eq!(shell.state().hex(), "#ff0000");
//!
//! assert!(shell.undo());
//! assert_eq!(shell.state().hue(), 250.0);
//! assert!(!shell.undo());
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{trace, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::PickerConfig;
use crate::convert::{ColorConverter, StandardConverter};
use crate::debounce::DEFAULT_WINDOW;
use crate::derive::derive_state;
use crate::description::ColorDescription;
use crate::dispatch::{ChangeDispatcher, Listeners};
use crate::error::{Error, Result};
use crate::gate;
use crate::history::{HistoryStack, DEFAULT_CAPACITY};
use crate::state::ColorState;

/// Recomputes live state for an externally supplied description.
///
/// Uses the live state's `old_hue` as the gray fallback. An unrecognizable
/// description leaves the live state as it was.
pub fn reconcile_state<C>(
    converter: &C,
    live: &ColorState,
    description: &ColorDescription,
) -> ColorState
where
    C: ColorConverter + ?Sized,
{
    if converter.is_valid_color(description) {
        derive_state(converter, description, live.old_hue)
    } else {
        warn!(%description, "ignoring unrecognizable external color");
        *live
    }
}

/// What the presentational widget renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerView {
    /// Live color.
    pub state: ColorState,
    /// `#rrggbb` or `transparent`.
    pub hex: String,
    /// Whether an undo control should be enabled.
    pub can_undo: bool,
    /// Whether a redo control should be enabled.
    pub can_redo: bool,
    /// Number of history entries.
    pub history_len: usize,
    /// Position within the history.
    pub history_index: usize,
    /// Whether swatches should report hover previews.
    pub hover_enabled: bool,
}

/// Stateful adapter between a caller's color and a picker widget.
///
/// `E` is the widget's input-event type, passed through to listeners.
pub struct ColorShell<E = (), C = StandardConverter> {
    live: ColorState,
    history: HistoryStack<ColorState>,
    dispatcher: ChangeDispatcher<E>,
    converter: C,
    clock: Box<dyn Clock>,
}

impl<E> ColorShell<E, StandardConverter> {
    /// Default color, default bounds, wall clock.
    #[must_use]
    pub fn new(listeners: Listeners<E>) -> Self {
        Self::assemble(
            StandardConverter,
            &ColorDescription::default(),
            listeners,
            Box::new(SystemClock),
            DEFAULT_WINDOW,
            DEFAULT_CAPACITY,
        )
    }

    /// Starts a [`ShellBuilder`].
    #[must_use]
    pub fn builder() -> ShellBuilder<E> {
        ShellBuilder::new()
    }

    /// Builds a shell from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] if the configuration does not validate.
    pub fn from_config(config: &PickerConfig, listeners: Listeners<E>) -> Result<Self> {
        Self::builder().config(config)?.listeners(listeners).build()
    }
}

impl<E, C: ColorConverter> ColorShell<E, C> {
    fn assemble(
        converter: C,
        color: &ColorDescription,
        listeners: Listeners<E>,
        clock: Box<dyn Clock>,
        window: Duration,
        capacity: usize,
    ) -> Self {
        let initial = derive_state(&converter, color, 0.0);
        trace!(%color, hue = initial.hue(), "shell constructed");
        Self {
            live: initial,
            history: HistoryStack::with_capacity(initial, capacity),
            dispatcher: ChangeDispatcher::new(listeners, window),
            converter,
            clock,
        }
    }

    /// Adopts an externally supplied color as the live state.
    ///
    /// Meant to be called on every external update, whether or not the
    /// description changed. History is untouched and no listener fires.
    pub fn reconcile(&mut self, description: &ColorDescription) {
        self.live = reconcile_state(&self.converter, &self.live, description);
    }

    /// Handles an edit from the widget.
    ///
    /// Returns `false` (and does nothing) if the description is rejected.
    pub fn handle_change(&mut self, description: &ColorDescription, event: E) -> bool {
        let Some(state) = self.accept(description) else {
            return false;
        };
        trace!(hex = %state.hex(), "edit accepted");

        self.live = state;
        self.history.push(state);
        self.dispatcher.changed(&state, Some(event), self.clock.now());
        true
    }

    /// Handles a swatch hover preview.
    ///
    /// Returns `true` if a preview was delivered. Live state and history are
    /// never touched.
    pub fn handle_swatch_hover(&mut self, description: &ColorDescription, event: E) -> bool {
        if !self.dispatcher.has_swatch_hover() {
            return false;
        }
        match self.accept(description) {
            Some(state) => self.dispatcher.hovered(&state, Some(&event)),
            None => false,
        }
    }

    /// Steps back one history entry. Returns `false` at the oldest entry.
    pub fn undo(&mut self) -> bool {
        match self.history.undo().copied() {
            Some(state) => {
                trace!(index = self.history.index(), "undo");
                self.adopt(state);
                true
            }
            None => false,
        }
    }

    /// Steps forward one history entry. Returns `false` at the newest entry.
    pub fn redo(&mut self) -> bool {
        match self.history.redo().copied() {
            Some(state) => {
                trace!(index = self.history.index(), "redo");
                self.adopt(state);
                true
            }
            None => false,
        }
    }

    /// Delivers the pending completed change if its window has elapsed.
    ///
    /// Returns `true` if a delivery happened.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        self.dispatcher.poll(now)
    }

    /// When the next completed-change delivery is due, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.dispatcher.deadline()
    }

    /// Tears the shell down, releasing any pending delivery unfired.
    ///
    /// Returns `true` if a pending delivery was dropped.
    pub fn teardown(mut self) -> bool {
        self.dispatcher.release()
    }

    /// The live color.
    pub fn state(&self) -> &ColorState {
        &self.live
    }

    /// The undo/redo history.
    pub fn history(&self) -> &HistoryStack<ColorState> {
        &self.history
    }

    /// The completed-change quiescence window.
    pub fn debounce_window(&self) -> Duration {
        self.dispatcher.window()
    }

    /// The conversion collaborator.
    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Snapshot for the presentational widget.
    pub fn view(&self) -> PickerView {
        PickerView {
            state: self.live,
            hex: self.live.hex(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            history_len: self.history.len(),
            history_index: self.history.index(),
            hover_enabled: self.dispatcher.has_swatch_hover(),
        }
    }

    /// Gate, then derive with the retained hue as the gray fallback.
    fn accept(&self, description: &ColorDescription) -> Option<ColorState> {
        if !gate::is_valid(&self.converter, description) {
            return None;
        }
        Some(derive_state(&self.converter, description, self.live.old_hue))
    }

    fn adopt(&mut self, state: ColorState) {
        self.live = state;
        self.dispatcher.changed(&state, None, self.clock.now());
    }
}

impl<E, C: fmt::Debug> fmt::Debug for ColorShell<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorShell")
            .field("live", &self.live)
            .field("history_len", &self.history.len())
            .field("history_index", &self.history.index())
            .field("dispatcher", &self.dispatcher)
            .field("converter", &self.converter)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ColorShell`].
pub struct ShellBuilder<E, C = StandardConverter> {
    color: ColorDescription,
    listeners: Listeners<E>,
    converter: C,
    clock: Box<dyn Clock>,
    window: Duration,
    capacity: usize,
}

impl<E> ShellBuilder<E, StandardConverter> {
    /// Defaults: default color, no listeners, wall clock, 100ms window, 50 entries.
    #[must_use]
    pub fn new() -> Self {
        Self {
            color: ColorDescription::default(),
            listeners: Listeners::new(),
            converter: StandardConverter,
            clock: Box::new(SystemClock),
            window: DEFAULT_WINDOW,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl<E> Default for ShellBuilder<E, StandardConverter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, C: ColorConverter> ShellBuilder<E, C> {
    /// Initial color description.
    #[must_use]
    pub fn color(mut self, color: ColorDescription) -> Self {
        self.color = color;
        self
    }

    /// External listeners.
    #[must_use]
    pub fn listeners(mut self, listeners: Listeners<E>) -> Self {
        self.listeners = listeners;
        self
    }

    /// Time source for the completed-change timer.
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Completed-change quiescence window.
    #[must_use]
    pub fn debounce_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// History bound.
    #[must_use]
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Applies color, window and capacity from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] if the configuration does not validate.
    pub fn config(self, config: &PickerConfig) -> Result<Self> {
        config.validate()?;
        Ok(self
            .color(config.initial_color()?)
            .debounce_window(config.debounce_window())
            .history_capacity(config.history_capacity))
    }

    /// Swaps in a different conversion collaborator.
    #[must_use]
    pub fn converter<C2: ColorConverter>(self, converter: C2) -> ShellBuilder<E, C2> {
        ShellBuilder {
            color: self.color,
            listeners: self.listeners,
            converter,
            clock: self.clock,
            window: self.window,
            capacity: self.capacity,
        }
    }

    /// Builds the shell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] for a zero history capacity and
    /// [`Error::InvalidColor`] if the converter rejects the initial color.
    pub fn build(self) -> Result<ColorShell<E, C>> {
        if self.capacity == 0 {
            return Err(Error::ConfigInvalid {
                key: "history_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if !self.converter.is_valid_color(&self.color) {
            return Err(Error::InvalidColor(self.color.to_string()));
        }
        Ok(ColorShell::assemble(
            self.converter,
            &self.color,
            self.listeners,
            self.clock,
            self.window,
            self.capacity,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::color::Rgba;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(String, Option<u32>)>>>;

    struct Harness {
        shell: ColorShell<u32>,
        clock: ManualClock,
        changes: Log,
        completed: Log,
        hovers: Log,
    }

    fn recorder(log: &Log) -> impl FnMut(&ColorState, Option<&u32>) + 'static {
        let log = Rc::clone(log);
        move |state: &ColorState, event: Option<&u32>| {
            log.borrow_mut().push((state.hex(), event.copied()));
        }
    }

    fn harness(with_hover: bool) -> Harness {
        let clock = ManualClock::new();
        let (changes, completed, hovers) = (Log::default(), Log::default(), Log::default());
        let mut listeners = Listeners::new()
            .on_change(recorder(&changes))
            .on_change_complete(recorder(&completed));
        if with_hover {
            listeners = listeners.on_swatch_hover(recorder(&hovers));
        }
        let shell = ColorShell::builder()
            .listeners(listeners)
            .clock(clock.clone())
            .build()
            .unwrap();
        Harness { shell, clock, changes, completed, hovers }
    }

    fn hex(text: &str) -> ColorDescription {
        ColorDescription::hex(text)
    }

    #[test]
    fn test_default_initial_state() {
        let h = harness(false);
        let state = h.shell.state();
        assert_eq!(state.hue(), 250.0);
        assert_eq!(state.saturation(), 0.5);
        assert_eq!(state.lightness(), 0.2);
        assert_eq!(state.alpha(), 1.0);
        assert_eq!(state.old_hue, 250.0);
        assert_eq!(h.shell.history().len(), 1);
        assert_eq!(h.shell.debounce_window(), Duration::from_millis(100));
    }

    #[test]
    fn test_new_matches_builder_defaults() {
        let shell: ColorShell = ColorShell::new(Listeners::new());
        let built: ColorShell = ColorShell::builder().build().unwrap();
        assert_eq!(shell.state(), built.state());
        assert_eq!(shell.history().capacity(), 50);
    }

    #[test]
    fn test_accepted_edit_commits_and_notifies() {
        let mut h = harness(false);
        assert!(h.shell.handle_change(&hex("#00ff00"), 7));

        assert_eq!(h.shell.state().rgb, Rgba::GREEN);
        assert_eq!(h.shell.history().len(), 2);
        assert_eq!(*h.changes.borrow(), vec![("#00ff00".to_string(), Some(7))]);
        assert!(h.completed.borrow().is_empty());

        h.clock.advance(Duration::from_millis(100));
        assert!(h.shell.poll());
        assert_eq!(*h.completed.borrow(), vec![("#00ff00".to_string(), Some(7))]);
    }

    #[test]
    fn test_rejected_edit_is_silent() {
        let mut h = harness(false);
        let before = *h.shell.state();
        assert!(!h.shell.handle_change(&hex("#qqq"), 1));
        assert!(!h.shell.handle_change(&ColorDescription::rgb(f32::NAN, 0.0, 0.0), 2));

        assert_eq!(*h.shell.state(), before);
        assert_eq!(h.shell.history().len(), 1);
        assert!(h.changes.borrow().is_empty());
        assert_eq!(h.shell.next_deadline(), None);
    }

    #[test]
    fn test_gray_edit_keeps_previous_hue() {
        let mut h = harness(false);
        assert!(h.shell.handle_change(&hex("#808080"), 1));
        assert_eq!(h.shell.state().hue(), 250.0);
        assert_eq!(h.shell.state().saturation(), 0.0);

        // Back to a saturated color via an hsl edit keeps continuity.
        assert!(h.shell.handle_change(&ColorDescription::hsl(120.0, 0.6, 0.5), 2));
        assert!(h.shell.handle_change(&ColorDescription::rgb(40.0, 40.0, 40.0), 3));
        assert_eq!(h.shell.state().hue(), 120.0);
    }

    #[test]
    fn test_gray_hsl_edit_ignores_its_own_hue() {
        let mut h = harness(false);
        assert!(h.shell.handle_change(&ColorDescription::hsl(45.0, 0.0, 0.5), 1));
        assert_eq!(h.shell.state().hue(), 250.0);
        assert_eq!(h.shell.state().old_hue, 250.0);

        // Reconciliation agrees.
        h.shell.reconcile(&ColorDescription::hsl(45.0, 0.0, 0.5));
        assert_eq!(h.shell.state().hue(), 250.0);
    }

    #[test]
    fn test_edit_after_unpolled_window_keeps_earlier_completion() {
        let mut h = harness(false);
        h.shell.handle_change(&hex("#ff0000"), 1);
        h.clock.advance(Duration::from_millis(200));
        h.shell.handle_change(&hex("#0000ff"), 2);
        h.clock.advance(Duration::from_millis(200));
        assert!(h.shell.poll());

        assert_eq!(
            *h.completed.borrow(),
            vec![("#ff0000".to_string(), Some(1)), ("#0000ff".to_string(), Some(2))]
        );
    }

    #[test]
    fn test_undo_redo_notify_without_event() {
        let mut h = harness(false);
        h.shell.handle_change(&hex("#ff0000"), 1);
        h.changes.borrow_mut().clear();

        assert!(h.shell.undo());
        assert_eq!(h.shell.state().hue(), 250.0);
        assert!(h.shell.redo());
        assert_eq!(h.shell.state().hex(), "#ff0000");
        assert!(!h.shell.redo());

        let changes = h.changes.borrow();
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|(_, event)| event.is_none()));
    }

    #[test]
    fn test_undo_completed_goes_through_debounce() {
        let mut h = harness(false);
        h.shell.handle_change(&hex("#ff0000"), 1);
        h.shell.undo();
        h.clock.advance(Duration::from_millis(100));
        assert!(h.shell.poll());

        let completed = h.completed.borrow();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].1, None);
    }

    #[test]
    fn test_failed_undo_has_no_effect() {
        let mut h = harness(false);
        let before = *h.shell.state();
        assert!(!h.shell.undo());
        assert!(!h.shell.redo());
        assert_eq!(*h.shell.state(), before);
        assert!(h.changes.borrow().is_empty());
        assert_eq!(h.shell.next_deadline(), None);
    }

    #[test]
    fn test_hover_only_fires_hover_channel() {
        let mut h = harness(true);
        let before = *h.shell.state();
        assert!(h.shell.handle_swatch_hover(&hex("#0000ff"), 5));

        assert_eq!(*h.hovers.borrow(), vec![("#0000ff".to_string(), Some(5))]);
        assert_eq!(*h.shell.state(), before);
        assert_eq!(h.shell.history().len(), 1);
        assert!(h.changes.borrow().is_empty());
        assert_eq!(h.shell.next_deadline(), None);
    }

    #[test]
    fn test_hover_disabled_without_listener() {
        let mut h = harness(false);
        assert!(!h.shell.view().hover_enabled);
        assert!(!h.shell.handle_swatch_hover(&hex("#0000ff"), 5));
    }

    #[test]
    fn test_invalid_hover_is_silent() {
        let mut h = harness(true);
        assert!(!h.shell.handle_swatch_hover(&hex("#12"), 5));
        assert!(h.hovers.borrow().is_empty());
    }

    #[test]
    fn test_reconcile_replaces_live_without_history() {
        let mut h = harness(false);
        h.shell.reconcile(&hex("#ff0000"));
        assert_eq!(h.shell.state().hex(), "#ff0000");
        assert_eq!(h.shell.history().len(), 1);
        assert!(h.changes.borrow().is_empty());

        // Same description again still recomputes (and is stable).
        h.shell.reconcile(&hex("#ff0000"));
        assert_eq!(h.shell.state().hex(), "#ff0000");
    }

    #[test]
    fn test_reconcile_gray_uses_old_hue() {
        let mut h = harness(false);
        h.shell.reconcile(&ColorDescription::hsl(10.0, 0.0, 0.5));
        assert_eq!(h.shell.state().hue(), 250.0);
    }

    #[test]
    fn test_reconcile_state_is_pure() {
        let live = *harness(false).shell.state();
        let next = reconcile_state(&StandardConverter, &live, &hex("#00ff00"));
        assert_eq!(next.rgb, Rgba::GREEN);
        assert_eq!(reconcile_state(&StandardConverter, &live, &hex("#00ff00")), next);
        assert_eq!(reconcile_state(&StandardConverter, &live, &hex("bogus!")), live);
    }

    #[test]
    fn test_view_reflects_history() {
        let mut h = harness(true);
        let view = h.shell.view();
        assert!(!view.can_undo && !view.can_redo);
        assert!(view.hover_enabled);

        h.shell.handle_change(&hex("#ffffff"), 1);
        h.shell.undo();
        let view = h.shell.view();
        assert!(!view.can_undo);
        assert!(view.can_redo);
        assert_eq!(view.history_len, 2);
        assert_eq!(view.history_index, 0);
        assert_eq!(view.hex, view.state.hex());
    }

    #[test]
    fn test_teardown_releases_pending() {
        let mut h = harness(false);
        h.shell.handle_change(&hex("#ff0000"), 1);
        let Harness { shell, clock, completed, .. } = h;

        assert!(shell.teardown());
        clock.advance(Duration::from_secs(1));
        assert!(completed.borrow().is_empty());
    }

    #[test]
    fn test_builder_rejects_zero_capacity() {
        let result = ColorShell::<()>::builder().history_capacity(0).build();
        assert!(matches!(result, Err(Error::ConfigInvalid { .. })));
    }

    #[test]
    fn test_builder_rejects_invalid_color() {
        let result = ColorShell::<()>::builder().color(hex("#zz")).build();
        assert!(matches!(result, Err(Error::InvalidColor(_))));
    }

    #[test]
    fn test_builder_initial_gray_gets_zero_hue() {
        let shell = ColorShell::<()>::builder().color(hex("#999999")).build().unwrap();
        assert_eq!(shell.state().hue(), 0.0);
    }

    #[test]
    fn test_from_config() {
        let config = PickerConfig::parse("color: navy\ndebounce_ms: 30\nhistory_capacity: 2\n").unwrap();
        let mut shell: ColorShell = ColorShell::from_config(&config, Listeners::new()).unwrap();
        assert_eq!(shell.state().hex(), "#000080");
        assert_eq!(shell.debounce_window(), Duration::from_millis(30));

        shell.handle_change(&hex("#111111"), ());
        shell.handle_change(&hex("#222222"), ());
        assert_eq!(shell.history().len(), 2);
    }

    #[test]
    fn test_custom_converter() {
        #[derive(Debug)]
        struct HexOnly;

        impl ColorConverter for HexOnly {
            fn to_state(&self, description: &ColorDescription, fallback_hue: f32) -> ColorState {
                StandardConverter.to_state(description, fallback_hue)
            }

            fn is_valid_color(&self, description: &ColorDescription) -> bool {
                matches!(description, ColorDescription::Hex(_))
                    && StandardConverter.is_valid_color(description)
            }
        }

        let mut shell = ColorShell::<()>::builder()
            .color(hex("#123456"))
            .converter(HexOnly)
            .build()
            .unwrap();
        assert!(!shell.handle_change(&ColorDescription::named("red"), ()));
        assert!(shell.handle_change(&hex("#ff0000"), ()));
        assert!(format!("{shell:?}").contains("HexOnly"));
    }
}
