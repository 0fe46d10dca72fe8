//! # color-wrap
//!
//! Stateful shell around a presentational color-picker widget.
//!
//! The widget only renders and reports edits. This crate owns everything
//! else: it normalizes every color description into one canonical
//! [`ColorState`](state::ColorState), keeps the hue stable through gray
//! colors, keeps a bounded undo/redo history, and notifies listeners both
//! immediately and with a debounced "change complete" callback.
//!
//! ## Quick Start
//!
//! ```rust
//! use color_wrap::prelude::*;
//!
//! let listeners = Listeners::new()
//!     .on_change(|state: &ColorState, _: Option<&()>| println!("now {}", state.hex()));
//! let mut shell = ColorShell::new(listeners);
//!
//! shell.handle_change(&"rgb(255, 128, 0)".parse().unwrap(), ());
//! assert!(shell.view().can_undo);
//! ```
//!
//! ## Feature Flags
//!
//! - `runtime`: tokio clock and an async helper that waits out the debounce window

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Color Model
// ============================================================================

/// Color types and color space conversions.
pub mod color;

/// Color descriptions as supplied by callers and widgets.
pub mod description;

/// The canonical normalized color state.
pub mod state;

/// Description-to-state conversion.
pub mod convert;

/// Hue-retaining state derivation.
pub mod derive;

/// Validity gate for incoming edits.
pub mod gate;

// ============================================================================
// Shell Modules
// ============================================================================

/// Bounded undo/redo history.
pub mod history;

/// Time sources.
pub mod clock;

/// Trailing-edge debounce timer.
pub mod debounce;

/// Listener notification.
pub mod dispatch;

/// YAML configuration.
pub mod config;

/// The picker shell.
pub mod shell;

/// Tokio clock and settle helper.
#[cfg(feature = "runtime")]
#[cfg_attr(docsrs, doc(cfg(feature = "runtime")))]
pub mod runtime;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for color-wrap operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use color_wrap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::color::{Hsla, Hsva, Rgba};
    pub use crate::config::PickerConfig;
    pub use crate::convert::{ColorConverter, StandardConverter};
    pub use crate::description::{ColorDescription, ColorSource};
    pub use crate::dispatch::Listeners;
    pub use crate::error::{Error, Result};
    pub use crate::history::HistoryStack;
    pub use crate::shell::{ColorShell, PickerView, ShellBuilder};
    pub use crate::state::ColorState;
}
