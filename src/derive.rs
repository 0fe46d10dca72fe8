//! State derivation: accepted description in, canonical [`ColorState`] out.
//!
//! Gray colors have no meaningful hue. Without intervention a user dragging
//! saturation to zero and back would see the hue snap to 0, so a gray state
//! inherits the hue of the last saturated color instead.

use crate::convert::ColorConverter;
use crate::description::ColorDescription;
use crate::state::ColorState;

/// Derives the canonical state for an accepted description.
///
/// `fallback_hue` is the previous state's `old_hue` (or the hue the edit
/// itself carries); a gray result takes it as its hue.
pub fn derive_state<C>(
    converter: &C,
    description: &ColorDescription,
    fallback_hue: f32,
) -> ColorState
where
    C: ColorConverter + ?Sized,
{
    retain_hue(converter.to_state(description, fallback_hue), fallback_hue)
}

/// Applies the hue-retention rule to a freshly converted state.
///
/// Saturated colors record their own hue as `old_hue`; gray colors take
/// `fallback_hue` for both their hue and `old_hue`.
pub(crate) fn retain_hue(state: ColorState, fallback_hue: f32) -> ColorState {
    let hue = if state.saturation() == 0.0 {
        fallback_hue
    } else {
        state.hue()
    };
    let hue = normalize_hue(hue);
    ColorState {
        old_hue: hue,
        ..state.with_hue(hue)
    }
}

/// Wraps any finite angle into `[0, 360)`.
pub(crate) fn normalize_hue(hue: f32) -> f32 {
    let wrapped = hue.rem_euclid(360.0);
    // rem_euclid of a tiny negative angle rounds up to exactly 360.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
