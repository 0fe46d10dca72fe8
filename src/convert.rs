//! The color-conversion collaborator.
//!
//! The shell never does color math itself. It asks a [`ColorConverter`] two
//! questions: is this description acceptable, and what canonical state does
//! it normalize to. [`StandardConverter`] answers both with the conversions
//! in [`crate::color`]; callers with their own color engine can plug in a
//! different implementation.

use crate::color::{Hsla, Hsva, Rgba};
use crate::derive::{normalize_hue, retain_hue};
use crate::description::{decode_hex, named_color, ColorDescription};
use crate::state::ColorState;

/// Conversion contract consumed by the validity gate and the state deriver.
///
/// Both methods must be pure: same input, same answer, no shared state.
pub trait ColorConverter {
    /// Normalizes an accepted description into canonical form.
    ///
    /// When the result is gray, its hue must be `fallback_hue`.
    fn to_state(&self, description: &ColorDescription, fallback_hue: f32) -> ColorState;

    /// Whether the description is recognizable at all.
    fn is_valid_color(&self, description: &ColorDescription) -> bool;
}

impl<C: ColorConverter + ?Sized> ColorConverter for &C {
    fn to_state(&self, description: &ColorDescription, fallback_hue: f32) -> ColorState {
        (**self).to_state(description, fallback_hue)
    }

    fn is_valid_color(&self, description: &ColorDescription) -> bool {
        (**self).is_valid_color(description)
    }
}

/// Built-in converter covering hex, RGB, HSL, HSV and named colors.
///
/// Normalization rules:
///
/// - hue wraps into `[0, 360)`
/// - saturation, lightness and value above 1 are read as percentages, then
///   clamped to `[0, 1]`
/// - RGB channels clamp to `[0, 255]`
/// - alpha outside `[0, 1]` (or missing) becomes fully opaque
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardConverter;

impl StandardConverter {
    /// Creates the converter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn convert(description: &ColorDescription) -> (Hsla, Hsva, Rgba) {
        match description {
            ColorDescription::Hex(hex) => {
                let rgba = decode_hex(hex.trim().trim_start_matches('#')).unwrap_or(Rgba::BLACK);
                from_rgba(rgba, rgba.alpha_f32())
            }
            ColorDescription::Named(name) => {
                let rgba = named_color(&name.trim().to_ascii_lowercase()).unwrap_or(Rgba::BLACK);
                from_rgba(rgba, rgba.alpha_f32())
            }
            ColorDescription::Rgb { r, g, b, a } => {
                let alpha = bound_alpha(*a);
                let rgba = Rgba::rgb(channel(*r), channel(*g), channel(*b))
                    .with_alpha(unit_to_byte(alpha));
                from_rgba(rgba, alpha)
            }
            ColorDescription::Hsl { h, s, l, a } => {
                let hsl = Hsla::new(normalize_hue(*h), unit(*s), unit(*l), bound_alpha(*a));
                (hsl, hsl.to_hsva(), hsl.to_rgba())
            }
            ColorDescription::Hsv { h, s, v, a } => {
                let hsv = Hsva::new(normalize_hue(*h), unit(*s), unit(*v), bound_alpha(*a));
                (hsv.to_hsla(), hsv, hsv.to_rgba())
            }
        }
    }
}

impl ColorConverter for StandardConverter {
    fn to_state(&self, description: &ColorDescription, fallback_hue: f32) -> ColorState {
        let (hsl, hsv, rgb) = Self::convert(description);
        let state = ColorState {
            hsl,
            hsv,
            rgb,
            old_hue: hsl.h,
            source: description.source(),
        };
        retain_hue(state, fallback_hue)
    }

    fn is_valid_color(&self, description: &ColorDescription) -> bool {
        match description {
            ColorDescription::Hex(hex) => decode_hex(hex.trim().trim_start_matches('#')).is_some(),
            ColorDescription::Named(name) => {
                named_color(&name.trim().to_ascii_lowercase()).is_some()
            }
            ColorDescription::Rgb { r, g, b, a } => all_finite(&[*r, *g, *b], *a),
            ColorDescription::Hsl { h, s, l, a } => all_finite(&[*h, *s, *l], *a),
            ColorDescription::Hsv { h, s, v, a } => all_finite(&[*h, *s, *v], *a),
        }
    }
}

fn from_rgba(rgba: Rgba, alpha: f32) -> (Hsla, Hsva, Rgba) {
    let mut hsl = rgba.to_hsla();
    let mut hsv = rgba.to_hsva();
    hsl.a = alpha;
    hsv.a = alpha;
    (hsl, hsv, rgba)
}

fn all_finite(components: &[f32], alpha: Option<f32>) -> bool {
    components.iter().all(|c| c.is_finite()) && alpha.map_or(true, f32::is_finite)
}

fn channel(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

fn unit(v: f32) -> f32 {
    let v = if v > 1.0 { v / 100.0 } else { v };
    v.clamp(0.0, 1.0)
}

fn bound_alpha(a: Option<f32>) -> f32 {
    match a {
        Some(a) if (0.0..=1.0).contains(&a) => a,
        _ => 1.0,
    }
}

fn unit_to_byte(v: f32) -> u8 {
    (v * 255.0).round() as u8
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_states_are_normalized(
            h in -1000.0f32..1000.0,
            s in -10.0f32..200.0,
            l in -10.0f32..200.0,
            a in -2.0f32..2.0,
            fallback in -720.0f32..720.0,
        ) {
            for desc in [
                ColorDescription::hsla(h, s, l, a),
                ColorDescription::Hsv { h, s, v: l, a: Some(a) },
                ColorDescription::Rgb { r: h, g: s, b: l, a: Some(a) },
            ] {
                let state = StandardConverter.to_state(&desc, fallback);
                prop_assert!(state.is_normalized(), "{:?} -> {:?}", desc, state);
            }
        }

        #[test]
        fn prop_hex_gray_uses_fallback(v in any::<u8>(), fallback in 0.0f32..360.0) {
            let desc = ColorDescription::hex(format!("#{v:02x}{v:02x}{v:02x}"));
            let state = StandardConverter.to_state(&desc, fallback);
            prop_assert_eq!(state.hue(), fallback);
            prop_assert_eq!(state.old_hue, fallback);
        }
    }
}
