//! Canonical color snapshot.

use crate::color::{Hsla, Hsva, Rgba};
use crate::description::ColorSource;

/// Canonical, immutable color snapshot.
///
/// All components are normalized: hue in `[0, 360)`, everything else in
/// `[0, 1]`. `old_hue` is the hue to fall back on when the color is gray,
/// where hue would otherwise be undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorState {
    /// Hue/saturation/lightness/alpha.
    pub hsl: Hsla,
    /// Hue/saturation/value/alpha view of the same color.
    pub hsv: Hsva,
    /// 8-bit channels of the same color.
    pub rgb: Rgba,
    /// Hue retained from the last saturated color.
    pub old_hue: f32,
    /// Input form the state was derived from.
    pub source: ColorSource,
}

impl ColorState {
    /// Hue in degrees.
    #[inline]
    pub fn hue(&self) -> f32 {
        self.hsl.h
    }

    /// HSL saturation.
    #[inline]
    pub fn saturation(&self) -> f32 {
        self.hsl.s
    }

    /// HSL lightness.
    #[inline]
    pub fn lightness(&self) -> f32 {
        self.hsl.l
    }

    /// Opacity.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.hsl.a
    }

    /// True for fully transparent black.
    pub fn is_transparent(&self) -> bool {
        self.rgb == Rgba::TRANSPARENT
    }

    /// `#rrggbb`, or `transparent` for fully transparent black.
    pub fn hex(&self) -> String {
        if self.is_transparent() {
            "transparent".to_string()
        } else {
            format!("#{}", self.rgb.to_hex())
        }
    }

    /// True when every component lies inside its normalized range.
    pub fn is_normalized(&self) -> bool {
        let unit = 0.0..=1.0;
        let degrees = 0.0..360.0;
        degrees.contains(&self.hsl.h)
            && degrees.contains(&self.hsv.h)
            && degrees.contains(&self.old_hue)
            && unit.contains(&self.hsl.s)
            && unit.contains(&self.hsl.l)
            && unit.contains(&self.hsl.a)
            && unit.contains(&self.hsv.s)
            && unit.contains(&self.hsv.v)
    }

    /// Copy of this state with `hue` written into both hue-bearing views.
    #[must_use]
    pub(crate) fn with_hue(mut self, hue: f32) -> Self {
        self.hsl.h = hue;
        self.hsv.h = hue;
        self
    }
}
