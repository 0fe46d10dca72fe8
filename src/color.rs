//! Color types and color space conversions.
//!
//! Provides RGBA, HSLA and HSVA representations with conversions between
//! them. These are the building blocks the [`StandardConverter`] uses to
//! normalize a description into a [`ColorState`].
//!
//! Hues are in degrees, every other float component is normalized to 0.0-1.0.
//!
//! [`StandardConverter`]: crate::convert::StandardConverter
//! [`ColorState`]: crate::state::ColorState

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Alpha as a normalized float (0.0-1.0).
    #[must_use]
    pub fn alpha_f32(self) -> f32 {
        f32::from(self.a) / 255.0
    }

    /// Convert to HSLA. Grays come out with hue 0 and saturation 0.
    #[must_use]
    pub fn to_hsla(self) -> Hsla {
        let (r, g, b) = self.unit_channels();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsla::new(0.0, 0.0, l, self.alpha_f32());
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        Hsla::new(hue_of(r, g, b, max, d), s, l, self.alpha_f32())
    }

    /// Convert to HSVA. Grays come out with hue 0 and saturation 0.
    #[must_use]
    pub fn to_hsva(self) -> Hsva {
        let (r, g, b) = self.unit_channels();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let d = max - min;

        let s = if max == 0.0 { 0.0 } else { d / max };
        let h = if d == 0.0 { 0.0 } else { hue_of(r, g, b, max, d) };

        Hsva::new(h, s, max, self.alpha_f32())
    }

    /// Six-digit lowercase hex without the leading `#`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Eight-digit lowercase hex (with alpha) without the leading `#`.
    #[must_use]
    pub fn to_hex8(self) -> String {
        format!("{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    fn unit_channels(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

/// Hue in degrees for a non-gray color given its max channel and chroma.
fn hue_of(r: f32, g: f32, b: f32, max: f32, d: f32) -> f32 {
    let sector = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (sector * 60.0).rem_euclid(360.0)
}

/// HSLA color with floating-point components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsla {
    /// Hue (0.0-360.0 degrees).
    pub h: f32,
    /// Saturation (0.0-1.0).
    pub s: f32,
    /// Lightness (0.0-1.0).
    pub l: f32,
    /// Alpha (0.0-1.0).
    pub a: f32,
}

impl Hsla {
    /// Create a new HSLA color.
    #[must_use]
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Create an opaque HSL color (alpha = 1.0).
    #[must_use]
    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self::new(h, s, l, 1.0)
    }

    /// Convert to RGBA, rounding each channel to the nearest integer.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let h = self.h / 360.0;
        let s = self.s;
        let l = self.l;

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 {
                l * (1.0 + s)
            } else {
                l + s - l * s
            };
            let p = 2.0 * l - q;

            (
                hue_to_rgb(p, q, h + 1.0 / 3.0),
                hue_to_rgb(p, q, h),
                hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        Rgba::new(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), unit_to_u8(self.a))
    }

    /// Convert to HSVA without a round trip through 8-bit RGB.
    #[must_use]
    pub fn to_hsva(self) -> Hsva {
        let v = self.l + self.s * self.l.min(1.0 - self.l);
        let s = if v == 0.0 {
            0.0
        } else {
            2.0 * (1.0 - self.l / v)
        };
        Hsva::new(self.h, s.clamp(0.0, 1.0), v.clamp(0.0, 1.0), self.a)
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// HSVA color with floating-point components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsva {
    /// Hue (0.0-360.0 degrees).
    pub h: f32,
    /// Saturation (0.0-1.0).
    pub s: f32,
    /// Value (0.0-1.0).
    pub v: f32,
    /// Alpha (0.0-1.0).
    pub a: f32,
}

impl Hsva {
    /// Create a new HSVA color.
    #[must_use]
    pub const fn new(h: f32, s: f32, v: f32, a: f32) -> Self {
        Self { h, s, v, a }
    }

    /// Convert to RGBA, rounding each channel to the nearest integer.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let h = (self.h.rem_euclid(360.0) / 360.0) * 6.0;
        let i = h.floor();
        let f = h - i;
        let (s, v) = (self.s, self.v);
        let p = v * (1.0 - s);
        let q = v * (1.0 - f * s);
        let t = v * (1.0 - (1.0 - f) * s);

        let (r, g, b) = match (i as u32) % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Rgba::new(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), unit_to_u8(self.a))
    }

    /// Convert to HSLA without a round trip through 8-bit RGB.
    #[must_use]
    pub fn to_hsla(self) -> Hsla {
        let l = self.v * (1.0 - self.s / 2.0);
        let m = l.min(1.0 - l);
        let s = if m == 0.0 { 0.0 } else { (self.v - l) / m };
        Hsla::new(self.h, s.clamp(0.0, 1.0), l.clamp(0.0, 1.0), self.a)
    }
}

impl From<Hsla> for Rgba {
    fn from(hsla: Hsla) -> Self {
        hsla.to_rgba()
    }
}

impl From<Hsva> for Rgba {
    fn from(hsva: Hsva) -> Self {
        hsva.to_rgba()
    }
}
