//! Validity gate run before any state change.

use tracing::debug;

use crate::convert::ColorConverter;
use crate::description::ColorDescription;

/// Returns whether `description` may affect state.
///
/// Rejection is silent: callers treat `false` as "do nothing", never as an
/// error.
pub fn is_valid<C>(converter: &C, description: &ColorDescription) -> bool
where
    C: ColorConverter + ?Sized,
{
    let valid = converter.is_valid_color(description);
    if !valid {
        debug!(%description, "color description rejected");
    }
    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::StandardConverter;

    #[test]
    fn test_accepts_recognizable_forms() {
        assert!(is_valid(&StandardConverter, &ColorDescription::hex("#abcdef")));
        assert!(is_valid(&StandardConverter, &ColorDescription::named("teal")));
        assert!(is_valid(&StandardConverter, &ColorDescription::default()));
    }

    #[test]
    fn test_rejects_silently() {
        assert!(!is_valid(&StandardConverter, &ColorDescription::hex("#xyz")));
        assert!(!is_valid(&StandardConverter, &ColorDescription::rgb(0.0, f32::NAN, 0.0)));
    }
}
