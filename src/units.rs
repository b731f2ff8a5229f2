//! Pixel/inch dimension math for the controls panel.
//!
//! Conversions always operate on the values currently shown in the input
//! fields, never on the stored original pixel dimensions. Toggling units back
//! and forth therefore accumulates rounding drift, and a DPI edit while in
//! inches mode divides the already-converted values again. Both behaviors are
//! intentional and covered by tests.

pub const DEFAULT_DPI: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Pixels,
    Inches,
}

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Pixels => "px",
            Unit::Inches => "in",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

/// Parses a dimension field. Whitespace is tolerated, anything else is not.
pub fn parse_value(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a DPI field. Invalid or zero entries fall back to the default.
pub fn parse_dpi(field: &str) -> u32 {
    field
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|&v| v != 0)
        .unwrap_or(DEFAULT_DPI)
}

pub fn to_inches(pixels: f64, dpi: u32) -> f64 {
    pixels / dpi as f64
}

pub fn to_pixels(inches: f64, dpi: u32) -> u32 {
    (inches * dpi as f64).round() as u32
}

/// Formats a value for display in the given unit: two decimals for inches,
/// nearest integer for pixels.
pub fn format_value(unit: Unit, value: f64) -> String {
    match unit {
        Unit::Inches => format!("{:.2}", value),
        Unit::Pixels => format!("{}", value.round() as i64),
    }
}

/// Recomputes the paired dimension from the aspect ratio of the original
/// uploaded image. Returns `None` until an upload has established the
/// originals.
pub fn companion(
    edited: Dimension,
    value: f64,
    original_width: u32,
    original_height: u32,
) -> Option<f64> {
    if original_width == 0 || original_height == 0 {
        return None;
    }
    let aspect = original_width as f64 / original_height as f64;
    Some(match edited {
        Dimension::Width => value / aspect,
        Dimension::Height => value * aspect,
    })
}

/// Converts a displayed field to the integer pixel count submitted for
/// processing. Pixel-mode entries are truncated like the original integer
/// parse; unparseable fields become 0 and are rejected by the caller.
pub fn field_to_pixels(field: &str, unit: Unit, dpi: u32) -> u32 {
    match unit {
        Unit::Inches => parse_value(field).map(|v| to_pixels(v, dpi)).unwrap_or(0),
        Unit::Pixels => parse_value(field)
            .filter(|&v| v >= 0.0)
            .map(|v| v.trunc() as u32)
            .unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_to_inches_rounds_to_two_decimals() {
        assert_eq!(format_value(Unit::Inches, to_inches(1000.0, 300)), "3.33");
        assert_eq!(format_value(Unit::Inches, to_inches(600.0, 300)), "2.00");
    }

    #[test]
    fn inches_to_pixels_rounds_to_nearest_integer() {
        assert_eq!(to_pixels(3.33, 300), 999);
        assert_eq!(to_pixels(2.0, 300), 600);
        assert_eq!(to_pixels(1.005, 200), 201);
    }

    #[test]
    fn double_toggle_approximates_within_rounding_drift() {
        // 1000px -> "3.33" in -> 999px. The drift is inherent to converting
        // displayed values one way instead of re-deriving from the originals.
        let inches = format_value(Unit::Inches, to_inches(1000.0, 300));
        let back = to_pixels(parse_value(&inches).unwrap(), 300);
        assert_eq!(back, 999);
        assert!((back as i64 - 1000).unsigned_abs() <= 2);
    }

    #[test]
    fn companion_uses_original_aspect_ratio() {
        // 800x600 original, aspect 4:3.
        assert_eq!(companion(Dimension::Width, 400.0, 800, 600), Some(300.0));
        assert_eq!(companion(Dimension::Height, 300.0, 800, 600), Some(400.0));
    }

    #[test]
    fn companion_formats_per_unit() {
        let h = companion(Dimension::Width, 3.0, 800, 600).unwrap();
        assert_eq!(format_value(Unit::Inches, h), "2.25");
        let h = companion(Dimension::Width, 401.0, 800, 600).unwrap();
        assert_eq!(format_value(Unit::Pixels, h), "301");
    }

    #[test]
    fn companion_is_noop_before_upload() {
        assert_eq!(companion(Dimension::Width, 400.0, 0, 0), None);
        assert_eq!(companion(Dimension::Height, 400.0, 800, 0), None);
    }

    #[test]
    fn dpi_parse_falls_back_on_garbage_and_zero() {
        assert_eq!(parse_dpi("300"), 300);
        assert_eq!(parse_dpi("72"), 72);
        assert_eq!(parse_dpi(""), DEFAULT_DPI);
        assert_eq!(parse_dpi("abc"), DEFAULT_DPI);
        assert_eq!(parse_dpi("0"), DEFAULT_DPI);
    }

    #[test]
    fn field_to_pixels_truncates_pixel_entries() {
        assert_eq!(field_to_pixels("800", Unit::Pixels, 300), 800);
        assert_eq!(field_to_pixels("800.9", Unit::Pixels, 300), 800);
        assert_eq!(field_to_pixels(" 640 ", Unit::Pixels, 300), 640);
    }

    #[test]
    fn field_to_pixels_rounds_inch_entries() {
        assert_eq!(field_to_pixels("2.5", Unit::Inches, 300), 750);
        assert_eq!(field_to_pixels("3.33", Unit::Inches, 300), 999);
    }

    #[test]
    fn field_to_pixels_rejects_garbage_as_zero() {
        assert_eq!(field_to_pixels("", Unit::Pixels, 300), 0);
        assert_eq!(field_to_pixels("wide", Unit::Inches, 300), 0);
        assert_eq!(field_to_pixels("-3", Unit::Pixels, 300), 0);
    }
}
