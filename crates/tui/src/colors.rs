//! Color helpers shared by the color picker and the chip rendering.

use ratatui::style::Color;

/// Palette offered by the color picker for tags and payment methods.
pub const PRESET_COLORS: [&str; 16] = [
    "#FF5252", "#FF4081", "#E040FB", "#7C4DFF", "#536DFE", "#448AFF", "#40C4FF", "#18FFFF",
    "#64FFDA", "#69F0AE", "#B2FF59", "#EEFF41", "#FFFF00", "#FFD740", "#FFAB40", "#FF6E40",
];

pub const DEFAULT_COLOR: &str = "#FF5252";

/// Black or white, whichever reads better on `background`.
///
/// Accepts `#RGB` and `#RRGGBB`; anything else falls back to black.
#[must_use]
pub fn contrast_color(background: &str) -> &'static str {
    let hex = background.strip_prefix('#').unwrap_or(background);
    let expanded: String = match hex.len() {
        3 if hex.chars().all(|c| c.is_ascii_hexdigit()) => {
            hex.chars().flat_map(|c| [c, c]).collect()
        }
        6 if hex.chars().all(|c| c.is_ascii_hexdigit()) => hex.to_string(),
        _ => return "#000000",
    };

    let r = u8::from_str_radix(&expanded[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&expanded[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&expanded[4..6], 16).unwrap_or(0);

    let luminance = (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0;
    if luminance > 0.5 { "#000000" } else { "#FFFFFF" }
}

/// Parse `#RRGGBB` into a terminal color. Malformed values render as the
/// neutral chip gray.
#[must_use]
pub fn terminal_color(hex: &str) -> Color {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        let r = u8::from_str_radix(&digits[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&digits[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&digits[4..6], 16).unwrap_or(0);
        return Color::Rgb(r, g, b);
    }

    Color::Rgb(204, 204, 204)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_backgrounds_get_black_text() {
        assert_eq!(contrast_color("#FFFF00"), "#000000");
        assert_eq!(contrast_color("#EEFF41"), "#000000");
        assert_eq!(contrast_color("#FF5252"), "#000000");
    }

    #[test]
    fn dark_backgrounds_get_white_text() {
        assert_eq!(contrast_color("#7C4DFF"), "#FFFFFF");
        assert_eq!(contrast_color("#536DFE"), "#FFFFFF");
        assert_eq!(contrast_color("#000000"), "#FFFFFF");
    }

    #[test]
    fn short_hex_expands_per_digit() {
        assert_eq!(contrast_color("#fff"), "#000000");
        assert_eq!(contrast_color("#00f"), "#FFFFFF");
    }

    #[test]
    fn malformed_colors_fall_back_to_black() {
        assert_eq!(contrast_color(""), "#000000");
        assert_eq!(contrast_color("#12"), "#000000");
        assert_eq!(contrast_color("laranja"), "#000000");
    }

    #[test]
    fn terminal_color_parses_full_hex() {
        assert_eq!(terminal_color("#FF5252"), Color::Rgb(255, 82, 82));
        assert_eq!(terminal_color("40C4FF"), Color::Rgb(64, 196, 255));
    }

    #[test]
    fn terminal_color_falls_back_to_gray() {
        assert_eq!(terminal_color("azul"), Color::Rgb(204, 204, 204));
        assert_eq!(terminal_color("#fff"), Color::Rgb(204, 204, 204));
    }
}
