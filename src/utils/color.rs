use image::Rgba;

use crate::models::customization::TRANSPARENT;

/// Parse a CSS hex color (`#rgb`, `#rrggbb`, `#rrggbbaa`) or `transparent`.
pub fn parse_color(value: &str) -> Option<Rgba<u8>> {
    let value = value.trim();
    if value.eq_ignore_ascii_case(TRANSPARENT) {
        return Some(Rgba([0, 0, 0, 0]));
    }

    let hex = value.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let mut rgba = [0u8, 0, 0, 255];
            for (i, c) in hex.chars().enumerate() {
                let nibble = c.to_digit(16)? as u8;
                rgba[i] = nibble * 17;
            }
            Some(Rgba(rgba))
        }
        6 => Some(Rgba([channel(0)?, channel(2)?, channel(4)?, 255])),
        8 => Some(Rgba([channel(0)?, channel(2)?, channel(4)?, channel(6)?])),
        _ => None,
    }
}

/// Whether a color may be written into an SVG `fill` attribute: anything
/// `parse_color` accepts, or a bare CSS color keyword such as `teal`.
pub fn is_svg_safe_color(value: &str) -> bool {
    if parse_color(value).is_some() {
        return true;
    }
    !value.is_empty() && value.len() <= 32 && value.chars().all(|c| c.is_ascii_alphabetic())
}
