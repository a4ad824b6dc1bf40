//! Parsing of CSS-like functional colors.

use lazy_static::lazy_static;
use regex::Regex;
use rgb::RGBA8;
use tracing::debug;

/// Color used for text that is not a valid `rgb(…)` / `rgba(…)` color.
pub const FALLBACK: RGBA8 = RGBA8 { r: 0, g: 0, b: 0, a: 255 };

lazy_static! {
    static ref COLOR_RE: Regex = Regex::new(
        r"^\s*rgba?\((\d+),\s*(\d+),\s*(\d+)(?:,\s*(\d+(?:\.\d*)?|\.\d+))?\)\s*$")
        .expect("valid color regex");
}

/// Convert colors such as `"rgb(67,147,195)"` or
/// `"rgba(165,0,38,0.5)"` to RGBA with 8-bit channels.
///
/// The alpha component, a real in \[0, 1\], is scaled to
/// `round(a * 255)` with ties going up (`0.5` gives `128`).  An absent
/// alpha means opaque (`255`).
///
/// Text that does not match, including channels that do not fit in 8
/// bits, gives [`FALLBACK`] (opaque black).  This is not an error.
///
/// # Example
///
/// ```
/// use rgb::RGBA8;
/// use color_relief::parse_color;
/// assert_eq!(parse_color("rgba(255,0,0,0.5)"), RGBA8::new(255, 0, 0, 128));
/// assert_eq!(parse_color("hsl(0, 50%, 50%)"), RGBA8::new(0, 0, 0, 255));
/// ```
pub fn parse_color(s: &str) -> RGBA8 {
    match try_parse_color(s) {
        Some(c) => c,
        None => {
            debug!(color = s, "unrecognized color, using opaque black");
            FALLBACK
        }
    }
}

/// Same as [`parse_color`] but says whether the text was recognized.
pub fn try_parse_color(s: &str) -> Option<RGBA8> {
    let caps = COLOR_RE.captures(s)?;
    let r = caps[1].parse::<u8>().ok()?;
    let g = caps[2].parse::<u8>().ok()?;
    let b = caps[3].parse::<u8>().ok()?;
    let a = match caps.get(4) {
        Some(a) => alpha_of_unit(a.as_str().parse::<f64>().ok()?)?,
        None => 255,
    };
    Some(RGBA8 { r, g, b, a })
}

/// Scale `a` ∈ \[0, 1\] to \[0, 255\].  `f64::round` breaks ties away
/// from zero, i.e. upwards here since `a ≥ 0`.
fn alpha_of_unit(a: f64) -> Option<u8> {
    if !(0. ..= 1.).contains(&a) { return None }
    Some((a * 255.).round() as u8)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(parse_color("rgb(67,147,195)"), RGBA8::new(67, 147, 195, 255));
        assert_eq!(parse_color("rgb(0, 0, 0)"), RGBA8::new(0, 0, 0, 255));
        assert_eq!(parse_color("rgb(255,255,255)"),
                   RGBA8::new(255, 255, 255, 255));
    }

    #[test]
    fn every_channel_value_is_copied() {
        for v in 0 ..= 255u8 {
            let c = parse_color(&format!("rgb({v},{},{v})", 255 - v));
            assert_eq!(c, RGBA8::new(v, 255 - v, v, 255));
        }
    }

    #[test]
    fn rgba_alpha_is_scaled_and_rounded() {
        assert_eq!(parse_color("rgba(255,0,0,0.5)"), RGBA8::new(255, 0, 0, 128));
        assert_eq!(parse_color("rgba(165,0,38,1)"), RGBA8::new(165, 0, 38, 255));
        assert_eq!(parse_color("rgba(1,2,3,0)"), RGBA8::new(1, 2, 3, 0));
        assert_eq!(parse_color("rgba(1, 2, 3, 0.2)"), RGBA8::new(1, 2, 3, 51));
        assert_eq!(parse_color("rgba(1,2,3,.8)"), RGBA8::new(1, 2, 3, 204));
        assert_eq!(parse_color("rgba(1,2,3,1.0)"), RGBA8::new(1, 2, 3, 255));
    }

    #[test]
    fn alpha_ties_round_up() {
        // 0.5 * 255 = 127.5 exactly.
        assert_eq!(alpha_of_unit(0.5), Some(128));
        assert_eq!(alpha_of_unit(0.25), Some(64)); // 63.75
        assert_eq!(alpha_of_unit(1.5), None);
    }

    #[test]
    fn function_name_does_not_constrain_alpha() {
        assert_eq!(parse_color("rgb(1,2,3,0.5)"), RGBA8::new(1, 2, 3, 128));
        assert_eq!(parse_color("rgba(1,2,3)"), RGBA8::new(1, 2, 3, 255));
    }

    #[test]
    fn surrounding_whitespace_is_accepted() {
        assert_eq!(parse_color("  rgb(4,5,6)\n"), RGBA8::new(4, 5, 6, 255));
    }

    #[test]
    fn malformed_colors_fall_back_to_black() {
        for s in ["", "rgb", "rgb 1,2,3", "rgb(1,2,3", "rgb1,2,3)",
                  "rgb(a,b,c)", "rgb(1,2)", "rgb(1.5,2,3)", "rgb(-1,2,3)",
                  "hsl(1,2,3)", "RGB(1,2,3)", "#ff0000", "red",
                  "rgb( 1,2,3)", "rgba(1,2,3,0.5,0.5)", "rgba(1,2,3,.)",
                  "xrgb(1,2,3)"] {
            assert_eq!(parse_color(s), FALLBACK, "{s:?}");
            assert_eq!(try_parse_color(s), None, "{s:?}");
        }
    }

    #[test]
    fn out_of_range_channels_fall_back_to_black() {
        assert_eq!(parse_color("rgb(256,0,0)"), FALLBACK);
        assert_eq!(parse_color("rgba(0,0,0,1.5)"), FALLBACK);
    }
}
