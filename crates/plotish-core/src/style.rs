// File: crates/plotish-core/src/style.rs
// Summary: Colour, line style and marker tokens understood by the series primitive.

use skia_safe as skia;

use crate::error::{Error, Result};
use crate::theme::{Theme, TAB10};

/// How consecutive points of a series are connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dash {
    Solid,
    Dashed,
    DashDot,
    Dotted,
    /// No connecting line; markers only.
    Hidden,
}

impl Dash {
    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "-" | "solid" => Ok(Dash::Solid),
            "--" | "dashed" => Ok(Dash::Dashed),
            "-." | "dashdot" => Ok(Dash::DashDot),
            ":" | "dotted" => Ok(Dash::Dotted),
            "" | " " | "None" | "none" => Ok(Dash::Hidden),
            other => Err(Error::Style(format!(
                "'{other}' is not a valid value for linestyle; supported values are '-', '--', '-.', ':', 'None', ' ', '', 'solid', 'dashed', 'dashdot', 'dotted'"
            ))),
        }
    }

    /// On/off intervals in multiples of the stroke width; `None` for solid.
    pub fn intervals(&self) -> Option<&'static [f32]> {
        match self {
            Dash::Solid | Dash::Hidden => None,
            Dash::Dashed => Some(&[3.7, 1.6]),
            Dash::DashDot => Some(&[6.4, 1.6, 1.0, 1.6]),
            Dash::Dotted => Some(&[1.0, 1.65]),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Point,
    Pixel,
    Square,
    Diamond,
    ThinDiamond,
    TriangleUp,
    TriangleDown,
    TriangleLeft,
    TriangleRight,
    Pentagon,
    Hexagon,
    Hexagon2,
    Star,
    Plus,
    Cross,
    VLine,
    HLine,
}

/// Geometry of a marker centred on a point.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkerShape {
    Circle(f32),
    Polygon(Vec<(f32, f32)>),
    /// Stroked segments (for `+`, `x`, `|`, `_`).
    Strokes(Vec<[(f32, f32); 2]>),
}

impl Marker {
    /// Parse a marker token; `Ok(None)` means "no marker".
    pub fn parse(token: &str) -> Result<Option<Self>> {
        let m = match token {
            "" | " " | "None" | "none" => return Ok(None),
            "o" => Marker::Circle,
            "." => Marker::Point,
            "," => Marker::Pixel,
            "s" => Marker::Square,
            "D" => Marker::Diamond,
            "d" => Marker::ThinDiamond,
            "^" => Marker::TriangleUp,
            "v" => Marker::TriangleDown,
            "<" => Marker::TriangleLeft,
            ">" => Marker::TriangleRight,
            "p" => Marker::Pentagon,
            "h" => Marker::Hexagon,
            "H" => Marker::Hexagon2,
            "*" => Marker::Star,
            "+" => Marker::Plus,
            "x" => Marker::Cross,
            "|" => Marker::VLine,
            "_" => Marker::HLine,
            other => {
                return Err(Error::Style(format!("Unrecognized marker style '{other}'")));
            }
        };
        Ok(Some(m))
    }

    /// Marker outline for a nominal size `s` (diameter, logical pixels).
    pub fn shape(&self, (cx, cy): (f32, f32), s: f32) -> MarkerShape {
        let r = s / 2.0;
        let at = |dx: f32, dy: f32| (cx + dx, cy + dy);
        match self {
            Marker::Circle => MarkerShape::Circle(r),
            Marker::Point => MarkerShape::Circle(r * 0.5),
            Marker::Pixel => MarkerShape::Circle(0.75),
            Marker::Square => {
                let h = r * 0.85;
                MarkerShape::Polygon(vec![at(-h, -h), at(h, -h), at(h, h), at(-h, h)])
            }
            Marker::Diamond => MarkerShape::Polygon(vec![at(0.0, -r), at(r, 0.0), at(0.0, r), at(-r, 0.0)]),
            Marker::ThinDiamond => {
                MarkerShape::Polygon(vec![at(0.0, -r), at(r * 0.6, 0.0), at(0.0, r), at(-r * 0.6, 0.0)])
            }
            Marker::TriangleUp => MarkerShape::Polygon(regular(cx, cy, r, 3, -90.0)),
            Marker::TriangleDown => MarkerShape::Polygon(regular(cx, cy, r, 3, 90.0)),
            Marker::TriangleLeft => MarkerShape::Polygon(regular(cx, cy, r, 3, 180.0)),
            Marker::TriangleRight => MarkerShape::Polygon(regular(cx, cy, r, 3, 0.0)),
            Marker::Pentagon => MarkerShape::Polygon(regular(cx, cy, r, 5, -90.0)),
            Marker::Hexagon => MarkerShape::Polygon(regular(cx, cy, r, 6, -90.0)),
            Marker::Hexagon2 => MarkerShape::Polygon(regular(cx, cy, r, 6, 0.0)),
            Marker::Star => {
                let outer = regular(cx, cy, r, 5, -90.0);
                let inner = regular(cx, cy, r * 0.4, 5, -54.0);
                let pts = outer.into_iter().zip(inner).flat_map(|(o, i)| [o, i]).collect();
                MarkerShape::Polygon(pts)
            }
            Marker::Plus => MarkerShape::Strokes(vec![[at(-r, 0.0), at(r, 0.0)], [at(0.0, -r), at(0.0, r)]]),
            Marker::Cross => {
                let d = r * 0.8;
                MarkerShape::Strokes(vec![[at(-d, -d), at(d, d)], [at(-d, d), at(d, -d)]])
            }
            Marker::VLine => MarkerShape::Strokes(vec![[at(0.0, -r), at(0.0, r)]]),
            Marker::HLine => MarkerShape::Strokes(vec![[at(-r, 0.0), at(r, 0.0)]]),
        }
    }
}

fn regular(cx: f32, cy: f32, r: f32, n: usize, start_deg: f32) -> Vec<(f32, f32)> {
    (0..n)
        .map(|k| {
            let a = (start_deg + 360.0 * k as f32 / n as f32).to_radians();
            (cx + r * a.cos(), cy + r * a.sin())
        })
        .collect()
}

const NAMED: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("white", 0xFFFFFF),
    ("red", 0xFF0000),
    ("green", 0x008000),
    ("blue", 0x0000FF),
    ("cyan", 0x00FFFF),
    ("aqua", 0x00FFFF),
    ("magenta", 0xFF00FF),
    ("fuchsia", 0xFF00FF),
    ("yellow", 0xFFFF00),
    ("orange", 0xFFA500),
    ("purple", 0x800080),
    ("pink", 0xFFC0CB),
    ("brown", 0xA52A2A),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("lightgray", 0xD3D3D3),
    ("lightgrey", 0xD3D3D3),
    ("darkgray", 0xA9A9A9),
    ("darkgrey", 0xA9A9A9),
    ("silver", 0xC0C0C0),
    ("olive", 0x808000),
    ("navy", 0x000080),
    ("teal", 0x008080),
    ("lime", 0x00FF00),
    ("maroon", 0x800000),
    ("gold", 0xFFD700),
    ("violet", 0xEE82EE),
    ("indigo", 0x4B0082),
    ("turquoise", 0x40E0D0),
    ("salmon", 0xFA8072),
    ("coral", 0xFF7F50),
    ("tomato", 0xFF6347),
    ("crimson", 0xDC143C),
    ("orchid", 0xDA70D6),
    ("khaki", 0xF0E68C),
    ("tan", 0xD2B48C),
    ("beige", 0xF5F5DC),
    ("chocolate", 0xD2691E),
    ("darkblue", 0x00008B),
    ("darkgreen", 0x006400),
    ("darkred", 0x8B0000),
    ("darkorange", 0xFF8C00),
    ("lightblue", 0xADD8E6),
    ("lightgreen", 0x90EE90),
    ("skyblue", 0x87CEEB),
    ("steelblue", 0x4682B4),
    ("royalblue", 0x4169E1),
    ("forestgreen", 0x228B22),
    ("seagreen", 0x2E8B57),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
];

const SHORT: &[(char, u32)] = &[
    ('b', 0x0000FF),
    ('g', 0x008000),
    ('r', 0xFF0000),
    ('c', 0x00BFBF),
    ('m', 0xBF00BF),
    ('y', 0xBFBF00),
    ('k', 0x000000),
    ('w', 0xFFFFFF),
];

const TABLEAU: &[&str] = &[
    "blue", "orange", "green", "red", "purple", "brown", "pink", "gray", "olive", "cyan",
];

fn opaque(rgb: u32) -> skia::Color {
    skia::Color::new(0xFF00_0000 | rgb)
}

/// Resolve a colour token against `theme` (for `C0`..`C9`).
pub fn parse_color(token: &str, theme: &Theme) -> Result<skia::Color> {
    let t = token.trim();
    let invalid = || Error::Style(format!("'{token}' is not a valid color value."));

    if let Some(hex) = t.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(invalid);
    }
    let mut chars = t.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some(&(_, rgb)) = SHORT.iter().find(|(k, _)| *k == c) {
            return Ok(opaque(rgb));
        }
    }
    if let Some(n) = t.strip_prefix('C').and_then(|d| d.parse::<usize>().ok()) {
        return Ok(theme.cycle_color(n));
    }
    let lower = t.to_ascii_lowercase();
    if let Some(name) = lower.strip_prefix("tab:") {
        if let Some(k) = TABLEAU.iter().position(|n| *n == name || (name == "grey" && *n == "gray")) {
            return Ok(TAB10[k]);
        }
        return Err(invalid());
    }
    if let Some(&(_, rgb)) = NAMED.iter().find(|(n, _)| *n == lower) {
        return Ok(opaque(rgb));
    }
    // Grey level, "0.0" (black) to "1.0" (white).
    if let Ok(level) = t.parse::<f32>() {
        if (0.0..=1.0).contains(&level) {
            let v = (level * 255.0).round() as u8;
            return Ok(skia::Color::from_rgb(v, v, v));
        }
    }
    Err(invalid())
}

fn parse_hex(hex: &str) -> Option<skia::Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let d = |i: usize| byte(&hex[i..i + 1]).map(|v| v * 17);
            Some(skia::Color::from_rgb(d(0)?, d(1)?, d(2)?))
        }
        6 => Some(skia::Color::from_rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
        8 => Some(skia::Color::from_argb(
            byte(&hex[6..8])?,
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colours() {
        let th = Theme::ggplot();
        assert_eq!(parse_color("purple", &th).unwrap(), skia::Color::from_rgb(0x80, 0, 0x80));
        assert_eq!(parse_color("r", &th).unwrap(), skia::Color::from_rgb(255, 0, 0));
        assert_eq!(parse_color("#0f0", &th).unwrap(), skia::Color::from_rgb(0, 255, 0));
        assert_eq!(parse_color("#11223380", &th).unwrap(), skia::Color::from_argb(0x80, 0x11, 0x22, 0x33));
        assert_eq!(parse_color("0.0", &th).unwrap(), skia::Color::from_rgb(0, 0, 0));
        assert_eq!(parse_color("C1", &th).unwrap(), th.cycle_color(1));
        assert_eq!(parse_color("tab:orange", &th).unwrap(), TAB10[1]);
        assert!(matches!(parse_color("notacolor", &th), Err(Error::Style(_))));
        assert!(parse_color("#12345", &th).is_err());
        assert!(parse_color("1.5", &th).is_err());
    }

    #[test]
    fn dashes_and_markers() {
        assert_eq!(Dash::parse("--").unwrap(), Dash::Dashed);
        assert_eq!(Dash::parse("").unwrap(), Dash::Hidden);
        assert!(Dash::parse("~~").is_err());
        assert_eq!(Marker::parse("").unwrap(), None);
        assert_eq!(Marker::parse("o").unwrap(), Some(Marker::Circle));
        assert!(Marker::parse("Q").is_err());
    }

    #[test]
    fn star_alternates_outer_and_inner_points() {
        match Marker::Star.shape((0.0, 0.0), 10.0) {
            MarkerShape::Polygon(pts) => assert_eq!(pts.len(), 10),
            other => panic!("unexpected shape {other:?}"),
        }
    }
}
