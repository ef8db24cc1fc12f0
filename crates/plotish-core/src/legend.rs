// File: crates/plotish-core/src/legend.rs
// Summary: Legend location tokens, their validation, and box placement inside the axes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::types::Area;

/// Accepted location names, indexed by their numeric code.
const LOCATIONS: [&str; 11] = [
    "best",
    "upper right",
    "upper left",
    "lower left",
    "lower right",
    "right",
    "center left",
    "center right",
    "lower center",
    "upper center",
    "center",
];

/// A legend location token that the backend does not understand.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("'{token}' is not a valid value for loc; supported values are {}", supported())]
pub struct LegendPlacementError {
    pub token: String,
}

fn supported() -> String {
    LOCATIONS.iter().map(|l| format!("'{l}'")).collect::<Vec<_>>().join(", ")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendLocation {
    Best,
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
    Right,
    CenterLeft,
    CenterRight,
    LowerCenter,
    UpperCenter,
    Center,
}

impl LegendLocation {
    const ALL: [LegendLocation; 11] = [
        LegendLocation::Best,
        LegendLocation::UpperRight,
        LegendLocation::UpperLeft,
        LegendLocation::LowerLeft,
        LegendLocation::LowerRight,
        LegendLocation::Right,
        LegendLocation::CenterLeft,
        LegendLocation::CenterRight,
        LegendLocation::LowerCenter,
        LegendLocation::UpperCenter,
        LegendLocation::Center,
    ];

    pub fn code(&self) -> usize {
        Self::ALL.iter().position(|l| l == self).unwrap_or(0)
    }

    pub fn name(&self) -> &'static str {
        LOCATIONS[self.code()]
    }

    /// Top-left corner of a `w`×`h` legend box placed in `axes` with padding `pad`.
    /// `Best` has no fixed anchor and is resolved by [`best_location`].
    pub fn anchor(&self, axes: &Area, w: f32, h: f32, pad: f32) -> (f32, f32) {
        let left = axes.left + pad;
        let right = axes.right - pad - w;
        let hcenter = axes.left + (axes.width() - w) / 2.0;
        let top = axes.top + pad;
        let bottom = axes.bottom - pad - h;
        let vcenter = axes.top + (axes.height() - h) / 2.0;
        match self {
            LegendLocation::Best | LegendLocation::UpperRight => (right, top),
            LegendLocation::UpperLeft => (left, top),
            LegendLocation::LowerLeft => (left, bottom),
            LegendLocation::LowerRight => (right, bottom),
            LegendLocation::Right | LegendLocation::CenterRight => (right, vcenter),
            LegendLocation::CenterLeft => (left, vcenter),
            LegendLocation::LowerCenter => (hcenter, bottom),
            LegendLocation::UpperCenter => (hcenter, top),
            LegendLocation::Center => (hcenter, vcenter),
        }
    }
}

impl FromStr for LegendLocation {
    type Err = LegendPlacementError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        // Names only; a numeric code given as a string is rejected.
        match LOCATIONS.iter().position(|l| *l == token) {
            Some(i) => Ok(Self::ALL[i]),
            None => Err(LegendPlacementError { token: token.to_string() }),
        }
    }
}

impl fmt::Display for LegendLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick the fixed location whose box covers the fewest of `points`.
/// Ties go to the earlier location code, so an empty plot lands upper right.
pub fn best_location(axes: &Area, w: f32, h: f32, pad: f32, points: &[(f32, f32)]) -> LegendLocation {
    let mut best = LegendLocation::UpperRight;
    let mut best_hits = usize::MAX;
    for loc in LegendLocation::ALL.iter().skip(1) {
        let (x, y) = loc.anchor(axes, w, h, pad);
        let bbox = Area::from_xywh(x, y, w, h);
        let hits = points.iter().filter(|p| bbox.contains(**p)).count();
        if hits < best_hits {
            best_hits = hits;
            best = *loc;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_only() {
        assert_eq!("upper left".parse::<LegendLocation>().unwrap(), LegendLocation::UpperLeft);
        assert_eq!("right".parse::<LegendLocation>().unwrap(), LegendLocation::Right);
        assert_eq!("center".parse::<LegendLocation>().unwrap(), LegendLocation::Center);
        assert_eq!(LegendLocation::Center.code(), 10);
        for code in ["0", "1", "10", "11"] {
            let err = code.parse::<LegendLocation>().unwrap_err();
            assert_eq!(err.token, code);
        }
    }

    #[test]
    fn rejection_lists_supported_values() {
        let err = "not-a-real-location".parse::<LegendLocation>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("'not-a-real-location' is not a valid value for loc"));
        assert!(msg.contains("'upper right'"));
    }

    #[test]
    fn best_avoids_data() {
        let axes = Area::from_ltrb(0.0, 0.0, 100.0, 100.0);
        // Data crowding the upper right corner.
        let pts: Vec<(f32, f32)> = (0..20).map(|i| (80.0 + i as f32, 5.0 + i as f32)).collect();
        let loc = best_location(&axes, 30.0, 20.0, 2.0, &pts);
        assert_ne!(loc, LegendLocation::UpperRight);
        assert_eq!(best_location(&axes, 30.0, 20.0, 2.0, &[]), LegendLocation::UpperRight);
    }
}
