// File: crates/plotish-core/src/series.rs
// Summary: Series model: resolved coordinates plus the styling the painter needs.

use skia_safe as skia;

use crate::error::{Error, Result};
use crate::line::LineStyle;
use crate::style::{parse_color, Dash, Marker};
use crate::theme::Theme;

/// Stroke width of series lines, logical pixels.
pub const LINE_WIDTH: f32 = 1.5;
/// Nominal marker diameter, logical pixels.
pub const MARKER_SIZE: f32 = 8.0;

#[derive(Clone, Debug)]
pub struct Series {
    /// (x, y) pairs; non-finite values break the line.
    pub data_xy: Vec<(f64, f64)>,
    pub color: skia::Color,
    pub dash: Dash,
    pub marker: Option<Marker>,
    pub label: Option<String>,
}

impl Series {
    /// Resolve a line's data and style tokens. An empty `x` plots `y` against its indices.
    /// `auto_color` is used when the style names no colour.
    pub fn resolve(
        x: &[f64],
        y: &[f64],
        style: &LineStyle<'_>,
        theme: &Theme,
        auto_color: skia::Color,
    ) -> Result<Self> {
        let data_xy = if x.is_empty() {
            y.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect()
        } else if x.len() == y.len() {
            x.iter().copied().zip(y.iter().copied()).collect()
        } else {
            return Err(Error::ShapeMismatch { x: x.len(), y: y.len() });
        };

        let color = match style.color {
            Some(token) => parse_color(token, theme)?,
            None => auto_color,
        };
        let dash = match style.linestyle {
            Some(token) => Dash::parse(token)?,
            None => Dash::Solid,
        };
        let marker = match style.marker {
            Some(token) => Marker::parse(token)?,
            None => None,
        };

        Ok(Self {
            data_xy,
            color,
            dash,
            marker,
            label: style.label.map(str::to_string),
        })
    }

    /// Whether this series gets a legend entry. Labels starting with `_` are hidden.
    pub fn in_legend(&self) -> bool {
        self.label.as_deref().map_or(false, |l| !l.is_empty() && !l.starts_with('_'))
    }

    /// Runs of consecutive finite points; each run is drawn as one polyline.
    pub fn segments(&self) -> Vec<&[(f64, f64)]> {
        self.data_xy
            .split(|(x, y)| !x.is_finite() || !y.is_finite())
            .filter(|run| !run.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(x: &[f64], y: &[f64], style: LineStyle<'_>) -> Result<Series> {
        Series::resolve(x, y, &style, &Theme::ggplot(), skia::Color::BLACK)
    }

    #[test]
    fn empty_x_uses_indices() {
        let s = resolve(&[], &[5.0, 6.0], LineStyle::default()).unwrap();
        assert_eq!(s.data_xy, vec![(0.0, 5.0), (1.0, 6.0)]);
        assert_eq!(s.color, skia::Color::BLACK);
        assert_eq!(s.dash, Dash::Solid);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = resolve(&[1.0, 2.0, 3.0], &[1.0], LineStyle::default()).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { x: 3, y: 1 }));
    }

    #[test]
    fn nan_splits_segments() {
        let s = resolve(&[], &[1.0, f64::NAN, 2.0, 3.0], LineStyle::default()).unwrap();
        let segs = s.segments();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[1].len(), 2);
    }

    #[test]
    fn underscore_labels_are_hidden() {
        let style = LineStyle { label: Some("_hidden"), ..LineStyle::default() };
        assert!(!resolve(&[], &[1.0], style).unwrap().in_legend());
        let style = LineStyle { label: Some("shown"), ..LineStyle::default() };
        assert!(resolve(&[], &[1.0], style).unwrap().in_legend());
    }
}
