// File: crates/plotish-core/src/line.rs
// Summary: LineSpec, the validated description of one plotted series.

use serde_json::Value as JsonValue;

use crate::document::{self, LoadOptions, Object};
use crate::error::{Error, Result};

/// Styling handed through to the chart backend. `None` means "backend default".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineStyle<'a> {
    pub color: Option<&'a str>,
    pub linestyle: Option<&'a str>,
    pub label: Option<&'a str>,
    pub marker: Option<&'a str>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineSpec {
    pub xdata: Vec<f64>,
    pub ydata: Vec<f64>,
    pub color: Option<String>,
    pub style: Option<String>,
    pub marker: Option<String>,
    pub label: Option<String>,
}

impl LineSpec {
    /// Build a line from already-known parts. `ydata` is required by type.
    pub fn new(xdata: Vec<f64>, ydata: Vec<f64>) -> Self {
        Self { xdata, ydata, color: None, style: None, marker: None, label: None }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Construct from a raw line object.
    pub fn from_json(raw: &JsonValue, opts: &LoadOptions) -> Result<Self> {
        let obj = document::as_object(raw, "line")?;
        Self::from_object(obj, opts)
    }

    fn from_object(obj: &Object, opts: &LoadOptions) -> Result<Self> {
        let ydata = match document::opt_array(obj, "ydata")? {
            Some(items) => document::numbers(items, "ydata")?,
            None => return Err(Error::validation("line has no Y data")),
        };
        let xdata = match document::opt_array(obj, "xdata")? {
            Some(items) => document::numbers(items, "xdata")?,
            None => Vec::new(),
        };
        if opts.require_matching_lengths && !xdata.is_empty() && xdata.len() != ydata.len() {
            return Err(Error::validation(format!(
                "line has {} x values but {} y values",
                xdata.len(),
                ydata.len()
            )));
        }

        Ok(Self {
            xdata,
            ydata,
            color: document::opt_string(obj, "color")?,
            style: document::opt_string(obj, "style")?,
            marker: document::opt_string(obj, "marker")?,
            label: document::opt_string(obj, "legend")?,
        })
    }

    /// Flat styling mapping for the backend's series primitive.
    pub fn kwargs(&self) -> LineStyle<'_> {
        LineStyle {
            color: self.color.as_deref(),
            linestyle: self.style.as_deref(),
            label: self.label.as_deref(),
            marker: self.marker.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_all_fields() {
        let raw = json!({
            "xdata": [0, 1, 2], "ydata": [1, 2, 3],
            "color": "purple", "style": "--", "marker": "o", "legend": "legend1"
        });
        let line = LineSpec::from_json(&raw, &LoadOptions::default()).unwrap();
        assert_eq!(line.xdata, vec![0.0, 1.0, 2.0]);
        assert_eq!(line.label.as_deref(), Some("legend1"));
        let kw = line.kwargs();
        assert_eq!(kw.color, Some("purple"));
        assert_eq!(kw.linestyle, Some("--"));
        assert_eq!(kw.marker, Some("o"));
    }

    #[test]
    fn missing_ydata_fails() {
        let raw = json!({"xdata": [1, 2]});
        let err = LineSpec::from_json(&raw, &LoadOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "line has no Y data");
    }

    #[test]
    fn xdata_defaults_to_empty_and_style_to_none() {
        let raw = json!({"ydata": [3, 4]});
        let line = LineSpec::from_json(&raw, &LoadOptions::default()).unwrap();
        assert!(line.xdata.is_empty());
        assert_eq!(line.kwargs(), LineStyle::default());
    }

    #[test]
    fn length_check_is_opt_in() {
        let raw = json!({"xdata": [1, 2, 3], "ydata": [1, 2]});
        assert!(LineSpec::from_json(&raw, &LoadOptions::default()).is_ok());
        let strict = LoadOptions { require_matching_lengths: true, ..LoadOptions::default() };
        assert!(matches!(LineSpec::from_json(&raw, &strict), Err(Error::Validation(_))));
    }
}
