// File: crates/plotish-core/src/figure.rs
// Summary: FigureSpec, the validated description of one chart and its lines.

use serde_json::Value as JsonValue;

use crate::document::{self, LoadOptions, Object};
use crate::error::{Error, Result};
use crate::line::LineSpec;

#[derive(Clone, Debug, PartialEq)]
pub struct FigureSpec {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    /// Only set when the source enabled its second axis.
    pub zlabel: Option<String>,
    pub legend_position: Option<String>,
    /// Never empty.
    pub lines: Vec<LineSpec>,
}

impl FigureSpec {
    /// Build a figure from parts; fails when `lines` is empty.
    pub fn new(
        title: impl Into<String>,
        xlabel: impl Into<String>,
        ylabel: impl Into<String>,
        lines: Vec<LineSpec>,
    ) -> Result<Self> {
        if lines.is_empty() {
            return Err(no_lines());
        }
        Ok(Self {
            title: title.into(),
            xlabel: xlabel.into(),
            ylabel: ylabel.into(),
            zlabel: None,
            legend_position: None,
            lines,
        })
    }

    pub fn with_legend_position(mut self, position: impl Into<String>) -> Self {
        self.legend_position = Some(position.into());
        self
    }

    pub fn with_zlabel(mut self, zlabel: impl Into<String>) -> Self {
        self.zlabel = Some(zlabel.into());
        self
    }

    /// Construct from a raw figure object.
    pub fn from_json(raw: &JsonValue, opts: &LoadOptions) -> Result<Self> {
        let obj = document::as_object(raw, "figure")?;
        Self::from_object(obj, opts)
    }

    fn from_object(obj: &Object, opts: &LoadOptions) -> Result<Self> {
        let mut lines = Vec::new();
        if let Some(items) = document::opt_array(obj, "lines")? {
            for (j, item) in items.iter().enumerate() {
                let line = LineSpec::from_json(item, opts).map_err(|e| e.at(&format!("lines[{j}]")))?;
                lines.push(line);
            }
        }
        if lines.is_empty() {
            return Err(no_lines());
        }

        let zlabel = if second_axe_enabled(obj, opts) {
            Some(document::string_or(obj, "zlabel", "")?)
        } else {
            None
        };

        Ok(Self {
            title: document::string_or(obj, "title", "")?,
            xlabel: document::string_or(obj, "xlabel", "")?,
            ylabel: document::string_or(obj, "ylabel", "")?,
            zlabel,
            legend_position: document::opt_string(obj, "legend_position")?,
            lines,
        })
    }

    /// Legend placement to request, if any. The literal `"None"` disables the legend.
    pub fn requested_legend(&self) -> Option<&str> {
        self.legend_position.as_deref().filter(|p| *p != "None")
    }
}

fn no_lines() -> Error {
    Error::validation("figure has no plottable line")
}

// Historical documents spell the flag as the string "true"; a real boolean only
// counts when the caller opts in.
fn second_axe_enabled(obj: &Object, opts: &LoadOptions) -> bool {
    match document::get(obj, "second_axe") {
        Some(JsonValue::String(s)) => s == "true",
        Some(JsonValue::Bool(b)) => opts.accept_bool_second_axe && *b,
        _ => false,
    }
}
