// File: crates/plotish-core/src/error.rs
// Summary: Error taxonomy shared by loading, painting and dispatch.

use std::path::PathBuf;

use thiserror::Error;

use crate::legend::LegendPlacementError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The document path does not exist.
    #[error("no such file: {}", path.display())]
    NotFound { path: PathBuf },

    /// The document is not well-formed JSON, or its top level is not an object.
    /// The serde_json detail is the error source.
    #[error("cannot parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Same as `Parse`, for documents handed over as text.
    #[error("cannot parse document: {0}")]
    ParseStr(String),

    /// A figure or line failed its construction invariants.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    LegendPlacement(#[from] LegendPlacementError),

    /// `xdata` and `ydata` of a series disagree in length.
    #[error("x and y must have same first dimension, but have shapes ({x},) and ({y},)")]
    ShapeMismatch { x: usize, y: usize },

    /// Unknown colour, line style or marker token.
    #[error("{0}")]
    Style(String),

    #[error("render failed: {0}")]
    Render(String),

    #[error("display failed: {0}")]
    Display(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Prefix a validation message with the location it was raised at.
    pub(crate) fn at(self, location: &str) -> Self {
        match self {
            Error::Validation(msg) => Error::Validation(format!("{location}: {msg}")),
            other => other,
        }
    }
}
