// File: crates/plotish-core/src/dataset.rs
// Summary: Dataset, the top-level parsed unit; document loading and defaulting.

use std::path::Path;

use log::info;

use crate::document::{self, LoadOptions, Object};
use crate::error::Result;
use crate::figure::FigureSpec;

pub const DEFAULT_DATE: &str = "01/01/1900";
pub const DEFAULT_DESCRIPTION: &str = "No description";
pub const DEFAULT_NAME: &str = "figure";

/// Dataset metadata plus its figures, in document order.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub date: String,
    pub description: String,
    pub name: String,
    pub figures: Vec<FigureSpec>,
}

impl Dataset {
    /// Assemble a dataset from already-validated figures.
    pub fn load(
        description: impl Into<String>,
        date: impl Into<String>,
        name: impl Into<String>,
        figures: Vec<FigureSpec>,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            name: name.into(),
            figures,
        }
    }

    /// Read the JSON document at `path` with default options.
    pub fn load_from_document(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_from_document_with(path, &LoadOptions::default())
    }

    pub fn load_from_document_with(path: impl AsRef<Path>, opts: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let root = document::read_document(path)?;
        let ds = Self::from_object(&root, opts)?;
        info!("loaded dataset '{}' ({} figures) from {}", ds.name, ds.len(), path.display());
        Ok(ds)
    }

    /// Parse a dataset from document text.
    pub fn from_json_str(text: &str, opts: &LoadOptions) -> Result<Self> {
        let root = document::parse_document(text)?;
        Self::from_object(&root, opts)
    }

    fn from_object(root: &Object, opts: &LoadOptions) -> Result<Self> {
        let mut figures = Vec::new();
        if let Some(items) = document::opt_array(root, "data")? {
            figures.reserve(items.len());
            for (i, item) in items.iter().enumerate() {
                let fig = FigureSpec::from_json(item, opts).map_err(|e| e.at(&format!("data[{i}]")))?;
                figures.push(fig);
            }
        }

        Ok(Self {
            date: document::string_or(root, "date", DEFAULT_DATE)?,
            description: document::string_or(root, "description", DEFAULT_DESCRIPTION)?,
            name: document::string_or(root, "name", DEFAULT_NAME)?,
            figures,
        })
    }

    /// Number of figures.
    pub fn len(&self) -> usize {
        self.figures.len()
    }

    /// Whether the dataset holds no figures.
    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }
}
