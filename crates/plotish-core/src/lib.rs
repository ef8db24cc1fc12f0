// File: crates/plotish-core/src/lib.rs
// Summary: Core library entry point; exports the dataset model, chart rendering and the batch renderer.

pub mod axis;
pub mod chart;
pub mod dataset;
pub mod document;
pub mod error;
pub mod figure;
pub mod legend;
pub mod line;
pub mod paint;
pub mod pgf;
pub mod render;
pub mod series;
pub mod style;
pub mod text;
pub mod theme;
pub mod types;

pub use axis::Axis;
pub use chart::{Chart, FileFormat, RenderOptions};
pub use dataset::Dataset;
pub use document::LoadOptions;
pub use error::{Error, Result};
pub use figure::FigureSpec;
pub use legend::{LegendLocation, LegendPlacementError};
pub use line::{LineSpec, LineStyle};
pub use render::{prepare_output_folder, render_dataset, Display, Frame, Outcome, OutputFormat, Renderer};
pub use series::Series;
pub use text::TextShaper;
pub use theme::Theme;
