// File: crates/plotish-core/src/render.rs
// Summary: Renderer: builds one chart per figure, dispatches it to the requested sinks and reports per-figure outcomes.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::chart::{Chart, FileFormat, RenderOptions, AUTOSCALE_MARGIN};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::figure::FigureSpec;
use crate::types::{DEFAULT_DPI, FALLBACK_DPI};

/// A requested output sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Pgf,
    Png,
    Svg,
    /// Deferred on-screen display.
    Show,
    /// Unrecognised token; written as a low resolution PNG.
    Unknown(String),
}

impl OutputFormat {
    /// File format and DPI for file sinks; `None` for the display sink.
    pub fn file_target(&self) -> Option<(FileFormat, u32)> {
        match self {
            OutputFormat::Pdf => Some((FileFormat::Pdf, DEFAULT_DPI)),
            OutputFormat::Pgf => Some((FileFormat::Pgf, DEFAULT_DPI)),
            OutputFormat::Png => Some((FileFormat::Png, DEFAULT_DPI)),
            OutputFormat::Svg => Some((FileFormat::Svg, DEFAULT_DPI)),
            OutputFormat::Show => None,
            OutputFormat::Unknown(_) => Some((FileFormat::Png, FALLBACK_DPI)),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => OutputFormat::Pdf,
            "pgf" => OutputFormat::Pgf,
            "png" => OutputFormat::Png,
            "svg" => OutputFormat::Svg,
            "show" => OutputFormat::Show,
            _ => OutputFormat::Unknown(s.to_string()),
        })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pdf => f.write_str("pdf"),
            OutputFormat::Pgf => f.write_str("pgf"),
            OutputFormat::Png => f.write_str("png"),
            OutputFormat::Svg => f.write_str("svg"),
            OutputFormat::Show => f.write_str("show"),
            OutputFormat::Unknown(token) => f.write_str(token),
        }
    }
}

/// Result of rendering one figure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    /// The requested legend location was rejected; the legend fell back to `best`.
    LegendFallback(String),
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ok => f.write_str("OK"),
            Outcome::LegendFallback(detail) => write!(f, "Plotting:makefig legend:\n{detail}"),
        }
    }
}

/// One rendered figure handed to a display sink.
#[derive(Clone, Debug)]
pub struct Frame {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Unpremultiplied RGBA8, `width * 4` bytes per row.
    pub rgba: Vec<u8>,
}

/// On-screen sink. Called at most once per render, after every figure has been emitted.
pub trait Display {
    fn show(&mut self, frames: Vec<Frame>) -> Result<()>;
}

/// Create the output folder (and parents). An existing folder is fine.
pub fn prepare_output_folder(path: impl AsRef<Path>) -> Result<()> {
    std::fs::create_dir_all(path.as_ref())?;
    Ok(())
}

pub struct Renderer<'a> {
    outfolder: PathBuf,
    formats: Vec<OutputFormat>,
    dataset: &'a Dataset,
    options: RenderOptions,
    parallel: bool,
}

impl<'a> Renderer<'a> {
    pub fn new(outfolder: impl Into<PathBuf>, formats: &[OutputFormat], dataset: &'a Dataset) -> Self {
        Self {
            outfolder: outfolder.into(),
            formats: formats.to_vec(),
            dataset,
            options: RenderOptions::default(),
            parallel: false,
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Render figures on the rayon pool. Outcomes keep dataset order.
    pub fn parallel(mut self, on: bool) -> Self {
        self.parallel = on;
        self
    }

    /// Path of figure `index` for extension `ext`.
    pub fn output_path(&self, index: usize, ext: &str) -> PathBuf {
        self.outfolder.join(format!("{}_{}.{}", self.dataset.name, index, ext))
    }

    /// Render every figure to every sink and return one outcome per figure.
    ///
    /// Only a rejected legend location is recovered (see [`Outcome::LegendFallback`]);
    /// any other failure aborts the batch.
    pub fn render(&self, display: Option<&mut dyn Display>) -> Result<Vec<Outcome>> {
        info!(
            "rendering {} figure(s) of '{}' to {} as [{}]",
            self.dataset.len(),
            self.dataset.name,
            self.outfolder.display(),
            self.formats.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        );
        for format in &self.formats {
            if let OutputFormat::Unknown(token) = format {
                warn!("unknown format '{token}', writing PNG at {FALLBACK_DPI} dpi");
            }
        }

        let figures = &self.dataset.figures;
        let rendered: Vec<(Outcome, Option<Frame>)> = if self.parallel {
            let results: Vec<Result<_>> = figures
                .par_iter()
                .enumerate()
                .map(|(i, fig)| self.render_figure(i, fig))
                .collect();
            results.into_iter().collect::<Result<_>>()?
        } else {
            figures
                .iter()
                .enumerate()
                .map(|(i, fig)| self.render_figure(i, fig))
                .collect::<Result<_>>()?
        };

        let mut outcomes = Vec::with_capacity(rendered.len());
        let mut frames = Vec::new();
        for (outcome, frame) in rendered {
            outcomes.push(outcome);
            frames.extend(frame);
        }

        let show_requested = self.formats.contains(&OutputFormat::Show);
        if show_requested {
            match display {
                Some(sink) => {
                    debug!("showing {} frame(s)", frames.len());
                    sink.show(frames)?;
                }
                None => warn!("display requested but no display sink is attached"),
            }
        }
        Ok(outcomes)
    }

    fn render_figure(&self, index: usize, fig: &FigureSpec) -> Result<(Outcome, Option<Frame>)> {
        let mut chart = Chart::new();
        chart.set_title(&fig.title);
        chart.set_xlabel(&fig.xlabel);
        chart.set_ylabel(&fig.ylabel);
        for line in &fig.lines {
            chart.plot(&line.xdata, &line.ydata, &line.kwargs(), &self.options.theme)?;
        }
        chart.autoscale_axes(AUTOSCALE_MARGIN);

        let mut outcome = Outcome::Ok;
        if let Some(loc) = fig.requested_legend() {
            if let Err(e) = chart.legend(loc) {
                warn!("figure {index}: {e}; using best legend location");
                chart.legend_best();
                outcome = Outcome::LegendFallback(e.to_string());
            }
        }

        let mut frame = None;
        for format in &self.formats {
            match format.file_target() {
                Some((file, dpi)) => {
                    let path = self.output_path(index, file.extension());
                    chart.save(&path, file, dpi, &self.options)?;
                }
                None => {
                    if frame.is_none() {
                        let (rgba, width, height, _) = chart.render_to_rgba8(&self.options)?;
                        frame = Some(Frame { title: fig.title.clone(), width, height, rgba });
                    }
                }
            }
        }
        info!("figure {index} '{}': {outcome}", fig.title);
        Ok((outcome, frame))
    }
}

/// Convenience wrapper for callers that only need the outcomes.
pub fn render_dataset(
    outfolder: impl Into<PathBuf>,
    formats: &[OutputFormat],
    dataset: &Dataset,
) -> Result<Vec<Outcome>> {
    Renderer::new(outfolder, formats, dataset).render(None)
}
