// File: crates/plotish-cli/src/main.rs
// Summary: `plotish` binary: parse arguments, load the dataset, render every figure and report warnings.

mod window;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, ValueHint};
use log::info;
use plotish_core::{prepare_output_folder, theme, Dataset, LoadOptions, Outcome, OutputFormat, RenderOptions, Renderer};

use crate::window::WindowDisplay;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render the figures of a JSON dataset document", long_about = None)]
struct Cli {
    /// Dataset document (JSON)
    #[arg(value_hint = ValueHint::FilePath)]
    filename: Option<PathBuf>,

    /// Folder receiving `{name}_{index}.{ext}`
    #[arg(env = "PLOTISH_OUT", default_value = "out", value_hint = ValueHint::DirPath)]
    outfolder: PathBuf,

    /// Output sink: pdf, pgf, png, svg or show. Repeatable; unknown values write a 50 dpi PNG
    #[arg(short, long = "format", default_value = "png", action = ArgAction::Append)]
    formats: Vec<OutputFormat>,

    /// Colour theme (ggplot, light, dark)
    #[arg(long, default_value = "ggplot")]
    theme: String,

    /// Render figures in parallel
    #[arg(long, action = ArgAction::SetTrue)]
    parallel: bool,

    /// Also treat a JSON `true` as enabling `second_axe`
    #[arg(long, action = ArgAction::SetTrue)]
    accept_bool_second_axe: bool,

    /// Reject lines whose xdata and ydata lengths differ when loading
    #[arg(long, action = ArgAction::SetTrue)]
    require_matching_lengths: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let Some(filename) = cli.filename.as_deref() else {
        println!("{}", usage());
        return;
    };

    match run(&cli, filename) {
        Ok(outcomes) => {
            for line in warning_lines(&outcomes) {
                println!("{line}");
            }
        }
        Err(e) => {
            println!("{}", error_line(&e));
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli, filename: &Path) -> Result<Vec<Outcome>> {
    prepare_output_folder(&cli.outfolder)
        .with_context(|| format!("cannot create output folder {}", cli.outfolder.display()))?;

    let load = LoadOptions {
        accept_bool_second_axe: cli.accept_bool_second_axe,
        require_matching_lengths: cli.require_matching_lengths,
    };
    let dataset = Dataset::load_from_document_with(filename, &load)?;
    info!("loaded");

    let options = RenderOptions { theme: theme::find(&cli.theme), ..RenderOptions::default() };
    let renderer = Renderer::new(&cli.outfolder, &cli.formats, &dataset)
        .with_options(options)
        .parallel(cli.parallel);

    let mut display = WindowDisplay::default();
    let outcomes = renderer.render(Some(&mut display))?;
    Ok(outcomes)
}

fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// One `Warning:` line per non-OK outcome, in figure order.
fn warning_lines(outcomes: &[Outcome]) -> Vec<String> {
    outcomes.iter().filter(|o| !o.is_ok()).map(|o| format!("Warning: {o}")).collect()
}

fn error_line(e: &anyhow::Error) -> String {
    format!("Error: {e:#}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["plotish", "doc.json"]).unwrap();
        assert_eq!(cli.filename.as_deref(), Some(Path::new("doc.json")));
        assert_eq!(cli.formats, vec![OutputFormat::Png]);
        assert_eq!(cli.theme, "ggplot");
        assert!(!cli.parallel);
    }

    #[test]
    fn repeated_formats_replace_the_default() {
        let cli = Cli::try_parse_from(["plotish", "-f", "svg", "--format", "show", "-f", "tiff", "doc.json", "dir"]).unwrap();
        assert_eq!(cli.formats, vec![OutputFormat::Svg, OutputFormat::Show, OutputFormat::Unknown("tiff".into())]);
        assert_eq!(cli.outfolder, PathBuf::from("dir"));
    }

    #[test]
    fn filename_is_optional() {
        let cli = Cli::try_parse_from(["plotish"]).unwrap();
        assert!(cli.filename.is_none());
    }

    #[test]
    fn only_failed_outcomes_become_warnings() {
        let outcomes = [Outcome::Ok, Outcome::LegendFallback("x".into()), Outcome::Ok];
        assert_eq!(warning_lines(&outcomes), vec!["Warning: Plotting:makefig legend:\nx".to_string()]);
        assert!(warning_lines(&[Outcome::Ok]).is_empty());
    }

    #[test]
    fn missing_document_is_reported_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let cli = Cli::try_parse_from(["plotish", "absent.json", out.to_str().unwrap()]).unwrap();
        let err = run(&cli, &dir.path().join("absent.json")).unwrap_err();
        assert!(format!("{err:#}").starts_with("no such file"), "{err:#}");
        assert!(error_line(&err).starts_with("Error: no such file"));
        // The output folder is prepared before loading.
        assert!(out.is_dir());
    }

    #[test]
    fn malformed_document_error_names_the_cause_once() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("bad.json");
        std::fs::write(&doc, "{\"data\": [").unwrap();
        let cli = Cli::try_parse_from(["plotish", doc.to_str().unwrap(), dir.path().to_str().unwrap()]).unwrap();
        let line = error_line(&run(&cli, &doc).unwrap_err());
        assert!(line.starts_with("Error: cannot parse "), "{line}");
        assert_eq!(line.matches("EOF").count(), 1, "{line}");
    }

    #[test]
    fn usage_names_the_arguments() {
        let text = usage();
        assert!(text.contains("Usage"));
        assert!(text.contains("FILENAME"));
        assert!(text.contains("--format"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
