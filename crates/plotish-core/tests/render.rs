// File: crates/plotish-core/tests/render.rs
// Purpose: Batch rendering: outcomes, file naming, sinks, legend fallback and error propagation.

use std::path::Path;

use plotish_core::{
    Dataset, Display, Error, FigureSpec, Frame, LineSpec, Outcome, OutputFormat, RenderOptions, Renderer,
};

fn figure(title: &str, legend: Option<&str>) -> FigureSpec {
    let fig = FigureSpec::new(
        title,
        "x",
        "y",
        vec![
            LineSpec::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 0.5, 2.0]).with_label("a"),
            LineSpec::new(vec![], vec![2.0, 1.5, 1.0, 0.5]).with_style("--").with_marker("o").with_label("b"),
        ],
    )
    .unwrap();
    match legend {
        Some(loc) => fig.with_legend_position(loc),
        None => fig,
    }
}

fn dataset(figures: Vec<FigureSpec>) -> Dataset {
    Dataset::load("test data", "01/01/2000", "Test", figures)
}

/// Small figures keep the tests quick.
fn small() -> RenderOptions {
    RenderOptions { width: 160, height: 120, ..RenderOptions::default() }
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[derive(Default)]
struct Recorder {
    calls: usize,
    titles: Vec<String>,
}

impl Display for Recorder {
    fn show(&mut self, frames: Vec<Frame>) -> plotish_core::Result<()> {
        self.calls += 1;
        for f in &frames {
            assert_eq!(f.rgba.len(), (f.width * f.height * 4) as usize);
        }
        self.titles.extend(frames.into_iter().map(|f| f.title));
        Ok(())
    }
}

#[test]
fn one_outcome_per_figure_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let ds = dataset(vec![figure("a", None), figure("b", Some("upper left")), figure("c", Some("None"))]);
    let outcomes = Renderer::new(dir.path(), &[OutputFormat::Png], &ds).with_options(small()).render(None).unwrap();
    assert_eq!(outcomes, vec![Outcome::Ok, Outcome::Ok, Outcome::Ok]);
}

#[test]
fn png_files_are_named_after_the_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let ds = dataset(vec![figure("a", None), figure("b", None)]);
    Renderer::new(dir.path(), &[OutputFormat::Png], &ds).with_options(small()).render(None).unwrap();
    assert_eq!(listing(dir.path()), ["Test_0.png", "Test_1.png"]);

    let bytes = std::fs::read(dir.path().join("Test_0.png")).unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    // 300 dpi against a 100 dpi logical size.
    assert_eq!((img.width(), img.height()), (480, 360));
}

#[test]
fn render_dataset_writes_files_without_display() {
    let dir = tempfile::tempdir().unwrap();
    let ds = dataset(vec![figure("a", Some("lower left"))]);
    let outcomes = plotish_core::render_dataset(dir.path(), &[OutputFormat::Pgf, OutputFormat::Show], &ds).unwrap();
    assert_eq!(outcomes, vec![Outcome::Ok]);
    assert_eq!(listing(dir.path()), ["Test_0.pgf"]);
}

#[test]
fn legend_code_given_as_text_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let ds = dataset(vec![figure("a", Some("1"))]);
    let outcomes = Renderer::new(dir.path(), &[OutputFormat::Pgf], &ds).with_options(small()).render(None).unwrap();
    assert!(outcomes[0].to_string().starts_with("Plotting:makefig legend:\n'1' is not a valid value for loc"));
    assert_eq!(listing(dir.path()), ["Test_0.pgf"]);
}

#[test]
fn invalid_legend_falls_back_and_still_writes_every_sink() {
    let dir = tempfile::tempdir().unwrap();
    let ds = dataset(vec![figure("a", Some("not-a-real-location")), figure("b", Some("best"))]);
    let formats = [OutputFormat::Png, OutputFormat::Svg, OutputFormat::Pdf, OutputFormat::Pgf];
    let outcomes = Renderer::new(dir.path(), &formats, &ds).with_options(small()).render(None).unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].to_string().starts_with("Plotting:makefig legend:\n"));
    assert!(outcomes[0].to_string().contains("not-a-real-location"));
    assert_eq!(outcomes[1], Outcome::Ok);
    assert_eq!(
        listing(dir.path()),
        ["Test_0.pdf", "Test_0.pgf", "Test_0.png", "Test_0.svg", "Test_1.pdf", "Test_1.pgf", "Test_1.png", "Test_1.svg"]
    );
}

#[test]
fn vector_outputs_have_their_signatures() {
    let dir = tempfile::tempdir().unwrap();
    let ds = dataset(vec![figure("vector", Some("lower right"))]);
    let formats = [OutputFormat::Svg, OutputFormat::Pdf, OutputFormat::Pgf];
    Renderer::new(dir.path(), &formats, &ds).with_options(small()).render(None).unwrap();

    let svg = std::fs::read_to_string(dir.path().join("Test_0.svg")).unwrap();
    assert!(svg.contains("<svg"));
    let pdf = std::fs::read(dir.path().join("Test_0.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    let pgf = std::fs::read_to_string(dir.path().join("Test_0.pgf")).unwrap();
    assert!(pgf.contains("\\begin{pgfpicture}"));
}

#[test]
fn unknown_format_writes_low_resolution_png() {
    let dir = tempfile::tempdir().unwrap();
    let ds = dataset(vec![figure("a", None)]);
    let formats = ["bmp".parse::<OutputFormat>().unwrap()];
    Renderer::new(dir.path(), &formats, &ds).with_options(small()).render(None).unwrap();

    let bytes = std::fs::read(dir.path().join("Test_0.png")).unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (80, 60));
}

#[test]
fn display_fires_once_after_all_figures() {
    let dir = tempfile::tempdir().unwrap();
    let ds = dataset(vec![figure("a", None), figure("b", None), figure("c", None)]);
    let mut rec = Recorder::default();
    let formats = [OutputFormat::Show, OutputFormat::Png];
    let outcomes = Renderer::new(dir.path(), &formats, &ds)
        .with_options(small())
        .render(Some(&mut rec))
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(rec.calls, 1);
    assert_eq!(rec.titles, ["a", "b", "c"]);
    assert_eq!(listing(dir.path()).len(), 3);
}

#[test]
fn display_is_not_called_without_show() {
    let dir = tempfile::tempdir().unwrap();
    let ds = dataset(vec![figure("a", None)]);
    let mut rec = Recorder::default();
    Renderer::new(dir.path(), &[OutputFormat::Svg], &ds).with_options(small()).render(Some(&mut rec)).unwrap();
    assert_eq!(rec.calls, 0);
}

#[test]
fn shape_mismatch_aborts_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let bad = FigureSpec::new("bad", "", "", vec![LineSpec::new(vec![1.0, 2.0, 3.0], vec![1.0, 2.0])]).unwrap();
    let ds = dataset(vec![figure("a", None), bad, figure("c", None)]);
    let err = Renderer::new(dir.path(), &[OutputFormat::Png], &ds).with_options(small()).render(None).unwrap_err();

    assert!(matches!(err, Error::ShapeMismatch { x: 3, y: 2 }));
    // The figure before the failure was written; nothing after it.
    assert_eq!(listing(dir.path()), ["Test_0.png"]);
}

#[test]
fn unknown_style_token_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let fig = FigureSpec::new("s", "", "", vec![LineSpec::new(vec![], vec![1.0, 2.0]).with_color("notacolour")]).unwrap();
    let ds = dataset(vec![fig]);
    let err = Renderer::new(dir.path(), &[OutputFormat::Png], &ds).with_options(small()).render(None).unwrap_err();
    assert!(matches!(err, Error::Style(_)));
}

#[test]
fn parallel_matches_sequential() {
    let seq_dir = tempfile::tempdir().unwrap();
    let par_dir = tempfile::tempdir().unwrap();
    let figures = (0..6)
        .map(|i| figure(&format!("f{i}"), if i % 2 == 0 { Some("center") } else { Some("nowhere") }))
        .collect();
    let ds = dataset(figures);

    let seq = Renderer::new(seq_dir.path(), &[OutputFormat::Pgf], &ds).with_options(small()).render(None).unwrap();
    let par = Renderer::new(par_dir.path(), &[OutputFormat::Pgf], &ds)
        .with_options(small())
        .parallel(true)
        .render(None)
        .unwrap();

    assert_eq!(seq, par);
    assert_eq!(listing(seq_dir.path()), listing(par_dir.path()));
    for name in listing(seq_dir.path()) {
        let a = std::fs::read(seq_dir.path().join(&name)).unwrap();
        let b = std::fs::read(par_dir.path().join(&name)).unwrap();
        assert_eq!(a, b, "{name} differs");
    }
}

#[test]
fn prepare_output_folder_accepts_existing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/out");
    plotish_core::prepare_output_folder(&out).unwrap();
    plotish_core::prepare_output_folder(&out).unwrap();
    assert!(out.is_dir());
}
