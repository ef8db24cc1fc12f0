// File: crates/plotish-core/src/chart.rs
// Summary: Chart, one owned renderable figure; layout, painting and the PNG/SVG/PDF/PGF/RGBA encoders.

use std::path::Path;

use log::debug;
use skia_safe as skia;

use crate::axis::Axis;
use crate::error::{Error, Result};
use crate::legend::{best_location, LegendLocation, LegendPlacementError};
use crate::line::LineStyle;
use crate::paint::{Anchor, Painter, SkiaPainter, Stroke, TextSpec};
use crate::pgf::PgfPainter;
use crate::series::{Series, LINE_WIDTH, MARKER_SIZE};
use crate::style::{Dash, Marker, MarkerShape};
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{Area, Insets, BASE_DPI, HEIGHT, WIDTH};

const TITLE_SIZE: f32 = 14.4;
const LABEL_SIZE: f32 = 12.0;
const TICK_SIZE: f32 = 10.0;
const LEGEND_SIZE: f32 = 10.0;
/// Fraction of the data span added on each side when autoscaling.
pub const AUTOSCALE_MARGIN: f64 = 0.05;

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    /// Logical width; raster output is `width * dpi / 100` pixels wide.
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Titles, axis labels, tick labels and legend text.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::default(),
            draw_labels: true,
        }
    }
}

/// File formats a chart can be written as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileFormat {
    Pdf,
    Pgf,
    Png,
    Svg,
}

impl FileFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Pdf => "pdf",
            FileFormat::Pgf => "pgf",
            FileFormat::Png => "png",
            FileFormat::Svg => "svg",
        }
    }
}

pub struct Chart {
    pub title: String,
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend: Option<LegendLocation>,
    auto_colors: usize,
}

impl Chart {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            series: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
            legend: None,
            auto_colors: 0,
        }
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn set_xlabel(&mut self, label: &str) {
        self.x_axis.label = label.to_string();
    }

    pub fn set_ylabel(&mut self, label: &str) {
        self.y_axis.label = label.to_string();
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Add one series. Later series draw on top of earlier ones. Series without a colour
    /// take the next entry of the theme's colour cycle.
    pub fn plot(&mut self, x: &[f64], y: &[f64], style: &LineStyle<'_>, theme: &Theme) -> Result<()> {
        let auto = theme.cycle_color(self.auto_colors);
        let series = Series::resolve(x, y, style, theme, auto)?;
        if style.color.is_none() {
            self.auto_colors += 1;
        }
        self.add_series(series);
        Ok(())
    }

    /// Request a legend at `loc`. On rejection the chart is left without a legend.
    pub fn legend(&mut self, loc: &str) -> std::result::Result<(), LegendPlacementError> {
        self.legend = Some(loc.parse()?);
        Ok(())
    }

    /// Request a legend at the automatically chosen position.
    pub fn legend_best(&mut self) {
        self.legend = Some(LegendLocation::Best);
    }

    /// Fit both axes to the data of all series.
    pub fn autoscale_axes(&mut self, margin: f64) {
        let xs = self.series.iter().flat_map(|s| s.data_xy.iter().map(|p| p.0));
        let ys = self.series.iter().flat_map(|s| s.data_xy.iter().map(|p| p.1));
        self.x_axis.fit(xs.collect::<Vec<_>>(), margin);
        self.y_axis.fit(ys.collect::<Vec<_>>(), margin);
    }

    /// Paint the whole figure onto `p` using the current axis ranges.
    pub fn paint(&self, p: &mut dyn Painter, opts: &RenderOptions) {
        let (x_axis, y_axis) = (&self.x_axis, &self.y_axis);

        let theme = &opts.theme;
        let (w, h) = (opts.width as f32, opts.height as f32);
        let ins = opts.insets;
        let axes = Area::from_ltrb(
            ins.left as f32,
            ins.top as f32,
            (w - ins.right as f32).max(ins.left as f32 + 1.0),
            (h - ins.bottom as f32).max(ins.top as f32 + 1.0),
        );
        let map = Mapping { axes, x: x_axis, y: y_axis };

        p.fill_rect(Area::from_ltrb(0.0, 0.0, w, h), theme.figure_background);
        p.fill_rect(axes, theme.axes_background);

        // Grid and ticks
        let xt = x_axis.ticks(((axes.width() / 80.0) as usize).clamp(3, 10));
        let yt = y_axis.ticks(((axes.height() / 60.0) as usize).clamp(3, 10));
        let grid = Stroke::solid(theme.grid, 1.0);
        let tick = Stroke::solid(theme.tick, 1.0);
        for &t in &xt {
            let x = map.sx(t);
            p.polyline(&[(x, axes.top), (x, axes.bottom)], &grid);
            p.polyline(&[(x, axes.bottom), (x, axes.bottom + 4.0)], &tick);
        }
        for &t in &yt {
            let y = map.sy(t);
            p.polyline(&[(axes.left, y), (axes.right, y)], &grid);
            p.polyline(&[(axes.left - 4.0, y), (axes.left, y)], &tick);
        }
        if let Some(frame) = theme.axis_line {
            p.stroke_rect(axes, &Stroke::solid(frame, 1.0));
        }

        if opts.draw_labels {
            let tick_text = TextSpec { size: TICK_SIZE, color: theme.tick_label, anchor: Anchor::Middle, vertical: false };
            for &t in &xt {
                p.text(&Axis::tick_label(t, &xt), (map.sx(t), axes.bottom + 6.0 + TICK_SIZE), &tick_text);
            }
            let tick_text = TextSpec { anchor: Anchor::End, ..tick_text };
            for &t in &yt {
                p.text(&Axis::tick_label(t, &yt), (axes.left - 7.0, map.sy(t) + TICK_SIZE * 0.35), &tick_text);
            }

            let label = TextSpec { size: LABEL_SIZE, color: theme.label, anchor: Anchor::Middle, vertical: false };
            let cx = (axes.left + axes.right) / 2.0;
            p.text(&x_axis.label, (cx, h - 12.0), &label);
            let vlabel = TextSpec { vertical: true, ..label };
            p.text(&y_axis.label, (18.0, (axes.top + axes.bottom) / 2.0), &vlabel);

            let title = TextSpec { size: TITLE_SIZE, color: theme.title, anchor: Anchor::Middle, vertical: false };
            p.text(&self.title, (cx, axes.top - 10.0), &title);
        }

        // Series, in submission order
        p.clip(axes);
        for s in &self.series {
            paint_series(p, s, &map);
        }
        p.restore();

        if let Some(loc) = self.legend {
            self.paint_legend(p, loc, &map, opts);
        }
    }

    fn paint_legend(&self, p: &mut dyn Painter, loc: LegendLocation, map: &Mapping<'_>, opts: &RenderOptions) {
        let entries: Vec<&Series> = self.series.iter().filter(|s| s.in_legend()).collect();
        if entries.is_empty() {
            debug!("legend requested but no series has a label");
            return;
        }
        let pad = 6.0;
        let row = LEGEND_SIZE * 1.6;
        let swatch = 24.0;
        let text_w = entries
            .iter()
            .map(|s| p.text_width(s.label.as_deref().unwrap_or(""), LEGEND_SIZE))
            .fold(0.0f32, f32::max);
        let bw = pad + swatch + pad + text_w + pad;
        let bh = pad + row * entries.len() as f32 + pad * 0.5;

        let loc = match loc {
            LegendLocation::Best => {
                let pts: Vec<(f32, f32)> = self
                    .series
                    .iter()
                    .flat_map(|s| s.data_xy.iter())
                    .filter(|(x, y)| x.is_finite() && y.is_finite())
                    .map(|&(x, y)| (map.sx(x), map.sy(y)))
                    .collect();
                best_location(&map.axes, bw, bh, 4.0, &pts)
            }
            fixed => fixed,
        };
        let (x0, y0) = loc.anchor(&map.axes, bw, bh, 4.0);
        let frame = Area::from_xywh(x0, y0, bw, bh);
        p.fill_rect(frame, opts.theme.legend_background);
        p.stroke_rect(frame, &Stroke::solid(opts.theme.legend_border, 1.0));

        let text = TextSpec { size: LEGEND_SIZE, color: opts.theme.label, anchor: Anchor::Start, vertical: false };
        for (k, s) in entries.iter().enumerate() {
            let cy = y0 + pad + row * (k as f32 + 0.5);
            let (sx0, sx1) = (x0 + pad, x0 + pad + swatch);
            if s.dash != Dash::Hidden {
                p.polyline(&[(sx0, cy), (sx1, cy)], &line_stroke(s));
            }
            if let Some(m) = s.marker {
                paint_marker(p, m, ((sx0 + sx1) / 2.0, cy), s.color);
            }
            if opts.draw_labels {
                p.text(s.label.as_deref().unwrap_or(""), (sx1 + pad, cy + LEGEND_SIZE * 0.35), &text);
            }
        }
    }

    fn pixel_size(opts: &RenderOptions, dpi: u32) -> (i32, i32, f32) {
        let scale = dpi.max(1) as f32 / BASE_DPI as f32;
        let pw = ((opts.width as f32 * scale).round() as i32).max(1);
        let ph = ((opts.height as f32 * scale).round() as i32).max(1);
        (pw, ph, scale)
    }

    fn raster(&self, opts: &RenderOptions, dpi: u32) -> Result<skia::Surface> {
        let (pw, ph, scale) = Self::pixel_size(opts, dpi);
        let mut surface = skia::surfaces::raster_n32_premul((pw, ph))
            .ok_or_else(|| Error::Render("failed to create raster surface".into()))?;
        let shaper = TextShaper::new();
        {
            let canvas = surface.canvas();
            canvas.scale((scale, scale));
            let mut painter = SkiaPainter::new(canvas, &shaper);
            self.paint(&mut painter, opts);
        }
        Ok(surface)
    }

    /// Render to PNG bytes at `dpi` (100 = one pixel per logical pixel).
    pub fn render_to_png_bytes(&self, opts: &RenderOptions, dpi: u32) -> Result<Vec<u8>> {
        let mut surface = self.raster(opts, dpi)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| Error::Render("encode PNG failed".into()))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render to an unpremultiplied RGBA8 buffer at logical resolution.
    /// Returns (pixels, width, height, stride).
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.raster(opts, BASE_DPI)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut px = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut px, stride, (0, 0)) {
            return Err(Error::Render("reading raster pixels failed".into()));
        }
        Ok((px, w as u32, h as u32, stride))
    }

    pub fn render_to_svg_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let bounds = skia::Rect::from_wh(opts.width as f32, opts.height as f32);
        let canvas = skia::svg::Canvas::new(bounds, None);
        let shaper = TextShaper::new();
        {
            let mut painter = SkiaPainter::new(&canvas, &shaper);
            self.paint(&mut painter, opts);
        }
        Ok(canvas.end().as_bytes().to_vec())
    }

    pub fn render_to_pdf_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut bytes: Vec<u8> = Vec::new();
        {
            let shaper = TextShaper::new();
            let document = skia::pdf::new_document(&mut bytes, None);
            let mut page = document.begin_page((opts.width as f32, opts.height as f32), None);
            {
                let mut painter = SkiaPainter::new(page.canvas(), &shaper);
                self.paint(&mut painter, opts);
            }
            page.end_page().close();
        }
        if bytes.is_empty() {
            return Err(Error::Render("PDF document is empty".into()));
        }
        Ok(bytes)
    }

    pub fn render_to_pgf(&self, opts: &RenderOptions) -> String {
        let mut painter = PgfPainter::new(opts.width as f32, opts.height as f32);
        self.paint(&mut painter, opts);
        painter.finish()
    }

    /// Encode as `format` and write to `path`. `dpi` only affects raster output.
    pub fn save(&self, path: impl AsRef<Path>, format: FileFormat, dpi: u32, opts: &RenderOptions) -> Result<()> {
        let bytes = match format {
            FileFormat::Png => self.render_to_png_bytes(opts, dpi)?,
            FileFormat::Svg => self.render_to_svg_bytes(opts)?,
            FileFormat::Pdf => self.render_to_pdf_bytes(opts)?,
            FileFormat::Pgf => self.render_to_pgf(opts).into_bytes(),
        };
        std::fs::write(path.as_ref(), bytes)?;
        debug!("wrote {}", path.as_ref().display());
        Ok(())
    }
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

// ---- helpers ----------------------------------------------------------------

struct Mapping<'a> {
    axes: Area,
    x: &'a Axis,
    y: &'a Axis,
}

impl Mapping<'_> {
    fn sx(&self, x: f64) -> f32 {
        let span = (self.x.max - self.x.min).max(1e-12);
        self.axes.left + ((x - self.x.min) / span) as f32 * self.axes.width()
    }

    fn sy(&self, y: f64) -> f32 {
        let span = (self.y.max - self.y.min).max(1e-12);
        self.axes.bottom - ((y - self.y.min) / span) as f32 * self.axes.height()
    }
}

fn line_stroke(s: &Series) -> Stroke {
    Stroke { color: s.color, width: LINE_WIDTH, dash: s.dash.intervals() }
}

fn paint_series(p: &mut dyn Painter, s: &Series, map: &Mapping<'_>) {
    let segments = s.segments();
    if s.dash != Dash::Hidden {
        let stroke = line_stroke(s);
        for run in &segments {
            let pts: Vec<(f32, f32)> = run.iter().map(|&(x, y)| (map.sx(x), map.sy(y))).collect();
            p.polyline(&pts, &stroke);
        }
    }
    if let Some(m) = s.marker {
        for &(x, y) in segments.iter().flat_map(|run| run.iter()) {
            paint_marker(p, m, (map.sx(x), map.sy(y)), s.color);
        }
    }
}

fn paint_marker(p: &mut dyn Painter, marker: Marker, center: (f32, f32), color: skia::Color) {
    match marker.shape(center, MARKER_SIZE) {
        MarkerShape::Circle(r) => p.fill_circle(center, r, color),
        MarkerShape::Polygon(pts) => p.fill_polygon(&pts, color),
        MarkerShape::Strokes(lines) => {
            let stroke = Stroke::solid(color, LINE_WIDTH);
            for [a, b] in lines {
                p.polyline(&[a, b], &stroke);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncoloured_series_follow_the_cycle() {
        let theme = Theme::ggplot();
        let mut chart = Chart::new();
        chart.plot(&[], &[1.0, 2.0], &LineStyle::default(), &theme).unwrap();
        let red = LineStyle { color: Some("r"), ..LineStyle::default() };
        chart.plot(&[], &[1.0, 2.0], &red, &theme).unwrap();
        chart.plot(&[], &[1.0, 2.0], &LineStyle::default(), &theme).unwrap();
        assert_eq!(chart.series[0].color, theme.cycle_color(0));
        assert_eq!(chart.series[2].color, theme.cycle_color(1));
    }

    #[test]
    fn rejected_legend_leaves_no_legend() {
        let mut chart = Chart::new();
        let err = chart.legend("upper middle").unwrap_err();
        assert_eq!(err.token, "upper middle");
        assert!(chart.legend.is_none());
        chart.legend("lower left").unwrap();
        assert_eq!(chart.legend, Some(LegendLocation::LowerLeft));
    }

    #[test]
    fn autoscale_pads_the_data_range() {
        let theme = Theme::default();
        let mut chart = Chart::new();
        chart.plot(&[0.0, 10.0], &[-1.0, 1.0], &LineStyle::default(), &theme).unwrap();
        chart.autoscale_axes(0.1);
        assert!((chart.x_axis.min + 1.0).abs() < 1e-9);
        assert!((chart.x_axis.max - 11.0).abs() < 1e-9);
        assert!((chart.y_axis.max - 1.2).abs() < 1e-9);
    }

    #[test]
    fn pgf_output_is_a_complete_picture() {
        let theme = Theme::default();
        let mut chart = Chart::new();
        chart.set_title("T_1");
        chart.plot(&[], &[1.0, 3.0, 2.0], &LineStyle { label: Some("a"), ..LineStyle::default() }, &theme).unwrap();
        chart.legend_best();
        let src = chart.render_to_pgf(&RenderOptions::default());
        assert!(src.contains("\\begin{pgfpicture}"));
        assert!(src.contains("T\\_1"));
        assert!(src.trim_end().ends_with("\\endgroup%"));
    }
}
