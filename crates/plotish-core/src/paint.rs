// File: crates/plotish-core/src/paint.rs
// Summary: Drawing primitives shared by every output format, and their Skia canvas implementation.

use skia_safe as skia;

use crate::text::TextShaper;
use crate::types::Area;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Clone, Copy, Debug)]
pub struct TextSpec {
    pub size: f32,
    pub color: skia::Color,
    pub anchor: Anchor,
    /// Rotated 90° counter-clockwise around the anchor point (y-axis labels).
    pub vertical: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct Stroke {
    pub color: skia::Color,
    pub width: f32,
    /// Dash on/off intervals in multiples of `width`.
    pub dash: Option<&'static [f32]>,
}

impl Stroke {
    pub fn solid(color: skia::Color, width: f32) -> Self {
        Self { color, width, dash: None }
    }
}

/// Target-agnostic drawing surface. Coordinates are logical pixels, origin top-left, y down.
pub trait Painter {
    fn fill_rect(&mut self, area: Area, color: skia::Color);
    fn stroke_rect(&mut self, area: Area, stroke: &Stroke);
    fn polyline(&mut self, points: &[(f32, f32)], stroke: &Stroke);
    fn fill_polygon(&mut self, points: &[(f32, f32)], color: skia::Color);
    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: skia::Color);
    /// Draw `text` with its baseline through `at`, aligned per `spec.anchor`.
    fn text(&mut self, text: &str, at: (f32, f32), spec: &TextSpec);
    fn text_width(&self, text: &str, size: f32) -> f32;
    /// Clip subsequent drawing to `area` until the matching [`Painter::restore`].
    fn clip(&mut self, area: Area);
    fn restore(&mut self);
}

pub struct SkiaPainter<'a> {
    canvas: &'a skia::Canvas,
    shaper: &'a TextShaper,
}

impl<'a> SkiaPainter<'a> {
    pub fn new(canvas: &'a skia::Canvas, shaper: &'a TextShaper) -> Self {
        Self { canvas, shaper }
    }

    fn stroke_paint(stroke: &Stroke) -> skia::Paint {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(stroke.width);
        paint.set_stroke_cap(skia::paint::Cap::Butt);
        paint.set_stroke_join(skia::paint::Join::Round);
        paint.set_color(stroke.color);
        if let Some(intervals) = stroke.dash {
            let scaled: Vec<f32> = intervals.iter().map(|v| v * stroke.width).collect();
            paint.set_path_effect(skia::PathEffect::dash(&scaled, 0.0));
        }
        paint
    }

    fn fill_paint(color: skia::Color) -> skia::Paint {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        paint.set_color(color);
        paint
    }
}

fn rect(area: Area) -> skia::Rect {
    skia::Rect::from_ltrb(area.left, area.top, area.right, area.bottom)
}

impl Painter for SkiaPainter<'_> {
    fn fill_rect(&mut self, area: Area, color: skia::Color) {
        self.canvas.draw_rect(rect(area), &Self::fill_paint(color));
    }

    fn stroke_rect(&mut self, area: Area, stroke: &Stroke) {
        self.canvas.draw_rect(rect(area), &Self::stroke_paint(stroke));
    }

    fn polyline(&mut self, points: &[(f32, f32)], stroke: &Stroke) {
        if points.len() < 2 {
            return;
        }
        let mut path = skia::Path::new();
        path.move_to(points[0]);
        for &p in &points[1..] {
            path.line_to(p);
        }
        self.canvas.draw_path(&path, &Self::stroke_paint(stroke));
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: skia::Color) {
        if points.len() < 3 {
            return;
        }
        let mut path = skia::Path::new();
        path.move_to(points[0]);
        for &p in &points[1..] {
            path.line_to(p);
        }
        path.close();
        self.canvas.draw_path(&path, &Self::fill_paint(color));
    }

    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: skia::Color) {
        self.canvas.draw_circle(center, radius, &Self::fill_paint(color));
    }

    fn text(&mut self, text: &str, (x, y): (f32, f32), spec: &TextSpec) {
        if text.is_empty() {
            return;
        }
        let w = self.shaper.measure_width(text, spec.size);
        let dx = match spec.anchor {
            Anchor::Start => 0.0,
            Anchor::Middle => -w / 2.0,
            Anchor::End => -w,
        };
        if spec.vertical {
            self.canvas.save();
            self.canvas.rotate(-90.0, Some(skia::Point::new(x, y)));
            self.shaper.draw_left(self.canvas, text, x + dx, y, spec.size, spec.color);
            self.canvas.restore();
        } else {
            self.shaper.draw_left(self.canvas, text, x + dx, y, spec.size, spec.color);
        }
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        self.shaper.measure_width(text, size)
    }

    fn clip(&mut self, area: Area) {
        self.canvas.save();
        self.canvas.clip_rect(rect(area), None, Some(true));
    }

    fn restore(&mut self) {
        self.canvas.restore();
    }
}
