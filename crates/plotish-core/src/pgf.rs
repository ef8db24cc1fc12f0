// File: crates/plotish-core/src/pgf.rs
// Summary: Painter that emits a PGF picture for inclusion in LaTeX documents.

use std::fmt::Write as _;

use skia_safe as skia;

use crate::paint::{Anchor, Painter, Stroke, TextSpec};
use crate::types::{Area, BASE_DPI};

/// Logical pixels → big points (1/72 in).
const BP_PER_PX: f32 = 72.0 / BASE_DPI as f32;

pub struct PgfPainter {
    height: f32,
    out: String,
}

impl PgfPainter {
    /// Start a picture for a figure `width`×`height` logical pixels large.
    pub fn new(width: f32, height: f32) -> Self {
        let mut out = String::new();
        out.push_str("%% Creator: plotish\n");
        out.push_str("%% Requires \\usepackage{pgf} in the including document.\n");
        out.push_str("\\begingroup%\n\\makeatletter%\n\\begin{pgfpicture}%\n");
        let _ = writeln!(
            out,
            "\\pgfpathrectangle{{\\pgfpointorigin}}{{\\pgfqpoint{{{:.4}bp}}{{{:.4}bp}}}}%",
            width * BP_PER_PX,
            height * BP_PER_PX
        );
        out.push_str("\\pgfusepath{use as bounding box, clip}%\n");
        Self { height, out }
    }

    /// Close the picture and return its source.
    pub fn finish(mut self) -> String {
        self.out.push_str("\\end{pgfpicture}%\n\\makeatother%\n\\endgroup%\n");
        self.out
    }

    fn pt(&self, (x, y): (f32, f32)) -> String {
        format!("\\pgfqpoint{{{:.4}bp}}{{{:.4}bp}}", x * BP_PER_PX, (self.height - y) * BP_PER_PX)
    }

    fn color(&mut self, name: &str, c: skia::Color) {
        let _ = writeln!(self.out, "\\definecolor{{{name}}}{{RGB}}{{{},{},{}}}%", c.r(), c.g(), c.b());
        let opacity = c.a() as f32 / 255.0;
        if name == "fillcolor" {
            let _ = writeln!(self.out, "\\pgfsetfillcolor{{fillcolor}}%\n\\pgfsetfillopacity{{{opacity:.3}}}%");
        } else {
            let _ = writeln!(self.out, "\\pgfsetstrokecolor{{strokecolor}}%\n\\pgfsetstrokeopacity{{{opacity:.3}}}%");
        }
    }

    fn stroke_state(&mut self, stroke: &Stroke) {
        self.color("strokecolor", stroke.color);
        let _ = writeln!(self.out, "\\pgfsetlinewidth{{{:.4}bp}}%", stroke.width * BP_PER_PX);
        match stroke.dash {
            Some(intervals) => {
                let parts: String = intervals
                    .iter()
                    .map(|v| format!("{{{:.4}bp}}", v * stroke.width * BP_PER_PX))
                    .collect();
                let _ = writeln!(self.out, "\\pgfsetdash{{{parts}}}{{0bp}}%");
            }
            None => self.out.push_str("\\pgfsetdash{}{0bp}%\n"),
        }
    }

    fn path(&mut self, points: &[(f32, f32)]) {
        for (k, p) in points.iter().enumerate() {
            let cmd = if k == 0 { "pgfpathmoveto" } else { "pgfpathlineto" };
            let pt = self.pt(*p);
            let _ = writeln!(self.out, "\\{cmd}{{{pt}}}%");
        }
    }

    fn rect_path(&mut self, area: Area) {
        let origin = self.pt((area.left, area.bottom));
        let _ = writeln!(
            self.out,
            "\\pgfpathrectangle{{{origin}}}{{\\pgfqpoint{{{:.4}bp}}{{{:.4}bp}}}}%",
            area.width() * BP_PER_PX,
            area.height() * BP_PER_PX
        );
    }
}

/// Escape characters that are special to TeX.
pub fn escape(text: &str) -> String {
    let mut s = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => s.push_str("\\textbackslash{}"),
            '{' | '}' | '$' | '&' | '#' | '_' | '%' => {
                s.push('\\');
                s.push(c);
            }
            '^' => s.push_str("\\^{}"),
            '~' => s.push_str("\\textasciitilde{}"),
            _ => s.push(c),
        }
    }
    s
}

impl Painter for PgfPainter {
    fn fill_rect(&mut self, area: Area, color: skia::Color) {
        self.color("fillcolor", color);
        self.rect_path(area);
        self.out.push_str("\\pgfusepath{fill}%\n");
    }

    fn stroke_rect(&mut self, area: Area, stroke: &Stroke) {
        self.stroke_state(stroke);
        self.rect_path(area);
        self.out.push_str("\\pgfusepath{stroke}%\n");
    }

    fn polyline(&mut self, points: &[(f32, f32)], stroke: &Stroke) {
        if points.len() < 2 {
            return;
        }
        self.stroke_state(stroke);
        self.path(points);
        self.out.push_str("\\pgfusepath{stroke}%\n");
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: skia::Color) {
        if points.len() < 3 {
            return;
        }
        self.color("fillcolor", color);
        self.path(points);
        self.out.push_str("\\pgfpathclose%\n\\pgfusepath{fill}%\n");
    }

    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: skia::Color) {
        self.color("fillcolor", color);
        let c = self.pt(center);
        let _ = writeln!(self.out, "\\pgfpathcircle{{{c}}}{{{:.4}bp}}%", radius * BP_PER_PX);
        self.out.push_str("\\pgfusepath{fill}%\n");
    }

    fn text(&mut self, text: &str, at: (f32, f32), spec: &TextSpec) {
        if text.is_empty() {
            return;
        }
        let align = match spec.anchor {
            Anchor::Start => "left,base",
            Anchor::Middle => "base",
            Anchor::End => "right,base",
        };
        let rotate = if spec.vertical { ",rotate=90.000000" } else { "" };
        let c = spec.color;
        let size = spec.size * BP_PER_PX;
        let at = self.pt(at);
        let _ = writeln!(
            self.out,
            "\\definecolor{{textcolor}}{{RGB}}{{{},{},{}}}%\n\\pgftext[{align},x={{0bp}},y={{0bp}},at={{{at}}}{rotate}]{{\\color{{textcolor}}\\fontsize{{{size:.2}}}{{{:.2}}}\\selectfont {}}}%",
            c.r(),
            c.g(),
            c.b(),
            size * 1.2,
            escape(text)
        );
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        // No shaping here; average sans-serif advance.
        text.chars().count() as f32 * size * 0.55
    }

    fn clip(&mut self, area: Area) {
        self.out.push_str("\\begin{pgfscope}%\n");
        self.rect_path(area);
        self.out.push_str("\\pgfusepath{clip}%\n");
    }

    fn restore(&mut self) {
        self.out.push_str("\\end{pgfscope}%\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_tex_specials() {
        assert_eq!(escape("a_b 50% $x$"), "a\\_b 50\\% \\$x\\$");
    }

    #[test]
    fn y_axis_is_flipped() {
        let mut p = PgfPainter::new(100.0, 100.0);
        p.fill_rect(Area::from_ltrb(0.0, 0.0, 100.0, 10.0), skia::Color::BLACK);
        let src = p.finish();
        // Rectangle spans y in [0, 10] from the top, i.e. [90, 100] px from the bottom.
        assert!(src.contains("\\pgfqpoint{0.0000bp}{64.8000bp}"));
        assert!(src.starts_with("%% Creator: plotish"));
        assert!(src.trim_end().ends_with("\\endgroup%"));
    }
}
