// File: crates/plotish-core/src/theme.rs
// Summary: Figure themes (ggplot default, light, dark) and their series colour cycles.

use skia_safe as skia;

const GGPLOT_CYCLE: [skia::Color; 7] = [
    skia::Color::new(0xFFE2_4A33),
    skia::Color::new(0xFF34_8ABD),
    skia::Color::new(0xFF98_8ED5),
    skia::Color::new(0xFF77_7777),
    skia::Color::new(0xFFFB_C15E),
    skia::Color::new(0xFF8E_BA42),
    skia::Color::new(0xFFFF_B5B8),
];

// matplotlib's "tab10" palette, also used for `C0`..`C9` on the light and dark themes.
pub(crate) const TAB10: [skia::Color; 10] = [
    skia::Color::new(0xFF1F_77B4),
    skia::Color::new(0xFFFF_7F0E),
    skia::Color::new(0xFF2C_A02C),
    skia::Color::new(0xFFD6_2728),
    skia::Color::new(0xFF94_67BD),
    skia::Color::new(0xFF8C_564B),
    skia::Color::new(0xFFE3_77C2),
    skia::Color::new(0xFF7F_7F7F),
    skia::Color::new(0xFFBC_BD22),
    skia::Color::new(0xFF17_BECF),
];

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub figure_background: skia::Color,
    pub axes_background: skia::Color,
    pub grid: skia::Color,
    /// `None` draws no axes frame.
    pub axis_line: Option<skia::Color>,
    pub tick: skia::Color,
    pub tick_label: skia::Color,
    pub label: skia::Color,
    pub title: skia::Color,
    pub legend_background: skia::Color,
    pub legend_border: skia::Color,
    pub cycle: &'static [skia::Color],
}

impl Theme {
    pub fn ggplot() -> Self {
        Self {
            name: "ggplot",
            figure_background: skia::Color::WHITE,
            axes_background: skia::Color::from_argb(255, 0xE5, 0xE5, 0xE5),
            grid: skia::Color::WHITE,
            axis_line: None,
            tick: skia::Color::from_argb(255, 0x55, 0x55, 0x55),
            tick_label: skia::Color::from_argb(255, 0x55, 0x55, 0x55),
            label: skia::Color::from_argb(255, 0x55, 0x55, 0x55),
            title: skia::Color::BLACK,
            legend_background: skia::Color::from_argb(204, 0xE5, 0xE5, 0xE5),
            legend_border: skia::Color::from_argb(204, 0xCC, 0xCC, 0xCC),
            cycle: &GGPLOT_CYCLE,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            figure_background: skia::Color::from_argb(255, 250, 250, 252),
            axes_background: skia::Color::WHITE,
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: Some(skia::Color::from_argb(255, 60, 60, 70)),
            tick: skia::Color::from_argb(255, 100, 100, 110),
            tick_label: skia::Color::from_argb(255, 20, 20, 30),
            label: skia::Color::from_argb(255, 20, 20, 30),
            title: skia::Color::from_argb(255, 20, 20, 30),
            legend_background: skia::Color::from_argb(204, 255, 255, 255),
            legend_border: skia::Color::from_argb(255, 200, 200, 205),
            cycle: &TAB10,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            figure_background: skia::Color::from_argb(255, 18, 18, 20),
            axes_background: skia::Color::from_argb(255, 24, 24, 28),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: Some(skia::Color::from_argb(255, 180, 180, 190)),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            tick_label: skia::Color::from_argb(255, 235, 235, 245),
            label: skia::Color::from_argb(255, 235, 235, 245),
            title: skia::Color::from_argb(255, 235, 235, 245),
            legend_background: skia::Color::from_argb(204, 30, 30, 34),
            legend_border: skia::Color::from_argb(255, 90, 90, 100),
            cycle: &TAB10,
        }
    }

    /// Colour of the `n`-th automatically coloured series.
    pub fn cycle_color(&self, n: usize) -> skia::Color {
        self.cycle[n % self.cycle.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::ggplot()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::ggplot(), Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to ggplot.
pub fn find(name: &str) -> Theme {
    for t in presets() {
        if t.name.eq_ignore_ascii_case(name) {
            return t;
        }
    }
    Theme::ggplot()
}
