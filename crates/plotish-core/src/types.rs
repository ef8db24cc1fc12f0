// File: crates/plotish-core/src/types.rs
// Summary: Shared types and constants (figure size, resolutions, paddings).

/// Default figure width in logical pixels (6.4 in at 100 px/in).
pub const WIDTH: i32 = 640;
/// Default figure height in logical pixels (4.8 in at 100 px/in).
pub const HEIGHT: i32 = 480;

/// Logical pixels per inch; raster sinks scale by `dpi / BASE_DPI`.
pub const BASE_DPI: u32 = 100;
/// Resolution of the PNG sink and the vector sinks' nominal resolution.
pub const DEFAULT_DPI: u32 = 300;
/// Resolution used when a format token is not recognised.
pub const FALLBACK_DPI: u32 = 50;

/// Space between the figure edge and the axes area, in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(80, 24, 40, 56)
    }
}

/// Axis-aligned rectangle in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Area {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Area {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { left: x, top: y, right: x + w, bottom: y + h }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
    pub fn contains(&self, (x, y): (f32, f32)) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}
