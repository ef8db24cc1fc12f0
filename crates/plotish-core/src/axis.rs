// File: crates/plotish-core/src/axis.rs
// Summary: Axis model with labels and ranges, autoscaling and tick layout.

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max }
    }

    pub fn default_x() -> Self {
        Self::new("", 0.0, 1.0)
    }

    pub fn default_y() -> Self {
        Self::new("", 0.0, 1.0)
    }

    /// Fit the range to the finite values in `values`, padded by `margin` of the span.
    /// Keeps the current range when no finite value exists.
    pub fn fit<I: IntoIterator<Item = f64>>(&mut self, values: I, margin: f64) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if !lo.is_finite() || !hi.is_finite() {
            return;
        }
        if (hi - lo).abs() < 1e-12 {
            // Single value: centre it in a unit-ish window.
            let half = if lo == 0.0 { 0.5 } else { lo.abs() * 0.05 };
            lo -= half;
            hi += half;
        } else {
            let m = (hi - lo) * margin;
            lo -= m;
            hi += m;
        }
        self.min = lo;
        self.max = hi;
    }

    /// Tick positions inside the range, at a "nice" step, with at most about `target` ticks.
    pub fn ticks(&self, target: usize) -> Vec<f64> {
        let step = nice_step(self.max - self.min, target.max(2));
        if !step.is_finite() || step <= 0.0 {
            return Vec::new();
        }
        let first = (self.min / step).ceil() as i64;
        let last = (self.max / step).floor() as i64;
        (first..=last).map(|k| k as f64 * step).collect()
    }

    /// Format a tick value with as many decimals as the tick spacing needs.
    pub fn tick_label(value: f64, ticks: &[f64]) -> String {
        let step = if ticks.len() >= 2 { (ticks[1] - ticks[0]).abs() } else { 1.0 };
        let decimals = (0..=10)
            .find(|d| {
                let scaled = step * 10f64.powi(*d as i32);
                (scaled - scaled.round()).abs() < 1e-6 * scaled.max(1.0)
            })
            .unwrap_or(10);
        let v = if value.abs() < step * 1e-9 { 0.0 } else { value };
        format!("{v:.decimals$}")
    }
}

fn nice_step(span: f64, target: usize) -> f64 {
    if span <= 0.0 || !span.is_finite() {
        return 0.0;
    }
    let raw = span / target as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let frac = raw / mag;
    let nice = if frac <= 1.0 {
        1.0
    } else if frac <= 2.0 {
        2.0
    } else if frac <= 2.5 {
        2.5
    } else if frac <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}
