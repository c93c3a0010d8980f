//! Bar geometry for a player's recent games against a prop line.
//!
//! Coordinates are chart-local: `x` runs left to right over `[0, width]`, `y` runs
//! upward from the baseline over `[0, height]`.

use crate::api::Pick;

/// Headroom above the taller of the tallest bar and the line.
pub const HEADROOM: f64 = 1.2;
/// Share of each bar slot left empty between bars.
pub const GAP_RATIO: f64 = 0.2;

/// OVER hits strictly above the line, UNDER strictly below; a push is a miss.
pub fn is_hit(value: f64, line: f64, pick: Pick) -> bool {
    match pick {
        Pick::Over => value > line,
        Pick::Under => value < line,
    }
}

pub fn scale_max(values: &[f64], line: f64) -> f64 {
    let top = values.iter().copied().fold(line, f64::max);
    if top.is_finite() { top * HEADROOM } else { 0.0 }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub index: usize,
    pub value: f64,
    pub x: f64,
    pub width: f64,
    pub height: f64,
    pub hit: bool,
}

impl Bar {
    pub fn label(&self) -> String {
        format!("G{}", self.index + 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub value: f64,
    pub y: f64,
}

impl AxisTick {
    pub fn label(&self) -> String {
        format!("{}", self.value.round() as i64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartGeometry {
    pub width: f64,
    pub height: f64,
    pub line: f64,
    pub pick: Pick,
    pub max: f64,
    pub bar_width: f64,
    pub gap: f64,
    pub drawn_width: f64,
    pub line_y: f64,
    pub bars: Vec<Bar>,
    pub ticks: Vec<AxisTick>,
}

impl ChartGeometry {
    /// `recent_games` is most-recent-first; bars come out oldest first.
    pub fn compute(recent_games: &[f64], line: f64, pick: Pick, width: f64, height: f64) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let values: Vec<f64> = recent_games.iter().rev().copied().collect();
        let max = scale_max(&values, line);

        let count = values.len();
        let bar_width = if count == 0 { 0.0 } else { width / count as f64 };
        let gap = bar_width * GAP_RATIO;
        let drawn_width = bar_width - gap;

        let scale = |v: f64| scaled_height(v, max, height);

        let bars = values
            .iter()
            .enumerate()
            .map(|(index, &value)| Bar {
                index,
                value,
                x: index as f64 * bar_width + gap / 2.0,
                width: drawn_width,
                height: scale(value),
                hit: is_hit(value, line, pick),
            })
            .collect();

        let ticks = [0.0, 0.5, 1.0]
            .iter()
            .map(|pct| {
                let value = max * pct;
                AxisTick {
                    value,
                    y: scale(value),
                }
            })
            .collect();

        Self {
            width,
            height,
            line,
            pick,
            max,
            bar_width,
            gap,
            drawn_width,
            line_y: scale(line),
            bars,
            ticks,
        }
    }

    pub fn chronological_values(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.value).collect()
    }

    pub fn hit_count(&self) -> usize {
        self.bars.iter().filter(|bar| bar.hit).count()
    }

    /// Percentage of bars that hit, `None` without history.
    pub fn observed_hit_rate(&self) -> Option<f64> {
        if self.bars.is_empty() {
            return None;
        }
        Some(self.hit_count() as f64 / self.bars.len() as f64 * 100.0)
    }

    /// Index of the bar slot under `x`, or `None` when `x` is outside the chart.
    pub fn bar_index_at(&self, x: f64) -> Option<usize> {
        if self.bars.is_empty() || !x.is_finite() || x < 0.0 || x > self.width {
            return None;
        }
        if self.bar_width <= 0.0 {
            return Some(0);
        }
        let idx = (x / self.bar_width).floor() as usize;
        Some(idx.min(self.bars.len() - 1))
    }

    pub fn hover(&self, index: usize) -> Option<Hover> {
        let bar = self.bars.get(index)?;
        Some(Hover {
            index,
            value: bar.value,
            line: self.line,
            is_hit: is_hit(bar.value, self.line, self.pick),
        })
    }
}

fn scaled_height(value: f64, max: f64, height: f64) -> f64 {
    if max <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    ((value / max) * height).clamp(0.0, height)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hover {
    pub index: usize,
    pub value: f64,
    pub line: f64,
    pub is_hit: bool,
}

impl Hover {
    pub fn label(&self) -> String {
        format!("G{}", self.index + 1)
    }

    pub fn result_label(&self) -> &'static str {
        if self.is_hit { "HIT" } else { "MISS" }
    }
}

/// Pointer selection over one chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    selected: Option<usize>,
}

impl HoverState {
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn hover_at(&mut self, geometry: &ChartGeometry, x: f64) -> Option<Hover> {
        self.selected = geometry.bar_index_at(x);
        self.current(geometry)
    }

    pub fn step(&mut self, geometry: &ChartGeometry, forward: bool) -> Option<Hover> {
        let total = geometry.bars.len();
        if total == 0 {
            self.selected = None;
            return None;
        }
        self.selected = Some(match (self.selected, forward) {
            (None, true) => 0,
            (None, false) => total - 1,
            (Some(idx), true) => (idx + 1) % total,
            (Some(0), false) => total - 1,
            (Some(idx), false) => (idx - 1).min(total - 1),
        });
        self.current(geometry)
    }

    pub fn current(&self, geometry: &ChartGeometry) -> Option<Hover> {
        self.selected.and_then(|idx| geometry.hover(idx))
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_values_do_not_poison_the_scale() {
        let max = scale_max(&[f64::NAN, 10.0], 5.0);
        assert!((max - 12.0).abs() < 1e-9);
    }

    #[test]
    fn step_wraps_both_directions() {
        let geometry = ChartGeometry::compute(&[1.0, 2.0, 3.0], 2.0, Pick::Over, 30.0, 10.0);
        let mut hover = HoverState::default();
        assert_eq!(hover.step(&geometry, false).map(|h| h.index), Some(2));
        assert_eq!(hover.step(&geometry, true).map(|h| h.index), Some(0));
        assert_eq!(hover.step(&geometry, false).map(|h| h.index), Some(2));
    }
}
