//! Animated Bubble Chart
//! One frame per month; vaccinated on x, deaths on y, bubble area by deaths.

use crate::data::{self, MonthKey, MonthlyAggregate};
use serde::Serialize;
use statrs::statistics::Statistics;

pub const BUBBLE_TITLE: &str = "Monthly deaths and cumulative vaccinated by region";
pub const X_LABEL: &str = "Cumulative vaccinated";
pub const Y_LABEL: &str = "Monthly deaths";

/// Diameter in points for the largest death count.
pub const MAX_BUBBLE: f64 = 50.0;
/// Diameter floor so zero-death bubbles stay visible.
pub const MIN_BUBBLE: f64 = 4.0;
/// Share of the x span added below the minimum.
pub const X_PAD_RATIO: f64 = 0.05;
/// Headroom above the maximum on both axes.
pub const UPPER_HEADROOM: f64 = 1.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bubble {
    pub location: String,
    /// `None` when the month has no vaccination reading; not drawn.
    pub x: Option<f64>,
    pub y: f64,
    pub diameter: f64,
    /// Index into the palette, fixed per location across frames.
    pub color_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleFrame {
    pub month: MonthKey,
    pub bubbles: Vec<Bubble>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BubbleChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Chronological.
    pub frames: Vec<BubbleFrame>,
    /// Legend order; position is the color index.
    pub locations: Vec<String>,
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
}

impl BubbleChart {
    pub fn build(rows: &[MonthlyAggregate]) -> Self {
        let locations = data::locations(rows);
        let max_deaths = rows
            .iter()
            .map(|r| r.new_deaths_sum.max(0.0))
            .fold(0.0_f64, f64::max);

        let frames = data::months(rows)
            .into_iter()
            .map(|month| {
                let bubbles = rows
                    .iter()
                    .filter(|r| r.month == month)
                    .map(|r| Bubble {
                        location: r.location.clone(),
                        x: r.people_vaccinated_last,
                        y: r.new_deaths_sum,
                        diameter: bubble_diameter(r.new_deaths_sum, max_deaths),
                        color_index: locations
                            .iter()
                            .position(|l| l == &r.location)
                            .unwrap_or_default(),
                    })
                    .collect();
                BubbleFrame { month, bubbles }
            })
            .collect();

        let vaccinated: Vec<f64> = rows.iter().filter_map(|r| r.people_vaccinated_last).collect();
        let deaths: Vec<f64> = rows.iter().map(|r| r.new_deaths_sum).collect();

        Self {
            title: BUBBLE_TITLE.to_string(),
            x_label: X_LABEL.to_string(),
            y_label: Y_LABEL.to_string(),
            frames,
            locations,
            x_range: x_range(&vaccinated),
            y_range: y_range(&deaths),
        }
    }

    pub fn frame(&self, index: usize) -> Option<&BubbleFrame> {
        self.frames.get(index)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Area proportional to `deaths`, clamped to `[MIN_BUBBLE, MAX_BUBBLE]`.
pub fn bubble_diameter(deaths: f64, max_deaths: f64) -> f64 {
    if max_deaths <= 0.0 {
        return MIN_BUBBLE;
    }
    let ratio = (deaths.max(0.0) / max_deaths).min(1.0);
    (MAX_BUBBLE * ratio.sqrt()).max(MIN_BUBBLE)
}

/// Fixed x range over all frames, padded below the minimum.
pub fn x_range(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let min = Statistics::min(values);
    let max = Statistics::max(values);
    if min.is_nan() || max.is_nan() {
        return None;
    }

    let span = max - min;
    let pad = if span > 0.0 {
        X_PAD_RATIO * span
    } else {
        X_PAD_RATIO * max.abs().max(1.0)
    };
    Some((min - pad, (max * UPPER_HEADROOM).max(max + pad)))
}

fn y_range(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let min = Statistics::min(values).min(0.0);
    let max = Statistics::max(values);
    if min.is_nan() || max.is_nan() {
        return None;
    }
    Some((min, (max * UPPER_HEADROOM).max(min + 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(month: &str, location: &str, deaths: f64, vacc: Option<f64>) -> MonthlyAggregate {
        MonthlyAggregate {
            month: MonthKey::parse(month).unwrap(),
            location: location.to_string(),
            new_deaths_sum: deaths,
            people_vaccinated_last: vacc,
        }
    }

    #[test]
    fn one_frame_per_month_in_order() {
        let rows = vec![
            row("2021-02", "Korea", 10.0, Some(200.0)),
            row("2020-12", "Korea", 5.0, Some(0.0)),
            row("2021-01", "Japan", 7.0, Some(50.0)),
            row("2020-12", "Japan", 3.0, None),
        ];

        let chart = BubbleChart::build(&rows);
        let months: Vec<&str> = chart.frames.iter().map(|f| f.month.as_str()).collect();

        assert_eq!(months, vec!["2020-12", "2021-01", "2021-02"]);
        assert_eq!(chart.frames[0].bubbles.len(), 2);
        assert_eq!(chart.frames[1].bubbles.len(), 1);
        assert_eq!(chart.frames[0].bubbles[1].x, None);
    }

    #[test]
    fn color_index_is_stable_per_location() {
        let rows = vec![
            row("2021-01", "Korea", 1.0, Some(1.0)),
            row("2021-01", "Japan", 1.0, Some(1.0)),
            row("2021-02", "Japan", 1.0, Some(1.0)),
            row("2021-02", "Korea", 1.0, Some(1.0)),
        ];

        let chart = BubbleChart::build(&rows);

        for frame in &chart.frames {
            for bubble in &frame.bubbles {
                let expected = if bubble.location == "Korea" { 0 } else { 1 };
                assert_eq!(bubble.color_index, expected);
            }
        }
        assert_eq!(chart.locations, vec!["Korea", "Japan"]);
    }

    #[test]
    fn diameter_is_monotonic_and_bounded() {
        assert_eq!(bubble_diameter(100.0, 100.0), MAX_BUBBLE);
        assert_eq!(bubble_diameter(0.0, 100.0), MIN_BUBBLE);
        assert_eq!(bubble_diameter(-5.0, 100.0), MIN_BUBBLE);
        assert_eq!(bubble_diameter(10.0, 0.0), MIN_BUBBLE);
        assert!(bubble_diameter(25.0, 100.0) < bubble_diameter(64.0, 100.0));
        // Area scales linearly: a quarter of the deaths is half the diameter.
        assert!((bubble_diameter(25.0, 100.0) - MAX_BUBBLE / 2.0).abs() < 1e-9);
    }

    #[test]
    fn x_range_pads_below_minimum() {
        let (lo, hi) = x_range(&[100.0, 300.0, 200.0]).unwrap();

        assert!(lo < 100.0);
        assert!((lo - (100.0 - X_PAD_RATIO * 200.0)).abs() < 1e-9);
        assert!((hi - 330.0).abs() < 1e-9);
    }

    #[test]
    fn x_range_handles_degenerate_input() {
        assert_eq!(x_range(&[]), None);
        let (lo, hi) = x_range(&[0.0]).unwrap();
        assert!(lo < 0.0 && hi > 0.0);
    }

    #[test]
    fn x_range_ignores_missing_values() {
        let rows = vec![
            row("2021-01", "Korea", 1.0, None),
            row("2021-01", "Japan", 1.0, Some(10.0)),
            row("2021-02", "Japan", 1.0, Some(20.0)),
        ];

        let chart = BubbleChart::build(&rows);
        let (lo, hi) = chart.x_range.unwrap();

        assert!(lo < 10.0);
        assert!((hi - 22.0).abs() < 1e-9);
    }

    #[test]
    fn empty_table_has_no_frames() {
        let chart = BubbleChart::build(&[]);
        assert_eq!(chart.frame_count(), 0);
        assert!(chart.frame(0).is_none());
        assert_eq!(chart.x_range, None);
    }
}
