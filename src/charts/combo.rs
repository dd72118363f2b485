//! Bar + Line Combo Chart
//! One bar/line pair per location, only one pair visible at a time.

use super::{DEATHS_COLOR, VACCINATED_COLOR};
use crate::data::{self, MonthKey, MonthlyAggregate};
use egui::Color32;
use serde::Serialize;
use tracing::debug;

pub const OVERVIEW_TITLE: &str = "Cumulative vaccinations and monthly deaths by region";
pub const X_AXIS_LABEL: &str = "Month";
pub const DEATHS_AXIS_LABEL: &str = "Monthly deaths";
pub const VACCINATED_AXIS_LABEL: &str = "Cumulative vaccinated";

/// Title shown after picking a location in the selector.
pub fn location_title(location: &str) -> String {
    format!("{location}: cumulative vaccinations and monthly deaths")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeriesKind {
    Bar,
    /// Line with point markers.
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AxisSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisSpec {
    pub label: String,
    pub side: AxisSide,
    #[serde(skip)]
    pub color: Option<Color32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: String,
    pub location: String,
    pub kind: SeriesKind,
    pub axis: AxisSide,
    /// Ascending months.
    pub months: Vec<MonthKey>,
    /// One value per month; `None` is a gap.
    pub values: Vec<Option<f64>>,
    #[serde(skip)]
    pub color: Color32,
    pub visible: bool,
}

/// What picking one selector entry does to the chart.
#[derive(Debug, Clone, Serialize)]
pub struct SelectorEntry {
    pub label: String,
    pub visibility: Vec<bool>,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComboChart {
    pub title: String,
    pub x_label: String,
    pub deaths_axis: AxisSpec,
    pub vaccinated_axis: AxisSpec,
    /// Bar for location `i` at `2i`, its line at `2i + 1`.
    pub series: Vec<Series>,
    pub selector: Vec<SelectorEntry>,
    pub active: Option<usize>,
    /// Every month on the shared x axis, ascending.
    pub months: Vec<MonthKey>,
}

impl ComboChart {
    pub fn build(rows: &[MonthlyAggregate]) -> Self {
        let locations = data::locations(rows);
        let mut series = Vec::with_capacity(locations.len() * 2);

        for location in &locations {
            let mut loc_rows: Vec<&MonthlyAggregate> =
                rows.iter().filter(|r| &r.location == location).collect();
            loc_rows.sort_by(|a, b| a.month.cmp(&b.month));
            let months: Vec<MonthKey> = loc_rows.iter().map(|r| r.month.clone()).collect();

            series.push(Series {
                name: format!("Monthly deaths - {location}"),
                location: location.clone(),
                kind: SeriesKind::Bar,
                axis: AxisSide::Left,
                months: months.clone(),
                values: loc_rows.iter().map(|r| Some(r.new_deaths_sum)).collect(),
                color: DEATHS_COLOR,
                visible: false,
            });
            series.push(Series {
                name: format!("Cumulative vaccinated - {location}"),
                location: location.clone(),
                kind: SeriesKind::Line,
                axis: AxisSide::Right,
                months,
                values: loc_rows.iter().map(|r| r.people_vaccinated_last).collect(),
                color: VACCINATED_COLOR,
                visible: false,
            });
        }

        let selector = locations
            .iter()
            .enumerate()
            .map(|(i, location)| {
                let mut visibility = vec![false; series.len()];
                visibility[2 * i] = true;
                visibility[2 * i + 1] = true;
                SelectorEntry {
                    label: location.clone(),
                    visibility,
                    title: location_title(location),
                }
            })
            .collect::<Vec<_>>();

        let active = if series.is_empty() {
            None
        } else {
            series[0].visible = true;
            series[1].visible = true;
            Some(0)
        };

        Self {
            title: OVERVIEW_TITLE.to_string(),
            x_label: X_AXIS_LABEL.to_string(),
            deaths_axis: AxisSpec {
                label: DEATHS_AXIS_LABEL.to_string(),
                side: AxisSide::Left,
                color: Some(DEATHS_COLOR),
            },
            vaccinated_axis: AxisSpec {
                label: VACCINATED_AXIS_LABEL.to_string(),
                side: AxisSide::Right,
                color: Some(VACCINATED_COLOR),
            },
            series,
            selector,
            active,
            months: data::months(rows),
        }
    }

    /// Apply selector entry `index`. Returns `false` if there is no such entry.
    pub fn select(&mut self, index: usize) -> bool {
        let Some(entry) = self.selector.get(index) else {
            return false;
        };

        for (series, &visible) in self.series.iter_mut().zip(&entry.visibility) {
            series.visible = visible;
        }
        self.title = entry.title.clone();
        self.active = Some(index);
        debug!(location = %entry.label, "combo chart selection changed");
        true
    }

    pub fn visibility(&self) -> Vec<bool> {
        self.series.iter().map(|s| s.visible).collect()
    }

    pub fn visible_series(&self) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(|s| s.visible)
    }

    pub fn location_count(&self) -> usize {
        self.selector.len()
    }

    /// Position of `month` on the shared x axis.
    pub fn month_position(&self, month: &MonthKey) -> Option<usize> {
        self.months.binary_search(month).ok()
    }

    /// Factor mapping visible right-axis values onto the left-axis range.
    ///
    /// The right axis is drawn in left-axis coordinates; its tick labels divide
    /// by this factor to show real values again.
    pub fn secondary_scale(&self) -> f64 {
        let max_of = |side: AxisSide| {
            self.visible_series()
                .filter(|s| s.axis == side)
                .flat_map(|s| s.values.iter().flatten().copied())
                .fold(0.0_f64, f64::max)
        };
        let left = max_of(AxisSide::Left);
        let right = max_of(AxisSide::Right);

        if right > 0.0 && left > 0.0 {
            left / right
        } else if right > 0.0 {
            1.0 / right
        } else {
            1.0
        }
    }
}
