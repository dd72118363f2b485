//! Bar + Line Chart Widget
//! Location dropdown above a dual-axis egui_plot chart.

use super::widgets::{card, format_count};
use crate::charts::{ComboChart, SeriesKind, DEATHS_COLOR, VACCINATED_COLOR};
use egui::{ComboBox, RichText};
use egui_plot::{
    AxisHints, Bar, BarChart, Corner, HPlacement, Legend, Line, Plot, PlotPoints, Points,
};

const PLOT_HEIGHT: f32 = 380.0;
const BAR_WIDTH: f64 = 0.6;

pub struct ComboView {
    pub chart: ComboChart,
    /// Drop remembered zoom after the visible pair changes.
    reset_bounds: bool,
}

impl ComboView {
    pub fn new(chart: ComboChart) -> Self {
        Self {
            chart,
            reset_bounds: false,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let title = self.chart.title.clone();
        card(ui, &title, DEATHS_COLOR, |ui| {
            if self.chart.series.is_empty() {
                ui.label(RichText::new("No Data").size(16.0));
                return;
            }
            self.show_selector(ui);
            ui.add_space(6.0);
            self.show_plot(ui);
        });
    }

    fn show_selector(&mut self, ui: &mut egui::Ui) {
        let active = self.chart.active;
        let selected_text = active
            .and_then(|i| self.chart.selector.get(i))
            .map(|entry| entry.label.clone())
            .unwrap_or_default();

        let mut picked = None;
        ui.horizontal(|ui| {
            ui.label("Location:");
            ComboBox::from_id_salt("location_selector")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for (i, entry) in self.chart.selector.iter().enumerate() {
                        if ui
                            .selectable_label(active == Some(i), entry.label.as_str())
                            .clicked()
                        {
                            picked = Some(i);
                        }
                    }
                });
        });

        if let Some(i) = picked {
            self.reset_bounds = self.chart.select(i);
        }
    }

    fn show_plot(&mut self, ui: &mut egui::Ui) {
        let chart = &self.chart;
        let scale = chart.secondary_scale();
        let x_labels: Vec<String> = chart.months.iter().map(|m| m.to_string()).collect();

        let deaths_color = chart.deaths_axis.color.unwrap_or(DEATHS_COLOR);
        let deaths_axis = AxisHints::new_y()
            .label(RichText::new(&chart.deaths_axis.label).color(deaths_color))
            .formatter(|mark, _range| format_count(mark.value));
        let vaccinated_color = chart.vaccinated_axis.color.unwrap_or(VACCINATED_COLOR);
        let vaccinated_axis = AxisHints::new_y()
            .label(RichText::new(&chart.vaccinated_axis.label).color(vaccinated_color))
            .placement(HPlacement::Right)
            .formatter(move |mark, _range| format_count(mark.value / scale));

        let mut plot = Plot::new("combo_chart");
        if std::mem::take(&mut self.reset_bounds) {
            plot = plot.reset();
        }

        plot
            .height(PLOT_HEIGHT)
            .legend(Legend::default().position(Corner::LeftTop))
            .allow_scroll(false)
            .x_axis_label(chart.x_label.clone())
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                    return String::new();
                }
                x_labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .custom_y_axes(vec![deaths_axis, vaccinated_axis])
            .include_y(0.0)
            .show(ui, |plot_ui| {
                for series in chart.visible_series() {
                    let points: Vec<(f64, Option<f64>)> = series
                        .months
                        .iter()
                        .zip(&series.values)
                        .filter_map(|(month, value)| {
                            Some((chart.month_position(month)? as f64, *value))
                        })
                        .collect();

                    match series.kind {
                        SeriesKind::Bar => {
                            let bars = points
                                .iter()
                                .filter_map(|&(x, y)| Some(Bar::new(x, y?).width(BAR_WIDTH)))
                                .collect();
                            plot_ui.bar_chart(
                                BarChart::new(bars)
                                    .color(series.color)
                                    .name(&series.name),
                            );
                        }
                        SeriesKind::Line => {
                            // Gaps split the line; markers still show every reading.
                            for segment in line_segments(&points, scale) {
                                plot_ui.line(
                                    Line::new(PlotPoints::from(segment.clone()))
                                        .color(series.color)
                                        .width(2.0)
                                        .name(&series.name),
                                );
                                plot_ui.points(
                                    Points::new(PlotPoints::from(segment))
                                        .radius(3.5)
                                        .color(series.color)
                                        .name(&series.name),
                                );
                            }
                        }
                    }
                }
            });
    }
}

/// Split a line at missing values and scale it onto the primary axis.
fn line_segments(points: &[(f64, Option<f64>)], scale: f64) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for &(x, y) in points {
        match y {
            Some(y) => current.push([x, y * scale]),
            None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
