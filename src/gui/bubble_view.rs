//! Animated Bubble Chart Widget
//! Scatter plot of the current frame plus play/pause/step controls.

use super::widgets::{card, format_count};
use crate::charts::{location_color, BubbleChart, Playback};
use egui::{Color32, RichText, Slider};
use egui_plot::{Corner, Legend, Plot, PlotBounds, PlotPoints, Points};
use std::time::Duration;

const PLOT_HEIGHT: f32 = 420.0;
const ACCENT: Color32 = Color32::from_rgb(100, 149, 237);

pub struct BubbleView {
    pub chart: BubbleChart,
    pub playback: Playback,
    frame_interval: f64,
}

impl BubbleView {
    pub fn new(chart: BubbleChart, frame_interval: f64) -> Self {
        let playback = Playback::new(chart.frame_count());
        Self {
            chart,
            playback,
            frame_interval,
        }
    }

    /// Advance playback on the UI clock and keep repainting while playing.
    pub fn tick(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        self.playback.tick(now, self.frame_interval);
        if self.playback.is_playing() {
            ctx.request_repaint_after(Duration::from_secs_f64(self.frame_interval));
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let title = self.chart.title.clone();
        card(ui, &title, ACCENT, |ui| {
            if self.chart.frame_count() == 0 {
                ui.label(RichText::new("No Data").size(16.0));
                return;
            }
            self.show_plot(ui);
            ui.add_space(6.0);
            self.show_controls(ui);
        });
    }

    fn show_plot(&self, ui: &mut egui::Ui) {
        let chart = &self.chart;
        let Some(frame) = chart.frame(self.playback.current()) else {
            return;
        };

        Plot::new("bubble_chart")
            .height(PLOT_HEIGHT)
            .legend(Legend::default().position(Corner::RightTop))
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone())
            .x_axis_formatter(|mark, _range| format_count(mark.value))
            .y_axis_formatter(|mark, _range| format_count(mark.value))
            .label_formatter(|name, value| {
                if name.is_empty() {
                    String::new()
                } else {
                    format!(
                        "{name}\nvaccinated: {}\ndeaths: {}",
                        format_count(value.x),
                        format_count(value.y)
                    )
                }
            })
            .show(ui, |plot_ui| {
                if let (Some((x_min, x_max)), Some((y_min, y_max))) =
                    (chart.x_range, chart.y_range)
                {
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));
                }

                for bubble in &frame.bubbles {
                    let Some(x) = bubble.x else {
                        continue;
                    };
                    let color = location_color(bubble.color_index);
                    plot_ui.points(
                        Points::new(PlotPoints::from(vec![[x, bubble.y]]))
                            .radius((bubble.diameter / 2.0) as f32)
                            .color(color.gamma_multiply(0.7))
                            .name(&bubble.location),
                    );
                }
            });
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        let last = self.chart.frame_count().saturating_sub(1);
        let month = self
            .chart
            .frame(self.playback.current())
            .map(|f| f.month.to_string())
            .unwrap_or_default();

        ui.horizontal(|ui| {
            if ui.button("⏮").on_hover_text("Previous month").clicked() {
                self.playback.step_back();
            }
            let play_label = if self.playback.is_playing() { "⏸" } else { "▶" };
            if ui.button(play_label).on_hover_text("Play / pause").clicked() {
                self.playback.toggle();
            }
            if ui.button("⏭").on_hover_text("Next month").clicked() {
                self.playback.step_forward();
            }

            let mut current = self.playback.current();
            let slider = ui.add(Slider::new(&mut current, 0..=last).show_value(false));
            if slider.changed() {
                self.playback.pause();
                self.playback.seek(current);
            }
            ui.label(RichText::new(format!("month = {month}")).strong());
        });
    }
}
