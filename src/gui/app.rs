//! Dashboard Main Application
//! Page title over the combo chart and the bubble chart.

use crate::gui::{BubbleView, ComboView};
use crate::pipeline::DashboardData;
use egui::{Color32, RichText, ScrollArea};

pub const PAGE_TITLE: &str = "COVID-19 Dashboard";

/// Main application window.
pub struct DashboardApp {
    combo_view: ComboView,
    bubble_view: BubbleView,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data: DashboardData, frame_interval: f64) -> Self {
        Self {
            combo_view: ComboView::new(data.combo),
            bubble_view: BubbleView::new(data.bubble, frame_interval),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.bubble_view.tick(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new(PAGE_TITLE)
                                .size(26.0)
                                .strong()
                                .color(Color32::from_rgb(100, 149, 237)),
                        );
                    });
                    ui.add_space(10.0);
                    ui.separator();
                    ui.add_space(5.0);

                    self.combo_view.show(ui);
                    self.bubble_view.show(ui);
                });
        });
    }
}
