//! Small shared drawing helpers.

use egui::{Color32, RichText};

const CARD_SPACING: f32 = 15.0;

/// Bordered card with a heading, used for each chart on the page.
pub fn card<R>(
    ui: &mut egui::Ui,
    title: &str,
    accent: Color32,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    let inner = egui::Frame::none()
        .rounding(8.0)
        .stroke(egui::Stroke::new(2.0, accent))
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).size(18.0).strong().color(accent));
            ui.add_space(8.0);
            add_contents(ui)
        });
    ui.add_space(CARD_SPACING);
    inner.inner
}

/// Compact axis label: 1234567 -> "1.2M".
pub fn format_count(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}k", value / 1e3)
    } else {
        format!("{value:.0}")
    }
}
