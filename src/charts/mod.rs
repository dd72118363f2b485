//! Charts module - chart specifications built from monthly aggregates

mod bubble;
mod combo;
mod playback;

use egui::Color32;

pub use bubble::{Bubble, BubbleChart, BubbleFrame};
pub use combo::{location_title, AxisSide, ComboChart, Series, SeriesKind, OVERVIEW_TITLE};
pub use playback::Playback;

/// Bars and the deaths axis.
pub const DEATHS_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red
/// Lines and the vaccinated axis.
pub const VACCINATED_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219), // Blue
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// Palette color for a location's stable index.
pub fn location_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}
