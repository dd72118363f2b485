//! GUI module - dashboard page and chart widgets

mod app;
mod bubble_view;
mod combo_view;
mod widgets;

pub use app::{DashboardApp, PAGE_TITLE};
pub use bubble_view::BubbleView;
pub use combo_view::ComboView;
