//! Pandemic Dashboard - monthly deaths and vaccinations by region
//!
//! Loads daily records from CSV, aggregates them per month and location, and
//! shows a toggleable bar+line chart and an animated bubble chart.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod logging;
pub mod pipeline;

pub use config::DashboardConfig;
pub use pipeline::DashboardData;
