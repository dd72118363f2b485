//! Load → aggregate → chart specs, run once before the window opens.

use crate::charts::{BubbleChart, ComboChart};
use crate::config::DashboardConfig;
use crate::data::{
    aggregate_monthly, load_records, LoadError, MonthKey, MonthlyAggregate, RawRecord,
};
use tracing::{info, trace};

/// Everything the dashboard page displays.
pub struct DashboardData {
    /// Full history, feeds the combo chart.
    pub monthly: Vec<MonthlyAggregate>,
    /// Months from the cutoff on, feeds the bubble chart.
    pub recent: Vec<MonthlyAggregate>,
    pub combo: ComboChart,
    pub bubble: BubbleChart,
}

impl DashboardData {
    /// Aggregate both tables from the raw records and build the charts.
    ///
    /// The bubble table is recomputed from records filtered by month rather
    /// than sliced from the full table.
    pub fn build(records: &[RawRecord], cutoff: &MonthKey) -> Self {
        let monthly = aggregate_monthly(records, None);
        let recent = aggregate_monthly(records, Some(cutoff));

        let combo = ComboChart::build(&monthly);
        let bubble = BubbleChart::build(&recent);

        info!(
            monthly_rows = monthly.len(),
            recent_rows = recent.len(),
            locations = combo.location_count(),
            frames = bubble.frame_count(),
            cutoff = %cutoff,
            "built dashboard charts"
        );
        if let Ok(spec) = serde_json::to_string(&combo) {
            trace!(%spec, "combo chart spec");
        }
        if let Ok(spec) = serde_json::to_string(&bubble) {
            trace!(%spec, "bubble chart spec");
        }

        Self {
            monthly,
            recent,
            combo,
            bubble,
        }
    }

    pub fn load(config: &DashboardConfig) -> Result<Self, LoadError> {
        let records = load_records(&config.data_path)?;
        Ok(Self::build(&records, &config.bubble_cutoff))
    }
}
