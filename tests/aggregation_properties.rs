//! Property tests for monthly aggregation and the combo chart selector.

use chrono::{Days, NaiveDate};
use pandemic_dashboard::charts::ComboChart;
use pandemic_dashboard::data::{aggregate_monthly, MonthKey, MonthlyAggregate, RawRecord};
use proptest::prelude::*;
use std::collections::HashSet;

const LOCATIONS: [&str; 4] = ["Korea", "Japan", "Chile", "Peru"];

fn record_strategy() -> impl Strategy<Value = RawRecord> {
    (
        0u64..240,
        0usize..LOCATIONS.len(),
        proptest::option::of(0u32..500),
        proptest::option::of(0u32..1_000_000),
    )
        .prop_map(|(offset, loc, deaths, vaccinated)| RawRecord {
            date: NaiveDate::from_ymd_opt(2020, 9, 1)
                .unwrap()
                .checked_add_days(Days::new(offset))
                .unwrap(),
            location: LOCATIONS[loc].to_string(),
            new_deaths: deaths.map(f64::from),
            people_vaccinated: vaccinated.map(f64::from),
        })
}

fn group<'a>(records: &'a [RawRecord], row: &MonthlyAggregate) -> Vec<(usize, &'a RawRecord)> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.month() == row.month && r.location == row.location)
        .collect()
}

proptest! {
    #[test]
    fn every_row_matches_its_raw_records(records in prop::collection::vec(record_strategy(), 0..80)) {
        let rows = aggregate_monthly(&records, None);

        let mut seen = HashSet::new();
        for row in &rows {
            prop_assert!(seen.insert((row.month.clone(), row.location.clone())));

            let members = group(&records, row);
            prop_assert!(!members.is_empty());

            let expected_sum: f64 = members.iter().map(|(_, r)| r.new_deaths.unwrap_or(0.0)).sum();
            prop_assert_eq!(row.new_deaths_sum, expected_sum);

            let latest_date = members.iter().map(|(_, r)| r.date).max().unwrap();
            let (_, latest) = members
                .iter()
                .filter(|(_, r)| r.date == latest_date)
                .last()
                .unwrap();
            prop_assert_eq!(row.people_vaccinated_last, latest.people_vaccinated);
        }

        let observed: HashSet<(MonthKey, String)> =
            records.iter().map(|r| (r.month(), r.location.clone())).collect();
        prop_assert_eq!(observed.len(), rows.len());
    }

    #[test]
    fn filter_then_aggregate_equals_aggregate_then_filter(
        records in prop::collection::vec(record_strategy(), 0..80),
        cutoff_month in 9u32..=12,
    ) {
        let cutoff = MonthKey::parse(&format!("2020-{cutoff_month:02}")).unwrap();

        let filtered = aggregate_monthly(&records, Some(&cutoff));
        let sliced: Vec<MonthlyAggregate> = aggregate_monthly(&records, None)
            .into_iter()
            .filter(|r| r.month >= cutoff)
            .collect();

        prop_assert!(filtered.iter().all(|r| r.month >= cutoff));
        prop_assert_eq!(filtered, sliced);
    }

    #[test]
    fn exactly_one_pair_visible_after_any_selection(
        records in prop::collection::vec(record_strategy(), 1..60),
        picks in prop::collection::vec(0usize..6, 0..10),
    ) {
        let rows = aggregate_monthly(&records, None);
        let mut chart = ComboChart::build(&rows);
        let n = chart.location_count();
        prop_assert_eq!(chart.series.len(), 2 * n);

        let mut active = 0;
        for pick in picks {
            if chart.select(pick) {
                active = pick;
            }
            let visibility = chart.visibility();
            prop_assert_eq!(visibility.iter().filter(|v| **v).count(), 2);
            prop_assert!(visibility[2 * active] && visibility[2 * active + 1]);
        }
    }
}
