//! Monthly Aggregation Module
//! Reduces daily records to one row per (month, location).

use super::record::{MonthKey, MonthlyAggregate, RawRecord};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

/// Running state for one (month, location) partition.
struct Partition {
    month: MonthKey,
    location: String,
    deaths_sum: f64,
    /// Date and value of the latest record seen so far.
    latest: Option<(NaiveDate, Option<f64>)>,
}

impl Partition {
    fn push(&mut self, record: &RawRecord) {
        self.deaths_sum += record.new_deaths.unwrap_or(0.0);

        // Ties go to the later row so equal dates behave like a stable sort.
        let newer = match self.latest {
            Some((date, _)) => record.date >= date,
            None => true,
        };
        if newer {
            self.latest = Some((record.date, record.people_vaccinated));
        }
    }

    fn finish(self) -> MonthlyAggregate {
        MonthlyAggregate {
            month: self.month,
            location: self.location,
            new_deaths_sum: self.deaths_sum,
            people_vaccinated_last: self.latest.and_then(|(_, value)| value),
        }
    }
}

/// Group records by (month, location).
///
/// With `min_month` set, records from earlier months are dropped before
/// grouping. Output rows appear in the order their partition was first seen.
pub fn aggregate_monthly(
    records: &[RawRecord],
    min_month: Option<&MonthKey>,
) -> Vec<MonthlyAggregate> {
    let mut index: HashMap<(MonthKey, &str), usize> = HashMap::new();
    let mut partitions: Vec<Partition> = Vec::new();

    for record in records {
        let month = record.month();
        if min_month.is_some_and(|min| &month < min) {
            continue;
        }

        let key = (month, record.location.as_str());
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                partitions.push(Partition {
                    month: key.0.clone(),
                    location: record.location.clone(),
                    deaths_sum: 0.0,
                    latest: None,
                });
                index.insert(key, partitions.len() - 1);
                partitions.len() - 1
            }
        };
        partitions[slot].push(record);
    }

    debug!(
        records = records.len(),
        partitions = partitions.len(),
        min_month = min_month.map(MonthKey::as_str),
        "aggregated monthly data"
    );

    partitions.into_iter().map(Partition::finish).collect()
}

/// Distinct locations in first-appearance order.
pub fn locations(rows: &[MonthlyAggregate]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for row in rows {
        if !seen.iter().any(|l| l == &row.location) {
            seen.push(row.location.clone());
        }
    }
    seen
}

/// Distinct months, ascending.
pub fn months(rows: &[MonthlyAggregate]) -> Vec<MonthKey> {
    let mut months: Vec<MonthKey> = rows.iter().map(|r| r.month.clone()).collect();
    months.sort();
    months.dedup();
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, location: &str, deaths: Option<f64>, vacc: Option<f64>) -> RawRecord {
        RawRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            location: location.to_string(),
            new_deaths: deaths,
            people_vaccinated: vacc,
        }
    }

    #[test]
    fn sums_deaths_and_takes_last_vaccinated() {
        let records = vec![
            record("2021-03-01", "Korea", Some(5.0), Some(100.0)),
            record("2021-03-15", "Korea", Some(10.0), Some(150.0)),
        ];

        let rows = aggregate_monthly(&records, None);

        assert_eq!(
            rows,
            vec![MonthlyAggregate {
                month: MonthKey::parse("2021-03").unwrap(),
                location: "Korea".to_string(),
                new_deaths_sum: 15.0,
                people_vaccinated_last: Some(150.0),
            }]
        );
    }

    #[test]
    fn last_value_follows_date_not_row_order() {
        let records = vec![
            record("2021-03-20", "Korea", Some(1.0), Some(300.0)),
            record("2021-03-02", "Korea", Some(2.0), Some(100.0)),
            record("2021-03-10", "Korea", Some(3.0), Some(200.0)),
        ];

        let rows = aggregate_monthly(&records, None);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].new_deaths_sum, 6.0);
        assert_eq!(rows[0].people_vaccinated_last, Some(300.0));
    }

    #[test]
    fn missing_last_value_is_not_backfilled() {
        let records = vec![
            record("2021-03-01", "Korea", None, Some(100.0)),
            record("2021-03-02", "Korea", None, None),
        ];

        let rows = aggregate_monthly(&records, None);

        assert_eq!(rows[0].new_deaths_sum, 0.0);
        assert_eq!(rows[0].people_vaccinated_last, None);
    }

    #[test]
    fn equal_dates_prefer_later_row() {
        let records = vec![
            record("2021-03-01", "Korea", Some(1.0), Some(100.0)),
            record("2021-03-01", "Korea", Some(1.0), Some(120.0)),
        ];

        let rows = aggregate_monthly(&records, None);

        assert_eq!(rows[0].people_vaccinated_last, Some(120.0));
    }

    #[test]
    fn keeps_first_seen_partition_order() {
        let records = vec![
            record("2021-02-01", "Korea", Some(1.0), None),
            record("2021-02-01", "Japan", Some(2.0), None),
            record("2021-03-01", "Korea", Some(3.0), None),
            record("2021-02-02", "Korea", Some(4.0), None),
        ];

        let rows = aggregate_monthly(&records, None);
        let keys: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.month.as_str(), r.location.as_str()))
            .collect();

        assert_eq!(
            keys,
            vec![("2021-02", "Korea"), ("2021-02", "Japan"), ("2021-03", "Korea")]
        );
        assert_eq!(rows[0].new_deaths_sum, 5.0);
    }

    #[test]
    fn min_month_drops_earlier_records() {
        let records = vec![
            record("2020-11-30", "Korea", Some(9.0), Some(1.0)),
            record("2020-12-01", "Korea", Some(1.0), Some(2.0)),
        ];
        let cutoff = MonthKey::parse("2020-12").unwrap();

        let rows = aggregate_monthly(&records, Some(&cutoff));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].month, cutoff);
        assert_eq!(rows[0].new_deaths_sum, 1.0);
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(aggregate_monthly(&[], None).is_empty());
    }

    #[test]
    fn locations_and_months_helpers() {
        let records = vec![
            record("2021-03-01", "Japan", Some(1.0), None),
            record("2021-01-01", "Korea", Some(1.0), None),
            record("2021-02-01", "Japan", Some(1.0), None),
        ];
        let rows = aggregate_monthly(&records, None);

        assert_eq!(locations(&rows), vec!["Japan", "Korea"]);
        let months: Vec<String> = months(&rows).into_iter().map(String::from).collect();
        assert_eq!(months, vec!["2021-01", "2021-02", "2021-03"]);
    }
}
