use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::model::{DayGroup, ScoredObservation, TimeSlot};

/// Group records by calendar date.
///
/// Days come out in ascending order and only days with at least one record
/// appear. Slots inside a day keep the order of `records`.
pub fn organize(records: &[ScoredObservation]) -> Vec<DayGroup> {
    let mut by_date: BTreeMap<NaiveDate, Vec<TimeSlot>> = BTreeMap::new();

    for record in records {
        by_date
            .entry(record.observation.date)
            .or_default()
            .push(TimeSlot::from(record));
    }

    by_date
        .into_iter()
        .map(|(date, best_times)| DayGroup { date, best_times })
        .collect()
}
