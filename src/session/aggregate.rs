//! Derived aggregates over the current record set
//!
//! Both are recomputed from scratch on every render. Nothing here is cached
//! or stored back into the session.

use crate::model::{TrainingRecord, TrainingType, Weekday};
use std::collections::BTreeMap;

/// Count of records per training type
///
/// All six types are present in the map, including those with zero records.
/// Keys iterate in the fixed display order.
pub fn derived_counts(records: &[TrainingRecord]) -> BTreeMap<TrainingType, usize> {
    let mut counts: BTreeMap<TrainingType, usize> =
        TrainingType::ALL.into_iter().map(|kind| (kind, 0)).collect();

    for record in records {
        *counts.entry(record.kind).or_insert(0) += 1;
    }

    counts
}

/// Only the types that have at least one record, in fixed order
pub fn nonzero_counts(counts: &BTreeMap<TrainingType, usize>) -> Vec<(TrainingType, usize)> {
    counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(kind, count)| (*kind, *count))
        .collect()
}

/// Records that share a weekday, in the order they appear in the record set
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup<'a> {
    pub day: Weekday,
    pub records: Vec<&'a TrainingRecord>,
}

impl DayGroup<'_> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One group per weekday, Sunday first; empty groups included
pub fn grouped_by_day(records: &[TrainingRecord]) -> Vec<DayGroup<'_>> {
    Weekday::ALL
        .into_iter()
        .map(|day| DayGroup {
            day,
            records: records.iter().filter(|r| r.day == day).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrainingId;

    fn record(id: i64, day: Weekday, kind: TrainingType) -> TrainingRecord {
        TrainingRecord {
            id: TrainingId(id),
            day,
            kind,
            date: "01/01/2024".to_string(),
        }
    }

    fn sample() -> Vec<TrainingRecord> {
        vec![
            record(6, Weekday::Sabado, TrainingType::Cardio),
            record(5, Weekday::Segunda, TrainingType::Peito),
            record(4, Weekday::Segunda, TrainingType::Cardio),
            record(3, Weekday::Quarta, TrainingType::Pernas),
            record(2, Weekday::Domingo, TrainingType::Bracos),
            record(1, Weekday::Segunda, TrainingType::Peito),
        ]
    }

    #[test]
    fn test_counts_cover_every_type() {
        let counts = derived_counts(&[]);
        assert_eq!(counts.len(), TrainingType::ALL.len());
        assert!(counts.values().all(|c| *c == 0));
        assert!(nonzero_counts(&counts).is_empty());
    }

    #[test]
    fn test_counts_sum_to_record_count() {
        let records = sample();
        let counts = derived_counts(&records);
        assert_eq!(counts.values().sum::<usize>(), records.len());
        assert_eq!(counts[&TrainingType::Peito], 2);
        assert_eq!(counts[&TrainingType::Cardio], 2);
        assert_eq!(counts[&TrainingType::Ombros], 0);
    }

    #[test]
    fn test_nonzero_counts_keep_fixed_order() {
        let counts = derived_counts(&sample());
        let kinds: Vec<_> = nonzero_counts(&counts).into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                TrainingType::Peito,
                TrainingType::Pernas,
                TrainingType::Bracos,
                TrainingType::Cardio
            ]
        );
    }

    #[test]
    fn test_groups_follow_weekday_order() {
        let records = sample();
        let groups = grouped_by_day(&records);
        let days: Vec<_> = groups.iter().map(|g| g.day).collect();
        assert_eq!(days, Weekday::ALL.to_vec());

        let monday = &groups[Weekday::Segunda.index()];
        let ids: Vec<_> = monday.records.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![5, 4, 1]);
        assert!(groups[Weekday::Terca.index()].is_empty());
    }

    #[test]
    fn test_groups_partition_records() {
        let records = sample();
        let groups = grouped_by_day(&records);

        let mut flattened: Vec<_> = groups
            .iter()
            .flat_map(|g| g.records.iter().map(|r| r.id))
            .collect();
        assert_eq!(flattened.len(), records.len());

        flattened.sort();
        let mut expected: Vec<_> = records.iter().map(|r| r.id).collect();
        expected.sort();
        assert_eq!(flattened, expected);

        for group in &groups {
            assert!(group.records.iter().all(|r| r.day == group.day));
        }
    }
}
