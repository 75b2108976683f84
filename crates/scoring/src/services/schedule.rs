use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::models::{Round, RoundStatus};

/// A juror's rounds split by lifecycle. Input order is kept within each bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoundBuckets {
    pub ongoing: Vec<Round>,
    pub upcoming: Vec<Round>,
    /// Everything neither ongoing nor upcoming, including unrecognized statuses.
    pub completed: Vec<Round>,
}

impl RoundBuckets {
    pub fn len(&self) -> usize {
        self.ongoing.len() + self.upcoming.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn bucket_rounds(rounds: impl IntoIterator<Item = Round>) -> RoundBuckets {
    let mut buckets = RoundBuckets::default();
    for round in rounds {
        match round.status {
            RoundStatus::Ongoing => buckets.ongoing.push(round),
            RoundStatus::Upcoming => buckets.upcoming.push(round),
            _ => buckets.completed.push(round),
        }
    }
    buckets
}

pub fn rounds_on(rounds: &[Round], date: NaiveDate) -> Vec<&Round> {
    rounds.iter().filter(|r| r.date == date).collect()
}

/// Calendar days carrying at least one round, ascending.
pub fn dates_with_rounds(rounds: &[Round]) -> BTreeSet<NaiveDate> {
    rounds.iter().map(|r| r.date).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::round;

    #[test]
    fn test_bucket_rounds_keeps_order() {
        let rounds = vec![
            round(1, RoundStatus::Completed, (2025, 3, 1)),
            round(2, RoundStatus::Ongoing, (2025, 3, 2)),
            round(3, RoundStatus::Upcoming, (2025, 3, 3)),
            round(4, RoundStatus::Evaluating, (2025, 3, 1)),
            round(5, RoundStatus::Other("paused".to_string()), (2025, 3, 4)),
            round(6, RoundStatus::Ongoing, (2025, 3, 2)),
        ];

        let buckets = bucket_rounds(rounds);
        let ids = |v: &[Round]| v.iter().map(|r| r.id).collect::<Vec<_>>();

        assert_eq!(ids(&buckets.ongoing), vec![2, 6]);
        assert_eq!(ids(&buckets.upcoming), vec![3]);
        assert_eq!(ids(&buckets.completed), vec![1, 4, 5]);
        assert_eq!(buckets.len(), 6);
    }

    #[test]
    fn test_calendar_helpers() {
        let rounds = vec![
            round(1, RoundStatus::Completed, (2025, 3, 2)),
            round(2, RoundStatus::Ongoing, (2025, 3, 1)),
            round(3, RoundStatus::Upcoming, (2025, 3, 2)),
        ];

        let day = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let on_day: Vec<i64> = rounds_on(&rounds, day).iter().map(|r| r.id).collect();
        assert_eq!(on_day, vec![1, 3]);

        let dates: Vec<NaiveDate> = dates_with_rounds(&rounds).into_iter().collect();
        assert_eq!(
            dates,
            vec![NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), day]
        );

        let empty_day = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert!(rounds_on(&rounds, empty_day).is_empty());
    }
}
