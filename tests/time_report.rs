mod common;

#[cfg(test)]
mod tests {
    use super::common::{at, date};
    use chrono::{Duration, NaiveDate};
    use toggl2clockify::libs::time_report::{aggregate, total_rounded_hours, RoundingPolicy, TimeReportEntry};

    fn entry(day: u32, minutes: i64) -> TimeReportEntry {
        TimeReportEntry::new(date(2024, 1, day), Duration::minutes(minutes))
    }

    #[test]
    fn test_rounding_is_half_to_even() {
        assert_eq!(entry(1, 135).total_hours_rounded(), 2);
        assert_eq!(entry(1, 150).total_hours_rounded(), 2);
        assert_eq!(entry(1, 210).total_hours_rounded(), 4);
        assert_eq!(entry(1, 30).total_hours_rounded(), 0);
        assert_eq!(entry(1, 165).total_hours_rounded(), 3);
    }

    #[test]
    fn test_negative_duration_is_clamped() {
        let entry = TimeReportEntry::new(date(2024, 1, 1), Duration::minutes(-5));
        assert_eq!(entry.work_duration(), Duration::zero());
    }

    #[test]
    fn test_entry_starts_at_midnight() {
        assert_eq!(entry(5, 60).start(), at(2024, 1, 5, 0, 0));
    }

    #[test]
    fn test_rounding_policy_end() {
        let report = entry(1, 135);
        assert_eq!(RoundingPolicy::NearestHour.end_of(&report), Some(at(2024, 1, 1, 2, 0)));
        assert_eq!(RoundingPolicy::Exact.end_of(&report), Some(at(2024, 1, 1, 2, 15)));
        assert_eq!(RoundingPolicy::from_flag(true), RoundingPolicy::NearestHour);
        assert_eq!(RoundingPolicy::from_flag(false), RoundingPolicy::Exact);
    }

    #[test]
    fn test_end_outside_calendar_is_none() {
        let huge = TimeReportEntry::new(date(2024, 1, 1), Duration::MAX);
        assert_eq!(RoundingPolicy::Exact.end_of(&huge), None);
        assert_eq!(RoundingPolicy::NearestHour.end_of(&huge), None);

        let last_day = TimeReportEntry::new(NaiveDate::MAX, Duration::hours(5));
        assert_eq!(RoundingPolicy::Exact.end_of(&last_day), None);
    }

    #[test]
    fn test_aggregate_sums_matching_dates() {
        let first = vec![entry(1, 180), entry(2, 60)];
        let second = vec![entry(1, 60), entry(3, 30)];

        let report = aggregate(vec![first, second]);

        assert_eq!(report, vec![entry(1, 240), entry(2, 60), entry(3, 30)]);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let first = vec![entry(2, 45), entry(1, 15)];
        let second = vec![entry(1, 30)];

        assert_eq!(aggregate(vec![first.clone(), second.clone()]), aggregate(vec![second, first]));
    }

    #[test]
    fn test_aggregate_unique_dates_and_empty_input() {
        let report = aggregate(vec![vec![entry(1, 10), entry(1, 20)], vec![entry(1, 30)]]);
        assert_eq!(report, vec![entry(1, 60)]);

        let empty: Vec<Vec<TimeReportEntry>> = Vec::new();
        assert!(aggregate(empty).is_empty());
        assert!(aggregate(vec![Vec::new(), Vec::new()]).is_empty());
    }

    #[test]
    fn test_aggregate_drops_zero_days() {
        let report = aggregate(vec![vec![entry(1, 0), entry(2, 60)]]);
        assert_eq!(report, vec![entry(2, 60)]);
    }

    #[test]
    fn test_aggregate_saturates() {
        let huge = TimeReportEntry::new(date(2024, 1, 1), Duration::MAX);
        let report = aggregate(vec![vec![huge.clone()], vec![huge.clone()], vec![entry(1, 60)]]);

        assert_eq!(report, vec![TimeReportEntry::new(date(2024, 1, 1), Duration::MAX)]);
        assert!(total_rounded_hours(&[huge.clone(), huge]) > 0);
    }

    #[test]
    fn test_total_rounded_hours() {
        let report = vec![entry(1, 135), entry(2, 210)];
        assert_eq!(total_rounded_hours(&report), 6);
        assert_eq!(total_rounded_hours(&[]), 0);
    }
}
