use chrono::NaiveDate;

/// True iff the closed intervals `[a_start, a_end]` and `[b_start, b_end]`
/// share at least one calendar day.
pub fn overlaps(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Inclusive day count of a single interval. Both endpoints count, so a
/// same-day interval is 1 day.
pub fn span_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().abs() + 1
}

/// Number of calendar days shared by two closed intervals, 0 when disjoint.
pub fn overlap_days(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> i64 {
    if !overlaps(a_start, a_end, b_start, b_end) {
        return 0;
    }
    let start = a_start.max(b_start);
    let end = a_end.min(b_end);
    span_days(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn overlapping_intervals_count_shared_days_inclusive() {
        // [Jan 5, Jan 15] vs [Jan 1, Jan 31] -> min(15,31) - max(5,1) + 1 = 11
        assert_eq!(
            overlap_days(d(2024, 1, 5), d(2024, 1, 15), d(2024, 1, 1), d(2024, 1, 31)),
            11
        );
        // Trip hanging over the range boundary is clipped to the range.
        assert_eq!(
            overlap_days(d(2023, 12, 28), d(2024, 1, 5), d(2024, 1, 1), d(2024, 1, 31)),
            5
        );
    }

    #[test]
    fn disjoint_intervals_yield_zero() {
        assert!(!overlaps(d(2024, 1, 1), d(2024, 1, 10), d(2024, 2, 1), d(2024, 2, 10)));
        assert_eq!(
            overlap_days(d(2024, 1, 1), d(2024, 1, 10), d(2024, 2, 1), d(2024, 2, 10)),
            0
        );
    }

    #[test]
    fn touching_endpoints_share_one_day() {
        assert_eq!(
            overlap_days(d(2024, 1, 1), d(2024, 1, 10), d(2024, 1, 10), d(2024, 1, 20)),
            1
        );
    }

    #[test]
    fn single_day_self_overlap_is_one() {
        let day = d(2024, 3, 7);
        assert_eq!(overlap_days(day, day, day, day), 1);
        assert_eq!(span_days(day, day), 1);
    }

    #[test]
    fn span_counts_both_endpoints() {
        assert_eq!(span_days(d(2024, 1, 15), d(2024, 1, 25)), 11);
        // Reversed endpoints still yield a positive count.
        assert_eq!(span_days(d(2024, 1, 25), d(2024, 1, 15)), 11);
    }
}
