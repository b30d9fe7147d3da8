use chrono::{Datelike, Duration, NaiveDate};

/// A contiguous calendar bucket. `end` is inclusive: the last calendar day
/// of the bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Granularity {
    Week,
    Month,
    Quarter,
    Year,
}

impl Granularity {
    pub fn label(self) -> &'static str {
        match self {
            Granularity::Week => "Week",
            Granularity::Month => "Month",
            Granularity::Quarter => "Quarter",
            Granularity::Year => "Year",
        }
    }

    pub fn next(self) -> Granularity {
        match self {
            Granularity::Week => Granularity::Month,
            Granularity::Month => Granularity::Quarter,
            Granularity::Quarter => Granularity::Year,
            Granularity::Year => Granularity::Week,
        }
    }
}

/// Generate the ordered, non-overlapping bucket sequence for a reference
/// date. Week/month/quarter buckets partition the calendar year containing
/// the reference date; year granularity is intentionally different and
/// yields a 5-year window centered on the reference year.
pub fn generate_periods(reference: NaiveDate, granularity: Granularity) -> Vec<Period> {
    match granularity {
        Granularity::Week => weeks_of_year(reference.year()),
        Granularity::Month => (1..=12).map(|m| month_bounds(reference.year(), m)).collect(),
        Granularity::Quarter => (0..4)
            .map(|q| quarter_bounds(reference.year(), q * 3 + 1))
            .collect(),
        Granularity::Year => (reference.year() - 2..=reference.year() + 2)
            .map(year_bounds)
            .collect(),
    }
}

/// Monday-aligned weeks covering Jan 1 - Dec 31. The first bucket starts on
/// the Monday on or before Jan 1, so the outermost weeks can extend past the
/// year boundary.
fn weeks_of_year(year: i32) -> Vec<Period> {
    let jan1 = first_of_year(year);
    let dec31 = last_of_year(year);
    let mut start = jan1 - Duration::days(jan1.weekday().num_days_from_monday() as i64);
    let mut periods = Vec::new();
    while start <= dec31 {
        periods.push(Period {
            start,
            end: start + Duration::days(6),
        });
        start += Duration::days(7);
    }
    periods
}

/// First day of `month` through the last day of that month.
pub fn month_bounds(year: i32, month: u32) -> Period {
    let start = NaiveDate::from_ymd_opt(year, month, 1).expect("valid month start");
    let next = if month == 12 {
        first_of_year(year + 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).expect("valid month start")
    };
    Period {
        start,
        end: next - Duration::days(1),
    }
}

/// Quarter containing `month` (given as its first month: 1, 4, 7 or 10
/// after alignment).
pub fn quarter_bounds(year: i32, month: u32) -> Period {
    let quarter_start_month = ((month - 1) / 3) * 3 + 1;
    let start = NaiveDate::from_ymd_opt(year, quarter_start_month, 1).expect("valid quarter start");
    let end = month_bounds(year, quarter_start_month + 2).end;
    Period { start, end }
}

pub fn year_bounds(year: i32) -> Period {
    Period {
        start: first_of_year(year),
        end: last_of_year(year),
    }
}

fn first_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).expect("valid year start")
}

fn last_of_year(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).expect("valid year end")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_periods_partition_the_year() {
        let periods = generate_periods(d(2024, 6, 17), Granularity::Month);
        assert_eq!(periods.len(), 12);
        assert_eq!(periods[0].start, d(2024, 1, 1));
        assert_eq!(periods[11].end, d(2024, 12, 31));
        // Leap year February.
        assert_eq!(periods[1].end, d(2024, 2, 29));
        for pair in periods.windows(2) {
            assert_eq!(pair[1].start, pair[0].end + Duration::days(1));
        }
    }

    #[test]
    fn quarter_periods_partition_the_year() {
        let periods = generate_periods(d(2023, 2, 1), Granularity::Quarter);
        assert_eq!(periods.len(), 4);
        assert_eq!(periods[0], Period { start: d(2023, 1, 1), end: d(2023, 3, 31) });
        assert_eq!(periods[3], Period { start: d(2023, 10, 1), end: d(2023, 12, 31) });
        for pair in periods.windows(2) {
            assert_eq!(pair[1].start, pair[0].end + Duration::days(1));
        }
    }

    #[test]
    fn week_periods_start_on_monday_and_cover_the_year() {
        let periods = generate_periods(d(2024, 8, 15), Granularity::Week);
        // 2024-01-01 is a Monday, 2024-12-30 is a Monday: 53 buckets.
        assert_eq!(periods.len(), 53);
        assert_eq!(periods[0].start, d(2024, 1, 1));
        for period in &periods {
            assert_eq!(period.start.weekday(), Weekday::Mon);
            assert_eq!(span_len(period), 7);
        }
        // Last bucket contains Dec 31 even though it spills into 2025.
        assert!(periods.last().unwrap().contains(d(2024, 12, 31)));
    }

    #[test]
    fn week_periods_reach_before_jan_first_when_needed() {
        // 2025-01-01 is a Wednesday, so the first bucket starts 2024-12-30.
        let periods = generate_periods(d(2025, 3, 3), Granularity::Week);
        assert_eq!(periods[0].start, d(2024, 12, 30));
        assert!(periods[0].contains(d(2025, 1, 1)));
    }

    #[test]
    fn year_view_is_a_five_year_window() {
        let periods = generate_periods(d(2024, 7, 4), Granularity::Year);
        let starts: Vec<i32> = periods.iter().map(|p| p.start.year()).collect();
        assert_eq!(starts, vec![2022, 2023, 2024, 2025, 2026]);
        assert_eq!(periods[2], Period { start: d(2024, 1, 1), end: d(2024, 12, 31) });
    }

    #[test]
    fn period_contains_is_inclusive_on_both_ends() {
        let period = month_bounds(2024, 1);
        assert!(period.contains(d(2024, 1, 1)));
        assert!(period.contains(d(2024, 1, 31)));
        assert!(!period.contains(d(2024, 2, 1)));
        assert!(!period.contains(d(2023, 12, 31)));
    }

    fn span_len(period: &Period) -> i64 {
        (period.end - period.start).num_days() + 1
    }
}
