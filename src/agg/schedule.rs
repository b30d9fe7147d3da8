use chrono::NaiveDate;

use crate::agg::overlap::{overlap_days, overlaps};
use crate::agg::period::Period;
use crate::types::{Availability, AvailabilityStatus, Engineer, EngineerId, Trip};

/// One engineer/period cell: trip-days overlapping the period plus the
/// resolved availability status, if any record overlaps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleCell {
    pub days: i64,
    pub availability: Option<AvailabilityStatus>,
}

#[derive(Clone, Debug)]
pub struct ScheduleRow {
    pub engineer_id: EngineerId,
    pub cells: Vec<ScheduleCell>,
}

#[derive(Clone, Debug)]
pub struct ScheduleTable {
    pub periods: Vec<Period>,
    pub rows: Vec<ScheduleRow>,
    /// Column sums of `days` across all engineers.
    pub totals: Vec<i64>,
}

/// Aggregate trips and availabilities into the engineer x period grid.
///
/// Day counts are summed per trip without de-duplication: two overlapping
/// trips of the same engineer both contribute their overlap days to the same
/// period. That matches the dashboard this replaces and is kept as-is.
pub fn build_schedule(
    engineers: &[Engineer],
    trips: &[Trip],
    availabilities: &[Availability],
    periods: &[Period],
) -> ScheduleTable {
    let mut rows = Vec::with_capacity(engineers.len());
    for engineer in engineers {
        let engineer_trips: Vec<&Trip> = trips
            .iter()
            .filter(|trip| trip.engineer_id == engineer.id)
            .collect();

        let cells = periods
            .iter()
            .map(|period| {
                let days = engineer_trips
                    .iter()
                    .map(|trip| {
                        overlap_days(trip.start_date, trip.end_date, period.start, period.end)
                    })
                    .sum();
                ScheduleCell {
                    days,
                    availability: availability_for(&engineer.id, *period, availabilities),
                }
            })
            .collect();

        rows.push(ScheduleRow {
            engineer_id: engineer.id.clone(),
            cells,
        });
    }

    let totals = (0..periods.len())
        .map(|index| rows.iter().map(|row| row.cells[index].days).sum())
        .collect();

    ScheduleTable {
        periods: periods.to_vec(),
        rows,
        totals,
    }
}

/// Resolve the availability status shown for a period: the FIRST record in
/// input order whose interval overlaps the period wins, regardless of which
/// record starts later or is more specific.
pub fn availability_for(
    engineer_id: &str,
    period: Period,
    availabilities: &[Availability],
) -> Option<AvailabilityStatus> {
    availabilities
        .iter()
        .filter(|avail| avail.engineer_id == engineer_id)
        .find(|avail| overlaps(avail.start_date, avail.end_date, period.start, period.end))
        .map(|avail| avail.status)
}

/// Whether a period should be visually distinguished as containing `today`.
pub fn is_current_period(period: Period, today: NaiveDate) -> bool {
    period.contains(today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agg::period::{generate_periods, Granularity};
    use crate::types::TripStatus;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn engineer(id: &str) -> Engineer {
        Engineer {
            id: id.to_string(),
            name: format!("Engineer {id}"),
            email: format!("{id}@company.fr"),
            role: "Field Engineer".to_string(),
            daily_rate: 800.0,
            color: "#3B82F6".to_string(),
        }
    }

    fn trip(id: &str, engineer_id: &str, start: NaiveDate, end: NaiveDate) -> Trip {
        Trip {
            id: id.to_string(),
            engineer_id: engineer_id.to_string(),
            project_name: "Mumbai Power Plant".to_string(),
            location: "Mumbai, India".to_string(),
            start_date: start,
            end_date: end,
            status: TripStatus::Confirmed,
            notes: None,
        }
    }

    fn availability(
        id: &str,
        engineer_id: &str,
        status: AvailabilityStatus,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Availability {
        Availability {
            id: id.to_string(),
            engineer_id: engineer_id.to_string(),
            status,
            start_date: start,
            end_date: end,
            notes: None,
        }
    }

    #[test]
    fn overlapping_trips_of_one_engineer_double_count() {
        let engineers = vec![engineer("1")];
        let trips = vec![
            trip("t1", "1", d(2024, 1, 1), d(2024, 1, 10)),
            trip("t2", "1", d(2024, 1, 5), d(2024, 1, 15)),
        ];
        let periods = generate_periods(d(2024, 1, 1), Granularity::Month);
        let table = build_schedule(&engineers, &trips, &[], &periods);

        // 10 + 11, not the 15 days of the union.
        assert_eq!(table.rows[0].cells[0].days, 21);
        assert_eq!(table.totals[0], 21);
        assert_eq!(table.rows[0].cells[1].days, 0);
    }

    #[test]
    fn trips_spanning_periods_are_clipped_per_period() {
        let engineers = vec![engineer("1")];
        let trips = vec![trip("t1", "1", d(2024, 1, 28), d(2024, 2, 3))];
        let periods = generate_periods(d(2024, 1, 1), Granularity::Month);
        let table = build_schedule(&engineers, &trips, &[], &periods);

        assert_eq!(table.rows[0].cells[0].days, 4); // Jan 28-31
        assert_eq!(table.rows[0].cells[1].days, 3); // Feb 1-3
    }

    #[test]
    fn totals_row_sums_across_engineers() {
        let engineers = vec![engineer("1"), engineer("2")];
        let trips = vec![
            trip("t1", "1", d(2024, 3, 1), d(2024, 3, 5)),
            trip("t2", "2", d(2024, 3, 10), d(2024, 3, 12)),
        ];
        let periods = generate_periods(d(2024, 1, 1), Granularity::Month);
        let table = build_schedule(&engineers, &trips, &[], &periods);

        assert_eq!(table.rows[0].cells[2].days, 5);
        assert_eq!(table.rows[1].cells[2].days, 3);
        assert_eq!(table.totals[2], 8);
    }

    #[test]
    fn availability_first_match_in_input_order_wins() {
        let period = Period { start: d(2024, 1, 1), end: d(2024, 1, 31) };
        // The later-starting record was inserted first, so it wins.
        let availabilities = vec![
            availability("a1", "1", AvailabilityStatus::OnBreak, d(2024, 1, 20), d(2024, 1, 25)),
            availability("a2", "1", AvailabilityStatus::Available, d(2024, 1, 1), d(2024, 1, 31)),
        ];
        assert_eq!(
            availability_for("1", period, &availabilities),
            Some(AvailabilityStatus::OnBreak)
        );
    }

    #[test]
    fn availability_ignores_other_engineers_and_disjoint_records() {
        let period = Period { start: d(2024, 1, 1), end: d(2024, 1, 31) };
        let availabilities = vec![
            availability("a1", "2", AvailabilityStatus::Available, d(2024, 1, 1), d(2024, 1, 31)),
            availability("a2", "1", AvailabilityStatus::Flexible, d(2024, 3, 1), d(2024, 3, 10)),
        ];
        assert_eq!(availability_for("1", period, &availabilities), None);
    }

    #[test]
    fn schedule_cells_carry_availability() {
        let engineers = vec![engineer("1")];
        let availabilities = vec![availability(
            "a1",
            "1",
            AvailabilityStatus::CannotTravel,
            d(2024, 6, 1),
            d(2024, 6, 30),
        )];
        let periods = generate_periods(d(2024, 1, 1), Granularity::Month);
        let table = build_schedule(&engineers, &[], &availabilities, &periods);

        assert_eq!(
            table.rows[0].cells[5].availability,
            Some(AvailabilityStatus::CannotTravel)
        );
        assert_eq!(table.rows[0].cells[4].availability, None);
    }

    #[test]
    fn current_period_flag_is_inclusive() {
        let period = Period { start: d(2024, 1, 1), end: d(2024, 1, 31) };
        assert!(is_current_period(period, d(2024, 1, 1)));
        assert!(is_current_period(period, d(2024, 1, 31)));
        assert!(!is_current_period(period, d(2024, 2, 1)));
    }

    #[test]
    fn trips_of_unknown_engineers_are_skipped() {
        let engineers = vec![engineer("1")];
        let trips = vec![trip("t1", "ghost", d(2024, 1, 1), d(2024, 1, 10))];
        let periods = generate_periods(d(2024, 1, 1), Granularity::Month);
        let table = build_schedule(&engineers, &trips, &[], &periods);

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].cells[0].days, 0);
        assert_eq!(table.totals[0], 0);
    }
}
