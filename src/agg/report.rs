use crate::agg::overlap::{overlaps, span_days};
use crate::agg::period::Period;
use crate::types::{Engineer, EngineerId, Expense, ExpenseType, Trip};

#[derive(Clone, Debug, PartialEq)]
pub struct EngineerTotals {
    pub engineer_id: EngineerId,
    pub trip_count: usize,
    pub days: i64,
    pub expense_total: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeTotals {
    pub kind: ExpenseType,
    pub amount: f64,
    pub percent: f64,
}

/// Totals and breakdowns for a date range, optionally narrowed to one
/// engineer.
#[derive(Clone, Debug)]
pub struct Report {
    pub range: Period,
    pub trips: Vec<Trip>,
    pub expenses: Vec<Expense>,
    pub total_days: i64,
    pub total_expenses: f64,
    pub by_engineer: Vec<EngineerTotals>,
    pub by_type: Vec<TypeTotals>,
}

/// Build the report for `range`.
///
/// Trips are included when they OVERLAP the range and contribute their full
/// unclipped duration; expenses are included when their single date falls
/// inside the range. The asymmetry is deliberate and mirrors the dashboard
/// this replaces.
pub fn build_report(
    range: Period,
    engineer_filter: Option<&str>,
    engineers: &[Engineer],
    trips: &[Trip],
    expenses: &[Expense],
) -> Report {
    let matches_engineer =
        |id: &str| engineer_filter.map(|filter| filter == id).unwrap_or(true);

    let trips: Vec<Trip> = trips
        .iter()
        .filter(|trip| {
            overlaps(trip.start_date, trip.end_date, range.start, range.end)
                && matches_engineer(&trip.engineer_id)
        })
        .cloned()
        .collect();

    let expenses: Vec<Expense> = expenses
        .iter()
        .filter(|expense| range.contains(expense.date) && matches_engineer(&expense.engineer_id))
        .cloned()
        .collect();

    let total_days = trips
        .iter()
        .map(|trip| span_days(trip.start_date, trip.end_date))
        .sum();
    let total_expenses: f64 = expenses.iter().map(|expense| expense.amount).sum();

    // Engineers with zero matching trips are excluded even when they have
    // matching expenses.
    let by_engineer = engineers
        .iter()
        .filter(|engineer| matches_engineer(&engineer.id))
        .filter_map(|engineer| {
            let engineer_trips: Vec<&Trip> = trips
                .iter()
                .filter(|trip| trip.engineer_id == engineer.id)
                .collect();
            if engineer_trips.is_empty() {
                return None;
            }
            let days = engineer_trips
                .iter()
                .map(|trip| span_days(trip.start_date, trip.end_date))
                .sum();
            let expense_total = expenses
                .iter()
                .filter(|expense| expense.engineer_id == engineer.id)
                .map(|expense| expense.amount)
                .sum();
            Some(EngineerTotals {
                engineer_id: engineer.id.clone(),
                trip_count: engineer_trips.len(),
                days,
                expense_total,
            })
        })
        .collect();

    let by_type = ExpenseType::ALL
        .into_iter()
        .filter_map(|kind| {
            let matching: Vec<&Expense> =
                expenses.iter().filter(|expense| expense.kind == kind).collect();
            if matching.is_empty() {
                return None;
            }
            let amount: f64 = matching.iter().map(|expense| expense.amount).sum();
            let percent = if total_expenses > 0.0 {
                amount / total_expenses * 100.0
            } else {
                0.0
            };
            Some(TypeTotals { kind, amount, percent })
        })
        .collect();

    Report {
        range,
        trips,
        expenses,
        total_days,
        total_expenses,
        by_engineer,
        by_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agg::period::month_bounds;
    use crate::types::TripStatus;
    use chrono::NaiveDate;

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
            color: "#10B981".to_string(),
        }
    }

    fn trip(id: &str, engineer_id: &str, start: NaiveDate, end: NaiveDate) -> Trip {
        Trip {
            id: id.to_string(),
            engineer_id: engineer_id.to_string(),
            project_name: "Delhi Infrastructure".to_string(),
            location: "Delhi, India".to_string(),
            start_date: start,
            end_date: end,
            status: TripStatus::Completed,
            notes: None,
        }
    }

    fn expense(
        id: &str,
        engineer_id: &str,
        kind: ExpenseType,
        amount: f64,
        date: NaiveDate,
    ) -> Expense {
        Expense {
            id: id.to_string(),
            trip_id: "t1".to_string(),
            engineer_id: engineer_id.to_string(),
            kind,
            amount,
            currency: "EUR".to_string(),
            date,
            description: String::new(),
            receipt: None,
        }
    }

    #[test]
    fn boundary_spanning_trip_counts_in_full() {
        let engineers = vec![engineer("1")];
        let trips = vec![trip("t1", "1", d(2023, 12, 28), d(2024, 1, 5))];
        let report = build_report(month_bounds(2024, 1), None, &engineers, &trips, &[]);

        assert_eq!(report.trips.len(), 1);
        // Full 9-day duration, not the 5 days inside January.
        assert_eq!(report.total_days, 9);
        assert_eq!(report.by_engineer[0].days, 9);
    }

    #[test]
    fn trips_outside_the_range_are_excluded() {
        let engineers = vec![engineer("1")];
        let trips = vec![trip("t1", "1", d(2024, 3, 1), d(2024, 3, 10))];
        let report = build_report(month_bounds(2024, 1), None, &engineers, &trips, &[]);

        assert!(report.trips.is_empty());
        assert_eq!(report.total_days, 0);
        assert!(report.by_engineer.is_empty());
    }

    #[test]
    fn expense_inclusion_is_point_based_with_inclusive_boundaries() {
        let expenses = vec![
            expense("e1", "1", ExpenseType::Travel, 100.0, d(2024, 1, 1)),
            expense("e2", "1", ExpenseType::Travel, 100.0, d(2024, 1, 31)),
            expense("e3", "1", ExpenseType::Travel, 100.0, d(2023, 12, 31)),
            expense("e4", "1", ExpenseType::Travel, 100.0, d(2024, 2, 1)),
        ];
        let report = build_report(month_bounds(2024, 1), None, &[], &[], &expenses);

        assert_eq!(report.expenses.len(), 2);
        assert_eq!(report.total_expenses, 200.0);
    }

    #[test]
    fn engineer_filter_narrows_trips_and_expenses() {
        let engineers = vec![engineer("1"), engineer("2")];
        let trips = vec![
            trip("t1", "1", d(2024, 1, 2), d(2024, 1, 4)),
            trip("t2", "2", d(2024, 1, 10), d(2024, 1, 12)),
        ];
        let expenses = vec![
            expense("e1", "1", ExpenseType::Meals, 50.0, d(2024, 1, 3)),
            expense("e2", "2", ExpenseType::Meals, 70.0, d(2024, 1, 11)),
        ];
        let report = build_report(month_bounds(2024, 1), Some("2"), &engineers, &trips, &expenses);

        assert_eq!(report.trips.len(), 1);
        assert_eq!(report.trips[0].id, "t2");
        assert_eq!(report.total_expenses, 70.0);
        assert_eq!(report.by_engineer.len(), 1);
        assert_eq!(report.by_engineer[0].engineer_id, "2");
    }

    #[test]
    fn engineers_with_only_expenses_are_excluded_from_breakdown() {
        let engineers = vec![engineer("1"), engineer("2")];
        let trips = vec![trip("t1", "1", d(2024, 1, 2), d(2024, 1, 4))];
        let expenses = vec![expense("e1", "2", ExpenseType::Other, 99.0, d(2024, 1, 3))];
        let report = build_report(month_bounds(2024, 1), None, &engineers, &trips, &expenses);

        assert_eq!(report.by_engineer.len(), 1);
        assert_eq!(report.by_engineer[0].engineer_id, "1");
        // The orphaned expense still counts into the report totals.
        assert_eq!(report.total_expenses, 99.0);
    }

    #[test]
    fn type_percentages_sum_to_one_hundred() {
        let expenses = vec![
            expense("e1", "1", ExpenseType::Travel, 1200.0, d(2024, 1, 5)),
            expense("e2", "1", ExpenseType::Accommodation, 1500.0, d(2024, 1, 5)),
            expense("e3", "1", ExpenseType::Meals, 450.0, d(2024, 1, 6)),
        ];
        let report = build_report(month_bounds(2024, 1), None, &[], &[], &expenses);

        let percent_sum: f64 = report.by_type.iter().map(|entry| entry.percent).sum();
        assert!((percent_sum - 100.0).abs() < 1e-9);
        assert_eq!(report.by_type[0].kind, ExpenseType::Travel);
    }

    #[test]
    fn zero_total_produces_no_division_artifact() {
        let expenses = vec![expense("e1", "1", ExpenseType::Travel, 0.0, d(2024, 1, 5))];
        let report = build_report(month_bounds(2024, 1), None, &[], &[], &expenses);

        assert_eq!(report.by_type.len(), 1);
        assert_eq!(report.by_type[0].percent, 0.0);
        assert!(report.by_type[0].percent.is_finite());
    }

    #[test]
    fn absent_types_are_omitted() {
        let expenses = vec![expense("e1", "1", ExpenseType::Travel, 10.0, d(2024, 1, 5))];
        let report = build_report(month_bounds(2024, 1), None, &[], &[], &expenses);

        assert_eq!(report.by_type.len(), 1);
        assert_eq!(report.by_type[0].kind, ExpenseType::Travel);
    }
}
