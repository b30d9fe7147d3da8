/// Aggregation engine: calendar period generation, interval overlap
/// arithmetic and the per-engineer/per-period day totals the timeline and
/// report views render. Everything here is a pure function of its inputs and
/// is recomputed from scratch whenever the underlying collections change.
mod overlap;
mod period;
mod report;
mod schedule;

pub use overlap::{overlap_days, overlaps, span_days};
pub use period::{generate_periods, month_bounds, quarter_bounds, year_bounds, Granularity, Period};
pub use report::{build_report, EngineerTotals, Report, TypeTotals};
pub use schedule::{
    availability_for, build_schedule, is_current_period, ScheduleCell, ScheduleRow, ScheduleTable,
};
