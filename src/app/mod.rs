mod state;

use crossterm::event::KeyCode;

pub use state::App;

use crate::types::{ExpenseId, TripId};

/// Possible input events the app reacts to.
pub enum AppEvent {
    Tick,
    KeyPress(KeyCode),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Dashboard,
    Timeline,
    Trips,
    Expenses,
    Engineers,
    Report,
    Help,
}

/// The tab bar, in display order. Help is reachable via `?` only.
pub const TABS: [(&str, AppView); 6] = [
    ("Home", AppView::Dashboard),
    ("Timeline", AppView::Timeline),
    ("Trips", AppView::Trips),
    ("Expenses", AppView::Expenses),
    ("Engineers", AppView::Engineers),
    ("Report", AppView::Report),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusMode {
    TabBar,
    Content,
}

/// Date range the report view covers, always anchored to today.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportPeriod {
    Month,
    Quarter,
    Year,
}

impl ReportPeriod {
    pub fn label(self) -> &'static str {
        match self {
            ReportPeriod::Month => "This month",
            ReportPeriod::Quarter => "This quarter",
            ReportPeriod::Year => "This year",
        }
    }

    pub fn next(self) -> ReportPeriod {
        match self {
            ReportPeriod::Month => ReportPeriod::Quarter,
            ReportPeriod::Quarter => ReportPeriod::Year,
            ReportPeriod::Year => ReportPeriod::Month,
        }
    }
}

#[derive(Clone, Debug)]
pub enum ConfirmAction {
    DeleteTrip(TripId),
    DeleteExpense(ExpenseId),
}

#[derive(Clone, Debug)]
pub struct ConfirmPopup {
    pub message: String,
    pub action: ConfirmAction,
}
