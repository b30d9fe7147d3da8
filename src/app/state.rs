use chrono::{Datelike, Duration, Local, Months, NaiveDate};
use crossterm::event::KeyCode;

use crate::agg::{
    build_report, build_schedule, generate_periods, month_bounds, quarter_bounds, year_bounds,
    Granularity, Report, ScheduleTable,
};
use crate::identity::{materialize_engineer, resolve_engineer, Session};
use crate::store::{Snapshot, Store};
use crate::types::{Engineer, EngineerId};

use super::{AppEvent, AppView, ConfirmAction, ConfirmPopup, FocusMode, ReportPeriod, TABS};

/// The top-level application state.
pub struct App {
    pub running: bool,
    pub store: Store,
    pub snapshot: Snapshot,
    pub schedule: ScheduleTable,
    pub report: Report,
    pub view: AppView,
    view_history: Vec<AppView>,
    pub granularity: Granularity,
    pub reference_date: NaiveDate,
    pub report_period: ReportPeriod,
    /// 0 means "all engineers", `n` means `snapshot.engineers[n - 1]`.
    pub report_engineer_index: usize,
    pub current_engineer: Option<EngineerId>,
    pub status: Option<String>,
    pub selected_trip_index: usize,
    pub selected_expense_index: usize,
    pub selected_engineer_index: usize,
    pub focus_mode: FocusMode,
    pub selected_tab_index: usize,
    pub confirm_popup: Option<ConfirmPopup>,
}

impl App {
    pub fn new(store: Store) -> Self {
        let mut status = None;
        let snapshot = match store.snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                status = Some(err.to_string());
                Snapshot::default()
            }
        };

        let today = Local::now().date_naive();
        let mut app = Self {
            running: true,
            store,
            snapshot,
            schedule: ScheduleTable {
                periods: Vec::new(),
                rows: Vec::new(),
                totals: Vec::new(),
            },
            report: build_report(month_bounds(today.year(), today.month()), None, &[], &[], &[]),
            view: AppView::Dashboard,
            view_history: Vec::new(),
            granularity: Granularity::Month,
            reference_date: today,
            report_period: ReportPeriod::Month,
            report_engineer_index: 0,
            current_engineer: None,
            status,
            selected_trip_index: 0,
            selected_expense_index: 0,
            selected_engineer_index: 0,
            focus_mode: FocusMode::Content,
            selected_tab_index: 0,
            confirm_popup: None,
        };

        app.resolve_session();
        app.recompute();
        app
    }

    /// Recompute the timeline grid and report from the in-memory snapshot.
    pub fn recompute(&mut self) {
        let periods = generate_periods(self.reference_date, self.granularity);
        self.schedule = build_schedule(
            &self.snapshot.engineers,
            &self.snapshot.trips,
            &self.snapshot.availabilities,
            &periods,
        );

        let today = Local::now().date_naive();
        let range = match self.report_period {
            ReportPeriod::Month => month_bounds(today.year(), today.month()),
            ReportPeriod::Quarter => quarter_bounds(today.year(), today.month()),
            ReportPeriod::Year => year_bounds(today.year()),
        };
        let filter = self.report_engineer().map(|engineer| engineer.id.clone());
        self.report = build_report(
            range,
            filter.as_deref(),
            &self.snapshot.engineers,
            &self.snapshot.trips,
            &self.snapshot.expenses,
        );
    }

    pub fn report_engineer(&self) -> Option<&Engineer> {
        if self.report_engineer_index == 0 {
            None
        } else {
            self.snapshot.engineers.get(self.report_engineer_index - 1)
        }
    }

    pub fn engineer_name(&self, engineer_id: &str) -> &str {
        self.snapshot
            .engineers
            .iter()
            .find(|engineer| engineer.id == engineer_id)
            .map(|engineer| engineer.name.as_str())
            .unwrap_or("Unknown engineer")
    }

    /// Central update function - process an event and mutate state.
    pub fn update(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => {}
            AppEvent::KeyPress(key) => self.handle_key(key),
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.confirm_popup.is_some() {
            self.handle_confirm_key(key);
            return;
        }

        match key {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('h') => self.navigate_to(AppView::Dashboard),
            KeyCode::Char('l') => self.navigate_to(AppView::Timeline),
            KeyCode::Char('t') => self.navigate_to(AppView::Trips),
            KeyCode::Char('x') => self.navigate_to(AppView::Expenses),
            KeyCode::Char('g') => self.navigate_to(AppView::Engineers),
            KeyCode::Char('o') => self.navigate_to(AppView::Report),
            KeyCode::Char('?') => {
                if self.view == AppView::Help {
                    self.go_back();
                } else {
                    self.navigate_to(AppView::Help);
                }
            }
            KeyCode::Tab => {
                if self.focus_mode == FocusMode::TabBar {
                    self.focus_mode = FocusMode::Content;
                } else {
                    self.focus_mode = FocusMode::TabBar;
                }
            }
            KeyCode::BackTab => match self.view {
                AppView::Timeline => {
                    self.granularity = self.granularity.next();
                    self.recompute();
                }
                AppView::Report => {
                    self.report_period = self.report_period.next();
                    self.recompute();
                }
                _ => {}
            },
            KeyCode::Char('d') => {
                if self.view == AppView::Timeline {
                    self.reference_date = Local::now().date_naive();
                    self.recompute();
                }
            }
            KeyCode::Char('f') => {
                if self.view == AppView::Report {
                    self.report_engineer_index =
                        (self.report_engineer_index + 1) % (self.snapshot.engineers.len() + 1);
                    self.recompute();
                }
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Left => {
                if self.focus_mode == FocusMode::TabBar {
                    self.navigate_tab_left();
                } else if self.view == AppView::Timeline {
                    self.step_reference(-1);
                }
            }
            KeyCode::Right => {
                if self.focus_mode == FocusMode::TabBar {
                    self.navigate_tab_right();
                } else if self.view == AppView::Timeline {
                    self.step_reference(1);
                }
            }
            KeyCode::Up => {
                if self.focus_mode == FocusMode::Content {
                    self.move_selection(-1);
                }
            }
            KeyCode::Down => {
                if self.focus_mode == FocusMode::Content {
                    self.move_selection(1);
                }
            }
            KeyCode::Enter => {
                if self.focus_mode == FocusMode::TabBar {
                    self.activate_selected_tab();
                }
            }
            KeyCode::Delete => self.open_delete_popup(),
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.apply_confirm_popup(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_popup = None;
            }
            _ => {}
        }
    }

    fn apply_confirm_popup(&mut self) {
        let Some(popup) = self.confirm_popup.take() else {
            return;
        };
        let result = match &popup.action {
            ConfirmAction::DeleteTrip(id) => self.store.delete_trip(id),
            ConfirmAction::DeleteExpense(id) => self.store.delete_expense(id),
        };
        match result {
            Ok(()) => {
                self.status = None;
                self.reload();
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    fn open_delete_popup(&mut self) {
        match self.view {
            AppView::Trips => {
                if let Some(trip) = self.snapshot.trips.get(self.selected_trip_index) {
                    self.confirm_popup = Some(ConfirmPopup {
                        message: format!("Delete trip '{}'? Expenses are kept.", trip.project_name),
                        action: ConfirmAction::DeleteTrip(trip.id.clone()),
                    });
                }
            }
            AppView::Expenses => {
                if let Some(expense) = self.snapshot.expenses.get(self.selected_expense_index) {
                    self.confirm_popup = Some(ConfirmPopup {
                        message: format!(
                            "Delete {} expense of {:.2} {}?",
                            expense.kind, expense.amount, expense.currency
                        ),
                        action: ConfirmAction::DeleteExpense(expense.id.clone()),
                    });
                }
            }
            _ => {}
        }
    }

    /// Re-read all collections from the store and recompute derived state.
    pub fn reload(&mut self) {
        match self.store.snapshot() {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.clamp_selections();
                self.recompute();
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    fn clamp_selections(&mut self) {
        self.selected_trip_index = self
            .selected_trip_index
            .min(self.snapshot.trips.len().saturating_sub(1));
        self.selected_expense_index = self
            .selected_expense_index
            .min(self.snapshot.expenses.len().saturating_sub(1));
        self.selected_engineer_index = self
            .selected_engineer_index
            .min(self.snapshot.engineers.len().saturating_sub(1));
        self.report_engineer_index = self
            .report_engineer_index
            .min(self.snapshot.engineers.len());
    }

    fn navigate_to(&mut self, view: AppView) {
        if self.view != view {
            self.view_history.push(self.view);
            self.view = view;
            self.status = None;
            if let Some(index) = TABS.iter().position(|(_, tab)| *tab == self.view) {
                self.selected_tab_index = index;
            }
        }
    }

    fn go_back(&mut self) {
        if let Some(view) = self.view_history.pop() {
            self.view = view;
        } else {
            self.view = AppView::Dashboard;
        }
        self.status = None;
    }

    fn navigate_tab_left(&mut self) {
        if self.selected_tab_index == 0 {
            self.selected_tab_index = TABS.len() - 1;
        } else {
            self.selected_tab_index -= 1;
        }
    }

    fn navigate_tab_right(&mut self) {
        self.selected_tab_index = (self.selected_tab_index + 1) % TABS.len();
    }

    fn activate_selected_tab(&mut self) {
        let (_, target_view) = TABS[self.selected_tab_index];
        self.navigate_to(target_view);
        self.focus_mode = FocusMode::Content;
    }

    fn move_selection(&mut self, direction: i64) {
        let (index, len) = match self.view {
            AppView::Trips => (&mut self.selected_trip_index, self.snapshot.trips.len()),
            AppView::Expenses => (
                &mut self.selected_expense_index,
                self.snapshot.expenses.len(),
            ),
            AppView::Engineers => (
                &mut self.selected_engineer_index,
                self.snapshot.engineers.len(),
            ),
            _ => return,
        };
        if len == 0 {
            return;
        }
        if direction < 0 {
            *index = if *index == 0 { len - 1 } else { *index - 1 };
        } else {
            *index = (*index + 1) % len;
        }
    }

    /// Move the timeline reference date by one bucket of the current
    /// granularity.
    fn step_reference(&mut self, direction: i64) {
        let stepped = match self.granularity {
            Granularity::Week => Some(self.reference_date + Duration::days(7 * direction)),
            Granularity::Month => shift_months(self.reference_date, direction),
            Granularity::Quarter => shift_months(self.reference_date, 3 * direction),
            Granularity::Year => shift_months(self.reference_date, 12 * direction),
        };
        if let Some(date) = stepped {
            self.reference_date = date;
            self.recompute();
        }
    }

    /// Resolve the signed-in engineer from the environment, creating a
    /// record on first contact.
    fn resolve_session(&mut self) {
        let Ok(email) = std::env::var("TRIPDECK_EMAIL") else {
            return;
        };
        let name = std::env::var("TRIPDECK_NAME").unwrap_or_else(|_| email.clone());
        let session = Session::new(&email, &name);

        if let Some(engineer) = resolve_engineer(&session, &self.snapshot.engineers) {
            self.current_engineer = Some(engineer.id.clone());
            return;
        }
        match self.store.add_engineer(materialize_engineer(&session)) {
            Ok(engineer) => {
                self.current_engineer = Some(engineer.id.clone());
                self.snapshot.engineers.push(engineer);
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }
}

fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let span = Months::new(months.unsigned_abs() as u32);
    if months >= 0 {
        date.checked_add_months(span)
    } else {
        date.checked_sub_months(span)
    }
}
