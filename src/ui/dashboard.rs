use chrono::Local;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{clamp_name, format_money, hex_to_color, status_color};
use super::theme::Theme;
use crate::app::App;
use crate::types::TripStatus;

pub fn build_dashboard_text(app: &App) -> Text<'_> {
    let mut lines = Vec::new();

    let now = Local::now();
    lines.push(Line::from(Span::styled(
        format!("  Welcome to Tripdeck - {}", now.format("%A, %B %e, %Y")),
        Style::default()
            .fg(Theme::accent())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    // Quick Stats section
    lines.push(Line::from(Span::styled(
        "  Quick Stats",
        Style::default()
            .fg(Theme::secondary())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "  ────────────",
        Style::default().fg(Theme::dim()),
    )));

    let active = app
        .snapshot
        .trips
        .iter()
        .filter(|trip| trip.status == TripStatus::InProgress)
        .count();
    let upcoming = app
        .snapshot
        .trips
        .iter()
        .filter(|trip| {
            matches!(trip.status, TripStatus::Planned | TripStatus::Confirmed)
                && trip.start_date >= now.date_naive()
        })
        .count();
    let total_expenses: f64 = app
        .snapshot
        .expenses
        .iter()
        .map(|expense| expense.amount)
        .sum();

    lines.push(Line::from(vec![
        Span::styled("  Trips: ", Style::default().fg(Theme::dim())),
        Span::styled(
            format!("{}", app.snapshot.trips.len()),
            Style::default()
                .fg(Theme::text())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Active: ", Style::default().fg(Theme::dim())),
        Span::styled(
            format!("{active}"),
            Style::default()
                .fg(Theme::active())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Upcoming: ", Style::default().fg(Theme::dim())),
        Span::styled(
            format!("{upcoming}"),
            Style::default()
                .fg(Theme::warn())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Engineers: ", Style::default().fg(Theme::dim())),
        Span::styled(
            format!("{}", app.snapshot.engineers.len()),
            Style::default()
                .fg(Theme::text())
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Expenses recorded: ", Style::default().fg(Theme::dim())),
        Span::styled(
            format!("{}", app.snapshot.expenses.len()),
            Style::default()
                .fg(Theme::text())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Total: ", Style::default().fg(Theme::dim())),
        Span::styled(
            format_money(total_expenses, "EUR"),
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(""));

    // Upcoming Trips section
    lines.push(Line::from(Span::styled(
        "  Upcoming Trips",
        Style::default()
            .fg(Theme::secondary())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "  ───────────────",
        Style::default().fg(Theme::dim()),
    )));

    let mut upcoming_trips: Vec<_> = app
        .snapshot
        .trips
        .iter()
        .filter(|trip| trip.end_date >= now.date_naive() && trip.status != TripStatus::Cancelled)
        .collect();
    upcoming_trips.sort_by_key(|trip| trip.start_date);

    if upcoming_trips.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No upcoming trips",
            Style::default().fg(Theme::dim()),
        )));
    } else {
        for trip in upcoming_trips.iter().take(5) {
            let engineer = app
                .snapshot
                .engineers
                .iter()
                .find(|engineer| engineer.id == trip.engineer_id);
            let engineer_color = engineer
                .and_then(|engineer| hex_to_color(&engineer.color))
                .unwrap_or(Theme::text());
            let engineer_name = engineer
                .map(|engineer| engineer.name.as_str())
                .unwrap_or("Unknown engineer");

            lines.push(Line::from(vec![
                Span::styled("  • ", Style::default().fg(Theme::dim())),
                Span::styled(
                    clamp_name(&trip.project_name, 26),
                    Style::default().fg(Theme::text()),
                ),
                Span::raw(" "),
                Span::styled(
                    clamp_name(engineer_name, 18),
                    Style::default().fg(engineer_color),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{} - {}", trip.start_date, trip.end_date),
                    Style::default().fg(Theme::accent()),
                ),
                Span::raw("  "),
                Span::styled(
                    trip.status.label(),
                    Style::default().fg(status_color(trip.status)),
                ),
            ]));
        }
    }
    lines.push(Line::from(""));

    // Recent Expenses section
    lines.push(Line::from(Span::styled(
        "  Recent Expenses",
        Style::default()
            .fg(Theme::secondary())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "  ────────────────",
        Style::default().fg(Theme::dim()),
    )));

    if app.snapshot.expenses.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No expenses yet",
            Style::default().fg(Theme::dim()),
        )));
    } else {
        for expense in app.snapshot.expenses.iter().rev().take(5) {
            lines.push(Line::from(vec![
                Span::styled("  • ", Style::default().fg(Theme::dim())),
                Span::styled(
                    format!("{}", expense.date),
                    Style::default().fg(Theme::dim()),
                ),
                Span::raw(" "),
                Span::styled(
                    clamp_name(expense.kind.label(), 14),
                    Style::default().fg(Theme::highlight()),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{:>10}", format_money(expense.amount, &expense.currency)),
                    Style::default().fg(Theme::accent()),
                ),
                Span::raw("  "),
                Span::styled(
                    clamp_name(&expense.description, 34),
                    Style::default().fg(Theme::text()),
                ),
            ]));
        }
    }

    Text::from(lines)
}
