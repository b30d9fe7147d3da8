use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{clamp_name, format_money, hex_to_color};
use super::theme::Theme;
use crate::app::App;

pub fn build_report_text(app: &App) -> Text<'_> {
    let mut lines = Vec::new();
    let report = &app.report;

    let filter_name = app
        .report_engineer()
        .map(|engineer| engineer.name.as_str())
        .unwrap_or("All engineers");
    lines.push(Line::from(vec![
        Span::styled("  Period: ", Style::default().fg(Theme::dim())),
        Span::styled(
            app.report_period.label(),
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} - {}", report.range.start, report.range.end),
            Style::default().fg(Theme::accent()),
        ),
        Span::styled("   Filter: ", Style::default().fg(Theme::dim())),
        Span::styled(
            filter_name,
            Style::default()
                .fg(Theme::text())
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled("  Trips: ", Style::default().fg(Theme::dim())),
        Span::styled(
            format!("{}", report.trips.len()),
            Style::default()
                .fg(Theme::text())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Days on site: ", Style::default().fg(Theme::dim())),
        Span::styled(
            format!("{}", report.total_days),
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Expenses: ", Style::default().fg(Theme::dim())),
        Span::styled(
            format_money(report.total_expenses, "EUR"),
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(""));

    // Per-engineer breakdown
    lines.push(Line::from(Span::styled(
        "  By Engineer",
        Style::default()
            .fg(Theme::secondary())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "  ────────────",
        Style::default().fg(Theme::dim()),
    )));
    if report.by_engineer.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No trips in this period",
            Style::default().fg(Theme::dim()),
        )));
    } else {
        for entry in &report.by_engineer {
            let engineer = app
                .snapshot
                .engineers
                .iter()
                .find(|engineer| engineer.id == entry.engineer_id);
            let color = engineer
                .and_then(|engineer| hex_to_color(&engineer.color))
                .unwrap_or(Theme::text());
            let name = engineer
                .map(|engineer| engineer.name.as_str())
                .unwrap_or("Unknown engineer");
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    clamp_name(name, 20),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:>3} trips ", entry.trip_count),
                    Style::default().fg(Theme::text()),
                ),
                Span::styled(
                    format!("{:>4} days ", entry.days),
                    Style::default().fg(Theme::accent()),
                ),
                Span::styled(
                    format!("{:>12}", format_money(entry.expense_total, "EUR")),
                    Style::default().fg(Theme::accent()),
                ),
            ]));
        }
    }
    lines.push(Line::from(""));

    // Per-type breakdown
    lines.push(Line::from(Span::styled(
        "  Expenses by Type",
        Style::default()
            .fg(Theme::secondary())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "  ─────────────────",
        Style::default().fg(Theme::dim()),
    )));
    if report.by_type.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No expenses in this period",
            Style::default().fg(Theme::dim()),
        )));
    } else {
        for entry in &report.by_type {
            let bar_len = (entry.percent / 4.0).round() as usize;
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    clamp_name(entry.kind.label(), 16),
                    Style::default().fg(Theme::highlight()),
                ),
                Span::styled(
                    format!("{:>12} ", format_money(entry.amount, "EUR")),
                    Style::default().fg(Theme::accent()),
                ),
                Span::styled(
                    format!("{:>5.1}% ", entry.percent),
                    Style::default().fg(Theme::text()),
                ),
                Span::styled(
                    "█".repeat(bar_len),
                    Style::default().fg(Theme::secondary()),
                ),
            ]));
        }
    }

    Text::from(lines)
}
