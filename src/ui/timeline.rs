use chrono::{Datelike, Local};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{availability_color, clamp_name, hex_to_color};
use super::theme::Theme;
use crate::agg::{is_current_period, Granularity, Period};
use crate::app::App;
use crate::types::AvailabilityStatus;

const NAME_WIDTH: usize = 18;
const CELL_WIDTH: usize = 7;

/// The engineer x period grid of on-site days and availability markers.
pub fn build_timeline_text(app: &App) -> Text<'_> {
    let mut lines = Vec::new();
    let today = Local::now().date_naive();

    lines.push(Line::from(vec![
        Span::styled("  View: ", Style::default().fg(Theme::dim())),
        Span::styled(
            app.granularity.label(),
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Reference: ", Style::default().fg(Theme::dim())),
        Span::styled(
            format!("{}", app.reference_date),
            Style::default().fg(Theme::accent()),
        ),
    ]));
    lines.push(Line::from(""));

    // Column header
    let mut header = vec![Span::raw(" ".repeat(NAME_WIDTH + 2))];
    for period in &app.schedule.periods {
        let style = if is_current_period(*period, today) {
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Theme::dim())
        };
        header.push(Span::styled(
            format!("{:>width$}", period_label(*period, app.granularity), width = CELL_WIDTH),
            style,
        ));
    }
    lines.push(Line::from(header));

    for row in &app.schedule.rows {
        let engineer = app
            .snapshot
            .engineers
            .iter()
            .find(|engineer| engineer.id == row.engineer_id);
        let color = engineer
            .and_then(|engineer| hex_to_color(&engineer.color))
            .unwrap_or(Theme::text());
        let name = engineer
            .map(|engineer| engineer.name.as_str())
            .unwrap_or("Unknown engineer");

        let mut spans = vec![
            Span::raw("  "),
            Span::styled(
                clamp_name(name, NAME_WIDTH),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ];
        for (period, cell) in app.schedule.periods.iter().zip(&row.cells) {
            let days = if cell.days > 0 {
                format!("{}", cell.days)
            } else {
                "·".to_string()
            };
            let marker = cell
                .availability
                .map(|status| status.marker().to_string())
                .unwrap_or_else(|| " ".to_string());
            let mut style = if cell.days > 0 {
                Style::default().fg(Theme::accent())
            } else {
                Style::default().fg(Theme::dim())
            };
            if is_current_period(*period, today) {
                style = style.add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(
                format!("{:>width$}", days, width = CELL_WIDTH - 2),
                style,
            ));
            let marker_style = cell
                .availability
                .map(|status| Style::default().fg(availability_color(status)))
                .unwrap_or_default();
            spans.push(Span::styled(format!(" {marker}"), marker_style));
        }
        lines.push(Line::from(spans));
    }

    // Totals row
    let mut totals = vec![
        Span::raw("  "),
        Span::styled(
            clamp_name("Total", NAME_WIDTH),
            Style::default()
                .fg(Theme::secondary())
                .add_modifier(Modifier::BOLD),
        ),
    ];
    for (period, total) in app.schedule.periods.iter().zip(&app.schedule.totals) {
        let text = if *total > 0 {
            format!("{total}")
        } else {
            "·".to_string()
        };
        let mut style = Style::default().fg(Theme::secondary());
        if is_current_period(*period, today) {
            style = style.add_modifier(Modifier::BOLD);
        }
        totals.push(Span::styled(
            format!("{:>width$}  ", text, width = CELL_WIDTH - 2),
            style,
        ));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(totals));

    lines.push(Line::from(""));
    let mut legend = vec![Span::styled(
        "  Availability: ",
        Style::default().fg(Theme::dim()),
    )];
    for status in AvailabilityStatus::ALL {
        legend.push(Span::styled(
            format!("{} ", status.marker()),
            Style::default()
                .fg(availability_color(status))
                .add_modifier(Modifier::BOLD),
        ));
        legend.push(Span::styled(
            format!("{}  ", status.label()),
            Style::default().fg(Theme::dim()),
        ));
    }
    lines.push(Line::from(legend));

    Text::from(lines)
}

fn period_label(period: Period, granularity: Granularity) -> String {
    match granularity {
        Granularity::Week => period.start.format("%d %b").to_string(),
        Granularity::Month => period.start.format("%b").to_string(),
        Granularity::Quarter => format!("Q{}", period.start.month0() / 3 + 1),
        Granularity::Year => period.start.format("%Y").to_string(),
    }
}
