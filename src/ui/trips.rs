use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{clamp_name, hex_to_color, status_color};
use super::theme::Theme;
use crate::agg::span_days;
use crate::app::App;

pub fn build_trips_text(app: &App) -> Text<'_> {
    let mut lines = Vec::new();

    if app.snapshot.trips.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No trips yet. Add one with the `trip add` command.",
            Style::default().fg(Theme::dim()),
        )));
        return Text::from(lines);
    }

    for (index, trip) in app.snapshot.trips.iter().enumerate() {
        let selected = index == app.selected_trip_index;
        let marker_style = if selected {
            Style::default()
                .fg(Theme::selection_marker())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::dim())
        };
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
        let mut name_style = Style::default().fg(Theme::text());
        if selected {
            name_style = name_style.add_modifier(Modifier::BOLD);
        }

        let mut spans = vec![
            Span::styled(if selected { "  > " } else { "    " }, marker_style),
            Span::styled(clamp_name(&trip.project_name, 24), name_style),
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
            Span::styled(
                format!(" {:>3}d ", span_days(trip.start_date, trip.end_date)),
                Style::default().fg(Theme::dim()),
            ),
            Span::styled(
                format!("{:<12}", trip.status.label()),
                Style::default().fg(status_color(trip.status)),
            ),
        ];
        if let Some(notes) = trip.notes.as_deref() {
            spans.push(Span::styled(
                format!(" {}", clamp_name(notes, 28)),
                Style::default().fg(Theme::dim()),
            ));
        }
        lines.push(Line::from(spans));

        if selected {
            lines.push(Line::from(vec![
                Span::raw("      "),
                Span::styled("Location: ", Style::default().fg(Theme::dim())),
                Span::styled(trip.location.as_str(), Style::default().fg(Theme::text())),
            ]));
        }
    }

    Text::from(lines)
}
