use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{clamp_name, hex_to_color};
use super::theme::Theme;
use crate::app::App;

pub fn build_engineers_text(app: &App) -> Text<'_> {
    let mut lines = Vec::new();

    if app.snapshot.engineers.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No engineers yet. Add one with the `engineer add` command.",
            Style::default().fg(Theme::dim()),
        )));
        return Text::from(lines);
    }

    for (index, engineer) in app.snapshot.engineers.iter().enumerate() {
        let selected = index == app.selected_engineer_index;
        let marker_style = if selected {
            Style::default()
                .fg(Theme::selection_marker())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::dim())
        };
        let color = hex_to_color(&engineer.color).unwrap_or(Theme::text());
        let mut name_style = Style::default().fg(Theme::text());
        if selected {
            name_style = name_style.add_modifier(Modifier::BOLD);
        }

        let trip_count = app
            .snapshot
            .trips
            .iter()
            .filter(|trip| trip.engineer_id == engineer.id)
            .count();

        let mut spans = vec![
            Span::styled(if selected { "  > " } else { "    " }, marker_style),
            Span::styled("● ", Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(clamp_name(&engineer.name, 20), name_style),
            Span::raw(" "),
            Span::styled(
                clamp_name(&engineer.role, 28),
                Style::default().fg(Theme::highlight()),
            ),
            Span::raw(" "),
            Span::styled(
                clamp_name(&engineer.email, 30),
                Style::default().fg(Theme::dim()),
            ),
            Span::styled(
                format!("{:>6.0}/day ", engineer.daily_rate),
                Style::default().fg(Theme::accent()),
            ),
            Span::styled(
                format!("{trip_count} trips"),
                Style::default().fg(Theme::dim()),
            ),
        ];
        if app.current_engineer.as_deref() == Some(engineer.id.as_str()) {
            spans.push(Span::styled(
                " (you)",
                Style::default()
                    .fg(Theme::success())
                    .add_modifier(Modifier::BOLD),
            ));
        }
        lines.push(Line::from(spans));
    }

    Text::from(lines)
}
