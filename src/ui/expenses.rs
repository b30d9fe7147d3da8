use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::{clamp_name, format_money, hex_to_color};
use super::theme::Theme;
use crate::app::App;

pub fn build_expenses_text(app: &App) -> Text<'_> {
    let mut lines = Vec::new();

    if app.snapshot.expenses.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No expenses yet. Add one with the `expense add` command.",
            Style::default().fg(Theme::dim()),
        )));
        return Text::from(lines);
    }

    for (index, expense) in app.snapshot.expenses.iter().enumerate() {
        let selected = index == app.selected_expense_index;
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
            .find(|engineer| engineer.id == expense.engineer_id);
        let engineer_color = engineer
            .and_then(|engineer| hex_to_color(&engineer.color))
            .unwrap_or(Theme::text());
        let engineer_name = engineer
            .map(|engineer| engineer.name.as_str())
            .unwrap_or("Unknown engineer");
        let mut amount_style = Style::default().fg(Theme::accent());
        if selected {
            amount_style = amount_style.add_modifier(Modifier::BOLD);
        }

        let mut spans = vec![
            Span::styled(if selected { "  > " } else { "    " }, marker_style),
            Span::styled(
                format!("{}", expense.date),
                Style::default().fg(Theme::dim()),
            ),
            Span::raw(" "),
            Span::styled(
                clamp_name(expense.kind.label(), 14),
                Style::default().fg(Theme::highlight()),
            ),
            Span::styled(
                format!("{:>12} ", format_money(expense.amount, &expense.currency)),
                amount_style,
            ),
            Span::styled(
                clamp_name(engineer_name, 18),
                Style::default().fg(engineer_color),
            ),
            Span::raw(" "),
            Span::styled(
                clamp_name(&expense.description, 36),
                Style::default().fg(Theme::text()),
            ),
        ];
        if expense.receipt.is_some() {
            spans.push(Span::styled(" [receipt]", Style::default().fg(Theme::dim())));
        }
        lines.push(Line::from(spans));
    }

    Text::from(lines)
}
