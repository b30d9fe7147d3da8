mod dashboard;
mod engineers;
mod expenses;
mod helpers;
mod report;
mod theme;
mod timeline;
mod trips;

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, AppView, FocusMode, TABS};
use theme::Theme;

/// Renders the entire UI for a single frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let (title, body_text) = match app.view {
        AppView::Dashboard => (" Dashboard ", dashboard::build_dashboard_text(app)),
        AppView::Timeline => (" Timeline ", timeline::build_timeline_text(app)),
        AppView::Trips => (" Trips ", trips::build_trips_text(app)),
        AppView::Expenses => (" Expenses ", expenses::build_expenses_text(app)),
        AppView::Engineers => (" Engineers ", engineers::build_engineers_text(app)),
        AppView::Report => (" Report ", report::build_report_text(app)),
        AppView::Help => (" Help ", build_help_text()),
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let header_lines = vec![Line::from(vec![
        Span::styled(
            "  Tripdeck  ",
            Style::default().fg(Color::Black).bg(Theme::primary()),
        ),
        Span::raw(" "),
        Span::styled(
            "field engineer trips & expenses",
            Style::default()
                .fg(Theme::secondary())
                .add_modifier(Modifier::BOLD),
        ),
    ])];
    let header = Paragraph::new(Text::from(header_lines))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary())),
        );
    frame.render_widget(header, layout[0]);

    let mut body_lines = vec![
        tabs_line(app),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {title}"),
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    body_lines.extend(body_text.lines);
    body_lines.push(Line::from(""));
    body_lines.push(Line::from(Span::styled(
        "----------------------------------------",
        Style::default().fg(Theme::dim()),
    )));
    body_lines.extend(keybinds_lines(app));
    let body = Paragraph::new(Text::from(body_lines))
        .style(Style::default().fg(Theme::text()))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary())),
        );
    frame.render_widget(body, layout[1]);

    let footer = Paragraph::new(Text::from(footer_line(app)))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary())),
        );
    frame.render_widget(footer, layout[2]);

    if let Some(popup) = &app.confirm_popup {
        render_confirm_popup(frame, popup);
    }
}

fn tabs_line(app: &App) -> Line<'_> {
    let mut spans = Vec::new();
    for (index, (name, view)) in TABS.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        let active = *view == app.view;
        let focused = app.focus_mode == FocusMode::TabBar && app.selected_tab_index == index;
        let style = if active {
            Style::default()
                .fg(Color::Black)
                .bg(Theme::highlight())
                .add_modifier(Modifier::BOLD)
        } else if focused {
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Theme::dim())
        };
        spans.push(Span::styled(format!(" {name} "), style));
    }

    Line::from(spans)
}

fn footer_line(app: &App) -> Line<'_> {
    if let Some(status) = &app.status {
        return Line::from(vec![
            Span::styled(
                "! ",
                Style::default()
                    .fg(Theme::warn())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(status.as_str(), Style::default().fg(Theme::warn())),
        ]);
    }

    let today = Local::now().format("%A, %e %B %Y").to_string();
    let mut spans = vec![
        Span::styled("● ", Style::default().fg(Theme::success())),
        Span::styled(today, Style::default().fg(Theme::text())),
    ];
    match &app.current_engineer {
        Some(engineer_id) => {
            spans.push(Span::styled(
                "   Signed in as ",
                Style::default().fg(Theme::dim()),
            ));
            spans.push(Span::styled(
                app.engineer_name(engineer_id),
                Style::default()
                    .fg(Theme::highlight())
                    .add_modifier(Modifier::BOLD),
            ));
        }
        None => spans.push(Span::styled(
            "   No session (set TRIPDECK_EMAIL)",
            Style::default().fg(Theme::dim()),
        )),
    }
    Line::from(spans)
}

fn keybinds_lines(app: &App) -> Vec<Line<'static>> {
    let focus_hint = if app.focus_mode == FocusMode::TabBar {
        "Tab: Switch to content  ←/→: Navigate tabs  Enter: Select"
    } else {
        "Tab: Switch to tab bar  h/l/t/x/g/o: Quick nav"
    };

    let (primary, secondary) = match app.view {
        AppView::Dashboard => (
            "h: Home  l: Timeline  t: Trips  x: Expenses  g: Engineers  o: Report",
            "r: Refresh  ?: Help  q: Quit",
        ),
        AppView::Timeline => (
            "Shift+Tab: Granularity  ←/→: Shift period  d: Today",
            "r: Refresh  ?: Help  q: Quit",
        ),
        AppView::Trips => (
            "Up/Down: Select  Del: Delete trip",
            "r: Refresh  ?: Help  q: Quit",
        ),
        AppView::Expenses => (
            "Up/Down: Select  Del: Delete expense",
            "r: Refresh  ?: Help  q: Quit",
        ),
        AppView::Engineers => ("Up/Down: Select", "r: Refresh  ?: Help  q: Quit"),
        AppView::Report => (
            "Shift+Tab: Period  f: Filter engineer",
            "r: Refresh  ?: Help  q: Quit",
        ),
        AppView::Help => ("Press ? or ESC to close this help screen", ""),
    };
    vec![
        Line::from(Span::styled(
            focus_hint,
            Style::default().fg(Theme::highlight()),
        )),
        Line::from(Span::styled(primary, Style::default().fg(Theme::dim()))),
        Line::from(Span::styled(secondary, Style::default().fg(Theme::dim()))),
    ]
}

fn build_help_text() -> Text<'static> {
    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(
                format!("  {k:<10}"),
                Style::default()
                    .fg(Theme::selection_marker())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc, Style::default().fg(Theme::text())),
        ])
    };
    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD),
        ))
    };

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        "Keyboard Shortcuts",
        Style::default()
            .fg(Theme::accent())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    lines.push(section("Global Navigation"));
    lines.push(key("h", "Dashboard/Home"));
    lines.push(key("l", "Timeline view"));
    lines.push(key("t", "Trips view"));
    lines.push(key("x", "Expenses view"));
    lines.push(key("g", "Engineers view"));
    lines.push(key("o", "Report view"));
    lines.push(key("q", "Quit application"));
    lines.push(key("?", "Toggle this help screen"));
    lines.push(Line::from(""));

    lines.push(section("Navigation"));
    lines.push(key("Tab", "Switch between tab bar and content"));
    lines.push(key("←/→", "Navigate tabs (when focused on tab bar)"));
    lines.push(key("↑/↓", "Move selection up/down in lists"));
    lines.push(key("Enter", "Activate the focused tab"));
    lines.push(key("Esc", "Go back to previous view"));
    lines.push(Line::from(""));

    lines.push(section("Timeline"));
    lines.push(key("Shift+Tab", "Cycle week/month/quarter/year buckets"));
    lines.push(key("←/→", "Shift the reference date by one bucket"));
    lines.push(key("d", "Jump back to today"));
    lines.push(Line::from(""));

    lines.push(section("Report"));
    lines.push(key("Shift+Tab", "Cycle month/quarter/year range"));
    lines.push(key("f", "Cycle the engineer filter"));
    lines.push(Line::from(""));

    lines.push(section("Records"));
    lines.push(key("Del", "Delete the selected trip or expense"));
    lines.push(key("r", "Reload all data from the store"));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Tips",
        Style::default()
            .fg(Theme::accent())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(vec![
        Span::styled("  •", Style::default().fg(Theme::dim())),
        Span::styled(
            "  Records are created via the CLI (see `tripdeck --help`)",
            Style::default().fg(Theme::text()),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  •", Style::default().fg(Theme::dim())),
        Span::styled(
            "  Deleting a trip keeps its expenses",
            Style::default().fg(Theme::text()),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  •", Style::default().fg(Theme::dim())),
        Span::styled(
            "  Timeline markers show availability (A/B/F/X/L)",
            Style::default().fg(Theme::text()),
        ),
    ]));

    Text::from(lines)
}

fn render_confirm_popup(frame: &mut Frame, popup: &crate::app::ConfirmPopup) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        "Confirm Action",
        Style::default()
            .fg(Theme::accent())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        &popup.message,
        Style::default().fg(Theme::text()),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Theme::dim())),
        Span::styled(
            "Y",
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" to confirm or ", Style::default().fg(Theme::dim())),
        Span::styled(
            "N",
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("/", Style::default().fg(Theme::dim())),
        Span::styled(
            "ESC",
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" to cancel", Style::default().fg(Theme::dim())),
    ]));

    let popup_widget = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary()))
                .title(" Confirm "),
        );
    frame.render_widget(popup_widget, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}
