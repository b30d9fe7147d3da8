use ratatui::style::Color;

use super::theme::Theme;
use crate::types::{AvailabilityStatus, TripStatus};

pub fn format_money(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}

pub fn clamp_name(value: &str, width: usize) -> String {
    let value_len = value.chars().count();
    if value_len <= width {
        return format!("{value:<width$}", width = width);
    }
    let trimmed = value
        .chars()
        .take(width.saturating_sub(2))
        .collect::<String>();
    format!("{trimmed}..")
}

pub fn hex_to_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#').unwrap_or(value.trim());
    // Hand-edited store blobs can hold arbitrary text; only ASCII hex is
    // safe to byte-slice.
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

pub fn status_color(status: TripStatus) -> Color {
    match status {
        TripStatus::Planned => Theme::warn(),
        TripStatus::Confirmed => Theme::success(),
        TripStatus::InProgress => Theme::active(),
        TripStatus::Completed => Theme::ended(),
        TripStatus::Cancelled => Theme::dim(),
    }
}

pub fn availability_color(status: AvailabilityStatus) -> Color {
    match status {
        AvailabilityStatus::Available => Theme::success(),
        AvailabilityStatus::OnBreak => Theme::warn(),
        AvailabilityStatus::Flexible => Theme::accent(),
        AvailabilityStatus::CannotTravel => Color::Red,
        AvailabilityStatus::LimitedAvailability => Theme::warn(),
    }
}
