use ratatui::style::Color;

/// Unified color theme for the application
pub struct Theme;

impl Theme {
    /// Primary branding color
    pub fn primary() -> Color {
        Color::Blue
    }

    /// Secondary/border color
    pub fn secondary() -> Color {
        Color::Cyan
    }

    /// Confirmed/completed status
    pub fn success() -> Color {
        Color::Green
    }

    /// In-progress status
    pub fn active() -> Color {
        Color::LightGreen
    }

    /// Planned/pending status
    pub fn warn() -> Color {
        Color::Yellow
    }

    /// Completed/archived status
    pub fn ended() -> Color {
        Color::LightBlue
    }

    /// Selection/highlight
    pub fn highlight() -> Color {
        Color::Cyan
    }

    /// Selection marker/arrow
    pub fn selection_marker() -> Color {
        Color::Green
    }

    /// Dimmed/inactive text
    pub fn dim() -> Color {
        Color::DarkGray
    }

    /// Normal text
    pub fn text() -> Color {
        Color::White
    }

    /// Accent for numbers/counts
    pub fn accent() -> Color {
        Color::LightCyan
    }
}
