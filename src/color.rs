/// Color utilities for engineer identification in the timeline.
use rand::RngExt;

/// Fixed palette for engineer colors. Synthetic engineers created from a
/// session pick deterministically from this list (hash of email mod 8).
pub const PALETTE: [&str; 8] = [
    "#3B82F6", "#10B981", "#F59E0B", "#8B5CF6", "#EF4444", "#14B8A6", "#F97316", "#EC4899",
];

/// Validate if a string is a valid hex color (e.g., #RRGGBB).
pub fn is_valid_hex(s: &str) -> bool {
    s.starts_with('#') && s.len() == 7 && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Pick a random palette color for a manually created engineer.
pub fn random_color() -> String {
    let mut rng = rand::rng();
    PALETTE[rng.random_range(0..PALETTE.len())].to_string()
}

/// Deterministic color for an email address: byte-wise hash mod palette size.
pub fn color_for_email(email: &str) -> String {
    let hash = email
        .bytes()
        .fold(0usize, |acc, byte| acc.wrapping_mul(31).wrapping_add(byte as usize));
    PALETTE[hash % PALETTE.len()].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_validation() {
        assert!(is_valid_hex("#3B82F6"));
        assert!(!is_valid_hex("3B82F6"));
        assert!(!is_valid_hex("#3B82F"));
        assert!(!is_valid_hex("#GGGGGG"));
    }

    #[test]
    fn email_color_is_deterministic_and_from_palette() {
        let first = color_for_email("marie.dubois@company.fr");
        let second = color_for_email("marie.dubois@company.fr");
        assert_eq!(first, second);
        assert!(PALETTE.contains(&first.as_str()));
    }

    #[test]
    fn random_color_is_from_palette() {
        assert!(PALETTE.contains(&random_color().as_str()));
    }
}
