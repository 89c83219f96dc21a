//! Report formatting utilities for terminal output
//!
//! Text stand-ins for the charts: share labels, horizontal bars and rules.

const FULL_BLOCK: char = '█';

/// Partial blocks from one eighth to seven eighths
const PARTIAL_BLOCKS: [char; 7] = ['▏', '▎', '▍', '▌', '▋', '▊', '▉'];

/// Share of the grand total, one decimal place ("83.3%")
pub fn format_share(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Horizontal bar scaled so that `max_value` fills `width` cells
///
/// Uses eighth-block characters for the last cell and pads with spaces, so
/// the result is always `width` characters wide.
pub fn share_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 || width == 0 {
        return " ".repeat(width);
    }

    let eighths = ((value / max_value).min(1.0) * (width * 8) as f64).round() as usize;
    let full = eighths / 8;
    let remainder = eighths % 8;

    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat(FULL_BLOCK).take(full));
    let mut used = full;
    if remainder > 0 {
        bar.push(PARTIAL_BLOCKS[remainder - 1]);
        used += 1;
    }
    bar.extend(std::iter::repeat(' ').take(width - used));
    bar
}

/// Thin horizontal rule
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Heavy rule under report titles
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Shorten a label to at most `max_len` characters, ending in "…"
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len == 0 {
        return String::new();
    }

    let mut head: String = s.chars().take(max_len - 1).collect();
    head.push('…');
    head
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(83.333), "83.3%");
        assert_eq!(format_share(16.667), "16.7%");
        assert_eq!(format_share(100.0), "100.0%");
        assert_eq!(format_share(0.0), "0.0%");
    }

    #[test]
    fn test_share_bar_full_and_half() {
        assert_eq!(share_bar(100.0, 100.0, 4), "████");

        let half = share_bar(50.0, 100.0, 10);
        assert_eq!(half.chars().count(), 10);
        assert_eq!(half.chars().filter(|c| *c == FULL_BLOCK).count(), 5);
    }

    #[test]
    fn test_share_bar_partial_cell() {
        // 3/16 of 2 cells = 3 eighths
        assert_eq!(share_bar(3.0, 16.0, 2), "▍ ");
    }

    #[test]
    fn test_share_bar_empty() {
        assert_eq!(share_bar(-5.0, 100.0, 4), "    ");
        assert_eq!(share_bar(5.0, 0.0, 3), "   ");
        assert_eq!(share_bar(5.0, 10.0, 0), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("groceries", 5), "groc…");
        assert_eq!(truncate("rent", 5), "rent");
        assert_eq!(truncate("Lebensmittel", 1), "…");
        assert_eq!(truncate("café au lait", 4), "caf…");
    }
}
