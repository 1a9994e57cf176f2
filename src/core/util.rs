//! Common utilities

/// Number of decimal digits needed to print `n`
pub fn digit_count(n: u32) -> usize {
    n.checked_ilog10().map(|d| d as usize + 1).unwrap_or(1)
}

/// Collapse multi-line text into a single line, joining lines with one space
pub fn collapse_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
