//! Common regex patterns for receipt extraction.

use lazy_static::lazy_static;
use regex::{Match, Regex};

lazy_static! {
    // Amount with exactly two fractional digits: 70.88, 1250,00.
    // Use with `digit_bounded` so longer digit runs are not split.
    pub static ref DECIMAL_AMOUNT: Regex = Regex::new(
        r"([0-9]{1,4})[.,]([0-9]{2})"
    ).unwrap();

    // Bare whole number of up to four digits, also via `digit_bounded`
    pub static ref WHOLE_AMOUNT: Regex = Regex::new(
        r"([0-9]{1,4})"
    ).unwrap();

    // 25/12/2024, 25-12-24, 25.12.2024, 25 12 2024.
    // Unanchored on the left, so it also matches `24-12-25` inside `2024-12-25`.
    pub static ref DATE_DMY: Regex = Regex::new(
        r"([0-9]{1,2})[/.\- \t]([0-9]{1,2})[/.\- \t]([0-9]{4}|[0-9]{2})\b"
    ).unwrap();

    // 2024-12-25, 2024/12/25, 2024.12.25
    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b([0-9]{4})[/.\- \t]([0-9]{1,2})[/.\- \t]([0-9]{1,2})\b"
    ).unwrap();
}

/// Matches of `pattern` in `haystack` that are not glued to another digit.
///
/// Letters may touch the number, so `Rs450.00` and `INR1250` still match.
pub fn digit_bounded<'h>(pattern: &Regex, haystack: &'h str) -> impl Iterator<Item = Match<'h>> {
    let bytes = haystack.as_bytes();
    pattern.find_iter(haystack).filter(move |m| {
        let before = m.start().checked_sub(1).map(|i| bytes[i]);
        let after = bytes.get(m.end()).copied();
        !before.is_some_and(|b| b.is_ascii_digit()) && !after.is_some_and(|b| b.is_ascii_digit())
    })
}
