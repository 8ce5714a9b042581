//! Transaction date extraction for receipts.

use regex::Regex;
use tracing::debug;

use super::patterns::{DATE_DMY, DATE_YMD};
use super::{ExtractionMatch, FieldExtractor, NormalizedText};

/// Date field extractor.
///
/// Day-first dates are searched before year-first ones; the year-first
/// pattern only runs when no day-first date exists anywhere in the text.
/// Within the winning pattern the last match is used, since a footer date
/// printed at billing time should override a header date.
///
/// The day-first pattern is not anchored on the left, so a year-first date
/// such as `2024-03-15` yields its day-first tail `24-03-15`.
#[derive(Debug, Clone, Default)]
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Raw matched date substring, or `""` if none.
    pub fn extract_date(&self, text: &NormalizedText) -> String {
        self.extract(text).map(|m| m.value).unwrap_or_default()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &NormalizedText) -> Option<Self::Output> {
        let found = self.extract_all(text).pop();
        match &found {
            Some(m) => debug!("Date {:?} from line {}", m.value, m.line),
            None => debug!("No date found"),
        }
        found
    }

    fn extract_all(&self, text: &NormalizedText) -> Vec<Self::Output> {
        for pattern in [&*DATE_DMY, &*DATE_YMD] {
            let results = matches_in_order(pattern, text);
            if !results.is_empty() {
                return results;
            }
        }

        Vec::new()
    }
}

/// Every match of `pattern` in document order, never spanning a line break.
fn matches_in_order(pattern: &Regex, text: &NormalizedText) -> Vec<ExtractionMatch<String>> {
    text.lines()
        .iter()
        .enumerate()
        .flat_map(move |(idx, line)| {
            pattern
                .find_iter(line)
                .map(move |m| ExtractionMatch::new(m.as_str().to_string(), idx, m.as_str()))
        })
        .collect()
}
