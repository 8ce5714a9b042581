//! Grand-total extraction for receipts.
//!
//! Totals are printed near the bottom of a receipt and are usually the
//! largest figure there. The extractor runs two passes:
//!
//! 1. Walk the lines bottom-up. Lines carrying a noise keyword (line items,
//!    tax breakdowns, phone numbers) are skipped. On a line carrying a total
//!    keyword, the first decimal amount is tried, or the first whole number if
//!    the line has no decimal amount. The largest accepted value wins.
//! 2. Only if pass 1 found nothing: take every decimal and whole number on the
//!    non-noise lines of the trailing window and keep the largest.
//!
//! Pass 1 reads one number per line while pass 2 reads all of them. The
//! asymmetry is kept on purpose until product decides otherwise.

use std::str::FromStr;

use regex::Match;
use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::patterns::{digit_bounded, DECIMAL_AMOUNT, WHOLE_AMOUNT};
use super::{ExtractionMatch, FieldExtractor, KeywordSet, NormalizedText};
use crate::models::config::{AmountRange, ExtractionConfig};

/// Which pass produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tier {
    Keyword,
    Fallback,
}

/// Shape of the number a candidate was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Decimal,
    Whole,
}

/// A value under consideration for the grand total.
#[derive(Debug, Clone)]
pub(crate) struct CandidateAmount {
    value: Decimal,
    line: usize,
    tier: Tier,
    shape: Shape,
    source: String,
}

/// Grand-total extractor.
#[derive(Debug, Clone)]
pub struct AmountExtractor {
    total_keywords: KeywordSet,
    noise_keywords: KeywordSet,
    decimal_range: AmountRange,
    whole_range: AmountRange,
    fallback_window: usize,
}

impl AmountExtractor {
    /// Create an extractor with the built-in vocabularies.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            total_keywords: KeywordSet::new(&config.total_keywords),
            noise_keywords: KeywordSet::new(&config.noise_keywords),
            decimal_range: config.decimal_range,
            whole_range: config.whole_range,
            fallback_window: config.fallback_window.max(1),
        }
    }

    /// Set the number of trailing lines scanned by the fallback pass.
    pub fn with_fallback_window(mut self, lines: usize) -> Self {
        self.fallback_window = lines.max(1);
        self
    }

    /// Grand total as a normalized decimal string, or `""` if none is plausible.
    pub fn extract_total(&self, text: &NormalizedText) -> String {
        self.best_candidate(text)
            .map(|c| format_amount(c.value))
            .unwrap_or_default()
    }

    pub(crate) fn best_candidate(&self, text: &NormalizedText) -> Option<CandidateAmount> {
        let (tier, candidates) = self.deciding_candidates(text);

        let mut best: Option<CandidateAmount> = None;
        for candidate in candidates {
            keep_larger(&mut best, candidate);
        }

        match &best {
            Some(c) => debug!(
                "Total {} from line {} ({:?} {:?}): {:?}",
                c.value, c.line, c.tier, c.shape, c.source
            ),
            None => debug!("No plausible total in {} lines ({:?} pass)", text.len(), tier),
        }
        best
    }

    /// Accepted candidates of the pass that decides the total, in scan order.
    ///
    /// The fallback pass only runs when the keyword pass accepts nothing.
    fn deciding_candidates(&self, text: &NormalizedText) -> (Tier, Vec<CandidateAmount>) {
        let keyword = self.keyword_pass(text);
        if !keyword.is_empty() {
            return (Tier::Keyword, keyword);
        }
        (Tier::Fallback, self.fallback_pass(text))
    }

    fn keyword_pass(&self, text: &NormalizedText) -> Vec<CandidateAmount> {
        let mut candidates = Vec::new();

        for (idx, line) in text.lines().iter().enumerate().rev() {
            let lower = line.to_lowercase();
            if let Some(noise) = self.noise_keywords.find_lowercase(&lower) {
                trace!("Skipping line {} (noise keyword {:?})", idx, noise);
                continue;
            }
            if !self.total_keywords.matches_lowercase(&lower) {
                continue;
            }

            let candidate = match digit_bounded(&DECIMAL_AMOUNT, line).next() {
                Some(m) => self.candidate(m, Shape::Decimal, idx, Tier::Keyword),
                None => digit_bounded(&WHOLE_AMOUNT, line)
                    .next()
                    .and_then(|m| self.candidate(m, Shape::Whole, idx, Tier::Keyword)),
            };

            candidates.extend(candidate);
        }

        candidates
    }

    fn fallback_pass(&self, text: &NormalizedText) -> Vec<CandidateAmount> {
        let mut candidates = Vec::new();
        let start = text.tail_start(self.fallback_window);

        for (offset, line) in text.tail(self.fallback_window).iter().enumerate() {
            let idx = start + offset;
            if self.noise_keywords.matches(line) {
                trace!("Skipping fallback line {} (noise keyword)", idx);
                continue;
            }

            let decimals = digit_bounded(&DECIMAL_AMOUNT, line)
                .filter_map(|m| self.candidate(m, Shape::Decimal, idx, Tier::Fallback));
            let wholes = digit_bounded(&WHOLE_AMOUNT, line)
                .filter_map(|m| self.candidate(m, Shape::Whole, idx, Tier::Fallback));

            candidates.extend(decimals.chain(wholes));
        }

        candidates
    }

    /// Parse a match and check it against the range for its shape.
    fn candidate(&self, m: Match<'_>, shape: Shape, line: usize, tier: Tier) -> Option<CandidateAmount> {
        let value = parse_amount(m.as_str())?;
        let range = match shape {
            Shape::Decimal => self.decimal_range,
            Shape::Whole => self.whole_range,
        };

        if !range.contains(value) {
            trace!("Rejected {} on line {}: outside {}..={}", value, line, range.min, range.max);
            return None;
        }

        Some(CandidateAmount {
            value,
            line,
            tier,
            shape,
            source: m.as_str().to_string(),
        })
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<Decimal>;

    fn extract(&self, text: &NormalizedText) -> Option<Self::Output> {
        self.best_candidate(text)
            .map(|c| ExtractionMatch::new(c.value, c.line, c.source))
    }

    fn extract_all(&self, text: &NormalizedText) -> Vec<Self::Output> {
        // Keyword pass scans bottom-up, fallback pass top-down
        self.deciding_candidates(text)
            .1
            .into_iter()
            .map(|c| ExtractionMatch::new(c.value, c.line, c.source))
            .collect()
    }
}

/// Replace `best` only on strict improvement, so ties keep the earlier find.
fn keep_larger(best: &mut Option<CandidateAmount>, candidate: CandidateAmount) {
    if best.as_ref().is_none_or(|current| candidate.value > current.value) {
        *best = Some(candidate);
    }
}

/// Parse an amount such as `70.88`, `70,88` or `7088`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace(',', ".");
    Decimal::from_str(&normalized).ok()
}

/// Format an amount without trailing fractional zeros: `450.00` becomes `450`.
pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn total(text: &str) -> String {
        AmountExtractor::new().extract_total(&NormalizedText::new(text))
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("70.88"), Some(Decimal::new(7088, 2)));
        assert_eq!(parse_amount("70,88"), Some(Decimal::new(7088, 2)));
        assert_eq!(parse_amount("7088"), Some(Decimal::from(7088)));
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::new(45000, 2)), "450");
        assert_eq!(format_amount(Decimal::new(1250, 2)), "12.5");
        assert_eq!(format_amount(Decimal::new(7088, 2)), "70.88");
        assert_eq!(format_amount(Decimal::from(7088)), "7088");
    }

    #[test]
    fn test_keyword_line_with_noise_line_below() {
        assert_eq!(total("Total Amount: 70.88\nTIN: 9876543210"), "70.88");
    }

    #[test]
    fn test_whole_number_total() {
        assert_eq!(total("Grand Total 7088\nPh: 9876543"), "7088");
    }

    #[test]
    fn test_fallback_takes_window_maximum() {
        let text = "Cafe Mocha\nLatte 12.50\nCheesecake 450.00\nThank you";
        assert_eq!(total(text), "450");
    }

    #[test]
    fn test_largest_keyword_line_wins() {
        let text = "Sub Total: 200.00\nDiscount 20.00\nGrand Total: 180.00";
        assert_eq!(total(text), "200");
    }

    #[test]
    fn test_decimal_preferred_over_whole_on_same_line() {
        // The whole-number tier is only used when the line has no decimal amount
        assert_eq!(total("Total: 2 x 45.50"), "45.5");
    }

    #[test]
    fn test_only_first_number_on_keyword_line() {
        // 15.00 is out of the running even though it is larger than 11.00
        assert_eq!(total("Amount: 11.00 15.00"), "11");
    }

    #[test]
    fn test_fallback_reads_every_number() {
        assert_eq!(total("Coffee 11.00 15.00"), "15");
    }

    #[test]
    fn test_decimal_range_bounds() {
        assert_eq!(total("Total: 10.00"), "10");
        assert_eq!(total("Total: 50000.00"), "");
        assert_eq!(total("Total: 5000.00\nNet Amount: 9999.99"), "9999.99");
    }

    #[test]
    fn test_whole_range_ceiling() {
        assert_eq!(total("Amount Due 9999"), "9999");
        // five-digit runs are never read as whole numbers
        assert_eq!(total("Amount Due 10000"), "");
    }

    #[test]
    fn test_out_of_range_keyword_line_falls_through() {
        // Keyword line yields nothing acceptable, so the fallback pass runs
        let text = "Total: 5.00\nPaid 120.00";
        assert_eq!(total(text), "120");
    }

    #[test]
    fn test_noise_lines_excluded_from_fallback() {
        let text = "GST 18% 900.00\nCash 300.00";
        assert_eq!(total(text), "300");
    }

    #[test]
    fn test_fallback_window_limited_to_last_lines() {
        let mut lines = vec!["Paid 999.00".to_string()];
        lines.extend((0..8).map(|i| format!("Line {}", i)));
        assert_eq!(total(&lines.join("\n")), "");

        let extractor = AmountExtractor::new().with_fallback_window(9);
        assert_eq!(extractor.extract_total(&NormalizedText::new(&lines.join("\n"))), "999");
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(total(""), "");
        assert_eq!(total("Thank you for shopping"), "");
    }

    #[test]
    fn test_extract_reports_provenance() {
        let extractor = AmountExtractor::new();
        let text = NormalizedText::new("Shop\nGrand Total: 250.00\nVisit again");
        let found = extractor.extract(&text).unwrap();
        assert_eq!(found.value, Decimal::new(25000, 2));
        assert_eq!(found.line, 1);
        assert_eq!(found.source, "250.00");
    }

    #[test]
    fn test_extract_all_lists_keyword_candidates() {
        let extractor = AmountExtractor::new();
        let text = NormalizedText::new("Tea 5.00\nSub Total: 45.00\nGST 5.00\nTotal: 50.00");
        let all = extractor.extract_all(&text);
        let found: Vec<(Decimal, usize)> = all.into_iter().map(|m| (m.value, m.line)).collect();
        assert_eq!(
            found,
            vec![(Decimal::new(5000, 2), 3), (Decimal::new(4500, 2), 1)]
        );
    }

    #[test]
    fn test_extract_all_lists_fallback_candidates() {
        let extractor = AmountExtractor::new();
        let text = NormalizedText::new("Tea 5.00\nCake 45.00");
        let values: Vec<Decimal> = extractor.extract_all(&text).into_iter().map(|m| m.value).collect();
        // 5.00 is below the decimal floor; 45 is also read as a whole number
        assert_eq!(values, vec![Decimal::new(4500, 2), Decimal::from(45)]);
    }

    #[test]
    fn test_keyword_line_with_noise_keyword_is_skipped() {
        assert_eq!(total("Total GST: 900.00\nGrand Total: 300.00"), "300");
    }

    #[test]
    fn test_equal_totals_keep_the_lower_line() {
        let extractor = AmountExtractor::new();
        let text = NormalizedText::new("Sub Total: 300.00\nCash\nGrand Total: 300.00");
        let found = extractor.extract(&text).unwrap();
        assert_eq!(found.value, Decimal::new(30000, 2));
        assert_eq!(found.line, 2);
    }

    #[test]
    fn test_currency_prefix_touching_amount() {
        assert_eq!(total("Cafe\nTotal:Rs450.00"), "450");
        assert_eq!(total("Cafe\nGrand Total INR1250"), "1250");
    }
}
