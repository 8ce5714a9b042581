//! Receipt parser combining the rule-based extractors.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::config::RcptConfig;
use crate::models::receipt::{Category, ParsedReceipt};

use super::rules::{AmountExtractor, CategoryClassifier, DateExtractor, NormalizedText};

/// Result of receipt extraction with diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted receipt data.
    pub receipt: ParsedReceipt,
    /// One entry per field that could not be determined.
    pub warnings: Vec<String>,
    /// Number of non-empty lines in the input.
    pub line_count: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based receipt parser.
///
/// Holds only immutable configuration, so one parser can be shared across
/// threads and reused for any number of receipts.
#[derive(Debug, Clone)]
pub struct ReceiptParser {
    amounts: AmountExtractor,
    dates: DateExtractor,
    categories: CategoryClassifier,
    merchant_lines: usize,
}

impl ReceiptParser {
    /// Create a new parser with the built-in vocabularies.
    pub fn new() -> Self {
        Self::from_config(&RcptConfig::default())
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &RcptConfig) -> Self {
        Self {
            amounts: AmountExtractor::from_config(&config.extraction),
            dates: DateExtractor::new(),
            categories: CategoryClassifier::from_rules(&config.categories),
            merchant_lines: config.extraction.merchant_lines,
        }
    }

    /// Set the number of leading lines used for the merchant name.
    pub fn with_merchant_lines(mut self, lines: usize) -> Self {
        self.merchant_lines = lines;
        self
    }

    /// Parse receipt text into a structured record.
    ///
    /// Never fails: fields that cannot be determined are left empty, and an
    /// unmatched category is `Other`.
    pub fn parse(&self, text: &str) -> ParsedReceipt {
        let normalized = NormalizedText::new(text);
        self.parse_normalized(&normalized)
    }

    /// Parse receipt text and report which fields were not found.
    pub fn parse_with_report(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();
        let normalized = NormalizedText::new(text);
        let receipt = self.parse_normalized(&normalized);

        let mut warnings = Vec::new();
        if normalized.is_empty() {
            warnings.push("No text provided".to_string());
        }
        if !receipt.has_amount() {
            warnings.push("Could not extract total amount".to_string());
        }
        if !receipt.has_date() {
            warnings.push("Could not extract date".to_string());
        }
        if receipt.category == Category::Other {
            warnings.push("No category keyword matched".to_string());
        }

        ExtractionResult {
            receipt,
            warnings,
            line_count: normalized.len(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn parse_normalized(&self, text: &NormalizedText) -> ParsedReceipt {
        info!("Parsing receipt from {} lines of text", text.len());

        let receipt = ParsedReceipt {
            merchant: self.extract_merchant(text),
            date: self.dates.extract_date(text),
            amount: self.amounts.extract_total(text),
            category: self.categories.classify(text),
        };

        debug!(
            "Extracted merchant={:?} date={:?} amount={:?} category={}",
            receipt.merchant, receipt.date, receipt.amount, receipt.category
        );

        receipt
    }

    fn extract_merchant(&self, text: &NormalizedText) -> String {
        text.head(self.merchant_lines).join(" ")
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}
