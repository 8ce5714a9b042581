//! Core library for receipt text extraction.
//!
//! This crate provides:
//! - Line normalization of raw OCR text
//! - Grand-total extraction with keyword and fallback passes
//! - Transaction date extraction
//! - Keyword-based expense categorization
//! - A parser combining the above into a [`ParsedReceipt`]
//!
//! ```
//! let receipt = rcpt_core::parse("Cafe Coffee Day\n12/05/2024\nTotal: 180.00");
//! assert_eq!(receipt.amount, "180");
//! assert_eq!(receipt.date, "12/05/2024");
//! assert_eq!(receipt.category.label(), "Food & Dining");
//! ```

pub mod error;
pub mod models;
pub mod receipt;

use lazy_static::lazy_static;

pub use error::{ConfigError, RcptError, Result};
pub use models::config::{CategoryRule, ExtractionConfig, OutputFormat, RcptConfig};
pub use models::receipt::{Category, ParsedReceipt};
pub use receipt::rules::{AmountExtractor, CategoryClassifier, DateExtractor, NormalizedText};
pub use receipt::{ExtractionResult, ReceiptParser};

lazy_static! {
    static ref DEFAULT_PARSER: ReceiptParser = ReceiptParser::new();
}

/// Parse receipt text with the built-in vocabularies.
pub fn parse(text: &str) -> ParsedReceipt {
    DEFAULT_PARSER.parse(text)
}
