//! Rule-based field extractors for receipt text.

pub mod amounts;
pub mod category;
pub mod dates;
pub mod keywords;
pub mod normalize;
pub mod patterns;

pub use amounts::{format_amount, parse_amount, AmountExtractor};
pub use category::CategoryClassifier;
pub use dates::DateExtractor;
pub use keywords::KeywordSet;
pub use normalize::NormalizedText;
pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the best value for the field.
    fn extract(&self, text: &NormalizedText) -> Option<Self::Output>;

    /// Extract every candidate the extractor considered acceptable.
    fn extract_all(&self, text: &NormalizedText) -> Vec<Self::Output>;
}

/// A matched value together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Index of the normalized line the value was found on.
    pub line: usize,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, line: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            line,
            source: source.into(),
        }
    }
}
