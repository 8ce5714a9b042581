//! Configuration structures for receipt extraction.
//!
//! Every vocabulary the rules use lives here so it can be localized or
//! swapped out in tests without touching the extraction logic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, RcptError};
use crate::models::receipt::Category;

/// Main configuration for the rcpt engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RcptConfig {
    /// Amount and merchant extraction configuration.
    pub extraction: ExtractionConfig,

    /// Ordered category rules. The first rule that matches wins.
    pub categories: Vec<CategoryRule>,

    /// Output configuration for the CLI.
    pub output: OutputConfig,
}

impl Default for RcptConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Amount and merchant extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Substrings marking a line that states a total.
    pub total_keywords: Vec<String>,

    /// Substrings marking a line item, tax breakdown or contact line.
    pub noise_keywords: Vec<String>,

    /// Accepted range for amounts with two fractional digits.
    pub decimal_range: AmountRange,

    /// Accepted range for whole-number amounts.
    pub whole_range: AmountRange,

    /// Number of trailing lines scanned when no total line matched.
    pub fallback_window: usize,

    /// Number of leading lines joined into the merchant name.
    pub merchant_lines: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            total_keywords: to_strings(DEFAULT_TOTAL_KEYWORDS),
            noise_keywords: to_strings(DEFAULT_NOISE_KEYWORDS),
            decimal_range: AmountRange::new(Decimal::from(10), Decimal::from(50_000)),
            // Narrower than the decimal ceiling: bare 5+ digit runs are usually phone numbers or IDs
            whole_range: AmountRange::new(Decimal::from(10), Decimal::from(10_000)),
            fallback_window: 8,
            merchant_lines: 3,
        }
    }
}

/// Inclusive range of accepted amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl AmountRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Whether `value` lies within the range, bounds included.
    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min.is_sign_negative() {
            return Err(ConfigError::InvalidRange {
                field,
                reason: format!("minimum {} is negative", self.min),
            });
        }
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                field,
                reason: format!("minimum {} exceeds maximum {}", self.min, self.max),
            });
        }
        Ok(())
    }
}

/// A category together with the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: to_strings(keywords),
        }
    }

    /// Built-in rules in classification order.
    pub fn defaults() -> Vec<CategoryRule> {
        vec![
            CategoryRule::new(Category::FoodDining, FOOD_DINING),
            CategoryRule::new(Category::Electricity, ELECTRICITY),
            CategoryRule::new(Category::GasFuel, GAS_FUEL),
            CategoryRule::new(Category::Groceries, GROCERIES),
            CategoryRule::new(Category::Health, HEALTH),
            CategoryRule::new(Category::MobileInternet, MOBILE_INTERNET),
            CategoryRule::new(Category::TravelTransport, TRAVEL_TRANSPORT),
            CategoryRule::new(Category::Shopping, SHOPPING),
        ]
    }
}

/// Output format for parsed receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output
    #[default]
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when none is given on the command line.
    pub default_format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty_json: bool,
}

impl RcptConfig {
    /// Configuration with the built-in vocabularies.
    pub fn new() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            categories: CategoryRule::defaults(),
            output: OutputConfig::default(),
        }
    }

    /// Load configuration from a JSON file.
    ///
    /// Sections missing from the file keep their defaults. An empty
    /// `categories` list falls back to the built-in rules.
    pub fn from_file(path: &std::path::Path) -> Result<Self, RcptError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, RcptError> {
        let mut config: RcptConfig = serde_json::from_str(content).map_err(ConfigError::from)?;
        if config.categories.is_empty() {
            config.categories = CategoryRule::defaults();
        }
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), RcptError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::from)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check the configuration for values the rules cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extraction = &self.extraction;

        if extraction.total_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::EmptyVocabulary("extraction.total_keywords"));
        }
        extraction.decimal_range.validate("extraction.decimal_range")?;
        extraction.whole_range.validate("extraction.whole_range")?;
        if extraction.fallback_window == 0 {
            return Err(ConfigError::InvalidWindow);
        }

        Ok(())
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

const DEFAULT_TOTAL_KEYWORDS: &[&str] = &[
    "total amount",
    "grand total",
    "final total",
    "amount due",
    "total due",
    "food total",
    "sub total",
    "subtotal",
    "total :",
    "total:",
    "amount :",
    "amount:",
    "net amount",
    "payable amount",
    "final amount",
];

const DEFAULT_NOISE_KEYWORDS: &[&str] = &[
    // line items
    "item", "qty", "rate", "amt", "quantity", "price", "unit", "food", "service",
    // tax breakdowns and registration numbers
    "tax", "gst", "vat", "cst", "tin",
    // contact details
    "phone", "telephone", "tel:", "tel.", "ph:", "ph.", "ph -", "mob:", "mobile:",
    // menu items that tend to sit next to prices
    "biryani", "paneer", "chicken", "naan", "roti", "dosa", "idli", "thali", "lassi", "pizza",
    "burger",
];

const FOOD_DINING: &[&str] = &[
    "restaurant", "cafe", "café", "swiggy", "zomato", "pizza", "burger", "dominos", "mcdonald",
    "kfc", "starbucks", "dhaba", "biryani", "bakery", "dining", "food", "kitchen", "canteen",
    "hotel",
];

const ELECTRICITY: &[&str] = &[
    "electricity", "electric bill", "power bill", "bescom", "tneb", "msedcl", "tata power",
    "adani electricity", "kwh", "units consumed",
];

const GAS_FUEL: &[&str] = &[
    "petrol", "diesel", "fuel", "indian oil", "iocl", "bharat petroleum", "bpcl",
    "hindustan petroleum", "hpcl", "shell", "lpg", "cng", "gas",
];

const GROCERIES: &[&str] = &[
    "grocery", "groceries", "supermarket", "bigbasket", "dmart", "d-mart", "blinkit", "zepto",
    "kirana", "reliance fresh", "more retail", "vegetables", "fruits", "provision",
];

const HEALTH: &[&str] = &[
    "pharmacy", "pharma", "medical", "medicine", "hospital", "clinic", "apollo", "medplus",
    "netmeds", "1mg", "doctor", "diagnostic", "pathology", "chemist",
];

const MOBILE_INTERNET: &[&str] = &[
    "recharge", "airtel", "jio", "vodafone", "bsnl", "broadband", "internet", "wifi", "wi-fi",
    "prepaid", "postpaid", "data pack",
];

const TRAVEL_TRANSPORT: &[&str] = &[
    "uber", "ola cabs", "olacabs", "rapido", "irctc", "railway", "flight", "airline",
    "airways", "indigo", "metro rail", "bus ticket", "bus fare", "taxi", "cab fare",
    "makemytrip", "redbus", "toll plaza", "parking",
];

const SHOPPING: &[&str] = &[
    "amazon", "flipkart", "myntra", "ajio", "nykaa", "meesho", "mall", "fashion", "clothing",
    "apparel", "footwear", "electronics", "store", "shopping",
];
