//! Parsed receipt record and expense categories.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref DATE_PARTS: Regex = Regex::new(r"\d+").unwrap();
}

/// Structured expense record recovered from receipt text.
///
/// Every field is best-effort. An empty `amount` or `date` means the value
/// could not be determined and should be filled in by the user; it never
/// stands for zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReceipt {
    /// First few lines of the receipt joined with spaces.
    pub merchant: String,

    /// Raw matched date substring, e.g. `31-12-2024`.
    pub date: String,

    /// Grand total as a decimal string, e.g. `70.88`.
    pub amount: String,

    /// Expense category.
    pub category: Category,
}


impl ParsedReceipt {
    /// Whether a total amount was found.
    pub fn has_amount(&self) -> bool {
        !self.amount.is_empty()
    }

    /// Whether a date was found.
    pub fn has_date(&self) -> bool {
        !self.date.is_empty()
    }

    /// Reformat the raw date into a calendar date.
    ///
    /// Day-first is assumed unless the first group has four digits. Returns
    /// `None` when no date was found or the match is not a real calendar day.
    pub fn iso_date(&self) -> Option<NaiveDate> {
        let parts: Vec<&str> = DATE_PARTS.find_iter(&self.date).map(|m| m.as_str()).collect();
        if parts.len() != 3 {
            return None;
        }

        let (year, month, day) = if parts[0].len() == 4 {
            (parse_year(parts[0]), parts[1], parts[2])
        } else {
            (parse_year(parts[2]), parts[1], parts[0])
        };

        NaiveDate::from_ymd_opt(year?, month.parse().ok()?, day.parse().ok()?)
    }
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    if s.len() <= 2 {
        // Two-digit year: 00-50 is the 2000s, 51-99 the 1900s
        Some(if year <= 50 { 2000 + year } else { 1900 + year })
    } else {
        Some(year)
    }
}

/// Expense category assigned to a receipt.
///
/// The set is closed: classification always lands on one of these nine labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodDining,
    #[serde(rename = "Electricity")]
    Electricity,
    #[serde(rename = "Gas/Fuel")]
    GasFuel,
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Health")]
    Health,
    #[serde(rename = "Mobile/Internet")]
    MobileInternet,
    #[serde(rename = "Travel/Transport")]
    TravelTransport,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Other")]
    #[default]
    Other,
}

impl Category {
    /// All categories, in default classification order with `Other` last.
    pub const ALL: [Category; 9] = [
        Category::FoodDining,
        Category::Electricity,
        Category::GasFuel,
        Category::Groceries,
        Category::Health,
        Category::MobileInternet,
        Category::TravelTransport,
        Category::Shopping,
        Category::Other,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::FoodDining => "Food & Dining",
            Category::Electricity => "Electricity",
            Category::GasFuel => "Gas/Fuel",
            Category::Groceries => "Groceries",
            Category::Health => "Health",
            Category::MobileInternet => "Mobile/Internet",
            Category::TravelTransport => "Travel/Transport",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn with_date(date: &str) -> ParsedReceipt {
        ParsedReceipt {
            date: date.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_receipt_is_empty() {
        let receipt = ParsedReceipt::default();
        assert_eq!(receipt.category, Category::Other);
        assert_eq!(Category::default(), Category::Other);
        assert!(!receipt.has_amount());
        assert!(!receipt.has_date());
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::FoodDining).unwrap();
        assert_eq!(json, "\"Food & Dining\"");

        let back: Category = serde_json::from_str("\"Travel/Transport\"").unwrap();
        assert_eq!(back, Category::TravelTransport);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("gas/fuel".parse::<Category>(), Ok(Category::GasFuel));
        assert_eq!(" Other ".parse::<Category>(), Ok(Category::Other));
        assert!("Rent".parse::<Category>().is_err());
    }

    #[test]
    fn test_iso_date_day_first() {
        assert_eq!(
            with_date("31-12-2024").iso_date(),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
        assert_eq!(
            with_date("05/01/24").iso_date(),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }

    #[test]
    fn test_iso_date_year_first() {
        assert_eq!(
            with_date("2024.03.09").iso_date(),
            NaiveDate::from_ymd_opt(2024, 3, 9)
        );
    }

    #[test]
    fn test_iso_date_invalid() {
        assert_eq!(with_date("").iso_date(), None);
        assert_eq!(with_date("45/13/2024").iso_date(), None);
    }
}
