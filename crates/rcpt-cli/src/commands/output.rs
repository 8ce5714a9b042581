//! Output formatting shared by the parse and batch commands.

use rcpt_core::models::config::OutputFormat as ConfiguredFormat;
use rcpt_core::ParsedReceipt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension used when writing to an output directory.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

impl From<ConfiguredFormat> for OutputFormat {
    fn from(format: ConfiguredFormat) -> Self {
        match format {
            ConfiguredFormat::Json => OutputFormat::Json,
            ConfiguredFormat::Csv => OutputFormat::Csv,
            ConfiguredFormat::Text => OutputFormat::Text,
        }
    }
}

pub fn format_receipt(
    receipt: &ParsedReceipt,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(receipt)?),
        OutputFormat::Json => Ok(serde_json::to_string(receipt)?),
        OutputFormat::Csv => format_csv(receipt),
        OutputFormat::Text => Ok(format_text(receipt)),
    }
}

fn format_csv(receipt: &ParsedReceipt) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let iso = iso_date(receipt);

    wtr.write_record(["merchant", "date", "iso_date", "amount", "category"])?;
    wtr.write_record([
        receipt.merchant.as_str(),
        receipt.date.as_str(),
        iso.as_str(),
        receipt.amount.as_str(),
        receipt.category.label(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(receipt: &ParsedReceipt) -> String {
    let mut output = String::new();

    output.push_str(&format!("Merchant: {}\n", or_unknown(&receipt.merchant)));
    output.push_str(&format!("Date:     {}\n", or_unknown(&receipt.date)));
    output.push_str(&format!("Amount:   {}\n", or_unknown(&receipt.amount)));
    output.push_str(&format!("Category: {}\n", receipt.category));

    output
}

/// Calendar form of the receipt date, empty if it cannot be determined.
pub fn iso_date(receipt: &ParsedReceipt) -> String {
    receipt
        .iso_date()
        .map(|d| d.to_string())
        .unwrap_or_default()
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() { "(not found)" } else { value }
}
