//! WASM bindings for receipt text extraction.
//!
//! Lets the web front end turn OCR text into a receipt record without a
//! round trip to the server.

use wasm_bindgen::prelude::*;

use rcpt_core::{CategoryClassifier, ParsedReceipt, RcptConfig, ReceiptParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Parse receipt text into `{ merchant, date, amount, category }`.
#[wasm_bindgen]
pub fn parse_receipt(text: &str) -> Result<JsValue, JsValue> {
    to_js(&rcpt_core::parse(text))
}

/// Category label for arbitrary text.
#[wasm_bindgen]
pub fn classify_text(text: &str) -> String {
    CategoryClassifier::new().classify_str(text).label().to_string()
}

/// Reformat a matched receipt date as `YYYY-MM-DD`.
#[wasm_bindgen]
pub fn normalize_date(date: &str) -> Option<String> {
    let receipt = ParsedReceipt {
        date: date.to_string(),
        ..Default::default()
    };
    receipt.iso_date().map(|d| d.to_string())
}

/// Receipt parser class for browser use, optionally with custom vocabularies.
#[wasm_bindgen]
pub struct ReceiptEngine {
    parser: ReceiptParser,
}

#[wasm_bindgen]
impl ReceiptEngine {
    /// Create an engine. `config_json` uses the same layout as the CLI config file.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<ReceiptEngine, JsValue> {
        let config = match config_json {
            Some(json) => {
                RcptConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
            }
            None => RcptConfig::default(),
        };

        Ok(Self {
            parser: ReceiptParser::from_config(&config),
        })
    }

    /// Parse receipt text.
    #[wasm_bindgen]
    pub fn parse(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text))
    }

    /// Parse receipt text and include warnings for fields that were not found.
    #[wasm_bindgen]
    pub fn parse_with_report(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse_with_report(text))
    }
}

/// Lines recognized by a browser-side OCR engine, collected before parsing.
#[wasm_bindgen]
pub struct OcrLinesJs {
    lines: Vec<String>,
}

#[wasm_bindgen]
impl OcrLinesJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add a recognized line of text.
    #[wasm_bindgen]
    pub fn add_line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    /// Get the full text.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Parse the collected lines as a receipt.
    #[wasm_bindgen]
    pub fn parse_receipt(&self) -> Result<JsValue, JsValue> {
        parse_receipt(&self.get_text())
    }
}

impl Default for OcrLinesJs {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
