//! Parse command - extract data from a single receipt text.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use rcpt_core::ReceiptParser;

use super::config::load_config;
use super::output::{format_receipt, OutputFormat};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input text file; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config, else json)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Print fields that could not be determined to stderr
    #[arg(long)]
    show_warnings: bool,

    /// Fail instead of printing an empty record when the input has no text
    #[arg(long)]
    strict: bool,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let text = read_input(&args)?;

    if args.strict && text.trim().is_empty() {
        anyhow::bail!("No text provided");
    }

    let parser = ReceiptParser::from_config(&config);
    let result = parser.parse_with_report(&text);

    info!(
        "Parsed {} lines in {}ms",
        result.line_count, result.processing_time_ms
    );

    if args.show_warnings {
        for warning in &result.warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
    }

    let format = args
        .format
        .unwrap_or_else(|| config.output.default_format.into());
    let pretty = args.pretty || config.output.pretty_json;
    let output = format_receipt(&result.receipt, format, pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn read_input(args: &ParseArgs) -> anyhow::Result<String> {
    match &args.input {
        Some(path) if path.as_os_str() != "-" => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            info!("Parsing file: {}", path.display());
            Ok(fs::read_to_string(path)?)
        }
        _ => {
            info!("Parsing text from stdin");
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
