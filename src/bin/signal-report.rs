//! Signal report
//!
//! Fetches daily bars for the configured funds, classifies each one and prints
//! the result to stdout.

use dotenvy::dotenv;
use etf_signals::config::{AppConfig, ReportFormat};
use etf_signals::logging;
use etf_signals::report;
use etf_signals::services::YahooProvider;
use etf_signals::signals::{SignalClassifier, SignalPipeline};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = AppConfig::from_env()?;
    info!(environment = %config.environment, symbols = ?config.symbols, "Starting signal report");

    let rule_book = config.load_rule_book()?;
    if let Some(unsupported) = config.symbols.iter().find(|s| rule_book.get(s).is_none()) {
        error!(symbol = %unsupported, "no rule set for symbol");
        return Err(format!("no rule set configured for {}", unsupported).into());
    }

    let provider = YahooProvider::new(&config.provider)?;
    let pipeline = SignalPipeline::new(&provider, SignalClassifier::new(rule_book), config.lookback_days)?;
    let summary = pipeline.run(&config.symbols).await?;

    let output = match config.report_format {
        ReportFormat::Text => report::render_text(&summary),
        ReportFormat::Json => report::render_json(&summary)?,
    };
    println!("{}", output);

    info!(
        evaluated = summary.reports.len(),
        skipped = summary.skipped.len(),
        "Signal report complete"
    );
    Ok(())
}
