use std::io::{stderr, stdout};
use std::path::Path;
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use credit_card_pipeline::engine::{PipelineConfig, PipelineEngine};
use credit_card_pipeline::sink::JsonLinesSink;
use credit_card_pipeline::sources::load_cardholders;

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: Positional arguments are enough here, batch selection belongs to whatever schedules the run
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: credit-card-pipeline [transactions].json|[directory] [cardholders].csv [log_level:optional] > [output].jsonl");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let transactions_path = Path::new(&args[1]);
    let cardholders_path = Path::new(&args[2]);
    let log_level = args.get(3)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    //NOTE: The index must be complete before the first transaction is enriched
    let index = Arc::new(load_cardholders(cardholders_path)?);
    let engine = PipelineEngine::new(index, PipelineConfig::default());
    let mut sink = JsonLinesSink::new(stdout().lock());

    let timer = Instant::now();
    let report = engine.run(transactions_path, &mut sink).await?;
    let duration = timer.elapsed();

    info!(
        "Successfully processed [{}] in {duration:?}: read [{}], rejected [{}], emitted [{}] (matched [{}], unmatched [{}])",
        transactions_path.display(),
        report.read,
        report.rejected,
        report.emitted,
        report.matched,
        report.unmatched
    );

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Records go to stdout, so logging has to stay on stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
