//! costminer - Break cloud billing exports down into cost and usage reports

use clap::Parser;
use costminer::{
    MetricPipeline, Result,
    cli::{Cli, Command, ReportArgs, parse_date_filter, parse_until_filter},
    data_loader::DataLoader,
    filters::RecordFilter,
};
use costminer_terminal::output::get_formatter;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the record filter from the report arguments
fn build_filter(args: &ReportArgs) -> Result<RecordFilter> {
    let mut filter = RecordFilter::new();

    if let Some(since_str) = &args.since {
        filter = filter.with_since(parse_date_filter(since_str)?);
    }
    if let Some(until_str) = &args.until {
        filter = filter.with_until(parse_until_filter(until_str)?);
    }
    for service in &args.services {
        filter = filter.with_service(service.clone());
    }

    Ok(filter)
}

async fn run_report(args: ReportArgs, json: bool) -> Result<()> {
    info!("Running billing report for {}", args.input.display());

    // Resolve the metric selection before touching the input
    let pipeline = MetricPipeline::default().select(&args.metrics)?;
    let filter = build_filter(&args)?;

    let show_progress = !json && is_terminal::is_terminal(std::io::stdout());
    let billing = DataLoader::new(&args.input)?
        .with_progress(show_progress)
        .load_collection()
        .await?;
    let billing = filter.apply(&billing);

    let results = pipeline.run(&billing)?;
    println!("{}", get_formatter(json).format_results(&results));
    Ok(())
}

fn list_metrics(json: bool) -> Result<()> {
    let pipeline = MetricPipeline::default();

    if json {
        let metrics: Vec<serde_json::Value> = pipeline
            .metrics()
            .iter()
            .map(|m| serde_json::json!({ "name": m.name(), "description": m.description() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        for metric in pipeline.metrics() {
            println!("{:<24} {}", metric.name(), metric.description());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first to check for quiet/verbose flags
    let cli = Cli::parse();

    // Initialize logging. --quiet and --verbose override RUST_LOG.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("warn")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::new("costminer=debug,costminer_metrics=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("costminer=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Report(args) => run_report(args, cli.json).await,
        Command::Metrics => list_metrics(cli.json),
    }
}
