use analytics::AnalyticsEngine;
use anyhow::{bail, Context};
use api_client::{MarketData, YahooChartClient};
use clap::{Parser, Subcommand};
use configuration::{load_config, Config};
use core_types::{Instrument, PriceSeries};
use futures::future::join_all;
use indicatif::ProgressBar;
use narrator::InsightNarrator;
use rust_decimal::Decimal;
use sentiment::{NewsClient, SentimentScorer};
use simulator::{simulate, AllocationSet};
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

mod render;

/// The main entry point for the Meridian dashboard application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file is optional; absence just means keys come from the shell.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config().context("failed to load config.toml")?;

    match cli.command {
        Commands::Dashboard(args) => handle_dashboard(args, config).await,
        Commands::Simulate(args) => handle_simulate(args, config).await,
        Commands::News(args) => handle_news(args, config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A terminal dashboard for market insights, portfolio simulation, and news sentiment.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the configured instruments and show per-instrument insights.
    Dashboard(DashboardArgs),
    /// Simulate a weighted portfolio over the lookback window.
    Simulate(SimulateArgs),
    /// Fetch news headlines for a topic and score their sentiment.
    News(NewsArgs),
}

#[derive(Parser)]
struct DashboardArgs {
    /// Override the configured lookback window, in days.
    #[arg(long)]
    lookback_days: Option<u32>,
}

#[derive(Parser)]
struct SimulateArgs {
    /// Allocation as NAME=PERCENT, repeatable (e.g. --alloc "S&P 500=40").
    #[arg(long = "alloc", value_name = "NAME=PERCENT", required = true)]
    allocations: Vec<String>,

    /// Override the configured lookback window, in days.
    #[arg(long)]
    lookback_days: Option<u32>,
}

#[derive(Parser)]
struct NewsArgs {
    /// Topic to search headlines for (e.g. "Tesla", "Oil", "USD").
    #[arg(long, default_value = "USD")]
    topic: String,

    /// Maximum number of headlines to fetch; defaults to the configured page size.
    #[arg(long)]
    limit: Option<u32>,
}

// ==============================================================================
// Dashboard Command Logic
// ==============================================================================

async fn handle_dashboard(args: DashboardArgs, config: Config) -> anyhow::Result<()> {
    println!("Meridian — market insights, portfolio simulation, and news sentiment\n");

    let lookback_days = args.lookback_days.unwrap_or(config.market.lookback_days);
    let instruments = config.market.instruments();

    let client = YahooChartClient::new();
    let narrator = InsightNarrator::from_config(&config.narrator);
    let engine = AnalyticsEngine::new();

    let series_by_name = fetch_all(&client, &instruments, lookback_days).await;
    if series_by_name.is_empty() {
        println!("No instrument data could be loaded; nothing to show.");
        return Ok(());
    }

    for instrument in &instruments {
        // Instruments whose fetch failed were already warned about; skip them.
        let Some(series) = series_by_name.get(&instrument.name) else {
            continue;
        };

        let stats = match engine.change_stats(series) {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(
                    instrument = %instrument.name,
                    error = %e,
                    "skipping unanalyzable instrument"
                );
                continue;
            }
        };

        let insight = match &narrator {
            Some(narrator) => match narrator.generate(&instrument.name, &stats).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(
                        instrument = %instrument.name,
                        error = %e,
                        "narrator failed; using local summary"
                    );
                    narrator::fallback_insight(&instrument.name, &stats)
                }
            },
            None => narrator::fallback_insight(&instrument.name, &stats),
        };

        render::instrument_section(instrument, series, &stats, &insight);
    }

    Ok(())
}

/// Fetches every instrument concurrently. Failed instruments are logged and
/// dropped from the result; one bad feed never aborts the run.
async fn fetch_all(
    client: &dyn MarketData,
    instruments: &[Instrument],
    lookback_days: u32,
) -> BTreeMap<String, PriceSeries> {
    let progress = ProgressBar::new(instruments.len() as u64);

    let fetches = instruments.iter().map(|instrument| {
        let progress = progress.clone();
        async move {
            let result = client.fetch_daily_closes(instrument, lookback_days).await;
            progress.inc(1);
            (instrument.name.clone(), result)
        }
    });
    let results = join_all(fetches).await;
    progress.finish_and_clear();

    let mut series_by_name = BTreeMap::new();
    for (name, result) in results {
        match result {
            Ok(series) => {
                series_by_name.insert(name, series);
            }
            Err(e) => {
                tracing::warn!(instrument = %name, error = %e, "could not load price data");
            }
        }
    }
    series_by_name
}

// ==============================================================================
// Simulate Command Logic
// ==============================================================================

async fn handle_simulate(args: SimulateArgs, config: Config) -> anyhow::Result<()> {
    let allocations = parse_allocations(&args.allocations)?;
    let lookback_days = args.lookback_days.unwrap_or(config.market.lookback_days);

    // Fetch only what the user allocated to. Names outside the configured
    // universe stay unfetched and surface through the simulator's
    // UnknownInstrument error below.
    let targets: Vec<Instrument> = config
        .market
        .instruments()
        .into_iter()
        .filter(|instrument| allocations.contains_key(&instrument.name))
        .collect();

    let client = YahooChartClient::new();
    let series_by_name = fetch_all(&client, &targets, lookback_days).await;

    let returns = simulate(&allocations, &series_by_name)
        .context("portfolio simulation rejected the request")?;

    render::simulation_table(&returns);
    Ok(())
}

/// Parses repeated `NAME=PERCENT` arguments into allocation fractions.
///
/// Percentages are independent values in 0..=100; they are deliberately not
/// required to sum to 100 and are never rescaled.
fn parse_allocations(args: &[String]) -> anyhow::Result<AllocationSet> {
    let mut allocations = AllocationSet::new();
    for arg in args {
        let (name, percent) = arg
            .split_once('=')
            .with_context(|| format!("invalid allocation '{arg}': expected NAME=PERCENT"))?;
        let name = name.trim();
        if name.is_empty() {
            bail!("invalid allocation '{arg}': empty instrument name");
        }
        let percent: Decimal = percent
            .trim()
            .parse()
            .with_context(|| format!("invalid percentage in allocation '{arg}'"))?;
        if percent < Decimal::ZERO || percent > Decimal::from(100) {
            bail!("allocation for '{name}' must be between 0 and 100, got {percent}");
        }
        allocations.insert(name.to_string(), percent / Decimal::from(100));
    }
    Ok(allocations)
}

// ==============================================================================
// News Command Logic
// ==============================================================================

async fn handle_news(args: NewsArgs, config: Config) -> anyhow::Result<()> {
    let limit = args.limit.unwrap_or(config.news.page_size);

    let Some(client) = NewsClient::from_config(&config.news) else {
        println!(
            "News is not configured: set MERIDIAN__NEWS__API_KEY (or news.api_key) to enable it."
        );
        return Ok(());
    };

    let headlines = client
        .top_headlines(&args.topic, limit)
        .await
        .context("failed to fetch headlines")?;

    if headlines.is_empty() {
        println!("No headlines found for '{}'.", args.topic);
        return Ok(());
    }

    let scorer = SentimentScorer::new();
    let rows: Vec<_> = headlines
        .into_iter()
        .map(|headline| {
            let score = scorer.score(&headline.title);
            (headline, score)
        })
        .collect();

    render::sentiment_table(&args.topic, &rows);
    Ok(())
}
