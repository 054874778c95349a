use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use market_sim_core::asset::{AssetSymbol, asset_options};
use market_sim_core::overview::OverviewPayload;
use market_sim_core::settings::{Interval, SettingsPayload};
use market_sim_providers::latest::LatestOverview;
use market_sim_providers::mock::{Latency, MockProvider};
use market_sim_providers::provider::DashboardProvider;
use serde::Serialize;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "market-sim",
    about = "Inspect the synthetic market data behind the finance dashboard"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Print payloads as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Skip the simulated network latency
    #[arg(long, global = true)]
    no_latency: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show candles and headline metrics for an asset
    Overview {
        /// Assets to request (comma-separated); later requests supersede earlier ones
        #[arg(short, long, value_delimiter = ',', required = true)]
        assets: Vec<AssetSymbol>,

        /// Number of candles to generate (defaults to MARKET_SIM_POINTS or 24)
        #[arg(long)]
        points: Option<usize>,
    },

    /// List selectable assets
    Assets,

    /// Show the monitored-asset table
    Monitored,

    /// Show recent trades and cumulative performance
    Trades,

    /// Show or save trading parameters
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the current settings
    Show,

    /// Save settings; omitted fields keep their defaults
    Save {
        /// Analysis interval: 5min, 15min, 1h, 4h, 1d
        #[arg(long)]
        interval: Option<Interval>,

        /// Maximum risk per trade (%), 0.5 to 10
        #[arg(long)]
        max_risk: Option<f64>,

        /// Capital available for automated trades
        #[arg(long)]
        capital: Option<f64>,

        /// Stop loss (%), 0.5 to 8
        #[arg(long)]
        stop_loss: Option<f64>,

        /// Take profit (%), 1 to 15
        #[arg(long)]
        take_profit: Option<f64>,
    },
}

fn create_provider(no_latency: bool, points: Option<usize>) -> Result<MockProvider> {
    let mut provider = MockProvider::from_env().context("failed to configure mock provider")?;
    if no_latency {
        provider = provider.with_latency(Latency::none());
    }
    if let Some(points) = points {
        provider = provider.with_points(points);
    }
    Ok(provider)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to serialize payload")?;
    println!("{text}");
    Ok(())
}

fn print_overview(payload: &OverviewPayload) {
    println!("{} ({})", payload.display_name, payload.asset);
    for metric in &payload.metrics {
        println!(
            "  {:<16} {:>18}  {:+.2}  {}",
            metric.label, metric.value, metric.change, metric.helper
        );
    }
    println!();
    println!(
        "{:>4} {:>10} {:>10} {:>10} {:>10} {:>9} {:>10} {:>10} {:>6} {:>11} {:>11} {:>11}",
        "time", "open", "high", "low", "close", "volume", "ema20", "ema50", "rsi", "macd", "signal",
        "hist"
    );
    for c in &payload.candles {
        println!(
            "{:>4} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>9} {:>10.2} {:>10.2} {:>6.2} {:>11.4} {:>11.4} {:>11.4}",
            c.time,
            c.open,
            c.high,
            c.low,
            c.close,
            c.volume,
            c.ema20,
            c.ema50,
            c.rsi,
            c.macd,
            c.signal,
            c.histogram
        );
    }
}

async fn cmd_overview(provider: MockProvider, assets: &[AssetSymbol], json: bool) -> Result<()> {
    let latest = LatestOverview::new(provider);
    info!("Using provider: {}", latest.provider().name());
    if assets.len() > 1 {
        info!(
            "switching through {} asset(s); only the last request is shown",
            assets.len()
        );
    }

    let handles: Vec<_> = assets
        .iter()
        .map(|&asset| (asset, tokio::spawn(latest.load(asset))))
        .collect();

    let mut shown = None;
    for (asset, handle) in handles {
        let result = handle
            .await
            .with_context(|| format!("overview task for {asset} failed"))?;
        if let Some(payload) = result.with_context(|| format!("failed to load {asset}"))? {
            shown = Some(payload);
        }
    }

    let payload = shown.context("every overview request was superseded")?;
    if json {
        print_json(&payload)
    } else {
        print_overview(&payload);
        Ok(())
    }
}

fn cmd_assets(json: bool) -> Result<()> {
    let options = asset_options();
    if json {
        return print_json(&options);
    }
    for option in &options {
        println!("{:<8} {}", option.value, option.label);
    }
    Ok(())
}

async fn cmd_monitored(provider: &dyn DashboardProvider, json: bool) -> Result<()> {
    let assets = provider
        .fetch_monitored_assets()
        .await
        .context("failed to fetch monitored assets")?;
    if json {
        return print_json(&assets);
    }

    for asset in &assets {
        println!(
            "{:<8} {:<20} {:>12.2} {:>+8.2}%  {:<7} {:<9} {:?}",
            asset.symbol,
            asset.name,
            asset.last_price,
            asset.change_percent,
            format!("{:?}", asset.trend),
            format!("{:?}", asset.ai_signal),
            asset.status
        );
    }
    Ok(())
}

async fn cmd_trades(provider: &dyn DashboardProvider, json: bool) -> Result<()> {
    let history = provider
        .fetch_trade_history()
        .await
        .context("failed to fetch trade history")?;
    if json {
        return print_json(&history);
    }

    println!("Trades (newest first):");
    for trade in &history.trades {
        println!(
            "  {:<11} {} {:<7} {:<6} {:>8} @ {:>10.2}  {:>+6.2}%",
            trade.id,
            trade.timestamp.format("%Y-%m-%d %H:%M"),
            trade.symbol,
            format!("{:?}", trade.side),
            trade.quantity,
            trade.price,
            trade.result_pct
        );
    }

    println!("Cumulative performance (oldest first):");
    for point in &history.performance {
        println!(
            "  {} {:>+7.2}%",
            point.timestamp.format("%Y-%m-%d %H:%M"),
            point.cumulative_return
        );
    }
    Ok(())
}

fn print_settings(settings: &SettingsPayload) {
    println!("interval:    {}", settings.interval);
    println!("max risk:    {:.1}%", settings.max_risk);
    println!("capital:     {:.2}", settings.capital);
    println!("stop loss:   -{:.1}%", settings.stop_loss);
    println!("take profit: +{:.1}%", settings.take_profit);
}

async fn cmd_settings(
    provider: &dyn DashboardProvider,
    action: &SettingsAction,
    json: bool,
) -> Result<()> {
    let settings = match action {
        SettingsAction::Show => provider
            .fetch_settings()
            .await
            .context("failed to fetch settings")?,
        SettingsAction::Save {
            interval,
            max_risk,
            capital,
            stop_loss,
            take_profit,
        } => {
            let defaults = SettingsPayload::default();
            let payload = SettingsPayload {
                interval: interval.unwrap_or(defaults.interval),
                max_risk: max_risk.unwrap_or(defaults.max_risk),
                capital: capital.unwrap_or(defaults.capital),
                stop_loss: stop_loss.unwrap_or(defaults.stop_loss),
                take_profit: take_profit.unwrap_or(defaults.take_profit),
            };
            payload.validate().context("invalid settings")?;
            provider
                .save_settings(payload)
                .await
                .context("failed to save settings")?
        }
    };

    if json {
        print_json(&settings)
    } else {
        print_settings(&settings);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    match &cli.command {
        Commands::Overview { assets, points } => {
            let provider = create_provider(cli.no_latency, *points)?;
            cmd_overview(provider, assets, cli.json).await?;
        }
        Commands::Assets => {
            cmd_assets(cli.json)?;
        }
        Commands::Monitored => {
            let provider = create_provider(cli.no_latency, None)?;
            cmd_monitored(&provider, cli.json).await?;
        }
        Commands::Trades => {
            let provider = create_provider(cli.no_latency, None)?;
            cmd_trades(&provider, cli.json).await?;
        }
        Commands::Settings { action } => {
            let provider = create_provider(cli.no_latency, None)?;
            cmd_settings(&provider, action, cli.json).await?;
        }
    }

    Ok(())
}
