// Engine command line entry point
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use engine::config::EngineSettings;
use engine::services::{BlockService, BlockSummary, PackRequest};
use shared::TimeFrame;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "engine", version, about = "Pack market data into fixed-size binary blocks")]
struct Cli {
    /// JSON settings file; defaults are used for missing keys
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a CSV export into candle and indicator block files
    Pack {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        /// Slot interval, e.g. 1m, 15m, 1h, 1d
        #[arg(long)]
        interval: Option<TimeFrame>,
        /// Output directory, overrides `data_dir` from the settings
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Decode a block file and print its header
    Inspect { file: PathBuf },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => EngineSettings::load(path).with_context(|| format!("loading settings from {}", path.display()))?,
        None => EngineSettings::default(),
    };
    let service = BlockService::new(settings);

    match cli.command {
        Commands::Pack { csv, symbol, interval, out } => {
            let settings = service.settings();
            let request = PackRequest {
                csv_path: csv,
                symbol: symbol.unwrap_or_else(|| settings.default_symbol.clone()),
                interval: interval.unwrap_or(settings.interval),
                out_dir: out.unwrap_or_else(|| settings.data_dir.clone()),
            };
            let now = chrono::Utc::now().timestamp();
            let summary = service.pack_csv(&request, now).context("packing CSV")?;
            for file in &summary.files {
                println!("{}", file.display());
            }
        }
        Commands::Inspect { file } => match service.inspect(&file).with_context(|| format!("inspecting {}", file.display()))? {
            BlockSummary::Candles { meta, bytes, filled, missing } => {
                info!(uid = %meta.uid, block = meta.block, symbol = %meta.symbol, interval = meta.interval, "Candle block");
                println!(
                    "{} block={} interval={} complete={} last_update={} bytes={} filled={} missing={}",
                    meta.uid, meta.block, meta.interval, meta.complete, meta.last_update, bytes, filled, missing
                );
            }
            BlockSummary::Indicator { meta, bytes, series } => {
                info!(uid = %meta.uid, block = meta.block, name = %meta.name, "Indicator block");
                println!(
                    "{} name={} parameters={:?} block={} interval={} base_interval={} complete={} bytes={}",
                    meta.uid, meta.name, meta.parameters, meta.block, meta.interval, meta.base_interval, meta.complete, bytes
                );
                for (name, present) in series {
                    println!("  {}: {} values", name, present);
                }
            }
        },
    }

    Ok(())
}
