use anyhow::{Result, anyhow};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use patro::batch::convert_batch;
use patro::client::PatroClient;
use patro::config::Config;
use patro::model::Direction;
use patro::sheet;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "patro",
    version,
    about = "Batch AD <-> BS date converter for .xlsx spreadsheets"
)]
struct Cli {
    /// Input workbook with a 'Date' column in its first sheet
    input: PathBuf,

    /// Conversion direction: ad-to-bs or bs-to-ad
    #[arg(short, long, default_value = "ad-to-bs")]
    direction: String,

    /// Output workbook (default: <input>_converted.xlsx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum simultaneous requests (default from config)
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,

    /// Conversion service endpoint (default from config)
    #[arg(long)]
    endpoint: Option<String>,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let direction: Direction = cli.direction.parse().map_err(|e: String| anyhow!(e))?;

    // CLI flags override the config file
    let config = Config::load();
    let endpoint = cli.endpoint.unwrap_or_else(|| config.endpoint.clone());
    let concurrency = cli.concurrency.unwrap_or(config.max_concurrency);
    let output = cli.output.unwrap_or_else(|| default_output(&cli.input));

    let rows = sheet::read_rows(&cli.input)?;
    if rows.is_empty() {
        log::info!("no data rows in {}, nothing to convert", cli.input.display());
        return Ok(());
    }
    log::info!(
        "converting {} rows ({}) via {}",
        rows.len(),
        direction,
        endpoint
    );

    let client = PatroClient::new(&endpoint, Duration::from_secs(config.request_timeout_secs))?;
    let progress = if cli.no_progress {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(rows.len() as u64)
    };
    progress.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} rows")?);

    let dates = rows.iter().map(|r| r.date).collect();
    let results = convert_batch(
        dates,
        |date| {
            let client = &client;
            let progress = progress.clone();
            async move {
                let outcome = client.convert_one(date, direction).await;
                progress.inc(1);
                outcome
            }
        },
        concurrency,
    )
    .await;
    progress.finish_and_clear();

    sheet::write_rows(&output, &rows, &results)?;

    // A mixed-result batch is a normal outcome, not a failure.
    let converted = results.iter().filter(|r| r.is_some()).count();
    let missed = results.len() - converted;
    if missed > 0 {
        log::warn!(
            "{} of {} rows had no conversion and were left blank",
            missed,
            results.len()
        );
    }
    log::info!("wrote {} ({} rows converted)", output.display(), converted);
    Ok(())
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("converted");
    input.with_file_name(format!("{}_converted.xlsx", stem))
}
