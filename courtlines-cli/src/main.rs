//! courtlines CLI — odds-line and box-score scraping commands.
//!
//! Commands:
//! - `lines` — scrape odds listings for every configured date
//! - `boxscores` — scrape event box scores for every configured date
//! - `event` — scrape a single event summary
//! - `config` — print a starter TOML config for a league

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use courtlines_core::enumerate::SourceUrls;
use courtlines_core::fetch::HttpFetcher;
use courtlines_core::format::League;
use courtlines_runner::{run_box_scores, run_lines, scrape_event, RunConfig, StdoutProgress};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "courtlines",
    about = "courtlines — basketball odds and box-score scraper"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape best / preferred / worst spreads for every configured date.
    Lines {
        /// Path to a TOML run config.
        #[arg(long)]
        config: PathBuf,

        /// Echo each written row to stdout.
        #[arg(long, default_value_t = false)]
        show: bool,
    },
    /// Scrape team box scores and venue data for every configured date.
    Boxscores {
        /// Path to a TOML run config.
        #[arg(long)]
        config: PathBuf,

        /// Echo each written row to stdout.
        #[arg(long, default_value_t = false)]
        show: bool,
    },
    /// Scrape one event summary by id.
    Event {
        /// Event id as used by the summary API.
        event_id: String,

        /// League: nba or ncaab.
        #[arg(long)]
        league: League,

        /// CSV file to append the row to.
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a starter TOML config.
    Config {
        /// League: nba or ncaab.
        #[arg(long)]
        league: League,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Lines { config, show } => run_lines_cmd(&config, show),
        Commands::Boxscores { config, show } => run_box_scores_cmd(&config, show),
        Commands::Event {
            event_id,
            league,
            out,
        } => run_event_cmd(&event_id, league, &out),
        Commands::Config { league } => {
            print!("{}", RunConfig::template(league).to_toml()?);
            Ok(())
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path, show: bool) -> Result<RunConfig> {
    let mut config = RunConfig::from_file(path)
        .with_context(|| format!("loading config {}", path.display()))?;
    config.show |= show;
    Ok(config)
}

fn run_lines_cmd(path: &Path, show: bool) -> Result<()> {
    let config = load_config(path, show)?;
    let fetcher = HttpFetcher::new()?;
    let progress = StdoutProgress {
        show_rows: config.show,
    };
    let summary = run_lines(&config, &fetcher, &progress)?;
    println!("Output: {}", config.output.display());
    if summary.rows_written == 0 {
        tracing::warn!("no rows written");
    }
    Ok(())
}

fn run_box_scores_cmd(path: &Path, show: bool) -> Result<()> {
    let config = load_config(path, show)?;
    let fetcher = HttpFetcher::new()?;
    let progress = StdoutProgress {
        show_rows: config.show,
    };
    let summary = run_box_scores(&config, &fetcher, &progress)?;
    println!("Output: {}", config.output.display());
    if summary.rows_written == 0 {
        tracing::warn!("no rows written");
    }
    Ok(())
}

fn run_event_cmd(event_id: &str, league: League, out: &Path) -> Result<()> {
    let fetcher = HttpFetcher::new()?;
    let record = scrape_event(event_id, league, &SourceUrls::default(), out, &fetcher)?;
    println!(
        "{} {} - {} {} → {}",
        record.away.name.as_deref().unwrap_or("?"),
        record.away.final_score.unwrap_or(-1),
        record.home.name.as_deref().unwrap_or("?"),
        record.home.final_score.unwrap_or(-1),
        out.display()
    );
    Ok(())
}
