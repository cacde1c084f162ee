//! courtlines runner — configuration, CSV output, and the scrape pipelines.
//!
//! This crate builds on `courtlines-core` to provide:
//! - TOML run configuration with season date windows
//! - Column layouts and record → row rendering
//! - An append-only CSV sink that writes its header at most once
//! - Back-to-back tracking across consecutive dates
//! - The lines and box-score pipelines with progress reporting

pub mod back_to_back;
pub mod config;
pub mod layout;
pub mod pipeline;
pub mod progress;
pub mod sink;

pub use back_to_back::BackToBack;
pub use config::{BookConfig, ConfigError, RunConfig};
pub use pipeline::{run_box_scores, run_lines, scrape_event, DateError, RunSummary};
pub use progress::{NoProgress, ScrapeProgress, StdoutProgress};
pub use sink::{CsvSink, SinkError};
