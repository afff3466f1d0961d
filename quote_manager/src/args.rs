//! Command-line arguments for the Quote Manager.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;

use clap::Parser;
use quote_common::keys::{FEED_PORT, SYNC_INTERVAL_SECS, feed_url};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory for durable storage. Defaults to the platform data
    /// directory under `quote_manager`.
    #[clap(long)]
    pub data_dir: Option<PathBuf>,

    /// URL of the remote quote feed endpoint.
    #[clap(long, default_value_t = feed_url("127.0.0.1", FEED_PORT))]
    pub server_url: String,

    /// Seconds between background sync cycles.
    #[clap(long, default_value_t = SYNC_INTERVAL_SECS)]
    pub sync_interval_secs: u64,

    /// Disable the background sync loop entirely.
    #[clap(long)]
    pub no_sync: bool,
}
