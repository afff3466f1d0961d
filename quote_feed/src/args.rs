//! Command-line arguments for the mock quote feed.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::Parser;
use quote_common::keys::FEED_PORT;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// TCP port to listen on.
    #[clap(long, default_value_t = FEED_PORT)]
    pub port: u16,

    /// Number of feed items returned per request.
    #[clap(long, default_value_t = 8)]
    pub count: usize,
}
