//! Mock quote feed — a minimal POST-capable JSON endpoint for the manager's
//! sync loop to poll.
//!
//! Every request (method and path are ignored) is answered with `200 OK` and
//! a JSON array of feed items whose titles come from a small built-in pool.
//! The pool is finite on purpose: repeated polls produce duplicates, which
//! exercises the manager's structural-equality dedupe.
#![warn(missing_docs)]
mod args;
mod catalog;
mod server;

use clap::Parser;
use quote_common::Result;

use crate::args::Args;
use crate::server::FeedServer;

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let server = FeedServer::new(&format!("0.0.0.0:{}", args.port))?;
    server.serve(args.count)
}

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
