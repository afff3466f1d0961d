//! Quote Manager — a terminal quote store with durable persistence and
//! background server sync.
//!
//! The binary wires together four building blocks:
//!
//! - `QuoteStore` — the ordered quote sequence with write-through persistence
//!   to a file-per-key durable backend, plus the session-scoped last-viewed
//!   pointer and the persisted category filter.
//! - `SyncWorker` — a background thread that polls the remote feed endpoint
//!   (immediately, then every 15 seconds), maps the first five response items
//!   to `Server`-category quotes, and merges them with structural-equality
//!   dedupe.
//! - `Notifier` — transient notices with a 4-second TTL, fed by the worker's
//!   event channel.
//! - A thin stdin command loop (`show`, `add`, `filter`, `import`, `export`,
//!   `sync`, ...) that owns the store behind an `Arc<Mutex<..>>` shared with
//!   the worker.
//!
//! Concurrency and shutdown:
//! - The store mutex is held only for the duration of a single operation; the
//!   sync worker runs its cycles serially on one thread, so user edits and
//!   merges never interleave mid-operation.
//! - `quit`, stdin EOF, or Ctrl+C (via the `ctrlc` flag) leave the loop; the
//!   worker is stopped with an explicit shutdown signal and joined before
//!   exit.
#![warn(missing_docs)]
mod args;
mod command;
mod notify;
mod storage;
mod store;
mod sync;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::unbounded;
use log::{error, info, warn};
use quote_common::{QuoteError, Result};

use crate::args::Args;
use crate::command::{Command, HELP_TEXT, parse_line};
use crate::notify::Notifier;
use crate::storage::{DurableStorage, SessionStorage};
use crate::store::QuoteStore;
use crate::sync::{SyncEvent, SyncWorker};

type SharedStore = Arc<Mutex<QuoteStore<DurableStorage>>>;

/// Fallback line shown when no quote matches (or the store is empty).
const NO_QUOTES_TEXT: &str = "No quotes available in this category.";

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .expect("Error setting Ctrl+C handler");
    }

    let data_dir = resolve_data_dir(args.data_dir)?;
    info!("Using data directory: {}", data_dir.display());

    let durable = DurableStorage::open(&data_dir)?;
    let store = QuoteStore::load(durable, SessionStorage::new())?;
    if let Some(at) = store.last_sync_at() {
        info!("Last successful sync: {}", at);
    }
    let store: SharedStore = Arc::new(Mutex::new(store));

    let notifier = Notifier::new();
    let (events_tx, events_rx) = unbounded::<SyncEvent>();
    let drain_handle = notifier.drain_sync_events(events_rx);

    let worker = if args.no_sync {
        info!("Background sync disabled (--no-sync)");
        drop(events_tx);
        None
    } else {
        info!("Syncing with {} every {}s", args.server_url, args.sync_interval_secs);
        Some(SyncWorker::start(
            Arc::clone(&store),
            args.server_url.clone(),
            Duration::from_secs(args.sync_interval_secs),
            events_tx,
        )?)
    };

    println!("Quote Manager ready. Type 'help' for commands.");
    run_loop(&store, &notifier, worker.as_ref(), &shutdown)?;

    if let Some(worker) = worker {
        worker.stop();
    }
    if drain_handle.join().is_err() {
        error!("Notification thread panicked");
    }
    info!("Bye.");
    Ok(())
}

/// Reads stdin commands until `quit`, EOF, or the Ctrl+C flag is set.
fn run_loop(
    store: &SharedStore,
    notifier: &Notifier,
    worker: Option<&SyncWorker>,
    shutdown: &Arc<AtomicBool>,
) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !shutdown.load(Ordering::Relaxed) {
        if let Some(notice) = notifier.current() {
            println!("[notice] {}", notice);
        }
        print!("> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                warn!("{}", e);
                println!("{} Type 'help' for commands.", e);
                continue;
            }
        };

        match run_command(command, store, worker) {
            Ok(true) => {}
            Ok(false) => break,
            Err(QuoteError::Validation(msg)) => {
                warn!("{}", msg);
                println!("{}", msg);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Executes one command; returns `false` when the loop should stop.
fn run_command(command: Command, store: &SharedStore, worker: Option<&SyncWorker>) -> Result<bool> {
    match command {
        Command::Show(category) => {
            let mut store = store.lock()?;
            let filter = category.unwrap_or_else(|| store.selected_filter());
            match store.pick_random(&filter)? {
                Some(quote) => println!("\"{}\" - ({})", quote.text, quote.category),
                None => println!("{}", NO_QUOTES_TEXT),
            }
        }
        Command::Add { text, category } => {
            store.lock()?.add(&text, &category)?;
            println!("Quote added successfully!");
        }
        Command::Filter(category) => {
            store.lock()?.set_selected_filter(&category)?;
            println!("Filter set to '{}'.", category);
        }
        Command::List => {
            let store = store.lock()?;
            for (i, quote) in store.quotes().iter().enumerate() {
                println!("{:3}. \"{}\" - ({})", i + 1, quote.text, quote.category);
            }
            println!("{} quote(s) total.", store.quotes().len());
        }
        Command::Last => match store.lock()?.last_viewed() {
            Some(quote) => println!("\"{}\" - ({})", quote.text, quote.category),
            None => println!("No quote viewed yet this session."),
        },
        Command::Import(path) => {
            let count = import_file(store, &path)?;
            println!("Imported {} quote(s) from {}.", count, path.display());
        }
        Command::Export(path) => {
            let count = export_file(store, &path)?;
            println!("Exported {} quote(s) to {}.", count, path.display());
        }
        Command::Sync => match worker {
            Some(worker) => {
                worker.trigger()?;
                println!("Sync requested.");
            }
            None => println!("Background sync is disabled (--no-sync)."),
        },
        Command::Help => println!("{}", HELP_TEXT),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

/// Reads `path`, parses it as JSON, and appends its quotes to the store.
fn import_file(store: &SharedStore, path: &Path) -> Result<usize> {
    let raw = fs::read_to_string(path)
        .map_err(|e| QuoteError::Validation(format!("Cannot read {}: {}", path.display(), e)))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| QuoteError::Validation(format!("Invalid JSON in import file: {}", e)))?;
    store.lock()?.import_many(value)
}

/// Writes the pretty-printed store to `path`.
fn export_file(store: &SharedStore, path: &Path) -> Result<usize> {
    let (json, count) = {
        let store = store.lock()?;
        (store.export_all()?, store.quotes().len())
    };
    fs::write(path, json)?;
    Ok(count)
}

/// Picks the storage directory: `--data-dir` wins, otherwise the platform
/// data directory.
fn resolve_data_dir(arg: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = arg {
        return Ok(dir);
    }
    dirs::data_dir()
        .map(|d| d.join("quote_manager"))
        .ok_or_else(|| {
            QuoteError::Validation(String::from(
                "Cannot resolve a platform data directory; pass --data-dir.",
            ))
        })
}

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
