//! Background sync worker: periodic poll-merge against the remote feed.
//!
//! The `SyncWorker` runs a dedicated thread that POSTs the local quote
//! sequence to the configured endpoint, takes the first few items of the JSON
//! array response, maps each title to a quote with the fixed `Server`
//! category, and merges them into the shared store with structural-equality
//! dedupe. Crossbeam `select!` multiplexes the interval tick with a manual
//! trigger and a shutdown signal, so the loop is cancellable and cycles run
//! strictly one at a time on the worker thread.
//!
//! Event model:
//! - `SyncEvent::Merged(n)` — a cycle appended `n` new quotes.
//! - `SyncEvent::Failed(reason)` — fetch or decode failed; next tick retries.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Sender, select, tick, unbounded};
use log::{debug, error};
use quote_common::feed::FeedItem;
use quote_common::keys::SYNC_BATCH_LIMIT;
use quote_common::{Quote, QuoteError, Result};

use crate::storage::KvStorage;
use crate::store::QuoteStore;

/// Outcome of one sync cycle, reported to the notifier.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// Number of new quotes appended by the cycle (always > 0).
    Merged(usize),
    /// The cycle failed; carries a short reason string.
    Failed(String),
}

/// Handle to the background sync thread.
pub struct SyncWorker {
    shutdown_tx: Sender<()>,
    trigger_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl SyncWorker {
    /// Spawns the worker thread: one immediate cycle, then one per `interval`.
    ///
    /// The HTTP timeout is capped below the interval so a hung fetch cannot
    /// outlive its cycle.
    pub fn start<D: KvStorage + Send + 'static>(
        store: Arc<Mutex<QuoteStore<D>>>,
        url: String,
        interval: Duration,
        events: Sender<SyncEvent>,
    ) -> Result<Self> {
        let (shutdown_tx, shutdown_rx) = unbounded::<()>();
        let (trigger_tx, trigger_rx) = unbounded::<()>();

        let timeout = (interval / 2).max(Duration::from_secs(1));
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuoteError::Fetch(e.to_string()))?;

        let handle = thread::spawn(move || {
            report(run_cycle(&client, &url, &store), &events);

            let ticker = tick(interval);
            loop {
                select! {
                    recv(ticker) -> _ => report(run_cycle(&client, &url, &store), &events),
                    recv(trigger_rx) -> msg => match msg {
                        Ok(()) => report(run_cycle(&client, &url, &store), &events),
                        Err(_) => break,
                    },
                    recv(shutdown_rx) -> _ => break,
                }
            }
            debug!("Sync worker stopping...");
        });

        Ok(Self {
            shutdown_tx,
            trigger_tx,
            handle,
        })
    }

    /// Requests one extra cycle outside the regular schedule.
    pub fn trigger(&self) -> Result<()> {
        self.trigger_tx
            .send(())
            .map_err(|e| QuoteError::ChannelSend(e.to_string()))
    }

    /// Signals the worker to stop and waits for the thread to finish.
    pub fn stop(self) {
        let _ = self.shutdown_tx.send(());
        if self.handle.join().is_err() {
            error!("Sync worker thread panicked");
        }
    }
}

fn report(outcome: Result<usize>, events: &Sender<SyncEvent>) {
    let event = match outcome {
        Ok(0) => {
            debug!("Sync cycle finished, nothing new");
            return;
        }
        Ok(added) => SyncEvent::Merged(added),
        Err(e) => SyncEvent::Failed(e.to_string()),
    };
    if let Err(e) = events.send(event) {
        error!("Failed to report sync event: {}", e);
    }
}

/// One poll-merge cycle: POST the local sequence, map the response batch,
/// merge it into the store. Returns the number of appended quotes.
pub fn run_cycle<D: KvStorage>(
    client: &reqwest::blocking::Client,
    url: &str,
    store: &Arc<Mutex<QuoteStore<D>>>,
) -> Result<usize> {
    let snapshot: Vec<Quote> = store.lock()?.quotes().to_vec();

    let response = client
        .post(url)
        .json(&snapshot)
        .send()
        .map_err(|e| QuoteError::Fetch(e.to_string()))?;
    let items: Vec<FeedItem> = response
        .json()
        .map_err(|e| QuoteError::Fetch(e.to_string()))?;

    let batch = map_batch(&items);
    debug!("Fetched {} feed items, merging {}", items.len(), batch.len());

    let mut store = store.lock()?;
    let added = store.merge_remote(&batch)?;
    store.record_sync_time()?;
    Ok(added)
}

/// Maps the first [`SYNC_BATCH_LIMIT`] feed items to server-category quotes.
fn map_batch(items: &[FeedItem]) -> Vec<Quote> {
    items
        .iter()
        .take(SYNC_BATCH_LIMIT)
        .map(FeedItem::to_quote)
        .collect()
}
