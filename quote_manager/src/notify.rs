//! Transient user notifications with a fixed time-to-live.
//!
//! A `Notifier` keeps at most one notice; reading it back after the TTL has
//! elapsed yields nothing, which is the terminal equivalent of the original
//! auto-clearing notification area. A drain thread converts sync events into
//! notices as they arrive.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::{info, warn};
use quote_common::keys::NOTICE_TTL_SECS;

use crate::sync::SyncEvent;

struct Notice {
    text: String,
    posted: Instant,
}

/// Holder of the most recent transient notice.
#[derive(Clone)]
pub struct Notifier {
    current: Arc<Mutex<Option<Notice>>>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    /// Creates a notifier with the standard TTL.
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(NOTICE_TTL_SECS))
    }

    /// Creates a notifier whose notices expire after `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            ttl,
        }
    }

    /// Posts a notice, replacing any previous one.
    pub fn post(&self, text: &str) {
        if let Ok(mut slot) = self.current.lock() {
            *slot = Some(Notice {
                text: String::from(text),
                posted: Instant::now(),
            });
        }
    }

    /// Returns the active notice, or `None` once the TTL has elapsed.
    pub fn current(&self) -> Option<String> {
        let mut slot = self.current.lock().ok()?;
        match slot.as_ref() {
            Some(notice) if notice.posted.elapsed() < self.ttl => Some(notice.text.clone()),
            Some(_) => {
                *slot = None;
                None
            }
            None => None,
        }
    }

    /// Spawns a thread that turns sync events into notices until the sender
    /// side of `events` is dropped.
    pub fn drain_sync_events(&self, events: Receiver<SyncEvent>) -> JoinHandle<()> {
        let notifier = self.clone();
        thread::spawn(move || {
            for event in events {
                match event {
                    SyncEvent::Merged(count) => {
                        let text = format!("Synced {} new quote(s) from the server.", count);
                        info!("{}", text);
                        notifier.post(&text);
                    }
                    SyncEvent::Failed(reason) => {
                        let text = format!("Quote sync failed: {}", reason);
                        warn!("{}", text);
                        notifier.post(&text);
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn notice_expires_after_ttl() {
        let notifier = Notifier::with_ttl(Duration::from_millis(40));
        notifier.post("hello");
        assert_eq!(notifier.current().as_deref(), Some("hello"));
        thread::sleep(Duration::from_millis(60));
        assert!(notifier.current().is_none());
    }

    #[test]
    fn newer_notice_replaces_older() {
        let notifier = Notifier::new();
        notifier.post("first");
        notifier.post("second");
        assert_eq!(notifier.current().as_deref(), Some("second"));
    }

    #[test]
    fn drain_thread_posts_merged_and_failed_events() {
        let notifier = Notifier::new();
        let (tx, rx) = unbounded();
        let handle = notifier.drain_sync_events(rx);

        tx.send(SyncEvent::Merged(2)).unwrap();
        tx.send(SyncEvent::Failed(String::from("boom"))).unwrap();
        drop(tx);
        handle.join().unwrap();

        let text = notifier.current().unwrap();
        assert!(text.contains("boom"));
    }
}
