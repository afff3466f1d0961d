//! Shared storage keys, labels, and timing constants.

/// Durable storage key holding the full quote sequence (JSON array).
pub const KEY_QUOTES: &str = "quotes";
/// Durable storage key holding the last selected category filter.
pub const KEY_LAST_FILTER: &str = "lastSelectedFilter";
/// Durable storage key holding the RFC 3339 time of the last successful sync.
pub const KEY_LAST_SYNC_AT: &str = "lastSyncAt";
/// Session storage key holding the most recently displayed quote.
pub const KEY_LAST_VIEWED: &str = "lastViewedQuote";

/// Sentinel filter value matching every category.
pub const ALL_CATEGORIES: &str = "all";
/// Category label assigned to quotes merged from the remote feed.
pub const SERVER_CATEGORY: &str = "Server";

/// Seconds between sync cycles.
pub const SYNC_INTERVAL_SECS: u64 = 15;
/// Maximum number of feed items consumed per sync cycle.
pub const SYNC_BATCH_LIMIT: usize = 5;
/// Seconds before a transient notification is auto-cleared.
pub const NOTICE_TTL_SECS: u64 = 4;

/// TCP port the mock feed server listens on by default.
pub const FEED_PORT: u16 = 8090;

/// Helper to format a feed endpoint URL from host and port.
pub fn feed_url(host: &str, port: u16) -> String {
    format!("http://{}:{}/quotes", host, port)
}
