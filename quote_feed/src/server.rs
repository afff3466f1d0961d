//! Minimal HTTP responder for the quote feed.
//!
//! Accepts one request per connection, logs the request line, and answers
//! `200 OK` with a JSON array of feed items regardless of method or path.
//! Per-connection errors are logged and never terminate the accept loop, so a
//! single misbehaving client cannot take the feed down.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

use log::{debug, error, info};
use quote_common::feed::FeedItem;
use quote_common::{QuoteError, Result};

use crate::catalog::random_titles;

const MAX_REQUEST_BYTES: usize = 64 * 1024;
const CLIENT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Feed server bound to a TCP address.
pub struct FeedServer {
    listener: TcpListener,
    next_id: u64,
}

impl FeedServer {
    /// Binds the feed to `bind_addr` (e.g., `0.0.0.0:8090`).
    pub fn new(bind_addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(bind_addr)?;
        Ok(Self {
            listener,
            next_id: 1,
        })
    }

    /// Blocking accept loop answering every connection with `count` items.
    pub fn serve(mut self, count: usize) -> Result<()> {
        info!("Feed server is started on {}", self.listener.local_addr()?);

        loop {
            match self.listener.accept() {
                Ok((mut stream, _)) => {
                    if let Err(e) = self.handle_connection(&mut stream, count) {
                        error!("Connection error: {}", e);
                    }
                }
                Err(e) => error!("TCP connection error: {}", e),
            }
        }
    }

    fn handle_connection(&mut self, stream: &mut TcpStream, count: usize) -> Result<()> {
        stream.set_read_timeout(Some(CLIENT_READ_TIMEOUT))?;
        let request_line = read_request(stream)?;
        debug!("Request from {}: {}", stream.peer_addr()?, request_line);

        let items = self.next_items(count);
        let response = render_response(&items)?;
        stream.write_all(response.as_bytes())?;
        info!("Served {} items for '{}'", items.len(), request_line);
        Ok(())
    }

    /// Builds the next batch with sequential ids.
    fn next_items(&mut self, count: usize) -> Vec<FeedItem> {
        random_titles(count)
            .into_iter()
            .map(|title| {
                let id = self.next_id;
                self.next_id += 1;
                FeedItem {
                    id,
                    title: String::from(title),
                    body: String::new(),
                }
            })
            .collect()
    }
}

/// Reads one HTTP request (headers plus a `Content-Length` body when present)
/// and returns its request line.
fn read_request(stream: &mut TcpStream) -> Result<String> {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];

    let header_end = loop {
        let size = stream.read(&mut buf)?;
        if size == 0 {
            return Err(QuoteError::Validation(String::from(
                "Connection closed before request was complete",
            )));
        }
        data.extend_from_slice(&buf[..size]);
        if let Some(pos) = find_blank_line(&data) {
            break pos + 4;
        }
        if data.len() > MAX_REQUEST_BYTES {
            return Err(QuoteError::Validation(String::from("Request too large")));
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let request_line = head.lines().next().unwrap_or("").to_string();

    // Drain the body so the client finishes writing before we respond.
    let content_length = parse_content_length(&head);
    let mut body_read = data.len() - header_end;
    while body_read < content_length.min(MAX_REQUEST_BYTES) {
        let size = stream.read(&mut buf)?;
        if size == 0 {
            break;
        }
        body_read += size;
    }
    Ok(request_line)
}

fn find_blank_line(data: &[u8]) -> Option<usize> {
    data.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Extracts `Content-Length` from a raw header block, defaulting to 0.
fn parse_content_length(head: &str) -> usize {
    head.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Renders a full `200 OK` response with a JSON array body.
fn render_response(items: &[FeedItem]) -> Result<String> {
    let body = serde_json::to_string(items)?;
    Ok(format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    ))
}
