//! Incremental server-sent-event reader with explicit cancellation.
//!
//! [`SseEventStream`] pulls body chunks on demand and yields one event at a
//! time. [`SseEventStream::close`] drops the underlying body stream, which
//! releases the HTTP connection; the peer is never waited on.

use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tracing::trace;

use super::errors::{A2aError, A2aResult};

/// Body stream of a streaming HTTP response
pub type BodyStream = Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>;

/// A single dispatched SSE event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseEvent {
    pub event: Option<String>,
    pub id: Option<String>,
    /// `data:` lines joined with `\n`
    pub data: String,
}

pub struct SseEventStream<S> {
    inner: Option<S>,
    buffer: Vec<u8>,
    /// Start of the buffer region not yet searched for a delimiter
    scan_from: usize,
    /// Limit on each wait for the next body chunk
    idle_timeout: Option<Duration>,
    closed: bool,
}

impl SseEventStream<BodyStream> {
    pub fn from_response(response: reqwest::Response) -> Self {
        Self::new(Box::pin(response.bytes_stream()))
    }
}

impl<S, E> SseEventStream<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Into<A2aError>,
{
    pub fn new(inner: S) -> Self {
        Self {
            inner: Some(inner),
            buffer: Vec::new(),
            scan_from: 0,
            idle_timeout: None,
            closed: false,
        }
    }

    /// Fail a read when no chunk arrives within `timeout`. The limit applies
    /// to each wait separately, so a stream that keeps sending never expires.
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Next complete event, or `None` once the stream is exhausted or closed.
    ///
    /// A transport error or idle timeout closes the stream before it is
    /// returned.
    pub async fn next_event(&mut self) -> A2aResult<Option<SseEvent>> {
        loop {
            if let Some(event) = self.next_buffered_event() {
                return Ok(Some(event));
            }

            let Some(inner) = self.inner.as_mut() else {
                return Ok(None);
            };

            let next = match self.idle_timeout {
                Some(limit) => match tokio::time::timeout(limit, inner.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        self.close();
                        return Err(A2aError::timed_out("stream read", limit));
                    }
                },
                None => inner.next().await,
            };

            match next {
                Some(Ok(chunk)) => {
                    trace!(bytes = chunk.len(), "received SSE chunk");
                    self.push_chunk(&chunk);
                }
                Some(Err(err)) => {
                    self.close();
                    return Err(err.into());
                }
                None => {
                    self.inner = None;
                    self.scan_from = 0;
                    // An unterminated trailing event still counts.
                    let rest = std::mem::take(&mut self.buffer);
                    return Ok(parse_event(&rest));
                }
            }
        }
    }

    /// Stop reading and release the connection. Idempotent.
    pub fn close(&mut self) {
        self.inner = None;
        self.buffer.clear();
        self.scan_from = 0;
        self.closed = true;
    }

    /// Whether `close()` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Drain complete blocks until one yields an event. Bytes already
    /// searched are not searched again, except the last one, which may be
    /// the first half of a delimiter.
    fn next_buffered_event(&mut self) -> Option<SseEvent> {
        while let Some(end) = find_event_boundary(&self.buffer, self.scan_from) {
            let raw: Vec<u8> = self.buffer.drain(..end + 2).collect();
            self.scan_from = 0;
            if let Some(event) = parse_event(&raw) {
                return Some(event);
            }
        }
        self.scan_from = self.buffer.len().saturating_sub(1);
        None
    }

    fn push_chunk(&mut self, chunk: &[u8]) {
        // CRLF framing is folded into LF so one boundary search covers both.
        self.buffer.extend(chunk.iter().copied().filter(|b| *b != b'\r'));
    }
}

/// Position of the first blank-line delimiter ("\n\n") at or after `from`
fn find_event_boundary(buf: &[u8], from: usize) -> Option<usize> {
    buf.get(from..)?
        .windows(2)
        .position(|w| w == b"\n\n")
        .map(|pos| from + pos)
}

/// Parse one raw event block. Blocks without any `data:` line (comments,
/// keep-alives) produce nothing.
fn parse_event(raw: &[u8]) -> Option<SseEvent> {
    let text = String::from_utf8_lossy(raw);
    let mut event = SseEvent::default();
    let mut data_lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.is_empty() || line.starts_with(':') {
            continue;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "data" => data_lines.push(value),
            "event" => event.event = Some(value.to_string()),
            "id" => event.id = Some(value.to_string()),
            _ => {}
        }
    }

    if data_lines.is_empty() {
        return None;
    }

    event.data = data_lines.join("\n");
    Some(event)
}
