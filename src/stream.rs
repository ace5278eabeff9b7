//! Streaming body decoding.
//!
//! [`decode_lines`] and [`decode_json`] turn a live byte stream into a
//! lazy sequence of typed units, published one at a time as they become
//! available. The two modes are separate operations by design; nothing is
//! decided by inspecting the requested output type at runtime.
//!
//! The sequence ends cleanly at end-of-stream; any read or decode failure
//! is surfaced once as the terminal item. The underlying source lives
//! inside the returned stream and is dropped (closing the connection)
//! exactly once on every exit path, including early abandonment by the
//! consumer. The producer suspends between units, so a slow consumer
//! exerts backpressure instead of losing units.

use async_stream::stream;
use bytes::Bytes;
use futures::{pin_mut, Stream, StreamExt};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::trace;
use url::Url;

use crate::error::{Error, Result};

/// Decodes a byte stream into newline-delimited text records.
///
/// Each unit is one raw line including its terminating newline, delivered
/// in read order. A trailing fragment with no terminating newline is
/// discarded when the source ends.
pub fn decode_lines<S>(source: S) -> impl Stream<Item = Result<String>>
where
    S: Stream<Item = Result<Bytes>>,
{
    stream! {
        pin_mut!(source);
        let mut buf: Vec<u8> = Vec::new();
        'read: loop {
            match source.next().await {
                Some(Ok(chunk)) => {
                    buf.extend_from_slice(&chunk);
                    while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                        let rest = buf.split_off(pos + 1);
                        let line = std::mem::replace(&mut buf, rest);
                        yield Ok(String::from_utf8_lossy(&line).into_owned());
                    }
                }
                Some(Err(e)) => {
                    yield Err(e);
                    break 'read;
                }
                None => {
                    if !buf.is_empty() {
                        trace!(bytes = buf.len(), "discarding unterminated trailing fragment");
                    }
                    break 'read;
                }
            }
        }
    }
}

/// Decodes a byte stream of back-to-back JSON values into typed records.
///
/// Values rely on self-describing framing: no delimiter is required
/// between them, and a value split across transport chunks is yielded as
/// soon as its closing byte arrives. An incomplete value at end-of-stream
/// is a [`Error::Decode`].
pub fn decode_json<T, S>(source: S) -> impl Stream<Item = Result<T>>
where
    T: DeserializeOwned,
    S: Stream<Item = Result<Bytes>>,
{
    stream! {
        pin_mut!(source);
        let mut buf: Vec<u8> = Vec::new();
        'read: loop {
            match source.next().await {
                Some(Ok(chunk)) => {
                    buf.extend_from_slice(&chunk);
                    loop {
                        match next_value::<T>(&buf, false) {
                            Step::Value(value, consumed) => {
                                buf.drain(..consumed);
                                yield Ok(value);
                            }
                            Step::Incomplete => break,
                            Step::Fail(e) => {
                                yield Err(Error::Decode(e));
                                break 'read;
                            }
                        }
                    }
                }
                Some(Err(e)) => {
                    yield Err(e);
                    break 'read;
                }
                None => {
                    match next_value::<T>(&buf, true) {
                        Step::Value(value, _) => yield Ok(value),
                        Step::Incomplete => {}
                        Step::Fail(e) => yield Err(Error::Decode(e)),
                    }
                    break 'read;
                }
            }
        }
    }
}

enum Step<T> {
    /// A complete value and the number of bytes it consumed.
    Value(T, usize),
    /// Nothing left but whitespace, or nothing at all.
    Incomplete,
    Fail(serde_json::Error),
}

/// Pulls the next complete JSON value off the front of `buf`.
///
/// Mid-stream (`at_end == false`) a value cut off by the chunk boundary
/// reports `Incomplete` and the caller waits for more bytes; at
/// end-of-stream the same condition is a hard decode failure.
fn next_value<T: DeserializeOwned>(buf: &[u8], at_end: bool) -> Step<T> {
    let mut iter = serde_json::Deserializer::from_slice(buf).into_iter::<T>();
    match iter.next() {
        Some(Ok(value)) => Step::Value(value, iter.byte_offset()),
        Some(Err(e)) if e.is_eof() && !at_end => Step::Incomplete,
        Some(Err(e)) => Step::Fail(e),
        None => Step::Incomplete,
    }
}

/// A live, still-open response body plus its status metadata.
///
/// Returned by [`Call::stream`]; nothing is buffered. The caller owns the
/// body until it is exhausted or dropped, and dropping it (or any decoder
/// built from it) is the cancellation primitive: the connection is closed
/// and any in-progress read is unblocked.
///
/// [`Call::stream`]: crate::request::Call::stream
#[derive(Debug)]
pub struct BodyStream {
    response: reqwest::Response,
}

impl BodyStream {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        Self { response }
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.response.status().as_u16()
    }

    /// Canonical status text, e.g. `OK`.
    pub fn status_text(&self) -> &'static str {
        self.response.status().canonical_reason().unwrap_or("")
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }

    /// Final URL of the response.
    pub fn url(&self) -> &Url {
        self.response.url()
    }

    /// The raw body as a stream of byte chunks.
    pub fn bytes_stream(self) -> impl Stream<Item = Result<Bytes>> + Send {
        self.response
            .bytes_stream()
            .map(|item| item.map_err(Error::Transfer))
    }

    /// Decodes the body as newline-delimited text records.
    pub fn lines(self) -> impl Stream<Item = Result<String>> + Send {
        decode_lines(self.bytes_stream())
    }

    /// Decodes the body as back-to-back JSON values.
    pub fn json<T: DeserializeOwned + Send>(self) -> impl Stream<Item = Result<T>> + Send {
        decode_json(self.bytes_stream())
    }
}
