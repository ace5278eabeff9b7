//! Token-bucket rate limiting for upload and download transfer.
//!
//! A [`RateLimiter`] caps sustained throughput to a configured rate in
//! bytes per second, with burst capacity equal to one second of rate by
//! default. [`throttle`] wraps any byte stream so that chunks are paced
//! through the bucket without otherwise altering the underlying I/O.

use std::num::NonZeroU64;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_stream::stream;
use bytes::Bytes;
use futures::{pin_mut, Stream, StreamExt};
use tokio::time::{sleep, Instant};

/// Token-bucket state: capacity `C`, fill rate `R` bytes/sec, level `L`.
///
/// Reserving `n` bytes deducts immediately when `L >= n`; otherwise the
/// caller owes a deterministic wait of `(n - L) / R` seconds and the
/// bucket goes into debt, so concurrent reservations pace cumulatively.
#[derive(Debug)]
struct Bucket {
    rate: f64,
    capacity: f64,
    available: f64,
    last_refill: Instant,
}

impl Bucket {
    fn reserve(&mut self, n: u64) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.available = (self.available + elapsed * self.rate).min(self.capacity);
        self.last_refill = now;

        self.available -= n as f64;
        if self.available >= 0.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(-self.available / self.rate)
        }
    }
}

/// Cheaply clonable throughput limiter.
///
/// Clones share one bucket, so a single limiter can pace several byte
/// streams (e.g. the file parts of one multipart upload) against the
/// same budget.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    bucket: Arc<Mutex<Bucket>>,
}

impl RateLimiter {
    /// A limiter for `bytes_per_sec`, with burst capacity of one second
    /// of rate. Returns `None` for a zero rate: a non-positive rate means
    /// "no limiting" and must bypass the bucket entirely.
    pub fn new(bytes_per_sec: u64) -> Option<Self> {
        let rate = NonZeroU64::new(bytes_per_sec)?;
        Some(Self::with_capacity(rate, rate.get()))
    }

    /// A limiter with an explicit burst capacity in bytes.
    pub fn with_capacity(bytes_per_sec: NonZeroU64, capacity: u64) -> Self {
        let rate = bytes_per_sec.get() as f64;
        Self {
            bucket: Arc::new(Mutex::new(Bucket {
                rate,
                capacity: capacity as f64,
                available: capacity as f64,
                last_refill: Instant::now(),
            })),
        }
    }

    /// Waits until `n` bytes may pass.
    ///
    /// Returns immediately while the bucket holds enough tokens; once
    /// exhausted, sleeps for the deterministic deficit time.
    pub async fn acquire(&self, n: u64) {
        let wait = {
            let mut bucket = self
                .bucket
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            bucket.reserve(n)
        };
        if !wait.is_zero() {
            sleep(wait).await;
        }
    }
}

/// Wraps a byte stream so each chunk passes through the limiter before it
/// is yielded. With no limiter the source is returned untouched: the
/// unthrottled path has zero bucket overhead.
///
/// Error items pass through unpaced; only successfully read bytes count
/// against the budget.
pub fn throttle<S, E>(
    source: S,
    limiter: Option<RateLimiter>,
) -> Pin<Box<dyn Stream<Item = Result<Bytes, E>> + Send>>
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Send + 'static,
{
    let Some(limiter) = limiter else {
        return Box::pin(source);
    };

    Box::pin(stream! {
        pin_mut!(source);
        while let Some(item) = source.next().await {
            if let Ok(chunk) = &item {
                limiter.acquire(chunk.len() as u64).await;
            }
            yield item;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};

    #[tokio::test(start_paused = true)]
    async fn test_burst_within_capacity_is_immediate() {
        let limiter = RateLimiter::new(1000).unwrap();
        let start = Instant::now();
        limiter.acquire(1000).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overdraft_waits_deficit_over_rate() {
        // C = 100, R = 100: taking 350 owes (350 - 100) / 100 = 2.5s.
        let limiter = RateLimiter::new(100).unwrap();
        let start = Instant::now();
        limiter.acquire(350).await;
        assert!(start.elapsed() >= Duration::from_millis(2490));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequential_acquires_pace_cumulatively() {
        let limiter = RateLimiter::new(100).unwrap();
        let start = Instant::now();
        limiter.acquire(100).await; // burst, free
        limiter.acquire(100).await; // 1s
        limiter.acquire(100).await; // 1s
        assert!(start.elapsed() >= Duration::from_millis(1990));
    }

    #[test]
    fn test_zero_rate_builds_no_bucket() {
        assert!(RateLimiter::new(0).is_none());
    }

    fn chunks(sizes: &[usize]) -> Vec<Result<Bytes>> {
        sizes
            .iter()
            .map(|&n| Ok(Bytes::from(vec![0u8; n])))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttled_stream_paces_chunks() {
        let source = futures::stream::iter(chunks(&[100, 100, 100]));
        let mut throttled = throttle(source, RateLimiter::new(100));

        let start = Instant::now();
        let mut total = 0usize;
        while let Some(item) = throttled.next().await {
            total += item.unwrap().len();
        }
        assert_eq!(total, 300);
        // 300 bytes through a 100 B/s bucket with 100 B burst: >= 2s.
        assert!(start.elapsed() >= Duration::from_millis(1990));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_limiter_is_passthrough() {
        let source = futures::stream::iter(chunks(&[4096, 4096]));
        let mut unthrottled = throttle::<_, Error>(source, None);

        let start = Instant::now();
        let mut total = 0usize;
        while let Some(item) = unthrottled.next().await {
            total += item.unwrap().len();
        }
        assert_eq!(total, 8192);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
