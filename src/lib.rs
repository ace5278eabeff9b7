//! # requests
//!
//! An async HTTP client runtime: request/session entities with mutable
//! transport configuration, proxy resolution, rate-limited transfer, and
//! streaming response decoding.
//!
//! The underlying connection transport (TCP/TLS dialing, protocol
//! negotiation, connection pooling) is `reqwest`; this crate configures
//! it and layers the call surface on top.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use requests::{Request, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut request = Request::builder()
//!         .timeout(std::time::Duration::from_secs(10))
//!         .header("user-agent", "requests-demo")
//!         .build()?;
//!
//!     let content = request
//!         .get("https://httpbin.org/get")
//!         .query([("q", "rust")])
//!         .send()
//!         .await?;
//!
//!     println!("{} {}", content.status(), content.text());
//!     Ok(())
//! }
//! ```
//!
//! ## Sessions
//!
//! A [`Session`] carries cookies across calls:
//!
//! ```rust,no_run
//! # async fn example() -> requests::Result<()> {
//! use requests::Session;
//!
//! let mut session = Session::new()?;
//! session
//!     .json_auth("https://example.com/login", &serde_json::json!({
//!         "user": "u",
//!         "pass": "p",
//!     }))
//!     .await?;
//!
//! // Subsequent calls attach the login cookies automatically.
//! let profile = session.get("https://example.com/profile").send().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Streaming
//!
//! ```rust,no_run
//! # async fn example() -> requests::Result<()> {
//! use futures::{pin_mut, StreamExt};
//! use requests::Request;
//!
//! let mut request = Request::new()?;
//! let body = request.get("https://example.com/events").stream().await?;
//! let lines = body.lines();
//! pin_mut!(lines);
//! while let Some(line) = lines.next().await {
//!     print!("{}", line?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod limit;
pub mod pool;
pub mod proxy;
pub mod request;
pub mod session;
pub mod stream;
pub mod transport;

// Re-exports for ergonomic usage
pub use error::{Error, Result};
pub use limit::{throttle, RateLimiter};
pub use pool::{RequestPool, SessionPool};
pub use proxy::{clear_proxy_env, Proxy, ProxyPolicy, ProxyScheme};
pub use request::{Call, Content, Request, RequestBuilder, Upload};
pub use session::{Session, SessionBuilder};
pub use stream::{decode_json, decode_lines, BodyStream};
pub use transport::TransportConfig;
