//! The Request entity: per-call construction, dispatch, and capture.
//!
//! A [`Request`] owns one transport configuration plus the most recent
//! result of a call made through it. Every call takes `&mut self`, so the
//! single-call-at-a-time contract is enforced by the borrow checker: two
//! logical calls cannot be in flight on one instance. Callers that need
//! concurrency use independent instances or a [`RequestPool`].
//!
//! [`RequestPool`]: crate::pool::RequestPool

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::StreamExt;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};
use url::Url;

use crate::config;
use crate::error::{Error, Result};
use crate::limit::{throttle, RateLimiter};
use crate::proxy::{Proxy, ProxyPolicy};
use crate::stream::BodyStream;
use crate::transport::TransportConfig;

/// Credentials attached to every call made through an entity.
#[derive(Debug, Clone)]
pub(crate) enum Auth {
    Basic { user: String, pass: String },
    Bearer(String),
}

/// An immutable capture of one completed response: status metadata plus
/// the fully buffered body.
#[derive(Debug, Clone)]
pub struct Content {
    pub(crate) status: reqwest::StatusCode,
    pub(crate) headers: HeaderMap,
    pub(crate) url: Url,
    pub(crate) body: Bytes,
}

impl Content {
    /// Raw body bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body as text. Invalid UTF-8 is replaced, not rejected.
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Structured decode of the body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::Decode)
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Canonical status text, e.g. `OK`.
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Final URL of the response.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// Builder for [`Request`].
///
/// Options are applied in order; later options override earlier ones that
/// touch the same setting (header keys, proxy policy, timeout, client).
#[derive(Debug, Default)]
pub struct RequestBuilder {
    config: TransportConfig,
    headers: HeaderMap,
    auth: Option<Auth>,
    client: Option<reqwest::Client>,
    jar: Option<Arc<Jar>>,
}

impl RequestBuilder {
    /// Create a new builder with transport defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole-call timeout covering connect, write and read.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Sets a default header for every call. Same-key: last write wins.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        insert_header(&mut self.headers, name, value);
        self
    }

    /// Merges a set of default headers.
    pub fn headers<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in pairs {
            insert_header(&mut self.headers, name.as_ref(), value.as_ref());
        }
        self
    }

    /// HTTP basic auth on every call.
    pub fn basic_auth(mut self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.auth = Some(Auth::Basic {
            user: user.into(),
            pass: pass.into(),
        });
        self
    }

    /// Bearer-token auth on every call.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(Auth::Bearer(token.into()));
        self
    }

    /// Routes every call through one fixed proxy.
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.config.proxy = ProxyPolicy::Explicit(proxy);
        self
    }

    /// Resolves the proxy from `HTTP_PROXY`/`HTTPS_PROXY` (and lowercase
    /// variants) fresh on every outgoing request. Process-wide input; see
    /// [`ProxyPolicy::Environment`].
    pub fn proxy_from_env(mut self) -> Self {
        self.config.proxy = ProxyPolicy::Environment;
        self
    }

    /// Resolves the proxy with `resolver`, invoked fresh on every
    /// outgoing request.
    pub fn proxy_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&Url) -> Option<Url> + Send + Sync + 'static,
    {
        self.config.proxy = ProxyPolicy::Resolver(Arc::new(resolver));
        self
    }

    /// Disables proxying entirely.
    pub fn no_proxy(mut self) -> Self {
        self.config.proxy = ProxyPolicy::Disabled;
        self
    }

    /// Disables TLS certificate verification.
    pub fn danger_accept_invalid_certs(mut self) -> Self {
        self.config.accept_invalid_certs = true;
        self
    }

    /// Replaces the transport-capable client wholesale. The transport
    /// configuration is ignored until a configuration knob is touched
    /// again, which rebuilds from config.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub(crate) fn cookie_jar(mut self, jar: Arc<Jar>) -> Self {
        self.jar = Some(jar);
        self
    }

    /// Builds the request entity.
    pub fn build(self) -> Result<Request> {
        let client = match self.client {
            Some(client) => client,
            None => self.config.build_client(self.jar.clone())?,
        };
        Ok(Request {
            config: self.config,
            client,
            dirty: false,
            headers: self.headers,
            auth: self.auth,
            jar: self.jar,
            last: None,
        })
    }
}

/// A single-call-at-a-time HTTP request entity.
///
/// Construction applies ordered configuration options; afterwards the
/// transport configuration can be mutated in place, and the client is
/// rebuilt lazily before the next dispatch. The most recent completed
/// call's [`Content`] is retained until the next dispatch overwrites it.
pub struct Request {
    pub(crate) config: TransportConfig,
    pub(crate) client: reqwest::Client,
    pub(crate) dirty: bool,
    pub(crate) headers: HeaderMap,
    pub(crate) auth: Option<Auth>,
    pub(crate) jar: Option<Arc<Jar>>,
    pub(crate) last: Option<Content>,
}

impl Request {
    /// A request entity with transport defaults.
    pub fn new() -> Result<Self> {
        RequestBuilder::new().build()
    }

    /// Create a builder for configuring the entity.
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    // ── Transport configuration ──────────────────────────────────────────

    /// Sets the whole-call timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.config.timeout = Some(timeout);
        self.dirty = true;
    }

    /// Sets a default header. Same-key: last write wins.
    pub fn set_header(&mut self, name: &str, value: &str) {
        insert_header(&mut self.headers, name, value);
    }

    /// HTTP basic auth on every subsequent call.
    pub fn set_basic_auth(&mut self, user: impl Into<String>, pass: impl Into<String>) {
        self.auth = Some(Auth::Basic {
            user: user.into(),
            pass: pass.into(),
        });
    }

    /// Bearer-token auth on every subsequent call.
    pub fn set_bearer_auth(&mut self, token: impl Into<String>) {
        self.auth = Some(Auth::Bearer(token.into()));
    }

    /// Routes subsequent calls through one fixed proxy.
    pub fn set_proxy(&mut self, proxy: Proxy) {
        self.config.proxy = ProxyPolicy::Explicit(proxy);
        self.dirty = true;
    }

    /// Resolves the proxy from the environment, fresh per request.
    pub fn set_proxy_from_env(&mut self) {
        self.config.proxy = ProxyPolicy::Environment;
        self.dirty = true;
    }

    /// Resolves the proxy with `resolver`, fresh per request.
    pub fn set_proxy_resolver<F>(&mut self, resolver: F)
    where
        F: Fn(&Url) -> Option<Url> + Send + Sync + 'static,
    {
        self.config.proxy = ProxyPolicy::Resolver(Arc::new(resolver));
        self.dirty = true;
    }

    /// Clears every proxy mechanism and disables proxying for subsequent
    /// calls on this entity.
    pub fn unset_proxy(&mut self) {
        self.config.proxy = ProxyPolicy::Disabled;
        self.dirty = true;
    }

    /// Toggles TLS certificate verification bypass.
    pub fn set_danger_accept_invalid_certs(&mut self, accept: bool) {
        self.config.accept_invalid_certs = accept;
        self.dirty = true;
    }

    /// Replaces the transport-capable client wholesale.
    ///
    /// For a session entity the replacement client does not carry the
    /// session's cookie store; cookie continuity resumes once a
    /// configuration knob triggers a rebuild.
    pub fn set_client(&mut self, client: reqwest::Client) {
        self.client = client;
        self.dirty = false;
    }

    /// The current transport configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Releases pooled idle connections held by the underlying transport
    /// by rebuilding it. Call before returning an entity to a reuse pool.
    pub fn close_idle_connections(&mut self) -> Result<()> {
        self.client = self.config.build_client(self.jar.clone())?;
        self.dirty = false;
        Ok(())
    }

    pub(crate) fn client(&mut self) -> Result<&reqwest::Client> {
        if self.dirty {
            self.client = self.config.build_client(self.jar.clone())?;
            self.dirty = false;
        }
        Ok(&self.client)
    }

    // ── Calls ────────────────────────────────────────────────────────────

    /// Starts a GET call.
    pub fn get(&mut self, url: impl Into<String>) -> Call<'_> {
        self.call(Method::GET, url)
    }

    /// Starts a POST call.
    pub fn post(&mut self, url: impl Into<String>) -> Call<'_> {
        self.call(Method::POST, url)
    }

    /// Starts a PUT call.
    pub fn put(&mut self, url: impl Into<String>) -> Call<'_> {
        self.call(Method::PUT, url)
    }

    /// Starts a PATCH call.
    pub fn patch(&mut self, url: impl Into<String>) -> Call<'_> {
        self.call(Method::PATCH, url)
    }

    /// Starts a DELETE call.
    pub fn delete(&mut self, url: impl Into<String>) -> Call<'_> {
        self.call(Method::DELETE, url)
    }

    /// Starts a call with an explicit method.
    pub fn call(&mut self, method: Method, url: impl Into<String>) -> Call<'_> {
        Call {
            req: self,
            method,
            url: url.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            encode_error: None,
            rate: 0,
        }
    }

    /// Starts a multipart upload.
    pub fn upload(&mut self, url: impl Into<String>) -> Upload<'_> {
        Upload {
            req: self,
            url: url.into(),
            fields: Vec::new(),
            file_field: config::DEFAULT_FILE_FIELD.to_string(),
            files: Vec::new(),
            rate: 0,
        }
    }

    /// Downloads `url` into `dest`, throttled to `bytes_per_sec` (0 for
    /// unthrottled). Returns the number of bytes transferred.
    pub async fn download(
        &mut self,
        url: impl Into<String>,
        dest: impl AsRef<Path>,
        bytes_per_sec: u64,
    ) -> Result<u64> {
        self.get(url).rate_limit(bytes_per_sec).download_to(dest).await
    }

    /// The most recent completed call's capture, if any.
    pub fn last_response(&self) -> Option<&Content> {
        self.last.as_ref()
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("config", &self.config)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// One outgoing call under construction.
///
/// Per-call options layer on top of the entity's defaults; a per-call
/// header with the same key as a default header wins.
#[must_use = "a call does nothing until sent"]
pub struct Call<'a> {
    req: &'a mut Request,
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<CallBody>,
    encode_error: Option<Error>,
    rate: u64,
}

enum CallBody {
    Json(Vec<u8>),
    Form(Vec<(String, String)>),
    Raw(Bytes),
}

impl<'a> Call<'a> {
    /// Appends query parameters to the target URL.
    pub fn query<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Adds a per-call header.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        insert_header(&mut self.headers, name, value);
        self
    }

    /// JSON body, sent as `application/json;charset=utf-8`.
    ///
    /// Serialization happens immediately; a failure surfaces as
    /// [`Error::Encoding`] when the call is sent, before any network
    /// activity.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match serde_json::to_vec(body) {
            Ok(encoded) => self.body = Some(CallBody::Json(encoded)),
            Err(e) => self.encode_error = Some(Error::Encoding(e)),
        }
        self
    }

    /// Form body, sent as `application/x-www-form-urlencoded`.
    pub fn form<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.body = Some(CallBody::Form(
            pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        ));
        self
    }

    /// Raw body bytes.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(CallBody::Raw(body.into()));
        self
    }

    /// Caps download throughput for [`Call::download_to`] at
    /// `bytes_per_sec`. Zero disables limiting (the default).
    pub fn rate_limit(mut self, bytes_per_sec: u64) -> Self {
        self.rate = bytes_per_sec;
        self
    }

    /// Validates, dispatches, and returns the raw response. Clears the
    /// entity's previous capture first, so a failed call never leaves
    /// stale content behind.
    async fn dispatch(&mut self) -> Result<reqwest::Response> {
        self.req.last = None;

        if let Some(err) = self.encode_error.take() {
            return Err(err);
        }

        let mut url =
            Url::parse(&self.url).map_err(|e| Error::invalid_url(self.url.clone(), e))?;
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        debug!(method = %self.method, url = %url, "dispatching");

        let mut rb = {
            let client = self.req.client()?;
            client.request(self.method.clone(), url)
        };
        rb = rb.headers(self.req.headers.clone());
        rb = apply_auth(rb, &self.req.auth);
        if !self.headers.is_empty() {
            rb = rb.headers(self.headers.clone());
        }

        match self.body.take() {
            Some(CallBody::Json(encoded)) => {
                rb = rb
                    .header(CONTENT_TYPE, config::CONTENT_TYPE_JSON)
                    .body(encoded);
            }
            Some(CallBody::Form(pairs)) => {
                rb = rb.form(&pairs);
            }
            Some(CallBody::Raw(body)) => {
                rb = rb.body(body);
            }
            None => {}
        }

        match rb.send().await {
            Ok(response) => Ok(response),
            Err(e) => {
                warn!(error = %e, "transfer failed");
                Err(Error::Transfer(e))
            }
        }
    }

    /// Sends the call and buffers the full response body into memory.
    ///
    /// A non-success status is not an error; read it from the returned
    /// [`Content`].
    pub async fn send(mut self) -> Result<Content> {
        let response = self.dispatch().await?;
        capture(self.req, response).await
    }

    /// Sends the call and hands back the live body without buffering.
    ///
    /// The caller (or a decoder built from the [`BodyStream`]) owns the
    /// body until it is exhausted or dropped.
    pub async fn stream(mut self) -> Result<BodyStream> {
        let response = self.dispatch().await?;
        Ok(BodyStream::new(response))
    }

    /// Sends the call and streams the body into a file, creating or
    /// truncating it first. Returns the number of bytes transferred.
    pub async fn download_to(mut self, dest: impl AsRef<Path>) -> Result<u64> {
        let dest = dest.as_ref();
        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| Error::file_access(dest, e))?;

        let limiter = RateLimiter::new(self.rate);
        let response = self.dispatch().await?;
        let source = response
            .bytes_stream()
            .map(|item| item.map_err(Error::Transfer));
        let mut throttled = throttle(source, limiter);

        let mut transferred = 0u64;
        while let Some(chunk) = throttled.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)
                .await
                .map_err(|e| Error::file_access(dest, e))?;
            transferred += chunk.len() as u64;
        }
        file.flush()
            .await
            .map_err(|e| Error::file_access(dest, e))?;

        debug!(bytes = transferred, path = %dest.display(), "download complete");
        Ok(transferred)
    }
}

/// A multipart upload under construction: text fields plus local files
/// streamed under a configurable field name.
#[must_use = "an upload does nothing until sent"]
pub struct Upload<'a> {
    req: &'a mut Request,
    url: String,
    fields: Vec<(String, String)>,
    file_field: String,
    files: Vec<PathBuf>,
    rate: u64,
}

impl<'a> Upload<'a> {
    /// Adds a text field.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Adds several text fields.
    pub fn fields<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.fields
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// The multipart field name used for file parts (default `file`).
    pub fn file_field(mut self, name: impl Into<String>) -> Self {
        self.file_field = name.into();
        self
    }

    /// Adds a local file to upload.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Adds several local files.
    pub fn files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Caps upload throughput at `bytes_per_sec`, shared across all file
    /// parts. Zero disables limiting (the default).
    pub fn rate_limit(mut self, bytes_per_sec: u64) -> Self {
        self.rate = bytes_per_sec;
        self
    }

    /// Sends the upload as a POST with a `multipart/form-data` body.
    ///
    /// Every listed file is opened before dispatch; a missing or
    /// unreadable file aborts with [`Error::FileAccess`] before any bytes
    /// are sent.
    pub async fn send(self) -> Result<Content> {
        self.req.last = None;

        let url = Url::parse(&self.url).map_err(|e| Error::invalid_url(self.url.clone(), e))?;
        let limiter = RateLimiter::new(self.rate);

        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }

        for path in &self.files {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|e| Error::file_access(path, e))?;
            let len = file
                .metadata()
                .await
                .map_err(|e| Error::file_access(path, e))?
                .len();
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.file_field.clone());

            let source = throttle(ReaderStream::new(file), limiter.clone());
            let part = reqwest::multipart::Part::stream_with_length(
                reqwest::Body::wrap_stream(source),
                len,
            )
            .file_name(file_name);
            form = form.part(self.file_field.clone(), part);
        }

        debug!(url = %url, files = self.files.len(), "dispatching upload");

        let mut rb = {
            let client = self.req.client()?;
            client.request(Method::POST, url)
        };
        rb = rb.headers(self.req.headers.clone());
        rb = apply_auth(rb, &self.req.auth);

        match rb.multipart(form).send().await {
            Ok(response) => capture(self.req, response).await,
            Err(e) => {
                warn!(error = %e, "transfer failed");
                Err(Error::Transfer(e))
            }
        }
    }
}

fn apply_auth(rb: reqwest::RequestBuilder, auth: &Option<Auth>) -> reqwest::RequestBuilder {
    match auth {
        Some(Auth::Basic { user, pass }) => rb.basic_auth(user, Some(pass)),
        Some(Auth::Bearer(token)) => rb.bearer_auth(token),
        None => rb,
    }
}

/// Buffers a response into a [`Content`] and records it on the entity.
async fn capture(req: &mut Request, response: reqwest::Response) -> Result<Content> {
    let status = response.status();
    let headers = response.headers().clone();
    let url = response.url().clone();
    let body = response.bytes().await.map_err(Error::Transfer)?;

    let content = Content {
        status,
        headers,
        url,
        body,
    };
    req.last = Some(content.clone());
    Ok(content)
}

pub(crate) fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) {
    match (HeaderName::try_from(name), HeaderValue::from_str(value)) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => warn!(header = name, "ignoring invalid header"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_header_last_write_wins() {
        let request = Request::builder()
            .header("x-token", "first")
            .header("x-token", "second")
            .build()
            .unwrap();
        assert_eq!(request.headers.get("x-token").unwrap(), "second");
    }

    #[test]
    fn test_builder_applies_options_in_order() {
        let request = Request::builder()
            .timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(9))
            .proxy(Proxy::http("127.0.0.1:3128"))
            .no_proxy()
            .build()
            .unwrap();
        assert_eq!(request.config().timeout(), Some(Duration::from_secs(9)));
        assert!(matches!(request.config().proxy(), ProxyPolicy::Disabled));
    }

    #[test]
    fn test_set_header_replaces_same_key() {
        let mut request = Request::new().unwrap();
        request.set_header("accept", "text/plain");
        request.set_header("accept", "application/json");
        assert_eq!(request.headers.get("accept").unwrap(), "application/json");
    }

    #[test]
    fn test_invalid_header_is_ignored() {
        let mut request = Request::new().unwrap();
        request.set_header("bad header name", "value");
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_config_mutation_marks_client_dirty() {
        let mut request = Request::new().unwrap();
        assert!(!request.dirty);
        request.set_timeout(Duration::from_secs(3));
        assert!(request.dirty);
        request.client().unwrap();
        assert!(!request.dirty);
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_any_network() {
        let mut request = Request::new().unwrap();
        let err = request.get("not a url").send().await.unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
        assert!(request.last_response().is_none());
    }

    #[tokio::test]
    async fn test_unserializable_json_body_is_encoding_error() {
        // Non-string map keys cannot be encoded as JSON object keys.
        let mut bad = std::collections::HashMap::new();
        bad.insert(vec![1u8], "x");

        let mut request = Request::new().unwrap();
        let err = request
            .post("http://localhost/ignored")
            .json(&bad)
            .send()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[tokio::test]
    async fn test_upload_missing_file_aborts_before_dispatch() {
        let mut request = Request::new().unwrap();
        let err = request
            .upload("http://localhost/ignored")
            .file("/definitely/not/here.bin")
            .send()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FileAccess { .. }));
    }
}
