//! Sessions: requests with persistent cookie continuity.
//!
//! A [`Session`] is a [`Request`] whose transport carries an exclusively
//! owned cookie store. Cookies set by any response through the session
//! are merged into the store (replace-by-name-and-domain) and attached to
//! subsequent calls whose target matches by domain and path. The store is
//! never shared across sessions.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::request::{Content, Request, RequestBuilder};

/// A request entity with a persistent, session-scoped cookie store.
///
/// All of [`Request`]'s configuration and call surface is available
/// through deref; every call issued through the session participates in
/// cookie continuity automatically.
#[derive(Debug)]
pub struct Session {
    inner: Request,
    jar: Arc<Jar>,
}

impl Session {
    /// A session with transport defaults and an empty cookie store.
    pub fn new() -> Result<Self> {
        SessionBuilder::new().build()
    }

    /// Create a builder for configuring the session.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// POSTs a JSON login body and leaves the session pre-authenticated.
    ///
    /// Cookies returned by a successful login are persisted in the
    /// session store. A transport failure or non-success status fails the
    /// call ([`Error::AuthRejected`] for the latter) and leaves cookies
    /// from prior successful calls untouched.
    pub async fn json_auth<T: Serialize + ?Sized>(
        &mut self,
        url: impl Into<String>,
        body: &T,
    ) -> Result<Content> {
        let content = self.inner.post(url).json(body).send().await?;
        self.check_auth(content)
    }

    /// POSTs a form-encoded login body and leaves the session
    /// pre-authenticated. Same failure semantics as [`Session::json_auth`].
    pub async fn form_auth<I, K, V>(&mut self, url: impl Into<String>, pairs: I) -> Result<Content>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let content = self.inner.post(url).form(pairs).send().await?;
        self.check_auth(content)
    }

    fn check_auth(&self, content: Content) -> Result<Content> {
        if !content.is_success() {
            warn!(status = content.status(), "authentication rejected");
            return Err(Error::AuthRejected {
                status: content.status(),
            });
        }
        debug!("session authenticated");
        Ok(content)
    }

    /// The `Cookie` header this session would attach to a call against
    /// `url`, if any.
    pub fn cookie_header(&self, url: &Url) -> Option<String> {
        self.jar
            .cookies(url)
            .and_then(|value| value.to_str().ok().map(str::to_owned))
    }

    /// Seeds the store with a `Set-Cookie`-formatted cookie for `url`.
    pub fn add_cookie(&self, cookie: &str, url: &Url) {
        self.jar.add_cookie_str(cookie, url);
    }
}

impl Deref for Session {
    type Target = Request;

    fn deref(&self) -> &Request {
        &self.inner
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut Request {
        &mut self.inner
    }
}

/// Builder for [`Session`]. Mirrors [`RequestBuilder`]; the cookie store
/// is created at build time and owned by the resulting session alone.
///
/// There is deliberately no `client` option here: a caller-supplied
/// client would not carry the session's cookie store.
#[derive(Debug, Default)]
pub struct SessionBuilder {
    inner: RequestBuilder,
}

impl SessionBuilder {
    /// Create a new builder with transport defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole-call timeout covering connect, write and read.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Sets a default header for every call. Same-key: last write wins.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.inner = self.inner.header(name, value);
        self
    }

    /// Merges a set of default headers.
    pub fn headers<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.inner = self.inner.headers(pairs);
        self
    }

    /// HTTP basic auth on every call.
    pub fn basic_auth(mut self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.inner = self.inner.basic_auth(user, pass);
        self
    }

    /// Bearer-token auth on every call.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.inner = self.inner.bearer_auth(token);
        self
    }

    /// Routes every call through one fixed proxy.
    pub fn proxy(mut self, proxy: crate::proxy::Proxy) -> Self {
        self.inner = self.inner.proxy(proxy);
        self
    }

    /// Resolves the proxy from the environment, fresh per request.
    pub fn proxy_from_env(mut self) -> Self {
        self.inner = self.inner.proxy_from_env();
        self
    }

    /// Resolves the proxy with `resolver`, fresh per request.
    pub fn proxy_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&Url) -> Option<Url> + Send + Sync + 'static,
    {
        self.inner = self.inner.proxy_resolver(resolver);
        self
    }

    /// Disables proxying entirely.
    pub fn no_proxy(mut self) -> Self {
        self.inner = self.inner.no_proxy();
        self
    }

    /// Disables TLS certificate verification.
    pub fn danger_accept_invalid_certs(mut self) -> Self {
        self.inner = self.inner.danger_accept_invalid_certs();
        self
    }

    /// Builds the session with a fresh, exclusively owned cookie store.
    pub fn build(self) -> Result<Session> {
        let jar = Arc::new(Jar::default());
        let inner = self.inner.cookie_jar(Arc::clone(&jar)).build()?;
        Ok(Session { inner, jar })
    }
}
