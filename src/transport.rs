//! Transport configuration and client construction.
//!
//! [`TransportConfig`] holds everything that shapes the underlying
//! connection-pooling client: whole-call timeout, TLS verification
//! policy, proxy policy and pool tuning. The client itself is built by
//! [`TransportConfig::build_client`]; a [`Request`] rebuilds it lazily
//! whenever its configuration changes.
//!
//! [`Request`]: crate::request::Request

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;

use crate::config;
use crate::error::{Error, Result};
use crate::proxy::{self, ProxyPolicy};

/// Mutable transport configuration for a request or session.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub(crate) timeout: Option<Duration>,
    pub(crate) connect_timeout: Duration,
    pub(crate) accept_invalid_certs: bool,
    pub(crate) proxy: ProxyPolicy,
    pub(crate) pool_max_idle_per_host: usize,
    pub(crate) pool_idle_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: config::CONNECT_TIMEOUT,
            accept_invalid_certs: false,
            proxy: ProxyPolicy::default(),
            pool_max_idle_per_host: config::POOL_MAX_IDLE_PER_HOST,
            pool_idle_timeout: config::POOL_IDLE_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Whole-call timeout, if one is set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Connect timeout for new connections.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Whether TLS certificate verification is bypassed.
    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    /// The active proxy policy.
    pub fn proxy(&self) -> &ProxyPolicy {
        &self.proxy
    }

    /// Builds a connection-pooling client from this configuration.
    ///
    /// `jar` attaches a session cookie store; plain requests pass `None`.
    /// The client is safe for concurrent use and is the one piece of
    /// state deliberately shared when it is handed to other instances.
    pub fn build_client(&self, jar: Option<Arc<Jar>>) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .pool_idle_timeout(self.pool_idle_timeout);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder = match &self.proxy {
            ProxyPolicy::System => builder,
            ProxyPolicy::Explicit(upstream) => {
                builder.proxy(reqwest::Proxy::all(upstream.url()).map_err(Error::Transfer)?)
            }
            ProxyPolicy::Environment => {
                builder.proxy(reqwest::Proxy::custom(|url| proxy::proxy_from_env(url)))
            }
            ProxyPolicy::Resolver(resolve) => {
                let resolve = Arc::clone(resolve);
                builder.proxy(reqwest::Proxy::custom(move |url| resolve(url)))
            }
            ProxyPolicy::Disabled => builder.no_proxy(),
        };

        if let Some(jar) = jar {
            builder = builder.cookie_provider(jar);
        }

        builder.build().map_err(Error::Transfer)
    }
}
