//! Explicit checkout/checkin pools for bulk request issuance.
//!
//! A pool hands out exclusively owned instances; nothing is recycled
//! implicitly. Checkin closes the instance's idle connections before
//! storing it, so pooled instances never leak pooled sockets. Callers
//! must not check an instance back in while a stream consumer still holds
//! its body open.

use std::sync::{Mutex, PoisonError};

use tracing::warn;

use crate::error::Result;
use crate::request::Request;
use crate::session::Session;

/// Pool of [`Request`] instances.
pub struct RequestPool {
    idle: Mutex<Vec<Request>>,
    factory: Box<dyn Fn() -> Result<Request> + Send + Sync>,
}

impl RequestPool {
    /// A pool whose instances are built with transport defaults.
    pub fn new() -> Self {
        Self::with_factory(Request::new)
    }

    /// A pool building instances with `factory`, for pre-configured
    /// entities.
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Request> + Send + Sync + 'static,
    {
        Self {
            idle: Mutex::new(Vec::new()),
            factory: Box::new(factory),
        }
    }

    /// Takes exclusive ownership of an instance, reusing an idle one or
    /// building a fresh one.
    pub fn checkout(&self) -> Result<Request> {
        if let Some(request) = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
        {
            return Ok(request);
        }
        (self.factory)()
    }

    /// Returns an instance to the pool after releasing its idle
    /// connections. An instance whose transport cannot be rebuilt is
    /// dropped instead of pooled.
    pub fn checkin(&self, mut request: Request) {
        if let Err(error) = request.close_idle_connections() {
            warn!(%error, "dropping pooled instance: transport rebuild failed");
            return;
        }
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }

    /// Number of idle instances currently held.
    pub fn idle_count(&self) -> usize {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for RequestPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Pool of [`Session`] instances.
///
/// A checked-in session keeps its cookie store; check out a fresh
/// instance instead when cookie isolation matters.
pub struct SessionPool {
    idle: Mutex<Vec<Session>>,
    factory: Box<dyn Fn() -> Result<Session> + Send + Sync>,
}

impl SessionPool {
    /// A pool whose sessions are built with transport defaults.
    pub fn new() -> Self {
        Self::with_factory(Session::new)
    }

    /// A pool building sessions with `factory`.
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Session> + Send + Sync + 'static,
    {
        Self {
            idle: Mutex::new(Vec::new()),
            factory: Box::new(factory),
        }
    }

    /// Takes exclusive ownership of a session.
    pub fn checkout(&self) -> Result<Session> {
        if let Some(session) = self
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
        {
            return Ok(session);
        }
        (self.factory)()
    }

    /// Returns a session to the pool after releasing its idle
    /// connections.
    pub fn checkin(&self, mut session: Session) {
        if let Err(error) = session.close_idle_connections() {
            warn!(%error, "dropping pooled session: transport rebuild failed");
            return;
        }
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(session);
    }

    /// Number of idle sessions currently held.
    pub fn idle_count(&self) -> usize {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Default for SessionPool {
    fn default() -> Self {
        Self::new()
    }
}
