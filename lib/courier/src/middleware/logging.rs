//! Transport-level logging middleware.
//!
//! Emits one event per attempt that reaches the wire, inside the caller's
//! span. The dispatch engine already opens an `http_request` span carrying the
//! method, URL, body size, status and elapsed time, so retried attempts show
//! up as several events under the same request.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use courier_core::{Request, Response, TransportError};
use tower::{Layer, Service};
use tracing::{debug, info, warn};

/// Layer that logs each attempt of the transport stack.
///
/// # Example
///
/// ```ignore
/// use courier::HyperTransport;
/// use courier::middleware::LoggingLayer;
///
/// let transport = HyperTransport::builder()
///     .layer(LoggingLayer::new())
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Verbosity of [`LoggingLayer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Also log request and response headers, at debug level.
    Debug,
    /// Only log the outcome of each attempt.
    #[default]
    Info,
}

impl LoggingLayer {
    /// Logging layer at info level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Logging layer that also logs headers.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }

    /// The configured level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

fn log_outcome(level: LogLevel, result: &Result<Response, TransportError>) {
    match result {
        Ok(response) if response.metadata().is_success() => {
            info!(status = response.status(), "attempt answered");
        }
        Ok(response) => {
            warn!(status = response.status(), "attempt answered with error status");
        }
        Err(error) => warn!(%error, "attempt failed"),
    }
    if level == LogLevel::Debug
        && let Ok(response) = result
    {
        debug!(headers = ?response.metadata().headers(), "response headers");
    }
}

impl<S> Service<Request> for Logging<S>
where
    S: Service<Request, Response = Response, Error = TransportError> + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Response, TransportError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), TransportError>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let level = self.level;
        if level == LogLevel::Debug {
            debug!(headers = ?request.headers(), "request headers");
        }

        let attempt = self.inner.call(request);
        Box::pin(async move {
            let result = attempt.await;
            log_outcome(level, &result);
            result
        })
    }
}
