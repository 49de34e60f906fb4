//! Transport and hook traits.
//!
//! - [`Transport`] - executes a request and returns the raw response
//! - [`RequestModifier`] - adjusts every outgoing request before dispatch
//! - [`RequestRetrier`] - asks for a request to be sent again after a response
//!
//! The dispatch engine depends only on these traits; `courier` ships a hyper
//! based transport and a few hook implementations.

use std::future::Future;
use std::sync::Arc;

use crate::{BoxError, Request, Response, ResponseMetadata};

/// Executes HTTP requests.
///
/// Every call produces exactly one outcome: a response (with or without a
/// body) or an error. Errors should be [`crate::TransportError`]s; anything
/// else is reported to the caller as [`crate::RequestError::Unknown`].
pub trait Transport: Send + Sync {
    /// Execute an HTTP request and return the response.
    fn execute(&self, request: Request)
    -> impl Future<Output = Result<Response, BoxError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response, BoxError>> + Send {
        (**self).execute(request)
    }
}

/// Adjusts outgoing requests, e.g. to inject authentication headers.
pub trait RequestModifier: Send + Sync {
    /// Modify the request in place before it is dispatched.
    fn modify(&self, request: &mut Request);
}

impl<F> RequestModifier for F
where
    F: Fn(&mut Request) + Send + Sync,
{
    fn modify(&self, request: &mut Request) {
        self(request);
    }
}

/// Decides whether a request should be sent again after a response.
pub trait RequestRetrier: Send + Sync {
    /// Returns `true` to dispatch the request once more.
    fn should_retry(&self, request: &Request, response: &ResponseMetadata) -> bool;
}
