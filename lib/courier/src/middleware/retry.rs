//! Status based retry hook.

use courier_core::{Method, Request, RequestRetrier, ResponseMetadata};

/// Retries requests answered with a 5xx server error or 429 Too Many Requests.
///
/// The number of attempts is bounded by the client's `max_retries`.
///
/// # Example
///
/// ```ignore
/// use courier::Client;
/// use courier::middleware::StatusRetrier;
///
/// let client = Client::builder(transport)
///     .retrier(StatusRetrier::new().idempotent_only())
///     .max_retries(2)
///     .build();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusRetrier {
    idempotent_only: bool,
}

impl StatusRetrier {
    /// Create a retrier that retries every method.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            idempotent_only: false,
        }
    }

    /// Only retry idempotent methods (see [`Method::is_idempotent`]).
    #[must_use]
    pub const fn idempotent_only(mut self) -> Self {
        self.idempotent_only = true;
        self
    }

    const fn is_retryable_status(status: u16) -> bool {
        status >= 500 || status == 429
    }

    const fn is_retryable_method(&self, method: Method) -> bool {
        !self.idempotent_only || method.is_idempotent()
    }
}

impl RequestRetrier for StatusRetrier {
    fn should_retry(&self, request: &Request, response: &ResponseMetadata) -> bool {
        self.is_retryable_method(request.method()) && Self::is_retryable_status(response.status())
    }
}
