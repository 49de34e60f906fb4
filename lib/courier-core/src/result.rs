//! The value every request resolves to.

use crate::{RequestError, ResponseMetadata};

/// Outcome of one request: a decoded success body, or a [`RequestError`].
///
/// `S` is the success payload type and `F` the error payload type carried by
/// [`RequestError::Api`].
#[derive(Debug)]
pub enum RequestResult<S, F> {
    /// The response status was successful and its body decoded as `S`.
    Success {
        /// Status, headers and URL of the response.
        metadata: ResponseMetadata,
        /// Decoded success payload.
        body: S,
    },
    /// The request failed; see [`RequestError`] for the possible reasons.
    Failure(RequestError<F>),
}

impl<S, F> RequestResult<S, F> {
    /// Returns `true` for [`RequestResult::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns `true` for [`RequestResult::Failure`].
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Success payload, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&S> {
        match self {
            Self::Success { body, .. } => Some(body),
            Self::Failure(_) => None,
        }
    }

    /// Failure reason, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&RequestError<F>> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Response metadata, available on success and on API errors.
    #[must_use]
    pub const fn metadata(&self) -> Option<&ResponseMetadata> {
        match self {
            Self::Success { metadata, .. } | Self::Failure(RequestError::Api { metadata, .. }) => {
                Some(metadata)
            }
            Self::Failure(_) => None,
        }
    }

    /// Convert into a standard [`Result`].
    pub fn into_result(self) -> Result<(ResponseMetadata, S), RequestError<F>> {
        match self {
            Self::Success { metadata, body } => Ok((metadata, body)),
            Self::Failure(error) => Err(error),
        }
    }

    /// Split into optional parts; exactly one of body and error is `Some`.
    ///
    /// The metadata is only returned for a success.
    #[must_use]
    pub fn into_parts(self) -> (Option<ResponseMetadata>, Option<S>, Option<RequestError<F>>) {
        match self {
            Self::Success { metadata, body } => (Some(metadata), Some(body), None),
            Self::Failure(error) => (None, None, Some(error)),
        }
    }

    /// Transform the success payload with a function.
    pub fn map<T>(self, f: impl FnOnce(S) -> T) -> RequestResult<T, F> {
        match self {
            Self::Success { metadata, body } => RequestResult::Success {
                metadata,
                body: f(body),
            },
            Self::Failure(error) => RequestResult::Failure(error),
        }
    }

    /// Transform the API error payload with a function.
    pub fn map_failure<G>(self, f: impl FnOnce(F) -> G) -> RequestResult<S, G> {
        match self {
            Self::Success { metadata, body } => RequestResult::Success { metadata, body },
            Self::Failure(error) => RequestResult::Failure(error.map_body(f)),
        }
    }
}

impl<S, F> From<RequestError<F>> for RequestResult<S, F> {
    fn from(error: RequestError<F>) -> Self {
        Self::Failure(error)
    }
}

impl<S, F> From<RequestResult<S, F>> for Result<(ResponseMetadata, S), RequestError<F>> {
    fn from(result: RequestResult<S, F>) -> Self {
        result.into_result()
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;
    use crate::{HeaderFields, TransportError};

    fn metadata(status: u16) -> ResponseMetadata {
        let url = url::Url::parse("https://api.test.com/Test").expect("valid URL");
        ResponseMetadata::new(status, HeaderFields::new(), url)
    }

    #[test]
    fn success_accessors() {
        let result: RequestResult<&str, ()> = RequestResult::Success {
            metadata: metadata(200),
            body: "ok",
        };

        check!(result.is_success());
        check!(!result.is_failure());
        check!(result.body() == Some(&"ok"));
        check!(result.error().is_none());
        check!(result.metadata().map(ResponseMetadata::status) == Some(200));
    }

    #[test]
    fn failure_accessors() {
        let result: RequestResult<(), &str> = RequestResult::Failure(RequestError::Api {
            metadata: metadata(400),
            body: "bad",
        });

        check!(result.is_failure());
        check!(result.body().is_none());
        check!(result.metadata().map(ResponseMetadata::status) == Some(400));

        let transport: RequestResult<(), ()> = RequestError::from(TransportError::Timeout).into();
        check!(transport.metadata().is_none());
        let_assert!(Some(RequestError::Transport(TransportError::Timeout)) = transport.error());
    }

    #[test]
    fn into_parts_has_exactly_one_payload() {
        let success: RequestResult<u8, ()> = RequestResult::Success {
            metadata: metadata(201),
            body: 1,
        };
        let (metadata, body, error) = success.into_parts();
        check!(metadata.is_some());
        check!(body == Some(1));
        check!(error.is_none());

        let failure: RequestResult<u8, ()> = RequestError::Transport(TransportError::Timeout).into();
        let (metadata, body, error) = failure.into_parts();
        check!(metadata.is_none());
        check!(body.is_none());
        check!(error.is_some());
    }

    #[test]
    fn map_payloads() {
        let success: RequestResult<u8, u8> = RequestResult::Success {
            metadata: metadata(200),
            body: 2,
        };
        check!(success.map(|n| n * 10).body() == Some(&20));

        let failure: RequestResult<u8, u8> = RequestResult::Failure(RequestError::Api {
            metadata: metadata(409),
            body: 3,
        });
        let mapped = failure.map_failure(|n| n.to_string());
        let_assert!(Some(RequestError::Api { body, .. }) = mapped.error());
        check!(body == "3");
    }

    #[test]
    fn converts_into_std_result() {
        let success: RequestResult<u8, ()> = RequestResult::Success {
            metadata: metadata(200),
            body: 5,
        };
        let result: Result<(ResponseMetadata, u8), RequestError<()>> = success.into();
        let_assert!(Ok((metadata, 5)) = result);
        check!(metadata.status() == 200);
    }
}
