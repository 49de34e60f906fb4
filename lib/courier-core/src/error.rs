//! Error types for courier.
//!
//! [`RequestError`] is the taxonomy every call resolves to. The concrete
//! failure types it wraps ([`TransportError`], [`EncodingError`],
//! [`DecodingError`]) are plain errors that transports and codecs return.

use std::error::Error as StdError;
use std::fmt;

use derive_more::{Display, Error};

use crate::ResponseMetadata;

/// Boxed, thread-safe error used at the transport seam.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

// ============================================================================
// Collaborator errors
// ============================================================================

/// Failure reported by a transport before any response was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum TransportError {
    /// Network/connection errors.
    #[display("connection error: {_0}")]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    Timeout,

    /// The request could not be turned into a wire request.
    #[display("invalid request: {_0}")]
    InvalidRequest(#[error(not(source))] String),

    /// The response body could not be read.
    #[display("failed to read response body: {_0}")]
    Body(#[error(not(source))] String),
}

impl TransportError {
    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a body read error.
    #[must_use]
    pub fn body(message: impl Into<String>) -> Self {
        Self::Body(message.into())
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// An outgoing body could not be serialized.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("encoding error: {message}")]
pub struct EncodingError {
    #[error(not(source))]
    message: String,
}

impl EncodingError {
    /// Create an encoding error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A response body could not be parsed into the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("decoding error at '{path}': {message}")]
pub struct DecodingError {
    /// Path to the offending element (e.g. `user.address.city`), `.` for the root.
    #[error(not(source))]
    path: String,
    /// Error message.
    #[error(not(source))]
    message: String,
}

impl DecodingError {
    /// Create a decoding error with path context.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Path to the element that failed to decode.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

// ============================================================================
// Request error taxonomy
// ============================================================================

/// Why a request did not produce a success value.
///
/// `F` is the caller's error payload type, only carried by
/// [`RequestError::Api`].
#[derive(Debug)]
pub enum RequestError<F> {
    /// No response was obtained.
    Transport(TransportError),
    /// A well-formed response with a non-successful status, whose body decoded as `F`.
    Api {
        /// Status, headers and URL of the response.
        metadata: ResponseMetadata,
        /// Decoded error payload.
        body: F,
    },
    /// A response body could not be decoded into the expected type.
    Decoding(DecodingError),
    /// The request body could not be encoded; nothing was sent.
    Encoding(EncodingError),
    /// Anything that does not fit the categories above.
    Unknown(BoxError),
}

impl<F> RequestError<F>
where
    F: fmt::Debug + Send + Sync + 'static,
{
    /// Sort an arbitrary error into the taxonomy.
    ///
    /// An error that already is a `RequestError<F>` is returned unchanged.
    /// Transport, encoding and decoding errors map to their variants and
    /// everything else becomes [`RequestError::Unknown`].
    #[must_use]
    pub fn classify(error: BoxError) -> Self {
        let error = match error.downcast::<Self>() {
            Ok(classified) => return *classified,
            Err(error) => error,
        };
        let error = match error.downcast::<TransportError>() {
            Ok(transport) => return Self::Transport(*transport),
            Err(error) => error,
        };
        let error = match error.downcast::<DecodingError>() {
            Ok(decoding) => return Self::Decoding(*decoding),
            Err(error) => error,
        };
        match error.downcast::<EncodingError>() {
            Ok(encoding) => Self::Encoding(*encoding),
            Err(error) => Self::Unknown(error),
        }
    }
}

impl<F> RequestError<F> {
    /// Create an unknown error from any error value.
    #[must_use]
    pub fn unknown(error: impl Into<BoxError>) -> Self {
        Self::Unknown(error.into())
    }

    /// Returns the HTTP status code if this is an API error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { metadata, .. } => Some(metadata.status()),
            _ => None,
        }
    }

    /// Returns the decoded error payload if this is an API error.
    #[must_use]
    pub const fn api_body(&self) -> Option<&F> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns `true` if no response was obtained.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the server answered with a non-successful status.
    #[must_use]
    pub const fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Returns `true` if a response body could not be decoded.
    #[must_use]
    pub const fn is_decoding(&self) -> bool {
        matches!(self, Self::Decoding(_))
    }

    /// Returns `true` if the request body could not be encoded.
    #[must_use]
    pub const fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding(_))
    }

    /// Returns `true` for uncategorized errors.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Transform the API error payload with a function.
    pub fn map_body<G>(self, f: impl FnOnce(F) -> G) -> RequestError<G> {
        match self {
            Self::Transport(error) => RequestError::Transport(error),
            Self::Api { metadata, body } => RequestError::Api {
                metadata,
                body: f(body),
            },
            Self::Decoding(error) => RequestError::Decoding(error),
            Self::Encoding(error) => RequestError::Encoding(error),
            Self::Unknown(error) => RequestError::Unknown(error),
        }
    }
}

impl<F> fmt::Display for RequestError<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(error) => write!(f, "transport error: {error}"),
            Self::Api { metadata, .. } => {
                write!(f, "API error {} from {}", metadata.status(), metadata.url())
            }
            Self::Decoding(error) => write!(f, "{error}"),
            Self::Encoding(error) => write!(f, "{error}"),
            Self::Unknown(error) => write!(f, "unknown error: {error}"),
        }
    }
}

impl<F: fmt::Debug> StdError for RequestError<F> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Transport(error) => Some(error),
            Self::Api { .. } => None,
            Self::Decoding(error) => Some(error),
            Self::Encoding(error) => Some(error),
            Self::Unknown(error) => Some(error.as_ref()),
        }
    }
}

impl<F> From<TransportError> for RequestError<F> {
    fn from(error: TransportError) -> Self {
        Self::Transport(error)
    }
}

impl<F> From<DecodingError> for RequestError<F> {
    fn from(error: DecodingError) -> Self {
        Self::Decoding(error)
    }
}

impl<F> From<EncodingError> for RequestError<F> {
    fn from(error: EncodingError) -> Self {
        Self::Encoding(error)
    }
}
