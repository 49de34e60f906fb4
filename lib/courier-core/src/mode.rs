//! Response body decoding strategies.
//!
//! The dispatch engine runs a single routine for every call and asks a
//! [`ResponseMode`] how to turn the body into a success or error payload:
//!
//! | Mode | Success | Failure | Decoding |
//! |------|---------|---------|----------|
//! | [`Raw`] | `Bytes` | `Bytes` | none |
//! | [`Dynamic`] | `serde_json::Value` | `serde_json::Value` | into a dynamic value |
//! | [`Typed<S, F>`] | `S` | `F` | into caller types |

use std::fmt;
use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::{Decode, DecodingError};

/// How a response body becomes a success or error payload.
pub trait ResponseMode: Send + 'static {
    /// Payload delivered for a successful status.
    type Success: Send + 'static;
    /// Payload carried by [`crate::RequestError::Api`].
    type Failure: fmt::Debug + Send + Sync + 'static;

    /// Whether the decoder's media type is sent as `Accept`.
    const NEGOTIATES_MEDIA_TYPE: bool = true;

    /// Decode the body of a successful response.
    fn decode_success<D: Decode>(decoder: &D, body: Bytes) -> Result<Self::Success, DecodingError>;

    /// Decode the body of a failed response.
    fn decode_failure<D: Decode>(decoder: &D, body: Bytes) -> Result<Self::Failure, DecodingError>;
}

/// Hands back the body bytes untouched.
#[derive(Debug, Clone, Copy)]
pub enum Raw {}

impl ResponseMode for Raw {
    type Success = Bytes;
    type Failure = Bytes;

    const NEGOTIATES_MEDIA_TYPE: bool = false;

    fn decode_success<D: Decode>(_decoder: &D, body: Bytes) -> Result<Bytes, DecodingError> {
        Ok(body)
    }

    fn decode_failure<D: Decode>(_decoder: &D, body: Bytes) -> Result<Bytes, DecodingError> {
        Ok(body)
    }
}

/// Decodes both outcomes into a [`serde_json::Value`].
#[derive(Debug, Clone, Copy)]
pub enum Dynamic {}

impl ResponseMode for Dynamic {
    type Success = serde_json::Value;
    type Failure = serde_json::Value;

    fn decode_success<D: Decode>(
        decoder: &D,
        body: Bytes,
    ) -> Result<serde_json::Value, DecodingError> {
        decoder.decode(&body)
    }

    fn decode_failure<D: Decode>(
        decoder: &D,
        body: Bytes,
    ) -> Result<serde_json::Value, DecodingError> {
        decoder.decode(&body)
    }
}

/// Decodes successes into `S` and API errors into `F`.
pub struct Typed<S, F>(PhantomData<fn() -> (S, F)>);

impl<S, F> fmt::Debug for Typed<S, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typed")
            .field("success", &std::any::type_name::<S>())
            .field("failure", &std::any::type_name::<F>())
            .finish()
    }
}

impl<S, F> ResponseMode for Typed<S, F>
where
    S: DeserializeOwned + Send + 'static,
    F: DeserializeOwned + fmt::Debug + Send + Sync + 'static,
{
    type Success = S;
    type Failure = F;

    fn decode_success<D: Decode>(decoder: &D, body: Bytes) -> Result<S, DecodingError> {
        decoder.decode(&body)
    }

    fn decode_failure<D: Decode>(decoder: &D, body: Bytes) -> Result<F, DecodingError> {
        decoder.decode(&body)
    }
}
