//! Core types and traits for the courier typed HTTP client.
//!
//! This crate provides the foundational types used by courier:
//! - [`HeaderField`] and [`HeaderFields`] - header catalog and header map
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`Response`] and [`ResponseMetadata`] - HTTP response types
//! - [`Encode`], [`Decode`] and [`JsonCodec`] - body codecs
//! - [`RequestError`] and [`RequestResult`] - outcome of a call
//! - [`ResponseMode`] - how a response body is decoded ([`Raw`], [`Dynamic`], [`Typed`])
//! - [`Transport`], [`RequestModifier`] and [`RequestRetrier`] - seams of the dispatch engine
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)

mod codec;
mod error;
mod header;
mod method;
mod mode;
pub mod prelude;
mod request;
mod response;
mod result;
mod transport;

pub use codec::{Decode, Encode, FORM_MEDIA_TYPE, FormEncoder, JSON_MEDIA_TYPE, JsonCodec};
pub use error::{BoxError, DecodingError, EncodingError, RequestError, TransportError};
pub use header::{HeaderField, HeaderFields};
pub use method::{Method, UnknownMethod};
pub use mode::{Dynamic, Raw, ResponseMode, Typed};
pub use request::{Request, RequestBuilder};
pub use response::{Response, ResponseMetadata};
pub use result::RequestResult;
pub use transport::{RequestModifier, RequestRetrier, Transport};

// Re-export http crate status codes
pub use http::StatusCode;
