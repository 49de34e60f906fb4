//! Typed HTTP client for Rust.
//!
//! Build a request from a typed body, dispatch it on a pluggable transport and
//! get back a single [`RequestResult`]: a decoded success value or a
//! [`RequestError`] telling why the call failed.
//!
//! # Example
//!
//! ```ignore
//! use courier::prelude::*;
//!
//! #[derive(Debug, Serialize)]
//! struct NewUser { name: String }
//!
//! #[derive(Debug, Deserialize)]
//! struct User { id: u64, name: String }
//!
//! #[derive(Debug, Deserialize)]
//! struct ApiError { message: String }
//!
//! let client = Client::new();
//! let url = "https://api.example.com/users".parse()?;
//! let body = NewUser { name: "Alice".to_string() };
//!
//! match client.post::<Typed<User, ApiError>, _>(url, Some(&body), None).await {
//!     RequestResult::Success { body, .. } => println!("created {}", body.id),
//!     RequestResult::Failure(RequestError::Api { metadata, body }) => {
//!         eprintln!("{}: {}", metadata.status(), body.message);
//!     }
//!     RequestResult::Failure(error) => eprintln!("{error}"),
//! }
//! ```
//!
//! Besides the `async` entry points, [`Client::dispatch`] runs a call in the
//! background and hands its result to a completion callback.

mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
mod transport;

pub use client::{Client, ClientBuilder, DEFAULT_MAX_RETRIES, DispatchHandle};
pub use config::TransportConfig;
pub use transport::{BoxedService, HyperTransport, HyperTransportBuilder, ServiceFuture};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use courier_core::{
    BoxError, Decode, DecodingError, Dynamic, Encode, EncodingError, FORM_MEDIA_TYPE, FormEncoder,
    HeaderField, HeaderFields, JSON_MEDIA_TYPE, JsonCodec, Method, Raw, Request, RequestBuilder,
    RequestError, RequestModifier, RequestResult, RequestRetrier, Response, ResponseMetadata,
    ResponseMode, StatusCode, Transport, TransportError, Typed, UnknownMethod,
};

pub use url;
