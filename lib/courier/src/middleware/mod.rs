//! Middleware and hooks bundled with courier.
//!
//! Two kinds of extension live here:
//!
//! - Tower layers for the [`crate::HyperTransport`] service stack, composed
//!   with [`crate::HyperTransportBuilder::layer`]
//! - Hook implementations for the dispatch engine, registered on
//!   [`crate::ClientBuilder`]
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//! - [`ConcurrencyLimitLayer`] - Limits concurrent requests (from tower)
//!
//! # Available Hooks
//!
//! - [`BearerAuth`] - Adds `Authorization: Bearer <token>` header
//! - [`BasicAuth`] - Adds `Authorization: Basic <base64>` header
//! - [`StatusRetrier`] - Retries on 5xx and 429 responses
//!
//! # Example
//!
//! ```ignore
//! use courier::{Client, HyperTransport};
//! use courier::middleware::{BearerAuth, StatusRetrier};
//!
//! let transport = HyperTransport::builder().with_logging().build();
//! let client = Client::builder(transport)
//!     .modifier(BearerAuth::new("my-token"))
//!     .retrier(StatusRetrier::new())
//!     .max_retries(2)
//!     .build();
//! ```

#[cfg(feature = "middleware-basic-auth")]
mod basic_auth;
mod bearer_auth;
mod logging;
mod retry;

#[cfg(feature = "middleware-basic-auth")]
pub use basic_auth::BasicAuth;
pub use bearer_auth::BearerAuth;
pub use logging::{LogLevel, Logging, LoggingLayer};
pub use retry::StatusRetrier;

pub use tower::ServiceBuilder;
pub use tower::limit::ConcurrencyLimitLayer;
