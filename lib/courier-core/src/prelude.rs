//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy glob
//! importing:
//!
//! ```ignore
//! use courier_core::prelude::*;
//! ```

pub use crate::{
    Decode, Dynamic, Encode, HeaderField, HeaderFields, JsonCodec, Method, Raw, Request,
    RequestBuilder, RequestError, RequestResult, Response, ResponseMetadata, Transport,
    TransportError, Typed,
};
