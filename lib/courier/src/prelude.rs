//! Prelude module for convenient imports.
//!
//! ```ignore
//! use courier::prelude::*;
//! ```

pub use crate::{
    Client, ClientBuilder, Decode, Dynamic, Encode, HeaderField, HeaderFields, HyperTransport,
    JsonCodec, Method, Raw, Request, RequestError, RequestResult, ResponseMetadata, Transport,
    TransportError, Typed,
};

pub use serde::{Deserialize, Serialize};
