//! HTTP request building.
//!
//! [`RequestBuilder`] turns a URL, a method, optional headers and an optional
//! typed body into a [`Request`], encoding the body with its [`Encode`]
//! implementation.
//!
//! # Example
//!
//! ```
//! use courier_core::{HeaderField, HeaderFields, JsonCodec, Method, RequestBuilder};
//!
//! let builder = RequestBuilder::new(JsonCodec);
//! let mut headers = HeaderFields::new();
//! headers.insert(HeaderField::Authorization, "Bearer token".to_string());
//!
//! let request = builder
//!     .build_with_body(
//!         "https://api.example.com/users".parse().unwrap(),
//!         Method::Post,
//!         Some(&serde_json::json!({ "name": "Alice" })),
//!         Some(&headers),
//!     )
//!     .expect("encodable body");
//!
//! assert_eq!(
//!     request.header(&HeaderField::ContentType),
//!     Some("application/json;charset=UTF-8")
//! );
//! ```

use bytes::Bytes;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::{Encode, EncodingError, HeaderField, HeaderFields, JsonCodec, Method};

/// An HTTP request with method, URL, headers, and optional body.
///
/// A request is owned by the call that dispatches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderFields,
    body: Option<Bytes>,
}

impl Request {
    /// Creates a request without headers or body.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderFields::new(),
            body: None,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderFields {
        &self.headers
    }

    /// Single header value by field.
    #[must_use]
    pub fn header(&self, field: &HeaderField) -> Option<&str> {
        self.headers.get(field).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Sets a header, replacing any previous value for the same field.
    pub fn set_header(&mut self, field: HeaderField, value: impl Into<String>) {
        self.headers.insert(field, value.into());
    }

    /// Sets a header only if the field is not present yet.
    pub fn set_header_if_absent(&mut self, field: HeaderField, value: impl Into<String>) {
        self.headers.entry(field).or_insert_with(|| value.into());
    }

    /// Sets a header.
    #[must_use]
    pub fn with_header(mut self, field: HeaderField, value: impl Into<String>) -> Self {
        self.set_header(field, value);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, Url, HeaderFields, Option<Bytes>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builds [`Request`]s, encoding typed bodies with `E`.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder<E = JsonCodec> {
    encoder: E,
}

impl<E> RequestBuilder<E> {
    /// Creates a builder with the given encoder.
    #[must_use]
    pub const fn new(encoder: E) -> Self {
        Self { encoder }
    }

    /// The encoder used for bodies.
    #[must_use]
    pub const fn encoder(&self) -> &E {
        &self.encoder
    }
}

impl<E: Encode> RequestBuilder<E> {
    /// Build a request without a body.
    ///
    /// Headers are applied as given, one field at a time.
    #[must_use]
    pub fn build(&self, url: Url, method: Method, headers: Option<&HeaderFields>) -> Request {
        let mut request = Request::new(method, url);
        if let Some(headers) = headers {
            for (field, value) in headers {
                request.set_header(field.clone(), value.clone());
            }
        }
        request
    }

    /// Build a request with an optional typed body.
    ///
    /// The body is encoded only when the method carries one (see
    /// [`Method::carries_body`]); otherwise it is dropped. When the encoder
    /// advertises a media type it is set as `Content-Type` unless the caller
    /// already provided one.
    pub fn build_with_body<B: Serialize + ?Sized>(
        &self,
        url: Url,
        method: Method,
        body: Option<&B>,
        headers: Option<&HeaderFields>,
    ) -> Result<Request, EncodingError> {
        let mut request = self.build(url, method, headers);

        let Some(body) = body else {
            return Ok(request);
        };
        if !method.carries_body() {
            debug!(%method, url = %request.url, "method does not carry a body, dropping it");
            return Ok(request);
        }

        request.body = Some(self.encoder.encode(body)?);
        if let Some(media_type) = self.encoder.media_type() {
            request.set_header_if_absent(HeaderField::ContentType, media_type);
        }
        Ok(request)
    }
}
