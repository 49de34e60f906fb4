//! HTTP response types.
//!
//! A transport hands back a [`Response`]: [`ResponseMetadata`] plus an
//! optional body. The dispatch engine keeps the metadata and turns the body
//! into the caller's success or error type.

use bytes::Bytes;
use url::Url;

use crate::{HeaderField, HeaderFields};

/// Status code, headers and URL of a response, separate from its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMetadata {
    status: u16,
    headers: HeaderFields,
    url: Url,
}

impl ResponseMetadata {
    /// Creates new response metadata.
    #[must_use]
    pub fn new(status: u16, headers: HeaderFields, url: Url) -> Self {
        Self {
            status,
            headers,
            url,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderFields {
        &self.headers
    }

    /// Single header value by field.
    #[must_use]
    pub fn header(&self, field: &HeaderField) -> Option<&str> {
        self.headers.get(field).map(String::as_str)
    }

    /// URL the response was obtained from.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Status is in `[200, 300)`.
    ///
    /// This decides between the success and the failure path; `300` is a failure.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 3xx.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        self.status >= 300 && self.status < 400
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }
}

/// A response as produced by a transport.
#[derive(Debug, Clone)]
pub struct Response {
    metadata: ResponseMetadata,
    body: Option<Bytes>,
}

impl Response {
    /// Creates a new response.
    #[must_use]
    pub fn new(metadata: ResponseMetadata, body: Option<Bytes>) -> Self {
        Self { metadata, body }
    }

    /// Status, headers and URL.
    #[must_use]
    pub const fn metadata(&self) -> &ResponseMetadata {
        &self.metadata
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.metadata.status
    }

    /// Response body, if the transport delivered one.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Consume into metadata and body, an absent body becoming empty bytes.
    #[must_use]
    pub fn into_parts(self) -> (ResponseMetadata, Bytes) {
        (self.metadata, self.body.unwrap_or_default())
    }
}
