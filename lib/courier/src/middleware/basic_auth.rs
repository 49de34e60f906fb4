//! Basic authentication hook.
//!
//! Adds an `Authorization: Basic <base64(user:pass)>` header to every
//! outgoing request.

use std::sync::Arc;

use base64::Engine;
use courier_core::{HeaderField, Request, RequestModifier};

/// Request modifier that adds basic authentication.
///
/// # Example
///
/// ```ignore
/// use courier::Client;
/// use courier::middleware::BasicAuth;
///
/// let client = Client::builder(transport)
///     .modifier(BasicAuth::new("username", "password"))
///     .build();
/// ```
#[derive(Clone)]
pub struct BasicAuth {
    /// Base64-encoded "username:password".
    encoded_credentials: Arc<str>,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth").finish_non_exhaustive()
    }
}

impl BasicAuth {
    /// Create a new basic auth modifier with the given username and password.
    pub fn new(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let credentials = format!("{}:{}", username.as_ref(), password.as_ref());
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        Self {
            encoded_credentials: Arc::from(encoded),
        }
    }
}

impl RequestModifier for BasicAuth {
    fn modify(&self, request: &mut Request) {
        request.set_header(
            HeaderField::Authorization,
            format!("Basic {}", self.encoded_credentials),
        );
    }
}
