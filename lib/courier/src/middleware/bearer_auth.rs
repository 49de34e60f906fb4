//! Bearer token authentication hook.
//!
//! Adds an `Authorization: Bearer <token>` header to every outgoing request.

use std::sync::Arc;

use courier_core::{HeaderField, Request, RequestModifier};

/// Request modifier that adds bearer token authentication.
///
/// # Example
///
/// ```ignore
/// use courier::Client;
/// use courier::middleware::BearerAuth;
///
/// let client = Client::builder(transport)
///     .modifier(BearerAuth::new("my-secret-token"))
///     .build();
/// ```
#[derive(Clone)]
pub struct BearerAuth {
    token: Arc<str>,
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuth").finish_non_exhaustive()
    }
}

impl BearerAuth {
    /// Create a new bearer auth modifier with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }
}

impl RequestModifier for BearerAuth {
    fn modify(&self, request: &mut Request) {
        request.set_header(HeaderField::Authorization, format!("Bearer {}", self.token));
    }
}

#[cfg(test)]
mod tests {
    use courier_core::Method;

    use super::*;

    #[test]
    fn sets_authorization_header() {
        let url = url::Url::parse("https://api.test.com/Test").expect("valid URL");
        let mut request = Request::new(Method::Get, url)
            .with_header(HeaderField::Authorization, "Bearer stale");

        BearerAuth::new("test-token").modify(&mut request);

        assert_eq!(
            request.header(&HeaderField::Authorization),
            Some("Bearer test-token")
        );
    }

    #[test]
    fn debug_hides_token() {
        let auth = BearerAuth::new("secret");
        assert!(!format!("{auth:?}").contains("secret"));
    }
}
