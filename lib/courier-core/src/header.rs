//! HTTP header field catalog.
//!
//! [`HeaderField`] names the header fields courier knows about and keeps an
//! escape hatch, [`HeaderField::Custom`], for everything else. Conversion is
//! total in both directions:
//!
//! ```
//! use courier_core::HeaderField;
//!
//! assert_eq!(HeaderField::ContentType.as_str(), "Content-Type");
//! assert_eq!(HeaderField::from_wire("content-type"), HeaderField::ContentType);
//! assert_eq!(
//!     HeaderField::from_wire("X-Request-Id"),
//!     HeaderField::Custom("X-Request-Id".to_string())
//! );
//! ```

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Header map used by requests and response metadata.
///
/// Keys are unique; inserting a field twice keeps the last value.
pub type HeaderFields = HashMap<HeaderField, String>;

/// An HTTP header field name.
///
/// Equality and hashing are based on the wire name, compared ASCII
/// case-insensitively, so `Custom("accept")` and `Accept` are the same key.
#[derive(Debug, Clone)]
pub enum HeaderField {
    /// `Accept`
    Accept,
    /// `Accept-Charset`
    AcceptCharset,
    /// `Accept-Encoding`
    AcceptEncoding,
    /// `Accept-Language`
    AcceptLanguage,
    /// `Authorization`
    Authorization,
    /// `Cache-Control`
    CacheControl,
    /// `Connection`
    Connection,
    /// `Cookie`
    Cookie,
    /// `Content-Length`
    ContentLength,
    /// `Content-MD5`
    ContentMd5,
    /// `Content-Type`
    ContentType,
    /// `Date`
    Date,
    /// `Expect`
    Expect,
    /// `Forwarded`
    Forwarded,
    /// `From`
    From,
    /// `Host`
    Host,
    /// `If-Match`
    IfMatch,
    /// `If-Modified-Since`
    IfModifiedSince,
    /// `If-None-Match`
    IfNoneMatch,
    /// `If-Range`
    IfRange,
    /// `If-Unmodified-Since`
    IfUnmodifiedSince,
    /// `Max-Forwards`
    MaxForwards,
    /// `Pragma`
    Pragma,
    /// `Proxy-Authorization`
    ProxyAuthorization,
    /// `Range`
    Range,
    /// `Referer`
    Referer,
    /// `TE`
    Te,
    /// `Transfer-Encoding`
    TransferEncoding,
    /// `Upgrade`
    Upgrade,
    /// `User-Agent`
    UserAgent,
    /// `Via`
    Via,
    /// `Warning`
    Warning,
    /// `x-api-key`
    XApiKey,
    /// Any field not in the catalog, stored with its wire name.
    Custom(String),
}

impl HeaderField {
    /// Every known (non-custom) field.
    pub const ALL: [Self; 33] = [
        Self::Accept,
        Self::AcceptCharset,
        Self::AcceptEncoding,
        Self::AcceptLanguage,
        Self::Authorization,
        Self::CacheControl,
        Self::Connection,
        Self::Cookie,
        Self::ContentLength,
        Self::ContentMd5,
        Self::ContentType,
        Self::Date,
        Self::Expect,
        Self::Forwarded,
        Self::From,
        Self::Host,
        Self::IfMatch,
        Self::IfModifiedSince,
        Self::IfNoneMatch,
        Self::IfRange,
        Self::IfUnmodifiedSince,
        Self::MaxForwards,
        Self::Pragma,
        Self::ProxyAuthorization,
        Self::Range,
        Self::Referer,
        Self::Te,
        Self::TransferEncoding,
        Self::Upgrade,
        Self::UserAgent,
        Self::Via,
        Self::Warning,
        Self::XApiKey,
    ];

    /// Wire name of the field.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Accept => "Accept",
            Self::AcceptCharset => "Accept-Charset",
            Self::AcceptEncoding => "Accept-Encoding",
            Self::AcceptLanguage => "Accept-Language",
            Self::Authorization => "Authorization",
            Self::CacheControl => "Cache-Control",
            Self::Connection => "Connection",
            Self::Cookie => "Cookie",
            Self::ContentLength => "Content-Length",
            Self::ContentMd5 => "Content-MD5",
            Self::ContentType => "Content-Type",
            Self::Date => "Date",
            Self::Expect => "Expect",
            Self::Forwarded => "Forwarded",
            Self::From => "From",
            Self::Host => "Host",
            Self::IfMatch => "If-Match",
            Self::IfModifiedSince => "If-Modified-Since",
            Self::IfNoneMatch => "If-None-Match",
            Self::IfRange => "If-Range",
            Self::IfUnmodifiedSince => "If-Unmodified-Since",
            Self::MaxForwards => "Max-Forwards",
            Self::Pragma => "Pragma",
            Self::ProxyAuthorization => "Proxy-Authorization",
            Self::Range => "Range",
            Self::Referer => "Referer",
            Self::Te => "TE",
            Self::TransferEncoding => "Transfer-Encoding",
            Self::Upgrade => "Upgrade",
            Self::UserAgent => "User-Agent",
            Self::Via => "Via",
            Self::Warning => "Warning",
            Self::XApiKey => "x-api-key",
            Self::Custom(name) => name,
        }
    }

    /// Resolve a wire name, falling back to [`HeaderField::Custom`].
    ///
    /// Known names match regardless of ASCII case.
    #[must_use]
    pub fn from_wire(name: &str) -> Self {
        Self::ALL
            .iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(name))
            .cloned()
            .unwrap_or_else(|| Self::Custom(name.to_string()))
    }

    /// Returns `true` for [`HeaderField::Custom`].
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl PartialEq for HeaderField {
    fn eq(&self, other: &Self) -> bool {
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }
}

impl Eq for HeaderField {}

impl Hash for HeaderField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.as_str().bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeaderField {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_wire(s))
    }
}

impl From<&str> for HeaderField {
    fn from(name: &str) -> Self {
        Self::from_wire(name)
    }
}

impl From<String> for HeaderField {
    fn from(name: String) -> Self {
        match Self::from_wire(&name) {
            Self::Custom(_) => Self::Custom(name),
            known => known,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn known_fields_round_trip() {
        for field in HeaderField::ALL {
            let wire = field.as_str().to_string();
            let parsed = HeaderField::from_wire(&wire);
            assert!(!parsed.is_custom(), "{wire} resolved to a custom field");
            assert_eq!(parsed.as_str(), wire);
            assert_eq!(parsed, field);
        }
    }

    #[test]
    fn unknown_fields_round_trip_as_custom() {
        let field = HeaderField::from_wire("X-Request-Id");
        assert_eq!(field, HeaderField::Custom("X-Request-Id".to_string()));
        assert!(field.is_custom());
        assert_eq!(field.as_str(), "X-Request-Id");
    }

    #[test]
    fn known_names_are_case_insensitive() {
        assert_eq!(HeaderField::from_wire("content-type"), HeaderField::ContentType);
        assert_eq!(HeaderField::from_wire("X-API-KEY"), HeaderField::XApiKey);
        assert_eq!(HeaderField::from_wire("te"), HeaderField::Te);
        assert!(!HeaderField::from_wire("user-agent").is_custom());
    }

    #[test]
    fn wire_names_are_distinct() {
        let names: HashSet<String> = HeaderField::ALL
            .iter()
            .map(|field| field.as_str().to_ascii_lowercase())
            .collect();
        assert_eq!(names.len(), HeaderField::ALL.len());
    }

    #[test]
    fn equality_and_hash_follow_wire_name() {
        let custom = HeaderField::Custom("accept".to_string());
        assert_eq!(custom, HeaderField::Accept);

        let mut headers = HeaderFields::new();
        headers.insert(HeaderField::Accept, "text/plain".to_string());
        headers.insert(custom, "application/json".to_string());

        assert_eq!(headers.len(), 1);
        assert_eq!(
            headers.get(&HeaderField::Accept).map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn conversions() {
        assert_eq!(HeaderField::from("Authorization"), HeaderField::Authorization);
        assert_eq!(
            HeaderField::from("X-Trace".to_string()),
            HeaderField::Custom("X-Trace".to_string())
        );
        let parsed: HeaderField = "Cache-Control".parse().unwrap_or(HeaderField::Date);
        assert_eq!(parsed, HeaderField::CacheControl);
        assert_eq!(HeaderField::ContentMd5.to_string(), "Content-MD5");
    }
}
