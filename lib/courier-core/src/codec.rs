//! Body encoding and decoding.
//!
//! The request builder depends on [`Encode`] and the dispatch engine on
//! [`Decode`]. [`JsonCodec`] is the canonical implementation of both.

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{DecodingError, EncodingError};

/// Media type advertised by [`JsonCodec`], used for `Content-Type` and `Accept`.
pub const JSON_MEDIA_TYPE: &str = "application/json;charset=UTF-8";

/// Media type advertised by [`FormEncoder`].
pub const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";

/// Serializes request bodies.
pub trait Encode: Send + Sync {
    /// Serialize a value to bytes.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, EncodingError>;

    /// Media type of the produced bytes.
    ///
    /// When set, the request builder adds it as `Content-Type` to requests
    /// with an encoded body.
    fn media_type(&self) -> Option<&'static str> {
        None
    }
}

/// Deserializes response bodies.
pub trait Decode: Send + Sync {
    /// Deserialize bytes into a value of type `T`.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, DecodingError>;

    /// Media type this decoder understands.
    ///
    /// When set, the dispatch engine sends it as `Accept`.
    fn media_type(&self) -> Option<&'static str> {
        None
    }
}

/// JSON codec backed by `serde_json`.
///
/// Decoding errors carry the path of the element that failed, e.g.
/// `user.address.city`.
///
/// # Example
///
/// ```
/// use courier_core::{Decode, Encode, JsonCodec};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct User { name: String }
///
/// let bytes = JsonCodec.encode(&User { name: "Alice".to_string() }).expect("encode");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
///
/// let user: User = JsonCodec.decode(&bytes).expect("decode");
/// assert_eq!(user.name, "Alice");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Encode for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, EncodingError> {
        serde_json::to_vec(value)
            .map(Bytes::from)
            .map_err(|e| EncodingError::new(e.to_string()))
    }

    fn media_type(&self) -> Option<&'static str> {
        Some(JSON_MEDIA_TYPE)
    }
}

impl Decode for JsonCodec {
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, DecodingError> {
        let mut deserializer = serde_json::Deserializer::from_slice(bytes);
        let value = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| DecodingError::new(e.path().to_string(), e.inner().to_string()))?;
        deserializer
            .end()
            .map_err(|e| DecodingError::new(".", e.to_string()))?;
        Ok(value)
    }

    fn media_type(&self) -> Option<&'static str> {
        Some(JSON_MEDIA_TYPE)
    }
}

/// Encode-only codec producing `application/x-www-form-urlencoded` bodies.
///
/// Uses `serde_html_form`, so `Vec<T>` fields become repeated keys
/// (`tags=a&tags=b`).
#[derive(Debug, Clone, Copy, Default)]
pub struct FormEncoder;

impl Encode for FormEncoder {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes, EncodingError> {
        serde_html_form::to_string(value)
            .map(|s| Bytes::from(s.into_bytes()))
            .map_err(|e| EncodingError::new(e.to_string()))
    }

    fn media_type(&self) -> Option<&'static str> {
        Some(FORM_MEDIA_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct User {
        name: String,
        age: u32,
    }

    #[test]
    fn json_encode() {
        let user = User {
            name: "Alice".to_string(),
            age: 30,
        };
        let bytes = JsonCodec.encode(&user).expect("serialize");
        assert_eq!(bytes.as_ref(), br#"{"name":"Alice","age":30}"#);
    }

    #[test]
    fn json_encode_failure() {
        let mut map = HashMap::new();
        map.insert((1, 2), "tuple keys are not JSON object keys");

        let err = JsonCodec.encode(&map).expect_err("should fail");
        assert!(err.message().contains("key must be a string"), "{err}");
    }

    #[test]
    fn json_decode() {
        let user: User = JsonCodec
            .decode(br#"{"name":"Alice","age":30}"#)
            .expect("deserialize");
        assert_eq!(
            user,
            User {
                name: "Alice".to_string(),
                age: 30,
            }
        );
    }

    #[test]
    fn json_decode_empty_body_fails() {
        let result: Result<User, _> = JsonCodec.decode(b"");
        assert!(result.is_err());
    }

    #[test]
    fn json_decode_trailing_garbage_fails() {
        let result: Result<serde_json::Value, _> = JsonCodec.decode(br#"{"a":1} trailing"#);
        assert!(result.is_err());
    }

    #[test]
    fn json_decode_error_carries_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Address {
            #[allow(dead_code)]
            city: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct Customer {
            #[allow(dead_code)]
            address: Address,
        }

        let err = JsonCodec
            .decode::<Customer>(br#"{"address":{}}"#)
            .expect_err("should fail");
        assert!(err.path().contains("address"), "{err}");
        assert!(err.message().contains("city"), "{err}");
    }

    #[test]
    fn form_encode() {
        #[derive(serde::Serialize)]
        struct Login {
            username: String,
            tags: Vec<String>,
        }

        let login = Login {
            username: "alice".to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
        };
        let bytes = FormEncoder.encode(&login).expect("serialize");
        assert_eq!(bytes.as_ref(), b"username=alice&tags=a&tags=b");
    }

    #[test]
    fn media_types() {
        assert_eq!(Encode::media_type(&JsonCodec), Some(JSON_MEDIA_TYPE));
        assert_eq!(Decode::media_type(&JsonCodec), Some(JSON_MEDIA_TYPE));
        assert_eq!(Encode::media_type(&FormEncoder), Some(FORM_MEDIA_TYPE));
    }
}
