//! Extractors whose rejections are answered through [`AppError`].
//!
//! axum's own `Json` and `Path` reply with plain-text bodies when input
//! cannot be decoded. These wrappers keep every response in the JSON
//! envelope.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// `axum::Json` with [`AppError`] as rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with [`AppError`] as rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Decodes a raw JSON body.
///
/// Used where the body must be read only after another step succeeded, so a
/// missing record is reported before a malformed body.
pub fn decode_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_decode_json() {
        let value: Value = decode_json(&Bytes::from_static(br#"{"a":1}"#)).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_decode_json_error_is_400() {
        let err = decode_json::<Value>(&Bytes::from_static(b"{oops")).unwrap_err();
        assert!(matches!(err, AppError::Other(_)));
    }

    #[test]
    fn test_decode_empty_body_is_error() {
        assert!(decode_json::<Value>(&Bytes::new()).is_err());
    }
}
