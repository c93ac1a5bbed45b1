//! Device identity types.

use crate::error::ProtocolResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque push token handed out by the platform's delivery mechanism.
///
/// Tokens may rotate; they are transmitted as lowercase hex with two
/// digits per byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceToken(Vec<u8>);

impl DeviceToken {
    /// Wraps raw token bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parses a token from its hex representation (either case).
    pub fn from_hex(hex_str: &str) -> ProtocolResult<Self> {
        Ok(Self(hex::decode(hex_str.trim())?))
    }

    /// Returns the raw token bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns true if the token carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the fixed-width lowercase hex form used on the wire.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl From<Vec<u8>> for DeviceToken {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Device identity assigned by the remote service on first registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Wraps an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hex_is_lowercase_fixed_width() {
        let token = DeviceToken::new(vec![0x00, 0x0a, 0xff, 0x10]);
        assert_eq!(token.to_hex(), "000aff10");
    }

    #[test]
    fn from_hex_accepts_uppercase() {
        let token = DeviceToken::from_hex("DEADBEEF").unwrap();
        assert_eq!(token.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(token.to_hex(), "deadbeef");
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(DeviceToken::from_hex("abc").is_err());
        assert!(DeviceToken::from_hex("zz").is_err());
    }

    #[test]
    fn device_id_is_transparent_on_the_wire() {
        let id = DeviceId::new("apns-123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"apns-123\"");
        assert_eq!(id.to_string(), "apns-123");
    }

    proptest! {
        #[test]
        fn hex_width_is_twice_the_token_length(
            bytes in proptest::collection::vec(any::<u8>(), 0..64)
        ) {
            let hex = DeviceToken::new(bytes.clone()).to_hex();
            prop_assert_eq!(hex.len(), bytes.len() * 2);
            prop_assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }
}
