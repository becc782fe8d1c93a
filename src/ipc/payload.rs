/*!
 * Payload
 * The fixed-size integer carried across the pipe
 */

use super::pipe::types::{PipeError, PipeResult};
use crate::core::limits::{DEFAULT_PAYLOAD, PAYLOAD_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One `i32` encoded in native byte order
///
/// Both ends of the pipe live on the same host, so no byte-order
/// conversion is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(i32);

impl Payload {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    pub fn encode(self) -> [u8; PAYLOAD_SIZE] {
        self.0.to_ne_bytes()
    }

    /// Decode exactly `PAYLOAD_SIZE` bytes
    pub fn decode(bytes: &[u8]) -> PipeResult<Self> {
        let raw: [u8; PAYLOAD_SIZE] = bytes.try_into().map_err(|_| PipeError::ShortRead {
            expected: PAYLOAD_SIZE,
            received: bytes.len(),
        })?;
        Ok(Self(i32::from_ne_bytes(raw)))
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self(DEFAULT_PAYLOAD)
    }
}

impl From<i32> for Payload {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_payload_is_three() {
        assert_eq!(Payload::default().value(), 3);
        assert_eq!(Payload::default().to_string(), "3");
    }

    #[test]
    fn test_encoding_is_four_native_endian_bytes() {
        let bytes = Payload::new(3).encode();
        assert_eq!(bytes.len(), 4);
        assert_eq!(bytes, 3i32.to_ne_bytes());
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        match Payload::decode(&[1, 2]) {
            Err(PipeError::ShortRead { expected, received }) => {
                assert_eq!(expected, 4);
                assert_eq!(received, 2);
            }
            other => panic!("expected ShortRead, got {:?}", other),
        }
        assert!(Payload::decode(&[0; 5]).is_err());
    }
}
