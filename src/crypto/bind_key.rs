//! BTHome bind key.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

const KEY_LEN: usize = 16;

/// The 128-bit AES key shared between the sensor and its receivers.
///
/// Key bytes are wiped when the key is dropped and never printed by `Debug`.
/// There is no `PartialEq`; compare [`as_bytes`](Self::as_bytes) where needed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct BindKey([u8; KEY_LEN]);

impl BindKey {
    /// Key size in bytes.
    pub const SIZE: usize = KEY_LEN;

    /// Create from raw bytes.
    pub fn new(bytes: [u8; Self::SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice that must be exactly 16 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; Self::SIZE] = bytes.try_into().map_err(|_| Error::InvalidBindKey {
            reason: format!("expected {} bytes, got {}", Self::SIZE, bytes.len()),
        })?;
        Ok(Self(bytes))
    }

    /// Parse a 32 character hex string, as shown in receiver setup screens.
    ///
    /// # Example
    ///
    /// ```
    /// use bthome_adv::crypto::BindKey;
    ///
    /// let key = BindKey::from_hex("231d39c1d7cc1ab1aee224cd096db932").unwrap();
    /// assert_eq!(key.as_bytes()[0], 0x23);
    /// ```
    pub fn from_hex(text: &str) -> Result<Self> {
        let mut bytes = [0u8; Self::SIZE];
        hex::decode_to_slice(text.trim(), &mut bytes).map_err(|e| Error::InvalidBindKey {
            reason: e.to_string(),
        })?;
        Ok(Self(bytes))
    }

    /// Get the key bytes.
    pub fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.0
    }
}

impl std::fmt::Debug for BindKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BindKey(..)")
    }
}

impl std::str::FromStr for BindKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let key = BindKey::from_hex("231d39c1d7cc1ab1aee224cd096db932").unwrap();
        assert_eq!(
            key.as_bytes(),
            &[
                0x23, 0x1d, 0x39, 0xc1, 0xd7, 0xcc, 0x1a, 0xb1, 0xae, 0xe2, 0x24, 0xcd, 0x09,
                0x6d, 0xb9, 0x32
            ]
        );
    }

    #[test]
    fn test_from_hex_wrong_length() {
        assert!(matches!(
            BindKey::from_hex("231d39"),
            Err(Error::InvalidBindKey { .. })
        ));
        assert!(BindKey::from_hex("zz1d39c1d7cc1ab1aee224cd096db932").is_err());
    }

    #[test]
    fn test_from_slice() {
        assert!(BindKey::from_slice(&[0u8; 16]).is_ok());
        assert!(BindKey::from_slice(&[0u8; 15]).is_err());
    }

    #[test]
    fn test_clone_keeps_bytes() {
        let key = BindKey::new([0x5A; 16]);
        let copy = key.clone();
        assert_eq!(copy.as_bytes(), key.as_bytes());
        assert_eq!(
            "231d39c1d7cc1ab1aee224cd096db932"
                .parse::<BindKey>()
                .unwrap()
                .as_bytes(),
            BindKey::from_hex("231D39C1D7CC1AB1AEE224CD096DB932")
                .unwrap()
                .as_bytes()
        );
    }

    #[test]
    fn test_debug_hides_key() {
        let key = BindKey::new([0xAB; 16]);
        let text = format!("{:?}", key);
        assert!(!text.contains("ab") && !text.contains("AB") && !text.contains("171"));
    }
}
