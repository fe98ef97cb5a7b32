//! Device radio address.
//!
//! The encryption nonce starts with the 6-byte Bluetooth address the
//! advertisement is sent from, so the builder reads it through
//! [`RadioAddressSource`] right before encrypting.

use crate::error::{Error, Result};

/// A 6-byte Bluetooth device address, most significant byte first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BleAddress(pub [u8; 6]);

impl BleAddress {
    /// Size of an address in bytes.
    pub const SIZE: usize = 6;

    /// Create from raw bytes.
    pub fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Get the address bytes in nonce order.
    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl std::fmt::Display for BleAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

impl std::str::FromStr for BleAddress {
    type Err = Error;

    /// Parse `AA:BB:CC:DD:EE:FF` (`-` separators and bare hex also accepted).
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidAddress {
            value: s.to_string(),
        };

        let mut bytes = [0u8; 6];
        match s.chars().find(|c| *c == ':' || *c == '-') {
            None => hex::decode_to_slice(s, &mut bytes).map_err(|_| invalid())?,
            Some(separator) => {
                let groups: Vec<&str> = s.split(separator).collect();
                if groups.len() != Self::SIZE || groups.iter().any(|group| group.len() != 2) {
                    return Err(invalid());
                }
                for (byte, group) in bytes.iter_mut().zip(groups) {
                    hex::decode_to_slice(group, std::slice::from_mut(byte))
                        .map_err(|_| invalid())?;
                }
            }
        }
        Ok(Self(bytes))
    }
}

impl From<[u8; 6]> for BleAddress {
    fn from(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }
}

/// Supplies the radio address used in the encryption nonce.
#[cfg_attr(test, mockall::automock)]
pub trait RadioAddressSource {
    /// Read the address the advertisement is transmitted from.
    fn radio_address(&self) -> Result<BleAddress>;
}

impl RadioAddressSource for BleAddress {
    fn radio_address(&self) -> Result<BleAddress> {
        Ok(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colon_separated() {
        let addr: BleAddress = "54:48:E6:8F:80:A5".parse().unwrap();
        assert_eq!(addr.as_bytes(), &[0x54, 0x48, 0xE6, 0x8F, 0x80, 0xA5]);
        assert_eq!(addr.to_string(), "54:48:E6:8F:80:A5");
    }

    #[test]
    fn test_parse_bare_hex() {
        let addr: BleAddress = "5448e68f80a5".parse().unwrap();
        assert_eq!(addr.0[5], 0xA5);
    }

    #[test]
    fn test_parse_invalid() {
        assert!("54:48:E6:8F:80".parse::<BleAddress>().is_err());
        assert!("54:48:E6:8F:80:ZZ".parse::<BleAddress>().is_err());
        assert!("54:48E6:8F:80:A5".parse::<BleAddress>().is_err());
    }

    #[test]
    fn test_parse_rejects_misplaced_separators() {
        for text in [
            "5:448:E6:8F:80:A5",
            "54:48:E6:8F:80A:5",
            "54:48-E6:8F:80:A5",
            ":5448:E6:8F:80:A5",
            "54:48:E6:8F:80:A5:",
        ] {
            assert!(
                matches!(text.parse::<BleAddress>(), Err(Error::InvalidAddress { .. })),
                "accepted {}",
                text
            );
        }
    }

    #[test]
    fn test_parse_dash_separated() {
        let addr: BleAddress = "54-48-e6-8f-80-a5".parse().unwrap();
        assert_eq!(addr, BleAddress::new([0x54, 0x48, 0xE6, 0x8F, 0x80, 0xA5]));
    }

    #[test]
    fn test_fixed_address_source() {
        let addr = BleAddress::new([1, 2, 3, 4, 5, 6]);
        assert_eq!(addr.radio_address(), Ok(addr));
    }
}
