//! AES-CCM payload encryption.
//!
//! BTHome encrypts the measurement objects with AES-128-CCM using a 13-byte
//! nonce, a 4-byte tag and no associated data.
//!
//! Nonce layout:
//! - Bytes 0-5: device radio address
//! - Bytes 6-7: service UUID (little-endian)
//! - Byte 8: device info byte
//! - Bytes 9-12: counter (little-endian)

use aes::Aes128;
use ccm::aead::generic_array::GenericArray;
use ccm::aead::{AeadInPlace, KeyInit};
use ccm::consts::{U13, U4};
use ccm::Ccm;

use crate::ble::address::BleAddress;
use crate::crypto::bind_key::BindKey;
use crate::error::{Error, Result};

/// Nonce size in bytes.
pub const NONCE_LEN: usize = 13;
/// Message integrity check size in bytes.
pub const MIC_LEN: usize = 4;
/// Clear-text counter size in bytes.
pub const COUNTER_LEN: usize = 4;

type BtHomeCcm = Ccm<Aes128, U4, U13>;

/// Nonce for one encrypted advertisement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    /// Build the nonce from its four parts.
    pub fn new(address: &BleAddress, service_uuid: u16, device_info: u8, counter: u32) -> Self {
        let mut bytes = [0u8; NONCE_LEN];
        bytes[0..6].copy_from_slice(address.as_bytes());
        bytes[6..8].copy_from_slice(&service_uuid.to_le_bytes());
        bytes[8] = device_info;
        bytes[9..13].copy_from_slice(&counter.to_le_bytes());
        Self(bytes)
    }

    /// Get the nonce bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }

    /// Counter value embedded in the nonce.
    pub fn counter(&self) -> u32 {
        u32::from_le_bytes([self.0[9], self.0[10], self.0[11], self.0[12]])
    }
}

/// AES-128-CCM context keyed with a bind key.
pub struct PayloadCipher {
    cipher: BtHomeCcm,
}

impl PayloadCipher {
    /// Initialize the cipher.
    pub fn new(key: &BindKey) -> Result<Self> {
        let cipher =
            BtHomeCcm::new_from_slice(key.as_bytes()).map_err(|e| Error::EncryptionFailure {
                reason: format!("cipher init: {}", e),
            })?;
        Ok(Self { cipher })
    }

    /// Encrypt `buffer` in place and return the MIC.
    ///
    /// On failure the contents of `buffer` are unspecified; callers should
    /// pass a scratch copy.
    pub fn encrypt_in_place(&self, nonce: &Nonce, buffer: &mut [u8]) -> Result<[u8; MIC_LEN]> {
        let tag = self
            .cipher
            .encrypt_in_place_detached(GenericArray::from_slice(nonce.as_bytes()), &[], buffer)
            .map_err(|e| Error::EncryptionFailure {
                reason: format!("ccm encrypt: {}", e),
            })?;

        let mut mic = [0u8; MIC_LEN];
        mic.copy_from_slice(&tag);
        Ok(mic)
    }
}

impl std::fmt::Debug for PayloadCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PayloadCipher(AES-128-CCM)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ble::uuids::BTHOME_SERVICE_UUID_16;
    use pretty_assertions::assert_eq;

    fn test_key() -> BindKey {
        BindKey::from_hex("231d39c1d7cc1ab1aee224cd096db932").unwrap()
    }

    fn test_address() -> BleAddress {
        BleAddress::new([0x54, 0x48, 0xE6, 0x8F, 0x80, 0xA5])
    }

    #[test]
    fn test_nonce_layout() {
        let nonce = Nonce::new(&test_address(), BTHOME_SERVICE_UUID_16, 0x41, 0x3322_1100);
        assert_eq!(
            nonce.as_bytes(),
            &[0x54, 0x48, 0xE6, 0x8F, 0x80, 0xA5, 0xD2, 0xFC, 0x41, 0x00, 0x11, 0x22, 0x33]
        );
        assert_eq!(nonce.counter(), 0x3322_1100);
    }

    #[test]
    fn test_nonce_changes_with_each_part() {
        let base = Nonce::new(&test_address(), BTHOME_SERVICE_UUID_16, 0x41, 7);
        assert_ne!(base, Nonce::new(&test_address(), BTHOME_SERVICE_UUID_16, 0x41, 8));
        assert_ne!(base, Nonce::new(&test_address(), BTHOME_SERVICE_UUID_16, 0x40, 7));
        assert_ne!(base, Nonce::new(&test_address(), 0xFCD3, 0x41, 7));
        assert_ne!(
            base,
            Nonce::new(&BleAddress::new([0; 6]), BTHOME_SERVICE_UUID_16, 0x41, 7)
        );
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let cipher = PayloadCipher::new(&test_key()).unwrap();
        let nonce = Nonce::new(&test_address(), BTHOME_SERVICE_UUID_16, 0x41, 1);
        let plaintext = [0x02, 0xCA, 0x09, 0x03, 0xBF, 0x13];

        let mut buffer = plaintext;
        let mic = cipher.encrypt_in_place(&nonce, &mut buffer).unwrap();
        assert_ne!(buffer, plaintext);

        let decryptor = BtHomeCcm::new_from_slice(test_key().as_bytes()).unwrap();
        decryptor
            .decrypt_in_place_detached(
                GenericArray::from_slice(nonce.as_bytes()),
                &[],
                &mut buffer,
                GenericArray::from_slice(&mic),
            )
            .unwrap();
        assert_eq!(buffer, plaintext);
    }

    #[test]
    fn test_tampered_ciphertext_fails_authentication() {
        let cipher = PayloadCipher::new(&test_key()).unwrap();
        let nonce = Nonce::new(&test_address(), BTHOME_SERVICE_UUID_16, 0x41, 1);

        let mut buffer = [0x12, 0x2C, 0x03];
        let mic = cipher.encrypt_in_place(&nonce, &mut buffer).unwrap();
        buffer[0] ^= 0x01;

        let decryptor = BtHomeCcm::new_from_slice(test_key().as_bytes()).unwrap();
        let result = decryptor.decrypt_in_place_detached(
            GenericArray::from_slice(nonce.as_bytes()),
            &[],
            &mut buffer,
            GenericArray::from_slice(&mic),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_plaintext_still_produces_mic() {
        let cipher = PayloadCipher::new(&test_key()).unwrap();
        let nonce = Nonce::new(&test_address(), BTHOME_SERVICE_UUID_16, 0x41, 1);
        let mut buffer: [u8; 0] = [];
        let mic = cipher.encrypt_in_place(&nonce, &mut buffer).unwrap();
        assert_eq!(mic.len(), MIC_LEN);
    }
}
