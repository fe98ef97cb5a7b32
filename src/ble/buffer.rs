//! Bounded advertisement buffer.
//!
//! Every write is checked against the 31-byte legacy limit. A write that
//! does not fit is rejected whole and leaves the buffer as it was.

use crate::ble::uuids::BLE_ADVERT_MAX_LEN;
use crate::error::{Error, Result};

/// Fixed-capacity byte buffer for one legacy advertisement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvertisingBuffer {
    data: heapless::Vec<u8, BLE_ADVERT_MAX_LEN>,
}

impl AdvertisingBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes still free.
    pub fn remaining(&self) -> usize {
        BLE_ADVERT_MAX_LEN - self.data.len()
    }

    /// Append one byte.
    pub fn push(&mut self, byte: u8) -> Result<()> {
        self.data.push(byte).map_err(|_| Error::PayloadOverflow {
            needed: 1,
            available: 0,
        })
    }

    /// Append all of `bytes`, or nothing.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<()> {
        let available = self.remaining();
        if bytes.len() > available {
            return Err(Error::PayloadOverflow {
                needed: bytes.len(),
                available,
            });
        }

        self.data
            .extend_from_slice(bytes)
            .map_err(|_| Error::PayloadOverflow {
                needed: bytes.len(),
                available,
            })
    }

    /// Get a previously written byte.
    pub fn get(&self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    /// Overwrite a previously written byte.
    pub fn set(&mut self, offset: usize, byte: u8) -> Result<()> {
        let len = self.data.len();
        let slot = self.data.get_mut(offset).ok_or(Error::PayloadOverflow {
            needed: offset + 1,
            available: len,
        })?;
        *slot = byte;
        Ok(())
    }

    /// Add `amount` to a previously written byte.
    pub fn add_to(&mut self, offset: usize, amount: u8) -> Result<()> {
        let current = self.get(offset).ok_or(Error::PayloadOverflow {
            needed: offset + 1,
            available: self.data.len(),
        })?;
        self.set(offset, current.wrapping_add(amount))
    }

    /// Mutable view of already written bytes from `start` to the end.
    pub fn tail_mut(&mut self, start: usize) -> &mut [u8] {
        let start = start.min(self.data.len());
        &mut self.data[start..]
    }

    /// Written bytes from `start` to the end.
    pub fn tail(&self, start: usize) -> &[u8] {
        let start = start.min(self.data.len());
        &self.data[start..]
    }

    /// Discard all written bytes, keeping the storage.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the written bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl AsRef<[u8]> for AdvertisingBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut buf = AdvertisingBuffer::new();
        for i in 0..BLE_ADVERT_MAX_LEN {
            buf.push(i as u8).unwrap();
        }
        assert_eq!(buf.remaining(), 0);
        assert!(matches!(
            buf.push(0xFF),
            Err(Error::PayloadOverflow { .. })
        ));
        assert_eq!(buf.len(), BLE_ADVERT_MAX_LEN);
    }

    #[test]
    fn test_extend_is_all_or_nothing() {
        let mut buf = AdvertisingBuffer::new();
        buf.extend_from_slice(&[0u8; 29]).unwrap();

        let result = buf.extend_from_slice(&[1, 2, 3]);
        assert_eq!(
            result,
            Err(Error::PayloadOverflow {
                needed: 3,
                available: 2
            })
        );
        assert_eq!(buf.len(), 29);

        buf.extend_from_slice(&[1, 2]).unwrap();
        assert_eq!(buf.len(), BLE_ADVERT_MAX_LEN);
    }

    #[test]
    fn test_set_and_add_to() {
        let mut buf = AdvertisingBuffer::new();
        buf.extend_from_slice(&[3, 0x16]).unwrap();
        buf.add_to(0, 2).unwrap();
        assert_eq!(buf.get(0), Some(5));

        buf.set(1, 0x09).unwrap();
        assert_eq!(buf.as_slice(), &[5, 0x09]);

        assert!(buf.set(2, 0).is_err());
        assert!(buf.add_to(7, 1).is_err());
    }

    #[test]
    fn test_tail() {
        let mut buf = AdvertisingBuffer::new();
        buf.extend_from_slice(&[1, 2, 3, 4]).unwrap();
        buf.tail_mut(2).copy_from_slice(&[9, 9]);
        assert_eq!(buf.tail(1), &[2, 9, 9]);
        assert!(buf.tail(10).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut buf = AdvertisingBuffer::new();
        buf.extend_from_slice(&[1, 2, 3]).unwrap();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.remaining(), BLE_ADVERT_MAX_LEN);
    }
}
