//! Encryption frame counter.
//!
//! The counter is part of every nonce and is sent in clear after the
//! ciphertext. Receivers reject frames whose counter does not move forward.

use rand::RngCore;
use tracing::warn;

/// Rolling 32-bit counter, one value per encrypted advertisement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncryptionCounter {
    next: u32,
}

impl EncryptionCounter {
    /// Start at a specific value, e.g. one restored from storage.
    pub fn starting_at(value: u32) -> Self {
        Self { next: value }
    }

    /// Start at a value drawn from `rng`.
    ///
    /// A fresh random start after every boot keeps a restarted device from
    /// replaying counters it used before.
    pub fn seeded<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::starting_at(rng.next_u32())
    }

    /// Start at a value drawn from the operating system's random source.
    pub fn from_os_rng() -> Self {
        Self::seeded(&mut rand::rngs::OsRng)
    }

    /// Value the next encryption will use.
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Take the current value and move to the next one.
    pub fn advance(&mut self) -> u32 {
        let current = self.next;
        self.next = current.wrapping_add(1);
        if self.next == 0 {
            warn!("Encryption counter wrapped around; rotate the bind key");
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_advance() {
        let mut counter = EncryptionCounter::starting_at(41);
        assert_eq!(counter.advance(), 41);
        assert_eq!(counter.advance(), 42);
        assert_eq!(counter.peek(), 43);
    }

    #[test]
    fn test_wraparound() {
        let mut counter = EncryptionCounter::starting_at(u32::MAX);
        assert_eq!(counter.advance(), u32::MAX);
        assert_eq!(counter.peek(), 0);
    }

    #[test]
    fn test_seeded_uses_rng() {
        let mut rng = StepRng::new(0x1234_5678, 1);
        let counter = EncryptionCounter::seeded(&mut rng);
        assert_eq!(counter.peek(), 0x1234_5678);
    }
}
