//! Payload encryption.
//!
//! This module contains:
//! - The bind key type
//! - The rolling encryption counter
//! - Nonce construction and the AES-CCM wrapper

pub mod bind_key;
pub mod cipher;
pub mod counter;

pub use bind_key::BindKey;
pub use cipher::{Nonce, PayloadCipher, COUNTER_LEN, MIC_LEN, NONCE_LEN};
pub use counter::EncryptionCounter;
