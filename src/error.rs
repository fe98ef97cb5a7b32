//! Error types for the bthome-adv crate.

use thiserror::Error;

/// The main error type for this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The object id is not part of the BTHome codec table.
    #[error("Invalid BTHome object id: {id:#04x}")]
    InvalidObjectId {
        /// The rejected object id.
        id: u8,
    },

    /// Appending would push the advertisement past the legacy size limit.
    #[error("Advertisement payload overflow: need {needed} bytes, {available} available")]
    PayloadOverflow {
        /// Number of bytes the rejected append required.
        needed: usize,
        /// Number of bytes still free in the payload.
        available: usize,
    },

    /// The AES-CCM operation failed.
    #[error("Encryption failed: {reason}")]
    EncryptionFailure {
        /// Description of the failure.
        reason: String,
    },

    /// Encryption was requested but no bind key was configured.
    #[error("Encryption requested without a bind key")]
    MissingBindKey,

    /// A bind key could not be parsed.
    #[error("Invalid bind key: {reason}")]
    InvalidBindKey {
        /// Why the key was rejected.
        reason: String,
    },

    /// A radio address string could not be parsed.
    #[error("Invalid radio address: {value}")]
    InvalidAddress {
        /// The rejected input.
        value: String,
    },

    /// The device radio address could not be read.
    #[error("Radio address unavailable: {reason}")]
    AddressUnavailable {
        /// Description of why the address could not be read.
        reason: String,
    },

    /// The advertisement was already finalized; call `reset` first.
    #[error("Advertisement already finalized")]
    AlreadyFinalized,
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
