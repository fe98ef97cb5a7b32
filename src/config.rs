//! Advertisement configuration.
//!
//! Everything an [`Advertisement`](crate::Advertisement) needs to know at
//! construction time: the local name, whether to encrypt and with which
//! key, and the optional packet id.

use crate::ble::address::BleAddress;
use crate::crypto::BindKey;

/// Construction parameters for an advertisement.
///
/// # Example
///
/// ```
/// use bthome_adv::{AdvertisementConfig, BindKey};
///
/// let key = BindKey::from_hex("231d39c1d7cc1ab1aee224cd096db932").unwrap();
/// let config = AdvertisementConfig::new()
///     .with_name("MINICO2")
///     .with_encryption(key, "54:48:E6:8F:80:A5".parse().unwrap());
/// assert!(config.encrypt);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AdvertisementConfig {
    /// Complete local name; omitted from the payload when empty.
    pub name: Option<String>,
    /// Encrypt the measurement objects.
    pub encrypt: bool,
    /// Key shared with the receivers. Required when `encrypt` is set.
    pub bind_key: Option<BindKey>,
    /// Address the advertisement is sent from, used in the nonce.
    pub address: Option<BleAddress>,
    /// Counter to start from instead of a random one.
    pub initial_counter: Option<u32>,
    /// Packet id object placed ahead of the measurements.
    pub packet_id: Option<u8>,
}

impl AdvertisementConfig {
    /// Create a config for an unnamed, unencrypted advertisement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the complete local name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Enable encryption with the given key and radio address.
    pub fn with_encryption(mut self, bind_key: BindKey, address: BleAddress) -> Self {
        self.encrypt = true;
        self.bind_key = Some(bind_key);
        self.address = Some(address);
        self
    }

    /// Turn encryption on or off without touching the key.
    pub fn with_encrypt(mut self, encrypt: bool) -> Self {
        self.encrypt = encrypt;
        self
    }

    /// Store a bind key.
    pub fn with_bind_key(mut self, bind_key: BindKey) -> Self {
        self.bind_key = Some(bind_key);
        self
    }

    /// Set the radio address used in the nonce.
    pub fn with_address(mut self, address: BleAddress) -> Self {
        self.address = Some(address);
        self
    }

    /// Start the encryption counter at a fixed value, e.g. one restored
    /// from storage.
    pub fn with_initial_counter(mut self, counter: u32) -> Self {
        self.initial_counter = Some(counter);
        self
    }

    /// Put a packet id object ahead of the measurements.
    pub fn with_packet_id(mut self, packet_id: u8) -> Self {
        self.packet_id = Some(packet_id);
        self
    }

    /// Name to write, if any.
    pub fn local_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}
