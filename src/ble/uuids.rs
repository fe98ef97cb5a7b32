//! BLE identifiers and advertising constants.
//!
//! Contains the BTHome service UUID and the AD structure types and flag
//! bits used when building a legacy advertisement.

/// Maximum payload of a legacy advertising PDU.
pub const BLE_ADVERT_MAX_LEN: usize = 31;

// BTHome service (Allterco Robotics assigned 16-bit UUID)
/// BTHome 16-bit service UUID.
pub const BTHOME_SERVICE_UUID_16: u16 = 0xFCD2;

/// BTHome format version carried in the device info byte.
pub const BTHOME_VERSION: u8 = 2;

/// Bit position of the encryption flag in the device info byte.
pub const DEVICE_INFO_ENCRYPTED_SHIFT: u8 = 0;
/// Bit position of the format version in the device info byte.
pub const DEVICE_INFO_VERSION_SHIFT: u8 = 5;

/// AD structure types used in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AdType {
    /// Flags (0x01).
    Flags = 0x01,
    /// Complete local name (0x09).
    CompleteName = 0x09,
    /// Service data with a 16-bit UUID (0x16).
    ServiceData16 = 0x16,
}

impl AdType {
    /// Convert to raw byte value.
    pub fn to_raw(&self) -> u8 {
        *self as u8
    }
}

/// LE General Discoverable Mode flag bit.
pub const FLAG_GENERAL_DISCOVERABLE: u8 = 0x01 << 1;
/// BR/EDR Not Supported flag bit.
pub const FLAG_BREDR_NOT_SUPPORTED: u8 = 0x01 << 2;

/// Build the BTHome device info byte.
pub fn device_info(encrypted: bool) -> u8 {
    ((encrypted as u8) << DEVICE_INFO_ENCRYPTED_SHIFT)
        | (BTHOME_VERSION << DEVICE_INFO_VERSION_SHIFT)
}
