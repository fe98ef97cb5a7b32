//! # bthome-adv
//!
//! A Rust library for building BTHome v2 sensor advertisements that fit in
//! a single 31-byte legacy BLE advertising packet.
//!
//! ## Features
//!
//! - **Object Table**: Scale factors and sizes for every BTHome v2 object id
//! - **Measurement Encoding**: Physical values scaled to little-endian integers
//! - **Advertisement Builder**: Flags, local name and service data with length
//!   bookkeeping and overflow protection
//! - **Encryption**: AES-128-CCM with a rolling counter and 4-byte MIC
//!
//! ## Quick Start
//!
//! ```rust
//! use bthome_adv::{Advertisement, AdvertisementConfig, AirQualityReading, Result};
//!
//! fn main() -> Result<()> {
//!     let mut adv = Advertisement::new(AdvertisementConfig::new().with_name("MINICO2"))?;
//!
//!     let reading = AirQualityReading::new(812, 21.34, 55.12);
//!     adv.add_measurements(reading.measurements())?;
//!
//!     let payload = adv.finalize_payload()?;
//!     assert_eq!(payload.len(), 26);
//!     Ok(())
//! }
//! ```
//!
//! The payload is handed to the radio as-is; this crate does not transmit.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for data types

// Public modules
pub mod ble;
pub mod config;
pub mod crypto;
pub mod error;
pub mod protocol;
pub mod utils;

// Re-exports for convenience
pub use ble::{Advertisement, BleAddress, BuildState, RadioAddressSource};
pub use config::AdvertisementConfig;
pub use crypto::BindKey;
pub use error::{Error, Result};
pub use protocol::{AirQualityReading, Measurement, ObjectId};
