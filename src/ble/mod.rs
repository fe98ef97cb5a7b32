//! BLE advertisement module.
//!
//! This module provides the pieces of a BTHome legacy advertisement:
//! the bounded payload buffer, AD type constants, the radio address and
//! the advertisement builder itself.

pub mod address;
pub mod advertisement;
pub mod buffer;
pub mod uuids;

pub use address::{BleAddress, RadioAddressSource};
pub use advertisement::{Advertisement, BuildState};
pub use buffer::AdvertisingBuffer;
pub use uuids::*;
