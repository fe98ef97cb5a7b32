//! BTHome object encoding.
//!
//! This module contains the implementations for:
//! - The object id table with scale factors and sizes
//! - Measurement scaling and little-endian encoding
//! - Grouped sensor readings

pub mod measurement;
pub mod object_id;
pub mod readings;

pub use measurement::{encode, Measurement, MeasurementBytes, Reading, MEASUREMENT_MAX_LEN};
pub use object_id::{lookup, ObjectDescriptor, ObjectId, LAST_DEFINED_ID};
pub use readings::AirQualityReading;
