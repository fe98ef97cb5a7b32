//! Measurement encoding.
//!
//! A measurement is one sensor reading turned into a self-contained BTHome
//! object: the object id byte followed by the scaled value in little-endian
//! order, truncated to the width the codec table assigns to that id.

use crate::error::Result;
use crate::protocol::object_id::{ObjectDescriptor, ObjectId};

/// Largest encoded object: id byte plus a four byte value.
pub const MEASUREMENT_MAX_LEN: usize = 5;

/// Encoded bytes of a single measurement.
pub type MeasurementBytes = heapless::Vec<u8, MEASUREMENT_MAX_LEN>;

/// A sensor value before encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Physical quantity, multiplied by the scale factor before encoding.
    Physical(f64),
    /// Value that is already in wire units and is encoded unmodified.
    Scaled(u64),
}

impl From<f64> for Reading {
    fn from(value: f64) -> Self {
        Self::Physical(value)
    }
}

impl From<f32> for Reading {
    fn from(value: f32) -> Self {
        Self::Physical(value as f64)
    }
}

impl From<u64> for Reading {
    fn from(value: u64) -> Self {
        Self::Scaled(value)
    }
}

impl From<u32> for Reading {
    fn from(value: u32) -> Self {
        Self::Scaled(value as u64)
    }
}

impl From<u16> for Reading {
    fn from(value: u16) -> Self {
        Self::Scaled(value as u64)
    }
}

impl From<u8> for Reading {
    fn from(value: u8) -> Self {
        Self::Scaled(value as u64)
    }
}

impl From<bool> for Reading {
    fn from(value: bool) -> Self {
        Self::Scaled(value as u64)
    }
}

/// One encoded-ready BTHome object.
///
/// # Example
///
/// ```
/// use bthome_adv::protocol::{Measurement, ObjectId};
///
/// let temp = Measurement::new(ObjectId::TemperaturePrecise, 21.34);
/// assert_eq!(temp.to_bytes().as_slice(), &[0x02, 0x56, 0x08]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Measurement {
    object_id: ObjectId,
    scaled_value: u64,
}

impl Measurement {
    /// Create a measurement from a physical value.
    ///
    /// The value is multiplied by the id's scale factor and rounded to the
    /// nearest integer. Negative values keep their two's-complement bit
    /// pattern so signed quantities encode correctly at their fixed width.
    pub fn new(object_id: ObjectId, value: f64) -> Self {
        Self::with_reading(object_id, Reading::Physical(value))
    }

    /// Create a measurement from a value already in wire units.
    pub fn from_raw(object_id: ObjectId, scaled_value: u64) -> Self {
        Self {
            object_id,
            scaled_value,
        }
    }

    /// Create a measurement from either kind of reading.
    pub fn with_reading(object_id: ObjectId, reading: impl Into<Reading>) -> Self {
        let scaled_value = match reading.into() {
            Reading::Physical(value) => scale(value, object_id.descriptor().scale_factor),
            Reading::Scaled(value) => value,
        };

        Self {
            object_id,
            scaled_value,
        }
    }

    /// Create a measurement from a raw object id byte.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidObjectId`] when the id is not in the
    /// codec table.
    pub fn from_id(object_id: u8, reading: impl Into<Reading>) -> Result<Self> {
        let object_id = ObjectId::try_from(object_id)?;
        Ok(Self::with_reading(object_id, reading))
    }

    /// Create a packet id measurement.
    pub fn packet_id(id: u8) -> Self {
        Self::from_raw(ObjectId::PacketId, id as u64)
    }

    /// Get the object id.
    pub fn object_id(&self) -> ObjectId {
        self.object_id
    }

    /// Get the scaled value before width truncation.
    pub fn scaled_value(&self) -> u64 {
        self.scaled_value
    }

    /// Get the wire descriptor for this measurement.
    pub fn descriptor(&self) -> ObjectDescriptor {
        self.object_id.descriptor()
    }

    /// Number of bytes this measurement occupies in a payload.
    pub fn encoded_len(&self) -> usize {
        self.descriptor().object_size()
    }

    /// Encode to `[object_id][value LE, encoded_length bytes]`.
    pub fn to_bytes(&self) -> MeasurementBytes {
        let length = self.descriptor().encoded_length as usize;
        let mut raw = [0u8; MEASUREMENT_MAX_LEN];
        raw[0] = self.object_id.to_raw();
        raw[1..].copy_from_slice(&self.scaled_value.to_le_bytes()[..MEASUREMENT_MAX_LEN - 1]);

        // The array and the buffer share a capacity, so collecting cannot overflow.
        let mut bytes: MeasurementBytes = raw.into_iter().collect();
        bytes.truncate(1 + length);
        bytes
    }

    /// The value as it will be decoded by a receiver, in physical units.
    ///
    /// Values wider than the field are reported after truncation, which is
    /// what goes on the air.
    pub fn physical_value(&self) -> f64 {
        let descriptor = self.descriptor();
        let bits = descriptor.encoded_length as u32 * 8;
        let on_wire = self.scaled_value & (u64::MAX >> (64 - bits));
        on_wire as f64 / descriptor.scale_factor as f64
    }
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.object_id.name(), self.physical_value())
    }
}

/// Encode one reading for a raw object id.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidObjectId`] when the id is not in the
/// codec table.
///
/// # Example
///
/// ```
/// use bthome_adv::protocol::encode;
///
/// let co2 = encode(0x12, 812u16).unwrap();
/// assert_eq!(co2.as_slice(), &[0x12, 0x2C, 0x03]);
/// ```
pub fn encode(object_id: u8, value: impl Into<Reading>) -> Result<MeasurementBytes> {
    Measurement::from_id(object_id, value).map(|m| m.to_bytes())
}

fn scale(value: f64, factor: u16) -> u64 {
    // Saturating float-to-int cast, then reinterpret so negatives wrap.
    (value * factor as f64).round() as i64 as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_float_path_scales_and_rounds() {
        let temp = Measurement::new(ObjectId::TemperaturePrecise, 21.34);
        assert_eq!(temp.scaled_value(), 2134);
        assert_eq!(temp.to_bytes().as_slice(), &[0x02, 0x56, 0x08]);

        let humidity = Measurement::new(ObjectId::HumidityPrecise, 55.12);
        assert_eq!(humidity.scaled_value(), 5512);
        assert_eq!(humidity.to_bytes().as_slice(), &[0x03, 0x88, 0x15]);
    }

    #[test]
    fn test_integer_path_is_unmodified() {
        let co2 = Measurement::from_raw(ObjectId::Co2, 812);
        assert_eq!(co2.to_bytes().as_slice(), &[0x12, 0x2C, 0x03]);

        // Integer readings bypass the factor even when it is not 1.
        let temp = Measurement::with_reading(ObjectId::TemperaturePrecise, 2134u16);
        assert_eq!(temp.scaled_value(), 2134);
    }

    #[test]
    fn test_three_byte_value() {
        // 1013.25 hPa -> 101325 = 0x018BCD
        let pressure = Measurement::new(ObjectId::Pressure, 1013.25);
        assert_eq!(pressure.to_bytes().as_slice(), &[0x04, 0xCD, 0x8B, 0x01]);
    }

    #[test]
    fn test_four_byte_value() {
        let count = Measurement::from_raw(ObjectId::CountLarge, 0x1234_5678);
        assert_eq!(
            count.to_bytes().as_slice(),
            &[0x3E, 0x78, 0x56, 0x34, 0x12]
        );
        assert_eq!(count.encoded_len(), MEASUREMENT_MAX_LEN);
    }

    #[test]
    fn test_oversized_value_wraps() {
        let battery = Measurement::from_raw(ObjectId::Battery, 0x1FF);
        assert_eq!(battery.to_bytes().as_slice(), &[0x01, 0xFF]);
        assert!((battery.physical_value() - 255.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_value_encodes_twos_complement() {
        // -5.5 °C -> -550 -> 0xFDDA
        let temp = Measurement::new(ObjectId::TemperaturePrecise, -5.5);
        assert_eq!(temp.to_bytes().as_slice(), &[0x02, 0xDA, 0xFD]);
    }

    #[test]
    fn test_encoded_length_matches_table() {
        for id in ObjectId::ALL {
            let m = Measurement::from_raw(id, 0);
            let bytes = m.to_bytes();
            assert_eq!(bytes.len(), 1 + id.descriptor().encoded_length as usize);
            assert_eq!(bytes[0], id.to_raw());
        }
    }

    #[test]
    fn test_wide_values_are_cut_to_field_width() {
        for id in ObjectId::ALL {
            let bytes = Measurement::from_raw(id, u64::MAX).to_bytes();
            assert_eq!(bytes.len(), id.descriptor().object_size());
            assert_eq!(bytes[0], id.to_raw());
            assert!(bytes[1..].iter().all(|b| *b == 0xFF), "{}", id);
        }

        let co2 = Measurement::from_raw(ObjectId::Co2, 0x0012_032C);
        assert_eq!(co2.to_bytes().as_slice(), &[0x12, 0x2C, 0x03]);
    }

    #[test]
    fn test_from_id_rejects_unknown() {
        assert_eq!(
            Measurement::from_id(0x30, 1.0),
            Err(Error::InvalidObjectId { id: 0x30 })
        );
        assert!(encode(0xFF, 1u8).is_err());
    }

    #[test]
    fn test_encode_fn() {
        let bytes = encode(0x0C, 3.3).unwrap();
        // 3.3 V * 1000 = 3300 = 0x0CE4
        assert_eq!(bytes.as_slice(), &[0x0C, 0xE4, 0x0C]);
    }

    #[test]
    fn test_bool_reading() {
        let door = Measurement::with_reading(ObjectId::DoorState, true);
        assert_eq!(door.to_bytes().as_slice(), &[0x1A, 0x01]);
    }

    #[test]
    fn test_packet_id() {
        let packet = Measurement::packet_id(9);
        assert_eq!(packet.to_bytes().as_slice(), &[0x00, 0x09]);
    }

    #[test]
    fn test_physical_value() {
        let temp = Measurement::new(ObjectId::TemperaturePrecise, 21.34);
        assert!((temp.physical_value() - 21.34).abs() < 0.005);
        assert_eq!(temp.to_string(), "temperature=21.34");
    }
}
