//! BTHome object ids and their wire descriptors.
//!
//! Each measurement type broadcast in a BTHome v2 payload is identified by a
//! one-byte object id. The id decides how the value is scaled before it goes
//! on the wire and how many little-endian bytes it occupies.
//!
//! Object id values per the BTHome v2 format:
//! <https://bthome.io/format/>

use crate::error::{Error, Result};

/// First object id past the end of the table.
pub const LAST_DEFINED_ID: u8 = 0x47;

/// Scale factor and width of one object id on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectDescriptor {
    /// Object id this descriptor belongs to.
    pub object_id: ObjectId,
    /// Multiplier applied to a physical value before encoding.
    pub scale_factor: u16,
    /// Number of little-endian value bytes (1-4).
    pub encoded_length: u8,
}

impl ObjectDescriptor {
    const fn new(object_id: ObjectId, scale_factor: u16, encoded_length: u8) -> Self {
        Self {
            object_id,
            scale_factor,
            encoded_length,
        }
    }

    /// Total size of an encoded object, id byte included.
    pub fn object_size(&self) -> usize {
        1 + self.encoded_length as usize
    }

    /// Smallest physical step representable with this factor.
    pub fn resolution(&self) -> f64 {
        1.0 / self.scale_factor as f64
    }
}

/// Measurement types understood by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ObjectId {
    /// Packet id, used by receivers to drop duplicates.
    PacketId = 0x00,
    /// Battery level in percent.
    Battery = 0x01,
    /// Temperature in °C, 0.01 resolution.
    TemperaturePrecise = 0x02,
    /// Relative humidity in percent, 0.01 resolution.
    HumidityPrecise = 0x03,
    /// Pressure in hPa.
    Pressure = 0x04,
    /// Illuminance in lux.
    Illuminance = 0x05,
    /// Mass in kilograms.
    MassKilos = 0x06,
    /// Mass in pounds.
    MassPounds = 0x07,
    /// Dew point in °C.
    DewPoint = 0x08,
    /// Count, one byte.
    CountSmall = 0x09,
    /// Energy in kWh.
    Energy = 0x0A,
    /// Power in W.
    Power = 0x0B,
    /// Voltage in V.
    Voltage = 0x0C,
    /// PM2.5 in µg/m³.
    Pm2_5 = 0x0D,
    /// PM10 in µg/m³.
    Pm10 = 0x0E,
    /// Generic boolean.
    GenericBool = 0x0F,
    /// Power on/off.
    PowerState = 0x10,
    /// Open/closed.
    OpeningState = 0x11,
    /// CO2 in ppm.
    Co2 = 0x12,
    /// Total volatile organic compounds in µg/m³.
    TotalVoc = 0x13,
    /// Moisture in percent, 0.01 resolution.
    MoisturePrecise = 0x14,
    /// Battery low.
    BatteryState = 0x15,
    /// Battery charging.
    BatteryChargeState = 0x16,
    /// Carbon monoxide detected.
    CarbonMonoxideState = 0x17,
    /// Cold.
    ColdState = 0x18,
    /// Connected.
    ConnectivityState = 0x19,
    /// Door open.
    DoorState = 0x1A,
    /// Garage door open.
    GarageDoorState = 0x1B,
    /// Gas detected.
    GasState = 0x1C,
    /// Hot.
    HeatState = 0x1D,
    /// Light detected.
    LightState = 0x1E,
    /// Unlocked.
    LockState = 0x1F,
    /// Wet.
    MoistureState = 0x20,
    /// Motion detected.
    MotionState = 0x21,
    /// Moving.
    MovingState = 0x22,
    /// Occupied.
    OccupancyState = 0x23,
    /// Plugged in.
    PlugState = 0x24,
    /// Present.
    PresenceState = 0x25,
    /// Problem.
    ProblemState = 0x26,
    /// Running.
    RunningState = 0x27,
    /// Unsafe.
    SafetyState = 0x28,
    /// Smoke detected.
    SmokeState = 0x29,
    /// Sound detected.
    SoundState = 0x2A,
    /// Tampered.
    TamperState = 0x2B,
    /// Vibration detected.
    VibrationState = 0x2C,
    /// Window open.
    WindowState = 0x2D,
    /// Relative humidity in percent, 1% resolution.
    HumidityCoarse = 0x2E,
    /// Moisture in percent, 1% resolution.
    MoistureCoarse = 0x2F,
    /// Button event.
    ButtonEvent = 0x3A,
    /// Dimmer event (event byte + steps).
    DimmerEvent = 0x3C,
    /// Count, two bytes.
    CountMedium = 0x3D,
    /// Count, four bytes.
    CountLarge = 0x3E,
    /// Rotation in degrees.
    Rotation = 0x3F,
    /// Distance in millimetres.
    DistanceMillimeters = 0x40,
    /// Distance in metres.
    DistanceMeters = 0x41,
    /// Duration in seconds.
    Duration = 0x42,
    /// Current in A.
    Current = 0x43,
    /// Speed in m/s.
    Speed = 0x44,
    /// Temperature in °C, 0.1 resolution.
    TemperatureCoarse = 0x45,
    /// UV index.
    UvIndex = 0x46,
}

impl ObjectId {
    /// Every defined object id, in ascending order.
    pub const ALL: [ObjectId; 60] = [
        Self::PacketId,
        Self::Battery,
        Self::TemperaturePrecise,
        Self::HumidityPrecise,
        Self::Pressure,
        Self::Illuminance,
        Self::MassKilos,
        Self::MassPounds,
        Self::DewPoint,
        Self::CountSmall,
        Self::Energy,
        Self::Power,
        Self::Voltage,
        Self::Pm2_5,
        Self::Pm10,
        Self::GenericBool,
        Self::PowerState,
        Self::OpeningState,
        Self::Co2,
        Self::TotalVoc,
        Self::MoisturePrecise,
        Self::BatteryState,
        Self::BatteryChargeState,
        Self::CarbonMonoxideState,
        Self::ColdState,
        Self::ConnectivityState,
        Self::DoorState,
        Self::GarageDoorState,
        Self::GasState,
        Self::HeatState,
        Self::LightState,
        Self::LockState,
        Self::MoistureState,
        Self::MotionState,
        Self::MovingState,
        Self::OccupancyState,
        Self::PlugState,
        Self::PresenceState,
        Self::ProblemState,
        Self::RunningState,
        Self::SafetyState,
        Self::SmokeState,
        Self::SoundState,
        Self::TamperState,
        Self::VibrationState,
        Self::WindowState,
        Self::HumidityCoarse,
        Self::MoistureCoarse,
        Self::ButtonEvent,
        Self::DimmerEvent,
        Self::CountMedium,
        Self::CountLarge,
        Self::Rotation,
        Self::DistanceMillimeters,
        Self::DistanceMeters,
        Self::Duration,
        Self::Current,
        Self::Speed,
        Self::TemperatureCoarse,
        Self::UvIndex,
    ];

    /// Create from raw byte value.
    ///
    /// Returns `None` for ids at or past [`LAST_DEFINED_ID`] and for the
    /// unassigned gaps inside the table.
    pub fn from_raw(value: u8) -> Option<Self> {
        if value >= LAST_DEFINED_ID {
            return None;
        }

        let id = match value {
            0x00 => Self::PacketId,
            0x01 => Self::Battery,
            0x02 => Self::TemperaturePrecise,
            0x03 => Self::HumidityPrecise,
            0x04 => Self::Pressure,
            0x05 => Self::Illuminance,
            0x06 => Self::MassKilos,
            0x07 => Self::MassPounds,
            0x08 => Self::DewPoint,
            0x09 => Self::CountSmall,
            0x0A => Self::Energy,
            0x0B => Self::Power,
            0x0C => Self::Voltage,
            0x0D => Self::Pm2_5,
            0x0E => Self::Pm10,
            0x0F => Self::GenericBool,
            0x10 => Self::PowerState,
            0x11 => Self::OpeningState,
            0x12 => Self::Co2,
            0x13 => Self::TotalVoc,
            0x14 => Self::MoisturePrecise,
            0x15 => Self::BatteryState,
            0x16 => Self::BatteryChargeState,
            0x17 => Self::CarbonMonoxideState,
            0x18 => Self::ColdState,
            0x19 => Self::ConnectivityState,
            0x1A => Self::DoorState,
            0x1B => Self::GarageDoorState,
            0x1C => Self::GasState,
            0x1D => Self::HeatState,
            0x1E => Self::LightState,
            0x1F => Self::LockState,
            0x20 => Self::MoistureState,
            0x21 => Self::MotionState,
            0x22 => Self::MovingState,
            0x23 => Self::OccupancyState,
            0x24 => Self::PlugState,
            0x25 => Self::PresenceState,
            0x26 => Self::ProblemState,
            0x27 => Self::RunningState,
            0x28 => Self::SafetyState,
            0x29 => Self::SmokeState,
            0x2A => Self::SoundState,
            0x2B => Self::TamperState,
            0x2C => Self::VibrationState,
            0x2D => Self::WindowState,
            0x2E => Self::HumidityCoarse,
            0x2F => Self::MoistureCoarse,
            0x3A => Self::ButtonEvent,
            0x3C => Self::DimmerEvent,
            0x3D => Self::CountMedium,
            0x3E => Self::CountLarge,
            0x3F => Self::Rotation,
            0x40 => Self::DistanceMillimeters,
            0x41 => Self::DistanceMeters,
            0x42 => Self::Duration,
            0x43 => Self::Current,
            0x44 => Self::Speed,
            0x45 => Self::TemperatureCoarse,
            0x46 => Self::UvIndex,
            _ => return None,
        };

        Some(id)
    }

    /// Convert to raw byte value.
    pub fn to_raw(&self) -> u8 {
        *self as u8
    }

    /// Wire descriptor for this id.
    pub fn descriptor(&self) -> ObjectDescriptor {
        let (factor, length) = match self {
            Self::PacketId | Self::Battery => (1, 1),
            Self::TemperaturePrecise | Self::HumidityPrecise => (100, 2),
            Self::Pressure | Self::Illuminance => (100, 3),
            Self::MassKilos | Self::MassPounds | Self::DewPoint => (100, 2),
            Self::CountSmall => (1, 1),
            Self::Energy | Self::Power => (100, 3),
            Self::Voltage => (1000, 2),
            Self::Pm2_5 | Self::Pm10 => (1, 2),
            Self::GenericBool | Self::PowerState | Self::OpeningState => (1, 1),
            Self::Co2 => (1, 2),
            Self::TotalVoc => (1, 1),
            Self::MoisturePrecise => (100, 2),
            Self::BatteryState
            | Self::BatteryChargeState
            | Self::CarbonMonoxideState
            | Self::ColdState
            | Self::ConnectivityState
            | Self::DoorState
            | Self::GarageDoorState
            | Self::GasState
            | Self::HeatState
            | Self::LightState
            | Self::LockState
            | Self::MoistureState
            | Self::MotionState
            | Self::MovingState
            | Self::OccupancyState
            | Self::PlugState
            | Self::PresenceState
            | Self::ProblemState
            | Self::RunningState
            | Self::SafetyState
            | Self::SmokeState
            | Self::SoundState
            | Self::TamperState
            | Self::VibrationState
            | Self::WindowState => (1, 1),
            Self::HumidityCoarse | Self::MoistureCoarse => (1, 1),
            Self::ButtonEvent => (1, 1),
            Self::DimmerEvent => (1, 2),
            Self::CountMedium => (1, 2),
            Self::CountLarge => (1, 4),
            Self::Rotation => (10, 2),
            Self::DistanceMillimeters => (1, 2),
            Self::DistanceMeters => (10, 2),
            Self::Duration => (1000, 3),
            Self::Current => (1000, 2),
            Self::Speed => (100, 2),
            Self::TemperatureCoarse => (10, 2),
            Self::UvIndex => (10, 1),
        };

        ObjectDescriptor::new(*self, factor, length)
    }

    /// Get a human-readable name for this id.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PacketId => "packet id",
            Self::Battery => "battery",
            Self::TemperaturePrecise | Self::TemperatureCoarse => "temperature",
            Self::HumidityPrecise | Self::HumidityCoarse => "humidity",
            Self::Pressure => "pressure",
            Self::Illuminance => "illuminance",
            Self::MassKilos | Self::MassPounds => "mass",
            Self::DewPoint => "dew point",
            Self::CountSmall | Self::CountMedium | Self::CountLarge => "count",
            Self::Energy => "energy",
            Self::Power => "power",
            Self::Voltage => "voltage",
            Self::Pm2_5 => "pm2.5",
            Self::Pm10 => "pm10",
            Self::Co2 => "co2",
            Self::TotalVoc => "tvoc",
            Self::MoisturePrecise | Self::MoistureCoarse => "moisture",
            Self::ButtonEvent => "button",
            Self::DimmerEvent => "dimmer",
            Self::Rotation => "rotation",
            Self::DistanceMillimeters | Self::DistanceMeters => "distance",
            Self::Duration => "duration",
            Self::Current => "current",
            Self::Speed => "speed",
            Self::UvIndex => "uv index",
            _ => "binary sensor",
        }
    }
}

impl TryFrom<u8> for ObjectId {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::from_raw(value).ok_or(Error::InvalidObjectId { id: value })
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:#04x})", self.name(), self.to_raw())
    }
}

/// Look up the wire descriptor for a raw object id.
///
/// # Errors
///
/// Returns [`Error::InvalidObjectId`] when the id is not in the table.
///
/// # Example
///
/// ```
/// use bthome_adv::protocol::lookup;
///
/// let co2 = lookup(0x12).unwrap();
/// assert_eq!(co2.scale_factor, 1);
/// assert_eq!(co2.encoded_length, 2);
///
/// assert!(lookup(0x47).is_err());
/// ```
pub fn lookup(object_id: u8) -> Result<ObjectDescriptor> {
    ObjectId::try_from(object_id).map(|id| id.descriptor())
}
