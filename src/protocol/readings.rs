//! Air quality sensor snapshots.
//!
//! The CO2 monitor samples CO2, temperature and relative humidity together
//! and broadcasts all three in one advertisement.

use crate::protocol::measurement::Measurement;
use crate::protocol::object_id::ObjectId;

/// One CO2 / temperature / humidity sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AirQualityReading {
    /// CO2 concentration in ppm.
    pub co2_ppm: u16,
    /// Temperature in degrees Celsius.
    pub temperature_c: f32,
    /// Relative humidity in percent.
    pub humidity_pct: f32,
}

impl AirQualityReading {
    /// Create a new reading.
    pub fn new(co2_ppm: u16, temperature_c: f32, humidity_pct: f32) -> Self {
        Self {
            co2_ppm,
            temperature_c,
            humidity_pct,
        }
    }

    /// Measurements in broadcast order: temperature, humidity, CO2.
    pub fn measurements(&self) -> [Measurement; 3] {
        [
            Measurement::new(ObjectId::TemperaturePrecise, self.temperature_c as f64),
            Measurement::new(ObjectId::HumidityPrecise, self.humidity_pct as f64),
            Measurement::from_raw(ObjectId::Co2, self.co2_ppm as u64),
        ]
    }

    /// Number of payload bytes the three measurements take.
    pub fn encoded_len(&self) -> usize {
        self.measurements().iter().map(Measurement::encoded_len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_order() {
        let reading = AirQualityReading::new(812, 21.34, 55.12);
        let ids: Vec<_> = reading
            .measurements()
            .iter()
            .map(Measurement::object_id)
            .collect();
        assert_eq!(
            ids,
            vec![
                ObjectId::TemperaturePrecise,
                ObjectId::HumidityPrecise,
                ObjectId::Co2
            ]
        );
    }

    #[test]
    fn test_encoded_len() {
        let reading = AirQualityReading::new(400, 20.0, 40.0);
        assert_eq!(reading.encoded_len(), 9);
    }

    #[test]
    fn test_co2_is_not_scaled() {
        let reading = AirQualityReading::new(1200, 0.0, 0.0);
        assert_eq!(reading.measurements()[2].scaled_value(), 1200);
    }
}
