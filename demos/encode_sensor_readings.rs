//! Basic example: Encode one CO2 monitor sample as BTHome advertisements
//!
//! Run with: cargo run --example encode_sensor_readings
//!
//! Set RUST_LOG=bthome_adv=trace to see every object as it is appended.

use bthome_adv::utils::format_hex;
use bthome_adv::{
    Advertisement, AdvertisementConfig, AirQualityReading, BindKey, BleAddress, Result,
};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bthome_adv=debug".parse().unwrap()),
        )
        .init();

    let reading = AirQualityReading::new(812, 21.34, 55.12);
    println!(
        "Sample: CO2 {} ppm, {:.2}°C, {:.2}% RH\n",
        reading.co2_ppm, reading.temperature_c, reading.humidity_pct
    );

    // Plaintext advertisement
    let mut adv = Advertisement::new(AdvertisementConfig::new().with_name("MINICO2"))?;
    adv.add_measurements(reading.measurements())?;
    let payload = adv.finalize_payload()?;
    println!("Plaintext ({} bytes):", payload.len());
    println!("  {}\n", format_hex(payload));

    // Encrypted advertisement. The name is left out so all three objects
    // fit next to the counter and MIC.
    let key: BindKey = "231d39c1d7cc1ab1aee224cd096db932".parse()?;
    let address: BleAddress = "54:48:E6:8F:80:A5".parse()?;
    let config = AdvertisementConfig::new().with_encryption(key, address);

    let mut adv = Advertisement::new(config)?;
    for cycle in 0..3 {
        adv.add_measurements(reading.measurements())?;
        let counter = adv.next_counter();
        let payload = adv.finalize_payload()?;
        println!(
            "Encrypted cycle {} (counter {:?}, {} bytes):",
            cycle,
            counter,
            payload.len()
        );
        println!("  {}", format_hex(payload));
        adv.reset();
    }

    Ok(())
}
