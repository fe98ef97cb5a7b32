//! BTHome advertisement builder.
//!
//! Assembles a complete legacy advertisement payload:
//!
//! ```text
//! [02][01][flags]
//! [len][09][name bytes]              (optional)
//! [svc_len][16][UUID LE]
//! [device_info]
//! [measurement objects]              (ciphertext when encrypted)
//! [counter LE][MIC]                  (encrypted only)
//! ```
//!
//! `svc_len` is kept equal to the number of bytes that follow it after
//! every append.

use std::borrow::Borrow;

use tracing::{debug, trace, warn};

use crate::ble::address::RadioAddressSource;
use crate::ble::buffer::AdvertisingBuffer;
use crate::ble::uuids::{
    device_info, AdType, BLE_ADVERT_MAX_LEN, BTHOME_SERVICE_UUID_16, FLAG_BREDR_NOT_SUPPORTED,
    FLAG_GENERAL_DISCOVERABLE,
};
use crate::config::AdvertisementConfig;
use crate::crypto::{EncryptionCounter, Nonce, PayloadCipher, COUNTER_LEN, MIC_LEN};
use crate::error::{Error, Result};
use crate::protocol::Measurement;
use crate::utils::format_hex;

/// Bytes appended after the ciphertext: counter then MIC.
const ENCRYPTION_TRAILER_LEN: usize = COUNTER_LEN + MIC_LEN;

/// Where the builder is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildState {
    /// Nothing written; headers are rewritten on the next append.
    Empty,
    /// Flags, name and service data header written.
    HeadersWritten,
    /// Device info written; measurements may be appended.
    Accepting,
    /// Payload complete. Only [`Advertisement::reset`] leaves this state.
    Finalized,
}

struct Encryption {
    cipher: PayloadCipher,
    counter: EncryptionCounter,
    address_source: Box<dyn RadioAddressSource>,
}

impl std::fmt::Debug for Encryption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encryption")
            .field("cipher", &self.cipher)
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}

/// A BTHome v2 advertisement under construction.
///
/// # Example
///
/// ```
/// use bthome_adv::{Advertisement, AdvertisementConfig, Measurement, ObjectId};
///
/// let mut adv = Advertisement::new(AdvertisementConfig::new().with_name("MINICO2"))?;
/// adv.add_measurement(&Measurement::from_raw(ObjectId::Co2, 812))?;
///
/// let payload = adv.finalize_payload()?;
/// assert!(payload.len() <= 31);
/// # Ok::<(), bthome_adv::Error>(())
/// ```
#[derive(Debug)]
pub struct Advertisement {
    buffer: AdvertisingBuffer,
    name: Option<String>,
    packet_id: Option<u8>,
    service_uuid: u16,
    device_info: u8,
    /// Offset of the service data length byte.
    service_len_offset: usize,
    /// Offset of the first measurement byte.
    sensor_data_offset: usize,
    encryption: Option<Encryption>,
    state: BuildState,
}

impl Advertisement {
    /// Create an advertisement and write its headers.
    ///
    /// When encryption is enabled the nonce uses `config.address`.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingBindKey`] if encryption is enabled without a key
    /// - [`Error::AddressUnavailable`] if encryption is enabled without an address
    /// - [`Error::PayloadOverflow`] if the name does not fit
    pub fn new(config: AdvertisementConfig) -> Result<Self> {
        let source = config
            .address
            .map(|address| Box::new(address) as Box<dyn RadioAddressSource>);
        Self::build(config, source)
    }

    /// Create an advertisement that reads the radio address from `source`
    /// each time it encrypts.
    pub fn with_address_source(
        config: AdvertisementConfig,
        source: impl RadioAddressSource + 'static,
    ) -> Result<Self> {
        Self::build(config, Some(Box::new(source)))
    }

    fn build(
        config: AdvertisementConfig,
        address_source: Option<Box<dyn RadioAddressSource>>,
    ) -> Result<Self> {
        let encryption = if config.encrypt {
            let bind_key = config.bind_key.as_ref().ok_or(Error::MissingBindKey)?;
            let address_source = address_source.ok_or_else(|| Error::AddressUnavailable {
                reason: "no radio address configured".to_string(),
            })?;
            let counter = match config.initial_counter {
                Some(value) => EncryptionCounter::starting_at(value),
                None => EncryptionCounter::from_os_rng(),
            };

            Some(Encryption {
                cipher: PayloadCipher::new(bind_key)?,
                counter,
                address_source,
            })
        } else {
            None
        };

        let mut advertisement = Self {
            buffer: AdvertisingBuffer::new(),
            name: config.local_name().map(str::to_string),
            packet_id: config.packet_id,
            service_uuid: BTHOME_SERVICE_UUID_16,
            device_info: device_info(config.encrypt),
            service_len_offset: 0,
            sensor_data_offset: 0,
            encryption,
            state: BuildState::Empty,
        };

        advertisement.write_headers()?;

        debug!(
            "Created advertisement: name={:?}, encrypted={}, header={} bytes",
            advertisement.name,
            config.encrypt,
            advertisement.buffer.len()
        );

        Ok(advertisement)
    }

    /// Append one measurement.
    ///
    /// # Errors
    ///
    /// - [`Error::PayloadOverflow`] if the measurement does not fit; the
    ///   payload is left unchanged
    /// - [`Error::AlreadyFinalized`] if [`finalize_payload`](Self::finalize_payload)
    ///   was called since the last reset
    pub fn add_measurement(&mut self, measurement: &Measurement) -> Result<()> {
        match self.state {
            BuildState::Finalized => return Err(Error::AlreadyFinalized),
            BuildState::Empty => self.write_headers()?,
            BuildState::HeadersWritten | BuildState::Accepting => {}
        }

        self.append(measurement)
    }

    /// Append measurements in order, stopping at the first failure.
    pub fn add_measurements<I>(&mut self, measurements: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Borrow<Measurement>,
    {
        for measurement in measurements {
            self.add_measurement(measurement.borrow())?;
        }
        Ok(())
    }

    /// Complete the payload and return it.
    ///
    /// Without encryption the bytes are returned as written. With
    /// encryption the measurement objects are replaced by their ciphertext
    /// and the counter and MIC are appended. Encryption happens once per
    /// cycle: later calls return the same bytes until [`reset`](Self::reset).
    ///
    /// # Errors
    ///
    /// [`Error::EncryptionFailure`] or [`Error::AddressUnavailable`]; in
    /// both cases the payload is left unchanged and still accepts
    /// measurements.
    pub fn finalize_payload(&mut self) -> Result<&[u8]> {
        match self.state {
            BuildState::Finalized => return Ok(self.buffer.as_slice()),
            BuildState::Empty => self.write_headers()?,
            BuildState::HeadersWritten | BuildState::Accepting => {}
        }

        if let Some(encryption) = self.encryption.as_mut() {
            let available = self.buffer.remaining();
            if available < ENCRYPTION_TRAILER_LEN {
                return Err(Error::PayloadOverflow {
                    needed: ENCRYPTION_TRAILER_LEN,
                    available,
                });
            }

            let address = encryption.address_source.radio_address()?;
            let counter = encryption.counter.peek();
            let nonce = Nonce::new(&address, self.service_uuid, self.device_info, counter);

            let mut region: heapless::Vec<u8, BLE_ADVERT_MAX_LEN> =
                heapless::Vec::from_slice(self.buffer.tail(self.sensor_data_offset)).map_err(
                    |_| Error::EncryptionFailure {
                        reason: "measurement region larger than payload".to_string(),
                    },
                )?;
            let mic = encryption.cipher.encrypt_in_place(&nonce, &mut region)?;

            self.buffer
                .tail_mut(self.sensor_data_offset)
                .copy_from_slice(&region);
            self.buffer.extend_from_slice(&counter.to_le_bytes())?;
            self.buffer.extend_from_slice(&mic)?;
            self.buffer
                .add_to(self.service_len_offset, ENCRYPTION_TRAILER_LEN as u8)?;
            encryption.counter.advance();

            debug!(
                "Encrypted {} measurement bytes with counter {:#010x}",
                region.len(),
                counter
            );
        }

        self.state = BuildState::Finalized;
        trace!(
            "Finalized payload ({} bytes): {}",
            self.buffer.len(),
            format_hex(self.buffer.as_slice())
        );

        Ok(self.buffer.as_slice())
    }

    /// Discard all written bytes for the next cycle.
    ///
    /// The encryption counter keeps counting.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = BuildState::Empty;
        debug!("Advertisement reset");
    }

    /// Change the packet id written from the next cycle on.
    pub fn set_packet_id(&mut self, packet_id: Option<u8>) {
        self.packet_id = packet_id;
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Number of bytes written so far.
    pub fn payload_size(&self) -> usize {
        self.buffer.len()
    }

    /// Measurement bytes (ciphertext once an encrypted payload is finalized).
    pub fn measurement_bytes(&self) -> &[u8] {
        let end = match (self.state, self.encryption.is_some()) {
            (BuildState::Finalized, true) => self.buffer.len() - ENCRYPTION_TRAILER_LEN,
            _ => self.buffer.len(),
        };
        &self.buffer.as_slice()[self.sensor_data_offset.min(end)..end]
    }

    /// Bytes still available for measurements.
    pub fn remaining_capacity(&self) -> usize {
        match self.state {
            BuildState::Finalized => 0,
            _ => self.buffer.remaining().saturating_sub(self.trailer_len()),
        }
    }

    /// Current state.
    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Check if the measurements are encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.encryption.is_some()
    }

    /// The BTHome device info byte.
    pub fn device_info(&self) -> u8 {
        self.device_info
    }

    /// Local name written in the payload.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Counter the next encryption will use.
    pub fn next_counter(&self) -> Option<u32> {
        self.encryption.as_ref().map(|e| e.counter.peek())
    }

    fn trailer_len(&self) -> usize {
        if self.encryption.is_some() {
            ENCRYPTION_TRAILER_LEN
        } else {
            0
        }
    }

    fn write_headers(&mut self) -> Result<()> {
        let result = self.try_write_headers();
        if result.is_err() {
            self.buffer.clear();
            self.state = BuildState::Empty;
        }
        result
    }

    fn try_write_headers(&mut self) -> Result<()> {
        self.buffer.clear();

        self.buffer.extend_from_slice(&[
            2,
            AdType::Flags.to_raw(),
            FLAG_GENERAL_DISCOVERABLE | FLAG_BREDR_NOT_SUPPORTED,
        ])?;

        if let Some(name) = self.name.as_deref() {
            let start = self.buffer.len();
            // Length is filled in once the name is copied.
            self.buffer.push(0)?;
            self.buffer.push(AdType::CompleteName.to_raw())?;
            self.buffer.extend_from_slice(name.as_bytes())?;
            let section_len = self.buffer.len() - start - 1;
            self.buffer.set(start, section_len as u8)?;
        }

        self.service_len_offset = self.buffer.len();
        self.buffer.push(3)?;
        self.buffer.push(AdType::ServiceData16.to_raw())?;
        self.buffer
            .extend_from_slice(&self.service_uuid.to_le_bytes())?;
        self.state = BuildState::HeadersWritten;

        self.buffer.push(self.device_info)?;
        self.buffer.add_to(self.service_len_offset, 1)?;
        self.sensor_data_offset = self.buffer.len();

        let trailer = self.trailer_len();
        if self.buffer.remaining() < trailer {
            return Err(Error::PayloadOverflow {
                needed: trailer,
                available: self.buffer.remaining(),
            });
        }
        self.state = BuildState::Accepting;

        if let Some(packet_id) = self.packet_id {
            self.append(&Measurement::packet_id(packet_id))?;
        }

        Ok(())
    }

    fn append(&mut self, measurement: &Measurement) -> Result<()> {
        let bytes = measurement.to_bytes();
        let available = self.remaining_capacity();
        if bytes.len() > available {
            warn!(
                "Unable to add {}: needs {} bytes, {} available",
                measurement,
                bytes.len(),
                available
            );
            return Err(Error::PayloadOverflow {
                needed: bytes.len(),
                available,
            });
        }

        self.buffer.extend_from_slice(&bytes)?;
        self.buffer
            .add_to(self.service_len_offset, bytes.len() as u8)?;

        trace!("Added {}: {}", measurement, format_hex(&bytes));
        Ok(())
    }
}
