//! Utility functions for the bthome-adv crate.

/// Format bytes as space separated upper-case hex, for log output.
///
/// # Example
///
/// ```
/// use bthome_adv::utils::format_hex;
///
/// assert_eq!(format_hex(&[0x02, 0x01, 0x06]), "02 01 06");
/// ```
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Read a little-endian unsigned value of up to 8 bytes.
///
/// Useful for checking encoded measurement values; extra bytes beyond 8 are
/// ignored.
pub fn read_le(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .take(8)
        .enumerate()
        .fold(0u64, |acc, (i, b)| acc | ((*b as u64) << (8 * i)))
}
