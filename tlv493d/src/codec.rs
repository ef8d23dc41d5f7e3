//! Reconstruction of the 12-bit measurement fields.
//!
//! Each value is split over a full register holding bits 11:4 and a nibble
//! holding bits 3:0, except temperature, where register 0x03 carries bits
//! 11:8 in its top nibble and register 0x06 carries bits 7:0.

use crate::registers::*;

const SIGN_BIT: i16 = 0x800;

/// Interprets the low 12 bits of `raw` as two's complement.
#[inline]
pub fn sign_extend_12(raw: i16) -> i16 {
    if raw & SIGN_BIT != 0 {
        (raw & 0x7FF) - 2048
    } else {
        raw
    }
}

/// X from BX (0x00) and the high nibble of BX2 (0x04).
pub fn decode_x(bx: u8, bx2: u8) -> i16 {
    let raw = (i16::from(bx) << 4) | i16::from(bx2 >> BX2_X_LOC);
    sign_extend_12(raw)
}

/// Y from BY (0x01) and the low nibble of BX2 (0x04).
pub fn decode_y(by: u8, bx2: u8) -> i16 {
    let raw = (i16::from(by) << 4) | i16::from(bx2 & LOW_NIBBLE_MASK);
    sign_extend_12(raw)
}

/// Z from BZ (0x02) and the low nibble of BZ2 (0x05).
pub fn decode_z(bz: u8, bz2: u8) -> i16 {
    let raw = (i16::from(bz) << 4) | i16::from(bz2 & LOW_NIBBLE_MASK);
    sign_extend_12(raw)
}

/// Temperature from the high nibble of TEMP (0x03) and TEMP2 (0x06).
pub fn decode_t(temp: u8, temp2: u8) -> i16 {
    let raw = (i16::from(temp & TEMP_HIGH_MASK) << 4) | i16::from(temp2);
    sign_extend_12(raw)
}

/// Two-bit frame counter from TEMP (0x03), incremented per completed measurement.
pub fn frame_counter(temp: u8) -> u8 {
    (temp & FRAME_MASK) >> FRAME_LOC
}

/// Conversion channel from TEMP (0x03). Zero once all values are converted.
pub fn channel_bits(temp: u8) -> u8 {
    temp & CHANNEL_MASK
}

/// Whether the sensor was still converting when TEMP (0x03) was sampled.
///
/// Both channel bits must be clear for a valid frame.
pub fn conversion_in_progress(temp: u8) -> bool {
    (temp & CHANNEL_MASK) != 0
}
