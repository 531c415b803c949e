//! Conversions between raw bit fields and signed integers.
//!
//! Protocol fields often carry two's-complement values in 13 or 16 bits.
//! Bits above the field width are ignored on input.

const MASK_13: u16 = 0x1FFF;
const SIGN_13: u16 = 0x1000;

/// Interprets the low 13 bits of `raw` as a two's-complement value.
#[must_use]
pub const fn signed13_from_unsigned13(raw: u16) -> i16 {
    let magnitude = (raw & (SIGN_13 - 1)) as i16;
    if raw & SIGN_13 != 0 {
        magnitude - SIGN_13 as i16
    } else {
        magnitude
    }
}

/// Encodes `value` as a 13-bit two's-complement field.
///
/// Values outside `-4096..=4095` wrap.
#[must_use]
pub const fn unsigned13_from_signed13(value: i16) -> u16 {
    (value as u16) & MASK_13
}

/// Interprets `raw` as a 16-bit two's-complement value.
#[must_use]
pub const fn signed16_from_unsigned16(raw: u16) -> i16 {
    raw as i16
}

/// Encodes `value` as a 16-bit two's-complement field.
#[must_use]
pub const fn unsigned16_from_signed16(value: i16) -> u16 {
    value as u16
}
