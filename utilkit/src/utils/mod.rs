//! Small standalone helpers: timestamps, bit-field conversions, numeric
//! clamping and rounding, hex dumps, and error messages.

pub mod timestamps;

mod bits;
mod error_message;
mod hex;
mod numeric;

pub use bits::{
    signed13_from_unsigned13, signed16_from_unsigned16, unsigned13_from_signed13,
    unsigned16_from_signed16,
};
pub use error_message::{get_error_message, ErrorMessage};
pub use hex::hex_encode;
pub use numeric::{limit, round};
pub use timestamps::{format_iso8601, iso_timestamp, Timestamp};
