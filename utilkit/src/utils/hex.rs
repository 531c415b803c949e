//! Hex dumps of text.

/// Encodes each UTF-16 code unit of `data` as lowercase hex, space separated.
///
/// Code units above `0xff` use as many digits as they need.
///
/// # Examples
///
/// ```
/// use utilkit::utils::hex_encode;
///
/// assert_eq!(hex_encode("Hello, World!"), "48 65 6c 6c 6f 2c 20 57 6f 72 6c 64 21");
/// ```
#[must_use]
pub fn hex_encode(data: &str) -> String {
    data.encode_utf16()
        .map(|unit| format!("{unit:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
