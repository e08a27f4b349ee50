//! Hex operand parsing and byte formatting for shell prompts.

use thiserror::Error;

/// Operand text that does not name a single byte.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexByteError {
    /// Nothing but whitespace (or a bare `0x`) was entered.
    #[error("expected one or two hex digits")]
    Empty,
    /// The text is not made only of hex digits.
    #[error("`{0}` is not a hex byte")]
    InvalidDigit(String),
    /// More than two hex digits were entered.
    #[error("`{0}` does not fit in one byte")]
    TooLong(String),
}

/// Parses one or two hex digits, with an optional `0x` prefix.
///
/// # Errors
///
/// Returns [`HexByteError`] when the text is empty, contains a non-hex
/// character, or has more than two digits.
pub fn parse_hex_byte(text: &str) -> Result<u8, HexByteError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(HexByteError::Empty);
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(HexByteError::InvalidDigit(trimmed.to_string()));
    }
    if digits.len() > 2 {
        return Err(HexByteError::TooLong(trimmed.to_string()));
    }

    u8::from_str_radix(digits, 16).map_err(|_| HexByteError::InvalidDigit(trimmed.to_string()))
}

/// Formats a byte as `0x2a  0b00101010`.
#[must_use]
pub fn format_byte(value: u8) -> String {
    format!("0x{value:02x}  0b{value:08b}")
}
