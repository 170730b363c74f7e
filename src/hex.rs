//! Strict hex text to byte decoding.

use thiserror::Error;
use tracing::trace;

/// An error encountered while decoding hex text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    /// The digits left after stripping separators do not pair into whole bytes.
    #[error("hex string length must be even (got {len} digits)")]
    InvalidLength { len: usize },
    /// A character outside `0-9a-fA-F` remained after stripping separators.
    #[error("invalid hex character {ch:?} at position {index}")]
    InvalidCharacter { ch: char, index: usize },
}

/// Space, tab and newline are ignored between digits. Any other
/// whitespace is rejected as an invalid character.
pub fn is_separator(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n')
}

/// Decode free-form hex text such as `"34 1E 08 AC 0D"` into bytes.
///
/// Digits pair up most significant nibble first. Text with no digits
/// decodes to an empty vector.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, HexError> {
    let digits: Vec<char> = text.chars().filter(|&ch| !is_separator(ch)).collect();

    if digits.len() % 2 != 0 {
        return Err(HexError::InvalidLength { len: digits.len() });
    }

    let mut nibbles = Vec::with_capacity(digits.len());
    for (index, &ch) in digits.iter().enumerate() {
        match ch.to_digit(16) {
            Some(value) => nibbles.push(value as u8),
            None => return Err(HexError::InvalidCharacter { ch, index }),
        }
    }

    let bytes: Vec<u8> = nibbles
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect();

    trace!(len = bytes.len(), "decoded hex text");
    Ok(bytes)
}
