//! Number literal parsing and canonical formatting.

use crate::ast::{Literal, LiteralKind};
use crate::result::{Error, Result};
use alloy_primitives::U256;

/// Smallest value formatted as hexadecimal rather than decimal.
const HEX_FORMAT_THRESHOLD: u64 = 0x10000;

/// Parses a literal as a 256-bit number.
///
/// Returns `Ok(None)` for non-number literals, and an error when the text of
/// a number literal is not a valid decimal or 0x-prefixed hexadecimal value
/// that fits in 256 bits.
pub fn number_value(literal: &Literal) -> Result<Option<U256>> {
    if literal.kind != LiteralKind::Number {
        return Ok(None);
    }
    let text = literal.value.as_str();
    let parsed = match text.strip_prefix("0x") {
        Some(digits) => U256::from_str_radix(digits, 16),
        None => U256::from_str_radix(text, 10),
    };
    parsed
        .map(Some)
        .map_err(|_| Error::InvalidNumberLiteral(text.to_string()))
}

/// Formats a value in canonical text form.
///
/// Values at or above `0x10000` print as lowercase `0x`-prefixed hex, smaller
/// values print as decimal. The output round-trips through [`number_value`].
pub fn format_number(value: U256) -> String {
    if value >= U256::from(HEX_FORMAT_THRESHOLD) {
        format!("{value:#x}")
    } else {
        value.to_string()
    }
}

/// Number of significant bytes in a value, i.e. the width of the smallest
/// PUSH immediate that holds it. Zero occupies zero bytes.
pub fn bytes_required(value: U256) -> usize {
    value.byte_len()
}
