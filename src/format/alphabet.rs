/// Token alphabet per RFC 4648 Base64URL
/// No padding, URL-safe characters
use crate::error::{InitError, Result};
use crate::DecodeError;

/// The version-1 symbol set: URL-safe Base64
pub(crate) const URL_SAFE_SYMBOLS: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Marker for bytes that are not part of the alphabet
const INVALID: u8 = 0xff;

/// A validated 64-symbol alphabet with its reverse lookup table
///
/// The lookup table maps every possible input byte to its 6-bit symbol
/// value, or to a sentinel for bytes outside the alphabet. Building it once
/// up front keeps the per-call alphabet gate a plain array index.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: &'static [u8; 64],
    lookup: [u8; 256],
}

impl Alphabet {
    /// Build an alphabet from a 64-symbol table
    ///
    /// # Errors
    ///
    /// Returns [`InitError::NonPrintableSymbol`] if a symbol is outside
    /// printable ASCII, or [`InitError::DuplicateSymbol`] if a symbol
    /// appears twice (the reverse lookup would be ambiguous).
    pub(crate) fn from_symbols(symbols: &'static [u8; 64]) -> Result<Self, InitError> {
        let mut lookup = [INVALID; 256];

        for (value, &symbol) in symbols.iter().enumerate() {
            if !symbol.is_ascii_graphic() {
                return Err(InitError::NonPrintableSymbol { symbol });
            }
            if lookup[symbol as usize] != INVALID {
                return Err(InitError::DuplicateSymbol {
                    symbol: symbol as char,
                });
            }
            lookup[symbol as usize] = value as u8;
        }

        Ok(Self { symbols, lookup })
    }

    /// Map every character of `token` to its 6-bit symbol value
    ///
    /// This is the alphabet gate: the first character outside the alphabet
    /// fails the whole token, before any structural interpretation.
    pub(crate) fn screen(&self, token: &str) -> Result<Vec<u8>> {
        let mut values = Vec::with_capacity(token.len());

        for (position, found) in token.chars().enumerate() {
            let value = if found.is_ascii() {
                self.lookup[found as usize]
            } else {
                INVALID
            };
            if value == INVALID {
                return Err(DecodeError::InvalidCharacter { found, position });
            }
            values.push(value);
        }

        Ok(values)
    }

    /// Whether `c` is a symbol of this alphabet
    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && self.lookup[c as usize] != INVALID
    }

    /// The symbol character for a 6-bit value
    ///
    /// Used by the reference encoder; `value` must be below 64.
    pub(crate) fn symbol(&self, value: u8) -> char {
        self.symbols[(value & 0x3f) as usize] as char
    }
}
