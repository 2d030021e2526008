//! Reference encoder for test fixtures
//!
//! The service boundary only decodes; this module exists so tests and
//! benches can build valid (and deliberately broken) capsules without an
//! external tool. [`seal`] produces the canonical encoding of a payload,
//! [`pack_frame`] packs arbitrary frame bytes for tampered fixtures.

use crate::format::{Crc32, CURRENT_VERSION, URL_SAFE_SYMBOLS};

/// Encode `payload` as a current-version capsule token
pub fn seal(payload: &[u8]) -> String {
    seal_with(CURRENT_VERSION, payload)
}

/// Encode `payload` under an explicit header version
///
/// The version byte is written verbatim, so this can produce tokens the
/// strict engine rejects, which is the point for fixtures.
pub fn seal_with(version: u8, payload: &[u8]) -> String {
    let mut frame = Vec::with_capacity(payload.len() + 9);
    frame.push(version);
    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(payload);
    frame.extend_from_slice(&checksum(payload).to_be_bytes());
    pack_frame(&frame)
}

/// The trailer checksum a conforming encoder would write for `payload`
pub fn checksum(payload: &[u8]) -> u32 {
    Crc32::new().checksum(payload)
}

/// Pack raw frame bytes into token characters
///
/// Performs no validation of the frame; fixtures use this to encode
/// headers that lie about length or trailers that fail verification.
pub fn pack_frame(frame: &[u8]) -> String {
    let mut token = String::with_capacity(frame.len().div_ceil(3) * 4);
    let mut accumulator: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in frame {
        accumulator = (accumulator << 8) | u32::from(byte);
        bits += 8;
        while bits >= 6 {
            bits -= 6;
            token.push(symbol((accumulator >> bits) as u8));
        }
    }
    if bits > 0 {
        // Final partial group, spare bits left zero
        token.push(symbol((accumulator << (6 - bits)) as u8));
    }

    token
}

fn symbol(value: u8) -> char {
    URL_SAFE_SYMBOLS[(value & 0x3f) as usize] as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_empty_payload() {
        // Frame: version 1, length 0, CRC-32 of "" (zero): 9 bytes, 12
        // characters.
        assert_eq!(seal(b""), "AQAAAAAAAAAA");
    }

    #[test]
    fn test_pack_frame_known_bytes() {
        // 0x01 0x02 0x03 -> 000000|010000|001000|000011
        assert_eq!(pack_frame(&[0x01, 0x02, 0x03]), "AQID");
        assert_eq!(pack_frame(&[0xff]), "_w");
    }

    #[test]
    fn test_seal_layout() {
        let token = seal(b"hello");
        // 14 frame bytes -> 19 characters.
        assert_eq!(token.len(), 19);
    }
}
