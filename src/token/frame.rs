use crate::error::Result;
use crate::format::{FormatDescriptor, HEADER_LEN, MIN_FRAME_LEN, TRAILER_LEN};
use crate::token::{FrameHeader, ScreenedToken};
use crate::DecodeError;

/// A structurally decoded token
///
/// This is the second stage in the decode pipeline. The 6-bit symbol
/// values have been packed into bytes and split at fixed positions into
/// header, payload region and trailer. At this stage:
/// - the frame met the minimum structural size
/// - the header has been read
/// - the trailer checksum has been extracted but NOT verified
///
/// Next steps: version and length checks, then integrity verification.
#[derive(Debug)]
pub(crate) struct TokenFrame {
    header: FrameHeader,
    payload: Vec<u8>,
    checksum: u32,
    spare_bits: u8,
}

impl TokenFrame {
    /// Pack symbol values into bytes and split the frame
    ///
    /// Fails with [`DecodeError::Truncated`] when the frame is below the
    /// minimum header+trailer size, or when the final symbol group is a
    /// single dangling symbol (fewer than eight bits, so the byte stream
    /// is cut short).
    pub(crate) fn unpack(screened: ScreenedToken) -> Result<Self> {
        let values = screened.values();
        let mut bytes = Vec::with_capacity(values.len() * 6 / 8);
        let mut accumulator: u32 = 0;
        let mut bits: u32 = 0;

        for &value in values {
            accumulator = (accumulator << 6) | u32::from(value);
            bits += 6;
            if bits >= 8 {
                bits -= 8;
                bytes.push((accumulator >> bits) as u8);
            }
        }

        if bits == 6 {
            return Err(DecodeError::Truncated {
                got: bytes.len(),
                min: (bytes.len() + 1).max(MIN_FRAME_LEN),
            });
        }
        if bytes.len() < MIN_FRAME_LEN {
            return Err(DecodeError::Truncated {
                got: bytes.len(),
                min: MIN_FRAME_LEN,
            });
        }

        // A canonical encoder leaves the leftover bits of the final symbol
        // zero; kept for the integrity stage.
        let spare_bits = (accumulator & ((1 << bits) - 1)) as u8;

        let header = FrameHeader::read(&bytes);
        let trailer_at = bytes.len() - TRAILER_LEN;
        let checksum = u32::from_be_bytes([
            bytes[trailer_at],
            bytes[trailer_at + 1],
            bytes[trailer_at + 2],
            bytes[trailer_at + 3],
        ]);
        bytes.truncate(trailer_at);
        bytes.drain(..HEADER_LEN);

        Ok(Self {
            header,
            payload: bytes,
            checksum,
            spare_bits,
        })
    }

    pub(crate) fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Compare the declared payload length against the decoded region
    ///
    /// A length lie indicates corruption, so this fails with
    /// [`DecodeError::LengthMismatch`] before the checksum is even looked
    /// at.
    pub(crate) fn check_declared_length(&self) -> Result<()> {
        let declared = self.header.declared_len();
        let actual = self.payload.len();
        if declared != actual {
            return Err(DecodeError::LengthMismatch { declared, actual });
        }
        Ok(())
    }

    /// Recompute the payload checksum and compare it with the trailer
    ///
    /// Non-zero spare bits also fail here: they are not covered by any
    /// frame region, so a token carrying them cannot have been produced by
    /// a conforming encoder.
    pub(crate) fn verify_integrity(&self, format: &FormatDescriptor) -> Result<()> {
        if self.spare_bits != 0 {
            return Err(DecodeError::IntegrityMismatch);
        }
        let computed = format.checksum(&self.payload);
        if computed != self.checksum {
            return Err(DecodeError::IntegrityMismatch);
        }
        Ok(())
    }

    pub(crate) fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit;

    fn unpack(token: &str, format: &FormatDescriptor) -> Result<TokenFrame> {
        TokenFrame::unpack(ScreenedToken::screen(token, format).unwrap())
    }

    #[test]
    fn test_unpack_valid_frame() {
        let format = FormatDescriptor::build().unwrap();
        let token = testkit::seal(b"hello");
        let frame = unpack(&token, &format).unwrap();

        assert_eq!(frame.header().version(), 1);
        assert_eq!(frame.header().declared_len(), 5);
        assert!(frame.check_declared_length().is_ok());
        assert!(frame.verify_integrity(&format).is_ok());
        assert_eq!(frame.into_payload(), b"hello");
    }

    #[test]
    fn test_unpack_below_minimum_is_truncated() {
        let format = FormatDescriptor::build().unwrap();
        assert_eq!(
            unpack("abc", &format).unwrap_err(),
            DecodeError::Truncated { got: 2, min: 9 }
        );
        assert_eq!(
            unpack("", &format).unwrap_err(),
            DecodeError::Truncated { got: 0, min: 9 }
        );
    }

    #[test]
    fn test_unpack_dangling_symbol_is_truncated() {
        // 13 symbols decode to 9 bytes with one symbol left over; the
        // encoder must have been cut off mid-group.
        let format = FormatDescriptor::build().unwrap();
        let token = format!("{}A", testkit::seal(b""));
        assert_eq!(token.len(), 13);
        assert_eq!(
            unpack(&token, &format).unwrap_err(),
            DecodeError::Truncated { got: 9, min: 10 }
        );
    }

    #[test]
    fn test_declared_length_lie_is_caught() {
        let format = FormatDescriptor::build().unwrap();

        // Frame declaring 12 payload bytes while carrying 5.
        let mut frame_bytes = vec![1u8, 0, 0, 0, 12];
        frame_bytes.extend_from_slice(b"hello");
        frame_bytes.extend_from_slice(&testkit::checksum(b"hello").to_be_bytes());
        let token = testkit::pack_frame(&frame_bytes);

        let frame = unpack(&token, &format).unwrap();
        assert_eq!(
            frame.check_declared_length().unwrap_err(),
            DecodeError::LengthMismatch {
                declared: 12,
                actual: 5
            }
        );
    }

    #[test]
    fn test_corrupt_trailer_fails_integrity() {
        let format = FormatDescriptor::build().unwrap();

        let mut frame_bytes = vec![1u8, 0, 0, 0, 5];
        frame_bytes.extend_from_slice(b"hello");
        frame_bytes.extend_from_slice(&(testkit::checksum(b"hello") ^ 1).to_be_bytes());
        let token = testkit::pack_frame(&frame_bytes);

        let frame = unpack(&token, &format).unwrap();
        assert!(frame.check_declared_length().is_ok());
        assert_eq!(
            frame.verify_integrity(&format).unwrap_err(),
            DecodeError::IntegrityMismatch
        );
    }

    #[test]
    fn test_nonzero_spare_bits_fail_integrity() {
        let format = FormatDescriptor::build().unwrap();
        let mut token = testkit::seal(b"hello");

        // The final symbol of this 19-character token carries two spare
        // bits; flip the low one without touching the checksum nibble.
        let last = token.pop().unwrap();
        let flipped = format
            .alphabet()
            .screen(&last.to_string())
            .map(|values| format.alphabet().symbol(values[0] ^ 0x01))
            .unwrap();
        token.push(flipped);

        let frame = unpack(&token, &format).unwrap();
        assert_eq!(
            frame.verify_integrity(&format).unwrap_err(),
            DecodeError::IntegrityMismatch
        );
    }
}
