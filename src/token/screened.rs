use crate::error::Result;
use crate::format::FormatDescriptor;

/// A token that has passed the alphabet gate
///
/// This is the first stage in the decode pipeline. Every character has been
/// mapped to its 6-bit symbol value; nothing structural has been checked
/// yet.
///
/// Next step: [`TokenFrame`](super::TokenFrame) (after structural unpacking)
#[derive(Debug)]
pub(crate) struct ScreenedToken {
    values: Vec<u8>,
}

impl ScreenedToken {
    /// Check every character of `token` against the descriptor's alphabet
    ///
    /// Fails with [`DecodeError::InvalidCharacter`] at the first character
    /// outside the alphabet, before any structural interpretation.
    ///
    /// [`DecodeError::InvalidCharacter`]: crate::DecodeError::InvalidCharacter
    pub(crate) fn screen(token: &str, format: &FormatDescriptor) -> Result<Self> {
        Ok(Self {
            values: format.alphabet().screen(token)?,
        })
    }

    /// The 6-bit symbol values, in token order
    pub(crate) fn values(&self) -> &[u8] {
        &self.values
    }
}
