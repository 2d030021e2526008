//! The decoding engine
//!
//! [`Decoder`] runs one token through the ordered rejection gates: size,
//! alphabet, structure, version, declared length, integrity. Each gate is
//! hard (a failure short-circuits everything after it) and the whole run
//! is a pure function of the token, the borrowed
//! [`FormatDescriptor`](crate::FormatDescriptor) and the configuration.
//! No state advances between calls and nothing is retried: malformed input
//! is a caller error, not a transient condition.

use crate::error::Result;
use crate::format::FormatDescriptor;
use crate::limits::MAX_TOKEN_LENGTH;
use crate::token::{DecodedPayload, ScreenedToken, TokenFrame};
use crate::DecodeError;

/// How to treat header versions the engine does not recognize
///
/// The default is strict rejection. [`VersionPolicy::Lenient`] opts in to
/// best-effort decoding of unknown versions under the current frame
/// layout, for callers that would rather surface a checksum failure than
/// reject a newer-versioned token outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionPolicy {
    /// Reject versions outside the descriptor's supported set
    #[default]
    Strict,
    /// Accept any version, assuming the version-1 frame layout
    Lenient,
}

impl VersionPolicy {
    pub(crate) fn check(self, version: u8, format: &FormatDescriptor) -> Result<()> {
        match self {
            Self::Strict if format.supports(version) => Ok(()),
            Self::Strict => Err(DecodeError::UnsupportedVersion {
                found: version,
                supported: format.supported_versions().to_vec(),
            }),
            Self::Lenient => Ok(()),
        }
    }
}

/// Options for a decode call
#[derive(Debug, Clone)]
pub struct DecodeConfig {
    max_token_len: usize,
    version_policy: VersionPolicy,
}

impl DecodeConfig {
    /// Cap the accepted token length (default: 64KB)
    pub fn with_max_token_len(mut self, max_token_len: usize) -> Self {
        self.max_token_len = max_token_len;
        self
    }

    /// Set the policy for unrecognized header versions (default: strict)
    pub fn with_version_policy(mut self, version_policy: VersionPolicy) -> Self {
        self.version_policy = version_policy;
        self
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_token_len: MAX_TOKEN_LENGTH,
            version_policy: VersionPolicy::default(),
        }
    }
}

/// The decoding engine for one format descriptor
///
/// Borrows the descriptor for the duration of each call; a decoder owns no
/// format state of its own and is freely shareable across threads.
pub struct Decoder<'f> {
    format: &'f FormatDescriptor,
    config: DecodeConfig,
}

impl<'f> Decoder<'f> {
    /// A decoder with the default configuration
    pub fn new(format: &'f FormatDescriptor) -> Self {
        Self::with_config(format, DecodeConfig::default())
    }

    pub fn with_config(format: &'f FormatDescriptor, config: DecodeConfig) -> Self {
        Self { format, config }
    }

    /// Decode one token into its payload
    ///
    /// # Errors
    ///
    /// Exactly one [`DecodeError`] per rejection gate; see the crate-level
    /// documentation for the taxonomy.
    pub fn decode(&self, token: &str) -> Result<DecodedPayload> {
        self.run(token).inspect_err(|error| {
            tracing::trace!(%error, token_len = token.len(), "token rejected");
        })
    }

    fn run(&self, token: &str) -> Result<DecodedPayload> {
        if token.len() > self.config.max_token_len {
            return Err(DecodeError::TokenTooLarge {
                size: token.len(),
                max: self.config.max_token_len,
            });
        }

        let screened = ScreenedToken::screen(token, self.format)?;
        let frame = TokenFrame::unpack(screened)?;
        self.config
            .version_policy
            .check(frame.header().version(), self.format)?;
        frame.check_declared_length()?;
        frame.verify_integrity(self.format)?;

        Ok(DecodedPayload::new(frame.into_payload()))
    }
}
