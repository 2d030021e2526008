//! # tinycap - Minimal, Type-Safe Capsule-Token Decoding
//!
//! > Minimal, type-safe decoding of versioned, checksummed capsule tokens.
//!
//! **tinycap** reconstructs the payload carried by a capsule token (an
//! unpadded URL-safe Base64 string wrapping a versioned binary frame with a
//! CRC-32 trailer), or reports precisely why it could not. The boundary is
//! two operations: one-time resource initialization and single-shot decode.
//!
//! ## Quick Start
//!
//! ```ignore
//! let payload = tinycap::decode(token).await?;
//!
//! match payload.text() {
//!     Some(text) => println!("{text}"),
//!     None => println!("{} bytes", payload.len()),
//! }
//! ```
//!
//! Initialization is implicit: the first `decode` builds the process-wide
//! [`FormatDescriptor`] (symbol lookup and checksum tables) and every later
//! call shares it. Call [`initialize`] up front to surface setup failures
//! early; concurrent calls coalesce onto a single build (single-flight) and
//! a failed build is retried by the next call rather than cached.
//!
//! ## Decode Pipeline
//!
//! The engine runs one token through ordered rejection gates; failure at
//! any gate short-circuits the rest:
//!
//! ```text
//! EncodedToken (untrusted text)
//!     │ size gate            -> TokenTooLarge
//!     ▼
//! ScreenedToken (every character mapped to its symbol value)
//!     │ alphabet gate        -> InvalidCharacter
//!     ▼
//! TokenFrame (header, payload region, trailer split at fixed positions)
//!     │ structural gate      -> Truncated
//!     │ version gate         -> UnsupportedVersion
//!     │ length gate          -> LengthMismatch
//!     │ integrity gate       -> IntegrityMismatch
//!     ▼
//! DecodedPayload (exactly the declared bytes; safe to use)
//! ```
//!
//! A [`DecodedPayload`] is only ever produced after the trailer checksum
//! verifies; there is no partially decoded result.
//!
//! ## Error Handling
//!
//! [`DecodeError`] and [`InitError`] render stable, human-readable
//! messages, so a presentation layer can display `format!("Error: {e}")`
//! without inspecting variants. Initialization failures keep their own
//! `Initialization failed:` prefix and are never conflated with decode
//! failures.
//!
//! ## Custom Engines
//!
//! The crate-level operations cover the common case. For dependency
//! injection or non-default policies, own a [`Lifecycle`] and run the
//! engine directly:
//!
//! ```ignore
//! let lifecycle = Lifecycle::new();
//! let format = lifecycle.ready().await?;
//! let decoder = Decoder::with_config(
//!     format,
//!     DecodeConfig::default().with_version_policy(VersionPolicy::Lenient),
//! );
//! let payload = decoder.decode(token)?;
//! ```

mod decoder;
mod error;
mod format;
mod lifecycle;
mod limits;
mod token;

pub mod testkit;

// Public Interface
pub use decoder::{DecodeConfig, Decoder, VersionPolicy};
pub use error::{DecodeError, InitError, Result};
pub use format::{Alphabet, FormatDescriptor, CURRENT_VERSION};
pub use lifecycle::Lifecycle;
pub use token::DecodedPayload;

/// Prepare the process-wide decoding resources
///
/// Exactly-once and idempotent: the first caller builds the
/// [`FormatDescriptor`]; concurrent callers await the same in-flight build;
/// later callers return immediately. A failed build is reported to its
/// waiters and retried on the next call.
pub async fn initialize() -> Result<(), InitError> {
    lifecycle::shared().ready().await.map(|_| ())
}

/// Decode one capsule token into its payload
///
/// Triggers and awaits [`initialize`] first when needed, so callers never
/// sequence the two operations manually. Once resources are ready the call
/// is a pure function of the token: identical inputs produce identical
/// outcomes, from any number of concurrent call sites.
///
/// # Errors
///
/// One [`DecodeError`] per rejection gate; initialization failures surface
/// as [`DecodeError::Init`].
pub async fn decode(token: &str) -> Result<DecodedPayload> {
    let format = lifecycle::shared().ready().await?;
    Decoder::new(format).decode(token)
}
