//! Errors for tinycap
//!
//! Two error types cover the two public operations: [`InitError`] for
//! one-time resource initialization and [`DecodeError`] for everything the
//! decoding engine can reject. Every variant renders to a stable,
//! human-readable message, so a caller can display `format!("Error: {e}")`
//! directly.

use thiserror::Error;

/// Errors produced by the decoding engine
///
/// Each variant corresponds to exactly one rejection gate in the decode
/// pipeline. Failures are final for the call; the engine never retries
/// malformed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    // ============================================================================
    // Input bounds
    // ============================================================================
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    // ============================================================================
    // Alphabet errors
    // ============================================================================
    #[error("Invalid character '{found}' at position {position}")]
    InvalidCharacter { found: char, position: usize },

    // ============================================================================
    // Structural errors
    // ============================================================================
    #[error("Token truncated: {got} bytes decoded, at least {min} required")]
    Truncated { got: usize, min: usize },

    #[error("Unsupported format version {found} (supported: {supported:?})")]
    UnsupportedVersion { found: u8, supported: Vec<u8> },

    #[error("Declared payload length {declared} does not match decoded length {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    // ============================================================================
    // Integrity errors
    // ============================================================================
    #[error("Integrity check failed: payload checksum does not match trailer")]
    IntegrityMismatch,

    // ============================================================================
    // Initialization errors surfaced through implicit initialization
    // ============================================================================
    #[error("Initialization failed: {0}")]
    Init(#[from] InitError),
}

/// Errors produced while building the process-wide [`FormatDescriptor`]
///
/// Reported to every caller of the failed [`initialize`] attempt. A failed
/// attempt is not cached; the next call retries the build.
///
/// [`FormatDescriptor`]: crate::FormatDescriptor
/// [`initialize`]: crate::initialize
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    #[error("Alphabet symbol {symbol:#04x} is not printable ASCII")]
    NonPrintableSymbol { symbol: u8 },

    #[error("Duplicate symbol '{symbol}' in alphabet")]
    DuplicateSymbol { symbol: char },
}

/// Result type alias for decode operations
pub type Result<T, E = DecodeError> = std::result::Result<T, E>;
