//! Size limit constants for input validation

/// Maximum length for an encoded token string (64KB)
///
/// Tokens above this size are rejected before any per-character work,
/// bounding the cost of a single decode call.
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;
