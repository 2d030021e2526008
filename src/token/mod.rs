// Internal modules
mod frame;
mod header;
mod payload;
mod screened;

// Public API exports
pub use payload::DecodedPayload;

// Internal types (used by the decoder but not exposed in public API)
pub(crate) use frame::TokenFrame;
pub(crate) use header::FrameHeader;
pub(crate) use screened::ScreenedToken;
