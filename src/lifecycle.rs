//! One-time initialization of decoding resources
//!
//! The [`FormatDescriptor`] (symbol lookup table, checksum table,
//! supported version set) is built exactly once per process and shared
//! read-only afterwards. [`Lifecycle`] wraps a one-shot synchronization
//! cell ([`tokio::sync::OnceCell`]) so the guarantee is explicit rather
//! than an ad hoc flag:
//!
//! - the first caller performs the build; callers arriving while it is in
//!   flight wait on the same attempt instead of starting a second one
//! - once the build has succeeded, every caller gets the shared result
//!   immediately, with no repeated work
//! - a failed build is NOT cached: the error is surfaced to the caller and
//!   the next call retries from scratch
//!
//! Decode calls made before initialization completes suspend on the same
//! cell and proceed independently once the shared result is available.

use tokio::sync::OnceCell;

use crate::error::InitError;
use crate::format::FormatDescriptor;

/// Owner of the process-wide [`FormatDescriptor`]
///
/// The crate-level [`initialize`](crate::initialize) and
/// [`decode`](crate::decode) operations share one static `Lifecycle`;
/// callers that prefer dependency injection can own their own and pass the
/// descriptor into [`Decoder`](crate::Decoder) directly.
pub struct Lifecycle {
    cell: OnceCell<FormatDescriptor>,
}

impl Lifecycle {
    /// An empty lifecycle; nothing is built until the first
    /// [`ready`](Self::ready) call
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::const_new(),
        }
    }

    /// Await the shared descriptor, building it if this is the first call
    pub async fn ready(&self) -> Result<&FormatDescriptor, InitError> {
        self.ready_with(|| async { FormatDescriptor::build() }).await
    }

    /// Single-flight initialization with a caller-supplied build step
    pub(crate) async fn ready_with<F, Fut>(&self, build: F) -> Result<&FormatDescriptor, InitError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<FormatDescriptor, InitError>>,
    {
        self.cell
            .get_or_try_init(|| async {
                match build().await {
                    Ok(format) => {
                        tracing::debug!("format descriptor initialized");
                        Ok(format)
                    }
                    Err(error) => {
                        tracing::warn!(%error, "format descriptor initialization failed");
                        Err(error)
                    }
                }
            })
            .await
    }

    /// The descriptor, if initialization has already succeeded
    pub fn get(&self) -> Option<&FormatDescriptor> {
        self.cell.get()
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide lifecycle behind the crate-level operations
static SHARED: Lifecycle = Lifecycle::new();

pub(crate) fn shared() -> &'static Lifecycle {
    &SHARED
}
