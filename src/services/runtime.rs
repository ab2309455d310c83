//! Tokio Runtime Bridge
//!
//! The page itself is synchronous. Async work (script pacing, API calls) runs
//! on a lazily created current-thread tokio runtime.

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Runtime};

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| {
        Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to create tokio runtime")
    })
}

/// Drive a future to completion on the shared runtime
///
/// Must not be called from inside another async context.
pub fn block_on<F: Future>(future: F) -> F::Output {
    get_runtime().block_on(future)
}
