//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Pointer input (mouse and touch unified)
//! - Storage (LocalStorage on web, in-memory elsewhere)

pub mod input;
pub mod storage;

pub use input::{PointerInput, PointerPhase};
pub use storage::{MemoryStorage, Storage, StorageError};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

/// Milliseconds since page load (WASM) or since first call (native)
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}
