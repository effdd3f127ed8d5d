//! Re-exports for middleware layers.

#[cfg(feature = "async")]
pub mod hook_async;
#[cfg(feature = "blocking")]
pub mod hook_blocking;

#[cfg(feature = "async")]
pub use hook_async::HookAsync;
#[cfg(feature = "blocking")]
pub use hook_blocking::HookBlocking;
