// compile-time guard: enable at least one client kind.
#[cfg(not(any(feature = "async", feature = "blocking")))]
compile_error!("Enable at least one of: `async` (default) or `blocking`.");

/// Parse.ly Analytics API SDK – choose **async** *or* **blocking** at compile time.
pub mod api;
pub mod client;
pub mod transport;
pub mod types;

mod auth;
mod error;
mod request_hook;
mod util;

pub use auth::{Credentials, SecretString};
pub use error::{BodySnippetConfig, Error, ErrorKind, HttpError, Result, TransportErrorKind};
pub use request_hook::{RequestHook, RequestHookContext};
pub use types::*;

#[cfg(feature = "async")]
pub use client::{Client, ClientBuilder};
#[cfg(feature = "blocking")]
pub use client::{BlockingClient, BlockingClientBuilder};
