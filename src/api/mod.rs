//! High-level Parse.ly API services.
//!
//! The primary SDK surface is exposed via service accessors on clients:
//! - `Client::analytics()` / `BlockingClient::analytics()`
//! - `Client::referrers()` / `BlockingClient::referrers()`
//! - `Client::shares()` / `BlockingClient::shares()`
//! - `Client::realtime()` / `BlockingClient::realtime()`
//! - `Client::recommendations()` / `BlockingClient::recommendations()`
//! - `Client::search()` / `BlockingClient::search()`

pub mod analytics;
pub mod realtime;
pub mod recommendations;
pub mod referrers;
pub mod search;
pub mod shares;

pub use analytics::*;
pub use realtime::*;
pub use recommendations::*;
pub use referrers::*;
pub use search::*;
pub use shares::*;
