//! Transport layer: request/response value types and the default reqwest /
//! ureq implementations.

pub mod middleware;
pub mod request;

#[cfg(feature = "async")]
pub mod async_transport;
#[cfg(feature = "blocking")]
pub mod blocking_transport;

#[cfg(feature = "metrics")]
pub(crate) mod metrics;

use http::{HeaderMap, Method, StatusCode};
use std::time::Duration;
use url::Url;

/// A fully-resolved request handed to a transport.
///
/// The query pairs already include the credential parameters; the API is
/// GET-only, so there is no body.
#[derive(Clone, Debug)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub timeout: Duration,
}

/// Raw response returned by a transport.
#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}
