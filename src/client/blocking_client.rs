//! High-level blocking Parse.ly client.

use crate::{
    BodySnippetConfig, Credentials, Error, HttpError, RequestHookContext, api,
    transport::{
        TransportRequest,
        blocking_transport::{BlockingTransport, DynBlockingTransport, UreqBlocking},
        middleware::HookBlocking,
        request::{Request, Response},
    },
    util::{
        diagnostics,
        redact::redact_text,
        url::{endpoint_url, normalize_base_url, sanitize_url_for_error},
    },
};
use http::HeaderMap;
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};
use url::Url;

#[cfg(feature = "tracing")]
use tracing::field;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configures and constructs [`BlockingClient`].
pub struct BlockingClientBuilder {
    apikey: String,
    secret: Option<String>,
    base_url: String,
    insecure: bool,
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
    read_timeout: Duration,
    no_proxy: bool,
    default_headers: HeaderMap,
    body_snippet: BodySnippetConfig,
    request_hook: Option<crate::RequestHook>,
}

impl BlockingClientBuilder {
    fn new(apikey: impl Into<String>) -> Self {
        Self {
            apikey: apikey.into(),
            secret: None,
            base_url: super::DEFAULT_BASE_URL.to_owned(),
            insecure: false,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            no_proxy: false,
            default_headers: HeaderMap::new(),
            body_snippet: BodySnippetConfig::default(),
            request_hook: None,
        }
    }

    /// Set the shared secret required by the non-public endpoints.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Override the API root (e.g. for a mock server).
    pub fn base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = base.into();
        self
    }

    pub fn no_system_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    pub fn danger_accept_invalid_certs(mut self, yes: bool) -> Self {
        self.insecure = yes;
        self
    }

    /// Override the default `User-Agent` header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = value;
        self
    }

    pub fn connect_timeout(mut self, value: Duration) -> Self {
        self.connect_timeout = value;
        self
    }

    pub fn read_timeout(mut self, value: Duration) -> Self {
        self.read_timeout = value;
        self
    }

    pub fn default_header(
        mut self,
        name: http::header::HeaderName,
        value: http::HeaderValue,
    ) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers.extend(headers);
        self
    }

    pub fn capture_body_snippet(mut self, enabled: bool) -> Self {
        self.body_snippet.enabled = enabled;
        self
    }

    pub fn max_body_snippet_bytes(mut self, max_bytes: usize) -> Self {
        self.body_snippet.max_bytes = max_bytes;
        self
    }

    /// Add a hook invoked for every outgoing request.
    pub fn request_hook<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(RequestHookContext<'a>) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.request_hook = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Result<BlockingClient, Error> {
        let base = normalize_base_url(&self.base_url)?;
        let credentials = match self.secret {
            Some(secret) => Credentials::with_secret(self.apikey, secret),
            None => Credentials::new(self.apikey),
        };

        let mut transport: DynBlockingTransport = Arc::new(UreqBlocking::try_new(
            self.insecure,
            &self.user_agent,
            self.timeout,
            self.connect_timeout,
            self.read_timeout,
            self.no_proxy,
        )?);

        if let Some(hook) = self.request_hook {
            transport = Arc::new(HookBlocking::new(transport, hook));
        }

        Ok(BlockingClient {
            inner: Arc::new(Inner {
                base,
                credentials,
                timeout: self.timeout,
                default_headers: self.default_headers,
                body_snippet: self.body_snippet,
                transport,
            }),
        })
    }
}

#[derive(Clone)]
pub struct BlockingClient {
    inner: Arc<Inner>,
}

struct Inner {
    base: Url,
    credentials: Credentials,
    timeout: Duration,
    default_headers: HeaderMap,
    body_snippet: BodySnippetConfig,
    transport: DynBlockingTransport,
}

impl BlockingClient {
    pub fn builder(apikey: impl Into<String>) -> BlockingClientBuilder {
        BlockingClientBuilder::new(apikey)
    }

    pub fn new(apikey: impl Into<String>) -> Result<Self, Error> {
        Self::builder(apikey).build()
    }

    #[must_use]
    pub fn analytics(&self) -> api::BlockingAnalyticsService {
        api::BlockingAnalyticsService::new(self.clone())
    }

    #[must_use]
    pub fn referrers(&self) -> api::BlockingReferrersService {
        api::BlockingReferrersService::new(self.clone())
    }

    #[must_use]
    pub fn shares(&self) -> api::BlockingSharesService {
        api::BlockingSharesService::new(self.clone())
    }

    #[must_use]
    pub fn realtime(&self) -> api::BlockingRealtimeService {
        api::BlockingRealtimeService::new(self.clone())
    }

    #[must_use]
    pub fn recommendations(&self) -> api::BlockingRecommendationsService {
        api::BlockingRecommendationsService::new(self.clone())
    }

    #[must_use]
    pub fn search(&self) -> api::BlockingSearchService {
        api::BlockingSearchService::new(self.clone())
    }

    /// Probe `/analytics/posts` and report whether the configured
    /// credentials are accepted.
    pub fn authenticated(&self) -> Result<bool, Error> {
        let req = Request::get(["analytics", "posts"]).query_pair("limit", "1");
        match self.execute_request(&req) {
            Ok(resp) => Ok(!body_reports_forbidden(&resp.body)),
            Err(Error::Auth(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn send_json<T: DeserializeOwned + Send + 'static>(
        &self,
        req: Request,
    ) -> Result<T, Error> {
        let url = endpoint_url(&self.inner.base, req.segments.iter().map(|s| s.as_str()))?;
        let resp = self.execute_request(&req)?;
        resp.json().map_err(|source| Error::Decode {
            status: resp.status,
            method: req.method,
            path: url.path().to_string().into_boxed_str(),
            request_id: diagnostics::request_id(&resp.headers),
            body_snippet: diagnostics::body_snippet(
                &resp.body,
                self.inner.body_snippet,
                &self.inner.credentials,
            ),
            source: Box::new(source),
        })
    }

    pub(crate) fn execute_request(&self, req: &Request) -> Result<Response, Error> {
        #[cfg(feature = "metrics")]
        let _inflight = crate::transport::metrics::InFlightGuard::new();

        let url = endpoint_url(&self.inner.base, req.segments.iter().map(|s| s.as_str()))?;

        let headers = self.inner.default_headers.clone();
        let mut query = self.inner.credentials.query_pairs();
        query.extend(req.query.iter().cloned());

        #[cfg(any(feature = "tracing", feature = "metrics"))]
        let start = std::time::Instant::now();
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "parsely.request",
            http.method = %req.method,
            http.host = %self.inner.base.host_str().unwrap_or_default(),
            http.path = %url.path(),
            http.status = field::Empty,
            request_id = field::Empty,
            latency_ms = field::Empty,
            error_kind = field::Empty,
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let resp = match self.inner.transport.send(TransportRequest {
            method: req.method.clone(),
            url: url.clone(),
            headers,
            query,
            timeout: self.inner.timeout,
        }) {
            Ok(resp) => resp,
            Err(err) => {
                #[cfg(feature = "metrics")]
                crate::transport::metrics::record_outcome(
                    err.status(),
                    start.elapsed(),
                    Some(err.kind()),
                );
                #[cfg(feature = "tracing")]
                {
                    span.record("error_kind", field::debug(err.kind()));
                    span.record("latency_ms", start.elapsed().as_millis() as i64);
                }
                return Err(err);
            }
        };

        let request_id = diagnostics::request_id(&resp.headers);

        #[cfg(feature = "tracing")]
        {
            span.record("http.status", resp.status.as_u16() as i64);
            span.record("latency_ms", start.elapsed().as_millis() as i64);
            if let Some(rid) = request_id.as_deref() {
                span.record("request_id", field::display(rid));
            }
        }

        if resp.status.is_client_error() || resp.status.is_server_error() {
            let safe_url = sanitize_url_for_error(&url);
            let message = diagnostics::extract_message(&resp.body)
                .map(|msg| redact_text(msg.into(), &self.inner.credentials).into_boxed_str());
            let http_error = HttpError {
                status: resp.status,
                method: req.method.clone(),
                url: Box::new(safe_url),
                message,
                request_id,
                body_snippet: diagnostics::body_snippet(
                    &resp.body,
                    self.inner.body_snippet,
                    &self.inner.credentials,
                ),
            };

            let retry_after =
                diagnostics::parse_retry_after(&resp.headers, std::time::SystemTime::now());
            let err = Error::from_http(http_error, retry_after);

            #[cfg(feature = "metrics")]
            crate::transport::metrics::record_outcome(
                err.status(),
                start.elapsed(),
                Some(err.kind()),
            );
            #[cfg(feature = "tracing")]
            span.record("error_kind", field::debug(err.kind()));

            return Err(err);
        }

        let response = Response {
            status: resp.status,
            headers: resp.headers,
            body: resp.body,
        };

        #[cfg(feature = "metrics")]
        crate::transport::metrics::record_outcome(Some(response.status), start.elapsed(), None);

        Ok(response)
    }
}

/// Some deployments answer an invalid secret with HTTP 200 and an error
/// envelope; treat a `code: 403` body as an auth failure too.
fn body_reports_forbidden(body: &[u8]) -> bool {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("code").and_then(serde_json::Value::as_u64))
        == Some(403)
}
