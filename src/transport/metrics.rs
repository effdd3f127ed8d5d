use crate::ErrorKind;
use http::StatusCode;
use std::time::Duration;

pub(crate) struct InFlightGuard {
    gauge: metrics::Gauge,
}

impl InFlightGuard {
    pub(crate) fn new() -> Self {
        let gauge = metrics::gauge!("parsely_sdk_inflight");
        gauge.increment(1.0);
        Self { gauge }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.gauge.decrement(1.0);
    }
}

fn status_class(status: StatusCode) -> &'static str {
    match status.as_u16() {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

fn error_kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Auth => "auth",
        ErrorKind::NotFound => "not_found",
        ErrorKind::RateLimited => "rate_limited",
        ErrorKind::Api => "api",
        ErrorKind::Transport => "transport",
        ErrorKind::Decode => "decode",
        ErrorKind::InvalidParams => "invalid_params",
        ErrorKind::InvalidConfig => "invalid_config",
    }
}

pub(crate) fn record_outcome(
    status: Option<StatusCode>,
    latency: Duration,
    error_kind: Option<ErrorKind>,
) {
    let status_class = status.map(status_class).unwrap_or("transport");

    metrics::counter!(
        "parsely_sdk_requests_total",
        "status_class" => status_class
    )
    .increment(1);
    metrics::histogram!(
        "parsely_sdk_request_duration_seconds",
        "status_class" => status_class
    )
    .record(latency);

    if status == Some(StatusCode::TOO_MANY_REQUESTS) {
        metrics::counter!("parsely_sdk_rate_limited_total").increment(1);
    }

    if let Some(kind) = error_kind {
        metrics::counter!(
            "parsely_sdk_errors_total",
            "kind" => error_kind_label(kind)
        )
        .increment(1);
    }
}
