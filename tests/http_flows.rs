use anyhow::Result;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[cfg(feature = "async")]
use parsely_sdk::{
    AnalyticsParams, Client, DateFilter, Error, ErrorKind, MetaAspect, Metric, RealtimeParams,
    RealtimePeriod, RefType, ReferrerParams, RelatedKey, RelatedParams, SearchParams,
};
#[cfg(feature = "async")]
use std::time::Duration;
#[cfg(feature = "async")]
use wiremock::matchers::header;

#[cfg(feature = "blocking")]
use parsely_sdk::BlockingClient;
#[cfg(feature = "blocking")]
use tokio::task;

async fn mock_get(server: &MockServer, endpoint: &str, response: ResponseTemplate, expected: u64) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(response)
        .expect(expected)
        .up_to_n_times(expected)
        .mount(server)
        .await;
}

#[cfg(feature = "async")]
fn client_for(server: &MockServer) -> Result<Client> {
    Ok(Client::builder("example.com")
        .secret("s3cret")
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .build()?)
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_client_sends_credentials_as_query_params() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analytics/posts"))
        .and(query_param("apikey", "example.com"))
        .and(query_param("secret", "s3cret"))
        .and(query_param("sort", "views"))
        .and(query_param("days", "14"))
        .and(query_param("limit", "10"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"url": "https://example.com/a", "title": "A", "_hits": 1200, "_shares": 7},
                {"url": "https://example.com/b", "title": "B"}
            ]
        })))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;

    let posts = client.analytics().posts(&AnalyticsParams::default()).await?;
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].hits, Some(1200));
    assert_eq!(posts[0].shares, Some(7));
    assert_eq!(posts[1].hits, None);

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_client_maps_forbidden_to_auth_error() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/analytics/posts",
        ResponseTemplate::new(403).set_body_json(json!({
            "code": 403,
            "success": false,
            "message": "Forbidden: invalid secret"
        })),
        2,
    )
    .await;

    let client = client_for(&server)?;

    let err = client
        .analytics()
        .posts(&AnalyticsParams::default())
        .await
        .expect_err("expected HTTP error");

    match err {
        Error::Auth(http) => {
            assert_eq!(http.status, 403);
            assert_eq!(http.message.as_deref(), Some("Forbidden: invalid secret"));
            // the sanitized URL must not leak the credential query string
            assert!(http.url.query().is_none());
        }
        other => panic!("unexpected error variant: {other:?}"),
    }

    assert!(!client.authenticated().await?);

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_authenticated_accepts_valid_credentials() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/analytics/posts",
        ResponseTemplate::new(200).set_body_json(json!({ "data": [] })),
        1,
    )
    .await;

    let client = client_for(&server)?;
    assert!(client.authenticated().await?);

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_authenticated_rejects_error_envelope() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/analytics/posts",
        ResponseTemplate::new(200).set_body_json(json!({
            "code": 403,
            "success": false
        })),
        1,
    )
    .await;

    let client = client_for(&server)?;
    assert!(!client.authenticated().await?);

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_client_propagates_not_found() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/analytics/post/detail",
        ResponseTemplate::new(404).set_body_json(json!({
            "message": "post not found"
        })),
        1,
    )
    .await;

    let client = client_for(&server)?;

    let err = client
        .analytics()
        .post_detail("https://example.com/missing", None)
        .await
        .expect_err("expected HTTP error");

    match err {
        Error::NotFound(http) => {
            assert!(
                http.body_snippet
                    .as_deref()
                    .unwrap_or_default()
                    .contains("post not found")
            );
        }
        other => panic!("unexpected error variant: {other:?}"),
    }

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_error_body_snippet_redacts_secret() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/analytics/posts",
        ResponseTemplate::new(500).set_body_string("echo s3cret back"),
        1,
    )
    .await;

    let client = client_for(&server)?;

    let err = client
        .analytics()
        .posts(&AnalyticsParams::default())
        .await
        .expect_err("expected HTTP error");

    match err {
        Error::Api(http) => {
            let snippet = http.body_snippet.as_deref().unwrap_or_default();
            assert!(!snippet.contains("s3cret"));
            assert!(snippet.contains("<redacted>"));
        }
        other => panic!("unexpected error variant: {other:?}"),
    }

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_rate_limited_surfaces_retry_after() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/search",
        ResponseTemplate::new(429).append_header("Retry-After", "30"),
        1,
    )
    .await;

    let client = client_for(&server)?;

    let err = client
        .search()
        .query("security", &SearchParams::default())
        .await
        .expect_err("expected HTTP error");

    assert_eq!(err.kind(), ErrorKind::RateLimited);
    assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_one_sided_date_range_never_hits_the_wire() -> Result<()> {
    let server = MockServer::start().await;

    let client = client_for(&server)?;

    let params = AnalyticsParams {
        dates: DateFilter {
            period_start: chrono::NaiveDate::from_ymd_opt(2013, 4, 1),
            ..DateFilter::default()
        },
        ..AnalyticsParams::default()
    };
    let err = client
        .analytics()
        .posts(&params)
        .await
        .expect_err("expected validation error");
    assert_eq!(err.kind(), ErrorKind::InvalidParams);

    // no mocks mounted: any request would have failed verification
    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_referrers_stamp_requested_ref_type() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/referrers/social"))
        .and(query_param("days", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"name": "twitter.com", "_hits": 40},
                {"name": "facebook.com", "_hits": 12}
            ]
        })))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;

    let referrers = client
        .referrers()
        .list(RefType::Social, &ReferrerParams::default())
        .await?;
    assert_eq!(referrers.len(), 2);
    assert!(
        referrers
            .iter()
            .all(|r| r.ref_type == Some(RefType::Social))
    );

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_meta_detail_percent_encodes_value() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/analytics/author/Ars%20Staff/detail",
        ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"url": "https://example.com/a", "author": "Ars Staff"}]
        })),
        1,
    )
    .await;

    let client = client_for(&server)?;

    let posts = client
        .analytics()
        .meta_detail(MetaAspect::Author, "Ars Staff", &AnalyticsParams::default())
        .await?;
    assert_eq!(posts[0].author.as_deref(), Some("Ars Staff"));

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_realtime_renders_time_window() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/realtime/posts"))
        .and(query_param("time", "2h"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;

    let params = RealtimeParams {
        period: Some(RealtimePeriod::Hours(2)),
        limit: 5,
        ..RealtimeParams::default()
    };
    let posts = client.realtime().posts(&params).await?;
    assert!(posts.is_empty());

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_related_sends_boost_and_single_key() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/related"))
        .and(query_param("url", "https://example.com/a"))
        .and(query_param("boost", "visitors_new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"url": "https://example.com/b", "title": "B"}]
        })))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;

    let params = RelatedParams {
        boost: Metric::VisitorsNew,
        ..RelatedParams::default()
    };
    let related = client
        .recommendations()
        .related(&RelatedKey::Url("https://example.com/a".to_owned()), &params)
        .await?;
    assert_eq!(related[0].title.as_deref(), Some("B"));

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_train_reports_success_flag() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(query_param("uuid", "visitor-1"))
        .and(query_param("url", "https://example.com/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;

    assert!(
        client
            .recommendations()
            .train("visitor-1", "https://example.com/a")
            .await?
    );

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_history_unwraps_data_object() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/history"))
        .and(query_param("uuid", "visitor-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"uuid": "visitor-1", "urls": ["https://example.com/a"]}
        })))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;

    let history = client.recommendations().history("visitor-1").await?;
    assert_eq!(history.uuid.as_deref(), Some("visitor-1"));
    assert_eq!(history.urls, vec!["https://example.com/a"]);

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_shares_post_detail_parses_network_counts() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/shares/post/detail"))
        .and(query_param("url", "https://example.com/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"tw": 4, "fb": 2, "li": 1, "total": 7}]
        })))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = client_for(&server)?;

    let shares = client
        .shares()
        .post_detail("https://example.com/a")
        .await?
        .expect("shares row");
    assert_eq!(shares.twitter, Some(4));
    assert_eq!(shares.facebook, Some(2));
    assert_eq!(shares.linkedin, Some(1));
    assert_eq!(shares.pinterest, None);
    assert_eq!(shares.total, Some(7));

    server.verify().await;
    Ok(())
}

#[cfg(feature = "async")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_request_hook_can_add_headers() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("X-Caller", "dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = Client::builder("example.com")
        .base_url(server.uri())
        .request_hook(|ctx| {
            ctx.headers.insert(
                http::header::HeaderName::from_static("x-caller"),
                http::HeaderValue::from_static("dashboard"),
            );
            Ok(())
        })
        .build()?;

    client.search().query("rust", &SearchParams::default()).await?;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_client_lists_posts() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analytics/posts"))
        .and(query_param("apikey", "example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"url": "https://example.com/a", "_hits": 3}]
        })))
        .expect(1)
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let base_url = server.uri();
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder("example.com")
            .secret("s3cret")
            .base_url(base_url)
            .build()?;

        let posts = client
            .analytics()
            .posts(&parsely_sdk::AnalyticsParams::default())?;
        assert_eq!(posts[0].hits, Some(3));
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}

#[cfg(feature = "blocking")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_client_maps_auth_error() -> Result<()> {
    let server = MockServer::start().await;

    mock_get(
        &server,
        "/analytics/posts",
        ResponseTemplate::new(401).set_body_json(json!({ "message": "unauthorized" })),
        1,
    )
    .await;

    let base_url = server.uri();
    task::spawn_blocking(move || -> Result<()> {
        let client = BlockingClient::builder("example.com")
            .base_url(base_url)
            .build()?;

        assert!(!client.authenticated()?);
        Ok(())
    })
    .await??;

    server.verify().await;
    Ok(())
}
