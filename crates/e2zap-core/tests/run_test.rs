#![allow(clippy::unwrap_used)]
// End-to-end tests for `run` / `ChannelZapper` against a wiremock box.

use std::net::{SocketAddr, TcpListener};

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use e2zap_core::{ChannelZapper, CoreError, ZapOutcome, ZapParams, ZapReport, run};

// ── Helpers ─────────────────────────────────────────────────────────

/// An address nothing listens on: bind an ephemeral port, then release it.
fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

fn params_for(server: &MockServer, channel: &str) -> ZapParams {
    ZapParams {
        hostname: Some(server.address().ip().to_string()),
        port: Some(server.address().port().to_string()),
        channel: Some(channel.into()),
        ..ZapParams::default()
    }
}

const FLAT: &str = "<e2servicelist>
    <e2service>
        <e2servicereference>ref1</e2servicereference>
        <e2servicename>BBC One</e2servicename>
    </e2service>
    <e2service>
        <e2servicereference>ref2</e2servicereference>
        <e2servicename>ITV</e2servicename>
    </e2service>
</e2servicelist>";

const GROUPED: &str = "<e2servicelistrecursive>
    <e2bouquet>
        <e2servicereference>bouquet-a</e2servicereference>
        <e2servicename>Entertainment</e2servicename>
        <e2servicelist>
            <e2service>
                <e2servicereference>ref1</e2servicereference>
                <e2servicename>BBC One</e2servicename>
            </e2service>
        </e2servicelist>
    </e2bouquet>
    <e2bouquet>
        <e2servicereference>bouquet-b</e2servicereference>
        <e2servicename>News</e2servicename>
        <e2servicelist>
            <e2service>
                <e2servicereference>ref3</e2servicereference>
                <e2servicename>BBC News</e2servicename>
            </e2service>
        </e2servicelist>
    </e2bouquet>
</e2servicelistrecursive>";

async fn mount_listing(server: &MockServer, endpoint: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_zap(server: &MockServer, service_ref: &str, status: u16, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/web/zap"))
        .and(query_param("sRef", service_ref))
        .respond_with(ResponseTemplate::new(status))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn zap_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == "/web/zap")
        .count()
}

// ── Happy path ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_flat_listing_zaps_to_resolved_reference() {
    let server = MockServer::start().await;
    let mut params = params_for(&server, "ITV");
    params.bouquet_id = Some("fav".into());

    Mock::given(method("GET"))
        .and(path("/web/getservices"))
        .and(query_param("sRef", "fav"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FLAT))
        .expect(1)
        .mount(&server)
        .await;
    mount_zap(&server, "ref2", 200, 1).await;

    let report = run(params).await.unwrap();

    assert_eq!(report, ZapReport { status: ZapOutcome::Ok });
    let requests = server.received_requests().await.unwrap();
    let zap = requests.iter().find(|r| r.url.path() == "/web/zap").unwrap();
    assert!(zap.url.as_str().contains("ref2"));
}

#[tokio::test]
async fn test_grouped_listing_without_bouquet_uses_all_services() {
    let server = MockServer::start().await;

    mount_listing(&server, "/web/getallservices", GROUPED).await;
    mount_zap(&server, "ref3", 200, 1).await;

    let report = run(params_for(&server, "BBC News")).await.unwrap();
    assert_eq!(report.status, ZapOutcome::Ok);
}

#[tokio::test]
async fn test_grouped_listing_with_bouquet_limits_directory() {
    let server = MockServer::start().await;
    let mut params = params_for(&server, "BBC One");
    params.bouquet_id = Some("bouquet-b".into());

    Mock::given(method("GET"))
        .and(path("/web/getservices"))
        .and(query_param("sRef", "bouquet-b"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GROUPED))
        .mount(&server)
        .await;

    let zapper = ChannelZapper::new(params.clone().validate().unwrap()).unwrap();
    let directory = zapper.fetch_channel_directory().await.unwrap();
    assert_eq!(directory.len(), 1);
    assert_eq!(directory.resolve("BBC News"), Some("ref3"));
    assert_eq!(directory.resolve("BBC One"), None);

    // "BBC One" lives in the other bouquet, so it is unknown here.
    let report = run(params).await.unwrap();
    assert_eq!(report.status, ZapOutcome::Unknown);
    assert_eq!(zap_requests(&server).await, 0);
}

// ── Outcomes ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unknown_channel_sends_no_zap() {
    let server = MockServer::start().await;

    mount_listing(&server, "/web/getallservices", FLAT).await;
    Mock::given(method("GET"))
        .and(path("/web/zap"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let report = run(params_for(&server, "Channel 4")).await.unwrap();
    assert_eq!(report.status, ZapOutcome::Unknown);
}

#[tokio::test]
async fn test_missing_channel_is_unknown() {
    let server = MockServer::start().await;
    let mut params = params_for(&server, "");
    params.channel = None;

    mount_listing(&server, "/web/getallservices", FLAT).await;

    let report = run(params).await.unwrap();
    assert_eq!(report.status, ZapOutcome::Unknown);
    assert_eq!(zap_requests(&server).await, 0);
}

#[tokio::test]
async fn test_zap_404_is_fail() {
    let server = MockServer::start().await;

    mount_listing(&server, "/web/getallservices", FLAT).await;
    mount_zap(&server, "ref1", 404, 1).await;

    let report = run(params_for(&server, "BBC One")).await.unwrap();
    assert_eq!(report.status, ZapOutcome::Fail);
}

#[tokio::test]
async fn test_zap_redirect_is_fail() {
    let server = MockServer::start().await;

    mount_listing(&server, "/web/getallservices", FLAT).await;
    Mock::given(method("GET"))
        .and(path("/web/zap"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/"))
        .mount(&server)
        .await;

    let report = run(params_for(&server, "BBC One")).await.unwrap();
    assert_eq!(report.status, ZapOutcome::Fail);
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_hostname_fails_before_any_request() {
    let server = MockServer::start().await;
    let mut params = params_for(&server, "ITV");
    params.hostname = None;

    let result = run(params).await;

    assert!(
        matches!(&result, Err(CoreError::Configuration { message }) if message == "missing hostname"),
        "got: {result:?}"
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_half_credentials_fail_before_any_request() {
    let server = MockServer::start().await;
    let mut params = params_for(&server, "ITV");
    params.user = Some("root".into());

    let result = run(params).await;

    assert!(
        matches!(&result, Err(CoreError::Configuration { message }) if message == "inconsistent credentials"),
        "got: {result:?}"
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_listing_error_status_is_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/web/getallservices"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = run(params_for(&server, "ITV")).await;

    assert!(matches!(result, Err(CoreError::Network { .. })), "got: {result:?}");
    assert_eq!(zap_requests(&server).await, 0);
}

#[tokio::test]
async fn test_unreachable_box_is_network_error() {
    let addr = closed_port();
    let params = ZapParams {
        hostname: Some(addr.ip().to_string()),
        port: Some(addr.port().to_string()),
        channel: Some("ITV".into()),
        ..ZapParams::default()
    };

    let result = run(params).await;

    match result {
        Err(CoreError::Network { ref message }) => {
            assert!(message.contains("unreachable"), "got: {message}");
            assert!(!message.contains("Unexpected HTTP"), "got: {message}");
        }
        other => panic!("expected Network error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unexpected_document_is_parse_error() {
    let server = MockServer::start().await;

    mount_listing(&server, "/web/getallservices", "<e2simplexmlresult/>").await;

    let result = run(params_for(&server, "ITV")).await;

    assert!(matches!(result, Err(CoreError::Parse { .. })), "got: {result:?}");
    assert_eq!(zap_requests(&server).await, 0);
}

#[tokio::test]
async fn test_credentials_are_sent_on_every_request() {
    let server = MockServer::start().await;
    let mut params = params_for(&server, "ITV");
    params.user = Some("root".into());
    params.password = Some("dreambox".into());

    Mock::given(method("GET"))
        .and(path("/web/getallservices"))
        .and(wiremock::matchers::basic_auth("root", "dreambox"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FLAT))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/web/zap"))
        .and(wiremock::matchers::basic_auth("root", "dreambox"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let report = run(params).await.unwrap();
    assert_eq!(report.status, ZapOutcome::Ok);
}
