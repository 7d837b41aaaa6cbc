//! Request tests for the single-object endpoints and client configuration.
//!
//! Uses wiremock to mock the Releases API.

use hashicorp_releases::{
    ClientConfig, LicenseClass, ReleasesClient, ReleasesError, DEFAULT_USER_AGENT,
    PRODUCTS_MEDIA_TYPE,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn release_body(product: &str, version: &str, license_class: &str) -> serde_json::Value {
    json!({
        "builds": [{
            "arch": "amd64",
            "os": "linux",
            "url": format!("https://releases.hashicorp.com/{product}/{version}/{product}_{version}_linux_amd64.zip")
        }],
        "is_prerelease": false,
        "license_class": license_class,
        "name": product,
        "status": { "state": "supported" },
        "timestamp_created": "2024-06-26T14:54:57.000Z",
        "timestamp_updated": "2024-06-26T14:54:57.000Z",
        "url_shasums_signatures": [],
        "version": version
    })
}

// =============================================================================
// release
// =============================================================================

#[tokio::test]
async fn test_release_fetches_version() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/releases/terraform/1.9.0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(release_body("terraform", "1.9.0", "oss")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ReleasesClient::new(&mock_server.uri()).unwrap();
    let release = client.release("terraform", "1.9.0").await.unwrap();

    assert_eq!(release.name, "terraform");
    assert_eq!(release.version, "1.9.0");
    assert!(release.build_for("linux", "amd64").is_some());
}

#[tokio::test]
async fn test_release_escapes_version() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/releases/consul/1.15.0%2Bent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(release_body(
            "consul",
            "1.15.0+ent",
            "enterprise",
        )),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ReleasesClient::new(&mock_server.uri()).unwrap();
    let release = client.release("consul", "1.15.0+ent").await.unwrap();

    assert_eq!(release.license_class, LicenseClass::Enterprise);
}

#[tokio::test]
async fn test_release_rejects_empty_arguments() {
    let mock_server = MockServer::start().await;
    let client = ReleasesClient::new(&mock_server.uri()).unwrap();

    assert!(matches!(
        client.release("", "1.0.0").await,
        Err(ReleasesError::InvalidProduct(_))
    ));
    assert!(matches!(
        client.release("terraform", "").await,
        Err(ReleasesError::InvalidVersion(_))
    ));

    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_release_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/releases/terraform/0.0.0"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 404,
            "message": "release not found"
        })))
        .mount(&mock_server)
        .await;

    let client = ReleasesClient::new(&mock_server.uri()).unwrap();
    let err = client.release("terraform", "0.0.0").await.unwrap_err();

    assert!(matches!(err, ReleasesError::InvalidStatusCode(404)));
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_release_connection_failure_passes_through() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ReleasesClient::new(&format!("http://{addr}")).unwrap();
    let err = client.release("terraform", "1.9.0").await.unwrap_err();

    match err {
        ReleasesError::Http(ref e) => assert!(e.is_connect()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_release_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/releases/terraform/1.9.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": 1 })))
        .mount(&mock_server)
        .await;

    let client = ReleasesClient::new(&mock_server.uri()).unwrap();
    let err = client.release("terraform", "1.9.0").await.unwrap_err();

    assert!(matches!(err, ReleasesError::InvalidResponseBody(_)));
}

// =============================================================================
// latest_release
// =============================================================================

#[tokio::test]
async fn test_latest_release_with_license_class() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/releases/vault/latest"))
        .and(query_param("license_class", "hcp"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(release_body("vault", "1.17.1", "hcp")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ReleasesClient::new(&mock_server.uri()).unwrap();
    let release = client
        .latest_release("vault", Some(LicenseClass::Hcp))
        .await
        .unwrap();

    assert_eq!(release.license_class, LicenseClass::Hcp);
}

#[tokio::test]
async fn test_latest_release_without_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/releases/vault/latest"))
        .and(query_param_is_missing("license_class"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(release_body("vault", "1.17.1", "oss")),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = ReleasesClient::new(&mock_server.uri()).unwrap();
    client.latest_release("vault", None).await.unwrap();
    client
        .latest_release("vault", Some(LicenseClass::Any))
        .await
        .unwrap();
}

// =============================================================================
// products
// =============================================================================

#[tokio::test]
async fn test_products() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .and(header("accept", PRODUCTS_MEDIA_TYPE))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"["consul","terraform","vault"]"#, PRODUCTS_MEDIA_TYPE),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ReleasesClient::new(&mock_server.uri()).unwrap();
    let products = client.products().await.unwrap();

    assert_eq!(products, ["consul", "terraform", "vault"]);
}

#[tokio::test]
async fn test_products_rejects_other_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["consul"])))
        .mount(&mock_server)
        .await;

    let client = ReleasesClient::new(&mock_server.uri()).unwrap();
    let err = client.products().await.unwrap_err();

    match err {
        ReleasesError::InvalidContentType(content_type) => {
            assert_eq!(content_type, "application/json")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_products_rejects_missing_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(&b"[\"consul\"]"[..]))
        .mount(&mock_server)
        .await;

    let client = ReleasesClient::new(&mock_server.uri()).unwrap();
    let err = client.products().await.unwrap_err();

    assert!(matches!(err, ReleasesError::InvalidContentType(ref ct) if ct == "<none>"));
}

#[tokio::test]
async fn test_products_checks_status_before_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let client = ReleasesClient::new(&mock_server.uri()).unwrap();
    let err = client.products().await.unwrap_err();

    assert!(matches!(err, ReleasesError::InvalidStatusCode(502)));
}

// =============================================================================
// Configuration
// =============================================================================

#[tokio::test]
async fn test_default_user_agent_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(release_body("nomad", "1.8.0", "oss")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ReleasesClient::new(&mock_server.uri()).unwrap();
    client.release("nomad", "1.8.0").await.unwrap();
}

#[tokio::test]
async fn test_custom_user_agent_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", "release-mirror/2.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::default()
        .with_base_url(mock_server.uri())
        .with_user_agent("release-mirror/2.1");
    let client = ReleasesClient::with_config(config).unwrap();

    let pages = client.paginator("nomad", None).unwrap().next_page().await.unwrap();
    assert!(pages.is_none());
}

#[tokio::test]
async fn test_user_agent_can_be_omitted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(|req: &Request| !req.headers.contains_key("user-agent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(release_body("nomad", "1.8.0", "oss")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::default()
        .with_base_url(mock_server.uri())
        .without_user_agent();
    let client = ReleasesClient::with_config(config).unwrap();

    client.release("nomad", "1.8.0").await.unwrap();
}

#[tokio::test]
async fn test_invalid_user_agent_fails_before_sending() {
    let mock_server = MockServer::start().await;

    let config = ClientConfig::default()
        .with_base_url(mock_server.uri())
        .with_user_agent("bad\nagent");
    let client = ReleasesClient::with_config(config).unwrap();

    let err = client.release("nomad", "1.8.0").await.unwrap_err();

    assert!(matches!(err, ReleasesError::RequestConstruction(_)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/mirror/v1/releases/packer/1.11.0"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(release_body("packer", "1.11.0", "oss")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ReleasesClient::new(&format!("{}/mirror", mock_server.uri())).unwrap();
    let release = client.release("packer", "1.11.0").await.unwrap();

    assert_eq!(release.version, "1.11.0");
}
