//! HTTP transport tests against a local mock server.

use std::fs;
use std::path::Path;

use tvdb_xml::transport::TransportError;
use tvdb_xml::{Client, ClientConfig, TvdbError};
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// Client configured to talk to the mock server
fn client_for(server: &MockServer) -> Client {
    let address = server.address();
    let config = ClientConfig {
        host: address.ip().to_string(),
        port: address.port(),
        ..ClientConfig::new("1234abc")
    };
    Client::new(config).unwrap()
}

#[tokio::test]
async fn test_languages_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/1234abc/languages.xml"))
        .and(header_exists("user-agent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_bytes(load_fixture("languages.multiple.xml")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let languages = client_for(&server).get_languages().await.unwrap();
    assert_eq!(languages.len(), 23);
}

#[tokio::test]
async fn test_search_query_is_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/GetSeries.php"))
        .and(query_param("seriesname", "The Wire"))
        .and(query_param("language", "en"))
        .respond_with(
            ResponseTemplate::new(200).set_body_bytes(load_fixture("find_tv_show.empty.xml")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server).find_tv_show("The Wire").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = client_for(&server).get_mirrors().await;
    match result {
        Err(TvdbError::Transport(TransportError::Status { status })) => assert_eq!(status, 500),
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found_status_is_reported() {
    let server = MockServer::start().await;

    let result = client_for(&server).get_server_time().await;
    assert!(matches!(
        result,
        Err(TvdbError::Transport(TransportError::Status { status: 404 }))
    ));
}

#[tokio::test]
async fn test_archive_download_from_mirror() {
    let server = MockServer::start().await;
    let archive = load_fixture("series.79349.zip");
    Mock::given(method("GET"))
        .and(path("/api/1234abc/series/79349/all/en.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(archive.clone()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let bytes = client
        .get_full_series_archive(&server.uri(), "79349", None)
        .await
        .unwrap();
    assert_eq!(bytes, archive);

    let info = client
        .get_series_info(&server.uri(), "79349", None)
        .await
        .unwrap();
    assert_eq!(info.series.name, "Dexter");
    assert_eq!(info.episodes.len(), 3);
}

#[tokio::test]
async fn test_unreachable_host() {
    let config = ClientConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        ..ClientConfig::new("1234abc")
    };
    let result = Client::new(config).unwrap().get_mirrors().await;

    assert!(matches!(
        result,
        Err(TvdbError::Transport(TransportError::Request(_)))
    ));
}
