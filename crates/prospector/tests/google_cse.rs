//! Custom Search client against a local mock server.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use prospector::*;

fn backend_for(server: &MockServer) -> GoogleCseBackend {
    GoogleCseBackend::new("test-key", "test-cx", Duration::from_secs(5))
        .with_endpoint(format!("{}/customsearch/v1", server.uri()))
}

#[tokio::test]
async fn test_sends_credentials_query_and_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "test-cx"))
        .and(query_param("q", "\"Minería\" \"Arequipa\""))
        .and(query_param("num", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "title": "Minera del Sur S.A.C.",
                    "displayLink": "minerasur.pe",
                    "snippet": "RUC 20455667788. Jefe de SSOMA: ssoma@minerasur.pe.",
                    "link": "https://minerasur.pe/contacto"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let items = backend_for(&server)
        .search("\"Minería\" \"Arequipa\"", 10)
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].display_link, "minerasur.pe");
    assert_eq!(items[0].title, "Minera del Sur S.A.C.");
}

#[tokio::test]
async fn test_api_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "code": 403, "message": "API key not valid. Please pass a valid API key." }
        })))
        .mount(&server)
        .await;

    let err = backend_for(&server).search("q", 10).await.unwrap_err();
    match err {
        ProspectError::Api { status, message } => {
            assert_eq!(status, 403);
            assert!(message.starts_with("API key not valid"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = backend_for(&server).search("q", 10).await.unwrap_err();
    assert!(matches!(err, ProspectError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_engine_end_to_end_real_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "title": "Listado", "displayLink": "lista.pe", "snippet": "empresas" },
                {
                    "title": "Empresa SAC",
                    "displayLink": "empresa.com",
                    "snippet": "Gerente General: contacto@empresa.com"
                }
            ]
        })))
        .mount(&server)
        .await;

    let engine = SearchEngine::with_backend(Arc::new(backend_for(&server)));
    let report = engine
        .search_report(&SearchRequest::new("Construcción", "Lima", true))
        .await;

    assert_eq!(report.data_source, DataSource::RealApi);
    assert_eq!(report.records[0].display_name, "Empresa SAC");
    assert_eq!(report.records[0].contact_info.as_deref(), Some("contacto@empresa.com"));
    assert_eq!(report.records[0].role_detected, Some(DecisionRole::GeneralManager));
    assert!(report.records[0].confidence_score >= 0.95);
    assert!(engine.last_error().is_none());
}

#[tokio::test]
async fn test_engine_falls_back_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let engine = SearchEngine::with_backend(Arc::new(backend_for(&server))).with_seed(4);
    let records = engine
        .search(&SearchRequest::new("Construcción", "Lima", false))
        .await;

    assert!((8..=15).contains(&records.len()));
    let last = engine.last_error().unwrap();
    assert!(last.contains("500"));
}

#[tokio::test]
async fn test_unreachable_endpoint_falls_back() {
    // Port 9 (discard) is not expected to have an HTTP listener.
    let backend = GoogleCseBackend::new("k", "cx", Duration::from_millis(500))
        .with_endpoint("http://127.0.0.1:9/customsearch/v1");
    let engine = SearchEngine::with_backend(Arc::new(backend)).with_seed(6);

    let records = engine
        .search(&SearchRequest::new("Agroindustria", "Ica", true))
        .await;
    assert!(!records.is_empty());
    assert!(engine.last_error().is_some());
}
