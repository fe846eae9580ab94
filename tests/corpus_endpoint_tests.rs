use std::fs;
use std::path::Path;

use lectio::api::{CorpusSource, FetchError, FileCorpusSource, HttpCorpusSource};
use lectio::server::{CORPUS_ROUTE, ServerState, build_router};
use serde_json::json;
use tokio::net::TcpListener;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn testament_doc(name: &str, book_ids: &[&str]) -> serde_json::Value {
    let books: Vec<_> = book_ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "name": format!("Book {id}"),
                "abbreviation": id,
                "chapters": [{
                    "id": format!("{id}.1"),
                    "number": "1",
                    "reference": format!("Book {id} 1"),
                    "content": "[1] In the beginning."
                }]
            })
        })
        .collect();
    json!({ "bibleName": name, "bibleId": name.to_lowercase(), "books": books })
}

/// Writes OT and NT documents into `dir`, returning the server state for them.
fn write_corpus(dir: &Path) -> ServerState {
    let old_testament = dir.join("old-testament-data.json");
    let new_testament = dir.join("new-testament-data.json");
    fs::write(&old_testament, testament_doc("OT Name", &["GEN", "EXO"]).to_string()).unwrap();
    fs::write(&new_testament, testament_doc("World English Bible", &["MAT"]).to_string()).unwrap();
    ServerState {
        old_testament,
        new_testament,
    }
}

/// Serves the router on an ephemeral port and returns its base URL.
async fn spawn_server(state: ServerState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

// ============================================================================
// Endpoint Tests (real axum listener)
// ============================================================================

#[tokio::test]
async fn test_endpoint_serves_merged_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = spawn_server(write_corpus(dir.path())).await;

    let corpus = HttpCorpusSource::new(base_url).fetch().await.unwrap();
    assert_eq!(corpus.bible_name, "World English Bible");
    assert_eq!(corpus.bible_id, "world english bible");
    let ids: Vec<_> = corpus.books.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["GEN", "EXO", "MAT"]);
}

#[tokio::test]
async fn test_endpoint_rereads_files_per_request() {
    let dir = tempfile::tempdir().unwrap();
    let base_url = spawn_server(write_corpus(dir.path())).await;
    let source = HttpCorpusSource::new(base_url);

    assert_eq!(source.fetch().await.unwrap().books.len(), 3);

    fs::write(
        dir.path().join("new-testament-data.json"),
        testament_doc("World English Bible", &["MAT", "MRK"]).to_string(),
    )
    .unwrap();
    assert_eq!(source.fetch().await.unwrap().books.len(), 4);
}

#[tokio::test]
async fn test_endpoint_passes_unknown_fields_through() {
    let dir = tempfile::tempdir().unwrap();
    let state = write_corpus(dir.path());
    let mut nt = testament_doc("World English Bible", &["MAT"]);
    nt["copyright"] = json!("PD");
    nt["books"][0]["testament"] = json!("NT");
    nt["books"][0]["chapters"][0]["verseCount"] = json!(1);
    fs::write(&state.new_testament, nt.to_string()).unwrap();
    let base_url = spawn_server(state).await;

    let body: serde_json::Value = reqwest::get(format!("{base_url}{CORPUS_ROUTE}"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["copyright"], "PD");
    assert_eq!(body["books"][2]["testament"], "NT");
    assert_eq!(body["books"][2]["chapters"][0]["verseCount"], 1);
}

#[tokio::test]
async fn test_endpoint_serves_chapter_without_content() {
    let dir = tempfile::tempdir().unwrap();
    let state = write_corpus(dir.path());
    let mut ot = testament_doc("OT Name", &["GEN"]);
    ot["books"][0]["chapters"][0]
        .as_object_mut()
        .unwrap()
        .remove("content");
    fs::write(&state.old_testament, ot.to_string()).unwrap();
    let base_url = spawn_server(state).await;

    let response = reqwest::get(format!("{base_url}{CORPUS_ROUTE}")).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["books"][0]["chapters"][0].get("content").is_none());
    assert_eq!(body["books"][1]["id"], "MAT");
}

#[tokio::test]
async fn test_endpoint_missing_file_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let state = write_corpus(dir.path());
    fs::remove_file(&state.old_testament).unwrap();
    let base_url = spawn_server(state).await;

    let response = reqwest::get(format!("{base_url}{CORPUS_ROUTE}")).await.unwrap();
    assert_eq!(response.status().as_u16(), 500);
    let body = response.text().await.unwrap();
    assert!(body.contains("old-testament-data.json"));
}

#[tokio::test]
async fn test_endpoint_malformed_file_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let state = write_corpus(dir.path());
    fs::write(&state.new_testament, "{ not json").unwrap();
    let base_url = spawn_server(state).await;

    let err = HttpCorpusSource::new(base_url).fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_file_source_reads_same_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let state = write_corpus(dir.path());
    let source = FileCorpusSource {
        old_testament: state.old_testament,
        new_testament: state.new_testament,
    };
    let corpus = source.fetch().await.unwrap();
    assert_eq!(corpus.books.len(), 3);
    assert_eq!(corpus.bible_name, "World English Bible");
}

// ============================================================================
// HTTP Client Tests (wiremock)
// ============================================================================

#[tokio::test]
async fn test_client_parses_corpus() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CORPUS_ROUTE))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(testament_doc("Mock Bible", &["GEN"])),
        )
        .mount(&mock_server)
        .await;

    let corpus = HttpCorpusSource::new(mock_server.uri()).fetch().await.unwrap();
    assert_eq!(corpus.bible_name, "Mock Bible");
    assert_eq!(corpus.books[0].chapters[0].content, "[1] In the beginning.");
}

#[tokio::test]
async fn test_client_reports_server_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CORPUS_ROUTE))
        .respond_with(ResponseTemplate::new(500).set_body_string("Failed to load Bible data"))
        .mount(&mock_server)
        .await;

    let err = HttpCorpusSource::new(mock_server.uri()).fetch().await.unwrap_err();
    match err {
        FetchError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Failed to load Bible data");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_rejects_non_corpus_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CORPUS_ROUTE))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = HttpCorpusSource::new(mock_server.uri()).fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Parse(_)));
}

#[tokio::test]
async fn test_client_connection_refused_is_network_error() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = HttpCorpusSource::new(format!("http://{addr}"))
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));
}
