//! # Corpus Endpoint
//!
//! One read-only route:
//!
//! ```text
//! GET /api/bible-data  →  200 {bibleName, bibleId, books: [OT..., NT...]}
//!                      →  500 text/plain when a source file is missing or malformed
//! ```
//!
//! Every request reads both source documents fresh from disk and merges
//! them. There is no cache and no shared mutable state between requests.
//! The route works on untyped JSON, so fields the reader never looks at
//! are passed through unchanged. [`load_corpus`] is the typed loader used
//! by `read --local`.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio::net::TcpListener;
use tokio::signal;

use crate::core::corpus::Corpus;

pub const CORPUS_ROUTE: &str = "/api/bible-data";

// ============================================================================
// Loading
// ============================================================================

#[derive(Debug)]
pub enum CorpusError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            CorpusError::Parse { path, source } => {
                write!(f, "failed to parse {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for CorpusError {}

/// Read and parse one corpus document.
pub async fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, CorpusError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&raw).map_err(|source| CorpusError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load both testaments and merge them, Old Testament first.
pub async fn load_corpus(
    old_testament: &Path,
    new_testament: &Path,
) -> Result<Corpus, CorpusError> {
    let ot = load_document(old_testament).await?;
    let nt = load_document(new_testament).await?;
    Ok(Corpus::merge(ot, nt))
}

/// Untyped merge: OT books then NT books, everything else from the NT document.
pub fn merge_documents(mut ot: Value, nt: Value) -> Value {
    let mut books = take_books(&mut ot);
    let mut merged = match nt {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Some(Value::Array(nt_books)) = merged.get_mut("books") {
        books.append(nt_books);
    }
    merged.insert("books".to_string(), Value::Array(books));
    Value::Object(merged)
}

fn take_books(document: &mut Value) -> Vec<Value> {
    document
        .get_mut("books")
        .and_then(Value::as_array_mut)
        .map(std::mem::take)
        .unwrap_or_default()
}

/// Load both testaments as raw JSON and merge them for the endpoint.
pub async fn load_merged_document(
    old_testament: &Path,
    new_testament: &Path,
) -> Result<Value, CorpusError> {
    let ot = load_document(old_testament).await?;
    let nt = load_document(new_testament).await?;
    Ok(merge_documents(ot, nt))
}

// ============================================================================
// HTTP
// ============================================================================

pub struct ServerState {
    pub old_testament: PathBuf,
    pub new_testament: PathBuf,
}

type SharedState = Arc<ServerState>;

struct ApiError(CorpusError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}

pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route(CORPUS_ROUTE, get(bible_data))
        .with_state(Arc::new(state))
}

async fn bible_data(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    match load_merged_document(&state.old_testament, &state.new_testament).await {
        Ok(document) => {
            info!(
                "GET {} → 200 ({} books)",
                CORPUS_ROUTE,
                document["books"].as_array().map_or(0, Vec::len)
            );
            Ok(Json(document))
        }
        Err(e) => {
            warn!("GET {} → 500: {}", CORPUS_ROUTE, e);
            Err(ApiError(e))
        }
    }
}

/// Bind `addr` and serve until Ctrl+C or SIGTERM.
pub async fn serve(addr: &str, state: ServerState) -> io::Result<()> {
    let router = build_router(state);
    let listener = TcpListener::bind(addr).await?;
    info!("Serving corpus at http://{}{}", listener.local_addr()?, CORPUS_ROUTE);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server exited");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{book, corpus};
    use serde_json::json;
    use std::fs;

    fn write_corpus(dir: &Path, name: &str, c: &Corpus) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, serde_json::to_string_pretty(c).unwrap()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_corpus_merges_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let ot = write_corpus(dir.path(), "ot.json", &corpus(vec![book("GEN", 2), book("EXO", 1)]));
        let mut nt_doc = corpus(vec![book("MAT", 1)]);
        nt_doc.bible_name = "World English Bible".to_string();
        let nt = write_corpus(dir.path(), "nt.json", &nt_doc);

        let merged = load_corpus(&ot, &nt).await.unwrap();
        let ids: Vec<&str> = merged.books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["GEN", "EXO", "MAT"]);
        assert_eq!(merged.bible_name, "World English Bible");
    }

    #[tokio::test]
    async fn test_missing_document_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let nt = write_corpus(dir.path(), "nt.json", &corpus(vec![]));
        let err = load_corpus(&dir.path().join("absent.json"), &nt)
            .await
            .unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[tokio::test]
    async fn test_malformed_document_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let ot = write_corpus(dir.path(), "ot.json", &corpus(vec![]));
        let nt = dir.path().join("nt.json");
        fs::write(&nt, "{ not json").unwrap();
        let err = load_corpus(&ot, &nt).await.unwrap_err();
        assert!(matches!(err, CorpusError::Parse { .. }));
    }

    #[test]
    fn test_merge_documents_keeps_unknown_fields() {
        let ot = json!({
            "bibleName": "OT Name",
            "bibleId": "ot",
            "books": [{
                "id": "GEN",
                "testament": "OT",
                "chapters": [{"id": "GEN.1", "verseCount": 1}]
            }]
        });
        let nt = json!({
            "bibleName": "World English Bible",
            "bibleId": "web",
            "copyright": "PD",
            "books": [{"id": "MAT", "chapters": []}]
        });

        let merged = merge_documents(ot, nt);
        assert_eq!(merged["bibleName"], "World English Bible");
        assert_eq!(merged["bibleId"], "web");
        assert_eq!(merged["copyright"], "PD");
        assert_eq!(merged["books"][0]["testament"], "OT");
        assert_eq!(merged["books"][0]["chapters"][0]["verseCount"], 1);
        assert_eq!(merged["books"][1]["id"], "MAT");
        let keys: Vec<&str> = merged.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["bibleName", "bibleId", "copyright", "books"]);
    }

    #[test]
    fn test_merge_documents_without_books() {
        let merged = merge_documents(json!({}), json!({"bibleName": "Empty"}));
        assert_eq!(merged["books"], json!([]));
        assert_eq!(merged["bibleName"], "Empty");
    }

    #[tokio::test]
    async fn test_merged_document_tolerates_chapter_without_content() {
        let dir = tempfile::tempdir().unwrap();
        let ot = dir.path().join("ot.json");
        fs::write(
            &ot,
            json!({"books": [{"id": "GEN", "chapters": [{"id": "GEN.1"}]}]}).to_string(),
        )
        .unwrap();
        let nt = write_corpus(dir.path(), "nt.json", &corpus(vec![book("MAT", 1)]));

        let merged = load_merged_document(&ot, &nt).await.unwrap();
        assert_eq!(merged["books"][0]["chapters"][0]["id"], "GEN.1");
        assert_eq!(merged["books"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_api_error_is_internal_server_error() {
        let err = ApiError(CorpusError::Io {
            path: PathBuf::from("ot.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        });
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
