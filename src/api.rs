//! REST client for the diary server.
//!
//! # Protocol
//!
//! | Method | Path             | Body                      |
//! |--------|------------------|---------------------------|
//! | GET    | `/`              | -                         |
//! | POST   | `/add`           | `{title, content, date}`  |
//! | PUT    | `/update/{id}`   | `{title, content, date}`  |
//! | DELETE | `/delete/{id}`   | -                         |
//!
//! `GET /` answers with a JSON array of entries. Write endpoints answer with
//! the entry or a bare status; the body is never read, only the status.
//!
//! # Graceful Degradation
//!
//! Nothing here retries. Callers log the error and keep whatever state they
//! already had.

use reqwest::StatusCode;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::config::ServerConfig;
use crate::entry::{Entry, EntryId, EntryPayload};

/// Errors from talking to the diary server
#[derive(Error, Debug)]
pub enum ApiError {
    /// No usable response: connection refused, timeout, bad URL, undecodable body
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status} for {url}")]
    Status { status: StatusCode, url: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// The four operations the diary server offers.
///
/// Futures are `Send` so requests can run on spawned tasks while the UI
/// keeps drawing.
pub trait DiaryApi: Send + Sync + 'static {
    /// `GET /`
    fn list(&self) -> impl Future<Output = Result<Vec<Entry>>> + Send;

    /// `POST /add`
    fn create(&self, payload: &EntryPayload) -> impl Future<Output = Result<()>> + Send;

    /// `PUT /update/{id}`
    fn update(&self, id: &EntryId, payload: &EntryPayload)
        -> impl Future<Output = Result<()>> + Send;

    /// `DELETE /delete/{id}`
    ///
    /// Any HTTP response is `Ok` with its status; only transport failures are errors.
    fn delete(&self, id: &EntryId) -> impl Future<Output = Result<StatusCode>> + Send;
}

/// `DiaryApi` over HTTP
#[derive(Clone)]
pub struct HttpDiaryApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDiaryApi {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        tracing::info!("Using diary server: {}", base_url);

        Ok(Self { base_url, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-2xx response into `ApiError::Status`
    fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status,
                url: response.url().to_string(),
            })
        }
    }
}

impl DiaryApi for HttpDiaryApi {
    async fn list(&self) -> Result<Vec<Entry>> {
        let response = self.client.get(self.url("/")).send().await?;
        let entries = Self::check(response)?.json::<Vec<Entry>>().await?;
        tracing::debug!("GET / returned {} entries", entries.len());
        Ok(entries)
    }

    async fn create(&self, payload: &EntryPayload) -> Result<()> {
        let response = self
            .client
            .post(self.url("/add"))
            .json(payload)
            .send()
            .await?;
        Self::check(response)?;
        Ok(())
    }

    async fn update(&self, id: &EntryId, payload: &EntryPayload) -> Result<()> {
        let response = self
            .client
            .put(self.url(&format!("/update/{}", id)))
            .json(payload)
            .send()
            .await?;
        Self::check(response)?;
        Ok(())
    }

    async fn delete(&self, id: &EntryId) -> Result<StatusCode> {
        let response = self
            .client
            .delete(self.url(&format!("/delete/{}", id)))
            .send()
            .await?;
        Ok(response.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, State},
        http::StatusCode as AxumStatus,
        routing::{delete, get, post, put},
        Json, Router,
    };
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Requests seen by the fake server, as "METHOD path body"
    type Log = Arc<Mutex<Vec<String>>>;

    async fn list_handler(State(log): State<Log>) -> Json<serde_json::Value> {
        log.lock().push("GET /".to_string());
        Json(serde_json::json!([
            {"id": 1, "title": "A", "content": "B", "date": "2024-01-01"}
        ]))
    }

    async fn add_handler(State(log): State<Log>, Json(body): Json<EntryPayload>) -> AxumStatus {
        log.lock().push(format!("POST /add {}", body.title));
        AxumStatus::CREATED
    }

    async fn update_handler(
        State(log): State<Log>,
        Path(id): Path<String>,
        Json(body): Json<EntryPayload>,
    ) -> AxumStatus {
        log.lock().push(format!("PUT /update/{} {}", id, body.title));
        if id == "404" {
            AxumStatus::NOT_FOUND
        } else {
            AxumStatus::OK
        }
    }

    async fn delete_handler(State(log): State<Log>, Path(id): Path<String>) -> AxumStatus {
        log.lock().push(format!("DELETE /delete/{}", id));
        AxumStatus::INTERNAL_SERVER_ERROR
    }

    /// Start a fake diary server on an ephemeral port
    async fn spawn_server() -> (HttpDiaryApi, Log) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route("/", get(list_handler))
            .route("/add", post(add_handler))
            .route("/update/:id", put(update_handler))
            .route("/delete/:id", delete(delete_handler))
            .with_state(log.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let api = HttpDiaryApi::new(&ServerConfig {
            base_url: format!("http://{}/", addr),
            timeout_secs: 5,
        })
        .unwrap();
        (api, log)
    }

    fn payload(title: &str) -> EntryPayload {
        EntryPayload {
            title: title.to_string(),
            content: "c".to_string(),
            date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let api = HttpDiaryApi::new(&ServerConfig {
            base_url: "http://localhost:8080/".to_string(),
            timeout_secs: 10,
        })
        .unwrap();
        assert_eq!(api.base_url, "http://localhost:8080");
        assert_eq!(api.url("/add"), "http://localhost:8080/add");
    }

    #[tokio::test]
    async fn test_list_decodes_entries() {
        let (api, log) = spawn_server().await;
        let entries = api.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, EntryId::Number(1));
        assert_eq!(entries[0].title, "A");
        assert_eq!(*log.lock(), vec!["GET /"]);
    }

    #[tokio::test]
    async fn test_create_posts_payload() {
        let (api, log) = spawn_server().await;
        api.create(&payload("hello")).await.unwrap();
        assert_eq!(*log.lock(), vec!["POST /add hello"]);
    }

    #[tokio::test]
    async fn test_update_addresses_id() {
        let (api, log) = spawn_server().await;
        api.update(&EntryId::Number(7), &payload("edited")).await.unwrap();
        assert_eq!(*log.lock(), vec!["PUT /update/7 edited"]);
    }

    #[tokio::test]
    async fn test_update_non_success_is_status_error() {
        let (api, _log) = spawn_server().await;
        let err = api.update(&EntryId::Number(404), &payload("x")).await.unwrap_err();
        match err {
            ApiError::Status { status, url } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert!(url.ends_with("/update/404"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_reports_any_status() {
        let (api, log) = spawn_server().await;
        let status = api.delete(&EntryId::from("abc")).await.unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(*log.lock(), vec!["DELETE /delete/abc"]);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpDiaryApi::new(&ServerConfig {
            base_url: format!("http://{}", addr),
            timeout_secs: 2,
        })
        .unwrap();
        assert!(matches!(api.list().await, Err(ApiError::Transport(_))));
        assert!(matches!(
            api.delete(&EntryId::Number(3)).await,
            Err(ApiError::Transport(_))
        ));
    }
}
