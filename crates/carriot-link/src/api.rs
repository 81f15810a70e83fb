use crate::monitor::{DemoEntry, DemoList, MovementEntry, ObstacleEntry};
use crate::movement::{MovementRecord, MovementRequest};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("API rejected request ({status}): {body}")]
    Status { status: StatusCode, body: String },
}

/// Client for the vehicle API: movement submission and the history reads.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn movement_url(&self) -> String {
        self.url("movement")
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        log::debug!("GET {}", url);
        let response = Self::check(self.http.get(url).send().await?).await?;
        Ok(response.json().await?)
    }

    pub async fn submit(&self, request: MovementRequest) -> Result<MovementRecord, ApiError> {
        let response = self
            .http
            .post(self.movement_url())
            .json(&request)
            .send()
            .await?;
        Self::check(response).await?;

        log::info!("Submitted '{}' at speed {}", request.action, request.speed);
        Ok(MovementRecord::from(request))
    }

    /// Last ten movements recorded for `device`, newest first.
    pub async fn recent_movements(&self, device: u32) -> Result<Vec<MovementEntry>, ApiError> {
        self.get_json(&format!("api/movements/last10/{device}")).await
    }

    /// Last ten obstacles recorded for `device`, newest first.
    pub async fn recent_obstacles(&self, device: u32) -> Result<Vec<ObstacleEntry>, ApiError> {
        self.get_json(&format!("api/obstacles/last10/{device}")).await
    }

    pub async fn recent_demos(&self) -> Result<Vec<DemoEntry>, ApiError> {
        let list: DemoList = self.get_json("api/demos").await?;
        Ok(list.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::{CommandId, Speed};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Answers one request with `status` and `body`; yields the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            request
        });

        (base_url, handle)
    }

    fn request_body(raw: &str) -> serde_json::Value {
        let (_, body) = raw.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_movement_url_trims_trailing_slash() {
        assert_eq!(
            ApiClient::new("http://127.0.0.1:5555/").movement_url(),
            "http://127.0.0.1:5555/movement"
        );
        assert_eq!(
            ApiClient::new("https://api.carriot.online").movement_url(),
            "https://api.carriot.online/movement"
        );
        assert_eq!(
            ApiClient::new("https://api.carriot.online/").url("/api/demos"),
            "https://api.carriot.online/api/demos"
        );
    }

    #[test]
    fn test_status_error_message() {
        let err = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            body: "unknown action".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API rejected request (400 Bad Request): unknown action"
        );
    }

    #[tokio::test]
    async fn test_submit_rejected_carries_status_and_body() {
        let (base_url, server) = serve_once("500 Internal Server Error", "boom").await;
        let client = ApiClient::new(base_url);

        let err = client
            .submit(MovementRequest::new(CommandId::new("adelante"), Speed::Fast))
            .await
            .unwrap_err();

        match &err {
            ApiError::Status { status, body } => {
                assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "API rejected request (500 Internal Server Error): boom"
        );

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /movement HTTP/1.1\r\n"), "{raw}");
        let body = request_body(&raw);
        assert_eq!(body["action"], "adelante");
        assert_eq!(body["speed"], "rapido");
        let stamp = body["timestamp"].as_str().unwrap();
        assert!(stamp.ends_with('Z'), "{stamp}");
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[tokio::test]
    async fn test_submit_accepted_returns_record() {
        let (base_url, server) = serve_once("200 OK", r#"{"status": "ok"}"#).await;
        let client = ApiClient::new(format!("{base_url}/"));

        let record = client
            .submit(MovementRequest::new(CommandId::new("giro-90"), Speed::Reverse))
            .await
            .unwrap();

        assert_eq!(record.action.as_str(), "giro-90");
        assert!(record.to_string().ends_with("] GIRO 90 | REVERSA"));

        let raw = server.await.unwrap();
        assert_eq!(request_body(&raw)["speed"], "reversa");
    }

    #[tokio::test]
    async fn test_recent_movements_reads_device_history() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"[{"operacion": "atras", "velocidad": "normal", "client_city": "Quito", "event_time": null},
                {"operacion": "adelante", "velocidad": "rapido"}]"#,
        )
        .await;

        let entries = ApiClient::new(base_url).recent_movements(1).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].operation_text(), "Atrás");
        assert_eq!(entries[0].location(), "Quito");
        assert_eq!(entries[1].speed_text(), "Rápido");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("GET /api/movements/last10/1 HTTP/1.1\r\n"), "{raw}");
    }

    #[tokio::test]
    async fn test_recent_obstacles_not_found() {
        let (base_url, server) = serve_once("404 Not Found", "no device").await;

        let err = ApiClient::new(base_url).recent_obstacles(7).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Status { status, .. } if status == StatusCode::NOT_FOUND
        ));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("GET /api/obstacles/last10/7 "), "{raw}");
    }

    #[tokio::test]
    async fn test_recent_demos_unwraps_envelope() {
        let (base_url, _server) = serve_once(
            "200 OK",
            r#"{"demos": [{"demo_name": "Ocho", "created_at": "2026-10-01T09:00:00Z"}]}"#,
        )
        .await;

        let demos = ApiClient::new(base_url).recent_demos().await.unwrap();
        assert_eq!(demos.len(), 1);
        assert_eq!(demos[0].demo_name, "Ocho");
    }
}
