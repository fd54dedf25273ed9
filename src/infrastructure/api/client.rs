//! Vehicle REST API abstraction and reqwest implementation

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{RequestBuilder, Response, StatusCode, Url};

use super::error::{parse_detail, ApiError};
use crate::domain::vehicle::{Vehicle, VehicleId};

/// Operations the vehicles page needs from the backend
#[async_trait::async_trait]
pub trait VehicleApi: Send + Sync + 'static {
    /// `GET /api/vehicle/user`
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ApiError>;

    /// `DELETE /api/vehicle/user/{id}`
    async fn delete_vehicle(&self, id: &VehicleId) -> Result<(), ApiError>;
}

/// Connection settings for [`HttpVehicleApi`]
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Option<Duration>,
}

pub struct HttpVehicleApi {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl HttpVehicleApi {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let base = parse_base_url(&config.base_url)?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to create HTTP client")?;
        Ok(Self {
            http,
            base,
            token: config.token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait::async_trait]
impl VehicleApi for HttpVehicleApi {
    async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ApiError> {
        let url = self.endpoint(&["api", "vehicle", "user"]);
        let response = self
            .authorized(self.http.get(url))
            .send()
            .await
            .map_err(ApiError::Transport)?;

        // Only a plain 200 carries the list
        if response.status() != StatusCode::OK {
            return Err(status_error(response).await);
        }

        response.json::<Vec<Vehicle>>().await.map_err(ApiError::Decode)
    }

    async fn delete_vehicle(&self, id: &VehicleId) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "vehicle", "user", id.as_str()]);
        let response = self
            .authorized(self.http.delete(url))
            .send()
            .await
            .map_err(ApiError::Transport)?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(())
    }
}

async fn status_error(response: Response) -> ApiError {
    let status = response.status();
    let detail = response
        .text()
        .await
        .ok()
        .and_then(|body| parse_detail(&body));
    ApiError::Status { status, detail }
}

pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid API URL: {raw}"))?;
    match url.scheme() {
        "http" | "https" => {}
        other => anyhow::bail!("unsupported API URL scheme: {other}"),
    }
    if url.cannot_be_a_base() {
        anyhow::bail!("API URL cannot be used as a base: {raw}");
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    /// Serve one canned response and hand back the raw request head
    async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&head).to_string()
        });
        (format!("http://{addr}"), handle)
    }

    fn client(base_url: String, token: Option<&str>) -> HttpVehicleApi {
        HttpVehicleApi::new(ApiConfig {
            base_url,
            token: token.map(str::to_string),
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_sends_bearer_and_decodes() {
        let body = r#"[{"id": "v1", "plate_number": "ABC-123"}, {"id": 5}]"#;
        let (base, server) = serve_once("200 OK", body).await;
        let api = client(base, Some("secret"));

        let vehicles = api.list_vehicles().await.unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[1].id, VehicleId::from(5));

        let head = server.await.unwrap().to_lowercase();
        assert!(head.starts_with("get /api/vehicle/user http/1.1"));
        assert!(head.contains("authorization: bearer secret"));
    }

    #[tokio::test]
    async fn test_list_rejects_non_200_success() {
        let (base, _server) = serve_once("204 No Content", "").await;
        let api = client(base, Some("secret"));

        let err = api.list_vehicles().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status, .. } if status == StatusCode::NO_CONTENT));
    }

    #[tokio::test]
    async fn test_list_bad_body_is_decode_error() {
        let (base, _server) = serve_once("200 OK", r#"{"vehicles": []}"#).await;
        let api = client(base, None);

        let err = api.list_vehicles().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_delete_targets_id_with_auth() {
        let (base, server) = serve_once("200 OK", r#"{"message": "deleted"}"#).await;
        let api = client(format!("{base}/"), Some("secret"));

        api.delete_vehicle(&VehicleId::from(5)).await.unwrap();

        let head = server.await.unwrap().to_lowercase();
        assert!(head.starts_with("delete /api/vehicle/user/5 http/1.1"));
        assert!(head.contains("authorization: bearer secret"));
    }

    #[tokio::test]
    async fn test_delete_failure_carries_detail() {
        let (base, _server) = serve_once("404 Not Found", r#"{"detail": "Vehicle not found"}"#).await;
        let api = client(base, None);

        let err = api.delete_vehicle(&VehicleId::new("zz")).await.unwrap_err();
        assert_eq!(err.detail(), Some("Vehicle not found"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let api = client(format!("http://{addr}"), None);

        let err = api.list_vehicles().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn test_parse_base_url() {
        assert!(parse_base_url("http://127.0.0.1:8000").is_ok());
        assert!(parse_base_url("ftp://example.com").is_err());
        assert!(parse_base_url("not a url").is_err());
    }
}
