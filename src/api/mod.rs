pub mod token;

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::user::{LoginRecord, User};
use self::token::TokenStore;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Every remote failure collapses into one of these; `Display` is the
/// user-facing message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
    #[error("{0}")]
    Server(String),
    #[error("{0}")]
    Unauthorized(String),
}

/// Token + user pair returned by the login and signup endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// JSON client for the remote auth service. Attaches the persisted
/// bearer token to every call that has one.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    tokens: TokenStore,
}

impl ApiClient {
    pub fn new(base_url: &str, tokens: TokenStore) -> Result<Self, String> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            tokens,
        })
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.trim_end_matches('/').to_string();
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let body = serde_json::json!({ "name": name, "email": email, "password": password });
        self.post_json("/signup", &body).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.post_json("/login", &body).await
    }

    pub async fn profile(&self) -> Result<User, ApiError> {
        self.get_json("/me").await
    }

    pub async fn login_logs(&self) -> Result<Vec<LoginRecord>, ApiError> {
        self.get_json("/logs").await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        let mut req = self.http.post(format!("{}{}", self.base_url, path)).json(body);
        if let Some(token) = self.tokens.load() {
            req = req.bearer_auth(token);
        }
        log::debug!("POST {}{}", self.base_url, path);
        let resp = req.send().await?;
        self.decode(resp).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let mut req = self.http.get(format!("{}{}", self.base_url, path));
        if let Some(token) = self.tokens.load() {
            req = req.bearer_auth(token);
        }
        log::debug!("GET {}{}", self.base_url, path);
        let resp = req.send().await?;
        self.decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<T>()
                .await
                .map_err(|e| ApiError::Server(format!("Unexpected response: {}", e)));
        }

        let body = resp.text().await.unwrap_or_default();
        let message = error_message(&body);

        if status == reqwest::StatusCode::UNAUTHORIZED {
            // The stored credential is no longer valid; drop it before
            // surfacing the failure.
            self.tokens.clear();
            return Err(ApiError::Unauthorized(message));
        }
        Err(ApiError::Server(message))
    }
}

/// Pull the server's `message` (or `error`) field out of an error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Something went wrong".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn temp_tokens() -> TokenStore {
        let dir = std::env::temp_dir().join(format!("quill-api-test-{}", uuid::Uuid::new_v4()));
        TokenStore::new(dir.join("session.token"))
    }

    fn headers_end(buf: &[u8]) -> Option<usize> {
        buf.windows(4).position(|w| w == b"\r\n\r\n")
    }

    fn content_length(headers: &str) -> usize {
        headers
            .lines()
            .find_map(|l| l.to_ascii_lowercase().strip_prefix("content-length:").map(str::to_string))
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Serve exactly one canned HTTP/1.1 response, handing back the raw
    /// request for assertions.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            stream
                .set_read_timeout(Some(Duration::from_secs(5)))
                .unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = stream.read(&mut chunk).unwrap();
                buf.extend_from_slice(&chunk[..n]);
                if let Some(end) = headers_end(&buf) {
                    let headers = String::from_utf8_lossy(&buf[..end]).to_string();
                    if buf.len() >= end + 4 + content_length(&headers) {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&buf).to_string()
        });
        (format!("http://{}", addr), handle)
    }

    #[tokio::test]
    async fn login_returns_token_and_user() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"token":"T","user":{"name":"A","email":"a@b.com"}}"#,
        );
        let client = ApiClient::new(&url, temp_tokens()).unwrap();

        let session = client.login("a@b.com", "secret1").await.unwrap();
        assert_eq!(session.token, "T");
        assert_eq!(session.user.name, "A");
        assert_eq!(session.user.email, "a@b.com");

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /login"));
        assert!(request.contains("a@b.com"));
    }

    #[tokio::test]
    async fn stored_token_rides_along_as_bearer_header() {
        let tokens = temp_tokens();
        tokens.store("tok123").unwrap();
        let (url, server) = serve_once("200 OK", "[]");
        let client = ApiClient::new(&url, tokens).unwrap();

        let logs = client.login_logs().await.unwrap();
        assert!(logs.is_empty());

        let request = server.join().unwrap().to_ascii_lowercase();
        assert!(request.starts_with("get /logs"));
        assert!(request.contains("authorization: bearer tok123"));
    }

    #[tokio::test]
    async fn server_message_surfaces_verbatim() {
        let (url, _server) = serve_once("400 Bad Request", r#"{"message":"Invalid credentials"}"#);
        let client = ApiClient::new(&url, temp_tokens()).unwrap();

        let err = client.login("a@b.com", "wrong1").await.unwrap_err();
        assert!(matches!(err, ApiError::Server(_)));
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn missing_message_falls_back_to_generic() {
        let (url, _server) = serve_once("500 Internal Server Error", "oops");
        let client = ApiClient::new(&url, temp_tokens()).unwrap();

        let err = client.profile().await.unwrap_err();
        assert_eq!(err.to_string(), "Something went wrong");
    }

    #[tokio::test]
    async fn unauthorized_clears_the_persisted_token() {
        let tokens = temp_tokens();
        tokens.store("stale").unwrap();
        let (url, _server) = serve_once("401 Unauthorized", r#"{"message":"Session expired"}"#);
        let client = ApiClient::new(&url, tokens.clone()).unwrap();

        let err = client.profile().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
        assert_eq!(err.to_string(), "Session expired");
        assert!(tokens.load().is_none());
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        // Bind then drop to get a port with nothing listening.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let client = ApiClient::new(&format!("http://{}", addr), temp_tokens()).unwrap();

        let err = client.login("a@b.com", "secret1").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(err.to_string(), "Network error. Please check your connection.");
    }

    #[test]
    fn error_message_extraction() {
        assert_eq!(error_message(r#"{"message":"nope"}"#), "nope");
        assert_eq!(error_message(r#"{"error":"bad"}"#), "bad");
        assert_eq!(error_message("{not json"), "Something went wrong");
        assert_eq!(error_message(r#"{"message":42}"#), "Something went wrong");
    }
}
