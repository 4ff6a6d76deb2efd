//! Single-attempt HTTP GET with a fixed timeout and browser-like headers.
//!
//! The [`Fetcher`] owns two `reqwest` clients sharing the same timeout: one
//! that verifies TLS certificates and one that does not, selected per call.
//! There are no retries and no size limits; redirects follow reqwest's
//! defaults.

use crate::config::{DEFAULT_USER_AGENT, FetchSettings};
use crate::error::FetchError;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Instant;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    insecure_client: Client,
    default_headers: HeaderMap,
    verify_tls: bool,
}

impl Fetcher {
    /// Build a fetcher from settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if a TLS backend cannot be initialized.
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(FetchError::Client)?;
        let insecure_client = Client::builder()
            .timeout(settings.timeout())
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(FetchError::Client)?;

        let ua = HeaderValue::from_str(&settings.user_agent).unwrap_or_else(|e| {
            warn!(
                user_agent = %settings.user_agent,
                error = %e,
                "Configured User-Agent is not a valid header value; using the default"
            );
            HeaderValue::from_static(DEFAULT_USER_AGENT)
        });
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, ua);

        Ok(Self {
            client,
            insecure_client,
            default_headers,
            verify_tls: settings.verify_tls,
        })
    }

    /// GET `url` with the default headers and the configured TLS
    /// verification.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.fetch_with(url, None, self.verify_tls).await
    }

    /// GET `url`.
    ///
    /// When `headers` is `None` the default header set (browser User-Agent)
    /// is sent; otherwise the supplied headers replace it entirely.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Transport`] on DNS, connect, TLS, timeout or body errors
    /// - [`FetchError::Status`] on any non-2xx response
    #[instrument(level = "debug", skip_all, fields(%url, verify_tls))]
    pub async fn fetch_with(
        &self,
        url: &str,
        headers: Option<HeaderMap>,
        verify_tls: bool,
    ) -> Result<Vec<u8>, FetchError> {
        let t0 = Instant::now();
        let client = if verify_tls {
            &self.client
        } else {
            &self.insecure_client
        };
        let headers = headers.unwrap_or_else(|| self.default_headers.clone());

        let response = client
            .get(url)
            .headers(headers)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        debug!(
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched"
        );
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use tokio::net::TcpListener;

    fn fetcher() -> Fetcher {
        Fetcher::new(&FetchSettings::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_sends_default_user_agent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/ok")
            .match_header("user-agent", DEFAULT_USER_AGENT)
            .with_status(200)
            .with_body("hello")
            .expect(1)
            .create_async()
            .await;

        let body = fetcher()
            .fetch(&format!("{}/ok", server.url()))
            .await
            .unwrap();
        assert_eq!(body, b"hello");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_invalid_configured_user_agent_falls_back_to_default() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/ua")
            .match_header("user-agent", DEFAULT_USER_AGENT)
            .with_status(200)
            .with_body("ok")
            .expect(1)
            .create_async()
            .await;

        let settings = FetchSettings {
            user_agent: "bad\nagent".to_string(),
            ..FetchSettings::default()
        };
        let body = Fetcher::new(&settings)
            .unwrap()
            .fetch(&format!("{}/ua", server.url()))
            .await
            .unwrap();
        assert_eq!(body, b"ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_configured_user_agent_is_sent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/ua")
            .match_header("user-agent", "lit-search/2.0")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let settings = FetchSettings {
            user_agent: "lit-search/2.0".to_string(),
            ..FetchSettings::default()
        };
        Fetcher::new(&settings)
            .unwrap()
            .fetch(&format!("{}/ua", server.url()))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unverified_tls_client_sends_default_headers() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/insecure")
            .match_header("user-agent", DEFAULT_USER_AGENT)
            .with_status(200)
            .with_body("plain")
            .expect(2)
            .create_async()
            .await;
        let url = format!("{}/insecure", server.url());

        let body = fetcher().fetch_with(&url, None, false).await.unwrap();
        assert_eq!(body, b"plain");

        let settings = FetchSettings {
            verify_tls: false,
            ..FetchSettings::default()
        };
        let body = Fetcher::new(&settings).unwrap().fetch(&url).await.unwrap();
        assert_eq!(body, b"plain");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unverified_tls_client_reports_status_errors() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/gone")
            .with_status(410)
            .create_async()
            .await;

        let err = fetcher()
            .fetch_with(&format!("{}/gone", server.url()), None, false)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status { status, .. } if status.as_u16() == 410));
    }

    #[tokio::test]
    async fn test_custom_headers_replace_defaults() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/custom")
            .match_header("user-agent", "lit-search-test/1.0")
            .match_header("x-lit-search", "1")
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("lit-search-test/1.0"));
        headers.insert("x-lit-search", HeaderValue::from_static("1"));

        let body = fetcher()
            .fetch_with(&format!("{}/custom", server.url()), Some(headers), true)
            .await
            .unwrap();
        assert_eq!(body, b"ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_2xx_is_status_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let err = fetcher()
            .fetch(&format!("{}/missing", server.url()))
            .await
            .unwrap_err();
        match err {
            FetchError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        // Accepts connections at the OS level but never answers.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let settings = FetchSettings {
            timeout_secs: 1,
            ..FetchSettings::default()
        };
        let err = Fetcher::new(&settings)
            .unwrap()
            .fetch(&format!("http://{addr}/slow"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
        drop(listener);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetcher()
            .fetch(&format!("http://{addr}/"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
