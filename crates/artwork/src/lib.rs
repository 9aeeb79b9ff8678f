//! Game icon fetching for key display.
//!
//! Icons come from the Steam media CDN at a deterministic URL built from
//! the app id and the icon hash. Fetching is strictly best-effort: any
//! failure is logged and becomes "no image"; a missing icon must never
//! block title display or launching.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

const DEFAULT_BASE_URL: &str = "https://media.steampowered.com";

/// A fetched icon ready for `setImage`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl KeyImage {
    /// Encodes the image as a `data:` URI for the host.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, BASE64.encode(&self.bytes))
    }
}

/// Fetches game icons from the media CDN.
pub struct IconClient {
    http: reqwest::Client,
    base_url: String,
}

impl IconClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Sets a custom base URL (for testing).
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Builds the CDN URL for a game's icon.
    pub fn icon_url(&self, app_id: &str, icon_hash: &str) -> String {
        format!(
            "{}/steamcommunity/public/images/apps/{app_id}/{icon_hash}.jpg",
            self.base_url
        )
    }

    /// Fetches a game's icon, yielding `None` on any failure.
    pub async fn fetch(&self, app_id: &str, icon_hash: &str) -> Option<KeyImage> {
        if app_id.is_empty() || icon_hash.is_empty() {
            return None;
        }

        let url = self.icon_url(app_id, icon_hash);
        match self.fetch_url(&url).await {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!(%url, "failed to fetch icon: {e}");
                None
            }
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<KeyImage, reqwest::Error> {
        let resp = self.http.get(url).send().await?.error_for_status()?;

        let mime = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();

        let bytes = resp.bytes().await?.to_vec();
        Ok(KeyImage { mime, bytes })
    }
}

impl Default for IconClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Starts a mock HTTP server that serves one image response.
    async fn mock_image_server(
        status: u16,
        content_type: &str,
        body: &[u8],
    ) -> (String, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let url = format!("http://127.0.0.1:{port}");
        let content_type = content_type.to_string();
        let body = body.to_vec();

        let handle = tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let _ = stream.read(&mut buf).await;

                let head = format!(
                    "HTTP/1.1 {status} X\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(head.as_bytes()).await;
                let _ = stream.write_all(&body).await;
                let _ = stream.shutdown().await;
            }
        });

        (url, handle)
    }

    #[test]
    fn icon_url_format() {
        let client = IconClient::new();
        assert_eq!(
            client.icon_url("440", "e3f595a92552da3d664ad00277fad2107345f743"),
            "https://media.steampowered.com/steamcommunity/public/images/apps/440/e3f595a92552da3d664ad00277fad2107345f743.jpg"
        );
    }

    #[test]
    fn data_uri_encoding() {
        let image = KeyImage {
            mime: "image/jpeg".into(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        };
        assert_eq!(image.data_uri(), "data:image/jpeg;base64,/9j/");
    }

    #[tokio::test]
    async fn fetch_returns_image_with_content_type() {
        let (url, handle) = mock_image_server(200, "image/png", b"png-bytes").await;

        let client = IconClient::new().with_base_url(url);
        let image = client.fetch("440", "hash").await.unwrap();

        assert_eq!(image.mime, "image/png");
        assert_eq!(image.bytes, b"png-bytes");
        assert!(image.data_uri().starts_with("data:image/png;base64,"));

        handle.abort();
    }

    #[tokio::test]
    async fn fetch_http_error_yields_none() {
        let (url, handle) = mock_image_server(404, "text/plain", b"gone").await;

        let client = IconClient::new().with_base_url(url);
        assert!(client.fetch("440", "hash").await.is_none());

        handle.abort();
    }

    #[tokio::test]
    async fn fetch_unreachable_host_yields_none() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = IconClient::new().with_base_url(format!("http://127.0.0.1:{port}"));
        assert!(client.fetch("440", "hash").await.is_none());
    }

    #[tokio::test]
    async fn fetch_empty_identifiers_yield_none() {
        let client = IconClient::new();
        assert!(client.fetch("", "hash").await.is_none());
        assert!(client.fetch("440", "").await.is_none());
    }
}
