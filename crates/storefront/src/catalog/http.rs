//! Catalog served as a JSON array over HTTP(S).

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{CatalogError, CatalogSource};

/// Fetches the catalog from a document store REST export.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpCatalogSource {
    /// Create a source for `url`, sending `token` as a bearer token if given.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(url: Url, token: Option<&SecretString>) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| CatalogError::InvalidToken(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { client, url })
    }
}

impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Vec<serde_json::Value>, CatalogError> {
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        Ok(response.json::<Vec<serde_json::Value>>().await?)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    /// Serve one canned response on a local port. The handle yields the raw
    /// request head the client sent.
    async fn serve_once(status: &'static str, body: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            String::from_utf8(request).unwrap()
        });

        let url = Url::parse(&format!("http://{addr}/products")).unwrap();
        (url, handle)
    }

    #[tokio::test]
    async fn test_fetch_decodes_array_and_sends_token() {
        let (url, server) = serve_once(
            "200 OK",
            r#"[{"id":"harbor","price":120},{"id":"ring","price":80}]"#,
        )
        .await;
        let token = SecretString::from("gallery-token");
        let source = HttpCatalogSource::new(url, Some(&token)).unwrap();

        let records = source.fetch().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], "harbor");
        assert_eq!(records[1]["price"], 80);

        let request = server.await.unwrap().to_ascii_lowercase();
        assert!(request.starts_with("get /products "));
        assert!(request.contains("authorization: bearer gallery-token\r\n"));
    }

    #[tokio::test]
    async fn test_fetch_without_token_sends_no_authorization() {
        let (url, server) = serve_once("200 OK", "[]").await;
        let source = HttpCatalogSource::new(url, None).unwrap();

        assert!(source.fetch().await.unwrap().is_empty());
        let request = server.await.unwrap().to_ascii_lowercase();
        assert!(!request.contains("authorization:"));
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let (url, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let source = HttpCatalogSource::new(url, None).unwrap();

        assert!(matches!(
            source.fetch().await,
            Err(CatalogError::Status(500))
        ));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_array_body() {
        let (url, server) = serve_once("200 OK", r#"{"products":[]}"#).await;
        let source = HttpCatalogSource::new(url, None).unwrap();

        assert!(matches!(source.fetch().await, Err(CatalogError::Http(_))));
        server.await.unwrap();
    }

    #[test]
    fn test_rejects_token_with_newline() {
        let url = Url::parse("https://catalog.pelussi.com/products").unwrap();
        let token = SecretString::from("abc\ndef");
        assert!(matches!(
            HttpCatalogSource::new(url, Some(&token)),
            Err(CatalogError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_describe_is_url() {
        let url = Url::parse("https://catalog.pelussi.com/products").unwrap();
        let source = HttpCatalogSource::new(url, None).unwrap();
        assert_eq!(source.describe(), "https://catalog.pelussi.com/products");
    }
}
