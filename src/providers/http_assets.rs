//! HTTP fetcher for the transfer service's static assets.

use crate::core::asset::{AssetFetcher, FetchedAsset};
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use tracing::debug;

pub struct HttpAssetFetcher {
    base_url: String,
}

impl HttpAssetFetcher {
    pub fn new(base_url: &str) -> Self {
        HttpAssetFetcher {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Only same-origin, relative asset paths are fetchable.
    fn asset_url(&self, path: &str) -> Result<String> {
        if path.contains("://") || path.starts_with("//") {
            bail!("Cross-origin asset is not cacheable: {path}");
        }
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            bail!("Empty asset path");
        }
        Ok(format!("{}/{}", self.base_url, path))
    }
}

#[async_trait]
impl AssetFetcher for HttpAssetFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchedAsset> {
        let url = self.asset_url(path)?;
        debug!("Requesting asset from {}", url);

        let client = reqwest::Client::builder().user_agent("remitq/1.0").build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for asset: {} URL: {}", e, path, url))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        debug!("Fetched {} ({} bytes, status {})", path, body.len(), status);
        Ok(FetchedAsset {
            status,
            body,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_url_joins_relative_paths() {
        let fetcher = HttpAssetFetcher::new("https://transfer.citadel.in/");
        assert_eq!(
            fetcher.asset_url("index.html").unwrap(),
            "https://transfer.citadel.in/index.html"
        );
        assert_eq!(
            fetcher.asset_url("/static/css/styles.css").unwrap(),
            "https://transfer.citadel.in/static/css/styles.css"
        );
    }

    #[test]
    fn test_asset_url_rejects_cross_origin() {
        let fetcher = HttpAssetFetcher::new("https://transfer.citadel.in");
        assert!(fetcher.asset_url("https://evil.example/x").is_err());
        assert!(fetcher.asset_url("//evil.example/x").is_err());
        assert!(fetcher.asset_url("").is_err());
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_content_type() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/manifest.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"name":"Citadel Money Transfer"}"#)
                    .insert_header("content-type", "application/json"),
            )
            .mount(&server)
            .await;

        let fetcher = HttpAssetFetcher::new(&server.uri());
        let asset = fetcher.fetch("manifest.json").await.unwrap();

        assert_eq!(asset.status, 200);
        assert_eq!(asset.content_type.as_deref(), Some("application/json"));
        assert_eq!(asset.body, br#"{"name":"Citadel Money Transfer"}"#);
    }

    #[tokio::test]
    async fn test_fetch_passes_through_missing_assets() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpAssetFetcher::new(&server.uri());
        let asset = fetcher.fetch("missing.png").await.unwrap();
        assert_eq!(asset.status, 404);
    }
}
