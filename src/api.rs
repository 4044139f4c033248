//! Storage API transport.
//!
//! [`StorageApi`] is the seam between the widget and the network. The native
//! build ships [`HttpStorageApi`] (reqwest); the web UI implements the trait
//! on top of the browser's fetch. Futures are not required to be `Send`: the
//! widget runs on a single UI thread.

use async_trait::async_trait;

use crate::cache::{CacheKind, ClearCacheResponse};
use crate::error::FetchResult;
use crate::types::Item;

#[async_trait(?Send)]
pub trait StorageApi {
    /// `GET /api/storage/{backend}/list?path={path}`
    async fn list(&self, backend: &str, path: &str) -> FetchResult<Vec<Item>>;

    /// `GET /api/storage/download?storage={backend}&path={dir}/{name}`, body as text.
    async fn read_text(&self, backend: &str, dir: &str, name: &str) -> FetchResult<String>;

    /// `POST /api/cache/clear/{kind}`
    async fn clear_cache(&self, kind: CacheKind) -> FetchResult<ClearCacheResponse>;
}

/// URL construction for the storage endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        Self { base: base.to_string() }
    }

    pub fn list_url(&self, backend: &str, path: &str) -> String {
        format!(
            "{}/api/storage/{}/list?path={}",
            self.base,
            urlencoding::encode(backend),
            urlencoding::encode(path)
        )
    }

    /// The file path is sent as `{dir}/{name}`; the server strips the leading
    /// slash that appears at the backend root.
    pub fn download_url(&self, backend: &str, dir: &str, name: &str) -> String {
        let file_path = format!("{}/{}", dir, name);
        format!(
            "{}/api/storage/download?storage={}&path={}",
            self.base,
            urlencoding::encode(backend),
            urlencoding::encode(&file_path)
        )
    }

    pub fn cache_clear_url(&self, kind: CacheKind) -> String {
        format!("{}/api/cache/clear/{}", self.base, kind)
    }
}

#[cfg(feature = "http")]
pub use http::HttpStorageApi;

#[cfg(feature = "http")]
mod http {
    use super::*;
    use crate::error::{validation, FetchError};
    use crate::types::ListResponse;

    /// Native transport over reqwest.
    #[derive(Debug, Clone)]
    pub struct HttpStorageApi {
        client: reqwest::Client,
        endpoints: Endpoints,
    }

    impl HttpStorageApi {
        /// `base_url` must be absolute (`http://host:port`) outside the browser.
        pub fn new(base_url: &str) -> Self {
            Self::with_client(reqwest::Client::new(), base_url)
        }

        pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
            if base_url.is_empty() {
                tracing::warn!("HttpStorageApi created without a base URL; relative URLs cannot be resolved natively");
            }
            Self { client, endpoints: Endpoints::new(base_url) }
        }

        async fn get_text(&self, url: &str) -> FetchResult<String> {
            let resp = self.client.get(url).send().await?;
            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                return Err(FetchError::Status { status: status.as_u16(), body });
            }
            Ok(resp.text().await?)
        }
    }

    #[async_trait(?Send)]
    impl StorageApi for HttpStorageApi {
        async fn list(&self, backend: &str, path: &str) -> FetchResult<Vec<Item>> {
            validation::validate_backend(backend)?;
            validation::validate_path(path)?;
            let text = self.get_text(&self.endpoints.list_url(backend, path)).await?;
            let body: ListResponse = serde_json::from_str(&text)?;
            Ok(body.items)
        }

        async fn read_text(&self, backend: &str, dir: &str, name: &str) -> FetchResult<String> {
            validation::validate_backend(backend)?;
            self.get_text(&self.endpoints.download_url(backend, dir, name)).await
        }

        async fn clear_cache(&self, kind: CacheKind) -> FetchResult<ClearCacheResponse> {
            let resp = self
                .client
                .post(self.endpoints.cache_clear_url(kind))
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .send()
                .await?;
            let status = resp.status();
            let text = resp.text().await?;
            // Error statuses still carry a {status, message} body.
            match serde_json::from_str::<ClearCacheResponse>(&text) {
                Ok(body) => Ok(body),
                Err(_) if !status.is_success() => Err(FetchError::Status { status: status.as_u16(), body: text }),
                Err(e) => Err(e.into()),
            }
        }
    }
}
