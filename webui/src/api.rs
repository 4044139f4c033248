use async_trait::async_trait;

use storage_browser::api::{Endpoints, StorageApi};
use storage_browser::cache::{CacheKind, ClearCacheResponse};
use storage_browser::error::{FetchError, FetchResult};
use storage_browser::types::{Item, ListResponse};

fn map_net(e: reqwasm::Error) -> FetchError {
    FetchError::Transport(e.to_string())
}

/// Browser fetch transport for the widget core.
#[derive(Debug, Clone, Default)]
pub struct ReqwasmApi {
    endpoints: Endpoints,
}

impl ReqwasmApi {
    pub fn new(base: &str) -> Self {
        Self { endpoints: Endpoints::new(base) }
    }

    async fn get_text(&self, url: &str) -> FetchResult<String> {
        let resp = reqwasm::http::Request::get(url).send().await.map_err(map_net)?;
        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }
        resp.text().await.map_err(map_net)
    }
}

#[async_trait(?Send)]
impl StorageApi for ReqwasmApi {
    async fn list(&self, backend: &str, path: &str) -> FetchResult<Vec<Item>> {
        let text = self.get_text(&self.endpoints.list_url(backend, path)).await?;
        let body: ListResponse = serde_json::from_str(&text)?;
        Ok(body.items)
    }

    async fn read_text(&self, backend: &str, dir: &str, name: &str) -> FetchResult<String> {
        self.get_text(&self.endpoints.download_url(backend, dir, name)).await
    }

    async fn clear_cache(&self, kind: CacheKind) -> FetchResult<ClearCacheResponse> {
        let resp = reqwasm::http::Request::post(&self.endpoints.cache_clear_url(kind))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(map_net)?;
        let ok = resp.ok();
        let status = resp.status();
        let text = resp.text().await.map_err(map_net)?;
        match serde_json::from_str::<ClearCacheResponse>(&text) {
            Ok(body) => Ok(body),
            Err(_) if !ok => Err(FetchError::Status { status, body: text }),
            Err(e) => Err(e.into()),
        }
    }
}
