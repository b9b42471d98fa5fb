//! 详情视图状态服务

use std::sync::Arc;

use swapi_catalog_client::ResourceClient;
use tokio::sync::RwLock;

use super::{CatalogResource, failure_message, log_failure};
use crate::types::DetailSnapshot;

/// 详情视图状态
///
/// Holds at most one item. A new fetch clears the previous item first.
pub struct DetailService<T: CatalogResource> {
    client: Arc<dyn ResourceClient>,
    state: RwLock<DetailSnapshot<T>>,
}

impl<T: CatalogResource> DetailService<T> {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self {
            client,
            state: RwLock::new(DetailSnapshot::default()),
        }
    }

    /// Load the item with `id`, replacing whatever was shown.
    pub async fn fetch(&self, id: &str) {
        {
            let mut state = self.state.write().await;
            state.item = None;
            state.error = None;
            state.is_loading = true;
        }

        log::debug!("[{}] fetching {} {id}", T::KIND, T::KIND.singular());
        let result = T::fetch_by_id(self.client.as_ref(), id).await;

        let mut state = self.state.write().await;
        match result {
            Ok(item) => state.item = Some(item),
            Err(err) => {
                let fallback = || format!("Failed to fetch {} details", T::KIND.singular());
                log_failure(&fallback(), &err);
                state.error = Some(failure_message(&err, fallback));
            }
        }
        state.is_loading = false;
    }

    pub async fn item(&self) -> Option<T> {
        self.state.read().await.item.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn snapshot(&self) -> DetailSnapshot<T> {
        self.state.read().await.clone()
    }
}
