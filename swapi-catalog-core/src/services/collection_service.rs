//! 列表视图状态服务
//!
//! Holds one full collection in memory and derives the visible page from it
//! by filtering, sorting and slicing. The upstream API serves every
//! collection whole, so paging within a loaded collection never goes back
//! to the network.

use std::sync::Arc;

use swapi_catalog_client::{CatalogItem, ResourceClient, ResourceKind};
use tokio::sync::RwLock;

use super::{CatalogResource, failure_message, log_failure};
use crate::config::CatalogConfig;
use crate::error::{CoreError, CoreResult};
use crate::types::{
    CollectionSnapshot, CollectionStatus, LoadingState, PaginationState, SearchState, SortField,
    SortOrder,
};
use crate::utils::debounce::Debouncer;
use crate::utils::query::{calculate_total_pages, filter_by_name, paginate, sort_by};

/// Mutable state behind the service lock.
struct CollectionState<T> {
    items: Vec<T>,
    loading: LoadingState,
    search: SearchState,
    pagination: PaginationState,
    /// Token of the most recently started fetch; older completions are discarded.
    latest_request: u64,
    /// Whether any fetch has succeeded yet.
    fetched: bool,
}

impl<T: CatalogItem + Clone> CollectionState<T> {
    fn new(items_per_page: u32) -> Self {
        Self {
            items: Vec::new(),
            loading: LoadingState::default(),
            search: SearchState::default(),
            pagination: PaginationState::new(items_per_page),
            latest_request: 0,
            fetched: false,
        }
    }

    fn filtered_sorted(&self) -> Vec<&T> {
        sort_by(
            filter_by_name(&self.items, &self.search.query),
            self.search.sort_by,
            self.search.sort_order,
        )
    }

    /// Recompute totals from the filtered collection. Leaves `current_page` alone.
    fn recompute_pagination(&mut self) {
        let total_items = filter_by_name(&self.items, &self.search.query).len();
        self.pagination.total_items = total_items;
        self.pagination.total_pages =
            calculate_total_pages(total_items, self.pagination.items_per_page);
    }

    fn visible(&self) -> Vec<T> {
        let sorted = self.filtered_sorted();
        paginate(
            &sorted,
            self.pagination.current_page,
            self.pagination.items_per_page,
        )
        .iter()
        .map(|item| (*item).clone())
        .collect()
    }

    fn status(&self) -> CollectionStatus {
        if self.loading.is_loading {
            CollectionStatus::Loading
        } else if self.loading.error.is_some() {
            CollectionStatus::Failed
        } else if self.fetched {
            CollectionStatus::Ready
        } else {
            CollectionStatus::Empty
        }
    }
}

/// 列表视图状态
///
/// One instance per screen; nothing is shared between instances.
pub struct CollectionService<T: CatalogResource> {
    client: Arc<dyn ResourceClient>,
    state: Arc<RwLock<CollectionState<T>>>,
    search_debouncer: Debouncer,
}

impl<T: CatalogResource> CollectionService<T> {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self::with_config(client, &CatalogConfig::default())
    }

    pub fn with_config(client: Arc<dyn ResourceClient>, config: &CatalogConfig) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(CollectionState::new(config.page_size()))),
            search_debouncer: Debouncer::new(config.search_debounce()),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        T::KIND
    }

    // ===== 数据加载 =====

    /// Load the collection and show `page`.
    ///
    /// Once items are loaded, a request for any page other than 1 only moves
    /// the page cursor (ignored when out of range) without refetching.
    /// Page 1 always refetches.
    pub async fn fetch_all(&self, page: u32) {
        self.fetch(page, false).await;
    }

    /// Refetch the collection and show `page`, even if items are loaded.
    pub async fn refresh(&self, page: u32) {
        self.fetch(page, true).await;
    }

    async fn fetch(&self, page: u32, force: bool) {
        let token = {
            let mut state = self.state.write().await;

            if !force && !state.items.is_empty() && page != 1 {
                if state.pagination.contains(page) {
                    state.pagination.current_page = page;
                } else {
                    log::debug!(
                        "[{}] page {page} out of range (1..={}), ignored",
                        T::KIND,
                        state.pagination.total_pages
                    );
                }
                return;
            }

            state.latest_request += 1;
            state.loading = LoadingState {
                is_loading: true,
                error: None,
            };
            state.latest_request
        };

        log::debug!("[{}] fetching collection (request #{token})", T::KIND);
        let result = T::fetch_collection(self.client.as_ref()).await;

        let mut state = self.state.write().await;
        if state.latest_request != token {
            log::debug!(
                "[{}] discarding stale response #{token} (latest #{})",
                T::KIND,
                state.latest_request
            );
            return;
        }

        match result {
            Ok(response) => {
                log::info!("[{}] loaded {} items", T::KIND, response.results.len());
                state.items = response.results;
                state.fetched = true;
                state.recompute_pagination();
                state.pagination.current_page = page.clamp(1, state.pagination.total_pages);
            }
            Err(err) => {
                log_failure(&format!("Failed to fetch {}", T::KIND), &err);
                state.loading.error = Some(failure_message(&err, || {
                    format!("Failed to fetch {}", T::KIND)
                }));
            }
        }
        state.loading.is_loading = false;
    }

    // ===== 搜索与排序 =====

    /// Filter by name after the debounce delay; the last of a burst of calls wins.
    ///
    /// Applying a query resets the view to page 1.
    pub fn search(&self, query: impl Into<String>) {
        let query = query.into();
        let state = Arc::clone(&self.state);

        self.search_debouncer.call(async move {
            let mut state = state.write().await;
            log::debug!("[{}] applying search {query:?}", T::KIND);
            state.search.query = query;
            state.pagination.current_page = 1;
            state.recompute_pagination();
        });
    }

    /// Wait until a pending search has been applied.
    pub async fn wait_for_search(&self) {
        self.search_debouncer.settle().await;
    }

    /// Drop a pending search. Returns whether one was pending.
    pub fn cancel_pending_search(&self) -> bool {
        self.search_debouncer.cancel()
    }

    pub async fn sort(&self, field: SortField, order: SortOrder) {
        let mut state = self.state.write().await;
        state.search.sort_by = field;
        state.search.sort_order = order;
        state.recompute_pagination();
    }

    // ===== 分页 =====

    /// Move to `page` without refetching.
    pub async fn go_to_page(&self, page: u32) -> CoreResult<u32> {
        let mut state = self.state.write().await;
        if !state.pagination.contains(page) {
            return Err(CoreError::InvalidPage {
                page,
                total_pages: state.pagination.total_pages,
            });
        }
        state.pagination.current_page = page;
        Ok(page)
    }

    /// Advance one page, if there is a next one.
    pub async fn load_more(&self) {
        let next = {
            let state = self.state.read().await;
            state
                .pagination
                .has_next()
                .then(|| state.pagination.current_page + 1)
        };
        if let Some(page) = next {
            self.fetch_all(page).await;
        }
    }

    // ===== 读取 =====

    /// Current page of the filtered, sorted collection.
    pub async fn visible(&self) -> Vec<T> {
        self.state.read().await.visible()
    }

    /// The whole collection as fetched, unfiltered.
    pub async fn all_items(&self) -> Vec<T> {
        self.state.read().await.items.clone()
    }

    pub async fn loading(&self) -> LoadingState {
        self.state.read().await.loading.clone()
    }

    pub async fn pagination(&self) -> PaginationState {
        self.state.read().await.pagination
    }

    pub async fn search_state(&self) -> SearchState {
        self.state.read().await.search.clone()
    }

    pub async fn status(&self) -> CollectionStatus {
        self.state.read().await.status()
    }

    /// `"Showing 1 to 10 of 82 characters"`.
    pub async fn display_range(&self) -> String {
        self.state
            .read()
            .await
            .pagination
            .display_range(T::KIND.label())
    }

    pub async fn snapshot(&self) -> CollectionSnapshot<T> {
        let state = self.state.read().await;
        CollectionSnapshot {
            visible: state.visible(),
            loading: state.loading.clone(),
            search: state.search.clone(),
            pagination: state.pagination,
            status: state.status(),
        }
    }
}
