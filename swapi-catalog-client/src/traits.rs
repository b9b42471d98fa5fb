use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ApiResponse, Person, Planet};

/// Catalogue resource client Trait
///
/// The seam between view-state and the network: view-states receive an
/// `Arc<dyn ResourceClient>` so tests can substitute a scripted client.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// 获取全部角色
    ///
    /// The upstream API has no server-side paging; the envelope always holds
    /// the full collection with `next`/`previous` set to `None`.
    async fn get_people(&self) -> Result<ApiResponse<Person>>;

    /// 获取全部星球
    async fn get_planets(&self) -> Result<ApiResponse<Planet>>;

    /// 获取角色详情
    async fn get_person_by_id(&self, id: &str) -> Result<Person>;

    /// 获取星球详情
    async fn get_planet_by_id(&self, id: &str) -> Result<Planet>;
}
