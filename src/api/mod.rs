//! Client for the komoplane backend REST API
//!
//! `ApiClient` is the seam between the backend and everything that renders
//! its data. `HttpApiClient` is the real implementation; tests substitute
//! the generated `MockApiClient`.

mod error;
mod http;

pub use error::ApiError;
pub use http::HttpApiClient;

use crate::graph::{FocalResource, Route};
use crate::models::{
    AppStatus, Claim, ClaimExtended, CompositeResource, CompositeResourceExtended, Composition,
    ItemList, K8sEvent, ManagedResource, ManagedResourceExtended, Provider, ProviderConfig, Xrd,
};
use async_trait::async_trait;

pub type ApiResult<T> = Result<T, ApiError>;

/// Read-only view of the backend endpoints
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// `/status`
    async fn get_status(&self) -> ApiResult<AppStatus>;

    async fn list_providers(&self) -> ApiResult<ItemList<Provider>>;
    async fn get_provider(&self, name: &str) -> ApiResult<Provider>;
    async fn get_provider_configs(&self, name: &str) -> ApiResult<ItemList<ProviderConfig>>;

    /// Events of a cluster-scoped object
    async fn get_events(&self, name: &str) -> ApiResult<ItemList<K8sEvent>>;
    /// Events of a namespaced object
    async fn get_namespaced_events(
        &self,
        namespace: &str,
        name: &str,
    ) -> ApiResult<ItemList<K8sEvent>>;

    async fn list_claims(&self) -> ApiResult<ItemList<Claim>>;
    async fn get_claim(
        &self,
        group: &str,
        version: &str,
        kind: &str,
        namespace: &str,
        name: &str,
    ) -> ApiResult<ClaimExtended>;

    async fn list_managed(&self) -> ApiResult<ItemList<ManagedResource>>;
    async fn get_managed(
        &self,
        group: &str,
        version: &str,
        kind: &str,
        name: &str,
    ) -> ApiResult<ManagedResourceExtended>;
    async fn get_namespaced_managed(
        &self,
        group: &str,
        version: &str,
        kind: &str,
        namespace: &str,
        name: &str,
    ) -> ApiResult<ManagedResourceExtended>;

    async fn list_composite(&self) -> ApiResult<ItemList<CompositeResource>>;
    async fn get_composite(
        &self,
        group: &str,
        version: &str,
        kind: &str,
        name: &str,
    ) -> ApiResult<CompositeResourceExtended>;

    async fn list_compositions(&self) -> ApiResult<ItemList<Composition>>;
    async fn list_xrds(&self) -> ApiResult<ItemList<Xrd>>;
}

/// Fetch the extended payload behind a detail route
pub async fn fetch_focal(client: &dyn ApiClient, route: &Route) -> ApiResult<FocalResource> {
    tracing::debug!("Fetching {}", route);
    match route {
        Route::Claim {
            group,
            version,
            kind,
            namespace,
            name,
        } => client
            .get_claim(group, version, kind, namespace, name)
            .await
            .map(|c| FocalResource::Claim(Box::new(c))),
        Route::Composite {
            group,
            version,
            kind,
            name,
        } => client
            .get_composite(group, version, kind, name)
            .await
            .map(|x| FocalResource::Composite(Box::new(x))),
        Route::Managed {
            group,
            version,
            kind,
            namespace: Some(namespace),
            name,
        } => client
            .get_namespaced_managed(group, version, kind, namespace, name)
            .await
            .map(|m| FocalResource::Managed(Box::new(m))),
        Route::Managed {
            group,
            version,
            kind,
            namespace: None,
            name,
        } => client
            .get_managed(group, version, kind, name)
            .await
            .map(|m| FocalResource::Managed(Box::new(m))),
        Route::Composition { .. } => Err(ApiError::NoDetailEndpoint(route.to_path())),
    }
}
