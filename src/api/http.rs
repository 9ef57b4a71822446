//! HTTP implementation of the backend client

use super::{ApiClient, ApiError, ApiResult};
use crate::graph::navigation::encode_path;
use crate::models::{
    AppStatus, Claim, ClaimExtended, CompositeResource, CompositeResourceExtended, Composition,
    ItemList, K8sEvent, ManagedResource, ManagedResourceExtended, Provider, ProviderConfig, Xrd,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const FULL: &str = "full=1";

/// Backend client over `reqwest`
///
/// Requests are plain GETs with no retries; any non-2xx answer becomes
/// [`ApiError::Status`].
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: reqwest::Client,
    base: Url,
}

impl HttpApiClient {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let mut base = Url::parse(base_url).map_err(|source| ApiError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        // Keep any path prefix when joining relative endpoint paths
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Transport {
                url: base.to_string(),
                source,
            })?;

        tracing::debug!("Created backend client for: {}", base);

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, segments: &[&str], query: Option<&str>) -> ApiResult<Url> {
        let path = encode_path(segments);
        let relative = match query {
            Some(q) => format!("{}?{}", path.trim_start_matches('/'), q),
            None => path.trim_start_matches('/').to_string(),
        };
        self.base
            .join(&relative)
            .map_err(|source| ApiError::InvalidUrl {
                url: relative,
                source,
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        tracing::debug!("GET {}", url);

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!("GET {} returned {}", url, status);
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.bytes().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.url(segments, None)?;
        self.get_json(url).await
    }

    async fn get_full<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let url = self.url(segments, Some(FULL))?;
        self.get_json(url).await
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get_status(&self) -> ApiResult<AppStatus> {
        self.get(&["status"]).await
    }

    async fn list_providers(&self) -> ApiResult<ItemList<Provider>> {
        self.get(&["api", "providers"]).await
    }

    async fn get_provider(&self, name: &str) -> ApiResult<Provider> {
        self.get(&["api", "providers", name]).await
    }

    async fn get_provider_configs(&self, name: &str) -> ApiResult<ItemList<ProviderConfig>> {
        self.get(&["api", "providers", name, "configs"]).await
    }

    async fn get_events(&self, name: &str) -> ApiResult<ItemList<K8sEvent>> {
        self.get(&["api", "events", name]).await
    }

    async fn get_namespaced_events(
        &self,
        namespace: &str,
        name: &str,
    ) -> ApiResult<ItemList<K8sEvent>> {
        self.get(&["api", "events", namespace, name]).await
    }

    async fn list_claims(&self) -> ApiResult<ItemList<Claim>> {
        self.get(&["api", "claims"]).await
    }

    async fn get_claim(
        &self,
        group: &str,
        version: &str,
        kind: &str,
        namespace: &str,
        name: &str,
    ) -> ApiResult<ClaimExtended> {
        self.get_full(&["api", "claims", group, version, kind, namespace, name])
            .await
    }

    async fn list_managed(&self) -> ApiResult<ItemList<ManagedResource>> {
        self.get(&["api", "managed"]).await
    }

    async fn get_managed(
        &self,
        group: &str,
        version: &str,
        kind: &str,
        name: &str,
    ) -> ApiResult<ManagedResourceExtended> {
        self.get_full(&["api", "managed", group, version, kind, name])
            .await
    }

    async fn get_namespaced_managed(
        &self,
        group: &str,
        version: &str,
        kind: &str,
        namespace: &str,
        name: &str,
    ) -> ApiResult<ManagedResourceExtended> {
        self.get_full(&["api", "managed", group, version, kind, name, namespace])
            .await
    }

    async fn list_composite(&self) -> ApiResult<ItemList<CompositeResource>> {
        self.get(&["api", "composite"]).await
    }

    async fn get_composite(
        &self,
        group: &str,
        version: &str,
        kind: &str,
        name: &str,
    ) -> ApiResult<CompositeResourceExtended> {
        self.get_full(&["api", "composite", group, version, kind, name])
            .await
    }

    async fn list_compositions(&self) -> ApiResult<ItemList<Composition>> {
        self.get(&["api", "compositions"]).await
    }

    async fn list_xrds(&self) -> ApiResult<ItemList<Xrd>> {
        self.get(&["api", "xrds"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and report the request line
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let n = socket.read(&mut buf).await.unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            request.lines().next().unwrap_or_default().to_string()
        });
        (format!("http://{}", addr), handle)
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpApiClient::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
    }

    #[test]
    fn test_url_keeps_prefix_and_encodes() {
        let client =
            HttpApiClient::new("http://localhost:8090/komoplane", Duration::from_secs(1)).unwrap();
        let segments = [
            "api",
            "claims",
            "example.com",
            "v1",
            "Database",
            "default",
            "my db",
        ];
        let url = client.url(&segments, Some(FULL)).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8090/komoplane/api/claims/example.com/v1/Database/default/my%20db?full=1"
        );
    }

    #[tokio::test]
    async fn test_get_status() {
        let (base, handle) = serve_once(
            "200 OK",
            r#"{"CurVer":"0.1.5","LatestVer":"0.1.6","Analytics":false,"CrossplaneInstalled":true,"ClusterMode":true}"#,
        )
        .await;
        let client = HttpApiClient::new(&base, Duration::from_secs(5)).unwrap();

        let status = client.get_status().await.unwrap();
        assert_eq!(status.cur_ver, "0.1.5");
        assert!(status.upgrade_available());
        assert_eq!(handle.await.unwrap(), "GET /status HTTP/1.1");
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let (base, handle) = serve_once("500 Internal Server Error", "{}").await;
        let client = HttpApiClient::new(&base, Duration::from_secs(5)).unwrap();

        let err = client.list_xrds().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(handle.await.unwrap(), "GET /api/xrds HTTP/1.1");
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (base, _handle) = serve_once("200 OK", "not json").await;
        let client = HttpApiClient::new(&base, Duration::from_secs(5)).unwrap();

        let err = client.list_claims().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_namespaced_managed_path() {
        let (base, handle) =
            serve_once("200 OK", r#"{"kind":"VPC","metadata":{"name":"vpc-1"}}"#).await;
        let client = HttpApiClient::new(&base, Duration::from_secs(5)).unwrap();

        let mr = client
            .get_namespaced_managed("ec2.aws.upbound.io", "v1beta1", "VPC", "team-a", "vpc-1")
            .await
            .unwrap();
        assert_eq!(mr.managed.name(), Some("vpc-1"));
        assert_eq!(
            handle.await.unwrap(),
            "GET /api/managed/ec2.aws.upbound.io/v1beta1/VPC/vpc-1/team-a?full=1 HTTP/1.1"
        );
    }
}
