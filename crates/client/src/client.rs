//! HTTP transport: bearer auth, JSON bodies and the `ApiError` mapping.

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use stockroom_core::{ApiError, ApiResult};
use stockroom_orders::PartialFailurePolicy;

use crate::config::ClientConfig;
use crate::session::SessionContext;

/// Client for the inventory REST API.
///
/// Cheap to clone; clones share the connection pool and the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    session: SessionContext,
    partial_failure: PartialFailurePolicy,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: SessionContext) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base: config.base_url()?,
            session,
            partial_failure: config.partial_failure,
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Policy configured for order submission.
    pub fn partial_failure(&self) -> PartialFailurePolicy {
        self.partial_failure
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(self.request(Method::GET, path)?).await?;
        decode(response).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::POST, path)?.json(body)).await?;
        decode(response).await
    }

    /// POST whose response body is not needed.
    pub(crate) async fn post_discard<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        self.send(self.request(Method::POST, path)?.json(body)).await?;
        Ok(())
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(Method::PUT, path)?.json(body)).await?;
        decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send(self.request(Method::DELETE, path)?).await?;
        Ok(())
    }

    /// Fails with `Unauthenticated` when no session is active.
    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let token = self.session.access_token().ok_or(ApiError::Unauthenticated)?;
        let url = self
            .base
            .join(path)
            .map_err(|e| ApiError::network(format!("invalid path {path:?}: {e}")))?;

        debug!(method = %method, url = %url, "api request");
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "api request rejected");
            return Err(ApiError::status(status.as_u16(), body));
        }
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::network(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::decode(e.to_string()))
}
