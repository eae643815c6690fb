//! The request surface the listing services are written against.

use crate::core::domain::error::ProxmoxResult;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Authenticated access to the PVE API, returning the `data` payload of each
/// response.
///
/// [`ApiClient`](super::api_client::ApiClient) is the production
/// implementation; the listings only need this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PveApi: Send + Sync {
    /// `GET {base}{path}?{query}`.
    async fn get_data(&self, path: &str, query: &[(String, String)]) -> ProxmoxResult<Value>;

    /// `POST {base}{path}` with a form-encoded body.
    async fn post_data(&self, path: &str, body: &[(String, String)]) -> ProxmoxResult<Value>;
}

/// Issues a GET without query parameters and decodes the payload.
pub(crate) async fn get_as<T, A>(api: &A, path: &str) -> ProxmoxResult<T>
where
    T: DeserializeOwned,
    A: PveApi + ?Sized,
{
    let data = api.get_data(path, &[]).await?;
    Ok(serde_json::from_value(data)?)
}
