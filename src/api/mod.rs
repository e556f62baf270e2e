//! Typed client for the EMS backend REST API.
//!
//! One attempt per call: transport errors and non-2xx statuses both
//! collapse into `Error::RemoteUnavailable`. No retries, no request
//! deduplication; the backend owns idempotency where it matters.

pub mod attendance;
pub mod auth;
pub mod leave;
pub mod reports;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_bearer(
        &self,
        req: reqwest::RequestBuilder,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        match token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> Result<T> {
        let req = self.with_bearer(self.http.get(self.url(path)), token);
        let resp = req.send().await?.error_for_status()?;
        Ok(resp.json().await?)
    }

    fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        self.with_bearer(self.http.get(self.url(path)).query(query), token)
    }

    /// GET with serialized (and percent-encoded) query parameters.
    pub async fn get_json_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        token: Option<&str>,
    ) -> Result<T> {
        let resp = self
            .get_with_query(path, query, token)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T> {
        let req = self.with_bearer(self.http.post(self.url(path)).json(body), token);
        let resp = req.send().await?.error_for_status()?;
        Ok(resp.json().await?)
    }

    /// POST where the caller only cares whether the request landed.
    pub async fn post_unit<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<()> {
        let req = self.with_bearer(self.http.post(self.url(path)).json(body), token);
        req.send().await?.error_for_status()?;
        Ok(())
    }

    pub async fn put_unit<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<()> {
        let req = self.with_bearer(self.http.put(self.url(path)).json(body), token);
        req.send().await?.error_for_status()?;
        Ok(())
    }

    pub async fn delete_unit(&self, path: &str, token: Option<&str>) -> Result<()> {
        let req = self.with_bearer(self.http.delete(self.url(path)), token);
        req.send().await?.error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized() {
        let api = ApiClient::new("http://localhost:5000/api/");
        assert_eq!(api.url("/leave"), "http://localhost:5000/api/leave");
    }
}
