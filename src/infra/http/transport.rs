//! Thin wrapper over `reqwest`: endpoint resolution, bearer injection,
//! body decoding, and failure logging. No retries and no idempotency keys;
//! every failure is scoped to the single call that produced it.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::error;
use url::Url;

use crate::application::gateway::{BearerToken, GatewayError};

pub struct Transport {
    http: Client,
    base: Url,
    bearer: BearerToken,
}

impl Transport {
    /// Build a transport against `base`. The token slot starts empty; the
    /// session store fills it after login.
    pub fn new(base: Url, timeout: Duration, bearer: BearerToken) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GatewayError::transport)?;
        Ok(Self { http, base, bearer })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base
            .join(path)
            .map_err(|err| GatewayError::Transport(format!("invalid endpoint `{path}`: {err}")))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.bearer.get() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn dispatch(
        &self,
        request: RequestBuilder,
        method: &'static str,
        path: &str,
    ) -> Result<Response, GatewayError> {
        let response = self.authorize(request).send().await.map_err(|err| {
            error!(method, path, error = %err, "transport failure");
            GatewayError::Transport(err.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(method, path, status = status.as_u16(), "server rejected request");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        response: Response,
        method: &'static str,
        path: &str,
    ) -> Result<T, GatewayError> {
        response.json::<T>().await.map_err(|err| {
            error!(method, path, error = %err, "response body did not match schema");
            GatewayError::Decode(err.to_string())
        })
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GatewayError> {
        let url = self.endpoint(path)?;
        let response = self.dispatch(self.http.get(url).query(query), "GET", path).await?;
        Self::decode(response, "GET", path).await
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<(), GatewayError> {
        let url = self.endpoint(path)?;
        self.dispatch(self.http.put(url).json(body), "PUT", path).await?;
        Ok(())
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<(), GatewayError> {
        let url = self.endpoint(path)?;
        self.dispatch(self.http.post(url).json(body), "POST", path).await?;
        Ok(())
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let url = self.endpoint(path)?;
        let response = self.dispatch(self.http.post(url).json(body), "POST", path).await?;
        Self::decode(response, "POST", path).await
    }

    pub async fn delete<B: Serialize>(&self, path: &str, body: &B) -> Result<(), GatewayError> {
        let url = self.endpoint(path)?;
        self.dispatch(self.http.delete(url).json(body), "DELETE", path).await?;
        Ok(())
    }
}
