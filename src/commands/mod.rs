//! REST API Bindings
//!
//! Frontend bindings to the game-list API, organized by domain.

mod collection;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use collection_engine::{ApiError, ApiResult};

use crate::session::Session;

pub use collection::*;

/// HTTP client bound to the API base URL and the current session
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.get(self.url(path)))
    }

    fn patch(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.patch(self.url(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.http.post(self.url(path)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Send and decode a JSON body
async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
    let response = send(request).await?;
    response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

/// Send and only check the status
async fn send_empty(request: RequestBuilder) -> ApiResult<()> {
    send(request).await.map(|_| ())
}

async fn send(request: RequestBuilder) -> ApiResult<Response> {
    let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), %message, "API request rejected");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("http://h/api/", "/collections/1"), "http://h/api/collections/1");
        assert_eq!(join_url("http://h/api", "collections"), "http://h/api/collections");
    }
}
