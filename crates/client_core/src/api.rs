use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{
    error::{ApiErrorBody, ApiRejection},
    protocol::{CreateLinkRequest, CreateLinkResponse, LinkRecord},
};
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Error)]
pub enum LinkApiError {
    /// No status was obtained: connection refused, DNS failure, reset.
    #[error("link api transport failure: {0}")]
    Transport(String),
    /// A status was obtained but the body could not be decoded, including
    /// failure statuses whose body is not a structured error.
    #[error("malformed link api response: {0}")]
    Decode(String),
    #[error(transparent)]
    Rejected(#[from] ApiRejection),
}

impl LinkApiError {
    pub fn rejection(&self) -> Option<&ApiRejection> {
        match self {
            Self::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

/// The remote link-management service.
#[async_trait]
pub trait LinkApi: Send + Sync {
    /// `GET /api/links`
    async fn list_links(&self) -> Result<Vec<LinkRecord>, LinkApiError>;
    /// `POST /api/links`
    async fn create_link(
        &self,
        request: &CreateLinkRequest,
    ) -> Result<CreateLinkResponse, LinkApiError>;
    /// `DELETE /api/links/{code}`; only `204 No Content` counts as success.
    async fn delete_link(&self, code: &str) -> Result<(), LinkApiError>;
}

pub struct HttpLinkApi {
    http: Client,
    base_url: Url,
}

impl HttpLinkApi {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn endpoint(&self, code: Option<&str>) -> Result<Url, LinkApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                LinkApiError::Transport(format!(
                    "api base url '{}' cannot carry a path",
                    self.base_url
                ))
            })?;
            segments.pop_if_empty().extend(["api", "links"]);
            if let Some(code) = code {
                segments.push(code);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl LinkApi for HttpLinkApi {
    async fn list_links(&self) -> Result<Vec<LinkRecord>, LinkApiError> {
        let res = self
            .http
            .get(self.endpoint(None)?)
            .send()
            .await
            .map_err(transport)?;
        let status = res.status();
        if !status.is_success() {
            return Err(rejection(status, res).await);
        }
        res.json::<Vec<LinkRecord>>().await.map_err(decode)
    }

    async fn create_link(
        &self,
        request: &CreateLinkRequest,
    ) -> Result<CreateLinkResponse, LinkApiError> {
        let res = self
            .http
            .post(self.endpoint(None)?)
            .json(request)
            .send()
            .await
            .map_err(transport)?;
        let status = res.status();
        if !status.is_success() {
            return Err(rejection(status, res).await);
        }
        res.json::<CreateLinkResponse>().await.map_err(decode)
    }

    async fn delete_link(&self, code: &str) -> Result<(), LinkApiError> {
        let res = self
            .http
            .delete(self.endpoint(Some(code))?)
            .send()
            .await
            .map_err(transport)?;
        let status = res.status();
        if status != StatusCode::NO_CONTENT {
            return Err(rejection(status, res).await);
        }
        Ok(())
    }
}

fn transport(err: reqwest::Error) -> LinkApiError {
    LinkApiError::Transport(err.to_string())
}

fn decode(err: reqwest::Error) -> LinkApiError {
    LinkApiError::Decode(err.to_string())
}

// Only the API's structured error body makes a rejection. Any other failure
// body, such as a proxy's HTML page, is an undecodable response.
async fn rejection(status: StatusCode, res: reqwest::Response) -> LinkApiError {
    match res.json::<ApiErrorBody>().await {
        Ok(body) => ApiRejection::new(status.as_u16(), body).into(),
        Err(err) => LinkApiError::Decode(format!("status {}: {err}", status.as_u16())),
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
