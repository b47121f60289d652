use reqwest::{
    header::{HeaderMap, HeaderValue, USER_AGENT},
    Client, ClientBuilder, Response,
};
use serde::de::DeserializeOwned;
use url::Url;

pub mod errors;

pub use errors::DownstreamError;

/// A client for a single downstream service
///
/// Non-success responses are turned into [DownstreamError::ClientError] or [DownstreamError::ServerError] with the
/// response body captured, so the caller can log it without ever returning it.
#[derive(Clone)]
pub struct DownstreamClient {
    client: Client,
    base_url: Url,
}

impl DownstreamClient {
    pub fn new(base_url: &str) -> Result<Self, DownstreamError> {
        let mut default_headers = HeaderMap::new();

        let user_agent_header = HeaderValue::from_str(&format!(
            "downstream_client ({})",
            env!("CARGO_PKG_NAME")
        ))?;
        default_headers.insert(USER_AGENT, user_agent_header);

        let client = ClientBuilder::default()
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_text(&self, path: &str) -> Result<String, DownstreamError> {
        let response = self.get(path).await?;
        Ok(response.text().await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DownstreamError> {
        let response = self.get(path).await?;
        Ok(response.json().await?)
    }

    async fn get(&self, path: &str) -> Result<Response, DownstreamError> {
        let url = self.base_url.join(path)?;
        tracing::trace!("Downstream request to {url} - Started");

        let response = self.client.get(url.clone()).send().await?;
        tracing::trace!("Got response: {:?}", response);

        let status = response.status();
        if status.is_client_error() {
            let body = failure_body(response).await;
            tracing::debug!("Downstream rejected the request with {status}");
            return Err(DownstreamError::ClientError { status, body });
        }
        if status.is_server_error() {
            let body = failure_body(response).await;
            tracing::debug!("Downstream failed with {status}");
            return Err(DownstreamError::ServerError { status, body });
        }

        tracing::trace!("Downstream request to {url} - Complete");
        Ok(response)
    }
}

async fn failure_body(response: Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {e}>"))
}
