use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, trace, warn};

use super::config::ClientConfig;
use super::error::Error;
use super::{Fetcher, Form};

/// [`Fetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    async fn read_body(url: &str, response: reqwest::Response) -> Result<String, Error> {
        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "request rejected");
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        debug!(url, bytes = body.len(), "response received");
        trace!(url, %body, "response body");
        Ok(body)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn post_form(&self, url: &str, form: &Form) -> Result<String, Error> {
        debug!(url, fields = form.len(), "POST form");
        let response = self.client.post(url).form(form).send().await?;
        Self::read_body(url, response).await
    }

    async fn get(&self, url: &str) -> Result<String, Error> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await?;
        Self::read_body(url, response).await
    }
}
