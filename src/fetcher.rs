use std::time::Duration;

use anyhow::{Context as _, anyhow};
use reqwest::header::ACCEPT;
use serde::Serialize;
use url::Url;

/// Shared HTTP client. Every call is a single attempt.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("build reqwest client")?;
        Ok(Self { client })
    }

    pub async fn get_text(&self, url: Url) -> anyhow::Result<String> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("GET {} failed with status {}", url, status));
        }
        resp.text().await.context("read response body")
    }

    /// POSTs `body` as JSON and returns the response status.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &T,
    ) -> anyhow::Result<reqwest::StatusCode> {
        let resp = self
            .client
            .post(url.clone())
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {}", url))?;
        Ok(resp.status())
    }
}
