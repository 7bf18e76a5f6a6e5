use std::time::Duration;

use anyhow::{Context as _, anyhow};
use bytes::Bytes;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use url::Url;

use crate::ack::{LanguageAck, ThemeAck};
use crate::theme::Theme;

#[derive(Clone)]
pub struct PrefClient {
    client: reqwest::Client,
    page_url: Url,
    theme_url: Url,
    language_url: Url,
}

impl PrefClient {
    pub fn new(
        base_url: &Url,
        theme_endpoint: &str,
        language_endpoint: &str,
        user_agent: &str,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("build reqwest client")?;

        let theme_url = base_url
            .join(theme_endpoint)
            .with_context(|| format!("resolve theme endpoint {}", theme_endpoint))?;
        let language_url = base_url
            .join(language_endpoint)
            .with_context(|| format!("resolve language endpoint {}", language_endpoint))?;

        Ok(Self {
            client,
            page_url: base_url.clone(),
            theme_url,
            language_url,
        })
    }

    /// Download the server-rendered page from the base URL.
    pub async fn fetch_page(&self) -> anyhow::Result<String> {
        let (bytes, _headers) = self.get_bytes(self.page_url.clone()).await?;
        String::from_utf8(bytes.to_vec())
            .with_context(|| format!("page at {} is not valid utf-8", self.page_url))
    }

    async fn get_bytes(&self, url: Url) -> anyhow::Result<(Bytes, HeaderMap)> {
        let mut backoff = Duration::from_millis(250);
        let max_attempts = 5usize;

        for attempt in 1..=max_attempts {
            let resp = self
                .client
                .get(url.clone())
                .send()
                .await
                .with_context(|| format!("GET {}", url))?;

            let status = resp.status();
            let headers = resp.headers().clone();

            if status.is_success() {
                let bytes = resp.bytes().await.context("read response body")?;
                return Ok((bytes, headers));
            }

            if status.as_u16() == 429 || status.as_u16() == 503 {
                let wait = retry_after_duration(&headers).unwrap_or(backoff);
                tracing::warn!(
                    %status,
                    attempt,
                    wait_ms = wait.as_millis(),
                    "throttled; backing off"
                );
                tokio::time::sleep(wait).await;
                backoff = (backoff * 2).min(Duration::from_secs(10));
                continue;
            }

            return Err(anyhow!("GET {} failed with status {}", url, status));
        }

        Err(anyhow!("GET {} failed after retries", url))
    }

    /// Persist the theme choice. One form-encoded POST, no retry.
    pub async fn post_theme(&self, theme: Theme) -> anyhow::Result<ThemeAck> {
        let body = self
            .post_form(&self.theme_url, &[("theme", theme.as_str())])
            .await?;
        serde_json::from_slice(&body).context("parse theme ack")
    }

    /// Persist the language choice. One form-encoded POST, no retry.
    pub async fn post_language(&self, language: &str) -> anyhow::Result<LanguageAck> {
        let body = self
            .post_form(&self.language_url, &[("language", language)])
            .await?;
        serde_json::from_slice(&body).context("parse language ack")
    }

    async fn post_form(&self, url: &Url, form: &[(&str, &str)]) -> anyhow::Result<Bytes> {
        let resp = self
            .client
            .post(url.clone())
            .form(form)
            .send()
            .await
            .with_context(|| format!("POST {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("POST {} failed with status {}", url, status));
        }
        resp.bytes().await.context("read response body")
    }
}

fn retry_after_duration(headers: &HeaderMap) -> Option<Duration> {
    let v = headers.get(RETRY_AFTER)?;
    let s = v.to_str().ok()?.trim();
    let seconds: u64 = s.parse().ok()?;
    Some(Duration::from_secs(seconds))
}
