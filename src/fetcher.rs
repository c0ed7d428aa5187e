use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::fs;

#[async_trait]
pub trait Fetch {
    type Error;
    async fn fetch(&self) -> Result<String, Self::Error>;
}

/// Anything that can turn a source string (url or `file://` path) into text.
#[async_trait]
pub trait Source: Send + Sync {
    async fn retrieve(&self, source: &str) -> Result<String>;
}

/// Retrieves http/https sources through a shared client and `file://` sources from disk.
#[derive(Debug, Clone)]
pub struct Retriever {
    client: reqwest::Client,
}

impl Retriever {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Source for Retriever {
    async fn retrieve(&self, source: &str) -> Result<String> {
        // includes http / https
        if source.starts_with("http://") || source.starts_with("https://") {
            UrlFetcher(&self.client, source).fetch().await
        } else if let Some(path) = source.strip_prefix("file://") {
            FileFetcher(path).fetch().await
        } else {
            Err(anyhow!("We only support http/https/file at the moment, got {source}"))
        }
    }
}

struct UrlFetcher<'a>(pub(crate) &'a reqwest::Client, pub(crate) &'a str);

#[async_trait]
impl<'a> Fetch for UrlFetcher<'a> {
    type Error = anyhow::Error;

    async fn fetch(&self) -> Result<String, Self::Error> {
        Ok(self.0.get(self.1).send().await?.error_for_status()?.text().await?)
    }
}

struct FileFetcher<'a>(pub(crate) &'a str);

#[async_trait]
impl<'a> Fetch for FileFetcher<'a> {
    type Error = anyhow::Error;

    async fn fetch(&self) -> Result<String, Self::Error> {
        Ok(fs::read_to_string(self.0).await?)
    }
}
