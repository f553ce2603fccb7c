use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::constants::PAGE_SIZE;
use crate::error::FetchError;
use crate::models::{Character, CharacterPage, Episode, PageEnvelope};
use crate::util::parse_page_param;

/// Thin wrapper over the upstream REST API. One call per method, no retries;
/// retry policy belongs to the caller.
#[derive(Clone)]
pub struct RosterClient {
    client: reqwest::Client,
    base_url: String,
}

impl RosterClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build API client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Network {
                url: url.to_string(),
                detail: err.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Network {
                url: url.to_string(),
                detail: format!("HTTP {}", response.status()),
            });
        }

        response.json().await.map_err(|err| FetchError::Decode {
            url: url.to_string(),
            detail: err.to_string(),
        })
    }

    pub async fn fetch_page(&self, page: u32) -> Result<CharacterPage, FetchError> {
        let url = format!(
            "{}/character?page={}&count={}",
            self.base_url, page, PAGE_SIZE
        );
        let envelope: PageEnvelope = self.get_json(&url).await?;
        Ok(CharacterPage {
            next_page: parse_page_param(envelope.info.next.as_deref()),
            characters: envelope.results,
        })
    }

    pub async fn fetch_character(&self, id: u64) -> Result<Character, FetchError> {
        let url = format!("{}/character/{}", self.base_url, id);
        self.get_json(&url).await
    }

    /// Episode references come back as absolute URLs inside character records.
    pub async fn fetch_episode(&self, url: &str) -> Result<Episode, FetchError> {
        self.get_json(url).await
    }
}
