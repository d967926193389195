// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Recon Fetcher
 * Passive retrieval of /robots.txt and /sitemap.xml for an origin.
 * Never errors: transport failures and non-2xx responses become nulls,
 * anything unexpected lands in the report's error field.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::errors::AuditError;
use crate::types::{now_ms, ReconReport};
use anyhow::Result;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub struct ReconFetcher {
    client: Client,
}

impl ReconFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch both recon files for an origin. The returned report always
    /// carries a timestamp; a malformed origin is the only path into the
    /// error field.
    pub async fn recon(&self, origin: &str) -> ReconReport {
        info!("[Recon] fetching robots.txt and sitemap.xml for {}", origin);
        match self.recon_inner(origin).await {
            Ok(report) => report,
            Err(e) => ReconReport {
                robots: None,
                sitemap: None,
                ts: now_ms(),
                error: Some(e.to_string()),
            },
        }
    }

    async fn recon_inner(&self, origin: &str) -> Result<ReconReport, AuditError> {
        let base =
            Url::parse(origin).map_err(|_| AuditError::InvalidOrigin(origin.to_string()))?;
        let robots_url = base
            .join("/robots.txt")
            .map_err(|_| AuditError::InvalidOrigin(origin.to_string()))?;
        let sitemap_url = base
            .join("/sitemap.xml")
            .map_err(|_| AuditError::InvalidOrigin(origin.to_string()))?;

        let robots = self.fetch_text_safe(robots_url.as_str()).await;
        let sitemap = self.fetch_text_safe(sitemap_url.as_str()).await;

        Ok(ReconReport {
            robots,
            sitemap,
            ts: now_ms(),
            error: None,
        })
    }

    /// Safe fetch: any transport error or non-2xx status is `None`.
    pub async fn fetch_text_safe(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!("[Recon] request failed for {}: {}", url, e);
                return None;
            }
        };
        if !response.status().is_success() {
            debug!("[Recon] non-success status {} for {}", response.status(), url);
            return None;
        }
        response.text().await.ok()
    }
}
