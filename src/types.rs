// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Severity of a single finding. `Info` findings are surfaced to the user
/// but excluded from every score (risk, health, legacy badge weight).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// One concrete security observation.
///
/// The finding id is hierarchical and dotted; the first segment is the
/// category (`apikey.stripesecretkeylive` -> `apikey`). The category is
/// never stored separately, always derived.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub severity: Severity,
    /// Remediation advice.
    pub desc: String,
    /// Impact narrative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack: Option<String>,
    /// Literal secret / token / match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    /// Contextual location: URL, field name, version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Milliseconds since epoch, stamped when the finding is merged.
    #[serde(default)]
    pub ts: i64,
}

impl Finding {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        severity: Severity,
        desc: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            severity,
            desc: desc.into(),
            attack: None,
            evidence: None,
            data: None,
            ts: 0,
        }
    }

    pub fn with_attack(mut self, attack: impl Into<String>) -> Self {
        self.attack = Some(attack.into());
        self
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Category key: the id prefix before the first `.`.
    pub fn category(&self) -> &str {
        self.id.split('.').next().unwrap_or(&self.id)
    }

    /// Merge/dedup key. Two findings with the same key within one origin
    /// collapse to the first occurrence.
    pub fn dedup_key(&self) -> String {
        format!("{}:{}", self.id, self.title)
    }
}

/// Result of passive recon against `<origin>/robots.txt` and
/// `<origin>/sitemap.xml`. A missing file is `None`, not an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReconReport {
    pub robots: Option<String>,
    pub sitemap: Option<String>,
    pub ts: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Per-origin aggregate. Finding order is insertion order; on a dedup
/// collision the earlier submission wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OriginReport {
    pub origin: String,
    pub findings: Vec<Finding>,
    /// Legacy cumulative severity weight (badge number).
    pub score: u32,
    pub recon: Option<ReconReport>,
    /// Last mutation time, milliseconds since epoch.
    pub ts: i64,
}

impl OriginReport {
    /// The empty report returned for origins that were never scanned.
    pub fn empty(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            findings: Vec::new(),
            score: 0,
            recon: None,
            ts: 0,
        }
    }
}

/// A single response header as observed by the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseHeader {
    pub name: String,
    pub value: String,
}

impl ResponseHeader {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A cookie as observed by the host for the audited origin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageCookie {
    pub name: String,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub secure: bool,
}

/// Metadata the page scan attaches to a FINDINGS submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub tech: Vec<String>,
}

/// Milliseconds since epoch.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Truncate to at most `max` characters on a char boundary. Several
/// findings carry truncated URLs/paths so reports stay readable.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
