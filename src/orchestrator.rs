// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Audit Orchestrator
 * Owns the per-origin finding store, routes consumer messages, runs the
 * detector pipeline and maintains badge state.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::detectors;
use crate::errors::AuditError;
use crate::page::PageView;
use crate::recon::ReconFetcher;
use crate::scoring::{badge_for, Badge};
use crate::store::{FindingStore, KeyValueStore};
use crate::types::{Finding, OriginReport, PageCookie, PageMetadata, ReconReport, ResponseHeader};
use anyhow::Result;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Consumer -> orchestrator message protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditMessage {
    Findings {
        origin: String,
        findings: Vec<Finding>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<PageMetadata>,
    },
    GetFindings {
        origin: String,
    },
    ReconRequest {
        origin: String,
    },
    ClearFindings {
        origin: String,
    },
}

impl AuditMessage {
    /// The origin this message targets. Every message variant carries one.
    pub fn origin(&self) -> &str {
        match self {
            AuditMessage::Findings { origin, .. }
            | AuditMessage::GetFindings { origin }
            | AuditMessage::ReconRequest { origin }
            | AuditMessage::ClearFindings { origin } => origin,
        }
    }
}

/// Orchestrator -> consumer replies, shaped like the raw wire records the
/// consumer UI expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuditReply {
    Report(OriginReport),
    Recon(ReconReport),
    Ack {
        ok: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl AuditReply {
    fn ok() -> Self {
        AuditReply::Ack {
            ok: true,
            error: None,
        }
    }
}

/// Outcome of a full page audit: the merged report plus page technology
/// metadata for the consumer UI.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub report: OriginReport,
    pub technologies: Vec<String>,
}

/// Single mutator for all per-origin state. Detector execution is
/// synchronous; the awaited boundaries are recon fetches and message
/// dispatch, with persistence committed before any acknowledgement.
pub struct Orchestrator {
    store: Mutex<FindingStore>,
    recon: ReconFetcher,
    badges: Mutex<HashMap<String, Badge>>,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Result<Self> {
        Ok(Self {
            store: Mutex::new(FindingStore::new(backend)),
            recon: ReconFetcher::new()?,
            badges: Mutex::new(HashMap::new()),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            store: Mutex::new(FindingStore::in_memory()),
            recon: ReconFetcher::new()?,
            badges: Mutex::new(HashMap::new()),
        })
    }

    /// Route one consumer message. Internal failures become
    /// `{ok: false, error}` replies; the handler itself never fails.
    pub async fn handle_message(&self, message: AuditMessage) -> AuditReply {
        match self.dispatch(message).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("[Orchestrator] message handling failed: {}", e);
                AuditReply::Ack {
                    ok: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn dispatch(&self, message: AuditMessage) -> Result<AuditReply, AuditError> {
        if message.origin().is_empty() {
            return Err(AuditError::Message(
                "message carried an empty origin".to_string(),
            ));
        }
        match message {
            AuditMessage::Findings {
                origin,
                findings,
                metadata,
            } => {
                if let Some(meta) = &metadata {
                    debug!(
                        "[Orchestrator] {} submitted from \"{}\" ({} tech entries)",
                        origin,
                        meta.title,
                        meta.tech.len()
                    );
                }
                let report = self.store.lock().submit(&origin, findings);
                self.badges
                    .lock()
                    .insert(origin.clone(), badge_for(report.score));
                info!(
                    "[Orchestrator] {} now at {} finding(s), score {}",
                    origin,
                    report.findings.len(),
                    report.score
                );
                Ok(AuditReply::ok())
            }
            AuditMessage::GetFindings { origin } => {
                Ok(AuditReply::Report(self.store.lock().query(&origin)))
            }
            AuditMessage::ReconRequest { origin } => {
                let result = self.recon.recon(&origin).await;
                // attach + persist before replying so the reply always
                // observes committed state
                self.store.lock().attach_recon(&origin, result.clone());
                Ok(AuditReply::Recon(result))
            }
            AuditMessage::ClearFindings { origin } => {
                self.store.lock().clear(&origin);
                self.badges.lock().remove(&origin);
                Ok(AuditReply::ok())
            }
        }
    }

    /// Run the full passive pipeline over one page snapshot: page-state
    /// detectors, header analysis and cookie analysis, merged into the
    /// page's origin in that order.
    pub fn audit_page(
        &self,
        page: &PageView,
        response_headers: &[ResponseHeader],
        cookies: &[PageCookie],
    ) -> AuditOutcome {
        let origin = page.origin();
        let scan = detectors::run_page(page);

        let mut findings = scan.findings;
        findings.extend(detectors::guarded("response_headers", || {
            detectors::response_headers::analyze(response_headers)
        }));
        let https = page.is_https();
        findings.extend(detectors::guarded("cookies", || {
            detectors::cookies::analyze(cookies, https)
        }));

        let report = self.store.lock().submit(&origin, findings);
        self.badges
            .lock()
            .insert(origin, badge_for(report.score));

        AuditOutcome {
            report,
            technologies: scan.technologies,
        }
    }

    /// Submit externally observed findings (e.g. from the network
    /// observer) for an origin.
    pub fn submit_findings(&self, origin: &str, findings: Vec<Finding>) -> OriginReport {
        let report = self.store.lock().submit(origin, findings);
        self.badges
            .lock()
            .insert(origin.to_string(), badge_for(report.score));
        report
    }

    /// Current badge for an origin; the empty green badge when unknown.
    pub fn badge(&self, origin: &str) -> Badge {
        self.badges
            .lock()
            .get(origin)
            .cloned()
            .unwrap_or_else(|| badge_for(0))
    }

    /// Current report for an origin without going through the message
    /// layer.
    pub fn report(&self, origin: &str) -> OriginReport {
        self.store.lock().query(origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_wire_format_matches_protocol() {
        let msg: AuditMessage = serde_json::from_str(
            r#"{"type":"FINDINGS","origin":"https://example.com","findings":[]}"#,
        )
        .unwrap();
        assert!(matches!(msg, AuditMessage::Findings { .. }));

        let msg: AuditMessage =
            serde_json::from_str(r#"{"type":"GET_FINDINGS","origin":"https://example.com"}"#)
                .unwrap();
        assert!(matches!(msg, AuditMessage::GetFindings { .. }));

        let msg: AuditMessage =
            serde_json::from_str(r#"{"type":"RECON_REQUEST","origin":"https://example.com"}"#)
                .unwrap();
        assert!(matches!(msg, AuditMessage::ReconRequest { .. }));

        let msg: AuditMessage =
            serde_json::from_str(r#"{"type":"CLEAR_FINDINGS","origin":"https://example.com"}"#)
                .unwrap();
        assert!(matches!(msg, AuditMessage::ClearFindings { .. }));
    }

    #[test]
    fn ack_serializes_without_error_field_when_ok() {
        let json = serde_json::to_string(&AuditReply::ok()).unwrap();
        assert_eq!(json, r#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn empty_origin_message_gets_error_ack() {
        let orchestrator = Orchestrator::in_memory().unwrap();
        let reply = orchestrator
            .handle_message(AuditMessage::GetFindings {
                origin: String::new(),
            })
            .await;
        match reply {
            AuditReply::Ack { ok, error } => {
                assert!(!ok);
                assert!(error.unwrap().contains("origin"));
            }
            other => panic!("expected error ack, got {other:?}"),
        }
    }
}
