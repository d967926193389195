// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Finding Store
 * Per-origin aggregation with idempotent merge and write-through
 * persistence under `findings:<origin>` keys.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::errors::StoreError;
use crate::scoring::legacy_score;
use crate::types::{now_ms, Finding, OriginReport, ReconReport};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Write-through persistence backend. The host environment supplies the
/// durable implementation; `MemoryStore` backs tests and ephemeral runs.
pub trait KeyValueStore: Send + Sync {
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
    fn get(&self, key: &str) -> Option<String>;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().remove(key);
        Ok(())
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }
}

pub fn storage_key(origin: &str) -> String {
    format!("findings:{origin}")
}

/// Owner of the `origin -> OriginReport` map. All mutation goes through
/// this type; callers on threaded runtimes must serialise access through
/// a single mutator (the orchestrator wraps it in a mutex).
pub struct FindingStore {
    reports: HashMap<String, OriginReport>,
    backend: Arc<dyn KeyValueStore>,
}

impl FindingStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            reports: HashMap::new(),
            backend,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Merge new findings into the origin's report. Incoming findings are
    /// stamped with the merge time; on an `(id, title)` collision the
    /// earlier submission wins. The legacy score is recomputed and the
    /// report persisted before this returns.
    pub fn submit(&mut self, origin: &str, new_findings: Vec<Finding>) -> OriginReport {
        let now = now_ms();
        let report = self
            .reports
            .entry(origin.to_string())
            .or_insert_with(|| OriginReport::empty(origin));

        let stamped = new_findings.into_iter().map(|mut f| {
            f.ts = now;
            f
        });
        let merged = dedupe(report.findings.drain(..).chain(stamped));

        report.findings = merged;
        report.score = legacy_score(&report.findings);
        report.ts = now;

        debug!(
            "[Store] {} now has {} finding(s), score {}",
            origin,
            report.findings.len(),
            report.score
        );

        let snapshot = report.clone();
        self.persist(&snapshot);
        snapshot
    }

    /// Attach a recon result, creating the report entry if the origin was
    /// never scanned.
    pub fn attach_recon(&mut self, origin: &str, recon: ReconReport) {
        let report = self
            .reports
            .entry(origin.to_string())
            .or_insert_with(|| OriginReport::empty(origin));
        report.recon = Some(recon);
        let snapshot = report.clone();
        self.persist(&snapshot);
    }

    /// Current report, or the empty report for unknown origins.
    pub fn query(&self, origin: &str) -> OriginReport {
        self.reports
            .get(origin)
            .cloned()
            .unwrap_or_else(|| OriginReport::empty(origin))
    }

    /// Drop the origin's report and its persisted entry.
    pub fn clear(&mut self, origin: &str) {
        self.reports.remove(origin);
        if let Err(e) = self.backend.remove(&storage_key(origin)) {
            warn!("[Store] failed to remove persisted report for {}: {}", origin, e);
        }
    }

    /// Write-through persistence. A failing write is logged and never
    /// rolls back the in-memory state.
    fn persist(&self, report: &OriginReport) {
        let key = storage_key(&report.origin);
        let written = serde_json::to_string(report)
            .map_err(StoreError::from)
            .and_then(|json| self.backend.set(&key, &json));
        if let Err(e) = written {
            warn!("[Store] persistence write failed for {}: {}", key, e);
        }
    }
}

/// First-occurrence-wins dedup over `(id, title)` keys, preserving order.
fn dedupe(findings: impl Iterator<Item = Finding>) -> Vec<Finding> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for finding in findings {
        if seen.insert(finding.dedup_key()) {
            out.push(finding);
        }
    }
    out
}
