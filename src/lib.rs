// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Passive Audit Engine
 * Client-side security auditing over rendered page state: detector
 * library, per-origin finding store and risk/health scoring.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod errors;
pub mod page;
pub mod types;

// Detector library
pub mod detectors;

// Network traffic observation
pub mod network;

// Aggregation, scoring and persistence
pub mod scoring;
pub mod store;

// Recon and message dispatch
pub mod orchestrator;
pub mod recon;

pub use orchestrator::{AuditMessage, AuditOutcome, AuditReply, Orchestrator};
pub use page::PageView;
pub use types::{Finding, OriginReport, PageCookie, ReconReport, ResponseHeader, Severity};
