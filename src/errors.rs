// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Audit Engine Error Types
 * Error taxonomy for the passive audit pipeline
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use thiserror::Error;

/// Top-level error type for the audit engine.
///
/// Detector failures never surface here: a failing detector contributes an
/// empty finding list and the pipeline continues. Recon and persistence
/// failures are absorbed at their own layer (error field, warn log), so
/// what remains is the message-handling seam.
#[derive(Error, Debug)]
pub enum AuditError {
    /// Malformed or unroutable consumer messages
    #[error("Message error: {0}")]
    Message(String),

    /// Origin strings that do not parse as scheme+host+port
    #[error("Invalid origin: {0}")]
    InvalidOrigin(String),
}

/// Errors from the write-through key-value persistence backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Backend write failed for key {key}: {reason}")]
    Backend { key: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_context() {
        let err = AuditError::InvalidOrigin("not a url".to_string());
        assert!(err.to_string().contains("not a url"));

        let err = AuditError::Message("empty origin".to_string());
        assert!(err.to_string().contains("empty origin"));
    }

    #[test]
    fn store_error_display_includes_key() {
        let err = StoreError::Backend {
            key: "findings:https://a.example".to_string(),
            reason: "quota exceeded".to_string(),
        };
        assert!(err.to_string().contains("findings:https://a.example"));
        assert!(err.to_string().contains("quota exceeded"));
    }
}
