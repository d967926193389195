// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Sensitive Path Detector
 * References to backup files, phpMyAdmin and debug endpoints in page HTML.
 * Generic /api, /admin and /graphql paths are normal and never reported.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::detectors::slug;
use crate::page::PageView;
use crate::types::{Finding, Severity};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

const MAX_FINDINGS: usize = 5;

struct PathPattern {
    regex: Regex,
    kind: &'static str,
    severity: Severity,
}

static PATH_PATTERNS: Lazy<Vec<PathPattern>> = Lazy::new(|| {
    let pat = |pattern, kind, severity| PathPattern {
        regex: Regex::new(pattern).unwrap(),
        kind,
        severity,
    };
    vec![
        pat(
            r#"(?i)["']([^/"']*?\.(?:sql|bak|backup|db|sqlite))\b"#,
            "Database/Backup File",
            Severity::High,
        ),
        pat(
            r#"(?i)["'](/phpmyadmin[^/"']*?)["']"#,
            "phpMyAdmin",
            Severity::High,
        ),
        pat(
            r#"(?i)["'](/debug[^/"']*?)["']"#,
            "Debug Endpoint",
            Severity::Medium,
        ),
    ]
});

pub fn scan(page: &PageView) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut found_paths: HashSet<String> = HashSet::new();

    'patterns: for pattern in PATH_PATTERNS.iter() {
        for caps in pattern.regex.captures_iter(&page.html) {
            if findings.len() >= MAX_FINDINGS {
                break 'patterns;
            }
            let Some(path) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if path.len() <= 3 || path.len() >= 100 || found_paths.contains(path) {
                continue;
            }
            found_paths.insert(path.to_string());
            findings.push(
                Finding::new(
                    format!("path.{}", slug(pattern.kind)),
                    format!("{} Reference Found", pattern.kind),
                    pattern.severity,
                    "Verify this file/path is not publicly accessible.",
                )
                .with_attack("May expose sensitive data if accessible.")
                .with_data(path.to_string()),
            );
        }
    }

    findings
}
