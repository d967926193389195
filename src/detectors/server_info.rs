// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Server Info Detector
 * Generator meta tags and leaked error messages in visible page text
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::detectors::slug;
use crate::page::PageView;
use crate::types::{Finding, Severity};
use once_cell::sync::Lazy;
use regex::Regex;

struct ErrorPattern {
    name: &'static str,
    regex: Regex,
    severity: Severity,
}

static ERROR_PATTERNS: Lazy<Vec<ErrorPattern>> = Lazy::new(|| {
    let pat = |name, pattern, severity| ErrorPattern {
        name,
        regex: Regex::new(pattern).unwrap(),
        severity,
    };
    vec![
        // SQL errors rank high: they often indicate injectable queries.
        pat("MySQL Error", r"(?i)SQL syntax.*?MySQL", Severity::High),
        pat("PostgreSQL Error", r"(?i)PostgreSQL.*?ERROR", Severity::High),
        pat("Oracle Error", r"(?i)ORA-\d{5}", Severity::High),
        // Stack traces reveal internal paths.
        pat(
            "PHP Fatal Error",
            r"(?i)Fatal error.*?on line \d+",
            Severity::Medium,
        ),
        pat(
            "Python Traceback",
            r"(?i)Traceback \(most recent call last\)",
            Severity::Medium,
        ),
        pat("Java Stack Trace", r"(?i)at .+\.java:\d+", Severity::Medium),
    ]
});

pub fn scan(page: &PageView) -> Vec<Finding> {
    let mut findings = Vec::new();

    for content in &page.generator_tags {
        findings.push(
            Finding::new(
                "info.generator",
                "Technology Version Disclosed",
                Severity::Info,
                "Generator meta tag reveals technology stack.",
            )
            .with_attack(format!("Disclosed: \"{content}\". Informational only."))
            .with_data(content.clone()),
        );
    }

    for pattern in ERROR_PATTERNS.iter() {
        if pattern.regex.is_match(&page.body_text) {
            findings.push(
                Finding::new(
                    format!("info.error.{}", slug(pattern.name)),
                    format!("{} Exposed", pattern.name),
                    pattern.severity,
                    "Disable debug mode and implement custom error pages.",
                )
                .with_attack(
                    "Error messages reveal internal paths, database structure, and technology stack.",
                ),
            );
        }
    }

    findings
}
