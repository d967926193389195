// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use crate::page::PageView;
use crate::types::{Finding, Severity};
use std::collections::HashSet;

/// HTTP scripts on HTTPS pages. Only scripts are reported: they execute,
/// so a MITM rewrite is full code execution. Stylesheets and iframes over
/// HTTP are lower impact and not flagged.
pub fn scan(page: &PageView) -> Vec<Finding> {
    if !page.is_https() {
        return Vec::new();
    }

    let mut findings = Vec::new();
    let mut found_urls: HashSet<&str> = HashSet::new();

    for src in &page.script_sources {
        if src.starts_with("http://") && found_urls.insert(src) {
            findings.push(
                Finding::new(
                    "mixed.script",
                    "HTTP Script on HTTPS Page",
                    Severity::High,
                    "Script loaded over HTTP can be modified by attacker.",
                )
                .with_attack("MITM can inject malicious JavaScript.")
                .with_data(src.clone()),
            );
        }
    }

    findings
}
