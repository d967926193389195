// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use crate::page::PageView;
use crate::types::{truncate, Finding, Severity};
use std::collections::HashSet;

const CSRF_NAME_MARKERS: &[&str] = &["csrf", "token", "_token"];

/// Form transport and CSRF hygiene. An HTTP action on an HTTPS page is a
/// directly interceptable submission (high); a POST form without a visible
/// CSRF input is informational only since protection may live elsewhere.
pub fn scan(page: &PageView) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut found_issues: HashSet<String> = HashSet::new();

    for (idx, form) in page.forms.iter().enumerate() {
        if page.is_https() && form.action.starts_with("http://") {
            let key = format!("http-form-{}", form.action);
            if found_issues.insert(key) {
                findings.push(
                    Finding::new(
                        "form.http",
                        "Form Submits Over HTTP",
                        Severity::High,
                        "Change form action to HTTPS.",
                    )
                    .with_attack("Form data can be intercepted via MITM attack.")
                    .with_data(truncate(&form.action, 60)),
                );
            }
        }

        if form.method == "POST" {
            let has_csrf = form.input_names.iter().any(|name| {
                let name_lc = name.to_lowercase();
                CSRF_NAME_MARKERS.iter().any(|m| name_lc.contains(m))
            });
            if !has_csrf && found_issues.insert(format!("csrf-{idx}")) {
                findings.push(
                    Finding::new(
                        "form.csrf",
                        "POST Form Without Visible CSRF Token",
                        Severity::Info,
                        "Form may lack CSRF protection. Verify manually.",
                    )
                    .with_attack("Potential CSRF. Requires manual verification.")
                    .with_data(truncate(&form.action, 60)),
                );
            }
        }
    }

    findings
}
