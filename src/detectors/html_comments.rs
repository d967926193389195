// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - HTML Comment Scanner
 * High-value credential material left in markup comments. TODO/FIXME and
 * admin-path chatter is deliberately not reported.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::detectors::slug;
use crate::page::PageView;
use crate::types::{truncate, Finding, Severity};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

struct CommentPattern {
    regex: Regex,
    kind: &'static str,
    severity: Severity,
}

static COMMENT_PATTERNS: Lazy<Vec<CommentPattern>> = Lazy::new(|| {
    let pat = |pattern, kind, severity| CommentPattern {
        regex: Regex::new(pattern).unwrap(),
        kind,
        severity,
    };
    vec![
        pat(
            r#"(?i)password\s*[:=]\s*['"][^'"]+['"]"#,
            "Hardcoded Password",
            Severity::High,
        ),
        pat(
            r#"(?i)api[_-]?key\s*[:=]\s*['"][^'"]+['"]"#,
            "API Key in Comment",
            Severity::High,
        ),
        pat(
            r#"(?i)secret\s*[:=]\s*['"][^'"]+['"]"#,
            "Secret in Comment",
            Severity::High,
        ),
        pat(r"(?i)credential\s*[:=]", "Credential Reference", Severity::Medium),
    ]
});

/// Evidence is only attached when the comment itself carries credential
/// vocabulary, so bland matches stay evidence-free.
static EVIDENCE_WORTHY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)password|passwd|pwd|secret|credential|api[_-]?key").unwrap());

pub fn scan(page: &PageView) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut found_types: HashSet<&'static str> = HashSet::new();

    for comment in &page.comments {
        for pattern in COMMENT_PATTERNS.iter() {
            if pattern.regex.is_match(comment) && !found_types.contains(pattern.kind) {
                found_types.insert(pattern.kind);

                let mut finding = Finding::new(
                    format!("comment.{}", slug(pattern.kind)),
                    format!("Sensitive Comment: {}", pattern.kind),
                    pattern.severity,
                    "Remove development comments before deployment.",
                )
                .with_attack("Comments may reveal internal information.");

                if EVIDENCE_WORTHY.is_match(comment) {
                    finding = finding
                        .with_evidence(format!("<!-- {} -->", truncate(comment.trim(), 200)));
                }

                findings.push(finding);
                break;
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn page(html: &str) -> PageView {
        PageView::parse(Url::parse("https://example.com/").unwrap(), html)
    }

    #[test]
    fn hardcoded_password_reported_with_evidence() {
        let view = page(r#"<!-- db password = "hunter22" -->"#);
        let findings = scan(&view);
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.id, "comment.hardcodedpassword");
        assert_eq!(f.severity, Severity::High);
        let evidence = f.evidence.as_deref().unwrap();
        assert!(evidence.starts_with("<!-- "));
        assert!(evidence.contains("hunter22"));
    }

    #[test]
    fn one_finding_per_type_across_comments() {
        let view = page(
            r#"<!-- password: "a" --><div></div><!-- password: "b" -->
               <!-- api_key = "k123" -->"#,
        );
        let findings = scan(&view);
        let ids: Vec<_> = findings.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(findings.len(), 2);
        assert!(ids.contains(&"comment.hardcodedpassword"));
        assert!(ids.contains(&"comment.apikeyincomment"));
    }

    #[test]
    fn credential_reference_is_medium() {
        let view = page("<!-- staging credential: stored in vault -->");
        let findings = scan(&view);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "comment.credentialreference");
        assert_eq!(findings[0].severity, Severity::Medium);
    }

    #[test]
    fn todo_comments_ignored() {
        let view = page("<!-- TODO: clean this up before launch -->");
        assert!(scan(&view).is_empty());
    }

    #[test]
    fn evidence_capped_at_200_chars() {
        let long = "x".repeat(400);
        let html = format!(r#"<!-- password = "{long}" -->"#);
        let findings = scan(&page(&html));
        let evidence = findings[0].evidence.as_deref().unwrap();
        // "<!-- " + 200 chars + " -->"
        assert_eq!(evidence.chars().count(), 200 + 9);
    }
}
