// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use crate::detectors::JWT_SHAPE;
use crate::page::PageView;
use crate::types::{Finding, Severity};

/// JWTs in web storage. One finding per storage kind; generic
/// sensitive-looking key names are not reported since many apps store
/// harmless UI state under names like "token".
pub fn scan(page: &PageView) -> Vec<Finding> {
    let mut findings = Vec::new();

    check_storage(&page.local_storage, "localStorage", &mut findings);
    check_storage(&page.session_storage, "sessionStorage", &mut findings);

    findings
}

fn check_storage(entries: &[(String, String)], kind: &str, findings: &mut Vec<Finding>) {
    for (key, value) in entries {
        if JWT_SHAPE.is_match(value) {
            findings.push(
                Finding::new(
                    "storage.jwt",
                    format!("JWT Token in {kind}"),
                    Severity::High,
                    "JWT in browser storage can be stolen via XSS. Use HttpOnly cookies.",
                )
                .with_attack("Token can be exfiltrated via JavaScript.")
                .with_evidence(value.clone())
                .with_data(key.clone()),
            );
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    const JWT: &str = "eyJhbGciOiJIUzI1NiJ9.eyJ1aWQiOjF9.sflKxwRJSMeKKF2QT4fwpMeJf36POk6yJVadQssw5c";

    fn page() -> PageView {
        PageView::parse(Url::parse("https://example.com/").unwrap(), "<html></html>")
    }

    #[test]
    fn one_finding_per_storage_kind() {
        let view = page()
            .with_local_storage("access_token", JWT)
            .with_local_storage("refresh_token", JWT)
            .with_session_storage("id_token", JWT);
        let findings = scan(&view);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.id == "storage.jwt"));
        assert!(findings.iter().any(|f| f.title.contains("localStorage")));
        assert!(findings.iter().any(|f| f.title.contains("sessionStorage")));
    }

    #[test]
    fn first_matching_entry_carries_evidence() {
        let view = page()
            .with_local_storage("theme", "dark")
            .with_local_storage("jwt", JWT);
        let findings = scan(&view);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].evidence.as_deref(), Some(JWT));
        assert_eq!(findings[0].data.as_deref(), Some("jwt"));
    }

    #[test]
    fn non_jwt_values_ignored() {
        let view = page().with_local_storage("token", "opaque-session-value");
        assert!(scan(&view).is_empty());
    }
}
