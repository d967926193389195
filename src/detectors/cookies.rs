// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use crate::types::{Finding, PageCookie, Severity};

/// Cookie names that mark a cookie as session-bearing. Only those are
/// analyzed; flag advice on tracking/preference cookies is noise.
const SESSION_COOKIE_NAMES: &[&str] = &[
    "session",
    "sess",
    "token",
    "auth",
    "jwt",
    "sid",
    "phpsessid",
    "jsessionid",
    "asp.net_sessionid",
];

pub fn analyze(cookies: &[PageCookie], page_is_https: bool) -> Vec<Finding> {
    let mut findings = Vec::new();

    for cookie in cookies {
        let name_lc = cookie.name.to_lowercase();
        let is_session = SESSION_COOKIE_NAMES.iter().any(|s| name_lc.contains(s));
        if !is_session {
            continue;
        }

        if !cookie.http_only {
            findings.push(
                Finding::new(
                    format!("cookie.{}.httponly", cookie.name),
                    format!("Session Cookie \"{}\" Not HttpOnly", cookie.name),
                    Severity::Info,
                    "Set HttpOnly flag on session cookies.",
                )
                .with_attack("Cookie readable by JavaScript. Requires XSS to exploit."),
            );
        }
        if !cookie.secure && page_is_https {
            findings.push(
                Finding::new(
                    format!("cookie.{}.secure", cookie.name),
                    format!("Session Cookie \"{}\" Not Secure", cookie.name),
                    Severity::Info,
                    "Set Secure flag on session cookies.",
                )
                .with_attack("Cookie may be sent over HTTP. Requires MITM to exploit."),
            );
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie(name: &str, http_only: bool, secure: bool) -> PageCookie {
        PageCookie {
            name: name.to_string(),
            http_only,
            secure,
        }
    }

    #[test]
    fn unprotected_session_cookie_gets_both_findings() {
        let findings = analyze(&[cookie("PHPSESSID", false, false)], true);
        let ids: Vec<_> = findings.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["cookie.PHPSESSID.httponly", "cookie.PHPSESSID.secure"]
        );
        assert!(findings.iter().all(|f| f.severity == Severity::Info));
    }

    #[test]
    fn secure_check_skipped_on_http_pages() {
        let findings = analyze(&[cookie("auth_token", true, false)], false);
        assert!(findings.is_empty());
    }

    #[test]
    fn fully_flagged_cookie_is_clean() {
        let findings = analyze(&[cookie("JSESSIONID", true, true)], true);
        assert!(findings.is_empty());
    }

    #[test]
    fn non_session_cookies_ignored() {
        let findings = analyze(&[cookie("locale", false, false)], true);
        assert!(findings.is_empty());
    }

    #[test]
    fn name_match_is_substring_and_case_insensitive() {
        let findings = analyze(&[cookie("My_Auth_Cookie", false, true)], true);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "cookie.My_Auth_Cookie.httponly");
    }
}
