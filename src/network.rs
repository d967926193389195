// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Outbound Network Observer
 * Passive observation of fetch/XHR traffic initiated by the audited page.
 * The observer never alters the request or its outcome; on any internal
 * failure the original outcome passes through untouched.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::page::PageView;
use crate::types::{truncate, Finding, ResponseHeader, Severity};
use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::debug;

fn header_value<'a>(headers: &'a [ResponseHeader], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}

/// One observer instance lives for one page load. The `reported` set
/// guarantees at most one cleartext finding per URL.
#[derive(Debug)]
pub struct OutboundObserver {
    page_is_https: bool,
    reported: HashSet<String>,
}

impl OutboundObserver {
    pub fn new(page_is_https: bool) -> Self {
        Self {
            page_is_https,
            reported: HashSet::new(),
        }
    }

    pub fn for_page(page: &PageView) -> Self {
        Self::new(page.is_https())
    }

    /// Observe a completed fetch-style request. Emits cleartext and CORS
    /// findings; CORS is not deduplicated (wildcard-with-credentials is
    /// rare enough in practice).
    pub fn observe_fetch(
        &mut self,
        url: &str,
        response_headers: &[ResponseHeader],
    ) -> Vec<Finding> {
        if url.is_empty() || self.reported.contains(url) {
            return Vec::new();
        }
        let mut findings = Vec::new();

        if self.page_is_https && url.starts_with("http://") {
            self.reported.insert(url.to_string());
            findings.push(
                Finding::new(
                    "net.cleartext",
                    "Cleartext HTTP Request",
                    Severity::High,
                    "Use HTTPS for all requests.",
                )
                .with_attack("Data can be intercepted by MITM.")
                .with_data(truncate(url, 80)),
            );
        }

        let acao = header_value(response_headers, "access-control-allow-origin");
        let acac = header_value(response_headers, "access-control-allow-credentials");
        if acao == Some("*") && acac == Some("true") {
            findings.push(
                Finding::new(
                    "net.cors",
                    "Insecure CORS",
                    Severity::Medium,
                    "Do not use wildcard origin with credentials.",
                )
                .with_attack("Any origin can make authenticated requests.")
                .with_data(truncate(url, 80)),
            );
        }

        if !findings.is_empty() {
            debug!("[Network] {} finding(s) for {}", findings.len(), url);
        }
        findings
    }

    /// Observe a completed XHR-style request (no response headers are
    /// available on that path, so only the cleartext check applies).
    pub fn observe_xhr(&mut self, url: &str) -> Vec<Finding> {
        if url.is_empty() || self.reported.contains(url) {
            return Vec::new();
        }
        let mut findings = Vec::new();

        if self.page_is_https && url.starts_with("http://") {
            self.reported.insert(url.to_string());
            findings.push(
                Finding::new(
                    "net.cleartext.xhr",
                    "Cleartext XHR Request",
                    Severity::High,
                    "Use HTTPS for all requests.",
                )
                .with_attack("XHR data can be intercepted.")
                .with_data(truncate(url, 80)),
            );
        }

        findings
    }

    /// Transparency wrapper: runs the outbound call and observes its
    /// result without touching the outcome. Observer-internal panics are
    /// swallowed; the caller always receives exactly what the call
    /// produced.
    pub fn wrap_fetch<T, E>(
        &mut self,
        url: &str,
        call: impl FnOnce() -> Result<T, E>,
        headers_of: impl FnOnce(&T) -> Vec<ResponseHeader>,
    ) -> (Result<T, E>, Vec<Finding>) {
        let outcome = call();
        let findings = catch_unwind(AssertUnwindSafe(|| match &outcome {
            Ok(response) => self.observe_fetch(url, &headers_of(response)),
            Err(_) => Vec::new(),
        }))
        .unwrap_or_default();
        (outcome, findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleartext_fetch_reported_once_per_url() {
        let mut observer = OutboundObserver::new(true);
        let first = observer.observe_fetch("http://api.example.com/v1", &[]);
        let second = observer.observe_fetch("http://api.example.com/v1", &[]);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "net.cleartext");
        assert_eq!(first[0].severity, Severity::High);
        assert!(second.is_empty());
    }

    #[test]
    fn xhr_uses_distinct_finding_id() {
        let mut observer = OutboundObserver::new(true);
        let findings = observer.observe_xhr("http://api.example.com/xhr");
        assert_eq!(findings[0].id, "net.cleartext.xhr");
    }

    #[test]
    fn https_pages_only() {
        let mut observer = OutboundObserver::new(false);
        assert!(observer.observe_fetch("http://api.example.com/", &[]).is_empty());
        assert!(observer.observe_xhr("http://api.example.com/").is_empty());
    }

    #[test]
    fn wildcard_cors_with_credentials_is_medium() {
        let mut observer = OutboundObserver::new(true);
        let headers = vec![
            ResponseHeader::new("Access-Control-Allow-Origin", "*"),
            ResponseHeader::new("Access-Control-Allow-Credentials", "true"),
        ];
        let findings = observer.observe_fetch("https://api.example.com/", &headers);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "net.cors");
        assert_eq!(findings[0].severity, Severity::Medium);

        // not deduplicated
        let again = observer.observe_fetch("https://api.example.com/", &headers);
        assert_eq!(again.len(), 1);
    }

    #[test]
    fn cors_requires_both_headers() {
        let mut observer = OutboundObserver::new(true);
        let only_origin = vec![ResponseHeader::new("access-control-allow-origin", "*")];
        assert!(observer
            .observe_fetch("https://api.example.com/", &only_origin)
            .is_empty());
    }

    #[test]
    fn long_urls_truncated_in_data() {
        let mut observer = OutboundObserver::new(true);
        let url = format!("http://x.example/{}", "a".repeat(200));
        let findings = observer.observe_fetch(&url, &[]);
        assert_eq!(findings[0].data.as_deref().unwrap().chars().count(), 80);
    }

    #[test]
    fn wrap_fetch_preserves_ok_outcome() {
        let mut observer = OutboundObserver::new(true);
        let (outcome, findings) = observer.wrap_fetch(
            "http://api.example.com/data",
            || Ok::<_, String>("body".to_string()),
            |_| Vec::new(),
        );
        assert_eq!(outcome.unwrap(), "body");
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn wrap_fetch_preserves_error_outcome() {
        let mut observer = OutboundObserver::new(true);
        let (outcome, findings) = observer.wrap_fetch(
            "http://api.example.com/data",
            || Err::<String, _>("connection refused".to_string()),
            |_| Vec::new(),
        );
        assert_eq!(outcome.unwrap_err(), "connection refused");
        assert!(findings.is_empty());
    }

    #[test]
    fn wrap_fetch_swallows_observer_internal_panic() {
        let mut observer = OutboundObserver::new(true);
        let (outcome, findings) = observer.wrap_fetch(
            "https://api.example.com/data",
            || Ok::<_, String>(42),
            |_| panic!("header extraction bug"),
        );
        assert_eq!(outcome.unwrap(), 42);
        assert!(findings.is_empty());
    }
}
