// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Response Header Analyzer
 * Missing or weak browser security headers. Everything here is
 * informational: a missing header is hardening advice, not a breach.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::types::{Finding, ResponseHeader, Severity};

fn header<'a>(headers: &'a [ResponseHeader], name: &str) -> Option<&'a ResponseHeader> {
    headers.iter().find(|h| h.name.eq_ignore_ascii_case(name))
}

fn mark(id: &str, title: &str, desc: &str, attack: &str) -> Finding {
    Finding::new(id, title, Severity::Info, desc).with_attack(attack)
}

pub fn analyze(headers: &[ResponseHeader]) -> Vec<Finding> {
    let mut findings = Vec::new();

    let csp = header(headers, "content-security-policy");
    match csp {
        None => findings.push(mark(
            "hdr.csp.missing",
            "CSP Header Not Set",
            "Consider adding Content-Security-Policy header.",
            "CSP provides defense-in-depth against XSS. Not a vulnerability by itself.",
        )),
        Some(csp) => {
            if csp.value.contains("unsafe-inline") && csp.value.contains("unsafe-eval") {
                findings.push(mark(
                    "hdr.csp.weak",
                    "CSP Has Weak Configuration",
                    "CSP allows unsafe-inline and unsafe-eval.",
                    "Weak CSP may not block XSS if one is found. Informational only.",
                ));
            }
        }
    }

    if header(headers, "strict-transport-security").is_none() {
        findings.push(mark(
            "hdr.hsts.missing",
            "HSTS Header Not Set",
            "Consider adding Strict-Transport-Security header.",
            "HSTS prevents SSL stripping. Informational - requires MITM position.",
        ));
    }

    let frame_ancestors_covered =
        csp.map_or(false, |c| c.value.contains("frame-ancestors"));
    if header(headers, "x-frame-options").is_none() && !frame_ancestors_covered {
        findings.push(mark(
            "hdr.xfo.missing",
            "Clickjacking Protection Missing",
            "Add X-Frame-Options or CSP frame-ancestors.",
            "Page can be framed. Informational unless sensitive actions exist.",
        ));
    }

    if header(headers, "x-content-type-options").is_none() {
        findings.push(mark(
            "hdr.xcto.missing",
            "X-Content-Type-Options Not Set",
            "Add X-Content-Type-Options: nosniff.",
            "Prevents MIME sniffing. Informational.",
        ));
    }

    findings
}
