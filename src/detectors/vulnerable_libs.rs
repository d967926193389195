// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Vulnerable Library Detector
 * Matches probed client-side library versions against known CVE bounds
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::page::PageView;
use crate::types::{Finding, Severity};
use std::cmp::Ordering;

struct VersionBound {
    below: &'static str,
    cve: &'static str,
    desc: &'static str,
}

struct LibraryCheck {
    name: &'static str,
    /// Probed globals, first present wins (`jQuery.fn.jquery` has the `$`
    /// alias fallback like the page runtime does).
    probes: &'static [&'static str],
    /// Ordered highest bound first; only the first matched row is reported.
    bounds: &'static [VersionBound],
}

const LIBRARIES: &[LibraryCheck] = &[
    LibraryCheck {
        name: "jquery",
        probes: &["jQuery.fn.jquery", "$.fn.jquery"],
        bounds: &[
            VersionBound {
                below: "3.5.0",
                cve: "CVE-2020-11022",
                desc: "XSS via HTML passed to DOM methods",
            },
            VersionBound {
                below: "3.4.0",
                cve: "CVE-2019-11358",
                desc: "Prototype pollution",
            },
            VersionBound {
                below: "3.0.0",
                cve: "CVE-2015-9251",
                desc: "XSS in ajax cross-domain requests",
            },
        ],
    },
    LibraryCheck {
        name: "angularjs",
        probes: &["angular.version.full"],
        bounds: &[VersionBound {
            below: "1.8.0",
            cve: "Multiple",
            desc: "Template injection and sandbox escapes",
        }],
    },
    LibraryCheck {
        name: "lodash",
        probes: &["_.VERSION"],
        bounds: &[
            VersionBound {
                below: "4.17.21",
                cve: "CVE-2021-23337",
                desc: "Command injection via template",
            },
            VersionBound {
                below: "4.17.12",
                cve: "CVE-2019-10744",
                desc: "Prototype pollution",
            },
        ],
    },
    LibraryCheck {
        name: "moment",
        probes: &["moment.version"],
        bounds: &[VersionBound {
            below: "2.29.4",
            cve: "CVE-2022-31129",
            desc: "ReDoS via malicious string",
        }],
    },
];

pub fn scan(page: &PageView) -> Vec<Finding> {
    let mut findings = Vec::new();

    for lib in LIBRARIES {
        let Some(version) = lib.probes.iter().find_map(|probe| page.global(probe)) else {
            continue;
        };
        if version.is_empty() {
            continue;
        }
        for bound in lib.bounds {
            if compare_versions(version, bound.below) == Ordering::Less {
                findings.push(
                    Finding::new(
                        format!("vuln.{}", lib.name),
                        format!("Vulnerable {} ({})", capitalize(lib.name), version),
                        Severity::High,
                        format!("Update {} to latest version. Current: {}", lib.name, version),
                    )
                    .with_attack(format!(
                        "{}: {}. Known exploits may exist.",
                        bound.cve, bound.desc
                    ))
                    .with_data(format!("{}@{}", lib.name, version)),
                );
                break;
            }
        }
    }

    findings
}

/// Numeric dotted-version comparison: non-digit/dot characters stripped,
/// missing segments treated as zero.
pub(crate) fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect::<String>()
            .split('.')
            .map(|part| part.parse().unwrap_or(0))
            .collect()
    };
    let pa = parse(a);
    let pb = parse(b);
    for i in 0..pa.len().max(pb.len()) {
        let va = pa.get(i).copied().unwrap_or(0);
        let vb = pb.get(i).copied().unwrap_or(0);
        match va.cmp(&vb) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
