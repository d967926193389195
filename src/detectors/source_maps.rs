// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use crate::page::PageView;
use crate::types::{Finding, Severity};

/// Reports at most one finding when any inline script references a source
/// map. Informational: maps aid reverse engineering but are not directly
/// exploitable.
pub fn scan(page: &PageView) -> Vec<Finding> {
    let referenced = page
        .inline_scripts
        .iter()
        .any(|script| script.contains("sourceMappingURL"));

    if !referenced {
        return Vec::new();
    }

    vec![
        Finding::new(
            "sourcemap.inline",
            "Source Map Reference Found",
            Severity::Info,
            "Source maps expose original code. Consider removing in production.",
        )
        .with_attack("Aids reverse engineering. Informational - not directly exploitable."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn page(html: &str) -> PageView {
        PageView::parse(Url::parse("https://example.com/").unwrap(), html)
    }

    #[test]
    fn single_finding_even_with_many_references() {
        let view = page(
            "<script>//# sourceMappingURL=a.js.map</script>\
             <script>//# sourceMappingURL=b.js.map</script>",
        );
        let findings = scan(&view);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].id, "sourcemap.inline");
        assert_eq!(findings[0].severity, Severity::Info);
    }

    #[test]
    fn no_finding_without_reference() {
        let view = page("<script>var a = 1;</script>");
        assert!(scan(&view).is_empty());
    }
}
