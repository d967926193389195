// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Technology Detector
 * Framework and library fingerprinting from globals and DOM markers.
 * Metadata only - emits no findings.
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::page::PageView;

/// Detected technology names in a stable order. Versioned entries
/// (jQuery, Lodash) include the probed version when known.
pub fn detect(page: &PageView) -> Vec<String> {
    let mut detected = Vec::new();

    if page.global("React").is_some() || page.markers.react_root {
        detected.push("React".to_string());
    }
    if page.global("angular").is_some() || page.markers.angular {
        detected.push("Angular".to_string());
    }
    if page.global("Vue").is_some() || page.markers.vue_scoped {
        detected.push("Vue.js".to_string());
    }
    if let Some(version) = page
        .global("jQuery.fn.jquery")
        .or_else(|| page.global("$.fn.jquery"))
        .or(page.global("jQuery").map(|_| ""))
    {
        detected.push(format!("jQuery {version}").trim_end().to_string());
    }
    if let Some(version) = page.global("_.VERSION") {
        detected.push(format!("Lodash {version}"));
    }
    if page.markers.bootstrap {
        detected.push("Bootstrap".to_string());
    }
    if page.generator_tags.iter().any(|g| g.contains("WordPress")) {
        detected.push("WordPress".to_string());
    }
    if page.generator_tags.iter().any(|g| g.contains("Drupal")) {
        detected.push("Drupal".to_string());
    }
    if page.global("__NEXT_DATA__").is_some() {
        detected.push("Next.js".to_string());
    }
    if page.global("__NUXT__").is_some() {
        detected.push("Nuxt.js".to_string());
    }

    detected
}
