// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Page Snapshot
 * Immutable view of rendered page state consumed by the detector library
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use once_cell::sync::Lazy;
use scraper::node::Node;
use scraper::{Html, Selector};
use std::collections::HashMap;
use url::Url;

static FORM_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("form").unwrap());
static INPUT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("input").unwrap());
static SCRIPT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("script").unwrap());
static HIDDEN_INPUT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"input[type="hidden"]"#).unwrap());
static GENERATOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="generator"]"#).unwrap());
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

/// A form as it appears in the rendered page.
#[derive(Debug, Clone, Default)]
pub struct PageForm {
    /// Action resolved against the page URL, like the DOM's `form.action`;
    /// the page URL itself when the attribute is absent or empty.
    pub action: String,
    /// Uppercased method, "GET" when absent.
    pub method: String,
    pub input_names: Vec<String>,
}

/// A hidden input field.
#[derive(Debug, Clone, Default)]
pub struct HiddenInput {
    pub name: String,
    pub value: String,
}

/// DOM markers relevant to technology detection, computed once at parse
/// time so the snapshot stays plain data.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomMarkers {
    /// `[data-reactroot]` / `[data-react-root]`
    pub react_root: bool,
    /// `[ng-version]` / `[ng-app]`
    pub angular: bool,
    /// any `data-v-*` scoped-style attribute
    pub vue_scoped: bool,
    /// `[data-bs-toggle]` or `[data-toggle="modal"]`
    pub bootstrap: bool,
}

/// Immutable snapshot of everything the detectors may observe about one
/// rendered page: parsed DOM extracts, probed script globals, and web
/// storage contents. Detectors take slices of this and nothing else, so
/// tests can fabricate arbitrary page states.
#[derive(Debug, Clone)]
pub struct PageView {
    pub url: Url,
    /// Raw serialized HTML, scanned by the secret and path detectors.
    pub html: String,
    /// Visible body text, scanned for leaked error messages.
    pub body_text: String,
    pub inline_scripts: Vec<String>,
    /// `src` attributes of external scripts.
    pub script_sources: Vec<String>,
    pub comments: Vec<String>,
    pub forms: Vec<PageForm>,
    pub hidden_inputs: Vec<HiddenInput>,
    /// Contents of `<meta name="generator">` tags.
    pub generator_tags: Vec<String>,
    /// Probed script globals, e.g. `jQuery.fn.jquery -> "3.3.1"`.
    /// Presence-only probes (e.g. `React`) map to an empty string.
    pub globals: HashMap<String, String>,
    pub local_storage: Vec<(String, String)>,
    pub session_storage: Vec<(String, String)>,
    pub markers: DomMarkers,
}

impl PageView {
    /// Build a snapshot from a page URL and its rendered HTML. Globals and
    /// storage start empty; the host layers them in with the builders.
    pub fn parse(url: Url, html: &str) -> Self {
        let dom = Html::parse_document(html);

        let mut inline_scripts = Vec::new();
        let mut script_sources = Vec::new();
        for script in dom.select(&SCRIPT_SELECTOR) {
            match script.value().attr("src") {
                Some(src) => script_sources.push(src.to_string()),
                None => inline_scripts.push(script.text().collect::<String>()),
            }
        }

        let mut comments = Vec::new();
        let mut markers = DomMarkers::default();
        for node in dom.tree.values() {
            match node {
                Node::Comment(c) => comments.push(c.to_string()),
                Node::Element(el) => {
                    for (name, value) in el.attrs() {
                        match name {
                            "data-reactroot" | "data-react-root" => markers.react_root = true,
                            "ng-version" | "ng-app" => markers.angular = true,
                            "data-bs-toggle" => markers.bootstrap = true,
                            "data-toggle" if value == "modal" => markers.bootstrap = true,
                            _ if name.starts_with("data-v-") => markers.vue_scoped = true,
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }

        let forms = dom
            .select(&FORM_SELECTOR)
            .map(|form| PageForm {
                action: match form.value().attr("action").filter(|a| !a.is_empty()) {
                    Some(action) => url
                        .join(action)
                        .map(|resolved| resolved.to_string())
                        .unwrap_or_else(|_| action.to_string()),
                    None => url.to_string(),
                },
                method: form
                    .value()
                    .attr("method")
                    .unwrap_or("get")
                    .to_uppercase(),
                input_names: form
                    .select(&INPUT_SELECTOR)
                    .filter_map(|i| i.value().attr("name").map(str::to_string))
                    .collect(),
            })
            .collect();

        let hidden_inputs = dom
            .select(&HIDDEN_INPUT_SELECTOR)
            .map(|input| HiddenInput {
                name: input.value().attr("name").unwrap_or_default().to_string(),
                value: input.value().attr("value").unwrap_or_default().to_string(),
            })
            .collect();

        let generator_tags = dom
            .select(&GENERATOR_SELECTOR)
            .filter_map(|meta| meta.value().attr("content"))
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        let body_text = dom
            .select(&BODY_SELECTOR)
            .next()
            .map(|body| body.text().collect::<Vec<_>>().join("\n"))
            .unwrap_or_default();

        Self {
            url,
            html: html.to_string(),
            body_text,
            inline_scripts,
            script_sources,
            comments,
            forms,
            hidden_inputs,
            generator_tags,
            globals: HashMap::new(),
            local_storage: Vec::new(),
            session_storage: Vec::new(),
            markers,
        }
    }

    pub fn with_global(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.globals.insert(name.into(), value.into());
        self
    }

    pub fn with_local_storage(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.local_storage.push((key.into(), value.into()));
        self
    }

    pub fn with_session_storage(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.session_storage.push((key.into(), value.into()));
        self
    }

    /// Probed global value, `None` when the global was absent on the page.
    pub fn global(&self, name: &str) -> Option<&str> {
        self.globals.get(name).map(String::as_str)
    }

    pub fn is_https(&self) -> bool {
        self.url.scheme() == "https"
    }

    /// scheme+host+port triple identifying the audited site.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> PageView {
        PageView::parse(Url::parse("https://example.com/app").unwrap(), html)
    }

    #[test]
    fn extracts_scripts_comments_and_forms() {
        let view = page(
            r#"<html><head><script src="https://cdn.example/a.js"></script>
            <script>var x = 1;</script></head>
            <body><!-- internal note -->
            <form action="/login" method="post"><input name="user"><input name="csrf_token"></form>
            </body></html>"#,
        );

        assert_eq!(view.script_sources, vec!["https://cdn.example/a.js"]);
        assert_eq!(view.inline_scripts.len(), 1);
        assert!(view.comments.iter().any(|c| c.contains("internal note")));
        assert_eq!(view.forms.len(), 1);
        assert_eq!(view.forms[0].method, "POST");
        assert_eq!(view.forms[0].input_names, vec!["user", "csrf_token"]);
    }

    #[test]
    fn form_without_action_falls_back_to_page_url() {
        let view = page("<form method=post><input name=q></form>");
        assert_eq!(view.forms[0].action, "https://example.com/app");
    }

    #[test]
    fn form_actions_resolved_against_page_url() {
        let view = page(
            r#"<form action="/login"></form>
               <form action="relative/path"></form>
               <form action="http://other.example/submit"></form>"#,
        );
        assert_eq!(view.forms[0].action, "https://example.com/login");
        assert_eq!(view.forms[1].action, "https://example.com/relative/path");
        assert_eq!(view.forms[2].action, "http://other.example/submit");
    }

    #[test]
    fn extracts_hidden_inputs_and_generator() {
        let view = page(
            r#"<meta name="generator" content="WordPress 6.4">
            <input type="hidden" name="state" value="abc">"#,
        );
        assert_eq!(view.generator_tags, vec!["WordPress 6.4"]);
        assert_eq!(view.hidden_inputs.len(), 1);
        assert_eq!(view.hidden_inputs[0].name, "state");
    }

    #[test]
    fn dom_markers_detected() {
        let view = page(
            r#"<div data-reactroot></div><div data-v-7ba5bd90></div>
            <button data-toggle="modal">x</button>"#,
        );
        assert!(view.markers.react_root);
        assert!(view.markers.vue_scoped);
        assert!(view.markers.bootstrap);
        assert!(!view.markers.angular);
    }

    #[test]
    fn origin_and_scheme() {
        let view = page("<html></html>");
        assert!(view.is_https());
        assert_eq!(view.origin(), "https://example.com");
    }
}
