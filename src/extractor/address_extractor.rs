// src/extractor/address_extractor.rs
use scraper::{Html, Node, Selector};
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

use crate::extractor::patterns;
use crate::models::Candidate;

/// Lines longer than this are page-level text blobs, not addresses.
const MAX_CANDIDATE_LEN: usize = 200;

/// Scans raw HTML for address-like spans. Structured markup (`<address>`
/// tags, JSON-LD postal address blocks) ranks before heuristic text
/// scanning; within each tier candidates keep document order. Absence of
/// candidates is a normal outcome, never an error.
pub struct AddressExtractor;

impl AddressExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, html: &str, source_url: &str) -> Vec<Candidate> {
        let document = Html::parse_document(html);
        let mut candidates = Vec::new();
        let mut seen = HashSet::new();

        self.extract_address_tags(&document, source_url, &mut candidates, &mut seen);
        self.extract_json_ld(&document, source_url, &mut candidates, &mut seen);
        self.extract_text_lines(&document, source_url, &mut candidates, &mut seen);

        debug!(
            "Found {} address candidates on {}",
            candidates.len(),
            source_url
        );
        candidates
    }

    fn extract_address_tags(
        &self,
        document: &Html,
        source_url: &str,
        candidates: &mut Vec<Candidate>,
        seen: &mut HashSet<String>,
    ) {
        let selector = Selector::parse("address").unwrap();

        for element in document.select(&selector) {
            let text = element
                .text()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            push_candidate(&text, source_url, candidates, seen);
        }
    }

    fn extract_json_ld(
        &self,
        document: &Html,
        source_url: &str,
        candidates: &mut Vec<Candidate>,
        seen: &mut HashSet<String>,
    ) {
        let selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();

        for element in document.select(&selector) {
            let body = element.text().collect::<String>();
            let Ok(value) = serde_json::from_str::<Value>(&body) else {
                continue;
            };
            let mut found = Vec::new();
            collect_structured_addresses(&value, &mut found);
            for text in found {
                push_candidate(&text, source_url, candidates, seen);
            }
        }
    }

    fn extract_text_lines(
        &self,
        document: &Html,
        source_url: &str,
        candidates: &mut Vec<Candidate>,
        seen: &mut HashSet<String>,
    ) {
        for line in visible_text_lines(document) {
            if line.len() > MAX_CANDIDATE_LEN {
                continue;
            }

            let keyword_hit = patterns::is_keyword_line(&line)
                && (line.contains(',') || line.chars().any(|c| c.is_ascii_digit()));
            let pattern_hit = patterns::has_postal_token(&line)
                && (patterns::has_street_suffix(&line) || line.matches(',').count() >= 2);

            if keyword_hit || pattern_hit {
                let text = patterns::strip_label(&line);
                push_candidate(&text, source_url, candidates, seen);
            }
        }
    }
}

impl Default for AddressExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn push_candidate(
    text: &str,
    source_url: &str,
    candidates: &mut Vec<Candidate>,
    seen: &mut HashSet<String>,
) {
    let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        return;
    }
    // Case/whitespace-insensitive dedupe, first occurrence wins.
    if seen.insert(cleaned.to_lowercase()) {
        candidates.push(Candidate {
            raw_text: cleaned,
            source_url: source_url.to_string(),
        });
    }
}

/// Visible text split into lines, with script/style/noscript content
/// dropped and block elements treated as line breaks.
fn visible_text_lines(document: &Html) -> Vec<String> {
    const INLINE_TAGS: &[&str] = &[
        "a", "b", "i", "em", "strong", "span", "small", "u", "abbr", "sup", "sub", "label", "time",
    ];

    let mut text = String::new();
    for node in document.root_element().descendants() {
        match node.value() {
            Node::Text(content) => {
                let hidden = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .is_some_and(|e| matches!(e.name(), "script" | "style" | "noscript"))
                });
                if !hidden {
                    text.push_str(content);
                }
            }
            Node::Element(element) => {
                if !INLINE_TAGS.contains(&element.name()) {
                    text.push('\n');
                }
            }
            _ => {}
        }
    }

    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect()
}

/// Walks a JSON-LD document for postal-address objects and joins their
/// fields in street, locality, region, postal code, country order.
fn collect_structured_addresses(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if map.contains_key("streetAddress") {
                let mut fields = Vec::new();
                for key in [
                    "streetAddress",
                    "addressLocality",
                    "addressRegion",
                    "postalCode",
                    "addressCountry",
                ] {
                    match map.get(key) {
                        Some(Value::String(s)) if !s.trim().is_empty() => {
                            fields.push(s.trim().to_string());
                        }
                        Some(Value::Object(inner)) => {
                            if let Some(Value::String(name)) = inner.get("name") {
                                if !name.trim().is_empty() {
                                    fields.push(name.trim().to_string());
                                }
                            }
                        }
                        _ => {}
                    }
                }
                if !fields.is_empty() {
                    out.push(fields.join(", "));
                }
            }
            for nested in map.values() {
                collect_structured_addresses(nested, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_structured_addresses(item, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com";

    #[test]
    fn test_address_tag_wins() {
        let html = r#"<html><body>
            <address>123 Main St<br>Springfield, IL 62704</address>
            <p>Some unrelated text</p>
        </body></html>"#;

        let candidates = AddressExtractor::new().extract(html, URL);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].raw_text, "123 Main St, Springfield, IL 62704");
        assert_eq!(candidates[0].source_url, URL);
    }

    #[test]
    fn test_json_ld_address() {
        let html = r#"<html><head>
            <script type="application/ld+json">
            {"@type": "Organization", "name": "Acme",
             "address": {"@type": "PostalAddress",
                         "streetAddress": "456 Oak Ave",
                         "addressLocality": "Portland",
                         "addressRegion": "OR",
                         "postalCode": "97205",
                         "addressCountry": "US"}}
            </script>
        </head><body></body></html>"#;

        let candidates = AddressExtractor::new().extract(html, URL);
        assert_eq!(candidates.len(), 1);
        assert_eq!(
            candidates[0].raw_text,
            "456 Oak Ave, Portland, OR, 97205, US"
        );
    }

    #[test]
    fn test_keyword_line_with_label_stripped() {
        let html = r#"<html><body>
            <p><b>Head Office:</b> 500 Oak Ave, Austin, TX 78701</p>
        </body></html>"#;

        let candidates = AddressExtractor::new().extract(html, URL);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].raw_text, "500 Oak Ave, Austin, TX 78701");
    }

    #[test]
    fn test_postal_pattern_line_without_keyword() {
        let html = r#"<html><body>
            <p>77 Elm Rd, Denver, CO 80202</p>
        </body></html>"#;

        let candidates = AddressExtractor::new().extract(html, URL);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].raw_text, "77 Elm Rd, Denver, CO 80202");
    }

    #[test]
    fn test_duplicates_collapse_across_tiers() {
        let html = r#"<html><body>
            <address>123 Main St, Springfield, IL 62704</address>
            <p>Address: 123 main st,   Springfield, IL 62704</p>
        </body></html>"#;

        let candidates = AddressExtractor::new().extract(html, URL);
        assert_eq!(candidates.len(), 1);
        // First occurrence (the structured tag) wins.
        assert_eq!(candidates[0].raw_text, "123 Main St, Springfield, IL 62704");
    }

    #[test]
    fn test_script_and_style_content_is_ignored() {
        let html = r#"<html><body>
            <script>var x = "1 Fake St, Nowhere, ZZ 99999";</script>
            <style>.address { content: "2 Fake Ave, Nowhere, ZZ 99999"; }</style>
            <p>welcome to our site</p>
        </body></html>"#;

        let candidates = AddressExtractor::new().extract(html, URL);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_no_candidates_is_empty_not_error() {
        let candidates =
            AddressExtractor::new().extract("<html><body><p>hello</p></body></html>", URL);
        assert!(candidates.is_empty());
    }
}
