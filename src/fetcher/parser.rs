//! HTML parser for extracting words and links
//!
//! This module turns an HTML document into a [`ParsedPage`]:
//! - Words from the visible body text
//! - Links to follow (from <a> tags), resolved to absolute URLs

use crate::fetcher::ParsedPage;
use crate::pattern::PatternSet;
use scraper::{Html, Node, Selector};
use url::Url;

/// Elements whose text content is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Parses HTML content into words and links
///
/// # Word Extraction Rules
///
/// - Only text inside `<body>` is considered; `<script>`, `<style>`,
///   `<noscript>` and `<template>` contents are skipped
/// - Text is split on whitespace, then each piece is passed through
///   [`sanitize_word`]
/// - Empty results and words fully matching an `ignored_words` pattern are
///   dropped
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags, resolved against `base_url`
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links
/// - Anything that does not resolve to `http`, `https` or `file`
///
/// Duplicate links are kept; deduplication happens in the crawl engine.
///
/// # Example
///
/// ```
/// use ripple_count::fetcher::parse_page;
/// use ripple_count::pattern::PatternSet;
/// use url::Url;
///
/// let html = r#"<html><body>Hello, hello <a href="/next">World</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = parse_page(html, &base_url, &PatternSet::default());
/// assert_eq!(page.words, vec!["hello", "hello", "world"]);
/// assert_eq!(page.links, vec!["https://example.com/next"]);
/// ```
pub fn parse_page(html: &str, base_url: &Url, ignored_words: &PatternSet) -> ParsedPage {
    let document = Html::parse_document(html);

    let words = extract_text(&document)
        .split_whitespace()
        .map(sanitize_word)
        .filter(|word| !word.is_empty() && !ignored_words.matches(word))
        .collect();

    let links = extract_links(&document, base_url);

    ParsedPage { words, links }
}

/// Strips every non-alphanumeric character and lowercases the rest
///
/// ```
/// use ripple_count::fetcher::sanitize_word;
///
/// assert_eq!(sanitize_word("Don't!"), "dont");
/// assert_eq!(sanitize_word("--"), "");
/// ```
pub fn sanitize_word(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Collects the visible text of the document body
fn extract_text(document: &Html) -> String {
    let mut text = String::new();

    let body = match Selector::parse("body") {
        Ok(selector) => document.select(&selector).next(),
        Err(_) => None,
    };
    let root = match body {
        Some(body) => *body,
        None => document.tree.root(),
    };

    for node in root.descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|el| HIDDEN_ELEMENTS.contains(&el.name()))
                .unwrap_or(false)
        });
        if hidden {
            continue;
        }

        text.push_str(fragment);
        // Adjacent text nodes from different elements are separate words
        text.push(' ');
    }

    text
}

/// Extracts all valid links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Schemes other than http, https and file after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => match absolute_url.scheme() {
            "http" | "https" | "file" => Some(absolute_url.to_string()),
            _ => None,
        },
        Err(_) => None,
    }
}
