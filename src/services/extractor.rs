// src/services/extractor.rs

//! HTML link extraction.
//!
//! Pure function over page bytes: no I/O, never fails. An unparseable
//! document simply yields no links.

use std::collections::HashMap;

use scraper::{Html, Selector};
use url::Url;

/// Signature of the link-extraction function consumed by workers.
pub type Extractor = fn(&Url, &[u8]) -> HashMap<String, usize>;

const HREF_SELECTOR: &str = "a[href]";

/// Extract all outbound links from a page.
///
/// Returns a mapping from absolute URL string to the number of anchors
/// on the page resolving to that URL. Fragment-only references and
/// references that fail to resolve against the page URL are dropped.
pub fn extract_links(base: &Url, page: &[u8]) -> HashMap<String, usize> {
    let html = String::from_utf8_lossy(page);
    let document = Html::parse_document(&html);
    let anchors = Selector::parse(HREF_SELECTOR).expect("static selector");

    let mut links: HashMap<String, usize> = HashMap::new();
    for element in document.select(&anchors) {
        if let Some(href) = element.value().attr("href") {
            if let Some(resolved) = resolve_href(base, href) {
                *links.entry(resolved).or_insert(0) += 1;
            }
        }
    }
    links
}

/// Resolve a single href against the page URL.
///
/// Empty values and `#` fragments point back at the page being processed
/// and are ignored.
fn resolve_href(base: &Url, href: &str) -> Option<String> {
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    base.join(href).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://google.com/").unwrap()
    }

    #[test]
    fn test_extract_absolute_and_relative() {
        let page = br#"<html><body>
            <a href="http://google.com/1">one</a>
            <a href="/2">two</a>
            <a href="sub/3">three</a>
        </body></html>"#;

        let links = extract_links(&base(), page);
        assert_eq!(links.get("http://google.com/1"), Some(&1));
        assert_eq!(links.get("http://google.com/2"), Some(&1));
        assert_eq!(links.get("http://google.com/sub/3"), Some(&1));
        assert_eq!(links.len(), 3);
    }

    #[test]
    fn test_extract_counts_repeated_links() {
        let page = br#"<a href="/1">a</a><a href="/1">b</a><a href="/1">c</a>"#;
        let links = extract_links(&base(), page);
        assert_eq!(links.get("http://google.com/1"), Some(&3));
    }

    #[test]
    fn test_extract_drops_fragments_and_empty() {
        let page = br##"<a href="#section">a</a><a href="">b</a><a href="/keep">c</a>"##;
        let links = extract_links(&base(), page);
        assert_eq!(links.len(), 1);
        assert!(links.contains_key("http://google.com/keep"));
    }

    #[test]
    fn test_extract_ignores_anchors_without_href() {
        let page = br#"<a name="top">a</a><a href="/1">b</a>"#;
        let links = extract_links(&base(), page);
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_extract_garbage_yields_empty() {
        let links = extract_links(&base(), &[0xff, 0xfe, 0x00, 0x01]);
        assert!(links.is_empty());
    }

    #[test]
    fn test_extract_query_propagation() {
        let page = br#"<a href="?page=2">next</a>"#;
        let base = Url::parse("http://google.com/list").unwrap();
        let links = extract_links(&base, page);
        assert!(links.contains_key("http://google.com/list?page=2"));
    }
}
