use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Number of characters of rendered text kept in the snapshot excerpt
pub const EXCERPT_CHARS: usize = 3000;

/// Maximum number of links retained per snapshot
pub const MAX_LINKS: usize = 500;

/// Extracts the page's rendered text content, whitespace-normalized
pub fn page_text(doc: &Html) -> String {
    let content_selector = Selector::parse("body").unwrap();
    doc.select(&content_selector)
        .flat_map(|n| n.text())
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts the document title (empty when the page has none)
pub fn page_title(doc: &Html) -> String {
    let title_selector = Selector::parse("title").unwrap();
    doc.select(&title_selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Collects every anchor's href resolved against the page URL.
///
/// Unparseable hrefs are skipped, any resolved URL carrying a fragment is
/// discarded, duplicates are removed preserving first-seen order, and the
/// result is truncated to the first 500 entries.
pub fn extract_links(doc: &Html, base: &Url) -> Vec<String> {
    let link_selector = Selector::parse("a[href]").unwrap();

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in doc.select(&link_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Ok(resolved) = base.join(href) else {
            // Malformed href must not abort the snapshot
            continue;
        };
        if resolved.fragment().is_some() {
            continue;
        }

        let url = resolved.to_string();
        if seen.insert(url.clone()) {
            links.push(url);
            if links.len() >= MAX_LINKS {
                break;
            }
        }
    }

    ::log::debug!("Extracted {} links", links.len());
    links
}

/// Resolves every anchor href on the page, skipping unparseable ones.
///
/// Unlike [`extract_links`] this keeps duplicates and fragment URLs; the
/// affiliate-pattern rule inspects every anchor, not just the retained set.
pub fn anchor_hrefs(doc: &Html, base: &Url) -> Vec<String> {
    let link_selector = Selector::parse("a[href]").unwrap();
    doc.select(&link_selector)
        .filter_map(|e| e.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .map(|u| u.to_string())
        .collect()
}

/// Looks for an author, trying in order: the author meta tag, JSON-LD
/// structured data, then a list of byline selectors. Malformed JSON-LD
/// blocks and invalid selectors are skipped, never fatal.
pub fn extract_author(doc: &Html, byline_selectors: &[String]) -> Option<String> {
    let meta_selector = Selector::parse(r#"meta[name="author"]"#).unwrap();
    if let Some(element) = doc.select(&meta_selector).next() {
        if let Some(content) = element.value().attr("content") {
            if !content.trim().is_empty() {
                return Some(content.trim().to_string());
            }
        }
    }

    let jsonld_selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
    for script in doc.select(&jsonld_selector) {
        let raw = script.text().collect::<String>();
        let Ok(data) = serde_json::from_str::<serde_json::Value>(&raw) else {
            continue;
        };
        if let Some(name) = data
            .get("author")
            .and_then(|a| a.get("name"))
            .and_then(|n| n.as_str())
        {
            if !name.trim().is_empty() {
                return Some(name.trim().to_string());
            }
        }
    }

    for selector_str in byline_selectors {
        let Ok(selector) = Selector::parse(selector_str) else {
            ::log::warn!("Skipping invalid byline selector: {}", selector_str);
            continue;
        };
        if let Some(element) = doc.select(&selector).next() {
            let text = element.text().collect::<String>();
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }

    None
}

/// First 3000 characters of the page text (fewer if the page is shorter)
pub fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_CHARS).collect()
}
