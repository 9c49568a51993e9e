// src/checker/html.rs
// =============================================================================
// This module extracts links from HTML embedded in a README.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// The HTML we get is a fragment (a <p> wrapping a logo, a badge row...),
// not a full page, and links are returned raw. Resolving relative ones is
// the normalizer's job because it knows which repository they belong to.
// =============================================================================

use scraper::{Html, Selector};

// <a href="..."> and <img src="..."> are the only elements READMEs use
// for things worth checking
const LINK_SELECTOR: &str = "a[href], img[src]";

// Returns the raw href/src values in document order
//
// Example:
//   html = r#"<a href="/docs"><img src="logo.png"></a>"#
//   result = ["/docs", "logo.png"]
pub fn extract_html_links(html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(html);

    // LINK_SELECTOR is a constant, this only fails if someone breaks it
    let Ok(selector) = Selector::parse(LINK_SELECTOR) else {
        return Vec::new();
    };

    fragment
        .select(&selector)
        .filter_map(|element| {
            let value = element.value();
            value.attr("href").or_else(|| value.attr("src"))
        })
        .map(|link| link.trim().to_string())
        .filter(|link| !link.is_empty())
        .collect()
}
