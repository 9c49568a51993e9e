// src/checker/markdown.rs
// =============================================================================
// This module extracts links from README markdown.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Is fast and memory-efficient (it's a streaming parser)
//
// Unlike a website crawler we keep relative links here ("docs/setup.md",
// "img/logo.png"): the normalizer turns them into github.com blob URLs later.
// READMEs also love raw HTML (badges, centered logos), so HTML chunks are
// handed to the html module to pull out <a href> and <img src>.
// =============================================================================

use pulldown_cmark::{Event, LinkType, Parser, Tag};

use super::html::extract_html_links;

// Extracts every checkable link from markdown text, in document order
//
// Example input:
//   "See [docs](docs/setup.md) and ![logo](https://example.com/logo.png)"
//
// Example output:
//   vec!["docs/setup.md", "https://example.com/logo.png"]
pub fn extract_links(markdown: &str) -> Vec<String> {
    let mut links = Vec::new();

    // Block HTML arrives as one event per line, so a tag that spans several
    // lines only makes sense once the consecutive chunks are joined back up
    let mut html_buffer = String::new();

    for event in Parser::new(markdown) {
        if let Event::Html(html) = &event {
            html_buffer.push_str(html);
            continue;
        }

        flush_html(&mut html_buffer, &mut links);

        match event {
            // Email autolinks (<someone@example.com>) aren't web pages
            Event::Start(Tag::Link(LinkType::Email, _, _)) => {}
            Event::Start(Tag::Link(_link_type, dest_url, _title))
            | Event::Start(Tag::Image(_link_type, dest_url, _title)) => {
                push_link(&mut links, &dest_url);
            }
            _ => {}
        }
    }

    flush_html(&mut html_buffer, &mut links);

    links
}

fn flush_html(buffer: &mut String, links: &mut Vec<String>) {
    if buffer.is_empty() {
        return;
    }
    for link in extract_html_links(buffer) {
        push_link(links, &link);
    }
    buffer.clear();
}

fn push_link(links: &mut Vec<String>, raw: &str) {
    let raw = raw.trim();
    if is_checkable_link(raw) {
        links.push(raw.to_string());
    }
}

// We skip:
// - in-page anchors (#installation)
// - mailto:, tel: and javascript: links
// - empty destinations
fn is_checkable_link(url: &str) -> bool {
    if url.is_empty() || url.starts_with('#') {
        return false;
    }
    let lower = url.to_ascii_lowercase();
    !["mailto:", "tel:", "javascript:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_link() {
        let markdown = "Check out [Rust](https://www.rust-lang.org)!";
        let links = extract_links(markdown);
        assert_eq!(links, vec!["https://www.rust-lang.org"]);
    }

    #[test]
    fn test_extract_multiple_links_in_order() {
        let markdown = r#"
# Resources

- [Rust](https://www.rust-lang.org)
- [Cargo](https://doc.rust-lang.org/cargo/)
- [Setup](docs/setup.md)
        "#;
        let links = extract_links(markdown);
        assert_eq!(
            links,
            vec![
                "https://www.rust-lang.org",
                "https://doc.rust-lang.org/cargo/",
                "docs/setup.md",
            ]
        );
    }

    #[test]
    fn test_keeps_images_and_relative_links() {
        let markdown = "![logo](img/logo.png) and [cdn](//cdn.example.com/a.js)";
        let links = extract_links(markdown);
        assert_eq!(links, vec!["img/logo.png", "//cdn.example.com/a.js"]);
    }

    #[test]
    fn test_reference_links_and_autolinks() {
        let markdown = "See [the book][book] or <https://example.com/auto>.\n\n[book]: https://doc.rust-lang.org/book/\n";
        let links = extract_links(markdown);
        assert_eq!(
            links,
            vec!["https://doc.rust-lang.org/book/", "https://example.com/auto"]
        );
    }

    #[test]
    fn test_skip_mailto_anchor_and_email_autolink() {
        let markdown = "[email](mailto:test@example.com) [top](#top) <test@example.com>";
        let links = extract_links(markdown);
        assert!(links.is_empty());
    }

    #[test]
    fn test_extract_embedded_html() {
        let markdown = r#"<p align="center">
  <a href="https://example.com/site"><img src="assets/banner.png" alt="banner"></a>
</p>

Some text with an inline <a href="https://example.com/inline">link</a>.
"#;
        let links = extract_links(markdown);
        assert_eq!(
            links,
            vec![
                "https://example.com/site",
                "assets/banner.png",
                "https://example.com/inline",
            ]
        );
    }
}
