//! Page fetching helpers: HTML → readable text.

use scholar_domain::WebPage;

/// Build a [`WebPage`] from a fetched body.
///
/// HTML is reduced to text; any other content type is passed through with
/// whitespace normalised.
pub(super) fn to_page(url: &str, content_type: &str, body: &str) -> WebPage {
    let is_html = content_type.contains("text/html")
        || content_type.contains("application/xhtml")
        || body.trim_start().starts_with("<!")
        || body.trim_start().starts_with("<html");

    if is_html {
        WebPage {
            url: url.to_string(),
            title: html_title(body),
            text: html_to_text(body),
        }
    } else {
        WebPage {
            url: url.to_string(),
            title: None,
            text: clean_whitespace(body),
        }
    }
}

fn html_title(html: &str) -> Option<String> {
    use scraper::{Html, Selector};

    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    let title = document.select(&selector).next()?.text().collect::<String>();
    let title = clean_whitespace(&title);
    (!title.is_empty()).then_some(title)
}

/// Extract readable text from HTML, dropping scripts, styles and other
/// non-content subtrees.
pub fn html_to_text(html: &str) -> String {
    use scraper::{Html, Selector};

    const SKIP_TAGS: [&str; 6] = ["script", "style", "noscript", "svg", "nav", "footer"];

    let document = Html::parse_document(html);
    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next());
    let root = body.unwrap_or_else(|| document.root_element());

    clean_whitespace(&collect_element_text(root, &SKIP_TAGS).join(" "))
}

fn collect_element_text(element: scraper::ElementRef, skip_tags: &[&str]) -> Vec<String> {
    if skip_tags.contains(&element.value().name()) {
        return Vec::new();
    }

    let mut parts = Vec::new();
    for child in element.children() {
        match child.value() {
            scraper::Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    parts.push(t.to_string());
                }
            }
            scraper::Node::Element(_) => {
                if let Some(child_el) = scraper::ElementRef::wrap(child) {
                    parts.extend(collect_element_text(child_el, skip_tags));
                }
            }
            _ => {}
        }
    }
    parts
}

/// Collapse runs of spaces and keep at most two consecutive newlines.
fn clean_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_whitespace = false;
    let mut newline_count = 0;

    for ch in text.chars() {
        if ch == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                result.push('\n');
            }
            prev_was_whitespace = true;
        } else if ch.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
            }
            prev_was_whitespace = true;
            newline_count = 0;
        } else {
            result.push(ch);
            prev_was_whitespace = false;
            newline_count = 0;
        }
    }

    result.trim().to_string()
}
