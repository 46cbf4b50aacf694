//! DuckDuckGo Instant Answer response → [`WebHit`]s.
//!
//! The API returns instant answers rather than a ranked listing: an
//! abstract, an optional answer and a list of related topics (some nested
//! in groups). The abstract comes first, then topics in API order.

use scholar_domain::WebHit;
use serde_json::Value;

pub(super) fn collect_hits(data: &Value, limit: usize) -> Vec<WebHit> {
    let mut hits = Vec::new();

    if let Some(abstract_text) = non_empty(&data["AbstractText"]) {
        let source = non_empty(&data["AbstractSource"]).unwrap_or("DuckDuckGo");
        hits.push(WebHit {
            title: non_empty(&data["Heading"]).unwrap_or(source).to_string(),
            url: non_empty(&data["AbstractURL"]).unwrap_or_default().to_string(),
            snippet: abstract_text.to_string(),
        });
    }

    if let Some(answer) = non_empty(&data["Answer"]) {
        hits.push(WebHit {
            title: "Instant answer".to_string(),
            url: String::new(),
            snippet: answer.to_string(),
        });
    }

    if let Some(topics) = data["RelatedTopics"].as_array() {
        for topic in topics {
            match topic["Topics"].as_array() {
                Some(group) => hits.extend(group.iter().filter_map(topic_hit)),
                None => hits.extend(topic_hit(topic)),
            }
        }
    }

    hits.truncate(limit);
    hits
}

fn topic_hit(topic: &Value) -> Option<WebHit> {
    let text = non_empty(&topic["Text"])?;
    let url = non_empty(&topic["FirstURL"]).unwrap_or_default();
    let title = text.split(" - ").next().unwrap_or(text);
    Some(WebHit {
        title: title.to_string(),
        url: url.to_string(),
        snippet: text.to_string(),
    })
}

fn non_empty(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}
