//! Title and link extraction from markdown bodies.

use std::sync::LazyLock;

use pulldown_cmark::{Event, Options, Parser, Tag};
use regex::Regex;

static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());

/// Text of the first H1 heading.
pub(crate) fn extract_title(body: &str) -> Option<String> {
    let caps = H1_RE.captures(body)?;
    let title = caps[1].trim();
    (!title.is_empty()).then(|| title.to_owned())
}

/// Link destinations in document order.
///
/// Links inside code blocks and inline code are not links and are skipped
/// by the parser.
pub(crate) fn extract_links(body: &str) -> Vec<String> {
    Parser::new_ext(body, Options::ENABLE_TABLES | Options::ENABLE_GFM)
        .filter_map(|event| match event {
            Event::Start(Tag::Link { dest_url, .. }) => Some(dest_url.into_string()),
            _ => None,
        })
        .collect()
}

/// Convert a slug (kebab-case or `snake_case`) to title case.
pub(crate) fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_title() {
        assert_eq!(
            extract_title("Intro text\n\n# Getting Started \n\n## Install"),
            Some("Getting Started".to_owned())
        );
        assert_eq!(extract_title("## Only H2"), None);
        assert_eq!(extract_title(""), None);
    }

    #[test]
    fn test_extract_links_in_order() {
        let body = "See [objects](type-definitions/object.md) and \
                    [the repo](https://github.com/shreyas44/groot).\n\n\
                    [Relay][relay]\n\n[relay]: ./relay.md#connections\n";

        assert_eq!(
            extract_links(body),
            vec![
                "type-definitions/object.md",
                "https://github.com/shreyas44/groot",
                "./relay.md#connections",
            ]
        );
    }

    #[test]
    fn test_extract_links_skips_code() {
        let body = "`[not](a.md)`\n\n```\n[also not](b.md)\n```\n\n[yes](c.md)";

        assert_eq!(extract_links(body), vec!["c.md"]);
    }

    #[test]
    fn test_titlecase_from_slug() {
        assert_eq!(titlecase_from_slug("getting-started"), "Getting Started");
        assert_eq!(titlecase_from_slug("input_object"), "Input Object");
        assert_eq!(titlecase_from_slug("relay"), "Relay");
        assert_eq!(titlecase_from_slug(""), "");
    }
}
