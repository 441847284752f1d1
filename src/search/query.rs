use std::collections::BTreeSet;
use std::fmt::Display;

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Query that matches every bookmark.
pub const WILDCARD: &str = "*";

static LEADING_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i-u)^#([a-z0-9:_()]+)\s*").expect("valid tag prefix regex"));

/// A parsed search: the tags every result must carry plus the free text
/// its message must contain.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub tags: BTreeSet<String>,
    pub text: String,
}

impl SearchQuery {
    /// Adds space separated tag names, as typed in a dedicated tags option.
    pub fn with_tags<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.tags.extend(
            names
                .into_iter()
                .map(|name| name.trim().trim_start_matches('#').to_lowercase())
                .filter(|name| !name.is_empty()),
        );
        self
    }

    pub fn is_wildcard(&self) -> bool {
        self.tags.is_empty() && self.text.is_empty()
    }

    /// Lowercased text used for the substring match.
    pub fn needle(&self) -> String {
        self.text.to_lowercase()
    }
}

/// Renders the query in the prefix syntax accepted by [`parse_tag_prefixes`].
impl Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_wildcard() {
            return write!(f, "{}", WILDCARD);
        }
        let rendered = self
            .tags
            .iter()
            .map(|t| format!("#{}", t))
            .chain((!self.text.is_empty()).then(|| self.text.clone()))
            .join(" ");
        write!(f, "{}", rendered)
    }
}

/// Strips every leading `#tag` token off `raw`.
///
/// Tag names are matched case-insensitively and collected lowercased. Whatever
/// follows the last leading tag is the residual text; `*` alone is the same as
/// no text at all.
pub fn parse_tag_prefixes(raw: &str) -> SearchQuery {
    let mut tags = BTreeSet::new();
    let mut rest = raw.trim();
    while let Some(caps) = LEADING_TAG.captures(rest) {
        tags.insert(caps[1].to_lowercase());
        rest = &rest[caps[0].len()..];
    }

    let rest = rest.trim();
    let text = if rest == WILDCARD { "" } else { rest };
    let query = SearchQuery {
        tags,
        text: text.to_string(),
    };
    debug!(?raw, ?query, "parsed tag prefixes");
    query
}

#[cfg(test)]
mod test {
    use super::*;
    use tracing::info;

    fn tags(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_tag_prefixes() {
        for (raw, expect_tags, expect_text) in [
            ("#foo #bar hello world", tags(&["foo", "bar"]), "hello world"),
            ("*", tags(&[]), ""),
            ("", tags(&[]), ""),
            ("   ", tags(&[]), ""),
            ("hello", tags(&[]), "hello"),
            ("#foo", tags(&["foo"]), ""),
            ("#foo *", tags(&["foo"]), ""),
            ("#FOO #Bar", tags(&["foo", "bar"]), ""),
            ("#foo #foo text", tags(&["foo"]), "text"),
            ("#foo#bar text", tags(&["foo", "bar"]), "text"),
            ("#has:attachment cat", tags(&["has:attachment"]), "cat"),
            ("#list(1) items", tags(&["list(1)"]), "items"),
            ("hello #foo", tags(&[]), "hello #foo"),
            ("# foo", tags(&[]), "# foo"),
            ("  #a\n#b  some  text ", tags(&["a", "b"]), "some  text"),
            ("#\u{212A}elvin", tags(&[]), "#\u{212A}elvin"),
            ("#\u{17F}un", tags(&[]), "#\u{17F}un"),
        ] {
            let query = parse_tag_prefixes(raw);
            info!(?raw, ?query, "testing parse tag prefixes");
            assert_eq!(query.tags, expect_tags, "tags of {:?}", raw);
            assert_eq!(query.text, expect_text, "text of {:?}", raw);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(SearchQuery::default().to_string(), "*");
        assert_eq!(parse_tag_prefixes("*").to_string(), "*");
        assert_eq!(parse_tag_prefixes("#b #a hello").to_string(), "#a #b hello");
        assert_eq!(parse_tag_prefixes("#a").to_string(), "#a");
        assert_eq!(parse_tag_prefixes("Hello World").to_string(), "Hello World");
    }

    #[test]
    fn rendered_query_parses_back() {
        let query = parse_tag_prefixes("dogs").with_tags("pets  #Cute ".split(' '));
        assert_eq!(query.tags, tags(&["pets", "cute"]));

        let rendered = query.to_string();
        assert_eq!(rendered, "#cute #pets dogs");
        assert_eq!(parse_tag_prefixes(&rendered), query);
    }

    #[test]
    fn test_needle() {
        let query = parse_tag_prefixes("#x Hello");
        assert_eq!(query.needle(), "hello");
        assert!(!query.is_wildcard());
        assert!(parse_tag_prefixes(" * ").is_wildcard());
    }
}
