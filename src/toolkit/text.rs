//! Markup cleanup shared by the HTML and Atom parsers.

use regex::Regex;
use std::sync::OnceLock;

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("Invalid regex"))
}

fn whitespace_regex() -> &'static Regex {
    static WS: OnceLock<Regex> = OnceLock::new();
    WS.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex"))
}

/// Decode the handful of entities search pages and feeds actually use.
pub fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Strip tags, decode entities and collapse whitespace.
pub fn clean(markup: &str) -> String {
    let without_tags = tag_regex().replace_all(markup, "");
    let decoded = decode_entities(&without_tags);
    whitespace_regex().replace_all(decoded.trim(), " ").into_owned()
}
