//! Google document link extraction from free-form response text.
//!
//! The search is a plain substring match on the URL prefix. Trailing
//! punctuation stays attached to the token and only the first link is found.

use serde::Serialize;

/// URL prefix marking a Google document link.
pub const GOOGLE_DOCS_PREFIX: &str = "https://docs.google.com";

/// A document link found in a persona's response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocLink {
    /// The token following the prefix, e.g. `/document/d/abc/edit`.
    pub path: String,
}

impl DocLink {
    /// The full document URL.
    pub fn url(&self) -> String {
        format!("{}{}", GOOGLE_DOCS_PREFIX, self.path)
    }
}

/// Extract the first document link from `text`.
///
/// Takes the text between the first occurrence of the prefix and the next
/// one (or the end), and returns its first whitespace-delimited token.
pub fn extract_doc_link(text: &str) -> Option<DocLink> {
    let mut segments = text.split(GOOGLE_DOCS_PREFIX);
    segments.next()?;
    let after = segments.next()?;

    after.split_whitespace().next().map(|token| DocLink {
        path: token.to_string(),
    })
}
