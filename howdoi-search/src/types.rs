//! Core types for search engines, question links and extracted answers.

use std::fmt;

use crate::error::Result;
use crate::questions;

/// Supported search engines that howdoi can scope to the Q&A site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchEngine {
    /// Google, the default engine.
    #[default]
    Google,
    /// Bing, selected with `HOWDOI_SEARCH_ENGINE=bing`.
    Bing,
}

impl SearchEngine {
    /// Returns the lowercase name of this engine, as used in configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Bing => "bing",
        }
    }

    /// Resolve an engine from its configured name.
    ///
    /// Matching is case-insensitive; unknown or empty names fall back to
    /// [`SearchEngine::Google`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "bing" => Self::Bing,
            _ => Self::Google,
        }
    }

    /// Build the results-page URL for `query` restricted to `site`.
    ///
    /// `scheme` is `"https://"` or `"http://"`. The query is
    /// percent-encoded; the `site:` prefix is left readable.
    pub fn search_url(&self, scheme: &str, site: &str, query: &str) -> String {
        let encoded = urlencoding::encode(query);
        match self {
            Self::Google => format!("{scheme}www.google.com/search?q=site:{site}%20{encoded}"),
            Self::Bing => format!("{scheme}www.bing.com/search?q=site:{site}%20{encoded}"),
        }
    }

    /// Extract result links from a results page produced by this engine.
    ///
    /// Returns an empty list when the page has no recognisable results.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SearchError::Parse`] only if a built-in selector is
    /// invalid.
    pub fn extract_links(&self, html: &str) -> Result<Vec<String>> {
        match self {
            Self::Google => crate::engines::google::extract_links(html),
            Self::Bing => crate::engines::bing::extract_links(html),
        }
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A URL identifying a single question page on the Q&A site.
///
/// Can only be built from a URL whose path contains
/// `questions/<numeric-id>/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuestionLink(String);

impl QuestionLink {
    /// Wrap `url` if it points at a question page.
    pub fn parse(url: &str) -> Option<Self> {
        questions::is_question(url).then(|| Self(url.to_owned()))
    }

    /// The underlying URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The URL of this question with answers sorted by votes, so the
    /// first answer block on the page is the top one.
    pub fn votes_url(&self) -> String {
        format!("{}?answertab=votes", self.0)
    }
}

impl fmt::Display for QuestionLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The displayable result of extracting a question page's top answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedAnswer {
    /// Rendered answer text, trimmed at both ends.
    pub text: String,
    /// Tag names attached to the question, used as highlighting hints.
    pub tags: Vec<String>,
}
