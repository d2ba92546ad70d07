//! Search engine link extraction rules.
//!
//! Each module turns one engine's HTML results page into an ordered list
//! of result URLs. Dispatch happens through
//! [`crate::types::SearchEngine::extract_links`].

pub mod bing;
pub mod google;

use crate::error::{Result, SearchError};
use scraper::Selector;

/// Parse a built-in CSS selector, mapping failures to [`SearchError::Parse`].
pub(crate) fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("invalid selector {css:?}: {e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_selector_parses() {
        assert!(parse_selector(".b_algo h2 a").is_ok());
    }

    #[test]
    fn invalid_selector_is_parse_error() {
        let err = parse_selector("a[").unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
        assert!(err.to_string().contains("a["));
    }
}
