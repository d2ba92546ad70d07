//! Google results-page link extraction.
//!
//! Google has changed its result markup several times. The rules are
//! tried in order and the first one yielding links wins:
//!
//! 1. anchors with the `l` class (classic layout),
//! 2. anchors inside `.r` result headings,
//! 3. anchors inside `.yuRUbf` result blocks or `/url?q=` redirect
//!    anchors (the no-JavaScript layout).
//!
//! Redirect links of the form `/url?q=<target>&sa=...` are unwrapped to
//! the target URL.

use crate::engines::parse_selector;
use crate::error::Result;
use scraper::{Html, Selector};
use url::Url;

/// Base used to resolve Google's relative redirect links.
const GOOGLE_BASE: &str = "https://www.google.com/";

/// Extract result URLs from a Google results page, in rank order.
///
/// Returns an empty list when no rule matches.
pub fn extract_links(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);

    let rules = [
        parse_selector("a.l")?,
        parse_selector(".r a")?,
        parse_selector(r#".yuRUbf a, a[href^="/url?q="]"#)?,
    ];

    for (rule, selector) in rules.iter().enumerate() {
        let links = collect_hrefs(&document, selector);
        if !links.is_empty() {
            tracing::debug!(rule, count = links.len(), "Google links extracted");
            return Ok(links);
        }
    }

    tracing::debug!("no Google result links found");
    Ok(Vec::new())
}

fn collect_hrefs(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(unwrap_redirect)
        .collect()
}

/// Resolve Google's `/url?q=` redirect wrapper to the real target.
///
/// Hrefs that are not redirects are returned unchanged. A redirect
/// without a usable `q` parameter yields `None`.
fn unwrap_redirect(href: &str) -> Option<String> {
    let is_redirect = href.starts_with("/url?")
        || href.starts_with("https://www.google.com/url?")
        || href.starts_with("http://www.google.com/url?");
    if !is_redirect {
        return Some(href.to_owned());
    }

    let base = Url::parse(GOOGLE_BASE).ok()?;
    let parsed = base.join(href).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "q" || key == "url")
        .map(|(_, value)| value.into_owned())
        .filter(|target| target.starts_with("http://") || target.starts_with("https://"))
}
