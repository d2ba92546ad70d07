//! Bing results-page link extraction.
//!
//! Organic results live in `li.b_algo` containers with the title link
//! under an `h2`. Bing sometimes serves XHTML with namespace
//! declarations; the HTML5 parser ignores `xmlns` and places every
//! element in the HTML namespace, so the selectors apply unchanged.

use crate::engines::parse_selector;
use crate::error::Result;
use scraper::Html;

/// Extract result URLs from a Bing results page, in rank order.
///
/// Returns an empty list when the page has no `.b_algo` results.
pub fn extract_links(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);

    let result_sel = parse_selector(".b_algo")?;
    let title_sel = parse_selector("h2")?;
    let link_sel = parse_selector("a")?;

    let mut links = Vec::new();

    for result in document.select(&result_sel) {
        for title in result.select(&title_sel) {
            for anchor in title.select(&link_sel) {
                if let Some(href) = anchor.value().attr("href") {
                    links.push(href.to_owned());
                }
            }
        }
    }

    tracing::debug!(count = links.len(), "Bing links extracted");
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_BING_HTML: &str = r#"<!DOCTYPE html>
<html>
<body>
<ol id="b_results">
<li class="b_algo">
  <h2><a href="https://stackoverflow.com/questions/1401482/yyyy-mm-dd-format-date-in-shell-script" h="ID=SERP">YYYY-MM-DD format date in shell script</a></h2>
  <div class="b_caption"><p>I tried using $(date) in my bash shell script.</p></div>
</li>
<li class="b_ad">
  <h2><a href="https://ads.example.com/click">Sponsored</a></h2>
</li>
<li class="b_algo">
  <h2><a href="https://stackoverflow.com/questions/tagged/date" h="ID=SERP">Newest 'date' Questions</a></h2>
</li>
<li class="b_algo">
  <div class="b_caption"><a href="https://stackoverflow.com/questions/1/no-heading">no heading</a></div>
</li>
<li class="b_algo">
  <h2><a>anchor without href</a></h2>
</li>
</ol>
</body>
</html>"#;

    #[test]
    fn parse_mock_html_returns_links_in_order() {
        let links = extract_links(MOCK_BING_HTML).expect("should parse");
        assert_eq!(
            links,
            vec![
                "https://stackoverflow.com/questions/1401482/yyyy-mm-dd-format-date-in-shell-script",
                "https://stackoverflow.com/questions/tagged/date",
            ]
        );
    }

    #[test]
    fn ads_and_links_outside_headings_are_ignored() {
        let links = extract_links(MOCK_BING_HTML).expect("should parse");
        assert!(links.iter().all(|l| !l.contains("ads.example.com")));
        assert!(links.iter().all(|l| !l.contains("no-heading")));
    }

    #[test]
    fn namespaced_markup_is_handled() {
        let html = r#"<?xml version="1.0" encoding="utf-8"?>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:Web="http://schemas.live.com/Web/">
<body><ol id="b_results">
<li class="b_algo"><h2><a href="https://stackoverflow.com/questions/5/ns">ns</a></h2></li>
</ol></body></html>"#;
        let links = extract_links(html).expect("should parse");
        assert_eq!(links, vec!["https://stackoverflow.com/questions/5/ns"]);
    }

    #[test]
    fn parse_empty_html_returns_empty() {
        let links = extract_links("<html><body></body></html>").expect("should parse");
        assert!(links.is_empty());
    }

    #[test]
    fn garbage_input_returns_empty() {
        let links = extract_links("not html at all <<<").expect("should parse");
        assert!(links.is_empty());
    }

    // ── Fixture-based parser tests ──────────────────────────────────────

    const FIXTURE_BING_HTML: &str = include_str!("../../test-data/bing.html");

    #[test]
    fn fixture_extracts_all_organic_results() {
        let links = extract_links(FIXTURE_BING_HTML).expect("fixture should parse");
        assert_eq!(links.len(), 5, "unexpected links: {links:?}");
        assert!(links[0].contains("/questions/1401482/"));
    }

    #[test]
    fn fixture_contains_non_question_links() {
        let links = extract_links(FIXTURE_BING_HTML).expect("fixture should parse");
        assert!(links.iter().any(|l| l.contains("/questions/tagged/")));
    }
}
