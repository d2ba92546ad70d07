//! The lookup pipeline: search page to question links, question page to
//! answer.
//!
//! Both steps are strictly sequential and go through a [`PageFetcher`],
//! so they run unchanged against the network or against fixture pages.

use crate::answer::{extract_answer, AnswerOptions, CodeFormatter};
use crate::config::SearchConfig;
use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::questions::question_links;
use crate::types::{ExtractedAnswer, QuestionLink};

/// Search for `query` and return the question links among the results,
/// in rank order.
///
/// An empty list means the engine found nothing usable (including
/// blocked or unrecognisable results pages).
///
/// # Errors
///
/// Returns [`crate::SearchError::Config`] if `config` is invalid, or the
/// fetcher's error if the results page cannot be retrieved.
pub async fn find_question_links<F: PageFetcher>(
    fetcher: &F,
    query: &str,
    config: &SearchConfig,
) -> Result<Vec<QuestionLink>> {
    config.validate()?;

    let url = config.search_url(query);
    tracing::trace!(engine = %config.engine, %url, "searching");
    let page = fetcher.fetch(&url).await?;

    let links = config.engine.extract_links(&page)?;
    let questions = question_links(&links);
    tracing::debug!(
        results = links.len(),
        questions = questions.len(),
        "search results filtered"
    );
    Ok(questions)
}

/// Fetch a question page sorted by votes and extract its top answer.
///
/// Returns `Ok(None)` when the page has no answers.
///
/// # Errors
///
/// Returns the fetcher's error if the page cannot be retrieved.
pub async fn fetch_answer<F: PageFetcher>(
    fetcher: &F,
    link: &QuestionLink,
    options: &AnswerOptions,
    formatter: &dyn CodeFormatter,
) -> Result<Option<ExtractedAnswer>> {
    let page = fetcher.fetch(&link.votes_url()).await?;
    let answer = extract_answer(&page, options, formatter)?;
    if answer.is_none() {
        tracing::debug!(%link, "question has no answers");
    }
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::PlainCode;
    use crate::error::SearchError;
    use crate::types::SearchEngine;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves fixed pages and records every requested URL.
    #[derive(Default)]
    struct RecordingFetcher {
        pages: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl RecordingFetcher {
        fn with_page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_owned(), body.to_owned());
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().map(|r| r.clone()).unwrap_or_default()
        }
    }

    impl PageFetcher for RecordingFetcher {
        async fn fetch(&self, url: &str) -> std::result::Result<String, SearchError> {
            if let Ok(mut requested) = self.requested.lock() {
                requested.push(url.to_owned());
            }
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| SearchError::Connection(format!("unreachable: {url}")))
        }
    }

    const BING_HTML: &str = include_str!("../test-data/bing.html");
    const QUESTION_HTML: &str = include_str!("../test-data/question.html");

    fn bing_config() -> SearchConfig {
        SearchConfig {
            engine: SearchEngine::Bing,
            cache_enabled: false,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn question_links_are_filtered_from_results() {
        let config = bing_config();
        let fetcher =
            RecordingFetcher::default().with_page(&config.search_url("format date bash"), BING_HTML);

        let links = find_question_links(&fetcher, "format date bash", &config)
            .await
            .expect("should search");

        assert_eq!(links.len(), 3);
        assert!(links[0].as_str().contains("/questions/1401482/"));
        assert!(links.iter().all(|l| !l.as_str().contains("/tagged/")));
        assert_eq!(
            fetcher.requested(),
            vec!["https://www.bing.com/search?q=site:stackoverflow.com%20format%20date%20bash"]
        );
    }

    #[tokio::test]
    async fn invalid_config_fails_before_fetching() {
        let config = SearchConfig {
            site: String::new(),
            ..bing_config()
        };
        let fetcher = RecordingFetcher::default();
        let err = find_question_links(&fetcher, "tar", &config).await.unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
        assert!(fetcher.requested().is_empty());
    }

    #[tokio::test]
    async fn fetch_errors_propagate() {
        let fetcher = RecordingFetcher::default();
        let err = find_question_links(&fetcher, "tar", &bing_config())
            .await
            .unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn blocked_results_page_yields_no_links() {
        let config = bing_config();
        let fetcher = RecordingFetcher::default()
            .with_page(&config.search_url("tar"), "<html><body>captcha</body></html>");
        let links = find_question_links(&fetcher, "tar", &config)
            .await
            .expect("should search");
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn answer_is_fetched_sorted_by_votes() {
        let link = QuestionLink::parse("https://stackoverflow.com/questions/1401482/yyyy-mm-dd")
            .expect("question link");
        let fetcher = RecordingFetcher::default().with_page(
            "https://stackoverflow.com/questions/1401482/yyyy-mm-dd?answertab=votes",
            QUESTION_HTML,
        );

        let answer = fetch_answer(&fetcher, &link, &AnswerOptions::default(), &PlainCode)
            .await
            .expect("should fetch")
            .expect("answer present");
        assert!(answer.text.starts_with("# put current date"));
        assert_eq!(fetcher.requested().len(), 1);
    }

    #[tokio::test]
    async fn unanswered_question_yields_none() {
        let link = QuestionLink::parse("https://stackoverflow.com/questions/9/unanswered")
            .expect("question link");
        let fetcher = RecordingFetcher::default().with_page(
            &link.votes_url(),
            include_str!("../test-data/question_unanswered.html"),
        );
        let answer = fetch_answer(&fetcher, &link, &AnswerOptions::default(), &PlainCode)
            .await
            .expect("should fetch");
        assert!(answer.is_none());
    }
}
