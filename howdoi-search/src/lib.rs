//! # howdoi-search
//!
//! Answers programming questions by scraping a search engine scoped to a
//! Q&A site and extracting the top answer from the matching question
//! page.
//!
//! ## Design
//!
//! - Google or Bing results pages are parsed with CSS selectors; no API
//!   keys are needed
//! - Result links are filtered down to question pages, in rank order
//! - The top-voted answer is reduced to its first code block, or to its
//!   full text with hyperlinks kept as `[text](href)`
//! - Responses are cached on disk, keyed by URL, with a configurable TTL
//! - Every fetch goes through [`PageFetcher`], so the pipeline runs
//!   against fixtures in tests
//!
//! ## Security
//!
//! - No API keys or secrets to leak
//! - Search queries are logged only at trace level
//! - Certificate verification is only disabled when explicitly configured

pub mod answer;
pub mod cache;
pub mod config;
pub mod engines;
pub mod error;
pub mod fetch;
pub mod http;
pub mod questions;
pub mod render;
pub mod search;
pub mod types;

pub use answer::{AnswerOptions, CodeFormatter, PlainCode, NO_ANSWER_MSG};
pub use cache::DiskCache;
pub use config::{ProxySettings, SearchConfig};
pub use error::{Result, SearchError};
pub use fetch::PageFetcher;
pub use http::HttpFetcher;
pub use questions::link_at_position;
pub use search::{fetch_answer, find_question_links};
pub use types::{ExtractedAnswer, QuestionLink, SearchEngine};

/// Look up the top answer for `query` over HTTP.
///
/// Convenience wrapper that builds an [`HttpFetcher`] from `config`,
/// takes the first question link and extracts its answer as plain text.
/// Returns `Ok(None)` when no question matches or the question has no
/// answers.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid, and
/// [`SearchError::Connection`] or [`SearchError::Tls`] if the network
/// cannot be used.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> howdoi_search::Result<()> {
/// let config = howdoi_search::SearchConfig::default();
/// if let Some(answer) = howdoi_search::lookup("format date bash", &config).await? {
///     println!("{}", answer.text);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn lookup(query: &str, config: &SearchConfig) -> Result<Option<ExtractedAnswer>> {
    config.validate()?;
    let fetcher = HttpFetcher::new(config)?;
    let links = find_question_links(&fetcher, query, config).await?;
    let Some(link) = links.first() else {
        return Ok(None);
    };
    fetch_answer(&fetcher, link, &AnswerOptions::default(), &PlainCode).await
}
