//! Runs one invocation: terminal actions, the lookup and answer assembly.

use std::io::Write;

use howdoi_search::{
    AnswerOptions, CodeFormatter, DiskCache, HttpFetcher, PageFetcher, PlainCode, SearchConfig,
    SearchError, fetch_answer, find_question_links, link_at_position,
};

use crate::cli::Cli;
use crate::error::Result;
use crate::highlight::TerminalHighlighter;
use crate::settings::Settings;

/// Printed when the network cannot be used.
pub const CONNECTION_FAILED_MSG: &str = "Failed to establish network connection\n";

/// Printed when no question or answer matched the query.
pub const NO_RESULTS_MSG: &str = "Sorry, couldn't find any help with that topic\n";

/// Printed after the response cache was cleared.
pub const CACHE_CLEARED_MSG: &str = "Cache cleared successfully";

const TLS_ADVICE: &str = "[ERROR] Encountered an SSL Error. Try using HTTP instead of HTTPS by \
                          setting the environment variable \"HOWDOI_DISABLE_SSL\".";

const STAR_HEADER: char = '\u{2605}';

const SPLITTER_WIDTH: usize = 80;

/// Upper bound on answers assembled for one request. Positions past the
/// last question repeat it, so larger counts only add copies.
pub const MAX_ANSWERS: usize = 100;

/// What to look up and how to present it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub query: String,
    /// 1-based rank of the first question to answer.
    pub pos: usize,
    pub num_answers: usize,
    pub full_text: bool,
    pub link_only: bool,
    pub color: bool,
}

impl Request {
    /// Combine command-line arguments with environment settings.
    pub fn new(cli: &Cli, settings: &Settings) -> Self {
        Self {
            query: normalize_query(&cli.query),
            pos: cli.pos as usize,
            num_answers: cli.num_answers as usize,
            full_text: cli.all,
            link_only: cli.link,
            color: cli.color || settings.colorize,
        }
    }
}

/// Join the query words with spaces and drop question marks.
pub fn normalize_query<S: AsRef<str>>(words: &[S]) -> String {
    words
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
        .replace('?', "")
}

/// Prefix `answer` with a starred header naming its source when
/// `star_headers` is set.
pub fn format_answer(link: &str, answer: &str, star_headers: bool) -> String {
    if star_headers {
        format!("{STAR_HEADER}  Answer from {link} {STAR_HEADER}\n{answer}")
    } else {
        answer.to_owned()
    }
}

/// Look up `request.num_answers` answers starting at `request.pos` and
/// join them with a separator banner.
///
/// Positions past the last question repeat the last question. Questions
/// without answers are skipped. At most [`MAX_ANSWERS`] answers are
/// assembled. Returns `Ok(None)` when nothing was found.
///
/// # Errors
///
/// Propagates fetch and configuration errors.
pub async fn collect_answers<F: PageFetcher>(
    fetcher: &F,
    request: &Request,
    config: &SearchConfig,
) -> std::result::Result<Option<String>, SearchError> {
    let links = find_question_links(fetcher, &request.query, config).await?;
    if links.is_empty() {
        return Ok(None);
    }

    let highlighter;
    let formatter: &dyn CodeFormatter = if request.color {
        highlighter = TerminalHighlighter::new(&request.query);
        &highlighter
    } else {
        &PlainCode
    };
    let options = AnswerOptions {
        full_text: request.full_text,
    };
    let star_headers = request.num_answers > 1 || request.full_text;

    let wanted = request.num_answers.min(MAX_ANSWERS);
    if wanted < request.num_answers {
        tracing::debug!(requested = request.num_answers, wanted, "answer count capped");
    }
    let mut answers = Vec::with_capacity(wanted.min(links.len()));
    for offset in 0..wanted {
        let Some(link) = link_at_position(&links, request.pos.saturating_add(offset)) else {
            continue;
        };
        let mut answer = if request.link_only {
            link.to_string()
        } else {
            match fetch_answer(fetcher, link, &options, formatter).await? {
                Some(extracted) => format_answer(link.as_str(), &extracted.text, star_headers),
                None => continue,
            }
        };
        answer.push('\n');
        answers.push(answer);
    }

    if answers.is_empty() {
        return Ok(None);
    }
    let splitter = format!("\n{}\n\n", "=".repeat(SPLITTER_WIDTH));
    Ok(Some(answers.join(&splitter)))
}

/// Produce the text printed for `request`.
///
/// Network failures and empty results become messages rather than
/// errors. A TLS failure additionally prints advice on stderr.
///
/// # Errors
///
/// Returns any non-network error from [`collect_answers`].
pub async fn howdoi<F: PageFetcher>(
    fetcher: &F,
    request: &Request,
    config: &SearchConfig,
) -> std::result::Result<String, SearchError> {
    match collect_answers(fetcher, request, config).await {
        Ok(Some(output)) => Ok(output),
        Ok(None) => Ok(NO_RESULTS_MSG.to_owned()),
        Err(e) if e.is_network() => {
            tracing::warn!(error = %e, "network unavailable");
            if matches!(e, SearchError::Tls(_)) {
                eprintln!("{TLS_ADVICE}\n");
            }
            Ok(CONNECTION_FAILED_MSG.to_owned())
        }
        Err(e) => Err(e),
    }
}

/// Run one invocation, writing everything meant for the user to `out`.
///
/// # Errors
///
/// Returns an error if the cache cannot be cleared, the lookup fails in
/// an unexpected way, or `out` cannot be written.
pub async fn run<W: Write>(cli: &Cli, settings: &Settings, out: &mut W) -> Result<()> {
    if cli.version {
        writeln!(out, "{}", env!("CARGO_PKG_VERSION"))?;
        return Ok(());
    }

    if cli.clear_cache {
        let removed = DiskCache::clear(&settings.cache_dir)?;
        tracing::debug!(removed, "cache files removed");
        writeln!(out, "{CACHE_CLEARED_MSG}")?;
        return Ok(());
    }

    if cli.query.is_empty() {
        write!(out, "{}", Cli::help_text())?;
        return Ok(());
    }

    let config = settings.search_config();
    let fetcher = HttpFetcher::new(&config)?;
    let request = Request::new(cli, settings);
    tracing::trace!(query = %request.query, "looking up answer");

    let output = howdoi(&fetcher, &request, &config).await?;
    out.write_all(output.as_bytes())?;
    out.flush()?;
    Ok(())
}
