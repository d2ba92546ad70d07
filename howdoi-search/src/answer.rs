//! Answer extraction from a question page.
//!
//! Finds the first answer block on the page (pages are fetched sorted by
//! votes, so this is the top answer), then returns either its first code
//! block or its full rendered text. Code passes through a
//! [`CodeFormatter`], which is how the command line adds syntax
//! highlighting without this crate depending on a highlighter.

use scraper::{ElementRef, Html, Selector};

use crate::engines::parse_selector;
use crate::error::Result;
use crate::render::render;
use crate::types::ExtractedAnswer;

/// Shown when an answer block exists but has no text.
pub const NO_ANSWER_MSG: &str = "< no answer given >";

/// Answer body containers, most specific (classic markup) first.
const BODY_SELECTORS: &[&str] = &[".post-text", ".js-post-body", ".s-prose"];

/// Formats code extracted from an answer before it is displayed.
pub trait CodeFormatter {
    /// Format `code`. `tags` are the question's tags, usable as
    /// language hints.
    fn format_code(&self, code: &str, tags: &[String]) -> String;
}

/// Leaves code untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCode;

impl CodeFormatter for PlainCode {
    fn format_code(&self, code: &str, _tags: &[String]) -> String {
        code.to_owned()
    }
}

/// What to extract from the answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnswerOptions {
    /// Render every element of the answer body instead of the first
    /// code block.
    pub full_text: bool,
}

/// Extract the top answer from a question page.
///
/// Returns `Ok(None)` when the page has no answer block at all. An
/// answer block without text yields [`NO_ANSWER_MSG`].
///
/// # Errors
///
/// Returns [`crate::SearchError::Parse`] only if a built-in selector is
/// invalid.
pub fn extract_answer(
    html: &str,
    options: &AnswerOptions,
    formatter: &dyn CodeFormatter,
) -> Result<Option<ExtractedAnswer>> {
    let document = Html::parse_document(html);

    let answer_sel = parse_selector(".answer")?;
    let Some(answer) = document.select(&answer_sel).next() else {
        tracing::debug!("page has no answer block");
        return Ok(None);
    };

    let tags = extract_tags(&document)?;
    let body = find_body(answer)?;
    let code = find_code(answer)?;

    let text = match (code, options.full_text) {
        (_, true) => body.map(|b| render_full(b, &tags, formatter)).unwrap_or_default(),
        (Some(code), false) => formatter.format_code(&render(code), &tags),
        (None, false) => body.map(render).unwrap_or_default(),
    };

    let text = text.trim();
    let text = if text.is_empty() { NO_ANSWER_MSG } else { text };

    Ok(Some(ExtractedAnswer {
        text: text.to_owned(),
        tags,
    }))
}

/// Tag names attached to the question, in page order.
pub fn extract_tags(document: &Html) -> Result<Vec<String>> {
    let tag_sel = parse_selector(".post-tag")?;
    Ok(document
        .select(&tag_sel)
        .map(|tag| tag.text().collect::<String>().trim().to_owned())
        .filter(|tag| !tag.is_empty())
        .collect())
}

fn find_body(answer: ElementRef<'_>) -> Result<Option<ElementRef<'_>>> {
    for css in BODY_SELECTORS {
        let selector = parse_selector(css)?;
        if let Some(body) = answer.select(&selector).next() {
            return Ok(Some(body));
        }
    }
    Ok(None)
}

fn find_code(answer: ElementRef<'_>) -> Result<Option<ElementRef<'_>>> {
    let pre_sel = parse_selector("pre")?;
    if let Some(pre) = answer.select(&pre_sel).next() {
        return Ok(Some(pre));
    }
    let code_sel: Selector = parse_selector("code")?;
    Ok(answer.select(&code_sel).next())
}

fn render_full(body: ElementRef<'_>, tags: &[String], formatter: &dyn CodeFormatter) -> String {
    body.children()
        .filter_map(ElementRef::wrap)
        .filter_map(|child| {
            let text = render(child);
            if text.is_empty() {
                return None;
            }
            match child.value().name() {
                "pre" | "code" => Some(formatter.format_code(&text, tags)),
                _ => Some(text),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
