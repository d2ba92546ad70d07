//! Terminal syntax highlighting for code answers.
//!
//! The language is guessed from the query words, then the question's
//! tags, then the first line of the code. Versioned tags such as
//! `python-3.x` fall back to their base name, and a few common tag
//! spellings are mapped to syntax tokens. The first-line check only
//! recognises shebang and editor modelines, so a snippet with no
//! language word in the query or tags stays plain. Code whose language
//! cannot be found is printed unchanged.

use std::sync::OnceLock;

use howdoi_search::CodeFormatter;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::{LinesWithEndings, as_24_bit_terminal_escaped};

const THEME: &str = "base16-ocean.dark";

/// Tag spellings that name a language without matching a syntax token.
const TAG_ALIASES: &[(&str, &str)] = &[
    ("shell", "sh"),
    ("golang", "go"),
    ("node.js", "js"),
    ("nodejs", "js"),
    ("ecmascript", "js"),
    ("python3", "py"),
];

/// Resets terminal colors after highlighted output.
const RESET: &str = "\x1b[0m";

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAXES: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAXES.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    static THEMES: OnceLock<ThemeSet> = OnceLock::new();
    THEMES.get_or_init(ThemeSet::load_defaults)
}

/// Highlights code with 24-bit terminal color escapes.
#[derive(Debug, Clone, Default)]
pub struct TerminalHighlighter {
    keywords: Vec<String>,
}

impl TerminalHighlighter {
    /// A highlighter that uses the words of `query` as language hints.
    pub fn new(query: &str) -> Self {
        Self {
            keywords: query.split_whitespace().map(str::to_owned).collect(),
        }
    }

    /// Highlight `code`, or `None` when no syntax matches.
    pub fn highlight(&self, code: &str, tags: &[String]) -> Option<String> {
        let syntaxes = syntax_set();
        let syntax = self.find_syntax(syntaxes, code, tags)?;
        let theme = theme_set().themes.get(THEME)?;
        tracing::debug!(syntax = %syntax.name, "highlighting code");

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut out = String::with_capacity(code.len() * 4);
        for line in LinesWithEndings::from(code) {
            let ranges = match highlighter.highlight_line(line, syntaxes) {
                Ok(ranges) => ranges,
                Err(e) => {
                    tracing::debug!(error = %e, "highlighting failed, printing plain code");
                    return None;
                }
            };
            out.push_str(&as_24_bit_terminal_escaped(&ranges, false));
        }
        out.push_str(RESET);
        Some(out)
    }

    fn find_syntax<'a>(
        &self,
        syntaxes: &'a SyntaxSet,
        code: &str,
        tags: &[String],
    ) -> Option<&'a SyntaxReference> {
        self.keywords
            .iter()
            .chain(tags)
            .find_map(|hint| {
                hint_tokens(hint).find_map(|token| syntaxes.find_syntax_by_token(token))
            })
            .or_else(|| {
                code.lines()
                    .next()
                    .and_then(|line| syntaxes.find_syntax_by_first_line(line))
            })
    }
}

/// Tokens to try for one hint: the hint itself, then its base name when
/// it carries a version suffix.
fn hint_tokens(hint: &str) -> impl Iterator<Item = &str> {
    let base = hint
        .split_once('-')
        .map(|(base, _)| base)
        .filter(|base| !base.is_empty());
    std::iter::once(hint).chain(base).map(|token| {
        TAG_ALIASES
            .iter()
            .find(|(tag, _)| tag.eq_ignore_ascii_case(token))
            .map_or(token, |(_, alias)| *alias)
    })
}

impl CodeFormatter for TerminalHighlighter {
    fn format_code(&self, code: &str, tags: &[String]) -> String {
        self.highlight(code, tags)
            .unwrap_or_else(|| code.to_owned())
    }
}
