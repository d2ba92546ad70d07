//! Question filter and result-rank navigation.
//!
//! Search results scoped to a Q&A site still contain tag listings, ads
//! and profile pages. Only `questions/<numeric-id>/` URLs lead to a page
//! with an answer block.

use regex::Regex;
use std::sync::OnceLock;

use crate::types::QuestionLink;

static QUESTION_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

/// Whether `link` points at a single question page.
pub fn is_question(link: &str) -> bool {
    QUESTION_PATTERN
        .get_or_init(|| Regex::new(r"questions/\d+/").ok())
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(link))
}

/// Keep only question-page URLs, preserving their order.
pub fn filter_questions<S: AsRef<str>>(links: &[S]) -> Vec<String> {
    links
        .iter()
        .map(AsRef::as_ref)
        .filter(|link| is_question(link))
        .map(str::to_owned)
        .collect()
}

/// Like [`filter_questions`] but yields validated [`QuestionLink`]s.
pub fn question_links<S: AsRef<str>>(links: &[S]) -> Vec<QuestionLink> {
    links
        .iter()
        .filter_map(|link| QuestionLink::parse(link.as_ref()))
        .collect()
}

/// Select the link at 1-based `position`.
///
/// Positions past the end clamp to the last link; an empty list yields
/// `None`. Position 0 is treated like position 1.
pub fn link_at_position<T>(links: &[T], position: usize) -> Option<&T> {
    let index = position.max(1) - 1;
    links.get(index).or_else(|| links.last())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_keeps_only_question_pages() {
        let links = [
            "https://stackoverflow.com/questions/tagged/cat",
            "http://rads.stackoverflow.com/amzn/click/B007KAZ166",
            "https://stackoverflow.com/questions/40108569/how-to-get-the-last-line-of-a-file-using-cat-command",
        ];
        assert_eq!(
            filter_questions(&links),
            vec!["https://stackoverflow.com/questions/40108569/how-to-get-the-last-line-of-a-file-using-cat-command"]
        );
    }

    #[test]
    fn filter_preserves_order() {
        let links = vec![
            "https://stackoverflow.com/questions/2/b".to_string(),
            "https://stackoverflow.com/users/1/someone".to_string(),
            "https://stackoverflow.com/questions/1/a".to_string(),
        ];
        let filtered = filter_questions(&links);
        assert_eq!(filtered.len(), 2);
        assert!(filtered[0].contains("questions/2/"));
        assert!(filtered[1].contains("questions/1/"));
    }

    #[test]
    fn filter_empty_input() {
        let links: Vec<String> = vec![];
        assert!(filter_questions(&links).is_empty());
    }

    #[test]
    fn question_id_must_be_followed_by_slash() {
        assert!(!is_question("https://stackoverflow.com/questions/42"));
        assert!(is_question("https://stackoverflow.com/questions/42/"));
        assert!(is_question("/questions/42/"));
    }

    #[test]
    fn question_links_are_validated() {
        let links = ["/questions/tagged/bash", "/questions/7/title"];
        let parsed = question_links(&links);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].as_str(), "/questions/7/title");
    }

    #[test]
    fn link_at_position_clamps_to_last() {
        assert_eq!(link_at_position(&["/questions/42/"], 1), Some(&"/questions/42/"));
        assert_eq!(link_at_position(&["/questions/42/"], 2), Some(&"/questions/42/"));
        assert_eq!(link_at_position(&["/howdoi", "/questions/42/"], 1), Some(&"/howdoi"));
        assert_eq!(link_at_position(&["/howdoi", "/questions/42/"], 2), Some(&"/questions/42/"));
        assert_eq!(
            link_at_position(&["/questions/42/", "/questions/142/"], 1),
            Some(&"/questions/42/")
        );
    }

    #[test]
    fn link_at_position_empty_list() {
        let links: [&str; 0] = [];
        assert_eq!(link_at_position(&links, 1), None);
    }

    #[test]
    fn link_at_position_zero_is_first() {
        assert_eq!(link_at_position(&["a", "b"], 0), Some(&"a"));
    }
}
