//! HTML-to-text rendering with inline markdown links.
//!
//! Walks an immutable [`scraper`] tree and flattens it to text without
//! squashing whitespace, so answer prose keeps the line structure it had
//! on the page. Hyperlinks become `[text](href)`, or the bare href when
//! the visible text already is the URL.
//!
//! Layout rules:
//!
//! - text nodes are copied verbatim;
//! - block elements add a line break before and after their content;
//! - `<br>` adds a single line break;
//! - inline elements add nothing;
//! - line breaks before the first text and after the last text are
//!   dropped, interior ones are kept as they are (never merged).

use scraper::{ElementRef, Html, Node};

/// Elements that flow with the surrounding text.
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "b", "bdo", "big", "br", "button", "cite", "code", "dfn", "em", "font",
    "i", "img", "input", "kbd", "label", "map", "object", "q", "samp", "script", "select", "small",
    "span", "strike", "strong", "sub", "sup", "textarea", "tt", "u", "var",
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Text(String),
    /// Boundary of a block element.
    BlockEdge,
    /// An explicit `<br>`.
    LineBreak,
}

/// Render an element and its subtree to flat text.
pub fn render(element: ElementRef<'_>) -> String {
    let mut parts = Vec::new();
    collect_element(element, &mut parts);
    join_parts(&parts)
}

/// Render a standalone markup fragment to flat text.
///
/// A fragment made of a single element (with at most blank text around
/// it) renders as that element. Anything else is rendered as a sequence
/// of top-level nodes. A container around them would only add breaks
/// before the first text and after the last, which are dropped anyway,
/// so none is modelled. Blank text before the first element is not
/// content.
pub fn render_fragment(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    let root = fragment.root_element();

    let elements: Vec<ElementRef<'_>> = root.children().filter_map(ElementRef::wrap).collect();
    let only_blank_text = root.children().all(|child| match child.value() {
        Node::Text(text) => text.trim().is_empty(),
        _ => true,
    });
    if let [single] = elements.as_slice() {
        if only_blank_text {
            return render(*single);
        }
    }

    let mut parts = Vec::new();
    let mut seen_element = false;
    for child in root.children() {
        match child.value() {
            Node::Text(text) => {
                if seen_element || !text.trim().is_empty() {
                    parts.push(Part::Text(String::from(&**text)));
                }
            }
            Node::Element(_) => {
                seen_element = true;
                if let Some(el) = ElementRef::wrap(child) {
                    collect_element(el, &mut parts);
                }
            }
            _ => {}
        }
    }

    join_parts(&parts)
}

/// Visible text of an element with whitespace runs squashed to one space.
pub fn squashed_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_element(element: ElementRef<'_>, parts: &mut Vec<Part>) {
    let name = element.value().name();

    if name == "a" {
        if let Some(href) = element.value().attr("href") {
            parts.push(Part::Text(link_markdown(element, href)));
            return;
        }
    }

    let is_break = name == "br";
    let is_block = !is_break && !INLINE_TAGS.contains(&name);
    if is_break {
        parts.push(Part::LineBreak);
    } else if is_block {
        parts.push(Part::BlockEdge);
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => parts.push(Part::Text(String::from(&**text))),
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(child) {
                    collect_element(el, parts);
                }
            }
            _ => {}
        }
    }

    if is_block {
        parts.push(Part::BlockEdge);
    }
}

fn link_markdown(anchor: ElementRef<'_>, href: &str) -> String {
    let visible = squashed_text(anchor);
    if visible == href {
        visible
    } else {
        format!("[{visible}]({href})")
    }
}

fn join_parts(parts: &[Part]) -> String {
    let is_text = |part: &Part| matches!(part, Part::Text(_));
    let (Some(first), Some(last)) = (parts.iter().position(is_text), parts.iter().rposition(is_text))
    else {
        return String::new();
    };

    parts[first..=last]
        .iter()
        .map(|part| match part {
            Part::Text(text) => text.as_str(),
            Part::BlockEdge | Part::LineBreak => "\n",
        })
        .collect()
}
