//! HTML to readable text
//!
//! Government portal pages arrive as full HTML documents. Extraction
//! locates the primary content container (semantic containers first,
//! generic body last), then collects text from paragraph-like elements
//! while skipping navigation, script, and boilerplate subtrees. Fragments
//! shorter than the noise floor and "Skip to" accessibility artifacts are
//! dropped.

use regex_lite::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// Candidate content containers, in priority order
const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "#content",
    "#main-content",
    ".content",
    ".main-content",
    ".node__content",
    "body",
];

/// Paragraph-like elements worth extracting
const TEXT_SELECTOR: &str = "p, li, h1, h2, h3, h4, td, dd";

/// Subtrees that never carry content
const NOISE_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "noscript", "aside", "form", "button",
    "iframe", "figure",
];

/// Fragments at or below this many characters are menu/breadcrumb noise
const MIN_FRAGMENT_CHARS: usize = 40;

fn content_selectors() -> &'static Vec<Selector> {
    static SELECTORS: OnceLock<Vec<Selector>> = OnceLock::new();
    SELECTORS.get_or_init(|| {
        CONTENT_SELECTORS
            .iter()
            .map(|s| Selector::parse(s).expect("static selector"))
            .collect()
    })
}

fn text_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse(TEXT_SELECTOR).expect("static selector"))
}

fn whitespace() -> &'static Regex {
    static WS: OnceLock<Regex> = OnceLock::new();
    WS.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Extract clean paragraph text from an HTML document, keeping at most
/// `max_paragraphs` fragments.
pub fn extract_text(html: &str, max_paragraphs: usize) -> String {
    let document = Html::parse_document(html);

    let Some(container) = find_container(&document) else {
        return String::new();
    };

    let mut fragments: Vec<String> = Vec::new();

    for element in container.select(text_selector()) {
        if fragments.len() >= max_paragraphs {
            break;
        }
        if has_noise_ancestor(&element) {
            continue;
        }

        let text = element_text(&element);
        if text.chars().count() > MIN_FRAGMENT_CHARS && !text.starts_with("Skip to") {
            fragments.push(text);
        }
    }

    fragments.join("\n")
}

fn find_container(document: &Html) -> Option<ElementRef<'_>> {
    content_selectors()
        .iter()
        .find_map(|selector| document.select(selector).next())
}

fn has_noise_ancestor(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| NOISE_TAGS.contains(&ancestor.value().name()))
}

/// Text of an element, excluding noise subtrees nested inside it
fn element_text(element: &ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);
    whitespace().replace_all(raw.trim(), " ").into_owned()
}

fn collect_text(element: &ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !NOISE_TAGS.contains(&child_element.value().name()) {
                collect_text(&child_element, out);
            }
        }
    }
}
