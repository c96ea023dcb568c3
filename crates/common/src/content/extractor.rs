//! HTML content extraction
//!
//! Pulls the article title and body text out of a Wikipedia page using
//! fixed CSS selectors.

use crate::errors::{AppError, Result};
use scraper::{ElementRef, Html, Selector};

/// Maximum characters of body text handed to the synthesizer
pub const MAX_CONTENT_CHARS: usize = 8000;

/// Maximum characters of body text kept in the stored excerpt
pub const EXCERPT_CHARS: usize = 400;

const TITLE_SELECTOR: &str = "h1";
const PARAGRAPH_SELECTOR: &str = "div.mw-parser-output > p";

/// Title and body text of a scraped page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub content: String,
}

/// Extract the title and body text of a Wikipedia article
///
/// The title is the first `<h1>`; a page without one is an error. The body
/// is every paragraph directly under `div.mw-parser-output`, newline-joined
/// and cut to [`MAX_CONTENT_CHARS`]. Pages with a different layout yield an
/// empty body rather than an error.
pub fn extract_article(html: &str) -> Result<Article> {
    let document = Html::parse_document(html);

    let title_selector = parse_selector(TITLE_SELECTOR)?;
    let title = document
        .select(&title_selector)
        .next()
        .map(|heading| element_text(&heading).trim().to_string())
        .ok_or_else(|| AppError::Extraction {
            message: "page has no <h1> title".to_string(),
        })?;

    let paragraph_selector = parse_selector(PARAGRAPH_SELECTOR)?;
    let content = document
        .select(&paragraph_selector)
        .map(|p| element_text(&p))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Article {
        title,
        content: truncate_chars(&content, MAX_CONTENT_CHARS),
    })
}

/// Prefix of the body stored alongside a quiz
pub fn excerpt(content: &str) -> String {
    truncate_chars(content, EXCERPT_CHARS)
}

/// First `max_chars` characters of `text`, never splitting a code point
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AppError::Internal {
        message: format!("invalid selector {:?}: {}", selector, e),
    })
}

/// Concatenated text nodes of an element, tags stripped
fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ARTICLE: &str = r#"
        <!DOCTYPE html>
        <html>
        <head><title>Alan Turing - Wikipedia</title></head>
        <body>
            <h1 id="firstHeading"><span class="mw-page-title-main">Alan Turing</span></h1>
            <div id="mw-content-text">
                <div class="mw-parser-output">
                    <p>Alan Mathison <b>Turing</b> was an English mathematician.</p>
                    <table><tr><td><p>Infobox paragraph, not direct child</p></td></tr></table>
                    <p>He is widely considered to be the father of computer science.</p>
                </div>
            </div>
            <p>Footer paragraph outside the article</p>
        </body>
        </html>
    "#;

    #[test]
    fn test_extracts_title_and_direct_paragraphs() {
        let article = extract_article(SAMPLE_ARTICLE).unwrap();
        assert_eq!(article.title, "Alan Turing");
        assert_eq!(
            article.content,
            "Alan Mathison Turing was an English mathematician.\n\
             He is widely considered to be the father of computer science."
        );
    }

    #[test]
    fn test_missing_heading_is_extraction_error() {
        let html = r#"<html><body><div class="mw-parser-output"><p>text</p></div></body></html>"#;
        let err = extract_article(html).unwrap_err();
        assert!(matches!(err, AppError::Extraction { .. }));
    }

    #[test]
    fn test_unexpected_layout_gives_empty_body() {
        let html = "<html><body><h1>Plain page</h1><article><p>Not wiki markup</p></article></body></html>";
        let article = extract_article(html).unwrap();
        assert_eq!(article.title, "Plain page");
        assert!(article.content.is_empty());
    }

    #[test]
    fn test_content_is_capped() {
        let paragraph = "x".repeat(3000);
        let html = format!(
            "<h1>Long</h1><div class=\"mw-parser-output\"><p>{0}</p><p>{0}</p><p>{0}</p><p>{0}</p></div>",
            paragraph
        );
        let article = extract_article(&html).unwrap();
        assert_eq!(article.content.chars().count(), MAX_CONTENT_CHARS);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let text = "é".repeat(10);
        let cut = truncate_chars(&text, 4);
        assert_eq!(cut, "éééé");
        assert_eq!(truncate_chars("short", 400), "short");
    }

    #[test]
    fn test_excerpt_limit() {
        let body = "ü".repeat(1000);
        assert_eq!(excerpt(&body).chars().count(), EXCERPT_CHARS);
    }
}
