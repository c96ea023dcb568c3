//! Page scraping: fetch HTML, then pull out title and body text

pub mod extractor;
pub mod fetcher;

pub use extractor::{excerpt, extract_article, Article, EXCERPT_CHARS, MAX_CONTENT_CHARS};
pub use fetcher::{HttpFetcher, PageFetcher};
