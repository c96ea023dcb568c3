//! WikiQuiz Common Library
//!
//! Shared code for the WikiQuiz services including:
//! - Page fetching and article extraction
//! - Quiz synthesis
//! - Database models and repository patterns
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod content;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod quiz;
pub mod service;

// Re-export commonly used types
pub use crate::errors::{AppError, Result};
pub use crate::config::AppConfig;
pub use crate::db::{DbPool, QuizSummary, Repository};
pub use crate::service::{QuizResponse, QuizService};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
