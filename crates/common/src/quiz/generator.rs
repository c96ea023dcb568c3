//! Quiz synthesizer
//!
//! `TemplateGenerator` fills a fixed two-question template with the page
//! title. The page body is accepted but not read.

use super::{AnswerOptions, Difficulty, OptionLabel, Question, QuizPayload};
use crate::errors::Result;
use async_trait::async_trait;

/// Topics attached to every templated quiz
pub const RELATED_TOPICS: [&str; 3] = ["Computer science", "Cryptography", "Artificial intelligence"];

/// Trait for quiz synthesis
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    /// Produce questions and related topics for a scraped page
    async fn generate(&self, title: &str, content: &str) -> Result<QuizPayload>;

    /// Short name used in logs and metrics labels
    fn name(&self) -> &str;
}

/// Deterministic template generator
#[derive(Debug, Clone, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    pub fn new() -> Self {
        Self
    }

    fn build(title: &str) -> QuizPayload {
        let questions = vec![
            Question {
                question: format!("What is {} best known for?", title),
                options: AnswerOptions::new("Science", "Music", "Politics", "Art"),
                correct_answer: OptionLabel::A,
                explanation: format!("{} is primarily known for contributions in science.", title),
                difficulty: Difficulty::Easy,
            },
            Question {
                question: format!("Which field did {} contribute to?", title),
                options: AnswerOptions::new("Mathematics", "Cooking", "Fashion", "Sports"),
                correct_answer: OptionLabel::A,
                explanation: format!("{} made major contributions in mathematics and computing.", title),
                difficulty: Difficulty::Medium,
            },
        ];

        QuizPayload {
            questions,
            related_topics: RELATED_TOPICS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[async_trait]
impl QuizGenerator for TemplateGenerator {
    async fn generate(&self, title: &str, _content: &str) -> Result<QuizPayload> {
        Ok(Self::build(title))
    }

    fn name(&self) -> &str {
        "template"
    }
}
