//! Quiz generation service
//!
//! Handles the generate workflow:
//! 1. Fetch the page
//! 2. Extract title and body
//! 3. Synthesize questions and related topics
//! 4. Store the quiz

use crate::content::{excerpt, extract_article, PageFetcher};
use crate::db::{QuizSummary, Repository};
use crate::db::models::Quiz;
use crate::errors::{AppError, Result};
use crate::metrics;
use crate::quiz::{Question, QuizGenerator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

/// Public projection of a stored quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResponse {
    pub id: i32,
    pub url: String,
    pub title: String,
    pub quiz_data: Vec<Question>,
    pub related_topics: Vec<String>,
}

impl From<Quiz> for QuizResponse {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: quiz.id,
            url: quiz.url,
            title: quiz.title,
            quiz_data: quiz.quiz_data.questions,
            related_topics: quiz.quiz_data.related_topics,
        }
    }
}

pub struct QuizService {
    repo: Repository,
    fetcher: Arc<dyn PageFetcher>,
    generator: Arc<dyn QuizGenerator>,
}

impl QuizService {
    pub fn new(
        repo: Repository,
        fetcher: Arc<dyn PageFetcher>,
        generator: Arc<dyn QuizGenerator>,
    ) -> Self {
        Self { repo, fetcher, generator }
    }

    /// Scrape `url`, build a quiz from it and store the result
    #[instrument(skip(self))]
    pub async fn generate(&self, url: &str) -> Result<QuizResponse> {
        let start = Instant::now();

        let result = self.run_pipeline(url).await;
        match &result {
            Ok(quiz) => {
                let elapsed = start.elapsed();
                metrics::record_generation(elapsed.as_secs_f64(), self.generator.name());
                tracing::info!(
                    quiz_id = quiz.id,
                    title = %quiz.title,
                    total_ms = elapsed.as_millis() as u64,
                    "Quiz generated"
                );
            }
            Err(e) => metrics::record_generation_error(e.code().as_str()),
        }
        result
    }

    async fn run_pipeline(&self, url: &str) -> Result<QuizResponse> {
        // 1. Fetch
        let fetch_start = Instant::now();
        let fetched = self.fetcher.fetch(url).await;
        metrics::record_scrape(fetch_start.elapsed().as_secs_f64(), fetched.is_ok());
        let html = fetched?;

        // 2. Extract
        let article = extract_article(&html)?;
        tracing::debug!(
            title = %article.title,
            content_chars = article.content.chars().count(),
            "Article extracted"
        );

        // 3. Synthesize
        let payload = self.generator.generate(&article.title, &article.content).await?;

        // 4. Store
        let quiz = self
            .repo
            .create_quiz(url.to_string(), article.title, excerpt(&article.content), payload)
            .await?;

        Ok(quiz.into())
    }

    /// Summaries of every stored quiz, newest first
    pub async fn list(&self) -> Result<Vec<QuizSummary>> {
        self.repo.list_quizzes().await
    }

    /// Full projection of one quiz
    pub async fn get(&self, id: i32) -> Result<QuizResponse> {
        self.repo
            .find_quiz_by_id(id)
            .await?
            .map(QuizResponse::from)
            .ok_or(AppError::QuizNotFound { id })
    }
}
