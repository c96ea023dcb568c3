//! Repository pattern for database operations
//!
//! Provides a clean interface for all quiz data access with
//! constraint violations mapped to typed errors.

use crate::db::DbPool;
use crate::db::models::*;
use crate::errors::{AppError, Result};
use crate::quiz::QuizPayload;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, NotSet,
    QueryOrder, QuerySelect, Set, SqlErr,
};
use serde::{Deserialize, Serialize};

/// Listing projection of a stored quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromQueryResult)]
pub struct QuizSummary {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.pool.conn()
    }

    // ========================================================================
    // Health Check
    // ========================================================================

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }

    // ========================================================================
    // Quiz Operations
    // ========================================================================

    /// Insert a quiz; the database assigns `id`, `created_at` is stamped here
    pub async fn create_quiz(
        &self,
        url: String,
        title: String,
        content_excerpt: String,
        quiz_data: QuizPayload,
    ) -> Result<Quiz> {
        let quiz = QuizActiveModel {
            id: NotSet,
            url: Set(url.clone()),
            title: Set(title),
            content_excerpt: Set(content_excerpt),
            quiz_data: Set(quiz_data),
            created_at: Set(Utc::now()),
        };

        quiz.insert(self.conn())
            .await
            .map_err(|e| map_insert_error(e, url))
    }

    /// Find quiz by ID
    pub async fn find_quiz_by_id(&self, id: i32) -> Result<Option<Quiz>> {
        QuizEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    /// All quizzes, newest first
    pub async fn list_quizzes(&self) -> Result<Vec<QuizSummary>> {
        QuizEntity::find()
            .select_only()
            .columns([
                QuizColumn::Id,
                QuizColumn::Title,
                QuizColumn::Url,
                QuizColumn::CreatedAt,
            ])
            .order_by_desc(QuizColumn::CreatedAt)
            .order_by_desc(QuizColumn::Id)
            .into_model::<QuizSummary>()
            .all(self.conn())
            .await
            .map_err(Into::into)
    }
}

fn map_insert_error(err: DbErr, url: String) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateQuiz { url },
        _ => AppError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::quiz::{QuizGenerator, TemplateGenerator};

    async fn test_repo() -> Repository {
        let pool = DbPool::connect_and_prepare(&DatabaseConfig::in_memory()).await.unwrap();
        Repository::new(pool)
    }

    async fn payload(title: &str) -> QuizPayload {
        TemplateGenerator::new().generate(title, "").await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = test_repo().await;
        let url = "https://en.wikipedia.org/wiki/Alan_Turing".to_string();

        let created = repo
            .create_quiz(url.clone(), "Alan Turing".into(), "Alan Mathison Turing".into(), payload("Alan Turing").await)
            .await
            .unwrap();
        assert!(created.id > 0);
        assert_eq!(created.url, url);

        let found = repo.find_quiz_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.quiz_data, created.quiz_data);
        assert_eq!(found.content_excerpt, "Alan Mathison Turing");
        assert_eq!(found.quiz_data.questions.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_id_is_none() {
        let repo = test_repo().await;
        assert!(repo.find_quiz_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_url_is_conflict() {
        let repo = test_repo().await;
        let url = "https://en.wikipedia.org/wiki/Rust_(programming_language)".to_string();

        repo.create_quiz(url.clone(), "Rust".into(), String::new(), payload("Rust").await)
            .await
            .unwrap();
        let err = repo
            .create_quiz(url.clone(), "Rust".into(), String::new(), payload("Rust").await)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::DuplicateQuiz { url: ref u } if *u == url));
        assert_eq!(repo.list_quizzes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = test_repo().await;
        for title in ["First", "Second", "Third"] {
            repo.create_quiz(
                format!("https://en.wikipedia.org/wiki/{}", title),
                title.to_string(),
                String::new(),
                payload(title).await,
            )
            .await
            .unwrap();
        }

        let titles: Vec<_> = repo
            .list_quizzes()
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.title)
            .collect();
        assert_eq!(titles, vec!["Third", "Second", "First"]);
    }
}
