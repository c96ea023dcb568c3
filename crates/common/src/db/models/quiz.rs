//! Quiz entity

use crate::quiz::QuizPayload;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quizzes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Source page; one quiz per URL
    #[sea_orm(column_type = "Text", unique)]
    pub url: String,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub content_excerpt: String,

    /// Questions and related topics as JSON
    #[sea_orm(column_type = "Json")]
    pub quiz_data: QuizPayload,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
