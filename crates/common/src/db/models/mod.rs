//! SeaORM entity models

mod quiz;

pub use quiz::{
    Entity as QuizEntity,
    Model as Quiz,
    ActiveModel as QuizActiveModel,
    Column as QuizColumn,
};
