//! Quiz content types and synthesis
//!
//! A quiz is an ordered list of four-option questions plus a list of
//! related topic labels. Options are a fixed A-D set and the correct answer
//! is one of those labels, so an answer key that points at a missing option
//! cannot be built.

pub mod generator;

pub use generator::{QuizGenerator, TemplateGenerator};

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of one answer option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    /// All labels in display order
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLabel::A => "A",
            OptionLabel::B => "B",
            OptionLabel::C => "C",
            OptionLabel::D => "D",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four answer options, serialized as `{"A": .., "B": .., "C": .., "D": ..}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOptions {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

impl AnswerOptions {
    pub fn new(
        a: impl Into<String>,
        b: impl Into<String>,
        c: impl Into<String>,
        d: impl Into<String>,
    ) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
            d: d.into(),
        }
    }

    /// Text of the option with the given label
    pub fn get(&self, label: OptionLabel) -> &str {
        match label {
            OptionLabel::A => &self.a,
            OptionLabel::B => &self.b,
            OptionLabel::C => &self.c,
            OptionLabel::D => &self.d,
        }
    }

    /// `(label, text)` pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (OptionLabel, &str)> {
        OptionLabel::ALL.into_iter().map(move |label| (label, self.get(label)))
    }
}

/// Question difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: AnswerOptions,
    pub correct_answer: OptionLabel,
    pub explanation: String,
    pub difficulty: Difficulty,
}

impl Question {
    /// Text of the correct option
    pub fn correct_option(&self) -> &str {
        self.options.get(self.correct_answer)
    }
}

/// Everything the synthesizer produces for one page; stored as the
/// `quiz_data` JSON column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct QuizPayload {
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub related_topics: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_question() -> Question {
        Question {
            question: "What is Rust best known for?".into(),
            options: AnswerOptions::new("Memory safety", "Garbage collection", "Dynamic typing", "Macros only"),
            correct_answer: OptionLabel::A,
            explanation: "Rust guarantees memory safety without a GC.".into(),
            difficulty: Difficulty::Easy,
        }
    }

    #[test]
    fn test_question_wire_shape() {
        let value = serde_json::to_value(sample_question()).unwrap();
        assert_eq!(value["options"]["A"], "Memory safety");
        assert_eq!(value["options"]["D"], "Macros only");
        assert_eq!(value["correct_answer"], "A");
        assert_eq!(value["difficulty"], "easy");
    }

    #[test]
    fn test_unknown_answer_label_is_rejected() {
        let raw = json!({
            "question": "Q?",
            "options": {"A": "1", "B": "2", "C": "3", "D": "4"},
            "correct_answer": "E",
            "explanation": "",
            "difficulty": "hard"
        });
        assert!(serde_json::from_value::<Question>(raw).is_err());
    }

    #[test]
    fn test_missing_option_is_rejected() {
        let raw = json!({
            "question": "Q?",
            "options": {"A": "1", "B": "2", "C": "3"},
            "correct_answer": "A",
            "explanation": "",
            "difficulty": "easy"
        });
        assert!(serde_json::from_value::<Question>(raw).is_err());
    }

    #[test]
    fn test_correct_option_lookup() {
        let question = sample_question();
        assert_eq!(question.correct_option(), "Memory safety");

        let labels: Vec<_> = question.options.iter().map(|(label, _)| label.to_string()).collect();
        assert_eq!(labels, vec!["A", "B", "C", "D"]);
    }
}
