// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

/// Represents the 'questions' collection.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    /// The question text, which doubles as the document id.
    /// Two questions with the same text collide and the last write wins.
    pub id: String,

    /// Optional code snippet shown under the question.
    pub code: Option<String>,

    /// List of options in display order.
    /// Stored as a JSON array in the database.
    pub options: Json<Vec<String>>,

    /// The correct option, equal to one element of `options`.
    pub answer: String,
}

impl Question {
    pub fn options(&self) -> &[String] {
        &self.options.0
    }

    pub fn has_option(&self, option: &str) -> bool {
        self.options.0.iter().any(|o| o == option)
    }
}

/// A question as authored in a seed file.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = validate_answer_is_option))]
pub struct QuestionSeed {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub code: Option<String>,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    #[validate(length(min = 1, max = 500))]
    pub answer: String,
}

impl From<QuestionSeed> for Question {
    fn from(seed: QuestionSeed) -> Self {
        Question {
            id: seed.question,
            code: seed.code.filter(|c| !c.trim().is_empty()),
            options: Json(seed.options),
            answer: seed.answer,
        }
    }
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() < 2 {
        return Err(validator::ValidationError::new("needs_two_options"));
    }
    for opt in options {
        if opt.is_empty() || opt.len() > 500 {
            return Err(validator::ValidationError::new("invalid_option"));
        }
    }
    Ok(())
}

fn validate_answer_is_option(seed: &QuestionSeed) -> Result<(), validator::ValidationError> {
    if !seed.options.contains(&seed.answer) {
        return Err(validator::ValidationError::new("answer_not_in_options"));
    }
    Ok(())
}
