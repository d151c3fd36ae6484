// src/quiz.rs

//! Per-session quiz state machine.
//!
//! `AwaitingAnswer --select_option--> AnswerRevealed --advance--> AwaitingAnswer`
//! until the last question, where `advance` moves to `Completed`.
//! `restart` goes from `Completed` back to `AwaitingAnswer` with a fresh sample.

use rand::{Rng, seq::SliceRandom};
use serde::Serialize;
use thiserror::Error;

use crate::{
    config::{POINTS_PER_CORRECT_ANSWER, QUIZ_QUESTION_COUNT},
    models::question::Question,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizState {
    AwaitingAnswer,
    AnswerRevealed,
    Completed,
}

impl QuizState {
    fn describe(self) -> &'static str {
        match self {
            QuizState::AwaitingAnswer => "awaiting an answer",
            QuizState::AnswerRevealed => "the answer is revealed",
            QuizState::Completed => "the quiz is completed",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("No questions available, please try again later")]
    NoQuestions,

    #[error("Please choose an answer")]
    NoOptionSelected,

    #[error("'{0}' is not one of the options")]
    UnknownOption(String),

    #[error("Cannot {action} while {}", .state.describe())]
    InvalidTransition {
        action: &'static str,
        state: QuizState,
    },
}

/// Outcome of `QuizSession::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    NextQuestion,
    /// The last question was passed; `earned` is the score to persist.
    Completed { earned: u32 },
}

/// Label attached to an option once the answer is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionLabel {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    selected_option: Option<String>,
    state: QuizState,
}

/// Picks `min(QUIZ_QUESTION_COUNT, pool.len())` distinct questions uniformly.
fn sample<R: Rng + ?Sized>(pool: &[Question], rng: &mut R) -> Result<Vec<Question>, QuizError> {
    if pool.is_empty() {
        return Err(QuizError::NoQuestions);
    }
    let amount = pool.len().min(QUIZ_QUESTION_COUNT);
    Ok(pool.choose_multiple(rng, amount).cloned().collect())
}

impl QuizSession {
    /// Starts a session on a fresh sample of `pool`.
    pub fn start<R: Rng + ?Sized>(pool: &[Question], rng: &mut R) -> Result<Self, QuizError> {
        Ok(Self {
            questions: sample(pool, rng)?,
            current_index: 0,
            score: 0,
            selected_option: None,
            state: QuizState::AwaitingAnswer,
        })
    }

    /// Submits an answer for the current question.
    /// Returns whether the answer was correct.
    pub fn select_option(&mut self, option: Option<&str>) -> Result<bool, QuizError> {
        if self.state != QuizState::AwaitingAnswer {
            return Err(QuizError::InvalidTransition {
                action: "answer",
                state: self.state,
            });
        }

        let option = match option {
            Some(o) if !o.is_empty() => o,
            _ => return Err(QuizError::NoOptionSelected),
        };

        let question = self.current_question();
        if !question.has_option(option) {
            return Err(QuizError::UnknownOption(option.to_string()));
        }

        let correct = option == question.answer;
        if correct {
            self.score += POINTS_PER_CORRECT_ANSWER;
        }
        self.selected_option = Some(option.to_string());
        self.state = QuizState::AnswerRevealed;

        Ok(correct)
    }

    /// Moves past a revealed answer.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        if self.state != QuizState::AnswerRevealed {
            return Err(QuizError::InvalidTransition {
                action: "advance",
                state: self.state,
            });
        }

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.selected_option = None;
            self.state = QuizState::AwaitingAnswer;
            Ok(Advance::NextQuestion)
        } else {
            self.state = QuizState::Completed;
            Ok(Advance::Completed { earned: self.score })
        }
    }

    /// Replaces a completed session with a fresh one drawn from `pool`.
    /// On error the session is left as it was.
    pub fn restart<R: Rng + ?Sized>(&mut self, pool: &[Question], rng: &mut R) -> Result<(), QuizError> {
        if self.state != QuizState::Completed {
            return Err(QuizError::InvalidTransition {
                action: "restart",
                state: self.state,
            });
        }
        *self = Self::start(pool, rng)?;
        Ok(())
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_score(&self) -> u32 {
        self.questions.len() as u32 * POINTS_PER_CORRECT_ANSWER
    }

    pub fn selected_option(&self) -> Option<&str> {
        self.selected_option.as_deref()
    }

    pub fn answer_submitted(&self) -> bool {
        self.state != QuizState::AwaitingAnswer
    }

    /// Options of the current question with their reveal labels.
    /// Nothing is labeled until an answer has been submitted.
    pub fn labeled_options(&self) -> Vec<(&str, Option<OptionLabel>)> {
        let question = self.current_question();
        question
            .options()
            .iter()
            .map(|option| {
                let label = if !self.answer_submitted() {
                    None
                } else if *option == question.answer {
                    Some(OptionLabel::Correct)
                } else if self.selected_option.as_deref() == Some(option.as_str()) {
                    Some(OptionLabel::Incorrect)
                } else {
                    None
                };
                (option.as_str(), label)
            })
            .collect()
    }
}
