// src/view.rs

//! Render instructions returned by every page handler.
//! The client draws whatever `View` it receives; it holds no state of its own.

use serde::Serialize;

use crate::{
    leaderboard::LeaderboardEntry,
    quiz::{OptionLabel, QuizSession, QuizState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// A one-off message shown above the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}

/// Tri-state login status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    Authenticated,
    Rejected,
    Pending,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<OptionLabel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizView {
    /// 1-based position of the current question.
    pub number: usize,
    pub total: usize,
    pub question: String,
    pub code: Option<String>,
    pub state: QuizState,
    pub options: Vec<OptionView>,
    pub score: u32,
    pub max_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl QuizView {
    pub fn of(quiz: &QuizSession, notice: Option<Notice>) -> Self {
        let question = quiz.current_question();
        Self {
            number: quiz.current_index() + 1,
            total: quiz.questions().len(),
            question: question.id.clone(),
            code: question.code.clone(),
            state: quiz.state(),
            options: quiz
                .labeled_options()
                .into_iter()
                .map(|(text, label)| OptionView { text: text.to_string(), label })
                .collect(),
            score: quiz.score(),
            max_score: quiz.max_score(),
            notice,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum View {
    Auth {
        status: AuthStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        notice: Option<Notice>,
    },
    Register {
        #[serde(skip_serializing_if = "Option::is_none")]
        notice: Option<Notice>,
    },
    Leaderboard {
        entries: Vec<LeaderboardEntry>,
    },
    Quiz(QuizView),
}

impl View {
    /// Welcome page of a logged-in user.
    pub fn home(name: &str) -> Self {
        View::Auth {
            status: AuthStatus::Authenticated,
            name: Some(name.to_string()),
            notice: None,
        }
    }

    /// Login form for an anonymous visitor.
    pub fn login_form(status: AuthStatus, notice: Option<Notice>) -> Self {
        View::Auth { status, name: None, notice }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use serde_json::json;
    use sqlx::types::Json;

    use super::*;
    use crate::models::question::Question;

    #[test]
    fn test_quiz_view_json_after_wrong_answer() {
        let pool = vec![Question {
            id: "Output dari print(2 ** 3)?".to_string(),
            code: Some("print(2 ** 3)".to_string()),
            options: Json(vec!["6".into(), "8".into(), "9".into()]),
            answer: "8".to_string(),
        }];
        let mut quiz = QuizSession::start(&pool, &mut StdRng::seed_from_u64(1)).unwrap();
        quiz.select_option(Some("9")).unwrap();

        let value = serde_json::to_value(View::Quiz(QuizView::of(&quiz, None))).unwrap();
        assert_eq!(
            value,
            json!({
                "page": "quiz",
                "number": 1,
                "total": 1,
                "question": "Output dari print(2 ** 3)?",
                "code": "print(2 ** 3)",
                "state": "answer_revealed",
                "options": [
                    { "text": "6" },
                    { "text": "8", "label": "correct" },
                    { "text": "9", "label": "incorrect" }
                ],
                "score": 0,
                "max_score": 10
            })
        );
    }

    #[test]
    fn test_auth_view_json() {
        let value = serde_json::to_value(View::login_form(
            AuthStatus::Rejected,
            Some(Notice::error("Invalid username or password")),
        ))
        .unwrap();

        assert_eq!(value["page"], "auth");
        assert_eq!(value["status"], "rejected");
        assert_eq!(value["notice"]["kind"], "error");
        assert!(value.get("name").is_none());
    }
}
