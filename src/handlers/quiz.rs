// src/handlers/quiz.rs

use axum::{Extension, Json, extract::State};
use serde::Deserialize;

use crate::{
    error::AppError,
    page::Page,
    quiz::{Advance, QuizSession, QuizState},
    session::{SessionContext, SessionRegistry},
    store::Store,
    utils::jwt::Claims,
    view::{Notice, QuizView, View},
};

/// DTO for answering the current question.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnswerRequest {
    pub option: Option<String>,
}

fn quiz_mut(ctx: &mut SessionContext) -> Result<&mut QuizSession, AppError> {
    if ctx.page != Page::Quiz {
        return Err(AppError::Conflict("The quiz page is not open".to_string()));
    }
    ctx.quiz
        .as_mut()
        .ok_or_else(|| AppError::Conflict("No quiz in progress".to_string()))
}

/// Returns the session's quiz, sampling a fresh one on first entry.
pub(crate) async fn open_quiz(
    store: &Store,
    sessions: &SessionRegistry,
    claims: &Claims,
) -> Result<QuizView, AppError> {
    let existing = sessions
        .with(claims, |ctx| {
            if ctx.page != Page::Quiz {
                return Err(AppError::Conflict("The quiz page is not open".to_string()));
            }
            Ok(ctx.quiz.as_ref().map(|quiz| QuizView::of(quiz, None)))
        })
        .await?;

    if let Some(view) = existing {
        return Ok(view);
    }

    let pool = store.load_all_questions().await?;
    let quiz = QuizSession::start(&pool, &mut rand::thread_rng())?;
    tracing::info!(
        "Started quiz for '{}' with {} questions",
        claims.sub,
        quiz.questions().len()
    );

    Ok(sessions
        .with(claims, |ctx| QuizView::of(ctx.quiz.get_or_insert(quiz), None))
        .await)
}

/// Shows the current question.
pub async fn show(
    State(store): State<Store>,
    State(sessions): State<SessionRegistry>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<View>, AppError> {
    let view = open_quiz(&store, &sessions, &claims).await?;
    Ok(Json(View::Quiz(view)))
}

/// Submits an answer to the current question.
///
/// * An empty or unknown option is a 400 warning and changes nothing.
/// * A second answer to the same question is a 409.
pub async fn answer(
    State(sessions): State<SessionRegistry>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<View>, AppError> {
    let view = sessions
        .with(&claims, |ctx| {
            let quiz = quiz_mut(ctx)?;
            quiz.select_option(req.option.as_deref())?;
            Ok::<_, AppError>(QuizView::of(quiz, None))
        })
        .await?;

    Ok(Json(View::Quiz(view)))
}

/// Moves to the next question, or completes the quiz after the last one.
///
/// On completion the session score is added to the user's stored score.
/// A failed update is reported in the view; the quiz stays completed.
pub async fn next(
    State(store): State<Store>,
    State(sessions): State<SessionRegistry>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<View>, AppError> {
    let (advance, mut view) = sessions
        .with(&claims, |ctx| {
            let quiz = quiz_mut(ctx)?;
            let advance = quiz.advance()?;
            Ok::<_, AppError>((advance, QuizView::of(quiz, None)))
        })
        .await?;

    if let Advance::Completed { earned } = advance {
        tracing::info!("'{}' completed the quiz with {} points", claims.sub, earned);

        view.notice = Some(
            match store.increment_user_score(&claims.sub, i64::from(earned)).await {
                Ok(()) => Notice::success("Score updated!"),
                Err(AppError::NotFound(msg)) => Notice::error(msg),
                Err(e) => {
                    tracing::error!("Failed to persist score for '{}': {}", claims.sub, e);
                    Notice::error("Failed to update your score")
                }
            },
        );
    }

    Ok(Json(View::Quiz(view)))
}

/// Starts over with a freshly sampled set of questions.
/// Only allowed once the current quiz is completed.
pub async fn restart(
    State(store): State<Store>,
    State(sessions): State<SessionRegistry>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<View>, AppError> {
    let state = sessions
        .with(&claims, |ctx| quiz_mut(ctx).map(|quiz| quiz.state()))
        .await?;
    if state != QuizState::Completed {
        return Err(AppError::Conflict("Finish the quiz before restarting".to_string()));
    }

    let pool = store.load_all_questions().await?;

    let view = sessions
        .with(&claims, |ctx| {
            let quiz = quiz_mut(ctx)?;
            quiz.restart(&pool, &mut rand::thread_rng())?;
            Ok::<_, AppError>(QuizView::of(quiz, None))
        })
        .await?;

    Ok(Json(View::Quiz(view)))
}
