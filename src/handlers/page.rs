// src/handlers/page.rs

use axum::{Extension, Json, extract::State};
use serde::Deserialize;

use super::{leaderboard::leaderboard_view, quiz::open_quiz};
use crate::{
    error::AppError,
    page::{NavContext, NavEvent, Page},
    quiz::QuizState,
    session::SessionRegistry,
    store::Store,
    utils::jwt::{Claims, Viewer},
    view::{AuthStatus, View},
};

/// DTO for a navigation button press.
#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub event: NavEvent,
    /// Page an anonymous visitor is on. Ignored for logged-in sessions,
    /// whose page is kept server-side.
    #[serde(default)]
    pub from: Option<Page>,
}

async fn render(
    store: &Store,
    sessions: &SessionRegistry,
    claims: &Claims,
    page: Page,
) -> Result<View, AppError> {
    match page {
        Page::Auth => Ok(View::home(&claims.name)),
        Page::Register => Ok(View::Register { notice: None }),
        Page::Leaderboard => leaderboard_view(store).await,
        Page::Quiz => Ok(View::Quiz(open_quiz(store, sessions, claims).await?)),
    }
}

fn render_anonymous(page: Page) -> View {
    match page {
        Page::Register => View::Register { notice: None },
        _ => View::login_form(AuthStatus::Pending, None),
    }
}

/// Renders the page the session is currently on.
pub async fn current(
    State(store): State<Store>,
    State(sessions): State<SessionRegistry>,
    Extension(viewer): Extension<Viewer>,
) -> Result<Json<View>, AppError> {
    let Viewer::Session(claims) = viewer else {
        return Ok(Json(render_anonymous(Page::Auth)));
    };

    let page = sessions.with(&claims, |ctx| ctx.page).await;
    Ok(Json(render(&store, &sessions, &claims, page).await?))
}

/// Applies a navigation event and renders the resulting page.
///
/// Leaving a completed quiz discards it, so the next start samples anew.
pub async fn navigate(
    State(store): State<Store>,
    State(sessions): State<SessionRegistry>,
    Extension(viewer): Extension<Viewer>,
    Json(req): Json<NavigateRequest>,
) -> Result<Json<View>, AppError> {
    let Viewer::Session(claims) = viewer else {
        let from = req.from.unwrap_or_default();
        let next = from.navigate(
            req.event,
            NavContext {
                authenticated: false,
                quiz_in_progress: false,
            },
        )?;
        return Ok(Json(render_anonymous(next)));
    };

    let page = sessions
        .with(&claims, |ctx| {
            let quiz_in_progress = ctx
                .quiz
                .as_ref()
                .is_some_and(|quiz| quiz.state() != QuizState::Completed);

            let next = ctx.page.navigate(
                req.event,
                NavContext {
                    authenticated: true,
                    quiz_in_progress,
                },
            )?;

            if req.event == NavEvent::Finish {
                ctx.quiz = None;
            }
            tracing::debug!("Session {} moved {:?} -> {:?}", claims.sid, ctx.page, next);
            ctx.page = next;
            Ok::<_, AppError>(next)
        })
        .await?;

    Ok(Json(render(&store, &sessions, &claims, page).await?))
}
