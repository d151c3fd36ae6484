// src/handlers/leaderboard.rs

use axum::{Json, extract::State};

use crate::{error::AppError, leaderboard, store::Store, view::View};

/// Loads every user and ranks them.
pub(crate) async fn leaderboard_view(store: &Store) -> Result<View, AppError> {
    let users = store.load_all_users().await?;
    Ok(View::Leaderboard {
        entries: leaderboard::rank(users),
    })
}

/// Retrieves the top 10 users by cumulative score.
pub async fn show(State(store): State<Store>) -> Result<Json<View>, AppError> {
    Ok(Json(leaderboard_view(&store).await?))
}
