// src/page.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pages of the application. There is no URL routing: the current page is
/// session state and changes only through `NavEvent`s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Auth,
    Register,
    Leaderboard,
    Quiz,
}

/// Button presses that move between pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavEvent {
    /// "Mulai" on the welcome page.
    Start,
    Leaderboard,
    Register,
    Login,
    /// "Kembali" on the leaderboard.
    Back,
    /// "Selesai" after the last question.
    Finish,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Please log in first")]
    LoginRequired,

    #[error("Finish the quiz before leaving")]
    QuizInProgress,

    #[error("Cannot go {event:?} from the {from:?} page")]
    Invalid { from: Page, event: NavEvent },
}

/// What the router needs to know about the session making the request.
#[derive(Debug, Clone, Copy)]
pub struct NavContext {
    pub authenticated: bool,
    /// A quiz has been started and not yet completed.
    pub quiz_in_progress: bool,
}

impl Page {
    /// Applies `event` to the current page.
    pub fn navigate(self, event: NavEvent, ctx: NavContext) -> Result<Page, NavigationError> {
        let next = match (self, event) {
            (Page::Auth, NavEvent::Start) => Page::Quiz,
            (Page::Auth, NavEvent::Leaderboard) => Page::Leaderboard,
            (Page::Auth, NavEvent::Register) if !ctx.authenticated => Page::Register,
            (Page::Register, NavEvent::Login) => Page::Auth,
            (Page::Leaderboard, NavEvent::Back) => Page::Auth,
            (Page::Quiz, NavEvent::Finish) => {
                if ctx.quiz_in_progress {
                    return Err(NavigationError::QuizInProgress);
                }
                Page::Auth
            }
            (from, event) => return Err(NavigationError::Invalid { from, event }),
        };

        if next.requires_login() && !ctx.authenticated {
            return Err(NavigationError::LoginRequired);
        }
        Ok(next)
    }

    pub fn requires_login(self) -> bool {
        matches!(self, Page::Leaderboard | Page::Quiz)
    }
}
