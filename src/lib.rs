// src/lib.rs

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod leaderboard;
pub mod models;
pub mod page;
pub mod quiz;
pub mod routes;
pub mod session;
pub mod state;
pub mod store;
pub mod utils;
pub mod view;

pub use routes::create_router;
