// src/handlers/mod.rs

pub mod auth;
pub mod leaderboard;
pub mod page;
pub mod quiz;
