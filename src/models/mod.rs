// src/models/mod.rs

pub mod cookie;
pub mod question;
pub mod user;
