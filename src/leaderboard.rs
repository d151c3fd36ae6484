// src/leaderboard.rs

use serde::Serialize;

use crate::{config::LEADERBOARD_SIZE, models::user::User};

/// One ranked row on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub name: String,
    pub score: i64,
}

/// Ranks users by score, highest first, keeping the top `LEADERBOARD_SIZE`.
/// Ties keep the order in which the users were fetched.
pub fn rank(users: Vec<User>) -> Vec<LeaderboardEntry> {
    let mut rows: Vec<(String, i64)> = users
        .into_iter()
        .map(|u| (u.first_name, u.score))
        .collect();

    // `sort_by` is stable.
    rows.sort_by(|a, b| b.1.cmp(&a.1));

    rows.into_iter()
        .take(LEADERBOARD_SIZE)
        .enumerate()
        .map(|(i, (name, score))| LeaderboardEntry {
            rank: i + 1,
            name,
            score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, score: i64) -> User {
        User {
            id: name.to_lowercase(),
            email: String::new(),
            first_name: name.to_string(),
            last_name: String::new(),
            password: String::new(),
            score,
        }
    }

    #[test]
    fn test_sorts_descending() {
        let board = rank(vec![user("A", 30), user("B", 10), user("C", 50)]);
        let scores: Vec<i64> = board.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![50, 30, 10]);
        assert_eq!(board[0].name, "C");
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[2].rank, 3);
    }

    #[test]
    fn test_ties_keep_fetch_order() {
        let board = rank(vec![user("A", 20), user("B", 40), user("C", 20), user("D", 20)]);
        let names: Vec<&str> = board.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn test_truncates_to_top_ten() {
        let users = (0..15).map(|i| user(&format!("U{}", i), i * 10)).collect();
        let board = rank(users);

        assert_eq!(board.len(), 10);
        assert_eq!(board[0].score, 140);
        assert_eq!(board[9].score, 50);
        assert_eq!(board[9].rank, 10);
    }

    #[test]
    fn test_empty() {
        assert!(rank(Vec::new()).is_empty());
    }
}
