//! Picking games out of schedule payloads

use chrono::{DateTime, NaiveDate, Utc};

use super::models::{Game, GameDay};

/// The team's game in the league schedule entry for `today`
pub fn game_on_day(days: &[GameDay], today: NaiveDate, team_id: i64) -> Option<Game> {
    let wanted = today.format("%Y-%m-%d").to_string();
    days.iter()
        .filter(|day| day.date == wanted)
        .flat_map(|day| day.games.iter())
        .find(|game| game.involves(team_id))
        .cloned()
}

/// A game from the club's weekly schedule scheduled on `today`
pub fn game_scheduled(games: &[Game], today: NaiveDate) -> Option<Game> {
    games
        .iter()
        .find(|game| game.game_day() == Some(today))
        .cloned()
}

/// First game starting after `now`
pub fn next_game(games: &[Game], now: DateTime<Utc>) -> Option<Game> {
    games
        .iter()
        .filter(|game| game.start_time().is_some_and(|start| start > now))
        .min_by_key(|game| game.start_time())
        .cloned()
}

/// Most recent finished games before `now`, newest first
pub fn recent_games(games: &[Game], now: DateTime<Utc>, limit: usize) -> Vec<Game> {
    games
        .iter()
        .rev()
        .filter(|game| game.is_final())
        .filter(|game| game.start_time().is_some_and(|start| start < now))
        .take(limit)
        .cloned()
        .collect()
}
