//! HTTP client for the NHL web API (`api-web.nhle.com`) and stats API (`api.nhle.com/stats`)

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::models::{
    ClubScheduleResponse, Game, GameDay, GoalieSummary, PlayerLanding, PlayoffBracket,
    ScheduleResponse, SkaterSummary, StandingsResponse, StandingsRow, StatsResponse, TeamSummary,
};

/// `gameTypeId` values used by the stats API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameType {
    Regular = 2,
    Playoffs = 3,
}

/// Season id such as `20242025`; a season starts in September
pub fn current_season_id(date: NaiveDate) -> u32 {
    let year = date.year() as u32;
    let start = if date.month() >= 9 { year } else { year - 1 };
    start * 10_000 + start + 1
}

/// `2024-25` label for a season id
pub fn season_label(season_id: u32) -> String {
    let start = season_id / 10_000;
    format!("{}-{:02}", start, (start + 1) % 100)
}

fn cayenne_exp(season_id: u32, game_type: GameType) -> String {
    format!(
        "gameTypeId={} and seasonId<={season_id} and seasonId>={season_id}",
        game_type as u8
    )
}

pub struct NhlClient {
    client: Client,
    api_base: String,
    stats_base: String,
}

impl NhlClient {
    pub fn new(api_base: &str, stats_base: &str) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            stats_base: stats_base.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        debug!("NHL GET {url}");
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?
            .error_for_status()?;
        response
            .json::<T>()
            .await
            .with_context(|| format!("unexpected payload from {url}"))
    }

    /// Standings row for one team, by abbreviation
    pub async fn standings(&self, abbrev: &str) -> Result<Option<StandingsRow>> {
        let url = format!("{}/standings/now", self.api_base);
        let body: StandingsResponse = self.get_json(&url, &[]).await?;
        Ok(body
            .standings
            .into_iter()
            .find(|row| row.abbrev().eq_ignore_ascii_case(abbrev)))
    }

    /// League schedule for the week starting at `date`
    pub async fn schedule(&self, date: NaiveDate) -> Result<Vec<GameDay>> {
        let url = format!("{}/schedule/{}", self.api_base, date.format("%Y-%m-%d"));
        let body: ScheduleResponse = self.get_json(&url, &[]).await?;
        Ok(body.game_week)
    }

    /// Current state of one game, whatever day it was scheduled on
    pub async fn game(&self, game_id: i64) -> Result<Game> {
        let url = format!("{}/gamecenter/{game_id}/boxscore", self.api_base);
        self.get_json(&url, &[]).await
    }

    pub async fn club_week(&self, abbrev: &str) -> Result<Vec<Game>> {
        let url = format!("{}/club-schedule/{abbrev}/week/now", self.api_base);
        let body: ClubScheduleResponse = self.get_json(&url, &[]).await?;
        Ok(body.games)
    }

    pub async fn club_season(&self, abbrev: &str) -> Result<Vec<Game>> {
        let url = format!("{}/club-schedule-season/{abbrev}/now", self.api_base);
        let body: ClubScheduleResponse = self.get_json(&url, &[]).await?;
        Ok(body.games)
    }

    /// Team summaries sorted by points, best first
    pub async fn team_summaries(&self, season_id: u32, game_type: GameType) -> Result<Vec<TeamSummary>> {
        self.stats_report("team/summary", "points", 32, season_id, game_type)
            .await
    }

    pub async fn skater_summaries(&self, season_id: u32) -> Result<Vec<SkaterSummary>> {
        self.stats_report("skater/summary", "points", 1000, season_id, GameType::Regular)
            .await
    }

    pub async fn goalie_summaries(&self, season_id: u32) -> Result<Vec<GoalieSummary>> {
        self.stats_report("goalie/summary", "wins", 200, season_id, GameType::Regular)
            .await
    }

    async fn stats_report<T: DeserializeOwned>(
        &self,
        report: &str,
        sort_by: &str,
        limit: u32,
        season_id: u32,
        game_type: GameType,
    ) -> Result<Vec<T>> {
        let url = format!("{}/{report}", self.stats_base);
        let query = [
            ("isAggregate", "false".to_string()),
            ("isGame", "false".to_string()),
            (
                "sort",
                format!(r#"[{{"property":"{sort_by}","direction":"DESC"}}]"#),
            ),
            ("start", "0".to_string()),
            ("limit", limit.to_string()),
            ("cayenneExp", cayenne_exp(season_id, game_type)),
        ];
        let body: StatsResponse<T> = self.get_json(&url, &query).await?;
        Ok(body.data)
    }

    pub async fn player_landing(&self, player_id: i64) -> Result<PlayerLanding> {
        let url = format!("{}/player/{player_id}/landing", self.api_base);
        self.get_json(&url, &[]).await
    }

    /// Playoff bracket of the season ending in `year`
    pub async fn playoff_bracket(&self, year: u32) -> Result<PlayoffBracket> {
        let url = format!("{}/playoff-bracket/{year}", self.api_base);
        self.get_json(&url, &[]).await
    }

    /// Games of one playoff series, by its bracket letter
    pub async fn playoff_series_games(&self, season_id: u32, letter: &str) -> Result<Vec<Game>> {
        let url = format!(
            "{}/schedule/playoff-series/{season_id}/{}",
            self.api_base,
            letter.to_lowercase()
        );
        let body: ClubScheduleResponse = self.get_json(&url, &[]).await?;
        Ok(body.games)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn test_current_season_id() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(current_season_id(date(2024, 10, 1)), 20242025);
        assert_eq!(current_season_id(date(2025, 3, 15)), 20242025);
        assert_eq!(current_season_id(date(2025, 8, 31)), 20242025);
        assert_eq!(current_season_id(date(2025, 9, 1)), 20252026);
    }

    #[test]
    fn test_season_label() {
        assert_eq!(season_label(20242025), "2024-25");
        assert_eq!(season_label(20992100), "2099-00");
    }

    #[test]
    fn test_cayenne_exp() {
        assert_eq!(
            cayenne_exp(20242025, GameType::Playoffs),
            "gameTypeId=3 and seasonId<=20242025 and seasonId>=20242025"
        );
    }

    #[tokio::test]
    async fn test_standings_finds_team() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/standings/now")
            .with_status(200)
            .with_body(
                r#"{"standings": [
                    {"teamAbbrev": {"default": "TOR"}, "wins": 10, "losses": 5, "otLosses": 1, "points": 21, "gamesPlayed": 16},
                    {"teamAbbrev": {"default": "FLA"}, "wins": 12, "losses": 3, "otLosses": 2, "points": 26, "gamesPlayed": 17,
                     "divisionName": "Atlantic", "divisionSequence": 1, "conferenceSequence": 2, "leagueSequence": 3}
                ]}"#,
            )
            .create_async()
            .await;

        let client = NhlClient::new(&server.url(), &server.url());
        let row = client.standings("FLA").await.unwrap().unwrap();
        assert_eq!(row.record(), "12-3-2");
        assert_eq!(row.points, 26);
        assert_eq!(row.league_sequence, Some(3));
        assert!(client.standings("EDM").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_schedule_uses_date_path() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/schedule/2024-11-30")
            .with_status(200)
            .with_body(
                r#"{"gameWeek": [{"date": "2024-11-30", "games": [
                    {"id": 7, "gameState": "FUT", "homeTeam": {"id": 13, "abbrev": "FLA"}, "awayTeam": {"id": 6, "abbrev": "BOS"}}
                ]}]}"#,
            )
            .create_async()
            .await;

        let client = NhlClient::new(&format!("{}/", server.url()), &server.url());
        let days = client
            .schedule(NaiveDate::from_ymd_opt(2024, 11, 30).unwrap())
            .await
            .unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].games[0].id, 7);
    }

    #[tokio::test]
    async fn test_team_summaries_sends_cayenne_filter() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/team/summary")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded(
                    "cayenneExp".into(),
                    "gameTypeId=2 and seasonId<=20242025 and seasonId>=20242025".into(),
                ),
                Matcher::UrlEncoded("limit".into(), "32".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"data": [{"teamId": 13, "teamFullName": "Florida Panthers", "points": 98}], "total": 1}"#)
            .create_async()
            .await;

        let client = NhlClient::new(&server.url(), &server.url());
        let teams = client
            .team_summaries(20242025, GameType::Regular)
            .await
            .unwrap();
        assert_eq!(teams[0].team_full_name, "Florida Panthers");
    }

    #[tokio::test]
    async fn test_game_by_id_reads_boxscore() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/gamecenter/2024020345/boxscore")
            .with_status(200)
            .with_body(
                r#"{"id": 2024020345, "gameDate": "2024-11-30", "gameState": "OFF",
                    "homeTeam": {"id": 13, "abbrev": "FLA", "score": 4, "sog": 30},
                    "awayTeam": {"id": 6, "abbrev": "BOS", "score": 2, "sog": 25}}"#,
            )
            .create_async()
            .await;

        let client = NhlClient::new(&server.url(), &server.url());
        let game = client.game(2024020345).await.unwrap();
        assert_eq!(game.game_state, "OFF");
        assert_eq!(game.score_line(), "BOS 2 - 4 FLA");
    }

    #[tokio::test]
    async fn test_playoff_endpoints() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/playoff-bracket/2025")
            .with_status(200)
            .with_body(
                r#"{"series": [{"seriesLetter": "A", "playoffRound": 1, "topSeedWins": 3,
                    "topSeedTeam": {"id": 13, "abbrev": "FLA"}, "bottomSeedTeam": {"id": 14, "abbrev": "TBL"}}]}"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/schedule/playoff-series/20242025/a")
            .with_status(200)
            .with_body(r#"{"games": [{"id": 2024030111, "gameState": "OFF"}]}"#)
            .create_async()
            .await;

        let client = NhlClient::new(&server.url(), &server.url());
        let bracket = client.playoff_bracket(2025).await.unwrap();
        assert_eq!(bracket.series[0].top_seed_wins, 3);
        let games = client.playoff_series_games(20242025, "A").await.unwrap();
        assert_eq!(games[0].id, 2024030111);
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/club-schedule-season/FLA/now")
            .with_status(500)
            .create_async()
            .await;

        let client = NhlClient::new(&server.url(), &server.url());
        assert!(client.club_season("FLA").await.is_err());
    }
}
