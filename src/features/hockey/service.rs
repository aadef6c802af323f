//! Fetch-and-format operations behind the `!cats` subcommands

use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use log::{debug, error, warn};
use rand::seq::IndexedRandom;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::client::{current_season_id, season_label, GameType, NhlClient};
use super::compare::{comparison_card, resolve_team, unknown_team};
use super::format;
use super::models::{Game, PlayoffBracket};
use super::players::{
    no_players_found, player_card, search_players, selection_card, Player, MAX_CHOICES,
};
use super::playoffs;
use super::schedule::{game_on_day, game_scheduled, next_game, recent_games};
use crate::core::{Config, PendingSelections, Reply, TrackedTeam};

/// Games listed by `!cats recent`
pub const RECENT_LIMIT: usize = 5;

/// How long a fetched playoff bracket is reused
pub const BRACKET_TTL: Duration = Duration::from_secs(300);

pub struct HockeyService {
    client: NhlClient,
    team: TrackedTeam,
    timezone: Tz,
    prefix: String,
    players: PendingSelections<Player>,
    bracket: Mutex<Option<(Instant, PlayoffBracket)>>,
}

impl HockeyService {
    pub fn new(config: &Config) -> Self {
        Self::with_client(
            NhlClient::new(&config.nhl_api_base, &config.nhl_stats_api),
            config.team.clone(),
            config.timezone,
            &config.command_prefix,
        )
    }

    pub fn with_client(client: NhlClient, team: TrackedTeam, timezone: Tz, prefix: &str) -> Self {
        Self {
            client,
            team,
            timezone,
            prefix: prefix.to_string(),
            players: PendingSelections::new(),
            bracket: Mutex::new(None),
        }
    }

    pub fn team(&self) -> &TrackedTeam {
        &self.team
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.timezone)
    }

    /// Today's game for the tracked team: league schedule first, then the club's week
    pub async fn current_game(&self) -> Result<Option<Game>> {
        let today = self.now().date_naive();
        match self.client.schedule(today).await {
            Ok(days) => {
                if let Some(game) = game_on_day(&days, today, self.team.id) {
                    return Ok(Some(game));
                }
            }
            Err(e) => warn!("League schedule lookup failed, trying club week: {e:#}"),
        }

        let week = self.client.club_week(&self.team.abbrev).await?;
        Ok(game_scheduled(&week, today))
    }

    pub async fn game_by_id(&self, game_id: i64) -> Result<Game> {
        self.client.game(game_id).await
    }

    pub async fn next_game(&self) -> Result<Option<Game>> {
        let season = self.client.club_season(&self.team.abbrev).await?;
        Ok(next_game(&season, Utc::now()))
    }

    pub async fn overview(&self) -> Result<Reply> {
        let standings = match self.client.standings(&self.team.abbrev).await {
            Ok(row) => row,
            Err(e) => {
                warn!("Standings lookup failed: {e:#}");
                None
            }
        };
        let current = self.current_game().await?;
        let next = match current {
            Some(_) => None,
            None => self.next_game().await?,
        };

        Ok(format::overview_card(
            &self.team,
            &self.prefix,
            standings.as_ref(),
            current.as_ref(),
            next.as_ref(),
            &self.now(),
        )
        .into())
    }

    pub async fn game(&self) -> Result<Reply> {
        let now = self.now();
        if let Some(game) = self.current_game().await? {
            return Ok(format::game_card(&game, &self.team, &now).into());
        }
        Ok(match self.next_game().await? {
            Some(game) => format::next_game_card(&game, &self.team, &now).into(),
            None => Reply::text("No upcoming games found!"),
        })
    }

    pub async fn recent(&self) -> Result<Reply> {
        let season = self.client.club_season(&self.team.abbrev).await?;
        let games = recent_games(&season, Utc::now(), RECENT_LIMIT);
        if games.is_empty() {
            return Ok(Reply::text("No recent games found!"));
        }
        Ok(format::recent_card(&games, &self.team, &self.timezone).into())
    }

    pub fn quote(&self) -> Reply {
        let quote = format::QUOTES
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(format::QUOTES[0]);
        format::quote_card(quote, &self.team).into()
    }

    pub fn help(&self) -> Reply {
        format::help_card(&self.team, &self.prefix).into()
    }

    pub async fn live_status(&self, enabled: bool, subscribed_channels: usize) -> Result<Reply> {
        let today = self.current_game().await?;
        let has_next = match today {
            Some(_) => false,
            None => self.next_game().await?.is_some(),
        };
        Ok(format::live_status_card(
            &self.team,
            enabled,
            subscribed_channels,
            today.as_ref(),
            has_next,
        )
        .into())
    }

    pub async fn compare(&self, team_name: &str) -> Result<Reply> {
        let Some(other_id) = resolve_team(team_name) else {
            return Ok(Reply::text(unknown_team(team_name)));
        };

        let season_id = current_season_id(self.now().date_naive());
        let regular = match self.client.team_summaries(season_id, GameType::Regular).await {
            Ok(rows) => rows,
            Err(e) => {
                error!("Team summary lookup failed: {e:#}");
                return Ok(Reply::text("❌ Error fetching team stats."));
            }
        };
        let playoffs = match self.client.team_summaries(season_id, GameType::Playoffs).await {
            Ok(rows) => rows,
            Err(e) => {
                debug!("No playoff summaries for {season_id}: {e:#}");
                Vec::new()
            }
        };

        Ok(
            match comparison_card(&self.team, other_id, &regular, &playoffs, season_id) {
                Some(card) => card.into(),
                None => Reply::text("❌ Could not find team stats."),
            },
        )
    }

    /// Current season's bracket, cached for [`BRACKET_TTL`]; `None` when the API fails
    async fn playoff_bracket(&self) -> Option<PlayoffBracket> {
        let mut cached = self.bracket.lock().await;
        if let Some((fetched, bracket)) = cached.as_ref() {
            if fetched.elapsed() < BRACKET_TTL {
                return Some(bracket.clone());
            }
        }

        let season_id = current_season_id(self.now().date_naive());
        match self.client.playoff_bracket(season_id % 10_000).await {
            Ok(bracket) => {
                debug!("🏆 Playoff bracket fetched with {} series", bracket.series.len());
                *cached = Some((Instant::now(), bracket.clone()));
                Some(bracket)
            }
            Err(e) => {
                warn!("Playoff bracket lookup failed: {e:#}");
                None
            }
        }
    }

    pub async fn bracket(&self) -> Reply {
        match self.playoff_bracket().await {
            Some(bracket) => playoffs::bracket_card(&bracket, &self.team).into(),
            None => playoffs::bracket_unavailable_card().into(),
        }
    }

    /// The tracked team's series in the latest round it reached, with its games
    pub async fn series(&self) -> Reply {
        let Some(bracket) = self.playoff_bracket().await else {
            return Reply::text(playoffs::NO_PLAYOFF_DATA);
        };
        let Some(series) = bracket.series_for(&self.team.abbrev) else {
            return Reply::text(playoffs::not_in_playoffs(&self.team));
        };

        let season_id = current_season_id(self.now().date_naive());
        let games = match self
            .client
            .playoff_series_games(season_id, &series.series_letter)
            .await
        {
            Ok(games) => games,
            Err(e) => {
                warn!("Games of series {} unavailable: {e:#}", series.series_letter);
                Vec::new()
            }
        };

        match playoffs::series_card(series, &self.team, &games) {
            Some(card) => card.into(),
            None => Reply::text(playoffs::not_in_playoffs(&self.team)),
        }
    }

    pub async fn round(&self, round: Option<u32>) -> Reply {
        match self.playoff_bracket().await {
            Some(bracket) => playoffs::round_card(&bracket, round).into(),
            None => Reply::text(playoffs::NO_PLAYOFF_DATA),
        }
    }

    /// Search players by name; several matches become a pending selection for `user_id`
    pub async fn player(&self, user_id: u64, name: &str) -> Result<Reply> {
        let season_id = current_season_id(self.now().date_naive());
        let (skaters, goalies) = tokio::join!(
            self.client.skater_summaries(season_id),
            self.client.goalie_summaries(season_id)
        );

        let mut pool = Vec::new();
        let mut failures = 0;
        match skaters {
            Ok(rows) => pool.extend(rows.into_iter().map(Player::Skater)),
            Err(e) => {
                warn!("Skater summary lookup failed: {e:#}");
                failures += 1;
            }
        }
        match goalies {
            Ok(rows) => pool.extend(rows.into_iter().map(Player::Goalie)),
            Err(e) => {
                warn!("Goalie summary lookup failed: {e:#}");
                failures += 1;
            }
        }
        if failures == 2 {
            return Ok(Reply::text("❌ Error searching for player stats."));
        }

        let mut found = search_players(name, pool);
        match found.len() {
            0 => Ok(Reply::text(no_players_found(name))),
            1 => Ok(self.player_details(&found[0]).await),
            _ => {
                found.truncate(MAX_CHOICES);
                let card = selection_card(name, &found);
                self.players.offer(user_id, found);
                Ok(card.into())
            }
        }
    }

    pub fn has_pending_player(&self, user_id: u64) -> bool {
        self.players.has_pending(user_id)
    }

    /// Answer a numeric reply to an earlier player list
    pub async fn select_player(&self, user_id: u64, text: &str) -> Option<Reply> {
        let player = self.players.take(user_id, text)?;
        Some(self.player_details(&player).await)
    }

    async fn player_details(&self, player: &Player) -> Reply {
        let landing = match self.client.player_landing(player.id()).await {
            Ok(landing) => Some(landing),
            Err(e) => {
                warn!("Bio lookup for player {} failed: {e:#}", player.id());
                None
            }
        };
        let season = season_label(current_season_id(self.now().date_naive()));
        player_card(player, landing.as_ref(), &season).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    fn service(server: &mockito::Server) -> HockeyService {
        service_at(&server.url())
    }

    fn service_at(url: &str) -> HockeyService {
        HockeyService::with_client(
            NhlClient::new(url, url),
            TrackedTeam::default(),
            New_York,
            "!",
        )
    }

    #[tokio::test]
    async fn test_compare_unknown_team() {
        let server = mockito::Server::new_async().await;
        let reply = service(&server).compare("whalers").await.unwrap();
        assert_eq!(reply.as_text(), Some(unknown_team("whalers").as_str()));
    }

    #[tokio::test]
    async fn test_compare_reports_stats_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/team/summary")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        let reply = service(&server).compare("oilers").await.unwrap();
        assert_eq!(reply.as_text(), Some("❌ Error fetching team stats."));
    }

    #[tokio::test]
    async fn test_player_search_offers_selection() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/skater/summary")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"data": [
                    {"playerId": 1, "skaterFullName": "Matthew Tkachuk", "lastName": "Tkachuk", "teamAbbrevs": "FLA", "positionCode": "L", "points": 80},
                    {"playerId": 2, "skaterFullName": "Brady Tkachuk", "lastName": "Tkachuk", "teamAbbrevs": "OTT", "positionCode": "L", "points": 70}
                ]}"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/goalie/summary")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/player/2/landing")
            .with_status(200)
            .with_body(r#"{"sweaterNumber": 7}"#)
            .create_async()
            .await;

        let hockey = service(&server);
        let reply = hockey.player(42, "tkachuk").await.unwrap();
        assert!(reply.as_card().unwrap().title.contains("Multiple players found"));
        assert!(hockey.has_pending_player(42));

        assert!(hockey.select_player(42, "x").await.is_none());
        // closest name first: "brady tkachuk" is nearer to "tkachuk" than "matthew tkachuk"
        let picked = hockey.select_player(42, "1").await.unwrap();
        let card = picked.as_card().unwrap();
        assert_eq!(card.title, "🏒 Brady Tkachuk");
        assert!(card.field_value("Player Info").unwrap().contains("#7"));
        assert!(!hockey.has_pending_player(42));
    }

    #[tokio::test]
    async fn test_player_search_both_reports_failing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;
        let reply = service(&server).player(1, "barkov").await.unwrap();
        assert_eq!(reply.as_text(), Some("❌ Error searching for player stats."));
    }

    const BRACKET: &str = r#"{"series": [
        {"seriesLetter": "A", "playoffRound": 1, "topSeedWins": 1, "bottomSeedWins": 4,
         "topSeedTeam": {"id": 14, "abbrev": "TBL"}, "bottomSeedTeam": {"id": 13, "abbrev": "FLA"}},
        {"seriesLetter": "I", "playoffRound": 2, "topSeedWins": 2, "bottomSeedWins": 3,
         "topSeedTeam": {"id": 10, "abbrev": "TOR", "name": {"default": "Maple Leafs"}},
         "bottomSeedTeam": {"id": 13, "abbrev": "FLA"}}
    ]}"#;

    fn playoff_year() -> u32 {
        current_season_id(Utc::now().with_timezone(&New_York).date_naive()) % 10_000
    }

    #[tokio::test]
    async fn test_bracket_is_cached() {
        let mut server = mockito::Server::new_async().await;
        let bracket = server
            .mock("GET", format!("/playoff-bracket/{}", playoff_year()).as_str())
            .with_status(200)
            .with_body(BRACKET)
            .expect(1)
            .create_async()
            .await;

        let hockey = service(&server);
        let first = hockey.bracket().await;
        let card = first.as_card().unwrap();
        assert_eq!(card.title, "🏆 Stanley Cup Playoffs Bracket");
        assert_eq!(card.field_value("🥅 First Round"), Some("⚡ TBL 1-4 FLA 🐾"));

        let summary = hockey.round(Some(2)).await;
        assert_eq!(
            summary.as_card().unwrap().field_value("⚡ Second Round"),
            Some("🍁 **TOR** 2 - 3 **FLA** 🐾")
        );
        bracket.assert_async().await;
    }

    #[tokio::test]
    async fn test_bracket_outage() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let hockey = service(&server);
        let card = hockey.bracket().await;
        assert_eq!(
            card.as_card().unwrap().description.as_deref(),
            Some("⚠️ NHL playoff API is currently unavailable")
        );
        assert_eq!(hockey.series().await.as_text(), Some(playoffs::NO_PLAYOFF_DATA));
        assert_eq!(hockey.round(None).await.as_text(), Some(playoffs::NO_PLAYOFF_DATA));
    }

    #[tokio::test]
    async fn test_series_lists_games() {
        let mut server = mockito::Server::new_async().await;
        let year = playoff_year();
        server
            .mock("GET", format!("/playoff-bracket/{year}").as_str())
            .with_status(200)
            .with_body(BRACKET)
            .create_async()
            .await;
        server
            .mock(
                "GET",
                format!("/schedule/playoff-series/{}{year}/i", year - 1).as_str(),
            )
            .with_status(200)
            .with_body(
                r#"{"games": [
                    {"id": 1, "gameState": "OFF", "gameDate": "2025-05-05",
                     "homeTeam": {"abbrev": "TOR", "score": 2}, "awayTeam": {"abbrev": "FLA", "score": 3}}
                ]}"#,
            )
            .create_async()
            .await;

        let reply = service(&server).series().await;
        let card = reply.as_card().unwrap();
        assert_eq!(card.field_value("Games"), Some("Game 1: FLA 3 - 2 TOR"));
        assert!(card
            .field_value("Series Score")
            .unwrap()
            .ends_with("3 - 2 **Maple Leafs**"));
    }

    #[tokio::test]
    async fn test_series_team_not_in_playoffs() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", format!("/playoff-bracket/{}", playoff_year()).as_str())
            .with_status(200)
            .with_body(r#"{"series": []}"#)
            .create_async()
            .await;
        let reply = service(&server).series().await;
        assert_eq!(
            reply.as_text(),
            Some(playoffs::not_in_playoffs(&TrackedTeam::default()).as_str())
        );
    }

    #[test]
    fn test_quote_is_from_list() {
        let reply = service_at("http://127.0.0.1:9").quote();
        let card = reply.as_card().unwrap();
        assert!(format::QUOTES.contains(&card.description.as_deref().unwrap()));
    }
}
