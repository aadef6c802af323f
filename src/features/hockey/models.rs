//! Response shapes of the NHL web and stats APIs, reduced to the fields the bot reads

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// Game states after which a game counts as played
pub const FINAL_STATES: [&str; 5] = ["OFF", "FINAL", "OVER", "FINAL_OT", "FINAL_SO"];

/// Text that is either a bare string or an object with a `default` translation
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    Localized { default: String },
}

impl LocalizedText {
    pub fn as_str(&self) -> &str {
        match self {
            LocalizedText::Plain(text) => text,
            LocalizedText::Localized { default } => default,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct GameTeam {
    pub id: i64,
    pub abbrev: String,
    pub score: Option<u32>,
    pub sog: Option<u32>,
}

impl GameTeam {
    pub fn abbrev_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.abbrev.is_empty() {
            fallback
        } else {
            &self.abbrev
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PeriodDescriptor {
    pub number: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Clock {
    pub time_remaining: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SeriesStatus {
    pub series_title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Game {
    pub id: i64,
    pub game_date: Option<String>,
    #[serde(rename = "startTimeUTC")]
    pub start_time_utc: Option<String>,
    pub game_state: String,
    pub home_team: GameTeam,
    pub away_team: GameTeam,
    pub venue: Option<LocalizedText>,
    pub period_descriptor: Option<PeriodDescriptor>,
    pub clock: Option<Clock>,
    pub series_status: Option<SeriesStatus>,
}

impl Game {
    pub fn is_live(&self) -> bool {
        matches!(self.game_state.as_str(), "LIVE" | "CRIT")
    }

    pub fn is_final(&self) -> bool {
        FINAL_STATES.contains(&self.game_state.as_str())
    }

    pub fn involves(&self, team_id: i64) -> bool {
        self.home_team.id == team_id || self.away_team.id == team_id
    }

    pub fn home_score(&self) -> u32 {
        self.home_team.score.unwrap_or(0)
    }

    pub fn away_score(&self) -> u32 {
        self.away_team.score.unwrap_or(0)
    }

    pub fn period(&self) -> Option<u32> {
        self.period_descriptor.as_ref().and_then(|p| p.number)
    }

    pub fn time_remaining(&self) -> &str {
        self.clock.as_ref().map(|c| c.time_remaining.as_str()).unwrap_or("")
    }

    pub fn venue_name(&self) -> Option<&str> {
        self.venue
            .as_ref()
            .map(LocalizedText::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn series_title(&self) -> Option<&str> {
        self.series_status
            .as_ref()
            .and_then(|s| s.series_title.as_deref())
            .filter(|t| !t.is_empty())
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.start_time_utc.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// Scheduled day as published by the league (local to the venue)
    pub fn game_day(&self) -> Option<NaiveDate> {
        let raw = self.game_date.as_deref()?;
        NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()
    }

    /// `AWY a - h HOM`
    pub fn score_line(&self) -> String {
        format!(
            "{} {} - {} {}",
            self.away_team.abbrev_or("AWAY"),
            self.away_score(),
            self.home_score(),
            self.home_team.abbrev_or("HOME")
        )
    }

    pub fn shots_line(&self) -> Option<String> {
        let home = self.home_team.sog.unwrap_or(0);
        let away = self.away_team.sog.unwrap_or(0);
        if home == 0 && away == 0 {
            return None;
        }
        Some(format!(
            "{} {} - {} {}",
            self.away_team.abbrev_or("AWAY"),
            away,
            home,
            self.home_team.abbrev_or("HOME")
        ))
    }

    pub fn is_home(&self, team_id: i64) -> bool {
        self.home_team.id == team_id
    }

    /// The other side from `team_id`'s point of view
    pub fn opponent(&self, team_id: i64) -> &GameTeam {
        if self.is_home(team_id) {
            &self.away_team
        } else {
            &self.home_team
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameDay {
    pub date: String,
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleResponse {
    pub game_week: Vec<GameDay>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClubScheduleResponse {
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StandingsRow {
    pub team_abbrev: Option<LocalizedText>,
    pub division_name: Option<String>,
    pub conference_name: Option<String>,
    pub wins: u32,
    pub losses: u32,
    pub ot_losses: u32,
    pub points: u32,
    pub games_played: u32,
    pub division_sequence: Option<u32>,
    pub conference_sequence: Option<u32>,
    pub league_sequence: Option<u32>,
}

impl StandingsRow {
    pub fn abbrev(&self) -> &str {
        self.team_abbrev.as_ref().map(LocalizedText::as_str).unwrap_or("")
    }

    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.ot_losses)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StandingsResponse {
    pub standings: Vec<StandingsRow>,
}

/// Envelope of every stats API report
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamSummary {
    pub team_id: i64,
    pub team_full_name: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ot_losses: Option<u32>,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub power_play_pct: Option<f64>,
    pub penalty_kill_pct: Option<f64>,
    pub shots_for_per_game: Option<f64>,
    pub shots_against_per_game: Option<f64>,
    pub faceoff_win_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SkaterSummary {
    pub player_id: i64,
    pub skater_full_name: String,
    pub last_name: String,
    pub team_abbrevs: String,
    pub position_code: String,
    pub games_played: u32,
    pub goals: u32,
    pub assists: u32,
    pub points: u32,
    pub plus_minus: i32,
    pub penalty_minutes: u32,
    pub shots: u32,
    pub shooting_pct: Option<f64>,
    /// Seconds per game
    pub time_on_ice_per_game: Option<f64>,
    pub hits: Option<u32>,
    pub blocked_shots: Option<u32>,
    pub power_play_goals: u32,
    pub power_play_points: u32,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalieSummary {
    pub player_id: i64,
    pub goalie_full_name: String,
    pub last_name: String,
    pub team_abbrevs: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ot_losses: u32,
    pub save_pct: Option<f64>,
    pub goals_against_average: Option<f64>,
    pub shutouts: u32,
    pub shots_against: u32,
    pub saves: u32,
    pub goals_against: u32,
    /// Total seconds
    pub time_on_ice: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerLanding {
    pub headshot: Option<String>,
    pub sweater_number: Option<u32>,
    pub height_in_inches: Option<u32>,
    pub weight_in_pounds: Option<u32>,
    pub birth_city: Option<LocalizedText>,
    pub birth_country: Option<LocalizedText>,
}

/// Team on one side of a playoff series
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct BracketTeam {
    pub id: i64,
    pub abbrev: String,
    pub name: Option<LocalizedText>,
}

impl BracketTeam {
    pub fn display_name(&self) -> &str {
        self.name
            .as_ref()
            .map(LocalizedText::as_str)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.abbrev)
    }
}

/// One side of a series from the point of view of a team
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSide<'a> {
    pub team: &'a BracketTeam,
    pub wins: u32,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayoffSeries {
    pub series_letter: String,
    pub playoff_round: u32,
    pub top_seed_team: Option<BracketTeam>,
    pub top_seed_wins: u32,
    pub bottom_seed_team: Option<BracketTeam>,
    pub bottom_seed_wins: u32,
}

/// Wins needed to take a series
pub const SERIES_WINS: u32 = 4;

impl PlayoffSeries {
    /// Both sides, top seed first, once both teams are known
    pub fn sides(&self) -> Option<(SeriesSide<'_>, SeriesSide<'_>)> {
        let top = self.top_seed_team.as_ref().filter(|t| !t.abbrev.is_empty())?;
        let bottom = self.bottom_seed_team.as_ref().filter(|t| !t.abbrev.is_empty())?;
        Some((
            SeriesSide { team: top, wins: self.top_seed_wins },
            SeriesSide { team: bottom, wins: self.bottom_seed_wins },
        ))
    }

    /// `(team, opponent)` when `abbrev` plays in this series
    pub fn sides_for(&self, abbrev: &str) -> Option<(SeriesSide<'_>, SeriesSide<'_>)> {
        let (top, bottom) = self.sides()?;
        if top.team.abbrev.eq_ignore_ascii_case(abbrev) {
            Some((top, bottom))
        } else if bottom.team.abbrev.eq_ignore_ascii_case(abbrev) {
            Some((bottom, top))
        } else {
            None
        }
    }

    pub fn is_decided(&self) -> bool {
        self.top_seed_wins >= SERIES_WINS || self.bottom_seed_wins >= SERIES_WINS
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayoffBracket {
    pub series: Vec<PlayoffSeries>,
}

impl PlayoffBracket {
    /// Series grouped by round number, rounds ascending
    pub fn rounds(&self) -> Vec<(u32, Vec<&PlayoffSeries>)> {
        let mut rounds: Vec<(u32, Vec<&PlayoffSeries>)> = Vec::new();
        for series in &self.series {
            match rounds.iter_mut().find(|(number, _)| *number == series.playoff_round) {
                Some((_, list)) => list.push(series),
                None => rounds.push((series.playoff_round, vec![series])),
            }
        }
        rounds.sort_by_key(|(number, _)| *number);
        rounds
    }

    /// The team's series in the latest round it reached
    pub fn series_for(&self, abbrev: &str) -> Option<&PlayoffSeries> {
        self.series
            .iter()
            .filter(|series| series.sides_for(abbrev).is_some())
            .max_by_key(|series| series.playoff_round)
    }
}
