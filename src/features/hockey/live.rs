//! Live game updates for subscribed channels
//!
//! The monitor keeps the last score seen per game and compares each poll to it.
//! Goals win over period changes within one poll, and a game end is only
//! reported for a game that was seen live. A game with a snapshot is followed
//! by id until it ends, so a game running past midnight is not lost when
//! "today" moves on.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use dashmap::{DashMap, DashSet};
use log::{error, info, warn};
use serenity::http::Http;
use serenity::model::id::ChannelId;
use std::sync::Arc;
use std::time::Duration;

use super::models::Game;
use super::service::HockeyService;
use crate::core::{Config, TrackedTeam};

/// Last state seen of one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub home_abbrev: String,
    pub away_abbrev: String,
    pub home_score: u32,
    pub away_score: u32,
    pub period: Option<u32>,
}

impl Snapshot {
    pub fn of(game: &Game) -> Self {
        Self {
            home_abbrev: game.home_team.abbrev_or("HOME").to_string(),
            away_abbrev: game.away_team.abbrev_or("AWAY").to_string(),
            home_score: game.home_score(),
            away_score: game.away_score(),
            period: game.period(),
        }
    }

    fn score_line(&self) -> String {
        format!(
            "{} {} - {} {}",
            self.away_abbrev, self.away_score, self.home_score, self.home_abbrev
        )
    }

    fn period_label(&self) -> String {
        self.period.map(|p| p.to_string()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveEvent {
    Goal { previous: Snapshot, current: Snapshot },
    PeriodStart(Snapshot),
    GameEnd(Snapshot),
}

/// Poll cadence of the monitor loop
#[derive(Debug, Clone, Copy)]
pub struct PollCadence {
    pub prime: Duration,
    pub idle: Duration,
    pub backoff: Duration,
}

impl PollCadence {
    pub fn from_config(config: &Config) -> Self {
        Self {
            prime: config.live_poll_interval,
            idle: config.live_idle_interval,
            backoff: config.live_error_backoff,
        }
    }

    /// Short interval from 18:00 to 23:59 local time, when games are played
    pub fn delay_at(&self, now: &DateTime<Tz>) -> Duration {
        if (18..=23).contains(&now.hour()) {
            self.prime
        } else {
            self.idle
        }
    }
}

/// Hours after which an unrefreshed snapshot belongs to a game we lost track of
pub const STALE_AFTER_HOURS: i64 = 6;

pub struct LiveMonitor {
    team: TrackedTeam,
    channels: DashSet<u64>,
    /// Last snapshot per game id and when it was taken
    snapshots: DashMap<i64, (Snapshot, DateTime<Utc>)>,
}

impl LiveMonitor {
    pub fn new(team: TrackedTeam) -> Self {
        Self {
            team,
            channels: DashSet::new(),
            snapshots: DashMap::new(),
        }
    }

    pub fn subscribe(&self, channel_id: u64) {
        self.channels.insert(channel_id);
        info!("Live updates enabled for channel {channel_id}");
    }

    pub fn unsubscribe(&self, channel_id: u64) {
        self.channels.remove(&channel_id);
        info!("Live updates disabled for channel {channel_id}");
    }

    pub fn is_subscribed(&self, channel_id: u64) -> bool {
        self.channels.contains(&channel_id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.channels.len()
    }

    /// Compare `game` to the stored snapshot and record it
    pub fn observe(&self, game: &Game) -> Option<LiveEvent> {
        self.observe_at(game, Utc::now())
    }

    pub fn observe_at(&self, game: &Game, now: DateTime<Utc>) -> Option<LiveEvent> {
        if game.is_live() {
            let current = Snapshot::of(game);
            let (previous, _) = self.snapshots.insert(game.id, (current.clone(), now))?;
            if previous.home_score != current.home_score || previous.away_score != current.away_score {
                Some(LiveEvent::Goal { previous, current })
            } else if previous.period != current.period {
                Some(LiveEvent::PeriodStart(current))
            } else {
                None
            }
        } else if game.game_state == "OFF" {
            self.snapshots
                .remove(&game.id)
                .map(|_| LiveEvent::GameEnd(Snapshot::of(game)))
        } else {
            None
        }
    }

    /// Ids of games seen live and not yet reported as ended
    pub fn followed_games(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.snapshots.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }

    /// Drop snapshots older than [`STALE_AFTER_HOURS`], returning their game ids
    pub fn forget_stale(&self, now: DateTime<Utc>) -> Vec<i64> {
        let stale: Vec<i64> = self
            .snapshots
            .iter()
            .filter(|entry| now - entry.value().1 > chrono::Duration::hours(STALE_AFTER_HOURS))
            .map(|entry| *entry.key())
            .collect();
        for id in &stale {
            self.snapshots.remove(id);
        }
        stale
    }

    fn is_tracked(&self, abbrev: &str) -> bool {
        abbrev.eq_ignore_ascii_case(&self.team.abbrev)
    }

    pub fn announcement(&self, event: &LiveEvent) -> String {
        let team = self.team.name.to_uppercase();
        match event {
            LiveEvent::Goal { previous, current } => {
                let we_scored = if self.is_tracked(&current.home_abbrev) {
                    current.home_score > previous.home_score
                } else {
                    current.away_score > previous.away_score
                };
                let headline = if we_scored {
                    format!("🚨 **{team} GOAL!** 🚨")
                } else {
                    "⚪ Goal scored".to_string()
                };
                format!(
                    "{headline}\n{}\nPeriod {}",
                    current.score_line(),
                    current.period_label()
                )
            }
            LiveEvent::PeriodStart(current) => format!(
                "🏒 **Period {} Starting**\n{}",
                current.period_label(),
                current.score_line()
            ),
            LiveEvent::GameEnd(last) => {
                let won = if self.is_tracked(&last.home_abbrev) {
                    last.home_score > last.away_score
                } else {
                    last.away_score > last.home_score
                };
                let headline = if won {
                    format!("🎉 **{team} WIN!** 🎉")
                } else {
                    "😞 **Game Over**".to_string()
                };
                format!("{headline}\nFinal: {}", last.score_line())
            }
        }
    }

    /// Send `text` to every subscribed channel, dropping channels that fail
    async fn broadcast(&self, http: &Http, text: &str) {
        let targets: Vec<u64> = self.channels.iter().map(|id| *id).collect();
        for channel_id in targets {
            if let Err(e) = ChannelId(channel_id).say(http, text).await {
                error!("Failed to send live update to channel {channel_id}: {e}");
                self.unsubscribe(channel_id);
            }
        }
    }

    /// Events from today's game and from every game still followed by id
    pub async fn collect_events(&self, hockey: &HockeyService) -> anyhow::Result<Vec<(i64, LiveEvent)>> {
        let now = Utc::now();
        for id in self.forget_stale(now) {
            warn!("Dropping stale live snapshot for game {id}");
        }

        let current = hockey.current_game().await;
        let current_id = current.as_ref().ok().and_then(|game| game.as_ref()).map(|game| game.id);

        let mut events = Vec::new();
        for id in self.followed_games() {
            if Some(id) == current_id {
                continue;
            }
            match hockey.game_by_id(id).await {
                Ok(game) => events.extend(self.observe_at(&game, now).map(|event| (id, event))),
                Err(e) => warn!("Could not refresh followed game {id}: {e:#}"),
            }
        }

        if let Some(game) = current? {
            events.extend(self.observe_at(&game, now).map(|event| (game.id, event)));
        }
        Ok(events)
    }

    /// One poll: announce every change to all subscribed channels
    pub async fn poll_once(&self, hockey: &HockeyService, http: &Http) -> anyhow::Result<()> {
        if self.channels.is_empty() {
            return Ok(());
        }
        for (game_id, event) in self.collect_events(hockey).await? {
            let text = self.announcement(&event);
            info!("📣 Live update for game {game_id}: {}", text.replace('\n', " | "));
            self.broadcast(http, &text).await;
        }
        Ok(())
    }

    /// Poll forever. Errors are logged and followed by the backoff delay.
    pub async fn run(self: Arc<Self>, hockey: Arc<HockeyService>, http: Arc<Http>, cadence: PollCadence) {
        info!("🏒 Live game monitor started!");
        loop {
            let delay = match self.poll_once(&hockey, &http).await {
                Ok(()) => cadence.delay_at(&hockey.now()),
                Err(e) => {
                    warn!("Error in live game monitor: {e:#}");
                    cadence.backoff
                }
            };
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::hockey::models::{GameTeam, PeriodDescriptor};
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    fn game(state: &str, home: u32, away: u32, period: u32) -> Game {
        Game {
            id: 77,
            game_state: state.into(),
            home_team: GameTeam {
                id: 13,
                abbrev: "FLA".into(),
                score: Some(home),
                sog: None,
            },
            away_team: GameTeam {
                id: 6,
                abbrev: "BOS".into(),
                score: Some(away),
                sog: None,
            },
            period_descriptor: Some(PeriodDescriptor {
                number: Some(period),
            }),
            ..Default::default()
        }
    }

    fn monitor() -> LiveMonitor {
        LiveMonitor::new(TrackedTeam::default())
    }

    #[test]
    fn test_first_live_poll_only_records() {
        let live = monitor();
        assert_eq!(live.observe(&game("LIVE", 0, 0, 1)), None);
        assert_eq!(live.observe(&game("LIVE", 0, 0, 1)), None);
    }

    #[test]
    fn test_goal_reported_once() {
        let live = monitor();
        live.observe(&game("LIVE", 0, 0, 1));
        let event = live.observe(&game("LIVE", 1, 0, 1)).unwrap();
        assert_eq!(
            live.announcement(&event),
            "🚨 **PANTHERS GOAL!** 🚨\nBOS 0 - 1 FLA\nPeriod 1"
        );
        assert_eq!(live.observe(&game("LIVE", 1, 0, 1)), None);
    }

    #[test]
    fn test_opponent_goal() {
        let live = monitor();
        live.observe(&game("CRIT", 2, 2, 3));
        let event = live.observe(&game("CRIT", 2, 3, 3)).unwrap();
        assert_eq!(
            live.announcement(&event),
            "⚪ Goal scored\nBOS 3 - 2 FLA\nPeriod 3"
        );
    }

    #[test]
    fn test_goal_wins_over_period_change() {
        let live = monitor();
        live.observe(&game("LIVE", 0, 0, 1));
        let event = live.observe(&game("LIVE", 0, 1, 2)).unwrap();
        assert!(matches!(event, LiveEvent::Goal { .. }));
        assert_eq!(live.observe(&game("LIVE", 0, 1, 2)), None);
    }

    #[test]
    fn test_period_start() {
        let live = monitor();
        live.observe(&game("LIVE", 1, 0, 1));
        let event = live.observe(&game("LIVE", 1, 0, 2)).unwrap();
        assert_eq!(
            live.announcement(&event),
            "🏒 **Period 2 Starting**\nBOS 0 - 1 FLA"
        );
    }

    #[test]
    fn test_game_end_needs_live_snapshot() {
        let live = monitor();
        assert_eq!(live.observe(&game("OFF", 3, 1, 3)), None);

        live.observe(&game("LIVE", 3, 1, 3));
        let event = live.observe(&game("OFF", 3, 1, 3)).unwrap();
        assert_eq!(
            live.announcement(&event),
            "🎉 **PANTHERS WIN!** 🎉\nFinal: BOS 1 - 3 FLA"
        );
        assert_eq!(live.observe(&game("OFF", 3, 1, 3)), None);
    }

    #[test]
    fn test_game_end_loss() {
        let live = monitor();
        live.observe(&game("LIVE", 1, 2, 3));
        let event = live.observe(&game("OFF", 1, 4, 3)).unwrap();
        assert_eq!(
            live.announcement(&event),
            "😞 **Game Over**\nFinal: BOS 4 - 1 FLA"
        );
    }

    #[test]
    fn test_final_state_other_than_off_keeps_snapshot() {
        let live = monitor();
        live.observe(&game("LIVE", 1, 0, 3));
        assert_eq!(live.observe(&game("FINAL", 1, 0, 3)), None);
        assert!(live.observe(&game("OFF", 1, 0, 3)).is_some());
    }

    #[test]
    fn test_stale_snapshots_are_forgotten() {
        let live = monitor();
        let seen = Utc.with_ymd_and_hms(2024, 12, 1, 4, 50, 0).unwrap();
        live.observe_at(&game("LIVE", 1, 1, 2), seen);
        assert_eq!(live.followed_games(), vec![77]);

        assert!(live.forget_stale(seen + chrono::Duration::hours(1)).is_empty());
        assert_eq!(live.forget_stale(seen + chrono::Duration::hours(7)), vec![77]);
        assert!(live.followed_games().is_empty());
        assert_eq!(live.observe(&game("OFF", 2, 1, 3)), None);
    }

    fn after_midnight_server_mocks() -> Vec<(&'static str, &'static str)> {
        vec![
            (r"^/schedule/", r#"{"gameWeek": []}"#),
            (r"^/club-schedule/FLA/week/now$", r#"{"games": []}"#),
        ]
    }

    async fn server_with_boxscore(body: &str) -> mockito::ServerGuard {
        let mut server = mockito::Server::new_async().await;
        for (path, payload) in after_midnight_server_mocks() {
            server
                .mock("GET", mockito::Matcher::Regex(path.to_string()))
                .with_status(200)
                .with_body(payload)
                .create_async()
                .await;
        }
        server
            .mock("GET", "/gamecenter/77/boxscore")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;
        server
    }

    fn hockey_at(server: &mockito::ServerGuard) -> HockeyService {
        HockeyService::with_client(
            crate::features::hockey::NhlClient::new(&server.url(), &server.url()),
            TrackedTeam::default(),
            New_York,
            "!",
        )
    }

    #[tokio::test]
    async fn test_game_end_after_midnight_is_reported() {
        let server = server_with_boxscore(
            r#"{"id": 77, "gameState": "OFF",
                "homeTeam": {"id": 13, "abbrev": "FLA", "score": 2},
                "awayTeam": {"id": 6, "abbrev": "BOS", "score": 1},
                "periodDescriptor": {"number": 3}}"#,
        )
        .await;
        let live = monitor();
        // seen live before midnight; today's schedule no longer lists it
        live.observe(&game("LIVE", 2, 1, 3));

        let events = live.collect_events(&hockey_at(&server)).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, 77);
        assert_eq!(
            live.announcement(&events[0].1),
            "🎉 **PANTHERS WIN!** 🎉\nFinal: BOS 1 - 2 FLA"
        );
        assert!(live.followed_games().is_empty());
    }

    #[tokio::test]
    async fn test_goal_after_midnight_is_reported() {
        let server = server_with_boxscore(
            r#"{"id": 77, "gameState": "LIVE",
                "homeTeam": {"id": 13, "abbrev": "FLA", "score": 3},
                "awayTeam": {"id": 6, "abbrev": "BOS", "score": 1},
                "periodDescriptor": {"number": 3}}"#,
        )
        .await;
        let live = monitor();
        live.observe(&game("LIVE", 2, 1, 3));

        let events = live.collect_events(&hockey_at(&server)).await.unwrap();
        assert_eq!(
            live.announcement(&events[0].1),
            "🚨 **PANTHERS GOAL!** 🚨\nBOS 1 - 3 FLA\nPeriod 3"
        );
        assert_eq!(live.followed_games(), vec![77]);
    }

    #[test]
    fn test_subscriptions() {
        let live = monitor();
        live.subscribe(10);
        live.subscribe(10);
        live.subscribe(11);
        assert_eq!(live.subscriber_count(), 2);
        assert!(live.is_subscribed(10));
        live.unsubscribe(10);
        assert!(!live.is_subscribed(10));
        assert_eq!(live.subscriber_count(), 1);
    }

    #[test]
    fn test_cadence_prime_hours() {
        let cadence = PollCadence {
            prime: Duration::from_secs(30),
            idle: Duration::from_secs(300),
            backoff: Duration::from_secs(60),
        };
        let at = |h| New_York.with_ymd_and_hms(2024, 11, 30, h, 15, 0).unwrap();
        assert_eq!(cadence.delay_at(&at(17)), Duration::from_secs(300));
        assert_eq!(cadence.delay_at(&at(18)), Duration::from_secs(30));
        assert_eq!(cadence.delay_at(&at(23)), Duration::from_secs(30));
        assert_eq!(cadence.delay_at(&at(0)), Duration::from_secs(300));
    }
}
