//! Cards and texts for the `!cats` family
//!
//! Everything here is pure: callers pass the fetched data and the current time
//! in the bot timezone.

use chrono::DateTime;
use chrono_tz::Tz;

use super::models::{Game, StandingsRow};
use crate::core::embeds::{GREY, TEAM_COLOR};
use crate::core::{Card, TrackedTeam};

pub const QUOTES: [&str; 10] = [
    "\"We're just taking it one game at a time.\" - Aleksander Barkov",
    "\"The fans here are incredible. We feed off their energy.\" - Matthew Tkachuk",
    "\"This team has something special. We believe in each other.\" - Aaron Ekblad",
    "\"Florida is a hockey state now, and we're proud to represent it.\" - Sam Reinhart",
    "\"We play for each other and for this city.\" - Carter Verhaeghe",
    "\"The culture here is different. We're all pulling in the same direction.\" - Gustav Forsling",
    "\"Every shift matters. Every game matters.\" - Brandon Montour",
    "\"We want to bring a Cup to South Florida.\" - Sergei Bobrovsky",
    "\"The chemistry on this team is unreal.\" - Sam Bennett",
    "\"We're not done yet. We want more.\" - Paul Maurice (Head Coach)",
];

pub const INVALID_LIVE_OPTION: &str = "Invalid option. Use `on`, `off`, or `status`.";

pub fn live_usage(prefix: &str) -> String {
    format!(
        "Usage: `{p}cats live on/off/status`\n\
         - `{p}cats live on` - Enable live score updates in this channel\n\
         - `{p}cats live off` - Disable live score updates\n\
         - `{p}cats live status` - Check current status",
        p = prefix
    )
}

pub fn unknown_subcommand(prefix: &str) -> String {
    format!(
        "Unknown command. Use `{p}cats`, `{p}cats game`, `{p}cats live`, `{p}cats vs <team>`, \
         `{p}cats player <name>`, `{p}cats bracket`, `{p}cats series`, `{p}cats round [n]`, or `{p}cats help`",
        p = prefix
    )
}

fn commands_list(prefix: &str) -> Vec<(String, &'static str)> {
    vec![
        (format!("`{prefix}cats`"), "Team overview, standings, and next/current game"),
        (format!("`{prefix}cats quote`"), "Random player or coach quote"),
        (format!("`{prefix}cats game`"), "Detailed current or next game information"),
        (format!("`{prefix}cats recent`"), "Last 5 games with results"),
        (format!("`{prefix}cats vs <team>`"), "Team comparison with detailed stats"),
        (format!("`{prefix}cats player <name>`"), "NHL player stats lookup"),
        (format!("`{prefix}cats bracket`"), "🏆 Stanley Cup playoff bracket"),
        (format!("`{prefix}cats series`"), "Current playoff series status"),
        (format!("`{prefix}cats round [n]`"), "Playoff round summary"),
        (format!("`{prefix}cats live on/off/status`"), "🚨 Toggle live game updates"),
        (format!("`{prefix}cats help`"), "This help message"),
    ]
}

fn rank(value: Option<u32>) -> String {
    match value {
        Some(n) => format!("#{n}"),
        None => "#N/A".to_string(),
    }
}

fn location(game: &Game, team_id: i64) -> &'static str {
    if game.is_home(team_id) {
        "🏠 HOME"
    } else {
        "✈️ AWAY"
    }
}

/// Kick-off in the bot timezone, `07:00 PM EST`
fn start_clock(game: &Game, tz: &Tz) -> Option<String> {
    game.start_time()
        .map(|t| t.with_timezone(tz).format("%I:%M %p %Z").to_string())
}

/// `Today`, or the game day formatted with `fmt`
fn day_label(game: &Game, now: &DateTime<Tz>, fmt: &str) -> Option<String> {
    let day = game
        .start_time()
        .map(|t| t.with_timezone(&now.timezone()).date_naive())
        .or_else(|| game.game_day())?;
    if day == now.date_naive() {
        Some("Today".to_string())
    } else {
        Some(day.format(fmt).to_string())
    }
}

pub fn live_summary(game: &Game) -> String {
    let mut out = String::from("🔴 **LIVE GAME**");
    if let Some(series) = game.series_title() {
        out.push_str(&format!(" - {series}"));
    }
    out.push_str(&format!("\n{}\n", game.score_line()));
    out.push_str(&format!(
        "Period {} - {}",
        game.period().map(|p| p.to_string()).unwrap_or_default(),
        game.time_remaining()
    ));
    if let Some(venue) = game.venue_name() {
        out.push_str(&format!("\n📍 {venue}"));
    }
    out
}

pub fn upcoming_summary(game: &Game, team_id: i64, now: &DateTime<Tz>) -> String {
    let mut when = day_label(game, now, "%b %d").unwrap_or_else(|| "Today".to_string());
    if let Some(clock) = start_clock(game, &now.timezone()) {
        when.push_str(&format!(" @ {clock}"));
    }

    let home_away = if game.is_home(team_id) { "HOME" } else { "AWAY" };
    let mut out = format!("🏒 **NEXT GAME** - {when}\n");
    if let Some(series) = game.series_title() {
        out.push_str(&format!("{series} "));
    }
    out.push_str(&format!(
        "vs {} ({home_away})",
        game.opponent(team_id).abbrev
    ));
    if let Some(venue) = game.venue_name() {
        out.push_str(&format!("\n📍 {venue}"));
    }
    out
}

pub fn overview_card(
    team: &TrackedTeam,
    prefix: &str,
    standings: Option<&StandingsRow>,
    current: Option<&Game>,
    next: Option<&Game>,
    now: &DateTime<Tz>,
) -> Card {
    let mut card = Card::new(format!("🐾 {}", team.name), TEAM_COLOR);

    if let Some(row) = standings {
        let division = row
            .division_name
            .as_deref()
            .map(|d| format!("{d} Division"))
            .unwrap_or_else(|| "Division".to_string());
        let conference = row
            .conference_name
            .as_deref()
            .map(|c| format!("{c} Conference"))
            .unwrap_or_else(|| "Conference".to_string());
        card = card
            .field("Record", row.record(), true)
            .field("Points", format!("{} pts", row.points), true)
            .field("Games Played", row.games_played.to_string(), true)
            .field(division, rank(row.division_sequence), true)
            .field(conference, rank(row.conference_sequence), true)
            .field("League", rank(row.league_sequence), true);
    }

    match (current, next) {
        (Some(game), _) if game.is_live() => {
            card.push_field("Current Game", live_summary(game), false);
        }
        (Some(game), _) => {
            card.push_field("Game Info", upcoming_summary(game, team.id, now), false);
        }
        (None, Some(game)) => {
            card.push_field("Upcoming", upcoming_summary(game, team.id, now), false);
        }
        (None, None) => {}
    }

    let commands: Vec<String> = commands_list(prefix)
        .into_iter()
        .skip(1)
        .map(|(cmd, desc)| format!("{cmd} - {desc}"))
        .collect();
    card.field("Commands", commands.join("\n"), false)
        .footer(format!("Go {}! 🐾", team.name))
}

/// Details for today's game, live or not yet started
pub fn game_card(game: &Game, team: &TrackedTeam, now: &DateTime<Tz>) -> Card {
    let mut card = Card::new(format!("🏒 {} Game", team.name), TEAM_COLOR)
        .field(
            "Date",
            day_label(game, now, "%B %d, %Y").unwrap_or_else(|| "Today".to_string()),
            true,
        )
        .field("Opponent", format!("vs {}", game.opponent(team.id).abbrev), true)
        .field("Location", location(game, team.id), true);

    if let Some(series) = game.series_title() {
        card.push_field("Series", series, false);
    }

    if game.is_live() {
        card.push_field("🔴 LIVE SCORE", game.score_line(), false);
        card.push_field(
            "Period",
            game.period().map(|p| p.to_string()).unwrap_or_default(),
            true,
        );
        if let Some(shots) = game.shots_line() {
            card.push_field("Shots on Goal", shots, false);
        }
    } else {
        let clock = start_clock(game, &now.timezone()).unwrap_or_else(|| "Time TBD".to_string());
        card.push_field("Game Time", clock, true);
    }

    if let Some(venue) = game.venue_name() {
        card.push_field("Venue", format!("📍 {venue}"), false);
    }
    card
}

pub fn next_game_card(game: &Game, team: &TrackedTeam, now: &DateTime<Tz>) -> Card {
    let tz = now.timezone();
    let game_time = game
        .start_time()
        .map(|t| {
            t.with_timezone(&tz)
                .format("%A, %B %d at %I:%M %p %Z")
                .to_string()
        })
        .unwrap_or_else(|| "Date TBD".to_string());

    let mut card = Card::new(format!("🏒 Next {} Game", team.name), TEAM_COLOR)
        .field(
            "Date",
            day_label(game, now, "%B %d, %Y").unwrap_or_else(|| "TBD".to_string()),
            true,
        )
        .field("Opponent", format!("vs {}", game.opponent(team.id).abbrev), true)
        .field("Location", location(game, team.id), true);

    if let Some(series) = game.series_title() {
        card.push_field("Series", series, false);
    }
    card.push_field("Game Time", game_time, false);
    if let Some(venue) = game.venue_name() {
        card.push_field("Venue", format!("📍 {venue}"), false);
    }
    card
}

pub fn recent_card(games: &[Game], team: &TrackedTeam, tz: &Tz) -> Card {
    let mut card = Card::new(format!("🐾 Recent {} Games", team.name), TEAM_COLOR);
    for game in games {
        let date = game
            .start_time()
            .map(|t| t.with_timezone(tz).date_naive())
            .or_else(|| game.game_day())
            .map(|d| d.format("%m/%d").to_string())
            .unwrap_or_else(|| "??/??".to_string());

        let home = game.is_home(team.id);
        let (ours, theirs) = if home {
            (game.home_score(), game.away_score())
        } else {
            (game.away_score(), game.home_score())
        };
        let (result, emoji) = if ours > theirs { ("W", "✅") } else { ("L", "❌") };
        let at = if home { "vs" } else { "@" };

        card.push_field(
            date,
            format!(
                "{emoji} {result} {ours}-{theirs} {at} {}",
                game.opponent(team.id).abbrev
            ),
            false,
        );
    }
    card
}

pub fn quote_card(quote: &str, team: &TrackedTeam) -> Card {
    Card::new(format!("🐾 {} Quote", team.name), TEAM_COLOR).description(quote)
}

pub fn help_card(team: &TrackedTeam, prefix: &str) -> Card {
    let mut card = Card::new(format!("🐾 {} Commands", team.name), TEAM_COLOR)
        .description(format!("All available {} commands", team.name));
    for (cmd, desc) in commands_list(prefix) {
        card.push_field(cmd, desc, false);
    }
    card.footer(format!("Go {}! 🐾", team.name))
}

pub fn live_enabled_card(team: &TrackedTeam, prefix: &str) -> Card {
    Card::new("🚨 Live Updates Enabled!", TEAM_COLOR).description(format!(
        "This channel will now receive live {} game updates including:\n\
         • Goal notifications 🚨\n\
         • Period changes 🏒\n\
         • Game end results 🎉\n\n\
         Use `{prefix}cats live off` to disable.",
        team.name
    ))
}

pub fn live_disabled_card(team: &TrackedTeam, prefix: &str) -> Card {
    Card::new("🔇 Live Updates Disabled", GREY).description(format!(
        "This channel will no longer receive live {} game updates.\n\
         Use `{prefix}cats live on` to re-enable.",
        team.name
    ))
}

pub fn live_status_card(
    team: &TrackedTeam,
    enabled: bool,
    subscribed_channels: usize,
    today: Option<&Game>,
    has_next_game: bool,
) -> Card {
    let status = if enabled {
        "🟢 **ENABLED**"
    } else {
        "🔴 **DISABLED**"
    };
    let card = Card::new(
        "📊 Live Updates Status",
        if enabled { TEAM_COLOR } else { GREY },
    )
    .description(format!(
        "Live {} updates: {status}\n\nTotal channels with live updates: {subscribed_channels}",
        team.name
    ));

    match today {
        Some(game) if game.is_live() => {
            card.field("🔴 Current Status", "Game is LIVE - monitoring active!", false)
        }
        Some(_) => card.field(
            "🏒 Current Status",
            "Game today but not started - ready to monitor!",
            false,
        ),
        None if has_next_game => card.field(
            "⏰ Next Monitoring",
            format!("Will activate when next {} game goes live", team.name),
            false,
        ),
        None => card,
    }
}
