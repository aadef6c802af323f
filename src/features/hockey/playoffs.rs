//! Playoff bracket, series and round cards

use super::models::{Game, PlayoffBracket, PlayoffSeries, SeriesSide, SERIES_WINS};
use crate::core::embeds::{NHL_BLUE, RED, TEAM_COLOR, TROPHY_GOLD};
use crate::core::{Card, TrackedTeam};

pub const NO_PLAYOFF_DATA: &str = "❌ Unable to fetch playoff data.";

#[rustfmt::skip]
const TEAM_EMOJIS: [(&str, &str); 16] = [
    ("FLA", "🐾"), ("TBL", "⚡"), ("TOR", "🍁"), ("BOS", "🐻"),
    ("NYR", "🗽"), ("CAR", "🌪️"), ("WSH", "🦅"), ("NYI", "🏝️"),
    ("EDM", "🛢️"), ("VAN", "🏔️"), ("COL", "❄️"), ("VGK", "⚔️"),
    ("DAL", "⭐"), ("WPG", "✈️"), ("NSH", "🎵"), ("LAK", "👑"),
];

pub fn team_emoji(abbrev: &str) -> &'static str {
    TEAM_EMOJIS
        .iter()
        .find(|(team, _)| team.eq_ignore_ascii_case(abbrev))
        .map(|(_, emoji)| *emoji)
        .unwrap_or("🏒")
}

pub fn round_name(round: u32) -> String {
    match round {
        1 => "🥅 First Round".to_string(),
        2 => "⚡ Second Round".to_string(),
        3 => "🏒 Conference Finals".to_string(),
        4 => "🏆 Stanley Cup Final".to_string(),
        n => format!("Round {n}"),
    }
}

/// `🐾 FLA 4-1 TBL ⚡`, bolded when `detailed`; `None` until both teams are known
pub fn series_line(series: &PlayoffSeries, detailed: bool) -> Option<String> {
    let (top, bottom) = series.sides()?;
    let (a, b) = (&top.team.abbrev, &bottom.team.abbrev);
    let (ea, eb) = (team_emoji(a), team_emoji(b));
    Some(if detailed {
        format!("{ea} **{a}** {} - {} **{b}** {eb}", top.wins, bottom.wins)
    } else {
        format!("{ea} {a} {}-{} {b} {eb}", top.wins, bottom.wins)
    })
}

/// First round with an undecided series, or the last round once all are decided
pub fn current_round(bracket: &PlayoffBracket) -> Option<u32> {
    let rounds = bracket.rounds();
    rounds
        .iter()
        .find(|(_, series)| {
            series
                .iter()
                .any(|s| s.sides().is_some() && !s.is_decided())
        })
        .or_else(|| rounds.last())
        .map(|(number, _)| *number)
}

fn series_standing(us: SeriesSide<'_>, them: SeriesSide<'_>) -> String {
    if us.wins == them.wins {
        format!("Series tied {}-{}", us.wins, them.wins)
    } else if us.wins > them.wins {
        format!("Leading series {}-{}", us.wins, them.wins)
    } else {
        format!("Trailing series {}-{}", us.wins, them.wins)
    }
}

/// Tracked team's standing in the latest round it reached
pub fn team_status(bracket: &PlayoffBracket, team: &TrackedTeam) -> Option<String> {
    let series = bracket.series_for(&team.abbrev)?;
    let (us, them) = series.sides_for(&team.abbrev)?;
    let round = round_name(series.playoff_round);
    Some(if us.wins >= SERIES_WINS {
        format!("✅ **Advanced from {round}!**")
    } else if them.wins >= SERIES_WINS {
        format!("❌ **Eliminated in {round}**")
    } else {
        format!(
            "🔥 **Active in {round}** vs {}\n{}",
            them.team.display_name(),
            series_standing(us, them)
        )
    })
}

pub fn bracket_card(bracket: &PlayoffBracket, team: &TrackedTeam) -> Card {
    let mut card = Card::new("🏆 Stanley Cup Playoffs Bracket", TROPHY_GOLD)
        .footer("NHL Playoff Bracket | Updates every 5 minutes");
    let rounds = bracket.rounds();
    if rounds.is_empty() {
        return card.description("Playoff bracket data not available.");
    }

    let current = current_round(bracket)
        .map(round_name)
        .unwrap_or_else(|| "Offseason".to_string());
    card = card.description(format!("**Current Round:** {current}"));

    for (number, series) in &rounds {
        let lines: Vec<String> = series.iter().filter_map(|s| series_line(s, false)).collect();
        if !lines.is_empty() {
            card.push_field(round_name(*number), lines.join("\n"), false);
        }
    }
    if let Some(status) = team_status(bracket, team) {
        card.push_field(
            format!("{} {} Status", team_emoji(&team.abbrev), team.name),
            status,
            false,
        );
    }
    card
}

/// Shown when the bracket endpoint cannot be reached
pub fn bracket_unavailable_card() -> Card {
    Card::new("🏆 Stanley Cup Playoffs", TROPHY_GOLD)
        .description("⚠️ NHL playoff API is currently unavailable")
        .field(
            "📊 Latest Info",
            "Check NHL.com or ESPN for live bracket updates, game schedules, and series scores.",
            false,
        )
        .footer("API temporarily unavailable - check back later")
}

pub fn not_in_playoffs(team: &TrackedTeam) -> String {
    format!(
        "{} {} are not currently in the playoffs, or playoff data is unavailable.",
        team_emoji(&team.abbrev),
        team.name
    )
}

/// `Game 1: TBL 2 - 3 FLA`, or `Game 2: FLA @ TBL - 2025-04-23` before it is played
fn game_line(game: &Game, number: usize) -> String {
    let away = game.away_team.abbrev_or("TBD");
    let home = game.home_team.abbrev_or("TBD");
    match (game.away_team.score, game.home_team.score) {
        (Some(a), Some(h)) => format!("Game {number}: {away} {a} - {h} {home}"),
        _ => {
            let day = game.game_date.as_deref().unwrap_or("TBD");
            format!("Game {number}: {away} @ {home} - {day}")
        }
    }
}

pub fn series_card(series: &PlayoffSeries, team: &TrackedTeam, games: &[Game]) -> Option<Card> {
    let (us, them) = series.sides_for(&team.abbrev)?;
    let emoji = team_emoji(&team.abbrev);

    let mut card = Card::new(format!("{emoji} {} Playoff Series", team.name), TEAM_COLOR).field(
        "Series Score",
        format!(
            "**{}**\n{emoji} **{}** {} - {} **{}**",
            round_name(series.playoff_round),
            team.name,
            us.wins,
            them.wins,
            them.team.display_name()
        ),
        false,
    );

    if !games.is_empty() {
        let lines: Vec<String> = games
            .iter()
            .enumerate()
            .map(|(i, game)| game_line(game, i + 1))
            .collect();
        card.push_field("Games", lines.join("\n"), false);
    }

    let upcoming = games
        .iter()
        .find(|game| game.home_team.score.is_none() && game.away_team.score.is_none());
    if let Some(game) = upcoming {
        card.push_field(
            "Next Game",
            format!(
                "{} @ {}\n📅 {}",
                game.away_team.abbrev_or("TBD"),
                game.home_team.abbrev_or("TBD"),
                game.game_date.as_deref().unwrap_or("TBD")
            ),
            false,
        );
    }

    if us.wins >= SERIES_WINS {
        card.push_field("🎉 Result", format!("**{} Win Series!**", team.name), false);
    } else if them.wins >= SERIES_WINS {
        card.push_field("💔 Result", format!("**{} Eliminated**", team.name), false);
    } else {
        let needed = SERIES_WINS - us.wins.max(them.wins);
        card.push_field(
            "📊 Series Status",
            format!("First to {SERIES_WINS} wins advances\n{needed} more wins needed"),
            false,
        );
    }

    Some(card.footer(format!("{} Playoff Series", team.name)))
}

/// Every round, or only `round` when given
pub fn round_card(bracket: &PlayoffBracket, round: Option<u32>) -> Card {
    let mut rounds = bracket.rounds();
    if let Some(wanted) = round {
        rounds.retain(|(number, _)| *number == wanted);
        if rounds.is_empty() {
            return Card::new("❌ Round Not Found", RED)
                .description(format!("Round {wanted} not found in current playoff bracket."));
        }
    }

    let mut card = Card::new("🏒 Playoff Round Summary", NHL_BLUE).footer("NHL Playoff Summary");
    for (number, series) in &rounds {
        let lines: Vec<String> = series.iter().filter_map(|s| series_line(s, true)).collect();
        if !lines.is_empty() {
            card.push_field(round_name(*number), lines.join("\n"), false);
        }
    }
    card
}
