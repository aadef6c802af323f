//! `!cats player <name>`: fuzzy player search over the season's skater and goalie summaries

use strsim::normalized_levenshtein;

use super::models::{GoalieSummary, PlayerLanding, SkaterSummary};
use crate::core::embeds::NHL_BLUE;
use crate::core::Card;

/// Matches kept after sorting
pub const MAX_MATCHES: usize = 10;
/// Matches offered in a selection list
pub const MAX_CHOICES: usize = 5;
/// Similarity above which a name counts as a match even without a substring hit
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub enum Player {
    Skater(SkaterSummary),
    Goalie(GoalieSummary),
}

impl Player {
    pub fn id(&self) -> i64 {
        match self {
            Player::Skater(s) => s.player_id,
            Player::Goalie(g) => g.player_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Player::Skater(s) => &s.skater_full_name,
            Player::Goalie(g) => &g.goalie_full_name,
        }
    }

    fn last_name(&self) -> &str {
        match self {
            Player::Skater(s) => &s.last_name,
            Player::Goalie(g) => &g.last_name,
        }
    }

    /// Current team, the first of possibly several after a trade
    pub fn team(&self) -> &str {
        let abbrevs = match self {
            Player::Skater(s) => &s.team_abbrevs,
            Player::Goalie(g) => &g.team_abbrevs,
        };
        abbrevs
            .split(',')
            .map(str::trim)
            .find(|a| !a.is_empty())
            .unwrap_or("N/A")
    }

    pub fn position(&self) -> &str {
        match self {
            Player::Skater(s) if !s.position_code.is_empty() => &s.position_code,
            Player::Skater(_) => "N/A",
            Player::Goalie(_) => "G",
        }
    }

    pub fn games_played(&self) -> u32 {
        match self {
            Player::Skater(s) => s.games_played,
            Player::Goalie(g) => g.games_played,
        }
    }

    fn points(&self) -> u32 {
        match self {
            Player::Skater(s) => s.points,
            Player::Goalie(_) => 0,
        }
    }
}

fn similarity(query: &str, name: &str) -> f64 {
    normalized_levenshtein(query, name)
}

fn matches(query: &str, player: &Player) -> bool {
    let full = player.name().to_lowercase();
    let last = player.last_name().to_lowercase();
    let first = full.split_whitespace().next().unwrap_or("").to_string();
    full.contains(query)
        || query == first
        || query == last
        || full.starts_with(query)
        || similarity(query, &full) > SIMILARITY_THRESHOLD
}

/// Players whose name matches `query`, most similar first, at most [`MAX_MATCHES`]
pub fn search_players(query: &str, players: Vec<Player>) -> Vec<Player> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut found: Vec<(f64, Player)> = players
        .into_iter()
        .filter(|p| matches(&query, p))
        .map(|p| (similarity(&query, &p.name().to_lowercase()), p))
        .collect();
    found.sort_by(|a, b| b.0.total_cmp(&a.0));
    found.into_iter().take(MAX_MATCHES).map(|(_, p)| p).collect()
}

pub fn no_players_found(query: &str) -> String {
    format!(
        "❌ No players found matching '{query}'. Try a different spelling or first/last name only."
    )
}

pub fn selection_card(query: &str, players: &[Player]) -> Card {
    let mut listing = String::new();
    for (i, player) in players.iter().take(MAX_CHOICES).enumerate() {
        listing.push_str(&format!(
            "**{}.** {} ({}) - {}\n   {} GP, {} pts this season\n\n",
            i + 1,
            player.name(),
            player.team(),
            player.position(),
            player.games_played(),
            player.points()
        ));
    }
    Card::new(format!("🏒 Multiple players found for '{query}'"), NHL_BLUE)
        .description(format!("Select a player by number:\n\n{listing}"))
        .footer(format!(
            "Type a number (1-{}) to select a player",
            players.len().min(MAX_CHOICES)
        ))
}

/// `m:ss` from seconds
fn minutes_seconds(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// `h:mm`, or `N min` under an hour, from seconds
fn hours_minutes(seconds: f64) -> String {
    let minutes = (seconds.max(0.0) as u64) / 60;
    if minutes >= 60 {
        format!("{}:{:02}", minutes / 60, minutes % 60)
    } else {
        format!("{minutes} min")
    }
}

fn bio(player: &Player, landing: Option<&PlayerLanding>) -> String {
    let mut info = format!("**Team:** {}\n**Position:** {}", player.team(), player.position());
    let Some(landing) = landing else {
        return info;
    };
    if let Some(number) = landing.sweater_number {
        info.push_str(&format!("\n**Number:** #{number}"));
    }
    if let Some(height) = landing.height_in_inches {
        info.push_str(&format!("\n**Height:** {}'{}\"", height / 12, height % 12));
    }
    if let Some(weight) = landing.weight_in_pounds {
        info.push_str(&format!("\n**Weight:** {weight} lbs"));
    }
    if let (Some(city), Some(country)) = (&landing.birth_city, &landing.birth_country) {
        info.push_str(&format!("\n**Born:** {}, {}", city.as_str(), country.as_str()));
    }
    info
}

pub fn player_card(player: &Player, landing: Option<&PlayerLanding>, season: &str) -> Card {
    let icon = match player {
        Player::Goalie(_) => "🥅",
        Player::Skater(_) => "🏒",
    };
    let mut card = Card::new(format!("{icon} {}", player.name()), NHL_BLUE);
    if let Some(headshot) = landing.and_then(|l| l.headshot.as_deref()) {
        card = card.thumbnail(headshot);
    }
    card.push_field("Player Info", bio(player, landing), true);

    match player {
        Player::Goalie(g) => {
            card.push_field(
                format!("{season} Season"),
                format!(
                    "**GP:** {}\n**W:** {}\n**L:** {}\n**OTL:** {}\n**SV%:** {:.3}\n**GAA:** {:.2}\n**SO:** {}",
                    g.games_played,
                    g.wins,
                    g.losses,
                    g.ot_losses,
                    g.save_pct.unwrap_or(0.0),
                    g.goals_against_average.unwrap_or(0.0),
                    g.shutouts
                ),
                true,
            );
            card.push_field(
                "Advanced Stats",
                format!(
                    "**Shots Against:** {}\n**Saves:** {}\n**GA:** {}\n**TOI:** {}",
                    g.shots_against,
                    g.saves,
                    g.goals_against,
                    hours_minutes(g.time_on_ice.unwrap_or(0.0))
                ),
                true,
            );
        }
        Player::Skater(s) => {
            card.push_field(
                format!("{season} Season"),
                format!(
                    "**GP:** {}\n**G:** {}\n**A:** {}\n**Pts:** {}\n**+/-:** {:+}\n**PIM:** {}",
                    s.games_played, s.goals, s.assists, s.points, s.plus_minus, s.penalty_minutes
                ),
                true,
            );
            card.push_field(
                "Advanced Stats",
                format!(
                    "**Shots:** {}\n**S%:** {:.1}%\n**TOI/GP:** {}\n**Hits:** {}\n**Blocks:** {}",
                    s.shots,
                    s.shooting_pct.unwrap_or(0.0) * 100.0,
                    minutes_seconds(s.time_on_ice_per_game.unwrap_or(0.0)),
                    s.hits.unwrap_or(0),
                    s.blocked_shots.unwrap_or(0)
                ),
                true,
            );

            if s.power_play_points > 0 {
                let pp_assists = s.power_play_points.saturating_sub(s.power_play_goals);
                card.push_field(
                    "Power Play",
                    format!(
                        "**PP Goals:** {}\n**PP Assists:** {pp_assists}\n**PP Points:** {}",
                        s.power_play_goals, s.power_play_points
                    ),
                    true,
                );
            }

            if s.games_played > 0 {
                let games = f64::from(s.games_played);
                card.push_field(
                    "Pace",
                    format!(
                        "**Goals/GP:** {:.2}\n**Points/GP:** {:.2}",
                        f64::from(s.goals) / games,
                        f64::from(s.points) / games
                    ),
                    true,
                );
            }
        }
    }

    card.footer(format!("{season} Regular Season Stats | NHL"))
}
