//! `!cats vs <team>`: side-by-side season summary against another club

use super::client::season_label;
use super::models::TeamSummary;
use crate::core::embeds::GOLD;
use crate::core::{Card, TrackedTeam};

/// Lowercase nicknames, cities and abbreviations mapped to NHL team ids
#[rustfmt::skip]
const TEAM_ALIASES: &[(&str, i64)] = &[
    ("panthers", 13), ("florida", 13), ("fla", 13),
    ("oilers", 22), ("edmonton", 22), ("edm", 22),
    ("jets", 52), ("winnipeg", 52), ("wpg", 52),
    ("capitals", 15), ("washington", 15), ("wsh", 15), ("caps", 15),
    ("knights", 54), ("vegas", 54), ("vgk", 54), ("golden knights", 54),
    ("leafs", 10), ("toronto", 10), ("tor", 10), ("maple leafs", 10),
    ("stars", 25), ("dallas", 25), ("dal", 25),
    ("kings", 26), ("los angeles", 26), ("lak", 26), ("la", 26),
    ("avalanche", 21), ("colorado", 21), ("col", 21), ("avs", 21),
    ("lightning", 14), ("tampa bay", 14), ("tbl", 14), ("tampa", 14), ("bolts", 14),
    ("hurricanes", 12), ("carolina", 12), ("car", 12), ("canes", 12),
    ("wild", 30), ("minnesota", 30), ("min", 30),
    ("senators", 9), ("ottawa", 9), ("ott", 9), ("sens", 9),
    ("blues", 19), ("st louis", 19), ("stl", 19), ("st. louis", 19),
    ("flames", 20), ("calgary", 20), ("cgy", 20),
    ("canadiens", 8), ("montreal", 8), ("mtl", 8), ("habs", 8),
    ("devils", 1), ("new jersey", 1), ("njd", 1),
    ("canucks", 23), ("vancouver", 23), ("van", 23), ("nucks", 23),
    ("blue jackets", 29), ("columbus", 29), ("cbj", 29), ("jackets", 29),
    ("utah", 59), ("utah hockey club", 59), ("uth", 59),
    ("red wings", 17), ("detroit", 17), ("det", 17), ("wings", 17),
    ("rangers", 3), ("new york rangers", 3), ("nyr", 3),
    ("islanders", 2), ("new york islanders", 2), ("nyi", 2), ("isles", 2),
    ("penguins", 5), ("pittsburgh", 5), ("pit", 5), ("pens", 5),
    ("ducks", 24), ("anaheim", 24), ("ana", 24),
    ("sabres", 7), ("buffalo", 7), ("buf", 7),
    ("bruins", 6), ("boston", 6), ("bos", 6),
    ("flyers", 4), ("philadelphia", 4), ("phi", 4),
    ("kraken", 55), ("seattle", 55), ("sea", 55),
    ("predators", 18), ("nashville", 18), ("nsh", 18), ("preds", 18),
    ("blackhawks", 16), ("chicago", 16), ("chi", 16), ("hawks", 16),
    ("sharks", 28), ("san jose", 28), ("sjs", 28),
];

pub fn resolve_team(name: &str) -> Option<i64> {
    let wanted = name.trim().to_lowercase();
    TEAM_ALIASES
        .iter()
        .find(|(alias, _)| *alias == wanted)
        .map(|(_, id)| *id)
}

pub fn unknown_team(name: &str) -> String {
    format!("❌ Unknown team: `{name}`. Try team names like `oilers`, `edmonton`, `EDM`, etc.")
}

fn pct(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}%", v * 100.0))
        .unwrap_or_else(|| "N/A".to_string())
}

fn per_game(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.1}"))
        .unwrap_or_else(|| "N/A".to_string())
}

/// Build the comparison card. `regular` must be sorted by points (league order);
/// `None` when either team is missing from it.
pub fn comparison_card(
    team: &TrackedTeam,
    other_id: i64,
    regular: &[TeamSummary],
    playoffs: &[TeamSummary],
    season_id: u32,
) -> Option<Card> {
    let ours = regular.iter().find(|t| t.team_id == team.id)?;
    let theirs = regular.iter().find(|t| t.team_id == other_id)?;
    let other = theirs.team_full_name.as_str();
    let us = team.name.as_str();

    let both = |f: &dyn Fn(&TeamSummary) -> String| {
        format!("**{us}:** {}\n**{other}:** {}", f(ours), f(theirs))
    };

    let mut card = Card::new(format!("🏒 Team Comparison: {us} vs {other}"), GOLD).field(
        "📊 Regular Season Record",
        both(&|t: &TeamSummary| {
            format!(
                "{}-{}-{} ({} pts)",
                t.wins,
                t.losses,
                t.ot_losses.unwrap_or(0),
                t.points
            )
        }),
        false,
    );

    let playoff_pair = playoffs
        .iter()
        .find(|t| t.team_id == team.id)
        .zip(playoffs.iter().find(|t| t.team_id == other_id));
    let playoff_year = season_id % 10_000;
    if let Some((our_po, their_po)) = playoff_pair {
        card.push_field(
            format!("🏆 {playoff_year} Playoff Record"),
            format!(
                "**{us}:** {}-{}\n**{other}:** {}-{}",
                our_po.wins, our_po.losses, their_po.wins, their_po.losses
            ),
            false,
        );
    }

    let rank_of = |id: i64| regular.iter().position(|t| t.team_id == id).map(|i| i + 1);
    card = card
        .field(
            "⚽ Goals For/Against (Regular)",
            both(&|t: &TeamSummary| format!("{}/{}", t.goals_for, t.goals_against)),
            true,
        )
        .field(
            "⚡ Special Teams (PP/PK)",
            both(&|t: &TeamSummary| format!("{}/{}", pct(t.power_play_pct), pct(t.penalty_kill_pct))),
            true,
        )
        .field(
            "🎯 Shots/Game (For/Against)",
            both(&|t: &TeamSummary| {
                format!(
                    "{}/{}",
                    per_game(t.shots_for_per_game),
                    per_game(t.shots_against_per_game)
                )
            }),
            true,
        )
        .field("🥅 Faceoff Win %", both(&|t: &TeamSummary| pct(t.faceoff_win_pct)), true)
        .field(
            "🏆 League Standing",
            both(&|t: &TeamSummary| {
                rank_of(t.team_id)
                    .map(|r| format!("#{r}"))
                    .unwrap_or_else(|| "#N/A".to_string())
            }),
            true,
        );

    let mut footer = format!("Regular Season Stats • {}", season_label(season_id));
    if playoff_pair.is_some() {
        footer.push_str(&format!(" | Includes {playoff_year} Playoff Record"));
    }
    Some(card.footer(footer))
}
