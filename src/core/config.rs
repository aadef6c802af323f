//! Environment-driven bot configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Tracked team and NHL endpoints are configurable
//! - 1.0.0: Initial release with token, prefix, gif directory and poll intervals

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// The team whose games are followed by `!cats` and the live monitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedTeam {
    pub id: i64,
    pub abbrev: String,
    pub name: String,
}

impl Default for TrackedTeam {
    fn default() -> Self {
        Self {
            id: 13,
            abbrev: "FLA".to_string(),
            name: "Panthers".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub omdb_api_key: Option<String>,
    pub command_prefix: String,
    pub gif_dir: PathBuf,
    pub use_reactions: bool,
    pub use_gif_responses: bool,
    pub timezone: Tz,
    pub reminder_check_interval: Duration,
    pub live_poll_interval: Duration,
    pub live_idle_interval: Duration,
    pub live_error_backoff: Duration,
    pub team: TrackedTeam,
    pub nhl_api_base: String,
    pub nhl_stats_api: String,
    pub omdb_api_url: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the process environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .context("No token provided. Set the DISCORD_TOKEN environment variable.")?;

        let omdb_api_key = lookup("OMDB_API_KEY").filter(|k| !k.trim().is_empty());

        let command_prefix = lookup("COMMAND_PREFIX").unwrap_or_else(|| "!".to_string());
        if command_prefix.is_empty() {
            return Err(anyhow!("COMMAND_PREFIX must not be empty"));
        }

        let gif_dir = PathBuf::from(lookup("GIF_DIR").unwrap_or_else(|| "gifs".to_string()));
        let use_reactions = parse_bool(lookup("USE_REACTIONS"), true);
        let use_gif_responses = parse_bool(lookup("USE_GIF_RESPONSES"), false);

        let timezone_str =
            lookup("BOT_TIMEZONE").unwrap_or_else(|| "America/New_York".to_string());
        let timezone = Tz::from_str(&timezone_str).map_err(|_| {
            anyhow!(
                "Invalid BOT_TIMEZONE: {} (expected IANA tz like America/New_York)",
                timezone_str
            )
        })?;

        let reminder_check_interval =
            parse_secs(&lookup, "REMINDER_CHECK_INTERVAL_SECS", 10)?;
        let live_poll_interval = parse_secs(&lookup, "LIVE_POLL_INTERVAL_SECS", 30)?;
        let live_idle_interval = parse_secs(&lookup, "LIVE_IDLE_INTERVAL_SECS", 300)?;
        let live_error_backoff = parse_secs(&lookup, "LIVE_ERROR_BACKOFF_SECS", 60)?;

        let defaults = TrackedTeam::default();
        let team = TrackedTeam {
            id: match lookup("TEAM_ID") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("TEAM_ID must be an integer, got '{raw}'"))?,
                None => defaults.id,
            },
            abbrev: lookup("TEAM_ABBREV")
                .map(|a| a.trim().to_uppercase())
                .unwrap_or(defaults.abbrev),
            name: lookup("TEAM_NAME").unwrap_or(defaults.name),
        };

        let nhl_api_base = lookup("NHL_API_BASE")
            .unwrap_or_else(|| "https://api-web.nhle.com/v1".to_string());
        let nhl_stats_api = lookup("NHL_STATS_API")
            .unwrap_or_else(|| "https://api.nhle.com/stats/rest/en".to_string());
        let omdb_api_url =
            lookup("OMDB_API_URL").unwrap_or_else(|| "http://www.omdbapi.com/".to_string());

        let log_level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            discord_token,
            omdb_api_key,
            command_prefix,
            gif_dir,
            use_reactions,
            use_gif_responses,
            timezone,
            reminder_check_interval,
            live_poll_interval,
            live_idle_interval,
            live_error_backoff,
            team,
            nhl_api_base: trim_base(nhl_api_base),
            nhl_stats_api: trim_base(nhl_stats_api),
            omdb_api_url,
            log_level,
        })
    }

    pub fn urmom_gif(&self) -> PathBuf {
        self.gif_dir.join("ur-mom.gif")
    }

    pub fn alot_gif(&self) -> PathBuf {
        self.gif_dir.join("alot.gif")
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn parse_bool(raw: Option<String>, default: bool) -> bool {
    raw.map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "y" | "on"))
        .unwrap_or(default)
}

fn parse_secs<F>(lookup: &F, key: &str, default: u64) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{key} must be a whole number of seconds, got '{raw}'"))?,
        None => default,
    };
    if secs == 0 {
        return Err(anyhow!("{key} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}
