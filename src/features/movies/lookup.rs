//! `!movie` search flow: search, optional numbered pick, details card

use anyhow::Result;
use log::{debug, warn};

use super::client::{DetailsOutcome, MovieDetails, OmdbClient, SearchOutcome};
use crate::core::embeds::BLURPLE;
use crate::core::{truncate_for_field, Card, PendingSelections, Reply};

/// Most search hits offered in one selection list
pub const MAX_CHOICES: usize = 10;

pub const MISSING_KEY: &str =
    "OMDB API key is not configured. Please set the OMDB_API_KEY environment variable.";

pub struct MovieLookup {
    client: Option<OmdbClient>,
    selections: PendingSelections<String>,
}

impl MovieLookup {
    /// A lookup without an API key still answers, with the "not configured" text.
    pub fn new(url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: api_key.map(|key| OmdbClient::new(url, key)),
            selections: PendingSelections::new(),
        }
    }

    pub fn has_pending(&self, user_id: u64) -> bool {
        self.selections.has_pending(user_id)
    }

    pub async fn search(&self, user_id: u64, query: &str) -> Result<Reply> {
        let Some(client) = &self.client else {
            return Ok(Reply::text(MISSING_KEY));
        };

        let hits = match client.search(query).await? {
            SearchOutcome::Status(code) => {
                return Ok(Reply::text(format!(
                    "Error: Could not fetch movie data (Status code: {code})"
                )))
            }
            SearchOutcome::NoResults => {
                return Ok(Reply::text(format!("No movies found for '{query}'.")))
            }
            SearchOutcome::Hits(hits) => hits,
        };

        if let [only] = hits.as_slice() {
            return self.details(&only.imdb_id).await;
        }

        let mut shown = Vec::new();
        for hit in hits.iter().take(MAX_CHOICES) {
            match client.details(&hit.imdb_id, false).await {
                Ok(DetailsOutcome::Found(details)) => shown.push(*details),
                Ok(other) => debug!("Skipping {} in selection: {other:?}", hit.imdb_id),
                Err(e) => warn!("Details fetch for {} failed: {e}", hit.imdb_id),
            }
        }

        if shown.is_empty() {
            return Ok(Reply::text(format!("No movies found for '{query}'.")));
        }

        // Only ids that made it into the list are selectable, so numbers line up
        let ids = shown
            .iter()
            .filter_map(|movie| movie.imdb_id.clone())
            .collect();
        self.selections.offer(user_id, ids);
        Ok(Reply::text(selection_list(&shown)))
    }

    /// Handle a numeric reply to an earlier list. `None` when the text is not a valid pick.
    pub async fn select(&self, user_id: u64, text: &str) -> Result<Option<Reply>> {
        match self.selections.take(user_id, text) {
            Some(imdb_id) => self.details(&imdb_id).await.map(Some),
            None => Ok(None),
        }
    }

    async fn details(&self, imdb_id: &str) -> Result<Reply> {
        let Some(client) = &self.client else {
            return Ok(Reply::text("OMDB API key is not configured."));
        };

        Ok(match client.details(imdb_id, true).await? {
            DetailsOutcome::Found(details) => Reply::Card(details_card(&details)),
            DetailsOutcome::NotFound => Reply::text("Could not find movie details."),
            DetailsOutcome::Status(code) => Reply::text(format!(
                "Error: Could not fetch movie details (Status code: {code})"
            )),
        })
    }
}

fn or_na(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or("N/A")
}

pub fn selection_list(movies: &[MovieDetails]) -> String {
    let mut out = String::from("**Found multiple movies. Please select one by number:**\n\n");
    for (i, movie) in movies.iter().enumerate() {
        let actors = match movie.actors.as_deref() {
            Some(actors) if !actors.is_empty() => {
                actors.split(", ").take(2).collect::<Vec<_>>().join(", ")
            }
            _ => "N/A".to_string(),
        };
        out.push_str(&format!(
            "**{}.** {} ({})\n   Actors: {}\n   Director: {}\n\n",
            i + 1,
            or_na(&movie.title),
            or_na(&movie.year),
            actors,
            or_na(&movie.director),
        ));
    }
    out
}

pub fn details_card(movie: &MovieDetails) -> Card {
    let mut card = Card::new(or_na(&movie.title), BLURPLE);
    if let Some(plot) = movie.plot.as_deref() {
        card = card.description(plot);
    }
    if let Some(poster) = movie.poster.as_deref().filter(|p| *p != "N/A" && !p.is_empty()) {
        card = card.thumbnail(poster);
    }

    card = card
        .field("Year", or_na(&movie.year), true)
        .field("Rated", or_na(&movie.rated), true)
        .field("Runtime", or_na(&movie.runtime), true)
        .field("Genre", or_na(&movie.genre), true)
        .field("Director", or_na(&movie.director), true)
        .field("Writer", truncate_for_field(or_na(&movie.writer)), true)
        .field("Actors", or_na(&movie.actors), true)
        .field("Language", or_na(&movie.language), true)
        .field("Country", or_na(&movie.country), true);

    let ratings: String = movie
        .ratings
        .iter()
        .map(|r| format!("{}: {}\n", r.source, r.value))
        .collect();
    if !ratings.is_empty() {
        card = card.field("Ratings", ratings, false);
    }

    card.footer(format!(
        "IMDB ID: {} | Powered by OMDB API",
        or_na(&movie.imdb_id)
    ))
}
