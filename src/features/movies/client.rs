//! HTTP client for the OMDB movie API

use anyhow::Result;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Rating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct MovieDetails {
    pub title: Option<String>,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub poster: Option<String>,
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    pub response: Option<String>,
}

/// Outcome of a title search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Hits(Vec<SearchHit>),
    NoResults,
    Status(u16),
}

/// Outcome of an id lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsOutcome {
    Found(Box<MovieDetails>),
    NotFound,
    Status(u16),
}

pub struct OmdbClient {
    client: Client,
    url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Search movies by title (`?s=<query>&type=movie`)
    pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
        info!("OMDB search '{query}'");
        let response = self
            .client
            .get(&self.url)
            .query(&[("apikey", self.api_key.as_str()), ("s", query), ("type", "movie")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(SearchOutcome::Status(response.status().as_u16()));
        }

        let body: SearchResponse = response.json().await?;
        debug!("OMDB search '{query}' -> {} hits", body.search.len());
        if body.response == "False" || body.search.is_empty() {
            Ok(SearchOutcome::NoResults)
        } else {
            Ok(SearchOutcome::Hits(body.search))
        }
    }

    /// Fetch one movie by IMDB id (`?i=<id>`), optionally with the full plot
    pub async fn details(&self, imdb_id: &str, full_plot: bool) -> Result<DetailsOutcome> {
        debug!("OMDB details for {imdb_id}");
        let mut params = vec![("apikey", self.api_key.as_str()), ("i", imdb_id)];
        if full_plot {
            params.push(("plot", "full"));
        }

        let response = self.client.get(&self.url).query(&params).send().await?;
        if !response.status().is_success() {
            return Ok(DetailsOutcome::Status(response.status().as_u16()));
        }

        let details: MovieDetails = response.json().await?;
        if details.response.as_deref() == Some("False") {
            Ok(DetailsOutcome::NotFound)
        } else {
            Ok(DetailsOutcome::Found(Box::new(details)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_search_returns_hits() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"Search":[{"Title":"Alien","Year":"1979","imdbID":"tt0078748","Type":"movie"},{"Title":"Aliens","Year":"1986","imdbID":"tt0090605","Type":"movie"}],"totalResults":"2","Response":"True"}"#;
        server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("apikey".into(), "key".into()),
                Matcher::UrlEncoded("s".into(), "alien".into()),
                Matcher::UrlEncoded("type".into(), "movie".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = OmdbClient::new(&format!("{}/", server.url()), "key");
        match client.search("alien").await.unwrap() {
            SearchOutcome::Hits(hits) => {
                assert_eq!(hits.len(), 2);
                assert_eq!(hits[0].imdb_id, "tt0078748");
                assert_eq!(hits[1].title, "Aliens");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_no_results() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"Response":"False","Error":"Movie not found!"}"#)
            .create_async()
            .await;

        let client = OmdbClient::new(&format!("{}/", server.url()), "key");
        assert_eq!(client.search("zzzz").await.unwrap(), SearchOutcome::NoResults);
    }

    #[tokio::test]
    async fn test_search_reports_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let client = OmdbClient::new(&format!("{}/", server.url()), "bad");
        assert_eq!(client.search("alien").await.unwrap(), SearchOutcome::Status(401));
    }

    #[tokio::test]
    async fn test_details_full_plot() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"Title":"Alien","Year":"1979","Rated":"R","Runtime":"117 min","Genre":"Horror, Sci-Fi","Director":"Ridley Scott","Writer":"Dan O'Bannon","Actors":"Sigourney Weaver, Tom Skerritt, John Hurt","Plot":"The crew of a commercial spacecraft...","Language":"English","Country":"United Kingdom, United States","Poster":"N/A","Ratings":[{"Source":"Internet Movie Database","Value":"8.5/10"}],"imdbID":"tt0078748","Response":"True"}"#;
        server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("i".into(), "tt0078748".into()),
                Matcher::UrlEncoded("plot".into(), "full".into()),
            ]))
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = OmdbClient::new(&format!("{}/", server.url()), "key");
        match client.details("tt0078748", true).await.unwrap() {
            DetailsOutcome::Found(details) => {
                assert_eq!(details.title.as_deref(), Some("Alien"));
                assert_eq!(details.director.as_deref(), Some("Ridley Scott"));
                assert_eq!(details.ratings.len(), 1);
                assert_eq!(details.imdb_id.as_deref(), Some("tt0078748"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_details_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#)
            .create_async()
            .await;

        let client = OmdbClient::new(&format!("{}/", server.url()), "key");
        assert_eq!(
            client.details("tt0", false).await.unwrap(),
            DetailsOutcome::NotFound
        );
    }
}
