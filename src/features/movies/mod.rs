//! # Movies Feature
//!
//! `!movie <title>` lookups against the OMDB API.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

pub mod client;
pub mod lookup;

pub use client::{MovieDetails, OmdbClient};
pub use lookup::MovieLookup;
