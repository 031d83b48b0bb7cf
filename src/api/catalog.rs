//! Podcast catalog API client
//!
//! Fetches the show list, single show details and genre details.
//! API root: https://podcast-api.netlify.app
//!
//! Every call is a single request. There is no retry and no caching:
//! calling twice fetches twice.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::genres;
use crate::models::{Episode, GenreDetail, Season, ShowDetail, ShowPreview};

/// Public catalog endpoint
pub const DEFAULT_API_URL: &str = "https://podcast-api.netlify.app";

/// Catalog API error types
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Not found")]
    NotFound,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

impl CatalogError {
    /// Whether the requested resource does not exist
    ///
    /// Every other variant is a network-level failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound)
    }
}

/// Catalog API client
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogClient {
    /// Create a client for the public catalog
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Create a client with a custom base URL (config override, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an endpoint and decode the body; an empty or `null` body yields `None`
    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Option<T>, CatalogError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%url, "catalog request");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                if body.trim().is_empty() {
                    return Ok(None);
                }
                serde_json::from_str::<Option<T>>(&body).map_err(|e| {
                    tracing::warn!(%url, error = %e, "catalog response did not decode");
                    CatalogError::InvalidResponse(format!("JSON parse error: {}", e))
                })
            }
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound),
            status => Err(CatalogError::ServerError(status.as_u16())),
        }
    }

    /// Fetch every show preview
    pub async fn fetch_all_shows(&self) -> Result<Vec<ShowPreview>, CatalogError> {
        let raw: Vec<PreviewRaw> = self
            .get("/")
            .await?
            .ok_or_else(|| CatalogError::InvalidResponse("empty show list".into()))?;
        Ok(raw.into_iter().map(PreviewRaw::into_preview).collect())
    }

    /// Fetch one show with all seasons and episodes
    pub async fn fetch_show(&self, id: &str) -> Result<ShowDetail, CatalogError> {
        let endpoint = format!("/id/{}", urlencoding::encode(id));
        let raw: DetailRaw = self.get(&endpoint).await?.ok_or(CatalogError::NotFound)?;
        Ok(raw.into_detail())
    }

    /// Fetch a genre's title, description and show ids
    pub async fn fetch_genre(&self, id: u32) -> Result<GenreDetail, CatalogError> {
        let endpoint = format!("/genre/{}", id);
        let raw: GenreRaw = self.get(&endpoint).await?.ok_or(CatalogError::NotFound)?;
        Ok(raw.into_genre(id))
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

/// Ids arrive as strings, occasionally as bare numbers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IdRaw {
    Text(String),
    Number(u64),
}

impl IdRaw {
    fn into_string(self) -> String {
        match self {
            IdRaw::Text(s) => s,
            IdRaw::Number(n) => n.to_string(),
        }
    }
}

/// The list endpoint sends a season count; older payloads send a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeasonsRaw {
    Count(u32),
    List(Vec<serde_json::Value>),
}

impl Default for SeasonsRaw {
    fn default() -> Self {
        SeasonsRaw::Count(0)
    }
}

impl SeasonsRaw {
    fn count(&self) -> u32 {
        match self {
            SeasonsRaw::Count(n) => *n,
            SeasonsRaw::List(list) => list.len() as u32,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PreviewRaw {
    id: IdRaw,
    title: String,
    description: Option<String>,
    image: Option<String>,
    #[serde(default)]
    genres: Vec<u32>,
    updated: Option<String>,
    #[serde(default)]
    seasons: SeasonsRaw,
}

impl PreviewRaw {
    fn into_preview(self) -> ShowPreview {
        ShowPreview {
            seasons: self.seasons.count(),
            id: self.id.into_string(),
            title: self.title,
            description: self.description.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            genres: self.genres,
            updated: self.updated.unwrap_or_default(),
        }
    }
}

/// Detail genres are names; numeric ids are resolved through the catalog
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenreLabelRaw {
    Name(String),
    Id(u32),
}

impl GenreLabelRaw {
    fn into_name(self) -> String {
        match self {
            GenreLabelRaw::Name(name) => name,
            GenreLabelRaw::Id(id) => genres::genre_name(id).to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DetailRaw {
    id: IdRaw,
    title: String,
    description: Option<String>,
    image: Option<String>,
    #[serde(default)]
    genres: Vec<GenreLabelRaw>,
    updated: Option<String>,
    #[serde(default)]
    seasons: Vec<SeasonRaw>,
}

impl DetailRaw {
    fn into_detail(self) -> ShowDetail {
        ShowDetail {
            id: self.id.into_string(),
            title: self.title,
            description: self.description.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            genres: self.genres.into_iter().map(GenreLabelRaw::into_name).collect(),
            updated: self.updated.unwrap_or_default(),
            seasons: self.seasons.into_iter().map(SeasonRaw::into_season).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SeasonRaw {
    season: u32,
    title: Option<String>,
    image: Option<String>,
    #[serde(default)]
    episodes: Vec<EpisodeRaw>,
}

impl SeasonRaw {
    fn into_season(self) -> Season {
        let number = self.season;
        Season {
            season: number,
            title: self.title.unwrap_or_else(|| format!("Season {}", number)),
            image: self.image.unwrap_or_default(),
            episodes: self.episodes.into_iter().map(EpisodeRaw::into_episode).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EpisodeRaw {
    episode: u32,
    title: String,
    description: Option<String>,
    file: Option<String>,
}

impl EpisodeRaw {
    fn into_episode(self) -> Episode {
        Episode {
            episode: self.episode,
            title: self.title,
            description: self.description.unwrap_or_default(),
            file: self.file,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenreRaw {
    id: Option<u32>,
    title: String,
    description: Option<String>,
    #[serde(default)]
    shows: Vec<IdRaw>,
}

impl GenreRaw {
    fn into_genre(self, requested: u32) -> GenreDetail {
        GenreDetail {
            id: self.id.unwrap_or(requested),
            title: self.title,
            description: self.description.unwrap_or_default(),
            shows: self.shows.into_iter().map(IdRaw::into_string).collect(),
        }
    }
}
