//! Data structures and types for podtui
//!
//! Contains the shared models used across the application:
//! - **Catalog**: show previews from the list endpoint, full show details,
//!   seasons and episodes
//! - **Genres**: genre spotlight details
//! - **Query**: the list view's search/genre/page selection
//! - **Display helpers**: date formatting and text excerpts

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::genres;

// =============================================================================
// Catalog Models
// =============================================================================

/// A show as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowPreview {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    /// Genre ids (see [`crate::genres`])
    pub genres: Vec<u32>,
    /// ISO-8601 timestamp of the last update
    pub updated: String,
    /// Number of seasons
    pub seasons: u32,
}

impl ShowPreview {
    /// Genre display names, "Unknown" for ids outside the catalog
    pub fn genre_names(&self) -> Vec<&'static str> {
        self.genres.iter().map(|id| genres::genre_name(*id)).collect()
    }
}

impl fmt::Display for ShowPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} seasons, updated {})",
            self.title,
            self.seasons,
            format_date(&self.updated)
        )
    }
}

/// Full show detail with every season's episodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowDetail {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    /// Genre display names (the detail endpoint sends names, not ids)
    pub genres: Vec<String>,
    pub updated: String,
    /// Seasons in the order the API returned them
    pub seasons: Vec<Season>,
}

impl fmt::Display for ShowDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} seasons", self.title, self.seasons.len())
    }
}

/// One season of a show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub season: u32,
    pub title: String,
    pub image: String,
    pub episodes: Vec<Episode>,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Season {} ({} Episodes)",
            self.season,
            self.episodes.len()
        )
    }
}

/// One episode within a season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub episode: u32,
    pub title: String,
    pub description: String,
    /// Audio file URL, when the API provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Episode {}: {}", self.episode, self.title)
    }
}

// =============================================================================
// Genre Models
// =============================================================================

/// Genre details from the genre endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreDetail {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Ids of shows tagged with this genre
    #[serde(default)]
    pub shows: Vec<String>,
}

// =============================================================================
// Query State
// =============================================================================

/// Search text, genre filter and page of the show list
///
/// This is what a list route carries so that leaving the list and coming
/// back restores it exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search: String,
    pub genre: Option<u32>,
    /// 1-based page number
    pub page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            genre: None,
            page: 1,
        }
    }
}

impl QueryState {
    pub fn new(search: impl Into<String>, genre: Option<u32>) -> Self {
        Self {
            search: search.into(),
            genre,
            page: 1,
        }
    }

    /// Replace the search text; resets to the first page
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Replace the genre filter; resets to the first page
    pub fn set_genre(&mut self, genre: Option<u32>) {
        self.genre = genre;
        self.page = 1;
    }

    /// Jump to a page (clamped to at least 1)
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Whether any filter is active
    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty() || self.genre.is_some()
    }
}

// =============================================================================
// Display Helpers
// =============================================================================

/// Format an ISO-8601 timestamp as e.g. "January 15, 2025"
///
/// Accepts RFC 3339 timestamps, naive timestamps and plain dates. Anything
/// else is returned unchanged.
pub fn format_date(iso: &str) -> String {
    const LONG: &str = "%B %-d, %Y";

    if let Ok(dt) = DateTime::parse_from_rfc3339(iso) {
        return dt.format(LONG).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(LONG).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        return date.format(LONG).to_string();
    }
    iso.to_string()
}

/// First `max_chars` characters of `text` followed by "..."
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
}

/// Excerpt length on show cards
pub const CARD_EXCERPT: usize = 100;

/// Excerpt length on episode cards
pub const EPISODE_EXCERPT: usize = 150;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_rfc3339() {
        assert_eq!(format_date("2025-01-15T10:30:00.000Z"), "January 15, 2025");
        assert_eq!(format_date("2022-11-03T07:00:00Z"), "November 3, 2022");
    }

    #[test]
    fn test_format_date_naive() {
        assert_eq!(format_date("2021-07-04T12:00:00"), "July 4, 2021");
        assert_eq!(format_date("2020-02-29"), "February 29, 2020");
    }

    #[test]
    fn test_format_date_unparseable() {
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_excerpt_counts_chars() {
        assert_eq!(excerpt("hello world", 5), "hello...");
        assert_eq!(excerpt("short", 100), "short...");
        // Multi-byte characters are not split
        assert_eq!(excerpt("héllo", 2), "hé...");
    }

    #[test]
    fn test_query_state_resets_page() {
        let mut query = QueryState::default();
        query.set_page(4);
        assert_eq!(query.page, 4);

        query.set_search("space");
        assert_eq!(query.page, 1);

        query.set_page(3);
        query.set_genre(Some(2));
        assert_eq!(query.page, 1);
        assert!(query.is_filtered());
    }

    #[test]
    fn test_query_state_page_floor() {
        let mut query = QueryState::default();
        query.set_page(0);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_preview_genre_names() {
        let show = ShowPreview {
            id: "1".into(),
            title: "Show".into(),
            description: String::new(),
            image: String::new(),
            genres: vec![4, 99],
            updated: "2022-11-03T07:00:00Z".into(),
            seasons: 2,
        };
        assert_eq!(show.genre_names(), vec!["Comedy", "Unknown"]);
        assert_eq!(show.to_string(), "Show (2 seasons, updated November 3, 2022)");
    }

    #[test]
    fn test_season_display() {
        let season = Season {
            season: 2,
            title: "Season 2".into(),
            image: String::new(),
            episodes: vec![Episode {
                episode: 1,
                title: "Pilot".into(),
                description: String::new(),
                file: None,
            }],
        };
        assert_eq!(season.to_string(), "Season 2 (1 Episodes)");
        assert_eq!(season.episodes[0].to_string(), "Episode 1: Pilot");
    }
}
