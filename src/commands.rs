//! CLI Command Handlers
//!
//! Implements all CLI commands by calling the catalog client and the same
//! discovery functions the TUI uses. Each handler takes CLI args, the
//! client and Output, and returns an ExitCode.

use serde::Serialize;

use crate::api::{CatalogClient, CatalogError};
use crate::cli::{ExitCode, GenreCmd, ListCmd, Output, ShowCmd};
use crate::discovery;
use crate::genres;
use crate::models::{format_date, GenreDetail, QueryState, Season, ShowDetail, ShowPreview};

/// Exit code for a failed catalog call
pub fn exit_code_for(err: &CatalogError) -> ExitCode {
    if err.is_not_found() {
        ExitCode::NotFound
    } else {
        ExitCode::NetworkError
    }
}

fn print_or_fail<T: Serialize>(output: &Output, data: T, text: impl FnOnce(&T) -> String) -> ExitCode {
    match output.print_or(data, text) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// List Command
// =============================================================================

/// One page of filtered shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListPage {
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    pub page_size: usize,
    pub shows: Vec<ShowPreview>,
}

impl ListPage {
    /// Filter and paginate `shows` the way the list view does
    pub fn build(shows: &[ShowPreview], query: &QueryState, page_size: usize) -> Self {
        let filtered = discovery::filter(shows, query);
        let page = discovery::paginate(&filtered, page_size, query.page);
        Self {
            page: page.page,
            total_pages: page.total_pages,
            total_matches: page.total_items,
            page_size: page_size.max(1),
            shows: page.items.iter().map(|s| (*s).clone()).collect(),
        }
    }

    fn render_text(&self) -> String {
        if self.total_matches == 0 {
            return "No shows found.".to_string();
        }
        let mut out = String::new();
        for show in &self.shows {
            out.push_str(&format!(
                "{:>6}  {}  [{}]  Seasons: {}  Updated: {}\n",
                show.id,
                show.title,
                show.genre_names().join(", "),
                show.seasons,
                format_date(&show.updated),
            ));
        }
        out.push_str(&format!(
            "Page {} of {} ({} matching shows)",
            self.page, self.total_pages, self.total_matches
        ));
        out
    }
}

pub async fn list_cmd(cmd: ListCmd, client: &CatalogClient, page_size: usize, output: &Output) -> ExitCode {
    let mut query = QueryState::new(cmd.search.unwrap_or_default(), cmd.genre);
    query.set_page(cmd.page as usize);
    let page_size = cmd.page_size.map(|n| n as usize).unwrap_or(page_size);

    output.info("Fetching shows...");

    match client.fetch_all_shows().await {
        Ok(shows) => {
            let page = ListPage::build(&shows, &query, page_size);
            if query.page > page.total_pages {
                return output.error(
                    format!("Page {} out of range (1-{})", query.page, page.total_pages),
                    ExitCode::InvalidArgs,
                );
            }
            print_or_fail(output, page, ListPage::render_text)
        }
        Err(e) => output.error(format!("Failed to load shows: {}", e), exit_code_for(&e)),
    }
}

// =============================================================================
// Show Command
// =============================================================================

/// A show plus the season picked for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowReport {
    pub show: ShowDetail,
    pub total_seasons: usize,
    pub total_episodes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_season: Option<Season>,
}

impl ShowReport {
    /// Pick `season` (or the first season) out of `show`
    ///
    /// Returns `None` when a season was asked for and the show lacks it.
    pub fn build(show: ShowDetail, season: Option<u32>) -> Option<Self> {
        let selected_season = match season {
            Some(n) => Some(discovery::select_season(&show, n)?.clone()),
            None => discovery::default_season(&show)
                .and_then(|n| discovery::select_season(&show, n))
                .cloned(),
        };
        Some(Self {
            total_seasons: show.seasons.len(),
            total_episodes: discovery::total_episodes(&show),
            selected_season,
            show,
        })
    }

    fn render_text(&self) -> String {
        let show = &self.show;
        let mut out = format!("{}\n", show.title);
        if !show.genres.is_empty() {
            out.push_str(&format!("Genres: {}\n", show.genres.join(", ")));
        }
        out.push_str(&format!("Last Updated: {}\n", format_date(&show.updated)));
        out.push_str(&format!(
            "Total Seasons: {}  Total Episodes: {}\n",
            self.total_seasons, self.total_episodes
        ));
        if !show.description.is_empty() {
            out.push_str(&format!("\n{}\n", show.description));
        }

        out.push_str("\nSeasons:\n");
        for season in &show.seasons {
            let marker = match &self.selected_season {
                Some(s) if s.season == season.season => "▸",
                _ => " ",
            };
            out.push_str(&format!("  {} {}\n", marker, season));
        }

        if let Some(season) = &self.selected_season {
            out.push_str(&format!("\n{}:\n", season.title));
            for episode in &season.episodes {
                out.push_str(&format!("  {}\n", episode));
            }
        }
        out.trim_end().to_string()
    }
}

pub async fn show_cmd(cmd: ShowCmd, client: &CatalogClient, output: &Output) -> ExitCode {
    output.info(format!("Fetching show {}...", cmd.id));

    match client.fetch_show(&cmd.id).await {
        Ok(show) => match ShowReport::build(show, cmd.season) {
            Some(report) => print_or_fail(output, report, ShowReport::render_text),
            None => output.error(
                format!("Season {} not found", cmd.season.unwrap_or_default()),
                ExitCode::NotFound,
            ),
        },
        Err(CatalogError::NotFound) => output.error("Show not found.", ExitCode::NotFound),
        Err(e) => output.error(format!("Failed to load show details: {}", e), exit_code_for(&e)),
    }
}

// =============================================================================
// Genre Commands
// =============================================================================

/// Entry of the static genre table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreEntry {
    pub id: u32,
    pub title: &'static str,
}

pub fn genre_table() -> Vec<GenreEntry> {
    genres::GENRES
        .iter()
        .map(|&(id, title)| GenreEntry { id, title })
        .collect()
}

pub fn genres_cmd(output: &Output) -> ExitCode {
    print_or_fail(output, genre_table(), |table| {
        table
            .iter()
            .map(|g| format!("{:>2}  {}", g.id, g.title))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

pub async fn genre_cmd(cmd: GenreCmd, client: &CatalogClient, output: &Output) -> ExitCode {
    output.info(format!("Fetching genre {}...", genres::genre_name(cmd.id)));

    match client.fetch_genre(cmd.id).await {
        Ok(genre) => print_or_fail(output, genre, |g: &GenreDetail| {
            let mut out = format!("{} (id {})\n", g.title, g.id);
            if !g.description.is_empty() {
                out.push_str(&format!("{}\n", g.description));
            }
            out.push_str(&format!("Shows: {}", g.shows.join(", ")));
            out
        }),
        Err(e) => output.error(format!("Failed to load genre: {}", e), exit_code_for(&e)),
    }
}
