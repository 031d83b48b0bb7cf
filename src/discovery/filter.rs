//! Text and genre filtering of the show list

use crate::models::{QueryState, ShowPreview};

/// Whether a show matches both the search text and the genre filter
///
/// Search is a case-insensitive substring test against title or
/// description; an empty search matches everything. The genre filter
/// requires exact membership in the show's genre ids.
pub fn matches(show: &ShowPreview, search: &str, genre: Option<u32>) -> bool {
    let genre_ok = genre.map_or(true, |id| show.genres.contains(&id));
    if !genre_ok {
        return false;
    }

    if search.is_empty() {
        return true;
    }

    let needle = search.to_lowercase();
    show.title.to_lowercase().contains(&needle)
        || show.description.to_lowercase().contains(&needle)
}

/// Shows matching the query, in their original order
pub fn filter<'a>(shows: &'a [ShowPreview], query: &QueryState) -> Vec<&'a ShowPreview> {
    shows
        .iter()
        .filter(|show| matches(show, &query.search, query.genre))
        .collect()
}
