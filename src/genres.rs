//! Static genre catalog
//!
//! The list endpoint tags shows with small integer genre ids. This table
//! maps them to display names. It never changes at runtime.

/// Name rendered for ids missing from the table
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Genre id → display name, ordered by id
pub const GENRES: &[(u32, &str)] = &[
    (1, "Personal Growth"),
    (2, "Investigative Journalism"),
    (3, "History"),
    (4, "Comedy"),
    (5, "Entertainment"),
    (6, "Business"),
    (7, "Fiction"),
    (8, "News"),
    (9, "Kids and Family"),
];

/// Look up a genre's display name
pub fn lookup(id: u32) -> Option<&'static str> {
    GENRES
        .iter()
        .find(|(genre_id, _)| *genre_id == id)
        .map(|(_, name)| *name)
}

/// Display name for a genre id, falling back to "Unknown"
pub fn genre_name(id: u32) -> &'static str {
    lookup(id).unwrap_or(UNKNOWN_GENRE)
}

/// Genre after `current` in the cycle `None → 1 → … → 9 → None`
pub fn next_filter(current: Option<u32>) -> Option<u32> {
    match current {
        None => GENRES.first().map(|(id, _)| *id),
        Some(id) => {
            let pos = GENRES.iter().position(|(genre_id, _)| *genre_id == id);
            pos.and_then(|i| GENRES.get(i + 1)).map(|(id, _)| *id)
        }
    }
}

/// Genre before `current` in the same cycle, walking backwards
pub fn prev_filter(current: Option<u32>) -> Option<u32> {
    match current {
        None => GENRES.last().map(|(id, _)| *id),
        Some(id) => match GENRES.iter().position(|(genre_id, _)| *genre_id == id) {
            Some(0) | None => None,
            Some(i) => Some(GENRES[i - 1].0),
        },
    }
}
