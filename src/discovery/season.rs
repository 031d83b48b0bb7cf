//! Season selection for the show detail view

use crate::models::{Season, ShowDetail};

/// Season whose number is `number`, if the show has one
pub fn select_season(show: &ShowDetail, number: u32) -> Option<&Season> {
    show.seasons.iter().find(|s| s.season == number)
}

/// First season in fetched order
pub fn default_season(show: &ShowDetail) -> Option<u32> {
    show.seasons.first().map(|s| s.season)
}

/// Episodes across every season
pub fn total_episodes(show: &ShowDetail) -> usize {
    show.seasons.iter().map(|s| s.episodes.len()).sum()
}

/// Season after `current` in fetched order (stays on the last one)
pub fn next_season(show: &ShowDetail, current: Option<u32>) -> Option<u32> {
    step(show, current, |i, len| (i + 1).min(len - 1))
}

/// Season before `current` in fetched order (stays on the first one)
pub fn prev_season(show: &ShowDetail, current: Option<u32>) -> Option<u32> {
    step(show, current, |i, _| i.saturating_sub(1))
}

fn step(show: &ShowDetail, current: Option<u32>, f: impl Fn(usize, usize) -> usize) -> Option<u32> {
    let len = show.seasons.len();
    if len == 0 {
        return None;
    }
    let index = current
        .and_then(|n| show.seasons.iter().position(|s| s.season == n))
        .map(|i| f(i, len))
        .unwrap_or(0);
    show.seasons.get(index).map(|s| s.season)
}
