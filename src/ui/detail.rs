//! Show detail view
//!
//! Left: show info and the genre spotlight. Right: season selector stacked
//! over the episode cards of the selected season.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::{DetailView, LoadState};
use crate::models::{excerpt, format_date, GenreDetail, ShowDetail, EPISODE_EXCERPT};
use crate::ui::render_message;
use crate::ui::theme::Theme;

/// Render the detail view into `area`
pub fn render(frame: &mut Frame, area: Rect, view: &DetailView, theme: &Theme) {
    let show = match &view.show {
        LoadState::Idle | LoadState::Loading => {
            render_message(frame, area, " SHOW ", "Loading show details...", theme.loading(), theme);
            return;
        }
        LoadState::Failed(msg) => {
            let text = format!("{}\n\nEsc to go back, r to retry", msg);
            render_message(frame, area, " SHOW ", &text, theme.error(), theme);
            return;
        }
        LoadState::Ready(show) => show,
    };

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_info_panel(frame, h_chunks[0], view, show, theme);

    let season_rows = (show.seasons.len() as u16).clamp(1, 8) + 2;
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(season_rows), Constraint::Min(3)])
        .split(h_chunks[1]);

    render_seasons_panel(frame, v_chunks[0], view, show, theme);
    render_episodes_panel(frame, v_chunks[1], view, theme);
}

/// Title, genres, description, dates and counts
fn render_info_panel(frame: &mut Frame, area: Rect, view: &DetailView, show: &ShowDetail, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border())
        .title(Span::styled(" INFO ", theme.title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(vec![
        Span::styled("▶ ", theme.accent()),
        Span::styled(show.title.clone(), theme.title()),
    ])];

    if !show.genres.is_empty() {
        let mut tags = Vec::new();
        for genre in &show.genres {
            tags.push(Span::styled(format!(" {} ", genre), theme.genre()));
            tags.push(Span::raw(" "));
        }
        lines.push(Line::from(tags));
    }

    lines.push(Line::from(vec![
        Span::styled("Last Updated: ", theme.dimmed()),
        Span::styled(format_date(&show.updated), theme.metadata()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Total Seasons: ", theme.dimmed()),
        Span::styled(show.seasons.len().to_string(), theme.metadata()),
        Span::styled("  │  ", theme.dimmed()),
        Span::styled("Total Episodes: ", theme.dimmed()),
        Span::styled(view.total_episodes().to_string(), theme.metadata()),
    ]));

    lines.push(Line::from(Span::styled(
        "─".repeat(inner.width as usize),
        theme.dimmed(),
    )));

    if !show.description.is_empty() {
        lines.push(Line::from(Span::styled("DESCRIPTION", theme.accent())));
        lines.push(Line::from(""));
        for line in show.description.lines() {
            lines.push(Line::from(Span::styled(line.to_string(), theme.text())));
        }
    }

    if let Some(genre) = &view.spotlight {
        lines.push(Line::from(""));
        lines.extend(spotlight(genre, theme));
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}

fn spotlight(genre: &GenreDetail, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled("GENRE SPOTLIGHT: ", theme.accent()),
        Span::styled(genre.title.clone(), theme.secondary()),
    ])];
    if !genre.description.is_empty() {
        lines.push(Line::from(Span::styled(genre.description.clone(), theme.dimmed())));
    }
    lines.push(Line::from(Span::styled(
        format!("{} shows in this genre", genre.shows.len()),
        theme.metadata(),
    )));
    lines
}

/// Season selector: `Season N (k Episodes)`
fn render_seasons_panel(frame: &mut Frame, area: Rect, view: &DetailView, show: &ShowDetail, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border())
        .title(Span::styled(" SEASONS ", theme.title()))
        .title_bottom(Span::styled(" ←/→ change ", theme.dimmed()));

    if show.seasons.is_empty() {
        let empty = Paragraph::new("No seasons")
            .style(theme.dimmed())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let selected = show
        .seasons
        .iter()
        .position(|s| Some(s.season) == view.season);

    let items: Vec<ListItem> = show
        .seasons
        .iter()
        .enumerate()
        .map(|(i, season)| {
            let is_selected = Some(i) == selected;
            let marker = if is_selected { "▸ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(
                    marker.to_string(),
                    if is_selected { theme.accent() } else { theme.dimmed() },
                ),
                Span::styled(
                    season.to_string(),
                    if is_selected { theme.selected() } else { theme.text() },
                ),
            ]))
        })
        .collect();

    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

/// Episode cards for the selected season
fn render_episodes_panel(frame: &mut Frame, area: Rect, view: &DetailView, theme: &Theme) {
    let season = view.selected_season();
    let title = match season {
        Some(s) => format!(" {} ", s.title.to_uppercase()),
        None => " EPISODES ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_focused())
        .title(Span::styled(title, theme.title()));

    let episodes = season.map(|s| s.episodes.as_slice()).unwrap_or_default();
    if episodes.is_empty() {
        let empty = Paragraph::new("No episodes")
            .style(theme.dimmed())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = episodes
        .iter()
        .enumerate()
        .map(|(i, episode)| {
            let is_selected = i == view.episodes.selected;
            let marker = if is_selected { "▸ " } else { "  " };
            let description: String = excerpt(&episode.description, EPISODE_EXCERPT)
                .chars()
                .take(width.max(1))
                .collect();

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        marker.to_string(),
                        if is_selected { theme.accent() } else { theme.dimmed() },
                    ),
                    Span::styled(
                        episode.to_string(),
                        if is_selected { theme.selected() } else { theme.text() },
                    ),
                ]),
                Line::from(vec![Span::raw("  "), Span::styled(description, theme.dimmed())]),
                Line::from(""),
            ])
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(view.episodes.selected));
    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}
