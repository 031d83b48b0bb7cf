//! Show list view
//!
//! Renders the current page of filtered shows as cards, plus the page
//! control underneath. The list never filters or paginates on its own: it
//! reads both from `ListView`.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::{ListView, LoadState};
use crate::discovery::{self, Page};
use crate::models::{excerpt, format_date, ShowPreview, CARD_EXCERPT};
use crate::ui::render_message;
use crate::ui::theme::Theme;

/// Shown when the filter leaves nothing to display
pub const EMPTY_MESSAGE: &str = "No shows found.";

/// Render the list view into `area`
pub fn render(frame: &mut Frame, area: Rect, view: &ListView, theme: &Theme) {
    let shows = match &view.shows {
        LoadState::Idle | LoadState::Loading => {
            render_message(frame, area, " SHOWS ", "Loading shows...", theme.loading(), theme);
            return;
        }
        LoadState::Failed(msg) => {
            let text = format!("{}\n\nPress r to retry", msg);
            render_message(frame, area, " SHOWS ", &text, theme.error(), theme);
            return;
        }
        LoadState::Ready(shows) => shows,
    };

    let filtered = discovery::filter(shows, &view.query);
    if filtered.is_empty() {
        render_message(frame, area, " SHOWS ", EMPTY_MESSAGE, theme.dimmed(), theme);
        return;
    }

    let page = discovery::paginate(&filtered, view.page_size, view.query.page);

    let chunks = if page.needs_controls() {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1)])
            .split(area)
    };

    render_cards(frame, chunks[0], view, &page, theme);
    if page.needs_controls() {
        render_page_control(frame, chunks[1], &page, theme);
    }
}

fn render_cards(
    frame: &mut Frame,
    area: Rect,
    view: &ListView,
    page: &Page<'_, &ShowPreview>,
    theme: &Theme,
) {
    let selected = view.list.selected.min(page.items.len().saturating_sub(1));
    let width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = page
        .items
        .iter()
        .enumerate()
        .map(|(i, show)| card(show, i == selected, width, theme))
        .collect();

    let title = if view.query.is_filtered() {
        format!(
            " RESULTS ({} match{}) ",
            page.total_items,
            if page.total_items == 1 { "" } else { "es" }
        )
    } else {
        format!(" SHOWS ({}) ", page.total_items)
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border_focused())
                .title(Span::styled(title, theme.title())),
        )
        .style(theme.text());

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

/// One show card: title, excerpt, genres, seasons and last update
fn card(show: &ShowPreview, is_selected: bool, width: usize, theme: &Theme) -> ListItem<'static> {
    let marker = if is_selected { "▸ " } else { "  " };

    let title = Line::from(vec![
        Span::styled(
            marker.to_string(),
            if is_selected { theme.accent() } else { theme.dimmed() },
        ),
        Span::styled(
            show.title.clone(),
            if is_selected { theme.selected() } else { theme.title() },
        ),
    ]);

    let description = excerpt(&show.description, CARD_EXCERPT);
    let description: String = description.chars().take(width.max(1)).collect();

    let mut tags = vec![Span::raw("  ")];
    for name in show.genre_names() {
        tags.push(Span::styled(format!(" {} ", name), theme.genre()));
        tags.push(Span::raw(" "));
    }

    let meta = Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("Seasons: {}", show.seasons), theme.metadata()),
        Span::styled("  │  ", theme.dimmed()),
        Span::styled(
            format!("Updated: {}", format_date(&show.updated)),
            theme.metadata(),
        ),
    ]);

    ListItem::new(vec![
        title,
        Line::from(vec![Span::raw("  "), Span::styled(description, theme.dimmed())]),
        Line::from(tags),
        meta,
        Line::from(""),
    ])
}

/// `◀ Prev  1 2 [3] 4  Next ▶`
fn render_page_control(frame: &mut Frame, area: Rect, page: &Page<'_, &ShowPreview>, theme: &Theme) {
    let mut spans = vec![Span::styled(
        "◀ Prev ",
        if page.has_prev() { theme.keybind() } else { theme.dimmed() },
    )];

    for n in page.page_numbers() {
        spans.push(Span::raw(" "));
        if n == page.page {
            spans.push(Span::styled(format!(" {} ", n), theme.page_current()));
        } else {
            spans.push(Span::styled(n.to_string(), theme.text()));
        }
    }

    spans.push(Span::styled(
        "  Next ▶",
        if page.has_next() { theme.keybind() } else { theme.dimmed() },
    ));

    let control = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(control, area);
}
