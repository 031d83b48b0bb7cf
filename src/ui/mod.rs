//! Terminal UI components
//!
//! Built with ratatui. Every frame is drawn from `App` alone; the views
//! hold no state of their own.

pub mod detail;
pub mod list;
pub mod theme;

pub use theme::{Theme, ThemeMode};

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, AppState, InputMode};
use crate::genres;

/// Main render function - dispatches to view-specific renderers
pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.palette();
    let area = frame.area();

    // Clear with background color
    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(theme.text()), area);

    // Main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app, &theme);
    match (&app.state, &app.detail) {
        (AppState::Detail, Some(view)) => detail::render(frame, chunks[1], view, &theme),
        _ => list::render(frame, chunks[1], &app.list, &theme),
    }
    render_status_bar(frame, chunks[2], app, &theme);

    if let Some(ref error) = app.error {
        render_error_popup(frame, area, error, &theme);
    }
}

/// Logo, search box and genre filter
fn render_header(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12), // Logo
            Constraint::Min(1),     // Search box
            Constraint::Length(30), // Genre filter
        ])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("POD", theme.title()),
        Span::styled("TUI", theme.secondary().add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border()),
    );
    frame.render_widget(logo, header_chunks[0]);

    let editing = app.input_mode == InputMode::Editing;
    let query = &app.list.query.search;

    let search_text = if editing {
        let split = query
            .char_indices()
            .nth(app.list.cursor)
            .map(|(i, _)| i)
            .unwrap_or(query.len());
        let (before, after) = query.split_at(split);
        format!("⌕ {}│{}", before, after)
    } else if query.is_empty() {
        "⌕ Type / to search...".to_string()
    } else {
        format!("⌕ {}", query)
    };

    let search_box = Paragraph::new(search_text)
        .style(if editing {
            theme.input().fg(theme.primary)
        } else {
            theme.input()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if editing {
                    theme.border_focused()
                } else {
                    theme.border()
                })
                .title(Span::styled(" SEARCH ", theme.title())),
        );
    frame.render_widget(search_box, header_chunks[1]);

    let genre = match app.list.query.genre {
        Some(id) => genres::genre_name(id),
        None => "All Genres",
    };
    let genre_box = Paragraph::new(Line::from(vec![
        Span::styled("◆ ", theme.accent()),
        Span::styled(genre, theme.text()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border())
            .title(Span::styled(" GENRE (g/G) ", theme.title())),
    );
    frame.render_widget(genre_box, header_chunks[2]);
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(" NORMAL ", theme.highlighted()),
        InputMode::Editing => Span::styled(" INSERT ", theme.page_current()),
    };

    let route = Span::styled(format!(" {} ", app.current_route()), theme.dimmed());
    let theme_indicator = Span::styled(format!(" {} ", app.theme()), theme.secondary());

    let help = match (&app.state, &app.input_mode) {
        (_, InputMode::Editing) => " Enter/Esc:done ",
        (AppState::List, _) => " q:quit  /:search  g:genre  ←/→:page  Enter:open  t:theme ",
        (AppState::Detail, _) => " q:quit  Esc:back  ←/→:season  ↑/↓:episode  t:theme ",
    };

    let status_line = Line::from(vec![
        mode_indicator,
        route,
        Span::raw("│"),
        theme_indicator,
        Span::raw("│"),
        Span::styled(help, theme.dimmed()),
    ]);

    let status = Paragraph::new(status_line).style(theme.status_bar());
    frame.render_widget(status, area);
}

/// Bordered panel with `text` centered inside, for loading/empty/failed states
fn render_message(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    text: &str,
    style: Style,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border())
        .title(Span::styled(title.to_string(), theme.title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let top = inner.height.saturating_sub(3) / 2;
    let mut lines = vec![Line::from(""); top as usize];
    lines.extend(text.lines().map(|l| Line::from(Span::styled(l.to_string(), style))));

    let para = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(para, inner);
}

/// Render error popup overlay
fn render_error_popup(frame: &mut Frame, area: Rect, error: &str, theme: &Theme) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 5;

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error, theme.error())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(theme.error())
            .title(Span::styled(" ✗ ERROR ", theme.error()))
            .style(Style::default().bg(theme.background)),
    );

    frame.render_widget(error_block, popup_area);
}
