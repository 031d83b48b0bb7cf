//! App state and core application logic
//!
//! Manages the view state machine, navigation stack, and coordinates
//! between the UI and the fetch worker. The app never performs I/O: it
//! emits `AppCommand`s and consumes `AppMessage`s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::api::CatalogError;
use crate::discovery;
use crate::genres;
use crate::models::*;
use crate::route::Route;
use crate::ui::theme::{Theme, ThemeMode};

/// Message shown when the show list fails to load
pub const LIST_FAILED: &str = "Failed to load shows.";

/// Message shown when a show detail fails to load
pub const DETAIL_FAILED: &str = "Failed to load show details.";

/// Message shown when the requested show does not exist
pub const DETAIL_NOT_FOUND: &str = "Show not found.";

// =============================================================================
// App State Enum
// =============================================================================

/// Application state enum representing current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Show list with search and genre filter
    #[default]
    List,
    /// Detail view for a single show
    Detail,
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Loading State
// =============================================================================

/// Per-view fetch state: `Idle → Loading → Ready | Failed`
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Commands and Messages
// =============================================================================

/// Identifies one fetch; only the latest id per concern is accepted
pub type RequestId = u64;

/// Work the app asks the fetch worker to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    FetchShows { request: RequestId },
    FetchShow { id: String, request: RequestId },
    FetchGenre { id: u32, request: RequestId },
}

/// Fetch failure as seen by the views
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    NotFound,
    Network(String),
}

impl From<CatalogError> for FetchError {
    fn from(err: CatalogError) -> Self {
        if err.is_not_found() {
            FetchError::NotFound
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Results posted back by the fetch worker
#[derive(Debug, Clone)]
pub enum AppMessage {
    ShowsLoaded {
        request: RequestId,
        result: Result<Vec<ShowPreview>, FetchError>,
    },
    ShowLoaded {
        request: RequestId,
        result: Result<ShowDetail, FetchError>,
    },
    GenreLoaded {
        request: RequestId,
        result: Result<GenreDetail, FetchError>,
    },
}

// =============================================================================
// Selection State (per-view)
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    /// Move selection up
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Jump to first item
    pub fn first(&mut self) {
        self.selected = 0;
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// View-Specific State
// =============================================================================

/// Show list view: raw catalog, query state and selection
#[derive(Debug, Clone)]
pub struct ListView {
    /// Raw fetched catalog (never mutated by filtering)
    pub shows: LoadState<Vec<ShowPreview>>,
    /// Search text, genre and page
    pub query: QueryState,
    /// Cursor position in the search text, in characters
    pub cursor: usize,
    /// Selection within the current page
    pub list: ListState,
    /// Shows per page
    pub page_size: usize,
    /// Latest list fetch
    pub request: RequestId,
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            shows: LoadState::Idle,
            query: QueryState::default(),
            cursor: 0,
            list: ListState::default(),
            page_size: crate::config::DEFAULT_PAGE_SIZE,
            request: 0,
        }
    }
}

impl ListView {
    /// Shows matching the current search and genre
    pub fn filtered(&self) -> Vec<&ShowPreview> {
        match &self.shows {
            LoadState::Ready(shows) => discovery::filter(shows, &self.query),
            _ => Vec::new(),
        }
    }

    /// Number of pages for the current filter
    pub fn total_pages(&self) -> usize {
        discovery::total_pages(self.filtered().len(), self.page_size)
    }

    /// Shows on the current page
    pub fn page_items(&self) -> Vec<&ShowPreview> {
        let filtered = self.filtered();
        let page = discovery::paginate(&filtered, self.page_size, self.query.page);
        page.items.to_vec()
    }

    /// Currently selected show on the current page
    pub fn selected_show(&self) -> Option<&ShowPreview> {
        self.page_items().get(self.list.selected).copied()
    }

    /// Recompute selection bounds after the visible page changed
    pub fn sync(&mut self) {
        let len = self.page_items().len();
        self.list.set_len(len);
    }

    fn reset_selection(&mut self) {
        self.list.first();
        self.sync();
    }

    /// Replace the search text (page resets to 1)
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.set_search(search);
        self.cursor = self.query.search.chars().count();
        self.reset_selection();
    }

    /// Replace the genre filter (page resets to 1)
    pub fn set_genre(&mut self, genre: Option<u32>) {
        self.query.set_genre(genre);
        self.reset_selection();
    }

    /// Restore a captured query exactly, page included
    pub fn restore(&mut self, query: QueryState) {
        self.cursor = query.search.chars().count();
        self.query = query;
        self.sync();
    }

    /// Go to a page, clamped to the available range
    pub fn go_to_page(&mut self, page: usize) {
        let page = page.clamp(1, self.total_pages());
        if page != self.query.page {
            self.query.set_page(page);
            self.reset_selection();
        }
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.query.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.query.page.saturating_sub(1));
    }

    // -------------------------------------------------------------------------
    // Search text editing
    // -------------------------------------------------------------------------

    fn byte_index(&self) -> usize {
        self.query
            .search
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.query.search.len())
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let mut search = self.query.search.clone();
        search.insert(self.byte_index(), c);
        let cursor = self.cursor + 1;
        self.set_search(search);
        self.cursor = cursor;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let mut search = self.query.search.clone();
            search.remove(self.byte_index());
            let cursor = self.cursor;
            self.set_search(search);
            self.cursor = cursor;
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.query.search.chars().count() {
            let mut search = self.query.search.clone();
            search.remove(self.byte_index());
            let cursor = self.cursor;
            self.set_search(search);
            self.cursor = cursor;
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.query.search.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.query.search.chars().count();
    }

    /// Clear search text
    pub fn clear_search(&mut self) {
        self.set_search("");
    }
}

/// Show detail view
#[derive(Debug, Clone)]
pub struct DetailView {
    /// Show id this view was opened for
    pub id: String,
    pub show: LoadState<ShowDetail>,
    /// Selected season number, `None` when the show has no seasons
    pub season: Option<u32>,
    /// Episode selection within the selected season
    pub episodes: ListState,
    /// Latest detail fetch
    pub request: RequestId,
    /// Genre spotlight (decoration; failures leave it empty)
    pub spotlight: Option<GenreDetail>,
    /// Latest spotlight fetch
    pub spotlight_request: Option<RequestId>,
}

impl DetailView {
    fn new(id: String, request: RequestId) -> Self {
        Self {
            id,
            show: LoadState::Loading,
            season: None,
            episodes: ListState::default(),
            request,
            spotlight: None,
            spotlight_request: None,
        }
    }

    /// Currently selected season, if it exists on the show
    pub fn selected_season(&self) -> Option<&Season> {
        let show = self.show.ready()?;
        discovery::select_season(show, self.season?)
    }

    /// Switch to a season by number
    pub fn set_season(&mut self, season: Option<u32>) {
        self.season = season;
        let len = self.selected_season().map_or(0, |s| s.episodes.len());
        self.episodes = ListState::new(len);
    }

    pub fn next_season(&mut self) {
        if let Some(show) = self.show.ready() {
            let next = discovery::next_season(show, self.season);
            self.set_season(next);
        }
    }

    pub fn prev_season(&mut self) {
        if let Some(show) = self.show.ready() {
            let prev = discovery::prev_season(show, self.season);
            self.set_season(prev);
        }
    }

    /// Total episodes across all seasons
    pub fn total_episodes(&self) -> usize {
        self.show.ready().map_or(0, discovery::total_episodes)
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Current state/screen
    pub state: AppState,
    /// Routes to return to, most recent last
    pub nav_stack: Vec<Route>,
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Global error message
    pub error: Option<String>,

    // View-specific states
    pub list: ListView,
    pub detail: Option<DetailView>,

    /// Active color theme
    theme: ThemeMode,
    /// Last issued request id
    last_request: RequestId,
    /// Outbound fetch commands
    commands: mpsc::UnboundedSender<AppCommand>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new App; issued commands go nowhere
    pub fn new() -> Self {
        Self::with_channels().0
    }

    /// Create an App plus the receiver for the commands it issues
    pub fn with_channels() -> (Self, mpsc::UnboundedReceiver<AppCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Self {
            state: AppState::List,
            nav_stack: Vec::new(),
            running: true,
            input_mode: InputMode::Normal,
            error: None,
            list: ListView::default(),
            detail: None,
            theme: ThemeMode::default(),
            last_request: 0,
            commands: tx,
        };
        (app, rx)
    }

    /// Set the list page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.list.page_size = page_size.max(1);
        self
    }

    // -------------------------------------------------------------------------
    // Theme
    // -------------------------------------------------------------------------

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.theme = mode;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        tracing::debug!(theme = %self.theme, "theme toggled");
    }

    /// Palette for the active theme
    pub fn palette(&self) -> Theme {
        self.theme.theme()
    }

    // -------------------------------------------------------------------------
    // Fetch plumbing
    // -------------------------------------------------------------------------

    fn next_request(&mut self) -> RequestId {
        self.last_request += 1;
        self.last_request
    }

    fn send(&self, command: AppCommand) {
        if self.commands.send(command).is_err() {
            tracing::debug!("command receiver dropped");
        }
    }

    /// Start (or restart) loading the show list
    pub fn load_shows(&mut self) {
        let request = self.next_request();
        self.list.request = request;
        self.list.shows = LoadState::Loading;
        self.list.sync();
        tracing::info!(request, "loading show list");
        self.send(AppCommand::FetchShows { request });
    }

    fn load_show(&mut self, id: String, genre: Option<u32>) {
        let request = self.next_request();
        tracing::info!(request, %id, "loading show detail");
        self.send(AppCommand::FetchShow {
            id: id.clone(),
            request,
        });
        let mut detail = DetailView::new(id, request);

        if let Some(genre) = genre {
            let spotlight = self.next_request();
            detail.spotlight_request = Some(spotlight);
            self.send(AppCommand::FetchGenre {
                id: genre,
                request: spotlight,
            });
        }
        self.detail = Some(detail);
    }

    /// Apply a fetch result
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::ShowsLoaded { request, result } => {
                if request != self.list.request {
                    tracing::debug!(request, "dropping stale show list");
                    return;
                }
                self.list.shows = match result {
                    Ok(shows) => {
                        tracing::info!(count = shows.len(), "show list loaded");
                        LoadState::Ready(shows)
                    }
                    Err(e) => {
                        tracing::warn!(error = ?e, "show list failed");
                        LoadState::Failed(LIST_FAILED.to_string())
                    }
                };
                self.list.sync();
            }
            AppMessage::ShowLoaded { request, result } => {
                let Some(detail) = self.detail.as_mut().filter(|d| d.request == request) else {
                    tracing::debug!(request, "dropping stale show detail");
                    return;
                };
                match result {
                    Ok(show) => {
                        let season = discovery::default_season(&show);
                        detail.show = LoadState::Ready(show);
                        detail.set_season(season);
                    }
                    Err(FetchError::NotFound) => {
                        detail.show = LoadState::Failed(DETAIL_NOT_FOUND.to_string());
                    }
                    Err(FetchError::Network(e)) => {
                        tracing::warn!(error = %e, id = %detail.id, "show detail failed");
                        detail.show = LoadState::Failed(DETAIL_FAILED.to_string());
                    }
                }
            }
            AppMessage::GenreLoaded { request, result } => {
                let Some(detail) = self
                    .detail
                    .as_mut()
                    .filter(|d| d.spotlight_request == Some(request))
                else {
                    return;
                };
                match result {
                    Ok(genre) => detail.spotlight = Some(genre),
                    // Decoration only: the detail view renders regardless
                    Err(e) => tracing::warn!(error = ?e, "genre spotlight failed"),
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Route of the current view
    pub fn current_route(&self) -> Route {
        match (&self.state, &self.detail) {
            (AppState::Detail, Some(detail)) => Route::Show(detail.id.clone()),
            _ => Route::List(self.list.query.clone()),
        }
    }

    /// Mount the initial view for `route`
    pub fn start(&mut self, route: Route) {
        self.load_shows();
        self.enter(route);
    }

    /// Open a show's detail view from the list
    pub fn open_show(&mut self, id: impl Into<String>) {
        let id = id.into();
        if self.state == AppState::Detail && self.detail.as_ref().is_some_and(|d| d.id == id) {
            return;
        }
        let genre = self.genre_hint(&id);
        self.nav_stack.push(self.current_route());
        self.show_detail(id, genre);
        self.input_mode = InputMode::Normal;
    }

    /// Open the show selected in the list
    pub fn open_selected(&mut self) -> bool {
        match self.list.selected_show().map(|s| s.id.clone()) {
            Some(id) => {
                self.open_show(id);
                true
            }
            None => false,
        }
    }

    /// First genre id of a show we already have a preview for
    fn genre_hint(&self, id: &str) -> Option<u32> {
        self.list
            .shows
            .ready()?
            .iter()
            .find(|s| s.id == id)?
            .genres
            .first()
            .copied()
    }

    fn show_detail(&mut self, id: String, genre: Option<u32>) {
        self.state = AppState::Detail;
        self.load_show(id, genre);
    }

    fn enter(&mut self, route: Route) {
        match route {
            Route::List(query) => {
                self.state = AppState::List;
                self.detail = None;
                self.list.restore(query);
            }
            Route::Show(id) => {
                let genre = self.genre_hint(&id);
                self.show_detail(id, genre);
            }
        }
    }

    /// Go back to previous route
    pub fn back(&mut self) -> bool {
        // If in editing mode, exit editing first
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            return true;
        }

        if let Some(prev) = self.nav_stack.pop() {
            tracing::debug!(route = %prev, "navigating back");
            self.enter(prev);
            true
        } else if self.state == AppState::Detail {
            // Opened directly on a show: fall back to the list as left
            let query = self.list.query.clone();
            self.enter(Route::List(query));
            true
        } else {
            false
        }
    }

    /// Re-fetch the current view
    pub fn reload(&mut self) {
        match self.state {
            AppState::List => self.load_shows(),
            AppState::Detail => {
                if let Some(id) = self.detail.as_ref().map(|d| d.id.clone()) {
                    let genre = self.genre_hint(&id);
                    self.load_show(id, genre);
                }
            }
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Set error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    /// Focus search input
    pub fn focus_search(&mut self) {
        if self.state == AppState::List {
            self.input_mode = InputMode::Editing;
            self.list.cursor_end();
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Clear error on any keypress
        self.error = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                true
            }
            KeyCode::Char(c) => {
                self.list.insert(c);
                true
            }
            KeyCode::Backspace => {
                self.list.backspace();
                true
            }
            KeyCode::Delete => {
                self.list.delete();
                true
            }
            KeyCode::Left => {
                self.list.cursor_left();
                true
            }
            KeyCode::Right => {
                self.list.cursor_right();
                true
            }
            KeyCode::Home => {
                self.list.cursor_home();
                true
            }
            KeyCode::End => {
                self.list.cursor_end();
                true
            }
            _ => false,
        }
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Char('t') => {
                self.toggle_theme();
                return true;
            }
            KeyCode::Char('r') => {
                self.reload();
                return true;
            }
            KeyCode::Esc => {
                return self.back();
            }
            _ => {}
        }

        match self.state {
            AppState::List => self.handle_list_key(key),
            AppState::Detail => self.handle_detail_key(key),
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.focus_search();
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.list.list.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.list.list.down();
                true
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => {
                self.list.prev_page();
                true
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => {
                self.list.next_page();
                true
            }
            KeyCode::Home => {
                self.list.list.first();
                true
            }
            KeyCode::End => {
                self.list.list.last();
                true
            }
            KeyCode::Char('g') => {
                let next = genres::next_filter(self.list.query.genre);
                self.list.set_genre(next);
                true
            }
            KeyCode::Char('G') => {
                let prev = genres::prev_filter(self.list.query.genre);
                self.list.set_genre(prev);
                true
            }
            KeyCode::Char('0') => {
                self.list.set_genre(None);
                true
            }
            KeyCode::Char('x') => {
                self.list.clear_search();
                true
            }
            KeyCode::Enter => self.open_selected(),
            _ => false,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Backspace {
            return self.back();
        }
        let Some(detail) = self.detail.as_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Left | KeyCode::Char('[') | KeyCode::Char('h') => {
                detail.prev_season();
                true
            }
            KeyCode::Right | KeyCode::Char(']') | KeyCode::Char('l') => {
                detail.next_season();
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                detail.episodes.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                detail.episodes.down();
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
