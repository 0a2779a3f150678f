//! Application state and the terminal event loop.
//!
//! All state lives on the loop. Network calls and the search debounce run
//! as tokio tasks that report back through an [`AppEvent`] channel, so
//! outcomes are applied strictly in the order they arrive.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use cinesearch_api::omdb::{OmdbApi, imdb_url};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::details::{DetailsController, DetailsOutcome, DetailsState, execute_lookup};
use crate::input::{SearchInput, current_year};
use crate::search::{SearchController, SearchOutcome, SearchState, execute_search};
use crate::ui::{self, Screen};

/// Lines scrolled by PgUp/PgDn in the overlay.
const OVERLAY_PAGE: u16 = 10;

/// Events delivered to the loop by background tasks.
#[derive(Debug)]
pub enum AppEvent {
    /// The debounce delay elapsed; search with the current input.
    SearchDue,
    /// A search request finished.
    SearchResolved {
        /// Issue order of the request.
        generation: u64,
        /// What came back.
        outcome: SearchOutcome,
    },
    /// A lookup request finished.
    DetailsResolved {
        /// Title the lookup was for.
        id: String,
        /// What came back.
        outcome: DetailsOutcome,
    },
}

/// Pane receiving key input when the overlay is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Search bar.
    #[default]
    Query,
    /// Result grid.
    Results,
}

/// Interactive application state.
#[derive(Debug)]
pub struct App<A> {
    api: Arc<A>,
    input: SearchInput,
    search: SearchController,
    details: DetailsController,
    focus: Focus,
    cursor: usize,
    overlay_scroll: u16,
    grid_columns: usize,
    debouncer: Debouncer<AppEvent>,
    tx: UnboundedSender<AppEvent>,
    should_quit: bool,
}

impl<A: OmdbApi + Send + Sync + 'static> App<A> {
    /// Creates the app. Background tasks report on `tx`.
    #[must_use]
    pub fn new(api: Arc<A>, tx: UnboundedSender<AppEvent>) -> Self {
        Self {
            api,
            input: SearchInput::new(),
            search: SearchController::new(),
            details: DetailsController::new(),
            focus: Focus::Query,
            cursor: 0,
            overlay_scroll: 0,
            grid_columns: 1,
            debouncer: Debouncer::new(SEARCH_DEBOUNCE, tx.clone()),
            tx,
            should_quit: false,
        }
    }

    /// Query and filters.
    #[must_use]
    pub const fn input(&self) -> &SearchInput {
        &self.input
    }

    /// Search results.
    #[must_use]
    pub const fn search_state(&self) -> &SearchState {
        self.search.state()
    }

    /// Selected title.
    #[must_use]
    pub const fn details_state(&self) -> &DetailsState {
        self.details.state()
    }

    /// Focused pane.
    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    /// Selected card index.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns `true` once the user asked to exit.
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Records how many card columns the last frame laid out.
    pub fn set_grid_columns(&mut self, columns: usize) {
        self.grid_columns = columns.max(1);
    }

    /// Snapshot for rendering.
    #[must_use]
    pub fn screen(&self) -> Screen<'_> {
        Screen {
            input: &self.input,
            search: self.search.state(),
            details: self.details.state(),
            focus: self.focus,
            cursor: self.cursor,
            overlay_scroll: self.overlay_scroll,
            current_year: current_year(),
        }
    }

    /// Sets the query and searches right away, skipping the debounce.
    pub fn submit_query(&mut self, query: impl Into<String>) {
        self.input.set_query(query);
        self.debouncer.cancel();
        self.start_search();
    }

    /// Applies an event from a background task.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SearchDue => self.start_search(),
            AppEvent::SearchResolved {
                generation,
                outcome,
            } => {
                self.search.resolve(generation, outcome);
                let len = self.search.state().items.len();
                self.cursor = self.cursor.min(len.saturating_sub(1));
                if len == 0 && self.focus == Focus::Results {
                    self.focus = Focus::Query;
                }
            }
            AppEvent::DetailsResolved { id, outcome } => self.details.resolve(&id, outcome),
        }
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.details.state().is_open() {
            self.handle_overlay_key(key.code);
            return;
        }
        match self.focus {
            Focus::Query => self.handle_query_key(key.code, key.modifiers),
            Focus::Results => self.handle_results_key(key.code),
        }
    }

    fn handle_overlay_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => self.details.clear(),
            KeyCode::Down | KeyCode::Char('j') => {
                self.overlay_scroll = self.overlay_scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.overlay_scroll = self.overlay_scroll.saturating_sub(1);
            }
            KeyCode::PageDown => {
                self.overlay_scroll = self.overlay_scroll.saturating_add(OVERLAY_PAGE);
            }
            KeyCode::PageUp => {
                self.overlay_scroll = self.overlay_scroll.saturating_sub(OVERLAY_PAGE);
            }
            KeyCode::Char('o') => self.open_imdb_page(),
            _ => {}
        }
    }

    fn handle_query_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        let alt = modifiers.contains(KeyModifiers::ALT);
        let changed = match key {
            KeyCode::Char('u') if ctrl => self.input.clear_query(),
            KeyCode::Char('f') if ctrl => {
                self.input.toggle_filters();
                false
            }
            KeyCode::Char('y') if ctrl => self.input.next_year(current_year()),
            KeyCode::Char('y') if alt => self.input.prev_year(current_year()),
            KeyCode::Char('t') if ctrl => self.input.next_kind(),
            KeyCode::Char('r') if ctrl => self.input.clear_filters(),
            KeyCode::Char(ch) if !ctrl && !alt => self.input.push_char(ch),
            KeyCode::Backspace => self.input.pop_char(),
            KeyCode::Down | KeyCode::Tab | KeyCode::Enter => {
                if self.results_selectable() {
                    self.focus = Focus::Results;
                }
                false
            }
            KeyCode::Esc => {
                self.should_quit = true;
                false
            }
            _ => false,
        };
        if changed {
            self.debouncer.schedule(AppEvent::SearchDue);
        }
    }

    /// Cards can be selected only while the grid shows them.
    fn results_selectable(&self) -> bool {
        let state = self.search.state();
        !state.is_loading() && !state.items.is_empty()
    }

    fn handle_results_key(&mut self, key: KeyCode) {
        let len = self.search.state().items.len();
        let last = len.saturating_sub(1);
        let columns = self.grid_columns;
        match key {
            KeyCode::Left | KeyCode::Char('h') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor = self.cursor.saturating_add(1).min(last);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.cursor < columns {
                    self.focus = Focus::Query;
                } else {
                    self.cursor = self.cursor.saturating_sub(columns);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let below = self.cursor.saturating_add(columns);
                if below < len {
                    self.cursor = below;
                }
            }
            KeyCode::Enter => self.open_details(),
            KeyCode::Char('o') => self.open_imdb_page(),
            KeyCode::Tab | KeyCode::Char('/' | 'i') => self.focus = Focus::Query,
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn start_search(&mut self) {
        self.cursor = 0;
        let Some(pending) = self.search.search(self.input.params()) else {
            return;
        };
        // The grid shows skeletons until this search resolves.
        self.focus = Focus::Query;

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = execute_search(api.as_ref(), &pending.params).await;
            let event = AppEvent::SearchResolved {
                generation: pending.generation,
                outcome,
            };
            if tx.send(event).is_err() {
                tracing::debug!("app closed before search completed");
            }
        });
    }

    fn open_details(&mut self) {
        if !self.results_selectable() {
            return;
        }
        let Some(item) = self.search.state().items.get(self.cursor) else {
            return;
        };
        let id = self.details.fetch_details(item.id.clone());
        self.overlay_scroll = 0;

        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = execute_lookup(api.as_ref(), &id).await;
            if tx.send(AppEvent::DetailsResolved { id, outcome }).is_err() {
                tracing::debug!("app closed before lookup completed");
            }
        });
    }

    /// IMDb id of the title `o` should open.
    fn target_id(&self) -> Option<&str> {
        if self.details.state().is_open() {
            return self.details.state().requested.as_deref();
        }
        if !self.results_selectable() {
            return None;
        }
        self.search
            .state()
            .items
            .get(self.cursor)
            .map(|item| item.id.as_str())
    }

    fn open_imdb_page(&self) {
        let Some(id) = self.target_id() else {
            return;
        };
        let url = imdb_url(id);
        if let Err(err) = open::that(&url) {
            tracing::debug!(%url, error = %err, "failed to open browser");
        }
    }
}

/// Runs the interactive UI until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup, teardown or event reading fails.
pub async fn run_app<A>(api: A, initial_query: Option<String>) -> Result<()>
where
    A: OmdbApi + Send + Sync + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(Arc::new(api), tx);
    if let Some(query) = initial_query.filter(|q| !q.trim().is_empty()) {
        app.submit_query(query);
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut app, rx).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    result
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<A>,
    mut rx: UnboundedReceiver<AppEvent>,
) -> Result<()>
where
    A: OmdbApi + Send + Sync + 'static,
{
    let mut events = EventStream::new();
    let mut columns = 1;

    loop {
        terminal
            .draw(|frame| {
                columns = ui::draw(frame, &app.screen());
            })
            .context("failed to draw TUI")?;
        app.set_grid_columns(columns);

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => app.handle_key(key),
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err).context("failed to read terminal event"),
                None => return Ok(()),
            },
            Some(event) = rx.recv() => app.handle_event(event),
        }

        if app.should_quit() {
            tracing::debug!("quit requested");
            return Ok(());
        }
    }
}
