//! Result grid rendering.

use cinesearch_api::omdb::{SummaryItem, TitleType};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::search::SearchState;

/// Number of placeholder cards shown while a search is in flight.
pub const SKELETON_COUNT: usize = 10;
/// Minimum card width in cells.
pub const CARD_WIDTH: u16 = 28;
/// Card height in cells, borders included.
pub const CARD_HEIGHT: u16 = 6;

const EMPTY_HEADLINE: &str = "Discover Amazing Movies & TV Shows";
const EMPTY_HINT: &str =
    "Start typing in the search bar above to find your favorite movies, TV series, and episodes.";

/// What the result area shows for a given search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsView<'a> {
    /// Skeleton placeholders.
    Loading,
    /// Error panel with the stored message.
    Error(&'a str),
    /// Prompt shown before anything was found.
    Empty,
    /// Caption plus a grid of cards.
    Populated {
        /// Titles to show.
        items: &'a [SummaryItem],
        /// Total count as reported by OMDb.
        total_results: &'a str,
    },
}

/// Picks the rendering for `state`. Loading wins over error, error wins
/// over results.
#[must_use]
pub fn view_for(state: &SearchState) -> ResultsView<'_> {
    if state.is_loading() {
        return ResultsView::Loading;
    }
    if let Some(message) = state.error.as_deref() {
        return ResultsView::Error(message);
    }
    if state.items.is_empty() {
        ResultsView::Empty
    } else {
        ResultsView::Populated {
            items: &state.items,
            total_results: &state.total_results,
        }
    }
}

/// Number of card columns that fit in `width` (at least one).
#[must_use]
pub fn grid_columns(width: u16) -> usize {
    usize::from(width.checked_div(CARD_WIDTH).unwrap_or(0).max(1))
}

/// Badge color for a title type.
#[must_use]
pub const fn badge_color(kind: TitleType) -> Color {
    match kind {
        TitleType::Movie => Color::Blue,
        TitleType::Series => Color::Green,
        TitleType::Episode | TitleType::Other => Color::Magenta,
    }
}

/// Draws the result area. Returns the number of grid columns used.
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    state: &SearchState,
    selected: Option<usize>,
    focused: bool,
) -> usize {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Results ")
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = grid_columns(inner.width);
    match view_for(state) {
        ResultsView::Loading => draw_skeletons(frame, inner, columns),
        ResultsView::Error(message) => draw_error(frame, inner, message),
        ResultsView::Empty => draw_empty(frame, inner),
        ResultsView::Populated {
            items,
            total_results,
        } => draw_grid(frame, inner, items, total_results, selected, columns),
    }
    columns
}

fn draw_skeletons(frame: &mut Frame, area: Rect, columns: usize) {
    let placeholder = Style::default().fg(Color::DarkGray);
    for (_, rect) in card_rects(area, SKELETON_COUNT, columns, 0) {
        let bar = "\u{2591}".repeat(usize::from(rect.width.saturating_sub(4)));
        let short = "\u{2591}".repeat(usize::from(rect.width.saturating_sub(4) / 2));
        let card = Paragraph::new(vec![
            Line::styled(bar.clone(), placeholder),
            Line::styled(short, placeholder),
            Line::styled(bar, placeholder),
        ])
        .block(Block::default().borders(Borders::ALL).border_style(placeholder));
        frame.render_widget(card, rect);
    }
}

fn draw_error(frame: &mut Frame, area: Rect, message: &str) {
    let panel = Paragraph::new(vec![
        Line::from(Span::styled(
            "Search Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(message),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(panel, centered_band(area, 7));
}

fn draw_empty(frame: &mut Frame, area: Rect) {
    let prompt = Paragraph::new(vec![
        Line::from(Span::styled(
            EMPTY_HEADLINE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::styled(EMPTY_HINT, Style::default().fg(Color::Gray)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(prompt, centered_band(area, 5));
}

#[allow(clippy::indexing_slicing)]
fn draw_grid(
    frame: &mut Frame,
    area: Rect,
    items: &[SummaryItem],
    total_results: &str,
    selected: Option<usize>,
    columns: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let caption = Line::from(vec![
        Span::raw("Found "),
        Span::styled(
            total_results,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" results"),
    ]);
    frame.render_widget(Paragraph::new(caption), chunks[0]);

    let grid = chunks[1];
    let visible_rows = usize::from((grid.height / CARD_HEIGHT).max(1));
    let selected_row = selected.map_or(0, |idx| idx.checked_div(columns).unwrap_or(0));
    let first_row = selected_row.saturating_sub(visible_rows.saturating_sub(1));

    for (idx, rect) in card_rects(grid, items.len(), columns, first_row) {
        if let Some(item) = items.get(idx) {
            draw_card(frame, rect, item, selected == Some(idx));
        }
    }
}

fn draw_card(frame: &mut Frame, area: Rect, item: &SummaryItem, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let badge_style = Style::default()
        .fg(Color::Black)
        .bg(badge_color(item.kind));
    let poster = if item.poster.is_some() {
        Span::styled("Poster", Style::default().fg(Color::Gray))
    } else {
        Span::styled("No Poster", Style::default().fg(Color::DarkGray))
    };

    let card = Paragraph::new(vec![
        Line::from(Span::styled(
            item.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::styled(item.year.as_str(), Style::default().fg(Color::Gray)),
        Line::from(vec![
            Span::styled(format!(" {} ", item.kind), badge_style),
            Span::raw(" "),
            poster,
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(card, area);
}

/// Positions of the cards that fit in `area`, starting at grid row
/// `first_row`. Cards stretch to share the full width.
#[allow(clippy::arithmetic_side_effects)]
fn card_rects(area: Rect, count: usize, columns: usize, first_row: usize) -> Vec<(usize, Rect)> {
    let columns = columns.max(1);
    let cols = u16::try_from(columns).unwrap_or(u16::MAX);
    let width = (area.width / cols).max(1);
    let visible_rows = usize::from(area.height / CARD_HEIGHT);

    (0..count)
        .filter_map(|idx| {
            let row = idx / columns;
            let col = idx % columns;
            if row < first_row || row >= first_row + visible_rows {
                return None;
            }
            let x = area.x + u16::try_from(col).ok()? * width;
            let y = area.y + u16::try_from(row - first_row).ok()? * CARD_HEIGHT;
            Some((idx, Rect::new(x, y, width, CARD_HEIGHT)))
        })
        .collect()
}

/// A full-width band of `height` rows, vertically centered in `area`.
fn centered_band(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let top = area.height.saturating_sub(height) / 2;
    Rect::new(area.x, area.y.saturating_add(top), area.width, height)
}
