//! Rendering.
//!
//! Views are pure functions of a [`Screen`] snapshot; nothing here mutates
//! state.

/// Detail overlay.
pub mod overlay;
/// Result grid.
pub mod results;

use cinesearch_api::omdb::TitleType;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::Focus;
use crate::details::DetailsState;
use crate::input::{SearchInput, year_options};
use crate::search::SearchState;

const PLACEHOLDER: &str = "Search for movies, TV series, episodes...";

/// Everything the views need for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a> {
    /// Query and filters.
    pub input: &'a SearchInput,
    /// Search results.
    pub search: &'a SearchState,
    /// Selected title.
    pub details: &'a DetailsState,
    /// Focused pane.
    pub focus: Focus,
    /// Selected card index.
    pub cursor: usize,
    /// Overlay scroll offset in lines.
    pub overlay_scroll: u16,
    /// Calendar year the year filter counts back from.
    pub current_year: i32,
}

/// Draws the whole UI. Returns the number of result grid columns.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, screen: &Screen<'_>) -> usize {
    let area = frame.area();
    let filter_height = if screen.input.filters_open() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // search bar
            Constraint::Length(filter_height), // filter panel
            Constraint::Min(5),                // results
            Constraint::Length(3),             // footer
        ])
        .split(area);

    draw_search_bar(frame, chunks[0], screen);
    if screen.input.filters_open() {
        draw_filter_panel(frame, chunks[1], screen);
    }

    let selected = (screen.focus == Focus::Results).then_some(screen.cursor);
    let columns = results::draw(
        frame,
        chunks[2],
        screen.search,
        selected,
        screen.focus == Focus::Results,
    );

    draw_footer(frame, chunks[3], screen);
    overlay::draw(frame, area, screen.details, screen.overlay_scroll);

    columns
}

fn draw_search_bar(frame: &mut Frame, area: Rect, screen: &Screen<'_>) {
    let focused = screen.focus == Focus::Query && !screen.details.is_open();
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let query = screen.input.query();
    let mut spans = if query.is_empty() {
        vec![Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))]
    } else {
        vec![Span::raw(query)]
    };
    if focused {
        spans.push(Span::styled("\u{2588}", Style::default().fg(Color::Yellow)));
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(" Search ")
        .border_style(border_style);
    if screen.search.is_loading() {
        block = block.title(Line::from(" Searching... ").right_aligned());
    }
    if !screen.input.filters_open()
        && let Some(summary) = filter_summary(screen.input)
    {
        block = block.title_bottom(Line::from(summary).right_aligned());
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_filter_panel(frame: &mut Frame, area: Rect, screen: &Screen<'_>) {
    let years = year_options(screen.current_year);
    let range = match (years.first(), years.last()) {
        (Some(newest), Some(oldest)) => format!(" ({newest}-{oldest})"),
        _ => String::new(),
    };
    let value = Style::default().fg(Color::Cyan);

    let line = Line::from(vec![
        Span::raw("Year: "),
        Span::styled(year_label(screen.input.year()), value),
        Span::styled(range, Style::default().fg(Color::DarkGray)),
        Span::raw("    Type: "),
        Span::styled(kind_label(screen.input.kind()), value),
    ]);
    let panel = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Filters ")
            .title_bottom(
                Line::from(" ^Y/M-y: year  ^T: type  ^R: clear filters ").right_aligned(),
            ),
    );
    frame.render_widget(panel, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, screen: &Screen<'_>) {
    let help_text = if screen.details.is_open() {
        "Esc/q: close  \u{2191}\u{2193}/j/k: scroll  PgUp/PgDn: page  o: open IMDb  ^C: quit"
    } else {
        match screen.focus {
            Focus::Query => {
                "Type to search  ^U: clear  ^F: filters  \u{2193}/Tab/Enter: results  Esc: quit"
            }
            Focus::Results => {
                "\u{2190}\u{2191}\u{2193}\u{2192}/hjkl: move  Enter: details  o: open IMDb  /: search  q: quit"
            }
        }
    };

    let footer = Paragraph::new(Line::from(help_text)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn filter_summary(input: &SearchInput) -> Option<String> {
    if input.year().is_none() && input.kind().is_none() {
        return None;
    }
    Some(format!(
        " Year: {}  Type: {} ",
        year_label(input.year()),
        kind_label(input.kind())
    ))
}

fn year_label(year: Option<i32>) -> String {
    year.map_or_else(|| String::from("Any"), |y| y.to_string())
}

const fn kind_label(kind: Option<TitleType>) -> &'static str {
    match kind {
        Some(kind) => kind.label(),
        None => "Any",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    #![allow(clippy::unwrap_used)]

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    use super::*;

    /// Buffer contents as text, one line per row.
    pub fn buffer_text(buffer: &Buffer) -> String {
        let width = usize::from(buffer.area.width.max(1));
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render(screen: &Screen<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| {
                draw(frame, screen);
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn screen<'a>(
        input: &'a SearchInput,
        search: &'a SearchState,
        details: &'a DetailsState,
    ) -> Screen<'a> {
        Screen {
            input,
            search,
            details,
            focus: Focus::Query,
            cursor: 0,
            overlay_scroll: 0,
            current_year: 2026,
        }
    }

    #[test]
    fn test_placeholder_when_query_empty() {
        // Arrange
        let input = SearchInput::new();
        let search = SearchState::default();
        let details = DetailsState::default();

        // Act
        let text = render(&screen(&input, &search, &details));

        // Assert
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains("Discover Amazing Movies & TV Shows"));
    }

    #[test]
    fn test_filter_panel_lists_year_window() {
        // Arrange
        let mut input = SearchInput::new();
        input.set_query("batman");
        input.toggle_filters();
        input.next_kind();
        let search = SearchState::default();
        let details = DetailsState::default();

        // Act
        let text = render(&screen(&input, &search, &details));

        // Assert
        assert!(text.contains("batman"));
        assert!(text.contains("Year: Any (2026-1977)"));
        assert!(text.contains("Type: Movies"));
    }

    #[test]
    fn test_collapsed_filters_show_summary() {
        // Arrange
        let mut input = SearchInput::new();
        input.set_year(Some(2005), 2026);
        let search = SearchState::default();
        let details = DetailsState::default();

        // Act
        let text = render(&screen(&input, &search, &details));

        // Assert
        assert!(text.contains("Year: 2005  Type: Any"));
    }

    #[test]
    fn test_kind_label() {
        // Arrange & Act & Assert
        assert_eq!(kind_label(None), "Any");
        assert_eq!(kind_label(Some(TitleType::Series)), "TV Series");
    }
}
