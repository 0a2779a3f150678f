//! Detail overlay.

use cinesearch_api::omdb::{DetailItem, NOT_AVAILABLE, RatingTier, imdb_url};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::results::badge_color;
use crate::details::{DetailsState, DetailsStatus};

/// Text color for a rating tier.
#[must_use]
pub const fn tier_color(tier: RatingTier) -> Color {
    match tier {
        RatingTier::Favorable => Color::Green,
        RatingTier::Neutral => Color::Yellow,
        RatingTier::Unfavorable => Color::Red,
        RatingTier::Unrated => Color::Gray,
    }
}

/// Draws the overlay on top of `area` when a title is selected.
pub fn draw(frame: &mut Frame, area: Rect, state: &DetailsState, scroll: u16) {
    if !state.is_open() {
        return;
    }

    let popup = centered(area, 80, 90);
    frame.render_widget(Clear, popup);

    let title = state
        .detail
        .as_ref()
        .map_or_else(|| String::from(" Details "), |d| format!(" {} ", d.summary.title));
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(Line::from(" Esc: close  j/k: scroll  o: IMDb ").right_aligned())
        .border_style(Style::default().fg(Color::Cyan));

    let body = match (state.status, state.detail.as_ref()) {
        (DetailsStatus::Loaded, Some(detail)) => {
            Paragraph::new(detail_lines(detail)).scroll((scroll, 0))
        }
        (DetailsStatus::Error, _) => Paragraph::new(vec![
            Line::from(Span::styled(
                state.error.as_deref().unwrap_or_default(),
                Style::default().fg(Color::Red),
            )),
            Line::default(),
            Line::styled("Press Esc to close.", Style::default().fg(Color::Gray)),
        ]),
        _ => Paragraph::new(skeleton_lines(popup.width)),
    };

    frame.render_widget(body.wrap(Wrap { trim: false }).block(block), popup);
}

fn skeleton_lines(width: u16) -> Vec<Line<'static>> {
    let style = Style::default().fg(Color::DarkGray);
    let full = usize::from(width.saturating_sub(4));
    let mut lines = vec![
        Line::styled("\u{2591}".repeat(full / 2), style),
        Line::default(),
    ];
    for _ in 0..3 {
        lines.push(Line::styled("\u{2591}".repeat(full), style));
    }
    lines.push(Line::default());
    for _ in 0..6 {
        lines.push(Line::styled("\u{2592}".repeat(full), style));
    }
    lines
}

/// Builds the overlay body for a loaded title.
#[must_use]
pub fn detail_lines(detail: &DetailItem) -> Vec<Line<'_>> {
    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let summary = &detail.summary;

    let mut lines = vec![Line::from(vec![
        Span::styled(
            summary.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" ({})", summary.year)),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", summary.kind),
            Style::default().fg(Color::Black).bg(badge_color(summary.kind)),
        ),
    ])];

    let meta: Vec<&str> = [
        Some(detail.runtime.as_str()),
        Some(detail.rated.as_str()),
        detail.released.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|v| is_available(v))
    .collect();
    if !meta.is_empty() {
        lines.push(Line::styled(meta.join("  \u{00b7}  "), Style::default().fg(Color::Gray)));
    }

    if !detail.ratings.is_empty() {
        lines.push(Line::default());
        lines.push(Line::styled("Ratings", heading));
        for rating in &detail.ratings {
            lines.push(Line::from(vec![
                Span::raw(format!("  {}: ", rating.label())),
                Span::styled(
                    rating.value.as_str(),
                    Style::default()
                        .fg(tier_color(rating.tier()))
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
    }

    if is_available(&detail.plot) {
        lines.push(Line::default());
        lines.push(Line::styled("Plot", heading));
        lines.push(Line::from(detail.plot.as_str()));
    }

    lines.push(Line::default());
    for (label, value) in [
        ("Director", Some(detail.director.as_str())),
        ("Writer", Some(detail.writer.as_str())),
        ("Cast", Some(detail.actors.as_str())),
        ("Country", Some(detail.country.as_str())),
        ("Language", detail.language.as_deref()),
        ("Awards", Some(detail.awards.as_str())),
        ("Box office", detail.box_office.as_deref()),
        ("IMDb votes", detail.imdb_votes.as_deref()),
    ] {
        if let Some(value) = value.filter(|v| is_available(v)) {
            lines.push(Line::from(vec![
                Span::styled(format!("{label}: "), heading),
                Span::raw(value),
            ]));
        }
    }

    let genres = detail.genres();
    if !genres.is_empty() {
        lines.push(Line::default());
        let mut spans = Vec::with_capacity(genres.len().saturating_mul(2));
        for genre in genres {
            spans.push(Span::styled(
                format!(" {genre} "),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::default());
    lines.push(Line::styled(
        summary
            .poster
            .as_deref()
            .map_or_else(|| String::from("No Poster"), |url| format!("Poster: {url}")),
        Style::default().fg(Color::DarkGray),
    ));
    if !summary.id.is_empty() {
        lines.push(Line::styled(
            imdb_url(&summary.id),
            Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        ));
    }

    lines
}

fn is_available(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != NOT_AVAILABLE
}

#[allow(clippy::indexing_slicing)]
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}
