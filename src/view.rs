//! Terminal rendering of an interaction snapshot
//!
//! Draws the input box with the suggestion list just below it, and keeps a
//! row map of the list so pointer positions can be turned back into
//! suggestion addresses.

use std::sync::Arc;

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::state::InteractionState;
use crate::suggestion::{Address, SuggestionsCollection};

const INPUT_HEIGHT: u16 = 3;
const MAX_VISIBLE_ROWS: usize = 10;
const MIN_LIST_WIDTH: usize = 20;
const LIST_BORDER: u16 = 2;
const LIST_PADDING: u16 = 4;
const LIST_OFFSET_X: u16 = 2;
const FOCUS_MARKER: &str = "► ";
const NO_MARKER: &str = "  ";

/// Where the list landed on screen, for pointer hit-testing
///
/// Kept between frames so the scroll position stays put while the pointer
/// moves over the list.
#[derive(Debug, Clone, Default)]
pub struct ListLayout {
    area: Option<Rect>,
    /// One entry per drawn row; `None` for section headers
    rows: Vec<Option<Address>>,
    /// Index of the first drawn row within the whole list
    offset: usize,
    /// Collection the offset belongs to
    source: Option<Arc<SuggestionsCollection>>,
}

impl ListLayout {
    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    /// Suggestion drawn at the given screen cell, if any
    pub fn address_at(&self, column: u16, row: u16) -> Option<Address> {
        let area = self.area?;
        let inner = inner_rect(area);
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        let index = usize::from(row - inner.y);
        self.rows.get(index).copied().flatten()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the cell lies on the list, border and headers included
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area
            .is_some_and(|area| area.contains(Position::new(column, row)))
    }
}

fn inner_rect(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Place a popup directly below `anchor`, clipped to `bounds`
pub fn popup_below_anchor(anchor: Rect, bounds: Rect, width: u16, height: u16) -> Rect {
    let x = anchor.x + LIST_OFFSET_X;
    let y = anchor.y.saturating_add(anchor.height);
    let available_height = bounds.bottom().saturating_sub(y);

    Rect {
        x,
        y,
        width: width.min(anchor.width.saturating_sub(LIST_OFFSET_X * 2)),
        height: height.min(available_height),
    }
}

/// Draw the whole widget into `area`, updating `layout` for hit-testing
pub fn render(frame: &mut Frame, area: Rect, state: &InteractionState, layout: &mut ListLayout) {
    let input_area = Rect {
        height: INPUT_HEIGHT.min(area.height),
        ..area
    };
    render_input(frame, input_area, state);
    render_list(frame, input_area, area, state, layout);
}

fn render_input(frame: &mut Frame, area: Rect, state: &InteractionState) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(" Suburb ")
        .border_style(Style::default().fg(Color::Cyan));
    if let Some(error) = &state.fetch_error {
        block = block.title_bottom(Line::styled(
            format!(" {} ", error),
            Style::default().fg(Color::Red),
        ));
    }

    frame.render_widget(Paragraph::new(state.raw_text.as_str()).block(block), area);

    let text_width = u16::try_from(state.raw_text.width()).unwrap_or(u16::MAX);
    let cursor_x = area.x.saturating_add(1).saturating_add(text_width);
    frame.set_cursor_position(Position::new(
        cursor_x.min(area.right().saturating_sub(2)),
        area.y + 1,
    ));
}

fn render_list(
    frame: &mut Frame,
    input_area: Rect,
    bounds: Rect,
    state: &InteractionState,
    layout: &mut ListLayout,
) {
    if !state.visible || state.sections.is_empty() {
        *layout = ListLayout::default();
        return;
    }

    let mut rows: Vec<Option<Address>> = Vec::new();
    let mut lines: Vec<Line<'static>> = Vec::new();
    for section in &state.sections {
        if let Some(name) = &section.name {
            rows.push(None);
            lines.push(Line::styled(
                name.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        for item in &section.items {
            rows.push(Some(item.address));
            lines.push(item_line(&item.line, item.focused));
        }
    }

    let max_width = lines
        .iter()
        .map(Line::width)
        .max()
        .unwrap_or(0)
        .max(MIN_LIST_WIDTH);
    let width = u16::try_from(max_width)
        .unwrap_or(u16::MAX)
        .saturating_add(LIST_PADDING);
    let height = rows.len().min(MAX_VISIBLE_ROWS) as u16 + LIST_BORDER;
    let list_area = popup_below_anchor(input_area, bounds, width, height);
    if list_area.height <= LIST_BORDER {
        *layout = ListLayout::default();
        return;
    }
    let capacity = usize::from(list_area.height - LIST_BORDER);

    let same_list = layout
        .source
        .as_ref()
        .is_some_and(|source| Arc::ptr_eq(source, &state.collection));
    let mut offset = if same_list { layout.offset } else { 0 };

    // Scroll only when the focused row is outside the window
    let focused_row = state
        .cursor
        .and_then(|cursor| rows.iter().position(|row| *row == Some(cursor)));
    if let Some(row) = focused_row {
        if row < offset {
            offset = row;
        } else if row >= offset + capacity {
            offset = row + 1 - capacity;
        }
    }
    offset = offset.min(rows.len().saturating_sub(capacity));

    let rows: Vec<Option<Address>> = rows.into_iter().skip(offset).take(capacity).collect();
    let lines: Vec<Line<'static>> = lines.into_iter().skip(offset).take(capacity).collect();

    frame.render_widget(Clear, list_area);
    let list = List::new(lines.into_iter().map(ListItem::new).collect::<Vec<_>>()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(list, list_area);

    *layout = ListLayout {
        area: Some(list_area),
        rows,
        offset,
        source: Some(Arc::clone(&state.collection)),
    };
}

fn item_line(line: &Line<'static>, focused: bool) -> Line<'static> {
    let (marker, patch) = if focused {
        (
            FOCUS_MARKER,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (NO_MARKER, Style::default().fg(Color::White))
    };

    let mut spans = Vec::with_capacity(line.spans.len() + 1);
    spans.push(Span::styled(marker, patch));
    spans.extend(
        line.spans
            .iter()
            .map(|span| Span::styled(span.content.clone(), patch.patch(span.style))),
    );
    Line::from(spans)
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod view_tests;
