//! Reusable scrollable, filterable list widget.
//!
//! `ListSurface` owns an item collection, a cursor, and an optional text
//! filter, and renders itself into a ratatui frame. The state machine
//! configures it once and forwards raw key events to it; while the filter
//! input has focus the surface owns the whole keyboard.
//!
//! Items describe themselves through the [`RowItem`] capability trait, and
//! the ranking function is injectable so callers can replace the default
//! exact-substring matcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::theme::Theme;

/// Display contract for one list row.
pub trait RowItem {
    /// Primary row text.
    fn title(&self) -> String;
    /// Secondary row text shown under the title.
    fn subtitle(&self) -> String;
    /// Composite string the filter matches against.
    fn filter_key(&self) -> String;
}

/// Ranking function: given a query and the per-item filter keys, returns the
/// indices of matching items in display order.
pub type FilterFn = fn(&str, &[String]) -> Vec<usize>;

/// Exact case-insensitive substring containment, order preserving.
pub fn substring_filter(query: &str, keys: &[String]) -> Vec<usize> {
    let needle = query.to_lowercase();
    keys.iter()
        .enumerate()
        .filter(|(_, key)| key.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

/// Filter lifecycle of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterState {
    /// No filter; all items visible.
    #[default]
    Unfiltered,
    /// The filter input has keyboard focus and captures every key.
    Editing,
    /// A filter is applied but focus has returned to the list.
    Applied,
}

/// Lines each item occupies on screen: title, subtitle, spacer.
const ROW_HEIGHT: usize = 3;
/// Lines reserved for the title bar, filter line, and status line.
const CHROME_HEIGHT: usize = 3;

/// A scrollable, filterable list over items implementing [`RowItem`].
#[derive(Debug, Clone)]
pub struct ListSurface<T> {
    title: String,
    items: Vec<T>,
    filter_keys: Vec<String>,
    /// Indices into `items` that survive the current filter, in order.
    visible: Vec<usize>,
    /// Cursor position within `visible`.
    cursor: usize,
    /// Scroll offset within `visible`.
    offset: usize,
    query: String,
    filter_state: FilterState,
    filter: FilterFn,
    width: u16,
    height: u16,
}

impl<T: RowItem> ListSurface<T> {
    /// Build a list over `items` with the default substring matcher.
    pub fn new(title: impl Into<String>, items: Vec<T>, width: u16, height: u16) -> Self {
        let filter_keys: Vec<String> = items.iter().map(RowItem::filter_key).collect();
        let visible: Vec<usize> = (0..items.len()).collect();
        Self {
            title: title.into(),
            items,
            filter_keys,
            visible,
            cursor: 0,
            offset: 0,
            query: String::new(),
            filter_state: FilterState::Unfiltered,
            filter: substring_filter,
            width,
            height,
        }
    }

    /// Replace the ranking function.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterFn) -> Self {
        self.filter = filter;
        self.apply_filter();
        self
    }

    /// Total item count, ignoring any filter.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items that survive the current filter.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Whether the filter input currently owns the keyboard.
    #[must_use]
    pub fn is_filtering(&self) -> bool {
        self.filter_state == FilterState::Editing
    }

    #[must_use]
    pub fn filter_state(&self) -> FilterState {
        self.filter_state
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Cursor position within the filtered view.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The currently highlighted item, if any row is visible.
    #[must_use]
    pub fn selected_item(&self) -> Option<&T> {
        self.visible.get(self.cursor).and_then(|&i| self.items.get(i))
    }

    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Resize the surface and re-clamp the scroll window.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.clamp_scroll();
    }

    /// Handle one key event. Navigation when the list has focus, text
    /// editing when the filter input has focus.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.filter_state == FilterState::Editing {
            self.handle_filter_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('/') => {
                self.filter_state = FilterState::Editing;
                self.query.clear();
                self.apply_filter();
            }
            KeyCode::Esc => {
                if self.filter_state == FilterState::Applied {
                    self.clear_filter();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.cursor_down(1),
            KeyCode::Up | KeyCode::Char('k') => self.cursor_up(1),
            KeyCode::PageDown => self.cursor_down(self.rows_per_page()),
            KeyCode::PageUp => self.cursor_up(self.rows_per_page()),
            KeyCode::Home | KeyCode::Char('g') => {
                self.cursor = 0;
                self.clamp_scroll();
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = self.visible.len().saturating_sub(1);
                self.clamp_scroll();
            }
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.clear_filter(),
            KeyCode::Enter => {
                self.filter_state = if self.query.is_empty() {
                    FilterState::Unfiltered
                } else {
                    FilterState::Applied
                };
                log::debug!("Filter applied: {:?} ({} hits)", self.query, self.visible.len());
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.apply_filter();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query.push(c);
                self.apply_filter();
            }
            _ => {}
        }
    }

    /// Drop any filter and show the full collection again.
    pub fn clear_filter(&mut self) {
        self.query.clear();
        self.filter_state = FilterState::Unfiltered;
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        self.visible = if self.query.is_empty() {
            (0..self.items.len()).collect()
        } else {
            (self.filter)(&self.query, &self.filter_keys)
        };
        if self.cursor >= self.visible.len() {
            self.cursor = self.visible.len().saturating_sub(1);
        }
        self.clamp_scroll();
    }

    fn rows_per_page(&self) -> usize {
        ((self.height as usize).saturating_sub(CHROME_HEIGHT) / ROW_HEIGHT).max(1)
    }

    fn cursor_down(&mut self, by: usize) {
        if self.visible.is_empty() {
            return;
        }
        self.cursor = (self.cursor + by).min(self.visible.len() - 1);
        self.clamp_scroll();
        log::trace!("List cursor: {}", self.cursor);
    }

    fn cursor_up(&mut self, by: usize) {
        self.cursor = self.cursor.saturating_sub(by);
        self.clamp_scroll();
        log::trace!("List cursor: {}", self.cursor);
    }

    fn clamp_scroll(&mut self) {
        let page = self.rows_per_page();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        }
        if self.cursor >= self.offset + page {
            self.offset = self.cursor + 1 - page;
        }
    }

    /// Render the surface: title bar, filter line, rows, and status line.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Length(1), // Filter input / spacer
                Constraint::Min(0),    // Rows
                Constraint::Length(1), // Status line
            ])
            .split(area);

        let title = Paragraph::new(Span::styled(
            format!(" {} ", self.title),
            Style::default()
                .fg(theme.inverted_fg)
                .bg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(title, chunks[0]);

        match self.filter_state {
            FilterState::Editing => {
                let input = Line::from(vec![
                    Span::styled("Filter: ", Style::default().fg(theme.primary)),
                    Span::styled(self.query.clone(), Style::default().fg(theme.normal)),
                    Span::styled("█", Style::default().fg(theme.primary)),
                ]);
                frame.render_widget(Paragraph::new(input), chunks[1]);
            }
            FilterState::Applied => {
                let input = Line::from(Span::styled(
                    format!("Filter: {}", self.query),
                    Style::default().fg(theme.subtle),
                ));
                frame.render_widget(Paragraph::new(input), chunks[1]);
            }
            FilterState::Unfiltered => {}
        }

        self.render_rows(frame, chunks[2], theme);

        let status = if self.query.is_empty() {
            format!("{} modules", self.visible.len())
        } else {
            format!("{} of {} modules", self.visible.len(), self.items.len())
        };
        let hint = match self.filter_state {
            FilterState::Editing => "enter apply • esc cancel",
            FilterState::Applied => "esc clear filter • enter open • q quit",
            FilterState::Unfiltered => "/ filter • enter open • q quit",
        };
        let status_line = Line::from(vec![
            Span::styled(status, Style::default().fg(theme.subtle)),
            Span::styled(format!("  •  {hint}"), Style::default().fg(theme.subtle)),
        ]);
        frame.render_widget(Paragraph::new(status_line), chunks[3]);
    }

    fn render_rows(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if self.visible.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "  No modules match.",
                Style::default().fg(theme.subtle),
            ));
            frame.render_widget(empty, area);
            return;
        }

        let fit = (area.height as usize / ROW_HEIGHT).max(1);
        let mut lines: Vec<Line> = Vec::with_capacity(fit * ROW_HEIGHT);
        let dim_rows = self.filter_state == FilterState::Editing;

        for (row, &item_index) in self
            .visible
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(fit)
        {
            let item = &self.items[item_index];
            let selected = row == self.cursor;

            let (prefix, title_style, subtitle_style) = if selected && !dim_rows {
                (
                    "│ ",
                    Style::default()
                        .fg(theme.primary)
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(theme.normal),
                )
            } else if dim_rows && !selected {
                (
                    "  ",
                    Style::default().fg(theme.subtle),
                    Style::default().fg(theme.subtle),
                )
            } else {
                (
                    "  ",
                    Style::default().fg(theme.normal),
                    Style::default().fg(theme.subtle),
                )
            };

            lines.push(Line::from(vec![
                Span::styled(prefix, Style::default().fg(theme.primary)),
                Span::styled(item.title(), title_style),
            ]));
            lines.push(Line::from(vec![
                Span::styled(prefix, Style::default().fg(theme.primary)),
                Span::styled(item.subtitle(), subtitle_style),
            ]));
            lines.push(Line::default());
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}
