//! Vertical option list shared by the menu screens and the game-over popup.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use strum::IntoEnumIterator;
use tracing::instrument;

/// An option shown in a [`Menu`].
pub(super) trait MenuOption: Copy + std::fmt::Debug + IntoEnumIterator {
    /// Text shown for this option.
    fn label(self) -> &'static str;
}

/// Selectable list of every variant of `T`, wrapping at both ends.
#[derive(Debug)]
pub(super) struct Menu<T> {
    options: Vec<T>,
    list_state: ListState,
}

impl<T: MenuOption> Menu<T> {
    /// Creates a menu with the first option selected.
    pub(super) fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            options: T::iter().collect(),
            list_state,
        }
    }

    /// Moves selection up.
    #[instrument(skip(self))]
    pub(super) fn select_previous(&mut self) {
        let count = self.options.len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Moves selection down.
    #[instrument(skip(self))]
    pub(super) fn select_next(&mut self) {
        let count = self.options.len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Returns the currently selected option.
    pub(super) fn selected(&self) -> T {
        let idx = self.list_state.selected().unwrap_or(0);
        self.options[idx.min(self.options.len() - 1)]
    }

    /// Renders the list into `area`.
    pub(super) fn render(&self, frame: &mut Frame, area: Rect, title: &str) {
        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|opt| ListItem::new(opt.label()))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title.to_string()))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state;
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
