// Table view state.
// Pairs a table engine with the row cursor used for keyboard navigation.

use ratatui::widgets::TableState;

use super::table::{Record, TableEngine};

/// A list view: query state plus the highlighted row.
#[derive(Debug)]
pub struct TableView<R: Record> {
    pub engine: TableEngine<R>,
    pub table_state: TableState,
}

impl<R: Record> TableView<R> {
    pub fn new(engine: TableEngine<R>) -> Self {
        Self {
            engine,
            table_state: TableState::default(),
        }
    }

    /// Get the highlighted row index within the derived view.
    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Move the cursor down, staying on the last row.
    pub fn select_next(&mut self, records: &[R]) {
        let len = self.engine.derived_view(records).len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => len - 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    /// Move the cursor up, staying on the first row.
    pub fn select_prev(&mut self, records: &[R]) {
        let len = self.engine.derived_view(records).len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => i.saturating_sub(1).min(len - 1),
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    /// Keep the cursor inside the derived view after it shrinks or grows.
    pub fn clamp_cursor(&mut self, records: &[R]) {
        let len = self.engine.derived_view(records).len();
        let selected = match (self.table_state.selected(), len) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.table_state.select(selected);
    }

    /// The record under the cursor.
    pub fn cursor_record<'r>(&self, records: &'r [R]) -> Option<&'r R> {
        let index = self.table_state.selected()?;
        self.engine.derived_view(records).get(index).copied()
    }
}
