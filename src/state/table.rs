// Interactive table behavior shared by every list view.
// Search, filters, stable sort, selection bookkeeping, and CSV export.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::Hash;

use tracing::debug;

use crate::error::{ConsoleError, Result};

use super::csv;
use super::orchestrator::{CompleteFn, ConfirmFn, OverlayPayload, ViewOrchestrator};

pub type RecordId = u64;

/// A column of a record type.
pub trait TableField: Copy + Eq + Hash + fmt::Debug {
    /// Human label, used for headers and CSV export.
    fn label(self) -> &'static str;
}

/// An entity that can be listed in a table.
pub trait Record {
    type Field: TableField;

    /// Plural entity name, used in notices and export file names.
    const ENTITY: &'static str;

    fn id(&self) -> RecordId;

    fn value(&self, field: Self::Field) -> FieldValue<'_>;
}

/// A comparable cell value. Each field always yields the same variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue<'a> {
    Int(i64),
    Text(Cow<'a, str>),
}

impl FieldValue<'_> {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Int(n) => Cow::Owned(n.to_string()),
            FieldValue::Text(s) => Cow::Borrowed(&**s),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(s: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(s: &'a String) -> Self {
        FieldValue::Text(Cow::Borrowed(s.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub key: F,
    pub direction: SortDirection,
}

/// Filter choice for one field. `All` removes the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    Only(String),
}

/// Read-only header checkbox state derived from selection and visible rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderCheckbox {
    pub checked: bool,
    pub indeterminate: bool,
}

/// Query state for one table.
#[derive(Debug, Clone)]
pub struct QueryState<F> {
    pub search_term: String,
    pub filters: HashMap<F, String>,
    pub sort: Option<SortSpec<F>>,
    /// Not limited to visible rows: survives filter changes.
    pub selection: BTreeSet<RecordId>,
}

impl<F> Default for QueryState<F> {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            filters: HashMap::new(),
            sort: None,
            selection: BTreeSet::new(),
        }
    }
}

/// Filter/sort/select behavior over a record slice supplied on every call.
///
/// The engine never stores records, so each derived view reflects the
/// slice it is given. Callers must call [`TableEngine::prune_selection`]
/// after removing records.
#[derive(Debug, Clone)]
pub struct TableEngine<R: Record> {
    search_fields: Vec<R::Field>,
    query: QueryState<R::Field>,
}

impl<R: Record> TableEngine<R> {
    /// Create an engine whose search matches any of `search_fields`.
    pub fn new(search_fields: Vec<R::Field>) -> Self {
        Self {
            search_fields,
            query: QueryState::default(),
        }
    }

    /// Start with a sort already applied.
    pub fn with_sort(mut self, key: R::Field, direction: SortDirection) -> Self {
        self.query.sort = Some(SortSpec { key, direction });
        self
    }

    pub fn query(&self) -> &QueryState<R::Field> {
        &self.query
    }

    pub fn search_term(&self) -> &str {
        &self.query.search_term
    }

    pub fn set_search_term(&mut self, text: impl Into<String>) {
        self.query.search_term = text.into();
        debug!(entity = R::ENTITY, term = %self.query.search_term, "search");
    }

    pub fn set_filter(&mut self, field: R::Field, filter: Filter) {
        debug!(entity = R::ENTITY, ?field, ?filter, "filter");
        match filter {
            Filter::All => {
                self.query.filters.remove(&field);
            }
            Filter::Only(value) => {
                self.query.filters.insert(field, value);
            }
        }
    }

    pub fn filter(&self, field: R::Field) -> Option<&str> {
        self.query.filters.get(&field).map(String::as_str)
    }

    /// New key sorts ascending; the current key flips direction.
    pub fn set_sort(&mut self, key: R::Field) {
        let direction = match self.query.sort {
            Some(SortSpec {
                key: current,
                direction: SortDirection::Ascending,
            }) if current == key => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        debug!(entity = R::ENTITY, ?key, ?direction, "sort");
        self.query.sort = Some(SortSpec { key, direction });
    }

    pub fn sort(&self) -> Option<SortSpec<R::Field>> {
        self.query.sort
    }

    /// Whether a record passes the search term and every filter.
    pub fn matches(&self, record: &R) -> bool {
        let passes_filters = self
            .query
            .filters
            .iter()
            .all(|(field, value)| record.value(*field).as_text() == value.as_str());
        if !passes_filters {
            return false;
        }

        if self.query.search_term.is_empty() {
            return true;
        }
        let term = self.query.search_term.to_lowercase();
        self.search_fields.iter().any(|field| {
            record
                .value(*field)
                .as_text()
                .to_lowercase()
                .contains(&term)
        })
    }

    /// Filtered and sorted rows, computed fresh from `records`.
    pub fn derived_view<'r>(&self, records: &'r [R]) -> Vec<&'r R> {
        let mut rows: Vec<&R> = records.iter().filter(|r| self.matches(r)).collect();

        if let Some(SortSpec { key, direction }) = self.query.sort {
            // slice::sort_by is stable, so equal keys keep collection order
            rows.sort_by(|a, b| {
                let ordering = a.value(key).cmp(&b.value(key));
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }

    pub fn selection(&self) -> &BTreeSet<RecordId> {
        &self.query.selection
    }

    pub fn selected_count(&self) -> usize {
        self.query.selection.len()
    }

    pub fn is_selected(&self, id: RecordId) -> bool {
        self.query.selection.contains(&id)
    }

    pub fn toggle_select(&mut self, id: RecordId) {
        if !self.query.selection.remove(&id) {
            self.query.selection.insert(id);
        }
    }

    /// Select exactly the visible rows, or clear the whole selection.
    pub fn select_all_visible(&mut self, records: &[R], on: bool) {
        if on {
            self.query.selection = self.derived_view(records).iter().map(|r| r.id()).collect();
        } else {
            self.query.selection.clear();
        }
    }

    pub fn clear_selection(&mut self) {
        self.query.selection.clear();
    }

    /// Counts-based tri-state of the header checkbox.
    pub fn header_checkbox(&self, records: &[R]) -> HeaderCheckbox {
        let visible = self.derived_view(records).len();
        let selected = self.query.selection.len();
        HeaderCheckbox {
            checked: selected == visible && visible > 0,
            indeterminate: selected > 0 && selected < visible,
        }
    }

    /// Drop selected ids that no longer exist in `records`.
    pub fn prune_selection(&mut self, records: &[R]) {
        let before = self.query.selection.len();
        self.query
            .selection
            .retain(|id| records.iter().any(|r| r.id() == *id));
        let pruned = before - self.query.selection.len();
        if pruned > 0 {
            debug!(entity = R::ENTITY, pruned, "pruned selection");
        }
    }

    /// Serialize the derived view as CSV with columns in `fields` order.
    pub fn export_csv(&self, records: &[R], fields: &[R::Field]) -> Result<String> {
        let rows = self.derived_view(records);
        if rows.is_empty() {
            return Err(ConsoleError::NothingToExport { entity: R::ENTITY });
        }

        let mut out = String::new();
        csv::push_row(&mut out, fields.iter().map(|f| f.label()));
        for row in rows {
            csv::push_row(&mut out, fields.iter().map(|f| row.value(*f).to_string()));
        }
        Ok(out)
    }

    /// Ask for confirmation of a reminder to every selected record.
    ///
    /// Does nothing when the selection is empty. On confirm, `on_confirm`
    /// runs first and the selection of the engine reached through `table`
    /// is cleared afterwards.
    pub fn request_bulk_reminder<C>(
        &self,
        orchestrator: &mut ViewOrchestrator<C>,
        on_confirm: Option<ConfirmFn<C>>,
        table: fn(&mut C) -> &mut TableEngine<R>,
    ) -> bool
    where
        R: 'static,
        C: 'static,
    {
        let count = self.query.selection.len();
        if count == 0 {
            return false;
        }

        let clear: CompleteFn<C> = Box::new(move |ctx: &mut C| table(ctx).clear_selection());
        orchestrator.open_overlay(OverlayPayload::Reminder { count }, on_confirm, Some(clear));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::orchestrator::{ConfirmArgs, OverlayKind};
    use crate::state::surface::ViewId;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u64,
        name: String,
        city: String,
        age: i64,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum RowField {
        Id,
        Name,
        City,
        Age,
    }

    impl TableField for RowField {
        fn label(self) -> &'static str {
            match self {
                RowField::Id => "ID",
                RowField::Name => "Name",
                RowField::City => "City",
                RowField::Age => "Age",
            }
        }
    }

    impl Record for Row {
        type Field = RowField;
        const ENTITY: &'static str = "rows";

        fn id(&self) -> RecordId {
            self.id
        }

        fn value(&self, field: RowField) -> FieldValue<'_> {
            match field {
                RowField::Id => FieldValue::Int(self.id as i64),
                RowField::Name => (&self.name).into(),
                RowField::City => (&self.city).into(),
                RowField::Age => FieldValue::Int(self.age),
            }
        }
    }

    fn row(id: u64, name: &str, city: &str, age: i64) -> Row {
        Row {
            id,
            name: name.to_string(),
            city: city.to_string(),
            age,
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            row(1, "Sara", "Milano", 34),
            row(2, "Luca", "Roma", 28),
            row(3, "Anna", "Milano", 41),
            row(4, "Paolo", "Torino", 28),
            row(5, "Giulia", "Roma", 9),
        ]
    }

    fn engine() -> TableEngine<Row> {
        TableEngine::new(vec![RowField::Name, RowField::City])
    }

    fn ids(view: &[&Row]) -> Vec<u64> {
        view.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_unfiltered_view_keeps_collection_order() {
        let records = rows();
        assert_eq!(ids(&engine().derived_view(&records)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let records = rows();
        let mut engine = engine();

        engine.set_search_term("MILANO");
        assert_eq!(ids(&engine.derived_view(&records)), vec![1, 3]);

        engine.set_search_term("ul");
        assert_eq!(ids(&engine.derived_view(&records)), vec![5]);

        engine.set_search_term("");
        assert_eq!(engine.derived_view(&records).len(), 5);
    }

    #[test]
    fn test_search_ignores_undeclared_fields() {
        let records = rows();
        let mut engine = engine();
        engine.set_search_term("41");
        assert!(engine.derived_view(&records).is_empty());
    }

    #[test]
    fn test_filters_and_search_compose() {
        let records = rows();
        let mut engine = engine();

        engine.set_filter(RowField::City, Filter::Only("Roma".to_string()));
        engine.set_filter(RowField::Age, Filter::Only("28".to_string()));
        assert_eq!(ids(&engine.derived_view(&records)), vec![2]);

        engine.set_search_term("paolo");
        assert!(engine.derived_view(&records).is_empty());
    }

    #[test]
    fn test_filter_all_restores_without_losing_other_criteria() {
        let records = rows();
        let mut engine = engine();

        engine.set_search_term("a");
        engine.set_filter(RowField::City, Filter::Only("Milano".to_string()));
        engine.set_filter(RowField::Age, Filter::Only("28".to_string()));
        assert!(engine.derived_view(&records).is_empty());

        engine.set_filter(RowField::City, Filter::All);
        assert_eq!(ids(&engine.derived_view(&records)), vec![2, 4]);
        assert_eq!(engine.filter(RowField::Age), Some("28"));
        assert_eq!(engine.search_term(), "a");
    }

    #[test]
    fn test_sort_toggle_never_returns_to_unsorted() {
        let mut engine = engine();
        assert_eq!(engine.sort(), None);

        engine.set_sort(RowField::Name);
        assert_eq!(engine.sort().unwrap().direction, SortDirection::Ascending);
        engine.set_sort(RowField::Name);
        assert_eq!(engine.sort().unwrap().direction, SortDirection::Descending);
        engine.set_sort(RowField::Name);
        assert_eq!(engine.sort().unwrap().direction, SortDirection::Ascending);

        engine.set_sort(RowField::Name);
        engine.set_sort(RowField::City);
        assert_eq!(
            engine.sort(),
            Some(SortSpec {
                key: RowField::City,
                direction: SortDirection::Ascending
            })
        );
    }

    #[test]
    fn test_numeric_sort_is_not_lexicographic() {
        let records = rows();
        let mut engine = engine();
        engine.set_sort(RowField::Age);
        assert_eq!(ids(&engine.derived_view(&records)), vec![5, 2, 4, 1, 3]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let records = rows();
        let mut engine = engine();

        engine.set_sort(RowField::City);
        assert_eq!(ids(&engine.derived_view(&records)), vec![1, 3, 2, 5, 4]);

        engine.set_sort(RowField::City);
        assert_eq!(ids(&engine.derived_view(&records)), vec![4, 2, 5, 1, 3]);
    }

    #[test]
    fn test_view_recomputes_when_records_change() {
        let mut records = rows();
        let mut engine = engine();
        engine.set_filter(RowField::City, Filter::Only("Roma".to_string()));
        assert_eq!(ids(&engine.derived_view(&records)), vec![2, 5]);

        records.push(row(6, "Marco", "Roma", 50));
        assert_eq!(ids(&engine.derived_view(&records)), vec![2, 5, 6]);

        records[0].city = "Roma".to_string();
        assert_eq!(ids(&engine.derived_view(&records)), vec![1, 2, 5, 6]);

        engine.set_sort(RowField::Name);
        assert_eq!(ids(&engine.derived_view(&records)), vec![5, 2, 6, 1]);
    }

    #[test]
    fn test_toggle_select_ignores_visibility() {
        let records = rows();
        let mut engine = engine();
        engine.set_filter(RowField::City, Filter::Only("Torino".to_string()));

        engine.toggle_select(1);
        assert!(engine.is_selected(1));
        assert!(!engine.derived_view(&records).iter().any(|r| r.id == 1));

        engine.toggle_select(1);
        assert!(!engine.is_selected(1));
    }

    #[test]
    fn test_selection_survives_filter_changes() {
        let records = rows();
        let mut engine = engine();
        engine.set_filter(RowField::City, Filter::Only("Roma".to_string()));
        engine.select_all_visible(&records, true);

        engine.set_filter(RowField::City, Filter::Only("Milano".to_string()));
        assert_eq!(engine.selection().iter().copied().collect::<Vec<_>>(), vec![2, 5]);
    }

    #[test]
    fn test_select_all_replaces_and_deselect_clears_everything() {
        let records = rows();
        let mut engine = engine();
        engine.toggle_select(4);
        engine.set_filter(RowField::City, Filter::Only("Milano".to_string()));

        engine.select_all_visible(&records, true);
        assert_eq!(engine.selection().iter().copied().collect::<Vec<_>>(), vec![1, 3]);

        engine.set_filter(RowField::City, Filter::All);
        engine.toggle_select(4);
        engine.set_filter(RowField::City, Filter::Only("Milano".to_string()));
        engine.select_all_visible(&records, false);
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn test_header_checkbox_states() {
        let records = rows();
        let mut engine = engine();
        assert_eq!(engine.header_checkbox(&records), HeaderCheckbox::default());

        engine.toggle_select(2);
        assert_eq!(
            engine.header_checkbox(&records),
            HeaderCheckbox {
                checked: false,
                indeterminate: true
            }
        );

        engine.select_all_visible(&records, true);
        assert_eq!(
            engine.header_checkbox(&records),
            HeaderCheckbox {
                checked: true,
                indeterminate: false
            }
        );
    }

    #[test]
    fn test_header_checkbox_empty_view_is_never_checked() {
        let records = rows();
        let mut engine = engine();
        engine.set_search_term("nobody");
        assert_eq!(engine.header_checkbox(&records), HeaderCheckbox::default());
    }

    #[test]
    fn test_prune_after_removal() {
        let mut records = rows();
        let mut engine = engine();
        engine.toggle_select(1);
        engine.toggle_select(2);

        records.retain(|r| r.id != 2);
        // Stale until the caller prunes
        assert!(engine.is_selected(2));
        engine.prune_selection(&records);
        assert_eq!(engine.selection().iter().copied().collect::<Vec<_>>(), vec![1]);

        engine.set_search_term("sara");
        assert_eq!(
            engine.header_checkbox(&records),
            HeaderCheckbox {
                checked: true,
                indeterminate: false
            }
        );
    }

    #[test]
    fn test_export_uses_derived_view_and_ignores_selection() {
        let records = rows();
        let mut engine = engine();
        engine.set_filter(RowField::City, Filter::Only("Roma".to_string()));
        engine.set_sort(RowField::Name);
        engine.toggle_select(1);

        let csv = engine
            .export_csv(&records, &[RowField::Id, RowField::Name, RowField::Age])
            .unwrap();
        assert_eq!(csv, "ID,Name,Age\n5,Giulia,9\n2,Luca,28\n");
    }

    #[test]
    fn test_select_all_then_export_matches_view() {
        let records = rows();
        let mut engine = engine();
        engine.set_search_term("o");
        engine.select_all_visible(&records, true);

        let csv = engine.export_csv(&records, &[RowField::Id]).unwrap();
        let exported: Vec<&str> = csv.lines().skip(1).collect();
        let visible: Vec<String> = engine
            .derived_view(&records)
            .iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(exported, visible);
    }

    #[test]
    fn test_export_escapes_cells() {
        let records = vec![row(1, "Rossi, Mario", "The \"Hub\"", 30)];
        let csv = engine()
            .export_csv(&records, &[RowField::Name, RowField::City])
            .unwrap();
        assert_eq!(csv, "Name,City\n\"Rossi, Mario\",\"The \"\"Hub\"\"\"\n");
    }

    #[test]
    fn test_export_empty_view_reports_nothing_to_export() {
        let records = rows();
        let mut engine = engine();
        engine.set_search_term("zzz");

        let result = engine.export_csv(&records, &[RowField::Id]);
        assert!(matches!(
            result,
            Err(ConsoleError::NothingToExport { entity: "rows" })
        ));
    }

    struct Ctx {
        table: TableEngine<Row>,
        sent: Vec<usize>,
    }

    fn ctx_table(ctx: &mut Ctx) -> &mut TableEngine<Row> {
        &mut ctx.table
    }

    #[test]
    fn test_bulk_reminder_with_empty_selection_is_noop() {
        let mut orch: ViewOrchestrator<Ctx> = ViewOrchestrator::new(ViewId::ManageParticipants);
        let ctx = Ctx {
            table: engine(),
            sent: Vec::new(),
        };
        assert!(!ctx.table.request_bulk_reminder(&mut orch, None, ctx_table));
        assert!(orch.top_overlay().is_none());
    }

    #[test]
    fn test_bulk_reminder_clears_selection_after_confirm() {
        let records = rows();
        let mut orch: ViewOrchestrator<Ctx> = ViewOrchestrator::new(ViewId::ManageParticipants);
        let mut ctx = Ctx {
            table: engine(),
            sent: Vec::new(),
        };
        ctx.table.select_all_visible(&records, true);

        let opened = ctx.table.request_bulk_reminder(
            &mut orch,
            Some(Box::new(|ctx: &mut Ctx, _: &ConfirmArgs| {
                // Selection is still intact when the action runs
                let count = ctx.table.selected_count();
                ctx.sent.push(count);
            })),
            ctx_table,
        );
        assert!(opened);
        assert_eq!(
            orch.overlay(OverlayKind::Reminder).unwrap().payload(),
            &OverlayPayload::Reminder { count: 5 }
        );

        orch.navigate_to(ViewId::Reports);
        orch.confirm_overlay(
            OverlayKind::Reminder,
            ConfirmArgs::Reminder {
                subject: "Hello".to_string(),
                body: String::new(),
            },
            &mut ctx,
        );
        assert_eq!(ctx.sent, vec![5]);
        assert!(ctx.table.selection().is_empty());
    }
}
