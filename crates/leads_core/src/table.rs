use chrono::NaiveDate;
use shared::domain::{fields, Record};

use crate::{
    filter::{distinct_values, filter, FilterPredicate},
    sort::{sort, SortState},
    store::{FieldSet, RecordStore},
};

/// Table state owned by the controller: the record store plus the active predicates
/// and sort column. The visible rows are recomputed from scratch on every [`view`].
///
/// [`view`]: LeadTable::view
#[derive(Debug, Clone)]
pub struct LeadTable {
    store: RecordStore,
    predicates: Vec<FilterPredicate>,
    sort: SortState,
    date_field: String,
}

impl Default for LeadTable {
    fn default() -> Self {
        Self::with_date_field(fields::HEALTH_INSURANCE_EXPIRY)
    }
}

impl LeadTable {
    pub fn with_date_field(date_field: impl Into<String>) -> Self {
        Self {
            store: RecordStore::new(),
            predicates: Vec::new(),
            sort: SortState::default(),
            date_field: date_field.into(),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }

    pub fn fields(&self) -> &FieldSet {
        self.store.fields()
    }

    /// Field the date-range filter applies to.
    pub fn date_field(&self) -> &str {
        &self.date_field
    }

    pub fn set_date_field(&mut self, field: impl Into<String>) {
        self.date_field = field.into();
    }

    pub fn predicates(&self) -> &[FilterPredicate] {
        &self.predicates
    }

    pub fn set_predicates(&mut self, predicates: Vec<FilterPredicate>) {
        self.predicates = predicates;
    }

    pub fn add_predicate(&mut self, predicate: FilterPredicate) {
        self.predicates.push(predicate);
    }

    /// Replaces any date-range predicate with one on the configured date field.
    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.predicates
            .retain(|p| !matches!(p, FilterPredicate::DateRange { .. }));
        self.predicates.push(FilterPredicate::date_range(
            self.date_field.clone(),
            start,
            end,
        ));
    }

    pub fn clear_predicates(&mut self) {
        self.predicates.clear();
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn sort_state_mut(&mut self) -> &mut SortState {
        &mut self.sort
    }

    /// Column-header click: flips direction on the current column, otherwise sorts the
    /// new column ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        self.sort.toggle(field);
    }

    pub fn view(&self) -> Vec<&Record> {
        let filtered = filter(self.store.records(), self.store.fields(), &self.predicates);
        sort(filtered, self.sort.field(), self.sort.direction())
    }

    /// Choices for an exact-value filter on `field`.
    pub fn distinct_values(&self, field: &str) -> Vec<String> {
        distinct_values(self.store.records(), field)
    }
}

#[cfg(test)]
#[path = "tests/table_tests.rs"]
mod tests;
