use shared::domain::Record;
use tracing::debug;

/// Column names discovered from the first fetched record, in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet(Vec<String>);

impl FieldSet {
    pub fn from_record(record: &Record) -> Self {
        Self(record.field_names().map(str::to_string).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|f| f == field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Authoritative in-memory copy of the service's records.
///
/// Mutations are keyed by `phone` and are expected to follow a confirmed server response;
/// the store itself never talks to the network.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    fields: FieldSet,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, phone: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.has_phone(phone))
    }

    /// Replaces the whole collection and re-derives the field set.
    pub fn replace(&mut self, records: Vec<Record>) {
        self.fields = records.first().map(FieldSet::from_record).unwrap_or_default();
        self.records = records;
        debug!(
            records = self.records.len(),
            fields = self.fields.len(),
            "record store replaced"
        );
    }

    /// Returns false when no record carries the same phone.
    pub fn apply_remote_update(&mut self, record: Record) -> bool {
        let Some(phone) = record.phone().map(|p| p.into_owned()) else {
            return false;
        };
        match self.records.iter_mut().find(|r| r.has_phone(&phone)) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => {
                debug!(%phone, "remote update for unknown phone ignored");
                false
            }
        }
    }

    /// Returns false when nothing matched.
    pub fn remove_by_key(&mut self, phone: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| !r.has_phone(phone));
        before != self.records.len()
    }

    /// Inserts a freshly stored record, replacing an existing one with the same phone.
    pub fn upsert(&mut self, record: Record) {
        if self.fields.is_empty() {
            self.fields = FieldSet::from_record(&record);
        }
        let phone = record.phone().map(|p| p.into_owned());
        let existing = phone
            .as_deref()
            .and_then(|p| self.records.iter().position(|r| r.has_phone(p)));
        match existing {
            Some(index) => self.records[index] = record,
            None => self.records.push(record),
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
