use super::*;
use crate::sort::SortDirection;

fn table_with(records: Vec<Record>) -> LeadTable {
    let mut table = LeadTable::default();
    table.store_mut().replace(records);
    table
}

fn phones(rows: &[&Record]) -> Vec<String> {
    rows.iter()
        .map(|r| r.phone().map(|p| p.into_owned()).unwrap_or_default())
        .collect()
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("date")
}

fn sample() -> Vec<Record> {
    vec![
        Record::from_pairs([
            ("phone", "1"),
            ("name", "Alice"),
            ("healthInsuranceExpiry", "2024-06-01"),
            ("termInsuranceExpiry", "2026-01-01"),
        ]),
        Record::from_pairs([
            ("phone", "2"),
            ("name", "Bob"),
            ("healthInsuranceExpiry", "2025-01-01"),
            ("termInsuranceExpiry", ""),
        ]),
        Record::from_pairs([
            ("phone", "3"),
            ("name", "alina"),
            ("healthInsuranceExpiry", "2025-03-10"),
            ("termInsuranceExpiry", "2025-09-09"),
        ]),
    ]
}

#[test]
fn view_filters_then_sorts() {
    let mut table = table_with(sample());
    table.add_predicate(FilterPredicate::contains("name", "AL"));
    table.toggle_sort("name");
    table.toggle_sort("name");

    assert_eq!(table.sort_state().direction(), SortDirection::Descending);
    assert_eq!(phones(&table.view()), vec!["3", "1"]);
}

#[test]
fn date_range_uses_configured_field_and_replaces_previous_range() {
    let mut table = table_with(sample());
    table.set_date_range(Some(date("2024-12-01")), Some(date("2025-12-31")));
    assert_eq!(phones(&table.view()), vec!["2", "3"]);

    table.set_date_field("termInsuranceExpiry");
    table.set_date_range(Some(date("2025-01-01")), None);
    assert_eq!(table.predicates().len(), 1);
    assert_eq!(phones(&table.view()), vec!["1", "3"]);
}

#[test]
fn cleared_predicates_restore_fetch_order() {
    let mut table = table_with(sample());
    table.add_predicate(FilterPredicate::search("bob"));
    assert_eq!(phones(&table.view()), vec!["2"]);

    table.clear_predicates();
    assert_eq!(phones(&table.view()), vec!["1", "2", "3"]);
}

#[test]
fn default_date_field_is_health_insurance_expiry() {
    assert_eq!(LeadTable::default().date_field(), "healthInsuranceExpiry");
}

#[test]
fn distinct_values_come_from_the_whole_store() {
    let mut table = table_with(sample());
    table.add_predicate(FilterPredicate::contains("name", "bob"));
    assert_eq!(table.distinct_values("name"), vec!["Alice", "Bob", "alina"]);
}
