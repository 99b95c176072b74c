use super::*;

fn lead(phone: &str, name: &str) -> Record {
    Record::from_pairs([("phone", phone), ("name", name)])
}

fn names<R: Borrow<Record>>(rows: &[R]) -> Vec<String> {
    rows.iter()
        .map(|r| {
            let record: &Record = r.borrow();
            record.text("name").map(|n| n.into_owned()).unwrap_or_default()
        })
        .collect()
}

fn phones<R: Borrow<Record>>(rows: &[R]) -> Vec<String> {
    rows.iter()
        .map(|r| {
            let record: &Record = r.borrow();
            record.phone().map(|p| p.into_owned()).unwrap_or_default()
        })
        .collect()
}

#[test]
fn sorts_names_both_directions() {
    let rows = vec![lead("2", "Bob"), lead("1", "Alice")];

    let asc = sort(rows.clone(), Some("name"), SortDirection::Ascending);
    assert_eq!(names(&asc), vec!["Alice", "Bob"]);

    let desc = sort(rows, Some("name"), SortDirection::Descending);
    assert_eq!(names(&desc), vec!["Bob", "Alice"]);
}

#[test]
fn no_key_keeps_input_order() {
    let rows = vec![lead("2", "Bob"), lead("1", "Alice")];
    let out = sort(rows, None, SortDirection::Descending);
    assert_eq!(names(&out), vec!["Bob", "Alice"]);
}

#[test]
fn numeric_values_compare_as_numbers() {
    let rows = vec![
        Record::from_pairs([("phone", "1"), ("amount", "100")]),
        Record::from_pairs([("phone", "2"), ("amount", "9")]),
        Record::from_pairs([("phone", "3"), ("amount", "25.5")]),
    ];

    let out = sort(rows, Some("amount"), SortDirection::Ascending);
    assert_eq!(phones(&out), vec!["2", "3", "1"]);
}

#[test]
fn mixed_columns_put_blanks_then_numbers_then_text() {
    let rows = vec![
        Record::from_pairs([("phone", "a"), ("v", "1a")]),
        Record::from_pairs([("phone", "b"), ("v", "10")]),
        Record::from_pairs([("phone", "c"), ("v", "9")]),
        Record::from_pairs([("phone", "d"), ("v", "")]),
    ];

    let out = sort(rows, Some("v"), SortDirection::Ascending);
    assert_eq!(phones(&out), vec!["d", "c", "b", "a"]);
}

#[test]
fn blank_amounts_lead_ascending_and_trail_descending() {
    let rows = vec![
        Record::from_pairs([("phone", "1"), ("sipLumpsum", "5000")]),
        Record::from_pairs([("phone", "2"), ("sipLumpsum", "")]),
        Record::from_pairs([("phone", "3")]),
        Record::from_pairs([("phone", "4"), ("sipLumpsum", "250")]),
    ];

    let asc = sort(rows.clone(), Some("sipLumpsum"), SortDirection::Ascending);
    assert_eq!(phones(&asc), vec!["2", "3", "4", "1"]);

    let desc = sort(rows, Some("sipLumpsum"), SortDirection::Descending);
    assert_eq!(phones(&desc), vec!["1", "4", "2", "3"]);
}

#[test]
fn ties_keep_input_order_in_both_directions() {
    let rows = vec![
        lead("1", "Sam"),
        lead("2", "Ann"),
        lead("3", "Sam"),
        lead("4", "Ann"),
    ];

    let asc = sort(rows.clone(), Some("name"), SortDirection::Ascending);
    assert_eq!(phones(&asc), vec!["2", "4", "1", "3"]);

    let desc = sort(rows, Some("name"), SortDirection::Descending);
    assert_eq!(phones(&desc), vec!["1", "3", "2", "4"]);
}

#[test]
fn descending_reverses_ascending_without_ties() {
    let rows = vec![
        lead("1", "Meera"),
        lead("2", "Arjun"),
        lead("3", "Zoya"),
        lead("4", "Dev"),
    ];

    let mut asc = sort(rows.clone(), Some("name"), SortDirection::Ascending);
    let desc = sort(rows, Some("name"), SortDirection::Descending);
    asc.reverse();
    assert_eq!(asc, desc);
}

#[test]
fn sorting_is_a_permutation() {
    let rows = vec![lead("1", "C"), lead("2", "A"), lead("3", "B"), lead("4", "A")];
    let out = sort(rows.iter().collect::<Vec<_>>(), Some("name"), SortDirection::Ascending);

    assert_eq!(out.len(), rows.len());
    for row in &rows {
        assert!(out.iter().any(|r| std::ptr::eq(*r, row)));
    }
}

#[test]
fn missing_values_read_as_empty() {
    let rows = vec![lead("1", "Bea"), Record::from_pairs([("phone", "2")])];
    let out = sort(rows, Some("name"), SortDirection::Ascending);
    assert_eq!(phones(&out), vec!["2", "1"]);
}

#[test]
fn toggle_flips_same_key_and_resets_on_new_key() {
    let mut state = SortState::default();
    assert_eq!(state.field(), None);

    state.toggle("name");
    assert_eq!(state.field(), Some("name"));
    assert_eq!(state.direction(), SortDirection::Ascending);

    state.toggle("name");
    assert_eq!(state.direction(), SortDirection::Descending);

    state.toggle("email");
    assert_eq!(state.field(), Some("email"));
    assert_eq!(state.direction(), SortDirection::Ascending);

    state.clear();
    assert!(state.key().is_none());
}
