use tablisa_core::{Cell, LoadError, Sheet, TableEvent, ViewState};

fn fixture_path() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    format!("{manifest_dir}/tests/data/people.xlsx")
}

#[test]
fn test_load_xlsx_and_drive_the_view() -> anyhow::Result<()> {
    let sheet = Sheet::from_path(fixture_path())?;
    assert_eq!(sheet.headers(), ["Name", "Age"]);
    assert_eq!(sheet.row_count(), 3);

    let mut state = ViewState::new(sheet);
    assert_eq!(state.total_items(), 3);

    // Case-insensitive search across every cell's string rendering.
    state.apply(TableEvent::SearchChanged("AN".into()));
    assert_eq!(state.total_items(), 1);
    assert_eq!(state.page_rows()[0][0], Cell::from("Ann"));

    // Ages arrive from the workbook as numbers, so the equality filter
    // matches the numeric value, not its text rendering.
    state.apply(TableEvent::FilterApplied {
        column: 1,
        value: Cell::Number(25.0),
    });
    assert_eq!(state.total_items(), 1);
    assert_eq!(state.page_rows()[0][0], Cell::from("Bob"));

    // Clearing the search restores the full sheet.
    state.apply(TableEvent::SearchChanged(String::new()));
    assert_eq!(state.total_items(), 3);
    Ok(())
}

#[test]
fn test_distinct_values_match_the_workbook() {
    let sheet = Sheet::from_path(fixture_path()).expect("failed to load xlsx fixture");
    let state = ViewState::new(sheet);

    let ages = state.distinct_values(1);
    assert_eq!(ages.len(), 3);
    assert!(ages.contains(&Cell::Number(30.0)));
    assert!(ages.contains(&Cell::Number(25.0)));
    assert!(ages.contains(&Cell::Number(41.0)));
}

#[test]
fn test_load_failure_exposes_no_sheet() {
    let err = Sheet::from_bytes(&[0u8; 64]).unwrap_err();
    assert!(matches!(err, LoadError::Decode(_)), "got {err}");

    let err = Sheet::from_path("tests/data/does-not-exist.xlsx").unwrap_err();
    assert!(matches!(err, LoadError::Io(_)), "got {err}");
}
