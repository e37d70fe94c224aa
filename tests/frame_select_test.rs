//! Positional, name-based and label-based selection on TabularFrame

use geoframe::error::{ErrorKind, Result};
use geoframe::{Column, RowLabel, Selector, TabularFrame, Value};

fn world() -> Result<TabularFrame> {
    TabularFrame::from_columns(vec![
        ("iso_a2", Column::from(vec!["FJ", "TZ", "EH", "CA", "US"])),
        (
            "name_long",
            Column::from(vec![
                "Fiji",
                "Tanzania",
                "Western Sahara",
                "Canada",
                "United States",
            ]),
        ),
        (
            "continent",
            Column::from(vec!["Oceania", "Africa", "Africa", "North America", "North America"]),
        ),
        ("pop", Column::from(vec![885806i64, 52234869, 0, 35535348, 318622525])),
        ("area_km2", Column::from(vec![19290.0, 932745.8, 96270.6, 10036042.9, 9510744.0])),
    ])
}

#[test]
fn test_half_open_row_range() -> Result<()> {
    let df = world()?;
    let first = df.select_by_position(0..3usize, Selector::All)?;

    assert_eq!(first.row_count(), 3);
    assert_eq!(first.column_count(), 5);
    assert_eq!(first.value(2, "iso_a2")?, Value::from("EH"));
    // Row 3 is excluded
    assert!(first.value(3, "iso_a2").is_err());

    let stop_only = df.select_by_position(..3usize, Selector::All)?;
    assert_eq!(stop_only, first);
    Ok(())
}

#[test]
fn test_rows_and_columns_in_selection_order() -> Result<()> {
    let df = world()?;
    let picked = df.select_by_position(vec![4usize, 0], vec![3usize, 0])?;

    assert_eq!(picked.column_names(), &["pop", "iso_a2"]);
    assert_eq!(picked.value(0, "iso_a2")?, Value::from("US"));
    assert_eq!(picked.value(1, "pop")?, Value::Int64(885806));
    Ok(())
}

#[test]
fn test_out_of_range_position() -> Result<()> {
    let df = world()?;
    let err = df.select_by_position(5usize, Selector::All).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Index);

    let err = df.select_by_position(Selector::All, vec![0usize, 9]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Index);
    Ok(())
}

#[test]
fn test_empty_ranges_are_not_errors() -> Result<()> {
    let df = world()?;
    let no_rows = df.select_by_position(Selector::range(2, 2), Selector::All)?;
    assert_eq!(no_rows.row_count(), 0);
    assert_eq!(no_rows.column_count(), 5);

    let no_cols = df.select_by_position(Selector::All, Selector::range(1, 1))?;
    assert_eq!(no_cols.column_count(), 0);
    Ok(())
}

#[test]
fn test_select_columns_by_name() -> Result<()> {
    let df = world()?;
    let subset = df.select_columns(&["name_long", "pop"])?;
    assert_eq!(subset.column_names(), &["name_long", "pop"]);
    assert_eq!(subset.row_count(), 5);

    // Selecting the same names twice is the same as once
    assert_eq!(subset.select_columns(&["name_long", "pop"])?, subset);

    let dup = df.select_columns(&["pop", "pop"])?;
    assert_eq!(dup.column_names(), &["pop", "pop"]);

    let err = df.select_columns(&["gdp"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Key);
    Ok(())
}

#[test]
fn test_select_columns_range() -> Result<()> {
    let df = world()?;
    let run = df.select_columns_range("name_long", "pop")?;
    assert_eq!(run.column_names(), &["name_long", "continent", "pop"]);

    assert!(df.select_columns_range("pop", "name_long").is_err());
    assert_eq!(
        df.select_columns_range("name_long", "gdp").unwrap_err().kind(),
        ErrorKind::Key
    );
    Ok(())
}

#[test]
fn test_head() -> Result<()> {
    let df = world()?;
    assert_eq!(df.head(2)?.row_count(), 2);
    assert_eq!(df.head(0)?.row_count(), 0);
    assert_eq!(df.head(50)?.row_count(), 5);
    Ok(())
}

#[test]
fn test_labels_follow_rows() -> Result<()> {
    let df = world()?.with_labels(vec!["fj", "tz", "eh", "ca", "us"])?;
    let tail = df.select_by_position(3usize.., Selector::All)?;
    assert_eq!(
        tail.row_labels(),
        vec![RowLabel::from("ca"), RowLabel::from("us")]
    );

    let picked = df.select_rows_by_label(vec!["us", "fj"])?;
    assert_eq!(picked.value(0, "name_long")?, Value::from("United States"));
    assert_eq!(picked.value(1, "name_long")?, Value::from("Fiji"));

    let err = df.select_rows_by_label(vec!["xx"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Key);
    Ok(())
}

#[test]
fn test_positional_labels_are_recomputed() -> Result<()> {
    let df = world()?;
    let tail = df.select_by_position(3usize.., Selector::All)?;
    assert_eq!(tail.row_labels(), vec![RowLabel::Int(0), RowLabel::Int(1)]);
    assert!(!tail.has_custom_labels());
    Ok(())
}

#[test]
fn test_duplicate_labels_rejected() -> Result<()> {
    let df = world()?;
    let err = df.with_labels(vec![1i64, 2, 2, 3, 4]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
    Ok(())
}

#[test]
fn test_repeated_positions_on_labeled_frame() -> Result<()> {
    let plain = world()?;
    let labeled = plain.with_labels(vec!["fj", "tz", "eh", "ca", "us"])?;

    let from_plain = plain.select_by_position(vec![0usize, 0], Selector::All)?;
    let from_labeled = labeled.select_by_position(vec![0usize, 0], Selector::All)?;
    assert_eq!(from_plain.row_count(), 2);
    assert_eq!(from_labeled.row_count(), 2);
    assert_eq!(
        from_labeled.row_labels(),
        vec![RowLabel::from("fj"), RowLabel::from("fj")]
    );

    // A repeated label cannot address a single row
    let err = from_labeled.select_rows_by_label(vec!["fj"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);

    let dropped = from_labeled.drop_rows(vec!["fj"])?;
    assert_eq!(dropped.row_count(), 0);
    Ok(())
}
