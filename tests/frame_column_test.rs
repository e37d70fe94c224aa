//! Column derivation, removal and renaming on TabularFrame

use geo_types::{polygon, Geometry};
use geoframe::error::{ErrorKind, Result};
use geoframe::{Column, ColumnType, GeometryColumn, TabularFrame, Value};

fn square(x: f64) -> Geometry<f64> {
    polygon![
        (x: x, y: 0.0),
        (x: x + 1.0, y: 0.0),
        (x: x + 1.0, y: 1.0),
        (x: x, y: 1.0)
    ]
    .into()
}

fn world() -> Result<TabularFrame> {
    TabularFrame::from_columns(vec![
        ("name_long", Column::from(vec!["Fiji", "Tanzania", "Chad"])),
        ("continent", Column::from(vec!["Oceania", "Africa", "Africa"])),
        ("region_un", Column::from(vec!["Oceania", "Africa", "Africa"])),
        ("subregion", Column::from(vec!["Melanesia", "Eastern Africa", "Middle Africa"])),
        ("pop", Column::from(vec![885806i64, 52234869, 13569438])),
        ("area_km2", Column::from(vec![19289.97, 932745.79, 1128127.62])),
        (
            "geom",
            Column::from(GeometryColumn::new(vec![square(0.0), square(2.0), square(4.0)])),
        ),
    ])?
    .set_geometry("geom")
}

#[test]
fn test_derive_population_density() -> Result<()> {
    let df = world()?;
    let dens = df.column("pop")?.div(df.column("area_km2")?)?;
    let df = df.with_column("pop_dens", dens)?;

    assert_eq!(df.column_names().last().map(String::as_str), Some("pop_dens"));
    assert_eq!(df.column_type("pop_dens")?, ColumnType::Float64);
    match df.value(1, "pop_dens")? {
        Value::Float64(v) => assert!((v - 52234869.0 / 932745.79).abs() < 1e-9),
        other => panic!("unexpected {:?}", other),
    }
    Ok(())
}

#[test]
fn test_concatenate_and_split() -> Result<()> {
    let df = world()?;
    let joined = df
        .column("continent")?
        .str_cat(df.column("region_un")?, ":")?;
    let df = df
        .drop_columns(&["continent", "region_un"])?
        .with_column("con_reg", joined)?;
    assert_eq!(df.value(1, "con_reg")?, Value::from("Africa:Africa"));

    let parts = df.column("con_reg")?.str_split(":")?;
    let df = df.with_columns(&["continent", "region_un"], parts)?;
    assert_eq!(df.value(0, "continent")?, Value::from("Oceania"));
    assert_eq!(df.value(2, "region_un")?, Value::from("Africa"));
    Ok(())
}

#[test]
fn test_length_checked_on_derive() -> Result<()> {
    let df = world()?;
    let err = df.with_column("short", vec![1i64, 2]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
    Ok(())
}

#[test]
fn test_drop_geometry_column_clears_designation() -> Result<()> {
    let df = world()?;
    assert!(df.is_geo());

    let plain = df.drop_columns(&["geom"])?;
    assert!(!plain.is_geo());
    assert_eq!(plain.geometry_name(), None);

    let plain = df.to_plain_table()?;
    assert!(!plain.contains_column("geom"));
    assert!(!plain.is_geo());
    Ok(())
}

#[test]
fn test_rename_follows_geometry() -> Result<()> {
    let df = world()?.rename_columns(&[("name_long", "name"), ("geom", "geometry")])?;
    assert_eq!(df.column_names()[0], "name");
    assert_eq!(df.geometry_name(), Some("geometry"));

    let err = df.rename_columns(&[("pop", "name")]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
    Ok(())
}

#[test]
fn test_set_all_names_and_reorder() -> Result<()> {
    let df = world()?;
    let renamed = df.set_column_names(&["n", "con", "reg", "sub", "pop", "area", "g"])?;
    assert_eq!(renamed.geometry_name(), Some("g"));
    assert!(renamed.set_column_names(&["a", "b"]).is_err());

    let mut sorted: Vec<&str> = df.column_names().iter().map(String::as_str).collect();
    sorted.sort();
    let reordered = df.reorder_columns(&sorted)?;
    assert_eq!(reordered.column_names()[0], "area_km2");
    assert!(df.reorder_columns(&sorted[1..]).is_err());
    Ok(())
}

#[test]
fn test_arithmetic_with_scalar() -> Result<()> {
    let df = world()?;
    let millions = df
        .column("pop")?
        .arith_scalar(geoframe::ArithOp::Div, 1_000_000i64)?;
    assert_eq!(millions.column_type(), ColumnType::Float64);

    let doubled = df.column("pop")?.arith_scalar(geoframe::ArithOp::Mul, 2i64)?;
    assert_eq!(doubled.get(0)?, Value::Int64(1771612));
    Ok(())
}
