//! Grouped aggregation and dissolve

use geo_types::{polygon, Geometry};
use geoframe::error::{ErrorKind, Result};
use geoframe::{
    AggFunc, CollectUnion, Column, GeometryColumn, GeometryUnion, Int64Column, TabularFrame, Value,
};

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
        ("name_long", Column::from(vec!["Japan", "Fiji", "China", "France", "Chad"])),
        ("continent", Column::from(vec!["Asia", "Oceania", "Asia", "Europe", "Africa"])),
        ("pop", Column::from(vec![127276000i64, 885806, 1364270000, 66495940, 13569438])),
        ("area_km2", Column::from(vec![404620.0, 19290.0, 9409830.0, 643801.0, 1128128.0])),
        (
            "geom",
            Column::from(GeometryColumn::new(
                (0..5).map(|i| square(i as f64 * 2.0)).collect(),
            )),
        ),
    ])?
    .set_geometry("geom")
}

#[test]
fn test_group_sum_scenario() -> Result<()> {
    let df = TabularFrame::from_columns(vec![
        ("continent", Column::from(vec!["Asia", "Asia", "Europe"])),
        ("pop", Column::from(vec![10i64, 20, 5])),
    ])?;
    let out = df.group_sum(&["continent"], &["pop"])?;

    assert_eq!(out.row_count(), 2);
    assert_eq!(out.column_names(), &["continent", "pop"]);
    assert_eq!(out.value(0, "continent")?, Value::from("Asia"));
    assert_eq!(out.value(0, "pop")?, Value::Int64(30));
    assert_eq!(out.value(1, "continent")?, Value::from("Europe"));
    assert_eq!(out.value(1, "pop")?, Value::Int64(5));
    Ok(())
}

#[test]
fn test_group_sum_skips_missing_and_rejects_text() -> Result<()> {
    let df = TabularFrame::from_columns(vec![
        ("k", Column::from(vec!["a", "a", "b"])),
        ("v", Column::Int64(Int64Column::from_options(vec![Some(1), None, None]))),
    ])?;
    let out = df.group_sum(&["k"], &["v"])?;
    assert_eq!(out.value(0, "v")?, Value::Int64(1));
    assert_eq!(out.value(1, "v")?, Value::Int64(0));

    let err = df.group_sum(&["v"], &["k"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);

    let err = df.group_sum(&["continent"], &["v"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Key);
    Ok(())
}

#[test]
fn test_group_output_has_positional_labels() -> Result<()> {
    let df = world()?.with_labels(vec!["JP", "FJ", "CN", "FR", "TD"])?;
    let out = df.group_sum(&["continent"], &["pop"])?;
    assert!(!out.has_custom_labels());
    assert!(!out.is_geo());
    Ok(())
}

#[test]
fn test_dissolve_by_continent() -> Result<()> {
    let df = world()?;
    let out = df.dissolve(
        &["continent"],
        &[
            ("pop", AggFunc::Sum),
            ("name_long", AggFunc::Count),
            ("area_km2", AggFunc::Max),
        ],
        &CollectUnion,
    )?;

    assert_eq!(
        out.column_names(),
        &["continent", "pop", "name_long", "area_km2", "geom"]
    );
    assert_eq!(out.geometry_name(), Some("geom"));
    assert_eq!(out.row_count(), 4);
    assert_eq!(out.value(0, "pop")?, Value::Int64(1491546000));
    assert_eq!(out.value(0, "name_long")?, Value::Int64(2));
    assert_eq!(out.value(0, "area_km2")?, Value::Float64(9409830.0));

    match out.value(0, "geom")? {
        Value::Geometry(Geometry::MultiPolygon(mp)) => assert_eq!(mp.0.len(), 2),
        other => panic!("expected a multipolygon, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_dissolve_all_sums_every_attribute() -> Result<()> {
    let df = world()?.drop_columns(&["name_long"])?;
    let out = df.dissolve_all(&["continent"], AggFunc::Sum, &CollectUnion)?;
    assert_eq!(out.column_names(), &["continent", "pop", "area_km2", "geom"]);
    assert_eq!(out.value(0, "area_km2")?, Value::Float64(404620.0 + 9409830.0));
    Ok(())
}

#[test]
fn test_mean_first_last() -> Result<()> {
    let df = world()?;
    let out = df.dissolve(
        &["continent"],
        &[
            ("pop", AggFunc::Mean),
            ("name_long", AggFunc::First),
            ("area_km2", AggFunc::Last),
        ],
        &CollectUnion,
    )?;
    assert_eq!(out.value(0, "pop")?, Value::Float64(745773000.0));
    assert_eq!(out.value(0, "name_long")?, Value::from("Japan"));
    assert_eq!(out.value(0, "area_km2")?, Value::Float64(9409830.0));

    let err = df
        .dissolve(&["continent"], &[("name_long", AggFunc::Mean)], &CollectUnion)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    Ok(())
}

struct LastPartUnion;

impl GeometryUnion for LastPartUnion {
    fn union(&self, geometries: &[Geometry<f64>]) -> Result<Geometry<f64>> {
        Ok(geometries[geometries.len() - 1].clone())
    }
}

#[test]
fn test_union_collaborator_is_injected() -> Result<()> {
    let df = world()?;
    let out = df.dissolve(&["continent"], &[], &LastPartUnion)?;
    // Asia holds rows 0 and 2; the collaborator keeps the last geometry
    assert_eq!(out.value(0, "geom")?, Value::Geometry(square(4.0)));
    Ok(())
}

#[test]
fn test_key_reused_as_value_is_rejected() -> Result<()> {
    let df = world()?;
    let err = df.group_sum(&["pop"], &["pop"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);

    let err = df
        .dissolve(
            &["continent"],
            &[("pop", AggFunc::Sum), ("pop", AggFunc::Max)],
            &CollectUnion,
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
    Ok(())
}
