use std::fs;

use tempfile::tempdir;
use zonal_core::{Cell, RegionPrefix};
use zonal_io::{output_path, read_table, write_role_splits, write_table, ExtractLayout};
use zonal_net::{partition_by_role, DirectionalRecord};

const TRANSMISSION: &str = "\
Transfer capability between model regions
Source: planning database
MW
Unnamed: 0,From,To,2028,2030
0,PJM_WMAC,PJM_Dom,1500,1600
1,,PJM_West,800,800
2,PJM_Dom,PJM_WMAC,1300,1300
Notes: values rounded
(c) planning team
";

#[test]
fn banner_footer_and_index_are_stripped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("transmission.csv");
    fs::write(&path, TRANSMISSION).unwrap();

    let table = read_table(&path, &ExtractLayout::banner_and_footer()).unwrap();
    assert_eq!(table.column_names(), vec!["From", "To", "2028", "2030"]);
    assert_eq!(table.height(), 3);
    assert_eq!(table.column("2028").unwrap().cells[0], Cell::Int(1500));
    assert!(table.column("From").unwrap().cells[1].is_empty());
}

#[test]
fn plain_layout_reads_header_on_first_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("generators.csv");
    fs::write(&path, "Region Name,Capacity (MW)\nPJM_WMAC,120.5\nNY_Z_J,80\n").unwrap();

    let table = read_table(&path, &ExtractLayout::plain()).unwrap();
    assert_eq!(table.height(), 2);
    assert_eq!(table.column("Capacity (MW)").unwrap().cells[1], Cell::Float(80.0));
}

#[test]
fn tables_round_trip_through_csv() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("out.csv");
    let table = zonal_core::Table::new(vec![
        zonal_core::Column::texts("Region", &["PJM_WMAC", "PJM_Dom"]),
        zonal_core::Column::ints("Hour", &[1, 2]),
        zonal_core::Column::floats("value", &[0.5, 0.25]),
    ])
    .unwrap();
    write_table(&table, &path).unwrap();
    assert_eq!(read_table(&path, &ExtractLayout::plain()).unwrap(), table);
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("load.xlsx");
    fs::write(&path, "not a csv").unwrap();
    let err = read_table(&path, &ExtractLayout::plain()).unwrap_err();
    assert!(err.to_string().contains("unsupported file extension"));
}

#[test]
fn output_paths_nest_under_prefix() {
    let dir = tempdir().unwrap();
    let with = output_path(dir.path(), "load", &RegionPrefix::new("PJM")).unwrap();
    assert_eq!(with, dir.path().join("PJM").join("load.csv"));
    assert!(dir.path().join("PJM").is_dir());
    let without = output_path(dir.path(), "load", &RegionPrefix::new("")).unwrap();
    assert_eq!(without, dir.path().join("load.csv"));
}

#[test]
fn role_splits_are_written() {
    let dir = tempdir().unwrap();
    let records = vec![
        DirectionalRecord::new("A1", "B1", 100.0),
        DirectionalRecord::new("B1", "A1", 120.0),
        DirectionalRecord::new("A1", "C1", 50.0),
    ];
    let prefix = RegionPrefix::new("A");
    let split = partition_by_role(&records, &prefix);
    let written = write_role_splits(&split, dir.path(), &prefix, "TTC_Capacity_2028").unwrap();
    assert_eq!(written.len(), 3);

    let load = read_table(&dir.path().join("A").join("load_interface.csv"), &ExtractLayout::plain()).unwrap();
    assert_eq!(load.height(), 2);
    assert_eq!(load.column_names(), vec!["Line", "From", "To", "TTC_Capacity_2028"]);
    let lines = fs::read_to_string(dir.path().join("A").join("lines.csv")).unwrap();
    assert_eq!(lines.trim(), "Line,From,To,TTC_Capacity_2028");
}
