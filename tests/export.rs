mod common;

use calamine::{Data, Reader, open_workbook_auto};
use tempfile::TempDir;

use pitch_terminal::export;
use pitch_terminal::season::Season;

use common::sample_dataset;

fn number(cell: &Data) -> f64 {
    match cell {
        Data::Float(v) => *v,
        Data::Int(v) => *v as f64,
        other => panic!("expected a number, got {other:?}"),
    }
}

#[test]
fn export_writes_one_sheet_per_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("metrics.xlsx");
    let dataset = sample_dataset();

    let report = export::export_metrics(&path, &dataset, Season::Y2022, Season::Y2025).unwrap();
    assert_eq!(report.seasons, 4);
    assert_eq!(report.pitch_rows, 4);
    assert_eq!(report.batted_ball_rows, 4);
    assert_eq!(report.declines, 5);

    let mut workbook = open_workbook_auto(&path).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec!["Seasons", "PitchUsage", "BattedBall", "Declines"]
    );

    let seasons = workbook.worksheet_range("Seasons").unwrap();
    let header = seasons.rows().next().unwrap();
    assert_eq!(header[0], Data::String("Year".into()));
    assert_eq!(header[9], Data::String("K/9".into()));

    let peak = seasons.rows().nth(2).unwrap();
    assert_eq!(number(&peak[0]), 2022.0);
    assert_eq!(peak[3], Data::String("228.2".into()));
    let k9 = number(&peak[9]);
    assert!((k9 - 207.0 / (228.0 + 2.0 / 3.0) * 9.0).abs() < 1e-9);
}

#[test]
fn declines_sheet_holds_unrounded_changes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("declines.xlsx");
    let dataset = sample_dataset();
    export::export_metrics(&path, &dataset, Season::Y2022, Season::Y2025).unwrap();

    let mut workbook = open_workbook_auto(&path).unwrap();
    let declines = workbook.worksheet_range("Declines").unwrap();
    let era = declines.rows().nth(1).unwrap();
    assert_eq!(era[0], Data::String("ERA".into()));
    assert_eq!(number(&era[1]), 2022.0);
    assert!((number(&era[5]) - 3.08).abs() < 1e-9);
}

#[test]
fn missing_values_are_left_blank() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blank.xlsx");
    let mut dataset = sample_dataset();
    dataset.seasons[0].stats.remove(&pitch_terminal::stats::StatId::Fip);
    export::export_metrics(&path, &dataset, Season::Y2022, Season::Y2025).unwrap();

    let mut workbook = open_workbook_auto(&path).unwrap();
    let seasons = workbook.worksheet_range("Seasons").unwrap();
    let first = seasons.rows().nth(1).unwrap();
    assert_eq!(first[5], Data::Empty);
    assert_eq!(number(&first[4]), 3.19);
}

#[test]
fn export_to_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope").join("metrics.xlsx");
    let err = export::export_metrics(&path, &sample_dataset(), Season::Y2022, Season::Y2025)
        .err()
        .expect("export into a missing directory should fail");
    assert!(format!("{err:#}").contains("failed writing workbook"));
}
