mod common;

use pitch_terminal::chart::{self, ChartKind, ChartSpec, Legend, SeriesColor};
use pitch_terminal::config::Config;
use pitch_terminal::format::StatKind;
use pitch_terminal::metrics::{DEFAULT_HEADROOM, GROUPED_HEADROOM};
use pitch_terminal::model::Dataset;
use pitch_terminal::season::Season;
use pitch_terminal::series::XKey;
use pitch_terminal::stats::{PitchType, StatId};

use common::sample_dataset;

fn tallest(chart: &ChartSpec) -> f64 {
    chart
        .series
        .iter()
        .flat_map(|s| s.values())
        .fold(f64::MIN, f64::max)
}

fn assert_range(chart: &ChartSpec, expected_max: f64) {
    let (lo, hi) = chart.y_range.expect("chart with data has a range");
    assert_eq!(lo, 0.0);
    assert!((hi - expected_max).abs() < 1e-9, "{}: {hi} vs {expected_max}", chart.title);
}

#[test]
fn season_metric_chart_uses_season_colours_and_headroom() {
    let dataset = sample_dataset();
    let chart = chart::season_metric_chart(&dataset, StatId::Era);

    assert!(chart.title.starts_with("ERA ("));
    assert!(chart.title.ends_with("by Season"));
    assert_eq!(chart.kind, ChartKind::Bar);
    assert_range(&chart, 5.36 * DEFAULT_HEADROOM);

    let series = &chart.series[0];
    assert_eq!(series.color, SeriesColor::BySeason);
    let colours = series
        .points
        .iter()
        .map(|p| series.point_color(p))
        .collect::<Vec<_>>();
    assert_eq!(colours, vec!["#1565c0", "#2e7d32", "#f57c00", "#c62828"]);
}

#[test]
fn era_fip_chart_marks_the_award_season() {
    let dataset = sample_dataset();
    let chart = chart::era_fip_chart(&dataset, Season::Y2022);

    assert_eq!(chart.kind, ChartKind::Line);
    assert_eq!(chart.legend, Legend::TopRight);
    assert_eq!(chart.series.len(), 2);
    let annotation = chart.annotation.as_ref().unwrap();
    assert_eq!(annotation.x, XKey::Season(Season::Y2022));
    assert_eq!(annotation.text, "Cy Young Award");
    assert_range(&chart, 5.36 * DEFAULT_HEADROOM);
}

#[test]
fn era_progression_has_one_line_per_season_with_games() {
    let dataset = sample_dataset();
    let chart = chart::era_progression_chart(&dataset);

    assert_eq!(chart.x_title, "Date");
    let names = chart.series.iter().map(|s| s.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["2021", "2022", "2025"]);
    assert_eq!(
        chart.series[0].point_color(&chart.series[0].points[0]),
        Season::Y2021.color_hex()
    );
    // The opening-day 9.00 in late March is in season.
    assert_range(&chart, 9.0 * DEFAULT_HEADROOM);
}

#[test]
fn pitch_mix_uses_grouped_headroom() {
    let dataset = sample_dataset();
    let chart = chart::pitch_mix_chart(&dataset);

    assert_eq!(chart.kind, ChartKind::GroupedBar);
    assert_eq!(chart.series.len(), PitchType::ALL.len());
    assert_range(&chart, tallest(&chart) * GROUPED_HEADROOM);
}

#[test]
fn stacked_batted_balls_are_padded_over_totals() {
    let dataset = sample_dataset();
    let chart = chart::batted_ball_chart(&dataset);

    assert_eq!(chart.kind, ChartKind::StackedBar);
    let (_, hi) = chart.y_range.unwrap();
    assert!((hi - 100.0 * DEFAULT_HEADROOM).abs() < 1e-6, "{hi}");
    assert!(tallest(&chart) < 100.0);
}

#[test]
fn game_score_chart_carries_good_start_threshold() {
    let dataset = sample_dataset();
    let chart = chart::game_score_chart(&dataset);

    let threshold = chart.threshold.as_ref().unwrap();
    assert_eq!(threshold.value, 50.0);
    assert_eq!(threshold.label, "Good Start Threshold (50)");
    assert_eq!(chart.series[0].points.len(), 3);
}

#[test]
fn game_score_trend_adds_rolling_average() {
    let dataset = sample_dataset();
    let chart = chart::game_score_trend_chart(&dataset, Season::Y2025, 2);

    assert_eq!(chart.title, "2025 Game Score Trend");
    assert_eq!(chart.series.len(), 2);
    assert_eq!(chart.series[1].values().collect::<Vec<_>>(), vec![30.0, 37.5, 48.5]);
    assert_range(&chart, 52.0 * DEFAULT_HEADROOM);
}

#[test]
fn charts_without_data_have_no_range() {
    let empty = Dataset::default();
    let chart = chart::season_metric_chart(&empty, StatId::Wpa);
    assert!(chart.is_empty());
    assert_eq!(chart.y_range, None);

    let chart = chart::era_fip_chart(&empty, Season::Y2022);
    assert!(chart.annotation.is_none());
    assert!(chart::batted_ball_chart(&empty).y_range.is_none());
}

#[test]
fn catalog_covers_every_view_and_serializes() {
    let dataset = sample_dataset();
    let charts = chart::catalog(&dataset, &Config::default());
    assert_eq!(charts.len(), 6 + PitchType::ALL.len() + 3 + 3);

    let json = serde_json::to_value(&charts).unwrap();
    let first = &json[0];
    assert_eq!(first["kind"], "Bar");
    assert_eq!(first["series"][0]["points"][0]["x"], 2021);
    assert_eq!(first["series"][0]["color"], serde_json::Value::Null);
    assert_eq!(json[1]["series"][0]["color"], "#d62728");
    assert_eq!(json[2]["series"][0]["points"][0]["x"], "2021-04-01");
}

#[test]
fn tick_labels_follow_stat_kind() {
    assert_eq!(chart::tick_label(207.0, StatKind::Counting), "207");
    assert_eq!(chart::tick_label(0.2675, StatKind::Rate { places: 3 }), "0.27");
    assert_eq!(chart::tick_label(2.281, StatKind::Rate { places: 2 }), "2.28");
}
