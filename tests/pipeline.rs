mod common;

use pitch_terminal::compare::{self, DeclineMetric, Trend};
use pitch_terminal::format::{self, StatKind};
use pitch_terminal::metrics::{self, BattedBallProfile};
use pitch_terminal::season::Season;
use pitch_terminal::series::{self, XKey};
use pitch_terminal::stats::{PitchType, StatId};

use common::{date, sample_dataset};

#[test]
fn rate_per_9_matches_definition_for_every_season() {
    let dataset = sample_dataset();
    for totals in &dataset.seasons {
        let innings = totals.innings.as_f64();
        let so = totals.stat(StatId::Strikeouts).unwrap();
        let rate = metrics::rate_per_9(so, innings).unwrap();
        assert!((rate - so / innings * 9.0).abs() < 1e-9, "{}", totals.season);
    }
}

#[test]
fn zero_denominators_are_not_computable() {
    assert_eq!(metrics::rate_per_9(12.0, 0.0), None);
    assert_eq!(metrics::ratio(12.0, 0.0), None);
    assert_eq!(metrics::ratio(f64::NAN, 3.0), None);
    assert_eq!(StatKind::Rate { places: 2 }.format_opt(metrics::ratio(1.0, 0.0)), "n/a");
}

#[test]
fn peak_season_rates() {
    let dataset = sample_dataset();
    let totals = dataset.season(Season::Y2022).unwrap();
    assert_eq!(totals.innings.to_string(), "228.2");

    let rates = metrics::season_rates(totals);
    assert_eq!(format::fixed(rates.k_per_9.unwrap(), 2), "8.15");
    assert_eq!(format::fixed(rates.bb_per_9.unwrap(), 2), "1.97");
    assert_eq!(format::fixed(rates.k_per_bb.unwrap(), 2), "4.14");
}

#[test]
fn batted_ball_profile_sums_to_100() {
    let dataset = sample_dataset();
    for totals in &dataset.seasons {
        let profile = metrics::batted_ball_profile(totals).unwrap();
        assert!((profile.total() - 100.0).abs() < 1e-6, "{}", totals.season);
    }

    let peak = metrics::batted_ball_profile(dataset.season(Season::Y2022).unwrap()).unwrap();
    assert!((peak.ground_ball - 42.0).abs() < 1e-9);
    assert_eq!(format::percent(peak.ground_ball), "42.0%");
}

#[test]
fn empty_batted_ball_profile_is_not_computable() {
    assert_eq!(BattedBallProfile::from_counts(0.0, 0.0, 0.0, 0.0), None);
}

#[test]
fn axis_padding_stays_in_band() {
    let samples: [&[f64]; 4] = [&[2.28, 5.36, 4.14], &[207.0], &[0.267, 0.301], &[1.0, 1.0]];
    for values in samples {
        let max = values.iter().copied().fold(f64::MIN, f64::max);
        for headroom in [metrics::DEFAULT_HEADROOM, metrics::GROUPED_HEADROOM] {
            let axis = metrics::axis_max(values, headroom).unwrap();
            assert!(axis >= 1.1 * max - 1e-12);
            assert!(axis <= 1.16 * max);
        }
    }
}

#[test]
fn formatting_parses_back_within_precision() {
    assert_eq!(format::fixed(3.14159, 2), "3.14");
    assert_eq!(format::parse_formatted("3.14"), Some(3.14));

    let cases = [
        (StatKind::Counting, 207.4, 0.5),
        (StatKind::Rate { places: 2 }, 2.2849, 0.005),
        (StatKind::Rate { places: 3 }, 0.26749, 0.0005),
    ];
    for (kind, value, tolerance) in cases {
        let parsed = format::parse_formatted(&kind.format(value)).unwrap();
        assert!((parsed - value).abs() <= tolerance, "{kind:?}");
    }

    let pct = StatKind::Percentage.format(0.252);
    assert_eq!(pct, "25.2%");
    assert!((format::parse_formatted(&pct).unwrap() / 100.0 - 0.252).abs() < 0.0005);
}

#[test]
fn deltas_carry_an_explicit_sign() {
    assert_eq!(StatKind::Rate { places: 2 }.format_delta(-0.5), "-0.50");
    assert_eq!(StatKind::Counting.format_delta(5.0), "+5");
    assert_eq!(StatKind::Percentage.format_delta(0.177), "+17.7%");
    assert_eq!(format::parse_formatted("+3.08"), Some(3.08));
}

#[test]
fn era_decline_from_peak_season() {
    let dataset = sample_dataset();
    let era = compare::compare_metric(&dataset, DeclineMetric::Era, Season::Y2022, Season::Y2025);
    assert_eq!(era.diff_label(), "+3.08");
    assert_eq!(era.summary_line(), "ERA: 2.28 → 5.36 (Change: +3.08, +135%)");

    let stat = compare::compare_stat(&dataset, StatId::Era, Season::Y2022, Season::Y2025);
    assert_eq!(stat.diff_label(), "+3.08");
}

#[test]
fn comparison_against_missing_season_is_blank() {
    let mut dataset = sample_dataset();
    dataset.seasons.retain(|t| t.season != Season::Y2025);
    let era = compare::compare_metric(&dataset, DeclineMetric::Era, Season::Y2022, Season::Y2025);
    assert_eq!(era.diff(), None);
    assert_eq!(era.pct_change(), None);
    assert_eq!(era.diff_label(), "n/a");
}

#[test]
fn progression_drops_off_season_and_missing_values() {
    let dataset = sample_dataset();
    let series = series::progression_series(&dataset, Season::Y2021, StatId::Era);

    assert!(series.get(XKey::Date(date(2021, 2, 15))).is_none());
    assert!(series.get(XKey::Date(date(2021, 4, 1))).is_some());
    // 2021-04-13 has a game score but no ERA.
    assert_eq!(series.len(), 2);

    let xs = series.points.iter().map(|p| p.x).collect::<Vec<_>>();
    assert_eq!(
        xs,
        vec![XKey::Date(date(2021, 4, 1)), XKey::Date(date(2021, 4, 7))]
    );
    assert_eq!(series.points[0].label, "2.57");
}

#[test]
fn progression_for_absent_season_is_empty() {
    let dataset = sample_dataset();
    assert!(series::progression_series(&dataset, Season::Y2023, StatId::Era).is_empty());
}

#[test]
fn season_series_are_ordered_and_formatted() {
    let dataset = sample_dataset();
    let babip = series::season_series(&dataset, StatId::Babip);
    assert_eq!(babip.len(), 4);
    assert_eq!(babip.points[0].x, XKey::Season(Season::Y2021));
    assert_eq!(babip.points[0].label, "0.275");

    let strikeouts = series::season_series(&dataset, StatId::Strikeouts);
    assert_eq!(strikeouts.points[1].label, "207");

    let innings = series::season_series(&dataset, StatId::InningsPitched);
    let peak = innings.get(XKey::Season(Season::Y2022)).unwrap();
    assert_eq!(peak.label, "228");
    assert_eq!(peak.value, 228.0);

    let missing = series::season_series(&dataset, StatId::Wpa);
    assert!(missing.is_empty());
}

#[test]
fn rate_series_skip_seasons_without_innings() {
    let mut dataset = sample_dataset();
    dataset.seasons[0].innings = pitch_terminal::model::Innings::from_outs(0);
    let k9 = series::k_per_9_series(&dataset);
    assert_eq!(k9.len(), 3);
    assert!(k9.get(XKey::Season(Season::Y2021)).is_none());
    assert_eq!(k9.get(XKey::Season(Season::Y2022)).unwrap().label, "8.1");
}

#[test]
fn pitch_usage_series_is_scaled_to_percent() {
    let dataset = sample_dataset();
    let curve = series::pitch_usage_series(&dataset, PitchType::Curve);
    let last = curve.points.last().unwrap();
    assert!((last.value - 18.0).abs() < 1e-9);
    assert_eq!(last.label, "18.0%");
}

#[test]
fn season_mean_and_rolling_average_of_game_scores() {
    let dataset = sample_dataset();
    let avg = series::season_mean_series(&dataset, StatId::GameScore, 1);
    assert_eq!(avg.get(XKey::Season(Season::Y2021)).unwrap().label, "54.3");
    assert_eq!(avg.get(XKey::Season(Season::Y2025)).unwrap().label, "42.3");
    assert!(avg.get(XKey::Season(Season::Y2023)).is_none());

    let games = series::progression_series(&dataset, Season::Y2025, StatId::GameScore);
    let rolling = series::rolling_series(&games, 2, 1);
    assert_eq!(rolling.values(), vec![30.0, 37.5, 48.5]);
    assert_eq!(rolling.points[2].label, "48.5");
}

#[test]
fn pitch_shift_trends() {
    let dataset = sample_dataset();
    let curve = compare::pitch_shift(&dataset, PitchType::Curve, Season::Y2022, Season::Y2025);
    assert_eq!(curve.trend(), Some(Trend::Increasing));
    assert_eq!(curve.change_label(), "+17.7%");
    assert_eq!(
        curve.observation(),
        "Curveball - Increasing by 17.7 percentage points"
    );

    let slider = compare::pitch_shift(&dataset, PitchType::Slider, Season::Y2022, Season::Y2025);
    assert_eq!(slider.trend(), Some(Trend::Decreasing));
    assert_eq!(Trend::from_change(0.0), Trend::Unchanged);

    let fastballs = compare::fastball_share(&dataset, Season::Y2022).unwrap();
    assert!((fastballs - 0.502).abs() < 1e-9);
}

#[test]
fn no_drift_in_clean_sample() {
    assert!(sample_dataset().drift_warnings().is_empty());
}

#[test]
fn drift_is_reported_not_fatal() {
    let mut dataset = sample_dataset();
    dataset.seasons[1]
        .pitch_usage
        .insert(PitchType::Curve, 0.2);
    dataset.seasons[2].stats.remove(&StatId::PopUps);
    let warnings = dataset.drift_warnings();
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].starts_with("2022 pitch mix sums to"));
    assert_eq!(warnings[1], "2023 batted-ball counts missing: PU");
}
