use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::format::{self, StatKind};
use crate::metrics::{self, BattedBallProfile, SeasonRates};
use crate::model::{Dataset, SeasonTotals};
use crate::season::Season;
use crate::stats::{BattedBall, PitchType, StatId};

/// First calendar month counted as in-season for game progressions.
pub const SEASON_START_MONTH: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum XKey {
    Season(Season),
    Date(NaiveDate),
    Game(usize),
}

impl XKey {
    pub fn label(&self) -> String {
        match self {
            XKey::Season(season) => season.to_string(),
            XKey::Date(date) => date.format("%Y-%m-%d").to_string(),
            XKey::Game(idx) => format!("G{}", idx + 1),
        }
    }

    /// Position on a continuous x axis: the year, days since CE, or the
    /// game index.
    pub fn as_f64(&self) -> f64 {
        match self {
            XKey::Season(season) => f64::from(season.year()),
            XKey::Date(date) => f64::from(date.num_days_from_ce()),
            XKey::Game(idx) => *idx as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: XKey,
    pub value: f64,
    pub label: String,
}

/// Ordered points for one statistic, ascending by x.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeries {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl MetricSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, x: XKey) -> Option<&SeriesPoint> {
        self.points.iter().find(|p| p.x == x)
    }

    fn push(&mut self, x: XKey, value: f64, label: String) {
        self.points.push(SeriesPoint { x, value, label });
    }
}

/// Builds one point per season from `derive`; seasons it cannot compute
/// are left out.
pub fn derived_season_series(
    dataset: &Dataset,
    name: impl Into<String>,
    kind: StatKind,
    derive: impl Fn(&SeasonTotals) -> Option<f64>,
) -> MetricSeries {
    let mut series = MetricSeries::new(name);
    for totals in &dataset.seasons {
        let Some(value) = derive(totals).filter(|v| v.is_finite()) else {
            continue;
        };
        series.push(XKey::Season(totals.season), value, kind.format(value));
    }
    series
}

pub fn season_series(dataset: &Dataset, stat: StatId) -> MetricSeries {
    derived_season_series(dataset, stat.column(), stat.kind(), |t| t.stat(stat))
}

pub fn k_per_9_series(dataset: &Dataset) -> MetricSeries {
    rate_series(dataset, "Strikeouts per 9", |r| r.k_per_9, 1)
}

pub fn bb_per_9_series(dataset: &Dataset) -> MetricSeries {
    rate_series(dataset, "Walks per 9", |r| r.bb_per_9, 1)
}

pub fn k_per_bb_series(dataset: &Dataset) -> MetricSeries {
    rate_series(dataset, "K/BB", |r| r.k_per_bb, 2)
}

fn rate_series(
    dataset: &Dataset,
    name: &str,
    pick: impl Fn(&SeasonRates) -> Option<f64>,
    places: usize,
) -> MetricSeries {
    derived_season_series(dataset, name, StatKind::Rate { places }, |t| {
        pick(&metrics::season_rates(t))
    })
}

/// Usage in percent (0-100) so axis padding applies to the plotted scale.
pub fn pitch_usage_series(dataset: &Dataset, pitch: PitchType) -> MetricSeries {
    let mut series = MetricSeries::new(pitch.name());
    for totals in &dataset.seasons {
        let Some(fraction) = totals.pitch(pitch).filter(|v| v.is_finite()) else {
            continue;
        };
        series.push(
            XKey::Season(totals.season),
            fraction * 100.0,
            format::percent_of_fraction(fraction),
        );
    }
    series
}

pub fn batted_ball_series(dataset: &Dataset, kind: BattedBall) -> MetricSeries {
    let mut series = MetricSeries::new(kind.stat().full_name());
    for totals in &dataset.seasons {
        let Some(profile) = metrics::batted_ball_profile(totals) else {
            continue;
        };
        let pct = profile.get(kind);
        series.push(XKey::Season(totals.season), pct, format::percent(pct));
    }
    series
}

pub fn batted_ball_profiles(dataset: &Dataset) -> Vec<(Season, BattedBallProfile)> {
    dataset
        .seasons
        .iter()
        .filter_map(|t| metrics::batted_ball_profile(t).map(|p| (t.season, p)))
        .collect()
}

/// Game-by-game values for one season: undated games and off-season months
/// dropped, sorted by date, games without the statistic dropped.
pub fn progression_series(dataset: &Dataset, season: Season, stat: StatId) -> MetricSeries {
    let mut games = dataset
        .games
        .iter()
        .filter(|g| g.season == season)
        .filter_map(|g| g.date.map(|date| (date, g)))
        .filter(|(date, _)| date.month() >= SEASON_START_MONTH)
        .collect::<Vec<_>>();
    games.sort_by_key(|(date, _)| *date);

    let kind = stat.kind();
    let mut series = MetricSeries::new(season.to_string());
    for (date, game) in games {
        let Some(value) = game.stat(stat).filter(|v| v.is_finite()) else {
            continue;
        };
        series.push(XKey::Date(date), value, kind.format(value));
    }
    series
}

/// Per-season mean of a game-log statistic (e.g. average game score).
pub fn season_mean_series(dataset: &Dataset, stat: StatId, places: usize) -> MetricSeries {
    let mut grouped: BTreeMap<Season, Vec<f64>> = BTreeMap::new();
    for game in &dataset.games {
        if let Some(value) = game.stat(stat).filter(|v| v.is_finite()) {
            grouped.entry(game.season).or_default().push(value);
        }
    }

    let mut series = MetricSeries::new(format!("Average {}", stat.full_name()));
    for (season, values) in grouped {
        let Some(avg) = metrics::mean(&values) else {
            continue;
        };
        series.push(XKey::Season(season), avg, format::fixed(avg, places));
    }
    series
}

/// Trailing mean over an existing series, keeping its x keys.
pub fn rolling_series(series: &MetricSeries, window: usize, places: usize) -> MetricSeries {
    let smoothed = metrics::rolling_mean(&series.values(), window);
    let mut out = MetricSeries::new(format!("{} ({window}-game avg)", series.name));
    for (point, value) in series.points.iter().zip(smoothed) {
        out.push(point.x, value, format::fixed(value, places));
    }
    out
}
