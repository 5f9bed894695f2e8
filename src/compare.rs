use serde::Serialize;

use crate::format::{self, StatKind};
use crate::metrics;
use crate::model::Dataset;
use crate::season::Season;
use crate::stats::{PitchType, StatId};

/// One statistic measured in a base season and a target season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub label: String,
    #[serde(skip)]
    pub kind: StatKind,
    pub base_season: Season,
    pub target_season: Season,
    pub base: Option<f64>,
    pub target: Option<f64>,
    pub impact: &'static str,
}

impl Comparison {
    pub fn diff(&self) -> Option<f64> {
        let (base, target) = self.base.zip(self.target)?;
        Some(target - base)
    }

    /// Relative change in percent; `None` when the base is zero.
    pub fn pct_change(&self) -> Option<f64> {
        let (base, _) = self.base.zip(self.target)?;
        metrics::ratio(self.diff()?, base.abs()).map(|r| r * 100.0)
    }

    pub fn diff_label(&self) -> String {
        self.kind.format_delta_opt(self.diff())
    }

    /// `ERA: 2.28 → 5.36 (Change: +3.08, +135%)`.
    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "{}: {} → {} (Change: {}",
            self.label,
            self.kind.format_opt(self.base),
            self.kind.format_opt(self.target),
            self.diff_label()
        );
        if let Some(pct) = self.pct_change() {
            line.push_str(&format!(", {}%", format::signed(pct, 0)));
        }
        line.push(')');
        line
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeclineMetric {
    Era,
    Fip,
    StrikeoutsPer9,
    WalksPer9,
    HomeRuns,
}

impl DeclineMetric {
    pub const ALL: [DeclineMetric; 5] = [
        DeclineMetric::Era,
        DeclineMetric::Fip,
        DeclineMetric::StrikeoutsPer9,
        DeclineMetric::WalksPer9,
        DeclineMetric::HomeRuns,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DeclineMetric::Era => "ERA",
            DeclineMetric::Fip => "FIP",
            DeclineMetric::StrikeoutsPer9 => "Strikeouts per 9",
            DeclineMetric::WalksPer9 => "Walk Rate",
            DeclineMetric::HomeRuns => "Home Runs",
        }
    }

    pub fn kind(self) -> StatKind {
        match self {
            DeclineMetric::HomeRuns => StatKind::Counting,
            _ => StatKind::Rate { places: 2 },
        }
    }

    pub fn impact(self) -> &'static str {
        match self {
            DeclineMetric::Era => "More earned runs allowed per 9 innings",
            DeclineMetric::Fip => {
                "Fielding-independent metrics moved too, so the problem is pitching, not defense"
            }
            DeclineMetric::StrikeoutsPer9 => "Fewer strikeouts reduce the ability to escape jams",
            DeclineMetric::WalksPer9 => {
                "More walks put more runners on base and raise pitch counts"
            }
            DeclineMetric::HomeRuns => "Long balls allowed point at command and velocity",
        }
    }

    fn value(self, dataset: &Dataset, season: Season) -> Option<f64> {
        let totals = dataset.season(season)?;
        match self {
            DeclineMetric::Era => totals.stat(StatId::Era),
            DeclineMetric::Fip => totals.stat(StatId::Fip),
            DeclineMetric::StrikeoutsPer9 => metrics::season_rates(totals).k_per_9,
            DeclineMetric::WalksPer9 => metrics::season_rates(totals).bb_per_9,
            DeclineMetric::HomeRuns => totals.stat(StatId::HomeRuns),
        }
    }
}

pub fn compare_metric(
    dataset: &Dataset,
    metric: DeclineMetric,
    base: Season,
    target: Season,
) -> Comparison {
    Comparison {
        label: metric.label().to_string(),
        kind: metric.kind(),
        base_season: base,
        target_season: target,
        base: metric.value(dataset, base),
        target: metric.value(dataset, target),
        impact: metric.impact(),
    }
}

pub fn compare_stat(dataset: &Dataset, stat: StatId, base: Season, target: Season) -> Comparison {
    Comparison {
        label: stat.column().to_string(),
        kind: stat.kind(),
        base_season: base,
        target_season: target,
        base: dataset.season_stat(base, stat),
        target: dataset.season_stat(target, stat),
        impact: "",
    }
}

pub fn key_declines(dataset: &Dataset, base: Season, target: Season) -> Vec<Comparison> {
    DeclineMetric::ALL
        .iter()
        .map(|m| compare_metric(dataset, *m, base, target))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Increasing,
    Decreasing,
    Unchanged,
}

impl Trend {
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Trend::Increasing
        } else if change < 0.0 {
            Trend::Decreasing
        } else {
            Trend::Unchanged
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Trend::Increasing => "Increasing",
            Trend::Decreasing => "Decreasing",
            Trend::Unchanged => "Unchanged",
        }
    }
}

/// Usage of one pitch in two seasons, as fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PitchShift {
    pub pitch: PitchType,
    pub base: Option<f64>,
    pub target: Option<f64>,
}

impl PitchShift {
    pub fn change(&self) -> Option<f64> {
        let (base, target) = self.base.zip(self.target)?;
        Some(target - base)
    }

    pub fn trend(&self) -> Option<Trend> {
        self.change().map(Trend::from_change)
    }

    /// Percentage points, e.g. `+17.7%`.
    pub fn change_label(&self) -> String {
        StatKind::Percentage.format_delta_opt(self.change())
    }

    pub fn observation(&self) -> String {
        match self.trend() {
            Some(trend) => format!(
                "{} - {} by {} percentage points",
                self.pitch.name(),
                trend.label(),
                format::fixed(self.change().unwrap_or_default().abs() * 100.0, 1)
            ),
            None => format!("{} - no usage data", self.pitch.name()),
        }
    }
}

pub fn pitch_shift(dataset: &Dataset, pitch: PitchType, base: Season, target: Season) -> PitchShift {
    PitchShift {
        pitch,
        base: dataset.season(base).and_then(|t| t.pitch(pitch)),
        target: dataset.season(target).and_then(|t| t.pitch(pitch)),
    }
}

pub fn pitch_shifts(dataset: &Dataset, base: Season, target: Season) -> Vec<PitchShift> {
    PitchType::ALL
        .iter()
        .map(|p| pitch_shift(dataset, *p, base, target))
        .collect()
}

/// Combined four-seam and sinker usage for a season.
pub fn fastball_share(dataset: &Dataset, season: Season) -> Option<f64> {
    let totals = dataset.season(season)?;
    Some(totals.pitch(PitchType::FourSeam)? + totals.pitch(PitchType::Sinker)?)
}
