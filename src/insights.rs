//! Narrative text for the views. Numbers in every sentence come from the
//! loaded tables; only the recommendation copy is fixed.

use crate::compare::{self, DeclineMetric, PitchShift, Trend};
use crate::format::{self, StatKind};
use crate::metrics;
use crate::model::Dataset;
use crate::season::Season;
use crate::stats::{PitchType, StatId};

/// One overview card: a season's ERA and W-L record.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonCard {
    pub season: Season,
    pub era: String,
    pub record: String,
    pub note: String,
}

pub fn season_cards(dataset: &Dataset, base: Season) -> Vec<SeasonCard> {
    let base_era = dataset.season_stat(base, StatId::Era);
    dataset
        .seasons
        .iter()
        .map(|totals| {
            let era = totals.stat(StatId::Era);
            let note = if totals.season == base {
                "Cy Young Award Winner".to_string()
            } else if totals.season > base {
                let delta = era.zip(base_era).map(|(era, base_era)| era - base_era);
                format!(
                    "{} from {base}",
                    StatId::Era.kind().format_delta_opt(delta)
                )
            } else {
                StatId::Era.full_name().to_string()
            };
            SeasonCard {
                season: totals.season,
                era: StatId::Era.kind().format_opt(era),
                record: totals.record(),
                note,
            }
        })
        .collect()
}

/// Strikeout/walk sentences under the regression charts.
pub fn regression_insights(dataset: &Dataset, base: Season, target: Season) -> Vec<String> {
    let mut lines = Vec::new();
    let rate = StatKind::Rate { places: 2 };

    let k9 = compare::compare_metric(dataset, DeclineMetric::StrikeoutsPer9, base, target);
    if let Some(diff) = k9.diff() {
        lines.push(format!(
            "Strikeout rate (K/9) has {} from {} in {base} to {} in {target}",
            movement(diff),
            rate.format_opt(k9.base),
            rate.format_opt(k9.target)
        ));
    }

    let bb9 = compare::compare_metric(dataset, DeclineMetric::WalksPer9, base, target);
    if let Some(diff) = bb9.diff() {
        lines.push(format!(
            "Walk rate (BB/9) has {} from {} in {base} to {} in {target}",
            movement(diff),
            rate.format_opt(bb9.base),
            rate.format_opt(bb9.target)
        ));
    }

    let kbb = |season: Season| {
        dataset
            .season(season)
            .and_then(|t| metrics::season_rates(t).k_per_bb)
    };
    if let Some((from, to)) = kbb(base).zip(kbb(target)) {
        let verdict = if to < from {
            "indicating less control and dominance"
        } else {
            "indicating control has held up"
        };
        lines.push(format!(
            "The strikeout-to-walk ratio has {} from {} to {}, {verdict}",
            movement(to - from),
            format::fixed(from, 2),
            format::fixed(to, 2)
        ));
    }

    if lines.is_empty() {
        lines.push(format!("No strikeout or walk data for {base} and {target}"));
    }
    lines
}

fn movement(diff: f64) -> &'static str {
    match Trend::from_change(diff) {
        Trend::Increasing => "increased",
        Trend::Decreasing => "decreased",
        Trend::Unchanged => "held steady",
    }
}

/// Pitch-mix shifts, largest movement first, followed by the combined
/// fastball share.
pub fn pitch_mix_shifts(dataset: &Dataset, base: Season, target: Season) -> Vec<String> {
    let mut shifts = compare::pitch_shifts(dataset, base, target)
        .into_iter()
        .filter(|s| s.change().is_some())
        .collect::<Vec<PitchShift>>();
    shifts.sort_by(|a, b| {
        let a = a.change().unwrap_or_default().abs();
        let b = b.change().unwrap_or_default().abs();
        b.total_cmp(&a)
    });

    let pct = StatKind::Percentage;
    let mut lines = shifts
        .iter()
        .map(|shift| {
            format!(
                "{}: {} → {} ({})",
                shift.pitch.name(),
                pct.format_opt(shift.base),
                pct.format_opt(shift.target),
                shift.change_label()
            )
        })
        .collect::<Vec<_>>();

    let fastballs = compare::fastball_share(dataset, base).zip(compare::fastball_share(dataset, target));
    if let Some((from, to)) = fastballs {
        lines.push(format!(
            "Combined fastball usage ({} + {}): {} → {}",
            PitchType::FourSeam.name(),
            PitchType::Sinker.name(),
            pct.format(from),
            pct.format(to)
        ));
    }
    lines
}

pub fn executive_summary(dataset: &Dataset, base: Season, target: Season) -> String {
    let era = compare::compare_metric(dataset, DeclineMetric::Era, base, target);
    let mut text = format!("Performance is measured against the {base} Cy Young season.");
    if target == Season::Y2025 {
        text.push_str(" 2025 follows a missed 2024 season (Tommy John surgery).");
    }
    if let (Some(from), Some(to)) = (era.base, era.target) {
        let direction = if to > from { "rose" } else { "fell" };
        text.push_str(&format!(
            " ERA {direction} from {} to {} ({}).",
            format::fixed(from, 2),
            format::fixed(to, 2),
            era.diff_label()
        ));
    }
    let worst = dataset
        .seasons
        .iter()
        .filter_map(|t| t.stat(StatId::Era).map(|era| (t.season, era)))
        .max_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((season, era)) = worst {
        text.push_str(&format!(
            " The highest ERA on record is {season} at {}.",
            format::fixed(era, 2)
        ));
    }
    text
}

pub const ROOT_CAUSES: &[(&str, &[&str])] = &[
    (
        "Post-Surgery Recovery",
        &[
            "Tommy John surgery requires 12-18 months of recovery",
            "Many pitchers take 2+ years to fully regain velocity and command",
        ],
    ),
    (
        "Velocity & Arm Strength",
        &[
            "Reduced fastball usage suggests velocity concerns",
            "Lower strikeout rates indicate less swing-and-miss stuff",
            "A higher walk rate shows command issues, common post-surgery",
        ],
    ),
    (
        "Pitch Effectiveness",
        &[
            "The shift toward curveballs suggests other pitches aren't working",
            "The changeup, once dominant, is being used less",
        ],
    ),
    (
        "Confidence & Approach",
        &[
            "Pitching from behind in counts more often",
            "Trying to pitch around hitters instead of attacking them",
        ],
    ),
];

pub const RECOMMENDATIONS: &[(&str, &[&str])] = &[
    (
        "Short-Term",
        &[
            "Rebuild fastball command; fastballs should be 45-50% of the mix",
            "Restore the changeup toward 25-28% usage",
            "Reduce curveball dependency to the 5-10% range",
            "Bring the walk rate under 2.5 per 9 innings with first-pitch strikes",
            "Build arm strength gradually with early-season pitch count limits",
        ],
    ),
    (
        "Long-Term",
        &[
            "Allow 2-3 years post-surgery for a full recovery",
            "Restore the slider as a strikeout pitch",
            "Keep the changeup as the signature pitch",
            "Continue elbow and shoulder strengthening and consistent mechanics",
        ],
    ),
];

pub const RECOVERY_TIMELINE: &[&str] = &[
    "Year 1: typically the worst year",
    "Year 2: gradual improvement, velocity returns, command improves",
    "Year 3: near pre-surgery form, full confidence restored",
    "Year 4+: potentially better than pre-surgery with refined mechanics",
];

pub const ACTION_ITEMS: &[&str] = &[
    "Reduce walk rate through improved fastball command",
    "Restore changeup usage to peak-season levels (25-28%)",
    "Decrease curveball dependency (target 5-10%)",
    "Increase fastball usage back to 45-50% of mix",
    "Focus on first-pitch strikes and attacking hitters",
    "Build arm strength gradually with proper rest",
    "Be patient - full recovery takes 2-3 years post-surgery",
];

pub const SEASON_TABLE_COLUMNS: [&str; 10] =
    ["Year", "W", "L", "IP", "ERA", "FIP", "SO", "BB", "HR", "BAbip"];

/// Rows of the complete season table, formatted for display. IP is kept in
/// baseball notation.
pub fn season_table(dataset: &Dataset) -> Vec<Vec<String>> {
    const STATS: [StatId; 5] = [
        StatId::Era,
        StatId::Fip,
        StatId::Strikeouts,
        StatId::Walks,
        StatId::HomeRuns,
    ];
    dataset
        .seasons
        .iter()
        .map(|totals| {
            let mut row = vec![
                totals.season.to_string(),
                totals.wins.to_string(),
                totals.losses.to_string(),
                totals.innings.to_string(),
            ];
            row.extend(STATS.iter().map(|s| s.kind().format_opt(totals.stat(*s))));
            row.push(StatId::Babip.kind().format_opt(totals.stat(StatId::Babip)));
            row
        })
        .collect()
}

/// Year followed by each pitch's usage as `25.2%`.
pub fn pitch_usage_table(dataset: &Dataset) -> Vec<Vec<String>> {
    dataset
        .seasons
        .iter()
        .map(|totals| {
            let mut row = vec![totals.season.to_string()];
            row.extend(
                PitchType::ALL
                    .iter()
                    .map(|p| StatKind::Percentage.format_opt(totals.pitch(*p))),
            );
            row
        })
        .collect()
}
