use serde::Serialize;

use crate::model::SeasonTotals;
use crate::stats::{BattedBall, StatId};

/// Headroom above the tallest bar so outside labels are never clipped.
pub const DEFAULT_HEADROOM: f64 = 1.15;
/// The grouped pitch-mix chart runs tighter.
pub const GROUPED_HEADROOM: f64 = 1.10;
/// Bill James' average-start line.
pub const GOOD_START_GAME_SCORE: f64 = 50.0;

/// `count / innings * 9`; `None` when innings are zero or the inputs are
/// not finite.
pub fn rate_per_9(count: f64, innings: f64) -> Option<f64> {
    ratio(count, innings).map(|r| r * 9.0)
}

pub fn ratio(a: f64, b: f64) -> Option<f64> {
    if b == 0.0 || !a.is_finite() || !b.is_finite() {
        return None;
    }
    Some(a / b)
}

/// Upper bound for a zero-based value axis. `None` only when there is no
/// finite value; an all-zero list gives `Some(0.0)` and renderers pick
/// their own range for a degenerate axis.
pub fn axis_max(values: &[f64], headroom: f64) -> Option<f64> {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))?;
    Some(max.max(0.0) * headroom)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Trailing mean; the first `window - 1` outputs average what is available.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (idx, value) in values.iter().enumerate() {
        sum += value;
        if idx >= window {
            sum -= values[idx - window];
        }
        let n = (idx + 1).min(window);
        out.push(sum / n as f64);
    }
    out
}

/// K/9, BB/9 and K/BB for one season.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonRates {
    pub k_per_9: Option<f64>,
    pub bb_per_9: Option<f64>,
    pub k_per_bb: Option<f64>,
}

pub fn season_rates(totals: &SeasonTotals) -> SeasonRates {
    let innings = totals.innings.as_f64();
    let so = totals.stat(StatId::Strikeouts);
    let bb = totals.stat(StatId::Walks);
    SeasonRates {
        k_per_9: so.and_then(|so| rate_per_9(so, innings)),
        bb_per_9: bb.and_then(|bb| rate_per_9(bb, innings)),
        k_per_bb: so.zip(bb).and_then(|(so, bb)| ratio(so, bb)),
    }
}

/// Contact distribution in percent (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BattedBallProfile {
    pub ground_ball: f64,
    pub fly_ball: f64,
    pub line_drive: f64,
    pub pop_up: f64,
}

impl BattedBallProfile {
    pub fn from_counts(gb: f64, fb: f64, ld: f64, pu: f64) -> Option<Self> {
        let total = gb + fb + ld + pu;
        let pct = |count: f64| ratio(count, total).map(|r| r * 100.0);
        Some(Self {
            ground_ball: pct(gb)?,
            fly_ball: pct(fb)?,
            line_drive: pct(ld)?,
            pop_up: pct(pu)?,
        })
    }

    pub fn get(&self, kind: BattedBall) -> f64 {
        match kind {
            BattedBall::GroundBall => self.ground_ball,
            BattedBall::FlyBall => self.fly_ball,
            BattedBall::LineDrive => self.line_drive,
            BattedBall::PopUp => self.pop_up,
        }
    }

    pub fn total(&self) -> f64 {
        self.ground_ball + self.fly_ball + self.line_drive + self.pop_up
    }
}

/// `None` if any of the four counts is missing or they sum to zero.
pub fn batted_ball_profile(totals: &SeasonTotals) -> Option<BattedBallProfile> {
    let count = |kind: BattedBall| totals.stat(kind.stat());
    BattedBallProfile::from_counts(
        count(BattedBall::GroundBall)?,
        count(BattedBall::FlyBall)?,
        count(BattedBall::LineDrive)?,
        count(BattedBall::PopUp)?,
    )
}

#[cfg(test)]
mod tests {
    use super::{axis_max, rolling_mean};

    #[test]
    fn rolling_mean_warms_up_then_slides() {
        let out = rolling_mean(&[10.0, 20.0, 30.0, 40.0], 2);
        assert_eq!(out, vec![10.0, 15.0, 25.0, 35.0]);
    }

    #[test]
    fn zero_window_behaves_like_one() {
        assert_eq!(rolling_mean(&[1.0, 3.0], 0), vec![1.0, 3.0]);
    }

    #[test]
    fn axis_max_ignores_nan() {
        assert_eq!(axis_max(&[f64::NAN, 2.0], 1.5), Some(3.0));
        assert_eq!(axis_max(&[], 1.15), None);
        assert_eq!(axis_max(&[f64::NAN], 1.15), None);
    }

    #[test]
    fn all_zero_values_give_a_zero_axis() {
        assert_eq!(axis_max(&[0.0], 1.15), Some(0.0));
        assert_eq!(axis_max(&[-1.0, 0.0], 1.10), Some(0.0));
    }
}
