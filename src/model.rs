use std::collections::{BTreeSet, HashMap};
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::season::Season;
use crate::stats::{BattedBall, PitchType, StatId};

const PITCH_MIX_TOLERANCE: f64 = 0.02;

/// Innings pitched, held as outs. The workbook uses baseball notation where
/// the digit after the point counts thirds (`228.2` = 228 2/3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Innings {
    outs: u32,
}

impl Innings {
    pub fn from_outs(outs: u32) -> Self {
        Self { outs }
    }

    /// Accepts notation (`.0`/`.1`/`.2`); any other fractional part is
    /// taken as true decimal innings.
    pub fn from_notation(raw: f64) -> Option<Self> {
        if !raw.is_finite() || raw < 0.0 {
            return None;
        }
        let whole = raw.trunc();
        let tenths = ((raw - whole) * 10.0).round();
        let outs = if tenths <= 2.0 {
            whole * 3.0 + tenths
        } else {
            (raw * 3.0).round()
        };
        Some(Self { outs: outs as u32 })
    }

    pub fn outs(self) -> u32 {
        self.outs
    }

    /// Completed innings, the figure shown when innings are read as a count.
    pub fn whole(self) -> u32 {
        self.outs / 3
    }

    /// True innings, used by every rate derivation.
    pub fn as_f64(self) -> f64 {
        f64::from(self.outs) / 3.0
    }
}

impl fmt::Display for Innings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.outs / 3, self.outs % 3)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRecord {
    /// `None` when the sheet leaves the date blank; such games count toward
    /// season aggregates but not toward date-keyed progressions.
    pub date: Option<NaiveDate>,
    pub season: Season,
    pub stats: HashMap<StatId, f64>,
}

impl GameRecord {
    pub fn stat(&self, id: StatId) -> Option<f64> {
        self.stats.get(&id).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonTotals {
    pub season: Season,
    pub wins: u32,
    pub losses: u32,
    pub innings: Innings,
    pub stats: HashMap<StatId, f64>,
    pub pitch_usage: HashMap<PitchType, f64>,
}

impl SeasonTotals {
    /// Innings come back as completed innings (`228.2` -> 228). Rates read
    /// `innings.as_f64()` instead.
    pub fn stat(&self, id: StatId) -> Option<f64> {
        if id == StatId::InningsPitched {
            return Some(f64::from(self.innings.whole()));
        }
        self.stats.get(&id).copied()
    }

    pub fn pitch(&self, pitch: PitchType) -> Option<f64> {
        self.pitch_usage.get(&pitch).copied()
    }

    pub fn record(&self) -> String {
        format!("{}-{}", self.wins, self.losses)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlossaryEntry {
    pub variable: String,
    pub description: String,
}

/// The three source tables, immutable once loaded.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    pub games: Vec<GameRecord>,
    /// Sorted by season.
    pub seasons: Vec<SeasonTotals>,
    pub glossary: Vec<GlossaryEntry>,
}

impl Dataset {
    pub fn new(
        games: Vec<GameRecord>,
        mut seasons: Vec<SeasonTotals>,
        glossary: Vec<GlossaryEntry>,
    ) -> Self {
        seasons.sort_by_key(|s| s.season);
        Self {
            games,
            seasons,
            glossary,
        }
    }

    pub fn season(&self, season: Season) -> Option<&SeasonTotals> {
        self.seasons.iter().find(|s| s.season == season)
    }

    pub fn season_stat(&self, season: Season, id: StatId) -> Option<f64> {
        self.season(season).and_then(|s| s.stat(id))
    }

    pub fn game_seasons(&self) -> BTreeSet<Season> {
        self.games.iter().map(|g| g.season).collect()
    }

    pub fn glossary_description(&self, variable: &str) -> Option<&str> {
        self.glossary
            .iter()
            .find(|entry| entry.variable.eq_ignore_ascii_case(variable))
            .map(|entry| entry.description.as_str())
    }

    /// Data-quality drift the pipeline tolerates but reports.
    pub fn drift_warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        for totals in &self.seasons {
            let present = PitchType::ALL
                .iter()
                .filter_map(|p| totals.pitch(*p))
                .collect::<Vec<_>>();
            if !present.is_empty() {
                let sum: f64 = present.iter().sum();
                if (sum - 1.0).abs() > PITCH_MIX_TOLERANCE {
                    out.push(format!(
                        "{} pitch mix sums to {:.1}%",
                        totals.season,
                        sum * 100.0
                    ));
                }
            }
            let missing = BattedBall::ALL
                .iter()
                .filter(|b| totals.stat(b.stat()).is_none())
                .map(|b| b.stat().column())
                .collect::<Vec<_>>();
            if !missing.is_empty() {
                out.push(format!(
                    "{} batted-ball counts missing: {}",
                    totals.season,
                    missing.join(", ")
                ));
            }
        }
        let undated = self.games.iter().filter(|g| g.date.is_none()).count();
        if undated > 0 {
            out.push(format!("{undated} game(s) have no date and are left out of progressions"));
        }
        for season in self.game_seasons() {
            if self.season(season).is_none() {
                out.push(format!("{season} has games but no season totals row"));
            }
        }
        out
    }
}
