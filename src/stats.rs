use serde::{Deserialize, Serialize};

use crate::format::StatKind;

/// Numeric columns shared by the game log and season totals sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatId {
    Era,
    Fip,
    Strikeouts,
    Walks,
    HomeRuns,
    Hits,
    EarnedRuns,
    InningsPitched,
    Babip,
    GameScore,
    Wpa,
    Re24,
    Pitches,
    Strikes,
    StrikesLooking,
    SwingingStrikes,
    GroundBalls,
    FlyBalls,
    LineDrives,
    PopUps,
}

impl StatId {
    pub const ALL: [StatId; 20] = [
        StatId::Era,
        StatId::Fip,
        StatId::Strikeouts,
        StatId::Walks,
        StatId::HomeRuns,
        StatId::Hits,
        StatId::EarnedRuns,
        StatId::InningsPitched,
        StatId::Babip,
        StatId::GameScore,
        StatId::Wpa,
        StatId::Re24,
        StatId::Pitches,
        StatId::Strikes,
        StatId::StrikesLooking,
        StatId::SwingingStrikes,
        StatId::GroundBalls,
        StatId::FlyBalls,
        StatId::LineDrives,
        StatId::PopUps,
    ];

    /// Header text in the workbook.
    pub fn column(self) -> &'static str {
        match self {
            StatId::Era => "ERA",
            StatId::Fip => "FIP",
            StatId::Strikeouts => "SO",
            StatId::Walks => "BB",
            StatId::HomeRuns => "HR",
            StatId::Hits => "H",
            StatId::EarnedRuns => "ER",
            StatId::InningsPitched => "IP",
            StatId::Babip => "BAbip",
            StatId::GameScore => "GmSc",
            StatId::Wpa => "WPA",
            StatId::Re24 => "RE24",
            StatId::Pitches => "Pit",
            StatId::Strikes => "Str",
            StatId::StrikesLooking => "StL",
            StatId::SwingingStrikes => "StS",
            StatId::GroundBalls => "GB",
            StatId::FlyBalls => "FB",
            StatId::LineDrives => "LD",
            StatId::PopUps => "PU",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            StatId::Era => "Earned Run Average",
            StatId::Fip => "Fielding Independent Pitching",
            StatId::Strikeouts => "Strikeouts",
            StatId::Walks => "Walks",
            StatId::HomeRuns => "Home Runs",
            StatId::Hits => "Hits",
            StatId::EarnedRuns => "Earned Runs",
            StatId::InningsPitched => "Innings Pitched",
            StatId::Babip => "Batting Average on Balls in Play",
            StatId::GameScore => "Game Score",
            StatId::Wpa => "Win Probability Added",
            StatId::Re24 => "Run Expectancy 24",
            StatId::Pitches => "Total Pitches",
            StatId::Strikes => "Strikes",
            StatId::StrikesLooking => "Strikes Looking",
            StatId::SwingingStrikes => "Swinging Strikes",
            StatId::GroundBalls => "Ground Balls",
            StatId::FlyBalls => "Fly Balls",
            StatId::LineDrives => "Line Drives",
            StatId::PopUps => "Pop-ups",
        }
    }

    /// Label used by the overview metric picker.
    pub fn picker_label(self) -> String {
        match self {
            StatId::Era | StatId::Fip => format!("{} ({})", self.column(), self.full_name()),
            _ => self.full_name().to_string(),
        }
    }

    pub fn kind(self) -> StatKind {
        match self {
            StatId::Era | StatId::Fip => StatKind::Rate { places: 2 },
            StatId::Babip => StatKind::Rate { places: 3 },
            StatId::Wpa | StatId::Re24 => StatKind::Rate { places: 1 },
            StatId::Strikeouts
            | StatId::Walks
            | StatId::HomeRuns
            | StatId::Hits
            | StatId::EarnedRuns
            | StatId::InningsPitched
            | StatId::GameScore
            | StatId::Pitches
            | StatId::Strikes
            | StatId::StrikesLooking
            | StatId::SwingingStrikes
            | StatId::GroundBalls
            | StatId::FlyBalls
            | StatId::LineDrives
            | StatId::PopUps => StatKind::Counting,
        }
    }
}

/// Metrics offered by the overview picker, in picker order.
pub const OVERVIEW_METRICS: [StatId; 7] = [
    StatId::Era,
    StatId::Fip,
    StatId::Strikeouts,
    StatId::Walks,
    StatId::HomeRuns,
    StatId::InningsPitched,
    StatId::Babip,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCategory {
    Pitching,
    Advanced,
    PitchCount,
    BattedBall,
}

impl StatCategory {
    pub const ALL: [StatCategory; 4] = [
        StatCategory::Pitching,
        StatCategory::Advanced,
        StatCategory::PitchCount,
        StatCategory::BattedBall,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatCategory::Pitching => "Pitching Stats",
            StatCategory::Advanced => "Advanced Stats",
            StatCategory::PitchCount => "Pitch Count Stats",
            StatCategory::BattedBall => "Batted Ball Stats",
        }
    }

    pub fn metrics(self) -> &'static [StatId] {
        match self {
            StatCategory::Pitching => &[
                StatId::Era,
                StatId::Fip,
                StatId::Strikeouts,
                StatId::Walks,
                StatId::HomeRuns,
                StatId::Hits,
                StatId::InningsPitched,
            ],
            StatCategory::Advanced => &[StatId::Babip, StatId::GameScore, StatId::Wpa, StatId::Re24],
            StatCategory::PitchCount => &[
                StatId::Pitches,
                StatId::Strikes,
                StatId::StrikesLooking,
                StatId::SwingingStrikes,
            ],
            StatCategory::BattedBall => &[
                StatId::GroundBalls,
                StatId::FlyBalls,
                StatId::LineDrives,
                StatId::PopUps,
            ],
        }
    }

    /// Metrics selected when the category is first opened.
    pub fn default_selection(self) -> Vec<StatId> {
        self.metrics().iter().copied().take(3).collect()
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchType {
    FourSeam,
    Sinker,
    Slider,
    Curve,
    Changeup,
}

impl PitchType {
    pub const ALL: [PitchType; 5] = [
        PitchType::FourSeam,
        PitchType::Sinker,
        PitchType::Slider,
        PitchType::Curve,
        PitchType::Changeup,
    ];

    pub fn column(self) -> &'static str {
        match self {
            PitchType::FourSeam => "Four-seam %",
            PitchType::Sinker => "Sinker %",
            PitchType::Slider => "Slider %",
            PitchType::Curve => "Curve %",
            PitchType::Changeup => "Changeup %",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PitchType::FourSeam => "Four-Seam Fastball",
            PitchType::Sinker => "Sinker",
            PitchType::Slider => "Slider",
            PitchType::Curve => "Curveball",
            PitchType::Changeup => "Changeup",
        }
    }

    pub fn color_hex(self) -> &'static str {
        match self {
            PitchType::FourSeam => "#636efa",
            PitchType::Sinker => "#ef553b",
            PitchType::Slider => "#00cc96",
            PitchType::Curve => "#ab63fa",
            PitchType::Changeup => "#ffa15a",
        }
    }

    pub fn impact(self) -> &'static str {
        match self {
            PitchType::FourSeam => {
                "Less reliance on the four-seam fastball may indicate velocity concerns or confidence issues"
            }
            PitchType::Sinker => {
                "The sinker was a key pitch in the peak season; reduced usage may be affecting ground ball rates"
            }
            PitchType::Slider => {
                "Less slider usage reduces strikeout potential and weak contact generation"
            }
            PitchType::Curve => {
                "A jump in curveball usage suggests compensating for other pitches"
            }
            PitchType::Changeup => {
                "The changeup was the dominant pitch at peak; reduced usage may indicate arm strength issues"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BattedBall {
    GroundBall,
    FlyBall,
    LineDrive,
    PopUp,
}

impl BattedBall {
    pub const ALL: [BattedBall; 4] = [
        BattedBall::GroundBall,
        BattedBall::FlyBall,
        BattedBall::LineDrive,
        BattedBall::PopUp,
    ];

    pub fn stat(self) -> StatId {
        match self {
            BattedBall::GroundBall => StatId::GroundBalls,
            BattedBall::FlyBall => StatId::FlyBalls,
            BattedBall::LineDrive => StatId::LineDrives,
            BattedBall::PopUp => StatId::PopUps,
        }
    }

    pub fn color_hex(self) -> &'static str {
        match self {
            BattedBall::GroundBall => "#2e7d32",
            BattedBall::FlyBall => "#1565c0",
            BattedBall::LineDrive => "#c62828",
            BattedBall::PopUp => "#f9a825",
        }
    }

    pub fn note(self) -> &'static str {
        match self {
            BattedBall::GroundBall => "good for pitchers, lead to double plays and fewer extra-base hits",
            BattedBall::FlyBall => "can be dangerous, especially in hitter-friendly parks",
            BattedBall::LineDrive => "usually result in hits",
            BattedBall::PopUp => "almost always outs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StatCategory, StatId};
    use crate::format::StatKind;

    #[test]
    fn every_category_defaults_to_its_first_three_metrics() {
        for category in StatCategory::ALL {
            let defaults = category.default_selection();
            assert_eq!(defaults.as_slice(), &category.metrics()[..3]);
        }
    }

    #[test]
    fn columns_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for stat in StatId::ALL {
            assert!(seen.insert(stat.column()), "{}", stat.column());
        }
    }

    #[test]
    fn babip_uses_three_places() {
        assert_eq!(StatId::Babip.kind(), StatKind::Rate { places: 3 });
        assert_eq!(StatId::GameScore.kind(), StatKind::Counting);
    }
}
