use std::fmt;

use serde::{Deserialize, Serialize};

/// Seasons present in the source workbook. 2024 was lost to surgery, so it
/// has no variant; a workbook row for it fails the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum Season {
    Y2021,
    Y2022,
    Y2023,
    Y2025,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Y2021, Season::Y2022, Season::Y2023, Season::Y2025];

    pub fn from_year(year: i32) -> Option<Self> {
        match year {
            2021 => Some(Season::Y2021),
            2022 => Some(Season::Y2022),
            2023 => Some(Season::Y2023),
            2025 => Some(Season::Y2025),
            _ => None,
        }
    }

    pub fn year(self) -> i32 {
        match self {
            Season::Y2021 => 2021,
            Season::Y2022 => 2022,
            Season::Y2023 => 2023,
            Season::Y2025 => 2025,
        }
    }

    /// Display colour used for every per-season bar and line.
    pub fn color_hex(self) -> &'static str {
        match self {
            Season::Y2021 => "#1565c0",
            Season::Y2022 => "#2e7d32",
            Season::Y2023 => "#f57c00",
            Season::Y2025 => "#c62828",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year())
    }
}

impl From<Season> for i32 {
    fn from(season: Season) -> Self {
        season.year()
    }
}

impl TryFrom<i32> for Season {
    type Error = String;

    fn try_from(year: i32) -> Result<Self, Self::Error> {
        Season::from_year(year).ok_or_else(|| format!("season {year} has no display colour"))
    }
}

/// Parses `#rrggbb` into its components.
pub fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let raw = hex.strip_prefix('#')?;
    if raw.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&raw[0..2], 16).ok()?;
    let g = u8::from_str_radix(&raw[2..4], 16).ok()?;
    let b = u8::from_str_radix(&raw[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::{Season, hex_rgb};

    #[test]
    fn every_season_round_trips_through_its_year() {
        for season in Season::ALL {
            assert_eq!(Season::from_year(season.year()), Some(season));
        }
        assert_eq!(Season::from_year(2024), None);
    }

    #[test]
    fn palette_colours_are_valid_hex() {
        for season in Season::ALL {
            assert!(hex_rgb(season.color_hex()).is_some(), "{season}");
        }
        assert_eq!(hex_rgb("#2e7d32"), Some((0x2e, 0x7d, 0x32)));
        assert_eq!(hex_rgb("2e7d32"), None);
    }
}
