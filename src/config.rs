use std::env;
use std::path::PathBuf;

use crate::season::Season;

pub const DEFAULT_DATA_PATH: &str = "Data/pitching_stats.xlsx";
pub const DEFAULT_EXPORT_PATH: &str = "pitch_metrics.xlsx";
pub const DEFAULT_ROLLING_WINDOW: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_path: PathBuf,
    /// Reference season for every comparison (the award year).
    pub base_season: Season,
    pub target_season: Season,
    pub rolling_window: usize,
    pub export_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            base_season: Season::Y2022,
            target_season: Season::Y2025,
            rolling_window: DEFAULT_ROLLING_WINDOW,
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
        }
    }
}

impl Config {
    /// Reads `.env.local` then `.env`, then the process environment.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_env()
    }

    /// Unset or invalid values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        Self {
            data_path: text("PITCH_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            base_season: text("PITCH_BASE_SEASON")
                .and_then(|raw| parse_season(&raw))
                .unwrap_or(defaults.base_season),
            target_season: text("PITCH_TARGET_SEASON")
                .and_then(|raw| parse_season(&raw))
                .unwrap_or(defaults.target_season),
            rolling_window: text("PITCH_ROLLING_WINDOW")
                .and_then(|raw| raw.parse::<usize>().ok())
                .unwrap_or(defaults.rolling_window)
                .max(1),
            export_path: text("PITCH_EXPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_path),
        }
    }
}

pub fn parse_season(raw: &str) -> Option<Season> {
    raw.trim().parse::<i32>().ok().and_then(Season::from_year)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::Config;
    use crate::season::Season;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = config_from(&[
            ("PITCH_DATA_PATH", "/tmp/stats.xlsx"),
            ("PITCH_BASE_SEASON", "2021"),
            ("PITCH_TARGET_SEASON", " 2023 "),
            ("PITCH_ROLLING_WINDOW", "3"),
        ]);
        assert_eq!(cfg.data_path, PathBuf::from("/tmp/stats.xlsx"));
        assert_eq!(cfg.base_season, Season::Y2021);
        assert_eq!(cfg.target_season, Season::Y2023);
        assert_eq!(cfg.rolling_window, 3);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = config_from(&[
            ("PITCH_BASE_SEASON", "2024"),
            ("PITCH_TARGET_SEASON", "soon"),
            ("PITCH_ROLLING_WINDOW", "0"),
        ]);
        assert_eq!(cfg.base_season, Season::Y2022);
        assert_eq!(cfg.target_season, Season::Y2025);
        assert_eq!(cfg.rolling_window, 1);
    }
}
