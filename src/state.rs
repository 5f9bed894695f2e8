use std::collections::VecDeque;

use crate::config::Config;
use crate::season::Season;
use crate::stats::{OVERVIEW_METRICS, PitchType, StatCategory, StatId};

const MAX_LOGS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Overview,
    Regression,
    PitchUsage,
    DetailedStats,
    Analysis,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Overview,
        View::Regression,
        View::PitchUsage,
        View::DetailedStats,
        View::Analysis,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Regression => "Performance Regression",
            View::PitchUsage => "Pitch Usage Analysis",
            View::DetailedStats => "Detailed Statistics",
            View::Analysis => "Analysis & Recommendations",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// `1`..`5` as pressed on the keyboard.
    pub fn from_digit(digit: char) -> Option<Self> {
        let idx = digit.to_digit(10)? as usize;
        idx.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExportState {
    pub done: bool,
    pub path: Option<String>,
    pub message: String,
    pub failed: bool,
    pub last_updated: Option<std::time::Instant>,
}

impl ExportState {
    pub fn finish(&mut self, path: impl Into<String>, message: impl Into<String>, failed: bool) {
        self.done = true;
        self.path = Some(path.into());
        self.message = message.into();
        self.failed = failed;
        self.last_updated = Some(std::time::Instant::now());
    }

    /// Footer text for a finished export: the outcome and the target file.
    pub fn status_line(&self) -> Option<String> {
        if !self.done {
            return None;
        }
        let prefix = if self.failed { "[WARN]" } else { "[INFO]" };
        Some(match &self.path {
            Some(path) => format!("{prefix} {} -> {path}", self.message),
            None => format!("{prefix} {}", self.message),
        })
    }

    pub fn clear_if_done_for(&mut self, now: std::time::Instant, keep_secs: u64) {
        if !self.done {
            return;
        }
        let Some(last) = self.last_updated else {
            return;
        };
        if now.duration_since(last).as_secs() >= keep_secs {
            *self = Self::default();
        }
    }
}

/// Everything the user has selected. The pipeline reads this on every
/// draw; nothing derived from the data is stored here.
#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    pub base_season: Season,
    pub target_season: Season,
    pub rolling_window: usize,
    /// Index into `OVERVIEW_METRICS`.
    pub overview_metric: usize,
    pub pitch: PitchType,
    /// Season whose game score trend is shown in Detailed Statistics.
    pub trend_season: Season,
    pub category: StatCategory,
    pub detail_cursor: usize,
    pub detail_selection: Vec<StatId>,
    pub analysis_scroll: u16,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub load_error: Option<String>,
    pub export: ExportState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let category = StatCategory::Pitching;
        Self {
            view: View::Overview,
            base_season: config.base_season,
            target_season: config.target_season,
            rolling_window: config.rolling_window,
            overview_metric: 0,
            pitch: PitchType::FourSeam,
            trend_season: config.target_season,
            category,
            detail_cursor: 0,
            detail_selection: category.default_selection(),
            analysis_scroll: 0,
            logs: VecDeque::new(),
            help_overlay: false,
            load_error: None,
            export: ExportState::default(),
        }
    }

    pub fn maybe_clear_export(&mut self, now: std::time::Instant) {
        self.export.clear_if_done_for(now, 8);
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn next_view(&mut self) {
        self.view = self.view.next();
    }

    pub fn prev_view(&mut self) {
        self.view = self.view.prev();
    }

    pub fn overview_stat(&self) -> StatId {
        OVERVIEW_METRICS[self.overview_metric % OVERVIEW_METRICS.len()]
    }

    /// Steps the single-choice picker of the current view.
    pub fn picker_next(&mut self) {
        self.step_picker(true);
    }

    pub fn picker_prev(&mut self) {
        self.step_picker(false);
    }

    fn step_picker(&mut self, forward: bool) {
        match self.view {
            View::Overview => {
                self.overview_metric = step(self.overview_metric, OVERVIEW_METRICS.len(), forward);
            }
            View::PitchUsage => {
                let idx = PitchType::ALL.iter().position(|p| *p == self.pitch).unwrap_or(0);
                self.pitch = PitchType::ALL[step(idx, PitchType::ALL.len(), forward)];
            }
            View::DetailedStats => {
                let idx = Season::ALL
                    .iter()
                    .position(|s| *s == self.trend_season)
                    .unwrap_or(0);
                self.trend_season = Season::ALL[step(idx, Season::ALL.len(), forward)];
            }
            View::Regression | View::Analysis => {}
        }
    }

    pub fn cursor_down(&mut self) {
        match self.view {
            View::DetailedStats => {
                let total = self.category.metrics().len();
                self.detail_cursor = step(self.detail_cursor, total, true);
            }
            View::Analysis => self.analysis_scroll = self.analysis_scroll.saturating_add(1),
            _ => self.picker_next(),
        }
    }

    pub fn cursor_up(&mut self) {
        match self.view {
            View::DetailedStats => {
                let total = self.category.metrics().len();
                self.detail_cursor = step(self.detail_cursor, total, false);
            }
            View::Analysis => self.analysis_scroll = self.analysis_scroll.saturating_sub(1),
            _ => self.picker_prev(),
        }
    }

    /// Next category; the metric selection resets to its defaults.
    pub fn cycle_category(&mut self) {
        self.category = self.category.next();
        self.detail_cursor = 0;
        self.detail_selection = self.category.default_selection();
    }

    /// Toggles the metric under the cursor, keeping category order.
    pub fn toggle_detail_metric(&mut self) {
        let Some(stat) = self.category.metrics().get(self.detail_cursor).copied() else {
            return;
        };
        if let Some(pos) = self.detail_selection.iter().position(|s| *s == stat) {
            self.detail_selection.remove(pos);
        } else {
            self.detail_selection.push(stat);
            let order = self.category.metrics();
            self.detail_selection
                .sort_by_key(|s| order.iter().position(|o| o == s).unwrap_or(usize::MAX));
        }
    }

    pub fn is_detail_selected(&self, stat: StatId) -> bool {
        self.detail_selection.contains(&stat)
    }
}

fn step(idx: usize, total: usize, forward: bool) -> usize {
    if total == 0 {
        return 0;
    }
    if forward {
        (idx + 1) % total
    } else {
        (idx + total - 1) % total
    }
}

#[cfg(test)]
mod tests {
    use super::{View, step};

    #[test]
    fn digits_map_to_views() {
        assert_eq!(View::from_digit('1'), Some(View::Overview));
        assert_eq!(View::from_digit('5'), Some(View::Analysis));
        assert_eq!(View::from_digit('0'), None);
        assert_eq!(View::from_digit('6'), None);
    }

    #[test]
    fn step_wraps_both_ways() {
        assert_eq!(step(0, 3, false), 2);
        assert_eq!(step(2, 3, true), 0);
        assert_eq!(step(0, 0, true), 0);
    }
}
