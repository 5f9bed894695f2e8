//! Declarative chart descriptions handed to whatever draws them: the
//! terminal renderer in `ui` or the JSON dump of `pitch_report --charts`.

use serde::Serialize;

use crate::config::Config;
use crate::format::{self, StatKind};
use crate::metrics::{self, DEFAULT_HEADROOM, GOOD_START_GAME_SCORE, GROUPED_HEADROOM};
use crate::model::Dataset;
use crate::season::Season;
use crate::series::{self, MetricSeries, SeriesPoint, XKey};
use crate::stats::{BattedBall, PitchType, StatId};

const ERA_COLOR: &str = "#d62728";
const FIP_COLOR: &str = "#ff7f0e";
const STRIKEOUT_COLOR: &str = "#2e7d32";
const WALK_COLOR: &str = "#c62828";
const RATIO_COLOR: &str = "#1565c0";
const ROLLING_COLOR: &str = "#424242";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Bar,
    GroupedBar,
    StackedBar,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Legend {
    Hidden,
    TopRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LabelPosition {
    Outside,
    TopCenter,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SeriesColor {
    Fixed(&'static str),
    /// Each point takes the colour of its season.
    BySeason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub color: SeriesColor,
    pub points: Vec<SeriesPoint>,
    pub label_position: LabelPosition,
    pub hover_template: String,
}

impl ChartSeries {
    pub fn from_series(series: MetricSeries, color: SeriesColor) -> Self {
        let hover_template = format!("{}: %{{y}}", series.name);
        Self {
            name: series.name,
            color,
            points: series.points,
            label_position: LabelPosition::Outside,
            hover_template,
        }
    }

    pub fn labels(mut self, position: LabelPosition) -> Self {
        self.label_position = position;
        self
    }

    pub fn hover(mut self, template: impl Into<String>) -> Self {
        self.hover_template = template.into();
        self
    }

    /// Hex colour of one point. Points not keyed by season fall back to grey.
    pub fn point_color(&self, point: &SeriesPoint) -> &'static str {
        match self.color {
            SeriesColor::Fixed(hex) => hex,
            SeriesColor::BySeason => match point.x {
                XKey::Season(season) => season.color_hex(),
                _ => "#757575",
            },
        }
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }
}

/// A horizontal reference line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Threshold {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub x: XKey,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub x_title: String,
    pub y_title: String,
    /// Zero-based value axis; `None` leaves the range to the renderer.
    pub y_range: Option<(f64, f64)>,
    pub legend: Legend,
    pub series: Vec<ChartSeries>,
    pub threshold: Option<Threshold>,
    pub annotation: Option<Annotation>,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>, kind: ChartKind) -> Self {
        Self {
            title: title.into(),
            kind,
            x_title: "Season".to_string(),
            y_title: String::new(),
            y_range: None,
            legend: Legend::Hidden,
            series: Vec::new(),
            threshold: None,
            annotation: None,
        }
    }

    pub fn y_title(mut self, title: impl Into<String>) -> Self {
        self.y_title = title.into();
        self
    }

    pub fn x_title(mut self, title: impl Into<String>) -> Self {
        self.x_title = title.into();
        self
    }

    pub fn legend(mut self, legend: Legend) -> Self {
        self.legend = legend;
        self
    }

    pub fn series(mut self, series: ChartSeries) -> Self {
        self.series.push(series);
        self
    }

    pub fn threshold(mut self, value: f64, label: impl Into<String>) -> Self {
        self.threshold = Some(Threshold {
            value,
            label: label.into(),
        });
        self
    }

    pub fn annotate(mut self, x: XKey, text: impl Into<String>) -> Self {
        self.annotation = Some(Annotation {
            x,
            text: text.into(),
        });
        self
    }

    /// Sets the axis from the plotted data. Stacked bars are padded over
    /// the stack totals, everything else over the tallest single value.
    pub fn padded(mut self, headroom: f64) -> Self {
        let values = match self.kind {
            ChartKind::StackedBar => self.stack_totals(),
            _ => self.series.iter().flat_map(|s| s.values()).collect(),
        };
        self.y_range = metrics::axis_max(&values, headroom).map(|max| (0.0, max));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Every x key across all series, ascending and deduplicated.
    pub fn x_keys(&self) -> Vec<XKey> {
        let mut keys = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.x))
            .collect::<Vec<_>>();
        keys.sort();
        keys.dedup();
        keys
    }

    fn stack_totals(&self) -> Vec<f64> {
        self.x_keys()
            .into_iter()
            .map(|x| {
                self.series
                    .iter()
                    .filter_map(|s| s.points.iter().find(|p| p.x == x))
                    .map(|p| p.value)
                    .sum()
            })
            .collect()
    }
}

/// Overview picker chart: one bar per season in the season colours.
pub fn season_metric_chart(dataset: &Dataset, stat: StatId) -> ChartSpec {
    let label = stat.picker_label();
    let series = series::season_series(dataset, stat);
    ChartSpec::new(format!("{label} by Season"), ChartKind::Bar)
        .y_title(label.clone())
        .series(
            ChartSeries::from_series(series, SeriesColor::BySeason)
                .hover(format!("{label}: %{{y}}")),
        )
        .padded(DEFAULT_HEADROOM)
}

pub fn era_fip_chart(dataset: &Dataset, base: Season) -> ChartSpec {
    let era = series::season_series(dataset, StatId::Era);
    let fip = series::season_series(dataset, StatId::Fip);
    let mut chart = ChartSpec::new("ERA and FIP Trend (Lower is Better)", ChartKind::Line)
        .y_title("Runs Per 9 Innings")
        .legend(Legend::TopRight)
        .series(ChartSeries::from_series(era, SeriesColor::Fixed(ERA_COLOR)).labels(LabelPosition::None))
        .series(ChartSeries::from_series(fip, SeriesColor::Fixed(FIP_COLOR)).labels(LabelPosition::None))
        .padded(DEFAULT_HEADROOM);
    if dataset.season_stat(base, StatId::Era).is_some() {
        chart = chart.annotate(XKey::Season(base), "Cy Young Award");
    }
    chart
}

/// Cumulative ERA through each season, one line per season.
pub fn era_progression_chart(dataset: &Dataset) -> ChartSpec {
    let mut chart = ChartSpec::new("ERA Throughout Each Season (Game-by-Game)", ChartKind::Line)
        .x_title("Date")
        .y_title("ERA")
        .legend(Legend::TopRight);
    for season in Season::ALL {
        let progression = series::progression_series(dataset, season, StatId::Era);
        if progression.is_empty() {
            continue;
        }
        chart = chart.series(
            ChartSeries::from_series(progression, SeriesColor::Fixed(season.color_hex()))
                .labels(LabelPosition::None)
                .hover("Date: %{x}<br>ERA: %{y:.2f}"),
        );
    }
    chart.padded(DEFAULT_HEADROOM)
}

pub fn strikeout_walk_chart(dataset: &Dataset) -> ChartSpec {
    ChartSpec::new("Strikeouts and Walks per 9 Innings", ChartKind::GroupedBar)
        .y_title("Per 9 Innings")
        .legend(Legend::TopRight)
        .series(ChartSeries::from_series(
            series::k_per_9_series(dataset),
            SeriesColor::Fixed(STRIKEOUT_COLOR),
        ))
        .series(ChartSeries::from_series(
            series::bb_per_9_series(dataset),
            SeriesColor::Fixed(WALK_COLOR),
        ))
        .padded(DEFAULT_HEADROOM)
}

pub fn k_per_bb_chart(dataset: &Dataset) -> ChartSpec {
    ChartSpec::new("Strikeout-to-Walk Ratio (Higher is Better)", ChartKind::Line)
        .y_title("Strikeout-to-Walk Ratio")
        .series(
            ChartSeries::from_series(series::k_per_bb_series(dataset), SeriesColor::Fixed(RATIO_COLOR))
                .labels(LabelPosition::TopCenter),
        )
        .padded(DEFAULT_HEADROOM)
}

pub fn pitch_mix_chart(dataset: &Dataset) -> ChartSpec {
    let mut chart = ChartSpec::new("Pitch Type Distribution by Season", ChartKind::GroupedBar)
        .y_title("Usage Percentage (%)")
        .legend(Legend::TopRight);
    for pitch in PitchType::ALL {
        chart = chart.series(
            ChartSeries::from_series(
                series::pitch_usage_series(dataset, pitch),
                SeriesColor::Fixed(pitch.color_hex()),
            )
            .hover(format!("{}: %{{y:.1f}}%", pitch.name())),
        );
    }
    chart.padded(GROUPED_HEADROOM)
}

pub fn pitch_usage_chart(dataset: &Dataset, pitch: PitchType) -> ChartSpec {
    ChartSpec::new(format!("{} Usage by Season", pitch.name()), ChartKind::Bar)
        .y_title(format!("{} Usage (%)", pitch.name()))
        .series(
            ChartSeries::from_series(series::pitch_usage_series(dataset, pitch), SeriesColor::BySeason)
                .hover(format!("{}: %{{y:.1f}}%", pitch.name())),
        )
        .padded(DEFAULT_HEADROOM)
}

/// One chart of the Detailed Statistics grid.
pub fn detail_metric_chart(dataset: &Dataset, stat: StatId) -> ChartSpec {
    ChartSpec::new(stat.full_name(), ChartKind::Bar)
        .y_title(stat.full_name())
        .series(ChartSeries::from_series(
            series::season_series(dataset, stat),
            SeriesColor::BySeason,
        ))
        .padded(DEFAULT_HEADROOM)
}

pub fn game_score_chart(dataset: &Dataset) -> ChartSpec {
    let averages = series::season_mean_series(dataset, StatId::GameScore, 1);
    ChartSpec::new("Average Game Score by Season", ChartKind::Bar)
        .y_title("Average Game Score")
        .series(
            ChartSeries::from_series(averages, SeriesColor::BySeason)
                .hover("Year: %{x}<br>Average Game Score: %{y:.1f}"),
        )
        .threshold(
            GOOD_START_GAME_SCORE,
            format!("Good Start Threshold ({})", format::counting(GOOD_START_GAME_SCORE)),
        )
        .padded(DEFAULT_HEADROOM)
}

/// Game scores of one season with their trailing average.
pub fn game_score_trend_chart(dataset: &Dataset, season: Season, window: usize) -> ChartSpec {
    let games = series::progression_series(dataset, season, StatId::GameScore);
    let rolling = series::rolling_series(&games, window, 1);
    ChartSpec::new(format!("{season} Game Score Trend"), ChartKind::Line)
        .x_title("Date")
        .y_title("Game Score")
        .legend(Legend::TopRight)
        .series(
            ChartSeries::from_series(games, SeriesColor::Fixed(season.color_hex()))
                .labels(LabelPosition::None),
        )
        .series(
            ChartSeries::from_series(rolling, SeriesColor::Fixed(ROLLING_COLOR))
                .labels(LabelPosition::None),
        )
        .threshold(GOOD_START_GAME_SCORE, "Good Start Threshold (50)")
        .padded(DEFAULT_HEADROOM)
}

pub fn batted_ball_chart(dataset: &Dataset) -> ChartSpec {
    let mut chart = ChartSpec::new("Batted Ball Type Distribution by Season", ChartKind::StackedBar)
        .y_title("Percentage (%)")
        .legend(Legend::TopRight);
    for kind in BattedBall::ALL {
        let name = kind.stat().full_name();
        chart = chart.series(
            ChartSeries::from_series(
                series::batted_ball_series(dataset, kind),
                SeriesColor::Fixed(kind.color_hex()),
            )
            .labels(LabelPosition::None)
            .hover(format!("{name}: %{{y:.1f}}%")),
        );
    }
    chart.padded(DEFAULT_HEADROOM)
}

/// Every chart of the five views with default selections.
pub fn catalog(dataset: &Dataset, config: &Config) -> Vec<ChartSpec> {
    let mut charts = vec![
        season_metric_chart(dataset, StatId::Era),
        era_fip_chart(dataset, config.base_season),
        era_progression_chart(dataset),
        strikeout_walk_chart(dataset),
        k_per_bb_chart(dataset),
        pitch_mix_chart(dataset),
    ];
    charts.extend(PitchType::ALL.iter().map(|p| pitch_usage_chart(dataset, *p)));
    charts.extend(
        crate::stats::StatCategory::Pitching
            .default_selection()
            .into_iter()
            .map(|s| detail_metric_chart(dataset, s)),
    );
    charts.push(game_score_chart(dataset));
    charts.push(game_score_trend_chart(
        dataset,
        config.target_season,
        config.rolling_window,
    ));
    charts.push(batted_ball_chart(dataset));
    charts
}

/// Label for a value on a chart axis tick.
pub fn tick_label(value: f64, kind: StatKind) -> String {
    match kind {
        StatKind::Counting => format::counting(value),
        _ => format::fixed(value, kind.places().min(2)),
    }
}
