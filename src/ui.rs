use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset as ChartData, GraphType,
    LegendPosition, Paragraph, Row, Table, Wrap,
};

use crate::chart::{self, ChartKind, ChartSpec, Legend};
use crate::compare::{self, PitchShift};
use crate::format::StatKind;
use crate::insights::{self, SEASON_TABLE_COLUMNS};
use crate::model::Dataset;
use crate::season::hex_rgb;
use crate::state::{AppState, View};
use crate::stats::{OVERVIEW_METRICS, PitchType};

/// Bars carry integer heights; values are scaled so three-decimal stats
/// like BAbip still get distinct bars.
const BAR_SCALE: f64 = 1000.0;

pub fn draw(frame: &mut Frame, state: &AppState, dataset: Option<&Dataset>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match dataset {
        Some(dataset) => match state.view {
            View::Overview => render_overview(frame, chunks[1], state, dataset),
            View::Regression => render_regression(frame, chunks[1], state, dataset),
            View::PitchUsage => render_pitch_usage(frame, chunks[1], state, dataset),
            View::DetailedStats => render_detailed(frame, chunks[1], state, dataset),
            View::Analysis => render_analysis(frame, chunks[1], state, dataset),
        },
        None => render_load_failure(frame, chunks[1], state),
    }

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if state.help_overlay {
        let area = frame.size();
        render_help_overlay(frame, area);
    }
}

fn header_text(state: &AppState) -> String {
    let position = View::ALL.iter().position(|v| *v == state.view).unwrap_or(0) + 1;
    let line1 = format!(
        "  .-.  PITCH TERMINAL | {} ({position}/{}) | {} vs {}",
        state.view.title(),
        View::ALL.len(),
        state.base_season,
        state.target_season
    );
    let line2 = " ( ( ) )".to_string();
    let line3 = "  '-'".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    if let Some(status) = state.export.status_line() {
        return status;
    }
    let keys = match state.view {
        View::Overview => "h/l Metric",
        View::Regression => "",
        View::PitchUsage => "h/l Pitch",
        View::DetailedStats => "c Category | j/k Move | Space Toggle | h/l Trend season",
        View::Analysis => "j/k Scroll",
    };
    let mut text = "1-5 View | Tab Next".to_string();
    if !keys.is_empty() {
        text.push_str(" | ");
        text.push_str(keys);
    }
    text.push_str(" | e Export | ? Help | q Quit");
    text
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(2);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_load_failure(frame: &mut Frame, area: Rect, state: &AppState) {
    let message = state
        .load_error
        .as_deref()
        .unwrap_or("No data loaded");
    let text = format!("Failed to load pitching data\n\n{message}\n\nSet PITCH_DATA_PATH and restart.");
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Load Error").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_overview(frame: &mut Frame, area: Rect, state: &AppState, dataset: &Dataset) {
    let table_height = dataset.seasons.len() as u16 + 3;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(table_height),
        ])
        .split(area);

    let cards = insights::season_cards(dataset, state.base_season);
    if !cards.is_empty() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
            .split(rows[0]);
        for (card, col) in cards.iter().zip(cols.iter()) {
            let color = hex_color(card.season.color_hex());
            let text = format!("{} ERA  |  {} W-L\n{}", card.era, card.record, card.note);
            let paragraph = Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .title(format!("{} ", card.season))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                );
            frame.render_widget(paragraph, *col);
        }
    }

    let stat = state.overview_stat();
    let picker = format!(
        " Metric ({}/{}): < {} >",
        state.overview_metric % OVERVIEW_METRICS.len() + 1,
        OVERVIEW_METRICS.len(),
        stat.picker_label()
    );
    frame.render_widget(
        Paragraph::new(picker).style(Style::default().add_modifier(Modifier::BOLD)),
        rows[1],
    );

    render_chart(frame, rows[2], &chart::season_metric_chart(dataset, stat));

    render_table(
        frame,
        rows[3],
        "Complete Season Statistics",
        &SEASON_TABLE_COLUMNS,
        insights::season_table(dataset),
    );
}

fn render_regression(frame: &mut Frame, area: Rect, state: &AppState, dataset: &Dataset) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(40),
            Constraint::Min(5),
        ])
        .split(area);
    let top = split_halves(rows[0]);
    let bottom = split_halves(rows[1]);

    render_chart(frame, top[0], &chart::era_fip_chart(dataset, state.base_season));
    render_chart(frame, top[1], &chart::era_progression_chart(dataset));
    render_chart(frame, bottom[0], &chart::strikeout_walk_chart(dataset));
    render_chart(frame, bottom[1], &chart::k_per_bb_chart(dataset));

    let text = insights::regression_insights(dataset, state.base_season, state.target_season)
        .into_iter()
        .map(|line| format!("- {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Key Insights").borders(Borders::ALL));
    frame.render_widget(paragraph, rows[2]);
}

fn render_pitch_usage(frame: &mut Frame, area: Rect, state: &AppState, dataset: &Dataset) {
    let table_height = dataset.seasons.len() as u16 + 3;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(table_height),
            Constraint::Length(PitchType::ALL.len() as u16 + 2),
        ])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(top[1]);

    render_chart(frame, top[0], &chart::pitch_mix_chart(dataset));

    let picker = format!(" Pitch: < {} >", state.pitch.name());
    frame.render_widget(
        Paragraph::new(picker).style(Style::default().add_modifier(Modifier::BOLD)),
        right[0],
    );
    render_chart(frame, right[1], &chart::pitch_usage_chart(dataset, state.pitch));

    let shift = compare::pitch_shift(dataset, state.pitch, state.base_season, state.target_season);
    frame.render_widget(
        Paragraph::new(usage_summary(&shift, state))
            .block(Block::default().borders(Borders::ALL)),
        right[2],
    );

    let mut columns = vec!["Year"];
    columns.extend(PitchType::ALL.iter().map(|p| p.name()));
    render_table(
        frame,
        rows[1],
        "Complete Pitch Usage Comparison",
        &columns,
        insights::pitch_usage_table(dataset),
    );

    let observations = compare::pitch_shifts(dataset, state.base_season, state.target_season)
        .iter()
        .map(|shift| format!("{} | {}", shift.observation(), shift.pitch.impact()))
        .collect::<Vec<_>>()
        .join("\n");
    frame.render_widget(
        Paragraph::new(observations)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Key Observations").borders(Borders::ALL)),
        rows[2],
    );
}

fn usage_summary(shift: &PitchShift, state: &AppState) -> String {
    let pct = StatKind::Percentage;
    format!(
        "{} {}  |  {} {}  |  Change {}",
        state.base_season,
        pct.format_opt(shift.base),
        state.target_season,
        pct.format_opt(shift.target),
        shift.change_label()
    )
}

fn render_detailed(frame: &mut Frame, area: Rect, state: &AppState, dataset: &Dataset) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)])
        .split(area);
    let metrics = state.category.metrics();
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(metrics.len() as u16 + 3),
            Constraint::Min(3),
        ])
        .split(cols[0]);

    let mut lines = vec![Line::from(Span::styled(
        format!("< {} >", state.category.label()),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for (idx, stat) in metrics.iter().enumerate() {
        let mark = if state.is_detail_selected(*stat) { "[x]" } else { "[ ]" };
        let text = format!("{mark} {}", stat.full_name());
        let style = if idx == state.detail_cursor {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().title("Metrics").borders(Borders::ALL)),
        left[0],
    );

    let glossary = dataset
        .glossary
        .iter()
        .map(|entry| format!("{}: {}", entry.variable, entry.description))
        .collect::<Vec<_>>()
        .join("\n");
    frame.render_widget(
        Paragraph::new(if glossary.is_empty() { "No variable descriptions".to_string() } else { glossary })
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Glossary").borders(Borders::ALL)),
        left[1],
    );

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(cols[1]);

    if state.detail_selection.is_empty() {
        frame.render_widget(
            Paragraph::new("Select at least one metric")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL)),
            right[0],
        );
    } else {
        let n = state.detail_selection.len() as u32;
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, n); n as usize])
            .split(right[0]);
        for (stat, cell) in state.detail_selection.iter().zip(cells.iter()) {
            render_chart(frame, *cell, &chart::detail_metric_chart(dataset, *stat));
        }
    }

    let game_score = split_halves(right[1]);
    render_chart(frame, game_score[0], &chart::game_score_chart(dataset));
    render_chart(
        frame,
        game_score[1],
        &chart::game_score_trend_chart(dataset, state.trend_season, state.rolling_window),
    );
    render_chart(frame, right[2], &chart::batted_ball_chart(dataset));
}

fn render_analysis(frame: &mut Frame, area: Rect, state: &AppState, dataset: &Dataset) {
    let text = analysis_lines(state, dataset).join("\n");
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .scroll((state.analysis_scroll, 0))
        .block(Block::default().title("Analysis & Recommendations").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

pub fn analysis_lines(state: &AppState, dataset: &Dataset) -> Vec<String> {
    let (base, target) = (state.base_season, state.target_season);
    let mut lines = vec![
        "EXECUTIVE SUMMARY".to_string(),
        insights::executive_summary(dataset, base, target),
        String::new(),
        "KEY PERFORMANCE DECLINES".to_string(),
    ];
    for comparison in compare::key_declines(dataset, base, target) {
        lines.push(format!("  {}", comparison.summary_line()));
        lines.push(format!("    Impact: {}", comparison.impact));
    }

    lines.push(String::new());
    lines.push("PITCH MIX SHIFTS".to_string());
    lines.extend(
        insights::pitch_mix_shifts(dataset, base, target)
            .into_iter()
            .map(|line| format!("  {line}")),
    );

    lines.push(String::new());
    lines.push("ROOT CAUSES".to_string());
    for (heading, points) in insights::ROOT_CAUSES {
        lines.push(format!("  {heading}"));
        lines.extend(points.iter().map(|p| format!("    - {p}")));
    }

    lines.push(String::new());
    lines.push("RECOMMENDATIONS".to_string());
    for (heading, points) in insights::RECOMMENDATIONS {
        lines.push(format!("  {heading}"));
        lines.extend(points.iter().map(|p| format!("    - {p}")));
    }

    lines.push(String::new());
    lines.push("EXPECTED RECOVERY TIMELINE".to_string());
    lines.extend(insights::RECOVERY_TIMELINE.iter().map(|p| format!("  - {p}")));

    lines.push(String::new());
    lines.push("ACTION ITEMS".to_string());
    lines.extend(insights::ACTION_ITEMS.iter().map(|p| format!("  [ ] {p}")));
    lines
}

fn render_table(frame: &mut Frame, area: Rect, title: &str, columns: &[&str], rows: Vec<Vec<String>>) {
    let header = Row::new(columns.iter().map(|c| c.to_string()).collect::<Vec<_>>()).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );
    let widths = columns
        .iter()
        .map(|c| Constraint::Min(c.len().max(6) as u16))
        .collect::<Vec<_>>();
    let table = Table::new(rows.into_iter().map(Row::new), widths)
        .header(header)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(table, area);
}

/// Draws any chart description. Stacked bars are drawn grouped; the
/// terminal bar widget has no stacking.
pub fn render_chart(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    let block = Block::default()
        .title(chart_title(spec))
        .borders(Borders::ALL);
    if spec.is_empty() {
        frame.render_widget(
            Paragraph::new("No data")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }
    match spec.kind {
        ChartKind::Line => render_line_chart(frame, area, spec, block),
        ChartKind::Bar | ChartKind::GroupedBar | ChartKind::StackedBar => {
            render_bar_chart(frame, area, spec, block)
        }
    }
}

fn chart_title(spec: &ChartSpec) -> Line<'static> {
    let mut spans = vec![Span::styled(
        spec.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if spec.kind != ChartKind::Line && spec.legend == Legend::TopRight {
        for series in &spec.series {
            spans.push(Span::raw(" "));
            let color = series
                .points
                .first()
                .map(|p| series.point_color(p))
                .unwrap_or("#757575");
            spans.push(Span::styled(
                format!("■ {}", series.name),
                Style::default().fg(hex_color(color)),
            ));
        }
    }
    if let Some(threshold) = &spec.threshold {
        spans.push(Span::styled(
            format!(" | {}", threshold.label),
            Style::default().fg(Color::Gray),
        ));
    }
    if let Some(annotation) = &spec.annotation {
        spans.push(Span::styled(
            format!(" | {}: {}", annotation.text, annotation.x.label()),
            Style::default().fg(Color::Green),
        ));
    }
    Line::from(spans)
}

fn render_bar_chart(frame: &mut Frame, area: Rect, spec: &ChartSpec, block: Block) {
    let keys = spec.x_keys();
    let groups = keys
        .iter()
        .map(|x| {
            let bars = spec
                .series
                .iter()
                .filter_map(|series| {
                    let point = series.points.iter().find(|p| p.x == *x)?;
                    let color = hex_color(series.point_color(point));
                    Some(
                        Bar::default()
                            .value(scaled(point.value))
                            .text_value(point.label.clone())
                            .style(Style::default().fg(color))
                            .value_style(Style::default().fg(Color::Black).bg(color)),
                    )
                })
                .collect::<Vec<_>>();
            BarGroup::default()
                .label(Line::from(x.label()))
                .bars(&bars)
        })
        .collect::<Vec<_>>();

    let per_group = spec.series.len().max(1) as u16;
    let inner_width = area.width.saturating_sub(2);
    let slots = (keys.len() as u16).max(1) * per_group;
    let bar_width = (inner_width.saturating_sub(keys.len() as u16 * 2) / slots).clamp(1, 9);

    let mut widget = BarChart::default()
        .block(block)
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(2);
    for group in groups {
        widget = widget.data(group);
    }
    if let Some(max) = spec.y_range.map(|(_, max)| scaled(max)).filter(|m| *m > 0) {
        widget = widget.max(max);
    }
    frame.render_widget(widget, area);
}

fn render_line_chart(frame: &mut Frame, area: Rect, spec: &ChartSpec, block: Block) {
    let mut lines: Vec<(String, Color, Vec<(f64, f64)>)> = spec
        .series
        .iter()
        .filter(|s| !s.points.is_empty())
        .map(|series| {
            let color = hex_color(series.point_color(&series.points[0]));
            let data = series
                .points
                .iter()
                .map(|p| (p.x.as_f64(), p.value))
                .collect::<Vec<_>>();
            (series.name.clone(), color, data)
        })
        .collect();

    let keys = spec.x_keys();
    let (x_min, x_max) = match (keys.first(), keys.last()) {
        (Some(first), Some(last)) if first != last => (first.as_f64(), last.as_f64()),
        (Some(only), _) => (only.as_f64() - 1.0, only.as_f64() + 1.0),
        _ => (0.0, 1.0),
    };
    if let Some(threshold) = &spec.threshold {
        lines.push((
            threshold.label.clone(),
            Color::Gray,
            vec![(x_min, threshold.value), (x_max, threshold.value)],
        ));
    }

    let y_max = spec
        .y_range
        .map(|(_, max)| max)
        .filter(|max| *max > 0.0)
        .unwrap_or(1.0)
        .max(spec.threshold.as_ref().map_or(0.0, |t| t.value * 1.05));

    let datasets = lines
        .iter()
        .map(|(name, color, data)| {
            ChartData::default()
                .name(name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(*color))
                .data(data)
        })
        .collect::<Vec<_>>();

    let x_labels = match (keys.first(), keys.last()) {
        (Some(first), Some(last)) => vec![Span::raw(first.label()), Span::raw(last.label())],
        _ => Vec::new(),
    };
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(chart::tick_label(y_max / 2.0, StatKind::Rate { places: 2 })),
        Span::raw(chart::tick_label(y_max, StatKind::Rate { places: 2 })),
    ];

    let legend = match spec.legend {
        Legend::TopRight => Some(LegendPosition::TopRight),
        Legend::Hidden => None,
    };
    let widget = Chart::new(datasets)
        .block(block)
        .legend_position(legend)
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
        .x_axis(
            Axis::default()
                .title(spec.x_title.clone())
                .bounds([x_min, x_max])
                .labels(x_labels)
                .style(Style::default().fg(Color::Gray)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, y_max])
                .labels(y_labels)
                .style(Style::default().fg(Color::Gray)),
        );
    frame.render_widget(widget, area);
}

fn scaled(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value * BAR_SCALE).round() as u64
}

pub fn hex_color(hex: &str) -> Color {
    hex_rgb(hex).map_or(Color::Gray, |(r, g, b)| Color::Rgb(r, g, b))
}

fn split_halves(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Pitch Terminal - Help",
        "",
        "Views:",
        "  1-5            Overview / Regression / Pitch Usage / Detailed / Analysis",
        "  Tab / S-Tab    Next / previous view",
        "",
        "Selections:",
        "  h/l or ←/→     Change metric, pitch or trend season",
        "  j/k or ↑/↓     Move cursor / scroll",
        "  c              Cycle metric category (Detailed)",
        "  Space          Toggle metric (Detailed)",
        "",
        "  e              Export derived metrics to xlsx",
        "  ?              Toggle help",
        "  q              Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
