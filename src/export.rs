use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::compare;
use crate::metrics;
use crate::model::Dataset;
use crate::season::Season;
use crate::series::{self, XKey};
use crate::stats::{BattedBall, PitchType, StatId};

pub struct ExportReport {
    pub seasons: usize,
    pub pitch_rows: usize,
    pub batted_ball_rows: usize,
    pub declines: usize,
}

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
    Blank,
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        match value.filter(|v| v.is_finite()) {
            Some(v) => Cell::Number(v),
            None => Cell::Blank,
        }
    }
}

fn header(names: &[&str]) -> Vec<Cell> {
    names.iter().map(|name| Cell::from(*name)).collect()
}

/// Writes derived season metrics. Rates are stored unrounded; the
/// dashboard's formatting rules only apply to display.
pub fn export_metrics(
    path: &Path,
    dataset: &Dataset,
    base: Season,
    target: Season,
) -> Result<ExportReport> {
    let mut season_rows = vec![header(&[
        "Year", "W", "L", "IP", "ERA", "FIP", "SO", "BB", "HR", "K/9", "BB/9", "K/BB", "BAbip",
        "Avg GmSc",
    ])];
    let avg_game_score = series::season_mean_series(dataset, StatId::GameScore, 1);
    for totals in &dataset.seasons {
        let rates = metrics::season_rates(totals);
        season_rows.push(vec![
            Cell::Number(f64::from(totals.season.year())),
            Cell::Number(f64::from(totals.wins)),
            Cell::Number(f64::from(totals.losses)),
            Cell::Text(totals.innings.to_string()),
            totals.stat(StatId::Era).into(),
            totals.stat(StatId::Fip).into(),
            totals.stat(StatId::Strikeouts).into(),
            totals.stat(StatId::Walks).into(),
            totals.stat(StatId::HomeRuns).into(),
            rates.k_per_9.into(),
            rates.bb_per_9.into(),
            rates.k_per_bb.into(),
            totals.stat(StatId::Babip).into(),
            avg_game_score
                .get(XKey::Season(totals.season))
                .map(|p| p.value)
                .into(),
        ]);
    }

    let mut pitch_rows = vec![{
        let mut row = vec![Cell::from("Year")];
        row.extend(PitchType::ALL.iter().map(|p| Cell::from(p.name())));
        row
    }];
    for totals in &dataset.seasons {
        let mut row = vec![Cell::Number(f64::from(totals.season.year()))];
        row.extend(PitchType::ALL.iter().map(|p| Cell::from(totals.pitch(*p))));
        pitch_rows.push(row);
    }

    let mut batted_rows = vec![{
        let mut row = vec![Cell::from("Year")];
        for kind in BattedBall::ALL {
            row.push(Cell::from(kind.stat().column()));
            row.push(Cell::from(format!("{}%", kind.stat().column())));
        }
        row
    }];
    for totals in &dataset.seasons {
        let profile = metrics::batted_ball_profile(totals);
        let mut row = vec![Cell::Number(f64::from(totals.season.year()))];
        for kind in BattedBall::ALL {
            row.push(totals.stat(kind.stat()).into());
            row.push(profile.map(|p| p.get(kind)).into());
        }
        batted_rows.push(row);
    }

    let mut decline_rows = vec![header(&[
        "Metric", "Base Season", "Base", "Target Season", "Target", "Change", "Change %",
    ])];
    let declines = compare::key_declines(dataset, base, target);
    for comparison in &declines {
        decline_rows.push(vec![
            Cell::Text(comparison.label.clone()),
            Cell::Number(f64::from(base.year())),
            comparison.base.into(),
            Cell::Number(f64::from(target.year())),
            comparison.target.into(),
            comparison.diff().into(),
            comparison.pct_change().into(),
        ]);
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Seasons")?;
        write_rows(sheet, &season_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("PitchUsage")?;
        write_rows(sheet, &pitch_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("BattedBall")?;
        write_rows(sheet, &batted_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Declines")?;
        write_rows(sheet, &decline_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        seasons: season_rows.len() - 1,
        pitch_rows: pitch_rows.len() - 1,
        batted_ball_rows: batted_rows.len() - 1,
        declines: declines.len(),
    })
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<Cell>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (r, c) = (row_idx as u32, col_idx as u16);
            match cell {
                Cell::Text(value) => {
                    worksheet
                        .write_string(r, c, value)
                        .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
                }
                Cell::Number(value) => {
                    worksheet
                        .write_number(r, c, *value)
                        .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
                }
                Cell::Blank => {}
            }
        }
    }
    Ok(())
}
