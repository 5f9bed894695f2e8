use std::collections::HashMap;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{Days, NaiveDate, NaiveDateTime};
use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::model::{Dataset, GameRecord, GlossaryEntry, Innings, SeasonTotals};
use crate::season::Season;
use crate::stats::{PitchType, StatId};

pub const GAMES_SHEET: &str = "Data";
pub const SEASONS_SHEET: &str = "Season Totals";
pub const GLOSSARY_SHEET: &str = "Variable Descriptions";

const DATE_COLUMN: &str = "Date";
const YEAR_COLUMN: &str = "Year";
const WINS_COLUMN: &str = "W";
const LOSSES_COLUMN: &str = "L";

static DATASET: OnceCell<Dataset> = OnceCell::new();

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open workbook {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("workbook has no sheet `{0}`")]
    MissingSheet(String),
    #[error("failed to read sheet `{sheet}`: {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },
    #[error("sheet `{sheet}` has no `{column}` column")]
    MissingColumn { sheet: String, column: String },
    #[error("sheet `{sheet}` row {row}: `{column}` is not numeric ({value})")]
    NotNumeric {
        sheet: String,
        row: usize,
        column: String,
        value: String,
    },
    #[error("sheet `{sheet}` row {row}: `{column}` is required")]
    MissingValue {
        sheet: String,
        row: usize,
        column: String,
    },
    #[error("sheet `{sheet}` row {row}: cannot parse date `{value}`")]
    BadDate {
        sheet: String,
        row: usize,
        value: String,
    },
    #[error("sheet `{sheet}` row {row}: season {year} has no display colour")]
    UnmappedSeason { sheet: String, row: usize, year: i64 },
    #[error("sheet `{sheet}` lists season {season} twice")]
    DuplicateSeason { sheet: String, season: Season },
}

/// Loads the workbook on first call and hands every later caller the same
/// tables. The path is only read on the first successful call.
pub fn dataset(path: &Path) -> Result<&'static Dataset, LoadError> {
    DATASET.get_or_try_init(|| {
        let dataset = load_workbook(path)?;
        log::info!(
            "loaded {} games and {} seasons from {}",
            dataset.games.len(),
            dataset.seasons.len(),
            path.display()
        );
        for warning in dataset.drift_warnings() {
            log::warn!("{warning}");
        }
        Ok(dataset)
    })
}

/// The cached tables, if a load has already succeeded.
pub fn cached() -> Option<&'static Dataset> {
    DATASET.get()
}

pub fn load_workbook(path: &Path) -> Result<Dataset, LoadError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let names = workbook.sheet_names().to_vec();
    let mut read = |sheet: &str| -> Result<RawTable, LoadError> {
        if !names.iter().any(|n| n == sheet) {
            return Err(LoadError::MissingSheet(sheet.to_string()));
        }
        let range = workbook
            .worksheet_range(sheet)
            .map_err(|source| LoadError::Sheet {
                sheet: sheet.to_string(),
                source,
            })?;
        Ok(RawTable::from_rows(sheet, range.rows().map(|r| r.to_vec())))
    };

    let games = parse_games(&read(GAMES_SHEET)?)?;
    let seasons = parse_seasons(&read(SEASONS_SHEET)?)?;
    let glossary = parse_glossary(&read(GLOSSARY_SHEET)?);
    Ok(Dataset::new(games, seasons, glossary))
}

/// A sheet with placeholder columns removed. Row numbers in errors are
/// 1-based spreadsheet rows (the header is row 1).
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub sheet: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Data>>,
}

impl RawTable {
    pub fn from_rows(sheet: &str, rows: impl IntoIterator<Item = Vec<Data>>) -> Self {
        let mut iter = rows.into_iter();
        let header = iter.next().unwrap_or_default();
        let keep = header
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| {
                let name = cell.to_string().trim().to_string();
                (!is_placeholder_column(&name)).then_some((idx, name))
            })
            .collect::<Vec<_>>();

        let columns = keep.iter().map(|(_, name)| name.clone()).collect();
        let rows = iter
            .filter(|row| row.iter().any(|c| !is_blank(c)))
            .map(|row| {
                keep.iter()
                    .map(|(idx, _)| row.get(*idx).cloned().unwrap_or(Data::Empty))
                    .collect()
            })
            .collect();

        Self {
            sheet: sheet.to_string(),
            columns,
            rows,
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
    }

    fn require_column(&self, name: &str) -> Result<usize, LoadError> {
        self.column_index(name)
            .ok_or_else(|| LoadError::MissingColumn {
                sheet: self.sheet.clone(),
                column: name.to_string(),
            })
    }

    fn numeric(&self, row: usize, col: usize) -> Result<Option<f64>, LoadError> {
        let cell = &self.rows[row][col];
        numeric_cell(cell).map_err(|value| LoadError::NotNumeric {
            sheet: self.sheet.clone(),
            row: row + 2,
            column: self.columns[col].clone(),
            value,
        })
    }

    fn required_numeric(&self, row: usize, col: usize) -> Result<f64, LoadError> {
        self.numeric(row, col)?
            .ok_or_else(|| LoadError::MissingValue {
                sheet: self.sheet.clone(),
                row: row + 2,
                column: self.columns[col].clone(),
            })
    }

    fn season(&self, row: usize, col: usize) -> Result<Season, LoadError> {
        let year = self.required_numeric(row, col)?.round() as i64;
        i32::try_from(year)
            .ok()
            .and_then(Season::from_year)
            .ok_or_else(|| LoadError::UnmappedSeason {
                sheet: self.sheet.clone(),
                row: row + 2,
                year,
            })
    }

    /// Stats whose column is present; blank cells are left out.
    fn stats(&self, row: usize, columns: &[(StatId, usize)]) -> Result<HashMap<StatId, f64>, LoadError> {
        let mut out = HashMap::new();
        for (stat, col) in columns {
            if let Some(value) = self.numeric(row, *col)? {
                let value = if *stat == StatId::InningsPitched {
                    Innings::from_notation(value).map_or(value, Innings::as_f64)
                } else {
                    value
                };
                out.insert(*stat, value);
            }
        }
        Ok(out)
    }

    fn stat_columns(&self, skip: &[StatId]) -> Vec<(StatId, usize)> {
        StatId::ALL
            .iter()
            .filter(|s| !skip.contains(s))
            .filter_map(|s| self.column_index(s.column()).map(|idx| (*s, idx)))
            .collect()
    }
}

pub fn parse_games(table: &RawTable) -> Result<Vec<GameRecord>, LoadError> {
    let date_col = table.require_column(DATE_COLUMN)?;
    let year_col = table.require_column(YEAR_COLUMN)?;
    let stat_cols = table.stat_columns(&[]);

    let mut games = Vec::with_capacity(table.rows.len());
    for row in 0..table.rows.len() {
        let cell = &table.rows[row][date_col];
        let date = if is_blank(cell) {
            None
        } else {
            Some(date_cell(cell).ok_or_else(|| LoadError::BadDate {
                sheet: table.sheet.clone(),
                row: row + 2,
                value: cell.to_string(),
            })?)
        };
        games.push(GameRecord {
            date,
            season: table.season(row, year_col)?,
            stats: table.stats(row, &stat_cols)?,
        });
    }
    Ok(games)
}

pub fn parse_seasons(table: &RawTable) -> Result<Vec<SeasonTotals>, LoadError> {
    let year_col = table.require_column(YEAR_COLUMN)?;
    let wins_col = table.require_column(WINS_COLUMN)?;
    let losses_col = table.require_column(LOSSES_COLUMN)?;
    let ip_col = table.require_column(StatId::InningsPitched.column())?;
    let stat_cols = table.stat_columns(&[StatId::InningsPitched]);
    let pitch_cols = PitchType::ALL
        .iter()
        .filter_map(|p| table.column_index(p.column()).map(|idx| (*p, idx)))
        .collect::<Vec<_>>();

    let mut seasons: Vec<SeasonTotals> = Vec::with_capacity(table.rows.len());
    for row in 0..table.rows.len() {
        let season = table.season(row, year_col)?;
        if seasons.iter().any(|s| s.season == season) {
            return Err(LoadError::DuplicateSeason {
                sheet: table.sheet.clone(),
                season,
            });
        }

        let raw_ip = table.required_numeric(row, ip_col)?;
        let innings = Innings::from_notation(raw_ip).ok_or_else(|| LoadError::NotNumeric {
            sheet: table.sheet.clone(),
            row: row + 2,
            column: table.columns[ip_col].clone(),
            value: raw_ip.to_string(),
        })?;

        let mut pitch_usage = HashMap::new();
        for (pitch, col) in &pitch_cols {
            if let Some(value) = table.numeric(row, *col)? {
                pitch_usage.insert(*pitch, value);
            }
        }

        seasons.push(SeasonTotals {
            season,
            wins: count(table.required_numeric(row, wins_col)?),
            losses: count(table.required_numeric(row, losses_col)?),
            innings,
            stats: table.stats(row, &stat_cols)?,
            pitch_usage,
        });
    }
    Ok(seasons)
}

/// First two named columns are variable and description.
pub fn parse_glossary(table: &RawTable) -> Vec<GlossaryEntry> {
    if table.columns.len() < 2 {
        return Vec::new();
    }
    table
        .rows
        .iter()
        .filter_map(|row| {
            let variable = row[0].to_string().trim().to_string();
            if variable.is_empty() {
                return None;
            }
            Some(GlossaryEntry {
                variable,
                description: row[1].to_string().trim().to_string(),
            })
        })
        .collect()
}

pub fn is_placeholder_column(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.is_empty() || trimmed.starts_with("Unnamed")
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn count(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// `Ok(None)` for blank cells and spreadsheet error values (`#DIV/0!`);
/// `Err(text)` for anything that is not a number.
pub fn numeric_cell(cell: &Data) -> Result<Option<f64>, String> {
    match cell {
        Data::Empty | Data::Error(_) => Ok(None),
        Data::Int(v) => Ok(Some(*v as f64)),
        Data::Float(v) => Ok(Some(*v)),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| trimmed.to_string())
        }
        other => Err(other.to_string()),
    }
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

pub fn date_cell(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(dt) => excel_serial_date(dt.as_f64()),
        Data::Float(v) => excel_serial_date(*v),
        Data::Int(v) => excel_serial_date(*v as f64),
        Data::String(s) | Data::DateTimeIso(s) => parse_date_text(s),
        _ => None,
    }
}

pub fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Day serials in the 1900 date system (epoch 1899-12-30).
pub fn excel_serial_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial.floor() as u64))
}
