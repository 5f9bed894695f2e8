#![allow(dead_code)]

use std::collections::HashMap;

use chrono::NaiveDate;

use pitch_terminal::model::{Dataset, GameRecord, GlossaryEntry, Innings, SeasonTotals};
use pitch_terminal::season::Season;
use pitch_terminal::stats::{PitchType, StatId};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn game(season: Season, date: NaiveDate, stats: &[(StatId, f64)]) -> GameRecord {
    GameRecord {
        date: Some(date),
        season,
        stats: stats.iter().copied().collect(),
    }
}

pub struct SeasonRow {
    pub season: Season,
    pub wins: u32,
    pub losses: u32,
    pub ip: f64,
    pub stats: Vec<(StatId, f64)>,
    pub pitches: [f64; 5],
}

pub fn totals(row: SeasonRow) -> SeasonTotals {
    SeasonTotals {
        season: row.season,
        wins: row.wins,
        losses: row.losses,
        innings: Innings::from_notation(row.ip).expect("valid innings"),
        stats: row.stats.into_iter().collect(),
        pitch_usage: PitchType::ALL
            .iter()
            .copied()
            .zip(row.pitches)
            .collect::<HashMap<_, _>>(),
    }
}

fn season_stats(
    era: f64,
    fip: f64,
    so: f64,
    bb: f64,
    hr: f64,
    babip: f64,
    batted: [f64; 4],
) -> Vec<(StatId, f64)> {
    vec![
        (StatId::Era, era),
        (StatId::Fip, fip),
        (StatId::Strikeouts, so),
        (StatId::Walks, bb),
        (StatId::HomeRuns, hr),
        (StatId::Babip, babip),
        (StatId::GroundBalls, batted[0]),
        (StatId::FlyBalls, batted[1]),
        (StatId::LineDrives, batted[2]),
        (StatId::PopUps, batted[3]),
    ]
}

pub fn sample_seasons() -> Vec<SeasonTotals> {
    vec![
        totals(SeasonRow {
            season: Season::Y2021,
            wins: 9,
            losses: 15,
            ip: 205.2,
            stats: season_stats(3.19, 3.43, 201.0, 50.0, 18.0, 0.275, [300.0, 150.0, 110.0, 40.0]),
            pitches: [0.27, 0.25, 0.20, 0.01, 0.27],
        }),
        totals(SeasonRow {
            season: Season::Y2022,
            wins: 14,
            losses: 9,
            ip: 228.2,
            stats: season_stats(2.28, 2.99, 207.0, 50.0, 16.0, 0.267, [420.0, 300.0, 200.0, 80.0]),
            pitches: [0.252, 0.250, 0.220, 0.003, 0.276],
        }),
        totals(SeasonRow {
            season: Season::Y2023,
            wins: 7,
            losses: 12,
            ip: 184.2,
            stats: season_stats(4.14, 4.03, 151.0, 48.0, 21.0, 0.288, [280.0, 160.0, 120.0, 35.0]),
            pitches: [0.24, 0.24, 0.20, 0.04, 0.28],
        }),
        totals(SeasonRow {
            season: Season::Y2025,
            wins: 11,
            losses: 12,
            ip: 174.2,
            stats: season_stats(5.36, 4.38, 140.0, 56.0, 21.0, 0.301, [250.0, 170.0, 130.0, 30.0]),
            pitches: [0.211, 0.219, 0.158, 0.180, 0.232],
        }),
    ]
}

pub fn sample_games() -> Vec<GameRecord> {
    vec![
        game(Season::Y2021, date(2021, 4, 7), &[(StatId::Era, 3.00), (StatId::GameScore, 48.0)]),
        game(Season::Y2021, date(2021, 2, 15), &[(StatId::Era, 0.00)]),
        game(Season::Y2021, date(2021, 4, 1), &[(StatId::Era, 2.57), (StatId::GameScore, 60.0)]),
        game(Season::Y2021, date(2021, 4, 13), &[(StatId::GameScore, 55.0)]),
        game(Season::Y2022, date(2022, 4, 8), &[(StatId::Era, 1.50), (StatId::GameScore, 65.0)]),
        game(Season::Y2022, date(2022, 4, 14), &[(StatId::Era, 2.00), (StatId::GameScore, 58.0)]),
        game(Season::Y2025, date(2025, 3, 27), &[(StatId::Era, 9.00), (StatId::GameScore, 30.0)]),
        game(Season::Y2025, date(2025, 4, 2), &[(StatId::Era, 6.75), (StatId::GameScore, 45.0)]),
        game(Season::Y2025, date(2025, 4, 8), &[(StatId::Era, 5.40), (StatId::GameScore, 52.0)]),
    ]
}

pub fn sample_glossary() -> Vec<GlossaryEntry> {
    vec![
        GlossaryEntry {
            variable: "ERA".to_string(),
            description: "Earned runs allowed per nine innings".to_string(),
        },
        GlossaryEntry {
            variable: "GmSc".to_string(),
            description: "Game Score".to_string(),
        },
    ]
}

pub fn sample_dataset() -> Dataset {
    Dataset::new(sample_games(), sample_seasons(), sample_glossary())
}
