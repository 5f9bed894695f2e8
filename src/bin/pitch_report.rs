use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use pitch_terminal::chart;
use pitch_terminal::compare;
use pitch_terminal::config::Config;
use pitch_terminal::export;
use pitch_terminal::format::StatKind;
use pitch_terminal::insights;
use pitch_terminal::loader;
use pitch_terminal::metrics;
use pitch_terminal::stats::StatId;

#[derive(Debug, Default)]
struct Args {
    data: Option<PathBuf>,
    charts: bool,
    export: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--data" => {
                let value = iter.next().context("--data needs a path")?;
                args.data = Some(PathBuf::from(value));
            }
            "--export" => {
                let value = iter.next().context("--export needs a path")?;
                args.export = Some(PathBuf::from(value));
            }
            "--charts" => args.charts = true,
            "-h" | "--help" => {
                println!("usage: pitch_report [--data PATH] [--charts] [--export PATH]");
                std::process::exit(0);
            }
            other => bail!("unknown argument `{other}`"),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let mut config = Config::load();
    if let Some(path) = args.data {
        config.data_path = path;
    }

    let dataset = loader::dataset(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    if args.charts {
        let specs = chart::catalog(dataset, &config);
        println!("{}", serde_json::to_string_pretty(&specs)?);
        return Ok(());
    }

    let (base, target) = (config.base_season, config.target_season);
    println!("Seasons");
    for totals in &dataset.seasons {
        let rates = metrics::season_rates(totals);
        let rate = StatKind::Rate { places: 2 };
        println!(
            "  {}  {:>5}  IP {:>6}  ERA {:>5}  K/9 {:>5}  BB/9 {:>5}  K/BB {:>5}",
            totals.season,
            totals.record(),
            totals.innings,
            StatId::Era.kind().format_opt(totals.stat(StatId::Era)),
            rate.format_opt(rates.k_per_9),
            rate.format_opt(rates.bb_per_9),
            rate.format_opt(rates.k_per_bb),
        );
    }

    println!();
    println!("Key declines ({base} vs {target})");
    for comparison in compare::key_declines(dataset, base, target) {
        println!("  {}", comparison.summary_line());
    }

    println!();
    println!("Pitch mix shifts");
    for line in insights::pitch_mix_shifts(dataset, base, target) {
        println!("  {line}");
    }

    if let Some(path) = args.export {
        let report = export::export_metrics(&path, dataset, base, target)?;
        log::info!(
            "wrote {} seasons, {} pitch rows, {} batted-ball rows, {} declines to {}",
            report.seasons,
            report.pitch_rows,
            report.batted_ball_rows,
            report.declines,
            path.display()
        );
    }
    Ok(())
}
