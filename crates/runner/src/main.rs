#![forbid(unsafe_code)]

mod banned;
mod export;

use la_core::result::{RunStatus, VerificationResult};
use la_core::stats::DailyStats;
use la_core::{aggregate, normalize, verify};
use la_storage::DailyStatsStore;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

#[derive(Debug)]
struct RunnerConfig {
    reports_dir: PathBuf,
    banned_terms_file: Option<PathBuf>,
    out_file: Option<PathBuf>,
    csv_file: Option<PathBuf>,
    storage_dir: Option<PathBuf>,
    verbose: bool,
}

fn usage() -> &'static str {
    "la_runner — verify a directory of listing-optimization reports\n\n\
USAGE:\n\
  la_runner --reports DIR [--banned-terms FILE.yaml]\n\
            [--out FILE.json] [--csv FILE.csv]\n\
            [--storage-dir DIR] [--verbose]\n\n\
NOTES:\n\
  - every *.json under --reports is decoded and verified; undecodable\n\
    files are reported on stderr and skipped, never abort the batch.\n\
  - aggregated stats go to stdout as pretty JSON unless --out is given.\n\
  - --csv writes one per-report summary row per line.\n\
  - --storage-dir persists today's stats keyed by UTC date (YYYY-MM-DD).\n\
  - exit code: 0 all runs COMPLETE, 1 any FAILED/BLOCKED, 2 usage/IO error.\n"
}

#[derive(Debug)]
enum RunnerError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
    Store(la_storage::StoreError),
}

impl std::fmt::Display for RunnerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Json(err) => write!(f, "json: {err}"),
            Self::Yaml(err) => write!(f, "yaml: {err}"),
            Self::Store(err) => write!(f, "store: {err}"),
        }
    }
}

impl std::error::Error for RunnerError {}

impl From<std::io::Error> for RunnerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for RunnerError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<serde_yaml::Error> for RunnerError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}

impl From<la_storage::StoreError> for RunnerError {
    fn from(value: la_storage::StoreError) -> Self {
        Self::Store(value)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_args() -> Result<RunnerConfig, String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        print!("{}", usage());
        std::process::exit(0);
    }

    let mut reports_dir: Option<PathBuf> = env_var("LA_REPORTS_DIR").map(PathBuf::from);
    let mut banned_terms_file: Option<PathBuf> = env_var("LA_BANNED_TERMS").map(PathBuf::from);
    let mut out_file: Option<PathBuf> = None;
    let mut csv_file: Option<PathBuf> = None;
    let mut storage_dir: Option<PathBuf> = env_var("LA_STORAGE_DIR").map(PathBuf::from);
    let mut verbose = false;

    let mut i = 0usize;
    while i < args.len() {
        let a = args[i].as_str();
        match a {
            "--reports" => {
                i += 1;
                let v = args.get(i).ok_or("--reports requires DIR")?;
                reports_dir = Some(PathBuf::from(v));
            }
            "--banned-terms" => {
                i += 1;
                let v = args.get(i).ok_or("--banned-terms requires FILE")?;
                banned_terms_file = Some(PathBuf::from(v));
            }
            "--out" => {
                i += 1;
                let v = args.get(i).ok_or("--out requires FILE")?;
                out_file = Some(PathBuf::from(v));
            }
            "--csv" => {
                i += 1;
                let v = args.get(i).ok_or("--csv requires FILE")?;
                csv_file = Some(PathBuf::from(v));
            }
            "--storage-dir" => {
                i += 1;
                let v = args.get(i).ok_or("--storage-dir requires DIR")?;
                storage_dir = Some(PathBuf::from(v));
            }
            "--verbose" => verbose = true,
            other => return Err(format!("Unknown arg: {other}\n\n{}", usage())),
        }
        i += 1;
    }

    let reports_dir = reports_dir.ok_or_else(|| format!("--reports is required\n\n{}", usage()))?;

    Ok(RunnerConfig {
        reports_dir,
        banned_terms_file,
        out_file,
        csv_file,
        storage_dir,
        verbose,
    })
}

fn collect_report_paths(dir: &Path) -> Result<Vec<PathBuf>, RunnerError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    // Directory iteration order is platform-defined; sort for determinism.
    paths.sort();
    Ok(paths)
}

fn file_stem(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or("unknown")
}

fn process_reports(
    paths: &[PathBuf],
    banned_terms: Option<&[String]>,
    verbose: bool,
) -> Vec<VerificationResult> {
    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                eprintln!("la_runner: skipping {} (read failed: {err})", path.display());
                continue;
            }
        };
        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                eprintln!("la_runner: skipping {} (not JSON: {err})", path.display());
                continue;
            }
        };
        let input = normalize(&value, file_stem(path));
        let result = verify(&input, banned_terms);
        if verbose {
            eprintln!(
                "la_runner: {} -> {:?} ({} checks, {} failed, {} blocked)",
                path.display(),
                result.status,
                result.summary.total_checks,
                result.summary.failed,
                result.summary.blocked
            );
        }
        results.push(result);
    }
    results
}

fn exit_code_for(results: &[VerificationResult]) -> i32 {
    if results.iter().all(|r| r.status == RunStatus::Complete) {
        0
    } else {
        1
    }
}

fn today_utc() -> String {
    let date = OffsetDateTime::now_utc().date();
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

fn run(cfg: &RunnerConfig) -> Result<i32, RunnerError> {
    let banned_terms = cfg
        .banned_terms_file
        .as_deref()
        .map(banned::load_banned_terms)
        .transpose()?;

    let paths = collect_report_paths(&cfg.reports_dir)?;
    if paths.is_empty() {
        eprintln!(
            "la_runner: no *.json reports under {}",
            cfg.reports_dir.display()
        );
    }

    let results = process_reports(&paths, banned_terms.as_deref(), cfg.verbose);
    let stats = aggregate(&results);

    let rendered = serde_json::to_string_pretty(&stats)?;
    match &cfg.out_file {
        Some(path) => fs::write(path, format!("{rendered}\n"))?,
        None => println!("{rendered}"),
    }

    if let Some(path) = &cfg.csv_file {
        fs::write(path, export::render_csv(&stats))?;
    }

    if let Some(dir) = &cfg.storage_dir {
        let mut store = DailyStatsStore::open(dir)?;
        store.put_daily(&DailyStats {
            date: today_utc(),
            stats: stats.clone(),
        })?;
    }

    Ok(exit_code_for(&results))
}

fn main() {
    let cfg = match parse_args() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };
    match run(&cfg) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("la_runner: {err}");
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests;
