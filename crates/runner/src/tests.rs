use super::*;
use la_core::result::CheckStatus;
use serde_json::json;

fn temp_dir(prefix: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("{prefix}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_report(dir: &Path, name: &str, value: &serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).expect("render"))
        .expect("write report");
    path
}

#[test]
fn collect_ignores_non_json_and_sorts() {
    let dir = temp_dir("la_runner_collect");
    write_report(&dir, "b.json", &json!({}));
    write_report(&dir, "a.json", &json!({}));
    std::fs::write(dir.join("notes.txt"), "not a report").expect("write");
    std::fs::create_dir(dir.join("nested.json")).expect("mkdir");

    let paths = collect_report_paths(&dir).expect("collect");
    let names: Vec<&str> = paths.iter().map(|p| file_stem(p)).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn file_stem_is_the_fallback_identifier() {
    let dir = temp_dir("la_runner_stem");
    write_report(&dir, "B0FALLBACK.json", &json!({}));
    let paths = collect_report_paths(&dir).expect("collect");
    let results = process_reports(&paths, None, false);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].product.asin, "B0FALLBACK");
    // An empty document blocks every module.
    assert_eq!(results[0].status, RunStatus::Blocked);
}

#[test]
fn undecodable_reports_are_skipped_not_fatal() {
    let dir = temp_dir("la_runner_skip");
    std::fs::write(dir.join("broken.json"), "{ not json").expect("write");
    write_report(&dir, "ok.json", &json!({"asin": "B0OKOKOKOK"}));
    let paths = collect_report_paths(&dir).expect("collect");
    let results = process_reports(&paths, None, false);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].product.asin, "B0OKOKOKOK");
}

#[test]
fn caller_banned_terms_reach_the_listing_checks() {
    let dir = temp_dir("la_runner_banned");
    write_report(
        &dir,
        "report.json",
        &json!({
            "asin": "B0BANNEDXX",
            "listing_creation": {
                "title": "Turbo mixer with unicorn power",
                "bullets": ["a", "b", "c", "d", "e"],
                "description": "A mixer.",
                "backend_terms": "mixer"
            }
        }),
    );
    let paths = collect_report_paths(&dir).expect("collect");
    let banned = vec!["unicorn".to_string()];
    let results = process_reports(&paths, Some(&banned), false);
    let listing = results[0]
        .modules
        .iter()
        .find(|m| m.id == "listing_creation")
        .expect("listing module");
    let check = listing
        .checks
        .iter()
        .find(|c| c.id == "M4-06")
        .expect("banned-terms check");
    assert_eq!(check.status, CheckStatus::Fail);
}

#[test]
fn banned_terms_file_parses_and_trims() {
    let dir = temp_dir("la_runner_yaml");
    let path = dir.join("banned.yaml");
    std::fs::write(
        &path,
        "banned_terms:\n  - guarantee\n  - \"  miracle  \"\n  - \"\"\n",
    )
    .expect("write yaml");
    let terms = banned::load_banned_terms(&path).expect("load");
    assert_eq!(terms, vec!["guarantee".to_string(), "miracle".to_string()]);
}

#[test]
fn banned_terms_file_without_list_is_empty() {
    let dir = temp_dir("la_runner_yaml_empty");
    let path = dir.join("banned.yaml");
    std::fs::write(&path, "other_key: 1\n").expect("write yaml");
    let terms = banned::load_banned_terms(&path).expect("load");
    assert!(terms.is_empty());
}

#[test]
fn csv_has_header_and_one_row_per_report() {
    let dir = temp_dir("la_runner_csv");
    write_report(&dir, "one.json", &json!({"asin": "B0CSVONE00"}));
    write_report(&dir, "two.json", &json!({"asin": "B0CSVTWO00"}));
    let paths = collect_report_paths(&dir).expect("collect");
    let results = process_reports(&paths, None, false);
    let stats = aggregate(&results);

    let csv = export::render_csv(&stats);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "asin,status,checks_total,checks_failed,pass_rate");
    assert!(lines[1].starts_with("B0CSVONE00,PASS,42,0,"));
}

#[test]
fn exit_code_folds_over_run_statuses() {
    let dir = temp_dir("la_runner_exit");
    write_report(&dir, "blocked.json", &json!({}));
    let paths = collect_report_paths(&dir).expect("collect");
    let results = process_reports(&paths, None, false);
    assert_eq!(exit_code_for(&results), 1);
    assert_eq!(exit_code_for(&[]), 0);
}

#[test]
fn today_utc_is_a_date_key() {
    let date = today_utc();
    assert_eq!(date.len(), 10);
    assert_eq!(&date[4..5], "-");
    assert_eq!(&date[7..8], "-");
}
