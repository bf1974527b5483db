#![forbid(unsafe_code)]

use la_core::stats::AggregatedStats;
use std::fmt::Write as _;

/// One summary row per verified report, header included.
pub fn render_csv(stats: &AggregatedStats) -> String {
    let mut out = String::from("asin,status,checks_total,checks_failed,pass_rate\n");
    for report in &stats.reports {
        let _ = writeln!(
            &mut out,
            "{},{},{},{},{:.4}",
            csv_field(&report.asin),
            report.status.as_str(),
            report.checks_total,
            report.checks_failed,
            report.pass_rate
        );
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
