//! Text summaries and CSV/JSON exports of project evaluations
//!
//! The CSV tables carry the per-period sequences and the NPV-vs-rate profile for
//! charting tools; nothing here feeds back into the calculations.

use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::EconomicsResult;
use crate::finance::RateScan;
use crate::scenario::{EvaluationSummary, ProjectEvaluation};

/// File name of the per-period table written by [`write_outputs`]
pub const CASH_FLOW_FILE: &str = "cash_flows.csv";

/// File name of the NPV scan table written by [`write_outputs`]
pub const NPV_SCAN_FILE: &str = "npv_scan.csv";

#[derive(Debug, Serialize)]
struct PeriodRow {
    #[serde(rename = "Period")]
    period: usize,
    #[serde(rename = "Time")]
    time: f64,
    #[serde(rename = "Depreciation")]
    depreciation: f64,
    #[serde(rename = "BookValue")]
    book_value: f64,
    #[serde(rename = "CF")]
    cf: f64,
    #[serde(rename = "DCF")]
    dcf: f64,
    #[serde(rename = "CCF")]
    ccf: f64,
    #[serde(rename = "DCCF")]
    dccf: f64,
}

#[derive(Debug, Serialize)]
struct ScanRow {
    #[serde(rename = "Rate")]
    rate: f64,
    #[serde(rename = "NPV")]
    npv: f64,
}

fn optional(value: Option<f64>, precision: usize, missing: &str) -> String {
    match value {
        Some(v) => format!("{:.*}", precision, v),
        None => missing.to_string(),
    }
}

/// Human-readable KPI block
pub fn format_summary(summary: &EvaluationSummary) -> String {
    let lines = [
        format!("Method: {}", summary.method),
        format!("NPV: {:.4}", summary.npv),
        format!("CCP (final CCF): {:.4}", summary.ccp),
        format!("CCR: {:.6}", summary.ccr),
        format!("CCR_d: {:.6}", summary.ccr_discounted),
        format!("PBP: {}", optional(summary.payback_period, 4, "inf")),
        format!("ROROI: {:.6}", summary.roroi),
        format!("ROROI_d: {:.6}", summary.roroi_discounted),
        format!("DCFROR (approx): {}", optional(summary.dcfror, 6, "None")),
    ];
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Side-by-side KPI table for several evaluations
pub fn format_comparison(summaries: &[EvaluationSummary]) -> String {
    let mut out = format!("{:<18}", "Metric");
    for s in summaries {
        out.push_str(&format!("{:>14}", s.method));
    }
    out.push('\n');
    out.push_str(&"-".repeat(18 + 14 * summaries.len()));
    out.push('\n');

    let rows: [(&str, fn(&EvaluationSummary) -> String); 8] = [
        ("NPV", |s: &EvaluationSummary| format!("{:.4}", s.npv)),
        ("CCP", |s: &EvaluationSummary| format!("{:.4}", s.ccp)),
        ("CCR", |s: &EvaluationSummary| format!("{:.6}", s.ccr)),
        ("CCR_d", |s: &EvaluationSummary| format!("{:.6}", s.ccr_discounted)),
        ("PBP", |s: &EvaluationSummary| optional(s.payback_period, 4, "inf")),
        ("ROROI", |s: &EvaluationSummary| format!("{:.6}", s.roroi)),
        ("ROROI_d", |s: &EvaluationSummary| format!("{:.6}", s.roroi_discounted)),
        ("DCFROR", |s: &EvaluationSummary| optional(s.dcfror, 6, "None")),
    ];

    for (label, value) in rows.iter() {
        out.push_str(&format!("{:<18}", label));
        for s in summaries {
            out.push_str(&format!("{:>14}", value(s)));
        }
        out.push('\n');
    }
    out
}

/// Serialize summaries as a JSON document
pub fn summaries_to_json(summaries: &[EvaluationSummary]) -> EconomicsResult<String> {
    Ok(serde_json::to_string_pretty(summaries)?)
}

/// Write the per-period table (depreciation, book value and all cash flow sequences)
pub fn write_period_table<W: Write>(writer: W, evaluation: &ProjectEvaluation) -> EconomicsResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let dcf = &evaluation.dcf;
    let schedule = &evaluation.depreciation;

    for i in 0..dcf.periods() {
        wtr.serialize(PeriodRow {
            period: i,
            time: dcf.time[i],
            depreciation: schedule.charges[i],
            book_value: schedule.book_values[i],
            cf: dcf.cf[i],
            dcf: dcf.dcf[i],
            ccf: dcf.ccf[i],
            dccf: dcf.dccf[i],
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the NPV-vs-rate profile
pub fn write_scan_table<W: Write>(writer: W, scan: &RateScan) -> EconomicsResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (&rate, &npv) in scan.rates.iter().zip(&scan.npv) {
        wtr.serialize(ScanRow { rate, npv })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write both tables into `dir`, creating it if needed. Returns the two file paths.
pub fn write_outputs(dir: &Path, evaluation: &ProjectEvaluation) -> EconomicsResult<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)?;

    let cash_flow_path = dir.join(CASH_FLOW_FILE);
    write_period_table(fs::File::create(&cash_flow_path)?, evaluation)?;

    let scan_path = dir.join(NPV_SCAN_FILE);
    write_scan_table(fs::File::create(&scan_path)?, &evaluation.scan)?;

    log::info!(
        "Wrote {} and {}",
        cash_flow_path.display(),
        scan_path.display()
    );

    Ok((cash_flow_path, scan_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EconomicsConfig;
    use crate::depreciation::DepreciationMethod;
    use crate::scenario::ScenarioRunner;

    fn evaluation() -> ProjectEvaluation {
        let config = EconomicsConfig {
            irr_scan_points: 101,
            ..Default::default()
        };
        ScenarioRunner::new(config)
            .unwrap()
            .evaluate(&DepreciationMethod::SumOfYearsDigits)
            .unwrap()
    }

    #[test]
    fn test_summary_text() {
        let text = format_summary(&evaluation().summary());
        assert!(text.contains("Method: SOYD"));
        assert!(text.contains("NPV: 114.6383"));
        assert!(text.contains("CCP (final CCF): 382.5000"));
        assert!(text.contains("PBP: 4.0448"));
        assert!(text.contains("DCFROR (approx): 0.150"));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "Method: SOYD");
        assert!(text.ends_with('\n') && !text.ends_with("\n\n"));
    }

    #[test]
    fn test_summary_sentinels_text() {
        let mut summary = evaluation().summary();
        summary.payback_period = None;
        summary.dcfror = None;
        let text = format_summary(&summary);
        assert!(text.contains("PBP: inf"));
        assert!(text.contains("DCFROR (approx): None"));
    }

    #[test]
    fn test_period_table() {
        let eval = evaluation();
        let mut buf = Vec::new();
        write_period_table(&mut buf, &eval).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0], "Period,Time,Depreciation,BookValue,CF,DCF,CCF,DCCF");
        assert!(lines[1].starts_with("0,0.0,0.0,0.0,-10.0"));
    }

    #[test]
    fn test_scan_table() {
        let eval = evaluation();
        let mut buf = Vec::new();
        write_scan_table(&mut buf, &eval.scan).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 102);
        assert!(text.starts_with("Rate,NPV\n0.05,"));
    }

    #[test]
    fn test_comparison_table_and_json() {
        let summaries = vec![evaluation().summary()];
        let table = format_comparison(&summaries);
        assert!(table.contains("SOYD"));
        assert!(table.contains("114.6383"));

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("Metric"));
        assert_eq!(lines[1], "-".repeat(32));
        assert!(lines[9].starts_with("DCFROR"));
        assert!(table.ends_with('\n'));

        let json = summaries_to_json(&summaries).unwrap();
        let parsed: Vec<EvaluationSummary> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0].method, "SOYD");
        assert_eq!(parsed[0].payback_period, summaries[0].payback_period);
    }
}
