//! Report emission: three CSV sections to stdout or a file.

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use tracing::info;

use crate::analyzers::report::Report;

/// Writes the report in its fixed order: comparison table, DAP parameter
/// grouping, third-party domain grouping, separated by blank lines. The
/// CSV writer quotes labels containing commas; `NaN` cells print as
/// `NaN`. Proportions are emitted as-is in [0, 1], never multiplied by
/// 100.
pub fn write_report<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    write_section(&mut *out, &["metric", "www", "nci", "other"], &report.rows)?;
    writeln!(out)?;
    write_section(
        &mut *out,
        &["agency", "subagency", "count"],
        &report.dap_groups,
    )?;
    writeln!(out)?;
    write_section(&mut *out, &["domain", "count"], &report.domain_groups)?;
    Ok(())
}

/// Emits the report to `output` (a file path) or stdout when absent.
pub fn emit(report: &Report, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = File::create(path)?;
            write_report(&mut file, report)?;
            info!(path, rows = report.rows.len(), "report written");
        }
        None => {
            let stdout = io::stdout();
            write_report(&mut stdout.lock(), report)?;
        }
    }
    Ok(())
}

/// One section: an explicit header record followed by the serialized
/// rows. The header is written even when the section is empty.
fn write_section<W: Write, T: Serialize>(out: W, header: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::report::{DapGroup, DomainGroup, MetricRow};

    fn sample_report() -> Report {
        Report {
            rows: vec![
                MetricRow {
                    metric: "% with DAP detected".to_string(),
                    www: 1.0,
                    nci: 0.5,
                    other: f64::NAN,
                },
                MetricRow {
                    metric: "% CLS needs improvement (0.1 - 0.25)".to_string(),
                    www: 0.0,
                    nci: 0.25,
                    other: 0.75,
                },
            ],
            dap_groups: vec![DapGroup {
                agency: "HHS".to_string(),
                subagency: "NIH".to_string(),
                count: 3,
            }],
            domain_groups: vec![DomainGroup {
                domain: "dap.digitalgov.gov".to_string(),
                count: 2,
            }],
        }
    }

    fn rendered(report: &Report) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_sections_in_fixed_order_with_headers() {
        let text = rendered(&sample_report());
        let metric_at = text.find("metric,www,nci,other").unwrap();
        let dap_at = text.find("agency,subagency,count").unwrap();
        let domain_at = text.find("domain,count").unwrap();
        assert!(metric_at < dap_at && dap_at < domain_at);
    }

    #[test]
    fn test_nan_cell_prints_as_nan() {
        let text = rendered(&sample_report());
        assert!(text.contains("% with DAP detected,1.0,0.5,NaN"));
    }

    #[test]
    fn test_proportions_are_not_percentages() {
        let text = rendered(&sample_report());
        assert!(text.contains("0.25,0.75"));
        assert!(!text.contains("25,75"));
    }

    #[test]
    fn test_headers_survive_empty_sections() {
        let report = Report {
            rows: vec![],
            dap_groups: vec![],
            domain_groups: vec![],
        };
        let text = rendered(&report);
        assert!(text.contains("metric,www,nci,other"));
        assert!(text.contains("agency,subagency,count"));
        assert!(text.contains("domain,count"));
    }

    #[test]
    fn test_emit_writes_file() {
        let path = format!(
            "{}/site_scan_report_test_emit.csv",
            std::env::temp_dir().display()
        );
        let _ = std::fs::remove_file(&path);

        emit(&sample_report(), Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("metric,www,nci,other"));

        std::fs::remove_file(&path).unwrap();
    }
}
