//! Assembles the comparison table and the two side groupings.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::metrics::metric_catalog;
use crate::analyzers::partition::Cohorts;
use crate::errors::ReportError;
use crate::record::ScanRecord;

/// Placeholder label when a DAP parameter side is absent or blank.
pub const NO_DAP_VALUE: &str = "_NONE_";

/// One row of the comparison table. Proportions stay in [0, 1]; a `NaN`
/// cell means the cohort had no usable data for that metric.
#[derive(Debug, Serialize)]
pub struct MetricRow {
    pub metric: String,
    pub www: f64,
    pub nci: f64,
    pub other: f64,
}

#[derive(Debug, Serialize)]
pub struct DapGroup {
    pub agency: String,
    pub subagency: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DomainGroup {
    pub domain: String,
    pub count: usize,
}

/// The full report: the ordered comparison table plus the two groupings
/// computed over the other-NCI home-page cohort.
#[derive(Debug)]
pub struct Report {
    pub rows: Vec<MetricRow>,
    pub dap_groups: Vec<DapGroup>,
    pub domain_groups: Vec<DomainGroup>,
}

/// Runs the whole aggregation pipeline over one snapshot: partition,
/// derive home pages, enforce the www cardinality guard, then evaluate
/// the metric catalog and the side groupings.
pub fn build_report(records: &[ScanRecord]) -> Result<Report, ReportError> {
    let cohorts = Cohorts::split(records);
    info!(
        www = cohorts.www.len(),
        nci = cohorts.nci.len(),
        federal = cohorts.federal.len(),
        "snapshot partitioned"
    );

    let pages = cohorts.home_pages();
    pages.require_single_www()?;
    debug!(
        www = pages.www.len(),
        nci = pages.nci.len(),
        other = pages.other.len(),
        "home pages derived"
    );

    let rows = metric_catalog()
        .iter()
        .map(|spec| {
            let values = spec.evaluate_for_cohorts(&pages);
            MetricRow {
                metric: spec.label.to_string(),
                www: values.www,
                nci: values.nci,
                other: values.other,
            }
        })
        .collect();

    Ok(Report {
        rows,
        dap_groups: group_dap_parameters(&pages.nci),
        domain_groups: group_third_party_domains(&pages.nci),
    })
}

/// Counts records per `agency|subagency` composite key, in first-seen
/// order.
pub fn group_dap_parameters(records: &[&ScanRecord]) -> Vec<DapGroup> {
    let mut positions: HashMap<(String, String), usize> = HashMap::new();
    let mut groups: Vec<DapGroup> = Vec::new();

    for record in records {
        let (agency, subagency) = match &record.dap_parameters {
            Some(params) => (
                dap_label(params.agency.as_deref()),
                dap_label(params.subagency.as_deref()),
            ),
            None => (NO_DAP_VALUE.to_string(), NO_DAP_VALUE.to_string()),
        };

        match positions.entry((agency.clone(), subagency.clone())) {
            Entry::Occupied(slot) => groups[*slot.get()].count += 1,
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(DapGroup {
                    agency,
                    subagency,
                    count: 1,
                });
            }
        }
    }

    groups
}

fn dap_label(value: Option<&str>) -> String {
    value
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(NO_DAP_VALUE)
        .to_string()
}

/// Flattens every record's third-party domain list and counts occurrences
/// of each literal domain string, in first-seen order.
pub fn group_third_party_domains(records: &[&ScanRecord]) -> Vec<DomainGroup> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<DomainGroup> = Vec::new();

    for record in records {
        let Some(domains) = record.third_party_service_domains.as_deref() else {
            continue;
        };
        for domain in domains {
            match positions.entry(domain.clone()) {
                Entry::Occupied(slot) => groups[*slot.get()].count += 1,
                Entry::Vacant(slot) => {
                    slot.insert(groups.len());
                    groups.push(DomainGroup {
                        domain: domain.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    groups
}
