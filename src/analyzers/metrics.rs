//! The metric catalog and its generic evaluator.
//!
//! Every reported statistic is one [`MetricSpec`]: a label, a way to turn
//! a record into a working number, and an optional filter dropping records
//! that lack the underlying data. Percentage metrics are means of 0/1
//! indicators, so a single evaluator covers the whole catalog.

use crate::analyzers::partition::HomePages;
use crate::analyzers::utility::mean;
use crate::record::{ScanRecord, has_value};

/// Cumulative layout shift thresholds (unitless score).
pub const CLS_GOOD: f64 = 0.1;
pub const CLS_POOR: f64 = 0.25;

/// Largest contentful paint thresholds, in milliseconds.
pub const LCP_GOOD_MS: f64 = 2500.0;
pub const LCP_POOR_MS: f64 = 4000.0;

/// Upper bound of the "low" third-party service bucket.
pub const THIRD_PARTY_LOW_MAX: u32 = 5;

pub type RecordPredicate = fn(&ScanRecord) -> bool;

/// How a record is turned into one working value.
pub enum MetricKind {
    /// Arithmetic mean of a numeric field.
    Mean(fn(&ScanRecord) -> f64),
    /// Proportion of records satisfying a predicate, computed as the mean
    /// of a 0/1 indicator.
    Share(RecordPredicate),
    /// Proportion of records carrying one of the government-wide required
    /// links, matched by URL or link-text substring.
    RequiredLink {
        urls: &'static [&'static str],
        texts: &'static [&'static str],
    },
}

/// One reportable statistic.
pub struct MetricSpec {
    pub label: &'static str,
    pub kind: MetricKind,
    /// Records failing the filter are excluded before averaging.
    pub filter: Option<RecordPredicate>,
}

/// A metric evaluated over the three home-page cohorts.
#[derive(Debug, Clone, Copy)]
pub struct CohortValues {
    pub www: f64,
    pub nci: f64,
    pub other: f64,
}

impl MetricSpec {
    /// Filters the cohort, maps each survivor to its working value, and
    /// averages. An empty cohort (or one fully excluded by the filter)
    /// yields `NaN`.
    pub fn evaluate(&self, records: &[&ScanRecord]) -> f64 {
        let values = records
            .iter()
            .filter(|r| self.filter.map_or(true, |keep| keep(r)))
            .map(|r| match &self.kind {
                MetricKind::Mean(value) => value(r),
                MetricKind::Share(predicate) => indicator(predicate(r)),
                MetricKind::RequiredLink { urls, texts } => {
                    indicator(has_required_link(r, urls, texts))
                }
            });
        mean(values)
    }

    pub fn evaluate_for_cohorts(&self, pages: &HomePages<'_>) -> CohortValues {
        CohortValues {
            www: self.evaluate(&pages.www),
            nci: self.evaluate(&pages.nci),
            other: self.evaluate(&pages.other),
        }
    }
}

fn indicator(condition: bool) -> f64 {
    if condition { 1.0 } else { 0.0 }
}

/// True if any `required_links_url` entry contains one of `urls`, or any
/// `required_links_text` entry contains one of `texts`. Comparison is
/// done on lowercased entries; absent or empty sequences never match.
pub fn has_required_link(record: &ScanRecord, urls: &[&str], texts: &[&str]) -> bool {
    contains_any(record.required_links_url.as_deref(), urls)
        || contains_any(record.required_links_text.as_deref(), texts)
}

fn contains_any(entries: Option<&[String]>, needles: &[&str]) -> bool {
    entries.is_some_and(|entries| {
        entries.iter().any(|entry| {
            let entry = entry.to_lowercase();
            needles.iter().any(|needle| entry.contains(needle))
        })
    })
}

fn has_cls(record: &ScanRecord) -> bool {
    record.cumulative_layout_shift.is_some()
}

fn has_lcp(record: &ScanRecord) -> bool {
    record.largest_contentful_paint.is_some()
}

fn has_third_party_count(record: &ScanRecord) -> bool {
    record.third_party_service_count.is_some()
}

/// One government-wide required link category.
struct LinkCheck {
    label: &'static str,
    urls: &'static [&'static str],
    texts: &'static [&'static str],
}

/// The required-link categories, matched per the upstream link text. The
/// Spanish entry deliberately lists the mis-encoded variants seen in the
/// data instead of normalizing them.
static REQUIRED_LINKS: &[LinkCheck] = &[
    LinkCheck {
        label: "% with About link",
        urls: &["/about"],
        texts: &["about"],
    },
    LinkCheck {
        label: "% with No FEAR Act link",
        urls: &["no-fear", "nofear"],
        texts: &["no fear"],
    },
    LinkCheck {
        label: "% with FOIA link",
        urls: &["foia"],
        texts: &["foia", "freedom of information"],
    },
    LinkCheck {
        label: "% with Privacy Policy link",
        urls: &["privacy"],
        texts: &["privacy"],
    },
    LinkCheck {
        label: "% with USA.gov link",
        urls: &["usa.gov"],
        texts: &["usa.gov"],
    },
    LinkCheck {
        label: "% with Spanish link",
        urls: &["espanol"],
        texts: &["spanish", "español", "espanol", "espa&ntilde;ol"],
    },
    LinkCheck {
        label: "% with Vulnerability Disclosure link",
        urls: &["vulnerability-disclosure", "vulnerability_disclosure"],
        texts: &["vulnerability disclosure"],
    },
    LinkCheck {
        label: "% with Budget and Performance link",
        urls: &["budget"],
        texts: &["budget and performance", "budget & performance"],
    },
    LinkCheck {
        label: "% with Inspector General link",
        urls: &["oig", "inspector-general"],
        texts: &["inspector general"],
    },
];

/// The full, ordered metric catalog. Order here is the row order of the
/// report's comparison table.
pub fn metric_catalog() -> Vec<MetricSpec> {
    let mut catalog = vec![
        MetricSpec {
            label: "Average cumulative layout shift",
            kind: MetricKind::Mean(|r| r.cumulative_layout_shift.unwrap_or_default()),
            filter: Some(has_cls),
        },
        MetricSpec {
            label: "% CLS good (< 0.1)",
            kind: MetricKind::Share(|r| {
                r.cumulative_layout_shift.is_some_and(|v| v < CLS_GOOD)
            }),
            filter: Some(has_cls),
        },
        MetricSpec {
            label: "% CLS needs improvement (0.1 - 0.25)",
            kind: MetricKind::Share(|r| {
                r.cumulative_layout_shift
                    .is_some_and(|v| (CLS_GOOD..CLS_POOR).contains(&v))
            }),
            filter: Some(has_cls),
        },
        MetricSpec {
            label: "% CLS poor (>= 0.25)",
            kind: MetricKind::Share(|r| {
                r.cumulative_layout_shift.is_some_and(|v| v >= CLS_POOR)
            }),
            filter: Some(has_cls),
        },
        MetricSpec {
            label: "Average largest contentful paint (ms)",
            kind: MetricKind::Mean(|r| r.largest_contentful_paint.unwrap_or_default()),
            filter: Some(has_lcp),
        },
        MetricSpec {
            label: "% LCP good (< 2500 ms)",
            kind: MetricKind::Share(|r| {
                r.largest_contentful_paint.is_some_and(|v| v < LCP_GOOD_MS)
            }),
            filter: Some(has_lcp),
        },
        MetricSpec {
            label: "% LCP needs improvement (2500 - 4000 ms)",
            kind: MetricKind::Share(|r| {
                r.largest_contentful_paint
                    .is_some_and(|v| (LCP_GOOD_MS..LCP_POOR_MS).contains(&v))
            }),
            filter: Some(has_lcp),
        },
        MetricSpec {
            label: "% LCP poor (>= 4000 ms)",
            kind: MetricKind::Share(|r| {
                r.largest_contentful_paint.is_some_and(|v| v >= LCP_POOR_MS)
            }),
            filter: Some(has_lcp),
        },
        MetricSpec {
            label: "Average third-party service count",
            kind: MetricKind::Mean(|r| {
                f64::from(r.third_party_service_count.unwrap_or_default())
            }),
            filter: Some(has_third_party_count),
        },
        MetricSpec {
            label: "% with no third-party services",
            kind: MetricKind::Share(|r| r.third_party_service_count == Some(0)),
            filter: Some(has_third_party_count),
        },
        MetricSpec {
            label: "% with 1 - 5 third-party services",
            kind: MetricKind::Share(|r| {
                r.third_party_service_count
                    .is_some_and(|n| (1..=THIRD_PARTY_LOW_MAX).contains(&n))
            }),
            filter: Some(has_third_party_count),
        },
        MetricSpec {
            label: "% with 6 or more third-party services",
            kind: MetricKind::Share(|r| {
                r.third_party_service_count
                    .is_some_and(|n| n > THIRD_PARTY_LOW_MAX)
            }),
            filter: Some(has_third_party_count),
        },
        MetricSpec {
            label: "% with sitemap.xml detected",
            kind: MetricKind::Share(|r| r.sitemap_xml_detected == Some(true)),
            filter: None,
        },
        MetricSpec {
            label: "% with robots.txt detected",
            kind: MetricKind::Share(|r| r.robots_txt_detected == Some(true)),
            filter: None,
        },
        MetricSpec {
            label: "% with viewport meta tag",
            kind: MetricKind::Share(|r| r.viewport_meta_tag == Some(true)),
            filter: None,
        },
        MetricSpec {
            label: "% with site search",
            kind: MetricKind::Share(|r| r.site_search == Some(true)),
            filter: None,
        },
        MetricSpec {
            label: "% with DAP detected",
            kind: MetricKind::Share(|r| r.dap == Some(true)),
            filter: None,
        },
        MetricSpec {
            label: "% indexed by Search.gov",
            kind: MetricKind::Share(|r| r.search_dot_gov == Some(true)),
            filter: None,
        },
        MetricSpec {
            label: "% reachable over IPv6",
            kind: MetricKind::Share(|r| r.ipv6 == Some(true)),
            filter: None,
        },
        MetricSpec {
            label: "% with title",
            kind: MetricKind::Share(|r| has_value(r.title.as_deref())),
            filter: None,
        },
        MetricSpec {
            label: "% with description",
            kind: MetricKind::Share(|r| has_value(r.description.as_deref())),
            filter: None,
        },
        MetricSpec {
            label: "% with og:title",
            kind: MetricKind::Share(|r| has_value(r.og_title.as_deref())),
            filter: None,
        },
        MetricSpec {
            label: "% with og:description",
            kind: MetricKind::Share(|r| has_value(r.og_description.as_deref())),
            filter: None,
        },
        MetricSpec {
            label: "% with canonical link",
            kind: MetricKind::Share(|r| has_value(r.canonical_link.as_deref())),
            filter: None,
        },
    ];

    catalog.extend(REQUIRED_LINKS.iter().map(|check| MetricSpec {
        label: check.label,
        kind: MetricKind::RequiredLink {
            urls: check.urls,
            texts: check.texts,
        },
        filter: None,
    }));

    catalog
}
