//! Cohort partitioning: www / other-NCI / other-federal, and the
//! home-page derivation within each cohort.

use crate::errors::ReportError;
use crate::record::ScanRecord;

/// The canonical www website every cohort is compared against.
pub const WWW_WEBSITE: &str = "www.cancer.gov";

/// Apex domains whose sites (apex or any subdomain) belong to the
/// other-NCI cohort once the www record has been taken out.
const NCI_DOMAINS: &[&str] = &["cancer.gov", "ncifcrf.gov", "nci.nih.gov", "smokefree.gov"];

/// Splits `records` into `(matches, rest)` by `predicate`, preserving
/// input order within each side.
pub fn partition_by<'a, I, P>(records: I, predicate: P) -> (Vec<&'a ScanRecord>, Vec<&'a ScanRecord>)
where
    I: IntoIterator<Item = &'a ScanRecord>,
    P: Fn(&ScanRecord) -> bool,
{
    let mut matches = Vec::new();
    let mut rest = Vec::new();
    for record in records {
        if predicate(record) {
            matches.push(record);
        } else {
            rest.push(record);
        }
    }
    (matches, rest)
}

fn is_www(record: &ScanRecord) -> bool {
    record.final_url_website.as_deref() == Some(WWW_WEBSITE)
}

fn is_nci_website(record: &ScanRecord) -> bool {
    let Some(site) = record.final_url_website.as_deref() else {
        return false;
    };
    NCI_DOMAINS.iter().any(|domain| {
        site == *domain
            || site
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// The three top-level cohorts. Every input record lands in exactly one.
pub struct Cohorts<'a> {
    pub www: Vec<&'a ScanRecord>,
    pub nci: Vec<&'a ScanRecord>,
    pub federal: Vec<&'a ScanRecord>,
}

impl<'a> Cohorts<'a> {
    /// Stratifies a snapshot: www first, then the NCI pattern over the
    /// remainder, then everything else. Records with no
    /// `final_url_website` fall through to the federal cohort.
    pub fn split(records: &'a [ScanRecord]) -> Self {
        let (www, rest) = partition_by(records, is_www);
        let (nci, federal) = partition_by(rest, is_nci_website);
        Self { www, nci, federal }
    }

    /// Filters each cohort down to its home-page records independently.
    pub fn home_pages(&self) -> HomePages<'a> {
        HomePages {
            www: home_pages_of(&self.www),
            nci: home_pages_of(&self.nci),
            other: home_pages_of(&self.federal),
        }
    }
}

fn home_pages_of<'a>(cohort: &[&'a ScanRecord]) -> Vec<&'a ScanRecord> {
    cohort
        .iter()
        .copied()
        .filter(|r| r.is_home_page())
        .collect()
}

/// The three home-page cohorts every metric is evaluated over.
pub struct HomePages<'a> {
    pub www: Vec<&'a ScanRecord>,
    pub nci: Vec<&'a ScanRecord>,
    pub other: Vec<&'a ScanRecord>,
}

impl HomePages<'_> {
    /// A snapshot must contain exactly one www home-page record; any
    /// other count is a broken export and the run aborts.
    pub fn require_single_www(&self) -> Result<(), ReportError> {
        if self.www.len() == 1 {
            Ok(())
        } else {
            Err(ReportError::WwwHomeCardinality(self.www.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(website: &str, redirects: Option<&str>) -> ScanRecord {
        ScanRecord {
            final_url_website: Some(website.to_string()),
            target_url_redirects: redirects.map(str::to_string),
            ..Default::default()
        }
    }

    fn sample_snapshot() -> Vec<ScanRecord> {
        vec![
            record("www.cancer.gov", None),
            record("dceg.cancer.gov", None),
            record("smokefree.gov", Some("https://smokefree.gov/es")),
            record("www.usda.gov", None),
            record("prevention.nih.gov", None),
            ScanRecord::default(), // no website recorded at all
        ]
    }

    #[test]
    fn test_partition_by_preserves_order() {
        let records = sample_snapshot();
        let (matches, rest) = partition_by(&records, |r| {
            r.final_url_website
                .as_deref()
                .is_some_and(|s| s.ends_with(".gov"))
        });
        assert_eq!(matches.len() + rest.len(), records.len());
        assert_eq!(
            matches[0].final_url_website.as_deref(),
            Some("www.cancer.gov")
        );
        assert_eq!(
            matches[1].final_url_website.as_deref(),
            Some("dceg.cancer.gov")
        );
    }

    #[test]
    fn test_split_is_exhaustive_and_disjoint() {
        let records = sample_snapshot();
        let cohorts = Cohorts::split(&records);

        assert_eq!(
            cohorts.www.len() + cohorts.nci.len() + cohorts.federal.len(),
            records.len()
        );
        assert_eq!(cohorts.www.len(), 1);
        // dceg.cancer.gov + smokefree.gov apex
        assert_eq!(cohorts.nci.len(), 2);
        // usda, prevention.nih.gov (nih.gov but not nci.nih.gov), no-website
        assert_eq!(cohorts.federal.len(), 3);
    }

    #[test]
    fn test_nci_pattern_requires_subdomain_boundary() {
        // "notncifcrf.gov" must not match "*.ncifcrf.gov"
        let outside = record("notncifcrf.gov", None);
        assert!(!is_nci_website(&outside));

        let inside = record("visitor.ncifcrf.gov", None);
        assert!(is_nci_website(&inside));

        let apex = record("nci.nih.gov", None);
        assert!(is_nci_website(&apex));
    }

    #[test]
    fn test_home_page_filter_is_idempotent() {
        let records = sample_snapshot();
        let cohorts = Cohorts::split(&records);

        let once = home_pages_of(&cohorts.nci);
        let twice = home_pages_of(&once);
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(&twice) {
            assert!(std::ptr::eq(*a, *b));
        }
    }

    #[test]
    fn test_home_pages_drop_redirected_records() {
        let records = sample_snapshot();
        let pages = Cohorts::split(&records).home_pages();

        assert_eq!(pages.www.len(), 1);
        assert_eq!(pages.nci.len(), 1); // smokefree.gov redirected away
        assert_eq!(pages.other.len(), 3);
    }

    #[test]
    fn test_require_single_www_accepts_one() {
        let records = sample_snapshot();
        let pages = Cohorts::split(&records).home_pages();
        assert!(pages.require_single_www().is_ok());
    }

    #[test]
    fn test_require_single_www_rejects_duplicates() {
        let records = vec![
            record("www.cancer.gov", None),
            record("www.cancer.gov", None),
        ];
        let pages = Cohorts::split(&records).home_pages();
        let err = pages.require_single_www().unwrap_err();
        assert!(matches!(err, ReportError::WwwHomeCardinality(2)));
    }

    #[test]
    fn test_require_single_www_rejects_missing() {
        let records = vec![record("www.usda.gov", None)];
        let pages = Cohorts::split(&records).home_pages();
        let err = pages.require_single_www().unwrap_err();
        assert!(matches!(err, ReportError::WwwHomeCardinality(0)));
    }
}
