//! The snapshot record type and field-presence helpers.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One scanned URL's metrics from a Site Scanning snapshot.
///
/// Every field is optional; the snapshot export routinely omits fields or
/// carries explicit nulls. Unknown fields are ignored so the struct only
/// names what the report reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScanRecord {
    pub target_url: Option<String>,
    pub final_url_website: Option<String>,
    pub final_url_domain: Option<String>,
    /// Redirect target recorded for this URL. Absent or null means the
    /// record is a canonical home-page entry.
    pub target_url_redirects: Option<String>,

    #[serde(deserialize_with = "lenient_f64")]
    pub cumulative_layout_shift: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub largest_contentful_paint: Option<f64>,
    #[serde(deserialize_with = "lenient_u32")]
    pub third_party_service_count: Option<u32>,

    pub sitemap_xml_detected: Option<bool>,
    pub robots_txt_detected: Option<bool>,
    pub viewport_meta_tag: Option<bool>,
    pub site_search: Option<bool>,
    pub dap: Option<bool>,
    pub search_dot_gov: Option<bool>,
    pub ipv6: Option<bool>,

    pub title: Option<String>,
    pub description: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub canonical_link: Option<String>,

    pub dap_parameters: Option<DapParameters>,
    pub third_party_service_domains: Option<Vec<String>>,

    pub required_links_url: Option<Vec<String>>,
    pub required_links_text: Option<Vec<String>>,
}

/// The `agency`/`subagency` pair reported by the Digital Analytics Program
/// tag, when one was detected on the page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DapParameters {
    pub agency: Option<String>,
    pub subagency: Option<String>,
}

impl ScanRecord {
    /// A record with no recorded redirect target is a home-page entry,
    /// even when the final URL differs from the target through same-domain
    /// redirection.
    pub fn is_home_page(&self) -> bool {
        self.target_url_redirects.is_none()
    }
}

/// Three-valued presence check for text fields: absent, null, and blank
/// are all "missing"; only a non-blank string counts as a value.
pub fn has_value(field: Option<&str>) -> bool {
    field.is_some_and(|s| !s.trim().is_empty())
}

/// Accepts a JSON number, a numeric string, or null. Anything else is
/// treated as missing rather than failing the whole snapshot.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_f64(value))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_f64(value).map(|n| n as u32))
}

fn coerce_f64(value: Option<Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}
