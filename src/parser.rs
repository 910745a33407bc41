//! JSON parser for Site Scanning snapshot exports.

use crate::errors::ReportError;
use crate::record::ScanRecord;

/// Decodes a snapshot document: a JSON array with one object per scanned
/// URL.
///
/// # Errors
///
/// Returns [`ReportError::Load`] if the bytes are not a valid JSON array
/// of records.
pub fn parse_snapshot(bytes: &[u8]) -> Result<Vec<ScanRecord>, ReportError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_array() {
        let records = parse_snapshot(b"[]").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_minimal_records() {
        let records = parse_snapshot(
            br#"[
                {"final_url_website": "www.cancer.gov"},
                {"final_url_website": "dceg.cancer.gov", "dap": true}
            ]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].dap, Some(true));
    }

    #[test]
    fn test_parse_invalid_bytes() {
        let result = parse_snapshot(b"not json at all");
        assert!(matches!(result, Err(ReportError::Load(_))));
    }

    #[test]
    fn test_parse_object_instead_of_array() {
        let result = parse_snapshot(br#"{"final_url_website": "www.cancer.gov"}"#);
        assert!(result.is_err());
    }
}
