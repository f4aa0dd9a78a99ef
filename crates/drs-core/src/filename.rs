//! # Receipt Filename Derivation
//!
//! The download endpoint names the file via a `content-disposition` header:
//!
//! ```text
//! content-disposition: attachment; filename="Receipt-RCPT-20241215-4821.pdf"
//! ```
//!
//! When the header (or its `filename=` segment) is absent, the name falls
//! back to a deterministic one derived from the receipt number.

/// Extracts the `filename=` segment from a `content-disposition` header
/// value, with surrounding quotes stripped.
///
/// Returns `None` when the segment is absent or empty.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let (_, rest) = header.split_once("filename=")?;

    // Cut at the next parameter separator, then strip quotes/whitespace.
    let raw = rest.split(';').next().unwrap_or(rest).trim();
    let name = raw.trim_matches('"').trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Deterministic fallback name used when the service supplies none.
pub fn fallback_filename(receipt_number: &str) -> String {
    format!("Receipt-{}.pdf", receipt_number)
}

/// Derives the filename for a saved receipt.
///
/// ## Rules
/// - Header `filename=` segment used verbatim (quotes stripped) when present
/// - Otherwise `Receipt-{receiptNumber}.pdf`
pub fn receipt_filename(disposition: Option<&str>, receipt_number: &str) -> String {
    disposition
        .and_then(filename_from_disposition)
        .unwrap_or_else(|| fallback_filename(receipt_number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_filename_used_verbatim() {
        assert_eq!(
            receipt_filename(Some(r#"attachment; filename="Receipt-42.pdf""#), "7"),
            "Receipt-42.pdf"
        );
    }

    #[test]
    fn test_unquoted_filename() {
        assert_eq!(
            filename_from_disposition("attachment; filename=Receipt-42.pdf"),
            Some("Receipt-42.pdf".to_string())
        );
    }

    #[test]
    fn test_inline_disposition() {
        // The preview endpoint sends `inline`; the segment is still honored.
        assert_eq!(
            filename_from_disposition(r#"inline; filename="Receipt-RCPT-20241215-4821.pdf""#),
            Some("Receipt-RCPT-20241215-4821.pdf".to_string())
        );
    }

    #[test]
    fn test_trailing_parameters_are_ignored() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="a.pdf"; size=123"#),
            Some("a.pdf".to_string())
        );
    }

    #[test]
    fn test_missing_header_falls_back_to_receipt_number() {
        assert_eq!(receipt_filename(None, "7"), "Receipt-7.pdf");
    }

    #[test]
    fn test_missing_segment_falls_back() {
        assert_eq!(receipt_filename(Some("attachment"), "7"), "Receipt-7.pdf");
        assert_eq!(
            receipt_filename(Some(r#"attachment; filename="""#), "7"),
            "Receipt-7.pdf"
        );
    }
}
