//! Document-number format validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ServiceError, ServiceResult};

static DOCUMENT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{11}$").expect("document number pattern is valid"));

/// Validate a document number: present, non-empty, exactly 11 ASCII digits.
///
/// The same rule applies whatever the declared document type is.
pub fn validate_document_number(number: Option<&str>) -> ServiceResult<()> {
    let number = match number {
        Some(n) if !n.is_empty() => n,
        _ => {
            return Err(ServiceError::validation(
                "national identifier must not be empty",
            ));
        }
    };

    if !DOCUMENT_NUMBER.is_match(number) {
        return Err(ServiceError::validation(
            "invalid national identifier format: must contain exactly 11 digits",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_eleven_digits() {
        assert!(validate_document_number(Some("02886612901")).is_ok());
    }

    #[test]
    fn rejects_absent_and_empty() {
        for input in [None, Some("")] {
            match validate_document_number(input) {
                Err(ServiceError::Validation(msg)) => assert!(msg.contains("must not be empty")),
                other => panic!("Expected Validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_wrong_length_and_punctuation() {
        for input in ["0288661290", "028866129011", "028.866.129-01", "0288661290a", " 2886612901"] {
            match validate_document_number(Some(input)) {
                Err(ServiceError::Validation(msg)) => assert!(msg.contains("exactly 11 digits")),
                other => panic!("Expected Validation error for {input:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_non_ascii_digits() {
        // Arabic-Indic digits are Unicode digits but not ASCII.
        assert!(validate_document_number(Some("٠١٢٣٤٥٦٧٨٩٠")).is_err());
    }

    proptest! {
        #[test]
        fn any_eleven_ascii_digits_pass(s in "[0-9]{11}") {
            prop_assert!(validate_document_number(Some(&s)).is_ok());
        }

        #[test]
        fn other_lengths_fail(s in "[0-9]{0,10}|[0-9]{12,20}") {
            prop_assert!(validate_document_number(Some(&s)).is_err());
        }
    }
}
