use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationErrors;

use crate::shared::types::FieldError;

lazy_static! {
    /// Regex for validating integer form fields sent as text
    /// - Valid: "3", "42", "-1", "+3", "0"
    /// - Invalid: "", "3.5", "abc", "1e3", " 3", "007"
    pub static ref INTEGER_REGEX: Regex = Regex::new(r"^[-+]?(0|[1-9][0-9]*)$").unwrap();
}

/// Flatten `validator` output into the field/message pairs returned to clients.
///
/// Sorted by field name so responses are stable.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut result: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", e.code));
                FieldError::new(field.clone(), message)
            })
        })
        .collect();

    result.sort_by(|a, b| a.field.cmp(&b.field));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_integer_regex_valid() {
        assert!(INTEGER_REGEX.is_match("3"));
        assert!(INTEGER_REGEX.is_match("42"));
        assert!(INTEGER_REGEX.is_match("-1"));
        assert!(INTEGER_REGEX.is_match("+3"));
        assert!(INTEGER_REGEX.is_match("0"));
    }

    #[test]
    fn test_integer_regex_invalid() {
        assert!(!INTEGER_REGEX.is_match("")); // empty
        assert!(!INTEGER_REGEX.is_match("3.5")); // decimal
        assert!(!INTEGER_REGEX.is_match("abc")); // letters
        assert!(!INTEGER_REGEX.is_match("1e3")); // exponent
        assert!(!INTEGER_REGEX.is_match(" 3")); // leading space
        assert!(!INTEGER_REGEX.is_match("-")); // sign only
        assert!(!INTEGER_REGEX.is_match("007")); // leading zeros
        assert!(!INTEGER_REGEX.is_match("+-3")); // two signs
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(length(min = 1))]
        alias: String,
    }

    #[test]
    fn test_field_errors_uses_message_or_code() {
        let sample = Sample {
            name: String::new(),
            alias: String::new(),
        };
        let errors = sample.validate().unwrap_err();

        let fields = field_errors(&errors);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field, "alias");
        assert_eq!(fields[0].message, "Invalid value (length)");
        assert_eq!(fields[1], FieldError::new("name", "name is required"));
    }
}
