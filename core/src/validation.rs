//! Checks for values that cross the shell boundary.

use thiserror::Error;

use crate::geometry::{Delta, Size};

pub const MAX_DELTA: i32 = 5000;
pub const MAX_DIMENSION: u32 = 10_000;
pub const MAX_DISPLAY_INDEX: usize = 10;
pub const MAX_STRING_LENGTH: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("window delta out of range: ({0}, {1})")]
    Delta(i32, i32),
    #[error("window dimensions out of range: {0}x{1}")]
    Dimensions(u32, u32),
    #[error("display index out of range: {0}")]
    DisplayIndex(usize),
    #[error("text exceeds {MAX_STRING_LENGTH} characters")]
    TooLong,
}

pub fn validate_delta(delta: Delta) -> Result<Delta, ValidationError> {
    let in_range = |v: i32| (-MAX_DELTA..=MAX_DELTA).contains(&v);
    if in_range(delta.delta_x) && in_range(delta.delta_y) {
        Ok(delta)
    } else {
        Err(ValidationError::Delta(delta.delta_x, delta.delta_y))
    }
}

pub fn validate_dimensions(size: Size) -> Result<Size, ValidationError> {
    let in_range = |v: u32| (1..=MAX_DIMENSION).contains(&v);
    if in_range(size.width) && in_range(size.height) {
        Ok(size)
    } else {
        Err(ValidationError::Dimensions(size.width, size.height))
    }
}

pub fn validate_display_index(index: usize) -> Result<usize, ValidationError> {
    if index <= MAX_DISPLAY_INDEX {
        Ok(index)
    } else {
        Err(ValidationError::DisplayIndex(index))
    }
}

/// Strip control characters, rejecting oversized input.
pub fn sanitize_string(input: &str) -> Result<String, ValidationError> {
    sanitize_keeping(input, |_| false)
}

/// Like [`sanitize_string`], but line breaks and tabs survive.
pub fn sanitize_multiline(input: &str) -> Result<String, ValidationError> {
    sanitize_keeping(input, |c| c == '\n' || c == '\t')
}

fn sanitize_keeping(input: &str, keep: impl Fn(char) -> bool) -> Result<String, ValidationError> {
    if input.chars().count() > MAX_STRING_LENGTH {
        return Err(ValidationError::TooLong);
    }
    Ok(input
        .chars()
        .filter(|&c| !c.is_control() || keep(c))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_bounds() {
        assert!(validate_delta(Delta::new(5000, -5000)).is_ok());
        assert_eq!(
            validate_delta(Delta::new(5001, 0)),
            Err(ValidationError::Delta(5001, 0))
        );
    }

    #[test]
    fn test_dimension_bounds() {
        assert!(validate_dimensions(Size::new(1, 10_000)).is_ok());
        assert!(validate_dimensions(Size::new(0, 100)).is_err());
        assert!(validate_dimensions(Size::new(100, 10_001)).is_err());
    }

    #[test]
    fn test_display_index_bounds() {
        assert_eq!(validate_display_index(10), Ok(10));
        assert!(validate_display_index(11).is_err());
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_string("a\u{0}b\u{7f}c\td").unwrap(), "abcd");
        assert_eq!(sanitize_string("héllo").unwrap(), "héllo");
        let long = "x".repeat(MAX_STRING_LENGTH + 1);
        assert_eq!(sanitize_string(&long), Err(ValidationError::TooLong));
    }

    #[test]
    fn test_multiline_keeps_line_breaks() {
        assert_eq!(
            sanitize_multiline("line one\r\n\tline two\u{7}").unwrap(),
            "line one\n\tline two"
        );
        let long = "\n".repeat(MAX_STRING_LENGTH + 1);
        assert_eq!(sanitize_multiline(&long), Err(ValidationError::TooLong));
    }
}
