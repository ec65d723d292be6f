//! Field-level checks shared by every form on the site.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Same loose shape the site has always accepted: something, an @, something.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+$").expect("email pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    Required,
    InvalidEmail,
    InvalidPhone,
    MustAccept,
    /// Well-formed but rejected, e.g. a one-time code that doesn't match.
    Invalid,
}

/// Per-field errors in field order, so inline messages render predictably.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    errors: BTreeMap<F, ValidationError>,
}

impl<F: Ord + Copy> FieldErrors<F> {
    pub fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, field: F, error: ValidationError) {
        self.errors.insert(field, error);
    }

    /// Records the first failing check for `field`, if any.
    pub fn check(&mut self, field: F, result: Result<(), ValidationError>) {
        if let Err(error) = result {
            self.errors.entry(field).or_insert(error);
        }
    }

    pub fn get(&self, field: F) -> Option<ValidationError> {
        self.errors.get(&field).copied()
    }

    pub fn contains(&self, field: F) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.errors.keys().copied()
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl<F: Ord + Copy> Default for FieldErrors<F> {
    fn default() -> Self {
        Self::new()
    }
}

pub fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required)
    } else {
        Ok(())
    }
}

pub fn email(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    if EMAIL_PATTERN.is_match(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Mobile number: 10 to 13 digits once spaces, dashes and a leading `+` are dropped.
pub fn phone(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    let trimmed = value.trim();
    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let mut digits = 0;
    for c in rest.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' => {}
            _ => return Err(ValidationError::InvalidPhone),
        }
    }
    if (10..=13).contains(&digits) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

pub fn accepted(flag: bool) -> Result<(), ValidationError> {
    if flag {
        Ok(())
    } else {
        Err(ValidationError::MustAccept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank_and_whitespace() {
        assert_eq!(required(""), Err(ValidationError::Required));
        assert_eq!(required("   "), Err(ValidationError::Required));
        assert_eq!(required("Acme"), Ok(()));
    }

    #[test]
    fn email_accepts_the_loose_pattern() {
        assert_eq!(email("a@acme.test"), Ok(()));
        assert_eq!(email("x@y"), Ok(()));
        assert_eq!(email("no-at-sign"), Err(ValidationError::InvalidEmail));
        assert_eq!(email("two words@acme.test"), Err(ValidationError::InvalidEmail));
        assert_eq!(email(""), Err(ValidationError::Required));
    }

    #[test]
    fn phone_allows_common_separators() {
        assert_eq!(phone("9990001111"), Ok(()));
        assert_eq!(phone("+91 99900-01111"), Ok(()));
        assert_eq!(phone("12345"), Err(ValidationError::InvalidPhone));
        assert_eq!(phone("99900O1111"), Err(ValidationError::InvalidPhone));
        assert_eq!(phone(" "), Err(ValidationError::Required));
    }

    #[test]
    fn check_keeps_the_first_error_per_field() {
        let mut errors = FieldErrors::new();
        errors.check(1u8, Err(ValidationError::Required));
        errors.check(1u8, Err(ValidationError::InvalidEmail));
        errors.check(2u8, Ok(()));
        assert_eq!(errors.get(1), Some(ValidationError::Required));
        assert!(!errors.contains(2));
        assert_eq!(errors.len(), 1);
    }
}
