//! Declarative request validation.
//!
//! Request types implement [`Validate`] by checking each field against the
//! [`rules`] in declaration order. Per field, only the first failing rule is
//! reported; all failing fields are aggregated into one message of the form
//! `"<field> is <rule>, <field> is <rule>"`. Validation runs after binding
//! and before the operation is invoked, so operations never see invalid
//! payloads.

use thiserror::Error;

/// A payload that knows how to validate itself.
///
/// Types with no constraints implement this with a bare `Ok(())`.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Aggregated validation failure. Display is the full wire message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Collects `(field, failed rule)` pairs in the order they are checked.
#[derive(Debug, Default)]
pub struct FieldErrors {
    failures: Vec<(&'static str, &'static str)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a rule chain for one field.
    ///
    /// Chain rules with `Option::or_else` so the first failure wins:
    /// `errors.check("name", required_str(v).or_else(|| min_len(v, 2)))`.
    pub fn check(&mut self, field: &'static str, outcome: Option<&'static str>) {
        if let Some(rule) = outcome {
            self.failures.push((field, rule));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.failures.is_empty() {
            return Ok(());
        }
        let message = self
            .failures
            .iter()
            .map(|(field, rule)| format!("{field} is {rule}"))
            .collect::<Vec<_>>()
            .join(", ");
        Err(ValidationError(message))
    }
}

/// Field-level rules. Each returns the rule's name when the value fails it.
///
/// `required` treats the type's zero value as absent: the empty string for
/// text, zero for integers. Length rules count characters, not bytes.
pub mod rules {
    use lazy_regex::regex_is_match;

    pub fn required_str(value: &str) -> Option<&'static str> {
        value.is_empty().then_some("required")
    }

    pub fn required_i32(value: i32) -> Option<&'static str> {
        (value == 0).then_some("required")
    }

    pub fn min_i32(value: i32, min: i32) -> Option<&'static str> {
        (value < min).then_some("min")
    }

    pub fn max_i32(value: i32, max: i32) -> Option<&'static str> {
        (value > max).then_some("max")
    }

    pub fn min_len(value: &str, min: usize) -> Option<&'static str> {
        (value.chars().count() < min).then_some("min")
    }

    pub fn max_len(value: &str, max: usize) -> Option<&'static str> {
        (value.chars().count() > max).then_some("max")
    }

    pub fn email(value: &str) -> Option<&'static str> {
        let well_formed = regex_is_match!(r"^[^@\s]+@[^@\s]+\.[^@\s]+$", value);
        (!well_formed).then_some("email")
    }
}
