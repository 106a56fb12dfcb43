//! Ordered input validation
//!
//! A form is checked against a fixed list of named rules. Only the first
//! violated rule is reported, so the message a user sees is reproducible.

use crate::error::ValidationError;

/// A named predicate over a form input
pub struct Rule<T: ?Sized> {
    /// Stable rule name, used in logs and tests
    pub name: &'static str,
    /// Message shown when the rule is violated
    pub message: &'static str,
    /// Returns true when the input satisfies the rule
    pub check: fn(&T) -> bool,
}

impl<T: ?Sized> Rule<T> {
    fn violation(&self) -> ValidationError {
        ValidationError {
            rule: self.name,
            message: self.message.to_string(),
        }
    }
}

/// Check `input` against `rules` in order and report the first violation
pub fn first_violation<T: ?Sized>(rules: &[Rule<T>], input: &T) -> Result<(), ValidationError> {
    match rules.iter().find(|rule| !(rule.check)(input)) {
        Some(rule) => {
            tracing::debug!("Validation rule `{}` failed", rule.name);
            Err(rule.violation())
        }
        None => Ok(()),
    }
}

/// True when the text has at least one non-whitespace character
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}
