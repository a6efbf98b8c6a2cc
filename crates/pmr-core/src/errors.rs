//! Cross-cutting error types.
//!
//! Domain-specific errors (`SessionError`, `StoreError`, `PubMedError`, ...)
//! live in their own crates. Settings validation errors live here because
//! every crate that touches settings needs to report them.

use std::fmt;

use thiserror::Error;

/// One broken settings rule, naming the field and the rule it broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub field: String,
    pub rule: String,
}

impl ConstraintViolation {
    pub fn new(field: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.rule)
    }
}

/// Every violation found in one validation pass.
///
/// Validation never stops at the first failure; combined settings report
/// simple-tier and advanced-tier violations together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("constraint violation: {}", join_violations(.0))]
pub struct ConstraintViolations(pub Vec<ConstraintViolation>);

fn join_violations(violations: &[ConstraintViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConstraintViolations {
    /// Violations for a given field name.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ConstraintViolation> {
        self.0.iter().filter(move |v| v.field == field)
    }

    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.for_field(field).next().is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(())` when nothing was collected.
    ///
    /// # Errors
    ///
    /// Returns `self` if at least one violation was collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Errors that can be raised by any pmr crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Settings failed validation.
    #[error(transparent)]
    Constraint(#[from] ConstraintViolations),

    /// A value could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
