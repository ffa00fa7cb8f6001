//! Field-level validation shared by every `New*` input struct.
//!
//! Checks never short-circuit: each one appends to a [`ValidationErrors`]
//! so a caller sees every violation for an entity in one pass.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;

#[allow(clippy::expect_used)]
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));
#[allow(clippy::expect_used)]
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 ().\-]{5,19}$").expect("valid phone regex"));

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name as exposed on the input struct
    pub field: &'static str,
    /// Human-readable reason
    pub message: String,
}

/// Ordered collection of field violations for one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Starts an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Records a violation.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Fails when the value is absent or blank.
    pub fn require(&mut self, field: &'static str, value: Option<&str>) -> &mut Self {
        if value.is_none_or(|v| v.trim().is_empty()) {
            self.push(field, format!("{field} is required"));
        }
        self
    }

    /// Fails when the value is longer than `max` characters. Absent values pass.
    pub fn max_len(&mut self, field: &'static str, value: Option<&str>, max: usize) -> &mut Self {
        if let Some(v) = value {
            let len = v.chars().count();
            if len > max {
                self.push(
                    field,
                    format!("{field} must be at most {max} characters (got {len})"),
                );
            }
        }
        self
    }

    /// Fails when a present value is not a plausible email address.
    pub fn email(&mut self, field: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value.filter(|v| !v.is_empty())
            && !EMAIL_RE.is_match(v)
        {
            self.push(field, format!("{field} is not a valid email address"));
        }
        self
    }

    /// Fails when a present value is not a plausible phone number.
    pub fn phone(&mut self, field: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value.filter(|v| !v.is_empty())
            && !PHONE_RE.is_match(v)
        {
            self.push(field, format!("{field} is not a valid phone number"));
        }
        self
    }

    /// Fails when a present value is not one of `allowed` (exact match).
    pub fn one_of(
        &mut self,
        field: &'static str,
        value: Option<&str>,
        allowed: &[&str],
    ) -> &mut Self {
        if let Some(v) = value
            && !allowed.contains(&v)
        {
            self.push(
                field,
                format!("{field} must be one of {}", allowed.join(", ")),
            );
        }
        self
    }

    /// Transactional amounts must be strictly greater than zero.
    pub fn positive_amount(&mut self, field: &'static str, value: Decimal) -> &mut Self {
        if value <= Decimal::ZERO {
            self.push(field, format!("{field} must be greater than 0"));
        }
        self
    }

    /// Costs and fees may be zero but never negative. Absent values pass.
    pub fn non_negative(&mut self, field: &'static str, value: Option<Decimal>) -> &mut Self {
        if let Some(v) = value
            && v < Decimal::ZERO
        {
            self.push(field, format!("{field} must not be negative"));
        }
        self
    }

    /// Required foreign keys must carry a positive identifier.
    pub fn positive_id(&mut self, field: &'static str, value: i64) -> &mut Self {
        if value <= 0 {
            self.push(field, format!("{field} must be a positive identifier"));
        }
        self
    }

    /// Counts must be at least `min`.
    pub fn min_count(&mut self, field: &'static str, value: i32, min: i32) -> &mut Self {
        if value < min {
            self.push(field, format!("{field} must be at least {min}"));
        }
        self
    }

    /// True when no violation was recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Recorded violations in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// True when at least one violation names `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when empty, otherwise the collected violations as an error.
    pub fn into_result(self) -> crate::errors::Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}
