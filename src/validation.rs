//! Field validation producing `"<field> is <rule>"` messages.

use crate::error::ApiError;

/// Collects rule violations in the order fields are checked
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, field: &str, rule: &str) {
        self.errors.push(format!("{} is {}", field, rule));
    }

    /// Value must be present and non-blank
    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, "required");
        }
        self
    }

    /// Required, then a well-formed email address
    pub fn required_email(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, "required");
        } else if !is_valid_email(value) {
            self.fail(field, "email");
        }
        self
    }

    pub fn required_some<T>(&mut self, field: &str, value: &Option<T>) -> &mut Self {
        if value.is_none() {
            self.fail(field, "required");
        }
        self
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// `Ok` when no rule failed, otherwise the collected list as a 400
    pub fn finish(&mut self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_failed(std::mem::take(&mut self.errors)))
        }
    }
}

/// Basic structural email check: one `@`, non-empty local part, and a dotted
/// domain without empty labels or whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    if local.is_empty() || domain.is_empty() {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
