//! Body and query validation.
//!
//! Problems are collected per field path so one request reports every
//! invalid field at once, as the real API does.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use serverest_core::Email;
use serverest_core::messages::field;

use super::error::ApiError;

/// Collects field messages for one request.
#[derive(Debug, Default)]
pub struct Validator {
    errors: BTreeMap<String, String>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `path`, keeping the first one per path.
    pub fn fail(&mut self, path: &str, message: String) {
        self.errors.entry(path.to_string()).or_insert(message);
    }

    /// Whether nothing failed so far.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Reject keys outside `allowed`.
    pub fn only(&mut self, object: &Map<String, Value>, allowed: &[&str]) {
        for key in object.keys() {
            if !allowed.contains(&key.as_str()) {
                self.fail(key, field::not_allowed(key));
            }
        }
    }

    /// Required non-blank string. Returns it when valid.
    pub fn string<'a>(&mut self, value: Option<&'a Value>, path: &str) -> Option<&'a str> {
        match value {
            None => self.fail(path, field::required(path)),
            Some(Value::String(s)) if s.trim().is_empty() => self.fail(path, field::blank(path)),
            Some(Value::String(s)) => return Some(s),
            Some(_) => self.fail(path, field::not_string(path)),
        }
        None
    }

    /// Required, well-formed email.
    pub fn email<'a>(&mut self, value: Option<&'a Value>, path: &str) -> Option<&'a str> {
        let email = self.string(value, path)?;
        if Email::parse(email).is_err() {
            self.fail(path, field::invalid_email(path));
            return None;
        }
        Some(email)
    }

    /// Required `"true"` / `"false"` flag.
    pub fn admin_flag<'a>(&mut self, value: Option<&'a Value>, path: &str) -> Option<&'a str> {
        match value {
            None => self.fail(path, field::required(path)),
            Some(Value::String(s)) if s.is_empty() => self.fail(path, field::blank(path)),
            Some(Value::String(s)) if s == "true" || s == "false" => return Some(s),
            Some(_) => self.fail(path, field::admin_flag(path)),
        }
        None
    }

    /// Required integer. `min` is the smallest accepted value (1 for
    /// positive quantities, 0 for stock).
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn integer(&mut self, value: Option<&Value>, path: &str, min: u64) -> Option<u64> {
        let Some(value) = value else {
            self.fail(path, field::required(path));
            return None;
        };
        let Some(number) = value.as_f64() else {
            self.fail(path, field::not_number(path));
            return None;
        };

        if number.fract() != 0.0 {
            self.fail(path, field::not_integer(path));
            return None;
        }

        if number < min as f64 {
            let message = if min > 0 {
                field::not_positive(path)
            } else {
                field::negative(path)
            };
            self.fail(path, message);
            return None;
        }

        Some(number as u64)
    }

    /// Query value that must parse as a number.
    pub fn numeric_param(&mut self, value: &str, path: &str) {
        if value.parse::<f64>().is_err() {
            self.fail(path, field::not_number(path));
        }
    }

    /// Query value that must be a well-formed email.
    pub fn email_param(&mut self, value: &str, path: &str) {
        if Email::parse(value).is_err() {
            self.fail(path, field::invalid_email(path));
        }
    }

    /// Query value that must be `"true"` or `"false"`.
    pub fn admin_flag_param(&mut self, value: &str, path: &str) {
        if value != "true" && value != "false" {
            self.fail(path, field::admin_flag(path));
        }
    }

    /// `Ok(())` when nothing failed, else the collected messages.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` with every failed path.
    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self.errors))
        }
    }
}

/// Parse a request body, treating anything but a JSON object as empty.
#[must_use]
pub fn body_object(bytes: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice(bytes) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
