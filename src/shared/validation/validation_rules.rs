use std::ops::RangeInclusive;

use chrono::{Datelike, Utc};
use regex::Regex;

use super::validation_result::ValidationResult;
use crate::modules::users::domain::value_objects::UserRole;
use crate::shared::errors::{AppError, AppResult};

/// Limits and patterns enforced on incoming writes.
///
/// Kept as plain data so tests and deployments can tighten or relax them
/// without touching the checks themselves.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    pub score_range: RangeInclusive<i32>,
    pub username_pattern: String,
    pub username_max_length: usize,
    pub reserved_usernames: Vec<String>,
    pub email_max_length: usize,
    pub person_name_max_length: usize,
    pub name_max_length: usize,
    pub slug_pattern: String,
    pub slug_max_length: usize,
    pub default_role: UserRole,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            score_range: 1..=10,
            username_pattern: r"^[\w.@+-]+$".to_string(),
            username_max_length: 150,
            reserved_usernames: vec!["me".to_string()],
            email_max_length: 254,
            person_name_max_length: 150,
            name_max_length: 256,
            slug_pattern: r"^[-a-zA-Z0-9_]+$".to_string(),
            slug_max_length: 50,
            default_role: UserRole::User,
        }
    }
}

pub struct Validator {
    rules: ValidationRules,
    username_re: Regex,
    slug_re: Regex,
    email_re: Regex,
}

impl Validator {
    pub fn new(rules: ValidationRules) -> AppResult<Self> {
        let username_re = Regex::new(&rules.username_pattern)
            .map_err(|e| AppError::ConfigError(format!("Invalid username pattern: {}", e)))?;
        let slug_re = Regex::new(&rules.slug_pattern)
            .map_err(|e| AppError::ConfigError(format!("Invalid slug pattern: {}", e)))?;
        let email_re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .map_err(|e| AppError::ConfigError(format!("Invalid email pattern: {}", e)))?;

        Ok(Self {
            rules,
            username_re,
            slug_re,
            email_re,
        })
    }

    pub fn default_role(&self) -> UserRole {
        self.rules.default_role
    }

    pub fn validate_score(&self, score: i32) -> ValidationResult {
        if self.rules.score_range.contains(&score) {
            return ValidationResult::valid();
        }
        ValidationResult::invalid(
            "score",
            format!(
                "Score must be between {} and {}",
                self.rules.score_range.start(),
                self.rules.score_range.end()
            ),
        )
    }

    pub fn validate_year(&self, year: i32) -> ValidationResult {
        self.validate_year_against(year, Utc::now().year())
    }

    pub fn validate_year_against(&self, year: i32, current_year: i32) -> ValidationResult {
        if year > current_year {
            return ValidationResult::invalid(
                "year",
                "Release year cannot be later than the current year",
            );
        }
        ValidationResult::valid()
    }

    pub fn validate_username(&self, username: &str) -> ValidationResult {
        let mut result = ValidationResult::valid();

        if username.is_empty() {
            result.add_error("username", "This field may not be blank");
            return result;
        }
        if username.chars().count() > self.rules.username_max_length {
            result.add_error(
                "username",
                format!(
                    "Ensure this field has no more than {} characters",
                    self.rules.username_max_length
                ),
            );
        }
        if !self.username_re.is_match(username) {
            result.add_error(
                "username",
                "Username may contain only letters, digits and @/./+/-/_ characters",
            );
        }
        if self.is_reserved_username(username) {
            result.add_error("username", format!("Username '{}' is reserved", username));
        }

        result
    }

    pub fn is_reserved_username(&self, username: &str) -> bool {
        self.rules
            .reserved_usernames
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(username))
    }

    pub fn validate_email(&self, email: &str) -> ValidationResult {
        if email.is_empty() {
            return ValidationResult::invalid("email", "This field may not be blank");
        }
        if email.chars().count() > self.rules.email_max_length {
            return ValidationResult::invalid(
                "email",
                format!(
                    "Ensure this field has no more than {} characters",
                    self.rules.email_max_length
                ),
            );
        }
        if !self.email_re.is_match(email) {
            return ValidationResult::invalid("email", "Enter a valid email address");
        }
        ValidationResult::valid()
    }

    pub fn validate_person_name(&self, field: &str, value: &str) -> ValidationResult {
        self.check_length(field, value, self.rules.person_name_max_length)
    }

    /// Display name of a title, category or genre.
    pub fn validate_name(&self, name: &str) -> ValidationResult {
        if name.trim().is_empty() {
            return ValidationResult::invalid("name", "This field may not be blank");
        }
        self.check_length("name", name, self.rules.name_max_length)
    }

    pub fn validate_slug(&self, slug: &str) -> ValidationResult {
        if slug.is_empty() {
            return ValidationResult::invalid("slug", "This field may not be blank");
        }
        let mut result = self.check_length("slug", slug, self.rules.slug_max_length);
        if !self.slug_re.is_match(slug) {
            result.add_error(
                "slug",
                "Enter a valid slug consisting of letters, numbers, underscores or hyphens",
            );
        }
        result
    }

    pub fn validate_text(&self, text: &str) -> ValidationResult {
        if text.trim().is_empty() {
            return ValidationResult::invalid("text", "This field may not be blank");
        }
        ValidationResult::valid()
    }

    fn check_length(&self, field: &str, value: &str, max: usize) -> ValidationResult {
        if value.chars().count() > max {
            return ValidationResult::invalid(
                field,
                format!("Ensure this field has no more than {} characters", max),
            );
        }
        ValidationResult::valid()
    }
}
