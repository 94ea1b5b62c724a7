//! Small helpers shared by the diesel repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `ILIKE` pattern matching `needle` anywhere, with LIKE wildcards escaped.
pub fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Name of the violated unique constraint, if `err` is a unique violation.
pub fn unique_violation(err: &DieselError) -> Option<String> {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => Some(
            info.constraint_name()
                .unwrap_or_default()
                .to_string(),
        ),
        _ => None,
    }
}
