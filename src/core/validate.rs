use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Permissive `local@domain.tld` shape, not RFC-5322-exact.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Field name to a user-displayable message. Empty means the form is valid;
/// absence of a key means that field is valid.
pub type FieldErrors = HashMap<&'static str, String>;

pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn valid_password(password: &str) -> bool {
    password.len() >= 6
}

pub fn valid_name(name: &str) -> bool {
    name.trim().chars().count() >= 2
}

pub fn validate_login(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if email.trim().is_empty() {
        errors.insert("email", "Email is required".to_string());
    } else if !valid_email(email) {
        errors.insert("email", "Please enter a valid email address".to_string());
    }

    if password.is_empty() {
        errors.insert("password", "Password is required".to_string());
    }

    errors
}

pub fn validate_signup(name: &str, email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if name.trim().is_empty() {
        errors.insert("name", "Name is required".to_string());
    } else if !valid_name(name) {
        errors.insert("name", "Name must be at least 2 characters".to_string());
    }

    if email.trim().is_empty() {
        errors.insert("email", "Email is required".to_string());
    } else if !valid_email(email) {
        errors.insert("email", "Please enter a valid email address".to_string());
    }

    if password.is_empty() {
        errors.insert("password", "Password is required".to_string());
    } else if !valid_password(password) {
        errors.insert("password", "Password must be at least 6 characters".to_string());
    }

    errors
}

pub fn validate_note(title: &str, content: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if title.trim().is_empty() {
        errors.insert("title", "Title is required".to_string());
    }

    if content.trim().is_empty() {
        errors.insert("content", "Content is required".to_string());
    }

    errors
}
