//! Contact form validation, done before any network call.

use regex::Regex;
use std::sync::LazyLock;

use crate::selection::{Notice, NoticeLevel};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactCheck {
    /// Inputs are usable; values are trimmed.
    Ready { name: String, email: String },
    /// Nothing to submit. Carries the notice to show instead.
    Rejected(Notice),
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_contact(name: &str, email: &str) -> ContactCheck {
    let name = name.trim();
    let email = email.trim();

    if email.is_empty() {
        let notice = if name.is_empty() {
            Notice::new(
                NoticeLevel::Info,
                "Leave your name and email if you would like updates on new notes.",
            )
        } else {
            Notice::new(NoticeLevel::Warning, "Please enter your email address.")
        };
        return ContactCheck::Rejected(notice);
    }

    if !is_valid_email(email) {
        return ContactCheck::Rejected(Notice::new(
            NoticeLevel::Warning,
            format!("'{}' does not look like a valid email address.", email),
        ));
    }

    ContactCheck::Ready {
        name: name.to_string(),
        email: email.to_string(),
    }
}
