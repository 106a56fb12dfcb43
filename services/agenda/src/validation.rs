//! Input validation rules
//!
//! Each form has one ordered rule list; the first violated rule wins.

use common::validation::{Rule, is_present};

use crate::form::EventForm;
use crate::models::{LoginCredentials, Registration};

/// Minimum password length, in UTF-16 code units
pub const MIN_PASSWORD_LENGTH: usize = 6;

fn registration_fields_present(r: &Registration) -> bool {
    is_present(&r.name)
        && is_present(&r.email)
        && is_present(&r.password)
        && r.confirm_password.as_deref().is_none_or(is_present)
}

fn registration_email_format(r: &Registration) -> bool {
    r.email.contains('@') && r.email.contains('.')
}

// Counted like the mobile app counts string length
fn registration_password_length(r: &Registration) -> bool {
    r.password.encode_utf16().count() >= MIN_PASSWORD_LENGTH
}

fn registration_passwords_match(r: &Registration) -> bool {
    r.confirm_password
        .as_deref()
        .is_none_or(|confirm| confirm == r.password)
}

/// Registration rules, in reporting order
pub const REGISTRATION_RULES: &[Rule<Registration>] = &[
    Rule {
        name: "fields_present",
        message: "Please fill in all fields",
        check: registration_fields_present,
    },
    Rule {
        name: "email_format",
        message: "Please enter a valid email",
        check: registration_email_format,
    },
    Rule {
        name: "password_length",
        message: "Password must be at least 6 characters long",
        check: registration_password_length,
    },
    Rule {
        name: "passwords_match",
        message: "Passwords do not match",
        check: registration_passwords_match,
    },
];

fn login_fields_present(c: &LoginCredentials) -> bool {
    is_present(&c.email) && is_present(&c.password)
}

fn login_email_format(c: &LoginCredentials) -> bool {
    c.email.contains('@')
}

/// Login rules, in reporting order
pub const LOGIN_RULES: &[Rule<LoginCredentials>] = &[
    Rule {
        name: "fields_present",
        message: "Please fill in all fields",
        check: login_fields_present,
    },
    Rule {
        name: "email_format",
        message: "Please enter a valid email",
        check: login_email_format,
    },
];

fn event_title_present(f: &EventForm) -> bool {
    is_present(&f.title)
}

fn event_category_selected(f: &EventForm) -> bool {
    f.category.is_some()
}

fn event_time_selected(f: &EventForm) -> bool {
    f.time().is_some_and(|t| !t.is_empty())
}

/// Event form rules, in reporting order
pub const EVENT_RULES: &[Rule<EventForm>] = &[
    Rule {
        name: "title_present",
        message: "Title is required",
        check: event_title_present,
    },
    Rule {
        name: "category_selected",
        message: "Category is required",
        check: event_category_selected,
    },
    Rule {
        name: "time_selected",
        message: "Time is required",
        check: event_time_selected,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use common::validation::first_violation;

    fn registration(name: &str, email: &str, password: &str, confirm: Option<&str>) -> Registration {
        Registration {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.map(str::to_string),
        }
    }

    fn failing_rule(r: &Registration) -> Option<&'static str> {
        first_violation(REGISTRATION_RULES, r).err().map(|e| e.rule)
    }

    #[test]
    fn test_registration_rules_in_order() {
        assert_eq!(failing_rule(&registration("", "nope", "1", None)), Some("fields_present"));
        assert_eq!(
            failing_rule(&registration("Ana", "a@b.com", "secret1", Some("  "))),
            Some("fields_present")
        );
        assert_eq!(failing_rule(&registration("Ana", "ab.com", "1", None)), Some("email_format"));
        assert_eq!(failing_rule(&registration("Ana", "a@bcom", "1", None)), Some("email_format"));
        assert_eq!(
            failing_rule(&registration("Ana", "a@b.com", "12345", Some("nope"))),
            Some("password_length")
        );
        assert_eq!(
            failing_rule(&registration("Ana", "a@b.com", "secret1", Some("secret2"))),
            Some("passwords_match")
        );
        assert_eq!(failing_rule(&registration("Ana", "a@b.com", "secret1", Some("secret1"))), None);
        assert_eq!(failing_rule(&registration("Ana", "a@b.com", "secret1", None)), None);
    }

    #[test]
    fn test_password_length_counts_utf16_units() {
        assert_eq!(failing_rule(&registration("Ana", "a@b.com", "ñññññ", None)), Some("password_length"));
        assert_eq!(failing_rule(&registration("Ana", "a@b.com", "ññññññ", None)), None);
        // Astral characters take two units each
        assert_eq!(failing_rule(&registration("Ana", "a@b.com", "😀😀", None)), Some("password_length"));
        assert_eq!(failing_rule(&registration("Ana", "a@b.com", "😀😀😀", None)), None);
    }

    #[test]
    fn test_login_rules() {
        let creds = |email: &str, password: &str| LoginCredentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        let err = first_violation(LOGIN_RULES, &creds(" ", "secret1")).unwrap_err();
        assert_eq!(err.message, "Please fill in all fields");

        let err = first_violation(LOGIN_RULES, &creds("ana", "secret1")).unwrap_err();
        assert_eq!(err.rule, "email_format");

        // Login only asks for an "@"
        assert!(first_violation(LOGIN_RULES, &creds("a@b", "secret1")).is_ok());
    }
}
