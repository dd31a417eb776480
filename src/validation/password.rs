//! Password policy and email format checks.

use super::text_length;
use lazy_static::lazy_static;
use regex::Regex;

/// Human-readable description of the password policy.
pub const PASSWORD_POLICY_MESSAGE: &str =
    "Password must include at least eight characters, two digits and one special character.";

const MIN_PASSWORD_LENGTH: usize = 8;
const MIN_PASSWORD_DIGITS: usize = 2;

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_EMAIL_LOCAL_LENGTH: usize = 64;

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    )
    .expect("email pattern compiles");
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whether `value` satisfies the password policy: eight UTF-16 code units or
/// more on a single line, two ASCII digits and one character outside
/// `[A-Za-z0-9]`. Empty values are never strong.
pub fn is_password_strong(value: &str) -> bool {
    if value.is_empty() || value.chars().any(is_line_terminator) {
        return false;
    }

    let length = text_length(value);
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    let has_special = value.chars().any(|c| !c.is_ascii_alphanumeric());

    length >= MIN_PASSWORD_LENGTH && digits >= MIN_PASSWORD_DIGITS && has_special
}

/// Whether `value` is a well-formed email address.
pub fn is_email_valid(value: &str) -> bool {
    if value.is_empty() || text_length(value) > MAX_EMAIL_LENGTH {
        return false;
    }

    match value.split_once('@') {
        Some((local, _)) if text_length(local) <= MAX_EMAIL_LOCAL_LENGTH => {
            EMAIL_PATTERN.is_match(value)
        }
        _ => false,
    }
}
