//! Keystroke-level input normalisation for the registration form.

/// Keeps ASCII digits only, truncated to `max_len` digits when given.
pub fn digits_only(text: &str, max_len: Option<usize>) -> String {
    let digits = text.chars().filter(|c| c.is_ascii_digit());
    match max_len {
        Some(max) => digits.take(max).collect(),
        None => digits.collect(),
    }
}

/// Employee identifiers are stored upper-cased.
pub fn normalize_emp_id(text: &str) -> String {
    text.trim().to_uppercase()
}

pub fn is_admin_token(text: &str, token: &str) -> bool {
    !token.is_empty() && text.eq_ignore_ascii_case(token)
}
