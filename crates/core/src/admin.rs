//! Submit guards for the admin login and signup forms.

/// Minimum admin password length accepted by the signup form.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Login is possible once an email and any password are entered.
#[must_use]
pub fn can_submit_login(email: &str, password: &str, loading: bool) -> bool {
    !loading && !email.trim().is_empty() && !password.is_empty()
}

/// Signup additionally needs an 8+ character password and an invite code.
///
/// The invite code is only checked for presence; the backend validates it.
#[must_use]
pub fn can_submit_signup(email: &str, password: &str, invite_code: &str, loading: bool) -> bool {
    !loading
        && !email.trim().is_empty()
        && password.chars().count() >= MIN_PASSWORD_LENGTH
        && !invite_code.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_guard() {
        assert!(can_submit_login("admin@example.com", "x", false));
        assert!(!can_submit_login("  ", "x", false));
        assert!(!can_submit_login("admin@example.com", "", false));
        assert!(!can_submit_login("admin@example.com", "x", true));
    }

    #[test]
    fn test_signup_guard_password_length() {
        assert!(!can_submit_signup("a@b.co", "1234567", "INVITE", false));
        assert!(can_submit_signup("a@b.co", "12345678", "INVITE", false));
    }

    #[test]
    fn test_signup_guard_requires_invite_and_email() {
        assert!(!can_submit_signup("a@b.co", "longenough", " ", false));
        assert!(!can_submit_signup("", "longenough", "INVITE", false));
        assert!(!can_submit_signup("a@b.co", "longenough", "INVITE", true));
    }

    #[test]
    fn test_signup_password_counts_characters() {
        // Eight characters, more than eight bytes
        assert!(can_submit_signup("a@b.co", "pässwörd", "INVITE", false));
    }
}
