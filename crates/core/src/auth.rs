//! Sign-in and sign-up rules shared by the admin pages.
//!
//! The auth platform reports failures as English free text. These helpers
//! classify that text by substring into the Korean messages shown on the
//! forms; anything unrecognized is passed through verbatim.

/// Minimum password length accepted by the sign-up form.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Messages shown on the sign-in and sign-up forms.
pub mod messages {
    pub const INVALID_CREDENTIALS: &str = "이메일 또는 비밀번호가 올바르지 않습니다.";
    pub const RATE_LIMITED: &str = "요청이 너무 많습니다. 잠시 후 다시 시도해주세요.";
    pub const NOT_ADMIN: &str = "관리자 권한이 없습니다.";
    pub const SIGN_IN_FAILED: &str = "로그인 중 오류가 발생했습니다.";
    pub const SIGN_UP_FAILED: &str = "회원가입 중 오류가 발생했습니다.";
    pub const ALREADY_REGISTERED: &str = "이미 가입된 이메일입니다.";
    pub const INVALID_EMAIL: &str = "올바른 이메일 형식이 아닙니다.";
    pub const PASSWORD_TOO_SHORT: &str = "비밀번호는 최소 6자 이상이어야 합니다.";
    pub const PASSWORD_MISMATCH: &str = "비밀번호가 일치하지 않습니다.";
    pub const TERMS_REQUIRED: &str = "이용약관에 동의해주세요.";
    pub const SIGNUP_DISABLED: &str = "현재 회원가입이 비활성화되어 있습니다.";
    pub const SIGNED_UP: &str = "회원가입이 완료되었습니다. 로그인해주세요.";
    pub const SESSION_EXPIRED: &str = "세션이 만료되었습니다. 다시 로그인해주세요.";
}

/// User-facing message for a rejected sign-in.
#[must_use]
pub fn sign_in_error_message(provider_message: &str) -> String {
    if provider_message.contains("Invalid login credentials") {
        messages::INVALID_CREDENTIALS.to_owned()
    } else if provider_message.contains("rate limit") {
        messages::RATE_LIMITED.to_owned()
    } else {
        provider_message.to_owned()
    }
}

/// User-facing message for a rejected sign-up.
#[must_use]
pub fn sign_up_error_message(provider_message: &str) -> String {
    let has = |needle: &str| provider_message.contains(needle);

    let mapped = if has("already registered") || has("already been registered") {
        messages::ALREADY_REGISTERED
    } else if has("rate limit") || has("email rate") {
        messages::RATE_LIMITED
    } else if has("invalid email") || has("Invalid email") || has("Unable to validate email") {
        messages::INVALID_EMAIL
    } else if has("Password should be") {
        messages::PASSWORD_TOO_SHORT
    } else if has("Signup is disabled") {
        messages::SIGNUP_DISABLED
    } else {
        return provider_message.to_owned();
    };
    mapped.to_owned()
}

/// Reasons the sign-up form is rejected before calling the platform.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpError {
    #[error("{}", messages::PASSWORD_MISMATCH)]
    PasswordMismatch,
    #[error("{}", messages::PASSWORD_TOO_SHORT)]
    PasswordTooShort,
    #[error("{}", messages::TERMS_REQUIRED)]
    TermsNotAccepted,
}

/// Check the sign-up form in the order the form reports problems:
/// confirmation mismatch, then length, then terms.
///
/// # Errors
///
/// Returns the first [`SignUpError`] found.
pub fn validate_sign_up(
    password: &str,
    confirm_password: &str,
    agreed_to_terms: bool,
) -> Result<(), SignUpError> {
    if password != confirm_password {
        return Err(SignUpError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SignUpError::PasswordTooShort);
    }
    if !agreed_to_terms {
        return Err(SignUpError::TermsNotAccepted);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_invalid_credentials() {
        assert_eq!(
            sign_in_error_message("Invalid login credentials"),
            messages::INVALID_CREDENTIALS
        );
    }

    #[test]
    fn test_sign_in_rate_limit() {
        assert_eq!(
            sign_in_error_message("Request rate limit reached"),
            messages::RATE_LIMITED
        );
    }

    #[test]
    fn test_sign_in_unmatched_is_verbatim() {
        assert_eq!(
            sign_in_error_message("Email not confirmed"),
            "Email not confirmed"
        );
    }

    #[test]
    fn test_sign_up_mapping() {
        let cases = [
            ("User already registered", messages::ALREADY_REGISTERED),
            ("A user with this email has already been registered", messages::ALREADY_REGISTERED),
            ("email rate limit exceeded", messages::RATE_LIMITED),
            ("Unable to validate email address: invalid format", messages::INVALID_EMAIL),
            ("Invalid email", messages::INVALID_EMAIL),
            ("Password should be at least 6 characters.", messages::PASSWORD_TOO_SHORT),
            ("Signup is disabled", messages::SIGNUP_DISABLED),
            ("Database error saving new user", "Database error saving new user"),
        ];
        for (provider, expected) in cases {
            assert_eq!(sign_up_error_message(provider), expected, "{provider}");
        }
    }

    #[test]
    fn test_sign_up_validation_order() {
        assert_eq!(
            validate_sign_up("abc", "abd", false),
            Err(SignUpError::PasswordMismatch)
        );
        assert_eq!(
            validate_sign_up("abc", "abc", false),
            Err(SignUpError::PasswordTooShort)
        );
        assert_eq!(
            validate_sign_up("abcdef", "abcdef", false),
            Err(SignUpError::TermsNotAccepted)
        );
        assert_eq!(validate_sign_up("abcdef", "abcdef", true), Ok(()));
    }

    #[test]
    fn test_sign_up_error_displays_localized_message() {
        assert_eq!(
            SignUpError::TermsNotAccepted.to_string(),
            messages::TERMS_REQUIRED
        );
    }
}
