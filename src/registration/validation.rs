//! Client-side checks run before anything is sent

use crate::api::RegisterRequest;
use crate::state::{Field, FieldErrors, RegistrationForm};
use regex::Regex;
use std::sync::LazyLock;

/// Minimum password length in UTF-16 code units, the unit the backend counts in
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Loose `something@something.something` check
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Validate the form; an empty result means it can be submitted
pub fn validate(form: &RegistrationForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.name.as_text().trim().is_empty() {
        errors.set(Field::Name, "Name is required");
    }

    let email = form.email.as_text();
    if email.trim().is_empty() {
        errors.set(Field::Email, "Email is required");
    } else if !is_valid_email(email) {
        errors.set(Field::Email, "Please enter a valid email address");
    }

    let password = form.password.as_text();
    if password.is_empty() {
        errors.set(Field::Password, "Password is required");
    } else if password.encode_utf16().count() < MIN_PASSWORD_LEN {
        errors.set(
            Field::Password,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }

    let confirm = form.confirm_password.as_text();
    if confirm.is_empty() {
        errors.set(Field::ConfirmPassword, "Please confirm your password");
    } else if password != confirm {
        errors.set(Field::ConfirmPassword, "Passwords do not match");
    }

    errors
}

/// Build the request body; name and email are trimmed, the password is sent as typed
pub fn to_request(form: &RegistrationForm) -> RegisterRequest {
    RegisterRequest {
        name: form.name.as_text().trim().to_string(),
        email: form.email.as_text().trim().to_string(),
        password: form.password.as_text().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled_form() -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.name.set_text("Ada Lovelace");
        form.email.set_text("ada@example.com");
        form.password.set_text("engine42");
        form.confirm_password.set_text("engine42");
        form
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(validate(&filled_form()).is_empty());
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = validate(&RegistrationForm::new());
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
        assert_eq!(errors.get(Field::Email), Some("Email is required"));
        assert_eq!(errors.get(Field::Password), Some("Password is required"));
        assert_eq!(
            errors.get(Field::ConfirmPassword),
            Some("Please confirm your password")
        );
    }

    #[test]
    fn test_whitespace_name_is_required_error() {
        let mut form = filled_form();
        form.name.set_text("   ");
        let errors = validate(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Name), Some("Name is required"));
    }

    #[test]
    fn test_bad_email_shape() {
        for email in ["ada", "ada@example", "@example.com", "ada@.com"] {
            let mut form = filled_form();
            form.email.set_text(email);
            assert_eq!(
                validate(&form).get(Field::Email),
                Some("Please enter a valid email address"),
                "{email}"
            );
        }
    }

    #[test]
    fn test_email_shape_is_loose() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email(" ada@example.com "));
        assert!(!is_valid_email("ada at example dot com"));
    }

    #[test]
    fn test_short_password() {
        let mut form = filled_form();
        form.password.set_text("abc12");
        form.confirm_password.set_text("abc12");
        let errors = validate(&form);
        assert_eq!(
            errors.get(Field::Password),
            Some("Password must be at least 6 characters")
        );
        assert!(errors.get(Field::ConfirmPassword).is_none());
    }

    #[test]
    fn test_password_length_ignores_byte_width() {
        let mut form = filled_form();
        form.password.set_text("ñññññ");
        form.confirm_password.set_text("ñññññ");
        assert!(validate(&form).get(Field::Password).is_some());
        form.password.set_text("ññññññ");
        form.confirm_password.set_text("ññññññ");
        assert!(validate(&form).is_empty());
    }

    #[test]
    fn test_astral_characters_count_as_two_units() {
        let mut form = filled_form();
        form.password.set_text("😀😀😀");
        form.confirm_password.set_text("😀😀😀");
        assert_eq!(validate(&form), FieldErrors::new());

        form.password.set_text("😀😀a");
        form.confirm_password.set_text("😀😀a");
        assert_eq!(
            validate(&form).get(Field::Password),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn test_mismatched_confirmation() {
        let mut form = filled_form();
        form.confirm_password.set_text("engine43");
        let errors = validate(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(Field::ConfirmPassword),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_request_trims_name_and_email_only() {
        let mut form = filled_form();
        form.name.set_text("  Ada  ");
        form.email.set_text(" ada@example.com ");
        form.password.set_text(" spaced ");
        let request = to_request(&form);
        assert_eq!(request.name, "Ada");
        assert_eq!(request.email, "ada@example.com");
        assert_eq!(request.password, " spaced ");
    }
}
