// ============================================================================
// VALIDATION - Form checks run before any request leaves the browser
// ============================================================================

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{ApiError, ApiResult, FieldError};
use crate::models::CreateAdminUserRequest;

const INVALID_EMAIL: FieldError = FieldError::new("email", "Invalid email");

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^\S+@\S+$").expect("valid email pattern");
    static ref PHONE_PATTERN: Regex = Regex::new(r"^\+?[0-9]{10,14}$").expect("valid phone pattern");
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Optional `+`, then 10 to 14 ASCII digits
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

pub fn validate_login(email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !is_valid_email(email) {
        errors.push(INVALID_EMAIL);
    }
    if password.chars().count() < 6 {
        errors.push(FieldError::new(
            "password",
            "Password must have at least 6 characters",
        ));
    }
    errors
}

pub fn validate_sub_admin(request: &CreateAdminUserRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if request.full_name.trim().chars().count() <= 2 {
        errors.push(FieldError::new(
            "fullName",
            "Full name must have at least 3 characters",
        ));
    }
    if !is_valid_email(&request.email) {
        errors.push(INVALID_EMAIL);
    }
    if request.password.chars().count() < 8 {
        errors.push(FieldError::new(
            "password",
            "Password must have at least 8 characters",
        ));
    }
    if !is_valid_phone(&request.phone_number) {
        errors.push(FieldError::new(
            "phoneNumber",
            "Please enter a valid phone number",
        ));
    }
    errors
}

pub fn validate_reject_reason(reason: &str) -> Vec<FieldError> {
    if reason.trim().is_empty() {
        vec![FieldError::new("reason", "Please provide a reason")]
    } else {
        Vec::new()
    }
}

/// Empty list -> `Ok`, otherwise `ApiError::Validation`
pub fn into_result(errors: Vec<FieldError>) -> ApiResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

/// First message for `field`, for inline form errors
pub fn message_for(errors: &[FieldError], field: &str) -> Option<&'static str> {
    errors.iter().find(|e| e.field == field).map(|e| e.message)
}
