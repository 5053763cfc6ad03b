//! Field-shape validation, run by handlers before any service logic. Rules
//! mirror the marketplace's registration and listing constraints; everything
//! here is pure and produces per-field messages for the 400 envelope.

use serde::Serialize;

use crate::accounts::{LoginRequest, RegisterRequest, Role};
use crate::error::ApiError;
use crate::inquiries::{InquiryReply, NewInquiry};
use crate::listings::{ListingPatch, NewListing};

/// One failed rule, addressed to the offending field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

pub fn registration(request: &RegisterRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    check_name(&mut errors, "firstName", &request.first_name);
    check_name(&mut errors, "lastName", &request.last_name);

    if !looks_like_email(&request.email) {
        errors.push(FieldError {
            field: "email",
            message: "Please enter a valid email",
        });
    }
    if !looks_like_phone(&request.phone) {
        errors.push(FieldError {
            field: "phone",
            message: "Please enter a valid Ethiopian phone number",
        });
    }
    if request.password.len() < 6 {
        errors.push(FieldError {
            field: "password",
            message: "Password must be at least 6 characters",
        });
    }
    // Admin accounts are seeded, never self-registered.
    if request.role == Some(Role::Admin) {
        errors.push(FieldError {
            field: "role",
            message: "Invalid role",
        });
    }

    finish(errors)
}

pub fn login(request: &LoginRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    if !looks_like_email(&request.email) {
        errors.push(FieldError {
            field: "email",
            message: "Please enter a valid email",
        });
    }
    if request.password.is_empty() {
        errors.push(FieldError {
            field: "password",
            message: "Password is required",
        });
    }

    finish(errors)
}

pub fn new_listing(draft: &NewListing) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    check_title(&mut errors, draft.title.trim());
    check_description(&mut errors, draft.description.trim());
    check_area_size(&mut errors, draft.area.size);
    check_location(&mut errors, &draft.location.city, &draft.location.subcity);

    finish(errors)
}

pub fn listing_patch(patch: &ListingPatch) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    if let Some(title) = &patch.title {
        check_title(&mut errors, title.trim());
    }
    if let Some(description) = &patch.description {
        check_description(&mut errors, description.trim());
    }
    if let Some(area) = &patch.area {
        check_area_size(&mut errors, area.size);
    }
    if let Some(location) = &patch.location {
        check_location(&mut errors, &location.city, &location.subcity);
    }

    finish(errors)
}

pub fn new_inquiry(request: &NewInquiry) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    let subject = request.subject.trim();
    if subject.is_empty() || subject.len() > 100 {
        errors.push(FieldError {
            field: "subject",
            message: "Subject must be between 1 and 100 characters",
        });
    }

    let message = request.message.trim();
    if message.is_empty() || message.len() > 500 {
        errors.push(FieldError {
            field: "message",
            message: "Message must be between 1 and 500 characters",
        });
    }

    finish(errors)
}

pub fn inquiry_reply(reply: &InquiryReply) -> Result<(), ApiError> {
    let message = reply.message.trim();
    if message.is_empty() || message.len() > 500 {
        return finish(vec![FieldError {
            field: "message",
            message: "Message must be between 1 and 500 characters",
        }]);
    }
    Ok(())
}

fn check_name(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    let trimmed = value.trim();
    if trimmed.len() < 2 || trimmed.len() > 50 {
        errors.push(FieldError {
            field,
            message: "Name must be between 2 and 50 characters",
        });
    }
}

fn check_title(errors: &mut Vec<FieldError>, title: &str) {
    if title.len() < 5 || title.len() > 100 {
        errors.push(FieldError {
            field: "title",
            message: "Title must be between 5 and 100 characters",
        });
    }
}

fn check_description(errors: &mut Vec<FieldError>, description: &str) {
    if description.len() < 20 || description.len() > 1000 {
        errors.push(FieldError {
            field: "description",
            message: "Description must be between 20 and 1000 characters",
        });
    }
}

fn check_area_size(errors: &mut Vec<FieldError>, size: f64) {
    if !size.is_finite() || size < 1.0 {
        errors.push(FieldError {
            field: "area.size",
            message: "Area must be at least 1 square meter",
        });
    }
}

fn check_location(errors: &mut Vec<FieldError>, city: &str, subcity: &str) {
    if city.trim().is_empty() {
        errors.push(FieldError {
            field: "location.city",
            message: "City is required",
        });
    }
    if subcity.trim().is_empty() {
        errors.push(FieldError {
            field: "location.subcity",
            message: "Subcity is required",
        });
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}

/// Light-weight shape check: one `@`, non-empty local part, and a dot in the
/// domain. Full deliverability is the mail system's problem.
fn looks_like_email(raw: &str) -> bool {
    let trimmed = raw.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !trimmed.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Ethiopian phone shape: `+251` or a leading `0`, followed by nine digits.
fn looks_like_phone(raw: &str) -> bool {
    let trimmed = raw.trim();
    let rest = if let Some(rest) = trimmed.strip_prefix("+251") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix('0') {
        rest
    } else {
        return false;
    };
    rest.len() == 9 && rest.chars().all(|c| c.is_ascii_digit())
}
