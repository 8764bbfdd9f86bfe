//! Request-field checks shared by the endpoints. They run before any upstream call.

use crate::errors::AppError;

/// The trimmed value, or `None` when missing or blank.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Both owner and name must be present and non-blank.
pub fn require_repo<'a>(
    owner: Option<&'a str>,
    name: Option<&'a str>,
) -> Result<(&'a str, &'a str), AppError> {
    match (non_blank(owner), non_blank(name)) {
        (Some(owner), Some(name)) => Ok((owner, name)),
        _ => Err(AppError::Validation(
            "Repository owner and name are required".to_string(),
        )),
    }
}
