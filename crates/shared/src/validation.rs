//! Common validation utilities.

use validator::ValidationError;

/// Validates that a text field contains something other than whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates that an image reference has no embedded whitespace.
///
/// Images are stored as opaque references (a path or URL) produced by the
/// upload collaborator, so only their shape is checked here.
pub fn validate_image_ref(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        let mut err = ValidationError::new("image_ref");
        err.message = Some("Image reference must be a non-empty path or URL".into());
        Err(err)
    } else {
        Ok(())
    }
}
