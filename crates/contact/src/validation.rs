use std::borrow::Cow;

use validator::{Validate, ValidationError};

use crate::{ContactError, ContactSubmission};

/// Message shown by the form when a required field is left empty.
pub const REQUIRED_FIELDS_CLIENT_MESSAGE: &str =
    "Please fill in all required fields: Name, Email, and Message.";

/// Message returned by the relay when a required field is missing.
pub const REQUIRED_FIELDS_RELAY_MESSAGE: &str = "Name, email, and message are required fields";

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::from("This field is required"));
        return Err(error);
    }

    Ok(())
}

impl ContactSubmission {
    /// Checks that name, email and message are present.
    ///
    /// Email syntax is deliberately not checked here.
    pub fn check_required(&self) -> Result<(), ContactError> {
        self.validate().map_err(|errors| {
            let mut missing = errors
                .field_errors()
                .keys()
                .map(|field| field.to_string())
                .collect::<Vec<_>>();
            missing.sort();

            ContactError::MissingRequiredFields(missing)
        })
    }
}
