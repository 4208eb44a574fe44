//! Contact details that unlock the full report.

use serde::Serialize;

use crate::error::WizardError;

/// Validated lead contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    name: String,
    email: String,
}

impl Contact {
    /// Validates and builds a contact.
    ///
    /// The name needs at least two characters; the email must look like
    /// `local@domain.tld`.
    ///
    /// # Errors
    ///
    /// Returns `WizardError::InvalidContact` naming the failing field.
    pub fn new(name: &str, email: &str) -> Result<Self, WizardError> {
        let name = name.trim();
        if name.chars().count() < 2 {
            return Err(WizardError::InvalidContact(
                "name must have at least 2 characters".to_string(),
            ));
        }
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(WizardError::InvalidContact(format!(
                "\"{email}\" is not a valid email"
            )));
        }
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    /// Contact name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email.
    pub fn email(&self) -> &str {
        &self.email
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !host.starts_with('.') && !host.ends_with('.') && !tld.is_empty()
}
