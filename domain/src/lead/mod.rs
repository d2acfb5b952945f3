//! Lead contact details captured before the full report is shown.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_PHONE_LEN: usize = 30;
pub const MAX_FIRM_LEN: usize = 200;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("email pattern is valid")
});

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub firm: String,
}

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadField {
    Name,
    Email,
    Phone,
    Firm,
}

impl LeadField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::Email => "email",
            LeadField::Phone => "phone",
            LeadField::Firm => "firm",
        }
    }
}

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: LeadField,
    pub message: String,
}

/// Every field-level problem found in a submitted form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid lead form: {}", summary(.0))]
pub struct LeadValidationErrors(pub Vec<FieldError>);

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field.as_str(), e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl LeadValidationErrors {
    /// Message for one field, if that field failed.
    pub fn message_for(&self, field: LeadField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }
}

/// Validated lead identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    name: String,
    email: String,
    phone: Option<String>,
    firm: Option<String>,
}

impl Lead {
    /// Validate a form.
    ///
    /// Name and email are trimmed and required; phone and firm are optional
    /// and become `None` when blank. All failures are reported together.
    pub fn parse(form: &LeadForm) -> Result<Self, LeadValidationErrors> {
        let mut errors = Vec::new();
        let mut fail = |field, message: &str| {
            errors.push(FieldError {
                field,
                message: message.to_string(),
            })
        };

        let name = form.name.trim();
        if name.is_empty() {
            fail(LeadField::Name, "Name is required");
        } else if name.chars().count() > MAX_NAME_LEN {
            fail(LeadField::Name, "Name must be at most 100 characters");
        }

        let email = form.email.trim();
        if !EMAIL_RE.is_match(email) {
            fail(LeadField::Email, "Invalid email");
        } else if email.chars().count() > MAX_EMAIL_LEN {
            fail(LeadField::Email, "Email must be at most 255 characters");
        }

        if form.phone.chars().count() > MAX_PHONE_LEN {
            fail(LeadField::Phone, "Phone must be at most 30 characters");
        }
        if form.firm.chars().count() > MAX_FIRM_LEN {
            fail(LeadField::Firm, "Firm must be at most 200 characters");
        }

        if !errors.is_empty() {
            return Err(LeadValidationErrors(errors));
        }

        let optional = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            phone: optional(&form.phone),
            firm: optional(&form.firm),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn firm(&self) -> Option<&str> {
        self.firm.as_deref()
    }
}
