use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

// Digits are ASCII only; separators are any whitespace or a hyphen.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(?[0-9]{2}\)?[\s-]?[0-9]{4,5}-?[0-9]{4}$").expect("phone pattern compiles")
});

/// The three signup inputs as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupFields {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Trims whitespace and the byte-order mark, like the browser's `String.trim`.
fn trim_input(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

impl SignupFields {
    pub fn trimmed(&self) -> Self {
        Self {
            name: trim_input(&self.name).to_string(),
            email: trim_input(&self.email).to_string(),
            phone: trim_input(&self.phone).to_string(),
        }
    }
}

/// A failed field rule. The display text is what the visitor reads.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("O campo Nome é obrigatório. ")]
    NameRequired,

    #[error("O campo Email é obrigatório. ")]
    EmailRequired,

    #[error("Por favor, insira um email válido. ")]
    EmailInvalid,

    #[error("Por favor, insira um telefone válido (Ex: (XX) XXXXX-XXXX). ")]
    PhoneInvalid,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Checks every rule and returns all failures, in field order.
pub fn validate(fields: &SignupFields) -> Vec<ValidationError> {
    let fields = fields.trimmed();
    let mut errors = Vec::new();

    if fields.name.is_empty() {
        errors.push(ValidationError::NameRequired);
    }

    if fields.email.is_empty() {
        errors.push(ValidationError::EmailRequired);
    } else if !is_valid_email(&fields.email) {
        errors.push(ValidationError::EmailInvalid);
    }

    if !fields.phone.is_empty() && !is_valid_phone(&fields.phone) {
        errors.push(ValidationError::PhoneInvalid);
    }

    errors
}

/// Joins failure messages into one status line. Each message keeps its trailing space.
pub fn error_summary(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| e.to_string()).collect()
}
