use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::qr_request::{Encryption, QrRequest};

#[derive(Deserialize, Validate, Debug)]
pub struct UrlForm {
    #[validate(url(message = "Please enter a valid URL."))]
    pub url: String,
}

#[derive(Deserialize, Validate, Debug)]
pub struct TextForm {
    #[validate(length(min = 1, message = "Text cannot be empty."))]
    pub text: String,
}

#[derive(Deserialize, Validate, Debug)]
pub struct WifiForm {
    #[validate(length(min = 1, message = "Network SSID is required."))]
    pub ssid: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub encryption: Encryption,
}

#[derive(Deserialize, Validate, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VCardForm {
    #[validate(length(min = 1, message = "First name is required."))]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    // Blank optional fields are treated as absent
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(email(message = "Invalid email address."))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url(message = "Invalid URL."))]
    pub website: Option<String>,
    #[serde(default)]
    pub organization: String,
}

#[derive(Deserialize, Validate, Debug)]
pub struct EmailForm {
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Deserialize, Validate, Debug)]
pub struct SmsForm {
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize, Validate, Debug)]
pub struct WhatsAppForm {
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

/// One form per content kind, selected by the `type` tag
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QrForm {
    Url(UrlForm),
    Text(TextForm),
    Wifi(WifiForm),
    VCard(VCardForm),
    Email(EmailForm),
    Sms(SmsForm),
    WhatsApp(WhatsAppForm),
}

impl QrForm {
    /// Validate the active variant and turn it into a request ready for formatting.
    pub fn into_request(self) -> Result<QrRequest, ValidationErrors> {
        let request = match self {
            QrForm::Url(form) => {
                form.validate()?;
                QrRequest::Url { url: form.url }
            }
            QrForm::Text(form) => {
                form.validate()?;
                QrRequest::Text { text: form.text }
            }
            QrForm::Wifi(form) => {
                form.validate()?;
                QrRequest::Wifi {
                    ssid: form.ssid,
                    password: form.password,
                    encryption: form.encryption,
                }
            }
            QrForm::VCard(form) => {
                form.validate()?;
                QrRequest::VCard {
                    first_name: form.first_name,
                    last_name: form.last_name,
                    phone: form.phone,
                    email: form.email.unwrap_or_default(),
                    website: form.website.unwrap_or_default(),
                    organization: form.organization,
                }
            }
            QrForm::Email(form) => {
                form.validate()?;
                QrRequest::Email {
                    email: form.email,
                    subject: form.subject,
                    body: form.body,
                }
            }
            QrForm::Sms(form) => {
                form.validate()?;
                QrRequest::Sms {
                    phone: form.phone,
                    message: form.message,
                }
            }
            QrForm::WhatsApp(form) => {
                form.validate()?;
                QrRequest::WhatsApp {
                    phone: form.phone,
                    message: form.message,
                }
            }
        };

        Ok(request)
    }
}

/// Per-field messages keyed by the camelCase wire name
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid value ({})", e.code),
                })
                .collect();
            (camel_case(&field), messages)
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let message = if phone.trim().is_empty() {
        "Phone number is required."
    } else if !phone.chars().any(|c| c.is_ascii_digit()) {
        "Phone number must contain digits."
    } else {
        return Ok(());
    };

    let mut error = ValidationError::new("phone");
    error.message = Some(Cow::from(message));
    Err(error)
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
