use serde::{Deserialize, Serialize};

/// Wi-Fi authentication scheme as written into the `T:` field
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encryption {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "nopass")]
    NoPass,
}

impl Encryption {
    pub fn token(&self) -> &'static str {
        match self {
            Encryption::Wpa => "WPA",
            Encryption::Wep => "WEP",
            Encryption::NoPass => "nopass",
        }
    }
}

/// The content kinds a QR code can carry
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QrKind {
    #[default]
    Url,
    Text,
    Wifi,
    VCard,
    Email,
    Sms,
    WhatsApp,
}

/// Validated, type-tagged user input. Only built from a form that passed
/// validation, so every required field is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub enum QrRequest {
    Url {
        url: String,
    },
    Text {
        text: String,
    },
    Wifi {
        ssid: String,
        password: String,
        encryption: Encryption,
    },
    VCard {
        first_name: String,
        last_name: String,
        phone: String,
        email: String,
        website: String,
        organization: String,
    },
    Email {
        email: String,
        subject: String,
        body: String,
    },
    Sms {
        phone: String,
        message: String,
    },
    WhatsApp {
        phone: String,
        message: String,
    },
}

impl QrRequest {
    pub fn kind(&self) -> QrKind {
        match self {
            QrRequest::Url { .. } => QrKind::Url,
            QrRequest::Text { .. } => QrKind::Text,
            QrRequest::Wifi { .. } => QrKind::Wifi,
            QrRequest::VCard { .. } => QrKind::VCard,
            QrRequest::Email { .. } => QrKind::Email,
            QrRequest::Sms { .. } => QrKind::Sms,
            QrRequest::WhatsApp { .. } => QrKind::WhatsApp,
        }
    }
}
