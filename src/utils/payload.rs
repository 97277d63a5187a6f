use crate::models::qr_request::QrRequest;

/// Derive the string encoded into the QR symbol.
///
/// Each variant follows the grammar QR scanners expect, field order and
/// punctuation included. Never fails: the request was validated upstream.
pub fn format_payload(request: &QrRequest) -> String {
    match request {
        QrRequest::Url { url } => url.clone(),
        QrRequest::Text { text } => text.clone(),
        QrRequest::Wifi {
            ssid,
            password,
            encryption,
        } => format!("WIFI:S:{};T:{};P:{};;", ssid, encryption.token(), password),
        QrRequest::VCard {
            first_name,
            last_name,
            phone,
            email,
            website,
            organization,
        } => [
            "BEGIN:VCARD".to_string(),
            "VERSION:4.0".to_string(),
            format!("N:{};{};;;", last_name, first_name),
            format!("FN:{} {}", first_name, last_name),
            format!("ORG:{}", organization),
            format!("TEL;TYPE=work,voice:{}", phone),
            format!("EMAIL:{}", email),
            format!("URL:{}", website),
            "END:VCARD".to_string(),
        ]
        .join("\n"),
        QrRequest::Email {
            email,
            subject,
            body,
        } => {
            let query = [("subject", subject), ("body", body)]
                .into_iter()
                .filter(|(_, value)| !value.is_empty())
                .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
                .collect::<Vec<_>>();

            if query.is_empty() {
                format!("mailto:{}", email)
            } else {
                format!("mailto:{}?{}", email, query.join("&"))
            }
        }
        QrRequest::Sms { phone, message } => format!("smsto:{}:{}", digits_only(phone), message),
        QrRequest::WhatsApp { phone, message } => {
            let base = format!("https://wa.me/{}", digits_only(phone));
            if message.is_empty() {
                base
            } else {
                format!("{}?text={}", base, urlencoding::encode(message))
            }
        }
    }
}

/// Strip everything but ASCII digits from a phone number
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}
