//! Contact form state and the WhatsApp deep link built from it.
//!
//! Three fields (name, purpose, message) are templated into a fixed message
//! body, which is percent-encoded into the query of a wa.me click-to-chat
//! URL. The body format is part of the outbound contract and must not change
//! shape.

use std::fmt;

use anyhow::{Context, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Destination number for the click-to-chat link, digits only.
pub const WHATSAPP_PHONE: &str = "919874563210";

/// Escape set matching JavaScript's `encodeURIComponent`: everything except
/// alphanumerics and `- _ . ! ~ * ' ( )` is percent-encoded. WhatsApp renders
/// the `*` markers as bold, so they must survive encoding untouched.
const MESSAGE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// ============================================================================
// Purpose
// ============================================================================

/// Why the sender is reaching out.
///
/// The form restricts this to four options; the enum enforces the same
/// restriction for programmatic callers instead of accepting free text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Purpose {
    #[default]
    Mentorship,
    Collaboration,
    Speaking,
    General,
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Purpose::Mentorship => "Mentorship",
            Purpose::Collaboration => "Collaboration",
            Purpose::Speaking => "Speaking",
            Purpose::General => "General",
        })
    }
}

// ============================================================================
// Contact Form
// ============================================================================

/// The three form fields, mutated independently and read once at submit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactForm {
    name: String,
    purpose: Purpose,
    message: String,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn purpose(&self) -> Purpose {
        self.purpose
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Overwrite the name field. Other fields are untouched.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Overwrite the purpose field. Other fields are untouched.
    pub fn set_purpose(&mut self, purpose: Purpose) {
        self.purpose = purpose;
    }

    /// Overwrite the message field. Other fields are untouched.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// The plain-text message body.
    ///
    /// Byte-for-byte contract: bold header, blank line, then one line per
    /// field. Receivers parse this shape, so edits here are breaking.
    pub fn message_body(&self) -> String {
        format!(
            "*New Connection Request*\n\n*Name:* {}\n*Purpose:* {}\n*Message:* {}",
            self.name, self.purpose, self.message
        )
    }

    /// The message body percent-encoded for URL embedding.
    pub fn encoded_text(&self) -> String {
        utf8_percent_encode(&self.message_body(), MESSAGE_ENCODE_SET).to_string()
    }

    /// Build the full wa.me deep link.
    ///
    /// One divergence from the raw text: the query of an `https` URL cannot
    /// carry an apostrophe, so parsing re-encodes the `'` that
    /// [`ContactForm::encoded_text`] leaves raw and the link serializes it
    /// as `%27`. Percent-decoding the query still yields
    /// [`ContactForm::message_body`] byte-for-byte.
    pub fn whatsapp_url(&self) -> Result<Url> {
        let url = Url::parse(&format!(
            "https://wa.me/{}?text={}",
            WHATSAPP_PHONE,
            self.encoded_text()
        ))?;
        Ok(url)
    }

    /// Open the deep link in the system browser.
    pub fn submit(&self) -> Result<Url> {
        let url = self.whatsapp_url()?;
        log::info!("opening contact link for {}", self.purpose);
        open::that(url.as_str()).context("failed to open the contact link in a browser")?;
        Ok(url)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;

    fn ada_form() -> ContactForm {
        let mut form = ContactForm::new();
        form.set_name("Ada");
        form.set_purpose(Purpose::Collaboration);
        form.set_message("Hello");
        form
    }

    #[test]
    fn test_message_body_is_byte_exact() {
        assert_eq!(
            ada_form().message_body(),
            "*New Connection Request*\n\n*Name:* Ada\n*Purpose:* Collaboration\n*Message:* Hello"
        );
    }

    #[test]
    fn test_encoded_text_matches_known_encoding() {
        // Spaces become %20, newlines %0A, colons %3A; asterisks stay raw
        assert_eq!(
            ada_form().encoded_text(),
            "*New%20Connection%20Request*%0A%0A*Name%3A*%20Ada%0A*Purpose%3A*%20Collaboration%0A*Message%3A*%20Hello"
        );
    }

    #[test]
    fn test_encoded_text_decodes_back_to_body() {
        let form = ada_form();
        let encoded = form.encoded_text();
        let decoded = percent_decode_str(&encoded).decode_utf8().unwrap();
        assert_eq!(decoded, form.message_body());
    }

    #[test]
    fn test_whatsapp_url_shape() {
        let form = ada_form();
        let url = form.whatsapp_url().unwrap();
        assert_eq!(
            url.as_str(),
            format!(
                "https://wa.me/{}?text={}",
                WHATSAPP_PHONE,
                form.encoded_text()
            )
        );
        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), format!("/{}", WHATSAPP_PHONE));
    }

    #[test]
    fn test_field_updates_are_isolated() {
        let mut form = ada_form();
        form.set_message("Changed my mind");

        assert_eq!(form.name(), "Ada");
        assert_eq!(form.purpose(), Purpose::Collaboration);
        assert_eq!(form.message(), "Changed my mind");

        form.set_name("Grace");
        assert_eq!(form.purpose(), Purpose::Collaboration);
        assert_eq!(form.message(), "Changed my mind");
    }

    #[test]
    fn test_default_form() {
        let form = ContactForm::new();
        assert_eq!(form.name(), "");
        assert_eq!(form.purpose(), Purpose::Mentorship);
        assert_eq!(form.message(), "");
    }

    #[test]
    fn test_purpose_display() {
        assert_eq!(Purpose::Mentorship.to_string(), "Mentorship");
        assert_eq!(Purpose::Collaboration.to_string(), "Collaboration");
        assert_eq!(Purpose::Speaking.to_string(), "Speaking");
        assert_eq!(Purpose::General.to_string(), "General");
    }

    #[test]
    fn test_unicode_message_round_trips() {
        let mut form = ContactForm::new();
        form.set_name("Søren");
        form.set_message("café ✨ 50% off & more");

        let encoded = form.encoded_text();
        let decoded = percent_decode_str(&encoded).decode_utf8().unwrap();
        assert_eq!(decoded, form.message_body());
        // Raw '&' and '%' must never survive into the query value
        assert!(!encoded.contains('&'));
        assert!(!encoded.contains("% "));
    }

    #[test]
    fn test_apostrophe_is_reencoded_by_the_url_parser() {
        let mut form = ContactForm::new();
        form.set_name("Ada");
        form.set_message("it's fine");

        // encodeURIComponent parity keeps the apostrophe raw in the text...
        assert!(form.encoded_text().contains("it's"));

        // ...but the query of an https URL cannot hold it, so the parsed
        // link carries %27 and differs from the naive concatenation
        let url = form.whatsapp_url().unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("it%27s"));
        assert_ne!(
            url.as_str(),
            format!(
                "https://wa.me/{}?text={}",
                WHATSAPP_PHONE,
                form.encoded_text()
            )
        );

        // The delivered message is unaffected
        let text = query.strip_prefix("text=").unwrap();
        let decoded = percent_decode_str(text).decode_utf8().unwrap();
        assert_eq!(decoded, form.message_body());
    }

    #[test]
    fn test_empty_fields_still_produce_valid_url() {
        let form = ContactForm::new();
        let url = form.whatsapp_url().unwrap();
        assert!(url
            .as_str()
            .starts_with("https://wa.me/919874563210?text=*New%20Connection%20Request*"));
    }
}
