use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Same shape the original form enforced: something@something.tld, no spaces.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactFormError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),
    #[error("please provide a valid email address")]
    InvalidEmail(String),
}

/// A contact-form submission requesting a market listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub market_name: String,
    pub products: Option<String>,
    pub website: Option<String>,
    pub message: String,
}

impl ContactForm {
    /// Check required fields and email shape.
    ///
    /// # Errors
    ///
    /// Returns [`ContactFormError`] naming the first failing field.
    pub fn validate(&self) -> Result<(), ContactFormError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("marketName", &self.market_name),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ContactFormError::MissingField(field));
            }
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ContactFormError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

/// The JSON message body posted to the relay.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

/// Render a validated contact form into the outbound email.
///
/// Every user-supplied field is HTML-escaped before interpolation.
#[must_use]
pub fn render_contact_email(form: &ContactForm, sender: &str, recipient: &str) -> OutboundEmail {
    let name = escape_html(&form.name);
    let email = escape_html(&form.email);
    let market_name = escape_html(&form.market_name);

    let mut contact_block = format!(
        "<p><strong>Name:</strong> {name}</p>\n\
         <p><strong>Email:</strong> <a href=\"mailto:{email}\">{email}</a></p>\n"
    );
    if let Some(phone) = optional(&form.phone) {
        contact_block.push_str(&format!("<p><strong>Phone:</strong> {phone}</p>\n"));
    }

    let mut market_block = format!("<p><strong>Market Name:</strong> {market_name}</p>\n");
    if let Some(address) = optional(&form.address) {
        market_block.push_str(&format!("<p><strong>Address:</strong> {address}</p>\n"));
    }
    if let Some(products) = optional(&form.products) {
        market_block.push_str(&format!("<p><strong>Products:</strong> {products}</p>\n"));
    }
    if let Some(website) = optional(&form.website) {
        market_block.push_str(&format!(
            "<p><strong>Website:</strong> <a href=\"{website}\">{website}</a></p>\n"
        ));
    }

    let message = escape_html(&form.message);

    let html = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\n\
         <h2>New Market Listing Request</h2>\n\
         <h3>Contact Information</h3>\n{contact_block}\
         <h3>Market Details</h3>\n{market_block}\
         <h3>Message</h3>\n\
         <p style=\"white-space: pre-line;\">{message}</p>\n\
         </div>"
    );

    OutboundEmail {
        from: sender.to_owned(),
        to: recipient.to_owned(),
        reply_to: form.email.trim().to_owned(),
        subject: format!(
            "New Market Listing Request from {} - {}",
            form.name.trim(),
            form.market_name.trim()
        ),
        html,
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(escape_html)
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
