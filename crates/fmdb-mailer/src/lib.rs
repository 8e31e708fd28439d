//! HTTP client for the outbound mail relay.
//!
//! The directory does not speak SMTP itself; contact-form submissions are
//! rendered to an HTML email and posted as JSON to a relay API. This crate
//! holds the client, the form validation, and the template rendering.

mod client;
mod error;
mod types;

pub use client::MailerClient;
pub use error::MailerError;
pub use types::{render_contact_email, ContactForm, ContactFormError, OutboundEmail};
