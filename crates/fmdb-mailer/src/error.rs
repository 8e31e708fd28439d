use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("mail relay base URL '{0}' is not a valid URL")]
    InvalidBaseUrl(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("mail relay rejected the message: HTTP {status}: {body}")]
    Relay { status: u16, body: String },
}
