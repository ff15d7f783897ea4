use async_trait::async_trait;
use thiserror::Error;

/// A message ready to hand to a mail provider.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("failed to render template: {0}")]
    Template(#[from] askama::Error),

    #[error("send task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("{0}")]
    Provider(String),
}

/// Transactional mail provider.
///
/// Returns the provider message identifier on acceptance.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<String, MailerError>;
}
