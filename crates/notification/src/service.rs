//! Email notification service using lettre

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    Message, SmtpTransport, Transport,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{Mailer, MailerError, OutgoingMail};

const DISPATCH_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    /// Falls back to `smtp_username` when empty.
    #[serde(default)]
    pub from_address: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Operator mailbox receiving every inquiry.
    #[serde(default)]
    pub contact_address: String,
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: String::new(),
            from_name: default_from_name(),
            contact_address: String::new(),
            send_timeout_secs: default_send_timeout_secs(),
        }
    }
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_name() -> String {
    "RR Business Group".to_string()
}

fn default_send_timeout_secs() -> u64 {
    30
}

impl EmailConfig {
    pub fn sender_address(&self) -> &str {
        if self.from_address.is_empty() {
            &self.smtp_username
        } else {
            &self.from_address
        }
    }

    /// `From` header value, e.g. `"RR Business Group" <info@example.com>`.
    pub fn from_header(&self) -> String {
        format!("\"{}\" <{}>", self.from_name, self.sender_address())
    }

    /// Socket timeout handed to the SMTP transport.
    pub fn send_timeout(&self) -> Duration {
        Duration::from_secs(self.send_timeout_secs)
    }

    /// Deadline for a whole dispatch, as seen by the caller.
    ///
    /// Runs past [`Self::send_timeout`] so the transport gives up first: a send
    /// already on the blocking pool cannot be cancelled and may still be delivered.
    pub fn dispatch_timeout(&self) -> Duration {
        self.send_timeout() + DISPATCH_GRACE
    }
}

/// SMTP mail provider
#[derive(Clone)]
pub struct EmailService {
    mailer: SmtpTransport,
    message_id_domain: String,
}

impl EmailService {
    /// Create a new email service from configuration
    pub fn new(config: &EmailConfig) -> Result<Self, MailerError> {
        let mailer = if config.smtp_username.is_empty() || config.smtp_password.is_empty() {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                "SMTP credentials not configured, using unauthenticated connection (e.g., MailDev)"
            );

            SmtpTransport::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .timeout(Some(config.send_timeout()))
                .build()
        } else {
            tracing::info!(
                smtp_host = %config.smtp_host,
                smtp_port = config.smtp_port,
                from = %config.sender_address(),
                "Email service initialized with authentication and TLS"
            );

            let creds =
                Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

            SmtpTransport::relay(&config.smtp_host)?
                .port(config.smtp_port)
                .credentials(creds)
                .timeout(Some(config.send_timeout()))
                .build()
        };

        let message_id_domain = config
            .sender_address()
            .rsplit_once('@')
            .map(|(_, domain)| domain.to_owned())
            .unwrap_or_else(|| "localhost".to_owned());

        Ok(Self {
            mailer,
            message_id_domain,
        })
    }

    fn build_message(&self, mail: OutgoingMail, message_id: &str) -> Result<Message, MailerError> {
        let mut builder = Message::builder()
            .message_id(Some(message_id.to_owned()))
            .from(mail.from.parse()?)
            .to(mail.to.parse()?)
            .subject(mail.subject);

        if let Some(reply_to) = mail.reply_to {
            match reply_to.parse::<Mailbox>() {
                Ok(mailbox) => builder = builder.reply_to(mailbox),
                Err(err) => tracing::warn!(
                    error = %err,
                    reply_to = %reply_to,
                    "Reply-To is not a valid mailbox, sending without it"
                ),
            }
        }

        Ok(builder.multipart(MultiPart::alternative_plain_html(mail.text, mail.html))?)
    }
}

#[async_trait]
impl Mailer for EmailService {
    async fn send(&self, mail: OutgoingMail) -> Result<String, MailerError> {
        let message_id = format!("<{}@{}>", Uuid::new_v4(), self.message_id_domain);

        tracing::info!(to = %mail.to, subject = %mail.subject, "Sending email");

        let message = self.build_message(mail, &message_id)?;
        let mailer = self.mailer.clone();

        tokio::task::spawn_blocking(move || mailer.send(&message)).await??;

        Ok(message_id)
    }
}
