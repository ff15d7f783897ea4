use async_trait::async_trait;
use reqwest::header;
use thiserror::Error;
use url::Url;

use crate::{ContactError, ContactSubmission, RelayResponse};

/// Path of the relay endpoint, relative to the relay base url.
pub const SEND_EMAIL_PATH: &str = "/api/send-email";

/// Port the relay listens on when the site runs from a development server.
pub const DEV_RELAY_PORT: u16 = 3000;

/// What the relay answered, whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayReply {
    pub status: u16,
    /// `None` when the body was not a relay response (proxy error page, empty body, ...).
    pub body: Option<RelayResponse>,
}

impl RelayReply {
    pub fn is_status_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_success(&self) -> bool {
        self.is_status_success() && self.body.as_ref().is_some_and(|body| body.success)
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("relay request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("relay unreachable: {0}")]
    Unreachable(String),
}

/// Delivers a submission to the relay.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, submission: &ContactSubmission) -> Result<RelayReply, TransportError>;
}

/// How the page hosting the form is being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Front-end dev server; the relay runs next to it on [`DEV_RELAY_PORT`].
    Development,
    /// Front-end and relay share an origin.
    Production,
}

/// Computes the relay base url for a page loaded from `page`.
pub fn relay_base_url(page: &Url, mode: Mode) -> Result<Url, ContactError> {
    match mode {
        Mode::Development => {
            let host = page.host_str().ok_or(url::ParseError::EmptyHost)?;
            Ok(Url::parse(&format!(
                "{}://{}:{}",
                page.scheme(),
                host,
                DEV_RELAY_PORT
            ))?)
        }
        Mode::Production => Ok(Url::parse(&page.origin().ascii_serialization())?),
    }
}

/// [`Transport`] posting JSON over HTTP, as a browser would.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    origin: Option<String>,
}

impl HttpTransport {
    /// Transport posting to `base` + [`SEND_EMAIL_PATH`], without an `Origin` header.
    pub fn new(base: &Url) -> Result<Self, ContactError> {
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: base.join(SEND_EMAIL_PATH)?,
            origin: None,
        })
    }

    /// Transport for a form embedded in `page`, declaring the page origin.
    pub fn for_page(page: &Url, mode: Mode) -> Result<Self, ContactError> {
        let base = relay_base_url(page, mode)?;

        Ok(Self::new(&base)?.with_origin(page.origin().ascii_serialization()))
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, submission: &ContactSubmission) -> Result<RelayReply, TransportError> {
        let mut request = self.client.post(self.endpoint.clone()).json(submission);

        if let Some(origin) = &self.origin {
            request = request.header(header::ORIGIN, origin);
        }

        tracing::info!(endpoint = %self.endpoint, "Posting contact submission");

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice::<RelayResponse>(&bytes).ok();

        tracing::debug!(status, parsed = body.is_some(), "Relay answered");

        Ok(RelayReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_targets_relay_port_on_page_host() {
        let page = Url::parse("http://192.168.1.20:5173/contact").unwrap();

        let base = relay_base_url(&page, Mode::Development).unwrap();

        assert_eq!(base.as_str(), "http://192.168.1.20:3000/");
    }

    #[test]
    fn production_targets_page_origin() {
        let page = Url::parse("https://rrbusinessgroup.com/contact?x=1").unwrap();

        let transport = HttpTransport::for_page(&page, Mode::Production).unwrap();

        assert_eq!(
            transport.endpoint().as_str(),
            "https://rrbusinessgroup.com/api/send-email"
        );
        assert_eq!(
            transport.origin.as_deref(),
            Some("https://rrbusinessgroup.com")
        );
    }

    #[test]
    fn success_requires_2xx_and_confirmation() {
        let sent = RelayResponse::sent("<id@x>");

        assert!(RelayReply { status: 200, body: Some(sent.clone()) }.is_success());
        assert!(!RelayReply { status: 500, body: Some(sent) }.is_success());
        assert!(!RelayReply { status: 200, body: None }.is_success());
        assert!(
            !RelayReply {
                status: 200,
                body: Some(RelayResponse::rejected("no"))
            }
            .is_success()
        );
    }
}
