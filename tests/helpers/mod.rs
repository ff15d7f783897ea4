//! Shared setup for relay integration tests: a test configuration and
//! in-process mail providers standing in for SMTP.

#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use rrbusiness::config::{Config, CorsConfig, ObservabilityConfig, ServerConfig};
use rrbusiness_notification::{EmailConfig, Mailer, MailerError, OutgoingMail};
use serde_json::Value;

pub const ALLOWED_ORIGIN: &str = "http://localhost:5173";
pub const CONTACT_ADDRESS: &str = "info@rrbusinessgroup.com";
pub const MESSAGE_ID: &str = "<test-1@rrbusinessgroup.com>";

/// Accepts every mail and keeps a copy.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<String, MailerError> {
        self.sent.lock().unwrap().push(mail);
        Ok(MESSAGE_ID.to_string())
    }
}

/// Rejects every mail the way an SMTP server refusing credentials would.
#[derive(Default)]
pub struct FailingMailer {
    calls: AtomicUsize,
}

pub const PROVIDER_ERROR: &str = "535-5.7.8 Username and Password not accepted";

impl FailingMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _mail: OutgoingMail) -> Result<String, MailerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(MailerError::Provider(PROVIDER_ERROR.to_string()))
    }
}

/// Never answers.
pub struct HangingMailer;

#[async_trait]
impl Mailer for HangingMailer {
    async fn send(&self, _mail: OutgoingMail) -> Result<String, MailerError> {
        std::future::pending().await
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3001,
            static_dir: None,
        },
        cors: CorsConfig::default(),
        email: EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: "relay@rrbusinessgroup.com".to_string(),
            contact_address: CONTACT_ADDRESS.to_string(),
            send_timeout_secs: 5,
            ..Default::default()
        },
        observability: ObservabilityConfig::default(),
    }
}

pub fn app(mailer: Arc<dyn Mailer>) -> Router {
    rrbusiness::create_app(test_config(), mailer)
}

pub fn app_with(config: Config, mailer: Arc<dyn Mailer>) -> Router {
    rrbusiness::create_app(config, mailer)
}

pub fn jane() -> Value {
    serde_json::json!({
        "user_name": "Jane Doe",
        "user_email": "jane@x.com",
        "message": "Hello"
    })
}

pub fn send_email_request(origin: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/send-email")
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(origin) = origin {
        builder = builder.header(header::ORIGIN, origin);
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, value)
}

pub async fn read_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}
