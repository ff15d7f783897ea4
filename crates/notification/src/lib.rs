pub mod contact;
mod mailer;
mod service;

pub use contact::compose_inquiry;
pub use mailer::*;
pub use service::*;
