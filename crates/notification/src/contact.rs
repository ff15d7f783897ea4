use askama::Template;
use rrbusiness_contact::ContactSubmission;

use crate::{MailerError, OutgoingMail};

#[derive(Template)]
#[template(path = "contact-inquiry.html")]
pub struct ContactInquiryHtmlTemplate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub company: Option<&'a str>,
    pub message_lines: Vec<&'a str>,
}

#[derive(Template)]
#[template(path = "contact-inquiry.txt")]
pub struct ContactInquiryPlainTemplate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub company: Option<&'a str>,
    pub message: &'a str,
}

/// Builds the operator notification for a contact inquiry.
///
/// Replies go to the visitor. Phone and company lines appear only when given.
pub fn compose_inquiry(
    submission: &ContactSubmission,
    from: impl Into<String>,
    to: impl Into<String>,
) -> Result<OutgoingMail, MailerError> {
    let name = submission.full_name.trim();
    let email = submission.email.trim();
    let message = submission.message.trim();

    let html = ContactInquiryHtmlTemplate {
        name,
        email,
        phone: submission.phone(),
        company: submission.company(),
        message_lines: message.lines().collect(),
    }
    .render()?;

    let text = ContactInquiryPlainTemplate {
        name,
        email,
        phone: submission.phone(),
        company: submission.company(),
        message,
    }
    .render()?;

    Ok(OutgoingMail {
        from: from.into(),
        to: to.into(),
        reply_to: Some(email.to_owned()),
        subject: format!("New Contact Form Submission: {name}"),
        html,
        text,
    })
}
