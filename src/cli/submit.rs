use anyhow::{Context, Result, bail};
use rrbusiness_contact::{ContactForm, Field, HttpTransport, SubmissionState};
use url::Url;

pub struct SubmitArgs {
    pub endpoint: String,
    pub origin: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: String,
}

/// Sends one inquiry to a running relay through the same form state machine the site uses.
pub async fn submit(args: SubmitArgs) -> Result<()> {
    let base = Url::parse(&args.endpoint).context("invalid relay endpoint")?;
    let mut transport = HttpTransport::new(&base)?;
    if let Some(origin) = args.origin {
        transport = transport.with_origin(origin);
    }

    let mut form = ContactForm::new();
    form.update_field(Field::FullName, args.name);
    form.update_field(Field::Email, args.email);
    form.update_field(Field::Message, args.message);
    if let Some(phone) = args.phone {
        form.update_field(Field::Phone, phone);
    }
    if let Some(company) = args.company {
        form.update_field(Field::Company, company);
    }

    tracing::info!(endpoint = %transport.endpoint(), "Submitting contact inquiry");

    match form.submit(&transport).await {
        SubmissionState::Succeeded => {
            println!("Message sent.");
            Ok(())
        }
        SubmissionState::Failed(message) => bail!("{message}"),
        state => bail!("submission ended in unexpected state {state:?}"),
    }
}
