use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    ContactSubmission, Field, RelayReply, SubmissionState, Transport, TransportError,
    state::{NETWORK_ERROR_MESSAGE, SEND_FAILED_MESSAGE},
    validation::REQUIRED_FIELDS_CLIENT_MESSAGE,
};

/// What the caller must do after [`ContactForm::begin_submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAction {
    /// Send this submission to the relay, then report back with [`ContactForm::finish`].
    Send(ContactSubmission),
    /// Required fields are missing; the form is now `Failed`.
    Rejected,
    /// A submission is already in flight.
    Ignored,
}

/// In-progress contact form: the typed fields plus the submit state.
///
/// Every transition is a plain method on this value so it can be driven
/// without any UI or network.
#[derive(Debug, Default, Clone)]
pub struct ContactForm {
    submission: ContactSubmission,
    state: SubmissionState,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submission(&self) -> &ContactSubmission {
        &self.submission
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.submission.set(field, value);

        if self.state.is_terminal() {
            self.state = SubmissionState::Idle;
        }
    }

    pub fn begin_submit(&mut self) -> SubmitAction {
        if self.state.is_submitting() {
            tracing::debug!("Submit ignored, a submission is already in flight");
            return SubmitAction::Ignored;
        }

        if let Err(err) = self.submission.check_required() {
            tracing::debug!(error = %err, "Contact form rejected locally");
            self.state = SubmissionState::Failed(REQUIRED_FIELDS_CLIENT_MESSAGE.to_owned());
            return SubmitAction::Rejected;
        }

        self.state = SubmissionState::Submitting;

        SubmitAction::Send(self.submission.clone())
    }

    /// Applies the outcome of the request started by `begin_submit`.
    ///
    /// Outcomes arriving while no submission is in flight are dropped.
    pub fn finish(&mut self, outcome: Result<RelayReply, TransportError>) {
        if !self.state.is_submitting() {
            return;
        }

        self.state = match outcome {
            Ok(reply) if reply.is_success() => {
                self.submission.clear();
                SubmissionState::Succeeded
            }
            Ok(reply) => SubmissionState::Failed(failure_message(&reply)),
            Err(err) => {
                tracing::warn!(error = %err, "Contact form submission failed");
                SubmissionState::Failed(NETWORK_ERROR_MESSAGE.to_owned())
            }
        };
    }

    /// Runs a full submit attempt against `transport`.
    pub async fn submit<T: Transport + ?Sized>(&mut self, transport: &T) -> &SubmissionState {
        if let SubmitAction::Send(submission) = self.begin_submit() {
            let outcome = transport.send(&submission).await;
            self.finish(outcome);
        }

        &self.state
    }
}

fn failure_message(reply: &RelayReply) -> String {
    let server_message = reply
        .body
        .as_ref()
        .map(|body| body.message.trim())
        .filter(|message| !message.is_empty());

    match server_message {
        Some(message) => message.to_owned(),
        None if reply.is_status_success() => SEND_FAILED_MESSAGE.to_owned(),
        None => NETWORK_ERROR_MESSAGE.to_owned(),
    }
}

/// A [`ContactForm`] shared between tasks, bound to a transport.
///
/// Cloning gives another handle on the same form. Submitting from any handle
/// while a request is in flight has no effect.
pub struct FormController<T> {
    form: Arc<Mutex<ContactForm>>,
    transport: Arc<T>,
}

impl<T> Clone for FormController<T> {
    fn clone(&self) -> Self {
        Self {
            form: self.form.clone(),
            transport: self.transport.clone(),
        }
    }
}

impl<T: Transport> FormController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            form: Arc::new(Mutex::new(ContactForm::new())),
            transport: Arc::new(transport),
        }
    }

    pub fn update_field(&self, field: Field, value: impl Into<String>) {
        self.lock().update_field(field, value);
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state().clone()
    }

    pub fn submission(&self) -> ContactSubmission {
        self.lock().submission().clone()
    }

    pub async fn submit(&self) -> SubmissionState {
        let action = self.lock().begin_submit();

        let SubmitAction::Send(submission) = action else {
            return self.state();
        };

        let outcome = self.transport.send(&submission).await;

        let mut form = self.lock();
        form.finish(outcome);
        form.state().clone()
    }

    fn lock(&self) -> MutexGuard<'_, ContactForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
