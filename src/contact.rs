//! Contact form state machine and submitter.
//!
//! ```text
//!            begin_submit            finish(Ok success)
//!   Idle ──────────────► Loading ─────────────────────► Sent ──(3 s)──► Idle
//!    ▲                      │
//!    │                      │ finish(Err / success: false)
//!    └── begin_submit ── Error(msg)
//! ```
//!
//! The form owns the field values and the status; the network call sits
//! behind [`Submitter`] so tests can swap in a mock. [`SubmitWorker`] runs a
//! submitter on its own thread so a slow endpoint never stalls a frame.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ContactError;
use crate::timer::Timer;

/// Default form endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.web3forms.com/submit";
/// Public key identifying the page to the form endpoint.
pub const DEFAULT_ACCESS_KEY: &str = "29e17af6-42f4-435d-acf9-51d33c02814a";

/// Contact endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub endpoint: String,
    pub access_key: String,
    /// How long the "sent" confirmation stays up.
    pub sent_ms: u64,
    /// Request timeout.
    pub timeout_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            access_key: DEFAULT_ACCESS_KEY.into(),
            sent_ms: 3000,
            timeout_ms: 10_000,
        }
    }
}

impl ContactConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_access_key(mut self, key: impl Into<String>) -> Self {
        self.access_key = key.into();
        self
    }

    pub fn with_sent_duration(mut self, duration: Duration) -> Self {
        self.sent_ms = duration.as_millis() as u64;
        self
    }

    pub fn sent_duration(&self) -> Duration {
        Duration::from_millis(self.sent_ms)
    }
}

/// A snapshot of the fields being sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Body returned by the form endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// One of the three text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [ContactField::Name, ContactField::Email, ContactField::Message];

    /// The field after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            ContactField::Name => ContactField::Email,
            ContactField::Email => ContactField::Message,
            ContactField::Message => ContactField::Name,
        }
    }

    /// Whether Enter inserts a line break rather than submitting.
    pub fn is_multiline(self) -> bool {
        self == ContactField::Message
    }
}

/// Delivers a submission somewhere.
pub trait Submitter {
    fn submit(&self, submission: &Submission) -> Result<SubmitResponse, ContactError>;
}

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Loading,
    Sent,
    Error(ContactError),
}

impl FormStatus {
    /// Inline message to show under the form, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            FormStatus::Error(err) => Some(err.user_message()),
            _ => None,
        }
    }
}

/// The contact form.
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    status: FormStatus,
    sent_timer: Timer,
    sent_duration: Duration,
}

impl ContactForm {
    pub fn new(sent_duration: Duration) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            status: FormStatus::Idle,
            sent_timer: Timer::once(sent_duration),
            sent_duration,
        }
    }

    #[inline]
    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    #[inline]
    pub fn is_loading(&self) -> bool {
        self.status == FormStatus::Loading
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        }
    }

    /// Validate and move to `Loading`, returning what to send.
    ///
    /// Rejected while a previous submission is still outstanding.
    pub fn begin_submit(&mut self) -> Result<Submission, ContactError> {
        if self.is_loading() {
            return Err(ContactError::AlreadySending);
        }
        let missing = [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty());
        if let Some((field, _)) = missing {
            let err = ContactError::MissingField(field);
            self.status = FormStatus::Error(err.clone());
            return Err(err);
        }

        self.status = FormStatus::Loading;
        Ok(Submission {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
        })
    }

    /// Apply the outcome of the outstanding submission.
    ///
    /// On success the fields are cleared and the form shows "sent" until
    /// the confirmation window elapses. On failure the fields are kept.
    pub fn finish(
        &mut self,
        result: Result<SubmitResponse, ContactError>,
    ) -> Result<(), ContactError> {
        if !self.is_loading() {
            tracing::warn!("submission result arrived with nothing outstanding");
            return Ok(());
        }
        let outcome = match result {
            Ok(response) if response.success => Ok(()),
            Ok(response) => Err(ContactError::Rejected(response.message)),
            Err(err) => Err(err),
        };

        match &outcome {
            Ok(()) => {
                tracing::info!("contact message sent");
                self.name.clear();
                self.email.clear();
                self.message.clear();
                self.sent_timer.reset_to(self.sent_duration);
                self.status = FormStatus::Sent;
            }
            Err(err) => {
                tracing::warn!(error = %err, "contact submission failed");
                self.status = FormStatus::Error(err.clone());
            }
        }
        outcome
    }

    /// Submit synchronously through `submitter`.
    pub fn submit_with(&mut self, submitter: &dyn Submitter) -> Result<(), ContactError> {
        let submission = self.begin_submit()?;
        let result = submitter.submit(&submission);
        self.finish(result)
    }

    /// Advance the "sent" confirmation window.
    pub fn tick(&mut self, dt: Duration) {
        if self.status == FormStatus::Sent && self.sent_timer.tick(dt) > 0 {
            self.status = FormStatus::Idle;
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new(ContactConfig::default().sent_duration())
    }
}

/// Posts submissions as a URL-encoded form to a web3forms-style endpoint.
pub struct FormClient {
    agent: ureq::Agent,
    endpoint: String,
    access_key: String,
}

impl FormClient {
    pub fn new(config: &ContactConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build();
        Self {
            agent,
            endpoint: config.endpoint.clone(),
            access_key: config.access_key.clone(),
        }
    }
}

impl Submitter for FormClient {
    fn submit(&self, submission: &Submission) -> Result<SubmitResponse, ContactError> {
        tracing::info!(endpoint = %self.endpoint, "sending contact message");
        let result = self.agent.post(&self.endpoint).send_form(&[
            ("name", submission.name.as_str()),
            ("email", submission.email.as_str()),
            ("message", submission.message.as_str()),
            ("access_key", self.access_key.as_str()),
        ]);

        // Error statuses still carry a JSON body with `success: false`.
        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                tracing::debug!(code, "form endpoint returned error status");
                response
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(ContactError::Transport(transport.to_string()));
            }
        };

        response
            .into_json::<SubmitResponse>()
            .map_err(|e| ContactError::InvalidResponse(e.to_string()))
    }
}

/// Runs a [`Submitter`] on a background thread.
///
/// Submissions go in with [`send`](Self::send) and results come back in
/// order through [`poll`](Self::poll), which never blocks. The thread exits
/// once the worker is dropped and any request in flight has finished.
pub struct SubmitWorker {
    jobs: Sender<Submission>,
    results: Receiver<Result<SubmitResponse, ContactError>>,
    pending: usize,
}

impl SubmitWorker {
    pub fn spawn<S>(submitter: S) -> std::io::Result<Self>
    where
        S: Submitter + Send + 'static,
    {
        let (jobs, job_rx) = mpsc::channel::<Submission>();
        let (result_tx, results) = mpsc::channel();
        thread::Builder::new()
            .name("folio-contact".into())
            .spawn(move || {
                for submission in job_rx {
                    if result_tx.send(submitter.submit(&submission)).is_err() {
                        break;
                    }
                }
            })?;
        Ok(Self {
            jobs,
            results,
            pending: 0,
        })
    }

    /// Queue a submission.
    pub fn send(&mut self, submission: Submission) -> Result<(), ContactError> {
        self.jobs
            .send(submission)
            .map_err(|_| ContactError::Transport("contact worker stopped".into()))?;
        self.pending += 1;
        Ok(())
    }

    /// Submissions sent but not yet answered.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Take the next finished result, if any.
    ///
    /// A worker that died with requests outstanding answers each of them
    /// with a transport error.
    pub fn poll(&mut self) -> Option<Result<SubmitResponse, ContactError>> {
        if self.pending == 0 {
            return None;
        }
        let result = match self.results.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                Err(ContactError::Transport("contact worker stopped".into()))
            }
        };
        self.pending -= 1;
        Some(result)
    }
}

impl std::fmt::Debug for SubmitWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmitWorker")
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Reply(Result<SubmitResponse, ContactError>);

    impl Submitter for Reply {
        fn submit(&self, _: &Submission) -> Result<SubmitResponse, ContactError> {
            self.0.clone()
        }
    }

    fn filled() -> ContactForm {
        let mut form = ContactForm::default();
        form.name = "Ada".into();
        form.email = "ada@example.com".into();
        form.message = "Hello".into();
        form
    }

    #[test]
    fn test_loading_blocks_resubmit() {
        let mut form = filled();
        form.begin_submit().unwrap();
        assert_eq!(form.begin_submit(), Err(ContactError::AlreadySending));
        assert!(form.is_loading());
    }

    #[test]
    fn test_blank_field_rejected() {
        let mut form = filled();
        form.email = "  ".into();
        assert_eq!(form.begin_submit(), Err(ContactError::MissingField("email")));
        assert_eq!(form.status().message(), Some("Please fill in every field."));
    }

    #[test]
    fn test_success_clears_and_expires() {
        let mut form = filled();
        let ok = Reply(Ok(SubmitResponse { success: true, message: String::new() }));
        form.submit_with(&ok).unwrap();

        assert_eq!(form.status(), &FormStatus::Sent);
        assert!(form.name.is_empty() && form.email.is_empty() && form.message.is_empty());

        form.tick(Duration::from_millis(2999));
        assert_eq!(form.status(), &FormStatus::Sent);
        form.tick(Duration::from_millis(1));
        assert_eq!(form.status(), &FormStatus::Idle);
    }

    #[test]
    fn test_rejection_keeps_fields() {
        let mut form = filled();
        let rejected = Reply(Ok(SubmitResponse { success: false, message: "bad key".into() }));
        let err = form.submit_with(&rejected).unwrap_err();

        assert_eq!(err, ContactError::Rejected("bad key".into()));
        assert_eq!(
            form.status().message(),
            Some("Failed to send message. Please try again.")
        );
        assert_eq!(form.name, "Ada");
    }

    #[test]
    fn test_transport_error_message() {
        let mut form = filled();
        let down = Reply(Err(ContactError::Transport("dns".into())));
        form.submit_with(&down).unwrap_err();
        assert_eq!(
            form.status().message(),
            Some("Error sending message. Please try again.")
        );
        assert_eq!(form.message, "Hello");
    }

    #[test]
    fn test_stray_result_ignored() {
        let mut form = filled();
        assert!(form
            .finish(Ok(SubmitResponse { success: true, message: String::new() }))
            .is_ok());
        assert_eq!(form.status(), &FormStatus::Idle);
        assert_eq!(form.name, "Ada");
    }

    #[test]
    fn test_fields_by_name() {
        let mut form = filled();
        form.field_mut(ContactField::Email).push('!');
        assert_eq!(form.field(ContactField::Email), "ada@example.com!");
        assert_eq!(ContactField::Message.next(), ContactField::Name);
        assert!(ContactField::Message.is_multiline());
        assert!(!ContactField::Name.is_multiline());
    }

    #[test]
    fn test_response_parses_without_message() {
        let r: SubmitResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(r.success);
    }
}
