use std::time::Duration;

use serde::Serialize;
use url::Url;

use crate::fetcher::Fetcher;

pub const MESSAGE_DURATION: Duration = Duration::from_millis(7500);
pub const SUCCESS_MESSAGE: &str = "Form submitted successfully.";
pub const FAILURE_MESSAGE: &str = "Form submission failed. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Field names the form relay expects.
#[derive(Debug, Serialize)]
struct RelayPayload<'a> {
    #[serde(rename = "_replyto")]
    reply_to: &'a str,
    #[serde(rename = "_subject")]
    subject: &'a str,
    message: &'a str,
}

impl ContactForm {
    pub fn new(
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            anyhow::bail!("required fields are empty: {}", missing.join(", "));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed,
}

impl SubmitOutcome {
    pub fn message(self) -> &'static str {
        match self {
            SubmitOutcome::Sent => SUCCESS_MESSAGE,
            SubmitOutcome::Failed => FAILURE_MESSAGE,
        }
    }
}

/// One POST to the relay. Transport errors and non-2xx both count as failure.
pub async fn submit(fetcher: &Fetcher, relay: &Url, form: &ContactForm) -> SubmitOutcome {
    let payload = RelayPayload {
        reply_to: &form.email,
        subject: &form.subject,
        message: &form.message,
    };
    match fetcher.post_json(relay.clone(), &payload).await {
        Ok(status) if status.is_success() => {
            tracing::info!(%status, "contact form relayed");
            SubmitOutcome::Sent
        }
        Ok(status) => {
            tracing::warn!(%status, "contact relay rejected submission");
            SubmitOutcome::Failed
        }
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "contact relay unreachable");
            SubmitOutcome::Failed
        }
    }
}

/// Contact view state: the draft, the in-flight flag, and the result banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactState {
    pub form: ContactForm,
    pub submitting: bool,
    pub result: Option<SubmitOutcome>,
    pub show_result: bool,
}

impl ContactState {
    pub fn submit_disabled(&self) -> bool {
        self.submitting
    }

    pub fn visible_message(&self) -> Option<&'static str> {
        match (self.show_result, self.result) {
            (true, Some(outcome)) => Some(outcome.message()),
            _ => None,
        }
    }

    /// Records a settled request. The draft is cleared only on success.
    pub fn settle(&mut self, outcome: SubmitOutcome) {
        self.submitting = false;
        self.result = Some(outcome);
        self.show_result = true;
        if outcome == SubmitOutcome::Sent {
            self.form = ContactForm::default();
        }
    }
}
