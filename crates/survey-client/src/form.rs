//! Survey form state and submission flow.
//!
//! [`FormState`] holds exactly what the user typed. [`SurveyForm`] wraps it
//! with the view state (editing, submitting, confirmed) and the transport.
//! Local guards run before anything leaves the process: a too-short `want` or
//! a missing consent never reaches the network.

use chrono::{DateTime, Utc};
use serde::Serialize;
use survey_core::defaults::{
    CATEGORIES, FORM_BUDGET, FORM_URGENCY, WANT_COUNTER_CAP, WANT_MIN,
};
use survey_core::models::iso_millis;
use survey_core::SubmissionPayload;
use thiserror::Error;

use crate::transport::Transport;

/// Text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Category,
    Want,
    Why,
    Urgency,
    Budget,
    Tags,
}

/// Error shown in the form's inline banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please describe what you want in at least 8 characters.")]
    WantTooShort,

    #[error("Please accept the consent to continue.")]
    ConsentRequired,

    /// Server answered with a non-2xx status; carries the response text.
    #[error("{0}")]
    Rejected(String),

    /// Request never completed.
    #[error("{0}")]
    Transport(String),
}

/// Live character counter for the `want` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WantCounter {
    pub len: usize,
    pub cap: usize,
    /// Below the minimum; rendered as a warning.
    pub too_short: bool,
}

impl std::fmt::Display for WantCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.len, self.cap)
    }
}

/// Controlled form fields, as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub category: String,
    pub want: String,
    pub why: String,
    pub urgency: String,
    pub budget: String,
    /// Comma-separated, unparsed.
    pub tags: String,
    pub consent: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            category: CATEGORIES[0].to_string(),
            want: String::new(),
            why: String::new(),
            urgency: FORM_URGENCY.to_string(),
            budget: FORM_BUDGET.to_string(),
            tags: String::new(),
            consent: false,
        }
    }
}

/// Field order of the "copy my response" JSON.
#[derive(Serialize)]
struct CopiedResponse<'a> {
    want: &'a str,
    why: &'a str,
    category: &'a str,
    urgency: &'a str,
    budget: &'a str,
    tags: &'a str,
    name: &'a str,
    email: &'a str,
}

impl FormState {
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Category => self.category = value,
            Field::Want => self.want = value,
            Field::Why => self.why = value,
            Field::Urgency => self.urgency = value,
            Field::Budget => self.budget = value,
            Field::Tags => self.tags = value,
        }
    }

    pub fn set_consent(&mut self, consent: bool) {
        self.consent = consent;
    }

    /// Back to a blank form with the default selections.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn want_counter(&self) -> WantCounter {
        let len = self.want.chars().count();
        WantCounter {
            len,
            cap: WANT_COUNTER_CAP,
            too_short: len < WANT_MIN,
        }
    }

    /// Local guards, in display priority order.
    pub fn check(&self) -> Result<(), FormError> {
        if self.want.trim().chars().count() < WANT_MIN {
            return Err(FormError::WantTooShort);
        }
        if !self.consent {
            return Err(FormError::ConsentRequired);
        }
        Ok(())
    }

    /// Wire payload for the current fields.
    ///
    /// Free-text fields are trimmed and dropped when blank. Tags are split on
    /// `,`, trimmed and emptied pieces removed; an empty tags input omits the
    /// field entirely.
    pub fn to_payload(&self, now: DateTime<Utc>) -> SubmissionPayload {
        SubmissionPayload {
            name: trimmed(&self.name),
            email: trimmed(&self.email),
            category: self.category.clone(),
            want: self.want.trim().to_string(),
            why: trimmed(&self.why),
            urgency: Some(self.urgency.clone()),
            budget: Some(self.budget.clone()),
            tags: split_tags(&self.tags),
            consent: self.consent,
            submitted_at: iso_millis::format(&now),
        }
    }

    /// Pretty JSON of the locally held answers, as typed.
    pub fn copy_json(&self) -> String {
        let copied = CopiedResponse {
            want: &self.want,
            why: &self.why,
            category: &self.category,
            urgency: &self.urgency,
            budget: &self.budget,
            tags: &self.tags,
            name: &self.name,
            email: &self.email,
        };
        // A struct of string fields always serializes.
        serde_json::to_string_pretty(&copied).unwrap_or_default()
    }
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn split_tags(raw: &str) -> Option<Vec<String>> {
    if raw.is_empty() {
        return None;
    }
    Some(
        raw.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
    )
}

/// What the form is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormView {
    Editing { error: Option<FormError> },
    Submitting,
    Confirmation,
}

/// A form bound to a transport.
pub struct SurveyForm<T> {
    state: FormState,
    view: FormView,
    transport: T,
}

impl<T: Transport> SurveyForm<T> {
    pub fn new(transport: T) -> Self {
        Self::with_state(transport, FormState::default())
    }

    pub fn with_state(transport: T, state: FormState) -> Self {
        Self {
            state,
            view: FormView::Editing { error: None },
            transport,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Mutable access for editing; only meaningful while editing.
    pub fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    pub fn view(&self) -> &FormView {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Inline error currently shown, if any.
    pub fn error(&self) -> Option<&FormError> {
        match &self.view {
            FormView::Editing { error } => error.as_ref(),
            _ => None,
        }
    }

    /// Run the guards, post the payload and move to the resulting view.
    ///
    /// On any failure the fields are kept as they were.
    pub async fn submit(&mut self) -> Result<(), FormError> {
        self.view = FormView::Editing { error: None };

        if let Err(e) = self.state.check() {
            return Err(self.fail(e));
        }

        self.view = FormView::Submitting;
        let payload = self.state.to_payload(Utc::now());

        match self.transport.post_json(&payload).await {
            Ok(response) if response.is_success() => {
                self.view = FormView::Confirmation;
                Ok(())
            }
            Ok(response) => {
                let message = if response.body.is_empty() {
                    "Failed to submit".to_string()
                } else {
                    response.body
                };
                Err(self.fail(FormError::Rejected(message)))
            }
            Err(e) => {
                let message = e.to_string();
                let message = if message.is_empty() {
                    "Submission failed".to_string()
                } else {
                    message
                };
                Err(self.fail(FormError::Transport(message)))
            }
        }
    }

    /// Copy text offered on the confirmation view.
    pub fn copy_json(&self) -> Option<String> {
        match self.view {
            FormView::Confirmation => Some(self.state.copy_json()),
            _ => None,
        }
    }

    /// "Submit another": blank form, editing view.
    pub fn restart(&mut self) {
        self.state.reset();
        self.view = FormView::Editing { error: None };
    }

    fn fail(&mut self, error: FormError) -> FormError {
        self.view = FormView::Editing {
            error: Some(error.clone()),
        };
        error
    }
}
