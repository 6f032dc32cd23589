//! Contact and subscription form handlers
//!
//! Both handlers post to `/messages` through [`SiteApi::send_message`], tell
//! the visitor how it went through a [`Notifier`] and leave the submit
//! control usable again whatever the result.

use std::collections::BTreeMap;
use std::sync::Mutex;

use gardenic_core::api::ApiError;
use gardenic_core::model::MessageSubmission;
use serde::Serialize;

use crate::api::{MessageReceipt, SiteApi};

pub const CONTACT_FIRST_NAME: &str = "Your name";
pub const CONTACT_LAST_NAME: &str = "Last Name";
pub const CONTACT_EMAIL: &str = "Your Email";
pub const CONTACT_PHONE: &str = "Subject";
pub const CONTACT_MESSAGE: &str = "message";
pub const SUBSCRIPTION_EMAIL: &str = "email";

pub const SENDING_LABEL: &str = "Sending...";
pub const DEFAULT_SUBMIT_LABEL: &str = "Send Message";

pub const CONTACT_SUCCESS: &str = "Your message has been sent successfully!";
pub const CONTACT_FAILURE: &str = "Failed to send message. Please try again later.";
pub const SUBSCRIPTION_SUCCESS: &str = "Thank you for subscribing!";
pub const SUBSCRIPTION_FAILURE: &str = "Failed to subscribe. Please try again later.";

/// State of a form's submit control
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitState {
    pub disabled: bool,
    /// New label; `None` keeps the current one
    pub label: Option<String>,
}

impl SubmitState {
    pub fn disabled(label: Option<&str>) -> Self {
        Self {
            disabled: true,
            label: label.map(str::to_string),
        }
    }

    pub fn enabled(label: Option<&str>) -> Self {
        Self {
            disabled: false,
            label: label.map(str::to_string),
        }
    }
}

pub trait Form: Send {
    /// Current value of the named input; `None` when the form has no such input
    fn field(&self, name: &str) -> Option<String>;

    /// Label of the submit control; `None` when the form has no submit control
    fn submit_label(&self) -> Option<String>;

    fn set_submit(&mut self, state: SubmitState);

    /// Clear every input
    fn reset(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Failure(message) => message,
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Build the contact form's message; inputs that are missing are sent empty
pub fn contact_submission(form: &dyn Form, recipient: Option<&str>) -> MessageSubmission {
    let value = |name: &str| form.field(name).unwrap_or_default();

    MessageSubmission {
        first_name: Some(value(CONTACT_FIRST_NAME)),
        last_name: Some(value(CONTACT_LAST_NAME)),
        email: value(CONTACT_EMAIL),
        phone: Some(value(CONTACT_PHONE)),
        message: Some(value(CONTACT_MESSAGE)),
        recipient_email: recipient.map(str::to_string),
        kind: None,
    }
}

/// Submit the contact form to `recipient`
///
/// The submit control shows [`SENDING_LABEL`] while the request is in
/// flight and gets its label back afterwards. The form is cleared only when
/// the message was accepted.
pub async fn submit_contact_form(
    api: &dyn SiteApi,
    form: &mut dyn Form,
    notifier: &dyn Notifier,
    recipient: Option<&str>,
) -> Result<MessageReceipt, ApiError> {
    let previous_label = form.submit_label();
    if previous_label.is_some() {
        form.set_submit(SubmitState::disabled(Some(SENDING_LABEL)));
    }

    let submission = contact_submission(form, recipient);
    let result = api.send_message(&submission).await;

    match &result {
        Ok(_) => {
            notifier.notify(Notice::Success(CONTACT_SUCCESS.to_string()));
            form.reset();
        }
        Err(_) => notifier.notify(Notice::Failure(CONTACT_FAILURE.to_string())),
    }

    if let Some(label) = previous_label {
        let label = if label.is_empty() {
            DEFAULT_SUBMIT_LABEL
        } else {
            label.as_str()
        };
        form.set_submit(SubmitState::enabled(Some(label)));
    }

    result
}

/// Submit the footer subscription form
///
/// Only the disabled flag of the submit control changes; its label is kept.
pub async fn submit_subscription_form(
    api: &dyn SiteApi,
    form: &mut dyn Form,
    notifier: &dyn Notifier,
) -> Result<MessageReceipt, ApiError> {
    let has_submit = form.submit_label().is_some();
    if has_submit {
        form.set_submit(SubmitState::disabled(None));
    }

    let submission = MessageSubmission::subscription(form.field(SUBSCRIPTION_EMAIL).unwrap_or_default());
    let result = api.send_message(&submission).await;

    match &result {
        Ok(_) => {
            notifier.notify(Notice::Success(SUBSCRIPTION_SUCCESS.to_string()));
            form.reset();
        }
        Err(_) => notifier.notify(Notice::Failure(SUBSCRIPTION_FAILURE.to_string())),
    }

    if has_submit {
        form.set_submit(SubmitState::enabled(None));
    }

    result
}

/// [`Form`] kept in memory
///
/// Every submit state it is given is kept in `history`, oldest first.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm {
    pub fields: BTreeMap<String, String>,
    pub submit: Option<SubmitState>,
    pub history: Vec<SubmitState>,
    pub resets: usize,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn with_submit(mut self, label: &str) -> Self {
        self.submit = Some(SubmitState::enabled(Some(label)));
        self
    }
}

impl Form for MemoryForm {
    fn field(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    fn submit_label(&self) -> Option<String> {
        self.submit
            .as_ref()
            .map(|submit| submit.label.clone().unwrap_or_default())
    }

    fn set_submit(&mut self, state: SubmitState) {
        self.history.push(state.clone());

        let Some(submit) = self.submit.as_mut() else {
            return;
        };
        submit.disabled = state.disabled;
        if state.label.is_some() {
            submit.label = state.label;
        }
    }

    fn reset(&mut self) {
        self.fields.values_mut().for_each(String::clear);
        self.resets += 1;
    }
}

/// [`Notifier`] that keeps every notice
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl CollectingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|notices| notices.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixtureApi;

    fn contact_form() -> MemoryForm {
        MemoryForm::new()
            .with_field(CONTACT_FIRST_NAME, "Ada")
            .with_field(CONTACT_LAST_NAME, "Lovelace")
            .with_field(CONTACT_EMAIL, "ada@example.com")
            .with_field(CONTACT_PHONE, "555-0100")
            .with_field(CONTACT_MESSAGE, "Do you export dried basil?")
            .with_submit("Send Now")
    }

    fn rejecting_api() -> FixtureApi {
        FixtureApi {
            send_result: Err(ApiError::Rejected("Invalid email".to_string())),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_contact_form_success() {
        let api = FixtureApi::default();
        let mut form = contact_form();
        let notifier = CollectingNotifier::default();

        let result =
            submit_contact_form(&api, &mut form, &notifier, Some("info@gardenic.example")).await;

        assert!(result.is_ok());
        assert_eq!(
            notifier.notices(),
            vec![Notice::Success(CONTACT_SUCCESS.to_string())]
        );
        assert_eq!(form.resets, 1);
        assert!(form.fields.values().all(String::is_empty));

        let sent = api.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].first_name.as_deref(), Some("Ada"));
        assert_eq!(sent[0].phone.as_deref(), Some("555-0100"));
        assert_eq!(
            sent[0].recipient_email.as_deref(),
            Some("info@gardenic.example")
        );
        assert!(sent[0].kind.is_none());
    }

    #[tokio::test]
    async fn test_contact_form_button_states() {
        let api = FixtureApi::default();
        let mut form = contact_form();
        let notifier = CollectingNotifier::default();

        submit_contact_form(&api, &mut form, &notifier, None).await.unwrap();

        assert_eq!(
            form.history,
            vec![
                SubmitState::disabled(Some(SENDING_LABEL)),
                SubmitState::enabled(Some("Send Now")),
            ]
        );
        assert_eq!(form.submit, Some(SubmitState::enabled(Some("Send Now"))));
    }

    #[tokio::test]
    async fn test_contact_form_rejected() {
        let api = rejecting_api();
        let mut form = contact_form();
        let notifier = CollectingNotifier::default();

        let result = submit_contact_form(&api, &mut form, &notifier, None).await;

        assert_eq!(
            result,
            Err(ApiError::Rejected("Invalid email".to_string()))
        );
        assert_eq!(
            notifier.notices(),
            vec![Notice::Failure(CONTACT_FAILURE.to_string())]
        );
        assert_eq!(form.resets, 0);
        assert_eq!(form.field(CONTACT_FIRST_NAME).as_deref(), Some("Ada"));
        let submit = form.submit.unwrap();
        assert!(!submit.disabled);
        assert_eq!(submit.label.as_deref(), Some("Send Now"));
    }

    #[tokio::test]
    async fn test_contact_form_without_submit_control() {
        let api = FixtureApi::default();
        let mut form = MemoryForm::new().with_field(CONTACT_EMAIL, "ada@example.com");
        let notifier = CollectingNotifier::default();

        submit_contact_form(&api, &mut form, &notifier, None).await.unwrap();

        assert!(form.history.is_empty());
        let sent = api.sent();
        assert_eq!(sent[0].first_name.as_deref(), Some(""));
        assert!(sent[0].recipient_email.is_none());
    }

    #[tokio::test]
    async fn test_subscription_form() {
        let api = FixtureApi::default();
        let mut form = MemoryForm::new()
            .with_field(SUBSCRIPTION_EMAIL, "grower@example.com")
            .with_submit("Subscribe");
        let notifier = CollectingNotifier::default();

        submit_subscription_form(&api, &mut form, &notifier)
            .await
            .unwrap();

        assert_eq!(
            api.sent(),
            vec![MessageSubmission::subscription("grower@example.com")]
        );
        assert_eq!(
            notifier.notices(),
            vec![Notice::Success(SUBSCRIPTION_SUCCESS.to_string())]
        );
        assert_eq!(
            form.history,
            vec![SubmitState::disabled(None), SubmitState::enabled(None)]
        );
        assert_eq!(form.submit_label().as_deref(), Some("Subscribe"));
    }

    #[tokio::test]
    async fn test_subscription_form_rejected() {
        let api = rejecting_api();
        let mut form = MemoryForm::new()
            .with_field(SUBSCRIPTION_EMAIL, "grower@example.com")
            .with_submit("Subscribe");
        let notifier = CollectingNotifier::default();

        let result = submit_subscription_form(&api, &mut form, &notifier).await;

        assert!(result.is_err());
        assert_eq!(
            notifier.notices()[0].message(),
            SUBSCRIPTION_FAILURE
        );
        assert_eq!(form.resets, 0);
        assert!(!form.submit.unwrap().disabled);
    }
}
