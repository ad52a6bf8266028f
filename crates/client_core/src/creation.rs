use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, PoisonError,
};

use shared::protocol::CreateLinkRequest;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::{api::LinkApiError, notification::Notification, ClientContext, ClientEvent};

pub const CREATE_FALLBACK_TEXT: &str = "Error creating link";
pub const TRANSPORT_FAILURE_TEXT: &str = "Something went wrong";
pub const MISSING_URL_TEXT: &str = "Long URL is required";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInputs {
    pub url: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created { short_url: String },
    /// The server answered with a non-success status.
    Rejected { message: String },
    /// No usable response was obtained.
    Failed,
    /// A previous submit is still awaiting its response; nothing was sent.
    AlreadyInFlight,
    MissingUrl,
}

/// The create form's inputs plus the single-flight `submitting` flag.
pub struct CreationForm {
    inputs: Mutex<FormInputs>,
    submitting: AtomicBool,
    events: broadcast::Sender<ClientEvent>,
}

impl CreationForm {
    pub(crate) fn new(events: broadcast::Sender<ClientEvent>) -> Self {
        Self {
            inputs: Mutex::new(FormInputs::default()),
            submitting: AtomicBool::new(false),
            events,
        }
    }

    pub fn set_url(&self, url: impl Into<String>) {
        self.lock().url = url.into();
    }

    /// Stored as typed; only surrounding whitespace is dropped at submit.
    pub fn set_code(&self, code: impl Into<String>) {
        self.lock().code = code.into();
    }

    pub fn inputs(&self) -> FormInputs {
        self.lock().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    fn clear_inputs(&self) {
        *self.lock() = FormInputs::default();
        let _ = self.events.send(ClientEvent::FormCleared);
    }

    fn begin(&self) -> Option<SubmittingGuard<'_>> {
        self.submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        let _ = self.events.send(ClientEvent::SubmittingChanged(true));
        Some(SubmittingGuard { form: self })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FormInputs> {
        self.inputs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resets `submitting` on every exit path of a submit.
struct SubmittingGuard<'a> {
    form: &'a CreationForm,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.form.submitting.store(false, Ordering::SeqCst);
        let _ = self.form.events.send(ClientEvent::SubmittingChanged(false));
    }
}

impl ClientContext {
    /// Replaces both form inputs, then submits them.
    pub async fn submit_with(&self, url: &str, code: &str) -> SubmitOutcome {
        let Some(submitting) = self.form.begin() else {
            debug!("links: submit ignored, creation already in flight");
            return SubmitOutcome::AlreadyInFlight;
        };
        self.form.set_url(url);
        self.form.set_code(code);
        self.run_submit(submitting).await
    }

    /// Creates a link from the current form inputs. At most one submit runs
    /// at a time; overlapping calls return [`SubmitOutcome::AlreadyInFlight`].
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(submitting) = self.form.begin() else {
            debug!("links: submit ignored, creation already in flight");
            return SubmitOutcome::AlreadyInFlight;
        };
        self.run_submit(submitting).await
    }

    async fn run_submit(&self, submitting: SubmittingGuard<'_>) -> SubmitOutcome {
        let inputs = self.form.inputs();
        if inputs.url.trim().is_empty() {
            self.notifications.set(Notification::error(MISSING_URL_TEXT));
            return SubmitOutcome::MissingUrl;
        }

        self.notifications.clear();
        let request = CreateLinkRequest::from_inputs(&inputs.url, &inputs.code);

        match self.api.create_link(&request).await {
            Ok(created) => {
                info!(
                    short_url = %created.short_url,
                    custom_code = request.code().is_some(),
                    "links: short link created"
                );
                self.notifications.set(Notification::success(format!(
                    "Short URL created: {}",
                    created.short_url
                )));
                self.form.clear_inputs();
                // The form is usable again while the directory reloads.
                drop(submitting);
                self.refresh().await;
                SubmitOutcome::Created {
                    short_url: created.short_url,
                }
            }
            Err(LinkApiError::Rejected(rejection)) => {
                warn!(status = rejection.status, "links: create rejected: {rejection}");
                let message = rejection
                    .message()
                    .unwrap_or(CREATE_FALLBACK_TEXT)
                    .to_string();
                self.notifications.set(Notification::error(message.clone()));
                SubmitOutcome::Rejected { message }
            }
            Err(err) => {
                error!("links: create failed: {err}");
                self.notifications
                    .set(Notification::error(TRANSPORT_FAILURE_TEXT));
                SubmitOutcome::Failed
            }
        }
    }
}
