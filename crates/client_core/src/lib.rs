use std::sync::Arc;

use tokio::sync::broadcast;
use url::Url;

pub mod api;
pub mod clipboard;
pub mod config;
mod creation;
mod deletion;
pub mod directory;
pub mod notification;
pub mod view;

pub use api::{HttpLinkApi, LinkApi, LinkApiError};
pub use clipboard::{ClipboardError, ClipboardSink, MissingClipboard};
pub use config::{ClientSettings, ConfigError};
pub use creation::{CreationForm, FormInputs, SubmitOutcome};
pub use directory::{DirectorySnapshot, DirectoryStore};
pub use notification::{Notification, NotificationChannel, Severity};
pub use view::DirectoryTable;

pub mod messages {
    pub use crate::clipboard::{COPIED_TEXT, COPY_FAILED_TEXT};
    pub use crate::creation::{CREATE_FALLBACK_TEXT, MISSING_URL_TEXT, TRANSPORT_FAILURE_TEXT};
    pub use crate::deletion::{DELETED_TEXT, DELETE_FAILED_TEXT};
    pub use crate::directory::LOAD_FAILED_TEXT;
}

/// State changes published to front ends so they can re-render.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    NotificationChanged(Option<Notification>),
    DirectoryRefreshed(Arc<DirectorySnapshot>),
    SubmittingChanged(bool),
    FormCleared,
}

/// Everything one link-directory client needs, built explicitly and shared
/// by reference with each workflow.
pub struct ClientContext {
    api: Arc<dyn LinkApi>,
    clipboard: Arc<dyn ClipboardSink>,
    api_base_url: String,
    notifications: NotificationChannel,
    directory: DirectoryStore,
    form: CreationForm,
    events: broadcast::Sender<ClientEvent>,
}

impl ClientContext {
    pub fn new(api_base: Url) -> Arc<Self> {
        Self::with_clipboard(api_base, Arc::new(MissingClipboard))
    }

    pub fn with_clipboard(api_base: Url, clipboard: Arc<dyn ClipboardSink>) -> Arc<Self> {
        let display = config::display_base_url(&api_base);
        Self::new_with_dependencies(Arc::new(HttpLinkApi::new(api_base)), clipboard, display)
    }

    pub fn from_settings(
        settings: &ClientSettings,
        clipboard: Arc<dyn ClipboardSink>,
    ) -> Result<Arc<Self>, ConfigError> {
        Ok(Self::with_clipboard(settings.api_base()?, clipboard))
    }

    pub fn new_with_dependencies(
        api: Arc<dyn LinkApi>,
        clipboard: Arc<dyn ClipboardSink>,
        api_base_url: impl Into<String>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            api,
            clipboard,
            api_base_url: api_base_url.into(),
            notifications: NotificationChannel::new(events.clone()),
            directory: DirectoryStore::new(events.clone()),
            form: CreationForm::new(events.clone()),
            events,
        })
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    pub fn notifications(&self) -> &NotificationChannel {
        &self.notifications
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notifications.current()
    }

    pub fn directory(&self) -> &DirectoryStore {
        &self.directory
    }

    pub fn snapshot(&self) -> Arc<DirectorySnapshot> {
        self.directory.snapshot()
    }

    pub fn form(&self) -> &CreationForm {
        &self.form
    }

    pub fn directory_table(&self) -> DirectoryTable {
        DirectoryTable::project(&self.snapshot())
    }

    /// Initial directory load when a front end comes up.
    pub async fn bootstrap(&self) -> bool {
        self.refresh().await
    }

    /// Reloads the whole directory; see [`DirectoryStore`] for failure
    /// behavior.
    pub async fn refresh(&self) -> bool {
        self.directory
            .refresh(self.api.as_ref(), &self.notifications)
            .await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
