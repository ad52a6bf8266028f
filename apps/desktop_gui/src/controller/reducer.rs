//! UI-side state and the transitions applied to it by backend events.

use client_core::{view::DirectoryTable, ClientEvent, Notification};

use crate::{backend_bridge::commands::BackendCommand, controller::events::UiEvent};

/// Everything the window renders. The directory table is only ever replaced
/// from a refreshed snapshot; the UI never edits rows itself.
#[derive(Debug, Clone, Default)]
pub struct GuiState {
    pub api_base_url: String,
    pub url_input: String,
    pub code_input: String,
    pub submitting: bool,
    pub notification: Option<Notification>,
    pub table: DirectoryTable,
    pub backend_ready: bool,
}

impl GuiState {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Default::default()
        }
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::BackendReady => {
                self.backend_ready = true;
            }
            UiEvent::BackendFailed(message) => {
                self.backend_ready = false;
                self.submitting = false;
                self.notification = Some(Notification::error(message));
            }
            UiEvent::Client(ClientEvent::NotificationChanged(notification)) => {
                self.notification = notification;
            }
            UiEvent::Client(ClientEvent::DirectoryRefreshed(snapshot)) => {
                self.table = DirectoryTable::project(&snapshot);
            }
            UiEvent::Client(ClientEvent::SubmittingChanged(submitting)) => {
                self.submitting = submitting;
            }
            UiEvent::Client(ClientEvent::FormCleared) => {
                self.url_input.clear();
                self.code_input.clear();
            }
        }
    }

    /// Builds the create command for the current inputs and disables the
    /// form until the backend reports the attempt finished. Returns `None`
    /// while a create is already pending.
    pub fn begin_submit(&mut self) -> Option<BackendCommand> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        Some(BackendCommand::CreateLink {
            url: self.url_input.clone(),
            code: self.code_input.clone(),
        })
    }
}
