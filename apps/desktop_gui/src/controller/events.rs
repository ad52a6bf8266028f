//! Events flowing from the backend worker to the UI thread.

use client_core::ClientEvent;

pub enum UiEvent {
    BackendReady,
    BackendFailed(String),
    Client(ClientEvent),
}
