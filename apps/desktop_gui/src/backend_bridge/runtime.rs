//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread, time::Duration};

use client_core::{ClientContext, ClientEvent};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tokio::sync::broadcast::{self, error::RecvError};
use url::Url;

use crate::backend_bridge::{clipboard::ArboardClipboard, commands::BackendCommand};
use crate::controller::events::UiEvent;

pub fn launch(api_base: Url, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = ClientContext::with_clipboard(api_base, Arc::new(ArboardClipboard));
            forward_client_events(Arc::clone(&client), client.subscribe_events(), ui_tx.clone());
            let _ = ui_tx.try_send(UiEvent::BackendReady);

            {
                let client = Arc::clone(&client);
                tokio::spawn(async move {
                    client.bootstrap().await;
                });
            }

            // Workflows run as independent tasks so a slow create never holds
            // up a delete or a refresh.
            while let Ok(cmd) = cmd_rx.recv() {
                let client = Arc::clone(&client);
                match cmd {
                    BackendCommand::Refresh => {
                        tokio::spawn(async move {
                            client.refresh().await;
                        });
                    }
                    BackendCommand::CreateLink { url, code } => {
                        tokio::spawn(async move {
                            client.submit_with(&url, &code).await;
                        });
                    }
                    BackendCommand::DeleteLink { code } => {
                        tokio::spawn(async move {
                            client.remove(&code).await;
                        });
                    }
                    BackendCommand::CopyToClipboard { text } => {
                        client.copy(&text);
                    }
                }
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

const RESYNC_RETRY: Duration = Duration::from_millis(50);

/// Forwards client events to the UI queue. Whenever an event is lost, either
/// because the forwarder lagged or the UI queue was full, the current view
/// state is re-sent until the UI queue takes all of it.
fn forward_client_events(
    client: Arc<ClientContext>,
    mut events: broadcast::Receiver<ClientEvent>,
    ui_tx: Sender<UiEvent>,
) {
    tokio::spawn(async move {
        let mut stale = false;
        let mut retry = tokio::time::interval(RESYNC_RETRY);
        loop {
            tokio::select! {
                received = events.recv() => match received {
                    Ok(event) => match ui_tx.try_send(UiEvent::Client(event)) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            tracing::warn!("ui event queue is full; resyncing view state");
                            stale = true;
                        }
                        Err(TrySendError::Disconnected(_)) => break,
                    },
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "ui event forwarder lagged; resyncing view state");
                        stale = true;
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = retry.tick(), if stale => {}
            }

            if stale {
                match send_view_state(&client, &ui_tx) {
                    Ok(()) => stale = false,
                    Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Disconnected(_)) => break,
                }
            }
        }
    });
}

fn send_view_state(
    client: &ClientContext,
    ui_tx: &Sender<UiEvent>,
) -> Result<(), TrySendError<UiEvent>> {
    for event in [
        ClientEvent::NotificationChanged(client.notification()),
        ClientEvent::DirectoryRefreshed(client.snapshot()),
        ClientEvent::SubmittingChanged(client.form().is_submitting()),
    ] {
        ui_tx.try_send(UiEvent::Client(event))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use client_core::Notification;
    use crossbeam_channel::bounded;

    use super::*;

    #[tokio::test]
    async fn full_ui_queue_is_resynced_once_drained() {
        let api_base = Url::parse("http://127.0.0.1:9").expect("url");
        let client = ClientContext::new(api_base);
        let (ui_tx, ui_rx) = bounded(1);
        forward_client_events(Arc::clone(&client), client.subscribe_events(), ui_tx);

        client.notifications().set(Notification::info("first"));
        client
            .notifications()
            .set(Notification::error("Failed to load links"));

        let mut latest = None;
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            while let Ok(event) = ui_rx.try_recv() {
                if let UiEvent::Client(ClientEvent::NotificationChanged(notification)) = event {
                    latest = notification;
                }
            }
            if latest == Some(Notification::error("Failed to load links")) {
                break;
            }
        }

        assert_eq!(latest, Some(Notification::error("Failed to load links")));
    }
}
