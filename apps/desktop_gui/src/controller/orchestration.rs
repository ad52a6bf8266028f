//! Command orchestration helpers from UI actions to backend command queue.

use client_core::Notification;
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` for the backend worker. A queue failure is reported through
/// the local notification since no workflow will run to report it.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    notification: &mut Option<Notification>,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *notification = Some(Notification::error(
                "UI command queue is full; please retry",
            ));
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *notification = Some(Notification::error(
                "Backend worker disconnected (possible startup/runtime failure); restart the app",
            ));
            false
        }
    }
}
