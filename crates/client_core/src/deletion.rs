use tracing::{error, info, warn};

use crate::{api::LinkApiError, notification::Notification, ClientContext};

pub const DELETED_TEXT: &str = "Link deleted";
pub const DELETE_FAILED_TEXT: &str = "Failed to delete link";

impl ClientContext {
    /// Deletes one link by code and reloads the directory on success.
    ///
    /// Deletes are not serialized against each other; each one that succeeds
    /// triggers its own refresh.
    pub async fn remove(&self, code: &str) -> bool {
        self.notifications.clear();

        match self.api.delete_link(code).await {
            Ok(()) => {
                info!(code, "links: link deleted");
                self.notifications.set(Notification::success(DELETED_TEXT));
                self.refresh().await;
                true
            }
            Err(LinkApiError::Rejected(rejection)) => {
                warn!(code, status = rejection.status, "links: delete rejected");
                self.notifications.set(Notification::error(DELETE_FAILED_TEXT));
                false
            }
            Err(err) => {
                error!(code, "links: delete failed: {err}");
                self.notifications.set(Notification::error(DELETE_FAILED_TEXT));
                false
            }
        }
    }
}
