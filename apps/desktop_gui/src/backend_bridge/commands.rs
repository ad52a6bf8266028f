//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    Refresh,
    CreateLink { url: String, code: String },
    DeleteLink { code: String },
    CopyToClipboard { text: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Refresh => "refresh",
            BackendCommand::CreateLink { .. } => "create_link",
            BackendCommand::DeleteLink { .. } => "delete_link",
            BackendCommand::CopyToClipboard { .. } => "copy_to_clipboard",
        }
    }
}
