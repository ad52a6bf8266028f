//! Read-only projections of client state for rendering. Nothing here holds
//! state between calls.

use chrono::{DateTime, Local, Utc};
use shared::domain::LinkId;

use crate::{directory::DirectorySnapshot, notification::Severity};

pub const EMPTY_DIRECTORY_TEXT: &str = "No links yet. Create your first short URL above.";
pub const NEVER_CLICKED_TEXT: &str = "Never";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRow {
    pub id: LinkId,
    pub code: String,
    pub short_url: String,
    pub original_url: String,
    pub clicks: u64,
    pub last_clicked: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryTable {
    pub rows: Vec<LinkRow>,
}

impl DirectoryTable {
    /// One row per record, in snapshot order.
    pub fn project(snapshot: &DirectorySnapshot) -> Self {
        let rows = snapshot
            .records()
            .iter()
            .map(|record| LinkRow {
                id: record.id.clone(),
                code: record.code.clone(),
                short_url: record.short_url.clone(),
                original_url: record.original_url.clone(),
                clicks: record.clicks,
                last_clicked: format_last_clicked(record.last_clicked_at),
            })
            .collect();
        Self { rows }
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn total_label(&self) -> String {
        format!("Total: {}", self.total())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn format_last_clicked(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => NEVER_CLICKED_TEXT.to_string(),
    }
}

pub fn submit_button_label(submitting: bool) -> &'static str {
    if submitting {
        "Creating..."
    } else {
        "Create short link"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeStyle {
    pub foreground: Rgb,
    pub background: Rgb,
    pub border: Rgb,
}

pub fn notice_style(severity: Severity) -> NoticeStyle {
    match severity {
        Severity::Error => NoticeStyle {
            foreground: Rgb(0xb9, 0x1c, 0x1c),
            background: Rgb(0xfe, 0xe2, 0xe2),
            border: Rgb(0xfc, 0xa5, 0xa5),
        },
        Severity::Success => NoticeStyle {
            foreground: Rgb(0x15, 0x80, 0x3d),
            background: Rgb(0xdc, 0xfc, 0xe7),
            border: Rgb(0x86, 0xef, 0xac),
        },
        Severity::Info => NoticeStyle {
            foreground: Rgb(0x03, 0x69, 0xa1),
            background: Rgb(0xe0, 0xf2, 0xfe),
            border: Rgb(0x7d, 0xd3, 0xfc),
        },
    }
}
