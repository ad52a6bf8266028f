//! Plain-text rendering of the directory table.

use std::fmt::Write as _;

use client_core::view::{DirectoryTable, EMPTY_DIRECTORY_TEXT};

const ORIGINAL_URL_WIDTH: usize = 48;
const HEADERS: [&str; 5] = ["Code", "Short URL", "Original URL", "Clicks", "Last clicked"];

pub fn render_table(table: &DirectoryTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", table.total_label());
    if table.is_empty() {
        let _ = writeln!(out, "{EMPTY_DIRECTORY_TEXT}");
        return out;
    }

    let cells: Vec<[String; 5]> = table
        .rows
        .iter()
        .map(|row| {
            [
                row.code.clone(),
                row.short_url.clone(),
                truncate(&row.original_url, ORIGINAL_URL_WIDTH),
                row.clicks.to_string(),
                row.last_clicked.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(&mut out, &HEADERS.map(str::to_string), &widths);
    for row in &cells {
        write_row(&mut out, row, &widths);
    }
    out
}

fn write_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}
