use client_core::{
    view::{notice_style, Rgb},
    Severity,
};
use eframe::egui;

pub const HEADER_FILL: egui::Color32 = egui::Color32::from_rgb(0x0f, 0x17, 0x2a);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x0e, 0xa5, 0xe9);
pub const DANGER: egui::Color32 = egui::Color32::from_rgb(0xdc, 0x26, 0x26);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoticePalette {
    pub text: egui::Color32,
    pub fill: egui::Color32,
    pub stroke: egui::Color32,
}

pub fn notice_palette(severity: Severity) -> NoticePalette {
    let style = notice_style(severity);
    NoticePalette {
        text: color(style.foreground),
        fill: color(style.background),
        stroke: color(style.border),
    }
}

fn color(Rgb(r, g, b): Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(r, g, b)
}
