// src/ui.rs
use std::time::Duration;
use clipper_demo::controls::HELP_LINES;

/// Height of the status bar in logical pixels. Random polygons are kept
/// above it.
pub const STATUS_BAR_HEIGHT: f32 = 22.0;

pub fn status_text(pending_vertex_count: Option<usize>) -> String {
    match pending_vertex_count {
        Some(count) => format!("  F1 for help    vertex count: {}_", count),
        None => "  F1 for help".to_string(),
    }
}

/// When egui wants its next frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repaint {
    Now,
    After(Duration),
    Idle,
}

/// Interprets a viewport's `repaint_delay`; egui uses `Duration::MAX` for
/// "nothing to animate".
pub fn repaint_request(delay: Duration) -> Repaint {
    if delay.is_zero() {
        Repaint::Now
    } else if delay == Duration::MAX {
        Repaint::Idle
    } else {
        Repaint::After(delay)
    }
}

pub fn build_ui(ctx: &egui::Context, show_help: &mut bool, status: &str) {
    egui::TopBottomPanel::bottom("status_bar")
        .exact_height(STATUS_BAR_HEIGHT)
        .show(ctx, |ui| {
            ui.label(status);
        });

    egui::Window::new("Clipper Demo - Help")
        .open(show_help)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                ui.label("Clipper Demo tips...");
                ui.separator();
                for line in HELP_LINES {
                    ui.label(*line);
                }
            });
        });
}
