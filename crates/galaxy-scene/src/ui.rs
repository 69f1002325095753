//! Shared UI components for skill display

use bevy_egui::egui;
use galaxy_core::{Rgb, Skill, ViewportClass};

/// Text shown until the first pick or the hint timeout
pub const HINT_TEXT: &str = "Arrastra para girar, haz clic en un planeta para ver detalles";

/// Larger text on phones
pub fn ui_scale(class: ViewportClass) -> f32 {
    if class.is_mobile() {
        1.2
    } else {
        1.0
    }
}

pub fn to_color32(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

/// Compact label that follows the pointer over a hovered planet
pub fn render_skill_tooltip(ui: &mut egui::Ui, skill: &Skill, class: ViewportClass) {
    let scale = ui_scale(class);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("●").color(to_color32(skill.color)).size(14.0 * scale));
        ui.label(egui::RichText::new(&skill.name).strong().size(14.0 * scale));
    });
}

/// Detail card for the selected skill. Returns true when the close button was clicked.
pub fn render_skill_details(ui: &mut egui::Ui, skill: &Skill, class: ViewportClass) -> bool {
    let scale = ui_scale(class);
    let mut close_clicked = false;

    ui.horizontal(|ui| {
        ui.heading(
            egui::RichText::new(&skill.name)
                .size(18.0 * scale)
                .color(to_color32(skill.color)),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("✕").on_hover_text("Cerrar").clicked() {
                close_clicked = true;
            }
        });
    });

    ui.separator();

    ui.label(format!("Experiencia: {}", skill.experience));
    ui.label(
        egui::RichText::new(&skill.icon)
            .small()
            .color(egui::Color32::GRAY),
    );

    close_clicked
}

/// First-use hint
pub fn render_hint(ui: &mut egui::Ui, class: ViewportClass) {
    ui.label(
        egui::RichText::new(HINT_TEXT)
            .size(13.0 * ui_scale(class))
            .color(egui::Color32::from_gray(200)),
    );
}
