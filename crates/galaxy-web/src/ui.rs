//! egui overlay: hover tooltip, skill detail card and first-use hint

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use galaxy_scene::ui::{render_hint, render_skill_details, render_skill_tooltip};
use galaxy_scene::{CloseDetail, Galaxy, GalaxyView, PointerCaptured};

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        // Main UI system runs in EguiPrimaryContextPass for proper input handling (bevy_egui 0.38+)
        app.add_systems(EguiPrimaryContextPass, overlay_system);
    }
}

fn overlay_system(
    mut contexts: EguiContexts,
    galaxy: Option<Res<Galaxy>>,
    view: Res<GalaxyView>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut captured: ResMut<PointerCaptured>,
    mut close: MessageWriter<CloseDetail>,
) {
    let Some(galaxy) = galaxy else { return };
    if !view.active {
        captured.set_if_neq(PointerCaptured(false));
        return;
    }

    // Get the egui context - early return if not available
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let class = view.class;
    let catalog = galaxy.catalog();

    // Tooltip next to the pointer, unless the hovered skill already has its card open
    let cursor = windows.single().ok().and_then(|window| window.cursor_position());
    if let (Some(skill), Some(cursor)) = (view.hovered.and_then(|id| catalog.get(id)), cursor) {
        if view.selected != view.hovered {
            egui::Area::new(egui::Id::new("skill_tooltip"))
                .fixed_pos(egui::pos2(cursor.x + 14.0, cursor.y + 14.0))
                .order(egui::Order::Tooltip)
                .interactable(false)
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        render_skill_tooltip(ui, skill, class);
                    });
                });
        }
    }

    if let Some(skill) = view.selected.and_then(|id| catalog.get(id)) {
        // Bottom sheet on phones, top-right card on desktop
        let (align, offset) = if class.is_mobile() {
            (egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -16.0))
        } else {
            (egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
        };

        let mut close_clicked = false;
        egui::Window::new("skill_detail")
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .anchor(align, offset)
            .show(ctx, |ui| {
                close_clicked = render_skill_details(ui, skill, class);
            });

        if close_clicked {
            close.write(CloseDetail);
        }
    }

    if view.hint_visible {
        egui::Area::new(egui::Id::new("galaxy_hint"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
            .interactable(false)
            .show(ctx, |ui| render_hint(ui, class));
    }

    captured.set_if_neq(PointerCaptured(ctx.wants_pointer_input()));
}
