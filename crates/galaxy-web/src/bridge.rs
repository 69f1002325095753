//! DOM bridge between the galaxy and the host page
//!
//! Outgoing: `galaxy:hover` and `galaxy:select` `CustomEvent`s dispatched on
//! the canvas whenever hover or selection changes. `detail` carries the skill
//! as JSON, or `null` when cleared. The canvas CSS cursor follows the hover.
//!
//! Incoming: `galaxy:close` clears the selection and `galaxy:teardown` stops
//! the widget. Listener callbacks only queue commands; systems apply them on
//! the next frame. Listeners are removed on teardown.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use galaxy_core::{CursorAffordance, Rgb, Skill, SkillId};
use galaxy_scene::{CloseDetail, Galaxy, GalaxySet, GalaxyView, TeardownRequest};
use serde::Serialize;

pub const HOVER_EVENT: &str = "galaxy:hover";
pub const SELECT_EVENT: &str = "galaxy:select";

/// Commands the host page can send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Close,
    Teardown,
}

impl HostCommand {
    pub const ALL: [HostCommand; 2] = [HostCommand::Close, HostCommand::Teardown];

    pub fn event_type(self) -> &'static str {
        match self {
            HostCommand::Close => "galaxy:close",
            HostCommand::Teardown => "galaxy:teardown",
        }
    }

    pub fn from_event_type(event_type: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.event_type() == event_type)
    }
}

/// Commands queued by DOM listeners, drained each frame
#[derive(Resource, Default, Clone)]
pub struct PendingHostCommands(pub Arc<Mutex<Vec<HostCommand>>>);

/// Skill as the host page sees it
#[derive(Debug, Serialize)]
struct SkillDetail<'a> {
    name: &'a str,
    icon: &'a str,
    size: f32,
    color: Rgb,
    experience: &'a str,
}

/// JSON `detail` for an outgoing event; `null` when nothing is hovered or selected
pub fn skill_detail_json(skill: Option<&Skill>) -> Result<String, serde_json::Error> {
    let detail = skill.map(|skill| SkillDetail {
        name: &skill.name,
        icon: &skill.icon,
        size: skill.size,
        color: skill.color,
        experience: &skill.experience,
    });
    serde_json::to_string(&detail)
}

pub fn css_cursor(cursor: CursorAffordance) -> &'static str {
    match cursor {
        CursorAffordance::Default => "default",
        CursorAffordance::Pointer => "pointer",
    }
}

pub struct BridgePlugin;

impl Plugin for BridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingHostCommands>()
            .init_resource::<PublishedView>()
            .add_systems(
                Update,
                (
                    forward_host_commands.before(GalaxySet::Input),
                    publish_view_changes.after(GalaxySet::Apply),
                ),
            );

        #[cfg(target_arch = "wasm32")]
        app.insert_non_send_resource(dom::HostListeners::default())
            .add_systems(Startup, dom::install_listeners)
            .add_systems(Update, dom::release_listeners.after(forward_host_commands));
    }
}

/// What the host page was last told
#[derive(Resource, Default)]
struct PublishedView {
    hovered: Option<SkillId>,
    selected: Option<SkillId>,
    cursor: CursorAffordance,
}

fn forward_host_commands(
    pending: Res<PendingHostCommands>,
    mut close: MessageWriter<CloseDetail>,
    mut teardown: MessageWriter<TeardownRequest>,
) {
    let commands: Vec<HostCommand> = match pending.0.lock() {
        Ok(mut queue) => queue.drain(..).collect(),
        Err(_) => return,
    };
    for command in commands {
        tracing::debug!(?command, "Host command received");
        match command {
            HostCommand::Close => {
                close.write(CloseDetail);
            }
            HostCommand::Teardown => {
                teardown.write(TeardownRequest);
            }
        }
    }
}

fn publish_view_changes(
    view: Res<GalaxyView>,
    galaxy: Option<Res<Galaxy>>,
    mut published: ResMut<PublishedView>,
) {
    if !view.is_changed() {
        return;
    }
    let Some(galaxy) = galaxy else { return };
    let catalog = galaxy.catalog();

    if published.hovered != view.hovered {
        published.hovered = view.hovered;
        emit(HOVER_EVENT, view.hovered.and_then(|id| catalog.get(id)));
    }
    if published.selected != view.selected {
        published.selected = view.selected;
        emit(SELECT_EVENT, view.selected.and_then(|id| catalog.get(id)));
    }
    if published.cursor != view.cursor {
        published.cursor = view.cursor;
        #[cfg(target_arch = "wasm32")]
        dom::set_cursor(css_cursor(view.cursor));
    }
}

fn emit(event_type: &str, skill: Option<&Skill>) {
    match skill_detail_json(skill) {
        Ok(detail) => {
            tracing::debug!(event = event_type, %detail, "Publishing galaxy event");
            #[cfg(target_arch = "wasm32")]
            dom::dispatch(event_type, &detail);
        }
        Err(e) => tracing::warn!("Failed to serialize {} detail: {}", event_type, e),
    }
}

#[cfg(target_arch = "wasm32")]
mod dom {
    use bevy::prelude::*;
    use galaxy_scene::TeardownRequest;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    use super::{HostCommand, PendingHostCommands};
    use crate::app::CANVAS_SELECTOR;

    /// Installed DOM listeners, kept so they can be removed again
    #[derive(Default)]
    pub struct HostListeners {
        target: Option<web_sys::HtmlElement>,
        closures: Vec<(HostCommand, Closure<dyn FnMut(web_sys::Event)>)>,
    }

    fn canvas() -> Option<web_sys::HtmlElement> {
        let document = web_sys::window()?.document()?;
        document
            .query_selector(CANVAS_SELECTOR)
            .ok()??
            .dyn_into::<web_sys::HtmlElement>()
            .ok()
    }

    pub fn install_listeners(mut listeners: NonSendMut<HostListeners>, pending: Res<PendingHostCommands>) {
        let Some(canvas) = canvas() else {
            tracing::warn!("Canvas {} not found, host commands disabled", CANVAS_SELECTOR);
            return;
        };

        for command in HostCommand::ALL {
            let queue = pending.0.clone();
            let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                if let Ok(mut queue) = queue.lock() {
                    queue.push(command);
                }
            }) as Box<dyn FnMut(web_sys::Event)>);

            if let Err(e) = canvas.add_event_listener_with_callback(command.event_type(), closure.as_ref().unchecked_ref()) {
                tracing::warn!("Failed to listen for {}: {:?}", command.event_type(), e);
                continue;
            }
            listeners.closures.push((command, closure));
        }
        listeners.target = Some(canvas);
    }

    pub fn release_listeners(mut requests: MessageReader<TeardownRequest>, mut listeners: NonSendMut<HostListeners>) {
        if requests.read().last().is_none() {
            return;
        }
        let Some(target) = listeners.target.take() else {
            return;
        };
        for (command, closure) in listeners.closures.drain(..) {
            if let Err(e) = target.remove_event_listener_with_callback(command.event_type(), closure.as_ref().unchecked_ref()) {
                tracing::warn!("Failed to remove {} listener: {:?}", command.event_type(), e);
            }
        }
        if let Err(e) = target.style().set_property("cursor", "default") {
            tracing::warn!("Failed to reset canvas cursor: {:?}", e);
        }
        tracing::info!("Host listeners removed");
    }

    pub fn dispatch(event_type: &str, detail_json: &str) {
        let Some(canvas) = canvas() else { return };
        let detail = js_sys::JSON::parse(detail_json).unwrap_or(JsValue::NULL);

        let init = web_sys::CustomEventInit::new();
        init.set_detail(&detail);
        init.set_bubbles(true);

        match web_sys::CustomEvent::new_with_event_init_dict(event_type, &init) {
            Ok(event) => {
                if let Err(e) = canvas.dispatch_event(&event) {
                    tracing::warn!("Failed to dispatch {}: {:?}", event_type, e);
                }
            }
            Err(e) => tracing::warn!("Failed to create {}: {:?}", event_type, e),
        }
    }

    pub fn set_cursor(cursor: &str) {
        if let Some(canvas) = canvas() {
            if let Err(e) = canvas.style().set_property("cursor", cursor) {
                tracing::warn!("Failed to set canvas cursor: {:?}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;
    use galaxy_core::GalaxyConfig;

    #[test]
    fn test_host_command_event_types() {
        for command in HostCommand::ALL {
            assert_eq!(HostCommand::from_event_type(command.event_type()), Some(command));
        }
        assert_eq!(HostCommand::from_event_type("galaxy:hover"), None);
    }

    #[test]
    fn test_skill_detail_json() {
        let catalog = GalaxyConfig::embedded().unwrap().catalog().unwrap();
        let react = catalog.find("React").unwrap();

        let json: serde_json::Value = serde_json::from_str(&skill_detail_json(Some(react)).unwrap()).unwrap();
        assert_eq!(json["name"], "React");
        assert_eq!(json["color"], "#61DAFB");
        assert_eq!(json["experience"], "1 año");
        assert_eq!(json["icon"], "assets/img/icons/react.svg");
        assert!(json.get("position").is_none());
    }

    #[test]
    fn test_cleared_detail_is_null() {
        assert_eq!(skill_detail_json(None).unwrap(), "null");
    }

    #[test]
    fn test_css_cursor() {
        assert_eq!(css_cursor(CursorAffordance::Pointer), "pointer");
        assert_eq!(css_cursor(CursorAffordance::Default), "default");
    }

    #[test]
    fn test_forward_host_commands() {
        let mut app = App::new();
        app.add_message::<CloseDetail>()
            .add_message::<TeardownRequest>()
            .init_resource::<PendingHostCommands>()
            .add_systems(Update, forward_host_commands);

        let pending = app.world().resource::<PendingHostCommands>().clone();
        pending.0.lock().unwrap().extend([HostCommand::Close, HostCommand::Teardown]);
        app.update();

        assert!(pending.0.lock().unwrap().is_empty());
        assert_eq!(app.world().resource::<Messages<CloseDetail>>().len(), 1);
        assert_eq!(app.world().resource::<Messages<TeardownRequest>>().len(), 1);
    }
}
