//! Browser input, normalized.
//!
//! Keyboard, on-screen buttons and canvas touches are all turned into the same
//! `InputEvent` and queued on an unbounded channel. The game loop drains the
//! queue once per animation frame, so handlers never touch game state directly.

use super::{Direction, Point};
use crate::browser;
use anyhow::{anyhow, Result};
use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, KeyboardEvent, TouchEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    KeyDown,
    KeyUp,
    PointerDown,
    PointerUp,
    PointerMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCode {
    Pad(Direction),
    MenuUp,
    MenuDown,
    Confirm,
    Back,
    /// A finger on the canvas itself, in client coordinates
    Surface(Point),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: EventKind,
    pub code: EventCode,
}

impl InputEvent {
    pub fn new(kind: EventKind, code: EventCode) -> Self {
        InputEvent { kind, code }
    }

    pub fn is_press(&self) -> bool {
        matches!(self.kind, EventKind::KeyDown | EventKind::PointerDown)
    }

    pub fn is_release(&self) -> bool {
        matches!(self.kind, EventKind::KeyUp | EventKind::PointerUp)
    }
}

/// Maps `KeyboardEvent.code` to a control, `None` for keys the game ignores
pub fn code_for_key(code: &str) -> Option<EventCode> {
    match code {
        "ArrowUp" => Some(EventCode::Pad(Direction::Up)),
        "ArrowDown" => Some(EventCode::Pad(Direction::Down)),
        "ArrowLeft" => Some(EventCode::Pad(Direction::Left)),
        "ArrowRight" => Some(EventCode::Pad(Direction::Right)),
        "PageUp" => Some(EventCode::MenuUp),
        "PageDown" => Some(EventCode::MenuDown),
        "Enter" | "Space" | "KeyZ" => Some(EventCode::Confirm),
        "Escape" | "Backspace" | "KeyX" => Some(EventCode::Back),
        _ => None,
    }
}

// on-screen game boy controls
const BUTTONS: [(&str, EventCode); 6] = [
    (".up", EventCode::Pad(Direction::Up)),
    (".down", EventCode::Pad(Direction::Down)),
    (".left", EventCode::Pad(Direction::Left)),
    (".right", EventCode::Pad(Direction::Right)),
    (".a", EventCode::Confirm),
    (".b", EventCode::Back),
];

// a press dragged off the button or a touch cut short by the browser still
// has to release, or the player keeps walking
const BUTTON_EVENTS: [(&str, EventKind); 6] = [
    ("mousedown", EventKind::PointerDown),
    ("touchstart", EventKind::PointerDown),
    ("mouseup", EventKind::PointerUp),
    ("mouseleave", EventKind::PointerUp),
    ("touchend", EventKind::PointerUp),
    ("touchcancel", EventKind::PointerUp),
];

const SURFACE_EVENTS: [(&str, EventKind); 4] = [
    ("touchstart", EventKind::PointerDown),
    ("touchmove", EventKind::PointerMove),
    ("touchend", EventKind::PointerUp),
    ("touchcancel", EventKind::PointerUp),
];

/// Attach every listener and hand back the receiving end of the event queue
pub fn prepare_input() -> Result<UnboundedReceiver<InputEvent>> {
    let (sender, receiver) = unbounded();
    attach_keyboard(&sender)?;
    attach_buttons(&sender)?;
    attach_surface(&sender)?;
    Ok(receiver)
}

/// Everything queued since the last call, oldest first
pub fn drain(receiver: &mut UnboundedReceiver<InputEvent>) -> Vec<InputEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

fn send(sender: &UnboundedSender<InputEvent>, event: InputEvent) {
    if let Err(err) = sender.unbounded_send(event) {
        log::warn!("dropped input {:?} : {}", event, err);
    }
}

fn listen<E>(target: &EventTarget, name: &str, handler: impl FnMut(E) + 'static) -> Result<()>
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
{
    let listener = browser::closure_wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target
        .add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("Could not listen to '{}' : {:#?}", name, err))?;
    // listeners live as long as the page
    listener.forget();
    Ok(())
}

fn attach_keyboard(sender: &UnboundedSender<InputEvent>) -> Result<()> {
    let window = browser::window()?;
    for (name, kind) in [("keydown", EventKind::KeyDown), ("keyup", EventKind::KeyUp)] {
        let sender = sender.clone();
        listen(&window, name, move |event: KeyboardEvent| {
            if let Some(code) = code_for_key(&event.code()) {
                event.prevent_default();
                send(&sender, InputEvent::new(kind, code));
            }
        })?;
    }
    Ok(())
}

fn attach_buttons(sender: &UnboundedSender<InputEvent>) -> Result<()> {
    for (selector, code) in BUTTONS {
        let Some(button) = browser::query_selector(selector)? else {
            log::warn!("no on-screen control '{}', skipping", selector);
            continue;
        };
        for (name, kind) in BUTTON_EVENTS {
            let sender = sender.clone();
            listen(&button, name, move |event: Event| {
                // stops touchstart from also firing a synthetic mousedown
                event.prevent_default();
                send(&sender, InputEvent::new(kind, code));
            })?;
        }
    }
    Ok(())
}

fn attach_surface(sender: &UnboundedSender<InputEvent>) -> Result<()> {
    let canvas = browser::canvas()?;
    for (name, kind) in SURFACE_EVENTS {
        let sender = sender.clone();
        listen(&canvas, name, move |event: TouchEvent| {
            event.prevent_default();
            // touchend has no active touches left, the lifted finger is in changed_touches
            if let Some(touch) = event.changed_touches().get(0) {
                let point = Point {
                    x: touch.client_x(),
                    y: touch.client_y(),
                };
                send(&sender, InputEvent::new(kind, EventCode::Surface(point)));
            }
        })?;
    }
    Ok(())
}
