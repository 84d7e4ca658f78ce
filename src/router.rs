//! Turns normalized input events into game actions.
//!
//! Two steps: `normalize` reduces an event to what the control means
//! (a heading, a release, confirm, back), then `dispatch` looks the meaning up
//! against the current mode. Every control is bound exactly once, here.

use crate::engine::input::{EventCode, EventKind, InputEvent};
use crate::engine::{Direction, Point};
use crate::mode::{self, GameMode, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Pad press or swipe
    Heading(Direction),
    /// Pad released or finger lifted
    Release,
    MenuUp,
    MenuDown,
    Confirm,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Mode(mode::Event),
    Walk(Direction),
    Stop,
    Ignore,
}

/// (mode, intent) -> action
pub fn dispatch(mode: GameMode, intent: Intent) -> Action {
    use Intent::*;
    match (mode, intent) {
        (GameMode::Menu, Heading(Direction::Up) | MenuUp) => {
            Action::Mode(mode::Event::Navigate(Step::Previous))
        }
        (GameMode::Menu, Heading(Direction::Down) | MenuDown) => {
            Action::Mode(mode::Event::Navigate(Step::Next))
        }
        (GameMode::Menu, Confirm) => Action::Mode(mode::Event::Confirm),
        (GameMode::Instructions, Back) => Action::Mode(mode::Event::Back),
        (GameMode::Playing, Heading(direction)) => Action::Walk(direction),
        (GameMode::Playing, Release) => Action::Stop,
        _ => Action::Ignore,
    }
}

/// Edge triggered swipe detection.
///
/// Each time the finger gets more than `threshold` pixels away from the
/// anchor (on the dominant axis) a heading is emitted and the anchor jumps to
/// the finger, so one long drag can turn several times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeTracker {
    threshold: i32,
    anchor: Option<Point>,
}

impl SwipeTracker {
    pub fn new(threshold: i32) -> Self {
        SwipeTracker {
            threshold,
            anchor: None,
        }
    }

    pub fn start(&mut self, at: Point) {
        self.anchor = Some(at);
    }

    pub fn end(&mut self) {
        self.anchor = None;
    }

    pub fn track(&mut self, at: Point) -> Option<Direction> {
        let Some(anchor) = self.anchor else {
            // move without a start, e.g. the touch began outside the canvas
            self.anchor = Some(at);
            return None;
        };
        let dx = at.x - anchor.x;
        let dy = at.y - anchor.y;
        if dx.abs().max(dy.abs()) <= self.threshold {
            return None;
        }

        self.anchor = Some(at);
        // screen space, dy > 0 is a drag toward the bottom
        let direction = if dx.abs() > dy.abs() {
            if dx > 0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0 {
            Direction::Down
        } else {
            Direction::Up
        };
        Some(direction)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputRouter {
    swipe: SwipeTracker,
}

impl InputRouter {
    pub fn new(swipe_threshold: i32) -> Self {
        InputRouter {
            swipe: SwipeTracker::new(swipe_threshold),
        }
    }

    pub fn normalize(&mut self, event: &InputEvent) -> Option<Intent> {
        match (event.kind, event.code) {
            (EventKind::PointerDown, EventCode::Surface(at)) => {
                self.swipe.start(at);
                None
            }
            (EventKind::PointerMove, EventCode::Surface(at)) => {
                self.swipe.track(at).map(Intent::Heading)
            }
            (EventKind::PointerUp, EventCode::Surface(_)) => {
                self.swipe.end();
                Some(Intent::Release)
            }
            (_, EventCode::Surface(_)) | (EventKind::PointerMove, _) => None,
            (_, EventCode::Pad(direction)) if event.is_press() => Some(Intent::Heading(direction)),
            (_, EventCode::Pad(_)) => Some(Intent::Release),
            // buttons act on press, their release means nothing
            (_, _) if event.is_release() => None,
            (_, EventCode::MenuUp) => Some(Intent::MenuUp),
            (_, EventCode::MenuDown) => Some(Intent::MenuDown),
            (_, EventCode::Confirm) => Some(Intent::Confirm),
            (_, EventCode::Back) => Some(Intent::Back),
        }
    }

    pub fn route(&mut self, mode: GameMode, event: &InputEvent) -> Action {
        self.normalize(event)
            .map_or(Action::Ignore, |intent| dispatch(mode, intent))
    }
}
