use crate::config::GameConfig;
use crate::engine::input::InputEvent;
use crate::engine::Timestamp;
use crate::mode::{GameMode, GameModeMachine, MenuState};
use crate::router::{Action, InputRouter};
use crate::sprite::state::{ArenaBounds, PlayerState};
use anyhow::Result;

/// Read-only view handed to drawing code
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub mode: GameMode,
    pub menu: &'a MenuState,
    pub player: &'a PlayerState,
}

/// The single owner of mutable game state. Input handling and updates both
/// go through here, nothing else keeps a copy.
#[derive(Debug, Clone)]
pub struct GameContext {
    mode: GameModeMachine,
    player: PlayerState,
    router: InputRouter,
    bounds: ArenaBounds,
    speed: i32,
    animation_interval_ms: f64,
    total_frames: u8,
}

impl GameContext {
    pub fn new(config: &GameConfig, started_at: Timestamp) -> Result<Self> {
        let menu = MenuState::new(config.menu_options.clone())?;
        Ok(GameContext {
            mode: GameModeMachine::new(menu),
            player: PlayerState::new(config.player_start, config.player_size(), started_at),
            router: InputRouter::new(config.swipe_threshold),
            bounds: config.arena,
            speed: config.speed,
            animation_interval_ms: config.animation_interval_ms,
            total_frames: config.sheet.frames_per_row,
        })
    }

    pub fn mode(&self) -> GameMode {
        self.mode.mode()
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            mode: self.mode.mode(),
            menu: self.mode.menu(),
            player: &self.player,
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        let action = self.router.route(self.mode(), event);
        self.apply(action);
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Mode(event) => {
                let before = self.mode();
                self.mode = self.mode.clone().transition(event);
                if before != self.mode() {
                    log::debug!("mode {:?} -> {:?}", before, self.mode());
                }
            }
            Action::Walk(direction) => self.player = self.player.set_direction(direction),
            Action::Stop => self.player = self.player.clear_movement(),
            Action::Ignore => {}
        }
    }

    /// One fixed step: move, then animate. Menus freeze the player.
    pub fn update(&mut self, now: Timestamp) {
        if self.mode() != GameMode::Playing {
            return;
        }
        self.player = self
            .player
            .step(&self.bounds, self.speed)
            .animate(now, self.animation_interval_ms, self.total_frames);
    }
}
