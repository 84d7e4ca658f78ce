use crate::engine::{Point, Rect, Size};
use crate::sprite::state::ArenaBounds;
use crate::sprite::SpriteSheet;
use anyhow::{anyhow, Result};
use serde::Deserialize;

/// How world space maps onto the canvas. Only the renderer looks at this.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    /// World origin at the canvas origin
    #[default]
    Fixed,
    /// The scene scrolls so the player stays in the middle of the canvas
    Centered,
}

/// Everything tunable, read from `game.json`. Missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub menu_options: Vec<String>,
    pub instructions: Vec<String>,
    pub image_path: String,
    pub arena: ArenaBounds,
    pub grid_size: i32,
    pub player_start: Point,
    pub sheet: SpriteSheet,
    pub animation_interval_ms: f64,
    /// pixels per fixed update
    pub speed: i32,
    pub swipe_threshold: i32,
    pub camera: CameraMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            title: "Hero Walk".to_string(),
            menu_options: vec!["Start Game".to_string(), "Instructions".to_string()],
            instructions: vec![
                "Use the D-Pad to move".to_string(),
                "Button A: confirm".to_string(),
                "Button B: back".to_string(),
                "Press B to go back".to_string(),
            ],
            image_path: "img/hero.png".to_string(),
            arena: ArenaBounds::default(),
            grid_size: 8,
            player_start: Point { x: 50, y: 50 },
            sheet: SpriteSheet::default(),
            animation_interval_ms: 200.0,
            speed: 3,
            swipe_threshold: 30,
            camera: CameraMode::Fixed,
        }
    }
}

impl GameConfig {
    /// The player is drawn one sheet cell large
    pub fn player_size(&self) -> Size {
        Size {
            width: self.sheet.cell_width,
            height: self.sheet.cell_height,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.menu_options.is_empty() {
            return Err(anyhow!("menu_options must not be empty"));
        }
        if self.sheet.frames_per_row == 0 {
            return Err(anyhow!("sheet.frames_per_row must be at least 1"));
        }
        if self.sheet.cell_width <= 0 || self.sheet.cell_height <= 0 {
            return Err(anyhow!(
                "sheet cells must have a positive size, got {}x{}",
                self.sheet.cell_width,
                self.sheet.cell_height
            ));
        }
        if self.speed < 0 {
            return Err(anyhow!("speed must not be negative, got {}", self.speed));
        }
        if self.swipe_threshold <= 0 {
            return Err(anyhow!(
                "swipe_threshold must be positive, got {}",
                self.swipe_threshold
            ));
        }
        if self.grid_size <= 0 {
            return Err(anyhow!("grid_size must be positive, got {}", self.grid_size));
        }
        if !(self.animation_interval_ms.is_finite() && self.animation_interval_ms >= 0.0) {
            return Err(anyhow!(
                "animation_interval_ms must be a non negative number, got {}",
                self.animation_interval_ms
            ));
        }
        if self.arena.wall_thickness < 0 {
            return Err(anyhow!("arena.wall_thickness must not be negative"));
        }
        let start = Rect::new(self.player_start, self.player_size());
        if !self.arena.holds(&start) {
            return Err(anyhow!(
                "player start {:?} does not fit inside the arena walls {:?}",
                start,
                self.arena.interior()
            ));
        }
        Ok(())
    }
}
