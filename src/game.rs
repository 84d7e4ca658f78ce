use crate::browser;
use crate::config::{CameraMode, GameConfig};
use crate::context::{GameContext, Snapshot};
use crate::engine::input::InputEvent;
use crate::engine::{self, Clock, Game, PerformanceClock, Point, Rect, Renderer, Size, Timestamp};
use crate::mode::GameMode;
use crate::sprite::hero::HeroSprite;
use crate::sprite::state::PlayerState;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use web_sys::HtmlImageElement;

/// ┌──────────────────────── Frame Overview ─────────────────────────┐
/// │                                                                 │
/// │   engine::input ──► GameContext::handle_input ──► router        │
/// │                                                   │             │
/// │                          ┌────────────────────────┤             │
/// │                          ▼                        ▼             │
/// │                   GameModeMachine           PlayerState         │
/// │                                             step + animate      │
/// │                                                   │             │
/// │   Renderer ◄── HeroWalk::draw ◄── Snapshot ◄──────┘             │
/// │                                                                 │
/// └─────────────────────────────────────────────────────────────────┘
pub enum HeroWalk {
    /// Waiting on config and the sprite sheet
    Loading,

    /// Assets are in, the loop is running
    Loaded(Walk),
}

impl HeroWalk {
    const CONFIG_PATH: &'static str = "game.json";

    pub fn new() -> Self {
        HeroWalk::Loading
    }

    /// A missing or unreadable config is not fatal, an invalid one is
    async fn load_config() -> Result<GameConfig> {
        let config = match browser::fetch_json::<GameConfig>(Self::CONFIG_PATH).await {
            Ok(config) => config,
            Err(err) => {
                log::warn!(
                    "{} unavailable, using defaults : {:#}",
                    Self::CONFIG_PATH,
                    err
                );
                GameConfig::default()
            }
        };
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", Self::CONFIG_PATH))?;
        Ok(config)
    }

    /// Animation timing starts from `clock`, the same time base the loop hands to `update`
    fn start_context(config: &GameConfig, clock: &impl Clock) -> Result<GameContext> {
        GameContext::new(config, clock.now())
    }

    async fn load_sprite_image(path: &str) -> Result<HtmlImageElement> {
        engine::load_image(path)
            .await
            .with_context(|| format!("Failed to load sprite sheet image from : {}", path))
    }
}

impl Default for HeroWalk {
    fn default() -> Self {
        HeroWalk::new()
    }
}

#[async_trait(?Send)]
impl Game for HeroWalk {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            HeroWalk::Loading => {
                let config = Self::load_config().await?;
                let image = Self::load_sprite_image(&config.image_path).await?;
                log::info!("sprite sheet loaded from {}", config.image_path);

                let context = Self::start_context(&config, &PerformanceClock::new()?)?;
                let hero = HeroSprite::new(config.sheet, image);
                Ok(Box::new(HeroWalk::Loaded(Walk {
                    config,
                    context,
                    hero,
                })))
            }
            HeroWalk::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn handle_input(&mut self, events: &[InputEvent]) {
        if let HeroWalk::Loaded(walk) = self {
            for event in events {
                walk.context.handle_input(event);
            }
        }
    }

    fn update(&mut self, now: Timestamp) {
        if let HeroWalk::Loaded(walk) = self {
            walk.context.update(now);
        }
    }

    fn draw(&self, renderer: &Renderer) -> Result<()> {
        match self {
            HeroWalk::Loaded(walk) => walk.draw(renderer),
            HeroWalk::Loading => Ok(()),
        }
    }
}

pub struct Walk {
    config: GameConfig,
    context: GameContext,
    hero: HeroSprite,
}

mod palette {
    pub const MENU_BACKGROUND: &str = "#c0d5b9";
    pub const TEXT: &str = "#000";
    pub const SELECTED: &str = "#FF3D8C";
    pub const ARENA: &str = "lightgray";
    pub const GRID: &str = "#ccc";
    pub const WALL: &str = "black";
    pub const TITLE_FONT: &str = "16px \"Press Start 2P\", cursive";
    pub const BODY_FONT: &str = "12px \"Press Start 2P\", cursive";
}

impl Walk {
    fn draw(&self, renderer: &Renderer) -> Result<()> {
        let viewport = Rect::new(Point::default(), renderer.viewport());
        renderer.clear(&viewport);

        let snapshot = self.context.snapshot();
        match snapshot.mode {
            GameMode::Menu => self.draw_menu(renderer, &viewport, &snapshot),
            GameMode::Instructions => self.draw_instructions(renderer, &viewport),
            GameMode::Playing => self.draw_arena(renderer, &viewport, snapshot.player),
        }
    }

    fn draw_menu(&self, renderer: &Renderer, viewport: &Rect, snapshot: &Snapshot<'_>) -> Result<()> {
        let center_x = viewport.size.width / 2;
        renderer.fill_rect(viewport, palette::MENU_BACKGROUND);
        renderer.text_centered(
            &self.config.title,
            Point { x: center_x, y: 50 },
            palette::TITLE_FONT,
            palette::TEXT,
        )?;

        for (index, option) in snapshot.menu.options().iter().enumerate() {
            let color = if index == snapshot.menu.selected() {
                palette::SELECTED
            } else {
                palette::TEXT
            };
            let at = Point {
                x: center_x,
                y: 100 + index as i32 * 30,
            };
            renderer.text_centered(option, at, palette::TITLE_FONT, color)?;
        }
        Ok(())
    }

    fn draw_instructions(&self, renderer: &Renderer, viewport: &Rect) -> Result<()> {
        let center_x = viewport.size.width / 2;
        renderer.fill_rect(viewport, palette::MENU_BACKGROUND);
        renderer.text_centered(
            "Instructions",
            Point { x: center_x, y: 50 },
            palette::BODY_FONT,
            palette::TEXT,
        )?;
        for (index, line) in self.config.instructions.iter().enumerate() {
            let at = Point {
                x: center_x,
                y: 80 + index as i32 * 30,
            };
            renderer.text_centered(line, at, palette::BODY_FONT, palette::TEXT)?;
        }
        Ok(())
    }

    fn draw_arena(&self, renderer: &Renderer, viewport: &Rect, player: &PlayerState) -> Result<()> {
        let offset = camera_offset(self.config.camera, viewport.size, player);
        let arena = &self.config.arena;
        let shift = |x: i32, y: i32| Point {
            x: x + offset.x,
            y: y + offset.y,
        };

        renderer.fill_rect(viewport, palette::ARENA);

        let grid = self.config.grid_size.max(1) as usize;
        for x in (0..=arena.width).step_by(grid) {
            renderer.line(shift(x, 0), shift(x, arena.height), palette::GRID);
        }
        for y in (0..=arena.height).step_by(grid) {
            renderer.line(shift(0, y), shift(arena.width, y), palette::GRID);
        }

        let wall = arena.wall_thickness;
        let walls = [
            Rect::new(shift(0, 0), Size { width: arena.width, height: wall }),
            Rect::new(shift(0, arena.height - wall), Size { width: arena.width, height: wall }),
            Rect::new(shift(0, 0), Size { width: wall, height: arena.height }),
            Rect::new(shift(arena.width - wall, 0), Size { width: wall, height: arena.height }),
        ];
        for rect in &walls {
            renderer.fill_rect(rect, palette::WALL);
        }

        self.hero.draw(renderer, player, offset)
    }
}

/// World to screen shift. Stored positions never change, only where they land.
pub fn camera_offset(mode: CameraMode, viewport: Size, player: &PlayerState) -> Point {
    match mode {
        CameraMode::Fixed => Point::default(),
        CameraMode::Centered => Point {
            x: viewport.width / 2 - (player.position.x + player.size.width / 2),
            y: viewport.height / 2 - (player.position.y + player.size.height / 2),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_at(x: i32, y: i32) -> PlayerState {
        PlayerState::new(
            Point { x, y },
            Size {
                width: 48,
                height: 48,
            },
            0.0,
        )
    }

    struct FixedClock(Timestamp);

    impl Clock for FixedClock {
        fn now(&self) -> Timestamp {
            self.0
        }
    }

    #[test]
    fn animation_timer_starts_at_the_clock_reading() {
        let clock = FixedClock(5_000.0);
        let context = HeroWalk::start_context(&GameConfig::default(), &clock).unwrap();
        assert_eq!(context.player().last_frame_time, 5_000.0);
        assert_eq!(context.mode(), GameMode::Menu);
    }

    #[test]
    fn fixed_camera_draws_world_space() {
        let viewport = Size {
            width: 300,
            height: 300,
        };
        assert_eq!(
            camera_offset(CameraMode::Fixed, viewport, &player_at(120, 40)),
            Point::default()
        );
    }

    #[test]
    fn centered_camera_puts_the_player_mid_canvas() {
        let viewport = Size {
            width: 320,
            height: 240,
        };
        let player = player_at(200, 10);
        let offset = camera_offset(CameraMode::Centered, viewport, &player);
        assert_eq!(offset, Point { x: -64, y: 86 });
        // sprite center lands on the viewport center
        assert_eq!(player.position.x + offset.x + 24, 160);
        assert_eq!(player.position.y + offset.y + 24, 120);
        // world position is untouched
        assert_eq!(player.position, Point { x: 200, y: 10 });
    }
}
