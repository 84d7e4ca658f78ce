use crate::engine::{Direction, Point, Rect, Size, Timestamp};
use crate::sprite::{animation, motion};
use serde::Deserialize;

/// Playable area, the player never enters the `wall_thickness` margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArenaBounds {
    pub width: i32,
    pub height: i32,
    pub wall_thickness: i32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        ArenaBounds {
            width: 300,
            height: 300,
            wall_thickness: 10,
        }
    }
}

impl ArenaBounds {
    /// The walkable rectangle inside the walls
    pub fn interior(&self) -> Rect {
        Rect::new_from_x_y(
            self.wall_thickness,
            self.wall_thickness,
            self.width - 2 * self.wall_thickness,
            self.height - 2 * self.wall_thickness,
        )
    }

    pub fn holds_horizontally(&self, rect: &Rect) -> bool {
        rect.x() >= self.wall_thickness && rect.right() <= self.width - self.wall_thickness
    }

    pub fn holds_vertically(&self, rect: &Rect) -> bool {
        rect.y() >= self.wall_thickness && rect.bottom() <= self.height - self.wall_thickness
    }

    pub fn holds(&self, rect: &Rect) -> bool {
        self.holds_horizontally(rect) && self.holds_vertically(rect)
    }
}

/// Everything the core knows about the player.
/// - motion : position, direction, is_moving
/// - display : frame, last_frame_time
///
/// Positions are world space, cameras are a rendering concern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub position: Point,
    pub size: Size,
    pub direction: Direction,
    pub frame: u8,
    pub is_moving: bool,
    pub last_frame_time: Timestamp,
}

impl PlayerState {
    pub fn new(position: Point, size: Size, started_at: Timestamp) -> Self {
        PlayerState {
            position,
            size,
            direction: Direction::Down,
            frame: 0,
            is_moving: false,
            last_frame_time: started_at,
        }
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// Latest heading wins, and starts the walk
    pub fn set_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self.is_moving = true;
        self
    }

    pub fn clear_movement(mut self) -> Self {
        self.is_moving = false;
        self
    }

    pub fn step(self, bounds: &ArenaBounds, speed: i32) -> Self {
        motion::step(self, bounds, speed)
    }

    pub fn animate(self, now: Timestamp, interval_ms: f64, total_frames: u8) -> Self {
        animation::tick(self, now, interval_ms, total_frames)
    }
}
