use crate::engine::{Point, Rect, Renderer};
use crate::sprite::state::PlayerState;
use crate::sprite::SpriteSheet;
use anyhow::Result;
use web_sys::HtmlImageElement;

/// Sheet layout + loaded image. Holds no game state, it is handed the
/// player every frame.
pub struct HeroSprite {
    sheet: SpriteSheet,
    image: HtmlImageElement,
}

impl HeroSprite {
    pub fn new(sheet: SpriteSheet, image: HtmlImageElement) -> Self {
        HeroSprite { sheet, image }
    }

    /// Draws the player's current frame, `offset` shifts world space to screen space
    pub fn draw(&self, renderer: &Renderer, player: &PlayerState, offset: Point) -> Result<()> {
        let cell = self.sheet.frame_rect(player.direction, player.frame);
        let destination = Rect::new(
            Point {
                x: player.position.x + offset.x,
                y: player.position.y + offset.y,
            },
            player.size,
        );
        renderer.draw_image(&self.image, &self.sheet.source(cell), &destination)
    }
}
