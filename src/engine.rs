use crate::browser;
use anyhow::{anyhow, Error, Result};
// wasm is single threaded, Rc<RefCell> instead of Arc<Mutex>
use async_trait::async_trait;
use futures::channel::oneshot::channel;
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement, Performance};

pub mod input;

use self::input::InputEvent;

/// Milliseconds on the page's monotonic clock
pub type Timestamp = f64;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(position: Point, size: Size) -> Self {
        Rect { position, size }
    }

    pub fn new_from_x_y(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect::new(Point { x, y }, Size { width, height })
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }

    pub fn right(&self) -> i32 {
        self.position.x + self.size.width
    }

    pub fn bottom(&self) -> i32 {
        self.position.y + self.size.height
    }
}

/// Screen-space heading, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// `performance.now()`, same origin as requestAnimationFrame timestamps
pub struct PerformanceClock {
    performance: Performance,
}

impl PerformanceClock {
    pub fn new() -> Result<Self> {
        Ok(PerformanceClock {
            performance: browser::performance()?,
        })
    }
}

impl Clock for PerformanceClock {
    fn now(&self) -> Timestamp {
        self.performance.now()
    }
}

#[async_trait(?Send)]
pub trait Game {
    /// Loads every asset the game needs. The loop does not start until this
    /// resolves, so a missing sprite sheet never reaches `update`.
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    fn handle_input(&mut self, events: &[InputEvent]);
    fn update(&mut self, now: Timestamp);
    fn draw(&self, renderer: &Renderer) -> Result<()>;
}

// length of a frame in milliseconds
const FRAME_SIZE: f64 = 1.0 / 60.0 * 1000.0;
// a backgrounded tab resumes with one huge delta, cap how much we catch up
const MAX_FRAME_DELTA: f64 = 250.0;

pub struct GameLoop {
    last_frame: Timestamp,
    accumulated_delta: f64,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut game = game.initialize().await?;
        let mut receiver = input::prepare_input()?;
        let clock = PerformanceClock::new()?;
        let mut game_loop = GameLoop {
            last_frame: clock.now(),
            accumulated_delta: 0.0,
        };
        let renderer = Renderer::new(browser::context()?)?;

        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            let events = input::drain(&mut receiver);
            game.handle_input(&events);

            for _ in 0..game_loop.advance(perf) {
                game.update(perf);
            }

            if let Err(err) = game.draw(&renderer) {
                log::error!("draw failed : {:#}", err);
            }

            if let Some(next_frame) = f.borrow().as_ref() {
                if let Err(err) = browser::request_animation_frame(next_frame) {
                    log::error!("game loop stopped : {:#}", err);
                }
            }
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }

    /// Banks the time since the last frame and returns how many fixed
    /// updates it pays for. The remainder carries over to the next frame.
    fn advance(&mut self, perf: Timestamp) -> u32 {
        // the first rAF timestamp can predate the clock read in `start`
        self.accumulated_delta += (perf - self.last_frame).clamp(0.0, MAX_FRAME_DELTA);
        self.last_frame = perf;
        let mut steps = 0;
        while self.accumulated_delta > FRAME_SIZE {
            self.accumulated_delta -= FRAME_SIZE;
            steps += 1;
        }
        steps
    }
}

/// Canvas drawing primitives. Knows nothing about the game being drawn.
pub struct Renderer {
    context: CanvasRenderingContext2d,
    viewport: Size,
}

impl Renderer {
    pub fn new(context: CanvasRenderingContext2d) -> Result<Self> {
        let canvas = context
            .canvas()
            .ok_or_else(|| anyhow!("2d context is not attached to a canvas"))?;
        let viewport = Size {
            width: canvas.width() as i32,
            height: canvas.height() as i32,
        };
        Ok(Renderer { context, viewport })
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn clear(&self, rect: &Rect) {
        self.context.clear_rect(
            rect.x().into(),
            rect.y().into(),
            rect.size.width.into(),
            rect.size.height.into(),
        );
    }

    pub fn fill_rect(&self, rect: &Rect, color: &str) {
        self.context.set_fill_style_str(color);
        self.context.fill_rect(
            rect.x().into(),
            rect.y().into(),
            rect.size.width.into(),
            rect.size.height.into(),
        );
    }

    pub fn line(&self, from: Point, to: Point, color: &str) {
        self.context.set_stroke_style_str(color);
        self.context.begin_path();
        self.context.move_to(from.x.into(), from.y.into());
        self.context.line_to(to.x.into(), to.y.into());
        self.context.stroke();
    }

    /// Text horizontally centered on `at`
    pub fn text_centered(&self, text: &str, at: Point, font: &str, color: &str) -> Result<()> {
        self.context.set_font(font);
        self.context.set_text_align("center");
        self.context.set_fill_style_str(color);
        self.context
            .fill_text(text, at.x.into(), at.y.into())
            .map_err(|err| anyhow!("Error drawing text '{}' : {:#?}", text, err))
    }

    pub fn draw_image(
        &self,
        image: &HtmlImageElement,
        frame: &Rect,
        destination: &Rect,
    ) -> Result<()> {
        self.context
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image,
                frame.x().into(),
                frame.y().into(),
                frame.size.width.into(),
                frame.size.height.into(),
                destination.x().into(),
                destination.y().into(),
                destination.size.width.into(),
                destination.size.height.into(),
            )
            .map_err(|err| anyhow!("Error drawing image : {:#?}", err))
    }
}

/// Asynchronously load an image from a given source path
/// # Arguments
/// * `source` - string slice to path/url
/// # Returns
/// * `Ok(HtmlImageElement)` - once the browser fires `onload`
/// * `Err` - on `onerror`
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::create_html_image_element()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    // the sender is taken on first use, so only one of the two ever fires
    let success_callback = browser::closure_wrap(Box::new(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    }) as Box<dyn FnMut()>);

    let error_callback = browser::closure_wrap(Box::new(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!("Error loading image: {:#?}", err)));
        }
    }) as Box<dyn FnMut(JsValue)>);

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callbacks alive until image is loaded or errors
    success_callback.forget();
    error_callback.forget();

    // Result<Result<(), Error>, oneshot::Canceled>
    // - outer ? : channel dropped
    // - inner ? : image failed to load
    rx.await??;

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn game_loop() -> GameLoop {
        GameLoop {
            last_frame: 1_000.0,
            accumulated_delta: 0.0,
        }
    }

    #[test]
    fn short_frame_runs_no_update() {
        let mut game_loop = game_loop();
        assert_eq!(game_loop.advance(1_010.0), 0);
        assert_relative_eq!(game_loop.accumulated_delta, 10.0);
        assert_relative_eq!(game_loop.last_frame, 1_010.0);
    }

    #[test]
    fn remainder_carries_over() {
        let mut game_loop = game_loop();
        assert_eq!(game_loop.advance(1_040.0), 2);
        assert_relative_eq!(game_loop.accumulated_delta, 40.0 - 2.0 * FRAME_SIZE, epsilon = 1e-9);

        // 6.67 left + 12 more crosses one frame
        assert_eq!(game_loop.advance(1_052.0), 1);
        assert_relative_eq!(game_loop.accumulated_delta, 52.0 - 3.0 * FRAME_SIZE, epsilon = 1e-9);
    }

    #[test]
    fn long_pause_is_capped() {
        let mut game_loop = game_loop();
        let steps = game_loop.advance(61_000.0);
        assert!(steps <= (MAX_FRAME_DELTA / FRAME_SIZE).ceil() as u32);
        assert!(steps >= 14);
    }

    #[test]
    fn timestamp_before_start_adds_nothing() {
        let mut game_loop = game_loop();
        assert_eq!(game_loop.advance(990.0), 0);
        assert_relative_eq!(game_loop.accumulated_delta, 0.0);
        assert_relative_eq!(game_loop.last_frame, 990.0);

        // the next frame measures from the early timestamp
        assert_eq!(game_loop.advance(1_010.0), 1);
        assert_relative_eq!(game_loop.accumulated_delta, 20.0 - FRAME_SIZE, epsilon = 1e-9);
    }

    #[test]
    fn rect_edges() {
        let rect = Rect::new_from_x_y(10, 20, 48, 32);
        assert_eq!(rect.x(), 10);
        assert_eq!(rect.y(), 20);
        assert_eq!(rect.right(), 58);
        assert_eq!(rect.bottom(), 52);
    }

    #[test]
    fn direction_names_are_lowercase_in_json() {
        let direction: Direction = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(direction, Direction::Left);
    }
}
