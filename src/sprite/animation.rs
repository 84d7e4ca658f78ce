use crate::engine::Timestamp;
use crate::sprite::state::PlayerState;

/// Walk cycle ring counter.
///
/// - moving, interval elapsed : next frame, wrapping at `total_frames`
/// - moving, interval not elapsed : unchanged
/// - idle : frame 0, whatever frame the walk stopped on
pub fn tick(
    mut state: PlayerState,
    now: Timestamp,
    interval_ms: f64,
    total_frames: u8,
) -> PlayerState {
    if !state.is_moving {
        state.frame = 0;
    } else if now - state.last_frame_time > interval_ms {
        state.frame = (state.frame + 1) % total_frames.max(1);
        state.last_frame_time = now;
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Direction, Point, Size};

    const INTERVAL: f64 = 200.0;
    const FRAMES: u8 = 4;

    fn walking() -> PlayerState {
        PlayerState::new(
            Point { x: 50, y: 50 },
            Size {
                width: 48,
                height: 48,
            },
            0.0,
        )
        .set_direction(Direction::Right)
    }

    #[test]
    fn cycles_through_every_frame() {
        let mut state = walking();
        let mut now = 0.0;
        let mut frames = vec![state.frame];
        for _ in 0..6 {
            now += INTERVAL + 1.0;
            state = tick(state, now, INTERVAL, FRAMES);
            frames.push(state.frame);
        }
        assert_eq!(frames, vec![0, 1, 2, 3, 0, 1, 2]);
    }

    #[test]
    fn waits_for_the_interval() {
        let state = tick(walking(), INTERVAL, INTERVAL, FRAMES);
        // exactly one interval is not enough, it must be exceeded
        assert_eq!(state.frame, 0);
        assert_eq!(state.last_frame_time, 0.0);

        let state = tick(state, INTERVAL + 0.5, INTERVAL, FRAMES);
        assert_eq!(state.frame, 1);
        assert_eq!(state.last_frame_time, INTERVAL + 0.5);
    }

    #[test]
    fn stopping_resets_on_the_next_tick() {
        let mut state = walking();
        for step in 1..=3 {
            state = tick(state, step as f64 * 300.0, INTERVAL, FRAMES);
        }
        assert_eq!(state.frame, 3);

        let state = tick(state.clear_movement(), 901.0, INTERVAL, FRAMES);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn idle_keeps_the_timer() {
        let idle = walking().clear_movement();
        let state = tick(idle, 10_000.0, INTERVAL, FRAMES);
        assert_eq!(state.last_frame_time, 0.0);
        assert_eq!(state.frame, 0);
    }
}
