use crate::engine::{Direction, Point, Rect};
use crate::sprite::state::{ArenaBounds, PlayerState};

/// Moves the player `speed` pixels along its heading.
///
/// A step that would put any part of the sprite into a wall is dropped whole,
/// the player does not slide up to the wall.
pub fn step(mut state: PlayerState, bounds: &ArenaBounds, speed: i32) -> PlayerState {
    if !state.is_moving {
        return state;
    }

    let Point { x, y } = state.position;
    let candidate = match state.direction {
        Direction::Up => Point { x, y: y - speed },
        Direction::Down => Point { x, y: y + speed },
        Direction::Left => Point { x: x - speed, y },
        Direction::Right => Point { x: x + speed, y },
    };
    let moved = Rect::new(candidate, state.size);
    let accepted = match state.direction {
        Direction::Left | Direction::Right => bounds.holds_horizontally(&moved),
        Direction::Up | Direction::Down => bounds.holds_vertically(&moved),
    };
    if accepted {
        state.position = candidate;
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Size;
    use proptest::prelude::*;

    const SPEED: i32 = 3;

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

    #[test]
    fn idle_player_stays_put() {
        let bounds = ArenaBounds::default();
        let state = step(player_at(50, 50), &bounds, SPEED);
        assert_eq!(state.position, Point { x: 50, y: 50 });
    }

    #[test]
    fn each_heading_moves_one_axis() {
        let bounds = ArenaBounds::default();
        let cases = [
            (Direction::Up, Point { x: 100, y: 97 }),
            (Direction::Down, Point { x: 100, y: 103 }),
            (Direction::Left, Point { x: 97, y: 100 }),
            (Direction::Right, Point { x: 103, y: 100 }),
        ];
        for (direction, expected) in cases {
            let state = player_at(100, 100).set_direction(direction);
            assert_eq!(step(state, &bounds, SPEED).position, expected, "{:?}", direction);
        }
    }

    #[test]
    fn walking_left_stops_before_the_wall() {
        let bounds = ArenaBounds {
            width: 300,
            height: 300,
            wall_thickness: 10,
        };
        let mut state = player_at(50, 50).set_direction(Direction::Left);
        let mut xs = Vec::new();
        for _ in 0..14 {
            state = step(state, &bounds, SPEED);
            xs.push(state.position.x);
        }
        // 13 accepted steps reach 11, the 14th would land on 8
        assert_eq!(xs[12], 11);
        assert_eq!(xs[13], 11);
        assert_eq!(state.position.y, 50);
    }

    #[test]
    fn right_and_bottom_edges_use_sprite_size() {
        let bounds = ArenaBounds::default();
        // 242 + 48 = 290 = 300 - 10, touching the wall is allowed
        let state = player_at(239, 239).set_direction(Direction::Right);
        let state = step(state, &bounds, SPEED);
        assert_eq!(state.position.x, 242);
        let state = step(state, &bounds, SPEED);
        assert_eq!(state.position.x, 242);

        let state = step(state.set_direction(Direction::Down), &bounds, SPEED);
        assert_eq!(state.position.y, 242);
        let state = step(state, &bounds, SPEED);
        assert_eq!(state.position.y, 242);
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn never_enters_the_walls(
            moves in prop::collection::vec((direction(), any::<bool>()), 0..400),
            speed in 1..20i32,
        ) {
            let bounds = ArenaBounds::default();
            let mut state = player_at(50, 50);
            for (direction, moving) in moves {
                state = if moving {
                    state.set_direction(direction)
                } else {
                    state.clear_movement()
                };
                state = step(state, &bounds, speed);
                prop_assert!(bounds.holds(&state.bounding_box()), "{:?}", state.position);
            }
        }
    }
}
