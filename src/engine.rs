// Per-turn decision entry point: snapshot -> grid -> policy -> move
//
// Everything here is synchronous and owns its data; a fresh grid is built for
// every call.

use log::{debug, log_enabled, Level};

use crate::config::{Config, PolicyKind};
use crate::grid;
use crate::policy::{DecisionContext, MovePolicy, TieBreaker};
use crate::types::{Battlesnake, Board, Direction};

/// Reported length, falling back to the body length when the field is absent
fn snake_length(you: &Battlesnake) -> i32 {
    if you.length > 0 {
        you.length
    } else {
        you.body.len() as i32
    }
}

/// Chooses a move for `you`, or `None` when there is no board (or our head is
/// not on it) to decide from.
pub fn decide(
    board: Option<&Board>,
    you: &Battlesnake,
    config: &Config,
    tie_breaker: &mut dyn TieBreaker,
) -> Option<Direction> {
    let board = board?;
    let built = grid::build(board, you)?;

    if config.debug.render_grid && log_enabled!(Level::Debug) {
        debug!("\n{}", built.grid);
    }
    debug!(
        "Head ({},{}), length {}, health {}, {} enemies",
        built.head.x,
        built.head.y,
        snake_length(you),
        you.health,
        built.enemies.len()
    );

    let ctx = DecisionContext::new(
        &built.grid,
        built.head,
        &built.enemies,
        you.health,
        snake_length(you),
    );

    let dir = match config.policy.kind {
        PolicyKind::Hunter => config.policy.hunter().decide(&ctx, tie_breaker),
        PolicyKind::Forager => config.forager.policy().decide(&ctx, tie_breaker),
    };

    Some(dir)
}

/// Cheap move that only looks at breathing room: the roomiest possible move,
/// else the roomiest non-colliding move, else the least bad move.
pub fn survival_move(board: Option<&Board>, you: &Battlesnake) -> Option<Direction> {
    let built = grid::build(board?, you)?;
    let ctx = DecisionContext::new(
        &built.grid,
        built.head,
        &built.enemies,
        you.health,
        snake_length(you),
    );

    let dir = ctx
        .escape_move(&ctx.possible_moves())
        .or_else(|| ctx.escape_move(&ctx.non_colliding_moves()))
        .unwrap_or_else(|| ctx.least_bad_move());

    Some(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::FixedTieBreaker;
    use crate::types::Coord;

    fn you(body: &[(i32, i32)]) -> Battlesnake {
        Battlesnake {
            id: "me".to_string(),
            health: 90,
            body: body.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
            ..Default::default()
        }
    }

    fn board(snakes: Vec<Battlesnake>) -> Board {
        Board {
            width: 5,
            height: 5,
            food: vec![],
            snakes,
            hazards: vec![],
        }
    }

    #[test]
    fn test_no_board_means_no_decision() {
        let me = you(&[(1, 1)]);
        let config = Config::default_hardcoded();
        assert_eq!(decide(None, &me, &config, &mut FixedTieBreaker(Direction::Up)), None);
        assert_eq!(survival_move(None, &me), None);
    }

    #[test]
    fn test_head_off_board_means_no_decision() {
        let me = you(&[(9, 9)]);
        let b = board(vec![me.clone()]);
        let config = Config::default_hardcoded();
        assert_eq!(decide(Some(&b), &me, &config, &mut FixedTieBreaker(Direction::Up)), None);
    }

    #[test]
    fn test_missing_length_falls_back_to_body() {
        let me = you(&[(1, 1), (1, 0), (0, 0)]);
        assert_eq!(me.length, 0);
        assert_eq!(snake_length(&me), 3);
    }

    #[test]
    fn test_both_policies_answer() {
        let me = you(&[(2, 2), (2, 1)]);
        let b = board(vec![me.clone()]);
        let mut config = Config::default_hardcoded();

        for kind in [PolicyKind::Hunter, PolicyKind::Forager] {
            config.policy.kind = kind;
            let dir = decide(Some(&b), &me, &config, &mut FixedTieBreaker(Direction::Left));
            assert!(dir.is_some());
            assert_ne!(dir, Some(Direction::Down), "down is our own neck");
        }
    }

    #[test]
    fn test_survival_move_prefers_room() {
        // Head in the corner with the neck to the right: only up is open
        let me = you(&[(0, 0), (1, 0)]);
        let b = board(vec![me.clone()]);
        assert_eq!(survival_move(Some(&b), &me), Some(Direction::Up));
    }
}
