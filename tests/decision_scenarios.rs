// Integration tests for the decision engine on hand-built boards
//
// Each test builds a snapshot the same way the HTTP layer receives it and runs
// it through engine::decide with a deterministic tie-break source.

use heuristic_snake::config::{Config, PolicyKind};
use heuristic_snake::engine;
use heuristic_snake::pathfinding::PathPreference;
use heuristic_snake::policy::FixedTieBreaker;
use heuristic_snake::types::{Battlesnake, Board, Coord, Direction};

fn snake(id: &str, health: i32, body: &[(i32, i32)]) -> Battlesnake {
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health,
        body: body.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
        length: body.len() as i32,
        ..Default::default()
    }
}

fn board(
    width: i32,
    height: i32,
    snakes: Vec<Battlesnake>,
    food: &[(i32, i32)],
    hazards: &[(i32, i32)],
) -> Board {
    Board {
        width,
        height,
        food: food.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
        snakes,
        hazards: hazards.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
    }
}

fn decide_with(config: &Config, board: &Board, you: &Battlesnake) -> Direction {
    engine::decide(Some(board), you, config, &mut FixedTieBreaker(Direction::Up))
        .expect("board with our head on it should yield a decision")
}

fn decide(board: &Board, you: &Battlesnake) -> Direction {
    decide_with(&Config::default_hardcoded(), board, you)
}

/// Small board, no enemies, food straight to the right
#[test]
fn test_moves_toward_food_when_alone() {
    let you = snake("me", 10, &[(1, 1), (1, 0), (0, 0)]);
    let b = board(3, 3, vec![you.clone()], &[(2, 1)], &[]);

    assert_eq!(decide(&b, &you), Direction::Right);
}

/// A shorter enemy head directly above us. Being longer and able to reach it,
/// we attack; the attack heading still has to step sideways, which opens up
/// the distance.
#[test]
fn test_adjacent_shorter_enemy_resolves_through_attack() {
    let you = snake("me", 80, &[(2, 2), (2, 1), (2, 0), (1, 0), (0, 0)]);
    let enemy = snake("them", 80, &[(2, 3), (2, 4)]);
    let b = board(5, 5, vec![you.clone(), enemy], &[], &[]);

    let dir = decide(&b, &you);
    let next = dir.apply(&Coord::new(2, 2));
    assert!(
        next.manhattan(&Coord::new(2, 3)) > 1,
        "{} does not increase distance from the enemy head",
        dir.as_str()
    );
}

/// We are twice the length of the only enemy, two cells to our right
#[test]
fn test_attacks_shorter_enemy() {
    let you = snake(
        "me",
        80,
        &[(1, 2), (0, 2), (0, 1), (0, 0), (1, 0), (2, 0)],
    );
    let enemy = snake("them", 80, &[(3, 2), (4, 2), (4, 3)]);
    let b = board(5, 5, vec![you.clone(), enemy], &[], &[]);

    let dir = decide(&b, &you);
    assert_eq!(dir, Direction::Right);
    assert!(dir.apply(&Coord::new(1, 2)).manhattan(&Coord::new(3, 2)) < 2);
}

/// Every neighbour is blocked; the move with the most space behind it wins
#[test]
fn test_boxed_in_takes_least_bad_move() {
    // Up leads into a pocket sealed by hazards, right leads into our neck
    // with the rest of the board behind it.
    let you = snake("me", 80, &[(0, 0), (1, 0)]);
    let b = board(5, 5, vec![you.clone()], &[], &[(0, 1), (0, 2), (1, 1)]);

    assert_eq!(decide(&b, &you), Direction::Right);
}

#[test]
fn test_boxed_in_ties_follow_fixed_order() {
    // Head in the middle of a hazard cross: all four blocked cells open onto
    // the same remaining area, so the first move in the fixed order wins.
    let you = snake("me", 80, &[(2, 2)]);
    let b = board(
        5,
        5,
        vec![you.clone()],
        &[],
        &[(2, 3), (2, 1), (1, 2), (3, 2)],
    );

    assert_eq!(decide(&b, &you), Direction::Up);
}

#[test]
fn test_single_safe_move_is_taken() {
    // Top-left corner, neck below: only right is open
    let you = snake("me", 80, &[(0, 4), (0, 3), (0, 2)]);
    let b = board(5, 5, vec![you.clone()], &[(0, 0)], &[]);

    assert_eq!(decide(&b, &you), Direction::Right);
}

#[test]
fn test_refuses_food_in_dead_end() {
    // Food sits in a one-cell pocket to the right; left has plenty of room
    let you = snake("me", 50, &[(2, 2), (2, 1), (2, 0)]);
    let b = board(
        5,
        5,
        vec![you.clone()],
        &[(3, 2)],
        &[(3, 3), (3, 1), (4, 2)],
    );

    let dir = decide(&b, &you);
    assert_ne!(dir, Direction::Right);
    assert!(dir == Direction::Up || dir == Direction::Left);
}

#[test]
fn test_avoids_losing_head_to_head() {
    // An equal-length enemy two cells to the right: right would put us next to it
    let you = snake("me", 80, &[(1, 2), (0, 2), (0, 1)]);
    let enemy = snake("them", 80, &[(3, 2), (4, 2), (4, 1)]);
    let b = board(5, 5, vec![you.clone(), enemy], &[(4, 4)], &[]);

    assert_ne!(decide(&b, &you), Direction::Right);
}

#[test]
fn test_shortest_path_preference_still_attacks() {
    let mut config = Config::default_hardcoded();
    config.policy.path_preference = PathPreference::Shortest;

    let you = snake(
        "me",
        80,
        &[(1, 2), (0, 2), (0, 1), (0, 0), (1, 0), (2, 0)],
    );
    let enemy = snake("them", 80, &[(3, 2), (4, 2), (4, 3)]);
    let b = board(5, 5, vec![you.clone(), enemy], &[], &[]);

    assert_eq!(decide_with(&config, &b, &you), Direction::Right);
}

#[test]
fn test_forager_policy_follows_health() {
    let mut config = Config::default_hardcoded();
    config.policy.kind = PolicyKind::Forager;

    // Food above, enemy far to the right
    let enemy = snake("them", 80, &[(6, 3), (6, 2), (6, 1)]);

    let sated = snake("me", 90, &[(3, 3), (3, 2)]);
    let b = board(7, 7, vec![sated.clone(), enemy.clone()], &[(3, 5)], &[]);
    assert_eq!(decide_with(&config, &b, &sated), Direction::Left);

    let hungry = snake("me", 30, &[(3, 3), (3, 2)]);
    let b = board(7, 7, vec![hungry.clone(), enemy], &[(3, 5)], &[]);
    assert_eq!(decide_with(&config, &b, &hungry), Direction::Up);
}

#[test]
fn test_snapshot_without_us_on_board_is_no_decision() {
    let you = snake("me", 80, &[(7, 7), (7, 6)]);
    let b = board(5, 5, vec![you.clone()], &[], &[]);
    let config = Config::default_hardcoded();

    assert_eq!(
        engine::decide(Some(&b), &you, &config, &mut FixedTieBreaker(Direction::Up)),
        None
    );
    assert_eq!(
        engine::decide(None, &you, &config, &mut FixedTieBreaker(Direction::Up)),
        None
    );
}

#[test]
fn test_snapshot_from_json() {
    let state: heuristic_snake::types::GameState = serde_json::from_str(
        r#"{
            "game": {"id": "g", "ruleset": {"name": "standard"}, "timeout": 500},
            "turn": 3,
            "board": {
                "height": 3,
                "width": 3,
                "food": [{"x": 2, "y": 1}],
                "hazards": [],
                "snakes": [
                    {"id": "me", "name": "me", "health": 10, "length": 3,
                     "body": [{"x": 1, "y": 1}, {"x": 1, "y": 0}, {"x": 0, "y": 0}],
                     "latency": "12", "shout": ""}
                ]
            },
            "you": {"id": "me", "name": "me", "health": 10, "length": 3,
                    "body": [{"x": 1, "y": 1}, {"x": 1, "y": 0}, {"x": 0, "y": 0}]}
        }"#,
    )
    .unwrap();

    let dir = engine::decide(
        state.board.as_ref(),
        &state.you,
        &Config::default_hardcoded(),
        &mut FixedTieBreaker(Direction::Up),
    );
    assert_eq!(dir, Some(Direction::Right));
}
