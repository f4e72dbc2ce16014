// Move policy: picks one move per turn from the grid, breathing room and enemies
//
// The decision is layered:
// 1. No possible move -> roomiest non-colliding move, else least-bad move (may collide)
// 2. One possible move -> take it
// 3. Otherwise pick a strategy (attack / avoid / seek food) and compute a heading
// 4. No usable heading -> escape move (most breathing room among possible moves)
// 5. Nothing at all -> tie-break source

use log::debug;
use rand::seq::IndexedRandom;
use std::cmp::Reverse;

use crate::flood_fill::{open_path_counts, MoveCounts};
use crate::grid::{Cell, Grid, Occupant};
use crate::pathfinding::{find_path, PathPreference};
use crate::types::{Coord, Direction};

/// Source of the last-resort choice between moves
pub trait TieBreaker {
    fn choose(&mut self, moves: &[Direction]) -> Direction;
}

/// Uniformly random choice, used in production
#[derive(Debug, Default)]
pub struct RandomTieBreaker;

impl TieBreaker for RandomTieBreaker {
    fn choose(&mut self, moves: &[Direction]) -> Direction {
        moves
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(Direction::Up)
    }
}

/// Always answers with the same move when it is offered, else the first offered
#[derive(Debug, Clone, Copy)]
pub struct FixedTieBreaker(pub Direction);

impl TieBreaker for FixedTieBreaker {
    fn choose(&mut self, moves: &[Direction]) -> Direction {
        if moves.contains(&self.0) {
            self.0
        } else {
            moves.first().copied().unwrap_or(self.0)
        }
    }
}

/// Everything a policy needs to know about the current turn
#[derive(Debug)]
pub struct DecisionContext<'a> {
    pub grid: &'a Grid,
    pub head: Coord,
    pub enemies: &'a [Occupant],
    pub health: i32,
    pub length: i32,
    pub counts: MoveCounts,
}

impl<'a> DecisionContext<'a> {
    pub fn new(
        grid: &'a Grid,
        head: Coord,
        enemies: &'a [Occupant],
        health: i32,
        length: i32,
    ) -> Self {
        let counts = open_path_counts(grid, &head);
        DecisionContext {
            grid,
            head,
            enemies,
            health,
            length,
            counts,
        }
    }

    pub fn collides(&self, dir: Direction) -> bool {
        self.grid.collides(&self.head, dir)
    }

    /// Moving next to the head of an enemy at least as long as us loses the
    /// head-to-head if both snakes step into the same cell.
    pub fn head_to_head_loss(&self, dir: Direction) -> bool {
        let next = dir.apply(&self.head);
        self.enemies
            .iter()
            .any(|enemy| enemy.head.manhattan(&next) <= 1 && enemy.length >= self.length)
    }

    /// Moves that neither collide nor lose a head-to-head, in canonical order
    pub fn possible_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .filter(|&dir| !self.collides(dir) && !self.head_to_head_loss(dir))
            .collect()
    }

    /// Moves that stay on the board and out of every occupied cell
    pub fn non_colliding_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .filter(|&dir| !self.collides(dir))
            .collect()
    }

    /// Closest enemy head by Manhattan distance, first in snapshot order on ties
    pub fn nearest_enemy(&self, from: &Coord) -> Option<(&'a Occupant, i32)> {
        self.enemies
            .iter()
            .map(|enemy| (enemy, enemy.head.manhattan(from)))
            .min_by_key(|&(_, distance)| distance)
    }

    /// Closest food cell by Manhattan distance, scanning x-major then y
    pub fn nearest_food(&self, from: &Coord) -> Option<(Coord, i32)> {
        self.grid
            .iter()
            .filter(|(_, cell)| *cell == Cell::Food)
            .map(|(coord, _)| (coord, coord.manhattan(from)))
            .min_by_key(|&(_, distance)| distance)
    }

    /// Non-colliding heading from our head toward (or away from) `target`
    pub fn heading(&self, target: &Coord, avoid: bool) -> Option<Direction> {
        find_valid_heading(self.grid, &self.head, target, avoid)
    }

    /// Candidate with the most breathing room, earliest on ties
    pub fn escape_move(&self, candidates: &[Direction]) -> Option<Direction> {
        self.counts.best_of(candidates.iter().copied())
    }

    /// Highest breathing room over all four moves, colliding or not
    pub fn least_bad_move(&self) -> Direction {
        self.counts
            .best_of(Direction::ALL.iter().copied())
            .unwrap_or(Direction::Up)
    }

    /// True when a move would leave less room than our body needs
    pub fn too_cramped(&self, dir: Direction) -> bool {
        (self.counts[dir] as i64) < self.length as i64
    }
}

/// Picks the first non-colliding move ordered by how much it closes (or, when
/// `avoid` is set, opens) the offset from `from` to `to`.
///
/// The sort is stable, so equal priorities keep `Direction::ALL` order.
pub fn find_valid_heading(grid: &Grid, from: &Coord, to: &Coord, avoid: bool) -> Option<Direction> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    let mut moves: Vec<(Direction, i32)> = Direction::ALL
        .iter()
        .copied()
        .filter(|&dir| !grid.collides(from, dir))
        .map(|dir| (dir, dir.component(dx, dy)))
        .collect();

    if avoid {
        moves.sort_by_key(|&(_, priority)| priority);
    } else {
        moves.sort_by_key(|&(_, priority)| Reverse(priority));
    }

    moves.first().map(|&(dir, _)| dir)
}

/// A way of choosing one move for the turn
pub trait MovePolicy {
    fn decide(&self, ctx: &DecisionContext, tie_breaker: &mut dyn TieBreaker) -> Direction;
}

/// What the hunter policy is trying to do this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Longer than every enemy and the nearest one is reachable
    Attack,
    /// Nearest enemy is too close
    Avoid,
    SeekFood,
}

/// Attack when longest, keep away from close enemies, otherwise eat
#[derive(Debug, Clone, Copy)]
pub struct HunterPolicy {
    pub proximity_threshold: i32,
    pub path_preference: PathPreference,
}

impl Default for HunterPolicy {
    fn default() -> Self {
        HunterPolicy {
            proximity_threshold: 3,
            path_preference: PathPreference::Longest,
        }
    }
}

impl HunterPolicy {
    pub fn new(proximity_threshold: i32, path_preference: PathPreference) -> Self {
        HunterPolicy {
            proximity_threshold,
            path_preference,
        }
    }

    pub fn select_strategy(&self, ctx: &DecisionContext) -> Strategy {
        let nearest = ctx.nearest_enemy(&ctx.head);
        let longest_enemy = ctx.enemies.iter().map(|e| e.length).max();

        if let (Some((enemy, _)), Some(max_len)) = (nearest, longest_enemy) {
            if ctx.length > max_len
                && find_path(ctx.grid, ctx.head, enemy.head, self.path_preference).is_some()
            {
                return Strategy::Attack;
            }
        }

        match nearest {
            Some((_, distance)) if distance < self.proximity_threshold => Strategy::Avoid,
            _ => Strategy::SeekFood,
        }
    }

    /// Heading for `strategy`, or `None` when it has nothing usable to offer
    pub fn heading_for(&self, strategy: Strategy, ctx: &DecisionContext) -> Option<Direction> {
        match strategy {
            Strategy::Attack => {
                let (enemy, _) = ctx.nearest_enemy(&ctx.head)?;
                ctx.heading(&enemy.head, false)
            }
            Strategy::Avoid => {
                let (enemy, _) = ctx.nearest_enemy(&ctx.head)?;
                ctx.heading(&enemy.head, true)
            }
            Strategy::SeekFood => {
                let (food, _) = match ctx.nearest_food(&ctx.head) {
                    Some(found) => found,
                    None => {
                        debug!("No food on the board");
                        return None;
                    }
                };
                let dir = ctx.heading(&food, false)?;
                if ctx.too_cramped(dir) {
                    debug!(
                        "Heading {} to food leads into {} open cells, need {}",
                        dir.as_str(),
                        ctx.counts[dir],
                        ctx.length
                    );
                    return None;
                }
                Some(dir)
            }
        }
    }
}

impl MovePolicy for HunterPolicy {
    fn decide(&self, ctx: &DecisionContext, tie_breaker: &mut dyn TieBreaker) -> Direction {
        debug!("Open path counts: {:?}", ctx.counts);

        let possible = ctx.possible_moves();
        debug!("Possible moves: {:?}", possible);

        match possible.len() {
            0 => {
                // Risking a head-to-head still beats hitting a wall
                let dir = ctx
                    .escape_move(&ctx.non_colliding_moves())
                    .unwrap_or_else(|| ctx.least_bad_move());
                debug!("No possible moves, least bad is {}", dir.as_str());
                return dir;
            }
            1 => return possible[0],
            _ => {}
        }

        let strategy = self.select_strategy(ctx);
        debug!("Strategy: {:?}", strategy);

        let heading = self
            .heading_for(strategy, ctx)
            .filter(|dir| !ctx.head_to_head_loss(*dir));

        if let Some(dir) = heading {
            return dir;
        }

        match ctx.escape_move(&possible) {
            Some(dir) => {
                debug!("{:?} gave no heading, escaping {}", strategy, dir.as_str());
                dir
            }
            // Unreachable with two or more possible moves; kept as the last resort
            None => tie_breaker.choose(&Direction::ALL),
        }
    }
}
