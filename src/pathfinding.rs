// Route discovery between two cells of the grid
//
// Intermediate cells must be traversable. The final step may land on the
// target whatever it holds, so an enemy head can be a target.

use serde::Deserialize;
use std::collections::{HashMap, HashSet, VecDeque};

use crate::grid::Grid;
use crate::types::{Coord, Direction};

/// Which of the discovered routes `find_path` returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathPreference {
    /// Depth-first discovery keeping the longest route found
    Longest,
    /// Breadth-first shortest route
    Shortest,
}

impl Default for PathPreference {
    fn default() -> Self {
        PathPreference::Longest
    }
}

/// Finds a sequence of moves leading from `start` onto `target`
///
/// Returns `Some(vec![])` when `start == target` and `None` when the target
/// cannot be reached.
pub fn find_path(
    grid: &Grid,
    start: Coord,
    target: Coord,
    preference: PathPreference,
) -> Option<Vec<Direction>> {
    if start == target {
        return Some(Vec::new());
    }
    if !grid.in_bounds(&start) || !grid.in_bounds(&target) {
        return None;
    }

    match preference {
        PathPreference::Longest => longest_discovered(grid, start, target),
        PathPreference::Shortest => shortest(grid, start, target),
    }
}

/// One cell on the depth-first stack
struct Frame {
    loc: Coord,
    next_dir: usize,
    best: Option<Vec<Direction>>,
}

/// Keeps `candidate` if it is strictly longer than what we already have
fn offer(best: &mut Option<Vec<Direction>>, candidate: Vec<Direction>) {
    match best {
        Some(current) if current.len() >= candidate.len() => {}
        _ => *best = Some(candidate),
    }
}

/// Depth-first search where each cell is visited at most once across the
/// whole call. Every cell reports the longest route any of its children
/// discovered; the target itself is never marked visited, so it can be
/// reached along several branches.
fn longest_discovered(grid: &Grid, start: Coord, target: Coord) -> Option<Vec<Direction>> {
    let mut visited: HashSet<Coord> = HashSet::new();
    visited.insert(start);

    let mut path: Vec<Direction> = Vec::new();
    let mut stack = vec![Frame {
        loc: start,
        next_dir: 0,
        best: None,
    }];

    loop {
        let frame = stack.last_mut()?;

        if frame.next_dir < Direction::ALL.len() {
            let dir = Direction::ALL[frame.next_dir];
            frame.next_dir += 1;

            let next = dir.apply(&frame.loc);
            if next == target {
                let mut found = path.clone();
                found.push(dir);
                offer(&mut frame.best, found);
                continue;
            }
            if !grid.is_traversable(&next) || visited.contains(&next) {
                continue;
            }

            visited.insert(next);
            path.push(dir);
            stack.push(Frame {
                loc: next,
                next_dir: 0,
                best: None,
            });
            continue;
        }

        let finished = stack.pop()?;
        match stack.last_mut() {
            None => return finished.best,
            Some(parent) => {
                path.pop();
                if let Some(found) = finished.best {
                    offer(&mut parent.best, found);
                }
            }
        }
    }
}

/// Breadth-first search; the first time the target is reached is a shortest route
fn shortest(grid: &Grid, start: Coord, target: Coord) -> Option<Vec<Direction>> {
    let mut came_from: HashMap<Coord, (Coord, Direction)> = HashMap::new();
    let mut visited: HashSet<Coord> = HashSet::new();
    let mut queue = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for dir in Direction::ALL {
            let next = dir.apply(&current);
            if next == target {
                came_from.insert(next, (current, dir));
                return Some(reconstruct(&came_from, start, target));
            }
            if !grid.is_traversable(&next) || visited.contains(&next) {
                continue;
            }
            visited.insert(next);
            came_from.insert(next, (current, dir));
            queue.push_back(next);
        }
    }

    None
}

fn reconstruct(
    came_from: &HashMap<Coord, (Coord, Direction)>,
    start: Coord,
    target: Coord,
) -> Vec<Direction> {
    let mut moves = Vec::new();
    let mut current = target;
    while current != start {
        match came_from.get(&current) {
            Some(&(prev, dir)) => {
                moves.push(dir);
                current = prev;
            }
            None => break,
        }
    }
    moves.reverse();
    moves
}
