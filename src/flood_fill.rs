// Breathing-room analysis: how many open cells can be reached from a cell

use std::collections::{HashSet, VecDeque};
use std::ops::Index;

use crate::grid::Grid;
use crate::types::{Coord, Direction};

/// Open-cell count for each of the four moves, indexed by `Direction`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveCounts([usize; 4]);

impl MoveCounts {
    pub fn new(counts: [usize; 4]) -> Self {
        MoveCounts(counts)
    }

    /// Move with the highest count among `candidates`, earliest candidate on ties
    pub fn best_of<I>(&self, candidates: I) -> Option<Direction>
    where
        I: IntoIterator<Item = Direction>,
    {
        candidates.into_iter().fold(None, |best, dir| match best {
            Some(b) if self[b] >= self[dir] => Some(b),
            _ => Some(dir),
        })
    }
}

impl Index<Direction> for MoveCounts {
    type Output = usize;

    fn index(&self, dir: Direction) -> &usize {
        &self.0[dir.index()]
    }
}

/// Counts distinct traversable cells reachable from `origin`
///
/// A traversable origin counts itself. A blocked origin is not counted, but
/// the space behind it still is. Off-board or missing origins yield 0.
pub fn open_count(grid: &Grid, origin: Option<Coord>) -> usize {
    let origin = match origin {
        Some(o) if grid.in_bounds(&o) => o,
        _ => return 0,
    };

    let mut reached: HashSet<Coord> = HashSet::new();
    let mut queue = VecDeque::new();

    if grid.is_traversable(&origin) {
        reached.insert(origin);
    }
    queue.push_back(origin);

    let limit = grid.cell_count();
    let mut expanded = 0;

    while let Some(current) = queue.pop_front() {
        if expanded >= limit {
            break;
        }
        expanded += 1;

        for dir in Direction::ALL {
            let next = dir.apply(&current);
            if reached.contains(&next) || !grid.is_traversable(&next) {
                continue;
            }
            reached.insert(next);
            queue.push_back(next);
        }
    }

    reached.len()
}

/// Breathing room after stepping from `head` in each direction
pub fn open_path_counts(grid: &Grid, head: &Coord) -> MoveCounts {
    let mut counts = [0; 4];
    for dir in Direction::ALL {
        counts[dir.index()] = open_count(grid, grid.step(head, dir));
    }
    MoveCounts(counts)
}
