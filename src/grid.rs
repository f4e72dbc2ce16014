// Occupancy grid built fresh from each turn's snapshot
//
// Markers are written in a fixed order (food, hazards, our body, enemy bodies)
// and a cell that already holds a marker is never overwritten. Coordinates that
// fall outside the board are skipped.

use std::fmt;

use crate::types::{Battlesnake, Board, Coord, Direction};

/// Who owns a snake cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OccupantId {
    You,
    /// Ordinal among the non-self snakes of the snapshot
    Enemy(usize),
}

impl OccupantId {
    fn symbol(&self) -> char {
        match self {
            OccupantId::You => 'I',
            OccupantId::Enemy(n) if *n < 26 => (b'A' + *n as u8) as char,
            OccupantId::Enemy(_) => '?',
        }
    }
}

/// Marker held by a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Food,
    Hazard,
    Head(OccupantId),
    Body(OccupantId),
}

impl Cell {
    /// Empty and food cells can be moved into
    pub fn is_traversable(&self) -> bool {
        matches!(self, Cell::Empty | Cell::Food)
    }

    pub fn symbol(&self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Food => '.',
            Cell::Hazard => 'X',
            Cell::Head(id) => id.symbol(),
            Cell::Body(id) => id.symbol().to_ascii_lowercase(),
        }
    }
}

/// A snake the policy reasons about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub id: OccupantId,
    pub head: Coord,
    pub length: i32,
}

/// Rectangular board of cell markers, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-empty grid; negative dimensions collapse to zero
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Grid {
            width,
            height,
            cells: vec![Cell::Empty; (width as usize) * (height as usize)],
        }
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// Marker at `coord`, or `None` when off the board
    pub fn get(&self, coord: &Coord) -> Option<Cell> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// True when `coord` is on the board and empty or food
    pub fn is_traversable(&self, coord: &Coord) -> bool {
        self.get(coord).map_or(false, |cell| cell.is_traversable())
    }

    /// A move collides when its destination is off the board or holds
    /// anything other than empty space or food.
    pub fn collides(&self, from: &Coord, dir: Direction) -> bool {
        !self.is_traversable(&dir.apply(from))
    }

    /// In-bounds destination of `dir` from `from`
    pub fn step(&self, from: &Coord, dir: Direction) -> Option<Coord> {
        let next = dir.apply(from);
        if self.in_bounds(&next) {
            Some(next)
        } else {
            None
        }
    }

    /// Iterates every cell, x-major then y
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let height = self.height;
        (0..self.width).flat_map(move |x| {
            (0..height).map(move |y| {
                let coord = Coord { x, y };
                (coord, self.cells[(y * self.width + x) as usize])
            })
        })
    }

    fn index(&self, coord: &Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some((coord.y * self.width + coord.x) as usize)
        } else {
            None
        }
    }

    /// First writer wins: returns false when the write was skipped
    fn set_if_empty(&mut self, coord: &Coord, cell: Cell) -> bool {
        match self.index(coord) {
            Some(i) if self.cells[i] == Cell::Empty => {
                self.cells[i] = cell;
                true
            }
            _ => false,
        }
    }

    fn add_snake(&mut self, body: &[Coord], id: OccupantId) {
        for (i, segment) in body.iter().enumerate() {
            let marker = if i == 0 { Cell::Head(id) } else { Cell::Body(id) };
            self.set_if_empty(segment, marker);
        }
    }
}

impl fmt::Display for Grid {
    /// Bordered ASCII map with y flipped so row 0 is printed last
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = format!("+{}+", "-".repeat(self.width as usize));
        writeln!(f, "{}", border)?;
        for y in (0..self.height).rev() {
            let row: String = (0..self.width)
                .map(|x| self.cells[(y * self.width + x) as usize].symbol())
                .collect();
            writeln!(f, "|{}|", row)?;
        }
        write!(f, "{}", border)
    }
}

/// Output of the grid builder
#[derive(Debug, Clone)]
pub struct GridBuild {
    pub grid: Grid,
    pub head: Coord,
    pub enemies: Vec<Occupant>,
}

/// Builds the occupancy grid for one decision
///
/// Returns `None` when our own head is not on the board, in which case no
/// decision can be made.
pub fn build(board: &Board, you: &Battlesnake) -> Option<GridBuild> {
    let mut grid = Grid::new(board.width, board.height);

    for food in &board.food {
        grid.set_if_empty(food, Cell::Food);
    }
    for hazard in &board.hazards {
        grid.set_if_empty(hazard, Cell::Hazard);
    }

    grid.add_snake(&you.body, OccupantId::You);

    let mut enemies = Vec::new();
    for (ordinal, snake) in board.snakes.iter().filter(|s| s.id != you.id).enumerate() {
        let id = OccupantId::Enemy(ordinal);
        grid.add_snake(&snake.body, id);

        if let Some(head) = snake.head().filter(|h| grid.in_bounds(h)) {
            enemies.push(Occupant {
                id,
                head,
                length: snake.body.len() as i32,
            });
        }
    }

    let head = you.head().filter(|h| grid.in_bounds(h))?;

    Some(GridBuild { grid, head, enemies })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
        Battlesnake {
            id: id.to_string(),
            health: 100,
            body: body.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
            length: body.len() as i32,
            ..Default::default()
        }
    }

    fn board(width: i32, height: i32, snakes: Vec<Battlesnake>) -> Board {
        Board {
            width,
            height,
            food: vec![],
            snakes,
            hazards: vec![],
        }
    }

    #[test]
    fn test_markers_are_visible_at_their_coordinates() {
        let you = snake("me", &[(1, 1), (1, 0)]);
        let enemy = snake("them", &[(3, 3), (3, 2), (2, 2)]);
        let mut b = board(5, 5, vec![you.clone(), enemy]);
        b.food = vec![Coord::new(0, 4)];
        b.hazards = vec![Coord::new(4, 0)];

        let built = build(&b, &you).unwrap();
        let grid = &built.grid;

        assert_eq!(built.head, Coord::new(1, 1));
        assert_eq!(grid.get(&Coord::new(0, 4)), Some(Cell::Food));
        assert_eq!(grid.get(&Coord::new(4, 0)), Some(Cell::Hazard));
        assert_eq!(grid.get(&Coord::new(1, 1)), Some(Cell::Head(OccupantId::You)));
        assert_eq!(grid.get(&Coord::new(1, 0)), Some(Cell::Body(OccupantId::You)));
        assert_eq!(
            grid.get(&Coord::new(3, 3)),
            Some(Cell::Head(OccupantId::Enemy(0)))
        );
        assert_eq!(
            grid.get(&Coord::new(2, 2)),
            Some(Cell::Body(OccupantId::Enemy(0)))
        );
        assert_eq!(grid.get(&Coord::new(0, 0)), Some(Cell::Empty));
    }

    #[test]
    fn test_first_writer_wins() {
        // Food under our body stays food; hazard on top of food is dropped
        let you = snake("me", &[(1, 1), (2, 1)]);
        let mut b = board(4, 4, vec![you.clone()]);
        b.food = vec![Coord::new(2, 1)];
        b.hazards = vec![Coord::new(2, 1), Coord::new(1, 1)];

        let grid = build(&b, &you).unwrap().grid;

        assert_eq!(grid.get(&Coord::new(2, 1)), Some(Cell::Food));
        assert_eq!(grid.get(&Coord::new(1, 1)), Some(Cell::Hazard));
    }

    #[test]
    fn test_enemy_does_not_overwrite_our_body() {
        let you = snake("me", &[(1, 1), (1, 2)]);
        let enemy = snake("them", &[(1, 2), (1, 3)]);
        let b = board(4, 4, vec![enemy, you.clone()]);

        let built = build(&b, &you).unwrap();

        assert_eq!(
            built.grid.get(&Coord::new(1, 2)),
            Some(Cell::Body(OccupantId::You))
        );
        assert_eq!(built.enemies.len(), 1);
        assert_eq!(built.enemies[0].head, Coord::new(1, 2));
        assert_eq!(built.enemies[0].length, 2);
    }

    #[test]
    fn test_out_of_bounds_coordinates_are_skipped() {
        let you = snake("me", &[(0, 0), (-1, 0), (0, -1)]);
        let enemy = snake("them", &[(7, 7), (2, 2)]);
        let mut b = board(3, 3, vec![you.clone(), enemy]);
        b.food = vec![Coord::new(3, 0), Coord::new(0, 3)];

        let built = build(&b, &you).unwrap();

        let occupied: Vec<_> = built
            .grid
            .iter()
            .filter(|(_, cell)| *cell != Cell::Empty)
            .map(|(coord, _)| coord)
            .collect();
        assert_eq!(occupied, vec![Coord::new(0, 0), Coord::new(2, 2)]);
        // Enemy head is off the board, so it is not tracked
        assert!(built.enemies.is_empty());
    }

    #[test]
    fn test_missing_head_means_no_decision() {
        let you = snake("me", &[]);
        assert!(build(&board(3, 3, vec![]), &you).is_none());

        let off_board = snake("me", &[(5, 5)]);
        assert!(build(&board(3, 3, vec![]), &off_board).is_none());
    }

    #[test]
    fn test_enemy_ordinals_skip_self() {
        let you = snake("me", &[(0, 0)]);
        let a = snake("a", &[(2, 2)]);
        let b = snake("b", &[(4, 4)]);
        let built = build(&board(5, 5, vec![a, you.clone(), b]), &you).unwrap();

        let ids: Vec<_> = built.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![OccupantId::Enemy(0), OccupantId::Enemy(1)]);
    }

    #[test]
    fn test_render_flips_y_axis() {
        let you = snake("me", &[(0, 0), (1, 0)]);
        let mut b = board(3, 2, vec![you.clone()]);
        b.food = vec![Coord::new(2, 1)];

        let rendered = build(&b, &you).unwrap().grid.to_string();
        assert_eq!(rendered, "+---+\n|  .|\n|Ii |\n+---+");
    }
}
