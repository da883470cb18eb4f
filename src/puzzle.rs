use crate::layout::{BoardGeometry, Point, Rect, Rgb};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn as_offset(&self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Col,
}

/// One cyclic shift of a whole row or column by a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub axis: Axis,
    pub index: usize,
    pub direction: Direction,
}

impl Move {
    pub fn row(index: usize, direction: Direction) -> Self {
        Self {
            axis: Axis::Row,
            index,
            direction,
        }
    }

    pub fn col(index: usize, direction: Direction) -> Self {
        Self {
            axis: Axis::Col,
            index,
            direction,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let axis = match self.axis {
            Axis::Row => "row",
            Axis::Col => "col",
        };
        write!(f, "{} {} {:+}", axis, self.index, self.direction.as_offset())
    }
}

#[derive(Debug, Clone)]
pub struct Tile {
    label: String,
    current: Position,
    target: Position,
    color: Rgb,
    rect: Rect,
}

impl Tile {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn current(&self) -> Position {
        self.current
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Screen rectangle as of the last `refresh`.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_home(&self) -> bool {
        self.current == self.target
    }
}

/// An N x N grid of tiles. Every cell holds exactly one tile at all times;
/// moves only ever rotate a row or column.
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    tiles: Vec<Tile>,
    geometry: BoardGeometry,
    moves: u32,
}

impl Board {
    pub fn new(size: usize, geometry: BoardGeometry) -> Self {
        let tiles = (0..size * size)
            .map(|i| {
                let pos = Position {
                    row: i % size,
                    col: i / size,
                };
                Tile {
                    label: label_for(i),
                    current: pos,
                    target: pos,
                    color: geometry.gradient(pos),
                    rect: geometry.cell_rect(pos),
                }
            })
            .collect();

        Self {
            size,
            tiles,
            geometry,
            moves: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn reset_moves(&mut self) {
        self.moves = 0;
    }

    pub fn move_row(&mut self, row: usize, direction: Direction) {
        self.moves += 1;
        let size = self.size;
        for tile in self.tiles.iter_mut().filter(|t| t.current.row == row) {
            tile.current.col = wrap(tile.current.col, direction, size);
        }
        self.refresh();
    }

    pub fn move_col(&mut self, col: usize, direction: Direction) {
        self.moves += 1;
        let size = self.size;
        for tile in self.tiles.iter_mut().filter(|t| t.current.col == col) {
            tile.current.row = wrap(tile.current.row, direction, size);
        }
        self.refresh();
    }

    pub fn apply_move(&mut self, movement: Move) {
        match movement.axis {
            Axis::Row => self.move_row(movement.index, movement.direction),
            Axis::Col => self.move_col(movement.index, movement.direction),
        }
    }

    /// Recompute every tile's screen rectangle from its logical position.
    pub fn refresh(&mut self) {
        for tile in &mut self.tiles {
            tile.rect = self.geometry.cell_rect(tile.current);
        }
    }

    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.current == pos)
    }

    pub fn tile_at_point(&self, point: Point) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.rect.contains(point))
    }

    pub fn correct_tiles(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_home()).count()
    }

    pub fn is_solved(&self) -> bool {
        self.correct_tiles() == self.size * self.size
    }
}

fn wrap(value: usize, direction: Direction, size: usize) -> usize {
    (value as isize + direction.as_offset()).rem_euclid(size as isize) as usize
}

/// `a`, `b`, ..., `z`, `aa`, `ab`, ...
fn label_for(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(char::from(b'a' + (index % 26) as u8));
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let label = self.tile_at(Position { row, col }).map_or("?", Tile::label);
                write!(f, "{:>2} ", label)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
