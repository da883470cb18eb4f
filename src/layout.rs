//! Screen geometry of the board.
//!
//! Coordinates are abstract "pixels": the terminal front end uses one pixel
//! per character cell, but nothing here depends on that.

use crate::puzzle::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, half-open on the right and bottom edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    fn from_unit(r: f32, g: f32, b: f32) -> Self {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }
}

/// Where the board sits on screen and how big each cell is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    pub origin: Point,
    pub width: i32,
    pub height: i32,
    size: usize,
}

impl BoardGeometry {
    pub fn new(size: usize, origin: Point, width: i32, height: i32) -> Self {
        Self {
            origin,
            width,
            height,
            size: size.max(1),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_width(&self) -> i32 {
        self.width / self.size as i32
    }

    pub fn cell_height(&self) -> i32 {
        self.height / self.size as i32
    }

    /// The area actually covered by tiles. May be slightly smaller than
    /// `width` x `height` when they are not multiples of the board size.
    pub fn extent(&self) -> Rect {
        Rect {
            x: self.origin.x,
            y: self.origin.y,
            width: self.cell_width() * self.size as i32,
            height: self.cell_height() * self.size as i32,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.extent().contains(point)
    }

    pub fn cell_rect(&self, pos: Position) -> Rect {
        Rect {
            x: self.origin.x + pos.col as i32 * self.cell_width(),
            y: self.origin.y + pos.row as i32 * self.cell_height(),
            width: self.cell_width(),
            height: self.cell_height(),
        }
    }

    /// Red fades out to the right, blue fades out downwards while green
    /// fades in.
    pub fn gradient(&self, pos: Position) -> Rgb {
        let n = self.size as f32;
        let row = pos.row as f32 / n;
        let col = pos.col as f32 / n;
        Rgb::from_unit(1.0 - col, row, 1.0 - row)
    }
}
