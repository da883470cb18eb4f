//! Turns pointer gestures into row and column rotations.
//!
//! A drag is anchored on the tile under the pointer when the primary button
//! goes down. Whenever the pointer leaves the anchor cell (checked right,
//! left, up, down) the matching row or column is rotated one step and the
//! anchor follows into the neighbouring cell, so a long drag produces one
//! rotation per cell crossed.

use crate::layout::Point;
use crate::puzzle::{Board, Direction, Move, Position};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down { button: Button, x: i32, y: i32 },
    /// `button` is the button held down, if any.
    Move {
        button: Option<Button>,
        x: i32,
        y: i32,
    },
    Up { button: Button, x: i32, y: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragAnchor {
    /// Pointer position when the anchor was last set. Only reported in
    /// diagnostics; the shift check works on the anchor cell.
    pub origin_x: i32,
    pub origin_y: i32,
    pub anchor_row: usize,
    pub anchor_col: usize,
}

impl DragAnchor {
    fn cell(&self) -> Position {
        Position {
            row: self.anchor_row,
            col: self.anchor_col,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    Ignored,
    Started(Position),
    Shifted(Vec<Move>),
    Released,
}

#[derive(Debug, Default, Clone)]
pub struct DragController {
    anchor: Option<DragAnchor>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn anchor(&self) -> Option<&DragAnchor> {
        self.anchor.as_ref()
    }

    /// Feed one pointer event. Shifts are reported, not applied; the caller
    /// owns the board.
    pub fn handle(&mut self, event: PointerEvent, board: &Board) -> DragOutcome {
        match event {
            PointerEvent::Down {
                button: Button::Primary,
                x,
                y,
            } => self.begin(Point::new(x, y), board),
            PointerEvent::Move {
                button: Some(Button::Primary),
                x,
                y,
            } => {
                let moves = self.follow(Point::new(x, y), board);
                if moves.is_empty() {
                    DragOutcome::Ignored
                } else {
                    DragOutcome::Shifted(moves)
                }
            }
            // Nothing held: the primary release never arrived.
            PointerEvent::Move { button: None, .. } => match self.anchor.take() {
                Some(_) => {
                    debug!("drag dropped, button no longer held");
                    DragOutcome::Released
                }
                None => DragOutcome::Ignored,
            },
            PointerEvent::Up {
                button: Button::Primary,
                ..
            } => match self.anchor.take() {
                Some(_) => DragOutcome::Released,
                None => DragOutcome::Ignored,
            },
            PointerEvent::Down { .. } | PointerEvent::Move { .. } | PointerEvent::Up { .. } => {
                DragOutcome::Ignored
            }
        }
    }

    fn begin(&mut self, point: Point, board: &Board) -> DragOutcome {
        if !board.geometry().contains(point) {
            return DragOutcome::Ignored;
        }
        let Some(tile) = board.tile_at_point(point) else {
            return DragOutcome::Ignored;
        };
        let pos = tile.current();
        self.anchor = Some(DragAnchor {
            origin_x: point.x,
            origin_y: point.y,
            anchor_row: pos.row,
            anchor_col: pos.col,
        });
        DragOutcome::Started(pos)
    }

    fn follow(&mut self, point: Point, board: &Board) -> Vec<Move> {
        let mut moves = Vec::new();
        let geometry = board.geometry();
        if !geometry.contains(point) {
            return moves;
        }
        let Some(anchor) = self.anchor.as_mut() else {
            return moves;
        };

        // The pointer is on the board, so the anchor reaches it in at most
        // 2N steps.
        for _ in 0..2 * geometry.size() {
            let bounds = geometry.cell_rect(anchor.cell());
            let row = anchor.anchor_row;
            let col = anchor.anchor_col;

            let movement = if point.x >= bounds.right() {
                anchor.anchor_col = col + 1;
                Move::row(row, Direction::Forward)
            } else if point.x < bounds.x {
                let Some(prev) = col.checked_sub(1) else { break };
                anchor.anchor_col = prev;
                Move::row(row, Direction::Backward)
            } else if point.y < bounds.y {
                let Some(prev) = row.checked_sub(1) else { break };
                anchor.anchor_row = prev;
                Move::col(col, Direction::Backward)
            } else if point.y >= bounds.bottom() {
                anchor.anchor_row = row + 1;
                Move::col(col, Direction::Forward)
            } else {
                break;
            };

            debug!(
                %movement,
                dx = point.x - anchor.origin_x,
                dy = point.y - anchor.origin_y,
                "drag shift"
            );
            anchor.origin_x = point.x;
            anchor.origin_y = point.y;
            moves.push(movement);
        }
        moves
    }
}
