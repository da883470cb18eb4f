use crate::puzzle::{Axis, Board, Direction, Move};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleMode {
    /// Every shift is applied at once.
    Instant,
    /// One shift per `interval`, driven by the frame loop. Allowed once per
    /// session.
    Animated { interval: Duration },
}

/// Pick a random tile, then rotate its row or its column one step either way.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Move> {
    let pos = board.tiles().choose(rng)?.current();
    let direction = *[Direction::Forward, Direction::Backward].choose(rng)?;
    let movement = match [Axis::Row, Axis::Col].choose(rng)? {
        Axis::Row => Move::row(pos.row, direction),
        Axis::Col => Move::col(pos.col, direction),
    };
    Some(movement)
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    remaining: u32,
    next_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Shuffler {
    mode: ShuffleMode,
    shuffles: u32,
    used: bool,
    pending: Option<Pending>,
}

impl Shuffler {
    pub fn new(mode: ShuffleMode, shuffles: u32) -> Self {
        Self {
            mode,
            shuffles,
            used: false,
            pending: None,
        }
    }

    pub fn mode(&self) -> ShuffleMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedule a shuffle. Returns false if one is already in progress or
    /// the animated shuffle has been used up.
    pub fn request(&mut self, now: Instant) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let next_at = match self.mode {
            ShuffleMode::Instant => now,
            ShuffleMode::Animated { interval } => {
                if self.used {
                    return false;
                }
                now + interval
            }
        };
        self.used = true;
        self.pending = Some(Pending {
            remaining: self.shuffles,
            next_at,
        });
        true
    }

    /// Advance a scheduled shuffle. Returns true on the call that completes
    /// it; the board's move counter is zeroed at that point.
    pub fn step<R: Rng + ?Sized>(&mut self, board: &mut Board, rng: &mut R, now: Instant) -> bool {
        let Some(mut pending) = self.pending else {
            return false;
        };

        match self.mode {
            ShuffleMode::Instant => {
                for _ in 0..pending.remaining {
                    if let Some(movement) = random_move(board, rng) {
                        board.apply_move(movement);
                    }
                }
                pending.remaining = 0;
            }
            ShuffleMode::Animated { interval } => {
                if pending.remaining > 0 && now >= pending.next_at {
                    if let Some(movement) = random_move(board, rng) {
                        board.apply_move(movement);
                    }
                    pending.remaining -= 1;
                    pending.next_at = now + interval;
                }
            }
        }

        if pending.remaining == 0 {
            self.pending = None;
            board.reset_moves();
            true
        } else {
            self.pending = Some(pending);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BoardGeometry, Point};
    use crate::puzzle::Position;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    const INTERVAL: Duration = Duration::from_millis(15);

    fn board() -> Board {
        Board::new(5, BoardGeometry::new(5, Point::new(0, 0), 30, 15))
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn zero_shuffles_leave_the_board_solved() {
        let mut b = board();
        let mut shuffler = Shuffler::new(ShuffleMode::Instant, 0);
        let now = Instant::now();
        assert!(shuffler.request(now));
        assert!(shuffler.step(&mut b, &mut rng(), now));
        assert!(b.is_solved());
        assert_eq!(b.moves(), 0);
    }

    #[test]
    fn instant_shuffle_scrambles_and_zeroes_the_counter() {
        let mut b = board();
        let mut shuffler = Shuffler::new(ShuffleMode::Instant, 50);
        let now = Instant::now();
        shuffler.request(now);
        assert!(shuffler.step(&mut b, &mut rng(), now));
        assert!(!shuffler.is_running());
        assert!(!b.is_solved());
        assert_eq!(b.moves(), 0);

        let cells: HashSet<Position> = b.tiles().iter().map(|t| t.current()).collect();
        assert_eq!(cells.len(), 25);
    }

    #[test]
    fn instant_shuffle_can_repeat() {
        let mut shuffler = Shuffler::new(ShuffleMode::Instant, 3);
        let mut b = board();
        let now = Instant::now();
        assert!(shuffler.request(now));
        shuffler.step(&mut b, &mut rng(), now);
        assert!(shuffler.request(now));
    }

    #[test]
    fn animated_shuffle_applies_one_shift_per_interval() {
        let mut b = board();
        let mut r = rng();
        let mut shuffler = Shuffler::new(ShuffleMode::Animated { interval: INTERVAL }, 3);
        let t0 = Instant::now();
        assert!(shuffler.request(t0));

        assert!(!shuffler.step(&mut b, &mut r, t0));
        assert_eq!(b.moves(), 0);

        let t1 = t0 + INTERVAL;
        assert!(!shuffler.step(&mut b, &mut r, t1));
        assert_eq!(b.moves(), 1);
        assert!(!shuffler.step(&mut b, &mut r, t1 + Duration::from_millis(5)));
        assert_eq!(b.moves(), 1);

        let t2 = t1 + INTERVAL;
        assert!(!shuffler.step(&mut b, &mut r, t2));
        assert_eq!(b.moves(), 2);

        assert!(shuffler.step(&mut b, &mut r, t2 + INTERVAL));
        assert_eq!(b.moves(), 0);
        assert!(!shuffler.is_running());
    }

    #[test]
    fn animated_shuffle_runs_once_per_session() {
        let mut b = board();
        let mut r = rng();
        let mut shuffler = Shuffler::new(ShuffleMode::Animated { interval: INTERVAL }, 1);
        let t0 = Instant::now();
        assert!(shuffler.request(t0));
        assert!(!shuffler.request(t0));
        assert!(shuffler.step(&mut b, &mut r, t0 + INTERVAL));
        assert!(!shuffler.request(t0 + INTERVAL * 2));
    }

    #[test]
    fn step_without_request_does_nothing() {
        let mut b = board();
        let mut shuffler = Shuffler::new(ShuffleMode::Instant, 10);
        assert!(!shuffler.step(&mut b, &mut rng(), Instant::now()));
        assert!(b.is_solved());
    }

    #[test]
    fn random_moves_cover_both_axes_and_directions() {
        let b = board();
        let mut r = rng();
        let moves: Vec<Move> = (0..200).filter_map(|_| random_move(&b, &mut r)).collect();
        assert_eq!(moves.len(), 200);
        assert!(moves.iter().all(|m| m.index < 5));
        assert!(moves.iter().any(|m| m.axis == Axis::Row));
        assert!(moves.iter().any(|m| m.axis == Axis::Col));
        assert!(moves.iter().any(|m| m.direction == Direction::Forward));
        assert!(moves.iter().any(|m| m.direction == Direction::Backward));
    }

    #[test]
    fn empty_board_has_no_random_move() {
        let b = Board::new(0, BoardGeometry::new(0, Point::new(0, 0), 0, 0));
        assert_eq!(random_move(&b, &mut rng()), None);
    }
}
