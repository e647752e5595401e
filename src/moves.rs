use std::fmt::Display;

use itertools::Itertools;
use smallvec::SmallVec;

use crate::board::{Board, Cell, EMPTY, FIRST_BRICK, GOAL, MASTER};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Generation order for a single brick.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(row, col)` offset of one step.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        })
    }
}

/// One rigid single-step slide of a whole brick.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    pub brick: Cell,
    pub direction: Direction,
}

impl Move {
    pub fn new(brick: Cell, direction: Direction) -> Move {
        Move { brick, direction }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.brick, self.direction)
    }
}

pub type BrickMoves = SmallVec<[Move; 4]>;
pub type MoveList = SmallVec<[Move; 16]>;

// visit cells so that the leading edge of a moving brick is handled first,
// which lets a brick be shifted in place without a scratch board
#[auto_enums::auto_enum(Iterator)]
fn sweep(len: usize, delta: isize) -> impl Iterator<Item = usize> {
    match delta {
        0 | 1 => (0..len).rev(),
        -1 => 0..len,
        _ => unreachable!(),
    }
}

impl Board {
    fn can_enter(&self, brick: Cell, at: (usize, usize), direction: Direction) -> bool {
        let (di, dj) = direction.delta();
        match self.get(at.0 as isize + di, at.1 as isize + dj) {
            None => false,
            Some(EMPTY) => true,
            Some(GOAL) => brick == MASTER,
            Some(c) => c == brick,
        }
    }

    /// Legal directions for one brick, in up/down/left/right order.
    /// Empty when the brick is not on the board.
    pub fn available_moves(&self, brick: Cell) -> BrickMoves {
        let mut legal = [true; 4];
        let mut found = false;

        for at in self.positions_of(brick) {
            found = true;
            for (ok, direction) in legal.iter_mut().zip(Direction::ALL) {
                if *ok && !self.can_enter(brick, at, direction) {
                    *ok = false;
                }
            }
        }

        if !found {
            return BrickMoves::new();
        }

        Direction::ALL
            .into_iter()
            .zip(legal)
            .filter(|(_, ok)| *ok)
            .map(|(direction, _)| Move::new(brick, direction))
            .collect()
    }

    /// The master brick's moves, then every other brick's in ascending id.
    pub fn all_available_moves(&self) -> MoveList {
        let mut out = MoveList::new();
        out.extend(self.available_moves(MASTER));
        let bricks = self
            .cells()
            .iter()
            .copied()
            .filter(|&c| c >= FIRST_BRICK)
            .sorted()
            .dedup();
        for brick in bricks {
            out.extend(self.available_moves(brick));
        }

        out
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.available_moves(mv.brick).contains(&mv)
    }

    /// Slides a brick one step. The move must be legal for this board.
    pub fn apply_move(&mut self, mv: Move) {
        debug_assert!(self.is_legal(mv), "illegal move {}", mv);

        let (di, dj) = mv.direction.delta();
        for i in sweep(self.height(), di) {
            for j in sweep(self.width(), dj) {
                if self[(i, j)] == mv.brick {
                    let target = ((i as isize + di) as usize, (j as isize + dj) as usize);
                    self[target] = mv.brick;
                    self[(i, j)] = EMPTY;
                }
            }
        }
    }

    /// Applies a move to a copy, leaving `self` untouched.
    pub fn apply_move_cloning(&self, mv: Move) -> Board {
        let mut next = self.clone();
        next.apply_move(mv);
        next
    }
}
