use std::{
    fmt::Display,
    ops::{Index, IndexMut},
};

use itertools::Itertools;
use smallvec::SmallVec;

use crate::error::BoardError;

/// A single grid label.
pub type Cell = i32;

pub const GOAL: Cell = -1;
pub const EMPTY: Cell = 0;
pub const WALL: Cell = 1;
pub const MASTER: Cell = 2;
/// Lowest id an interchangeable brick can carry.
pub const FIRST_BRICK: Cell = 3;

/// An immutable-by-convention snapshot of the puzzle grid.
///
/// Cells are stored row-major in one buffer, inside a border of walls and
/// goals. `max_brick` is the highest brick id on the board.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    height: usize,
    width: usize,
    max_brick: Cell,
    cells: Vec<Cell>,
}

impl Board {
    /// Builds a board from row-major cells, validating the puzzle invariants.
    pub fn new(height: usize, width: usize, cells: Vec<Cell>) -> Result<Board, BoardError> {
        if height == 0 || width == 0 {
            return Err(BoardError::Empty);
        }
        if height * width != cells.len() {
            return Err(BoardError::DimensionMismatch {
                height,
                width,
                cells: cells.len(),
            });
        }
        if height < 3 || width < 3 {
            return Err(BoardError::TooSmall { height, width });
        }

        if let Some(ix) = cells.iter().position(|&c| c < GOAL) {
            return Err(BoardError::InvalidCell {
                row: ix / width,
                col: ix % width,
                value: cells[ix],
            });
        }
        // the state key only sees the interior, so nothing may move on the border
        let on_border = |ix: usize| {
            let (row, col) = (ix / width, ix % width);
            row == 0 || col == 0 || row == height - 1 || col == width - 1
        };
        if let Some(ix) =
            (0..cells.len()).find(|&ix| on_border(ix) && cells[ix] != WALL && cells[ix] != GOAL)
        {
            return Err(BoardError::OpenBorder {
                row: ix / width,
                col: ix % width,
                value: cells[ix],
            });
        }
        if !cells.contains(&MASTER) {
            return Err(BoardError::MissingMaster);
        }
        if !cells.contains(&GOAL) {
            return Err(BoardError::MissingGoal);
        }

        let max_brick = cells.iter().copied().fold(MASTER, Cell::max);
        Ok(Board {
            height,
            width,
            max_brick,
            cells,
        })
    }

    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Board, BoardError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().find_position(|r| r.len() != width) {
            return Err(BoardError::Ragged {
                row,
                expected: width,
                found: r.len(),
            });
        }

        Board::new(height, width, rows.into_iter().flatten().collect())
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn max_brick(&self) -> Cell {
        self.max_brick
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Bounds-checked lookup; `None` outside the grid.
    pub fn get(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return None;
        }
        Some(self[(row as usize, col as usize)])
    }

    /// Every `(row, col)` holding `label`, in row-major order.
    pub fn positions_of(&self, label: Cell) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .positions(move |&c| c == label)
            .map(move |ix| (ix / width, ix % width))
    }

    /// A board is solved once the master brick covers every goal cell.
    pub fn is_complete(&self) -> bool {
        !self.cells.contains(&GOAL)
    }

    /// Renumbers interchangeable bricks (ids >= 3) in row-major order of
    /// first appearance, so that boards differing only in brick numbering
    /// become identical. Goal, empty, wall and master cells are untouched.
    pub fn normalize(&mut self) {
        let mut remap: SmallVec<[(Cell, Cell); 16]> = SmallVec::new();
        let mut next = FIRST_BRICK;
        for c in &mut self.cells {
            if *c < FIRST_BRICK {
                continue;
            }

            *c = match remap.iter().find(|&&(from, _)| from == *c) {
                Some(&(_, to)) => to,
                None => {
                    remap.push((*c, next));
                    next += 1;
                    next - 1
                }
            };
        }

        self.max_brick = next - 1;
    }

    pub fn normalized(mut self) -> Board {
        self.normalize();
        self
    }
}

/// Renders in the same text format [`parse_board`] reads.
impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{},{},", self.width, self.height)?;
        for line in self.rows() {
            writeln!(f, "{},", line.iter().join(","))?;
        }

        Ok(())
    }
}

impl Index<(usize, usize)> for Board {
    type Output = Cell;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.cells[index.0 * self.width + index.1]
    }
}

impl IndexMut<(usize, usize)> for Board {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.cells[index.0 * self.width + index.1]
    }
}

/// Reads a puzzle in the `W,H,` text format: a width and height followed by
/// `H` rows of `W` comma-terminated labels. Line breaks are cosmetic.
pub fn parse_board(text: &str) -> Result<Board, BoardError> {
    let mut values = Vec::new();
    for (line_ix, line) in text.lines().enumerate() {
        for token in line.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let value = token.parse::<Cell>().map_err(|_| BoardError::Parse {
                line: line_ix + 1,
                token: token.to_owned(),
            })?;
            values.push(value);
        }
    }

    let (width, height) = match values[..] {
        [w, h, ..] if w > 0 && h > 0 => (w as usize, h as usize),
        _ => return Err(BoardError::Empty),
    };

    let cells = values.split_off(2);
    let expected = width * height;
    if cells.len() < expected {
        return Err(BoardError::Truncated {
            expected,
            found: cells.len(),
        });
    }

    Board::new(height, width, cells)
}

#[cfg(test)]
mod test {
    use super::*;

    const LEVEL: &str = "
5,4,
1,-1,-1,1,1,
1,0,3,4,1,
1,0,2,2,1,
1,1,1,1,1,
";

    #[test]
    fn parses_dimensions_and_max_brick() {
        let board = parse_board(LEVEL).unwrap();

        assert_eq!(board.width(), 5);
        assert_eq!(board.height(), 4);
        assert_eq!(board.max_brick(), 4);
        assert_eq!(board[(1, 2)], 3);
        assert_eq!(board[(0, 1)], GOAL);
    }

    #[test]
    fn display_matches_input_format() {
        let board = parse_board(LEVEL).unwrap();
        let rendered = board.to_string();

        assert!(rendered.starts_with("5,4,\n1,-1,-1,1,1,\n"));
        assert_eq!(parse_board(&rendered).unwrap(), board);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_board(""), Err(BoardError::Empty));
        assert_eq!(
            parse_board("2,2,\n1,2,\n"),
            Err(BoardError::Truncated {
                expected: 4,
                found: 2
            })
        );
        assert!(matches!(
            parse_board("2,1,\n2,x,\n"),
            Err(BoardError::Parse { line: 2, .. })
        ));
        assert_eq!(
            parse_board("3,3,\n1,1,1,\n1,2,1,\n1,1,1,\n"),
            Err(BoardError::MissingGoal)
        );
        assert_eq!(
            parse_board("3,3,\n1,-1,1,\n1,0,1,\n1,1,1,\n"),
            Err(BoardError::MissingMaster)
        );
        assert_eq!(
            Board::from_rows(vec![vec![2, -1], vec![0]]),
            Err(BoardError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Board::new(3, 3, vec![1, 1, 1, 1, 2, -1, 1, -5, 1]),
            Err(BoardError::InvalidCell {
                row: 2,
                col: 1,
                value: -5
            })
        );
    }

    #[test]
    fn rejects_boards_without_a_closed_border() {
        assert_eq!(
            Board::from_rows(vec![vec![2, 0, -1]]),
            Err(BoardError::TooSmall {
                height: 1,
                width: 3
            })
        );
        assert_eq!(
            Board::from_rows(vec![vec![2, 0, 0, -1], vec![1, 1, 1, 1]]),
            Err(BoardError::TooSmall {
                height: 2,
                width: 4
            })
        );
        assert_eq!(
            parse_board("4,3,\n1,1,1,1,\n2,0,0,-1,\n1,1,1,1,\n"),
            Err(BoardError::OpenBorder {
                row: 1,
                col: 0,
                value: MASTER
            })
        );
        assert_eq!(
            parse_board("4,3,\n1,0,1,1,\n1,2,0,-1,\n1,1,1,1,\n"),
            Err(BoardError::OpenBorder {
                row: 0,
                col: 1,
                value: EMPTY
            })
        );

        // goals may sit in the border
        assert!(parse_board("4,3,\n1,1,1,1,\n1,2,0,-1,\n1,1,1,1,\n").is_ok());
    }

    #[test]
    fn normalize_renumbers_in_scan_order() {
        let mut board = Board::from_rows(vec![
            vec![1, -1, 1, 1, 1],
            vec![1, 7, 7, 5, 1],
            vec![1, 2, 4, 5, 1],
            vec![1, 9, 4, 0, 1],
            vec![1, 1, 1, 1, 1],
        ])
        .unwrap();

        board.normalize();

        assert_eq!(
            board.rows().collect::<Vec<_>>(),
            [
                &[1, -1, 1, 1, 1][..],
                &[1, 3, 3, 4, 1][..],
                &[1, 2, 5, 4, 1][..],
                &[1, 6, 5, 0, 1][..],
                &[1, 1, 1, 1, 1][..],
            ]
        );
        assert_eq!(board.max_brick(), 6);
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = parse_board(LEVEL).unwrap().normalized();
        let twice = once.clone().normalized();

        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_handles_sparse_ids() {
        let board = Board::from_rows(vec![
            vec![1, -1, 1, 1],
            vec![1, Cell::MAX, 3, 1],
            vec![1, 2, 0, 1],
            vec![1, 1, 1, 1],
        ])
        .unwrap();
        assert_eq!(board.max_brick(), Cell::MAX);

        let normalized = board.normalized();
        assert_eq!(&normalized.cells()[4..8], &[1, 3, 4, 1]);
        assert_eq!(normalized.max_brick(), 4);
    }

    #[test]
    fn relabelled_boards_normalize_identically() {
        let a = Board::from_rows(vec![
            vec![1, -1, 1, 1, 1],
            vec![1, 3, 2, 4, 1],
            vec![1, 4, 0, 3, 1],
            vec![1, 1, 1, 1, 1],
        ])
        .unwrap();
        let b = Board::from_rows(vec![
            vec![1, -1, 1, 1, 1],
            vec![1, 6, 2, 3, 1],
            vec![1, 3, 0, 6, 1],
            vec![1, 1, 1, 1, 1],
        ])
        .unwrap();

        assert_ne!(a, b);
        assert_eq!(a.normalized(), b.normalized());
    }

    #[test]
    fn complete_once_goals_are_covered() {
        let open = Board::from_rows(vec![vec![1, 1, 1], vec![1, 2, -1], vec![1, 1, 1]]).unwrap();
        assert!(!open.is_complete());

        let mut covered = open.clone();
        covered[(1, 2)] = MASTER;
        assert!(covered.is_complete());
    }
}
