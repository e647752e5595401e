//! Sliding brick puzzle solver.
//!
//! A board is a grid of integer labels: `-1` goal, `0` empty, `1` wall,
//! `2` the master brick and `3..` interchangeable bricks. Bricks slide one
//! cell at a time as rigid bodies; the puzzle is solved once the master brick
//! covers every goal cell.
//!
//! ```
//! use sbp_solver::{breadth_first, parse_board, SearchLimits};
//!
//! let board = parse_board("
//! 4,3,
//! 1,1,1,1,
//! 1,2,0,-1,
//! 1,1,1,1,
//! ").unwrap();
//!
//! let report = breadth_first(&board, &SearchLimits::unbounded());
//! assert_eq!(report.path_cost(), 2);
//! ```

pub mod board;
pub mod closed_set;
pub mod config;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod moves;
pub mod node;
pub mod search;
pub mod walk;

pub use board::{parse_board, Board, Cell};
pub use closed_set::{ClosedSet, RevisitPolicy};
pub use config::SearchConfig;
pub use error::{BoardError, ConfigError};
pub use moves::{Direction, Move};
pub use search::{
    a_star, breadth_first, depth_first, depth_limited, iterative_deepening, solve, Algorithm,
    Exhaustion, Outcome, SearchLimits, SearchReport, SearchStats, Solution,
};
pub use walk::random_walk;
