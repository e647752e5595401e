//! Uninformed and informed searches over board states.
//!
//! Every strategy runs the same loop and differs only in its frontier, its
//! closed-set revisit policy and an optional depth bound:
//!
//! | strategy            | frontier     | revisit       | depth bound |
//! |---------------------|--------------|---------------|-------------|
//! | breadth-first       | [`FifoQueue`]| insert once   | none        |
//! | depth-first         | [`FiloStack`]| reopen        | none        |
//! | depth-limited       | [`FiloStack`]| reopen        | `max_depth` |
//! | iterative deepening | [`FiloStack`]| reopen        | 1, 2, 3, …  |
//! | A*                  | [`BestFirst`]| insert once   | none        |
//!
//! A child is tested for completion before the closed set is consulted, and
//! the first completed child ends the search.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::board::Board;
use crate::closed_set::{state_key, ClosedSet, RevisitPolicy};
use crate::error::ConfigError;
use crate::frontier::{BestFirst, FifoQueue, FiloStack, Frontier};
use crate::moves::Move;
use crate::node::NodeArena;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Bfs,
    Dfs,
    DepthLimited,
    IterativeDeepening,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::DepthLimited,
        Algorithm::IterativeDeepening,
        Algorithm::AStar,
    ];

    fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::DepthLimited => "depth_limited",
            Algorithm::IterativeDeepening => "iterative_deepening",
            Algorithm::AStar => "a_star",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| ConfigError::Invalid(format!("unknown algorithm {:?}", s)))
    }
}

/// Resource bounds for a single search.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchLimits {
    /// Maximum number of search nodes created, root included. Nodes are only
    /// freed when the search returns.
    pub node_budget: Option<usize>,
}

impl SearchLimits {
    pub fn unbounded() -> SearchLimits {
        SearchLimits::default()
    }

    pub fn with_node_budget(budget: usize) -> SearchLimits {
        SearchLimits {
            node_budget: Some(budget),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Nodes whose moves were generated.
    pub expanded: usize,
    /// Child states produced, duplicates included.
    pub generated: usize,
    /// Entries in the closed set when the search stopped.
    pub closed_states: usize,
    pub peak_frontier: usize,
    /// Depth-limited rounds run (1 for single-pass searches).
    pub rounds: u32,
}

impl SearchStats {
    fn absorb(&mut self, round: &SearchStats) {
        self.expanded += round.expanded;
        self.generated += round.generated;
        self.closed_states = round.closed_states;
        self.peak_frontier = self.peak_frontier.max(round.peak_frontier);
        self.rounds += round.rounds;
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    /// Moves from the initial board, in order.
    pub moves: Vec<Move>,
    /// The solved board.
    pub board: Board,
    pub cost: u32,
}

/// One move per line, then the solved board.
impl Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for mv in &self.moves {
            writeln!(f, "{}", mv)?;
        }
        write!(f, "{}", self.board)
    }
}

/// Why a search stopped without an answer either way.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Exhaustion {
    /// Nodes at this depth were left unexpanded.
    DepthLimit(u32),
    /// The search graph reached this many nodes.
    NodeBudget(usize),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    Solved(Solution),
    /// Every reachable state was expanded without completing the puzzle.
    Unsolvable,
    Exhausted(Exhaustion),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchReport {
    pub outcome: Outcome,
    pub stats: SearchStats,
}

impl SearchReport {
    /// Number of moves in the solution, or -1 when none was found.
    pub fn path_cost(&self) -> i32 {
        match &self.outcome {
            Outcome::Solved(solution) => solution.cost as i32,
            _ => -1,
        }
    }

    pub fn solution(&self) -> Option<&Solution> {
        match &self.outcome {
            Outcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.solution().is_some()
    }
}

fn run<F: Frontier>(
    board: &Board,
    mut frontier: F,
    policy: RevisitPolicy,
    depth_limit: Option<u32>,
    limits: &SearchLimits,
    closed: &mut ClosedSet,
) -> SearchReport {
    let mut arena = NodeArena::new();
    let mut stats = SearchStats {
        rounds: 1,
        ..SearchStats::default()
    };
    let mut cut_off = false;

    closed.clear();
    // the root keeps its labels so reported moves match the input
    closed.insert(state_key(&board.clone().normalized()), 0);
    let root = arena.root(board.clone());
    frontier.push(root, &arena[root]);

    while let Some(id) = frontier.pop() {
        let cost = arena[id].cost;
        if depth_limit.map_or(false, |limit| cost >= limit) {
            cut_off = true;
            continue;
        }

        let moves = arena[id].board.all_available_moves();
        stats.expanded += 1;
        trace!(node = id.index(), cost, moves = moves.len(), "expanding");

        for mv in moves {
            let child = arena[id].board.apply_move_cloning(mv).normalized();
            stats.generated += 1;

            if child.is_complete() {
                let mut path = arena.path_to(id);
                path.push(mv);
                stats.closed_states = closed.len();
                return SearchReport {
                    outcome: Outcome::Solved(Solution {
                        moves: path,
                        board: child,
                        cost: cost + 1,
                    }),
                    stats,
                };
            }

            if !closed.admit(state_key(&child), cost + 1, policy) {
                continue;
            }

            if let Some(budget) = limits.node_budget.filter(|&b| arena.len() >= b) {
                warn!(budget, closed = closed.len(), "node budget exhausted");
                stats.closed_states = closed.len();
                return SearchReport {
                    outcome: Outcome::Exhausted(Exhaustion::NodeBudget(budget)),
                    stats,
                };
            }

            let child_id = arena.child(id, mv, child);
            frontier.push(child_id, &arena[child_id]);
            stats.peak_frontier = stats.peak_frontier.max(frontier.len());
        }
    }

    stats.closed_states = closed.len();
    let outcome = match depth_limit {
        Some(limit) if cut_off => Outcome::Exhausted(Exhaustion::DepthLimit(limit)),
        _ => Outcome::Unsolvable,
    };

    SearchReport { outcome, stats }
}

fn start(algorithm: Algorithm) {
    info!(%algorithm, "search started");
}

fn finish(algorithm: Algorithm, report: SearchReport) -> SearchReport {
    info!(
        %algorithm,
        cost = report.path_cost(),
        expanded = report.stats.expanded,
        closed = report.stats.closed_states,
        "search finished"
    );
    report
}

/// Breadth-first search. The first completed state found is at minimal depth.
pub fn breadth_first(board: &Board, limits: &SearchLimits) -> SearchReport {
    start(Algorithm::Bfs);
    let mut closed = ClosedSet::new();
    let report = run(
        board,
        FifoQueue::default(),
        RevisitPolicy::InsertOnce,
        None,
        limits,
        &mut closed,
    );
    finish(Algorithm::Bfs, report)
}

/// Unbounded depth-first search. Not optimal; a state is re-expanded only
/// when reached by a strictly shorter path.
pub fn depth_first(board: &Board, limits: &SearchLimits) -> SearchReport {
    start(Algorithm::Dfs);
    let mut closed = ClosedSet::new();
    let report = run(
        board,
        FiloStack::default(),
        RevisitPolicy::Reopen,
        None,
        limits,
        &mut closed,
    );
    finish(Algorithm::Dfs, report)
}

/// Depth-first search that leaves nodes with `cost >= max_depth` unexpanded.
pub fn depth_limited(board: &Board, max_depth: u32, limits: &SearchLimits) -> SearchReport {
    start(Algorithm::DepthLimited);
    let mut closed = ClosedSet::new();
    let report = run(
        board,
        FiloStack::default(),
        RevisitPolicy::Reopen,
        Some(max_depth),
        limits,
        &mut closed,
    );
    finish(Algorithm::DepthLimited, report)
}

/// Depth-limited search at depths 1, 2, … up to `max_depth`.
///
/// Stops early with [`Outcome::Unsolvable`] when a round leaves nothing
/// unexpanded, and with [`Exhaustion::DepthLimit`] when `max_depth` is
/// reached first.
pub fn iterative_deepening(board: &Board, max_depth: u32, limits: &SearchLimits) -> SearchReport {
    start(Algorithm::IterativeDeepening);
    let mut closed = ClosedSet::new();
    let mut stats = SearchStats::default();

    for depth in 1..=max_depth {
        let round = run(
            board,
            FiloStack::default(),
            RevisitPolicy::Reopen,
            Some(depth),
            limits,
            &mut closed,
        );
        stats.absorb(&round.stats);
        debug!(depth, expanded = round.stats.expanded, "deepening round done");

        if round.outcome != Outcome::Exhausted(Exhaustion::DepthLimit(depth)) {
            return finish(
                Algorithm::IterativeDeepening,
                SearchReport {
                    outcome: round.outcome,
                    stats,
                },
            );
        }
    }

    finish(
        Algorithm::IterativeDeepening,
        SearchReport {
            outcome: Outcome::Exhausted(Exhaustion::DepthLimit(max_depth)),
            stats,
        },
    )
}

/// A* on f(n) = g(n) + [`manhattan`](crate::heuristic::manhattan).
///
/// States are closed on first discovery and never reopened, so a cheaper
/// path found later to an already-recorded state is discarded.
pub fn a_star(board: &Board, limits: &SearchLimits) -> SearchReport {
    start(Algorithm::AStar);
    let mut closed = ClosedSet::new();
    let report = run(
        board,
        BestFirst::default(),
        RevisitPolicy::InsertOnce,
        None,
        limits,
        &mut closed,
    );
    finish(Algorithm::AStar, report)
}

/// Runs `algorithm`; `max_depth` only bounds the depth-limited strategies.
pub fn solve(
    board: &Board,
    algorithm: Algorithm,
    max_depth: u32,
    limits: &SearchLimits,
) -> SearchReport {
    match algorithm {
        Algorithm::Bfs => breadth_first(board, limits),
        Algorithm::Dfs => depth_first(board, limits),
        Algorithm::DepthLimited => depth_limited(board, max_depth, limits),
        Algorithm::IterativeDeepening => iterative_deepening(board, max_depth, limits),
        Algorithm::AStar => a_star(board, limits),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::parse_board;
    use crate::moves::Direction;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    // master two steps from the goal, nothing in the way
    const TWO_STEPS: &str = "
5,3,
1,1,1,1,1,
1,2,0,-1,1,
1,1,1,1,1,
";

    // the master must wait for brick 3 to clear the corridor
    const DETOUR: &str = "
5,4,
1,1,1,1,1,
1,2,3,0,-1,
1,0,0,0,1,
1,1,1,1,1,
";

    #[test]
    fn algorithm_names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert!("dijkstra".parse::<Algorithm>().is_err());
    }

    #[test]
    fn bfs_reports_path_and_board() {
        let board = parse_board(TWO_STEPS).unwrap();
        let report = breadth_first(&board, &SearchLimits::unbounded());
        let solution = report.solution().unwrap();

        let right = Move::new(2, Direction::Right);
        assert_eq!(solution.moves, vec![right, right]);
        assert_eq!(solution.cost, 2);
        assert!(solution.board.is_complete());
        assert_eq!(report.stats.rounds, 1);
        assert_eq!(solution.to_string().lines().next(), Some("(2,right)"));
    }

    #[test]
    fn depth_limit_leaves_frontier_unexpanded() {
        let board = parse_board(TWO_STEPS).unwrap();

        let shallow = depth_limited(&board, 1, &SearchLimits::unbounded());
        assert_eq!(shallow.path_cost(), -1);
        assert_eq!(
            shallow.outcome,
            Outcome::Exhausted(Exhaustion::DepthLimit(1))
        );
        // only the root: its child at cost 1 is never expanded
        assert_eq!(shallow.stats.expanded, 1);

        let deep = depth_limited(&board, 2, &SearchLimits::unbounded());
        assert_eq!(deep.path_cost(), 2);
    }

    #[test]
    fn deepening_counts_rounds() {
        let board = parse_board(TWO_STEPS).unwrap();
        let report = iterative_deepening(&board, 10, &SearchLimits::unbounded());

        assert_eq!(report.path_cost(), 2);
        assert_eq!(report.stats.rounds, 2);
    }

    #[test]
    fn deepening_gives_up_at_max_depth() {
        let board = parse_board(DETOUR).unwrap();
        let report = iterative_deepening(&board, 2, &SearchLimits::unbounded());

        assert_eq!(report.outcome, Outcome::Exhausted(Exhaustion::DepthLimit(2)));
        assert_eq!(report.stats.rounds, 2);
    }

    #[test]
    fn depth_limit_needs_reopening() {
        let board = parse_board(DETOUR).unwrap();
        let limits = SearchLimits::unbounded();
        let limited = |policy| {
            let mut closed = ClosedSet::new();
            run(&board, FiloStack::default(), policy, Some(4), &limits, &mut closed)
        };

        // the dive reaches states near the limit first; only re-expanding
        // them from their shallow paths leaves room for the last moves
        assert_eq!(limited(RevisitPolicy::Reopen).path_cost(), 4);
        assert_eq!(
            limited(RevisitPolicy::InsertOnce).outcome,
            Outcome::Exhausted(Exhaustion::DepthLimit(4))
        );
        assert_eq!(depth_limited(&board, 4, &limits).path_cost(), 4);
    }

    #[test]
    fn detour_is_solved_optimally() {
        let board = parse_board(DETOUR).unwrap();

        // 3 down, then the master walks right three times
        assert_eq!(breadth_first(&board, &SearchLimits::unbounded()).path_cost(), 4);
        assert_eq!(a_star(&board, &SearchLimits::unbounded()).path_cost(), 4);
        assert_eq!(
            iterative_deepening(&board, 10, &SearchLimits::unbounded()).path_cost(),
            4
        );
        assert!(depth_first(&board, &SearchLimits::unbounded()).path_cost() >= 4);
    }

    #[test]
    fn node_budget_aborts_with_stats() {
        let board = parse_board(DETOUR).unwrap();
        let report = breadth_first(&board, &SearchLimits::with_node_budget(2));

        assert_eq!(report.outcome, Outcome::Exhausted(Exhaustion::NodeBudget(2)));
        assert_eq!(report.path_cost(), -1);
        assert!(report.stats.closed_states >= 2);
    }

    #[test]
    fn solve_dispatches() {
        let board = parse_board(TWO_STEPS).unwrap();
        for algorithm in Algorithm::ALL {
            let report = solve(&board, algorithm, 5, &SearchLimits::unbounded());
            assert_eq!(report.path_cost(), 2, "{}", algorithm);
        }
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn strategies_log_their_own_start() {
        let board = parse_board(TWO_STEPS).unwrap();
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            breadth_first(&board, &SearchLimits::unbounded());
            iterative_deepening(&board, 5, &SearchLimits::unbounded());
        });

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert_eq!(logs.matches("search started").count(), 2);
        assert_eq!(logs.matches("search finished").count(), 2);
        assert!(logs.contains("algorithm=bfs"));
        assert!(logs.contains("algorithm=iterative_deepening"));
    }
}
