use rand::{seq::SliceRandom, Rng};
use tracing::debug;

use crate::board::Board;
use crate::moves::Move;

/// One step of a random walk: the move taken and the normalized result.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Step {
    pub mv: Move,
    pub board: Board,
}

/// Takes up to `steps` uniformly random legal moves from `board`.
///
/// The walk starts from the normalized board and stops early once the
/// puzzle is complete or no brick can move.
pub fn random_walk<R: Rng + ?Sized>(board: &Board, steps: usize, rng: &mut R) -> Vec<Step> {
    let mut current = board.clone().normalized();
    let mut walk = Vec::with_capacity(steps);

    while walk.len() < steps && !current.is_complete() {
        let moves = current.all_available_moves();
        let Some(&mv) = moves.choose(&mut *rng) else {
            debug!(taken = walk.len(), "random walk stuck");
            break;
        };

        current = current.apply_move_cloning(mv).normalized();
        walk.push(Step {
            mv,
            board: current.clone(),
        });
    }

    walk
}
