use crate::board::{Board, Cell, GOAL, MASTER};

// highest row and highest column holding `label`, taken independently
fn anchor(board: &Board, label: Cell) -> Option<(usize, usize)> {
    board
        .positions_of(label)
        .fold(None, |acc, (i, j)| match acc {
            None => Some((i, j)),
            Some((ai, aj)) => Some((ai.max(i), aj.max(j))),
        })
}

/// Manhattan distance between the master brick's anchor cell and the goal's.
///
/// Both anchors are the bottom-right corner of the label's bounding box,
/// which is cheap and deterministic but is not the minimum over all cell
/// pairs. For multi-cell masters or goals it is not guaranteed admissible.
/// Returns 0 when either label is absent.
pub fn manhattan(board: &Board) -> u32 {
    match (anchor(board, MASTER), anchor(board, GOAL)) {
        (Some((mi, mj)), Some((gi, gj))) => (mi.abs_diff(gi) + mj.abs_diff(gj)) as u32,
        _ => 0,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::parse_board;

    #[test]
    fn single_cells() {
        let board = parse_board(
            "
5,4,
1,1,1,1,1,
1,2,0,0,1,
1,0,0,0,-1,
1,1,1,1,1,
",
        )
        .unwrap();

        assert_eq!(manhattan(&board), 1 + 3);
    }

    #[test]
    fn uses_bounding_box_corners() {
        let board = parse_board(
            "
6,4,
1,1,1,1,1,1,
1,2,2,0,0,-1,
1,2,0,0,0,-1,
1,1,1,1,1,1,
",
        )
        .unwrap();

        // master anchor (2, 2), goal anchor (2, 5)
        assert_eq!(manhattan(&board), 3);
    }

    #[test]
    fn covered_goal_scores_zero() {
        let mut board = parse_board("4,3,\n1,1,1,1,\n1,2,-1,1,\n1,1,1,1,\n").unwrap();
        board[(1, 2)] = MASTER;
        assert_eq!(manhattan(&board), 0);
    }
}
