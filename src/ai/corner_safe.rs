use tracing::{trace, warn};

use crate::board::Board;
use crate::game::MoveSelector;
use crate::resolver::{self, legal_moves};
use crate::types::{Color, Position};

/// A legal move and how many replies it leaves the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub position: Position,
    pub replies: usize,
}

/// Moves for `color` that do not open a corner to the other side, in
/// row-major scan order.
pub fn safe_candidates(board: &Board, color: Color) -> Vec<Candidate> {
    let replier = color.opponent();

    legal_moves(board, color)
        .into_iter()
        .filter_map(|position| {
            let mut next = *board;
            // Only legal moves reach here, so this cannot be rejected.
            resolver::play(&mut next, color, position).ok()?;

            let replies = legal_moves(&next, replier);
            if let Some(corner) = replies.iter().find(|pos| pos.is_corner()) {
                trace!(%position, %corner, "candidate cedes a corner");
                return None;
            }

            trace!(%position, replies = replies.len(), "candidate scored");
            Some(Candidate {
                position,
                replies: replies.len(),
            })
        })
        .collect()
}

/// Single-ply greedy opponent: never cede a corner when avoidable, and among
/// the remaining moves leave the other side as few replies as possible.
#[derive(Debug)]
pub struct CornerSafeSelector {
    rng: fastrand::Rng,
}

impl CornerSafeSelector {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for CornerSafeSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveSelector for CornerSafeSelector {
    fn select_move(&mut self, board: &Board, color: Color) -> Option<Position> {
        // `min_by_key` keeps the first of equal minima, i.e. the earliest in scan order.
        if let Some(best) = safe_candidates(board, color)
            .into_iter()
            .min_by_key(|candidate| candidate.replies)
        {
            return Some(best.position);
        }

        let legal = legal_moves(board, color);
        if legal.is_empty() {
            return None;
        }

        let choice = legal[self.rng.usize(..legal.len())];
        warn!(%choice, options = legal.len(), "every move cedes a corner; choosing at random");
        Some(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: u8, y: u8) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn opening_candidates_are_all_safe_and_tie_breaks_to_first_in_scan_order() {
        let board = Board::new();
        let candidates = safe_candidates(&board, Color::White);

        assert_eq!(candidates.len(), 4);
        assert!(candidates.iter().all(|c| c.replies == 3));

        let mut selector = CornerSafeSelector::with_seed(1);
        assert_eq!(selector.select_move(&board, Color::White), Some(p(4, 2)));
    }

    #[test]
    fn prefers_move_leaving_fewest_replies() {
        let mut board = Board::new();
        resolver::play(&mut board, Color::Black, p(3, 2)).unwrap();

        assert_eq!(
            safe_candidates(&board, Color::White),
            vec![
                Candidate {
                    position: p(2, 2),
                    replies: 4
                },
                Candidate {
                    position: p(4, 2),
                    replies: 5
                },
                Candidate {
                    position: p(2, 4),
                    replies: 5
                },
            ]
        );

        let mut selector = CornerSafeSelector::with_seed(1);
        assert_eq!(selector.select_move(&board, Color::White), Some(p(2, 2)));
    }

    #[test]
    fn skips_move_that_opens_a_corner_even_with_fewer_replies() {
        let board = Board::from_diagram(&[
            "........",
            "..B.....",
            "..B.....",
            "..BWB...",
            "...BBB..",
            "...WBW..",
            "........",
            "........",
        ]);

        // (1,1) also leaves 9 replies and comes first, but one of them is (0,0).
        assert_eq!(
            legal_moves(&board, Color::White),
            vec![p(1, 1), p(1, 3), p(5, 3)]
        );
        let safe: Vec<Position> = safe_candidates(&board, Color::White)
            .iter()
            .map(|c| c.position)
            .collect();
        assert_eq!(safe, vec![p(1, 3), p(5, 3)]);

        let mut selector = CornerSafeSelector::with_seed(1);
        assert_eq!(selector.select_move(&board, Color::White), Some(p(5, 3)));
    }

    #[test]
    fn plays_the_only_move_even_when_it_cedes_a_corner() {
        let board = Board::from_diagram(&[
            "........",
            "........",
            ".BBB.W..",
            "..BBB...",
            "..BBBB..",
            "..W.....",
            ".W......",
            "........",
        ]);

        assert_eq!(legal_moves(&board, Color::White), vec![p(2, 1)]);
        assert!(safe_candidates(&board, Color::White).is_empty());

        let mut selector = CornerSafeSelector::with_seed(5);
        assert_eq!(selector.select_move(&board, Color::White), Some(p(2, 1)));
    }

    /// Every White move here hands Black a corner.
    fn all_moves_cede_a_corner() -> Board {
        Board::from_diagram(&[
            "........",
            ".WB.....",
            "..WB....",
            "..BBB...",
            "...BW...",
            "........",
            "........",
            "........",
        ])
    }

    #[test]
    fn random_fallback_picks_a_legal_move_reproducibly() {
        let board = all_moves_cede_a_corner();
        let legal = legal_moves(&board, Color::White);
        assert_eq!(legal, vec![p(2, 0), p(3, 1), p(4, 2), p(2, 4)]);
        assert!(safe_candidates(&board, Color::White).is_empty());

        for seed in 0..16 {
            let first = CornerSafeSelector::with_seed(seed).select_move(&board, Color::White);
            let second = CornerSafeSelector::with_seed(seed).select_move(&board, Color::White);

            assert!(legal.contains(&first.unwrap()));
            assert_eq!(first, second);
        }
    }

    #[test]
    fn random_fallback_varies_with_the_seed() {
        let board = all_moves_cede_a_corner();

        let mut chosen: Vec<Position> = (0..64)
            .filter_map(|seed| CornerSafeSelector::with_seed(seed).select_move(&board, Color::White))
            .collect();
        chosen.sort();
        chosen.dedup();

        assert!(chosen.len() > 1, "every seed chose {chosen:?}");
    }

    #[test]
    fn returns_none_without_legal_moves() {
        let board = Board::from_diagram(&[
            "BBBBBBBB",
            "BBBBBBBB",
            "BBBBBBBB",
            "BBBBBBBB",
            "BBBBBBBB",
            "BBBBBBBB",
            "BBBBBBBB",
            "BBBBBBB.",
        ]);
        let mut selector = CornerSafeSelector::with_seed(9);

        assert_eq!(selector.select_move(&board, Color::White), None);
        assert_eq!(selector.select_move(&board, Color::Black), None);
    }
}
