use block_blast_core::store::KeyValueStore;
use block_blast_core::{Board, GameSession, Piece, RandomSource};

/// Every origin where `piece` fits, in row-major order
pub fn legal_placements(board: &Board, piece: &Piece) -> Vec<(usize, usize)> {
    let side = board.size() as usize;
    let mut out = Vec::new();
    for y in 0..side {
        for x in 0..side {
            if board.is_valid_placement(piece, x, y) {
                out.push((x, y));
            }
        }
    }
    out
}

/// Per slot: holds a piece with at least one legal placement
pub fn playable_slots<R: RandomSource, S: KeyValueStore>(session: &GameSession<R, S>) -> Vec<bool> {
    session
        .slots()
        .iter()
        .map(|slot| {
            slot.as_ref()
                .is_some_and(|piece| session.board().has_any_valid_move(piece))
        })
        .collect()
}
