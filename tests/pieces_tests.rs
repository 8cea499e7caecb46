//! Piece library and catalog tests

use std::collections::HashSet;

use block_blast::core::{
    standard_library, CoreError, Piece, PieceCatalog, RandomSource, ScriptedRng, SimpleRng,
    STANDARD_SHAPES,
};
use block_blast::types::{MAX_PIECE_CELLS, PIECE_PREVIEW_SIZE};

#[test]
fn test_standard_library_shapes() {
    let library = standard_library();
    assert_eq!(library.len(), 15);
    assert_eq!(library.len(), STANDARD_SHAPES.len());

    let distinct: HashSet<_> = library.iter().cloned().collect();
    assert_eq!(distinct.len(), 15, "library shapes must be distinct");

    for piece in &library {
        assert!(!piece.is_empty());
        assert!(piece.width() <= PIECE_PREVIEW_SIZE);
        assert!(piece.height() <= PIECE_PREVIEW_SIZE);
        // Every shape touches its own origin row and column.
        assert!(piece.cells().iter().any(|&(_, dy)| dy == 0));
        assert!(piece.cells().iter().any(|&(dx, _)| dx == 0));
    }

    let sizes: Vec<usize> = library.iter().map(Piece::len).collect();
    assert_eq!(sizes.iter().min(), Some(&1));
    assert_eq!(sizes.iter().max(), Some(&5));
}

#[test]
fn test_piece_normalizes_offsets() {
    let a = Piece::new(&[(1, 1), (0, 0), (1, 0), (0, 0)]).unwrap();
    let b = Piece::new(&[(0, 0), (1, 0), (1, 1)]).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 3);
    assert!(a.contains(1, 1));
    assert!(!a.contains(0, 1));
}

#[test]
fn test_piece_rejects_oversized() {
    let too_many: Vec<(u8, u8)> = (0..6u8)
        .flat_map(|y| (0..5u8).map(move |x| (x, y)))
        .collect();
    assert_eq!(
        Piece::new(&too_many),
        Err(CoreError::PieceTooLarge {
            cells: 30,
            max: MAX_PIECE_CELLS
        })
    );
}

#[test]
fn test_catalog_is_deterministic_per_seed() {
    let catalog = PieceCatalog::standard();
    let mut a = SimpleRng::new(42);
    let mut b = SimpleRng::new(42);
    let seq_a: Vec<Piece> = (0..50).map(|_| catalog.random_piece(&mut a)).collect();
    let seq_b: Vec<Piece> = (0..50).map(|_| catalog.random_piece(&mut b)).collect();
    assert_eq!(seq_a, seq_b);
}

#[test]
fn test_catalog_covers_every_shape() {
    let catalog = PieceCatalog::standard();
    let mut rng = SimpleRng::new(7);
    let seen: HashSet<Piece> = (0..2000).map(|_| catalog.random_piece(&mut rng)).collect();
    assert_eq!(seen.len(), catalog.len());
}

#[test]
fn test_scripted_rng_picks_by_index() {
    let catalog = PieceCatalog::standard();
    let mut rng = ScriptedRng::new(vec![7, 0, 22]);
    assert_eq!(catalog.random_piece(&mut rng).len(), 4);
    assert_eq!(catalog.random_piece(&mut rng).len(), 1);
    // 22 % 15 == 7
    assert_eq!(&catalog.random_piece(&mut rng), &catalog.pieces()[7]);
    assert_eq!(rng.next_range(0), 0);
}

#[test]
fn test_empty_catalog_rejected() {
    assert_eq!(PieceCatalog::new(vec![]), Err(CoreError::EmptyCatalog));
}
