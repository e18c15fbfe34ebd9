//! Integration tests for HEXTRI
//!
//! Tests the full stack: grid geometry, coverage engine, board commands and
//! persistence.

use hextri_core::{
    all_positions, cells_at_distance, distance, load_board, range_of, save_board, Board,
    CoverageMap, FileStore, GridPos, MemoryStore, Threshold, TOTAL_CELLS,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

const CENTER: GridPos = GridPos::new(3, 3);
const CORNER: GridPos = GridPos::new(0, 0);
const NEAR: GridPos = GridPos::new(2, 3);
const TARGET: GridPos = GridPos::new(0, 3);

fn pos(id: &str) -> GridPos {
    id.parse().unwrap()
}

// ============================================================================
// SCENARIO TESTS
// ============================================================================

#[test]
fn test_monotonic_build_up() {
    let mut board = Board::new();
    assert!(board.coverage().is_empty());

    // Single 6 at the centre: ring of radius 3, no intersections
    board.set_number(CENTER, 6).unwrap();
    let coverage = board.coverage();
    let ring = cells_at_distance(CENTER, 3);
    assert_eq!(coverage.len(), ring.len());
    for cell in &ring {
        assert_eq!(coverage.count(*cell), 1);
    }
    assert!(coverage.intersections(Threshold::default()).is_empty());

    // Second source: TARGET is covered twice, still not flagged
    board.set_number(CORNER, 5).unwrap();
    assert_eq!(board.coverage().count(TARGET), 2);
    assert!(board.coverage().intersections(Threshold::default()).is_empty());

    // Third source makes TARGET an intersection
    board.set_number(NEAR, 4).unwrap();
    let found = board.coverage().intersections(Threshold::default());
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[&TARGET].iter().copied().collect::<Vec<_>>(),
        vec![pos("hex-r0-c0"), pos("hex-r2-c3"), pos("hex-r3-c3")]
    );
}

#[test]
fn test_removal_and_move() {
    let mut board = Board::new();
    board.set_number(CENTER, 6).unwrap();
    board.set_number(CORNER, 5).unwrap();
    board.set_number(NEAR, 4).unwrap();

    // Moving a source away breaks the intersection
    assert!(board.move_number(NEAR, GridPos::new(6, 7)).unwrap());
    assert!(!board.coverage().is_intersection(TARGET, Threshold::default()));

    // Moving it back restores it
    assert!(board.move_number(GridPos::new(6, 7), NEAR).unwrap());
    assert!(board.coverage().is_intersection(TARGET, Threshold::default()));

    board.clear_number(CORNER).unwrap();
    assert_eq!(board.coverage().count(TARGET), 2);
    assert!(board.coverage().intersections(Threshold::default()).is_empty());
}

// ============================================================================
// PROPERTY TESTS (seeded random boards)
// ============================================================================

#[test]
fn test_random_boards_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    for _ in 0..50 {
        let count = rng.gen_range(0..=TOTAL_CELLS);
        let board = Board::random(&mut rng, count);
        let coverage = board.coverage();

        // Idempotent
        assert_eq!(coverage, board.coverage());

        for (target, sources) in coverage.iter() {
            // Nobody covers itself
            assert!(!sources.contains(target));
            // Every source sits at exactly its range
            for source in sources {
                let number = board.number_at(*source).unwrap();
                assert_eq!(distance(*source, *target), range_of(number).unwrap());
            }
        }

        // Every intersection meets the threshold and nothing else does
        let found = coverage.intersections(Threshold::default());
        for target in all_positions() {
            assert_eq!(found.contains_key(&target), coverage.count(target) >= 3);
        }
    }
}

#[test]
fn test_input_order_does_not_matter() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let board = Board::random(&mut rng, 20);

    let mut cells: Vec<_> = board.cells().iter().map(|c| (c.pos, c.number)).collect();
    let forward = CoverageMap::compute(cells.clone());
    cells.reverse();
    let reversed = CoverageMap::compute(cells);

    assert_eq!(forward, reversed);
    assert_eq!(forward, board.coverage());
}

// ============================================================================
// PERSISTENCE TESTS
// ============================================================================

#[test]
fn test_board_survives_restart() {
    let dir = std::env::temp_dir().join(format!("hextri-it-{}", std::process::id()));
    let board = Board::seeded(5, 12);

    {
        let mut store = FileStore::open(&dir).unwrap();
        save_board(&mut store, &board).unwrap();
    }

    let store = FileStore::open(&dir).unwrap();
    let restored = load_board(&store).unwrap().unwrap();
    assert_eq!(restored, board);
    assert_eq!(restored.coverage(), board.coverage());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_memory_store_holds_latest_board() {
    let mut store = MemoryStore::new();
    let mut board = Board::new();

    board.set_number(CENTER, 6).unwrap();
    save_board(&mut store, &board).unwrap();
    board.set_number(CORNER, 5).unwrap();
    save_board(&mut store, &board).unwrap();

    assert_eq!(load_board(&store).unwrap(), Some(board));
}
