//! Game session - the single owner of all mutable game state
//!
//! A turn runs in two steps so a front-end can show the burst animation:
//! [`GameSession::begin_placement`] writes the piece and locks the session in
//! `Resolving`, then [`GameSession::finish_turn`] clears lines, scores the
//! combo, refills the slots and checks for game over. Headless callers use
//! [`GameSession::attempt_placement`], which runs both steps back to back.

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::{CoreError, CoreResult, PlacementError};
use crate::lines::{clear_lines, find_full_lines, FullLines};
use crate::pieces::{Piece, PieceCatalog};
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{
    calculate_clear_gain, goal_progress, placement_score, ClearGain, GoalProgress,
};
use crate::snapshot::{footprint, GameSnapshot, PendingClear, Preview, TurnOutcome};
use crate::store::{load_best_score, save_best_score, KeyValueStore, MemoryStore};
use crate::types::{Phase, INITIAL_COMBO};

pub const STATUS_SELECT_PROMPT: &str = "Pick a cell and press Enter to place";
pub const STATUS_INVALID_PLACEMENT: &str = "Can't place there";
pub const STATUS_GAME_OVER: &str = "Game over. Press R to restart!";

fn lines_cleared_status(count: u32) -> String {
    if count == 1 {
        "1 line cleared!".to_string()
    } else {
        format!("{} lines cleared!", count)
    }
}

/// One playthrough plus the best score that outlives it
#[derive(Debug, Clone)]
pub struct GameSession<R = SimpleRng, S = MemoryStore> {
    board: Board,
    catalog: PieceCatalog,
    goals: Vec<u32>,
    slots: Vec<Option<Piece>>,
    selected: Option<usize>,
    /// Set between `begin_placement` and `finish_turn`.
    pending: Option<PendingClear>,
    score: u32,
    best: u32,
    combo: u32,
    game_over: bool,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Accepted placements in this episode.
    turn: u32,
    status: String,
    rng: R,
    store: S,
}

impl GameSession {
    /// Session seeded from `config.seed` with an in-memory best score
    pub fn new(config: GameConfig) -> CoreResult<Self> {
        let rng = SimpleRng::new(config.seed);
        Self::with_parts(config, rng, MemoryStore::new())
    }
}

impl<R: RandomSource, S: KeyValueStore> GameSession<R, S> {
    /// Build a session around a caller-supplied RNG and best-score store
    pub fn with_parts(config: GameConfig, rng: R, store: S) -> CoreResult<Self> {
        config.validate()?;
        let GameConfig {
            board_size,
            slot_count,
            goals,
            pieces,
            ..
        } = config;

        let best = load_best_score(&store);
        let mut session = Self {
            board: Board::new(board_size)?,
            catalog: PieceCatalog::new(pieces)?,
            goals,
            slots: vec![None; slot_count],
            selected: None,
            pending: None,
            score: 0,
            best,
            combo: INITIAL_COMBO,
            game_over: false,
            episode_id: 0,
            turn: 0,
            status: String::new(),
            rng,
            store,
        };
        session.deal();
        session.check_game_over();
        debug!(
            "[Session] new game: {}x{} board, {} slots, best {}",
            board_size, board_size, slot_count, best
        );
        Ok(session)
    }

    /// Replace the board, for puzzles and scripted positions
    ///
    /// Rejects a board of a different size. Re-runs the game-over check.
    pub fn with_board(mut self, board: Board) -> CoreResult<Self> {
        if board.size() != self.board.size() {
            return Err(CoreError::InvalidBoardSize {
                size: board.size() as usize,
            });
        }
        self.board = board;
        self.game_over = false;
        self.check_game_over();
        Ok(self)
    }

    /// Replace the slot contents
    ///
    /// An all-empty list triggers a fresh deal, as after a turn.
    pub fn with_slots(mut self, slots: Vec<Option<Piece>>) -> CoreResult<Self> {
        if slots.len() != self.slots.len() {
            return Err(CoreError::InvalidSlotCount { count: slots.len() });
        }
        self.slots = slots;
        self.selected = None;
        self.refill_if_empty();
        self.game_over = false;
        self.check_game_over();
        Ok(self)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn slots(&self) -> &[Option<Piece>] {
        &self.slots
    }

    pub fn slot(&self, slot: usize) -> Option<&Piece> {
        self.slots.get(slot).and_then(|p| p.as_ref())
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Combo streak value the next clearing turn will build on
    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn goals(&self) -> &[u32] {
        &self.goals
    }

    pub fn catalog(&self) -> &PieceCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lines waiting to burst, while resolving
    pub fn pending_lines(&self) -> Option<&FullLines> {
        self.pending.as_ref().map(|p| &p.lines)
    }

    /// Current interaction phase, derived from the session flags
    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.pending.is_some() {
            Phase::Resolving
        } else if self.selected.is_some() {
            Phase::Selecting
        } else {
            Phase::Idle
        }
    }

    pub fn goal_progress(&self) -> GoalProgress {
        goal_progress(i64::from(self.score), &self.goals)
    }

    /// Toggle selection of `slot`
    ///
    /// Selecting the already-selected slot clears the selection. Returns the
    /// selection after the call.
    pub fn select_slot(&mut self, slot: usize) -> Result<Option<usize>, PlacementError> {
        self.ensure_accepting()?;
        self.check_slot(slot)?;

        if self.selected == Some(slot) {
            self.selected = None;
            self.status.clear();
        } else {
            self.selected = Some(slot);
            self.status = STATUS_SELECT_PROMPT.to_string();
        }
        Ok(self.selected)
    }

    pub fn deselect(&mut self) {
        if self.pending.is_none() && self.selected.take().is_some() {
            self.status.clear();
        }
    }

    /// Where `slot`'s piece would land with its origin at (x, y)
    ///
    /// `None` when the slot is empty or out of range.
    pub fn preview(&self, slot: usize, x: usize, y: usize) -> Option<Preview> {
        let piece = self.slot(slot)?;
        Some(Preview {
            slot,
            x,
            y,
            cells: footprint(piece, x, y, self.board.size()),
            valid: self.board.is_valid_placement(piece, x, y),
        })
    }

    /// Place the selected piece with its origin at (x, y)
    pub fn place_selected(&mut self, x: usize, y: usize) -> Result<TurnOutcome, PlacementError> {
        self.ensure_accepting()?;
        let slot = self.selected.ok_or(PlacementError::NoSelection)?;
        self.attempt_placement(slot, x, y)
    }

    /// Validate and write a placement, leaving the turn to resolve
    ///
    /// On success the piece is on the board, its points are scored, the slot
    /// and selection are cleared and the session is `Resolving` until
    /// [`finish_turn`](Self::finish_turn). Every rejection leaves the board,
    /// slots and score untouched.
    pub fn begin_placement(
        &mut self,
        slot: usize,
        x: usize,
        y: usize,
    ) -> Result<PendingClear, PlacementError> {
        let pending = self.accept_placement(slot, x, y)?;
        self.pending = Some(pending.clone());
        Ok(pending)
    }

    /// Resolve the turn started by `begin_placement`
    ///
    /// Returns `None` when nothing is pending.
    pub fn finish_turn(&mut self) -> Option<TurnOutcome> {
        let pending = self.pending.take()?;
        Some(self.resolve(pending))
    }

    /// Place and fully resolve a turn in one call
    pub fn attempt_placement(
        &mut self,
        slot: usize,
        x: usize,
        y: usize,
    ) -> Result<TurnOutcome, PlacementError> {
        let pending = self.accept_placement(slot, x, y)?;
        Ok(self.resolve(pending))
    }

    /// Start a new episode, keeping the best score
    ///
    /// A turn still resolving is finished first, so its points count toward
    /// the best score.
    pub fn restart(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.resolve(pending);
        }
        self.board.clear();
        self.slots.iter_mut().for_each(|s| *s = None);
        self.selected = None;
        self.pending = None;
        self.score = 0;
        self.combo = INITIAL_COMBO;
        self.game_over = false;
        self.status.clear();
        self.turn = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.deal();
        self.check_game_over();
        info!("[Session] restart: episode {}", self.episode_id);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board_size = self.board.size();
        out.board = self.board.to_rows();
        out.slots.clone_from(&self.slots);
        out.selected = self.selected;
        out.score = self.score;
        out.best = self.best;
        out.combo = self.combo;
        out.phase = self.phase();
        out.game_over = self.game_over;
        out.goal = self.goal_progress();
        out.status.clone_from(&self.status);
        out.pending = self.pending_lines().cloned();
        out.episode_id = self.episode_id;
        out.turn = self.turn;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn ensure_accepting(&self) -> Result<(), PlacementError> {
        if self.game_over {
            return Err(PlacementError::GameOver);
        }
        if self.pending.is_some() {
            return Err(PlacementError::StateLocked);
        }
        Ok(())
    }

    fn check_slot(&self, slot: usize) -> Result<&Piece, PlacementError> {
        let slot_count = self.slots.len();
        match self.slots.get(slot) {
            None => Err(PlacementError::SlotOutOfRange { slot, slot_count }),
            Some(None) => Err(PlacementError::NoPieceInSlot { slot }),
            Some(Some(piece)) => Ok(piece),
        }
    }

    fn accept_placement(
        &mut self,
        slot: usize,
        x: usize,
        y: usize,
    ) -> Result<PendingClear, PlacementError> {
        self.ensure_accepting()?;
        let piece = self.check_slot(slot)?.clone();

        let placed_cells = match self.board.place(&piece, x, y) {
            Ok(n) => n,
            Err(_) => {
                self.status = STATUS_INVALID_PLACEMENT.to_string();
                return Err(PlacementError::InvalidPlacement { slot, x, y });
            }
        };

        let placement_points = placement_score(&piece);
        self.score = self.score.saturating_add(placement_points);
        self.slots[slot] = None;
        self.selected = None;
        self.turn = self.turn.wrapping_add(1);
        self.status.clear();

        let lines = find_full_lines(&self.board);
        debug!(
            "[Session] turn {}: slot {} at ({}, {}) +{} pts, {} full lines",
            self.turn,
            slot,
            x,
            y,
            placement_points,
            lines.count()
        );

        Ok(PendingClear {
            slot,
            x,
            y,
            placed_cells,
            placement_points,
            lines,
        })
    }

    fn resolve(&mut self, pending: PendingClear) -> TurnOutcome {
        let PendingClear {
            slot,
            x,
            y,
            placed_cells,
            placement_points,
            lines,
        } = pending;

        let cleared_cells = clear_lines(&mut self.board, &lines);
        // `combo` is INITIAL_COMBO plus the clearing turns in a row so far; the
        // bonus is paid on the streak that preceded this clear.
        let gain = calculate_clear_gain(lines.count(), self.combo.saturating_sub(INITIAL_COMBO));
        self.combo = if lines.is_empty() {
            INITIAL_COMBO
        } else {
            self.combo.saturating_add(1)
        };
        let gain = ClearGain {
            next_combo: self.combo,
            ..gain
        };
        self.score = self.score.saturating_add(gain.gained);
        if !lines.is_empty() {
            self.status = lines_cleared_status(lines.count());
            debug!(
                "[Session] cleared rows {:?} cols {:?}: +{} pts, combo {}",
                lines.rows, lines.cols, gain.gained, self.combo
            );
        }

        let refilled = self.refill_if_empty();
        let new_best = self.update_best();
        let game_over = self.check_game_over();

        TurnOutcome {
            slot,
            x,
            y,
            placed_cells,
            placement_points,
            lines,
            cleared_cells,
            gain,
            refilled,
            new_best,
            game_over,
            score: self.score,
        }
    }

    /// Fill every slot with a fresh random piece
    fn deal(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Some(self.catalog.random_piece(&mut self.rng));
        }
    }

    fn refill_if_empty(&mut self) -> bool {
        if self.slots.iter().any(Option::is_some) {
            return false;
        }
        self.deal();
        debug!("[Session] dealt {} new pieces", self.slots.len());
        true
    }

    fn update_best(&mut self) -> bool {
        if self.score <= self.best {
            return false;
        }
        self.best = self.score;
        if let Err(e) = save_best_score(&mut self.store, self.best) {
            warn!("[Session] failed to persist best score {}: {}", self.best, e);
        }
        info!("[Session] new best score: {}", self.best);
        true
    }

    /// Flag game over when no remaining piece fits anywhere
    ///
    /// Sessions with no pieces left are never over; they are about to refill.
    fn check_game_over(&mut self) -> bool {
        if self.game_over {
            return true;
        }
        let mut remaining = self.slots.iter().flatten().peekable();
        if remaining.peek().is_none() {
            return false;
        }
        if remaining.any(|piece| self.board.has_any_valid_move(piece)) {
            return false;
        }

        self.game_over = true;
        self.selected = None;
        self.status = STATUS_GAME_OVER.to_string();
        info!(
            "[Session] game over: score {}, best {}, {} turns",
            self.score, self.best, self.turn
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use crate::types::Cell;

    // Indices into the standard library.
    const SINGLE: u32 = 0;
    const DOMINO_H: u32 = 1;
    const SQUARE: u32 = 7;

    fn scripted(values: &[u32]) -> GameSession<ScriptedRng, MemoryStore> {
        GameSession::with_parts(
            GameConfig::default(),
            ScriptedRng::new(values.to_vec()),
            MemoryStore::new(),
        )
        .unwrap()
    }

    fn single() -> Piece {
        Piece::new(&[(0, 0)]).unwrap()
    }

    #[test]
    fn test_new_session_is_idle_with_full_slots() {
        let session = GameSession::new(GameConfig::default()).unwrap();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.slot_count(), 3);
        assert!(session.slots().iter().all(Option::is_some));
        assert_eq!(session.score(), 0);
        assert_eq!(session.combo(), INITIAL_COMBO);
        assert!(session.board().is_empty());
    }

    #[test]
    fn test_placement_scores_piece_size() {
        let mut session = scripted(&[SQUARE]);
        let outcome = session.attempt_placement(0, 3, 3).unwrap();
        assert_eq!(outcome.placed_cells, 4);
        assert_eq!(outcome.placement_points, 4);
        assert!(outcome.lines.is_empty());
        assert_eq!(session.score(), 4);
        assert!(session.slot(0).is_none());
        assert!(session.board().is_filled(4, 4));
        assert_eq!(session.turn(), 1);
    }

    #[test]
    fn test_invalid_placement_changes_nothing_but_status() {
        let mut session = scripted(&[SQUARE]);
        session.select_slot(0).unwrap();
        let before = session.board().clone();

        let err = session.attempt_placement(0, 7, 7).unwrap_err();
        assert_eq!(err, PlacementError::InvalidPlacement { slot: 0, x: 7, y: 7 });
        assert_eq!(session.board(), &before);
        assert_eq!(session.score(), 0);
        assert!(session.slot(0).is_some());
        assert_eq!(session.phase(), Phase::Selecting);
        assert_eq!(session.status(), STATUS_INVALID_PLACEMENT);
    }

    #[test]
    fn test_used_slot_is_noop() {
        let mut session = scripted(&[SINGLE]);
        session.attempt_placement(1, 0, 0).unwrap();
        let err = session.attempt_placement(1, 1, 1).unwrap_err();
        assert_eq!(err, PlacementError::NoPieceInSlot { slot: 1 });
        assert!(err.is_noop());
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_slot_out_of_range() {
        let mut session = scripted(&[SINGLE]);
        assert_eq!(
            session.select_slot(3),
            Err(PlacementError::SlotOutOfRange {
                slot: 3,
                slot_count: 3
            })
        );
    }

    #[test]
    fn test_select_toggles() {
        let mut session = scripted(&[SINGLE]);
        assert_eq!(session.select_slot(1), Ok(Some(1)));
        assert_eq!(session.phase(), Phase::Selecting);
        assert_eq!(session.select_slot(2), Ok(Some(2)));
        assert_eq!(session.select_slot(2), Ok(None));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_selection_drives_status_prompt() {
        let mut session = scripted(&[SINGLE]);
        assert_eq!(session.status(), "");

        session.select_slot(0).unwrap();
        assert_eq!(session.status(), STATUS_SELECT_PROMPT);
        session.select_slot(1).unwrap();
        assert_eq!(session.status(), STATUS_SELECT_PROMPT);

        session.select_slot(1).unwrap();
        assert_eq!(session.selected(), None);
        assert_eq!(session.status(), "");

        session.select_slot(2).unwrap();
        session.deselect();
        assert_eq!(session.status(), "");
    }

    #[test]
    fn test_place_selected_requires_selection() {
        let mut session = scripted(&[SINGLE]);
        assert_eq!(
            session.place_selected(0, 0),
            Err(PlacementError::NoSelection)
        );
        session.select_slot(2).unwrap();
        session.place_selected(4, 4).unwrap();
        assert!(session.slot(2).is_none());
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_two_phase_turn_locks_session() {
        let board = Board::from_rows(&[
            vec![1, 1, 1, 1, 1, 1, 1, 0],
            vec![0; 8],
            vec![0; 8],
            vec![0; 8],
            vec![0; 8],
            vec![0; 8],
            vec![0; 8],
            vec![0; 8],
        ])
        .unwrap();
        let mut session = scripted(&[SINGLE]).with_board(board).unwrap();

        let pending = session.begin_placement(0, 7, 0).unwrap();
        assert_eq!(pending.lines.rows, vec![0]);
        assert_eq!(session.phase(), Phase::Resolving);
        assert_eq!(session.pending_lines(), Some(&pending.lines));
        // Row is still on the board until the turn finishes.
        assert!(session.board().is_row_full(0));

        assert_eq!(
            session.attempt_placement(1, 0, 5),
            Err(PlacementError::StateLocked)
        );
        assert_eq!(session.select_slot(1), Err(PlacementError::StateLocked));

        let outcome = session.finish_turn().unwrap();
        assert_eq!(outcome.lines.count(), 1);
        assert_eq!(outcome.cleared_cells, 8);
        // First clear of a streak carries no bonus.
        assert_eq!(outcome.gain.gained, 25);
        assert_eq!(outcome.gain.next_combo, 2);
        assert_eq!(session.score(), 1 + 25);
        assert_eq!(session.combo(), 2);
        assert_eq!(session.status(), "1 line cleared!");
        assert!(session.board().is_empty());
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.finish_turn().is_none());
    }

    #[test]
    fn test_miss_resets_combo() {
        let board = Board::from_rows(&[
            vec![1, 1, 1, 1, 1, 1, 1, 0],
            vec![1, 1, 1, 1, 1, 1, 1, 0],
            vec![0; 8],
            vec![0; 8],
            vec![0; 8],
            vec![0; 8],
            vec![0; 8],
            vec![0; 8],
        ])
        .unwrap();
        let mut session = scripted(&[SINGLE]).with_board(board).unwrap();

        session.attempt_placement(0, 7, 0).unwrap();
        assert_eq!(session.combo(), 2);
        let second = session.attempt_placement(1, 7, 1).unwrap();
        assert_eq!(second.gain.gained, 25 + 8);
        assert_eq!(session.combo(), 3);

        let miss = session.attempt_placement(2, 3, 5).unwrap();
        assert!(miss.lines.is_empty());
        assert_eq!(session.combo(), INITIAL_COMBO);
    }

    #[test]
    fn test_refill_only_after_last_slot() {
        let mut session = scripted(&[SINGLE]);
        assert!(!session.attempt_placement(0, 0, 0).unwrap().refilled);
        assert!(!session.attempt_placement(1, 2, 0).unwrap().refilled);
        let last = session.attempt_placement(2, 4, 0).unwrap();
        assert!(last.refilled);
        assert!(session.slots().iter().all(Option::is_some));
    }

    #[test]
    fn test_game_over_when_nothing_fits() {
        let mut rows = vec![vec![1u8; 8]; 8];
        for row in rows.iter_mut() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = ((x % 2) == 0) as u8;
            }
        }
        // Columns alternate full/empty; a horizontal domino never fits.
        let board = Board::from_rows(&rows).unwrap();
        let session = scripted(&[DOMINO_H]).with_board(board).unwrap();
        assert!(session.is_game_over());
        assert_eq!(session.phase(), Phase::GameOver);
        assert_eq!(session.status(), STATUS_GAME_OVER);
    }

    #[test]
    fn test_game_over_rejects_everything_but_restart() {
        let mut rows = vec![vec![0u8; 8]; 8];
        for row in rows.iter_mut() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = (x % 2) as u8;
            }
        }
        let board = Board::from_rows(&rows).unwrap();
        let mut session = scripted(&[DOMINO_H]).with_board(board).unwrap();
        assert_eq!(session.select_slot(0), Err(PlacementError::GameOver));
        assert_eq!(
            session.attempt_placement(0, 0, 0),
            Err(PlacementError::GameOver)
        );

        session.restart();
        assert!(!session.is_game_over());
        assert!(session.board().is_empty());
        assert_eq!(session.episode_id(), 1);
    }

    #[test]
    fn test_game_over_after_turn_that_blocks_last_piece() {
        let mut rows = vec![vec![1u8; 8]; 8];
        rows[0][0] = 0;
        rows[7][7] = 0;
        let board = Board::from_rows(&rows).unwrap();
        let session = scripted(&[SQUARE]).with_board(board).unwrap();
        // Squares cannot fit anywhere on a board with two holes.
        assert!(session.is_game_over());

        // Checkerboard: singles fit, dominoes never do.
        let rows: Vec<Vec<u8>> = (0..8)
            .map(|y| (0..8).map(|x| ((x + y) % 2 == 0) as u8).collect())
            .collect();
        let board = Board::from_rows(&rows).unwrap();
        let mut session = scripted(&[SINGLE])
            .with_board(board)
            .unwrap()
            .with_slots(vec![Some(single()), None, Some(Piece::new(&[(0, 0), (1, 0)]).unwrap())])
            .unwrap();
        assert!(!session.is_game_over());
        let outcome = session.attempt_placement(0, 1, 0).unwrap();
        assert!(outcome.game_over);
        assert!(session.is_game_over());
    }

    #[test]
    fn test_best_score_persists_and_survives_restart() {
        let mut session = GameSession::with_parts(
            GameConfig::default(),
            ScriptedRng::new(vec![SQUARE]),
            MemoryStore::with_best_score(6),
        )
        .unwrap();
        assert_eq!(session.best(), 6);

        assert!(!session.attempt_placement(0, 0, 0).unwrap().new_best);
        assert!(session.attempt_placement(1, 2, 0).unwrap().new_best);
        assert_eq!(session.best(), 8);
        assert_eq!(load_best_score(session.store()), 8);

        session.restart();
        assert_eq!(session.score(), 0);
        assert_eq!(session.best(), 8);
    }

    #[test]
    fn test_restart_while_resolving_finishes_turn_first() {
        let board = Board::from_rows(&[
            vec![1, 1, 1, 1, 1, 1, 1, 0],
            vec![0; 8],
            vec![0; 8],
            vec![0; 8],
            vec![0; 8],
            vec![0; 8],
            vec![0; 8],
            vec![0; 8],
        ])
        .unwrap();
        let mut session = scripted(&[SINGLE]).with_board(board).unwrap();
        assert_eq!(session.best(), 0);

        session.begin_placement(0, 7, 0).unwrap();
        assert_eq!(session.phase(), Phase::Resolving);
        assert_eq!(session.score(), 1);

        session.restart();
        assert_eq!(session.best(), 1 + 25);
        assert_eq!(load_best_score(session.store()), 26);
        assert_eq!(session.score(), 0);
        assert_eq!(session.combo(), INITIAL_COMBO);
        assert_eq!(session.phase(), Phase::Idle);
        assert!(session.board().is_empty());
        assert!(session.finish_turn().is_none());
    }

    #[test]
    fn test_preview_reports_validity() {
        let session = scripted(&[SQUARE]);
        let ok = session.preview(0, 2, 2).unwrap();
        assert!(ok.valid);
        assert_eq!(ok.cells, vec![(2, 2), (3, 2), (2, 3), (3, 3)]);

        let edge = session.preview(0, 7, 7).unwrap();
        assert!(!edge.valid);
        assert_eq!(edge.cells, vec![(7, 7)]);

        assert!(session.preview(9, 0, 0).is_none());
    }

    #[test]
    fn test_snapshot_matches_session() {
        let mut session = scripted(&[SINGLE]);
        session.attempt_placement(0, 1, 2).unwrap();
        session.select_slot(1).unwrap();

        let snap = session.snapshot();
        assert_eq!(snap.board_size, 8);
        assert!(snap.cell(1, 2));
        assert_eq!(snap.score, 1);
        assert_eq!(snap.phase, Phase::Selecting);
        assert_eq!(snap.selected, Some(1));
        assert!(snap.slots[0].is_none());
        assert_eq!(snap.goal.target, 100);
        assert_eq!(snap.turn, 1);
    }

    #[test]
    fn test_with_board_rejects_size_mismatch() {
        let session = scripted(&[SINGLE]);
        assert!(matches!(
            session.with_board(Board::new(5).unwrap()),
            Err(CoreError::InvalidBoardSize { size: 5 })
        ));
    }

    #[test]
    fn test_double_line_clear_counts_intersection_twice() {
        let mut board = Board::new(8).unwrap();
        for i in 0..8 {
            if i != 4 {
                board.set(i, 4, Cell::Filled);
                board.set(4, i, Cell::Filled);
            }
        }
        let mut session = scripted(&[SINGLE]).with_board(board).unwrap();
        let outcome = session.attempt_placement(0, 4, 4).unwrap();
        assert_eq!(outcome.lines.count(), 2);
        assert_eq!(outcome.cleared_cells, 15);
        assert_eq!(outcome.gain.gained, 50);
        assert!(session.board().is_empty());
        assert_eq!(session.status(), "2 lines cleared!");
    }
}
