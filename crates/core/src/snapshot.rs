//! Read-only views of a session for renderers and serializers

use serde::{Serialize, Serializer};

use crate::lines::FullLines;
use crate::pieces::Piece;
use crate::scoring::{ClearGain, GoalProgress};
use crate::types::{Offset, Phase, DEFAULT_BOARD_SIZE};

/// Full copy of everything a front-end needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub board_size: u8,
    /// Row-major 0/1 grid
    pub board: Vec<Vec<u8>>,
    pub slots: Vec<Option<Piece>>,
    pub selected: Option<usize>,
    pub score: u32,
    pub best: u32,
    pub combo: u32,
    #[serde(serialize_with = "serialize_phase")]
    pub phase: Phase,
    pub game_over: bool,
    pub goal: GoalProgress,
    pub status: String,
    /// Lines waiting to burst while the session is resolving
    pub pending: Option<FullLines>,
    pub episode_id: u32,
    pub turn: u32,
}

fn serialize_phase<S: Serializer>(phase: &Phase, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(phase.as_str())
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board_size = DEFAULT_BOARD_SIZE;
        self.board.clear();
        self.slots.clear();
        self.selected = None;
        self.score = 0;
        self.best = 0;
        self.combo = 0;
        self.phase = Phase::Idle;
        self.game_over = false;
        self.goal = GoalProgress::default();
        self.status.clear();
        self.pending = None;
        self.episode_id = 0;
        self.turn = 0;
    }

    /// Whether the session would accept a placement right now
    pub fn playable(&self) -> bool {
        self.phase.accepts_placement()
    }

    pub fn cell(&self, x: usize, y: usize) -> bool {
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .is_some_and(|&v| v != 0)
    }

    /// Whether (x, y) is about to be cleared
    pub fn is_bursting(&self, x: usize, y: usize) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|lines| lines.covers(x, y))
    }

    pub fn selected_piece(&self) -> Option<&Piece> {
        self.selected
            .and_then(|i| self.slots.get(i))
            .and_then(|slot| slot.as_ref())
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            board: Vec::new(),
            slots: Vec::new(),
            selected: None,
            score: 0,
            best: 0,
            combo: 0,
            phase: Phase::Idle,
            game_over: false,
            goal: GoalProgress::default(),
            status: String::new(),
            pending: None,
            episode_id: 0,
            turn: 0,
        }
    }
}

/// Hover preview of a piece at an anchor
///
/// `cells` holds only the on-board footprint; `valid` says whether the whole
/// piece would fit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub slot: usize,
    pub x: usize,
    pub y: usize,
    pub cells: Vec<(usize, usize)>,
    pub valid: bool,
}

/// What a successful `begin_placement` left waiting to resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingClear {
    pub slot: usize,
    pub x: usize,
    pub y: usize,
    pub placed_cells: usize,
    pub placement_points: u32,
    pub lines: FullLines,
}

/// Everything that happened during one resolved turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnOutcome {
    pub slot: usize,
    pub x: usize,
    pub y: usize,
    pub placed_cells: usize,
    pub placement_points: u32,
    pub lines: FullLines,
    /// Distinct cells emptied by the clear
    pub cleared_cells: usize,
    pub gain: ClearGain,
    /// Whether a fresh batch was dealt
    pub refilled: bool,
    pub new_best: bool,
    pub game_over: bool,
    /// Score after the turn
    pub score: u32,
}

/// Piece cells as absolute board coordinates, dropping any that leave the board
pub fn footprint(piece: &Piece, x: usize, y: usize, size: u8) -> Vec<(usize, usize)> {
    let side = size as usize;
    piece
        .cells()
        .iter()
        .filter_map(|&(dx, dy): &Offset| {
            let cx = x.checked_add(dx as usize)?;
            let cy = y.checked_add(dy as usize)?;
            (cx < side && cy < side).then_some((cx, cy))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_is_idle() {
        let s = GameSnapshot::default();
        assert_eq!(s.phase, Phase::Idle);
        assert!(s.playable());
        assert!(!s.cell(0, 0));
        assert!(s.selected_piece().is_none());
    }

    #[test]
    fn test_bursting_follows_pending_lines() {
        let mut s = GameSnapshot::default();
        assert!(!s.is_bursting(0, 2));
        s.pending = Some(FullLines {
            rows: vec![2],
            cols: vec![],
        });
        assert!(s.is_bursting(5, 2));
        assert!(!s.is_bursting(5, 3));
    }

    #[test]
    fn test_footprint_drops_off_board_cells() {
        let piece = Piece::new(&[(0, 0), (1, 0), (2, 0)]).unwrap();
        assert_eq!(footprint(&piece, 6, 0, 8), vec![(6, 0), (7, 0)]);
        assert_eq!(footprint(&piece, 9, 9, 8), vec![]);
    }
}
