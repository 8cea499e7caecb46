use block_blast_core::store::KeyValueStore;
use block_blast_core::{GameSession, GameSnapshot, PlacementError, RandomSource, TurnOutcome};
use block_blast_types::GameIntent;

/// Result of one applied intent
#[derive(Debug, Clone, PartialEq)]
pub struct IntentOutcome {
    pub snapshot: GameSnapshot,
    /// Set when the intent resolved a placement
    pub turn: Option<TurnOutcome>,
}

/// Apply `intent` to `session`
///
/// Placements are resolved in full before returning, so the snapshot never
/// shows a `Resolving` session. Rejections leave the session as the matching
/// session call does.
pub fn apply_intent<R: RandomSource, S: KeyValueStore>(
    session: &mut GameSession<R, S>,
    intent: GameIntent,
) -> Result<IntentOutcome, PlacementError> {
    let turn = match intent {
        GameIntent::Select(slot) => {
            session.select_slot(slot)?;
            None
        }
        GameIntent::Deselect => {
            session.deselect();
            None
        }
        GameIntent::Place { slot, x, y } => Some(session.attempt_placement(slot, x, y)?),
        GameIntent::PlaceSelected { x, y } => Some(session.place_selected(x, y)?),
        GameIntent::Restart => {
            session.restart();
            None
        }
    };

    if let Some(turn) = &turn {
        tracing::debug!(
            "[Engine] {} -> score {}, {} lines",
            intent.as_str(),
            turn.score,
            turn.lines.count()
        );
    }

    Ok(IntentOutcome {
        snapshot: session.snapshot(),
        turn,
    })
}
