//! Headless driving helpers on top of the rules engine
//!
//! [`apply_intent`] is the one entry point bots, replays and tests need: it
//! turns a [`GameIntent`](block_blast_types::GameIntent) into session calls and
//! hands back a fresh snapshot. [`legal_placements`] and [`playable_slots`]
//! enumerate what the player can do next.

pub mod intents;
pub mod placements;

pub use intents::{apply_intent, IntentOutcome};
pub use placements::{legal_placements, playable_slots};
