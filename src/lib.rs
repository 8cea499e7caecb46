//! Block Blast (workspace facade crate).
//!
//! Re-exports the member crates as `block_blast::{core,engine,input,term,types}`
//! so binaries, tests and benches need a single dependency.

pub use block_blast_core as core;
pub use block_blast_engine as engine;
pub use block_blast_input as input;
pub use block_blast_term as term;
pub use block_blast_types as types;
