//! Tile Sequence (workspace facade crate).
//!
//! Re-exports the `tile_seq::{core,engine,types}` API; the implementation lives in dedicated
//! crates under `crates/`.

pub use tile_seq_core as core;
pub use tile_seq_engine as engine;
pub use tile_seq_types as types;
