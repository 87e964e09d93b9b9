//! Block-stacking engine (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, benches and
//! integration tests can use `block_stack::{core, engine, types}`.

pub use block_stack_core as core;
pub use block_stack_engine as engine;
pub use block_stack_types as types;
