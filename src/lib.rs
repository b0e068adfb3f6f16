//! Polytris (workspace facade crate).
//!
//! Re-exports the engine, input, terminal and shared-type crates under one
//! name, plus the command-line options of the `polytris` binary.

pub use polytris_core as core;
pub use polytris_input as input;
pub use polytris_term as term;
pub use polytris_types as types;

pub mod options;

pub use options::Options;
