//! blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name as
//! `blockfall::{types, core, engine, input, term}`, while the implementation
//! lives in dedicated crates under `crates/`.

pub mod logging;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
