// bzexclude - app/mod.rs
//
// Application layer: orchestration and state management.
// Dependencies: core and platform layers.
// Must NOT depend on: ui.

pub mod exclusions;
pub mod state;
