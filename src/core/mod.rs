// bzexclude - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library and regex only.
// Must NOT depend on: ui, platform, app, or any I/O.

pub mod model;
pub mod rules;
pub mod splice;
