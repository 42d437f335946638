// bzexclude - platform/mod.rs
//
// Platform abstraction layer.
// Dependencies: core model types, standard library, directories crate.
// Must NOT depend on: app, ui.

pub mod config;
pub mod fs;
