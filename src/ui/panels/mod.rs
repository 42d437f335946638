// bzexclude - ui/panels/mod.rs

pub mod about;
pub mod dialogs;
pub mod rule_list;
pub mod toolbar;
