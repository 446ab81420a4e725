// sandtable/src/commands/mod.rs

pub mod classify;
pub mod codes;
pub mod validate;
