// rulecraft/src/commands/mod.rs

pub mod author;
pub mod inspect;
pub mod render;
pub mod rules;
pub mod shell;
pub mod suggest;
pub mod tables;
