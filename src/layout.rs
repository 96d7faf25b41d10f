pub mod anchor;
pub mod cascade;
pub mod cell;
pub mod grid;
pub mod stack;
