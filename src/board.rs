pub mod config;
pub mod display;
pub mod resources;
pub mod schedule;
