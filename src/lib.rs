// Public module exports for the striplog binary
pub mod cli;
pub mod config;
pub mod coordinate_mapping;
pub mod error;
pub mod extract;
#[cfg(feature = "gui")]
pub mod gui;
pub mod logging;
pub mod render;
pub mod selection;
