pub mod chart;
pub mod commands;
pub mod config;
pub mod errors;
pub mod records;
pub mod thinkcell;
pub mod utils;
