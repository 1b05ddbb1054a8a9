pub mod config;
pub mod consolidation;
pub mod export;
pub mod import;
pub mod reset;
