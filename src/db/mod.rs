pub mod migrations;
pub mod setup;
pub mod store;
