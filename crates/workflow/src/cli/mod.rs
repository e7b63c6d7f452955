mod commands;

pub mod balance;
pub mod deposit;
pub mod download;
pub mod menu;
pub mod network;
pub mod providers;
pub mod store;
pub mod workflow_cmd;

// Re-export all items from commands module
pub use commands::*;
