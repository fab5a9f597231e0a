pub mod commands;
pub mod handlers;
pub mod process_command;
