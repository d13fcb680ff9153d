pub mod config;
pub mod dialog;
pub mod error;
pub mod prompt;
pub mod session;
