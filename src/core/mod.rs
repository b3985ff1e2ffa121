pub mod config;
pub mod error;
pub mod keyring;
pub mod session;
pub mod session_store;
