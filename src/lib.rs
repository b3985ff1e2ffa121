//! Charsession is a client for the Character.AI beta HTTP API that manages
//! authentication state and resolves chat histories.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns session state, the authentication state machine, header
//!   derivation, configuration, and keyring-backed session persistence.
//! - [`chat`] resolves a character (and optional prior history) into a
//!   usable conversation, creating one when the service has none.
//! - [`api`] defines wire payloads, endpoint paths, the HTTP transport, and
//!   the plain catalog fetch endpoints.
//! - [`client`] ties everything together behind a single [`Client`] value.
//!
//! Nothing here keeps process-wide state: every session lives inside the
//! [`crate::core::session::SessionContext`] owned by the caller.

pub mod api;
pub mod chat;
pub mod client;
pub mod core;
pub mod logging;
pub mod utils;

pub use crate::client::Client;
pub use crate::core::error::ClientError;
