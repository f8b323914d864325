//! Server configuration, state and bootstrap errors
//!
//! - [`Config`]: environment-driven configuration
//! - [`ServerState`]: shared handles for handlers
//! - [`Server`]: HTTP server
//! - [`ServerError`]: bootstrap failures

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::{Server, build_app};
pub use state::ServerState;
