//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Startup
//!     → listener.rs (parse bind address, bind TCP socket)
//!     → handed to http::HttpServer::run
//! ```

pub mod listener;

pub use listener::{bind, ListenerError};
