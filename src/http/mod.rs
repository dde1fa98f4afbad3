//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID + trace layers)
//!     → handler.rs (path check, `cep` extraction via request.rs)
//!     → race::RaceCoordinator (both providers, 1s deadline)
//!     → response.rs (verdict → status, headers, body)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeUuidRequestId, X_REQUEST_ID};
pub use response::X_CEP_PROVIDER;
pub use server::{AppState, HttpServer};
