//! CEP lookup service.
//!
//! Resolves a Brazilian postal code by racing two public lookup providers
//! (ViaCEP and ApiCEP) and answering with whichever responds first.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /?cep=01001000
//!     ──────────────────▶ net::listener ─▶ http::server ─▶ http::handler
//!                                                            │
//!                                                            ▼
//!                                                   race::RaceCoordinator
//!                                              ┌─────────────┼─────────────┐
//!                                              ▼             ▼             ▼
//!                                        ViaCEP task    ApiCEP task    1s timer
//!                                              └──────── first wins ───────┘
//!                                                            │
//!     ◀────────────────── http::response (200/404/408/4xx/5xx)
//! ```

// Core
pub mod http;
pub mod providers;
pub mod race;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::CepConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use providers::{AddressPayload, PostalCode, Provider, ProviderOutcome, Providers};
pub use race::{RaceCoordinator, RaceResult};
