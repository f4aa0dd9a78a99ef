//! # drs-gateway: HTTP Boundary
//!
//! Wraps outbound calls to the parsing and receipt services and normalizes
//! success/failure into a uniform `Result` shape.
//!
//! ## Module Organization
//! ```text
//! drs_gateway/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── config.rs       ◄─── Service base address + timeout
//! ├── gateway.rs      ◄─── RequestGateway trait (the test seam)
//! ├── http.rs         ◄─── HttpGateway (reqwest implementation)
//! └── error.rs        ◄─── GatewayError taxonomy
//! ```
//!
//! The `RequestGateway` trait is the sole boundary the orchestration layer
//! depends on; tests substitute an in-process double, production wires in
//! [`HttpGateway`].

pub mod config;
pub mod error;
pub mod gateway;
pub mod http;

pub use config::ServiceConfig;
pub use error::{GatewayError, GatewayResult};
pub use gateway::{PdfPayload, RequestGateway};
pub use http::HttpGateway;
