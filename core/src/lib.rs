//! Typed client for the Thunes money-transfer API.
//!
//! # Overview
//! Covers discovery (services, payers, rates, countries, BIC lookups,
//! balances), credit-party checks, quotations, transactions and transaction
//! attachments. Every operation is one authenticated request/response round
//! trip; API errors come back as `ApiError`.
//!
//! # Design
//! - `ThunesClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`, so the I/O boundary is explicit.
//! - `BlockingClient` runs those round trips through a `Transport`; the
//!   default `UreqTransport` is a blocking ureq agent.
//! - Credentials come from `ClientConfig`, never from constants.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod attachment;
pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod filters;
pub mod http;
pub mod reference;
pub mod transport;
pub mod types;

pub use blocking::BlockingClient;
pub use client::ThunesClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ErrorEntry, ErrorEnvelope};
pub use filters::{Pagination, PayerFilter, ServiceFilter};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use reference::ResourceRef;
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::*;
